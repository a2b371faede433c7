/// Render a number the way a cell displays it: integral values without a
/// fractional part.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// Replace every run of ASCII whitespace with a single space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                collapsed.push(' ');
            }
            in_space = true;
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }

    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(44.0), "44");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2.71), "2.71");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("\n Lorem\t ipsum \n "), " Lorem ipsum ");
        assert_eq!(collapse_whitespace("plain"), "plain");
    }
}
