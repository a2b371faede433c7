use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatScript, FormatUnderline};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color, written as `#RRGGBB` or `RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u32);

impl Rgb {
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#').unwrap_or(text);

        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        u32::from_str_radix(hex, 16).ok().map(Rgb)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Underline {
    None,
    Single,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Superscript,
    Subscript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlign {
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    None,
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
}

/// Font attributes; `None` leaves the attribute as inherited.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<Underline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

impl Font {
    /// Overlay `other` onto `self`: set fields of `other` win.
    #[must_use]
    pub fn merge(&self, other: &Font) -> Font {
        Font {
            name: other.name.clone().or_else(|| self.name.clone()),
            size: other.size.or(self.size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            underline: other.underline.or(self.underline),
            strikethrough: other.strikethrough.or(self.strikethrough),
            script: other.script.or(self.script),
            color: other.color.or(self.color),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Font::default()
    }

    pub(crate) fn apply_to(&self, mut format: Format) -> Format {
        if let Some(name) = &self.name {
            format = format.set_font_name(name);
        }
        if let Some(size) = self.size {
            format = format.set_font_size(size);
        }
        if self.bold == Some(true) {
            format = format.set_bold();
        }
        if self.italic == Some(true) {
            format = format.set_italic();
        }
        match self.underline {
            Some(Underline::Single) => format = format.set_underline(FormatUnderline::Single),
            Some(Underline::Double) => format = format.set_underline(FormatUnderline::Double),
            Some(Underline::None) | None => {}
        }
        if self.strikethrough == Some(true) {
            format = format.set_font_strikethrough();
        }
        match self.script {
            Some(Script::Superscript) => format = format.set_font_script(FormatScript::Superscript),
            Some(Script::Subscript) => format = format.set_font_script(FormatScript::Subscript),
            None => {}
        }
        if let Some(color) = self.color {
            format = format.set_font_color(Color::RGB(color.0));
        }

        format
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Alignment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<HorizontalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VerticalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_text: Option<bool>,
}

impl Alignment {
    #[must_use]
    pub fn merge(&self, other: &Alignment) -> Alignment {
        Alignment {
            horizontal: other.horizontal.or(self.horizontal),
            vertical: other.vertical.or(self.vertical),
            wrap_text: other.wrap_text.or(self.wrap_text),
        }
    }
}

/// Cell style. Styles accumulate: applying a style to a cell merges it into
/// the style the cell already has.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    pub font: Font,
    pub alignment: Alignment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<BorderStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
}

impl Style {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn bold() -> Self {
        Self::new().with_font(Font {
            bold: Some(true),
            ..Default::default()
        })
    }

    #[must_use]
    pub fn italic() -> Self {
        Self::new().with_font(Font {
            italic: Some(true),
            ..Default::default()
        })
    }

    #[must_use]
    pub fn font_color(color: Rgb) -> Self {
        Self::new().with_font(Font {
            color: Some(color),
            ..Default::default()
        })
    }

    /// Return a new style by overlaying `other` onto `self`.
    #[must_use]
    pub fn merge(&self, other: &Style) -> Style {
        Style {
            font: self.font.merge(&other.font),
            alignment: self.alignment.merge(&other.alignment),
            fill: other.fill.or(self.fill),
            border: other.border.or(self.border),
            number_format: other
                .number_format
                .clone()
                .or_else(|| self.number_format.clone()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }

    /// Writer format carrying every attribute set in this style.
    #[must_use]
    pub fn to_format(&self) -> Format {
        let mut format = self.font.apply_to(Format::new());

        match self.alignment.horizontal {
            Some(HorizontalAlign::General) => format = format.set_align(FormatAlign::General),
            Some(HorizontalAlign::Left) => format = format.set_align(FormatAlign::Left),
            Some(HorizontalAlign::Center) => format = format.set_align(FormatAlign::Center),
            Some(HorizontalAlign::Right) => format = format.set_align(FormatAlign::Right),
            Some(HorizontalAlign::Fill) => format = format.set_align(FormatAlign::Fill),
            Some(HorizontalAlign::Justify) => format = format.set_align(FormatAlign::Justify),
            None => {}
        }
        match self.alignment.vertical {
            Some(VerticalAlign::Top) => format = format.set_align(FormatAlign::Top),
            Some(VerticalAlign::Center) => format = format.set_align(FormatAlign::VerticalCenter),
            Some(VerticalAlign::Bottom) => format = format.set_align(FormatAlign::Bottom),
            Some(VerticalAlign::Justify) => format = format.set_align(FormatAlign::VerticalJustify),
            None => {}
        }
        if self.alignment.wrap_text == Some(true) {
            format = format.set_text_wrap();
        }
        if let Some(fill) = self.fill {
            format = format.set_background_color(Color::RGB(fill.0));
        }
        if let Some(border) = self.border {
            format = format.set_border(match border {
                BorderStyle::None => FormatBorder::None,
                BorderStyle::Thin => FormatBorder::Thin,
                BorderStyle::Medium => FormatBorder::Medium,
                BorderStyle::Thick => FormatBorder::Thick,
                BorderStyle::Dashed => FormatBorder::Dashed,
                BorderStyle::Dotted => FormatBorder::Dotted,
                BorderStyle::Double => FormatBorder::Double,
            });
        }
        if let Some(number_format) = &self.number_format {
            format = format.set_num_format(number_format);
        }

        format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_overlays_set_fields() {
        let base = Style::italic().with_alignment(Alignment {
            vertical: Some(VerticalAlign::Top),
            ..Default::default()
        });
        let patch = Style::new().with_font(Font {
            size: Some(18.0),
            italic: Some(false),
            ..Default::default()
        });

        let merged = base.merge(&patch);

        assert_eq!(merged.font.italic, Some(false));
        assert_eq!(merged.font.size, Some(18.0));
        assert_eq!(merged.alignment.vertical, Some(VerticalAlign::Top));
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let style = Style::bold();
        assert_eq!(style.merge(&Style::new()), style);
        assert_eq!(Style::new().merge(&style), style);
        assert!(Style::new().is_empty());
    }

    #[test]
    fn test_rgb_parse() {
        assert_eq!(Rgb::parse("#00ff00"), Some(Rgb(0x00FF00)));
        assert_eq!(Rgb::parse("808080"), Some(Rgb(0x808080)));
        assert_eq!(Rgb::parse("#fff"), None);
        assert_eq!(Rgb::parse("#gg0000"), None);
        assert_eq!(Rgb(0x008000).to_string(), "#008000");
    }

    #[test]
    fn test_deserialize_nested_style() {
        let style: Style = serde_json::from_str(
            r##"{"font": {"bold": true, "color": "#008000"}, "alignment": {"horizontal": "right"}}"##,
        )
        .unwrap();

        assert_eq!(style.font.bold, Some(true));
        assert_eq!(style.font.color, Some(Rgb(0x008000)));
        assert_eq!(style.alignment.horizontal, Some(HorizontalAlign::Right));
        assert!(serde_json::from_str::<Style>(r#"{"fnot": {}}"#).is_err());
    }
}
