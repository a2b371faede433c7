use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Maximum number of letters in a column identifier.
pub const MAX_COLUMN_LETTERS: usize = 3;

/// Ordinal of "ZZZ", the last representable column.
const MAX_ORDINAL: u32 = 26 + 26 * 26 + 26 * 26 * 26;

/// Spreadsheet column identifier ("A", "B", ..., "Z", "AA", ..., "ZZZ").
///
/// The letters form a bijective base-26 numeral: there is no zero digit, so
/// "A" is 1, "Z" is 26 and "AA" is 27. The value is kept as that ordinal and
/// rendered back to letters on demand, so ordering and arithmetic follow the
/// column order directly.
///
/// Every operation returns a new value. Arithmetic that would leave the range
/// "A" ..= "ZZZ" fails with [`Error::Underflow`] or [`Error::Overflow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnId {
    ordinal: u16,
}

impl ColumnId {
    /// Column "A".
    pub const FIRST: ColumnId = ColumnId { ordinal: 1 };
    /// Column "ZZZ".
    pub const LAST: ColumnId = ColumnId {
        ordinal: MAX_ORDINAL as u16,
    };

    /// Parse exactly one to three uppercase ASCII letters.
    pub fn parse(text: &str) -> Result<Self> {
        col_name_to_ordinal(text)
            .map(|ordinal| Self {
                ordinal: ordinal as u16,
            })
            .ok_or_else(|| Error::Syntax {
                input: text.to_string(),
            })
    }

    /// Column for a zero-based index, as used by the xlsx writer.
    #[must_use]
    pub fn from_index(index: u32) -> Option<Self> {
        let ordinal = index.checked_add(1)?;

        (ordinal <= MAX_ORDINAL).then_some(Self {
            ordinal: ordinal as u16,
        })
    }

    /// One-based position in column order ("A" is 1).
    #[must_use]
    pub fn ordinal(self) -> u32 {
        u32::from(self.ordinal)
    }

    /// Zero-based index ("A" is 0).
    #[must_use]
    pub fn index(self) -> u16 {
        self.ordinal - 1
    }

    /// Next column: "Z" becomes "AA", "ZZ" becomes "AAA".
    pub fn increment(self) -> Result<Self> {
        self.shift(1, "increment")
    }

    /// Previous column: "AA" becomes "Z", "BA" becomes "AZ".
    pub fn decrement(self) -> Result<Self> {
        self.shift(-1, "decrement")
    }

    /// Column `offset` positions away; negative offsets move left.
    pub fn add(self, offset: i64) -> Result<Self> {
        self.shift(offset, "add")
    }

    fn shift(self, offset: i64, operation: &'static str) -> Result<Self> {
        let target = i64::from(self.ordinal).saturating_add(offset);

        if target < 1 {
            return Err(Error::Underflow {
                column: self,
                operation,
            });
        }

        if target > i64::from(MAX_ORDINAL) {
            return Err(Error::Overflow {
                column: self,
                operation,
            });
        }

        Ok(Self {
            ordinal: target as u16,
        })
    }
}

#[must_use]
fn col_name_to_ordinal(name: &str) -> Option<u32> {
    if name.is_empty() || name.len() > MAX_COLUMN_LETTERS {
        return None;
    }

    name.bytes().try_fold(0u32, |acc, c| {
        c.is_ascii_uppercase()
            .then(|| acc * 26 + u32::from(c - b'A' + 1))
    })
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = [0u8; MAX_COLUMN_LETTERS];
        let mut start = MAX_COLUMN_LETTERS;
        let mut n = u32::from(self.ordinal);

        while n > 0 {
            let remainder = (n - 1) % 26;
            start -= 1;
            letters[start] = b'A' + remainder as u8;
            n = (n - 1) / 26;
        }

        letters[start..]
            .iter()
            .try_for_each(|&c| fmt::Write::write_char(f, char::from(c)))
    }
}

impl FromStr for ColumnId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ColumnId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for ColumnId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ColumnId> for String {
    fn from(col: ColumnId) -> Self {
        col.to_string()
    }
}

/// Anything that names a column: a [`ColumnId`] or its letters.
pub trait IntoColumn {
    fn into_column(self) -> Result<ColumnId>;
}

impl IntoColumn for ColumnId {
    fn into_column(self) -> Result<ColumnId> {
        Ok(self)
    }
}

impl IntoColumn for &ColumnId {
    fn into_column(self) -> Result<ColumnId> {
        Ok(*self)
    }
}

impl IntoColumn for &str {
    fn into_column(self) -> Result<ColumnId> {
        ColumnId::parse(self)
    }
}

impl IntoColumn for String {
    fn into_column(self) -> Result<ColumnId> {
        ColumnId::parse(&self)
    }
}
