use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::excel::ColumnId;

/// Excel worksheet maximum row count.
pub const MAX_ROWS: u32 = 1_048_576;
/// Excel worksheet maximum column count; the last column is "XFD".
pub const MAX_COLUMNS: u16 = 16_384;

/// Address of a single cell, e.g. "B24".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub col: ColumnId,
    pub row: u32,
}

impl CellRef {
    /// Cell inside the worksheet limits: rows 1 to 1048576, columns "A"
    /// to "XFD".
    pub fn new(col: ColumnId, row: u32) -> Result<Self> {
        let row = check_row(row)?;
        let col = check_col(col).map_err(|_| Error::InvalidCoordinate {
            input: format!("{col}{row}"),
        })?;

        Ok(Self { col, row })
    }

    /// Parse "B24": letters up to the first digit, then a 1-based row.
    pub fn parse(coordinate: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoordinate {
            input: coordinate.to_string(),
        };

        let split = coordinate
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = coordinate.split_at(split);

        let col = ColumnId::parse(letters).map_err(|_| invalid())?;
        let row = digits.parse::<u32>().map_err(|_| invalid())?;

        Self::new(col, row).map_err(|_| invalid())
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col, self.row)
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Rectangular range between two corners, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first: CellRef,
    pub last: CellRef,
}

impl CellRange {
    /// Range spanning both cells, whatever order they are given in.
    pub fn new(a: CellRef, b: CellRef) -> Self {
        Self {
            first: CellRef {
                col: a.col.min(b.col),
                row: a.row.min(b.row),
            },
            last: CellRef {
                col: a.col.max(b.col),
                row: a.row.max(b.row),
            },
        }
    }

    /// Parse "D7:F7" or a single coordinate.
    pub fn parse(range: &str) -> Result<Self> {
        match range.split_once(':') {
            Some((first, last)) => Ok(Self::new(CellRef::parse(first)?, CellRef::parse(last)?)),
            None => {
                let cell = CellRef::parse(range)?;
                Ok(Self::new(cell, cell))
            }
        }
    }

    /// All cells of the range, row by row.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        let cols = self.first.col.ordinal()..=self.last.col.ordinal();

        (self.first.row..=self.last.row).flat_map(move |row| {
            cols.clone().filter_map(move |ordinal| {
                ColumnId::from_index(ordinal - 1).map(|col| CellRef { col, row })
            })
        })
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.first, self.last)
    }
}

pub(crate) fn check_row(row: u32) -> Result<u32> {
    if (1..=MAX_ROWS).contains(&row) {
        Ok(row)
    } else {
        Err(Error::RowOutOfRange { row, delta: 0 })
    }
}

pub(crate) fn check_col(col: ColumnId) -> Result<ColumnId> {
    if col.index() < MAX_COLUMNS {
        Ok(col)
    } else {
        Err(Error::InvalidCoordinate {
            input: col.to_string(),
        })
    }
}

/// Row `delta` rows away from `row`, kept inside the worksheet.
pub fn offset_row(row: u32, delta: i64) -> Result<u32> {
    let target = i64::from(row).saturating_add(delta);

    if (1..=i64::from(MAX_ROWS)).contains(&target) {
        Ok(target as u32)
    } else {
        Err(Error::RowOutOfRange { row, delta })
    }
}

/// Last row of a run of `len` rows starting at `row`.
pub(crate) fn run_end(row: u32, len: usize) -> Result<u32> {
    offset_row(row, len.saturating_sub(1) as i64)
}

/// Cursor row after advancing by `n`. Stops one past the last row, where
/// the next write fails.
pub(crate) fn advance_row(row: u32, n: usize) -> u32 {
    let n = u32::try_from(n).unwrap_or(u32::MAX);
    row.saturating_add(n).min(MAX_ROWS + 1)
}

/// Cursor column after advancing by `n`. Stops one past "XFD", where the
/// next write fails.
pub(crate) fn advance_col(col: ColumnId, n: usize) -> ColumnId {
    let past_end = ColumnId::from_index(u32::from(MAX_COLUMNS)).unwrap_or(ColumnId::LAST);

    match i64::try_from(n).ok().and_then(|n| col.add(n).ok()) {
        Some(col) if col <= past_end => col,
        _ => past_end,
    }
}
