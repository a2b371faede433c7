use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::excel::coordinate::{
    advance_col, advance_row, check_col, check_row, offset_row, run_end,
};
use crate::excel::{
    Cell, CellData, CellRange, CellRef, CellValue, ColumnId, IntoColumn, PageLayout, Style,
};

/// Excel sheet name maximum length.
pub const MAX_SHEET_TITLE_LEN: usize = 31;
/// Characters not allowed in sheet names.
pub const ILLEGAL_TITLE_CHARS: [char; 7] = ['*', ':', '?', '/', '\\', '[', ']'];

pub const DEFAULT_SHEET_TITLE: &str = "Worksheet";

/// Worksheet with a current position and cursor-aware writing helpers.
///
/// The current position starts at A1. Row and column writes default to it
/// and advance it, so that consecutive calls lay out data without explicit
/// coordinates.
///
/// Advancing stops one past the last row or column. A write on the last
/// row therefore succeeds, and only the next write from the position past
/// it fails.
#[derive(Debug, Clone)]
pub struct Worksheet {
    title: String,
    layout: PageLayout,
    col: ColumnId,
    row: u32,
    cells: BTreeMap<CellRef, Cell>,
}

impl Default for Worksheet {
    fn default() -> Self {
        Self {
            title: DEFAULT_SHEET_TITLE.to_string(),
            layout: PageLayout::default(),
            col: ColumnId::FIRST,
            row: 1,
            cells: BTreeMap::new(),
        }
    }
}

impl Worksheet {
    pub fn new(title: impl Into<String>) -> Result<Self> {
        Self::with_layout(title, PageLayout::default())
    }

    pub fn with_layout(title: impl Into<String>, layout: PageLayout) -> Result<Self> {
        let title = validate_title(title.into())?;

        Ok(Self {
            title,
            layout,
            ..Default::default()
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<&mut Self> {
        self.title = validate_title(title.into())?;
        Ok(self)
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: PageLayout) -> &mut Self {
        self.layout = layout;
        self
    }

    /// Column of the current position.
    pub fn col(&self) -> ColumnId {
        self.col
    }

    /// Row of the current position.
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Current position.
    pub fn coordinate(&self) -> CellRef {
        CellRef {
            col: self.col,
            row: self.row,
        }
    }

    /// Set the current column. Columns past "XFD" are refused.
    pub fn set_col(&mut self, col: impl IntoColumn) -> Result<&mut Self> {
        self.col = check_col(col.into_column()?)?;
        Ok(self)
    }

    pub fn set_row(&mut self, row: u32) -> Result<&mut Self> {
        self.row = check_row(row)?;
        Ok(self)
    }

    pub fn set_col_row(&mut self, col: impl IntoColumn, row: u32) -> Result<&mut Self> {
        let position = CellRef::new(col.into_column()?, row)?;
        self.col = position.col;
        self.row = position.row;
        Ok(self)
    }

    /// Set the current position from a coordinate such as "B24".
    pub fn set_coordinate(&mut self, coordinate: &str) -> Result<&mut Self> {
        let position = CellRef::parse(coordinate)?;
        self.col = position.col;
        self.row = position.row;
        Ok(self)
    }

    pub fn move_col(&mut self, distance: i64) -> Result<&mut Self> {
        self.col = check_col(self.col.add(distance)?)?;
        Ok(self)
    }

    pub fn move_row(&mut self, distance: i64) -> Result<&mut Self> {
        self.row = offset_row(self.row, distance)?;
        Ok(self)
    }

    pub fn cell_at(&self, position: CellRef) -> Option<&Cell> {
        self.cells.get(&position)
    }

    /// Cell at a coordinate such as "B2", if anything was written or styled
    /// there.
    pub fn cell(&self, coordinate: &str) -> Option<&Cell> {
        CellRef::parse(coordinate)
            .ok()
            .and_then(|position| self.cell_at(position))
    }

    pub fn current_cell(&self) -> Option<&Cell> {
        self.cell_at(self.coordinate())
    }

    /// All non-blank cells.
    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.cells
            .iter()
            .filter(|(_, cell)| !cell.is_blank())
            .map(|(position, cell)| (*position, cell))
    }

    /// Write to the current position. The position does not change.
    pub fn write_cell(&mut self, data: impl Into<CellData>) -> Result<&mut Self> {
        let (value, style) = prepare(data.into())?;
        let position = CellRef::new(self.col, self.row)?;
        self.store(position, value, style);
        Ok(self)
    }

    /// Write to the given coordinate. The position does not change.
    pub fn write_cell_at(&mut self, coordinate: &str, data: impl Into<CellData>) -> Result<&mut Self> {
        let (value, style) = prepare(data.into())?;
        let position = CellRef::parse(coordinate)?;
        self.store(position, value, style);
        Ok(self)
    }

    /// Write a horizontal run at the current position and move to the next
    /// row.
    pub fn write_row<I>(&mut self, data: I, style: Option<&Style>) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<CellData>,
    {
        self.write_row_at(data, style, None, None)
    }

    /// Write a horizontal run.
    ///
    /// `col` defaults to the current column, which never changes. `row`
    /// defaults to the current row, in which case the current row advances
    /// by one after writing. `style` applies to the whole run before each
    /// item's own style. On error neither the cells nor the position change.
    pub fn write_row_at<I>(
        &mut self,
        data: I,
        style: Option<&Style>,
        col: Option<ColumnId>,
        row: Option<u32>,
    ) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<CellData>,
    {
        let items = prepare_all(data)?;
        let col = col.unwrap_or(self.col);
        let advance = row.is_none();
        let row = row.unwrap_or(self.row);

        if !items.is_empty() {
            let first = CellRef::new(col, row)?;
            let last = CellRef::new(col.add(items.len() as i64 - 1)?, row)?;
            self.store_run(CellRange::new(first, last), items, style);
        }

        if advance {
            self.row = advance_row(self.row, 1);
        }

        Ok(self)
    }

    /// Write a vertical run at the current position and move to the next
    /// column.
    pub fn write_col<I>(&mut self, data: I, style: Option<&Style>) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<CellData>,
    {
        self.write_col_at(data, style, None, None)
    }

    /// Write a vertical run.
    ///
    /// `row` defaults to the current row, which never changes. `col`
    /// defaults to the current column, in which case the current column
    /// advances by one after writing. On error neither the cells nor the
    /// position change.
    pub fn write_col_at<I>(
        &mut self,
        data: I,
        style: Option<&Style>,
        col: Option<ColumnId>,
        row: Option<u32>,
    ) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<CellData>,
    {
        let items = prepare_all(data)?;
        let advance = col.is_none();
        let col = col.unwrap_or(self.col);
        let row = row.unwrap_or(self.row);

        if !items.is_empty() {
            let first = CellRef::new(col, row)?;
            let last = CellRef::new(col, run_end(row, items.len())?)?;
            self.store_run(CellRange::new(first, last), items, style);
        }

        if advance {
            self.col = advance_col(self.col, 1);
        }

        Ok(self)
    }

    /// Merge `style` into every cell of a range such as "D7:F7".
    pub fn apply_style(&mut self, range: &str, style: &Style) -> Result<&mut Self> {
        self.apply_range(CellRange::parse(range)?, style);
        Ok(self)
    }

    /// Style successive rows between two columns, one style per row.
    ///
    /// `None` entries skip a row. Without `row` the styling starts at the
    /// current row, which then advances past the styled rows.
    pub fn format_rows(
        &mut self,
        styles: &[Option<Style>],
        from_col: impl IntoColumn,
        to_col: impl IntoColumn,
        row: Option<u32>,
    ) -> Result<&mut Self> {
        let from_col = from_col.into_column()?;
        let to_col = to_col.into_column()?;
        let advance = row.is_none();
        let row = row.unwrap_or(self.row);

        if let Some(end) = styles.iter().rposition(Option::is_some) {
            CellRef::new(from_col, row)?;
            CellRef::new(to_col, run_end(row, end + 1)?)?;

            for (offset, style) in (0u32..).zip(styles) {
                if let Some(style) = style {
                    let range = CellRange::new(
                        CellRef { col: from_col, row: row + offset },
                        CellRef { col: to_col, row: row + offset },
                    );
                    self.apply_range(range, style);
                }
            }
        }

        if advance {
            self.row = advance_row(self.row, styles.len());
        }

        Ok(self)
    }

    /// Style successive columns between two rows, one style per column.
    ///
    /// `None` entries skip a column. Without `col` the styling starts at the
    /// current column, which then advances past the styled columns.
    pub fn format_cols(
        &mut self,
        styles: &[Option<Style>],
        from_row: u32,
        to_row: u32,
        col: Option<ColumnId>,
    ) -> Result<&mut Self> {
        let advance = col.is_none();
        let col = col.unwrap_or(self.col);

        if let Some(end) = styles.iter().rposition(Option::is_some) {
            let cols = (0..=end)
                .map(|offset| col.add(offset as i64))
                .collect::<Result<Vec<_>>>()?;
            let first = CellRef::new(col, from_row)?;
            let last = CellRef::new(cols[end], to_row)?;

            for (col, style) in cols.into_iter().zip(styles) {
                if let Some(style) = style {
                    let range = CellRange::new(CellRef { col, ..first }, CellRef { col, ..last });
                    self.apply_range(range, style);
                }
            }
        }

        if advance {
            self.col = advance_col(self.col, styles.len());
        }

        Ok(self)
    }

    fn store(&mut self, position: CellRef, value: CellValue, style: Option<Style>) {
        let cell = self.cells.entry(position).or_default();
        cell.value = value;

        if let Some(style) = &style {
            cell.style = cell.style.merge(style);
        }
    }

    fn store_run(
        &mut self,
        range: CellRange,
        items: Vec<(CellValue, Option<Style>)>,
        style: Option<&Style>,
    ) {
        if let Some(style) = style {
            self.apply_range(range, style);
        }

        for (position, (value, style)) in range.cells().zip(items) {
            self.store(position, value, style);
        }
    }

    fn apply_range(&mut self, range: CellRange, style: &Style) {
        for position in range.cells() {
            let cell = self.cells.entry(position).or_default();
            cell.style = cell.style.merge(style);
        }
    }
}

/// Coerced value and own style of a cell about to be written.
fn prepare(data: CellData) -> Result<(CellValue, Option<Style>)> {
    let value = match data.data_type {
        Some(data_type) => data.value.coerce(data_type)?,
        None => data.value,
    };

    Ok((value, data.style))
}

fn prepare_all<I>(data: I) -> Result<Vec<(CellValue, Option<Style>)>>
where
    I: IntoIterator,
    I::Item: Into<CellData>,
{
    data.into_iter().map(|item| prepare(item.into())).collect()
}

fn validate_title(title: String) -> Result<String> {
    let reason = if title.is_empty() {
        Some("title is empty")
    } else if title.chars().count() > MAX_SHEET_TITLE_LEN {
        Some("title is longer than 31 characters")
    } else if title.contains(ILLEGAL_TITLE_CHARS) {
        Some("title contains one of * : ? / \\ [ ]")
    } else if title.starts_with('\'') || title.ends_with('\'') {
        Some("title starts or ends with an apostrophe")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidSheetTitle { title, reason }),
        None => Ok(title),
    }
}
