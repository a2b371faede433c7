mod cell;
mod column;
pub(crate) mod coordinate;
mod layout;
mod properties;
mod spreadsheet;
mod style;
mod worksheet;

pub use cell::{Cell, CellData, CellValue, DataType};
pub use column::{ColumnId, IntoColumn, MAX_COLUMN_LETTERS};
pub use coordinate::{CellRange, CellRef, MAX_COLUMNS, MAX_ROWS, offset_row};
pub use layout::{Orientation, PageLayout, PaperSize};
pub use properties::{CUSTOM_PROPERTIES, DocumentProperties};
pub use spreadsheet::Spreadsheet;
pub use style::{
    Alignment, BorderStyle, Font, HorizontalAlign, Rgb, Script, Style, Underline, VerticalAlign,
};
pub use worksheet::{DEFAULT_SHEET_TITLE, MAX_SHEET_TITLE_LEN, Worksheet};
