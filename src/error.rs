use thiserror::Error;

use crate::excel::ColumnId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Text that is not a column identifier (`[A-Z]{1,3}`).
    #[error("Syntax error in \"{input}\"")]
    Syntax { input: String },

    #[error("Underflow in {operation} of column \"{column}\"")]
    Underflow {
        column: ColumnId,
        operation: &'static str,
    },

    #[error("Overflow in {operation} of column \"{column}\"")]
    Overflow {
        column: ColumnId,
        operation: &'static str,
    },

    #[error("Invalid cell coordinate \"{input}\"")]
    InvalidCoordinate { input: String },

    #[error("Row {row} moved by {delta} leaves the worksheet")]
    RowOutOfRange { row: u32, delta: i64 },

    #[error("Invalid worksheet title \"{title}\": {reason}")]
    InvalidSheetTitle { title: String, reason: &'static str },

    #[error("Cannot insert worksheet at index {index} (sheet count {count})")]
    SheetIndexOutOfRange { index: usize, count: usize },

    #[error("Cannot convert {value} to {target}")]
    InvalidCellValue { value: String, target: &'static str },

    #[error("Invalid value for metadata property {property}: {value}")]
    InvalidMetadata { property: String, value: String },

    #[error("Malformed markup: {0}")]
    Html(#[from] roxmltree::Error),

    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
