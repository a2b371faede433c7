//! Convenience layer over `rust_xlsxwriter`.
//!
//! Worksheets keep a current position that row and column writes advance,
//! columns are addressed by bijective base-26 identifiers (`A`..`ZZZ`),
//! document properties come from metadata, cell text can be given as
//! pseudo-HTML, and a finished spreadsheet can be wrapped in an HTTP
//! response.

pub mod document;
pub mod error;
pub mod excel;
pub mod metadata;
pub mod response;
pub mod rich_text;
pub mod utils;

pub use error::{Error, Result};
pub use excel::{
    CellData, CellValue, ColumnId, DataType, IntoColumn, PageLayout, Spreadsheet, Style, Worksheet,
};
pub use metadata::{Literal, Metadata};
pub use response::XlsxResponse;
pub use rich_text::{Html2RichText, RichText, TextRun};
