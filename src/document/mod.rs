//! JSON description of a spreadsheet, as read by the command line tool.

mod builder;
mod types;

pub use types::{CellSpec, DetailedCell, DocumentSpec, Scalar, SheetSpec};
