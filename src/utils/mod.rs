mod helpers;

pub use helpers::{collapse_whitespace, format_number};
