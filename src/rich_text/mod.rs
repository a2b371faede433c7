mod html;
mod types;

pub use html::Html2RichText;
pub use types::{RichText, TextRun};
