use indexmap::IndexMap;
use serde::Deserialize;

use crate::excel::{DataType, PageLayout, Style};
use crate::metadata::Metadata;
use crate::rich_text::Html2RichText;

/// Whole document: metadata, defaults and the worksheets in order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentSpec {
    pub metadata: Metadata,
    pub default_style: Style,
    /// Settings for cells given as pseudo-HTML.
    pub rich_text: Html2RichText,
    pub sheets: Vec<SheetSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetSpec {
    pub title: Option<String>,
    pub layout: PageLayout,
    /// Top left cell of the first row, "A1" when absent.
    pub start: Option<String>,
    pub rows: Vec<Vec<CellSpec>>,
    /// Style for every written row.
    pub row_style: Option<Style>,
    /// Styles per range such as "A1:C1", applied after the rows.
    pub styles: IndexMap<String, Style>,
}

/// A cell is either a bare JSON scalar or an object with details.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellSpec {
    Detailed(DetailedCell),
    Scalar(Option<Scalar>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetailedCell {
    pub value: Option<Scalar>,
    /// Pseudo-HTML converted to rich text; takes precedence over `value`.
    pub html: Option<String>,
    pub style: Option<Style>,
    #[serde(rename = "type")]
    pub data_type: Option<DataType>,
}
