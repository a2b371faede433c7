use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::excel::Style;
use crate::rich_text::RichText;
use crate::utils::format_number;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    String(String),
    Number(f64),
    Bool(bool),
    Formula(String),
    RichText(RichText),
}

/// Explicit data type for a written value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    String,
    Number,
    Bool,
    Formula,
}

impl CellValue {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Plain text of the value as it would be displayed.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) | CellValue::Formula(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => {
                if *b {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            CellValue::RichText(rich_text) => rich_text.plain_text(),
        }
    }

    /// Convert the value to `data_type`.
    pub fn coerce(self, data_type: DataType) -> Result<CellValue> {
        match (data_type, self) {
            (DataType::String, CellValue::Empty) => Ok(CellValue::String(String::new())),
            (DataType::String, value @ CellValue::RichText(_)) => Ok(value),
            (DataType::String, value) => Ok(CellValue::String(value.to_text())),

            (DataType::Number, CellValue::Empty) => Ok(CellValue::Number(0.0)),
            (DataType::Number, value @ CellValue::Number(_)) => Ok(value),
            (DataType::Number, CellValue::Bool(b)) => Ok(CellValue::Number(if b { 1.0 } else { 0.0 })),
            (DataType::Number, value) => {
                let text = value.to_text();
                text.trim()
                    .parse::<f64>()
                    .map(CellValue::Number)
                    .map_err(|_| Error::InvalidCellValue {
                        value: text,
                        target: "number",
                    })
            }

            (DataType::Bool, CellValue::Empty) => Ok(CellValue::Bool(false)),
            (DataType::Bool, value @ CellValue::Bool(_)) => Ok(value),
            (DataType::Bool, CellValue::Number(n)) => Ok(CellValue::Bool(n != 0.0)),
            (DataType::Bool, value) => {
                let text = value.to_text();
                match text.trim().to_lowercase().as_str() {
                    "true" | "1" => Ok(CellValue::Bool(true)),
                    "false" | "0" | "" => Ok(CellValue::Bool(false)),
                    _ => Err(Error::InvalidCellValue {
                        value: text,
                        target: "boolean",
                    }),
                }
            }

            (DataType::Formula, value @ CellValue::Formula(_)) => Ok(value),
            (DataType::Formula, value) => {
                let text = value.to_text();
                if text.is_empty() {
                    return Err(Error::InvalidCellValue {
                        value: text,
                        target: "formula",
                    });
                }
                Ok(CellValue::Formula(text))
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<RichText> for CellValue {
    fn from(value: RichText) -> Self {
        CellValue::RichText(value)
    }
}

/// One item of a cell, row or column write: a value with an optional own
/// style and explicit type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellData {
    pub value: CellValue,
    pub style: Option<Style>,
    pub data_type: Option<DataType>,
}

impl CellData {
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            style: None,
            data_type: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    #[must_use]
    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }
}

macro_rules! cell_data_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellData {
                fn from(value: $t) -> Self {
                    CellData::new(value)
                }
            }
        )*
    };
}

cell_data_from!(CellValue, &str, String, f64, i32, u32, i64, bool, RichText);

/// Content of one worksheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub value: CellValue,
    pub style: Style,
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        self.value.is_empty() && self.style.is_empty()
    }
}
