//! Document metadata as ordered property/literal pairs.
//!
//! Property names are compact IRIs such as `dc:title` or `owl:versionInfo`.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::format_number;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Typed value of a metadata property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    Text(String),
}

impl Literal {
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Literal::Text(_))
    }

    /// Interpret the literal as a point in time. Text must be `YYYY-MM-DD`
    /// or `YYYY-MM-DDTHH:MM:SS`.
    pub fn to_datetime(&self, property: &str) -> Result<NaiveDateTime> {
        let invalid = || Error::InvalidMetadata {
            property: property.to_string(),
            value: self.to_string(),
        };

        match self {
            Literal::DateTime(datetime) => Ok(*datetime),
            Literal::Text(text) => NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT)
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(text, DATE_FORMAT)
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                })
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Integer(i) => write!(f, "{i}"),
            Literal::Float(n) => f.write_str(&format_number(*n)),
            Literal::DateTime(datetime) => write!(f, "{}", datetime.format(DATE_TIME_FORMAT)),
            Literal::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<NaiveDateTime> for Literal {
    fn from(value: NaiveDateTime) -> Self {
        Literal::DateTime(value)
    }
}

/// Ordered map of property to literal. Inserting an existing property
/// replaces its value in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    properties: IndexMap<String, Literal>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Literal>,
    {
        let mut metadata = Self::new();
        for (property, value) in pairs {
            metadata.insert(property, value);
        }
        metadata
    }

    pub fn get(&self, property: &str) -> Option<&Literal> {
        self.properties.get(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<Literal>) -> &mut Self {
        self.properties.insert(property.into(), value.into());
        self
    }

    /// Copy of `self` with the properties of `other` added; `other` wins on
    /// conflicts.
    #[must_use]
    pub fn merged(&self, other: &Metadata) -> Metadata {
        let mut merged = self.clone();
        for (property, value) in other.iter() {
            merged.insert(property, value.clone());
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Literal)> {
        self.properties
            .iter()
            .map(|(property, value)| (property.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
