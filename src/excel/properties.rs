use chrono::{Datelike, NaiveDateTime, Timelike};
use indexmap::IndexMap;
use rust_xlsxwriter::{DocProperties, ExcelDateTime};

use crate::error::{Error, Result};
use crate::metadata::{Literal, Metadata};

/// Metadata properties mapped onto custom document properties.
pub const CUSTOM_PROPERTIES: [(&str, &str); 4] = [
    ("dc:audience", "Audience"),
    ("dc:identifier", "Identifier"),
    ("dc:language", "Language"),
    ("owl:versionInfo", "Version"),
];

/// Document properties derived from metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentProperties {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub last_modified_by: Option<String>,
    pub company: Option<String>,
    pub created: Option<NaiveDateTime>,
    pub modified: Option<NaiveDateTime>,
    pub custom: IndexMap<String, Literal>,
}

impl DocumentProperties {
    pub fn from_metadata(metadata: &Metadata) -> Result<Self> {
        let text = |property: &str| metadata.get(property).map(ToString::to_string);
        let date = |property: &str| {
            metadata
                .get(property)
                .map(|literal| literal.to_datetime(property))
                .transpose()
        };

        let creator = text("dc:creator");

        let mut custom = IndexMap::new();
        for (property, name) in CUSTOM_PROPERTIES {
            if let Some(literal) = metadata.get(property) {
                custom.insert(name.to_string(), literal.clone());
            }
        }

        Ok(Self {
            title: text("dc:title"),
            last_modified_by: creator.clone(),
            creator,
            company: text("dc:publisher"),
            created: date("dc:created")?,
            modified: date("dc:modified")?,
            custom,
        })
    }

    /// Custom property value, if set.
    pub fn custom_property(&self, name: &str) -> Option<&Literal> {
        self.custom.get(name)
    }

    /// Writer properties. The writer stamps the modification date and has no
    /// "last modified by" field, so those two stay in this model only.
    pub(crate) fn to_doc_properties(&self) -> Result<DocProperties> {
        let mut properties = DocProperties::new();

        if let Some(title) = &self.title {
            properties = properties.set_title(title);
        }
        if let Some(creator) = &self.creator {
            properties = properties.set_author(creator);
        }
        if let Some(company) = &self.company {
            properties = properties.set_company(company);
        }
        if let Some(created) = &self.created {
            properties = properties.set_creation_datetime(&excel_datetime(created)?);
        }

        for (name, literal) in &self.custom {
            properties = match literal {
                Literal::Text(text) => properties.set_custom_property(name, text.as_str()),
                Literal::Boolean(b) => properties.set_custom_property(name, *b),
                Literal::Integer(i) => match i32::try_from(*i) {
                    Ok(i) => properties.set_custom_property(name, i),
                    Err(_) => properties.set_custom_property(name, *i as f64),
                },
                Literal::Float(n) => properties.set_custom_property(name, *n),
                Literal::DateTime(datetime) => {
                    properties.set_custom_property(name, &excel_datetime(datetime)?)
                }
            };
        }

        Ok(properties)
    }
}

fn excel_datetime(datetime: &NaiveDateTime) -> Result<ExcelDateTime> {
    let invalid = || Error::InvalidMetadata {
        property: "date".to_string(),
        value: datetime.to_string(),
    };

    let year = u16::try_from(datetime.year()).map_err(|_| invalid())?;

    ExcelDateTime::from_ymd(year, datetime.month() as u8, datetime.day() as u8)
        .and_then(|date| {
            date.and_hms(
                datetime.hour() as u16,
                datetime.minute() as u8,
                datetime.second(),
            )
        })
        .map_err(|_| invalid())
}
