use crate::document::types::{CellSpec, DetailedCell, DocumentSpec, Scalar, SheetSpec};
use crate::error::Result;
use crate::excel::{CellData, CellValue, DEFAULT_SHEET_TITLE, Spreadsheet, Worksheet};
use crate::rich_text::Html2RichText;

impl DocumentSpec {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn build(&self) -> Result<Spreadsheet> {
        let mut spreadsheet = Spreadsheet::new(self.metadata.clone())?
            .with_default_style(self.default_style.clone());

        for sheet in &self.sheets {
            spreadsheet.add_sheet(sheet.build(&self.rich_text)?, None)?;
        }

        log::debug!("Built spreadsheet with {} worksheets", spreadsheet.sheet_count());
        Ok(spreadsheet)
    }
}

impl SheetSpec {
    fn build(&self, converter: &Html2RichText) -> Result<Worksheet> {
        let title = self.title.as_deref().unwrap_or(DEFAULT_SHEET_TITLE);
        let mut sheet = Worksheet::with_layout(title, self.layout.clone())?;

        if let Some(start) = &self.start {
            sheet.set_coordinate(start)?;
        }

        for row in &self.rows {
            let data = row
                .iter()
                .map(|cell| cell.to_cell_data(converter))
                .collect::<Result<Vec<_>>>()?;
            sheet.write_row(data, self.row_style.as_ref())?;
        }

        for (range, style) in &self.styles {
            sheet.apply_style(range, style)?;
        }

        Ok(sheet)
    }
}

impl CellSpec {
    pub fn to_cell_data(&self, converter: &Html2RichText) -> Result<CellData> {
        match self {
            CellSpec::Scalar(None) => Ok(CellData::default()),
            CellSpec::Scalar(Some(scalar)) => Ok(CellData::new(scalar.to_value())),
            CellSpec::Detailed(detailed) => detailed.to_cell_data(converter),
        }
    }
}

impl DetailedCell {
    fn to_cell_data(&self, converter: &Html2RichText) -> Result<CellData> {
        let value = match (&self.html, &self.value) {
            (Some(html), value) => {
                if value.is_some() {
                    log::warn!("Cell has both html and value; using html");
                }
                CellValue::RichText(converter.create(html)?)
            }
            (None, Some(scalar)) => scalar.to_value(),
            (None, None) => CellValue::Empty,
        };

        Ok(CellData {
            value,
            style: self.style.clone(),
            data_type: self.data_type,
        })
    }
}

impl Scalar {
    /// Text starting with `=` is a formula.
    pub fn to_value(&self) -> CellValue {
        match self {
            Scalar::Bool(b) => CellValue::Bool(*b),
            Scalar::Number(n) => CellValue::Number(*n),
            Scalar::Text(text) if text.starts_with('=') && text.len() > 1 => {
                CellValue::Formula(text.clone())
            }
            Scalar::Text(text) => CellValue::String(text.clone()),
        }
    }
}
