use std::path::Path;

use rust_xlsxwriter::{Format, Formula, Workbook as XlsxWorkbook, Worksheet as XlsxWorksheet};

use crate::error::{Error, Result};
use crate::excel::{
    Cell, CellRef, CellValue, DocumentProperties, MAX_SHEET_TITLE_LEN, Style, Worksheet,
};
use crate::metadata::Metadata;

/// Workbook described by metadata.
///
/// A new spreadsheet has no worksheets. The default style lies underneath
/// every cell style when the document is written.
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    metadata: Metadata,
    properties: DocumentProperties,
    default_style: Style,
    sheets: Vec<Worksheet>,
}

impl Spreadsheet {
    /// Fails when a date property cannot be read as a date.
    pub fn new(metadata: Metadata) -> Result<Self> {
        let properties = DocumentProperties::from_metadata(&metadata)?;

        Ok(Self {
            metadata,
            properties,
            default_style: Style::default(),
            sheets: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_default_style(mut self, style: Style) -> Self {
        self.default_style = style;
        self
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }

    pub fn default_style(&self) -> &Style {
        &self.default_style
    }

    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn sheet(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.sheets.get_mut(index)
    }

    pub fn sheet_by_title(&self, title: &str) -> Option<&Worksheet> {
        self.sheets
            .iter()
            .find(|sheet| sheet.title().eq_ignore_ascii_case(title))
    }

    /// Append a new default worksheet and return it.
    pub fn create_sheet(&mut self) -> Result<&mut Worksheet> {
        self.add_sheet(Worksheet::default(), None)
    }

    /// Insert `sheet` at `index`, or append it. A title already in use gets
    /// a numeric suffix.
    pub fn add_sheet(&mut self, mut sheet: Worksheet, index: Option<usize>) -> Result<&mut Worksheet> {
        let count = self.sheets.len();
        let index = index.unwrap_or(count);

        if index > count {
            return Err(Error::SheetIndexOutOfRange { index, count });
        }

        let title = self.unique_title(sheet.title());
        if title != sheet.title() {
            log::debug!("Renaming worksheet \"{}\" to \"{}\"", sheet.title(), title);
            sheet.set_title(title)?;
        }

        self.sheets.insert(index, sheet);
        Ok(&mut self.sheets[index])
    }

    fn unique_title(&self, title: &str) -> String {
        if self.sheet_by_title(title).is_none() {
            return title.to_string();
        }

        (1..)
            .map(|n| {
                let suffix = format!(" {n}");
                let base: String = title
                    .chars()
                    .take(MAX_SHEET_TITLE_LEN - suffix.len())
                    .collect();
                format!("{}{}", base.trim_end_matches('\''), suffix)
            })
            .find(|candidate| self.sheet_by_title(candidate).is_none())
            .unwrap_or_else(|| title.to_string())
    }

    /// Serialize to an in-memory XLSX document.
    pub fn to_xlsx_buffer(&self) -> Result<Vec<u8>> {
        let mut workbook = self.to_workbook()?;
        Ok(workbook.save_to_buffer()?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = self.to_workbook()?;
        workbook.save(path.as_ref())?;

        log::debug!("Saved spreadsheet to {}", path.as_ref().display());
        Ok(())
    }

    fn to_workbook(&self) -> Result<XlsxWorkbook> {
        let mut workbook = XlsxWorkbook::new();
        workbook.set_properties(&self.properties.to_doc_properties()?);

        let placeholder;
        let sheets = if self.sheets.is_empty() {
            placeholder = [Worksheet::default()];
            &placeholder[..]
        } else {
            &self.sheets[..]
        };

        for sheet in sheets {
            let worksheet = workbook.add_worksheet().set_name(sheet.title())?;
            sheet.layout().apply_to(worksheet);

            let mut written = 0usize;
            for (position, cell) in sheet.cells() {
                write_cell(worksheet, position, cell, &self.default_style)?;
                written += 1;
            }

            log::debug!("Wrote {} cells to worksheet \"{}\"", written, sheet.title());
        }

        Ok(workbook)
    }
}

fn write_cell(
    worksheet: &mut XlsxWorksheet,
    position: CellRef,
    cell: &Cell,
    default_style: &Style,
) -> Result<()> {
    let style = default_style.merge(&cell.style);
    let format = style.to_format();
    let row = position.row - 1;
    let col = position.col.index();

    match &cell.value {
        CellValue::Empty => {
            if !style.is_empty() {
                worksheet.write_blank(row, col, &format)?;
            }
        }
        CellValue::String(text) => {
            worksheet.write_string_with_format(row, col, text, &format)?;
        }
        CellValue::Number(number) => {
            worksheet.write_number_with_format(row, col, *number, &format)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean_with_format(row, col, *b, &format)?;
        }
        CellValue::Formula(formula) => {
            worksheet.write_formula_with_format(row, col, Formula::new(formula), &format)?;
        }
        CellValue::RichText(rich_text) => {
            let segments = rich_text.segments(&style);

            if segments.is_empty() {
                worksheet.write_string_with_format(row, col, "", &format)?;
            } else {
                let segments: Vec<(&Format, &str)> =
                    segments.iter().map(|(format, text)| (format, *text)).collect();
                worksheet.write_rich_string_with_format(row, col, &segments, &format)?;
            }
        }
    }

    Ok(())
}
