use rust_xlsxwriter::Worksheet as XlsxWorksheet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperSize {
    Letter,
    Legal,
    A3,
    A4,
    A5,
}

impl PaperSize {
    /// Paper size code used in the page setup of the document.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            PaperSize::Letter => 1,
            PaperSize::Legal => 5,
            PaperSize::A3 => 8,
            PaperSize::A4 => 9,
            PaperSize::A5 => 11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Page setup and view options of a worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageLayout {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub fit_to_page: bool,
    pub fit_to_width: bool,
    pub fit_to_height: bool,
    /// Header code: file name left, sheet name right.
    pub odd_header: String,
    /// Footer code: date and time left, "page / pages" right.
    pub odd_footer: String,
    pub show_gridlines: bool,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            fit_to_page: false,
            fit_to_width: false,
            fit_to_height: false,
            odd_header: "&L&F&R&A".to_string(),
            odd_footer: "&L&D &T&R&P / &N".to_string(),
            show_gridlines: false,
        }
    }
}

impl PageLayout {
    /// Pages across and down to fit the print area into, `0` meaning as many
    /// as needed. `None` when the sheet prints at normal scale.
    #[must_use]
    pub fn fit_to_pages(&self) -> Option<(u16, u16)> {
        if !(self.fit_to_page || self.fit_to_width || self.fit_to_height) {
            return None;
        }

        match (self.fit_to_width, self.fit_to_height) {
            (false, false) => Some((1, 1)),
            (width, height) => Some((u16::from(width), u16::from(height))),
        }
    }

    pub(crate) fn apply_to(&self, worksheet: &mut XlsxWorksheet) {
        worksheet.set_paper_size(self.paper_size.code());

        match self.orientation {
            Orientation::Portrait => worksheet.set_portrait(),
            Orientation::Landscape => worksheet.set_landscape(),
        };

        if let Some((width, height)) = self.fit_to_pages() {
            worksheet.set_print_fit_to_pages(width, height);
        }

        worksheet.set_header(&self.odd_header);
        worksheet.set_footer(&self.odd_footer);
        worksheet.set_screen_gridlines(self.show_gridlines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_to_pages() {
        assert_eq!(PageLayout::default().fit_to_pages(), None);

        let layout = PageLayout {
            fit_to_width: true,
            ..Default::default()
        };
        assert_eq!(layout.fit_to_pages(), Some((1, 0)));

        let layout = PageLayout {
            fit_to_page: true,
            ..Default::default()
        };
        assert_eq!(layout.fit_to_pages(), Some((1, 1)));
    }

    #[test]
    fn test_deserialize_partial_layout() {
        let layout: PageLayout =
            serde_json::from_str(r#"{"paper_size": "a5", "orientation": "landscape"}"#).unwrap();

        assert_eq!(layout.paper_size, PaperSize::A5);
        assert_eq!(layout.orientation, Orientation::Landscape);
        assert_eq!(layout.odd_header, "&L&F&R&A");
    }
}
