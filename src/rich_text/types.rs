use rust_xlsxwriter::Format;

use crate::excel::{Font, Style};

/// A piece of text sharing one font.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    pub text: String,
    pub font: Font,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
        }
    }

    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }
}

/// Text made of runs with individual fonts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichText {
    runs: Vec<TextRun>,
}

impl RichText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_run(mut self, run: TextRun) -> Self {
        self.runs.push(run);
        self
    }

    pub fn push(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    #[must_use]
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub(crate) fn runs_mut(&mut self) -> &mut Vec<TextRun> {
        &mut self.runs
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }

    #[must_use]
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Writer formats for each non-empty run, with the cell style underneath
    /// the run font.
    pub(crate) fn segments(&self, base: &Style) -> Vec<(Format, &str)> {
        self.runs
            .iter()
            .filter(|run| !run.text.is_empty())
            .map(|run| {
                let style = Style {
                    font: base.font.merge(&run.font),
                    ..Style::default()
                };
                (style.to_format(), run.text.as_str())
            })
            .collect()
    }
}
