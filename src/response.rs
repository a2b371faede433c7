//! XLSX document packaged as an HTTP response.

use std::io::Write;

use crate::error::Result;
use crate::excel::Spreadsheet;
use crate::metadata::Metadata;

pub const MEDIA_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// File name stem used when the metadata has no `dc:identifier`.
pub const FALLBACK_FILENAME: &str = "spreadsheet";

/// Serialized spreadsheet with the headers needed to send it as a download.
#[derive(Debug, Clone)]
pub struct XlsxResponse {
    metadata: Metadata,
    filename: String,
    body: Vec<u8>,
}

impl XlsxResponse {
    pub const MEDIA_TYPE: &'static str = MEDIA_TYPE;

    /// Serialize `spreadsheet` and derive the response metadata from its own.
    pub fn new(spreadsheet: &Spreadsheet) -> Result<Self> {
        let filename = filename_for(spreadsheet.metadata());

        let metadata = spreadsheet.metadata().merged(&Metadata::from_pairs([
            ("dc:format", MEDIA_TYPE),
            ("header:content-disposition", filename.as_str()),
        ]));

        let body = spreadsheet.to_xlsx_buffer()?;
        log::debug!("Built {} with {} bytes", filename, body.len());

        Ok(Self {
            metadata,
            filename,
            body,
        })
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// `<identifier>[_<version>].xlsx`
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename.replace('"', "\\\""))
    }

    /// Response headers in emission order.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", MEDIA_TYPE.to_string()),
            ("Content-Disposition", self.content_disposition()),
            ("Content-Length", self.body.len().to_string()),
        ]
    }

    /// Write the header lines, a blank line and the body.
    pub fn emit<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (name, value) in self.headers() {
            write!(writer, "{name}: {value}\r\n")?;
        }
        writer.write_all(b"\r\n")?;
        writer.write_all(&self.body)?;
        writer.flush()?;

        Ok(())
    }
}

fn filename_for(metadata: &Metadata) -> String {
    let stem = metadata
        .get("dc:identifier")
        .map(ToString::to_string)
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string());

    match metadata.get("owl:versionInfo") {
        Some(version) => format!("{stem}_{version}.xlsx"),
        None => format!("{stem}.xlsx"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filename() {
        let metadata = Metadata::from_pairs([
            ("dc:identifier", "lorem-ipsum"),
            ("owl:versionInfo", "3.14"),
        ]);
        assert_eq!(filename_for(&metadata), "lorem-ipsum_3.14.xlsx");

        let metadata = Metadata::from_pairs([("dc:identifier", "lorem-ipsum")]);
        assert_eq!(filename_for(&metadata), "lorem-ipsum.xlsx");

        assert_eq!(filename_for(&Metadata::new()), "spreadsheet.xlsx");
    }

    #[test]
    fn test_response_metadata_and_headers() -> Result<()> {
        let spreadsheet = Spreadsheet::new(Metadata::from_pairs([("dc:identifier", "report")]))?;
        let response = XlsxResponse::new(&spreadsheet)?;

        assert_eq!(
            response.metadata().get("dc:format").map(ToString::to_string),
            Some(MEDIA_TYPE.to_string())
        );
        assert_eq!(
            response
                .metadata()
                .get("header:content-disposition")
                .map(ToString::to_string),
            Some("report.xlsx".to_string())
        );

        let headers = response.headers();
        let names: Vec<&str> = headers.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["Content-Type", "Content-Disposition", "Content-Length"]);
        assert_eq!(headers[1].1, "attachment; filename=\"report.xlsx\"");
        assert_eq!(headers[2].1, response.body().len().to_string());

        Ok(())
    }

    #[test]
    fn test_emit_writes_headers_then_body() -> Result<()> {
        let response = XlsxResponse::new(&Spreadsheet::new(Metadata::new())?)?;
        let mut out = Vec::new();

        response.emit(&mut out)?;

        let split = out
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("header terminator");
        let head = String::from_utf8_lossy(&out[..split]);

        assert!(head.starts_with(&format!("Content-Type: {MEDIA_TYPE}\r\n")));
        assert!(head.contains("filename=\"spreadsheet.xlsx\""));
        assert_eq!(&out[split + 4..], response.body());

        Ok(())
    }
}
