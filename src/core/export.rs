use crate::core::ResultTable;
use crate::utils::error::{HtcheckError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Serializes the result table to CSV: original columns first, then the three
/// derived columns. The csv writer handles quoting of commas, quotes and
/// newlines inside cells.
pub fn encode_csv(table: &ResultTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(table.output_headers())?;

    for record in &table.records {
        let mut row = record.cells.clone();
        row.push(record.result_url.clone());
        row.push(record.status_code.clone());
        row.push(record.messages.clone());
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| HtcheckError::ProcessingError {
            message: format!("CSV writer flush failed: {}", e),
        })
}

/// Self-contained download link: the payload rides inside the href as a
/// base64 data URI, so saving it needs no further server round-trip.
#[derive(Debug, Clone)]
pub struct DownloadArtifact {
    pub filename: String,
    pub href: String,
}

impl DownloadArtifact {
    pub fn new(bytes: &[u8], filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            href: format!("data:file/txt;base64,{}", BASE64.encode(bytes)),
        }
    }

    pub fn to_html(&self, link_text: &str) -> String {
        format!(
            "<a href=\"{}\" download=\"{}\">{}</a>",
            self.href, self.filename, link_text
        )
    }
}
