use serde::{Deserialize, Serialize};

pub const RESULT_URL_COLUMN: &str = "Result URL";
pub const STATUS_CODE_COLUMN: &str = "Status Code";
pub const MESSAGES_COLUMN: &str = "Messages";

/// One row of the uploaded URL table. Extra columns pass through untouched;
/// only `url` is interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRecord {
    pub url: String,
    pub cells: Vec<String>,
}

/// Parsed input CSV: header plus rows, with the `url` column located by name.
#[derive(Debug, Clone)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub url_column: usize,
    pub rows: Vec<UrlRecord>,
}

/// Everything extract() hands to transform(): the URL table and the shared
/// htaccess blob, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct BatchInput {
    pub table: InputTable,
    pub config_text: String,
}

/// Raw JSON body returned by the validation API for one (url, htaccess) pair.
/// No schema is enforced here; missing keys are the row processor's problem.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub raw: serde_json::Value,
}

/// An input row augmented with the three derived columns. On a malformed or
/// incomplete response the derived cells stay empty and `diagnostic` records
/// what went wrong; the row is never dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub cells: Vec<String>,
    pub result_url: String,
    pub status_code: String,
    pub messages: String,
    pub diagnostic: Option<String>,
}

impl ResultRecord {
    /// Derived columns start empty so that even failed rows present a
    /// consistent schema.
    pub fn pending(row: &UrlRecord) -> Self {
        Self {
            cells: row.cells.clone(),
            result_url: String::new(),
            status_code: String::new(),
            messages: String::new(),
            diagnostic: None,
        }
    }
}

/// Ordered result set, one record per input row, same order as input.
#[derive(Debug, Clone)]
pub struct ResultTable {
    pub headers: Vec<String>,
    pub records: Vec<ResultRecord>,
}

impl ResultTable {
    /// Original input columns followed by the three derived columns.
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        headers.push(RESULT_URL_COLUMN.to_string());
        headers.push(STATUS_CODE_COLUMN.to_string());
        headers.push(MESSAGES_COLUMN.to_string());
        headers
    }

    pub fn flagged_count(&self) -> usize {
        self.records.iter().filter(|r| r.diagnostic.is_some()).count()
    }
}

/// Output of the transform stage, ready for load().
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub table: ResultTable,
    pub csv_bytes: Vec<u8>,
    pub flagged_rows: usize,
}
