use crate::core::{InputTable, ResultRecord, ResultTable, UrlRecord, ValidationResult, Validator};
use crate::utils::error::ClientError;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use serde_json::Value;

/// Runs the whole URL set against the shared htaccess blob.
///
/// Rows are processed with at most `concurrency` requests in flight;
/// `buffered` yields results in input order regardless of completion order,
/// so the output table always has the same cardinality and ordering as the
/// input. With `concurrency == 1` this degenerates to a sequential loop.
pub async fn run_batch<V: Validator>(
    validator: &V,
    table: &InputTable,
    config_text: &str,
    concurrency: usize,
) -> ResultTable {
    let concurrency = concurrency.max(1);

    async fn run_one<V: Validator>(
        validator: &V,
        row: &UrlRecord,
        config_text: &str,
    ) -> ResultRecord {
        let outcome = validator.validate(&row.url, config_text).await;
        process_row(row, outcome)
    }

    let futures: Vec<_> = table
        .rows
        .iter()
        .map(|row| run_one(validator, row, config_text).boxed())
        .collect();

    let records: Vec<ResultRecord> = stream::iter(futures)
        .buffered(concurrency)
        .collect()
        .await;

    ResultTable {
        headers: table.headers.clone(),
        records,
    }
}

/// Turns one row's outcome into a `ResultRecord`. Never fails: every
/// irregularity becomes a diagnostic plus empty derived cells, so one bad
/// response cannot abort the batch.
pub fn process_row(
    row: &UrlRecord,
    outcome: Result<ValidationResult, ClientError>,
) -> ResultRecord {
    let mut record = ResultRecord::pending(row);

    match outcome {
        Ok(result) => match extract_fields(&result.raw) {
            Some((result_url, status_code, messages)) => {
                record.result_url = result_url;
                record.status_code = status_code;
                record.messages = messages;
            }
            None => {
                tracing::warn!("Unexpected response format for URL: {}", row.url);
                tracing::warn!("Raw result: {}", result.raw);
                record.diagnostic = Some(format!("unexpected response format: {}", result.raw));
            }
        },
        Err(ClientError::MalformedResponse { body, .. }) => {
            tracing::warn!("Invalid response for URL: {}", row.url);
            tracing::warn!("Raw body: {}", body);
            record.diagnostic = Some(format!("invalid (non-JSON) response: {}", body));
        }
        Err(ClientError::Transport { source, .. }) => {
            tracing::warn!("Request failed for URL: {}: {}", row.url, source);
            record.diagnostic = Some(format!("transport failure: {}", source));
        }
    }

    record
}

/// Pulls `(Result URL, Status Code, Messages)` out of the raw response.
/// Any missing or mistyped key, including a `lines` entry without a string
/// `message`, flags the whole row.
fn extract_fields(raw: &Value) -> Option<(String, String, String)> {
    let result_url = raw.get("output_url")?.as_str()?.to_string();

    let status_code = match raw.get("output_status_code")? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };

    let lines = raw.get("lines")?.as_array()?;
    let mut messages = Vec::with_capacity(lines.len());
    for line in lines {
        messages.push(line.get("message")?.as_str()?.to_string());
    }

    Some((result_url, status_code, messages.join(" | ")))
}
