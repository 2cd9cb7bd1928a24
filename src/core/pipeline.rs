use crate::core::batch::run_batch;
use crate::core::client::HtaccessClient;
use crate::core::export::{encode_csv, DownloadArtifact};
use crate::core::{
    BatchInput, BatchOutput, ConfigProvider, InputTable, Pipeline, Storage, UrlRecord,
};
use crate::utils::error::{HtcheckError, Result};

pub const RESULTS_CSV: &str = "results.csv";
pub const RESULTS_HTML: &str = "results.html";
pub const DOWNLOAD_LINK_TEXT: &str = "Download the results as CSV";

pub struct HtcheckPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: HtaccessClient,
}

impl<S: Storage, C: ConfigProvider> HtcheckPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = HtaccessClient::new(
            config.api_endpoint().to_string(),
            config.request_timeout_secs(),
        )?;

        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

/// Parses the uploaded URL table. The `url` column may sit anywhere in the
/// header; all other columns ride along untouched.
pub fn parse_input_table(bytes: &[u8]) -> Result<InputTable> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let url_column = headers
        .iter()
        .position(|h| h.trim() == "url")
        .ok_or_else(|| HtcheckError::InputFormatError {
            message: "URL file has no 'url' column".to_string(),
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        rows.push(UrlRecord {
            url: cells[url_column].clone(),
            cells,
        });
    }

    Ok(InputTable {
        headers,
        url_column,
        rows,
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for HtcheckPipeline<S, C> {
    async fn extract(&self) -> Result<BatchInput> {
        tracing::debug!("Reading URL table from {}", self.config.urls_file());
        let csv_bytes = self.storage.read_file(self.config.urls_file()).await?;
        let table = parse_input_table(&csv_bytes)?;

        tracing::debug!("Reading htaccess from {}", self.config.htaccess_file());
        let htaccess_bytes = self.storage.read_file(self.config.htaccess_file()).await?;
        let config_text =
            String::from_utf8(htaccess_bytes).map_err(|_| HtcheckError::InputFormatError {
                message: "htaccess file is not valid UTF-8".to_string(),
            })?;

        tracing::debug!("htaccess content:\n{}", config_text);

        Ok(BatchInput { table, config_text })
    }

    async fn transform(&self, input: BatchInput) -> Result<BatchOutput> {
        let table = run_batch(
            &self.client,
            &input.table,
            &input.config_text,
            self.config.concurrent_requests(),
        )
        .await;

        let csv_bytes = encode_csv(&table)?;
        let flagged_rows = table.flagged_count();

        Ok(BatchOutput {
            table,
            csv_bytes,
            flagged_rows,
        })
    }

    async fn load(&self, output: BatchOutput) -> Result<String> {
        self.storage
            .write_file(RESULTS_CSV, &output.csv_bytes)
            .await?;

        let artifact = DownloadArtifact::new(&output.csv_bytes, RESULTS_CSV);
        let html = format!(
            "<!-- generated {} -->\n{}\n",
            chrono::Utc::now().to_rfc3339(),
            artifact.to_html(DOWNLOAD_LINK_TEXT)
        );
        self.storage
            .write_file(RESULTS_HTML, html.as_bytes())
            .await?;

        if output.flagged_rows > 0 {
            tracing::warn!(
                "{} of {} rows were flagged for review",
                output.flagged_rows,
                output.table.records.len()
            );
        }

        Ok(format!("{}/{}", self.config.output_path(), RESULTS_CSV))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                HtcheckError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_endpoint: String,
        urls_file: String,
        htaccess_file: String,
        output_path: String,
        concurrent_requests: usize,
        request_timeout_secs: u64,
    }

    impl MockConfig {
        fn new(api_endpoint: String) -> Self {
            Self {
                api_endpoint,
                urls_file: "urls.csv".to_string(),
                htaccess_file: ".htaccess".to_string(),
                output_path: "test_output".to_string(),
                concurrent_requests: 2,
                request_timeout_secs: 5,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn urls_file(&self) -> &str {
            &self.urls_file
        }

        fn htaccess_file(&self) -> &str {
            &self.htaccess_file
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn concurrent_requests(&self) -> usize {
            self.concurrent_requests
        }

        fn request_timeout_secs(&self) -> u64 {
            self.request_timeout_secs
        }
    }

    #[test]
    fn test_parse_input_table_url_column_anywhere() {
        let csv = b"label,url,owner\nhome,https://a.test/,alice\nshop,https://b.test/,bob\n";
        let table = parse_input_table(csv).unwrap();

        assert_eq!(table.url_column, 1);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].url, "https://a.test/");
        assert_eq!(table.rows[1].cells, vec!["shop", "https://b.test/", "bob"]);
    }

    #[test]
    fn test_parse_input_table_missing_url_column() {
        let csv = b"name,link\nhome,https://a.test/\n";
        let err = parse_input_table(csv).unwrap_err();

        assert!(matches!(err, HtcheckError::InputFormatError { .. }));
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn test_parse_input_table_empty_body() {
        let csv = b"url\n";
        let table = parse_input_table(csv).unwrap();
        assert!(table.rows.is_empty());
    }

    #[tokio::test]
    async fn test_extract_fails_early_when_files_missing() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.test/api".to_string());
        let pipeline = HtcheckPipeline::new(storage, config).unwrap();

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, HtcheckError::IoError(_)));
    }

    #[tokio::test]
    async fn test_extract_rejects_non_utf8_htaccess() {
        let storage = MockStorage::new();
        storage.put_file("urls.csv", b"url\nhttps://a.test/\n").await;
        storage.put_file(".htaccess", &[0xff, 0xfe, 0x00]).await;

        let config = MockConfig::new("http://unused.test/api".to_string());
        let pipeline = HtcheckPipeline::new(storage.clone(), config).unwrap();

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, HtcheckError::InputFormatError { .. }));
    }

    #[tokio::test]
    async fn test_transform_and_load_via_mock_server() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST)
                .path("/api")
                .json_body_partial(r#"{"url": "https://a.test/"}"#);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "output_url": "https://a.test/x",
                    "output_status_code": 200,
                    "lines": [{"message": "ok"}]
                }));
        });
        server.mock(|when, then| {
            when.method(POST)
                .path("/api")
                .json_body_partial(r#"{"url": "https://b.test/"}"#);
            then.status(500).body("Internal Server Error");
        });

        let storage = MockStorage::new();
        storage
            .put_file("urls.csv", b"url\nhttps://a.test/\nhttps://b.test/\n")
            .await;
        storage.put_file(".htaccess", b"RewriteEngine On\n").await;

        let config = MockConfig::new(server.url("/api"));
        let pipeline = HtcheckPipeline::new(storage.clone(), config).unwrap();

        let input = pipeline.extract().await.unwrap();
        let output = pipeline.transform(input).await.unwrap();

        assert_eq!(output.table.records.len(), 2);
        assert_eq!(output.flagged_rows, 1);
        assert_eq!(output.table.records[0].result_url, "https://a.test/x");
        assert_eq!(output.table.records[1].result_url, "");

        let output_path = pipeline.load(output).await.unwrap();
        assert_eq!(output_path, "test_output/results.csv");

        let csv_bytes = storage.get_file(RESULTS_CSV).await.unwrap();
        let text = String::from_utf8(csv_bytes).unwrap();
        assert!(text.starts_with("url,Result URL,Status Code,Messages"));

        let html_bytes = storage.get_file(RESULTS_HTML).await.unwrap();
        let html = String::from_utf8(html_bytes).unwrap();
        assert!(html.contains("data:file/txt;base64,"));
        assert!(html.contains("download=\"results.csv\""));
    }
}
