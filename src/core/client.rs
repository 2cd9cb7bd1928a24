use crate::core::{ValidationResult, Validator};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Thin wrapper around one POST to the htaccess tester API. One call per
/// invocation; no retries, no caching.
pub struct HtaccessClient {
    client: Client,
    endpoint: String,
}

impl HtaccessClient {
    pub fn new(endpoint: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Validator for HtaccessClient {
    async fn validate(
        &self,
        url: &str,
        config_text: &str,
    ) -> std::result::Result<ValidationResult, ClientError> {
        let payload = serde_json::json!({
            "url": url,
            "htaccess": config_text,
            "serverVariables": {},
        });

        tracing::debug!("Posting {} to {}", url, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;

        tracing::debug!("API response status: {}", response.status());

        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;

        match serde_json::from_str(&body) {
            Ok(raw) => Ok(ValidationResult { raw }),
            Err(_) => Err(ClientError::MalformedResponse {
                url: url.to_string(),
                body,
            }),
        }
    }
}
