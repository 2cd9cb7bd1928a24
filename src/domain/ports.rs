use crate::domain::model::{BatchInput, BatchOutput, ValidationResult};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn urls_file(&self) -> &str;
    fn htaccess_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn concurrent_requests(&self) -> usize;
    fn request_timeout_secs(&self) -> u64;
}

/// Seam for the outbound API call, so the batch runner can be tested without
/// a live server.
#[async_trait]
pub trait Validator: Send + Sync {
    async fn validate(
        &self,
        url: &str,
        config_text: &str,
    ) -> std::result::Result<ValidationResult, ClientError>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<BatchInput>;
    async fn transform(&self, input: BatchInput) -> Result<BatchOutput>;
    async fn load(&self, output: BatchOutput) -> Result<String>;
}
