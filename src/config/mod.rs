pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extensions, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_ENDPOINT: &str = "https://htaccess.madewithlove.com/api";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "htcheck")]
#[command(about = "Batch-test URLs against an .htaccess rewrite configuration")]
pub struct CliConfig {
    /// CSV file with a 'url' column; extra columns pass through to the output
    #[arg(long)]
    pub urls: String,

    /// The .htaccess file whose rules are being tested
    #[arg(long)]
    pub htaccess: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    /// Upper bound on in-flight API requests; 1 means fully sequential
    #[arg(long, default_value = "4")]
    pub concurrent_requests: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub request_timeout: u64,

    /// Optional TOML run file; values present in it override the flags
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn urls_file(&self) -> &str {
        &self.urls
    }

    fn htaccess_file(&self) -> &str {
        &self.htaccess
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_path("urls", &self.urls)?;
        validate_file_extensions("urls", std::slice::from_ref(&self.urls), &["csv"])?;
        validate_path("htaccess", &self.htaccess)?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        validate_range("request_timeout", self.request_timeout, 1, 600)?;
        Ok(())
    }
}
