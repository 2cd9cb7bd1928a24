use crate::config::CliConfig;
use crate::utils::error::{HtcheckError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML run file. Every field is optional; values present in the
/// file override the corresponding CLI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub input: Option<InputSection>,
    pub api: Option<ApiSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSection {
    pub urls: Option<String>,
    pub htaccess: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub endpoint: Option<String>,
    pub concurrent_requests: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
}

impl RunConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| HtcheckError::ConfigError {
            message: format!("invalid run file {}: {}", path.as_ref().display(), e),
        })
    }

    pub fn apply(&self, config: &mut CliConfig) {
        if let Some(input) = &self.input {
            if let Some(urls) = &input.urls {
                config.urls = urls.clone();
            }
            if let Some(htaccess) = &input.htaccess {
                config.htaccess = htaccess.clone();
            }
        }

        if let Some(api) = &self.api {
            if let Some(endpoint) = &api.endpoint {
                config.api_endpoint = endpoint.clone();
            }
            if let Some(concurrent) = api.concurrent_requests {
                config.concurrent_requests = concurrent;
            }
            if let Some(timeout) = api.timeout_seconds {
                config.request_timeout = timeout;
            }
        }

        if let Some(output) = &self.output {
            if let Some(path) = &output.path {
                config.output_path = path.clone();
            }
        }
    }
}
