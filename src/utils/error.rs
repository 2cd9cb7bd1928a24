use thiserror::Error;

#[derive(Error, Debug)]
pub enum HtcheckError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input format error: {message}")]
    InputFormatError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HtcheckError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HtcheckError::ConfigError { .. }
            | HtcheckError::InvalidConfigValueError { .. }
            | HtcheckError::MissingConfigError { .. }
            | HtcheckError::InputFormatError { .. } => ErrorSeverity::High,
            HtcheckError::ApiError(_) => ErrorSeverity::Medium,
            HtcheckError::CsvError(_)
            | HtcheckError::SerializationError(_)
            | HtcheckError::ProcessingError { .. } => ErrorSeverity::High,
            HtcheckError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            HtcheckError::ApiError(_) => {
                "Check the API endpoint and your network connection, then retry".to_string()
            }
            HtcheckError::CsvError(_) | HtcheckError::InputFormatError { .. } => {
                "Check that the URL file is valid CSV with a 'url' column".to_string()
            }
            HtcheckError::IoError(_) => {
                "Check that the input files exist and the output path is writable".to_string()
            }
            HtcheckError::SerializationError(_) => {
                "The request payload could not be built; please report this".to_string()
            }
            HtcheckError::ConfigError { .. }
            | HtcheckError::InvalidConfigValueError { .. }
            | HtcheckError::MissingConfigError { .. } => {
                "Run with --help and fix the offending option".to_string()
            }
            HtcheckError::ProcessingError { .. } => {
                "Re-run with --verbose and inspect the logs".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HtcheckError::ApiError(e) => format!("Could not reach the validation API: {}", e),
            HtcheckError::CsvError(e) => format!("Could not process the URL file: {}", e),
            HtcheckError::IoError(e) => format!("File system error: {}", e),
            HtcheckError::InputFormatError { message } => format!("Bad input: {}", message),
            other => other.to_string(),
        }
    }
}

/// Per-row failure from the validation client. Contained at the row level;
/// carried only so diagnostics can show the raw payload.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("response for {url} is not valid JSON")]
    MalformedResponse { url: String, body: String },

    #[error("request for {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type Result<T> = std::result::Result<T, HtcheckError>;
