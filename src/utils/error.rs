use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalaryError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} returned by {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Malformed response from {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SalaryError {
    /// Failures a single source can produce for a single category. The
    /// pipeline skips the category for that source instead of aborting.
    pub fn is_source_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Transport(_) | Self::HttpStatus { .. } => ErrorSeverity::Medium,
            Self::Decode { .. } | Self::Csv(_) | Self::Serialization(_) => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::Io(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the job-search API".to_string(),
            Self::HttpStatus { status, .. } => {
                format!("The job-search API rejected the request ({})", status)
            }
            Self::Decode { context, .. } => {
                format!("Unexpected response format from {}", context)
            }
            Self::Csv(_) | Self::Serialization(_) => "Failed to export the report".to_string(),
            Self::Io(e) => format!("File system error: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("{} is not configured", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Check the network connection and the API endpoint",
            Self::HttpStatus { status, .. } if status.as_u16() == 403 => {
                "Check that SUPERJOB_TOKEN holds a valid application key"
            }
            Self::HttpStatus { .. } => "Retry later or check the request filters",
            Self::Decode { .. } => "The API may have changed its response format",
            Self::Csv(_) | Self::Serialization(_) | Self::Io(_) => {
                "Check that the output path is writable"
            }
            Self::MissingConfigError { .. } => {
                "Set SUPERJOB_TOKEN (or .env) or run with --sources hh"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Review the command line and config file",
        }
    }
}

pub type Result<T> = std::result::Result<T, SalaryError>;
