use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Invalid email address: {0}")]
    AddressError(#[from] lettre::address::AddressError),

    #[error("Failed to build email: {0}")]
    MessageError(#[from] lettre::error::Error),

    #[error("Invalid content type: {0}")]
    ContentTypeError(#[from] lettre::message::header::ContentTypeErr),

    #[error("SMTP error: {0}")]
    SmtpError(#[from] lettre::transport::smtp::Error),

    #[error("Unexpected API payload: {message}")]
    UnexpectedPayload { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Mail,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ApiError(_) => ErrorCategory::Network,
            ReportError::SerializationError(_) | ReportError::UnexpectedPayload { .. } => {
                ErrorCategory::Data
            }
            ReportError::IoError(_) | ReportError::XlsxError(_) => ErrorCategory::Storage,
            ReportError::AddressError(_)
            | ReportError::MessageError(_)
            | ReportError::ContentTypeError(_)
            | ReportError::SmtpError(_) => ErrorCategory::Mail,
            ReportError::ConfigError { .. }
            | ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單一來源失敗不影響整體報表
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Mail => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the API URL, network access and API_KEY",
            ErrorCategory::Data => "Check that the API returns a JSON object or array",
            ErrorCategory::Storage => "Check that the report path is writable",
            ErrorCategory::Mail => "Check SMTP_HOST, SMTP_PORT, SMTP_USER, SMTP_PASS and TO_EMAIL",
            ErrorCategory::Configuration => "Fix the configuration value and run again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            ReportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
