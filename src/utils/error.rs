use thiserror::Error;

#[derive(Error, Debug)]
pub enum CdbError {
    #[error("HTTP transport failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Unexpected status code: {status} ({method} {url})")]
    UnexpectedStatusError {
        method: String,
        url: String,
        status: u16,
    },

    #[error("Malformed response body: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Invalid resource link '{link}': {reason}")]
    InvalidLinkError { link: String, reason: String },

    #[error("Computer model '{model_id}' has no owning company")]
    MissingCompanyError { model_id: String },

    #[error("Invalid resource identifier '{id}'")]
    InvalidIdentifierError { id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Data,
    Caller,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CdbError {
    /// 伺服器回傳的狀態碼（若有）
    pub fn status(&self) -> Option<u16> {
        match self {
            CdbError::UnexpectedStatusError { status, .. } => Some(*status),
            CdbError::TransportError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CdbError::TransportError(_) => ErrorCategory::Network,
            CdbError::UnexpectedStatusError { .. } => ErrorCategory::Server,
            CdbError::DecodeError(_) | CdbError::InvalidLinkError { .. } => ErrorCategory::Data,
            CdbError::MissingCompanyError { .. } | CdbError::InvalidIdentifierError { .. } => {
                ErrorCategory::Caller
            }
            CdbError::IoError(_)
            | CdbError::ConfigError { .. }
            | CdbError::InvalidConfigValueError { .. }
            | CdbError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Server => match self.status() {
                Some(status) if status >= 500 => ErrorSeverity::Medium,
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Data | ErrorCategory::Caller => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 客戶端本身不重試；僅告知呼叫端再試一次是否可能成功
    pub fn is_retryable(&self) -> bool {
        match self {
            CdbError::TransportError(e) => e.is_timeout() || e.is_connect(),
            CdbError::UnexpectedStatusError { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CdbError::TransportError(_) => {
                "Could not reach the computer database API".to_string()
            }
            CdbError::UnexpectedStatusError { status: 404, url, .. } => {
                format!("Resource not found (404): {}", url)
            }
            CdbError::UnexpectedStatusError { status, method, url } => {
                format!("API answered {} to {} {}", status, method, url)
            }
            CdbError::DecodeError(_) | CdbError::InvalidLinkError { .. } => {
                "The API returned a response that could not be understood".to_string()
            }
            CdbError::MissingCompanyError { model_id } => {
                format!("Computer model '{}' must belong to a company", model_id)
            }
            CdbError::InvalidIdentifierError { id } => {
                format!("'{}' cannot be used as an identifier", id)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the API is running and --base-url is correct",
            ErrorCategory::Server => "Check the identifiers and the current state on the server",
            ErrorCategory::Data => "Check that --base-url points at the computer database API",
            ErrorCategory::Caller => "Check the company and computer model identifiers",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, CdbError>;
