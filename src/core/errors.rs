use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Boxed cause carried by transport and parse failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("API key and secret are required for this request")]
    MissingCredentials,

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("HTTP status {status} returned: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Could not parse response: {message}")]
    Parse {
        message: String,
        body: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Exchange returned error code {code}: {message}")]
    ExchangeCode { code: i64, message: String },

    #[error("Exchange returned error: {message}")]
    ExchangeGeneric { message: String },

    #[error("Nonce range exhausted after {last}")]
    NonceExhausted { last: u64 },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::core::config::ConfigError),
}

/// Normalized classification of an [`ExchangeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingCredentials,
    MissingParameter,
    InvalidArgument,
    Network,
    HttpStatus,
    Parse,
    ExchangeCode,
    ExchangeGeneric,
    Nonce,
    Cancelled,
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::MissingCredentials => "missing-credentials",
            Self::MissingParameter => "missing-parameter",
            Self::InvalidArgument => "invalid-argument-type",
            Self::Network => "network",
            Self::HttpStatus => "http-status",
            Self::Parse => "parse",
            Self::ExchangeCode => "exchange-code",
            Self::ExchangeGeneric => "exchange-generic",
            Self::Nonce => "nonce",
            Self::Cancelled => "cancelled",
            Self::Configuration => "configuration",
        };
        f.write_str(tag)
    }
}

impl ExchangeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredentials => ErrorKind::MissingCredentials,
            Self::MissingParameter(_) => ErrorKind::MissingParameter,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Network { .. } => ErrorKind::Network,
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::ExchangeCode { .. } => ErrorKind::ExchangeCode,
            Self::ExchangeGeneric { .. } => ErrorKind::ExchangeGeneric,
            Self::NonceExhausted { .. } => ErrorKind::Nonce,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Configuration(_) | Self::Config(_) => ErrorKind::Configuration,
        }
    }

    /// HTTP status or exchange error code, when the failure carries one
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::HttpStatus { status, .. } => Some(i64::from(*status)),
            Self::ExchangeCode { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether the failure is a transient server error worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::HttpStatus { status, .. } if (500..600).contains(status))
    }

    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_code() {
        let err = ExchangeError::ExchangeCode {
            code: 10007,
            message: "Signatures do not match".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::ExchangeCode);
        assert_eq!(err.code(), Some(10007));
        assert_eq!(err.kind().to_string(), "exchange-code");

        let err = ExchangeError::MissingParameter("pair");
        assert_eq!(err.kind(), ErrorKind::MissingParameter);
        assert_eq!(err.code(), None);
        assert_eq!(err.to_string(), "Missing required parameter: pair");
    }

    #[test]
    fn test_retryable_only_for_server_errors() {
        let server = ExchangeError::HttpStatus {
            status: 503,
            message: String::new(),
        };
        let client = ExchangeError::HttpStatus {
            status: 404,
            message: String::new(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
        assert!(!ExchangeError::MissingCredentials.is_retryable());
    }
}
