//! Structured error types for livehub-core.
//!
//! Uses `thiserror` so the CLI can wrap them in `anyhow` while views match
//! on the kind (aborts are dropped, everything else becomes a generic
//! user-facing message).
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single GET against the dashboard API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Server answered with a non-2xx status
    #[error("HTTP {status} from {path}")]
    Http { status: u16, path: String },

    /// Transport failure (connection refused, reset, DNS, ...)
    #[error("network error on {path}: {reason}")]
    Network { path: String, reason: String },

    /// Request task was cancelled before it reported back, for instance
    /// by runtime shutdown. Views drop it without showing an error.
    #[error("request to {path} aborted")]
    Aborted { path: String },

    /// Body was not valid JSON
    #[error("malformed JSON from {path}: {reason}")]
    Malformed { path: String, reason: String },

    /// Body was JSON, but not in a shape the view can use
    #[error("unexpected response shape: {reason}")]
    Shape { reason: String },
}

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

impl FetchError {
    pub fn http(status: u16, path: impl Into<String>) -> Self {
        Self::Http {
            status,
            path: path.into(),
        }
    }

    pub fn network(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn aborted(path: impl Into<String>) -> Self {
        Self::Aborted { path: path.into() }
    }

    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn shape(reason: impl Into<String>) -> Self {
        Self::Shape {
            reason: reason.into(),
        }
    }

    /// Aborts are an internal cancellation signal, never a user error
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?} (invalid TOML): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid API base URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
}

impl ConfigError {
    pub fn invalid_url(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FetchError::http(404, "/drivers/7");
        assert_eq!(err.to_string(), "HTTP 404 from /drivers/7");
        assert_eq!(err.status(), Some(404));

        let err = FetchError::shape("expected an array");
        assert!(err.to_string().contains("unexpected response shape"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_only_aborts_are_aborts() {
        assert!(FetchError::aborted("/drivers").is_abort());
        assert!(!FetchError::network("/drivers", "connection refused").is_abort());
        assert!(!FetchError::http(500, "/drivers").is_abort());
    }

    #[test]
    fn test_invalid_url_display() {
        let err = ConfigError::invalid_url("not a url", "relative URL without a base");
        assert!(err.to_string().contains("not a url"));
    }
}
