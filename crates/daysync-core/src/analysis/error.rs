//! Analysis service error taxonomy.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single analysis service call.
///
/// Every variant is recoverable from the controllers' point of view: the
/// conversation stays where it was and the user may try again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("analysis request failed: {message}")]
    Transport { message: String, is_retryable: bool },

    /// The service answered with a non-success status.
    #[error("analysis service returned {status}: {message}")]
    Http {
        status: u16,
        message: String,
        is_retryable: bool,
        /// Delay requested by the service via `Retry-After`, if any.
        retry_after: Option<Duration>,
    },

    /// The service answered but produced no usable text.
    #[error("analysis service returned an empty response")]
    EmptyResponse,

    /// A structured result did not match the expected shape.
    #[error("malformed analysis result: {0}")]
    Malformed(String),

    /// The service is not configured (missing API key, bad model name).
    #[error("analysis service is not configured: {0}")]
    Config(String),
}

impl AnalysisError {
    /// Whether a later identical call could reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { is_retryable, .. } | Self::Http { is_retryable, .. } => *is_retryable,
            Self::EmptyResponse => true,
            Self::Malformed(_) | Self::Config(_) => false,
        }
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Http { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryability() {
        assert!(
            AnalysisError::Http {
                status: 503,
                message: "busy".into(),
                is_retryable: true,
                retry_after: Some(Duration::from_secs(2)),
            }
            .is_retryable()
        );
        assert!(!AnalysisError::Malformed("x".into()).is_retryable());
        assert!(AnalysisError::Malformed("x".into()).is_malformed());
        assert!(!AnalysisError::Config("no key".into()).is_retryable());
    }
}
