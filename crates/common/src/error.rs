//! Error types for votely.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Poll not found: {0}")]
    PollNotFound(String),

    #[error("Vote not found: {0}")]
    VoteNotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // === Server Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::PollNotFound(_) => "POLL_NOT_FOUND",
            Self::VoteNotFound(_) => "VOTE_NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether an id failed to resolve in its collection.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::PollNotFound(_) | Self::VoteNotFound(_)
        )
    }

    /// Returns whether the caller is at fault.
    ///
    /// Client errors are logged at debug level, everything else at error level.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Internal(_))
    }

    /// Log this error with a level matching its kind.
    pub fn log(&self) {
        let code = self.error_code();
        if self.is_client_error() {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        } else {
            tracing::error!(error = %self, code = code, "Server error occurred");
        }
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds() {
        assert!(AppError::UserNotFound("1".into()).is_not_found());
        assert!(AppError::PollNotFound("1".into()).is_not_found());
        assert!(AppError::VoteNotFound("1".into()).is_not_found());
        assert!(!AppError::Validation("bad".into()).is_not_found());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation("empty title".into()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::PollNotFound("9".into()).error_code(), "POLL_NOT_FOUND");
        assert!(AppError::Conflict("dup".into()).is_client_error());
        assert!(!AppError::Internal("boom".into()).is_client_error());
    }

    #[test]
    fn test_from_anyhow() {
        let err: AppError = anyhow::anyhow!("disk on fire").into();
        assert!(matches!(err, AppError::Internal(msg) if msg.contains("disk on fire")));
    }
}
