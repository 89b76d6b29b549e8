//! Unified error types and result handling.
//!
//! Every core operation either succeeds or fails with exactly one of
//! [`Error::Validation`], [`Error::NotFound`] or [`Error::StoreUnavailable`].
//! The remaining variants belong to the configuration and command-line layers.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was missing or empty, or an input value could not be parsed.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of the rejected input
        message: String,
    },

    /// The referenced application id does not exist.
    #[error("Application {id} not found")]
    NotFound {
        /// The id that was looked up
        id: i64,
    },

    /// The underlying database could not be reached or rejected the operation.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sea_orm::DbErr),

    /// Configuration could not be loaded or was malformed.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Filesystem failure outside the database itself.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns true when the failure was caused by the caller's input
    /// (and retrying the same request cannot succeed).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::NotFound { .. })
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(Error::validation("company_name is required").is_client_error());
        assert!(Error::NotFound { id: 7 }.is_client_error());
        assert!(!Error::StoreUnavailable(sea_orm::DbErr::Custom("disk gone".into())).is_client_error());
        assert!(
            !Error::Config {
                message: "bad toml".to_string()
            }
            .is_client_error()
        );
    }

    #[test]
    fn test_not_found_message_names_the_id() {
        assert_eq!(Error::NotFound { id: 42 }.to_string(), "Application 42 not found");
    }
}
