//! Unified error handling.
//!
//! Credential failures come from the domain crate, storage failures from the
//! persistence gateway. [`AppError`] carries both unchanged so callers can
//! match on the original variant.

use domain::CredentialError;
use thiserror::Error;

/// Failures reported by the persistence gateway.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Lookup matched no row
    #[error("Resource not found")]
    NotFound,

    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Any other backend failure (unmappable row, missing field, ...)
    #[error("Storage error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn backend(msg: impl Into<String>) -> Self {
        StorageError::Backend(msg.into())
    }
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Storage(StorageError::Database(err))
    }
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Credential(CredentialError::Hashing(_)) => "HASHING_ERROR",
            AppError::Credential(CredentialError::Mismatch) => "INVALID_CREDENTIALS",
            AppError::Credential(CredentialError::MalformedHash(_)) => "MALFORMED_CREDENTIAL",
            AppError::Storage(StorageError::NotFound) => "NOT_FOUND",
            #[cfg(feature = "database")]
            AppError::Storage(StorageError::Database(_)) => "DATABASE_ERROR",
            AppError::Storage(StorageError::Backend(_)) => "STORAGE_ERROR",
        }
    }

    /// Whether this is a lookup that matched nothing
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Storage(StorageError::NotFound))
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Credential(CredentialError::Hashing(msg)) => {
                tracing::error!("Password hashing failed: {}", msg);
                "The password could not be processed".to_string()
            }
            AppError::Credential(CredentialError::MalformedHash(msg)) => {
                tracing::error!("Malformed credential hash: {}", msg);
                "The stored credential is invalid".to_string()
            }
            #[cfg(feature = "database")]
            AppError::Storage(StorageError::Database(e)) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Storage(StorageError::Backend(msg)) => {
                tracing::error!("Storage error: {}", msg);
                "A storage error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for gateway operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Extension trait for Option -> StorageError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> StorageResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> StorageResult<T> {
        self.ok_or(StorageError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_pass_through() {
        let err = AppError::from(CredentialError::Mismatch);

        assert!(matches!(err, AppError::Credential(CredentialError::Mismatch)));
        assert_eq!(err.code(), "INVALID_CREDENTIALS");
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[test]
    fn test_not_found() {
        let err = AppError::from(None::<()>.ok_or_not_found().unwrap_err());

        assert!(err.is_not_found());
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.user_message(), "Resource not found");
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::from(StorageError::backend("column email missing"));
        assert!(!err.user_message().contains("email"));

        let err = AppError::from(CredentialError::malformed("invalid Base64 salt"));
        assert_eq!(err.code(), "MALFORMED_CREDENTIAL");
        assert!(!err.user_message().contains("Base64"));
    }

    #[test]
    fn test_option_ext_some() {
        assert_eq!(Some(7).ok_or_not_found().unwrap(), 7);
    }
}
