//! Unified application error types.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the `?` operator. Errors raised at the access-control
//! boundary additionally carry a [`MessageKey`] so the API layer can render
//! the bilingual envelope without guessing.

use std::fmt;
use thiserror::Error;

use crate::messages::MessageKey;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// No usable identity accompanied the request.
    Authentication,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate name, resource still referenced).
    Conflict,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl ErrorKind {
    /// Catalogue key used when an error carries no explicit key.
    pub fn default_key(&self) -> MessageKey {
        match self {
            Self::NotFound => MessageKey::ErrorNotFound,
            Self::Authentication => MessageKey::ErrorUnauthorized,
            Self::Authorization => MessageKey::ErrorForbidden,
            Self::Validation => MessageKey::ErrorValidation,
            Self::Conflict => MessageKey::ErrorConflict,
            Self::Internal
            | Self::Database
            | Self::Configuration
            | Self::Serialization => MessageKey::ErrorInternal,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified application error.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A developer-facing message.
    pub message: String,
    /// Catalogue key for the client-facing text.
    pub key: Option<MessageKey>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            key: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            key: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach a catalogue key.
    pub fn with_key(mut self, key: MessageKey) -> Self {
        self.key = Some(key);
        self
    }

    /// The catalogue key for this error, falling back to the kind default.
    pub fn message_key(&self) -> MessageKey {
        self.key.unwrap_or_else(|| self.kind.default_key())
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            key: self.key,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins_over_kind_default() {
        let err = AppError::validation("bad id").with_key(MessageKey::BranchInvalidUuid);
        assert_eq!(err.message_key(), MessageKey::BranchInvalidUuid);
    }

    #[test]
    fn test_kind_default_key() {
        assert_eq!(
            AppError::not_found("x").message_key(),
            MessageKey::ErrorNotFound
        );
        assert_eq!(
            AppError::database("x").message_key(),
            MessageKey::ErrorInternal
        );
    }

    #[test]
    fn test_clone_keeps_key() {
        let err = AppError::conflict("dup").with_key(MessageKey::RoleNameTaken);
        let cloned = err.clone();
        assert_eq!(cloned.key, Some(MessageKey::RoleNameTaken));
        assert_eq!(cloned.kind, ErrorKind::Conflict);
    }
}
