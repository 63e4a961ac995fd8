//! Error types for the GitFresh core library
//!
//! This module contains all error types used throughout the library, organized
//! by the remote system (or local check) that produced them.

use thiserror::Error;

pub mod directory;
pub mod identity;
pub mod validation;

pub use self::directory::{DirectoryError, DirectoryResource};
pub use self::identity::IdentityError;
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the GitFresh core library
///
/// Errors are categorized into three main types:
/// - Identity errors: fetching and validating the source profile
/// - Directory errors: company and contact calls against the support directory
/// - Validation errors: caller input and client configuration
#[derive(Error, Debug)]
pub enum Error {
    /// Identity provider related errors
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Support directory related errors
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Input and configuration errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Flat classification of every error the sync engine can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IdentityNotFound,
    IdentityMissingField,
    IdentityLookupFailed,
    IdentityDeserializationFailed,
    DirectorySearchFailed,
    DirectoryCreateFailed,
    DirectoryUpdateFailed,
    DirectoryDeserializationFailed,
    InvalidInput,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(err) => match err {
                IdentityError::NotFound { .. } => ErrorKind::IdentityNotFound,
                IdentityError::MissingField { .. } => ErrorKind::IdentityMissingField,
                IdentityError::LookupFailed { .. } => ErrorKind::IdentityLookupFailed,
                IdentityError::Deserialization { .. } => ErrorKind::IdentityDeserializationFailed,
            },
            Self::Directory(err) => match err {
                DirectoryError::SearchFailed { .. } => ErrorKind::DirectorySearchFailed,
                DirectoryError::CreateFailed { .. } => ErrorKind::DirectoryCreateFailed,
                DirectoryError::UpdateFailed { .. } => ErrorKind::DirectoryUpdateFailed,
                DirectoryError::Deserialization { .. } => {
                    ErrorKind::DirectoryDeserializationFailed
                }
            },
            Self::Validation(_) => ErrorKind::InvalidInput,
        }
    }

    /// HTTP status reported by the remote service, if the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Identity(IdentityError::LookupFailed { status, .. }) => *status,
            Self::Directory(
                DirectoryError::SearchFailed { status, .. }
                | DirectoryError::CreateFailed { status, .. }
                | DirectoryError::UpdateFailed { status, .. },
            ) => *status,
            _ => None,
        }
    }
}
