//! Identity provider related error types

use thiserror::Error;

/// Errors raised while fetching or validating an identity record
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The provider answered successfully but returned no user
    #[error("Identity not found for handle '{handle}'")]
    NotFound { handle: String },

    /// A field required downstream is absent or empty
    #[error("Identity record is missing required field: {field}")]
    MissingField { field: String },

    /// The provider call did not succeed
    #[error("Identity lookup failed (status: {}): {message}", fmt_status(.status))]
    LookupFailed {
        status: Option<u16>,
        message: String,
    },

    /// The provider answered with a body that is not a user record
    #[error("Failed to deserialize identity record: {message}")]
    Deserialization { message: String },
}

pub(crate) fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

impl IdentityError {
    /// Create a not found error
    pub fn not_found(handle: &str) -> Self {
        Self::NotFound {
            handle: handle.to_string(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    /// Create a lookup failure, `status` is `None` when no response was received
    pub fn lookup_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::LookupFailed {
            status,
            message: message.into(),
        }
    }

    /// Create a deserialization error
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = IdentityError::not_found("ghost");
        assert!(error.to_string().contains("not found"));
        assert!(error.to_string().contains("ghost"));
    }

    #[test]
    fn test_lookup_failed_without_status() {
        let error = IdentityError::lookup_failed(None, "connection reset");
        assert!(error.to_string().contains("status: none"));
        assert!(error.to_string().contains("connection reset"));
    }

    #[test]
    fn test_missing_field_error() {
        let error = IdentityError::missing_field("email");
        assert!(error.to_string().contains("missing required field: email"));
    }
}
