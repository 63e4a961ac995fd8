//! Support directory related error types

use super::identity::fmt_status;
use std::fmt;
use thiserror::Error;

/// Directory resource a failed call was addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryResource {
    Company,
    Contact,
}

impl fmt::Display for DirectoryResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Company => write!(f, "company"),
            Self::Contact => write!(f, "contact"),
        }
    }
}

/// Errors raised by calls against the support directory
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// A search call did not succeed
    #[error("Failed to search {resource} records (status: {}): {message}", fmt_status(.status))]
    SearchFailed {
        resource: DirectoryResource,
        status: Option<u16>,
        message: String,
    },

    /// A create call did not succeed
    #[error("Failed to create {resource} (status: {}): {message}", fmt_status(.status))]
    CreateFailed {
        resource: DirectoryResource,
        status: Option<u16>,
        message: String,
    },

    /// A contact update call did not succeed
    #[error("Failed to update contact (status: {}): {message}", fmt_status(.status))]
    UpdateFailed {
        status: Option<u16>,
        message: String,
    },

    /// A successful response could not be parsed into the expected shape
    #[error("Failed to deserialize {resource} response: {message}")]
    Deserialization {
        resource: DirectoryResource,
        message: String,
    },
}

impl DirectoryError {
    /// Create a search failure
    pub fn search_failed(
        resource: DirectoryResource,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self::SearchFailed {
            resource,
            status,
            message: message.into(),
        }
    }

    /// Create a create failure
    pub fn create_failed(
        resource: DirectoryResource,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self::CreateFailed {
            resource,
            status,
            message: message.into(),
        }
    }

    /// Create an update failure
    pub fn update_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::UpdateFailed {
            status,
            message: message.into(),
        }
    }

    /// Create a deserialization error
    pub fn deserialization(resource: DirectoryResource, message: impl Into<String>) -> Self {
        Self::Deserialization {
            resource,
            message: message.into(),
        }
    }

    /// Resource the failed call was addressing
    pub fn resource(&self) -> DirectoryResource {
        match self {
            Self::SearchFailed { resource, .. }
            | Self::CreateFailed { resource, .. }
            | Self::Deserialization { resource, .. } => *resource,
            Self::UpdateFailed { .. } => DirectoryResource::Contact,
        }
    }
}
