//! Identity record types

use serde::{Deserialize, Serialize};

/// A user profile as returned by the identity provider
///
/// Nullable fields stay `Option` so that an absent or `null` field (`None`)
/// is never confused with a field sent as an empty string (`Some("")`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Login handle
    #[serde(rename = "login")]
    pub handle: String,

    /// Display name
    #[serde(rename = "name", default)]
    pub display_name: Option<String>,

    /// Public email address
    #[serde(default)]
    pub email: Option<String>,

    /// Organization name
    #[serde(rename = "company", default)]
    pub organization: Option<String>,

    /// Free-form profile summary
    #[serde(rename = "bio", default)]
    pub summary: Option<String>,
}

impl IdentityRecord {
    /// Create a record with only the handle set
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            display_name: None,
            email: None,
            organization: None,
            summary: None,
        }
    }
}

/// An identity record whose mandatory fields have been checked
///
/// Only [`crate::identity::validator::validate`] constructs this type, so
/// holding one guarantees a non-empty email and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    pub(crate) handle: String,
    pub(crate) display_name: String,
    pub(crate) email: String,
    pub(crate) organization: Option<String>,
    pub(crate) summary: Option<String>,
}

impl ValidatedRecord {
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Organization name, `None` when absent or empty
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref().filter(|name| !name.is_empty())
    }

    /// Summary exactly as fetched
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}
