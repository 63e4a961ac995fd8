//! Identity provider side of the sync
//!
//! This module provides the identity record model, the lookup seam the
//! orchestrator depends on, the GitHub implementation of that seam and the
//! validator applied to every fetched record.

pub mod github;
pub mod types;
pub mod validator;

pub use github::{GitHubClient, GitHubConfig};
pub use types::{IdentityRecord, ValidatedRecord};

use crate::error::Result;

/// Source of identity records
#[async_trait::async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Fetch the record for `handle`
    ///
    /// `Ok(None)` means the provider answered successfully without a user;
    /// a non-success answer is an `IdentityError::LookupFailed`.
    async fn fetch(&self, handle: &str) -> Result<Option<IdentityRecord>>;
}
