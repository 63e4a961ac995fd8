//! GitFresh Core Library
//!
//! Copies a GitHub user's public profile into a Freshdesk tenant as a
//! contact, creating the contact's company on demand.
//!
//! The engine only depends on the [`IdentityLookup`] and [`DirectoryClient`]
//! traits. [`GitHubClient`] and [`FreshdeskClient`] are the HTTP
//! implementations used by the command line tool.

pub mod directory;
pub mod error;
pub mod http;
pub mod identity;
pub mod secret;
pub mod sync;
mod text;

// Re-export main types
pub use directory::{
    Company, CompanyId, CompanyResolver, ContactAction, ContactId, ContactPayload, ContactRecord,
    DirectoryClient, FreshdeskClient, FreshdeskConfig,
};
pub use error::{Error, ErrorKind, Result};
pub use identity::{GitHubClient, GitHubConfig, IdentityLookup, IdentityRecord, ValidatedRecord};
pub use secret::SecretString;
pub use sync::{CreationGuard, SyncOptions, SyncOrchestrator, SyncReport};
