//! Support directory side of the sync
//!
//! This module provides the directory record model, the client seam the
//! orchestrator depends on, the Freshdesk implementation of that seam and
//! the company resolver built on top of it.

pub mod company_resolver;
pub mod freshdesk;
pub mod types;

pub use company_resolver::CompanyResolver;
pub use freshdesk::{FreshdeskClient, FreshdeskConfig};
pub use types::{
    Company, CompanyId, ContactAction, ContactId, ContactPayload, ContactRecord,
};

use crate::error::Result;

/// Calls the sync engine makes against the support directory
///
/// Every call is scoped to one tenant. Search results are returned in
/// remote order.
#[async_trait::async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Search companies by name, the remote match may be fuzzy
    async fn search_companies_by_name(&self, tenant: &str, name: &str) -> Result<Vec<Company>>;

    /// Create a company with the given name
    async fn create_company(&self, tenant: &str, name: &str) -> Result<Company>;

    /// Search contacts by exact email
    async fn search_contacts_by_email(&self, tenant: &str, email: &str)
    -> Result<Vec<ContactRecord>>;

    /// Create a contact, `Ok(None)` when the call succeeded without a body
    async fn create_contact(
        &self,
        tenant: &str,
        payload: &ContactPayload,
    ) -> Result<Option<ContactRecord>>;

    /// Update a contact, `Ok(None)` when the call succeeded without a body
    async fn update_contact(
        &self,
        tenant: &str,
        id: ContactId,
        payload: &ContactPayload,
    ) -> Result<Option<ContactRecord>>;
}
