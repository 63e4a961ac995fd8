//! Single-user profile sync from the identity provider into the directory

use super::guard::CreationGuard;
use crate::directory::{
    CompanyId, CompanyResolver, ContactAction, ContactPayload, ContactRecord, DirectoryClient,
    FreshdeskClient, FreshdeskConfig,
};
use crate::error::{Result, ValidationError};
use crate::identity::{GitHubClient, GitHubConfig, IdentityLookup, ValidatedRecord, validator};
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;

/// Behavior switches for [`SyncOrchestrator`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Serialize company and contact creation per tenant and key within
    /// this orchestrator
    pub serialize_creations: bool,
}

/// Outcome of one sync invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub handle: String,
    pub tenant: String,
    pub company_id: Option<CompanyId>,
    pub action: ContactAction,
    /// Contact returned by the directory, `None` when the write call
    /// succeeded without returning one
    pub contact: Option<ContactRecord>,
}

impl SyncReport {
    /// Whether the directory confirmed the contact write
    pub fn synced(&self) -> bool {
        self.contact.is_some()
    }
}

/// Runs the fetch, validate, resolve and upsert pipeline for one user
///
/// Steps run strictly in order and the first failure aborts the run. No
/// step is retried and nothing already written is rolled back.
#[derive(Clone)]
pub struct SyncOrchestrator {
    identity: Arc<dyn IdentityLookup>,
    directory: Arc<dyn DirectoryClient>,
    resolver: CompanyResolver,
    guard: Option<Arc<CreationGuard>>,
}

impl SyncOrchestrator {
    pub fn new(identity: Arc<dyn IdentityLookup>, directory: Arc<dyn DirectoryClient>) -> Self {
        Self::with_options(identity, directory, SyncOptions::default())
    }

    pub fn with_options(
        identity: Arc<dyn IdentityLookup>,
        directory: Arc<dyn DirectoryClient>,
        options: SyncOptions,
    ) -> Self {
        let guard = options
            .serialize_creations
            .then(|| Arc::new(CreationGuard::new()));

        let mut resolver = CompanyResolver::new(directory.clone());
        if let Some(guard) = &guard {
            resolver = resolver.with_guard(guard.clone());
        }

        Self {
            identity,
            directory,
            resolver,
            guard,
        }
    }

    /// Build an orchestrator backed by the GitHub and Freshdesk HTTP clients
    pub fn from_configs(
        github: GitHubConfig,
        freshdesk: FreshdeskConfig,
        options: SyncOptions,
    ) -> Result<Self> {
        let identity = Arc::new(GitHubClient::new(github)?);
        let directory = Arc::new(FreshdeskClient::new(freshdesk)?);
        Ok(Self::with_options(identity, directory, options))
    }

    /// Sync `handle` into `tenant`
    ///
    /// Returns `Ok(true)` when the directory returned the written contact
    /// and `Ok(false)` when the write succeeded without a body.
    pub async fn sync(&self, tenant: &str, handle: &str) -> Result<bool> {
        Ok(self.sync_detailed(tenant, handle).await?.synced())
    }

    /// Sync `handle` into `tenant` and report what was written
    pub async fn sync_detailed(&self, tenant: &str, handle: &str) -> Result<SyncReport> {
        require_non_blank("tenant", tenant)?;
        require_non_blank("handle", handle)?;
        require_path_segment("handle", handle)?;
        info!("Syncing '{handle}' into {tenant}");

        let fetched = self.identity.fetch(handle).await?;
        let record = validator::validate(handle, fetched)?;

        let company_id = self
            .resolver
            .resolve(tenant, record.organization())
            .await?;

        let payload = build_payload(&record, company_id);
        let (action, contact) = self.upsert_contact(tenant, &payload).await?;

        match &contact {
            Some(contact) => info!("Contact {} {action} for '{handle}'", contact.id),
            None => warn!("Directory returned no contact after {action} for '{handle}'"),
        }

        Ok(SyncReport {
            handle: handle.to_string(),
            tenant: tenant.to_string(),
            company_id,
            action,
            contact,
        })
    }

    async fn upsert_contact(
        &self,
        tenant: &str,
        payload: &ContactPayload,
    ) -> Result<(ContactAction, Option<ContactRecord>)> {
        let _permit = match &self.guard {
            Some(guard) => Some(
                guard
                    .acquire(tenant, &format!("contact:{}", payload.email))
                    .await,
            ),
            None => None,
        };

        let existing = self
            .directory
            .search_contacts_by_email(tenant, &payload.email)
            .await?;

        match existing.first() {
            Some(current) => {
                if existing.len() > 1 {
                    debug!(
                        "{} contacts share the email in {tenant}, updating {}",
                        existing.len(),
                        current.id
                    );
                }
                let contact = self
                    .directory
                    .update_contact(tenant, current.id, payload)
                    .await?;
                Ok((ContactAction::Updated, contact))
            }
            None => {
                let contact = self.directory.create_contact(tenant, payload).await?;
                Ok((ContactAction::Created, contact))
            }
        }
    }
}

/// Contact fields derived from a validated record
pub fn build_payload(record: &ValidatedRecord, company_id: Option<CompanyId>) -> ContactPayload {
    ContactPayload {
        name: record.display_name().to_string(),
        email: record.email().to_string(),
        company_id,
        description: record.summary().map(str::to_string),
    }
}

fn require_non_blank(parameter: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::invalid_parameter(parameter, "must not be empty").into());
    }
    Ok(())
}

// URL joining collapses dot segments, so ".." would address the parent endpoint.
fn require_path_segment(parameter: &str, value: &str) -> Result<()> {
    if matches!(value, "." | "..") {
        return Err(ValidationError::invalid_parameter(
            parameter,
            format!("'{value}' is not a valid name"),
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityRecord;

    fn validated(summary: Option<&str>) -> ValidatedRecord {
        let record = IdentityRecord {
            handle: "octocat".into(),
            display_name: Some("The Octocat".into()),
            email: Some("octocat@github.com".into()),
            organization: Some("GitHub".into()),
            summary: summary.map(str::to_string),
        };
        validator::validate("octocat", Some(record)).unwrap()
    }

    #[test]
    fn test_payload_maps_fields() {
        let payload = build_payload(&validated(Some("bio")), Some(CompanyId(9)));
        assert_eq!(payload.name, "The Octocat");
        assert_eq!(payload.email, "octocat@github.com");
        assert_eq!(payload.company_id, Some(CompanyId(9)));
        assert_eq!(payload.description.as_deref(), Some("bio"));
    }

    #[test]
    fn test_payload_passes_summary_through() {
        assert_eq!(build_payload(&validated(None), None).description, None);
        assert_eq!(
            build_payload(&validated(Some("")), None).description.as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_require_non_blank() {
        assert!(require_non_blank("tenant", "acme").is_ok());
        assert!(require_non_blank("tenant", "").is_err());
        assert!(require_non_blank("tenant", "  ").is_err());
    }

    #[test]
    fn test_dot_segments_rejected() {
        assert!(require_path_segment("handle", ".").is_err());
        assert!(require_path_segment("handle", "..").is_err());
        assert!(require_path_segment("handle", "...").is_ok());
        assert!(require_path_segment("handle", "a.b").is_ok());
    }

    #[test]
    fn test_report_synced() {
        let mut report = SyncReport {
            handle: "octocat".into(),
            tenant: "acme".into(),
            company_id: None,
            action: ContactAction::Created,
            contact: None,
        };
        assert!(!report.synced());
        report.contact = Some(ContactRecord {
            id: crate::directory::ContactId(1),
            name: None,
            email: None,
            company_id: None,
            description: None,
        });
        assert!(report.synced());
    }
}
