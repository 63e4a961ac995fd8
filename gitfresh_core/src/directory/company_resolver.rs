//! Find-or-create resolution of a company by name

use super::DirectoryClient;
use super::types::{Company, CompanyId};
use crate::error::Result;
use crate::sync::guard::CreationGuard;
use log::{debug, info};
use std::sync::Arc;

/// Resolves an organization name to a directory company
///
/// The directory search is fuzzy, so a hit is only accepted when its name is
/// byte-for-byte equal to the requested one. Otherwise a company is created.
#[derive(Clone)]
pub struct CompanyResolver {
    directory: Arc<dyn DirectoryClient>,
    guard: Option<Arc<CreationGuard>>,
}

impl CompanyResolver {
    pub fn new(directory: Arc<dyn DirectoryClient>) -> Self {
        Self {
            directory,
            guard: None,
        }
    }

    /// Hold `guard` across the search and create for the same name
    pub fn with_guard(mut self, guard: Arc<CreationGuard>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Resolve `organization` within `tenant`
    ///
    /// Returns `Ok(None)` without contacting the directory when the name is
    /// absent or empty.
    pub async fn resolve(
        &self,
        tenant: &str,
        organization: Option<&str>,
    ) -> Result<Option<CompanyId>> {
        let Some(name) = organization.filter(|name| !name.is_empty()) else {
            debug!("No organization to resolve in {tenant}");
            return Ok(None);
        };

        let _permit = match &self.guard {
            Some(guard) => Some(guard.acquire(tenant, &format!("company:{name}")).await),
            None => None,
        };

        let candidates = self.directory.search_companies_by_name(tenant, name).await?;
        if let Some(company) = find_exact(&candidates, name) {
            debug!("Company '{name}' resolved to {} in {tenant}", company.id);
            return Ok(Some(company.id));
        }

        info!(
            "No exact match for company '{name}' among {} candidate(s) in {tenant}, creating it",
            candidates.len()
        );
        let created = self.directory.create_company(tenant, name).await?;
        if created.name != name {
            debug!(
                "Directory stored company '{name}' as '{}' ({})",
                created.name, created.id
            );
        }
        Ok(Some(created.id))
    }
}

/// First company whose name equals `name` exactly
pub fn find_exact<'a>(companies: &'a [Company], name: &str) -> Option<&'a Company> {
    companies.iter().find(|company| company.name == name)
}
