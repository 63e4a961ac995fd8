//! Mock implementation of DirectoryClient for testing

use super::MockFailure;
use gitfresh_core::error::{DirectoryError, DirectoryResource};
use gitfresh_core::{
    Company, CompanyId, ContactId, ContactPayload, ContactRecord, DirectoryClient, Result,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Directory calls the mock can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryOperation {
    SearchCompanies,
    CreateCompany,
    SearchContacts,
    CreateContact,
    UpdateContact,
}

/// One recorded call against the mock, with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryCall {
    SearchCompanies {
        tenant: String,
        name: String,
    },
    CreateCompany {
        tenant: String,
        name: String,
    },
    SearchContacts {
        tenant: String,
        email: String,
    },
    CreateContact {
        tenant: String,
        payload: ContactPayload,
    },
    UpdateContact {
        tenant: String,
        id: ContactId,
        payload: ContactPayload,
    },
}

impl DirectoryCall {
    pub fn operation(&self) -> DirectoryOperation {
        match self {
            DirectoryCall::SearchCompanies { .. } => DirectoryOperation::SearchCompanies,
            DirectoryCall::CreateCompany { .. } => DirectoryOperation::CreateCompany,
            DirectoryCall::SearchContacts { .. } => DirectoryOperation::SearchContacts,
            DirectoryCall::CreateContact { .. } => DirectoryOperation::CreateContact,
            DirectoryCall::UpdateContact { .. } => DirectoryOperation::UpdateContact,
        }
    }
}

/// In-memory support directory with per-tenant state
///
/// Company search is fuzzy: every company whose name contains the query,
/// ignoring case, is returned in insertion order. Contact search matches the
/// email exactly. Identifiers are allocated from one counter shared by all
/// tenants.
#[derive(Clone)]
pub struct MockDirectory {
    behavior: Arc<Mutex<DirectoryBehavior>>,
}

struct DirectoryBehavior {
    tenants: HashMap<String, TenantState>,
    next_id: i64,
    failures: HashMap<DirectoryOperation, MockFailure>,
    empty_write_responses: bool,
    search_latency: Duration,
    calls: Vec<DirectoryCall>,
}

#[derive(Default)]
struct TenantState {
    companies: Vec<Company>,
    contacts: Vec<ContactRecord>,
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self {
            behavior: Arc::new(Mutex::new(DirectoryBehavior {
                tenants: HashMap::new(),
                next_id: 1000,
                failures: HashMap::new(),
                empty_write_responses: false,
                search_latency: Duration::ZERO,
                calls: Vec::new(),
            })),
        }
    }
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a company and return its identifier
    pub fn add_company(&self, tenant: &str, name: &str) -> CompanyId {
        let mut behavior = self.behavior.lock().unwrap();
        let id = CompanyId(behavior.allocate_id());
        behavior.tenant(tenant).companies.push(Company {
            id,
            name: name.to_string(),
        });
        id
    }

    /// Seed a company under a fixed identifier
    pub fn add_company_with_id(&self, tenant: &str, id: i64, name: &str) -> CompanyId {
        let mut behavior = self.behavior.lock().unwrap();
        behavior.tenant(tenant).companies.push(Company {
            id: CompanyId(id),
            name: name.to_string(),
        });
        CompanyId(id)
    }

    /// Seed a contact and return its identifier
    pub fn add_contact(&self, tenant: &str, name: &str, email: &str) -> ContactId {
        let mut behavior = self.behavior.lock().unwrap();
        let id = ContactId(behavior.allocate_id());
        behavior.tenant(tenant).contacts.push(ContactRecord {
            id,
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            company_id: None,
            description: None,
        });
        id
    }

    /// Fail every call of `operation` with `failure`
    pub fn fail(&self, operation: DirectoryOperation, failure: MockFailure) {
        let mut behavior = self.behavior.lock().unwrap();
        behavior.failures.insert(operation, failure);
    }

    /// Make contact create and update succeed without returning a record
    pub fn respond_without_body(&self) {
        self.behavior.lock().unwrap().empty_write_responses = true;
    }

    /// Delay search answers after their result has been computed
    pub fn set_search_latency(&self, latency: Duration) {
        self.behavior.lock().unwrap().search_latency = latency;
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<DirectoryCall> {
        self.behavior.lock().unwrap().calls.clone()
    }

    /// Number of calls made for `operation`
    pub fn call_count(&self, operation: DirectoryOperation) -> usize {
        self.behavior
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    /// Companies stored for `tenant`
    pub fn companies(&self, tenant: &str) -> Vec<Company> {
        let behavior = self.behavior.lock().unwrap();
        behavior
            .tenants
            .get(tenant)
            .map(|state| state.companies.clone())
            .unwrap_or_default()
    }

    /// Contacts stored for `tenant`
    pub fn contacts(&self, tenant: &str) -> Vec<ContactRecord> {
        let behavior = self.behavior.lock().unwrap();
        behavior
            .tenants
            .get(tenant)
            .map(|state| state.contacts.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: DirectoryCall) -> Option<MockFailure> {
        let mut behavior = self.behavior.lock().unwrap();
        let failure = behavior.failures.get(&call.operation()).copied();
        behavior.calls.push(call);
        failure
    }

    async fn pause(&self) {
        let latency = self.behavior.lock().unwrap().search_latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

impl DirectoryBehavior {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn tenant(&mut self, tenant: &str) -> &mut TenantState {
        self.tenants.entry(tenant.to_string()).or_default()
    }
}

fn search_error(resource: DirectoryResource, failure: MockFailure) -> DirectoryError {
    match failure {
        MockFailure::MalformedBody => DirectoryError::deserialization(resource, failure.message()),
        _ => DirectoryError::search_failed(resource, failure.status(), failure.message()),
    }
}

fn create_error(resource: DirectoryResource, failure: MockFailure) -> DirectoryError {
    match failure {
        MockFailure::MalformedBody => DirectoryError::deserialization(resource, failure.message()),
        _ => DirectoryError::create_failed(resource, failure.status(), failure.message()),
    }
}

fn apply_payload(contact: &mut ContactRecord, payload: &ContactPayload) {
    contact.name = Some(payload.name.clone());
    contact.email = Some(payload.email.clone());
    contact.company_id = payload.company_id;
    contact.description = payload.description.clone();
}

#[async_trait::async_trait]
impl DirectoryClient for MockDirectory {
    async fn search_companies_by_name(&self, tenant: &str, name: &str) -> Result<Vec<Company>> {
        if let Some(failure) = self.record(DirectoryCall::SearchCompanies {
            tenant: tenant.to_string(),
            name: name.to_string(),
        }) {
            return Err(search_error(DirectoryResource::Company, failure).into());
        }

        let query = name.to_lowercase();
        let found = self
            .companies(tenant)
            .into_iter()
            .filter(|company| company.name.to_lowercase().contains(&query))
            .collect();
        self.pause().await;
        Ok(found)
    }

    async fn create_company(&self, tenant: &str, name: &str) -> Result<Company> {
        if let Some(failure) = self.record(DirectoryCall::CreateCompany {
            tenant: tenant.to_string(),
            name: name.to_string(),
        }) {
            return Err(create_error(DirectoryResource::Company, failure).into());
        }

        let id = self.add_company(tenant, name);
        Ok(Company {
            id,
            name: name.to_string(),
        })
    }

    async fn search_contacts_by_email(
        &self,
        tenant: &str,
        email: &str,
    ) -> Result<Vec<ContactRecord>> {
        if let Some(failure) = self.record(DirectoryCall::SearchContacts {
            tenant: tenant.to_string(),
            email: email.to_string(),
        }) {
            return Err(search_error(DirectoryResource::Contact, failure).into());
        }

        let found = self
            .contacts(tenant)
            .into_iter()
            .filter(|contact| contact.email.as_deref() == Some(email))
            .collect();
        self.pause().await;
        Ok(found)
    }

    async fn create_contact(
        &self,
        tenant: &str,
        payload: &ContactPayload,
    ) -> Result<Option<ContactRecord>> {
        if let Some(failure) = self.record(DirectoryCall::CreateContact {
            tenant: tenant.to_string(),
            payload: payload.clone(),
        }) {
            return Err(create_error(DirectoryResource::Contact, failure).into());
        }

        let mut behavior = self.behavior.lock().unwrap();
        let mut contact = ContactRecord {
            id: ContactId(behavior.allocate_id()),
            name: None,
            email: None,
            company_id: None,
            description: None,
        };
        apply_payload(&mut contact, payload);
        behavior.tenant(tenant).contacts.push(contact.clone());

        Ok((!behavior.empty_write_responses).then_some(contact))
    }

    async fn update_contact(
        &self,
        tenant: &str,
        id: ContactId,
        payload: &ContactPayload,
    ) -> Result<Option<ContactRecord>> {
        if let Some(failure) = self.record(DirectoryCall::UpdateContact {
            tenant: tenant.to_string(),
            id,
            payload: payload.clone(),
        }) {
            return Err(match failure {
                MockFailure::MalformedBody => {
                    DirectoryError::deserialization(DirectoryResource::Contact, failure.message())
                }
                _ => DirectoryError::update_failed(failure.status(), failure.message()),
            }
            .into());
        }

        let mut behavior = self.behavior.lock().unwrap();
        let empty_response = behavior.empty_write_responses;
        let Some(contact) = behavior
            .tenant(tenant)
            .contacts
            .iter_mut()
            .find(|contact| contact.id == id)
        else {
            return Err(DirectoryError::update_failed(Some(404), "mock contact not found").into());
        };
        apply_payload(contact, payload);

        Ok((!empty_response).then(|| contact.clone()))
    }
}
