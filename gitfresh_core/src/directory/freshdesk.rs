//! Freshdesk API v2 client

use super::DirectoryClient;
use super::types::{
    Company, CompanyCreate, CompanySearchResult, ContactId, ContactPayload, ContactRecord,
};
use crate::error::{DirectoryError, DirectoryResource, Result, ValidationError};
use crate::http::{
    body_excerpt, build_client, decode_optional, error_status, join_segments, parse_base_url,
    validate_api_url,
};
use crate::secret::SecretString;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder replaced by the tenant subdomain in the API URL template
pub const SUBDOMAIN_PLACEHOLDER: &str = "{subdomain}";

/// Default API URL template
pub const DEFAULT_FRESHDESK_API_URL: &str = "https://{subdomain}.freshdesk.com/api/v2/";

/// Connection settings for the Freshdesk API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreshdeskConfig {
    /// API URL template, `{subdomain}` is replaced by the tenant
    pub api_url: String,
    /// API key, sent as the Basic auth user name
    #[serde(default)]
    pub api_key: SecretString,
    /// Request timeout
    pub timeout_seconds: u64,
    /// Tenant used when the caller does not name one
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::text::optional_text"
    )]
    pub default_subdomain: Option<String>,
}

impl Default for FreshdeskConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_FRESHDESK_API_URL.to_string(),
            api_key: SecretString::default(),
            timeout_seconds: 30,
            default_subdomain: None,
        }
    }
}

/// Check that a tenant can be substituted into a host name
pub fn validate_subdomain(tenant: &str) -> std::result::Result<(), ValidationError> {
    if tenant.is_empty() {
        return Err(ValidationError::invalid_parameter(
            "subdomain",
            "must not be empty",
        ));
    }
    if !tenant
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ValidationError::invalid_parameter(
            "subdomain",
            "may only contain ASCII letters, digits and '-'",
        ));
    }
    Ok(())
}

/// Directory client backed by the Freshdesk REST API
#[derive(Debug, Clone)]
pub struct FreshdeskClient {
    api_url: String,
    api_key: SecretString,
    http_client: Client,
}

impl FreshdeskClient {
    /// Create a client from configuration
    pub fn new(config: FreshdeskConfig) -> Result<Self> {
        let http_client = build_client(Duration::from_secs(config.timeout_seconds))?;
        Self::with_http_client(config, http_client)
    }

    /// Create a client with a pre-built `reqwest::Client`
    pub fn with_http_client(config: FreshdeskConfig, http_client: Client) -> Result<Self> {
        if config.api_key.is_blank() {
            return Err(
                ValidationError::invalid_configuration("freshdesk.api_key is not set").into(),
            );
        }
        validate_api_url("freshdesk.api_url", &config.api_url)?;

        Ok(Self {
            api_url: config.api_url,
            api_key: config.api_key,
            http_client,
        })
    }

    /// Base URL for one tenant
    fn tenant_url(&self, tenant: &str) -> Result<Url> {
        validate_subdomain(tenant)?;
        parse_base_url(
            "freshdesk.api_url",
            &self.api_url.replace(SUBDOMAIN_PLACEHOLDER, tenant),
        )
    }

    fn endpoint(&self, tenant: &str, segments: &[&str]) -> Result<Url> {
        Ok(join_segments(&self.tenant_url(tenant)?, segments))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .basic_auth(self.api_key.expose_secret(), Some("X"))
            .header(ACCEPT, "application/json")
    }

    /// Send a request and return the body of a successful response
    async fn execute<F>(&self, request: RequestBuilder, on_failure: F) -> Result<String>
    where
        F: Fn(Option<u16>, String) -> DirectoryError,
    {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| on_failure(error_status(&e), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(on_failure(Some(status.as_u16()), body_excerpt(&body)).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| on_failure(Some(status.as_u16()), e.to_string()))?;
        Ok(body)
    }
}

fn company_decode_error(message: impl Into<String>) -> DirectoryError {
    DirectoryError::deserialization(DirectoryResource::Company, message)
}

fn contact_decode_error(message: impl Into<String>) -> DirectoryError {
    DirectoryError::deserialization(DirectoryResource::Contact, message)
}

#[async_trait::async_trait]
impl DirectoryClient for FreshdeskClient {
    async fn search_companies_by_name(&self, tenant: &str, name: &str) -> Result<Vec<Company>> {
        let url = self.endpoint(tenant, &["companies", "autocomplete"])?;
        debug!("Searching companies named '{name}' in {tenant}");

        let request = self.http_client.get(url).query(&[("name", name)]);
        let body = self
            .execute(request, |status, message| {
                DirectoryError::search_failed(DirectoryResource::Company, status, message)
            })
            .await?;

        let result = decode_optional::<CompanySearchResult>(&body)
            .map_err(|e| company_decode_error(e.to_string()))?
            .ok_or_else(|| company_decode_error("empty search response"))?;
        Ok(result.into_companies())
    }

    async fn create_company(&self, tenant: &str, name: &str) -> Result<Company> {
        let url = self.endpoint(tenant, &["companies"])?;
        debug!("Creating company '{name}' in {tenant}");

        let request = self.http_client.post(url).json(&CompanyCreate { name });
        let body = self
            .execute(request, |status, message| {
                DirectoryError::create_failed(DirectoryResource::Company, status, message)
            })
            .await?;

        let company = decode_optional::<Company>(&body)
            .map_err(|e| company_decode_error(e.to_string()))?
            .ok_or_else(|| company_decode_error("empty create response"))?;
        Ok(company)
    }

    async fn search_contacts_by_email(
        &self,
        tenant: &str,
        email: &str,
    ) -> Result<Vec<ContactRecord>> {
        let url = self.endpoint(tenant, &["contacts"])?;
        debug!("Searching contacts by email in {tenant}");

        let request = self.http_client.get(url).query(&[("email", email)]);
        let body = self
            .execute(request, |status, message| {
                DirectoryError::search_failed(DirectoryResource::Contact, status, message)
            })
            .await?;

        let contacts = decode_optional::<Vec<ContactRecord>>(&body)
            .map_err(|e| contact_decode_error(e.to_string()))?
            .unwrap_or_default();
        Ok(contacts)
    }

    async fn create_contact(
        &self,
        tenant: &str,
        payload: &ContactPayload,
    ) -> Result<Option<ContactRecord>> {
        let url = self.endpoint(tenant, &["contacts"])?;
        debug!("Creating contact in {tenant}");

        let request = self.http_client.post(url).json(payload);
        let body = self
            .execute(request, |status, message| {
                DirectoryError::create_failed(DirectoryResource::Contact, status, message)
            })
            .await?;

        let contact = decode_optional::<ContactRecord>(&body)
            .map_err(|e| contact_decode_error(e.to_string()))?;
        Ok(contact)
    }

    async fn update_contact(
        &self,
        tenant: &str,
        id: ContactId,
        payload: &ContactPayload,
    ) -> Result<Option<ContactRecord>> {
        let id_segment = id.to_string();
        let url = self.endpoint(tenant, &["contacts", &id_segment])?;
        debug!("Updating contact {id} in {tenant}");

        let request = self.http_client.put(url).json(payload);
        let body = self
            .execute(request, |status, message| {
                DirectoryError::update_failed(status, message)
            })
            .await?;

        let contact = decode_optional::<ContactRecord>(&body)
            .map_err(|e| contact_decode_error(e.to_string()))?;
        Ok(contact)
    }
}
