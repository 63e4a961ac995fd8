//! Support directory record types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque company identifier assigned by the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub i64);

/// Opaque contact identifier assigned by the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub i64);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Organizational grouping owned by the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
}

/// Response of the company autocomplete search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySearchResult {
    #[serde(default)]
    pub companies: Option<Vec<Company>>,
}

impl CompanySearchResult {
    /// Returned companies in remote order, empty when the list was `null`
    pub fn into_companies(self) -> Vec<Company> {
        self.companies.unwrap_or_default()
    }
}

/// Body of a company create call
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CompanyCreate<'a> {
    pub name: &'a str,
}

/// Contact as stored in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: ContactId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Contact fields submitted on create and update
///
/// `company_id` and `description` are always serialized, as `null` when
/// absent, so an update clears values that the source no longer has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub company_id: Option<CompanyId>,
    pub description: Option<String>,
}

/// Which directory write an upsert performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactAction {
    Created,
    Updated,
}

impl fmt::Display for ContactAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactAction::Created => write!(f, "created"),
            ContactAction::Updated => write!(f, "updated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_serializes_nulls() {
        let payload = ContactPayload {
            name: "The Octocat".into(),
            email: "octocat@github.com".into(),
            company_id: None,
            description: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "The Octocat",
                "email": "octocat@github.com",
                "company_id": null,
                "description": null
            })
        );
    }

    #[test]
    fn test_payload_with_company() {
        let payload = ContactPayload {
            name: "n".into(),
            email: "e@example.com".into(),
            company_id: Some(CompanyId(42)),
            description: Some("bio".into()),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["company_id"], json!(42));
        assert_eq!(value["description"], json!("bio"));
    }

    #[test]
    fn test_search_result_null_companies() {
        let result: CompanySearchResult = serde_json::from_str(r#"{"companies": null}"#).unwrap();
        assert!(result.into_companies().is_empty());

        let result: CompanySearchResult = serde_json::from_str("{}").unwrap();
        assert!(result.into_companies().is_empty());
    }

    #[test]
    fn test_contact_record_tolerates_missing_fields() {
        let contact: ContactRecord = serde_json::from_str(r#"{"id": 7, "phone": "555"}"#).unwrap();
        assert_eq!(contact.id, ContactId(7));
        assert!(contact.email.is_none());
        assert!(contact.company_id.is_none());
    }

    #[test]
    fn test_contact_action_wire_form() {
        assert_eq!(serde_json::to_value(ContactAction::Created).unwrap(), json!("created"));
        assert_eq!(ContactAction::Updated.to_string(), "updated");
    }
}
