//! Full sync over HTTP against mock GitHub and Freshdesk servers

use gitfresh_core::{
    ContactAction, ErrorKind, FreshdeskConfig, GitHubConfig, SecretString, SyncOptions,
    SyncOrchestrator,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Servers {
    github: MockServer,
    freshdesk: MockServer,
}

impl Servers {
    async fn start() -> Self {
        Self {
            github: MockServer::start().await,
            freshdesk: MockServer::start().await,
        }
    }

    fn orchestrator(&self) -> SyncOrchestrator {
        SyncOrchestrator::from_configs(
            GitHubConfig {
                api_url: format!("{}/users/", self.github.uri()),
                token: None,
                timeout_seconds: 5,
            },
            FreshdeskConfig {
                api_url: format!("{}/api/v2/", self.freshdesk.uri()),
                api_key: SecretString::new("fake-api-key"),
                timeout_seconds: 5,
                default_subdomain: None,
            },
            SyncOptions::default(),
        )
        .unwrap()
    }

    async fn serve_octocat(&self, company: Option<&str>) {
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octocat",
                "name": "The Octocat",
                "email": "octocat@github.com",
                "company": company,
                "bio": "There once was..."
            })))
            .expect(1)
            .mount(&self.github)
            .await;
    }
}

#[tokio::test]
async fn test_creates_company_and_contact() {
    let servers = Servers::start().await;
    servers.serve_octocat(Some("Acme")).await;

    Mock::given(method("GET"))
        .and(path("/api/v2/companies/autocomplete"))
        .and(query_param("name", "Acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "companies": [{"id": 3, "name": "Acme Rockets"}]
        })))
        .expect(1)
        .mount(&servers.freshdesk)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/companies"))
        .and(body_json(json!({"name": "Acme"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 77, "name": "Acme"})))
        .expect(1)
        .mount(&servers.freshdesk)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/contacts"))
        .and(query_param("email", "octocat@github.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&servers.freshdesk)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/contacts"))
        .and(body_json(json!({
            "name": "The Octocat",
            "email": "octocat@github.com",
            "company_id": 77,
            "description": "There once was..."
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1001,
            "name": "The Octocat",
            "email": "octocat@github.com",
            "company_id": 77
        })))
        .expect(1)
        .mount(&servers.freshdesk)
        .await;

    let report = servers
        .orchestrator()
        .sync_detailed("acme", "octocat")
        .await
        .unwrap();

    assert!(report.synced());
    assert_eq!(report.action, ContactAction::Created);
    assert_eq!(report.company_id.map(|id| id.0), Some(77));
}

#[tokio::test]
async fn test_updates_existing_contact_without_company() {
    let servers = Servers::start().await;
    servers.serve_octocat(None).await;

    Mock::given(method("GET"))
        .and(path("/api/v2/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 12, "email": "octocat@github.com"},
            {"id": 13, "email": "octocat@github.com"}
        ])))
        .expect(1)
        .mount(&servers.freshdesk)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/contacts/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12})))
        .expect(1)
        .mount(&servers.freshdesk)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/companies/autocomplete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"companies": []})))
        .expect(0)
        .mount(&servers.freshdesk)
        .await;

    let synced = servers.orchestrator().sync("acme", "octocat").await.unwrap();
    assert!(synced);
}

#[tokio::test]
async fn test_missing_email_never_calls_directory() {
    let servers = Servers::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "name": "The Octocat",
            "email": null
        })))
        .mount(&servers.github)
        .await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&servers.freshdesk)
        .await;

    let err = servers
        .orchestrator()
        .sync("acme", "octocat")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IdentityMissingField);
}

#[tokio::test]
async fn test_github_failure_never_calls_directory() {
    let servers = Servers::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&servers.github)
        .await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&servers.freshdesk)
        .await;

    let err = servers
        .orchestrator()
        .sync("acme", "octocat")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IdentityLookupFailed);
    assert_eq!(err.status(), Some(500));
}
