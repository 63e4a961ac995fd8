//! Shared HTTP plumbing for the remote collaborators

use crate::directory::freshdesk::SUBDOMAIN_PLACEHOLDER;
use crate::error::{Result, ValidationError};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// User agent sent on every outbound request
pub const USER_AGENT: &str = concat!("gitfresh/", env!("CARGO_PKG_VERSION"));

/// Maximum number of characters of an error body kept in error messages
const BODY_EXCERPT_LEN: usize = 200;

/// Build the reqwest client used by one collaborator
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| {
            ValidationError::invalid_configuration(format!("Failed to build HTTP client: {e}"))
                .into()
        })
}

/// Parse a configured base URL that further path segments will be appended to
pub(crate) fn parse_base_url(setting: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value).map_err(|e| {
        ValidationError::invalid_configuration(format!("{setting} is not a valid URL: {e}"))
    })?;

    if url.cannot_be_a_base() {
        return Err(ValidationError::invalid_configuration(format!(
            "{setting} cannot be used as a base URL: {value}"
        ))
        .into());
    }

    Ok(url)
}

/// Check that a configured API URL can serve as a base URL
///
/// A `{subdomain}` placeholder is accepted and checked with a sample tenant.
pub fn validate_api_url(setting: &str, value: &str) -> Result<()> {
    parse_base_url(setting, &value.replace(SUBDOMAIN_PLACEHOLDER, "example")).map(|_| ())
}

/// Append path segments to a base URL, escaping each segment
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        path.extend(segments);
    }
    url
}

/// Decode a body that may legitimately be `null` or empty
pub(crate) fn decode_optional<T: DeserializeOwned>(
    body: &str,
) -> std::result::Result<Option<T>, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<T>>(body)
}

/// Shorten a response body for inclusion in an error message
pub(crate) fn body_excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_LEN).collect()
}

/// Status code of a transport error, if the failure happened after a response
pub(crate) fn error_status(err: &reqwest::Error) -> Option<u16> {
    err.status().map(|s| s.as_u16())
}
