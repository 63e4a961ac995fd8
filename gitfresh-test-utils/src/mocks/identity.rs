//! Mock implementation of IdentityLookup for testing

use super::MockFailure;
use gitfresh_core::error::IdentityError;
use gitfresh_core::{IdentityLookup, IdentityRecord, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory identity provider
///
/// Handles without a registered record answer successfully with no user,
/// the way a provider returning a `null` body does.
///
/// # Examples
///
/// ```rust,no_run
/// use gitfresh_test_utils::{IdentityRecordBuilder, MockIdentityLookup};
///
/// let identity = MockIdentityLookup::new();
/// identity.add_record(IdentityRecordBuilder::complete("octocat").build());
/// ```
#[derive(Clone, Default)]
pub struct MockIdentityLookup {
    behavior: Arc<Mutex<IdentityBehavior>>,
}

#[derive(Default)]
struct IdentityBehavior {
    records: HashMap<String, IdentityRecord>,
    failure: Option<MockFailure>,
    calls: Vec<String>,
}

impl MockIdentityLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `record` for its handle
    pub fn add_record(&self, record: IdentityRecord) {
        let mut behavior = self.behavior.lock().unwrap();
        behavior.records.insert(record.handle.clone(), record);
    }

    /// Fail every lookup with `failure`
    pub fn fail_with(&self, failure: MockFailure) {
        self.behavior.lock().unwrap().failure = Some(failure);
    }

    /// Handles looked up so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.behavior.lock().unwrap().calls.clone()
    }
}

#[async_trait::async_trait]
impl IdentityLookup for MockIdentityLookup {
    async fn fetch(&self, handle: &str) -> Result<Option<IdentityRecord>> {
        let mut behavior = self.behavior.lock().unwrap();
        behavior.calls.push(handle.to_string());

        match behavior.failure {
            Some(MockFailure::MalformedBody) => {
                Err(IdentityError::deserialization(MockFailure::MalformedBody.message()).into())
            }
            Some(failure) => {
                Err(IdentityError::lookup_failed(failure.status(), failure.message()).into())
            }
            None => Ok(behavior.records.get(handle).cloned()),
        }
    }
}
