//! Mock implementations for testing

mod directory;
mod identity;

pub use directory::{DirectoryCall, DirectoryOperation, MockDirectory};
pub use identity::MockIdentityLookup;

/// Remote failure a mock should simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Non-success HTTP status
    Status(u16),
    /// Connection failed before any status was received
    Transport,
    /// Success status with a body that does not decode
    MalformedBody,
}

impl MockFailure {
    pub(crate) fn status(self) -> Option<u16> {
        match self {
            MockFailure::Status(status) => Some(status),
            MockFailure::Transport | MockFailure::MalformedBody => None,
        }
    }

    pub(crate) fn message(self) -> String {
        match self {
            MockFailure::Status(status) => format!("mock remote answered {status}"),
            MockFailure::Transport => "mock connection refused".to_string(),
            MockFailure::MalformedBody => "mock malformed body".to_string(),
        }
    }
}
