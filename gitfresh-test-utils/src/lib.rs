//! Test utilities for the GitFresh sync engine
//!
//! This crate provides in-memory implementations of the collaborator traits
//! and builders for identity records.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::IdentityRecordBuilder;
pub use mocks::{
    DirectoryCall, DirectoryOperation, MockDirectory, MockFailure, MockIdentityLookup,
};
