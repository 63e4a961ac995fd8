//! Test data builders

mod identity;

pub use identity::IdentityRecordBuilder;
