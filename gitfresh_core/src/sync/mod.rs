//! Sync pipeline
//!
//! [`SyncOrchestrator`] composes the identity lookup, record validation,
//! company resolution and contact upsert for a single user.

pub mod guard;
pub mod orchestrator;

pub use guard::CreationGuard;
pub use orchestrator::{SyncOptions, SyncOrchestrator, SyncReport, build_payload};
