//! GitFresh command line library
//!
//! Configuration, error reporting and output formatting for the `gitfresh`
//! binary, exposed as a library so they can be tested directly.

pub mod config;
pub mod error;
pub mod orchestrators;
pub mod output;
pub mod terminal;
