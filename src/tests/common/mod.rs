//! Common Test Utilities
//!
//! Shared fixtures used across test modules:
//! - A minimal catalog entry type for exercising the filter engine
//! - Contact form inputs in known states

pub mod fixtures;

pub use fixtures::*;
