//! Crate-level tests that cut across modules.

mod common;
mod property;
