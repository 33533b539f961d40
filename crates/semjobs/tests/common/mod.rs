//! Shared test utilities for semjobs integration tests.
//!
//! This module provides:
//! - `TestHarness` wiring every manager to one in-memory store
//! - `FailingStore` for checking that store failures propagate

pub mod harness;
pub mod stores;

// Each test binary uses a different subset of these.
#[allow(unused_imports)]
pub use harness::{iri, TestHarness};
#[allow(unused_imports)]
pub use stores::FailingStore;
