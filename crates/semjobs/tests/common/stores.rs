//! Store doubles.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use semjobs::rdf::{SelectQuery, Update};
use semjobs::store::Row;
use semjobs::{GraphStore, StoreError};

/// Rejects every call, counting attempts.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub calls: AtomicUsize,
}

impl FailingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphStore for FailingStore {
    async fn select(&self, _query: &SelectQuery) -> Result<Vec<Row>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Read {
            endpoint: "memory://failing".to_string(),
            reason: "connection refused".to_string(),
        })
    }

    async fn update(&self, _update: &Update) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Write {
            endpoint: "memory://failing".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}
