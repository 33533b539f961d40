//! Byte storage behind physical File records.
//!
//! The lifecycle layer never writes file bytes; it only hands out target
//! paths and, on removal, asks the content store to delete them.

pub mod filesystem;

use std::path::Path;

use async_trait::async_trait;

use crate::error::ContentError;

pub use filesystem::FileContentStore;

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Deletes the bytes at `path`. Content that is already gone is not an
    /// error.
    async fn delete(&self, path: &Path) -> Result<(), ContentError>;
}
