use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use crate::error::ContentError;

use super::ContentStore;

/// Local filesystem content, optionally re-rooted.
///
/// Paths handed in are the internal storage paths recorded at file creation
/// (e.g. `/share/<uuid>.pdf`). With a root set, they are resolved beneath
/// it, which lets tests and sidecar deployments mount the share elsewhere.
#[derive(Debug, Clone, Default)]
pub struct FileContentStore {
    root: Option<PathBuf>,
}

impl FileContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: Some(root.as_ref().to_path_buf()),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) => {
                let relative = path.strip_prefix("/").unwrap_or(path);
                root.join(relative)
            }
            None => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl ContentStore for FileContentStore {
    async fn delete(&self, path: &Path) -> Result<(), ContentError> {
        let target = self.resolve(path);
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                debug!("Deleted file content at {}", target.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("File content already absent at {}", target.display());
                Ok(())
            }
            Err(e) => Err(ContentError::Delete {
                path: target,
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_under_root() {
        let store = FileContentStore::with_root("/mnt/data");
        assert_eq!(
            store.resolve(Path::new("/share/a.pdf")),
            PathBuf::from("/mnt/data/share/a.pdf")
        );

        let plain = FileContentStore::new();
        assert_eq!(
            plain.resolve(Path::new("/share/a.pdf")),
            PathBuf::from("/share/a.pdf")
        );
    }

    #[tokio::test]
    async fn test_delete_existing_and_missing_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileContentStore::with_root(dir.path());

        let share = dir.path().join("share");
        std::fs::create_dir_all(&share).unwrap();
        std::fs::write(share.join("a.pdf"), b"%PDF").unwrap();

        store.delete(Path::new("/share/a.pdf")).await.unwrap();
        assert!(!share.join("a.pdf").exists());

        // Second delete finds nothing and still succeeds.
        store.delete(Path::new("/share/a.pdf")).await.unwrap();
    }
}
