// # Directory Object Store
//
// File-based implementation of ObjectStore.
//
// ## Purpose
//
// Lets the pipeline run without object storage (local invocations, dry
// runs against a real account). Each object lands at
// `<root>/<bucket>/<key>`.
//
// ## Write Semantics
//
// - Atomic writes: body is written to `<key>.tmp`, flushed, then renamed
// - Overwrite: an existing object is replaced by the rename
// - Keys may contain `/` (nested directories) but never `..` segments

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::Error;
use crate::traits::ObjectStore;

/// Local-directory object store
///
/// # Example
///
/// ```rust,no_run
/// use zone_backup_core::store::DirectoryObjectStore;
/// use zone_backup_core::traits::ObjectStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = DirectoryObjectStore::new("/tmp/zone-backups").await?;
///
///     // Written to /tmp/zone-backups/backups/example.com.json
///     store.put_object("backups", "example.com.json", b"[]".to_vec()).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryObjectStore {
    root: PathBuf,
}

impl DirectoryObjectStore {
    /// Create a store rooted at `root`, creating the directory if needed
    pub async fn new<P: AsRef<Path>>(root: P) -> Result<Self, Error> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(&root).await.map_err(|e| {
            Error::config(format!(
                "Failed to create backup directory {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(Self { root })
    }

    /// Location of an object on disk
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, Error> {
        let mut path = self.root.clone();

        for part in [bucket, key] {
            let relative = Path::new(part);
            let safe = !part.is_empty()
                && relative
                    .components()
                    .all(|component| matches!(component, Component::Normal(_)));

            if !safe {
                return Err(Error::object_store(
                    "directory",
                    format!("unsafe object address: {}/{}", bucket, key),
                ));
            }

            path.push(relative);
        }

        Ok(path)
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(OsString::new);
        name.push(".tmp");
        path.with_file_name(name)
    }
}

#[async_trait]
impl ObjectStore for DirectoryObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), Error> {
        let path = self.object_path(bucket, key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = Self::temp_path(&path);
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::object_store(
                    "directory",
                    format!("Failed to create temp file {}: {}", temp_path.display(), e),
                )
            })?;

            file.write_all(&body).await?;
            file.flush().await?;
        }

        fs::rename(&temp_path, &path).await.map_err(|e| {
            Error::object_store(
                "directory",
                format!(
                    "Failed to rename {} to {}: {}",
                    temp_path.display(),
                    path.display(),
                    e
                ),
            )
        })?;

        tracing::trace!("Object written to {}", path.display());
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "directory"
    }
}
