// # Memory Object Store
//
// In-memory implementation of ObjectStore.
//
// ## Purpose
//
// Keeps every written object in a map and remembers the order of the
// writes. Useful for tests and for embedding the pipeline where the caller
// wants the documents rather than a storage side effect.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::ObjectStore;

/// In-memory object store implementation
///
/// Clones share the same underlying map.
///
/// # Example
///
/// ```rust,no_run
/// use zone_backup_core::store::MemoryObjectStore;
/// use zone_backup_core::traits::ObjectStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryObjectStore::new();
///
///     store.put_object("backups", "example.com.json", b"[]".to_vec()).await?;
///
///     assert_eq!(store.get("backups", "example.com.json").await, Some(b"[]".to_vec()));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    objects: HashMap<(String, String), Vec<u8>>,
    writes: Vec<(String, String)>,
}

impl MemoryObjectStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content of an object
    pub async fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.inner
            .read()
            .await
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Current content of an object, parsed as JSON
    pub async fn get_json(&self, bucket: &str, key: &str) -> Option<serde_json::Value> {
        let body = self.get(bucket, key).await?;
        serde_json::from_slice(&body).ok()
    }

    /// Keys of every write, in write order (repeats included)
    pub async fn write_log(&self) -> Vec<String> {
        self.inner
            .read()
            .await
            .writes
            .iter()
            .map(|(_, key)| key.clone())
            .collect()
    }

    /// Number of distinct objects stored
    pub async fn len(&self) -> usize {
        self.inner.read().await.objects.len()
    }

    /// Whether nothing has been written
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), Error> {
        if key.is_empty() {
            return Err(Error::object_store("memory", "object key cannot be empty"));
        }

        let mut inner = self.inner.write().await;
        let address = (bucket.to_string(), key.to_string());
        inner.writes.push(address.clone());
        inner.objects.insert(address, body);
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}
