// # Object Store Trait
//
// Defines the write interface of the backup destination.
//
// ## Implementations
//
// - S3: `zone-backup-store-s3` crate
// - Local directory: [`DirectoryObjectStore`](crate::store::DirectoryObjectStore)
// - In-memory: [`MemoryObjectStore`](crate::store::MemoryObjectStore)

use async_trait::async_trait;

/// Trait for object storage implementations
///
/// A single write operation addressed by bucket and key. Writing an existing
/// key replaces the object; there is no read-modify-write.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `bucket`/`key`, replacing any previous object
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>)
    -> Result<(), crate::Error>;

    /// Get the store name (for logging/debugging)
    fn store_name(&self) -> &'static str;
}
