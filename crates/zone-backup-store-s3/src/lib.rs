// # S3 Object Store
//
// This crate provides the S3 implementation of `ObjectStore` for the zone
// backup pipeline.
//
// ## Behavior
//
// - One `PutObject` per write, body sent as-is
// - No content-type negotiation, no conditional writes: an existing object
//   at the same key is replaced
// - Failures become `Error::ObjectStore` with the SDK's error context
//
// ## API Reference
//
// - PutObject: PUT `/{Bucket}/{Key}`

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use zone_backup_core::traits::ObjectStore;
use zone_backup_core::{Error, Result};

/// Store name used in errors and logs
const STORE: &str = "s3";

/// S3 object store
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Wrap an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from shared AWS configuration
    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        let size = body.len();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                Error::object_store(
                    STORE,
                    format!(
                        "PutObject s3://{}/{} failed: {}",
                        bucket,
                        key,
                        DisplayErrorContext(&e)
                    ),
                )
            })?;

        tracing::debug!("Put {} byte(s) to s3://{}/{}", size, bucket, key);
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        STORE
    }
}
