//! Configuration for one backup invocation
//!
//! The configuration is built once at cold start and handed to the
//! [`BackupEngine`](crate::BackupEngine) by value. Nothing reads the
//! environment while a batch is being processed.

use serde::{Deserialize, Serialize};

/// Shortest bucket name accepted by S3
const MIN_BUCKET_LEN: usize = 3;

/// Longest bucket name accepted by S3
const MAX_BUCKET_LEN: usize = 63;

/// Backup configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Destination bucket for every write
    pub bucket: String,

    /// Zone that is always backed up, whatever the notification says
    #[serde(default)]
    pub zone_id: Option<String>,

    /// Additionally back up every zone in the account
    #[serde(default)]
    pub full_backup: bool,
}

impl BackupConfig {
    /// Create a configuration that only follows the notifications
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            zone_id: None,
            full_backup: false,
        }
    }

    /// Pin a zone identifier
    pub fn with_zone_id(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    /// Enable or disable full-backup mode
    pub fn with_full_backup(mut self, full_backup: bool) -> Self {
        self.full_backup = full_backup;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.bucket.is_empty() {
            return Err(crate::Error::config("Bucket name cannot be empty"));
        }

        if !(MIN_BUCKET_LEN..=MAX_BUCKET_LEN).contains(&self.bucket.len()) {
            return Err(crate::Error::config(format!(
                "Bucket name must be between {} and {} characters. Got: {}",
                MIN_BUCKET_LEN,
                MAX_BUCKET_LEN,
                self.bucket.len()
            )));
        }

        if let Some(zone_id) = &self.zone_id
            && zone_id.trim().is_empty()
        {
            return Err(crate::Error::config("Fixed zone ID cannot be blank"));
        }

        Ok(())
    }
}
