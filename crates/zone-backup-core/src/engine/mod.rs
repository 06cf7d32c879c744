//! Zone backup engine
//!
//! The BackupEngine is responsible for:
//! - Decoding the trigger payload into change notifications
//! - Resolving the zones each notification selects
//! - Dumping each zone through the ZoneSource into the ObjectStore
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ TriggerEvent │─── base64(gzip(json)) ───┐
//! └──────────────┘                          │
//!                                           ▼
//!                                  ┌────────────────┐
//!                                  │  BackupEngine  │
//!                                  └────────────────┘
//!                                           │
//!         ┌─────────────────────────────────┼─────────────────────────────┐
//!         │                                 │                             │
//!         ▼                                 ▼                             ▼
//! ┌──────────────┐                 ┌──────────────┐              ┌──────────────┐
//! │  ZoneSource  │                 │ ObjectStore  │              │   Activity   │
//! │  (read)      │                 │ (put)        │              │   (log line) │
//! └──────────────┘                 └──────────────┘              └──────────────┘
//! ```
//!
//! ## Event Flow
//!
//! 1. Decode the batch (fatal on malformed payload)
//! 2. For each log event, in order: parse the notification
//! 3. Select and resolve zones (empty selection is a no-op)
//! 4. Dump each zone, emitting one activity line per zone
//! 5. Return the summary; the first error aborts everything after it

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::BackupConfig;
use crate::error::Result;
use crate::model::ChangeNotification;
use crate::pipeline::{
    DumpReport, TriggerEvent, ZoneDumper, decode_batch, resolve_zones, select_zones,
};
use crate::traits::{ObjectStore, ZoneSource};

/// Outcome of one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationSummary {
    /// Log events in the batch
    pub log_events: usize,
    /// Whether the batch was a subscription probe
    pub control_message: bool,
    /// Dumped zones, in processing order
    pub zones: Vec<DumpReport>,
}

/// Core backup engine
///
/// Holds the two collaborators and the configuration. It keeps no state
/// between calls to [`BackupEngine::handle`], so one engine can serve every
/// invocation of a warm Lambda container.
pub struct BackupEngine {
    /// Read API of the DNS provider
    source: Box<dyn ZoneSource>,

    /// Destination storage
    store: Box<dyn ObjectStore>,

    config: BackupConfig,
}

impl BackupEngine {
    /// Create a new engine
    ///
    /// Fails if the configuration does not validate.
    pub fn new(
        source: Box<dyn ZoneSource>,
        store: Box<dyn ObjectStore>,
        config: BackupConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            source,
            store,
            config,
        })
    }

    /// Process one trigger payload
    pub async fn handle(&self, trigger: &TriggerEvent) -> Result<InvocationSummary> {
        let batch = decode_batch(trigger)?;

        let mut summary = InvocationSummary {
            log_events: batch.log_events.len(),
            control_message: batch.is_control_message(),
            zones: Vec::new(),
        };

        if summary.control_message {
            debug!("Control message received, nothing to back up");
            return Ok(summary);
        }

        for event in &batch.log_events {
            let notification = event.notification()?;
            let reports = self.process_notification(&notification).await?;
            summary.zones.extend(reports);
        }

        info!(
            "Processed {} log event(s), backed up {} zone(s) to {}",
            summary.log_events,
            summary.zones.len(),
            self.config.bucket
        );

        Ok(summary)
    }

    /// Back up the zones selected by one notification
    pub async fn process_notification(
        &self,
        notification: &ChangeNotification,
    ) -> Result<Vec<DumpReport>> {
        let selections = select_zones(&self.config, notification);
        if selections.is_empty() {
            debug!(
                "No zone selected for {} event",
                notification.event_name.as_deref().unwrap_or("<unnamed>")
            );
            return Ok(Vec::new());
        }

        let zones = resolve_zones(self.source.as_ref(), &selections).await?;

        ZoneDumper::new(self.source.as_ref(), self.store.as_ref(), &self.config.bucket)
            .dump_zones(&zones, notification)
            .await
    }
}
