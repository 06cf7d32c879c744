//! Zone dumper
//!
//! For each zone, in order:
//!
//! 1. drain the record-set listing
//! 2. emit the activity line
//! 3. write `<zone name>json`
//! 4. fetch every referenced health check (one call per reference)
//! 5. write `<canonical zone name>_healthchecks.json` if any were found
//!
//! Steps 3 and 5 are not transactional. A failure in step 4 or 5 leaves the
//! records file in place, a failure in step 3 prevents steps 4 and 5.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::model::{ChangeNotification, HealthCheck, HostedZone, RecordSet};
use crate::pipeline::activity::log_activity;
use crate::pipeline::pagination::drain_pages;
use crate::traits::{ObjectStore, ZoneSource};

/// Appended to the fully-qualified zone name to form the records key
pub const RECORDS_EXTENSION: &str = "json";

/// Appended to the canonical zone name to form the health-check key
pub const HEALTH_CHECKS_SUFFIX: &str = "_healthchecks.json";

/// Key of the records file: `example.com.` → `example.com.json`
pub fn records_key(zone: &HostedZone) -> String {
    format!("{}{}", zone.name, RECORDS_EXTENSION)
}

/// Key of the health-check file: `example.com.` → `example.com_healthchecks.json`
pub fn health_checks_key(zone: &HostedZone) -> String {
    format!("{}{}", zone.canonical_name(), HEALTH_CHECKS_SUFFIX)
}

/// What was written for one zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpReport {
    /// Zone identifier as returned by the provider
    pub zone_id: String,
    /// Fully-qualified zone name, trailing dot included
    pub zone_name: String,
    /// Record sets written to the records file
    pub record_count: usize,
    /// Health checks written to the health-check file
    pub health_check_count: usize,
    /// Key of the records file
    pub records_key: String,
    /// `None` when no record references a health check
    pub health_checks_key: Option<String>,
}

/// Dumps zones from a [`ZoneSource`] into an [`ObjectStore`]
pub struct ZoneDumper<'a> {
    source: &'a dyn ZoneSource,
    store: &'a dyn ObjectStore,
    bucket: &'a str,
}

impl<'a> ZoneDumper<'a> {
    pub fn new(source: &'a dyn ZoneSource, store: &'a dyn ObjectStore, bucket: &'a str) -> Self {
        Self {
            source,
            store,
            bucket,
        }
    }

    /// Dump each zone in turn, stopping at the first failure
    pub async fn dump_zones(
        &self,
        zones: &[HostedZone],
        notification: &ChangeNotification,
    ) -> Result<Vec<DumpReport>> {
        let mut reports = Vec::with_capacity(zones.len());
        for zone in zones {
            reports.push(self.dump_zone(zone, notification).await?);
        }
        Ok(reports)
    }

    /// Dump one zone
    pub async fn dump_zone(
        &self,
        zone: &HostedZone,
        notification: &ChangeNotification,
    ) -> Result<DumpReport> {
        let source = self.source;
        let zone_id = zone.id.as_str();
        let records: Vec<RecordSet> =
            drain_pages(move |cursor| source.list_resource_record_sets(zone_id, cursor)).await?;

        log_activity(notification, zone, records.len())?;

        let records_key = records_key(zone);
        self.store
            .put_object(self.bucket, &records_key, serde_json::to_vec(&records)?)
            .await?;
        debug!(
            "Wrote {} record set(s) to {}/{} via {}",
            records.len(),
            self.bucket,
            records_key,
            self.store.store_name()
        );

        let health_checks = self.fetch_health_checks(&records).await?;

        let health_checks_key = if health_checks.is_empty() {
            debug!("Zone {} has no health checks", zone.name);
            None
        } else {
            let key = health_checks_key(zone);
            self.store
                .put_object(self.bucket, &key, serde_json::to_vec(&health_checks)?)
                .await?;
            debug!(
                "Wrote {} health check(s) to {}/{}",
                health_checks.len(),
                self.bucket,
                key
            );
            Some(key)
        };

        Ok(DumpReport {
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
            record_count: records.len(),
            health_check_count: health_checks.len(),
            records_key,
            health_checks_key,
        })
    }

    /// One lookup per referencing record set, repeats included
    async fn fetch_health_checks(&self, records: &[RecordSet]) -> Result<Vec<HealthCheck>> {
        let mut health_checks = Vec::new();
        for health_check_id in records.iter().filter_map(|r| r.health_check_id.as_deref()) {
            health_checks.push(self.source.get_health_check(health_check_id).await?);
        }
        Ok(health_checks)
    }
}
