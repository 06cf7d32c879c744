// # Zone Source Trait
//
// Defines the read interface of the DNS provider.
//
// ## Implementations
//
// - Route 53: `zone-backup-provider-route53` crate
//
// ## Usage
//
// ```rust,ignore
// use zone_backup_core::ZoneSource;
//
// #[tokio::main]
// async fn main() -> zone_backup_core::Result<()> {
//     let source = /* ZoneSource implementation */;
//
//     let zone = source.get_hosted_zone("Z123").await?;
//     let first_page = source.list_resource_record_sets(&zone.id, None).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::model::{HealthCheck, HostedZone, RecordSet};

/// Continuation point of a paged listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    /// Opaque marker (zone listings)
    Marker(String),

    /// Position inside a zone's record sets
    RecordSet {
        /// Name of the next record set
        name: String,
        /// Type of the next record set
        record_type: String,
        /// Set identifier, for weighted/latency/failover records
        identifier: Option<String>,
    },
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in provider order
    pub items: Vec<T>,

    /// Where the next page starts; `None` on the last page
    pub next: Option<PageCursor>,
}

impl<T> Page<T> {
    /// A page with no successor
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    /// A page followed by another one
    pub fn with_next(items: Vec<T>, next: PageCursor) -> Self {
        Self {
            items,
            next: Some(next),
        }
    }
}

/// Trait for DNS provider read APIs
///
/// # Contract
///
/// - One request per call. Paged methods return a single page; the caller
///   drains the listing by passing back the returned cursor.
/// - No retries, no caching: the pipeline fails fast and relies on
///   redelivery of the trigger.
/// - Unknown identifiers are reported as [`Error::NotFound`](crate::Error::NotFound).
#[async_trait]
pub trait ZoneSource: Send + Sync {
    /// Look up a single zone by identifier
    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZone, crate::Error>;

    /// Fetch one page of the account's zones
    ///
    /// `cursor` is `None` for the first page.
    async fn list_hosted_zones(
        &self,
        cursor: Option<PageCursor>,
    ) -> Result<Page<HostedZone>, crate::Error>;

    /// Fetch one page of a zone's record sets
    ///
    /// `cursor` is `None` for the first page.
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<PageCursor>,
    ) -> Result<Page<RecordSet>, crate::Error>;

    /// Look up a single health check by identifier
    async fn get_health_check(&self, health_check_id: &str) -> Result<HealthCheck, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
