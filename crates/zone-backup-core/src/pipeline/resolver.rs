//! Identifier resolver
//!
//! Decides which zones a change notification should back up:
//!
//! 1. the configured fixed zone, or failing that the zone named by the
//!    notification's request parameters;
//! 2. then, independently, every zone of the account when full backup is on.
//!
//! The two are additive and never deduplicated: with a fixed zone `Z1` and
//! full backup over `{Z1, Z2, Z3}` the result is `[Z1, Z1, Z2, Z3]`.

use tracing::debug;

use crate::config::BackupConfig;
use crate::error::Result;
use crate::model::{ChangeNotification, HostedZone};
use crate::pipeline::pagination::drain_pages;
use crate::traits::ZoneSource;

/// One zone-selection directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneSelection {
    /// A single zone, looked up by identifier
    Specific(String),
    /// Every zone in the account
    All,
}

/// Compute the selection directives for one notification
///
/// Returns an empty list when there is nothing to back up, which is not an
/// error.
pub fn select_zones(config: &BackupConfig, notification: &ChangeNotification) -> Vec<ZoneSelection> {
    let mut selections = Vec::with_capacity(2);

    let specific = config
        .zone_id
        .as_deref()
        .or_else(|| notification.hosted_zone_id());

    if let Some(zone_id) = specific {
        selections.push(ZoneSelection::Specific(zone_id.to_string()));
    }

    if config.full_backup {
        selections.push(ZoneSelection::All);
    }

    selections
}

/// Turn selection directives into zones, preserving their order
pub async fn resolve_zones(
    source: &dyn ZoneSource,
    selections: &[ZoneSelection],
) -> Result<Vec<HostedZone>> {
    let mut zones = Vec::new();

    for selection in selections {
        match selection {
            ZoneSelection::Specific(zone_id) => {
                debug!("Looking up zone {} via {}", zone_id, source.provider_name());
                zones.push(source.get_hosted_zone(zone_id).await?);
            }
            ZoneSelection::All => {
                debug!("Listing all zones via {}", source.provider_name());
                let all = drain_pages(move |cursor| source.list_hosted_zones(cursor)).await?;
                zones.extend(all);
            }
        }
    }

    Ok(zones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RequestParameters;

    fn notification_for(zone_id: Option<&str>) -> ChangeNotification {
        ChangeNotification {
            request_parameters: Some(RequestParameters {
                hosted_zone_id: zone_id.map(str::to_string),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_notification_zone_used_without_fixed_zone() {
        let config = BackupConfig::new("bucket");
        let selections = select_zones(&config, &notification_for(Some("Z123")));
        assert_eq!(selections, vec![ZoneSelection::Specific("Z123".to_string())]);
    }

    #[test]
    fn test_fixed_zone_wins_over_notification() {
        let config = BackupConfig::new("bucket").with_zone_id("Z1");
        let selections = select_zones(&config, &notification_for(Some("Z999")));
        assert_eq!(selections, vec![ZoneSelection::Specific("Z1".to_string())]);
    }

    #[test]
    fn test_full_backup_is_additive() {
        let config = BackupConfig::new("bucket")
            .with_zone_id("Z1")
            .with_full_backup(true);
        let selections = select_zones(&config, &notification_for(None));
        assert_eq!(
            selections,
            vec![ZoneSelection::Specific("Z1".to_string()), ZoneSelection::All]
        );
    }

    #[test]
    fn test_full_backup_alone() {
        let config = BackupConfig::new("bucket").with_full_backup(true);
        let selections = select_zones(&config, &ChangeNotification::default());
        assert_eq!(selections, vec![ZoneSelection::All]);
    }

    #[test]
    fn test_nothing_to_select() {
        let config = BackupConfig::new("bucket");
        assert!(select_zones(&config, &ChangeNotification::default()).is_empty());
        assert!(select_zones(&config, &notification_for(Some(""))).is_empty());
    }
}
