//! Activity logger
//!
//! One line per dumped zone:
//!
//! ```text
//! [2024-05-01T10:00:00Z] us-east-1	203.0.113.7	route53:ChangeResourceRecordSets	recordCount:12	zoneName:example.com
//! ```

use std::fmt;

use tracing::info;

use crate::error::{Error, Result};
use crate::model::{ChangeNotification, HostedZone};

/// Formatted activity entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLine<'a> {
    pub event_time: &'a str,
    pub region: &'a str,
    pub source_ip: &'a str,
    pub service: &'a str,
    pub action: &'a str,
    pub record_count: usize,
    pub zone_name: &'a str,
}

impl<'a> ActivityLine<'a> {
    /// Collect the fields of the line
    ///
    /// Fails with [`Error::MissingField`] when the notification or the zone
    /// lacks one of them. Other notification fields are not looked at.
    pub fn new(
        notification: &'a ChangeNotification,
        zone: &'a HostedZone,
        record_count: usize,
    ) -> Result<Self> {
        let zone_name = zone.canonical_name();
        if zone.name.is_empty() {
            return Err(Error::MissingField("Name"));
        }

        Ok(Self {
            event_time: required(&notification.event_time, "eventTime")?,
            region: required(&notification.aws_region, "awsRegion")?,
            source_ip: required(&notification.source_ip_address, "sourceIPAddress")?,
            service: notification
                .service()
                .ok_or(Error::MissingField("eventSource"))?,
            action: required(&notification.event_name, "eventName")?,
            record_count,
            zone_name,
        })
    }
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    field.as_deref().ok_or(Error::MissingField(name))
}

impl fmt::Display for ActivityLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}\t{}\t{}:{}\trecordCount:{}\tzoneName:{}",
            self.event_time,
            self.region,
            self.source_ip,
            self.service,
            self.action,
            self.record_count,
            self.zone_name
        )
    }
}

/// Emit the activity line for a dumped zone
pub fn log_activity(
    notification: &ChangeNotification,
    zone: &HostedZone,
    record_count: usize,
) -> Result<()> {
    let line = ActivityLine::new(notification, zone, record_count)?;
    info!("{}", line);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notification() -> ChangeNotification {
        serde_json::from_value(json!({
            "eventTime": "2024-05-01T10:00:00Z",
            "awsRegion": "us-east-1",
            "sourceIPAddress": "203.0.113.7",
            "eventSource": "route53.amazonaws.com",
            "eventName": "ChangeResourceRecordSets"
        }))
        .unwrap()
    }

    #[test]
    fn test_line_format() {
        let notification = notification();
        let zone = HostedZone::new("/hostedzone/Z123", "example.com.");

        let line = ActivityLine::new(&notification, &zone, 12).unwrap();
        assert_eq!(
            line.to_string(),
            "[2024-05-01T10:00:00Z] us-east-1\t203.0.113.7\troute53:ChangeResourceRecordSets\trecordCount:12\tzoneName:example.com"
        );
    }

    #[test]
    fn test_event_source_without_dots() {
        let mut notification = notification();
        notification.event_source = Some("route53".to_string());
        let zone = HostedZone::new("Z1", "example.org.");

        let line = ActivityLine::new(&notification, &zone, 0).unwrap();
        assert_eq!(line.service, "route53");
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let zone = HostedZone::new("Z1", "example.org.");

        let mut missing_time = notification();
        missing_time.event_time = None;
        assert!(matches!(
            ActivityLine::new(&missing_time, &zone, 1),
            Err(Error::MissingField("eventTime"))
        ));

        let mut missing_ip = notification();
        missing_ip.source_ip_address = None;
        assert!(matches!(
            ActivityLine::new(&missing_ip, &zone, 1),
            Err(Error::MissingField("sourceIPAddress"))
        ));

        let mut missing_source = notification();
        missing_source.event_source = None;
        assert!(matches!(
            log_activity(&missing_source, &zone, 1),
            Err(Error::MissingField("eventSource"))
        ));
    }

    #[test]
    fn test_unnamed_zone_is_reported() {
        let zone = HostedZone::new("Z1", "");
        assert!(matches!(
            ActivityLine::new(&notification(), &zone, 1),
            Err(Error::MissingField("Name"))
        ));
    }

    #[test]
    fn test_unrelated_fields_are_ignored() {
        let mut notification = notification();
        notification.request_parameters = None;
        notification.extra.clear();
        let zone = HostedZone::new("Z1", "example.org.");

        assert!(log_activity(&notification, &zone, 3).is_ok());
    }
}
