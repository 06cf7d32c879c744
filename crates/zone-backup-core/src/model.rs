//! Data model of the pipeline
//!
//! Provider payloads are loosely typed. Each type declares only the fields
//! the pipeline reads and keeps everything else in a flattened `extra` bag,
//! so documents are written back exactly as the provider returned them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Separator that terminates every fully-qualified zone name
pub const ZONE_NAME_SEPARATOR: char = '.';

/// Strip the trailing separator from a fully-qualified zone name
///
/// `example.com.` becomes `example.com`. A name without the separator is
/// returned unchanged.
pub fn canonical_zone_name(name: &str) -> &str {
    name.strip_suffix(ZONE_NAME_SEPARATOR).unwrap_or(name)
}

/// One CloudTrail entry describing a mutating call against the DNS provider
///
/// Every declared field is optional at decode time. The activity logger is
/// the only consumer that requires them, and it fails when one is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeNotification {
    /// When the call was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,

    /// Region the call was made in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,

    /// Caller address
    #[serde(
        rename = "sourceIPAddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_ip_address: Option<String>,

    /// Service endpoint, e.g. `route53.amazonaws.com`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,

    /// API action, e.g. `ChangeResourceRecordSets`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,

    /// Parameters of the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_parameters: Option<RequestParameters>,

    /// Everything else, passed through unexamined
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChangeNotification {
    /// Zone identifier carried by the request parameters, if any
    ///
    /// An empty identifier counts as absent.
    pub fn hosted_zone_id(&self) -> Option<&str> {
        self.request_parameters
            .as_ref()
            .and_then(|params| params.hosted_zone_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Service name: first `.`-delimited segment of the event source
    pub fn service(&self) -> Option<&str> {
        self.event_source
            .as_deref()
            .and_then(|source| source.split('.').next())
    }
}

/// Request parameters of a change notification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameters {
    /// Zone the call targeted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosted_zone_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A hosted zone as returned by the read API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZone {
    /// Provider identifier
    pub id: String,

    /// Fully-qualified name, terminated by [`ZONE_NAME_SEPARATOR`]
    pub name: String,

    /// Provider metadata
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HostedZone {
    /// Create a zone without metadata
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Zone name without its trailing separator
    pub fn canonical_name(&self) -> &str {
        canonical_zone_name(&self.name)
    }
}

/// One resource record set within a zone
///
/// Opaque apart from the health-check reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Health check the record is associated with
    #[serde(
        rename = "HealthCheckId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub health_check_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecordSet {
    /// Build a record set from its provider fields
    pub fn from_fields(mut fields: Map<String, Value>) -> Self {
        let health_check_id = match fields.remove("HealthCheckId") {
            Some(Value::String(id)) => Some(id),
            Some(other) => {
                fields.insert("HealthCheckId".to_string(), other);
                None
            }
            None => None,
        };

        Self {
            health_check_id,
            extra: fields,
        }
    }
}

/// Full configuration of a health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Provider identifier
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
