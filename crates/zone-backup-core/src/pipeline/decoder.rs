//! Batch decoder
//!
//! A CloudWatch Logs subscription delivers its batch as
//! `{"awslogs": {"data": "<base64>"}}` where the data is a gzip-compressed
//! JSON document. Each log event's `message` is a CloudTrail entry encoded as
//! a JSON string.

use std::io::Read;

use base64::{Engine, engine::general_purpose::STANDARD};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::ChangeNotification;

/// `messageType` of the reachability probe sent when a subscription is created
pub const CONTROL_MESSAGE: &str = "CONTROL_MESSAGE";

/// Raw trigger payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub awslogs: AwsLogs,
}

impl TriggerEvent {
    /// Wrap already-encoded batch data
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            awslogs: AwsLogs { data: data.into() },
        }
    }
}

/// Encoded batch carried by the trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsLogs {
    /// base64(gzip(json))
    pub data: String,
}

/// Decoded log batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogBatch {
    /// `DATA_MESSAGE` or `CONTROL_MESSAGE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_stream: Option<String>,

    #[serde(default)]
    pub subscription_filters: Vec<String>,

    /// Events in delivery order
    pub log_events: Vec<LogEvent>,
}

impl LogBatch {
    /// Whether this batch is a subscription probe rather than real log data
    pub fn is_control_message(&self) -> bool {
        self.message_type.as_deref() == Some(CONTROL_MESSAGE)
    }
}

/// One log event of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    /// JSON-encoded change notification
    pub message: String,
}

impl LogEvent {
    /// Parse the embedded change notification
    pub fn notification(&self) -> Result<ChangeNotification> {
        Ok(serde_json::from_str(&self.message)?)
    }
}

/// Decode the trigger payload into a log batch
///
/// Fails without partial results when the data is not valid base64, not
/// valid gzip, or not a log batch document.
pub fn decode_batch(trigger: &TriggerEvent) -> Result<LogBatch> {
    let compressed = STANDARD
        .decode(trigger.awslogs.data.trim())
        .map_err(|e| Error::decode(format!("invalid base64 payload: {}", e)))?;

    let mut decoder = GzDecoder::new(&compressed[..]);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| Error::decode(format!("invalid gzip payload: {}", e)))?;

    let batch: LogBatch = serde_json::from_slice(&decompressed)?;

    debug!(
        "Decoded batch from {} with {} log event(s)",
        batch.log_group.as_deref().unwrap_or("<unknown log group>"),
        batch.log_events.len()
    );

    Ok(batch)
}
