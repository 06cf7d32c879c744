//! Test doubles and common utilities for pipeline contract tests
//!
//! This module provides scripted collaborators that record every call
//! without talking to a real provider or storage.

#![allow(dead_code)]

use base64::{Engine, engine::general_purpose::STANDARD};
use flate2::Compression;
use flate2::write::GzEncoder;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use zone_backup_core::error::{Error, Result};
use zone_backup_core::traits::{ObjectStore, Page, PageCursor, ZoneSource};
use zone_backup_core::{HealthCheck, HostedZone, RecordSet, TriggerEvent};

/// A ZoneSource serving scripted zones, record pages and health checks
#[derive(Clone, Default)]
pub struct MockZoneSource {
    /// Account zones, split into pages
    zone_pages: Arc<Vec<Vec<HostedZone>>>,
    /// Record pages per zone id
    record_pages: Arc<HashMap<String, Vec<Vec<RecordSet>>>>,
    /// Health checks per id
    health_checks: Arc<HashMap<String, HealthCheck>>,
    /// Zone ids whose record listing fails at the given page index
    failing_record_page: Arc<HashMap<String, usize>>,
    /// Every call, in order
    calls: Arc<Mutex<Vec<String>>>,
    get_zone_count: Arc<AtomicUsize>,
    list_zones_count: Arc<AtomicUsize>,
    list_records_count: Arc<AtomicUsize>,
    get_health_check_count: Arc<AtomicUsize>,
}

impl MockZoneSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the account's zones as a single page
    pub fn with_zones(self, zones: Vec<HostedZone>) -> Self {
        self.with_zone_pages(vec![zones])
    }

    /// Serve the account's zones over several pages
    pub fn with_zone_pages(mut self, pages: Vec<Vec<HostedZone>>) -> Self {
        self.zone_pages = Arc::new(pages);
        self
    }

    /// Serve a zone's record sets as a single page
    pub fn with_records(self, zone_id: &str, records: Vec<RecordSet>) -> Self {
        self.with_record_pages(zone_id, vec![records])
    }

    /// Serve a zone's record sets over several pages
    pub fn with_record_pages(mut self, zone_id: &str, pages: Vec<Vec<RecordSet>>) -> Self {
        Arc::make_mut(&mut self.record_pages).insert(zone_id.to_string(), pages);
        self
    }

    pub fn with_health_check(mut self, id: &str) -> Self {
        Arc::make_mut(&mut self.health_checks).insert(id.to_string(), health_check(id));
        self
    }

    /// Make the record listing of a zone fail on the given page
    pub fn failing_records_at(mut self, zone_id: &str, page: usize) -> Self {
        Arc::make_mut(&mut self.failing_record_page).insert(zone_id.to_string(), page);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get_zone_count(&self) -> usize {
        self.get_zone_count.load(Ordering::SeqCst)
    }

    pub fn list_zones_count(&self) -> usize {
        self.list_zones_count.load(Ordering::SeqCst)
    }

    pub fn list_records_count(&self) -> usize {
        self.list_records_count.load(Ordering::SeqCst)
    }

    pub fn get_health_check_count(&self) -> usize {
        self.get_health_check_count.load(Ordering::SeqCst)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn all_zones(&self) -> impl Iterator<Item = &HostedZone> {
        self.zone_pages.iter().flatten()
    }
}

fn page_index(cursor: &Option<PageCursor>) -> usize {
    match cursor {
        None => 0,
        Some(PageCursor::Marker(marker)) => marker.parse().expect("numeric test marker"),
        Some(PageCursor::RecordSet { name, .. }) => name.parse().expect("numeric test cursor"),
    }
}

fn paged<T: Clone>(pages: &[Vec<T>], index: usize, cursor_for: impl Fn(usize) -> PageCursor) -> Page<T> {
    let items = pages.get(index).cloned().unwrap_or_default();
    if index + 1 < pages.len() {
        Page::with_next(items, cursor_for(index + 1))
    } else {
        Page::last(items)
    }
}

#[async_trait::async_trait]
impl ZoneSource for MockZoneSource {
    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZone> {
        self.get_zone_count.fetch_add(1, Ordering::SeqCst);
        self.record(format!("get_hosted_zone:{}", zone_id));

        self.all_zones()
            .find(|zone| zone.id == zone_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("hosted zone {}", zone_id)))
    }

    async fn list_hosted_zones(&self, cursor: Option<PageCursor>) -> Result<Page<HostedZone>> {
        self.list_zones_count.fetch_add(1, Ordering::SeqCst);
        let index = page_index(&cursor);
        self.record(format!("list_hosted_zones:{}", index));

        Ok(paged(&self.zone_pages, index, |next| {
            PageCursor::Marker(next.to_string())
        }))
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<PageCursor>,
    ) -> Result<Page<RecordSet>> {
        self.list_records_count.fetch_add(1, Ordering::SeqCst);
        let index = page_index(&cursor);
        self.record(format!("list_resource_record_sets:{}:{}", zone_id, index));

        if self.failing_record_page.get(zone_id) == Some(&index) {
            return Err(Error::provider("mock", format!("page {} unavailable", index)));
        }

        let pages = self.record_pages.get(zone_id).cloned().unwrap_or_default();
        Ok(paged(&pages, index, |next| PageCursor::RecordSet {
            name: next.to_string(),
            record_type: "A".to_string(),
            identifier: None,
        }))
    }

    async fn get_health_check(&self, health_check_id: &str) -> Result<HealthCheck> {
        self.get_health_check_count.fetch_add(1, Ordering::SeqCst);
        self.record(format!("get_health_check:{}", health_check_id));

        self.health_checks
            .get(health_check_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("health check {}", health_check_id)))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// An ObjectStore that rejects writes to keys matching a predicate
pub struct FailingObjectStore {
    inner: zone_backup_core::MemoryObjectStore,
    failing_suffix: &'static str,
    attempts: Arc<AtomicUsize>,
}

impl FailingObjectStore {
    pub fn new(inner: zone_backup_core::MemoryObjectStore, failing_suffix: &'static str) -> Self {
        Self {
            inner,
            failing_suffix,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn attempts(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.attempts)
    }
}

#[async_trait::async_trait]
impl ObjectStore for FailingObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if key.ends_with(self.failing_suffix) {
            return Err(Error::object_store("failing", format!("access denied: {}", key)));
        }
        self.inner.put_object(bucket, key, body).await
    }

    fn store_name(&self) -> &'static str {
        "failing"
    }
}

pub fn zone(id: &str, name: &str) -> HostedZone {
    serde_json::from_value(json!({
        "Id": id,
        "Name": name,
        "CallerReference": format!("ref-{}", id),
        "Config": {"PrivateZone": false}
    }))
    .unwrap()
}

pub fn record(name: &str) -> RecordSet {
    serde_json::from_value(json!({
        "Name": name,
        "Type": "A",
        "TTL": 300,
        "ResourceRecords": [{"Value": "192.0.2.10"}]
    }))
    .unwrap()
}

pub fn record_with_health_check(name: &str, health_check_id: &str) -> RecordSet {
    let mut record = record(name);
    record.health_check_id = Some(health_check_id.to_string());
    record
}

/// `count` distinct records named `r<offset>.<zone>` onwards
pub fn records(zone_name: &str, offset: usize, count: usize) -> Vec<RecordSet> {
    (offset..offset + count)
        .map(|i| record(&format!("r{}.{}", i, zone_name)))
        .collect()
}

pub fn health_check(id: &str) -> HealthCheck {
    serde_json::from_value(json!({
        "Id": id,
        "CallerReference": format!("ref-{}", id),
        "HealthCheckConfig": {"Type": "HTTPS", "FullyQualifiedDomainName": "app.example.com", "Port": 443},
        "HealthCheckVersion": 1
    }))
    .unwrap()
}

/// A Route 53 CloudTrail entry
pub fn notification(hosted_zone_id: Option<&str>) -> Value {
    let mut entry = json!({
        "eventVersion": "1.08",
        "eventTime": "2024-05-01T10:00:00Z",
        "awsRegion": "us-east-1",
        "sourceIPAddress": "203.0.113.7",
        "eventSource": "route53.amazonaws.com",
        "eventName": "ChangeResourceRecordSets",
        "requestParameters": {}
    });

    if let Some(id) = hosted_zone_id {
        entry["requestParameters"]["hostedZoneId"] = json!(id);
    }

    entry
}

/// Encode notifications the way a CloudWatch Logs subscription does
pub fn trigger(notifications: &[Value]) -> TriggerEvent {
    let events: Vec<Value> = notifications
        .iter()
        .enumerate()
        .map(|(i, n)| {
            json!({
                "id": format!("{}", i),
                "timestamp": 1_714_557_600_000i64 + i as i64,
                "message": n.to_string()
            })
        })
        .collect();

    encode(&json!({
        "messageType": "DATA_MESSAGE",
        "owner": "123456789012",
        "logGroup": "aws-cloudtrail-logs",
        "logStream": "123456789012_CloudTrail_us-east-1",
        "subscriptionFilters": ["route53"],
        "logEvents": events
    }))
}

/// base64(gzip(document))
pub fn encode(document: &Value) -> TriggerEvent {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(document.to_string().as_bytes()).unwrap();
    TriggerEvent::new(STANDARD.encode(encoder.finish().unwrap()))
}
