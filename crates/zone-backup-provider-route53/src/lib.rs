// # Route 53 Zone Source
//
// This crate provides the Route 53 implementation of `ZoneSource` for the
// zone backup pipeline.
//
// ## Behavior
//
// - One SDK request per trait call; the core drains paged listings
// - SDK types are mapped to the JSON shape of the Route 53 API (PascalCase
//   keys), absent members are omitted
// - `NoSuchHostedZone` / `NoSuchHealthCheck` become `Error::NotFound`,
//   every other SDK failure becomes `Error::Provider`
// - No retries beyond the SDK's own retry policy, no caching
//
// ## API Reference
//
// - GetHostedZone: GET `/2013-04-01/hostedzone/{Id}`
// - ListHostedZones: GET `/2013-04-01/hostedzone?marker=...`
// - ListResourceRecordSets: GET `/2013-04-01/hostedzone/{Id}/rrset?name=...&type=...&identifier=...`
// - GetHealthCheck: GET `/2013-04-01/healthcheck/{HealthCheckId}`

use async_trait::async_trait;
use aws_sdk_route53::Client;
use aws_sdk_route53::error::{DisplayErrorContext, SdkError};
use aws_sdk_route53::types as r53;
use serde_json::{Map, Value, json};
use zone_backup_core::traits::{Page, PageCursor, ZoneSource};
use zone_backup_core::{Error, HealthCheck, HostedZone, RecordSet, Result};

/// Provider name used in errors and logs
const PROVIDER: &str = "route53";

/// Route 53 zone source
#[derive(Debug, Clone)]
pub struct Route53Source {
    client: Client,
}

impl Route53Source {
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
impl ZoneSource for Route53Source {
    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZone> {
        let output = self
            .client
            .get_hosted_zone()
            .id(zone_id)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error()
                    .is_some_and(|se| se.is_no_such_hosted_zone())
                {
                    Error::not_found(format!("hosted zone {}", zone_id))
                } else {
                    sdk_error("GetHostedZone", e)
                }
            })?;

        let zone = present::<r53::HostedZone>(output.hosted_zone).ok_or_else(|| {
            Error::provider(PROVIDER, format!("GetHostedZone returned no zone for {}", zone_id))
        })?;

        hosted_zone_from_sdk(&zone)
    }

    async fn list_hosted_zones(&self, cursor: Option<PageCursor>) -> Result<Page<HostedZone>> {
        let marker = match cursor {
            None => None,
            Some(PageCursor::Marker(marker)) => Some(marker),
            Some(other) => {
                return Err(Error::provider(
                    PROVIDER,
                    format!("unexpected cursor for ListHostedZones: {:?}", other),
                ));
            }
        };

        let output = self
            .client
            .list_hosted_zones()
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| sdk_error("ListHostedZones", e))?;

        let zones = output
            .hosted_zones
            .iter()
            .map(hosted_zone_from_sdk)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "ListHostedZones returned {} zone(s), truncated: {}",
            zones.len(),
            output.is_truncated
        );

        if !output.is_truncated {
            return Ok(Page::last(zones));
        }

        let next = output.next_marker.ok_or_else(|| {
            Error::provider(PROVIDER, "ListHostedZones truncated without NextMarker")
        })?;
        Ok(Page::with_next(zones, PageCursor::Marker(next)))
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<PageCursor>,
    ) -> Result<Page<RecordSet>> {
        let mut request = self.client.list_resource_record_sets().hosted_zone_id(zone_id);

        match cursor {
            None => {}
            Some(PageCursor::RecordSet {
                name,
                record_type,
                identifier,
            }) => {
                request = request
                    .start_record_name(name)
                    .start_record_type(r53::RrType::from(record_type.as_str()))
                    .set_start_record_identifier(identifier);
            }
            Some(other) => {
                return Err(Error::provider(
                    PROVIDER,
                    format!("unexpected cursor for ListResourceRecordSets: {:?}", other),
                ));
            }
        }

        let output = request.send().await.map_err(|e| {
            if e.as_service_error()
                .is_some_and(|se| se.is_no_such_hosted_zone())
            {
                Error::not_found(format!("hosted zone {}", zone_id))
            } else {
                sdk_error("ListResourceRecordSets", e)
            }
        })?;

        let records: Vec<RecordSet> = output
            .resource_record_sets
            .iter()
            .map(record_set_from_sdk)
            .collect();

        tracing::debug!(
            "ListResourceRecordSets returned {} record set(s) for {}, truncated: {}",
            records.len(),
            zone_id,
            output.is_truncated
        );

        if !output.is_truncated {
            return Ok(Page::last(records));
        }

        let next = record_cursor(
            output.next_record_name.as_deref(),
            output.next_record_type.as_ref().map(|t| t.as_str()),
            output.next_record_identifier.as_deref(),
        )?;
        Ok(Page::with_next(records, next))
    }

    async fn get_health_check(&self, health_check_id: &str) -> Result<HealthCheck> {
        let output = self
            .client
            .get_health_check()
            .health_check_id(health_check_id)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error()
                    .is_some_and(|se| se.is_no_such_health_check())
                {
                    Error::not_found(format!("health check {}", health_check_id))
                } else {
                    sdk_error("GetHealthCheck", e)
                }
            })?;

        let health_check = present::<r53::HealthCheck>(output.health_check).ok_or_else(|| {
            Error::provider(
                PROVIDER,
                format!("GetHealthCheck returned nothing for {}", health_check_id),
            )
        })?;

        health_check_from_sdk(&health_check)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Normalize a member that is modeled either as `T` or `Option<T>`
fn present<T>(value: impl Into<Option<T>>) -> Option<T> {
    value.into()
}

fn sdk_error<E, R>(operation: &str, err: SdkError<E, R>) -> Error
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    Error::provider(
        PROVIDER,
        format!("{} failed: {}", operation, DisplayErrorContext(&err)),
    )
}

/// Continuation point of a truncated record-set listing
fn record_cursor(
    name: Option<&str>,
    record_type: Option<&str>,
    identifier: Option<&str>,
) -> Result<PageCursor> {
    match (name, record_type) {
        (Some(name), Some(record_type)) => Ok(PageCursor::RecordSet {
            name: name.to_string(),
            record_type: record_type.to_string(),
            identifier: identifier.map(str::to_string),
        }),
        _ => Err(Error::provider(
            PROVIDER,
            "ListResourceRecordSets truncated without NextRecordName/NextRecordType",
        )),
    }
}

/// Drop `null` members from an object, recursively
fn compact(value: Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, compact(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(compact).collect()),
        other => other,
    }
}

fn object(value: Value) -> Map<String, Value> {
    match compact(value) {
        Value::Object(fields) => fields,
        _ => Map::new(),
    }
}

fn hosted_zone_from_sdk(zone: &r53::HostedZone) -> Result<HostedZone> {
    let config = zone.config.as_ref().map(|config| {
        json!({
            "Comment": config.comment,
            "PrivateZone": present::<bool>(config.private_zone),
        })
    });

    let linked_service = zone.linked_service.as_ref().map(|service| {
        json!({
            "ServicePrincipal": service.service_principal,
            "Description": service.description,
        })
    });

    let fields = object(json!({
        "Id": zone.id,
        "Name": zone.name,
        "CallerReference": zone.caller_reference,
        "Config": config,
        "ResourceRecordSetCount": zone.resource_record_set_count,
        "LinkedService": linked_service,
    }));

    Ok(serde_json::from_value(Value::Object(fields))?)
}

fn record_set_from_sdk(record: &r53::ResourceRecordSet) -> RecordSet {
    let geo_location = record.geo_location.as_ref().map(|geo| {
        json!({
            "ContinentCode": geo.continent_code,
            "CountryCode": geo.country_code,
            "SubdivisionCode": geo.subdivision_code,
        })
    });

    let resource_records = record.resource_records.as_ref().map(|values| {
        values
            .iter()
            .map(|rr| json!({ "Value": rr.value }))
            .collect::<Vec<_>>()
    });

    let alias_target = record.alias_target.as_ref().map(|alias| {
        json!({
            "HostedZoneId": alias.hosted_zone_id,
            "DNSName": alias.dns_name,
            "EvaluateTargetHealth": alias.evaluate_target_health,
        })
    });

    let cidr_routing_config = record.cidr_routing_config.as_ref().map(|cidr| {
        json!({
            "CollectionId": cidr.collection_id,
            "LocationName": cidr.location_name,
        })
    });

    let geo_proximity_location = record
        .geo_proximity_location
        .as_ref()
        .map(geo_proximity_location_json);

    RecordSet::from_fields(object(json!({
        "Name": record.name,
        "Type": record.r#type.as_str(),
        "SetIdentifier": record.set_identifier,
        "Weight": record.weight,
        "Region": record.region.as_ref().map(|r| r.as_str()),
        "GeoLocation": geo_location,
        "Failover": record.failover.as_ref().map(|f| f.as_str()),
        "MultiValueAnswer": record.multi_value_answer,
        "TTL": record.ttl,
        "ResourceRecords": resource_records,
        "AliasTarget": alias_target,
        "HealthCheckId": record.health_check_id,
        "TrafficPolicyInstanceId": record.traffic_policy_instance_id,
        "CidrRoutingConfig": cidr_routing_config,
        "GeoProximityLocation": geo_proximity_location,
    })))
}

fn geo_proximity_location_json(location: &r53::GeoProximityLocation) -> Value {
    let coordinates = location.coordinates.as_ref().map(|coordinates| {
        json!({
            "Latitude": coordinates.latitude,
            "Longitude": coordinates.longitude,
        })
    });

    json!({
        "AWSRegion": location.aws_region,
        "LocalZoneGroup": location.local_zone_group,
        "Coordinates": coordinates,
        "Bias": location.bias,
    })
}

fn health_check_config_json(config: &r53::HealthCheckConfig) -> Value {
    let alarm = config.alarm_identifier.as_ref().map(|alarm| {
        json!({
            "Region": alarm.region.as_str(),
            "Name": alarm.name,
        })
    });

    json!({
        "IPAddress": config.ip_address,
        "Port": config.port,
        "Type": present::<r53::HealthCheckType>(config.r#type.clone()).map(|t| t.as_str().to_string()),
        "ResourcePath": config.resource_path,
        "FullyQualifiedDomainName": config.fully_qualified_domain_name,
        "SearchString": config.search_string,
        "RequestInterval": config.request_interval,
        "FailureThreshold": config.failure_threshold,
        "MeasureLatency": config.measure_latency,
        "Inverted": config.inverted,
        "Disabled": config.disabled,
        "HealthThreshold": config.health_threshold,
        "ChildHealthChecks": config.child_health_checks,
        "EnableSNI": config.enable_sni,
        "Regions": config.regions.as_ref().map(|regions| {
            regions.iter().map(|r| r.as_str().to_string()).collect::<Vec<_>>()
        }),
        "AlarmIdentifier": alarm,
        "InsufficientDataHealthStatus": config
            .insufficient_data_health_status
            .as_ref()
            .map(|s| s.as_str()),
        "RoutingControlArn": config.routing_control_arn,
    })
}

fn alarm_configuration_json(alarm: &r53::CloudWatchAlarmConfiguration) -> Value {
    let dimensions = present::<Vec<r53::Dimension>>(alarm.dimensions.clone()).map(|dimensions| {
        dimensions
            .iter()
            .map(|d| json!({ "Name": d.name, "Value": d.value }))
            .collect::<Vec<_>>()
    });

    json!({
        "EvaluationPeriods": present::<i32>(alarm.evaluation_periods),
        "Threshold": present::<f64>(alarm.threshold),
        "ComparisonOperator": present::<r53::ComparisonOperator>(alarm.comparison_operator.clone())
            .map(|op| op.as_str().to_string()),
        "Period": present::<i32>(alarm.period),
        "MetricName": alarm.metric_name,
        "Namespace": alarm.namespace,
        "Statistic": present::<r53::Statistic>(alarm.statistic.clone()).map(|s| s.as_str().to_string()),
        "Dimensions": dimensions,
    })
}

fn health_check_from_sdk(health_check: &r53::HealthCheck) -> Result<HealthCheck> {
    let config = present::<r53::HealthCheckConfig>(health_check.health_check_config.clone())
        .map(|config| health_check_config_json(&config));

    let linked_service = health_check.linked_service.as_ref().map(|service| {
        json!({
            "ServicePrincipal": service.service_principal,
            "Description": service.description,
        })
    });

    let alarm_configuration = health_check
        .cloud_watch_alarm_configuration
        .as_ref()
        .map(alarm_configuration_json);

    let fields = object(json!({
        "Id": health_check.id,
        "CallerReference": health_check.caller_reference,
        "LinkedService": linked_service,
        "HealthCheckConfig": config,
        "HealthCheckVersion": present::<i64>(health_check.health_check_version),
        "CloudWatchAlarmConfiguration": alarm_configuration,
    }));

    Ok(serde_json::from_value(Value::Object(fields))?)
}
