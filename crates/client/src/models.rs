//! Caller-facing data models and response normalization.
//!
//! The upstream names fields in PascalCase (`Name`, `Active`, `Group`)
//! while the dashboard schema is camelCase; serde aliases accept the
//! vendor's capitalized names and fall back to the already-lowercase
//! spelling. Numeric fields are coerced from string-or-number upstream
//! representations, and booleans keep an explicit `false` distinct from
//! "absent". Normalization is total: a record that cannot be decoded is
//! dropped rather than failing the whole response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_helpers::{
    f64_from_string_or_number, opt_f64_from_string_or_number, opt_string_from_number_or_string,
    opt_u64_from_string_or_number, string_from_number_or_string, u64_from_string_or_number,
};

/// A camera as exposed to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    #[serde(alias = "Name", default)]
    pub name: String,
    #[serde(alias = "Active", default)]
    pub active: bool,
    #[serde(alias = "Model", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(
        alias = "DeviceType",
        deserialize_with = "opt_string_from_number_or_string",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub device_type: Option<String>,
    #[serde(alias = "ConnectionAddress", skip_serializing_if = "Option::is_none")]
    pub connection_address: Option<String>,
    #[serde(
        alias = "ConnectionPort",
        deserialize_with = "opt_u64_from_string_or_number",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub connection_port: Option<u64>,
    #[serde(
        alias = "Latitude",
        deserialize_with = "opt_f64_from_string_or_number",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<f64>,
    #[serde(
        alias = "Longitude",
        deserialize_with = "opt_f64_from_string_or_number",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<f64>,
    #[serde(alias = "Memo", skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(alias = "Group", skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(alias = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    // Explicit `false` from the upstream must survive normalization, so
    // this stays an Option rather than defaulting like `active`.
    #[serde(alias = "Working", skip_serializing_if = "Option::is_none")]
    pub working: Option<bool>,
    #[serde(
        alias = "RecordingHours",
        deserialize_with = "opt_f64_from_string_or_number",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub recording_hours: Option<f64>,
    #[serde(alias = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A camera group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraGroup {
    #[serde(alias = "Name", default)]
    pub name: String,
    #[serde(alias = "Cameras", default)]
    pub cameras: Vec<String>,
    #[serde(alias = "Active", default)]
    pub active: bool,
}

/// An analytics event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    #[serde(
        alias = "ID",
        alias = "Id",
        deserialize_with = "string_from_number_or_string"
    )]
    pub id: String,
    #[serde(
        alias = "RecordCode",
        deserialize_with = "opt_string_from_number_or_string",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub record_code: Option<String>,
    #[serde(alias = "Camera", default)]
    pub camera: String,
    #[serde(alias = "Zone", skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(alias = "EventType", default)]
    pub event_type: String,
    #[serde(alias = "ObjectClass", skip_serializing_if = "Option::is_none")]
    pub object_class: Option<String>,
    #[serde(alias = "RuleName", skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
    #[serde(alias = "Timestamp", default)]
    pub timestamp: String,
    #[serde(
        alias = "Confidence",
        deserialize_with = "opt_f64_from_string_or_number",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f64>,
}

/// An analytics configuration (detection rule set on one camera).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    #[serde(alias = "Name", default)]
    pub name: String,
    #[serde(alias = "Active", default)]
    pub active: bool,
    #[serde(alias = "Camera", default)]
    pub camera: String,
    #[serde(alias = "Events", default)]
    pub events: Vec<String>,
    #[serde(alias = "Working", skip_serializing_if = "Option::is_none")]
    pub working: Option<bool>,
    #[serde(alias = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(alias = "StatusMessage", skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

/// An analytics counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsCounter {
    #[serde(
        alias = "ID",
        alias = "Id",
        deserialize_with = "string_from_number_or_string"
    )]
    pub id: String,
    #[serde(alias = "Name", default)]
    pub name: String,
    #[serde(alias = "Configuration", default)]
    pub configuration: String,
    #[serde(alias = "Value", deserialize_with = "f64_from_string_or_number", default)]
    pub value: f64,
    #[serde(alias = "LastReset", skip_serializing_if = "Option::is_none")]
    pub last_reset: Option<String>,
}

/// An audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    #[serde(
        alias = "ID",
        alias = "Id",
        deserialize_with = "string_from_number_or_string"
    )]
    pub id: String,
    #[serde(alias = "Timestamp", default)]
    pub timestamp: String,
    #[serde(alias = "Category", default)]
    pub category: String,
    #[serde(alias = "Action", default)]
    pub action: String,
    #[serde(alias = "User", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(alias = "Details", skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(
        alias = "IpAddress",
        alias = "IPAddress",
        skip_serializing_if = "Option::is_none"
    )]
    pub ip_address: Option<String>,
}

/// A video bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(
        alias = "ID",
        alias = "Id",
        deserialize_with = "string_from_number_or_string"
    )]
    pub id: String,
    #[serde(alias = "Title", default)]
    pub title: String,
    #[serde(alias = "Color", default)]
    pub color: String,
    #[serde(alias = "StartDate", default)]
    pub start_date: String,
    #[serde(alias = "StartTime", default)]
    pub start_time: String,
    #[serde(alias = "EndDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(alias = "EndTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(alias = "Cameras", default)]
    pub cameras: Vec<String>,
    #[serde(alias = "Remarks", skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(alias = "CreatedAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Payload for creating a bookmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    pub title: String,
    pub color: String,
    pub start_date: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub cameras: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Aggregated dashboard statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(
        alias = "TotalCameras",
        deserialize_with = "u64_from_string_or_number",
        default
    )]
    pub total_cameras: u64,
    #[serde(
        alias = "ActiveCameras",
        deserialize_with = "u64_from_string_or_number",
        default
    )]
    pub active_cameras: u64,
    #[serde(
        alias = "RecordingCameras",
        deserialize_with = "u64_from_string_or_number",
        default
    )]
    pub recording_cameras: u64,
    #[serde(
        alias = "OfflineCameras",
        deserialize_with = "u64_from_string_or_number",
        default
    )]
    pub offline_cameras: u64,
    #[serde(
        alias = "TotalEvents",
        deserialize_with = "u64_from_string_or_number",
        default
    )]
    pub total_events: u64,
    #[serde(
        alias = "CriticalEvents",
        deserialize_with = "u64_from_string_or_number",
        default
    )]
    pub critical_events: u64,
    #[serde(alias = "TotalStorage", default)]
    pub total_storage: String,
    #[serde(alias = "UsedStorage", default)]
    pub used_storage: String,
}

/// System status as reported by the upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    #[serde(alias = "ServerStatus", default)]
    pub server_status: String,
    #[serde(
        alias = "CpuUsage",
        deserialize_with = "f64_from_string_or_number",
        default
    )]
    pub cpu_usage: f64,
    #[serde(
        alias = "MemoryUsage",
        deserialize_with = "f64_from_string_or_number",
        default
    )]
    pub memory_usage: f64,
    #[serde(
        alias = "DiskUsage",
        deserialize_with = "f64_from_string_or_number",
        default
    )]
    pub disk_usage: f64,
    #[serde(alias = "Uptime", default)]
    pub uptime: String,
    #[serde(alias = "LastSync", default)]
    pub last_sync: String,
}

/// Filters for the analytics event search endpoint.
#[derive(Debug, Clone, Default)]
pub struct EventSearchParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub cameras: Option<String>,
    pub event_types: Option<String>,
}

/// Filters for the audit log search endpoint.
#[derive(Debug, Clone, Default)]
pub struct AuditSearchParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub keyword: Option<String>,
}

/// Filters for the bookmark search endpoint.
#[derive(Debug, Clone, Default)]
pub struct BookmarkSearchParams {
    pub keyword: Option<String>,
    pub colors: Option<String>,
}

/// Flatten the decoded payload into a list of raw records.
///
/// JSON payloads are plain arrays. The XML decoder instead yields a
/// container object keyed by the repeated child tag
/// (`{"Camera": [...]}`), possibly holding a single object when only one
/// child was present; both shapes collapse to the same array here so the
/// two encodings normalize identically.
fn collection_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(map) if map.len() == 1 => {
            match map.into_iter().next().map(|(_, inner)| inner) {
                Some(Value::Array(items)) => items,
                Some(inner @ Value::Object(_)) => vec![inner],
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

/// Normalize a payload into typed records, dropping anything that does not
/// decode. Never fails: an unusable payload is an empty list.
pub fn normalize_records<T: DeserializeOwned>(value: Value) -> Vec<T> {
    collection_items(value)
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

/// Normalize a single-object payload. `None` when it does not decode.
pub fn normalize_record<T: DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(value).ok()
}
