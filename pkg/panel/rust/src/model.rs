// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Wire types for the monitoring API.
//!
//! Every type is fetched wholesale and never mutated locally; a change on the
//! server side is observed by fetching again.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Services
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceStatus {
    Running,
    Stopped,
    Failed,
    Unknown,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Running => "running",
            ServiceStatus::Stopped => "stopped",
            ServiceStatus::Failed => "failed",
            ServiceStatus::Unknown => "unknown",
        }
    }
}

impl From<String> for ServiceStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "running" => ServiceStatus::Running,
            "stopped" => ServiceStatus::Stopped,
            "failed" | "error" => ServiceStatus::Failed,
            _ => ServiceStatus::Unknown,
        }
    }
}

impl From<ServiceStatus> for String {
    fn from(value: ServiceStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monitored system service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub status: ServiceStatus,
    #[serde(default)]
    pub is_critical: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pid: Option<u32>,
}

// ============================================================================
// Logs
// ============================================================================

/// Syslog-style severity. Names the backend sends that are not listed here
/// are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
    Other(String),
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Emergency => "EMERGENCY",
            LogLevel::Alert => "ALERT",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Notice => "NOTICE",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Other(name) => name,
        }
    }

    /// Value the `level` query parameter expects.
    pub fn query_value(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl From<String> for LogLevel {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "EMERGENCY" => LogLevel::Emergency,
            "ALERT" => LogLevel::Alert,
            "CRITICAL" => LogLevel::Critical,
            "ERROR" => LogLevel::Error,
            "WARNING" => LogLevel::Warning,
            "NOTICE" => LogLevel::Notice,
            "INFO" => LogLevel::Info,
            "DEBUG" => LogLevel::Debug,
            _ => LogLevel::Other(value),
        }
    }
}

impl From<LogLevel> for String {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Parses user input; only the syslog level names are accepted. Unknown
/// names from the backend still deserialize to `Other`.
impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match LogLevel::from(s.to_string()) {
            LogLevel::Other(name) => Err(format!(
                "unknown log level: {}, expected emergency, alert, critical, error, warning, notice, info, or debug",
                name
            )),
            level => Ok(level),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO-8601, kept as sent so it can be shown raw when it does not parse.
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub level_value: Option<u8>,
}

impl LogEntry {
    /// Service reference; the backend sends "" for entries without one.
    pub fn service_name(&self) -> Option<&str> {
        self.service.as_deref().filter(|s| !s.is_empty())
    }
}

// ============================================================================
// Alerts
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
    Unknown,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
            AlertSeverity::Critical => "critical",
            AlertSeverity::Unknown => "unknown",
        }
    }
}

impl From<String> for AlertSeverity {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "low" => AlertSeverity::Low,
            "medium" => AlertSeverity::Medium,
            "high" => AlertSeverity::High,
            "critical" => AlertSeverity::Critical,
            _ => AlertSeverity::Unknown,
        }
    }
}

impl From<AlertSeverity> for String {
    fn from(value: AlertSeverity) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub source: String,
    pub timestamp: String,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub resolved: bool,
}

// ============================================================================
// Dashboard summary
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Windows,
    Linux,
    Other(String),
}

impl Platform {
    pub fn display_name(&self) -> &str {
        match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::Other(name) => name,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Linux
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            _ => Platform::Other(value),
        }
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        match value {
            Platform::Windows => "windows".to_string(),
            Platform::Linux => "linux".to_string(),
            Platform::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceCounts {
    pub total: u64,
    pub running: u64,
    pub stopped: u64,
    pub failed: u64,
    pub critical_total: u64,
    pub critical_down: u64,
}

/// Per-level log counts in the order the backend listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelCounts(Vec<(String, u64)>);

impl LevelCounts {
    pub fn new(entries: Vec<(String, u64)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(level, count)| (level.as_str(), *count))
    }

    pub fn get(&self, level: &str) -> Option<u64> {
        self.iter().find(|(l, _)| *l == level).map(|(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for LevelCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (level, count) in &self.0 {
            map.serialize_entry(level, count)?;
        }
        map.end()
    }
}

/// Map order matters for the histogram, so read entries one by one instead of
/// going through a hash map.
impl<'de> Deserialize<'de> for LevelCounts {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LevelCountsVisitor;

        impl<'de> Visitor<'de> for LevelCountsVisitor {
            type Value = LevelCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of log level to count")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((level, count)) = access.next_entry::<String, u64>()? {
                    entries.push((level, count));
                }
                Ok(LevelCounts(entries))
            }
        }

        deserializer.deserialize_map(LevelCountsVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogStats {
    pub total: u64,
    pub by_level: LevelCounts,
    pub by_service: BTreeMap<String, u64>,
    pub error_count: u64,
    pub warning_count: u64,
    pub error_rate: f64,
    pub warning_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertCounts {
    pub total: u64,
    pub active: u64,
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub unacknowledged: u64,
}

/// Body of `GET /api/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    pub platform: Platform,
    pub services: ServiceCounts,
    pub logs: LogStats,
    pub alerts: AlertCounts,
}

// ============================================================================
// Response envelopes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicesResponse {
    pub services: Vec<Service>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsResponse {
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub statistics: Option<LogStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub summary: AlertCounts,
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    pub status: String,
    pub platform: Platform,
    pub version: String,
}

// ============================================================================
// Server-side filters
// ============================================================================

/// `status` parameter of `GET /api/services`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServiceFilter {
    #[default]
    All,
    Running,
    Stopped,
    Failed,
    Critical,
}

impl ServiceFilter {
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            ServiceFilter::All => None,
            ServiceFilter::Running => Some("running"),
            ServiceFilter::Stopped => Some("stopped"),
            ServiceFilter::Failed => Some("failed"),
            ServiceFilter::Critical => Some("critical"),
        }
    }
}

impl std::str::FromStr for ServiceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "all" => Ok(ServiceFilter::All),
            "running" => Ok(ServiceFilter::Running),
            "stopped" => Ok(ServiceFilter::Stopped),
            "failed" => Ok(ServiceFilter::Failed),
            "critical" => Ok(ServiceFilter::Critical),
            other => Err(format!(
                "unknown service filter: {}, expected all, running, stopped, failed, or critical",
                other
            )),
        }
    }
}

/// Parameters of `GET /api/logs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub limit: u32,
    pub level: Option<LogLevel>,
    pub service: Option<String>,
    pub search: Option<String>,
}

impl LogQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            level: None,
            service: None,
            search: None,
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string())];
        if let Some(ref level) = self.level {
            params.push(("level", level.query_value()));
        }
        if let Some(ref service) = self.service {
            params.push(("service", service.clone()));
        }
        if let Some(ref search) = self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}

impl Default for LogQuery {
    fn default() -> Self {
        Self::with_limit(crate::config::DEFAULT_LOG_LIMIT)
    }
}

/// `active` parameter of `GET /api/alerts`. The backend treats a missing
/// parameter as active-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertScope {
    #[default]
    ServerDefault,
    Active,
    All,
}

impl AlertScope {
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            AlertScope::ServerDefault => None,
            AlertScope::Active => Some("true"),
            AlertScope::All => Some("false"),
        }
    }
}
