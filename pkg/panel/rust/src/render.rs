// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Markup for the list regions.
//!
//! Pure functions of (collection, search text). Every free-text field goes
//! through `escape_html` before it is embedded; CSS classes only ever come
//! from fixed enum strings.

use crate::filter::matching;
use crate::model::{Alert, LogEntry, Service};
use crate::state::{Collection, LoadStatus};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};

/// Short date/time shown for log and alert timestamps, e.g. "Oct 18, 14:05".
const TIMESTAMP_FORMAT: &str = "%b %-d, %H:%M";
const CLOCK_FORMAT: &str = "%H:%M:%S";
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Fixed markup per list region.
struct Placeholders {
    loading: &'static str,
    empty: &'static str,
    failed: &'static str,
}

const SERVICES: Placeholders = Placeholders {
    loading: r#"<div class="loading"><p>Loading...</p></div>"#,
    empty: r#"<div class="empty-state"><p>No services found</p></div>"#,
    failed: r#"<div class="empty-state error-state"><p>Failed to load services</p></div>"#,
};

const LOGS: Placeholders = Placeholders {
    loading: r#"<tr><td colspan="4" class="loading">Loading...</td></tr>"#,
    empty: r#"<tr><td colspan="4" class="empty-state">No logs found</td></tr>"#,
    failed: r#"<tr><td colspan="4" class="error-state">Failed to load logs</td></tr>"#,
};

const ALERTS: Placeholders = Placeholders {
    loading: r#"<div class="loading"><p>Loading...</p></div>"#,
    empty: r#"<div class="empty-state"><p>No active alerts</p></div>"#,
    failed: r#"<div class="empty-state error-state"><p>Failed to load alerts</p></div>"#,
};

const RECENT_ALERTS: Placeholders = Placeholders {
    loading: r#"<div class="loading"><p>Loading...</p></div>"#,
    empty: r#"<div class="empty-state"><p>No active alerts</p></div>"#,
    failed: r#"<div class="empty-state error-state"><p>Failed to load recent alerts</p></div>"#,
};

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    offset: FixedOffset,
}

impl Renderer {
    /// Renderer using the machine's current UTC offset.
    pub fn local() -> Self {
        Self::with_offset(*Local::now().offset())
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Short local date/time. Empty input renders "-"; input that does not
    /// parse is returned unchanged.
    pub fn format_timestamp(&self, raw: &str) -> String {
        if raw.is_empty() {
            return "-".to_string();
        }
        match self.parse_timestamp(raw) {
            Some(at) => at.format(TIMESTAMP_FORMAT).to_string(),
            None => raw.to_string(),
        }
    }

    /// RFC 3339, or a naive ISO-8601 stamp taken to be in the display offset.
    fn parse_timestamp(&self, raw: &str) -> Option<DateTime<FixedOffset>> {
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(at.with_timezone(&self.offset));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .and_then(|naive| self.offset.from_local_datetime(&naive).single())
    }

    /// Wall-clock time for the "last update" field.
    pub fn clock(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.offset).format(CLOCK_FORMAT).to_string()
    }

    pub fn services(&self, collection: &Collection<Service>, search: &str) -> String {
        list(collection, search, &SERVICES, |service| {
            let badge = if service.is_critical {
                r#"<span class="service-badge critical">Critical</span>"#
            } else {
                ""
            };
            format!(
                r#"<div class="service-card"><div class="service-status {status}"></div><div class="service-info"><div class="service-name">{name}</div><div class="service-display-name">{display_name}</div></div>{badge}</div>"#,
                status = service.status.as_str(),
                name = escape_html(&service.name),
                display_name = escape_html(&service.display_name),
            )
        })
    }

    pub fn logs(&self, collection: &Collection<LogEntry>, search: &str) -> String {
        list(collection, search, &LOGS, |log| {
            let level = log.level.as_str();
            let message = escape_html(&log.message);
            format!(
                r#"<tr><td class="log-timestamp">{timestamp}</td><td><span class="log-level {class}">{level}</span></td><td class="log-service">{service}</td><td class="log-message" title="{message}">{message}</td></tr>"#,
                timestamp = escape_html(&self.format_timestamp(&log.timestamp)),
                class = escape_html(&level.to_lowercase()),
                level = escape_html(level),
                service = escape_html(log.service_name().unwrap_or("-")),
            )
        })
    }

    /// Alerts tab: every alert with the actions still open for it.
    pub fn alerts(&self, collection: &Collection<Alert>, search: &str) -> String {
        list(collection, search, &ALERTS, |alert| {
            let id = escape_html(&alert.id);
            let mut actions = String::new();
            if !alert.acknowledged {
                actions.push_str(&format!(
                    r#"<button class="alert-btn acknowledge" data-action="acknowledge" data-alert-id="{id}">Acknowledge</button>"#
                ));
            }
            if !alert.resolved {
                actions.push_str(&format!(
                    r#"<button class="alert-btn resolve" data-action="resolve" data-alert-id="{id}">Resolve</button>"#
                ));
            }
            format!(
                r#"{item}<div class="alert-actions">{actions}</div></div>"#,
                item = self.alert_body(alert),
            )
        })
    }

    /// Dashboard teaser: the first `limit` alerts, no actions.
    pub fn recent_alerts(&self, collection: &Collection<Alert>, limit: usize) -> String {
        match &collection.status {
            LoadStatus::Loading => RECENT_ALERTS.loading.to_string(),
            LoadStatus::Failed(_) => RECENT_ALERTS.failed.to_string(),
            LoadStatus::Idle | LoadStatus::Loaded => {
                if collection.items.is_empty() {
                    return RECENT_ALERTS.empty.to_string();
                }
                collection
                    .items
                    .iter()
                    .take(limit)
                    .map(|alert| format!("{}</div>", self.alert_body(alert)))
                    .collect()
            }
        }
    }

    /// Opening tag, header and message of an alert item. Caller closes the div.
    fn alert_body(&self, alert: &Alert) -> String {
        format!(
            r#"<div class="alert-item {severity}"><div class="alert-item-header"><span class="alert-title">{title}</span><span class="alert-time">{time}</span></div><div class="alert-message">{message}</div>"#,
            severity = alert.severity.as_str(),
            title = escape_html(&alert.title),
            time = escape_html(&self.format_timestamp(&alert.timestamp)),
            message = escape_html(&alert.message),
        )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::local()
    }
}

fn list<T, F>(collection: &Collection<T>, search: &str, placeholders: &Placeholders, item: F) -> String
where
    T: crate::filter::Searchable,
    F: Fn(&T) -> String,
{
    match &collection.status {
        LoadStatus::Loading => placeholders.loading.to_string(),
        LoadStatus::Failed(_) => placeholders.failed.to_string(),
        LoadStatus::Idle | LoadStatus::Loaded => {
            let visible = matching(&collection.items, search);
            if visible.is_empty() {
                return placeholders.empty.to_string();
            }
            visible.into_iter().map(item).collect()
        }
    }
}
