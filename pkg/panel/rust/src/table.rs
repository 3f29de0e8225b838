// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Terminal tables for the one-shot CLI commands.
//!
//! Columns are aligned with `tabwriter`. The coloured column always comes
//! last so escape codes never skew the alignment.

use crate::model::{
    Alert, AlertSeverity, ApiStatus, DashboardSummary, LogEntry, LogLevel, Service, ServiceStatus,
};
use crate::render::Renderer;
use colored::{ColoredString, Colorize};
use std::io::{self, Write};
use tabwriter::TabWriter;

const MESSAGE_WIDTH: usize = 80;

/// Format service status with appropriate color
pub fn format_status(status: ServiceStatus) -> ColoredString {
    let text = status.as_str();
    match status {
        ServiceStatus::Running => text.green(),
        ServiceStatus::Stopped => text.yellow(),
        ServiceStatus::Failed => text.red(),
        ServiceStatus::Unknown => text.normal(),
    }
}

pub fn format_severity(severity: AlertSeverity) -> ColoredString {
    let text = severity.as_str();
    match severity {
        AlertSeverity::Critical => text.red().bold(),
        AlertSeverity::High => text.red(),
        AlertSeverity::Medium => text.yellow(),
        AlertSeverity::Low => text.cyan(),
        AlertSeverity::Unknown => text.normal(),
    }
}

pub fn format_level(level: &LogLevel) -> ColoredString {
    let text = level.as_str();
    match level {
        LogLevel::Emergency | LogLevel::Alert | LogLevel::Critical | LogLevel::Error => text.red(),
        LogLevel::Warning => text.yellow(),
        LogLevel::Notice | LogLevel::Info => text.cyan(),
        LogLevel::Debug | LogLevel::Other(_) => text.normal(),
    }
}

/// Cut `text` to at most `width` characters, marking the cut with "...".
fn truncate(text: &str, width: usize) -> String {
    let single_line = text.replace(['\n', '\t'], " ");
    if single_line.chars().count() <= width {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

fn finish(tw: TabWriter<Vec<u8>>) -> io::Result<String> {
    let bytes = tw
        .into_inner()
        .map_err(|e| io::Error::other(e.error().to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn services(services: &[&Service]) -> io::Result<String> {
    if services.is_empty() {
        return Ok("No services found\n".to_string());
    }

    let mut tw = TabWriter::new(Vec::new()).padding(2);
    writeln!(tw, "NAME\tDISPLAY NAME\tPID\tCRITICAL\tSTATUS")?;
    for service in services {
        let pid = service
            .pid
            .map(|pid| pid.to_string())
            .unwrap_or_else(|| "-".into());
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{}",
            service.name,
            if service.display_name.is_empty() { "-" } else { service.display_name.as_str() },
            pid,
            if service.is_critical { "yes" } else { "no" },
            format_status(service.status),
        )?;
    }
    finish(tw)
}

pub fn logs(logs: &[&LogEntry], renderer: &Renderer) -> io::Result<String> {
    if logs.is_empty() {
        return Ok("No logs found\n".to_string());
    }

    let mut tw = TabWriter::new(Vec::new()).padding(2);
    writeln!(tw, "TIME\tSERVICE\tMESSAGE\tLEVEL")?;
    for log in logs {
        writeln!(
            tw,
            "{}\t{}\t{}\t{}",
            renderer.format_timestamp(&log.timestamp),
            log.service_name().unwrap_or("-"),
            truncate(&log.message, MESSAGE_WIDTH),
            format_level(&log.level),
        )?;
    }
    finish(tw)
}

pub fn alerts(alerts: &[&Alert], renderer: &Renderer) -> io::Result<String> {
    if alerts.is_empty() {
        return Ok("No active alerts\n".to_string());
    }

    let mut tw = TabWriter::new(Vec::new()).padding(2);
    writeln!(tw, "ID\tTIME\tTITLE\tSTATE\tSEVERITY")?;
    for alert in alerts {
        let state = match (alert.acknowledged, alert.resolved) {
            (_, true) => "resolved",
            (true, false) => "acknowledged",
            (false, false) => "open",
        };
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{}",
            alert.id,
            renderer.format_timestamp(&alert.timestamp),
            truncate(&alert.title, MESSAGE_WIDTH),
            state,
            format_severity(alert.severity),
        )?;
    }
    finish(tw)
}

/// Backend health plus the dashboard counters.
pub fn status(status: &ApiStatus, summary: &DashboardSummary) -> io::Result<String> {
    let mut tw = TabWriter::new(Vec::new()).padding(2);
    writeln!(tw, "Backend:\t{} (version {})", status.status, status.version)?;
    writeln!(tw, "Platform:\t{}", status.platform.display_name())?;
    writeln!(
        tw,
        "Services:\t{} total, {} running, {} stopped, {} failed",
        summary.services.total,
        summary.services.running,
        summary.services.stopped,
        summary.services.failed
    )?;
    writeln!(
        tw,
        "Critical services:\t{} of {} down",
        summary.services.critical_down, summary.services.critical_total
    )?;
    writeln!(
        tw,
        "Logs:\t{} total, {} errors ({:.1}%), {} warnings ({:.1}%)",
        summary.logs.total,
        summary.logs.error_count,
        summary.logs.error_rate,
        summary.logs.warning_count,
        summary.logs.warning_rate
    )?;
    writeln!(
        tw,
        "Alerts:\t{} active, {} unacknowledged, {} critical, {} high",
        summary.alerts.active,
        summary.alerts.unacknowledged,
        summary.alerts.critical,
        summary.alerts.high
    )?;
    finish(tw)
}
