// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! In-memory view state.
//!
//! Holds the last good copy of every collection together with what the user
//! asked for (tab, server-side filters, search text). Responses can overlap,
//! so every fetch is stamped with a `Ticket` and applied only if nothing newer
//! for the same region has been applied already.

use crate::model::{Alert, AlertCounts, DashboardSummary, LogEntry, LogQuery, Service, ServiceFilter};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Services,
    Logs,
    Alerts,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Services, Tab::Logs, Tab::Alerts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Services => "services",
            Tab::Logs => "logs",
            Tab::Alerts => "alerts",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Services => "Services",
            Tab::Logs => "Logs",
            Tab::Alerts => "Alerts",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Tab::Dashboard),
            "services" => Ok(Tab::Services),
            "logs" => Ok(Tab::Logs),
            "alerts" => Ok(Tab::Alerts),
            _ => Err(format!(
                "unknown tab: {}, expected dashboard, services, logs, or alerts",
                s
            )),
        }
    }
}

/// Independently refreshed part of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Summary,
    RecentAlerts,
    Services,
    Logs,
    Alerts,
}

impl Region {
    const COUNT: usize = 5;

    fn index(&self) -> usize {
        match self {
            Region::Summary => 0,
            Region::RecentAlerts => 1,
            Region::Services => 2,
            Region::Logs => 3,
            Region::Alerts => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Summary => "summary",
            Region::RecentAlerts => "recent_alerts",
            Region::Services => "services",
            Region::Logs => "logs",
            Region::Alerts => "alerts",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stamp carried by a request and echoed back with its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub region: Region,
    pub seq: u64,
}

/// Issues monotonically increasing tickets and remembers, per region, the
/// newest one applied.
#[derive(Debug, Default)]
pub struct Sequencer {
    next: u64,
    issued: [u64; Region::COUNT],
    applied: [u64; Region::COUNT],
}

impl Sequencer {
    pub fn issue(&mut self, region: Region) -> Ticket {
        self.next += 1;
        self.issued[region.index()] = self.next;
        Ticket {
            region,
            seq: self.next,
        }
    }

    /// Whether a response with this ticket may be applied. Accepting a ticket
    /// retires every older one for the region.
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        let applied = &mut self.applied[ticket.region.index()];
        if ticket.seq <= *applied {
            return false;
        }
        *applied = ticket.seq;
        true
    }

    /// Whether a newer request than the last applied one is still out.
    pub fn is_pending(&self, region: Region) -> bool {
        self.issued[region.index()] > self.applied[region.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// A fetched collection plus where its latest fetch stands. `items` always
/// holds the last successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub items: Vec<T>,
    pub status: LoadStatus,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::Idle,
        }
    }
}

impl<T> Collection<T> {
    pub fn start_loading(&mut self) {
        self.status = LoadStatus::Loading;
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.status = LoadStatus::Loaded;
    }

    /// Record a failed fetch; previously held items stay.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = LoadStatus::Failed(message.into());
    }
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub current_tab: Tab,
    pub summary: Option<DashboardSummary>,
    pub services: Collection<Service>,
    pub logs: Collection<LogEntry>,
    pub alerts: Collection<Alert>,
    pub recent_alerts: Collection<Alert>,
    /// Severity counts that came with the last alerts tab fetch.
    pub alert_counts: AlertCounts,
    pub service_filter: ServiceFilter,
    pub service_search: String,
    pub log_query: LogQuery,
    pub log_search: String,
    pub alert_search: String,
    sequencer: Sequencer,
}

impl ViewState {
    pub fn new(log_limit: u32) -> Self {
        Self {
            log_query: LogQuery::with_limit(log_limit),
            ..Self::default()
        }
    }

    pub fn issue(&mut self, region: Region) -> Ticket {
        self.sequencer.issue(region)
    }

    pub fn accept(&mut self, ticket: Ticket) -> bool {
        self.sequencer.accept(ticket)
    }

    pub fn is_pending(&self, region: Region) -> bool {
        self.sequencer.is_pending(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase_across_regions() {
        let mut seq = Sequencer::default();
        let a = seq.issue(Region::Services);
        let b = seq.issue(Region::Logs);
        let c = seq.issue(Region::Services);
        assert!(a.seq < b.seq && b.seq < c.seq);
        assert_eq!(c.region, Region::Services);
    }

    #[test]
    fn test_stale_ticket_is_rejected() {
        let mut seq = Sequencer::default();
        let older = seq.issue(Region::Services);
        let newer = seq.issue(Region::Services);

        assert!(seq.accept(newer));
        assert!(!seq.accept(older));
        assert!(!seq.accept(newer));
    }

    #[test]
    fn test_in_order_tickets_are_all_accepted() {
        let mut seq = Sequencer::default();
        let first = seq.issue(Region::Alerts);
        let second = seq.issue(Region::Alerts);
        assert!(seq.is_pending(Region::Alerts));
        assert!(seq.accept(first));
        assert!(seq.is_pending(Region::Alerts));
        assert!(seq.accept(second));
        assert!(!seq.is_pending(Region::Alerts));
    }

    #[test]
    fn test_regions_are_independent() {
        let mut seq = Sequencer::default();
        let services = seq.issue(Region::Services);
        let logs = seq.issue(Region::Logs);
        assert!(seq.accept(logs));
        assert!(seq.accept(services));
    }

    #[test]
    fn test_failed_fetch_keeps_items() {
        let mut collection = Collection::default();
        collection.replace(vec![1, 2, 3]);
        collection.start_loading();
        collection.fail("backend unavailable");
        assert_eq!(collection.items, vec![1, 2, 3]);
        assert_eq!(
            collection.status,
            LoadStatus::Failed("backend unavailable".into())
        );
    }

    #[test]
    fn test_tab_parse_and_title() {
        assert_eq!("logs".parse::<Tab>(), Ok(Tab::Logs));
        assert!("settings".parse::<Tab>().is_err());
        assert_eq!(Tab::Alerts.title(), "Alerts");
        assert_eq!(ViewState::new(50).log_query.limit, 50);
    }
}
