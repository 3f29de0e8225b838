// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! The dashboard controller.
//!
//! `Dashboard` never performs I/O. User commands and fetch results go in,
//! the requests to send next come out, and every call ends with exactly one
//! render pass committed to the view. The `Poller` supplies the timer and the
//! network.

use crate::chart::ChartAdapter;
use crate::config::PanelConfig;
use crate::error::{FetchError, ViewError};
use crate::model::{
    AlertsResponse, DashboardSummary, LogLevel, LogQuery, LogsResponse, ServiceFilter,
    ServicesResponse,
};
use crate::render::Renderer;
use crate::state::{Region, Tab, Ticket, ViewState};
use crate::view::{Slot, ViewHandle};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reload the summary and the recent alerts.
    Refresh,
    Navigate(Tab),
    /// Server-side status filter; re-fetches services.
    FilterServices(ServiceFilter),
    /// Client-side search over the services already held.
    SearchServices(String),
    /// Server-side level filter and limit; re-fetches logs.
    FilterLogs { level: Option<LogLevel>, limit: u32 },
    /// Client-side search over the logs already held.
    SearchLogs(String),
    /// Client-side search over the alerts tab.
    SearchAlerts(String),
    Acknowledge(String),
    Resolve(String),
}

/// A fetch or action the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Summary(Ticket),
    RecentAlerts(Ticket),
    Services(Ticket, ServiceFilter),
    Logs(Ticket, LogQuery),
    Alerts(Ticket),
    Acknowledge(String),
    Resolve(String),
}

/// Outcome of a `Request`, carrying the ticket it was issued with.
#[derive(Debug)]
pub enum Response {
    Summary(Ticket, Result<DashboardSummary, FetchError>),
    RecentAlerts(Ticket, Result<AlertsResponse, FetchError>),
    Services(Ticket, Result<ServicesResponse, FetchError>),
    Logs(Ticket, Result<LogsResponse, FetchError>),
    Alerts(Ticket, Result<AlertsResponse, FetchError>),
    Acknowledged(String, Result<(), FetchError>),
    Resolved(String, Result<(), FetchError>),
}

pub struct Dashboard<V: ViewHandle> {
    state: ViewState,
    view: V,
    charts: ChartAdapter,
    renderer: Renderer,
    recent_alert_limit: usize,
}

impl<V: ViewHandle> Dashboard<V> {
    pub fn new(view: V, config: &PanelConfig) -> Self {
        Self {
            state: ViewState::new(config.log_limit),
            view,
            charts: ChartAdapter::default(),
            renderer: Renderer::local(),
            recent_alert_limit: config.recent_alert_limit,
        }
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_charts(mut self, charts: ChartAdapter) -> Self {
        self.charts = charts;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn charts(&self) -> &ChartAdapter {
        &self.charts
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Apply a user command and return the requests it needs.
    pub fn handle(&mut self, command: Command) -> Vec<Request> {
        debug!(command = ?command, "Handling command");
        let requests = match command {
            Command::Refresh => self.refresh_requests(),
            Command::Navigate(tab) => self.navigate(tab),
            Command::FilterServices(filter) => {
                self.state.service_filter = filter;
                self.load_services()
            }
            Command::SearchServices(search) => {
                self.state.service_search = search;
                self.render_services();
                Vec::new()
            }
            Command::FilterLogs { level, limit } => {
                self.state.log_query.level = level;
                self.state.log_query.limit = limit;
                self.load_logs()
            }
            Command::SearchLogs(search) => {
                self.state.log_search = search;
                self.render_logs();
                Vec::new()
            }
            Command::SearchAlerts(search) => {
                self.state.alert_search = search;
                self.render_alerts();
                Vec::new()
            }
            Command::Acknowledge(id) => vec![Request::Acknowledge(id)],
            Command::Resolve(id) => vec![Request::Resolve(id)],
        };
        self.commit();
        requests
    }

    /// Requests for one periodic refresh.
    pub fn refresh(&mut self) -> Vec<Request> {
        self.refresh_requests()
    }

    /// Apply a fetch result and return any follow-up requests.
    pub fn apply(&mut self, response: Response) -> Vec<Request> {
        let requests = match response {
            Response::Summary(ticket, result) => {
                if self.accept(ticket) {
                    self.apply_summary(result);
                }
                Vec::new()
            }
            Response::RecentAlerts(ticket, result) => {
                if self.accept(ticket) {
                    match result {
                        Ok(response) => self.state.recent_alerts.replace(response.alerts),
                        Err(e) => {
                            warn!(error = %e, "Failed to load recent alerts");
                            self.state.recent_alerts.fail(e.to_string());
                        }
                    }
                    self.render_recent_alerts();
                }
                Vec::new()
            }
            Response::Services(ticket, result) => {
                if self.accept(ticket) {
                    match result {
                        Ok(response) => self.state.services.replace(response.services),
                        Err(e) => {
                            warn!(error = %e, "Failed to load services");
                            self.state.services.fail(e.to_string());
                        }
                    }
                    if self.state.is_pending(Region::Services) {
                        self.state.services.start_loading();
                    }
                    self.render_services();
                }
                Vec::new()
            }
            Response::Logs(ticket, result) => {
                if self.accept(ticket) {
                    match result {
                        Ok(response) => self.state.logs.replace(response.logs),
                        Err(e) => {
                            warn!(error = %e, "Failed to load logs");
                            self.state.logs.fail(e.to_string());
                        }
                    }
                    if self.state.is_pending(Region::Logs) {
                        self.state.logs.start_loading();
                    }
                    self.render_logs();
                }
                Vec::new()
            }
            Response::Alerts(ticket, result) => {
                if self.accept(ticket) {
                    self.apply_alerts(result);
                }
                Vec::new()
            }
            Response::Acknowledged(id, Ok(())) => {
                info!(alert_id = %id, "Alert acknowledged");
                self.load_alerts()
            }
            Response::Resolved(id, Ok(())) => {
                info!(alert_id = %id, "Alert resolved");
                let mut requests = self.load_alerts();
                requests.extend(self.refresh_requests());
                requests
            }
            Response::Acknowledged(id, Err(e)) => {
                warn!(alert_id = %id, error = %e, "Failed to acknowledge alert");
                Vec::new()
            }
            Response::Resolved(id, Err(e)) => {
                warn!(alert_id = %id, error = %e, "Failed to resolve alert");
                Vec::new()
            }
        };
        self.commit();
        requests
    }

    fn navigate(&mut self, tab: Tab) -> Vec<Request> {
        self.state.current_tab = tab;
        self.view.show_tab(tab);
        self.set_text(Slot::PageTitle, tab.title());

        match tab {
            Tab::Dashboard => Vec::new(),
            Tab::Services => self.load_services(),
            Tab::Logs => self.load_logs(),
            Tab::Alerts => self.load_alerts(),
        }
    }

    fn refresh_requests(&mut self) -> Vec<Request> {
        vec![
            Request::Summary(self.state.issue(Region::Summary)),
            Request::RecentAlerts(self.state.issue(Region::RecentAlerts)),
        ]
    }

    fn load_services(&mut self) -> Vec<Request> {
        let ticket = self.state.issue(Region::Services);
        self.state.services.start_loading();
        self.render_services();
        vec![Request::Services(ticket, self.state.service_filter)]
    }

    fn load_logs(&mut self) -> Vec<Request> {
        let ticket = self.state.issue(Region::Logs);
        self.state.logs.start_loading();
        self.render_logs();
        vec![Request::Logs(ticket, self.state.log_query.clone())]
    }

    fn load_alerts(&mut self) -> Vec<Request> {
        let ticket = self.state.issue(Region::Alerts);
        self.state.alerts.start_loading();
        self.render_alerts();
        vec![Request::Alerts(ticket)]
    }

    fn accept(&mut self, ticket: Ticket) -> bool {
        let accepted = self.state.accept(ticket);
        if !accepted {
            debug!(region = %ticket.region, seq = ticket.seq, "Discarding stale response");
        }
        accepted
    }

    fn apply_summary(&mut self, result: Result<DashboardSummary, FetchError>) {
        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Failed to refresh dashboard summary");
                self.set_text(Slot::LastUpdate, "Update failed");
                return;
            }
        };

        self.set_text(Slot::PlatformName, summary.platform.display_name());
        self.set_text(Slot::StatRunning, &summary.services.running.to_string());
        self.set_text(Slot::StatStopped, &summary.services.stopped.to_string());
        self.set_text(Slot::StatErrors, &summary.logs.error_count.to_string());
        self.set_text(Slot::StatAlerts, &summary.alerts.active.to_string());
        self.set_text(Slot::AlertBadge, &summary.alerts.active.to_string());
        settle(self.view.set_visible(Slot::AlertBadge, summary.alerts.active > 0));

        settle(self.charts.update_distribution(&mut self.view, &summary.services));
        settle(self.charts.update_histogram(&mut self.view, &summary.logs));

        let now = self.renderer.clock(Utc::now());
        self.set_text(Slot::LastUpdate, &now);
        self.state.summary = Some(summary);
    }

    fn apply_alerts(&mut self, result: Result<AlertsResponse, FetchError>) {
        match result {
            Ok(response) => {
                self.state.alert_counts = response.summary;
                self.state.alerts.replace(response.alerts);
                let critical = format!("{} Critical", self.state.alert_counts.critical);
                let high = format!("{} High", self.state.alert_counts.high);
                self.set_text(Slot::CriticalCount, &critical);
                self.set_text(Slot::HighCount, &high);
            }
            Err(e) => {
                warn!(error = %e, "Failed to load alerts");
                self.state.alerts.fail(e.to_string());
            }
        }
        // A newer fetch is still out; hold what arrived but keep loading.
        if self.state.is_pending(Region::Alerts) {
            self.state.alerts.start_loading();
        }
        self.render_alerts();
    }

    fn render_services(&mut self) {
        let html = self
            .renderer
            .services(&self.state.services, &self.state.service_search);
        self.set_html(Slot::ServicesList, html);
    }

    fn render_logs(&mut self) {
        let html = self.renderer.logs(&self.state.logs, &self.state.log_search);
        self.set_html(Slot::LogsList, html);
    }

    fn render_alerts(&mut self) {
        let html = self.renderer.alerts(&self.state.alerts, &self.state.alert_search);
        self.set_html(Slot::AlertsList, html);
    }

    fn render_recent_alerts(&mut self) {
        let html = self
            .renderer
            .recent_alerts(&self.state.recent_alerts, self.recent_alert_limit);
        self.set_html(Slot::RecentAlerts, html);
    }

    fn set_text(&mut self, slot: Slot, text: &str) {
        settle(self.view.set_text(slot, text));
    }

    fn set_html(&mut self, slot: Slot, html: String) {
        settle(self.view.set_html(slot, html));
    }

    fn commit(&mut self) {
        if let Err(e) = self.view.commit() {
            warn!(error = %e, "Failed to commit view");
        }
    }
}

/// A missing slot means that part of the view is not shown; anything else is
/// worth a warning.
fn settle(result: Result<(), ViewError>) {
    match result {
        Ok(()) => {}
        Err(ViewError::MissingSlot(slot)) => debug!(slot = %slot, "Slot not present, skipping"),
        Err(e) => warn!(error = %e, "Failed to update view"),
    }
}
