// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Drives a `Dashboard` on a timer.
//!
//! A single task owns the dashboard and multiplexes timer ticks, user commands
//! and fetch results. Each request runs on its own spawned task and reports
//! back over a channel, so slow endpoints never hold up the others and the
//! dashboard is only ever touched from one place.

use crate::client::PanelApi;
use crate::dashboard::{Command, Dashboard, Request, Response};
use crate::model::AlertScope;
use crate::view::ViewHandle;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub struct Poller<V: ViewHandle> {
    dashboard: Dashboard<V>,
    api: Arc<dyn PanelApi>,
    interval: Duration,
}

impl<V: ViewHandle + 'static> Poller<V> {
    pub fn new(dashboard: Dashboard<V>, api: Arc<dyn PanelApi>, interval: Duration) -> Self {
        Self {
            dashboard,
            api,
            interval,
        }
    }

    /// Start polling on a background task.
    pub fn spawn(self) -> PollerHandle<V> {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let cancellation_token = CancellationToken::new();
        let task = tokio::spawn(self.run(commands_rx, cancellation_token.clone()));

        PollerHandle {
            commands: commands_tx,
            cancellation_token,
            task,
        }
    }

    /// Refresh immediately, then every interval, until cancelled. Returns the
    /// dashboard so callers can inspect the final state.
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        cancellation_token: CancellationToken,
    ) -> Dashboard<V> {
        info!(interval_secs = self.interval.as_secs(), "Poller started");

        let (responses_tx, mut responses) = mpsc::unbounded_channel();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancellation_token.cancelled() => {
                    info!("Poller received shutdown signal");
                    break;
                }
                Some(response) = responses.recv() => {
                    let requests = self.dashboard.apply(response);
                    self.dispatch(requests, &responses_tx);
                }
                Some(command) = commands.recv() => {
                    let requests = self.dashboard.handle(command);
                    self.dispatch(requests, &responses_tx);
                }
                _ = ticker.tick() => {
                    debug!("Periodic refresh");
                    let requests = self.dashboard.refresh();
                    self.dispatch(requests, &responses_tx);
                }
            }
        }

        info!("Poller stopped");
        self.dashboard
    }

    fn dispatch(&self, requests: Vec<Request>, responses: &mpsc::UnboundedSender<Response>) {
        for request in requests {
            let api = self.api.clone();
            let responses = responses.clone();
            tokio::spawn(async move {
                let response = execute(api.as_ref(), request).await;
                // The receiver is gone once the poller has stopped.
                let _ = responses.send(response);
            });
        }
    }
}

/// Perform one request against the API.
pub async fn execute(api: &dyn PanelApi, request: Request) -> Response {
    match request {
        Request::Summary(ticket) => Response::Summary(ticket, api.dashboard().await),
        Request::RecentAlerts(ticket) => {
            Response::RecentAlerts(ticket, api.alerts(AlertScope::Active).await)
        }
        Request::Services(ticket, filter) => Response::Services(ticket, api.services(filter).await),
        Request::Logs(ticket, query) => Response::Logs(ticket, api.logs(&query).await),
        Request::Alerts(ticket) => {
            Response::Alerts(ticket, api.alerts(AlertScope::ServerDefault).await)
        }
        Request::Acknowledge(id) => {
            let result = api.acknowledge_alert(&id).await;
            Response::Acknowledged(id, result)
        }
        Request::Resolve(id) => {
            let result = api.resolve_alert(&id).await;
            Response::Resolved(id, result)
        }
    }
}

/// Control side of a spawned `Poller`.
pub struct PollerHandle<V: ViewHandle> {
    commands: mpsc::UnboundedSender<Command>,
    cancellation_token: CancellationToken,
    task: JoinHandle<Dashboard<V>>,
}

impl<V: ViewHandle> PollerHandle<V> {
    /// Queue a command. Returns false once the poller has stopped.
    pub fn send(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Stop the schedule and wait for the poller task. Requests already in
    /// flight finish on their own; their results are dropped.
    pub async fn shutdown(self) -> Result<Dashboard<V>, JoinError> {
        self.cancellation_token.cancel();
        self.task.await
    }
}
