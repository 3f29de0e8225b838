// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use async_trait::async_trait;
use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use panel_client::FetchError;
use panel_client::PanelApi;
use panel_client::model::{
    Alert, AlertCounts, AlertScope, AlertSeverity, AlertsResponse, ApiStatus, DashboardSummary,
    LogQuery, LogsResponse, Platform, Service, ServiceFilter, ServiceStatus, ServicesResponse,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

// ===========================================================================
// HTTP mock backend
// ===========================================================================

#[derive(Clone)]
struct BackendState {
    routes: Arc<HashMap<String, (StatusCode, String)>>,
    requests: Arc<Mutex<Vec<String>>>,
}

/// Canned-response HTTP server on an ephemeral port. Every request is
/// recorded as "METHOD /path[?query]".
pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl MockBackend {
    /// `routes` maps "METHOD /path" to a status and body. Anything else gets 404.
    pub async fn start(routes: Vec<(&str, u16, String)>) -> Self {
        let routes = routes
            .into_iter()
            .map(|(route, status, body)| {
                let status = StatusCode::from_u16(status).expect("valid status code");
                (route.to_string(), (status, body))
            })
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            routes: Arc::new(routes),
            requests: Arc::clone(&requests),
        };

        let app = Router::new().fallback(respond).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
            task,
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Count recorded requests equal to `request`.
    pub fn count(&self, request: &str) -> usize {
        self.requests().iter().filter(|r| *r == request).count()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn respond(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let route = format!("{} {}", method, uri.path());
    let recorded = match uri.query() {
        Some(query) => format!("{}?{}", route, query),
        None => route.clone(),
    };
    state.requests.lock().unwrap().push(recorded);

    let json = [(header::CONTENT_TYPE, "application/json")];
    match state.routes.get(&route) {
        Some((status, body)) => (*status, json, body.clone()),
        None => (StatusCode::NOT_FOUND, json, r#"{"error":"not found"}"#.to_string()),
    }
}

// ===========================================================================
// Recording API double
// ===========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Dashboard,
    Services(ServiceFilter),
    Service(String),
    Logs(LogQuery),
    Alerts(AlertScope),
    Acknowledge(String),
    Resolve(String),
    Status,
}

/// In-process `PanelApi` that answers from fixed data and records every call.
pub struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    summary: DashboardSummary,
    alerts: Vec<Alert>,
}

impl RecordingApi {
    pub fn new(summary: DashboardSummary, alerts: Vec<Alert>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            summary,
            alerts,
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PanelApi for RecordingApi {
    async fn dashboard(&self) -> Result<DashboardSummary, FetchError> {
        self.record(Call::Dashboard);
        Ok(self.summary.clone())
    }

    async fn services(&self, filter: ServiceFilter) -> Result<ServicesResponse, FetchError> {
        self.record(Call::Services(filter));
        Ok(ServicesResponse {
            services: vec![service("nginx", ServiceStatus::Running)],
            count: 1,
        })
    }

    async fn service(&self, name: &str) -> Result<Service, FetchError> {
        self.record(Call::Service(name.to_string()));
        Ok(service(name, ServiceStatus::Running))
    }

    async fn logs(&self, query: &LogQuery) -> Result<LogsResponse, FetchError> {
        self.record(Call::Logs(query.clone()));
        Ok(LogsResponse {
            logs: Vec::new(),
            count: 0,
            statistics: None,
        })
    }

    async fn alerts(&self, scope: AlertScope) -> Result<AlertsResponse, FetchError> {
        self.record(Call::Alerts(scope));
        Ok(AlertsResponse {
            alerts: self.alerts.clone(),
            count: self.alerts.len(),
            summary: AlertCounts {
                total: self.alerts.len() as u64,
                active: self.alerts.len() as u64,
                ..AlertCounts::default()
            },
        })
    }

    async fn acknowledge_alert(&self, id: &str) -> Result<(), FetchError> {
        self.record(Call::Acknowledge(id.to_string()));
        Ok(())
    }

    async fn resolve_alert(&self, id: &str) -> Result<(), FetchError> {
        self.record(Call::Resolve(id.to_string()));
        Ok(())
    }

    async fn status(&self) -> Result<ApiStatus, FetchError> {
        self.record(Call::Status);
        Ok(ApiStatus {
            status: "running".into(),
            platform: Platform::Linux,
            version: "1.0.0".into(),
        })
    }
}

// ===========================================================================
// Fixtures
// ===========================================================================

pub fn service(name: &str, status: ServiceStatus) -> Service {
    Service {
        name: name.to_string(),
        display_name: format!("{} service", name),
        status,
        is_critical: false,
        description: String::new(),
        pid: None,
    }
}

pub fn alert(id: &str) -> Alert {
    Alert {
        id: id.to_string(),
        kind: "service_down".to_string(),
        severity: AlertSeverity::High,
        title: format!("Alert {}", id),
        message: "Service stopped unexpectedly".to_string(),
        source: "nginx".to_string(),
        timestamp: "2024-01-15T10:30:00".to_string(),
        acknowledged: false,
        resolved: false,
    }
}
