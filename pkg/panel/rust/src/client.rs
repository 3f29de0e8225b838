// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Access to the monitoring API.
//!
//! `PanelApi` is the port the controller and the CLI talk to;
//! `HttpPanelClient` is its reqwest adapter.

use crate::error::FetchError;
use crate::model::{
    AlertScope, AlertsResponse, ApiStatus, DashboardSummary, LogQuery, LogsResponse, Service,
    ServiceFilter, ServicesResponse,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// One method per backend endpoint.
#[async_trait]
pub trait PanelApi: Send + Sync {
    /// `GET /api/dashboard`
    async fn dashboard(&self) -> Result<DashboardSummary, FetchError>;

    /// `GET /api/services[?status=]`
    async fn services(&self, filter: ServiceFilter) -> Result<ServicesResponse, FetchError>;

    /// `GET /api/services/{name}`
    async fn service(&self, name: &str) -> Result<Service, FetchError>;

    /// `GET /api/logs?limit=N[&level=][&service=][&search=]`
    async fn logs(&self, query: &LogQuery) -> Result<LogsResponse, FetchError>;

    /// `GET /api/alerts[?active=]`
    async fn alerts(&self, scope: AlertScope) -> Result<AlertsResponse, FetchError>;

    /// `POST /api/alerts/{id}/acknowledge`
    async fn acknowledge_alert(&self, id: &str) -> Result<(), FetchError>;

    /// `POST /api/alerts/{id}/resolve`
    async fn resolve_alert(&self, id: &str) -> Result<(), FetchError>;

    /// `GET /api/status`
    async fn status(&self) -> Result<ApiStatus, FetchError>;
}

pub struct HttpPanelClient {
    base_url: String,
    http_client: Client,
}

impl HttpPanelClient {
    /// `base_url` is the backend root, e.g. `http://127.0.0.1:5000`. Every
    /// request gives up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = self.url(path);
        debug!(url = %url, params = ?params, "Sending request");

        let mut request = self.http_client.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }
        let body = self.send(&url, request).await?;

        serde_json::from_str(&body).map_err(|source| FetchError::Parse { url, source })
    }

    async fn post_action(&self, path: &str) -> Result<(), FetchError> {
        let url = self.url(path);
        debug!(url = %url, "Sending action");

        let request = self.http_client.post(&url);
        self.send(&url, request).await?;
        Ok(())
    }

    /// Send and read the whole body; non-2xx becomes `FetchError::Status`.
    async fn send(&self, url: &str, request: reqwest::RequestBuilder) -> Result<String, FetchError> {
        let network = |source| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = request.send().await.map_err(network)?;
        let status = response.status();
        let body = response.text().await.map_err(network)?;

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl PanelApi for HttpPanelClient {
    async fn dashboard(&self) -> Result<DashboardSummary, FetchError> {
        self.get_json("/api/dashboard", &[]).await
    }

    async fn services(&self, filter: ServiceFilter) -> Result<ServicesResponse, FetchError> {
        let params: Vec<(&str, String)> = filter
            .query_value()
            .map(|status| ("status", status.to_string()))
            .into_iter()
            .collect();
        self.get_json("/api/services", &params).await
    }

    async fn service(&self, name: &str) -> Result<Service, FetchError> {
        let path = format!("/api/services/{}", urlencoding::encode(name));
        self.get_json(&path, &[]).await
    }

    async fn logs(&self, query: &LogQuery) -> Result<LogsResponse, FetchError> {
        self.get_json("/api/logs", &query.to_params()).await
    }

    async fn alerts(&self, scope: AlertScope) -> Result<AlertsResponse, FetchError> {
        let params: Vec<(&str, String)> = scope
            .query_value()
            .map(|active| ("active", active.to_string()))
            .into_iter()
            .collect();
        self.get_json("/api/alerts", &params).await
    }

    async fn acknowledge_alert(&self, id: &str) -> Result<(), FetchError> {
        let path = format!("/api/alerts/{}/acknowledge", urlencoding::encode(id));
        self.post_action(&path).await
    }

    async fn resolve_alert(&self, id: &str) -> Result<(), FetchError> {
        let path = format!("/api/alerts/{}/resolve", urlencoding::encode(id));
        self.post_action(&path).await
    }

    async fn status(&self) -> Result<ApiStatus, FetchError> {
        self.get_json("/api/status", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let client = HttpPanelClient::new("http://backend:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://backend:5000");
        assert_eq!(client.url("/api/status"), "http://backend:5000/api/status");
    }
}
