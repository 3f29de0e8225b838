// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::view::Slot;

/// Failure talking to the monitoring API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("malformed response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// HTTP status of a non-2xx response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure writing into a view.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("view slot '{0}' is not present")]
    MissingSlot(Slot),

    #[error("failed to write page {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode chart config: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Invalid client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("api url is empty")]
    EmptyApiUrl,

    #[error("api url '{0}' must start with http:// or https://")]
    UnsupportedScheme(String),

    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("log limit {0} is outside 1..={max}", max = crate::config::MAX_LOG_LIMIT)]
    LogLimitOutOfRange(u32),
}
