// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Polling dashboard client for the service/log/alert monitoring API.
//!
//! ## Architecture
//!
//! 1. **HTTP client** (`client`) - `PanelApi` port and its reqwest adapter.
//! 2. **View state** (`state`) - last-fetched collections, search inputs and
//!    per-region request sequencing.
//! 3. **Rendering** (`render`, `filter`, `chart`) - pure functions from state
//!    to markup, client-side search, and chart lifecycles.
//! 4. **Controller** (`dashboard`, `poller`) - turns commands and responses
//!    into view updates; the poller drives it on a cancellable timer.
//!
//! Every render pass writes into a `ViewHandle` (`view`): named slots that are
//! backed by memory in tests and by a self-refreshing HTML document in
//! `panel-client watch`.

pub mod chart;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod logging;
pub mod model;
pub mod poller;
pub mod render;
pub mod state;
pub mod table;
pub mod view;

pub use client::{HttpPanelClient, PanelApi};
pub use config::PanelConfig;
pub use dashboard::{Command, Dashboard, Request, Response};
pub use error::{ConfigError, FetchError, ViewError};
pub use poller::{Poller, PollerHandle};
pub use view::{MemoryView, PageView, Slot, ViewHandle};
