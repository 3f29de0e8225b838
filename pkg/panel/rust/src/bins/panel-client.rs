// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Command line client for the monitoring API.
//!
//! # Usage
//!
//! ```bash
//! # Keep a self-refreshing HTML dashboard up to date
//! panel-client watch --output /tmp/panel.html
//!
//! # One-shot queries
//! panel-client services --status failed
//! panel-client logs --level error --limit 20
//! panel-client alerts --all --search nginx
//! panel-client ack ALT-000001
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use panel_client::config::{DEFAULT_API_URL, PanelConfig};
use panel_client::filter::matching;
use panel_client::logging::{self, LogFormat};
use panel_client::model::{AlertScope, LogLevel, LogQuery, ServiceFilter};
use panel_client::render::Renderer;
use panel_client::state::Tab;
use panel_client::{Command, Dashboard, HttpPanelClient, PageView, PanelApi, Poller, table};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "panel-client")]
#[command(about = "Dashboard and command line client for the service monitoring API")]
#[command(version)]
struct Args {
    /// Base URL of the monitoring API.
    #[arg(long, env = "PANEL_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "PANEL_TIMEOUT_SECS", default_value = "30", global = true)]
    timeout_secs: u64,

    /// Log output format (text or json).
    #[arg(long, default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Poll the backend and keep an HTML dashboard file up to date
    Watch {
        /// Page to write; rewritten atomically after every update.
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, env = "PANEL_POLL_INTERVAL_SECS", default_value = "30")]
        interval_secs: u64,

        /// Tab shown in the page (dashboard, services, logs or alerts).
        #[arg(long, default_value = "dashboard")]
        tab: Tab,

        #[arg(long, env = "PANEL_LOG_LIMIT", default_value = "100")]
        log_limit: u32,

        /// Number of alerts listed on the dashboard tab.
        #[arg(long, default_value = "5")]
        recent_alerts: usize,
    },

    /// Show backend status and dashboard counters
    Status,

    /// List services
    Services {
        /// Server-side filter: running, stopped, failed or critical.
        #[arg(long)]
        status: Option<ServiceFilter>,

        /// Only show services whose name or display name contains this text.
        #[arg(long)]
        search: Option<String>,
    },

    /// List recent log entries
    Logs {
        #[arg(long, env = "PANEL_LOG_LIMIT", default_value = "100")]
        limit: u32,

        /// Level filter: emergency, alert, critical, error, warning, notice, info or debug.
        #[arg(long)]
        level: Option<LogLevel>,

        #[arg(long)]
        service: Option<String>,

        #[arg(long)]
        search: Option<String>,
    },

    /// List alerts (active only unless --all)
    Alerts {
        #[arg(long)]
        all: bool,

        #[arg(long)]
        search: Option<String>,
    },

    /// Acknowledge an alert
    Ack { id: String },

    /// Resolve an alert
    Resolve { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_format);

    let mut config = PanelConfig {
        api_url: args.api_url,
        request_timeout: Duration::from_secs(args.timeout_secs),
        ..PanelConfig::default()
    };

    if let Commands::Watch {
        interval_secs,
        log_limit,
        recent_alerts,
        ..
    } = &args.command
    {
        config.poll_interval = Duration::from_secs(*interval_secs);
        config.log_limit = *log_limit;
        config.recent_alert_limit = *recent_alerts;
    }
    if let Commands::Logs { limit, .. } = &args.command {
        config.log_limit = *limit;
    }
    config.validate().context("Invalid configuration")?;

    let client = HttpPanelClient::new(&config.api_url, config.request_timeout)
        .context("Failed to create HTTP client")?;
    let renderer = Renderer::local();

    match args.command {
        Commands::Watch { output, tab, .. } => watch(config, client, output, tab).await?,
        Commands::Status => {
            let (status, summary) = tokio::try_join!(client.status(), client.dashboard())
                .context("Failed to fetch backend status")?;
            print!("{}", table::status(&status, &summary)?);
        }
        Commands::Services { status, search } => {
            let response = client
                .services(status.unwrap_or_default())
                .await
                .context("Failed to fetch services")?;
            let visible = matching(&response.services, search.as_deref().unwrap_or(""));
            print!("{}", table::services(&visible)?);
        }
        Commands::Logs {
            limit,
            level,
            service,
            search,
        } => {
            let query = LogQuery {
                limit,
                level,
                service,
                search,
            };
            let response = client.logs(&query).await.context("Failed to fetch logs")?;
            let entries: Vec<_> = response.logs.iter().collect();
            print!("{}", table::logs(&entries, &renderer)?);
        }
        Commands::Alerts { all, search } => {
            let scope = if all { AlertScope::All } else { AlertScope::Active };
            let response = client.alerts(scope).await.context("Failed to fetch alerts")?;
            let visible = matching(&response.alerts, search.as_deref().unwrap_or(""));
            print!("{}", table::alerts(&visible, &renderer)?);
        }
        Commands::Ack { id } => {
            client
                .acknowledge_alert(&id)
                .await
                .with_context(|| format!("Failed to acknowledge alert {}", id))?;
            println!("Alert {} acknowledged", id);
        }
        Commands::Resolve { id } => {
            client
                .resolve_alert(&id)
                .await
                .with_context(|| format!("Failed to resolve alert {}", id))?;
            println!("Alert {} resolved", id);
        }
    }

    Ok(())
}

/// Poll until ctrl-c, rewriting the page after every update.
async fn watch(config: PanelConfig, client: HttpPanelClient, output: PathBuf, tab: Tab) -> Result<()> {
    info!(
        api_url = %config.api_url,
        output = %output.display(),
        interval_secs = config.poll_interval.as_secs(),
        "Starting dashboard"
    );

    let view = PageView::new(output, config.poll_interval.as_secs());
    let dashboard = Dashboard::new(view, &config);
    let handle = Poller::new(dashboard, Arc::new(client), config.poll_interval).spawn();
    handle.send(Command::Navigate(tab));

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Received shutdown signal");

    let dashboard = handle.shutdown().await.context("Poller task failed")?;
    info!(page = %dashboard.view().path().display(), "Dashboard stopped");
    Ok(())
}
