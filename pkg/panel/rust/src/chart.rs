// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Chart lifecycles for the two dashboard charts.
//!
//! A slot holds at most one live chart. Every update destroys the old
//! instance before creating the replacement, and an update aimed at a slot
//! the view does not have leaves everything as it was.

use crate::error::ViewError;
use crate::model::{LogStats, ServiceCounts};
use crate::render::escape_html;
use crate::view::{Slot, ViewHandle};
use serde::Serialize;
use std::collections::HashMap;

const RUNNING_COLOR: &str = "#10b981";
const STOPPED_COLOR: &str = "#f59e0b";
const FAILED_COLOR: &str = "#ef4444";
const FALLBACK_LEVEL_COLOR: &str = "#6c5ce7";

const LEVEL_COLORS: [(&str, &str); 5] = [
    ("ERROR", "#ef4444"),
    ("WARNING", "#f59e0b"),
    ("INFO", "#3b82f6"),
    ("DEBUG", "#6c6c7c"),
    ("CRITICAL", "#dc2626"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Bar,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<String>,
}

/// Running/stopped/failed split of the monitored services.
pub fn distribution_spec(counts: &ServiceCounts) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Doughnut,
        title: "Service status".to_string(),
        labels: vec!["Running".into(), "Stopped".into(), "Failed".into()],
        values: vec![counts.running, counts.stopped, counts.failed],
        colors: vec![RUNNING_COLOR.into(), STOPPED_COLOR.into(), FAILED_COLOR.into()],
    }
}

/// Log counts per level, in the order the backend listed the levels.
pub fn histogram_spec(stats: &LogStats) -> ChartSpec {
    let mut spec = ChartSpec {
        kind: ChartKind::Bar,
        title: "Logs by level".to_string(),
        labels: Vec::with_capacity(stats.by_level.len()),
        values: Vec::with_capacity(stats.by_level.len()),
        colors: Vec::with_capacity(stats.by_level.len()),
    };
    for (level, count) in stats.by_level.iter() {
        spec.labels.push(level.to_string());
        spec.values.push(count);
        spec.colors.push(level_color(level).to_string());
    }
    spec
}

fn level_color(level: &str) -> &'static str {
    LEVEL_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(level))
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_LEVEL_COLOR)
}

/// A chart currently drawn into a slot.
pub trait ChartInstance: Send {
    fn destroy(self: Box<Self>, view: &mut dyn ViewHandle);
}

/// Draws charts into view slots.
pub trait ChartFactory: Send {
    fn create(
        &mut self,
        view: &mut dyn ViewHandle,
        slot: Slot,
        spec: &ChartSpec,
    ) -> Result<Box<dyn ChartInstance>, ViewError>;
}

/// Writes a `<canvas data-chart="...">` element; the page script turns it
/// into a chart when the document loads.
#[derive(Debug, Default)]
pub struct CanvasChartFactory;

struct CanvasChart {
    slot: Slot,
}

impl ChartInstance for CanvasChart {
    fn destroy(self: Box<Self>, view: &mut dyn ViewHandle) {
        if let Err(e) = view.set_html(self.slot, String::new()) {
            tracing::debug!(slot = %self.slot, error = %e, "Chart slot already gone");
        }
    }
}

impl ChartFactory for CanvasChartFactory {
    fn create(
        &mut self,
        view: &mut dyn ViewHandle,
        slot: Slot,
        spec: &ChartSpec,
    ) -> Result<Box<dyn ChartInstance>, ViewError> {
        let config = serde_json::to_string(spec)?;
        view.set_html(
            slot,
            format!(
                r#"<canvas data-chart="{}" aria-label="{}"></canvas>"#,
                escape_html(&config),
                escape_html(&spec.title)
            ),
        )?;
        Ok(Box::new(CanvasChart { slot }))
    }
}

/// Owns the live chart instances.
pub struct ChartAdapter {
    factory: Box<dyn ChartFactory>,
    live: HashMap<Slot, Box<dyn ChartInstance>>,
}

impl ChartAdapter {
    pub fn new(factory: Box<dyn ChartFactory>) -> Self {
        Self {
            factory,
            live: HashMap::new(),
        }
    }

    pub fn update_distribution(
        &mut self,
        view: &mut dyn ViewHandle,
        counts: &ServiceCounts,
    ) -> Result<(), ViewError> {
        self.replace(view, Slot::ServiceChart, &distribution_spec(counts))
    }

    pub fn update_histogram(
        &mut self,
        view: &mut dyn ViewHandle,
        stats: &LogStats,
    ) -> Result<(), ViewError> {
        self.replace(view, Slot::LogChart, &histogram_spec(stats))
    }

    /// Number of charts currently drawn.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn replace(
        &mut self,
        view: &mut dyn ViewHandle,
        slot: Slot,
        spec: &ChartSpec,
    ) -> Result<(), ViewError> {
        if !view.has_slot(slot) {
            tracing::debug!(slot = %slot, "No chart slot in view, skipping chart update");
            return Ok(());
        }
        if let Some(old) = self.live.remove(&slot) {
            old.destroy(view);
        }
        let chart = self.factory.create(view, slot, spec)?;
        self.live.insert(slot, chart);
        Ok(())
    }
}

impl Default for ChartAdapter {
    fn default() -> Self {
        Self::new(Box::new(CanvasChartFactory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LevelCounts;
    use crate::view::MemoryView;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicIsize, Ordering};

    /// Tracks how many instances it has alive at any time.
    struct CountingFactory {
        alive: Arc<AtomicIsize>,
        peak: Arc<AtomicIsize>,
    }

    struct CountedChart {
        alive: Arc<AtomicIsize>,
    }

    impl ChartInstance for CountedChart {
        fn destroy(self: Box<Self>, _view: &mut dyn ViewHandle) {
            self.alive.fetch_sub(1, Ordering::SeqCst);
        }
    }

    impl ChartFactory for CountingFactory {
        fn create(
            &mut self,
            _view: &mut dyn ViewHandle,
            _slot: Slot,
            _spec: &ChartSpec,
        ) -> Result<Box<dyn ChartInstance>, ViewError> {
            let now = self.alive.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            Ok(Box::new(CountedChart {
                alive: self.alive.clone(),
            }))
        }
    }

    fn counting() -> (ChartAdapter, Arc<AtomicIsize>, Arc<AtomicIsize>) {
        let alive = Arc::new(AtomicIsize::new(0));
        let peak = Arc::new(AtomicIsize::new(0));
        let adapter = ChartAdapter::new(Box::new(CountingFactory {
            alive: alive.clone(),
            peak: peak.clone(),
        }));
        (adapter, alive, peak)
    }

    fn stats(levels: &[(&str, u64)]) -> LogStats {
        LogStats {
            by_level: LevelCounts::new(
                levels.iter().map(|(l, c)| (l.to_string(), *c)).collect(),
            ),
            ..LogStats::default()
        }
    }

    #[test]
    fn test_distribution_spec() {
        let spec = distribution_spec(&ServiceCounts {
            running: 3,
            stopped: 1,
            failed: 2,
            ..ServiceCounts::default()
        });
        assert_eq!(spec.kind, ChartKind::Doughnut);
        assert_eq!(spec.labels, vec!["Running", "Stopped", "Failed"]);
        assert_eq!(spec.values, vec![3, 1, 2]);
        assert_eq!(spec.colors, vec!["#10b981", "#f59e0b", "#ef4444"]);
    }

    #[test]
    fn test_histogram_follows_backend_order_and_colors() {
        let spec = histogram_spec(&stats(&[("WARNING", 4), ("TRACE", 1), ("ERROR", 2)]));
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.labels, vec!["WARNING", "TRACE", "ERROR"]);
        assert_eq!(spec.values, vec![4, 1, 2]);
        assert_eq!(spec.colors, vec!["#f59e0b", "#6c5ce7", "#ef4444"]);
    }

    #[test]
    fn test_spec_serializes_type_field() {
        let json = serde_json::to_value(distribution_spec(&ServiceCounts::default())).unwrap();
        assert_eq!(json["type"], "doughnut");
        assert_eq!(json["values"], serde_json::json!([0, 0, 0]));
    }

    #[test]
    fn test_at_most_one_live_instance_per_slot() {
        let (mut charts, alive, peak) = counting();
        let mut view = MemoryView::new();
        for running in 0..10 {
            let counts = ServiceCounts {
                running,
                ..ServiceCounts::default()
            };
            charts.update_distribution(&mut view, &counts).unwrap();
            charts.update_histogram(&mut view, &stats(&[("INFO", running)])).unwrap();
        }
        assert_eq!(alive.load(Ordering::SeqCst), 2);
        assert_eq!(peak.load(Ordering::SeqCst), 2);
        assert_eq!(charts.live_count(), 2);
    }

    #[test]
    fn test_missing_slot_is_a_no_op() {
        let (mut charts, alive, _) = counting();
        let mut full = MemoryView::new();
        charts.update_histogram(&mut full, &stats(&[("INFO", 1)])).unwrap();

        let mut partial = MemoryView::without(&[Slot::LogChart]);
        charts.update_histogram(&mut partial, &stats(&[("INFO", 2)])).unwrap();
        assert_eq!(alive.load(Ordering::SeqCst), 1);
        assert_eq!(charts.live_count(), 1);
    }

    #[test]
    fn test_canvas_factory_writes_escaped_config() {
        let mut charts = ChartAdapter::default();
        let mut view = MemoryView::new();
        charts
            .update_distribution(
                &mut view,
                &ServiceCounts {
                    running: 3,
                    ..ServiceCounts::default()
                },
            )
            .unwrap();

        let html = view.html(Slot::ServiceChart).unwrap();
        assert!(html.starts_with(r#"<canvas data-chart="{&quot;type&quot;:&quot;doughnut&quot;"#));
        assert!(!html.contains(r#""type""#));

        charts.update_distribution(&mut view, &ServiceCounts::default()).unwrap();
        let html = view.html(Slot::ServiceChart).unwrap();
        assert_eq!(html.matches("<canvas").count(), 1);
        assert!(html.contains("&quot;values&quot;:[0,0,0]"));
    }
}
