// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Named render targets.
//!
//! The controller never looks anything up by itself: it writes into a
//! `ViewHandle`, which may be a test double, an in-memory buffer, or the
//! `PageView` that turns every render pass into an HTML document on disk.

use crate::error::ViewError;
use crate::render::escape_html;
use crate::state::Tab;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    PageTitle,
    PlatformName,
    StatRunning,
    StatStopped,
    StatErrors,
    StatAlerts,
    AlertBadge,
    LastUpdate,
    RecentAlerts,
    ServicesList,
    LogsList,
    AlertsList,
    CriticalCount,
    HighCount,
    ServiceChart,
    LogChart,
}

impl Slot {
    pub const ALL: [Slot; 16] = [
        Slot::PageTitle,
        Slot::PlatformName,
        Slot::StatRunning,
        Slot::StatStopped,
        Slot::StatErrors,
        Slot::StatAlerts,
        Slot::AlertBadge,
        Slot::LastUpdate,
        Slot::RecentAlerts,
        Slot::ServicesList,
        Slot::LogsList,
        Slot::AlertsList,
        Slot::CriticalCount,
        Slot::HighCount,
        Slot::ServiceChart,
        Slot::LogChart,
    ];

    pub fn from_id(id: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.id() == id)
    }

    /// Element id in the page document.
    pub fn id(&self) -> &'static str {
        match self {
            Slot::PageTitle => "page-title",
            Slot::PlatformName => "platform-name",
            Slot::StatRunning => "stat-running",
            Slot::StatStopped => "stat-stopped",
            Slot::StatErrors => "stat-errors",
            Slot::StatAlerts => "stat-alerts",
            Slot::AlertBadge => "alert-badge",
            Slot::LastUpdate => "last-update-time",
            Slot::RecentAlerts => "recent-alerts",
            Slot::ServicesList => "services-list",
            Slot::LogsList => "logs-list",
            Slot::AlertsList => "alerts-list",
            Slot::CriticalCount => "critical-count",
            Slot::HighCount => "high-count",
            Slot::ServiceChart => "service-chart",
            Slot::LogChart => "log-chart",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Render target exposing named slots.
///
/// Writes to a slot the view does not have fail with `ViewError::MissingSlot`;
/// callers treat that as nothing to do.
pub trait ViewHandle: Send {
    fn has_slot(&self, slot: Slot) -> bool;

    /// Replace the slot's content with plain text.
    fn set_text(&mut self, slot: Slot, text: &str) -> Result<(), ViewError>;

    /// Replace the slot's content with already-escaped markup.
    fn set_html(&mut self, slot: Slot, html: String) -> Result<(), ViewError>;

    fn set_visible(&mut self, slot: Slot, visible: bool) -> Result<(), ViewError>;

    fn show_tab(&mut self, tab: Tab);

    /// Called once at the end of every render pass.
    fn commit(&mut self) -> Result<(), ViewError> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum SlotContent {
    #[default]
    Empty,
    Text(String),
    Html(String),
}

#[derive(Debug, Clone)]
struct SlotState {
    content: SlotContent,
    visible: bool,
}

impl Default for SlotState {
    fn default() -> Self {
        Self {
            content: SlotContent::Empty,
            visible: true,
        }
    }
}

/// View that keeps slot contents in memory.
#[derive(Debug, Clone)]
pub struct MemoryView {
    slots: HashMap<Slot, SlotState>,
    active_tab: Tab,
    commits: usize,
}

impl MemoryView {
    /// A view with every slot present.
    pub fn new() -> Self {
        Self::without(&[])
    }

    /// A view lacking the given slots.
    pub fn without(missing: &[Slot]) -> Self {
        let slots = Slot::ALL
            .iter()
            .filter(|slot| !missing.contains(slot))
            .map(|slot| (*slot, SlotState::default()))
            .collect();
        Self {
            slots,
            active_tab: Tab::default(),
            commits: 0,
        }
    }

    pub fn text(&self, slot: Slot) -> Option<&str> {
        match self.slots.get(&slot).map(|s| &s.content) {
            Some(SlotContent::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn html(&self, slot: Slot) -> Option<&str> {
        match self.slots.get(&slot).map(|s| &s.content) {
            Some(SlotContent::Html(html)) => Some(html),
            _ => None,
        }
    }

    /// Slot content as markup: text is escaped, html is returned as is.
    pub fn markup(&self, slot: Slot) -> String {
        match self.slots.get(&slot).map(|s| &s.content) {
            Some(SlotContent::Text(text)) => escape_html(text),
            Some(SlotContent::Html(html)) => html.clone(),
            _ => String::new(),
        }
    }

    pub fn is_visible(&self, slot: Slot) -> bool {
        self.slots.get(&slot).is_some_and(|s| s.visible)
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Number of completed render passes.
    pub fn commits(&self) -> usize {
        self.commits
    }

    fn slot_mut(&mut self, slot: Slot) -> Result<&mut SlotState, ViewError> {
        self.slots.get_mut(&slot).ok_or(ViewError::MissingSlot(slot))
    }
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewHandle for MemoryView {
    fn has_slot(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    fn set_text(&mut self, slot: Slot, text: &str) -> Result<(), ViewError> {
        self.slot_mut(slot)?.content = SlotContent::Text(text.to_string());
        Ok(())
    }

    fn set_html(&mut self, slot: Slot, html: String) -> Result<(), ViewError> {
        self.slot_mut(slot)?.content = SlotContent::Html(html);
        Ok(())
    }

    fn set_visible(&mut self, slot: Slot, visible: bool) -> Result<(), ViewError> {
        self.slot_mut(slot)?.visible = visible;
        Ok(())
    }

    fn show_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    fn commit(&mut self) -> Result<(), ViewError> {
        self.commits += 1;
        Ok(())
    }
}

/// Page template; `{{slot-id}}` placeholders are replaced by slot markup.
const PAGE_TEMPLATE: &str = include_str!("static/dashboard.html");

/// Writes the whole dashboard as a standalone HTML document on every commit.
pub struct PageView {
    inner: MemoryView,
    path: PathBuf,
    reload_secs: u64,
}

impl PageView {
    /// `reload_secs` is emitted as a meta refresh so an open browser tab
    /// follows the poll interval.
    pub fn new(path: impl Into<PathBuf>, reload_secs: u64) -> Self {
        Self {
            inner: MemoryView::new(),
            path: path.into(),
            reload_secs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn view(&self) -> &MemoryView {
        &self.inner
    }

    pub fn render_document(&self) -> String {
        render_document(&self.inner, self.reload_secs)
    }

    fn write(&self, document: &str) -> Result<(), ViewError> {
        let tmp_path = self.path.with_extension("html.tmp");
        let to_error = |source| ViewError::Write {
            path: self.path.display().to_string(),
            source,
        };
        std::fs::write(&tmp_path, document).map_err(to_error)?;
        std::fs::rename(&tmp_path, &self.path).map_err(to_error)?;
        Ok(())
    }
}

impl ViewHandle for PageView {
    fn has_slot(&self, slot: Slot) -> bool {
        self.inner.has_slot(slot)
    }

    fn set_text(&mut self, slot: Slot, text: &str) -> Result<(), ViewError> {
        self.inner.set_text(slot, text)
    }

    fn set_html(&mut self, slot: Slot, html: String) -> Result<(), ViewError> {
        self.inner.set_html(slot, html)
    }

    fn set_visible(&mut self, slot: Slot, visible: bool) -> Result<(), ViewError> {
        self.inner.set_visible(slot, visible)
    }

    fn show_tab(&mut self, tab: Tab) {
        self.inner.show_tab(tab)
    }

    fn commit(&mut self) -> Result<(), ViewError> {
        self.inner.commit()?;
        let document = self.render_document();
        self.write(&document)
    }
}

/// Fill the page template from a view's slots.
///
/// Single pass over the template, so slot content is never rescanned for
/// placeholders.
pub fn render_document(view: &MemoryView, reload_secs: u64) -> String {
    let mut page = String::with_capacity(PAGE_TEMPLATE.len() * 2);
    let mut rest = PAGE_TEMPLATE;

    while let Some(start) = rest.find("{{") {
        page.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match placeholder(view, reload_secs, key) {
                    Some(value) => page.push_str(&value),
                    None => page.push_str(&rest[start..start + end + 4]),
                }
                rest = &after[end + 2..];
            }
            None => break,
        }
    }

    page.push_str(rest);
    page
}

fn placeholder(view: &MemoryView, reload_secs: u64, key: &str) -> Option<String> {
    if key == "reload-secs" {
        return Some(reload_secs.to_string());
    }
    if let Some(tab) = key.strip_prefix("tab-") {
        let active = view.active_tab().as_str() == tab;
        return Some(if active { "active" } else { "" }.to_string());
    }
    if let Some(slot) = key.strip_suffix("-style").and_then(Slot::from_id) {
        let style = if view.is_visible(slot) { "" } else { "display:none" };
        return Some(style.to_string());
    }
    Slot::from_id(key).map(|slot| view.markup(slot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_slot_is_reported() {
        let mut view = MemoryView::without(&[Slot::LogChart]);
        assert!(!view.has_slot(Slot::LogChart));
        let err = view.set_html(Slot::LogChart, "<canvas></canvas>".into());
        assert!(matches!(err, Err(ViewError::MissingSlot(Slot::LogChart))));
        assert!(view.set_text(Slot::StatRunning, "3").is_ok());
    }

    #[test]
    fn test_text_is_escaped_in_markup() {
        let mut view = MemoryView::new();
        view.set_text(Slot::PlatformName, "<b>Linux</b>").unwrap();
        assert_eq!(view.text(Slot::PlatformName), Some("<b>Linux</b>"));
        assert_eq!(view.markup(Slot::PlatformName), "&lt;b&gt;Linux&lt;/b&gt;");
        assert_eq!(view.html(Slot::PlatformName), None);
    }

    #[test]
    fn test_render_document_fills_placeholders() {
        let mut view = MemoryView::new();
        view.set_text(Slot::StatRunning, "7").unwrap();
        view.set_visible(Slot::AlertBadge, false).unwrap();
        view.show_tab(Tab::Logs);

        let page = render_document(&view, 30);
        assert!(page.contains(r#"<meta http-equiv="refresh" content="30">"#));
        assert!(page.contains(r#"<div class="stat-value" id="stat-running">7</div>"#));
        assert!(page.contains(r#"id="alert-badge" style="display:none""#));
        assert!(page.contains(r#"<section class="tab-content active" id="logs-tab">"#));
        assert!(page.contains(r#"<section class="tab-content " id="services-tab">"#));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn test_render_document_does_not_expand_slot_content() {
        let mut view = MemoryView::new();
        view.set_text(Slot::PlatformName, "{{stat-running}}").unwrap();
        view.set_text(Slot::StatRunning, "7").unwrap();

        let page = render_document(&view, 30);
        assert!(page.contains(r#"id="platform-name">{{stat-running}}</span>"#));
    }

    #[test]
    fn test_page_view_writes_on_commit() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("dashboard.html");

        let mut view = PageView::new(&path, 30);
        view.set_text(Slot::StatAlerts, "4").unwrap();
        assert!(!path.exists());

        view.commit().unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#"id="stat-alerts">4</div>"#));
        assert!(!path.with_extension("html.tmp").exists());
        assert_eq!(view.view().commits(), 1);
    }

    #[test]
    fn test_page_view_reports_write_failure() {
        let mut view = PageView::new("/nonexistent/dir/dashboard.html", 30);
        assert!(matches!(view.commit(), Err(ViewError::Write { .. })));
    }
}
