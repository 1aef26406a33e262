//! Dashboard state and the logic behind each route.

use crate::api::{self, ReconviewError};
use crate::config::Config;
use crate::fetch::{
    ExportFormat, FetchError, MemoryNotifier, Notifier, ReconApi, Transport, query_string,
};
use crate::fs::FileSystem;
use crate::model::ScanRow;
use crate::prefs::{Preferences, PrefsError};
use crate::render::page;
use crate::view::{ScanFilter, ScanListView, Theme};
use crate::viz::{ChartBoard, ChartKind, dendrogram};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

pub const NOTHING_SELECTED: &str = "Error: No scans selected.";

/// Checkbox click, or select-all when `all` is set.
#[derive(Debug, Default, Deserialize)]
pub struct SelectRequest {
    pub index: Option<usize>,
    #[serde(default)]
    pub shift: bool,
    pub all: Option<bool>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SelectReply {
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Stop,
    Delete,
}

/// Application state shared across handlers
pub struct AppState {
    pub api: ReconApi<Arc<dyn Transport>>,
    pub config: Config,
    fs: Arc<dyn FileSystem>,
    view: Mutex<ScanListView>,
    /// Ids of the rows on the last rendered scan list, in order.
    visible: Mutex<Vec<String>>,
    board: Mutex<ChartBoard>,
    prefs: Mutex<Preferences>,
    notices: MemoryNotifier,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AppState {
    pub fn new(
        transport: Arc<dyn Transport>,
        config: Config,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self, PrefsError> {
        let prefs = Preferences::load(&config.prefs_path, fs.as_ref())?;
        Ok(Self {
            api: ReconApi::new(transport, config.backend.docroot.clone()),
            view: Mutex::new(ScanListView::new(ScanFilter::All, prefs.theme)),
            visible: Mutex::new(Vec::new()),
            board: Mutex::new(ChartBoard::new()),
            prefs: Mutex::new(prefs),
            notices: MemoryNotifier::new(),
            config,
            fs,
        })
    }

    pub fn theme(&self) -> Theme {
        lock(&self.prefs).theme
    }

    /// Full reload of the scan list. Selection is cleared; pending
    /// notifications are shown once.
    pub async fn scan_list_page(&self, filter: Option<ScanFilter>) -> String {
        {
            let mut view = lock(&self.view);
            match filter {
                Some(filter) => view.set_filter(filter),
                None => view.reload(),
            }
            view.theme = self.theme();
        }

        let rows = self.api.scan_list().await;
        let view = lock(&self.view).clone();

        match rows {
            Ok(rows) if rows.is_empty() => {
                lock(&self.visible).clear();
                page::scan_list(&view, None, &self.notices.take())
            }
            Ok(rows) => {
                let table = api::scan_table(&rows, view.filter, self.api.docroot());
                debug!("Rendered {} scans, {} filtered out", table.ids.len(), table.skipped);
                *lock(&self.visible) = table.ids.clone();
                page::scan_list(&view, Some(&table), &self.notices.take())
            }
            Err(e) => {
                warn!("Scan list failed: {}", e);
                self.notices.error(&format!("Error loading scans: {}", e));
                lock(&self.visible).clear();
                page::scan_list(&view, None, &self.notices.take())
            }
        }
    }

    pub async fn scans(&self) -> Result<Vec<ScanRow>, FetchError> {
        self.api.scan_list().await
    }

    pub fn select(&self, request: &SelectRequest) -> SelectReply {
        let ids = lock(&self.visible).clone();
        let mut view = lock(&self.view);
        match (request.all, request.index) {
            (Some(all), _) => view.set_all(&ids, all),
            (None, Some(index)) => view.click(&ids, index, request.shift),
            (None, None) => {}
        }
        SelectReply {
            selected: view.selected(&ids).unwrap_or_default(),
        }
    }

    /// Checked ids, or a "nothing selected" notice.
    fn selected(&self) -> Option<Vec<String>> {
        let ids = lock(&self.visible).clone();
        let picked = lock(&self.view).selected(&ids);
        if picked.is_none() {
            self.notices.message(NOTHING_SELECTED);
        }
        picked
    }

    pub async fn stop(&self, id: &str) -> Result<(), FetchError> {
        self.api.stop_scans(&[id.to_string()], &self.notices).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), FetchError> {
        self.api.delete_scans(&[id.to_string()], &self.notices).await
    }

    /// Runs a bulk action on the checked rows. Returns how many scans it was
    /// applied to; zero when nothing was checked.
    pub async fn bulk(&self, action: BulkAction) -> Result<usize, FetchError> {
        let Some(ids) = self.selected() else {
            return Ok(0);
        };
        match action {
            BulkAction::Stop => self.api.stop_scans(&ids, &self.notices).await?,
            BulkAction::Delete => self.api.delete_scans(&ids, &self.notices).await?,
        }
        Ok(ids.len())
    }

    pub fn rerun_url(&self) -> Option<String> {
        self.selected().map(|ids| self.api.rerun_multi_url(&ids))
    }

    /// Export of the checked rows as `(file name, bytes)`.
    pub async fn export(&self, format: ExportFormat) -> Option<Result<(String, Vec<u8>), FetchError>> {
        let ids = self.selected()?;
        let result = self.api.export(format, &ids).await.map(|bytes| {
            (format!("reconview-export.{}", format.extension()), bytes)
        });
        if let Err(e) = &result {
            self.notices.error(&format!("Export failed: {}", e));
        }
        Some(result)
    }

    /// Renders posted chart JSON into the slot for `kind` and returns the SVG.
    /// Bars link to the discovery tree of their type when `scan` is given.
    pub fn render_chart(
        &self,
        kind: ChartKind,
        body: &str,
        scan: Option<&str>,
    ) -> Result<String, ReconviewError> {
        let settings = &self.config.charts;
        let chart = match (kind, scan) {
            (ChartKind::Bar, Some(scan)) => api::render_bar_chart(body, settings, |record| {
                Some(format!(
                    "/viz/discovery?{}",
                    query_string(&[("id", scan), ("eventType", record.name.as_str())])
                ))
            })?,
            _ => api::render_chart(kind, body, settings)?,
        };
        let svg = chart.to_svg();
        lock(&self.board).mount(kind.name(), chart);
        Ok(svg)
    }

    /// Page for the chart currently mounted in `kind`'s slot.
    pub fn chart_page(&self, kind: ChartKind) -> Option<String> {
        let board = lock(&self.board);
        let chart = board.get(kind.name())?;
        Some(page::chart(&format!("{} chart", kind), self.theme(), chart))
    }

    pub async fn discovery_page(&self, id: &str, event_type: &str) -> String {
        let title = format!("Discovery path: {}", event_type);
        match self.api.element_discovery(id, event_type).await {
            Ok(tree) => {
                let chart = dendrogram::render(&tree);
                let html = page::chart(&title, self.theme(), &chart);
                lock(&self.board).mount(ChartKind::Dendrogram.name(), chart);
                html
            }
            Err(e) => {
                warn!("Discovery tree for {} failed: {}", id, e);
                page::error(&title, self.theme(), &e.to_string())
            }
        }
    }

    pub fn toggle_theme(&self) -> Result<Theme, PrefsError> {
        let theme = lock(&self.prefs).toggle_theme(&self.config.prefs_path, self.fs.as_ref())?;
        lock(&self.view).theme = theme;
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::mock::FakeTransport;
    use crate::fetch::{Method, Response};
    use crate::fs::mock::MockFs;

    const TWO_SCANS: &str = r#"[
        ["a1", "one", "example.com", "c", "s", "f", "FINISHED", 10, {"HIGH": 1}],
        ["b2", "two", "example.org", "c", "s", "f", "RUNNING", 0]
    ]"#;

    fn state(replies: Vec<Result<Response, FetchError>>) -> (AppState, Arc<FakeTransport>) {
        let transport = Arc::new(FakeTransport::with_replies(replies));
        let state = AppState::new(
            transport.clone(),
            Config::default(),
            Arc::new(MockFs::new()),
        )
        .unwrap();
        (state, transport)
    }

    #[tokio::test]
    async fn test_scan_list_records_visible_rows() {
        let (state, _) = state(vec![Ok(Response::ok(TWO_SCANS))]);

        let html = state.scan_list_page(Some(ScanFilter::Running)).await;

        assert!(html.contains("cb_b2"));
        assert!(!html.contains("cb_a1"));
        assert_eq!(*lock(&state.visible), vec!["b2"]);
    }

    #[tokio::test]
    async fn test_empty_scan_list_shows_welcome() {
        let (state, _) = state(vec![Ok(Response::ok("[]"))]);
        assert!(state.scan_list_page(None).await.contains("No scan history"));
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_alert() {
        let (state, _) = state(vec![Err(FetchError::Transport("refused".to_string()))]);

        let html = state.scan_list_page(None).await;

        assert!(html.contains("alert-danger"));
        assert!(html.contains("Error loading scans: network error: refused"));
    }

    #[tokio::test]
    async fn test_bulk_delete_uses_selection() {
        let (state, transport) = state(vec![
            Ok(Response::ok(TWO_SCANS)),
            Ok(Response::ok(r#"["SUCCESS", ""]"#)),
        ]);
        state.scan_list_page(None).await;
        state.select(&SelectRequest {
            all: Some(true),
            ..SelectRequest::default()
        });

        assert_eq!(state.bulk(BulkAction::Delete).await.unwrap(), 2);

        let requests = transport.requests();
        assert_eq!(requests[1].method, Method::Get);
        assert_eq!(requests[1].endpoint, "/scandelete");
        assert_eq!(requests[1].params.as_ref().unwrap()["id"], "a1,b2");
        assert_eq!(
            state.notices.take(),
            vec![crate::fetch::Notification::Success("Scans Deleted: a1, b2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_bulk_without_selection_is_guarded() {
        let (state, transport) = state(vec![Ok(Response::ok(TWO_SCANS))]);
        state.scan_list_page(None).await;

        assert_eq!(state.bulk(BulkAction::Stop).await.unwrap(), 0);
        assert_eq!(transport.requests().len(), 1);
        assert!(state.scan_list_page(None).await.contains("No scans selected"));
    }

    #[tokio::test]
    async fn test_reload_clears_selection() {
        let (state, _) = state(vec![Ok(Response::ok(TWO_SCANS)), Ok(Response::ok(TWO_SCANS))]);
        state.scan_list_page(None).await;
        let reply = state.select(&SelectRequest {
            index: Some(0),
            ..SelectRequest::default()
        });
        assert_eq!(reply.selected, vec!["a1"]);

        state.scan_list_page(None).await;

        assert!(state.select(&SelectRequest::default()).selected.is_empty());
    }

    #[test]
    fn test_posted_chart_replaces_slot() {
        let (state, _) = state(vec![]);

        state.render_chart(ChartKind::Bubble, r#"["a"]"#, None).unwrap();
        state.render_chart(ChartKind::Bubble, r#"["x", "y"]"#, None).unwrap();

        let html = state.chart_page(ChartKind::Bubble).unwrap();
        assert!(html.contains("data-tooltip=\" x&lt;br&gt;1 \""));
        assert!(!html.contains(" a&lt;br&gt;"));
        assert!(state.chart_page(ChartKind::Bar).is_none());
    }

    #[test]
    fn test_bar_links_to_discovery_for_scan() {
        let (state, _) = state(vec![]);
        let svg = state
            .render_chart(
                ChartKind::Bar,
                r#"[{"name": "IP_ADDRESS", "pct": 0.5, "counter": 1, "total": 2}]"#,
                Some("a1"),
            )
            .unwrap();

        assert!(svg.contains("data-link=\"/viz/discovery?id=a1&amp;eventType=IP_ADDRESS\""));
    }

    #[test]
    fn test_discovery_link_encodes_scan_id() {
        let (state, _) = state(vec![]);
        let svg = state
            .render_chart(
                ChartKind::Bar,
                r#"[{"name": "A&B", "pct": 1}]"#,
                Some("s#1"),
            )
            .unwrap();

        assert!(svg.contains("data-link=\"/viz/discovery?id=s%231&amp;eventType=A%26B\""));
    }

    #[test]
    fn test_toggle_theme_persists() {
        let fs = Arc::new(MockFs::new());
        let state = AppState::new(
            Arc::new(FakeTransport::default()),
            Config::default(),
            fs.clone(),
        )
        .unwrap();

        assert_eq!(state.toggle_theme().unwrap(), Theme::Dark);
        assert!(fs.files()[".reconview-prefs.toml"].contains("dark"));
        assert_eq!(state.theme(), Theme::Dark);
    }
}
