//! Scan-list view state: active filter, checked rows, theme.
//!
//! Transitions are plain methods on an owned value so the dashboard and the
//! tests drive the same logic.

use crate::model::{ScanRow, ScanStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScanFilter {
    #[default]
    All,
    Running,
    Finished,
    Failed,
}

impl ScanFilter {
    /// Label shown on the filter button.
    pub fn label(self) -> &'static str {
        match self {
            ScanFilter::All => "None",
            ScanFilter::Running => "Running",
            ScanFilter::Finished => "Finished",
            ScanFilter::Failed => "Failed/Aborted",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ScanFilter::All => "all",
            ScanFilter::Running => "running",
            ScanFilter::Finished => "finished",
            ScanFilter::Failed => "failed",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        [
            ScanFilter::All,
            ScanFilter::Running,
            ScanFilter::Finished,
            ScanFilter::Failed,
        ]
        .into_iter()
        .find(|f| f.key() == key)
    }

    /// Statuses kept by this filter; `None` keeps everything.
    pub fn shown(self) -> Option<&'static [&'static str]> {
        match self {
            ScanFilter::All => None,
            ScanFilter::Running => Some(&ScanStatus::IN_PROGRESS),
            ScanFilter::Finished => Some(&[ScanStatus::FINISHED]),
            ScanFilter::Failed => Some(&[ScanStatus::ABORTED, ScanStatus::FAILED]),
        }
    }

    /// Exclusion set for the table renderer: every status present in `rows`
    /// that this filter does not keep.
    pub fn exclusions(self, rows: &[ScanRow]) -> Option<HashSet<String>> {
        let shown = self.shown()?;
        Some(
            rows.iter()
                .map(|row| row.status.as_str())
                .filter(|status| !shown.contains(status))
                .map(str::to_string)
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Text on the theme toggler: the mode a click switches to.
    pub fn toggler_text(self) -> &'static str {
        match self {
            Theme::Light => "Dark Mode",
            Theme::Dark => "Light Mode",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "light-theme",
            Theme::Dark => "dark-theme",
        }
    }
}

/// State behind one scan-list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanListView {
    pub filter: ScanFilter,
    pub theme: Theme,
    selection: BTreeSet<String>,
    last_checked: Option<usize>,
}

impl ScanListView {
    pub fn new(filter: ScanFilter, theme: Theme) -> Self {
        Self {
            filter,
            theme,
            ..Self::default()
        }
    }

    /// Change filter; this is a full reload so the selection is dropped.
    pub fn set_filter(&mut self, filter: ScanFilter) {
        self.filter = filter;
        self.reload();
    }

    pub fn reload(&mut self) {
        self.selection.clear();
        self.last_checked = None;
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Click on the checkbox at `index` of the visible `ids`.
    ///
    /// With `shift` held and an earlier click recorded, every row between the
    /// two clicks takes the state of the earlier clicked row.
    pub fn click(&mut self, ids: &[String], index: usize, shift: bool) {
        let Some(id) = ids.get(index) else {
            return;
        };
        if !self.selection.remove(id) {
            self.selection.insert(id.clone());
        }

        if shift {
            if let Some(last) = self.last_checked.filter(|&last| last < ids.len()) {
                let checked = self.selection.contains(&ids[last]);
                let (start, end) = (index.min(last), index.max(last));
                for id in &ids[start..=end] {
                    if checked {
                        self.selection.insert(id.clone());
                    } else {
                        self.selection.remove(id);
                    }
                }
            }
        }
        self.last_checked = Some(index);
    }

    pub fn set_all(&mut self, ids: &[String], checked: bool) {
        if checked {
            self.selection.extend(ids.iter().cloned());
        } else {
            self.selection.clear();
        }
    }

    /// Checked ids in `ids` order, or `None` when nothing is checked.
    pub fn selected(&self, ids: &[String]) -> Option<Vec<String>> {
        let picked: Vec<String> = ids
            .iter()
            .filter(|id| self.selection.contains(*id))
            .cloned()
            .collect();
        if picked.is_empty() { None } else { Some(picked) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("s{}", i)).collect()
    }

    fn row(status: &str) -> ScanRow {
        serde_json::from_value(serde_json::json!(["id", "n", "t", "c", "s", "f", status, 0])).unwrap()
    }

    #[test]
    fn test_shift_click_selects_range() {
        let ids = ids(6);
        let mut view = ScanListView::default();

        view.click(&ids, 1, false);
        view.click(&ids, 4, true);

        assert_eq!(
            view.selected(&ids).unwrap(),
            vec!["s1", "s2", "s3", "s4"]
        );
    }

    #[test]
    fn test_shift_click_clears_range_when_anchor_unchecked() {
        let ids = ids(5);
        let mut view = ScanListView::default();
        view.set_all(&ids, true);

        view.click(&ids, 3, false); // uncheck s3, anchor there
        view.click(&ids, 0, true);

        assert_eq!(view.selected(&ids).unwrap(), vec!["s4"]);
    }

    #[test]
    fn test_plain_click_toggles() {
        let ids = ids(3);
        let mut view = ScanListView::default();

        view.click(&ids, 2, false);
        assert!(view.is_checked("s2"));
        view.click(&ids, 2, false);
        assert!(view.selected(&ids).is_none());
    }

    #[test]
    fn test_filter_change_clears_selection() {
        let ids = ids(3);
        let mut view = ScanListView::default();
        view.set_all(&ids, true);

        view.set_filter(ScanFilter::Running);

        assert!(view.selected(&ids).is_none());
        assert_eq!(view.filter, ScanFilter::Running);
    }

    #[test]
    fn test_filter_exclusions() {
        let rows = vec![row("FINISHED"), row("RUNNING"), row("ABORTED"), row("STARTING")];

        assert!(ScanFilter::All.exclusions(&rows).is_none());

        let excluded = ScanFilter::Running.exclusions(&rows).unwrap();
        assert!(excluded.contains("FINISHED"));
        assert!(excluded.contains("ABORTED"));
        assert!(!excluded.contains("RUNNING"));
        assert!(!excluded.contains("STARTING"));
    }

    #[test]
    fn test_filter_keys_round_trip() {
        for filter in [ScanFilter::All, ScanFilter::Running, ScanFilter::Finished, ScanFilter::Failed] {
            assert_eq!(ScanFilter::parse(filter.key()), Some(filter));
        }
        assert_eq!(ScanFilter::parse("bogus"), None);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggler_text(), "Light Mode");
    }
}
