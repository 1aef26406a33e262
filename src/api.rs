//! Library entry points for reconview.
//!
//! The CLI and the dashboard both go through these functions; they return
//! `Result`s instead of printing, so embedding code can handle failures.
//!
//! # Example
//!
//! ```
//! use reconview::{ChartKind, ChartSettings, render_chart};
//!
//! let chart = render_chart(ChartKind::Bubble, r#"["foo", "Foo", "bar"]"#, &ChartSettings::default())?;
//! assert_eq!(chart.elements.iter().filter(|e| e.class == "node").count(), 2);
//! # Ok::<(), reconview::ReconviewError>(())
//! ```

use crate::analysis::TreeStats;
use crate::config::ConfigError;
use crate::fetch::FetchError;
use crate::model::{DiscoveryTree, ScanRow};
use crate::prefs::PrefsError;
use crate::render::{RenderedTable, ScanTable};
use crate::view::ScanFilter;
use crate::viz::bar::{self, BarRecord};
use crate::viz::{Chart, ChartError, ChartKind, ChartSettings, bubble, dendrogram};
use thiserror::Error;

/// Errors surfaced by the library API.
#[derive(Debug, Error)]
pub enum ReconviewError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Preferences error: {0}")]
    Prefs(#[from] PrefsError),

    #[error("Backend request failed: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    /// Scan list JSON that is not a list of scan rows.
    #[error("Invalid scan list: {0}")]
    ScanList(serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders chart input JSON. Bars rendered this way are not clickable; use
/// [`render_bar_chart`] to attach links.
pub fn render_chart(
    kind: ChartKind,
    input: &str,
    settings: &ChartSettings,
) -> Result<Chart, ReconviewError> {
    let chart = match kind {
        ChartKind::Bar => render_bar_chart(input, settings, |_| None)?,
        ChartKind::Dendrogram => dendrogram::render(&load_tree(input)?),
        ChartKind::Bubble => {
            let words: Vec<String> =
                serde_json::from_str(input).map_err(ChartError::decode(ChartKind::Bubble))?;
            bubble::render(&words, settings)
        }
    };
    Ok(chart)
}

pub fn render_bar_chart<F>(
    input: &str,
    settings: &ChartSettings,
    link_for: F,
) -> Result<Chart, ReconviewError>
where
    F: Fn(&BarRecord) -> Option<String>,
{
    let records: Vec<BarRecord> =
        serde_json::from_str(input).map_err(ChartError::decode(ChartKind::Bar))?;
    Ok(bar::render(&records, settings, link_for))
}

/// Parses `{tree, data}` discovery JSON. A bare tree without `data` is
/// accepted too.
pub fn load_tree(input: &str) -> Result<DiscoveryTree, ReconviewError> {
    let tree = serde_json::from_str::<DiscoveryTree>(input)
        .or_else(|_| {
            serde_json::from_str(input).map(|tree| DiscoveryTree {
                tree,
                data: Default::default(),
            })
        })
        .map_err(ChartError::decode(ChartKind::Dendrogram))?;
    Ok(tree)
}

pub fn tree_stats(input: &str) -> Result<TreeStats, ReconviewError> {
    Ok(TreeStats::of(&load_tree(input)?.tree))
}

pub fn parse_scan_rows(input: &str) -> Result<Vec<ScanRow>, ReconviewError> {
    serde_json::from_str(input).map_err(ReconviewError::ScanList)
}

/// Scan table with `filter` applied, links rooted at `docroot`.
pub fn scan_table(rows: &[ScanRow], filter: ScanFilter, docroot: &str) -> RenderedTable {
    let exclude = filter.exclusions(rows);
    ScanTable::new(docroot).render_table(rows, exclude.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_tree_accepted() {
        let stats = tree_stats(r#"{"name": "root", "children": [{"name": "a"}, {"name": "b"}]}"#).unwrap();
        assert_eq!((stats.leaves, stats.total, stats.depth), (2, 3, 1));
    }

    #[test]
    fn test_malformed_tree_rejected() {
        let err = load_tree(r#"{"children": []}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid dendrogram chart input"));
    }

    #[test]
    fn test_bar_input_must_be_list() {
        let err = render_chart(ChartKind::Bar, "{}", &ChartSettings::default()).unwrap_err();
        assert!(matches!(err, ReconviewError::Chart(_)));
    }

    #[test]
    fn test_scan_table_applies_filter() {
        let rows = parse_scan_rows(
            r#"[["1","a","t","c","s","f","FINISHED",3],["2","b","t","c","s","f","RUNNING",0]]"#,
        )
        .unwrap();

        let table = scan_table(&rows, ScanFilter::Running, "");

        assert_eq!(table.ids, vec!["2"]);
        assert_eq!(table.skipped, 1);
    }
}
