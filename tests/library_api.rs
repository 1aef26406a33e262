//! Integration tests for the reconview library API.

use async_trait::async_trait;
use reconview::analysis::{count_frequencies, count_leaves, count_total, max_depth};
use reconview::fetch::{FetchAdapter, FetchError, Request, Response, Transport};
use reconview::model::{ScanRow, TreeNode};
use reconview::render::ScanTable;
use reconview::viz::{Shape, TooltipPanel};
use reconview::{ChartKind, ChartSettings, ReconviewError, render_bar_chart, render_chart};
use std::cell::Cell;
use std::collections::HashSet;
use std::sync::Mutex;

fn uniform(depth: usize, fan_out: usize) -> TreeNode {
    if depth == 0 {
        TreeNode::leaf("leaf")
    } else {
        TreeNode::branch("node", (0..fan_out).map(|_| uniform(depth - 1, fan_out)).collect())
    }
}

#[test]
fn test_tree_metrics_on_uniform_tree() {
    let root = [uniform(3, 2)];

    assert_eq!(count_leaves(&root), 8);
    assert_eq!(count_total(&root), 15);
    assert_eq!(max_depth(&root, 0, 0), 3);
}

#[test]
fn test_tree_metrics_on_empty_forest() {
    assert_eq!(count_leaves(&[]), 0);
    assert_eq!(count_total(&[]), 0);
    assert_eq!(max_depth(&[], 0, 0), 0);
}

#[test]
fn test_table_excludes_finished() {
    let rows: Vec<ScanRow> = serde_json::from_str(
        r#"[["1","done","a.com","c","s","f","FINISHED",4,{"HIGH":2}],
            ["2","live","b.com","c","s","","RUNNING",0]]"#,
    )
    .unwrap();
    let exclude: HashSet<String> = ["FINISHED".to_string()].into();

    let table = ScanTable::new("").render_rows(&rows, Some(&exclude));

    assert_eq!(table.skipped, 1);
    assert_eq!(table.ids, vec!["2"]);
    assert!(table.html.contains("live"));
    assert!(!table.html.contains("done"));
    assert!(table.html.contains("stopScan"));
}

#[test]
fn test_bubble_frequencies() {
    let counts: Vec<(String, usize)> = count_frequencies(["foo", "Foo", "bar", ""])
        .into_iter()
        .map(|w| (w.word, w.count))
        .collect();

    assert_eq!(counts, vec![("foo".to_string(), 2), ("bar".to_string(), 1)]);
}

#[test]
fn test_bar_hover_and_click() {
    let chart = render_bar_chart(
        r#"[{"name": "IP_ADDRESS", "pct": "0.75", "counter": 3, "total": 4},
            {"name": "DOMAIN_NAME", "pct": 0.25, "counter": 1, "total": 1}]"#,
        &ChartSettings::default(),
        |record| Some(format!("/types/{}", record.name)),
    )
    .unwrap();

    let (x, y) = chart
        .elements
        .iter()
        .find_map(|e| match e.shape {
            Shape::Rect { x, y, width, height } if e.link.is_some() => {
                Some((chart.origin.0 + x + width / 2.0, chart.origin.1 + y + height / 2.0))
            }
            _ => None,
        })
        .unwrap();

    let mut panel = TooltipPanel::default();
    assert!(chart.pointer_move(x, y, 100.0, 200.0, &mut panel));
    assert!(panel.is_visible());
    assert_eq!(panel.position(), (110.0, 210.0));
    assert!(panel.content().contains("IP_ADDRESS"));

    let mut visited = Vec::new();
    assert!(chart.pointer_down(x, y, &mut panel, &mut |link: &str| visited.push(link.to_string())));
    assert_eq!(visited, vec!["/types/IP_ADDRESS"]);
    assert!(!panel.is_visible());

    chart.pointer_move(-50.0, -50.0, 0.0, 0.0, &mut panel);
    assert!(!panel.is_visible());
}

#[test]
fn test_dendrogram_canvas_grows_with_tree() {
    let chart = render_chart(
        ChartKind::Dendrogram,
        &serde_json::json!({ "tree": uniform(5, 3), "data": {} }).to_string(),
        &ChartSettings::default(),
    )
    .unwrap();

    assert_eq!(chart.width, 850.0);
    assert_eq!(chart.height, 243.0 * 20.0);
}

#[test]
fn test_invalid_chart_input() {
    let result = render_chart(ChartKind::Bubble, "not json", &ChartSettings::default());

    match result {
        Err(ReconviewError::Chart(_)) => {}
        Err(e) => panic!("Expected chart error, got: {:?}", e),
        Ok(_) => panic!("Expected error for invalid input"),
    }
}

/// Transport that always fails, recording what it was asked.
#[derive(Default)]
struct Unreachable {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl Transport for Unreachable {
    async fn send(&self, request: &Request) -> Result<Response, FetchError> {
        self.seen.lock().unwrap().push(request.to_string());
        Err(FetchError::Transport("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_failed_delete_runs_error_path_once() {
    let adapter = FetchAdapter::new(Unreachable::default());
    let successes = Cell::new(0);
    let errors = Cell::new(0);

    adapter
        .fetch_with(
            "/scandelete?id=123",
            None,
            |_| successes.set(successes.get() + 1),
            |message| {
                assert_eq!(message, "network error: connection refused");
                errors.set(errors.get() + 1);
            },
        )
        .await;

    assert_eq!(successes.get(), 0);
    assert_eq!(errors.get(), 1);
    assert_eq!(adapter.transport().seen.lock().unwrap().len(), 1);
}
