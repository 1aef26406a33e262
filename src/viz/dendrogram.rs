//! Left-to-right cluster dendrogram of an element-discovery tree.

use super::svg::num;
use super::{Anchor, Chart, ChartKind, Element, Shape};
use crate::analysis::TreeStats;
use crate::model::{DiscoveryTree, EventDetail, TreeNode};
use crate::render::markup::{remove_sfurl_tags, truncate};

const LEVEL_WIDTH: f64 = 170.0;
const LEAF_HEIGHT: f64 = 20.0;
const MIN_SIZE: f64 = 600.0;
const LABEL_GUTTER: f64 = 160.0;
const LEFT_INSET: f64 = 40.0;
const NODE_RADIUS: f64 = 4.5;
const LABEL_CHARS: usize = 20;
const POPUP_CHARS: usize = 200;

/// Canvas size for a tree: wide enough for every level, tall enough for
/// every leaf, never below the minimum.
pub fn canvas_size(root: &TreeNode) -> (f64, f64) {
    let stats = TreeStats::of(root);
    let width = (stats.depth as f64 * LEVEL_WIDTH).max(MIN_SIZE);
    let height = (stats.leaves as f64 * LEAF_HEIGHT).max(MIN_SIZE);
    (width, height)
}

pub fn render(input: &DiscoveryTree) -> Chart {
    let (width, height) = canvas_size(&input.tree);
    let mut chart = Chart::new(ChartKind::Dendrogram, width, height);
    chart.origin = (LEFT_INSET, 0.0);

    let nodes = cluster(&input.tree, height, width - LABEL_GUTTER);

    for node in &nodes {
        if let Some(parent) = node.parent {
            chart.push(Element::new(
                Shape::Path {
                    d: diagonal(&nodes[parent], node),
                },
                "dend-link",
            ));
        }
    }

    for node in &nodes {
        let detail = input.data.get(&node.name);

        let mut circle = Element::new(
            Shape::Circle {
                cx: node.y,
                cy: node.x,
                r: NODE_RADIUS,
            },
            "dend-node",
        );
        if let Some(detail) = detail {
            circle = circle.with_tooltip(popup(detail));
        }
        chart.push(circle);

        let dx = if node.depth == 0 {
            50.0
        } else if node.has_children {
            -8.0
        } else {
            8.0
        };
        chart.push(Element::new(
            Shape::Text {
                x: node.y + dx,
                y: node.x + 3.0,
                text: label(&node.name, detail),
                anchor: if node.has_children {
                    Anchor::End
                } else {
                    Anchor::Start
                },
                rotate: None,
            },
            "dend-label",
        ));
    }

    chart
}

/// Node label: the detail's data, cut to 20 characters, without URL tags.
/// Nodes without a detail row fall back to their name.
pub fn label(name: &str, detail: Option<&EventDetail>) -> String {
    match detail {
        Some(detail) => remove_sfurl_tags(&truncate(detail.data(), LABEL_CHARS)),
        None => name.to_string(),
    }
}

fn popup(detail: &EventDetail) -> String {
    let data = truncate(detail.data(), POPUP_CHARS)
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!(
        "<table><tr><td><b>Type:</b></td><td>{}</td></tr>\
         <tr><td><b>Source Module:</b></td><td>{}</td></tr>\
         <tr><td><b>Data:</b></td><td><pre>{}</pre></td></tr></table>",
        detail.event_type(),
        detail.module(),
        remove_sfurl_tags(&data)
    )
}

/// SVG cubic from parent to child, bending horizontally.
fn diagonal(source: &LaidOut, target: &LaidOut) -> String {
    let mid = (source.y + target.y) / 2.0;
    format!(
        "M{},{}C{},{} {},{} {},{}",
        num(source.y),
        num(source.x),
        num(mid),
        num(source.x),
        num(mid),
        num(target.x),
        num(target.y),
        num(target.x)
    )
}

/// Node position: `x` runs along the leaves (vertical on screen), `y` along
/// depth (horizontal on screen).
#[derive(Debug, Clone)]
struct LaidOut {
    name: String,
    depth: usize,
    parent: Option<usize>,
    has_children: bool,
    x: f64,
    y: f64,
}

/// Cluster layout: leaves evenly spaced (cousins twice as far apart as
/// siblings) and all aligned at the far edge; parents centred on their
/// children.
fn cluster(root: &TreeNode, breadth: f64, reach: f64) -> Vec<LaidOut> {
    let mut nodes = Vec::new();
    let mut previous_leaf: Option<usize> = None;
    place(root, None, 0, &mut nodes, &mut previous_leaf);

    let leaves: Vec<usize> = (0..nodes.len())
        .filter(|&i| !nodes[i].has_children)
        .collect();
    let (first, last) = match (leaves.first(), leaves.last()) {
        (Some(&f), Some(&l)) => (f, l),
        _ => return nodes,
    };

    let x0 = nodes[first].x - separation(&nodes, first, last) / 2.0;
    let x1 = nodes[last].x + separation(&nodes, last, first) / 2.0;
    let root_height = nodes[0].y;

    for node in &mut nodes {
        node.x = (node.x - x0) / (x1 - x0) * breadth;
        node.y = if root_height > 0.0 {
            (1.0 - node.y / root_height) * reach
        } else {
            reach
        };
    }
    nodes
}

/// Post-order placement. Before normalisation `y` holds the height above
/// the deepest leaf.
fn place(
    node: &TreeNode,
    parent: Option<usize>,
    depth: usize,
    nodes: &mut Vec<LaidOut>,
    previous_leaf: &mut Option<usize>,
) -> usize {
    let index = nodes.len();
    nodes.push(LaidOut {
        name: node.name.clone(),
        depth,
        parent,
        has_children: !node.is_leaf(),
        x: 0.0,
        y: 0.0,
    });

    if node.is_leaf() {
        let x = match *previous_leaf {
            Some(prev) => nodes[prev].x + separation(nodes, index, prev),
            None => 0.0,
        };
        nodes[index].x = x;
        *previous_leaf = Some(index);
    } else {
        let children: Vec<usize> = node
            .children()
            .iter()
            .map(|child| place(child, Some(index), depth + 1, nodes, previous_leaf))
            .collect();
        let count = children.len() as f64;
        nodes[index].x = children.iter().map(|&c| nodes[c].x).sum::<f64>() / count;
        nodes[index].y = 1.0 + children.iter().map(|&c| nodes[c].y).fold(0.0, f64::max);
    }
    index
}

fn separation(nodes: &[LaidOut], a: usize, b: usize) -> f64 {
    if nodes[a].parent == nodes[b].parent { 1.0 } else { 2.0 }
}
