//! Chart scenes: bar, dendrogram, and bubble charts.
//!
//! A renderer turns input data into a [`Chart`], a flat list of positioned
//! shapes. Each shape can carry tooltip HTML and a navigation target. The
//! same scene is rendered to SVG for the browser and hit-tested directly for
//! pointer handling, so hover and click behaviour is testable without a DOM.

pub mod bar;
pub mod bubble;
pub mod dendrogram;
mod svg;
mod tooltip;

pub use tooltip::{Tooltip, TooltipPanel};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Tooltip position relative to the pointer.
pub const TOOLTIP_OFFSET: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ChartKind {
    Bar,
    Dendrogram,
    Bubble,
}

impl ChartKind {
    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Dendrogram => "dendrogram",
            ChartKind::Bubble => "bubble",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        [ChartKind::Bar, ChartKind::Dendrogram, ChartKind::Bubble]
            .into_iter()
            .find(|k| k.name() == name)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid {kind} chart input: {source}")]
    Decode {
        kind: ChartKind,
        #[source]
        source: serde_json::Error,
    },
}

impl ChartError {
    pub(crate) fn decode(kind: ChartKind) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| ChartError::Decode { kind, source }
    }
}

/// Chart dimensions that are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ChartSettings {
    pub bar_width: f64,
    pub bar_height: f64,
    pub bubble_diameter: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            bar_width: 1100.0,
            bar_height: 520.0,
            bubble_diameter: 900.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Path {
        d: String,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        anchor: Anchor,
        /// Rotation in degrees around (x, y).
        rotate: Option<f64>,
    },
}

impl Shape {
    fn contains(&self, x: f64, y: f64) -> bool {
        match *self {
            Shape::Rect {
                x: rx,
                y: ry,
                width,
                height,
            } => x >= rx && x <= rx + width && y >= ry && y <= ry + height,
            Shape::Circle { cx, cy, r } => (x - cx).powi(2) + (y - cy).powi(2) <= r * r,
            Shape::Line { .. } | Shape::Path { .. } | Shape::Text { .. } => false,
        }
    }
}

/// A shape plus its styling and interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub shape: Shape,
    pub class: &'static str,
    pub fill: Option<String>,
    /// HTML shown in the tooltip while hovered.
    pub tooltip: Option<String>,
    /// Navigation target passed to the click callback.
    pub link: Option<String>,
}

impl Element {
    pub fn new(shape: Shape, class: &'static str) -> Self {
        Self {
            shape,
            class,
            fill: None,
            tooltip: None,
            link: None,
        }
    }

    pub fn with_tooltip(mut self, html: String) -> Self {
        self.tooltip = Some(html);
        self
    }

    pub fn with_link(mut self, link: String) -> Self {
        self.link = Some(link);
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }
}

/// A rendered chart. Coordinates of elements are relative to `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub width: f64,
    pub height: f64,
    pub origin: (f64, f64),
    pub elements: Vec<Element>,
}

impl Chart {
    pub fn new(kind: ChartKind, width: f64, height: f64) -> Self {
        Self {
            kind,
            width,
            height,
            origin: (0.0, 0.0),
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Topmost interactive element under a point in SVG coordinates.
    pub fn hit(&self, x: f64, y: f64) -> Option<&Element> {
        let (x, y) = (x - self.origin.0, y - self.origin.1);
        self.elements
            .iter()
            .rev()
            .filter(|e| e.tooltip.is_some() || e.link.is_some())
            .find(|e| e.shape.contains(x, y))
    }

    /// Pointer moved to `(x, y)` in chart space, `(page_x, page_y)` on the page.
    /// Shows the hovered element's tooltip or hides the panel.
    pub fn pointer_move(
        &self,
        x: f64,
        y: f64,
        page_x: f64,
        page_y: f64,
        tooltip: &mut dyn Tooltip,
    ) -> bool {
        match self.hit(x, y).and_then(|e| e.tooltip.as_deref()) {
            Some(html) => {
                tooltip.show(html, page_x + TOOLTIP_OFFSET, page_y + TOOLTIP_OFFSET);
                true
            }
            None => {
                tooltip.hide();
                false
            }
        }
    }

    /// Pointer pressed at `(x, y)`. A linked element hides the tooltip and
    /// calls `navigate` with its target.
    pub fn pointer_down(
        &self,
        x: f64,
        y: f64,
        tooltip: &mut dyn Tooltip,
        navigate: &mut dyn FnMut(&str),
    ) -> bool {
        match self.hit(x, y).and_then(|e| e.link.as_deref()) {
            Some(link) => {
                tooltip.hide();
                navigate(link);
                true
            }
            None => false,
        }
    }

    pub fn to_svg(&self) -> String {
        svg::render(self)
    }
}

/// Charts mounted by target id. Mounting replaces whatever the target held.
#[derive(Debug, Default)]
pub struct ChartBoard {
    slots: BTreeMap<String, Chart>,
}

impl ChartBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `chart` at `target`, returning the chart it replaced.
    pub fn mount(&mut self, target: impl Into<String>, chart: Chart) -> Option<Chart> {
        self.slots.insert(target.into(), chart)
    }

    pub fn get(&self, target: &str) -> Option<&Chart> {
        self.slots.get(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_with_box() -> Chart {
        let mut chart = Chart::new(ChartKind::Bar, 100.0, 100.0);
        chart.origin = (10.0, 10.0);
        chart.push(
            Element::new(
                Shape::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: 20.0,
                    height: 20.0,
                },
                "bar",
            )
            .with_tooltip("box".to_string())
            .with_link("target".to_string()),
        );
        chart
    }

    #[test]
    fn test_hover_shows_then_hides_tooltip() {
        let chart = chart_with_box();
        let mut panel = TooltipPanel::default();

        assert!(chart.pointer_move(15.0, 15.0, 200.0, 300.0, &mut panel));
        assert!(panel.is_visible());
        assert_eq!(panel.content(), "box");
        assert_eq!(panel.position(), (210.0, 310.0));

        assert!(!chart.pointer_move(90.0, 90.0, 0.0, 0.0, &mut panel));
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_click_navigates_and_hides() {
        let chart = chart_with_box();
        let mut panel = TooltipPanel::default();
        let mut visited = Vec::new();

        chart.pointer_move(12.0, 12.0, 0.0, 0.0, &mut panel);
        let hit = chart.pointer_down(12.0, 12.0, &mut panel, &mut |link: &str| visited.push(link.to_string()));

        assert!(hit);
        assert_eq!(visited, vec!["target"]);
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_click_outside_does_nothing() {
        let chart = chart_with_box();
        let mut panel = TooltipPanel::default();
        let mut calls = 0;

        assert!(!chart.pointer_down(5.0, 5.0, &mut panel, &mut |_: &str| calls += 1));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_board_mount_replaces() {
        let mut board = ChartBoard::new();
        assert!(board.mount("main", Chart::new(ChartKind::Bar, 1.0, 1.0)).is_none());

        let replaced = board.mount("main", Chart::new(ChartKind::Bubble, 2.0, 2.0));

        assert_eq!(replaced.unwrap().kind, ChartKind::Bar);
        assert_eq!(board.get("main").unwrap().kind, ChartKind::Bubble);
        assert!(board.get("other").is_none());
    }
}
