//! Vertical bar chart of per-type percentages.

use super::{Anchor, Chart, ChartKind, ChartSettings, Element, Shape};
use crate::render::markup::escape;
use serde::{Deserialize, Deserializer};

/// One bar. `pct` is a fraction (0.25 means 25%) and may arrive as a JSON
/// number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BarRecord {
    pub name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub pct: f64,
    #[serde(default)]
    pub counter: u64,
    #[serde(default)]
    pub total: u64,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    // Unparseable strings become 0, as numeric coercion would give NaN and
    // draw nothing.
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
    })
}

struct Margin {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

const MARGIN: Margin = Margin {
    top: 20.0,
    right: 20.0,
    bottom: 220.0,
    left: 60.0,
};

const BAND_PADDING: f64 = 0.1;
const Y_TICKS: usize = 5;

/// Lay out one bar per record, heights scaled to the largest percentage.
///
/// `link_for` supplies the click target for each record; records for which
/// it returns `None` are not clickable.
pub fn render<F>(records: &[BarRecord], settings: &ChartSettings, link_for: F) -> Chart
where
    F: Fn(&BarRecord) -> Option<String>,
{
    let width = (settings.bar_width - MARGIN.left - MARGIN.right).max(0.0);
    let height = (settings.bar_height - MARGIN.top - MARGIN.bottom).max(0.0);

    let mut chart = Chart::new(ChartKind::Bar, settings.bar_width, settings.bar_height);
    chart.origin = (MARGIN.left, MARGIN.top);

    let max = records
        .iter()
        .map(|r| r.pct * 100.0)
        .fold(0.0_f64, f64::max);
    let scale_y = |value: f64| {
        if max > 0.0 {
            height - value / max * height
        } else {
            height
        }
    };

    let bands = Bands::new(records.len(), width);

    for (i, record) in records.iter().enumerate() {
        let x = bands.start(i);
        let y = scale_y(record.pct * 100.0);

        let mut bar = Element::new(
            Shape::Rect {
                x,
                y,
                width: bands.band,
                height: height - y,
            },
            "bar",
        )
        .with_tooltip(popup(record));
        if let Some(link) = link_for(record) {
            bar = bar.with_link(link);
        }
        chart.push(bar);

        chart.push(Element::new(
            Shape::Text {
                x: x + bands.band / 2.0,
                y: height + 12.0,
                text: record.name.clone(),
                anchor: Anchor::End,
                rotate: Some(-45.0),
            },
            "axis-label",
        ));
    }

    push_axes(&mut chart, width, height, max, scale_y);
    chart
}

fn push_axes(chart: &mut Chart, width: f64, height: f64, max: f64, scale_y: impl Fn(f64) -> f64) {
    chart.push(Element::new(
        Shape::Line {
            x1: 0.0,
            y1: height,
            x2: width,
            y2: height,
        },
        "axis x",
    ));
    chart.push(Element::new(
        Shape::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: height,
        },
        "axis y",
    ));

    if max > 0.0 {
        for tick in 0..=Y_TICKS {
            let value = max * tick as f64 / Y_TICKS as f64;
            let y = scale_y(value);
            chart.push(Element::new(
                Shape::Line {
                    x1: -6.0,
                    y1: y,
                    x2: 0.0,
                    y2: y,
                },
                "tick",
            ));
            chart.push(Element::new(
                Shape::Text {
                    x: -9.0,
                    y: y + 3.0,
                    text: format_tick(value),
                    anchor: Anchor::End,
                    rotate: None,
                },
                "tick-label",
            ));
        }
    }

    chart.push(Element::new(
        Shape::Text {
            x: -50.0,
            y: 6.0,
            text: "Percentage of Unique Elements".to_string(),
            anchor: Anchor::End,
            rotate: Some(-90.0),
        },
        "axis-title",
    ));
}

fn format_tick(value: f64) -> String {
    if value >= 10.0 || value == value.trunc() {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn popup(record: &BarRecord) -> String {
    format!(
        "<table><tr><td><b>Type:</b></td><td>{}</td></tr>\
         <tr><td><b>Unique Elements:</b></td><td>{}</td></tr>\
         <tr><td><b>Total Elements:</b></td><td>{}</td></tr></table>",
        escape(&record.name),
        record.counter,
        record.total
    )
}

/// Evenly spaced bands with rounded pixel positions and equal inner and
/// outer padding.
struct Bands {
    offset: f64,
    step: f64,
    band: f64,
}

impl Bands {
    fn new(count: usize, width: f64) -> Self {
        if count == 0 {
            return Self {
                offset: 0.0,
                step: 0.0,
                band: 0.0,
            };
        }
        let n = count as f64;
        let step = (width / (n + BAND_PADDING)).floor();
        let error = width - (n - BAND_PADDING) * step;
        Self {
            offset: (error / 2.0).round(),
            step,
            band: (step * (1.0 - BAND_PADDING)).round(),
        }
    }

    fn start(&self, index: usize) -> f64 {
        self.offset + self.step * index as f64
    }
}
