use super::{Anchor, Chart, Element, Shape};
use crate::render::markup::escape;
use std::fmt::Write;

pub(super) fn render(chart: &Chart) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"chart chart-{}\" width=\"{}\" height=\"{}\">",
        chart.kind,
        num(chart.width),
        num(chart.height)
    );
    let _ = write!(
        out,
        "<g transform=\"translate({},{})\">",
        num(chart.origin.0),
        num(chart.origin.1)
    );
    for element in &chart.elements {
        render_element(&mut out, element);
    }
    out.push_str("</g></svg>");
    out
}

fn render_element(out: &mut String, element: &Element) {
    let mut attrs = format!(" class=\"{}\"", element.class);
    if let Some(fill) = &element.fill {
        let _ = write!(attrs, " style=\"fill:{}\"", escape(fill));
    }
    if let Some(tooltip) = &element.tooltip {
        let _ = write!(attrs, " data-tooltip=\"{}\"", escape(tooltip));
    }
    if let Some(link) = &element.link {
        let _ = write!(attrs, " data-link=\"{}\"", escape(link));
    }

    let _ = match &element.shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => write!(
            out,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}/>",
            num(*x),
            num(*y),
            num(*width),
            num(*height),
            attrs
        ),
        Shape::Circle { cx, cy, r } => write!(
            out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
            num(*cx),
            num(*cy),
            num(*r),
            attrs
        ),
        Shape::Line { x1, y1, x2, y2 } => write!(
            out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
            num(*x1),
            num(*y1),
            num(*x2),
            num(*y2),
            attrs
        ),
        Shape::Path { d } => write!(out, "<path d=\"{}\"{}/>", d, attrs),
        Shape::Text {
            x,
            y,
            text,
            anchor,
            rotate,
        } => {
            let anchor = match anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            };
            let transform = rotate
                .map(|deg| format!(" transform=\"rotate({},{},{})\"", num(deg), num(*x), num(*y)))
                .unwrap_or_default();
            write!(
                out,
                "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\"{}{}>{}</text>",
                num(*x),
                num(*y),
                anchor,
                transform,
                attrs,
                escape(text)
            )
        }
    };
}

/// Coordinates with at most two decimals and no trailing zeros.
pub(super) fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{:.2}", rounded);
        s.trim_end_matches('0').to_string()
    }
}
