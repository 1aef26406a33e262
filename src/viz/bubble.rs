//! Bubble chart of value frequencies.

use super::{Anchor, Chart, ChartKind, ChartSettings, Element, Shape};
use crate::analysis::{WordCount, count_frequencies};
use crate::render::markup::{escape, prefix};

const PADDING: f64 = 1.5;
const SPIRAL_STEP: f64 = 0.1;
const SPIRAL_GROWTH: f64 = 0.2;

/// Twenty-colour categorical palette, cycled by first-seen order.
const PALETTE: [&str; 20] = [
    "#3182bd", "#6baed6", "#9ecae1", "#c6dbef", "#e6550d", "#fd8d3c", "#fdae6b", "#fdd0a2",
    "#31a354", "#74c476", "#a1d99b", "#c7e9c0", "#756bb1", "#9e9ac8", "#bcbddc", "#dadaeb",
    "#636363", "#969696", "#bdbdbd", "#d9d9d9",
];

/// A packed circle for one distinct value.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub word: String,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

pub fn render<S: AsRef<str>>(items: &[S], settings: &ChartSettings) -> Chart {
    let diameter = settings.bubble_diameter;
    let mut chart = Chart::new(ChartKind::Bubble, diameter, diameter);

    let counts = count_frequencies(items.iter().map(<S as AsRef<str>>::as_ref));
    for (i, bubble) in pack(&counts, diameter).into_iter().enumerate() {
        let fill = PALETTE[i % PALETTE.len()];
        chart.push(
            Element::new(
                Shape::Circle {
                    cx: bubble.x,
                    cy: bubble.y,
                    r: bubble.r,
                },
                "node",
            )
            .with_fill(fill)
            .with_tooltip(format!(" {}<br>{} ", escape(&bubble.word), bubble.count)),
        );

        let text = prefix(&bubble.word, (bubble.r / 3.0) as usize);
        if !text.is_empty() {
            chart.push(Element::new(
                Shape::Text {
                    x: bubble.x,
                    y: bubble.y + 3.0,
                    text: text.to_string(),
                    anchor: Anchor::Middle,
                    rotate: None,
                },
                "bubble-label",
            ));
        }
    }
    chart
}

/// Pack one circle per count into a `diameter` square. Circle area is
/// proportional to the count. Circles are placed largest first along an
/// outward spiral, then the whole layout is scaled to fit.
pub fn pack(counts: &[WordCount], diameter: f64) -> Vec<Bubble> {
    let mut placed: Vec<Bubble> = Vec::with_capacity(counts.len());
    // Radii only shrink along `counts`, so each search resumes where the
    // previous circle landed instead of walking the spiral from the centre.
    let mut t = 0.0;

    for entry in counts {
        let r = (entry.count as f64).sqrt();
        let (x, y) = if placed.is_empty() {
            (0.0, 0.0)
        } else {
            let (x, y, at) = spiral_slot(&placed, r, t);
            t = at;
            (x, y)
        };
        placed.push(Bubble {
            word: entry.word.clone(),
            count: entry.count,
            x,
            y,
            r,
        });
    }

    let extent = placed
        .iter()
        .map(|b| (b.x.abs() + b.r).max(b.y.abs() + b.r))
        .fold(0.0_f64, f64::max);
    if extent == 0.0 {
        return placed;
    }

    let centre = diameter / 2.0;
    let scale = centre / extent;
    for bubble in &mut placed {
        bubble.x = centre + bubble.x * scale;
        bubble.y = centre + bubble.y * scale;
        bubble.r = (bubble.r * scale - PADDING / 2.0).max(0.0);
    }
    placed
}

/// First point along the spiral, from parameter `t` outward, where a
/// circle of radius `r` overlaps nothing already placed. Returns the point
/// and its spiral parameter.
///
/// Steps are capped at about half a radius of arc length so no slot wider
/// than the circle is jumped over.
fn spiral_slot(placed: &[Bubble], r: f64, mut t: f64) -> (f64, f64, f64) {
    let gap = r * 0.05;
    loop {
        let distance = SPIRAL_GROWTH * t;
        let (x, y) = (distance * t.cos(), distance * t.sin());
        // Most recent circles are the likeliest to collide.
        let clear = placed.iter().rev().all(|b| {
            let min = b.r + r + gap;
            (b.x - x).powi(2) + (b.y - y).powi(2) >= min * min
        });
        if clear {
            return (x, y, t);
        }
        t += if distance > 0.0 {
            SPIRAL_STEP.min(r / 2.0 / distance)
        } else {
            SPIRAL_STEP
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlaps(a: &Bubble, b: &Bubble) -> bool {
        let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
        d + 1e-6 < a.r + b.r
    }

    #[test]
    fn test_counts_drive_bubbles() {
        let chart = render(&["foo", "Foo", "bar"], &ChartSettings::default());
        let circles: Vec<(&str, f64)> = chart
            .elements
            .iter()
            .filter_map(|e| match e.shape {
                Shape::Circle { r, .. } => Some((e.tooltip.as_deref().unwrap_or(""), r)),
                _ => None,
            })
            .collect();

        assert_eq!(circles.len(), 2);
        assert_eq!(circles[0].0, " foo<br>2 ");
        assert_eq!(circles[1].0, " bar<br>1 ");
        assert!(circles[0].1 > circles[1].1);
    }

    #[test]
    fn test_pack_fits_and_does_not_overlap() {
        let words: Vec<String> = (0..30)
            .flat_map(|i| std::iter::repeat(format!("w{}", i)).take(i % 7 + 1))
            .collect();
        let counts = count_frequencies(&words);
        let bubbles = pack(&counts, 900.0);

        assert_eq!(bubbles.len(), 30);
        for (i, a) in bubbles.iter().enumerate() {
            assert!(a.x - a.r >= -1e-6 && a.x + a.r <= 900.0 + 1e-6, "{} out of bounds", a.word);
            assert!(a.y - a.r >= -1e-6 && a.y + a.r <= 900.0 + 1e-6, "{} out of bounds", a.word);
            for b in &bubbles[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn test_many_unique_values_pack_without_overlap() {
        let words: Vec<String> = (0..2000)
            .map(|i| format!("host{}.example.com", i))
            .chain(["popular"; 40].iter().map(|s| s.to_string()))
            .collect();
        let bubbles = pack(&count_frequencies(&words), 900.0);

        assert_eq!(bubbles.len(), 2001);
        assert_eq!(bubbles[0].word, "popular");
        for (i, a) in bubbles.iter().enumerate() {
            assert!(a.x - a.r >= -1e-6 && a.x + a.r <= 900.0 + 1e-6, "{} out of bounds", a.word);
            assert!(a.y - a.r >= -1e-6 && a.y + a.r <= 900.0 + 1e-6, "{} out of bounds", a.word);
            for b in &bubbles[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn test_single_value_fills_canvas() {
        let bubbles = pack(&count_frequencies(["only"]), 900.0);
        assert_eq!(bubbles[0].x, 450.0);
        assert!((bubbles[0].r - (450.0 - PADDING / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_label_truncated_to_radius() {
        let mut items: Vec<String> = vec!["a-very-long-value-that-cannot-fit".to_string()];
        items.extend((0..200).map(|i| format!("filler{}", i)));
        let chart = render(&items, &ChartSettings::default());

        for e in &chart.elements {
            if let Shape::Text { text, .. } = &e.shape {
                assert!(text.chars().count() <= 33);
            }
        }
        let circle_r = chart
            .elements
            .iter()
            .find_map(|e| match e.shape {
                Shape::Circle { r, .. } if e.tooltip.as_deref().is_some_and(|t| t.contains("a-very")) => Some(r),
                _ => None,
            })
            .unwrap();
        let label = chart.elements.iter().find_map(|e| match &e.shape {
            Shape::Text { text, .. } if "a-very-long-value-that-cannot-fit".starts_with(text.as_str()) => {
                Some(text.clone())
            }
            _ => None,
        });
        let expected = (circle_r / 3.0) as usize;
        match label {
            Some(text) => assert_eq!(text.chars().count(), expected.min(33)),
            None => assert_eq!(expected, 0),
        }
    }

    #[test]
    fn test_empty_input() {
        let chart = render::<&str>(&[], &ChartSettings::default());
        assert!(chart.elements.is_empty());
    }
}
