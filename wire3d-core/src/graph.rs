//! 2D function graph scenes
//!
//! Graph objects live in the Z = 0 plane and carry a static draw order, so
//! the axes always render first and data series stack in a fixed order no
//! matter how the scene is transformed.
use crate::geometry::{Color, LabelAlign, Object, Point};

/// Draw order given to the axes; series start above it
pub const AXES_ORDER: f64 = 0.0;

/// X and Y axes spanning `[-extent, extent]` with tick marks every unit
pub fn axes(name: &str, extent: f64, color: Color) -> Object {
    let mut points = vec![
        Point::labelled(-extent, 0.0, 0.0, "", LabelAlign::Left),
        Point::labelled(extent, 0.0, 0.0, "x", LabelAlign::Left),
        Point::labelled(0.0, -extent, 0.0, "", LabelAlign::Center),
        Point::labelled(0.0, extent, 0.0, "y", LabelAlign::Center),
    ];
    let mut edges = vec![(0, 1), (2, 3)];

    let tick = 0.2;
    let whole = extent.floor() as i64;
    for i in (-whole..=whole).filter(|&i| i != 0) {
        let v = i as f64;

        let start = points.len();
        points.push(Point::labelled(v, -tick, 0.0, i.to_string(), LabelAlign::Center));
        points.push(Point::new(v, tick, 0.0));
        edges.push((start, start + 1));

        let start = points.len();
        points.push(Point::labelled(-tick, v, 0.0, i.to_string(), LabelAlign::Right));
        points.push(Point::new(tick, v, 0.0));
        edges.push((start, start + 1));
    }

    Object::new(name, color, points, edges, Vec::new()).with_draw_order(AXES_ORDER)
}

/// Sample `f` at `samples` evenly spaced X values over `[from, to]` and join
/// the samples into a polyline. Non-finite samples break the line.
pub fn series<F>(name: &str, color: Color, order: f64, from: f64, to: f64, samples: usize, f: F) -> Object
where
    F: Fn(f64) -> f64,
{
    let samples = samples.max(2);
    let dx = (to - from) / (samples - 1) as f64;

    let mut points = Vec::with_capacity(samples);
    let mut edges = Vec::with_capacity(samples - 1);
    let mut previous_finite = false;
    for i in 0..samples {
        let x = from + dx * i as f64;
        let y = f(x);
        if !y.is_finite() {
            previous_finite = false;
            continue;
        }
        points.push(Point::new(x, y, 0.0));
        if previous_finite {
            edges.push((points.len() - 2, points.len() - 1));
        }
        previous_finite = true;
    }

    if let Some(last) = points.last_mut() {
        last.label = Some(name.to_string());
        last.align = LabelAlign::Left;
    }

    Object::new(name, color, points, edges, Vec::new()).with_draw_order(AXES_ORDER + order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_render_before_series() {
        let a = axes("axes", 5.0, Color::BLACK);
        let s = series("sin", Color::RED, 1.0, -5.0, 5.0, 50, f64::sin);
        assert!(a.depth_key() < s.depth_key());
        a.validate().unwrap();
        s.validate().unwrap();
    }

    #[test]
    fn test_series_samples_endpoints() {
        let s = series("line", Color::BLUE, 1.0, -1.0, 1.0, 3, |x| 2.0 * x);
        let ys: Vec<_> = s.points.iter().map(|p| p.position.y).collect();
        assert_eq!(ys, vec![-2.0, 0.0, 2.0]);
        assert_eq!(s.edges, vec![(0, 1), (1, 2)]);
        assert_eq!(s.points[2].visible_label(), Some("line"));
    }

    #[test]
    fn test_series_breaks_on_non_finite() {
        let s = series("recip", Color::BLUE, 1.0, -1.0, 1.0, 3, |x| 1.0 / x);
        // x = 0 yields infinity and is dropped, leaving two disjoint samples
        assert_eq!(s.points.len(), 2);
        assert!(s.edges.is_empty());
    }

    #[test]
    fn test_axes_ticks() {
        let a = axes("axes", 2.0, Color::BLACK);
        // 4 axis endpoints + 4 ticks per axis pair * 2 points
        assert_eq!(a.points.len(), 4 + 4 * 2 * 2);
        assert_eq!(a.edges.len(), 2 + 8);
    }
}
