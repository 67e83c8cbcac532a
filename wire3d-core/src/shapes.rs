//! Ready-made object templates, centred on the origin
use crate::geometry::{Color, LabelAlign, Object, Point};

/// Axis-aligned cube with six filled faces and twelve edges
pub fn cube(name: &str, size: f64, color: Color) -> Object {
    let h = size / 2.0;
    let points = vec![
        Point::new(-h, -h, -h),
        Point::new(h, -h, -h),
        Point::new(h, h, -h),
        Point::new(-h, h, -h),
        Point::new(-h, -h, h),
        Point::new(h, -h, h),
        Point::new(h, h, h),
        Point::new(-h, h, h),
    ];
    let edges = vec![
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];
    let surfaces = vec![
        vec![0, 1, 2, 3], // back
        vec![4, 5, 6, 7], // front
        vec![3, 2, 6, 7], // top
        vec![0, 1, 5, 4], // bottom
        vec![1, 2, 6, 5], // right
        vec![0, 3, 7, 4], // left
    ];
    Object::new(name, color, points, edges, surfaces)
}

/// Square-based pyramid with its apex on +Y
pub fn pyramid(name: &str, base: f64, height: f64, color: Color) -> Object {
    let h = base / 2.0;
    let y = height / 2.0;
    let points = vec![
        Point::new(-h, -y, -h),
        Point::new(h, -y, -h),
        Point::new(h, -y, h),
        Point::new(-h, -y, h),
        Point::new(0.0, y, 0.0),
    ];
    let edges = vec![(0, 1), (1, 2), (2, 3), (3, 0), (0, 4), (1, 4), (2, 4), (3, 4)];
    let surfaces = vec![
        vec![0, 1, 2, 3],
        vec![0, 1, 4],
        vec![1, 2, 4],
        vec![2, 3, 4],
        vec![3, 0, 4],
    ];
    Object::new(name, color, points, edges, surfaces)
}

/// Labelled X/Y/Z axis triad of the given half-length. Wireframe only.
pub fn axis_triad(name: &str, length: f64, color: Color) -> Object {
    let points = vec![
        Point::new(0.0, 0.0, 0.0),
        Point::labelled(length, 0.0, 0.0, "X", LabelAlign::Left),
        Point::labelled(0.0, length, 0.0, "Y", LabelAlign::Center),
        Point::labelled(0.0, 0.0, length, "Z", LabelAlign::Right),
        Point::new(-length, 0.0, 0.0),
        Point::new(0.0, -length, 0.0),
        Point::new(0.0, 0.0, -length),
    ];
    let edges = vec![(4, 1), (5, 2), (6, 3)];
    Object::new(name, color, points, edges, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_valid() {
        for template in [
            cube("cube", 2.0, Color::RED),
            pyramid("pyramid", 2.0, 3.0, Color::GREEN),
            axis_triad("axes", 4.0, Color::BLACK),
        ] {
            template.validate().unwrap();
        }
    }

    #[test]
    fn test_cube_is_centred() {
        let c = cube("cube", 4.0, Color::BLUE);
        assert!(c.midpoint.coords.norm() < 1e-12);
        assert_eq!(c.points.len(), 8);
        assert_eq!(c.edges.len(), 12);
        assert_eq!(c.surfaces.len(), 6);
    }

    #[test]
    fn test_axis_labels() {
        let axes = axis_triad("axes", 1.0, Color::BLACK);
        let labels: Vec<_> = axes.points.iter().filter_map(|p| p.visible_label()).collect();
        assert_eq!(labels, vec!["X", "Y", "Z"]);
    }
}
