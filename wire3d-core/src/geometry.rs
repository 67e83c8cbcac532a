//! Geometry primitives: labelled points, edges, surfaces and objects
use std::fmt;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::transform::{Matrix, Transform};

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const LIGHT_GREY: Color = Color::rgb(211, 211, 211);
    pub const GREY: Color = Color::rgb(128, 128, 128);
    pub const RED: Color = Color::rgb(220, 40, 40);
    pub const GREEN: Color = Color::rgb(40, 160, 60);
    pub const BLUE: Color = Color::rgb(40, 80, 220);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS color string, e.g. `rgb(10, 20, 30)`
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Horizontal alignment of a point label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A 3D point with an optional text label
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub position: Point3<f64>,
    pub label: Option<String>,
    pub align: LabelAlign,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            label: None,
            align: LabelAlign::Left,
        }
    }

    pub fn labelled(x: f64, y: f64, z: f64, label: impl Into<String>, align: LabelAlign) -> Self {
        Self {
            position: Point3::new(x, y, z),
            label: Some(label.into()),
            align,
        }
    }

    /// Apply `m` to this point. Labels are carried over unchanged.
    pub fn transformed(&self, m: &Matrix) -> Self {
        Self {
            position: Transform::transform_position(m, &self.position),
            label: self.label.clone(),
            align: self.align,
        }
    }

    /// The label text, if it is present and non-empty
    pub fn visible_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }
}

/// Line segment between two points of the owning object
pub type Edge = (usize, usize);

/// Closed polygon over points of the owning object
pub type Surface = Vec<usize>;

/// A polyhedral object placed in (or ready to be placed in) world space
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub name: String,
    pub color: Color,
    pub points: Vec<Point>,
    pub edges: Vec<Edge>,
    pub surfaces: Vec<Surface>,
    /// Mean of the points at import time, transformed along with them
    pub midpoint: Point3<f64>,
    /// Static depth key; overrides the midpoint Z when set
    pub draw_order: Option<f64>,
}

impl Object {
    /// Build a template object. The midpoint is computed from `points`.
    pub fn new(
        name: impl Into<String>,
        color: Color,
        points: Vec<Point>,
        edges: Vec<Edge>,
        surfaces: Vec<Surface>,
    ) -> Self {
        let midpoint = mean(&points);
        Self {
            name: name.into(),
            color,
            points,
            edges,
            surfaces,
            midpoint,
            draw_order: None,
        }
    }

    pub fn with_draw_order(mut self, order: f64) -> Self {
        self.draw_order = Some(order);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The key used to order objects back to front
    pub fn depth_key(&self) -> f64 {
        self.draw_order.unwrap_or(self.midpoint.z)
    }

    /// Check that the object has points and that every edge and surface
    /// index refers to one of them.
    pub fn validate(&self) -> Result<(), SceneError> {
        let len = self.points.len();
        if len == 0 {
            return Err(SceneError::EmptyObject(self.name.clone()));
        }

        for (edge, &(a, b)) in self.edges.iter().enumerate() {
            if let Some(index) = [a, b].into_iter().find(|&i| i >= len) {
                return Err(SceneError::EdgeOutOfRange {
                    object: self.name.clone(),
                    edge,
                    index,
                    len,
                });
            }
        }

        for (surface, indices) in self.surfaces.iter().enumerate() {
            if indices.len() < 3 {
                return Err(SceneError::DegenerateSurface {
                    object: self.name.clone(),
                    surface,
                    count: indices.len(),
                });
            }
            if let Some(&index) = indices.iter().find(|&&i| i >= len) {
                return Err(SceneError::SurfaceOutOfRange {
                    object: self.name.clone(),
                    surface,
                    index,
                    len,
                });
            }
        }

        Ok(())
    }

    /// Place a copy of this template at `(x, y, z)` in world coordinates.
    ///
    /// The template is left untouched and can be imported again; the copy
    /// owns all of its data.
    pub fn import(&self, x: f64, y: f64, z: f64) -> Result<Object, SceneError> {
        self.validate()?;

        let placement = Transform::translate(&Transform::identity(), x, y, z);
        let points: Vec<Point> = self.points.iter().map(|p| p.transformed(&placement)).collect();
        let midpoint = mean(&points);

        log::debug!("imported `{}` at ({x}, {y}, {z})", self.name);

        Ok(Object {
            name: self.name.clone(),
            color: self.color,
            points,
            edges: self.edges.clone(),
            surfaces: self.surfaces.clone(),
            midpoint,
            draw_order: self.draw_order,
        })
    }

    /// Replace every point and the midpoint with their image under `m`
    pub fn apply(&mut self, m: &Matrix) {
        for point in &mut self.points {
            point.position = Transform::transform_position(m, &point.position);
        }
        self.midpoint = Transform::transform_position(m, &self.midpoint);
    }
}

fn mean(points: &[Point]) -> Point3<f64> {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.position.coords);
    Point3::from(sum / points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Object {
        Object::new(
            "tri",
            Color::RED,
            vec![
                Point::new(0.0, 0.0, 0.0),
                Point::labelled(3.0, 0.0, 0.0, "A", LabelAlign::Right),
                Point::new(0.0, 3.0, 3.0),
            ],
            vec![(0, 1), (1, 2), (2, 0)],
            vec![vec![0, 1, 2]],
        )
    }

    #[test]
    fn test_template_midpoint_is_mean() {
        let tri = triangle();
        assert_eq!(tri.midpoint, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_import_translates_points_and_midpoint() {
        let placed = triangle().import(10.0, -1.0, 2.0).unwrap();
        assert_eq!(placed.points[1].position, Point3::new(13.0, -1.0, 2.0));
        assert_eq!(placed.midpoint, Point3::new(11.0, 0.0, 3.0));
        assert_eq!(placed.points[1].label.as_deref(), Some("A"));
        assert_eq!(placed.points[1].align, LabelAlign::Right);
    }

    #[test]
    fn test_import_leaves_template_and_siblings_alone() {
        let template = triangle();
        let pristine = template.clone();
        let mut first = template.import(1.0, 0.0, 0.0).unwrap();
        let second = template.import(1.0, 0.0, 0.0).unwrap();

        first.apply(&Transform::scale(&Transform::identity(), 5.0, 5.0, 5.0));
        first.edges.push((0, 2));

        assert_eq!(template, pristine);
        assert_eq!(second, pristine.import(1.0, 0.0, 0.0).unwrap());
        assert_ne!(first.points, second.points);
    }

    #[test]
    fn test_import_rejects_bad_edge() {
        let mut tri = triangle();
        tri.edges.push((1, 7));
        let err = tri.import(0.0, 0.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            SceneError::EdgeOutOfRange {
                object: "tri".into(),
                edge: 3,
                index: 7,
                len: 3
            }
        );
    }

    #[test]
    fn test_import_rejects_bad_surface() {
        let mut tri = triangle();
        tri.surfaces.push(vec![0, 1, 3]);
        assert!(matches!(
            tri.import(0.0, 0.0, 0.0),
            Err(SceneError::SurfaceOutOfRange { surface: 1, index: 3, .. })
        ));

        let mut tri = triangle();
        tri.surfaces.push(vec![0, 1]);
        assert!(matches!(
            tri.import(0.0, 0.0, 0.0),
            Err(SceneError::DegenerateSurface { count: 2, .. })
        ));
    }

    #[test]
    fn test_import_rejects_empty_object() {
        let empty = Object::new("void", Color::BLACK, vec![], vec![], vec![]);
        assert_eq!(empty.import(0.0, 0.0, 0.0), Err(SceneError::EmptyObject("void".into())));
    }

    #[test]
    fn test_depth_key_prefers_draw_order() {
        let tri = triangle();
        assert_eq!(tri.depth_key(), 1.0);
        assert_eq!(tri.with_draw_order(-4.0).depth_key(), -4.0);
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::rgb(1, 22, 255).to_css(), "rgb(1, 22, 255)");
    }

    #[test]
    fn test_empty_label_is_hidden() {
        let p = Point::labelled(0.0, 0.0, 0.0, "", LabelAlign::Center);
        assert_eq!(p.visible_label(), None);
    }
}
