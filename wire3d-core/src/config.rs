//! Scene settings
//!
//! Every field has a default, so a config file only needs the values it
//! wants to change.
use serde::{Deserialize, Serialize};

use crate::geometry::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Recorded on each queued operation
    pub total_frames: u32,
    /// Number of ticks an operation is spread across
    pub part_count: u32,
    /// Total rotation per key press, in degrees
    pub rotate_degrees: f64,
    /// Total translation per key press, in world units
    pub translate_units: f64,
    /// Canvas size divided by this gives the pixels per world unit
    pub zoom_divisor: f64,
    pub zoom_step: f64,
    pub min_zoom_divisor: f64,
    pub max_zoom_divisor: f64,
    pub line_width: f64,
    pub show_points: bool,
    pub show_labels: bool,
    pub show_grid: bool,
    pub background: Color,
    pub foreground: Color,
    pub link: Option<LinkConfig>,
}

/// Clickable text drawn in the bottom-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub text: String,
    pub url: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            total_frames: 50,
            part_count: 12,
            rotate_degrees: 15.0,
            translate_units: 1.0,
            zoom_divisor: 30.0,
            zoom_step: 2.0,
            min_zoom_divisor: 10.0,
            max_zoom_divisor: 120.0,
            line_width: 1.0,
            show_points: false,
            show_labels: true,
            show_grid: false,
            background: Color::LIGHT_GREY,
            foreground: Color::BLACK,
            link: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: SceneConfig =
            serde_json::from_str(r#"{ "part_count": 24, "background": { "r": 1, "g": 2, "b": 3 } }"#).unwrap();
        assert_eq!(config.part_count, 24);
        assert_eq!(config.background, Color::rgb(1, 2, 3));
        assert_eq!(config.total_frames, 50);
        assert_eq!(config.zoom_divisor, 30.0);
        assert!(config.link.is_none());
    }

    #[test]
    fn test_link_config() {
        let config: SceneConfig =
            serde_json::from_str(r#"{ "link": { "text": "source", "url": "https://example.com" } }"#).unwrap();
        assert_eq!(config.link.unwrap().url, "https://example.com");
    }
}
