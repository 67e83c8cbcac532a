//! wire3d Web - canvas 2D host for wire3d scenes
//!
//! The page owns the frame loop: it calls `WebRenderer::frame` from
//! `requestAnimationFrame` and forwards keyboard, wheel and mouse events.
use std::sync::mpsc::Sender;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wire3d_core::{demo, Color, DrawingSurface, InputEvent, Key, LabelAlign, Scene, SceneConfig, SceneError};

/// `DrawingSurface` over a canvas 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl DrawingSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn set_fill_color(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        // Only fails for a negative radius
        if let Err(e) = self.ctx.arc(x, y, radius, start_angle, end_angle) {
            log::warn!("arc failed: {e:?}");
        }
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if let Err(e) = self.ctx.fill_text(text, x, y) {
            log::warn!("fill_text failed: {e:?}");
        }
    }

    fn set_text_align(&mut self, align: LabelAlign) {
        self.ctx.set_text_align(match align {
            LabelAlign::Left => "left",
            LabelAlign::Center => "center",
            LabelAlign::Right => "right",
        });
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.begin_path();
        self.ctx.rect(x, y, width, height);
        self.ctx.clip();
    }
}

/// Map a `KeyboardEvent.key` value onto a scene key
fn map_key(key: &str) -> Option<Key> {
    match key {
        "ArrowUp" => Some(Key::Up),
        "ArrowDown" => Some(Key::Down),
        "ArrowLeft" => Some(Key::Left),
        "ArrowRight" => Some(Key::Right),
        "PageUp" => Some(Key::PageUp),
        "PageDown" => Some(Key::PageDown),
        "Home" => Some(Key::Home),
        "End" => Some(Key::End),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Key::Char(c)),
                _ => None,
            }
        }
    }
}

/// Normalise `WheelEvent.deltaY` to notches; scrolling up grows the scene
fn wheel_notches(delta_y: f64) -> f64 {
    if delta_y == 0.0 {
        0.0
    } else {
        -delta_y.signum()
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    scene: Scene,
    surface: CanvasSurface,
    inputs: Sender<InputEvent>,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the canvas with id `canvas_id`. `config_json` is an optional
    /// JSON scene config; `graph` selects the function-graph scene.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: Option<String>, graph: bool) -> Result<WebRenderer, JsValue> {
        let mut config = parse_config(config_json)?;
        config.show_grid |= graph;
        Self::attach(canvas_id, config, |scene| {
            if graph {
                demo::functions(scene)
            } else {
                demo::solids(scene)
            }
        })
    }

    /// The random-line sketch. The page supplies the seed, e.g. `Date.now()`.
    pub fn sketch(canvas_id: &str, config_json: Option<String>, seed: f64) -> Result<WebRenderer, JsValue> {
        let config = parse_config(config_json)?;
        Self::attach(canvas_id, config, |scene| demo::sketch(scene, seed as u64))
    }

    /// Match the canvas to the page size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.scene.resize(f64::from(width), f64::from(height));
    }

    pub fn key_down(&mut self, key: &str) {
        if let Some(key) = map_key(key) {
            self.send(InputEvent::Key(key));
        }
    }

    pub fn wheel(&mut self, delta_y: f64) {
        let notches = wheel_notches(delta_y);
        if notches != 0.0 {
            self.send(InputEvent::Wheel(notches));
        }
    }

    pub fn mouse_move(&mut self, x: f64, y: f64) {
        self.scene.pointer_moved(x, y);
    }

    /// The URL the page should navigate to, if the click hit the link
    pub fn click(&self, x: f64, y: f64) -> Option<String> {
        self.scene.click(x, y).map(str::to_string)
    }

    /// Animate and draw one frame
    pub fn frame(&mut self) {
        self.scene.tick(&mut self.surface);
    }

    pub fn description(&self) -> String {
        self.scene.animator().description().to_string()
    }

    pub fn dispose(self) {
        self.scene.dispose();
    }
}

impl WebRenderer {
    fn attach<F>(canvas_id: &str, config: SceneConfig, build: F) -> Result<WebRenderer, JsValue>
    where
        F: FnOnce(&mut Scene) -> Result<(), SceneError>,
    {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .ok_or_else(|| JsValue::from_str(&format!("no element with id `{canvas_id}`")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let surface = CanvasSurface::new(canvas)?;

        let (width, height) = surface.size();
        let mut scene = Scene::init(config, width, height);
        build(&mut scene).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let inputs = scene.input_sender();
        Ok(WebRenderer { scene, surface, inputs })
    }

    fn send(&mut self, event: InputEvent) {
        if self.inputs.send(event).is_err() {
            log::warn!("input dropped: {event:?}");
        }
    }
}

fn parse_config(config_json: Option<String>) -> Result<SceneConfig, JsValue> {
    match config_json {
        Some(json) => serde_json::from_str(&json).map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok(SceneConfig::default()),
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(map_key("ArrowLeft"), Some(Key::Left));
        assert_eq!(map_key("+"), Some(Key::Char('+')));
        assert_eq!(map_key("w"), Some(Key::Char('w')));
        assert_eq!(map_key("PageUp"), Some(Key::PageUp));
        assert_eq!(map_key("PageDown"), Some(Key::PageDown));
        assert_eq!(map_key("Home"), Some(Key::Home));
        assert_eq!(map_key("End"), Some(Key::End));
        assert_eq!(map_key("Shift"), None);
    }

    #[test]
    fn test_config_json() {
        assert_eq!(parse_config(None).unwrap().part_count, 12);
        assert_eq!(parse_config(Some(r#"{ "part_count": 4 }"#.into())).unwrap().part_count, 4);
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(wheel_notches(-120.0), 1.0);
        assert_eq!(wheel_notches(53.0), -1.0);
        assert_eq!(wheel_notches(0.0), 0.0);
    }
}
