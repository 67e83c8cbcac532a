//! Depth-order renderer
//!
//! Painter's algorithm over whole objects: every frame the objects are
//! sorted by depth key, smallest first, and drawn in that order so nearer
//! objects overdraw farther ones. Projection is orthographic: X and Y are
//! read off directly and Z is only used for ordering.
use nalgebra::Point3;

use crate::geometry::{Color, LabelAlign, Object};
use crate::input::HitRegion;
use crate::sketch::Sketch;
use crate::surface::DrawingSurface;
use crate::world::WorldSpace;

const FONT: &str = "12px sans-serif";
const LINK_FONT: &str = "14px sans-serif";

/// Layout constants derived from the surface size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    /// Surface units per world unit
    pub step: f64,
    pub graph_left: f64,
    pub graph_top: f64,
    pub graph_width: f64,
    pub graph_height: f64,
    pub grid_step: f64,
    pub link_region: HitRegion,
}

impl Layout {
    pub fn compute(width: f64, height: f64, zoom_divisor: f64) -> Self {
        let step = width.min(height) / zoom_divisor;
        let link_height = 20.0_f64.min(height / 4.0);
        Self {
            width,
            height,
            center_x: width / 2.0,
            center_y: height / 2.0,
            step,
            graph_left: step,
            graph_top: step,
            graph_width: (width - 2.0 * step).max(0.0),
            graph_height: (height - 2.0 * step).max(0.0),
            grid_step: step,
            link_region: HitRegion {
                x: 0.0,
                y: height - link_height,
                width: (width / 3.0).min(240.0),
                height: link_height,
            },
        }
    }

    /// Screen position of a world point. Y is flipped since screen Y grows
    /// downward.
    pub fn project(&self, p: &Point3<f64>) -> (f64, f64) {
        (self.center_x + p.x * self.step, self.center_y - p.y * self.step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub background: Color,
    pub foreground: Color,
    pub line_width: f64,
    pub show_points: bool,
    pub show_labels: bool,
    pub show_grid: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Color::LIGHT_GREY,
            foreground: Color::BLACK,
            line_width: 1.0,
            show_points: false,
            show_labels: true,
            show_grid: false,
        }
    }
}

/// Layers drawn on top of the scene: sketch lines, then text
#[derive(Debug, Clone, Default)]
pub struct Overlay<'a> {
    pub sketch: Option<&'a Sketch>,
    pub status: Option<&'a str>,
    pub link: Option<&'a str>,
    pub link_highlighted: bool,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    layout: Layout,
    zoom_divisor: f64,
    pub options: RenderOptions,
}

impl Renderer {
    pub fn new(width: f64, height: f64, zoom_divisor: f64, options: RenderOptions) -> Self {
        Self {
            layout: Layout::compute(width, height, zoom_divisor),
            zoom_divisor,
            options,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn zoom_divisor(&self) -> f64 {
        self.zoom_divisor
    }

    pub fn set_zoom_divisor(&mut self, divisor: f64) {
        self.zoom_divisor = divisor;
        self.layout = Layout::compute(self.layout.width, self.layout.height, divisor);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.layout = Layout::compute(width, height, self.zoom_divisor);
    }

    /// Objects in back-to-front order
    pub fn draw_order(world: &WorldSpace) -> Vec<&Object> {
        let mut objects: Vec<&Object> = world.objects().collect();
        // World iteration is by name, and the sort is stable, so ties fall
        // back to name order
        objects.sort_by(|a, b| a.depth_key().total_cmp(&b.depth_key()));
        objects
    }

    /// Draw one frame of `world`
    pub fn render<S: DrawingSurface + ?Sized>(&mut self, world: &WorldSpace, overlay: &Overlay<'_>, surface: &mut S) {
        let (width, height) = surface.size();
        if (width, height) != (self.layout.width, self.layout.height) {
            self.resize(width, height);
        }

        surface.set_fill_color(self.options.background);
        surface.fill_rect(0.0, 0.0, width, height);
        surface.set_line_width(self.options.line_width);
        surface.set_font(FONT);

        if self.options.show_grid {
            self.draw_grid(surface);
        }

        for object in Self::draw_order(world) {
            self.draw_object(object, surface);
        }

        self.draw_overlay(overlay, surface);
    }

    fn draw_grid<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        let l = &self.layout;
        if l.grid_step <= 0.0 {
            return;
        }
        let right = l.graph_left + l.graph_width;
        let bottom = l.graph_top + l.graph_height;

        surface.save();
        surface.clip_rect(l.graph_left, l.graph_top, l.graph_width, l.graph_height);
        surface.set_stroke_color(Color::GREY);
        surface.begin_path();

        // Lines pass through the centre so the grid lines up with the axes
        let mut x = l.center_x - ((l.center_x - l.graph_left) / l.grid_step).floor() * l.grid_step;
        while x <= right {
            surface.move_to(x, l.graph_top);
            surface.line_to(x, bottom);
            x += l.grid_step;
        }
        let mut y = l.center_y - ((l.center_y - l.graph_top) / l.grid_step).floor() * l.grid_step;
        while y <= bottom {
            surface.move_to(l.graph_left, y);
            surface.line_to(right, y);
            y += l.grid_step;
        }

        surface.stroke();
        surface.restore();
    }

    fn draw_object<S: DrawingSurface + ?Sized>(&self, object: &Object, surface: &mut S) {
        let screen: Vec<(f64, f64)> = object.points.iter().map(|p| self.layout.project(&p.position)).collect();

        surface.set_fill_color(object.color);
        for indices in &object.surfaces {
            let mut corners = indices.iter().filter_map(|&i| screen.get(i).copied());
            let Some((x, y)) = corners.next() else {
                continue;
            };
            surface.begin_path();
            surface.move_to(x, y);
            for (x, y) in corners {
                surface.line_to(x, y);
            }
            surface.close_path();
            surface.fill();
        }

        if !object.edges.is_empty() {
            // Solids get a dark outline, wireframes are drawn in their own color
            let stroke = if object.surfaces.is_empty() {
                object.color
            } else {
                self.options.foreground
            };
            surface.set_stroke_color(stroke);
            surface.begin_path();
            for &(a, b) in &object.edges {
                let (Some(&(ax, ay)), Some(&(bx, by))) = (screen.get(a), screen.get(b)) else {
                    continue;
                };
                surface.move_to(ax, ay);
                surface.line_to(bx, by);
            }
            surface.stroke();
        }

        if self.options.show_points {
            surface.set_fill_color(self.options.foreground);
            let radius = (self.layout.step / 8.0).max(1.0);
            for &(x, y) in &screen {
                surface.begin_path();
                surface.arc(x, y, radius, 0.0, std::f64::consts::TAU);
                surface.fill();
            }
        }

        if self.options.show_labels {
            let mut labels = object
                .points
                .iter()
                .zip(&screen)
                .filter_map(|(p, s)| p.visible_label().map(|l| (l, p.align, s)))
                .peekable();
            if labels.peek().is_some() {
                surface.set_fill_color(self.options.foreground);
            }
            for (label, align, &(x, y)) in labels {
                surface.set_text_align(align);
                surface.fill_text(label, x, y);
            }
        }
    }

    fn draw_overlay<S: DrawingSurface + ?Sized>(&self, overlay: &Overlay<'_>, surface: &mut S) {
        if let Some(sketch) = overlay.sketch {
            sketch.draw(surface);
        }

        surface.set_fill_color(self.options.foreground);
        surface.set_text_align(LabelAlign::Left);

        if let Some(status) = overlay.status {
            surface.fill_text(status, 0.0, 12.0);
        }

        if let Some(link) = overlay.link {
            let region = self.layout.link_region;
            if overlay.link_highlighted {
                surface.set_fill_color(Color::BLUE);
            }
            surface.set_font(LINK_FONT);
            surface.fill_text(link, region.x, region.y + region.height * 0.75);
            surface.set_font(FONT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::shapes;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn flat_at(name: &str, z: f64, color: Color) -> Object {
        Object::new(
            name,
            color,
            vec![Point::new(0.0, 0.0, z), Point::new(1.0, 0.0, z), Point::new(0.0, 1.0, z)],
            vec![],
            vec![vec![0, 1, 2]],
        )
    }

    #[test]
    fn test_layout_step_uses_smaller_side() {
        let layout = Layout::compute(900.0, 600.0, 30.0);
        assert_eq!(layout.step, 20.0);
        assert_eq!((layout.center_x, layout.center_y), (450.0, 300.0));
        assert_eq!(layout.graph_width, 860.0);
        assert_eq!(layout.graph_height, 560.0);
    }

    #[test]
    fn test_projection_flips_y_and_ignores_z() {
        let layout = Layout::compute(600.0, 600.0, 30.0);
        assert_eq!(layout.project(&Point3::new(1.0, 2.0, 0.0)), (320.0, 260.0));
        assert_eq!(layout.project(&Point3::new(1.0, 2.0, -50.0)), (320.0, 260.0));
    }

    #[test]
    fn test_back_to_front_order() {
        let mut world = WorldSpace::new();
        // Names chosen so name order differs from depth order
        world.insert(flat_at("a", 2.0, Color::RED)).unwrap();
        world.insert(flat_at("b", -1.0, Color::GREEN)).unwrap();
        world.insert(flat_at("c", 0.0, Color::BLUE)).unwrap();

        let mut surface = RecordingSurface::new(300.0, 300.0);
        let mut renderer = Renderer::new(300.0, 300.0, 30.0, RenderOptions::default());
        renderer.render(&world, &Overlay::default(), &mut surface);

        // First fill is the background
        assert_eq!(
            surface.fill_colors(),
            vec![Color::LIGHT_GREY, Color::GREEN, Color::BLUE, Color::RED]
        );
    }

    #[test]
    fn test_ties_break_by_name() {
        let mut world = WorldSpace::new();
        world.insert(flat_at("zeta", 1.0, Color::RED)).unwrap();
        world.insert(flat_at("alpha", 1.0, Color::GREEN)).unwrap();
        let names: Vec<_> = Renderer::draw_order(&world).iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_resize_from_surface() {
        let world = WorldSpace::new();
        let mut renderer = Renderer::new(300.0, 300.0, 30.0, RenderOptions::default());
        let mut surface = RecordingSurface::new(600.0, 1200.0);
        renderer.render(&world, &Overlay::default(), &mut surface);
        assert_eq!(renderer.layout().step, 20.0);
        assert_eq!(surface.commands[1], DrawCommand::FillRect(0.0, 0.0, 600.0, 1200.0));
    }

    #[test]
    fn test_labels_and_overlay_text() {
        let mut world = WorldSpace::new();
        world
            .import(&shapes::axis_triad("axes", 2.0, Color::BLACK), 0.0, 0.0, 0.0)
            .unwrap();
        let mut surface = RecordingSurface::new(300.0, 300.0);
        let mut renderer = Renderer::new(300.0, 300.0, 30.0, RenderOptions::default());
        let overlay = Overlay {
            sketch: None,
            status: Some("Nothing queued"),
            link: Some("source"),
            link_highlighted: true,
        };
        renderer.render(&world, &overlay, &mut surface);
        assert_eq!(surface.texts(), vec!["X", "Y", "Z", "Nothing queued", "source"]);
        assert!(surface.commands.contains(&DrawCommand::SetTextAlign(LabelAlign::Right)));
        assert!(surface.commands.contains(&DrawCommand::SetFillColor(Color::BLUE)));
    }

    #[test]
    fn test_grid_is_clipped_to_graph_area() {
        let world = WorldSpace::new();
        let mut surface = RecordingSurface::new(300.0, 300.0);
        let options = RenderOptions {
            show_grid: true,
            ..RenderOptions::default()
        };
        let mut renderer = Renderer::new(300.0, 300.0, 30.0, options);
        renderer.render(&world, &Overlay::default(), &mut surface);
        assert!(surface.commands.contains(&DrawCommand::ClipRect(10.0, 10.0, 280.0, 280.0)));
        let save = surface.commands.iter().position(|c| *c == DrawCommand::Save).unwrap();
        let restore = surface.commands.iter().position(|c| *c == DrawCommand::Restore).unwrap();
        assert!(save < restore);
    }

    #[test]
    fn test_nan_depth_sorts_last() {
        let mut world = WorldSpace::new();
        world.insert(flat_at("a", 0.0, Color::RED).with_draw_order(f64::NAN)).unwrap();
        world.insert(flat_at("b", 5.0, Color::GREEN)).unwrap();
        world.insert(flat_at("c", -5.0, Color::BLUE)).unwrap();
        let names: Vec<_> = Renderer::draw_order(&world).iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_dangling_indices_are_skipped() {
        let mut broken = flat_at("broken", 0.0, Color::RED);
        broken.edges = vec![(0, 1), (0, 99)];
        broken.surfaces = vec![vec![0, 1, 2, 42]];
        let mut surface = RecordingSurface::new(300.0, 300.0);
        let renderer = Renderer::new(300.0, 300.0, 30.0, RenderOptions::default());

        renderer.draw_object(&broken, &mut surface);

        let moves = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::MoveTo(..)))
            .count();
        // One for the surface, one for the valid edge
        assert_eq!(moves, 2);
        assert!(surface.commands.contains(&DrawCommand::Fill));
    }
}
