//! Boundary to an immediate-mode 2D drawing surface
//!
//! Hosts implement [`DrawingSurface`] over whatever they draw on (an HTML
//! canvas context, a terminal cell grid). Coordinates are in surface units
//! with the origin at the top-left corner and Y growing downward.
use crate::geometry::{Color, LabelAlign};

pub trait DrawingSurface {
    /// Current `(width, height)` in surface units
    fn size(&self) -> (f64, f64);

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn set_text_align(&mut self, align: LabelAlign);
    fn set_font(&mut self, font: &str);

    fn save(&mut self);
    fn restore(&mut self);
    /// Restrict drawing to a rectangle until the matching `restore`
    fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(f64),
    BeginPath,
    ClosePath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc(f64, f64, f64),
    Fill,
    Stroke,
    FillRect(f64, f64, f64, f64),
    FillText(String, f64, f64),
    SetTextAlign(LabelAlign),
    SetFont(String),
    Save,
    Restore,
    ClipRect(f64, f64, f64, f64),
}

/// A surface that only records the calls made on it
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Fill colors in the order fills were issued
    pub fn fill_colors(&self) -> Vec<Color> {
        let mut current = None;
        let mut colors = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::SetFillColor(c) => current = Some(*c),
                DrawCommand::Fill | DrawCommand::FillRect(..) => colors.extend(current),
                _ => {}
            }
        }
        colors
    }

    /// Every text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetStrokeColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, _start_angle: f64, _end_angle: f64) {
        self.commands.push(DrawCommand::Arc(x, y, radius));
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillRect(x, y, width, height));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText(text.to_string(), x, y));
    }

    fn set_text_align(&mut self, align: LabelAlign) {
        self.commands.push(DrawCommand::SetTextAlign(align));
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::SetFont(font.to_string()));
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClipRect(x, y, width, height));
    }
}
