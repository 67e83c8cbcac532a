//! Random-line sketch
//!
//! Each frame adds one line with random endpoints and a random color. Lines
//! build up on the background until the oldest ones are dropped.
use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::geometry::Color;
use crate::surface::DrawingSurface;

pub const LINE_WIDTH: f64 = 5.0;
pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct Sketch {
    rng: SmallRng,
    lines: VecDeque<Line>,
    capacity: usize,
}

impl Sketch {
    /// Same seed, same lines
    pub fn new(seed: u64) -> Self {
        Self::with_capacity(seed, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(seed: u64, capacity: usize) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            lines: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Add a line with whole-unit endpoints inside `width` x `height`
    pub fn add_line(&mut self, width: f64, height: f64) -> Line {
        let line = Line {
            from: (self.coordinate(width), self.coordinate(height)),
            to: (self.coordinate(width), self.coordinate(height)),
            color: Color::rgb(self.rng.gen(), self.rng.gen(), self.rng.gen()),
        };
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
        line
    }

    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        if self.lines.is_empty() {
            return;
        }
        surface.save();
        surface.set_line_width(LINE_WIDTH);
        for line in &self.lines {
            surface.set_stroke_color(line.color);
            surface.begin_path();
            surface.move_to(line.from.0, line.from.1);
            surface.line_to(line.to.0, line.to.1);
            surface.stroke();
        }
        surface.restore();
    }

    fn coordinate(&mut self, extent: f64) -> f64 {
        // Empty or degenerate surfaces pin lines to the origin
        if extent >= 1.0 && extent.is_finite() {
            f64::from(self.rng.gen_range(0..extent as u32))
        } else {
            0.0
        }
    }
}
