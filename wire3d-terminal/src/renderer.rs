//! ASCII drawing surface for terminal rendering
//!
//! Surface coordinates are finer than terminal cells: each cell covers
//! `CELL_WIDTH` x `CELL_HEIGHT` surface units, which keeps the roughly 1:2
//! cell aspect ratio from squashing the picture.
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{Color, DrawingSurface, LabelAlign};

pub const CELL_WIDTH: f64 = 4.0;
pub const CELL_HEIGHT: f64 = 8.0;

/// Segments used to approximate a full circle
const ARC_SEGMENTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// Cell-space clip rectangle, half-open
#[derive(Debug, Clone, Copy, PartialEq)]
struct Clip {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

#[derive(Debug, Clone, Copy)]
struct GraphicsState {
    fill: Color,
    stroke: Color,
    align: LabelAlign,
    clip: Option<Clip>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::BLACK,
            align: LabelAlign::Left,
            clip: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct SubPath {
    points: Vec<(f64, f64)>,
    closed: bool,
}

/// Character-grid surface that the scene renders into
pub struct AsciiSurface {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    path: Vec<SubPath>,
}

impl AsciiSurface {
    pub fn new(cols: usize, rows: usize) -> Self {
        let blank = Cell {
            ch: ' ',
            fg: Color::BLACK,
            bg: Color::BLACK,
        };
        Self {
            cols,
            rows,
            cells: vec![blank; cols * rows],
            state: GraphicsState::default(),
            saved: Vec::new(),
            path: Vec::new(),
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        *self = Self::new(cols, rows);
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        (col < self.cols && row < self.rows).then(|| &self.cells[row * self.cols + col])
    }

    /// Surface coordinates of the centre of a cell
    pub fn cell_center(col: u16, row: u16) -> (f64, f64) {
        ((f64::from(col) + 0.5) * CELL_WIDTH, (f64::from(row) + 0.5) * CELL_HEIGHT)
    }

    /// One row of characters, for tests and debugging
    pub fn row_text(&self, row: usize) -> Option<String> {
        let start = row.checked_mul(self.cols)?;
        let cells = self.cells.get(start..start + self.cols)?;
        Some(cells.iter().map(|c| c.ch).collect())
    }

    /// Drawable cells: the grid intersected with the clip
    fn bounds(&self) -> Clip {
        let grid = Clip {
            left: 0,
            top: 0,
            right: self.cols as i64,
            bottom: self.rows as i64,
        };
        match self.state.clip {
            Some(c) => Clip {
                left: c.left.max(grid.left),
                top: c.top.max(grid.top),
                right: c.right.min(grid.right),
                bottom: c.bottom.min(grid.bottom),
            },
            None => grid,
        }
    }

    fn cell_mut(&mut self, col: i64, row: i64) -> Option<&mut Cell> {
        let b = self.bounds();
        if col < b.left || col >= b.right || row < b.top || row >= b.bottom {
            return None;
        }
        let idx = row as usize * self.cols + col as usize;
        self.cells.get_mut(idx)
    }

    /// Parameter range of a segment (in cell units) that can touch a drawable
    /// cell, or `None` when it misses them all
    fn visible_range(&self, (c0, r0): (f64, f64), (dc, dr): (f64, f64)) -> Option<(f64, f64)> {
        let b = self.bounds();
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        // One cell of slack on each side for the floor at the far edge
        let axes = [
            (c0, dc, b.left as f64 - 1.0, b.right as f64 + 1.0),
            (r0, dr, b.top as f64 - 1.0, b.bottom as f64 + 1.0),
        ];
        for (p, d, lo, hi) in axes {
            if d == 0.0 {
                if p < lo || p > hi {
                    return None;
                }
            } else {
                let (a, z) = ((lo - p) / d, (hi - p) / d);
                t0 = t0.max(a.min(z));
                t1 = t1.min(a.max(z));
            }
        }
        (t0 <= t1).then_some((t0, t1))
    }

    fn current(&mut self) -> &mut SubPath {
        if self.path.last().map_or(true, |p| p.closed) {
            self.path.push(SubPath::default());
        }
        // Just pushed if it was missing
        let last = self.path.len() - 1;
        &mut self.path[last]
    }

    /// Even-odd scanline fill over every sub-path, sampled at cell centres
    fn fill_path(&mut self, color: Color) {
        let mut segments = Vec::new();
        for sub in &self.path {
            let n = sub.points.len();
            if n < 3 {
                continue;
            }
            for i in 0..n {
                segments.push((sub.points[i], sub.points[(i + 1) % n]));
            }
        }

        let b = self.bounds();
        for row in b.top..b.bottom {
            let y = (row as f64 + 0.5) * CELL_HEIGHT;
            let mut crossings: Vec<f64> = segments
                .iter()
                .filter(|((_, y0), (_, y1))| (*y0 <= y) != (*y1 <= y))
                .map(|((x0, y0), (x1, y1))| x0 + (y - y0) / (y1 - y0) * (x1 - x0))
                .collect();
            crossings.sort_by(|a, b| a.total_cmp(b));

            for span in crossings.chunks_exact(2) {
                let first = ((span[0] / CELL_WIDTH - 0.5).ceil() as i64).max(b.left);
                let last = ((span[1] / CELL_WIDTH - 0.5).floor() as i64).min(b.right - 1);
                for col in first..=last {
                    if let Some(cell) = self.cell_mut(col, row) {
                        cell.ch = ' ';
                        cell.bg = color;
                    }
                }
            }
        }
    }

    fn draw_line(&mut self, (x0, y0): (f64, f64), (x1, y1): (f64, f64), color: Color) {
        let (c0, r0) = (x0 / CELL_WIDTH, y0 / CELL_HEIGHT);
        let (c1, r1) = (x1 / CELL_WIDTH, y1 / CELL_HEIGHT);
        let (dc, dr) = (c1 - c0, r1 - r0);
        if !(c0.is_finite() && r0.is_finite() && dc.is_finite() && dr.is_finite()) {
            return;
        }
        let Some((t0, t1)) = self.visible_range((c0, r0), (dc, dr)) else {
            return;
        };

        let ch = if dr.abs() * 2.0 < dc.abs() {
            '-'
        } else if dc.abs() * 2.0 < dr.abs() {
            '|'
        } else if (dc > 0.0) == (dr > 0.0) {
            '\\'
        } else {
            '/'
        };

        // One sample per cell, walking only the visible part of the segment
        let steps = dc.abs().max(dr.abs()).ceil().max(1.0);
        let (sc, sr) = (dc / steps, dr / steps);
        let first = (t0 * steps).floor();
        let last = (t1 * steps).ceil().min(steps);
        let (cs, rs) = (c0 + sc * first, r0 + sr * first);
        for k in 0..=((last - first) as u64) {
            let k = k as f64;
            let col = (cs + sc * k).floor() as i64;
            let row = (rs + sr * k).floor() as i64;
            if let Some(cell) = self.cell_mut(col, row) {
                cell.ch = ch;
                cell.fg = color;
            }
        }
    }

    /// Write the buffer to the terminal
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut colors: Option<(Color, Color)> = None;
        for row in 0..self.rows {
            for cell in &self.cells[row * self.cols..(row + 1) * self.cols] {
                if colors != Some((cell.fg, cell.bg)) {
                    writer.queue(SetForegroundColor(term_color(cell.fg)))?;
                    writer.queue(SetBackgroundColor(term_color(cell.bg)))?;
                    colors = Some((cell.fg, cell.bg));
                }
                writer.queue(Print(cell.ch))?;
            }
            if row + 1 < self.rows {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb { r: c.r, g: c.g, b: c.b }
}

impl DrawingSurface for AsciiSurface {
    fn size(&self) -> (f64, f64) {
        (self.cols as f64 * CELL_WIDTH, self.rows as f64 * CELL_HEIGHT)
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    // A stroke is always one cell wide
    fn set_line_width(&mut self, _width: f64) {}

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn close_path(&mut self) {
        if let Some(sub) = self.path.last_mut() {
            sub.closed = true;
        }
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(SubPath {
            points: vec![(x, y)],
            closed: false,
        });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.current().points.push((x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        let sweep = end_angle - start_angle;
        let sub = self.current();
        for i in 0..=ARC_SEGMENTS {
            let a = start_angle + sweep * i as f64 / ARC_SEGMENTS as f64;
            sub.points.push((x + radius * a.cos(), y + radius * a.sin()));
        }
    }

    fn fill(&mut self) {
        self.fill_path(self.state.fill);
    }

    fn stroke(&mut self) {
        let color = self.state.stroke;
        let segments: Vec<_> = self
            .path
            .iter()
            .flat_map(|sub| {
                let n = sub.points.len();
                let count = if sub.closed && n > 2 { n } else { n.saturating_sub(1) };
                (0..count).map(move |i| (sub.points[i], sub.points[(i + 1) % n]))
            })
            .collect();
        for (a, b) in segments {
            self.draw_line(a, b, color);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let color = self.state.fill;
        let b = self.bounds();
        let left = ((x / CELL_WIDTH).floor() as i64).max(b.left);
        let top = ((y / CELL_HEIGHT).floor() as i64).max(b.top);
        let right = (((x + width) / CELL_WIDTH).ceil() as i64).min(b.right);
        let bottom = (((y + height) / CELL_HEIGHT).ceil() as i64).min(b.bottom);
        for row in top..bottom {
            for col in left..right {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.ch = ' ';
                    cell.bg = color;
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let len = text.chars().count() as i64;
        let anchor = (x / CELL_WIDTH).floor() as i64;
        let start = match self.state.align {
            LabelAlign::Left => anchor,
            LabelAlign::Center => anchor - len / 2,
            LabelAlign::Right => anchor - len,
        };
        // Text sits on its baseline, like a canvas
        let row = ((y - 1.0) / CELL_HEIGHT).floor() as i64;
        let color = self.state.fill;
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(start + i as i64, row) {
                cell.ch = ch;
                cell.fg = color;
            }
        }
    }

    fn set_text_align(&mut self, align: LabelAlign) {
        self.state.align = align;
    }

    // One font only
    fn set_font(&mut self, _font: &str) {}

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let clip = Clip {
            left: (x / CELL_WIDTH).floor() as i64,
            top: (y / CELL_HEIGHT).floor() as i64,
            right: ((x + width) / CELL_WIDTH).ceil() as i64,
            bottom: ((y + height) / CELL_HEIGHT).ceil() as i64,
        };
        self.state.clip = Some(match self.state.clip {
            Some(old) => Clip {
                left: old.left.max(clip.left),
                top: old.top.max(clip.top),
                right: old.right.min(clip.right),
                bottom: old.bottom.min(clip.bottom),
            },
            None => clip,
        });
    }
}
