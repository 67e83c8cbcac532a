//! Terminal host for wire3d scenes
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};
use wire3d_core::{InputEvent, Key, Scene, SceneConfig, SceneError};

pub mod renderer;

pub use renderer::AsciiSurface;

/// The status bar takes the top row of the terminal
const STATUS_ROWS: u16 = 1;

/// Main application struct for terminal rendering
pub struct TerminalApp {
    scene: Scene,
    surface: AsciiSurface,
    inputs: Sender<InputEvent>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    notice: Option<String>,
}

impl TerminalApp {
    /// Build an app around a scene created by `build`, sized to the terminal
    pub fn new<F>(config: SceneConfig, build: F) -> anyhow::Result<Self>
    where
        F: FnOnce(&mut Scene) -> Result<(), SceneError>,
    {
        let (cols, rows) = terminal::size()?;
        let surface = AsciiSurface::new(cols as usize, rows.saturating_sub(STATUS_ROWS) as usize);

        let (width, height) = wire3d_core::DrawingSurface::size(&surface);
        let mut scene = Scene::init(config, width, height);
        build(&mut scene)?;
        let inputs = scene.input_sender();

        Ok(Self {
            scene,
            surface,
            inputs,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            notice: None,
        })
    }

    pub fn run(mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        let result = self.main_loop();

        // Cleanup
        execute!(stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;
        self.scene.dispose();

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Forward everything that arrived since the last frame; the scene
            // picks up one input per tick
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.scene.tick(&mut self.surface);
            self.present()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                code => {
                    if let Some(key) = map_key_code(code) {
                        self.send(InputEvent::Key(key));
                    }
                }
            },
            Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                let Some(row) = row.checked_sub(STATUS_ROWS) else {
                    return;
                };
                let (x, y) = AsciiSurface::cell_center(column, row);
                match kind {
                    MouseEventKind::ScrollUp => self.send(InputEvent::Wheel(1.0)),
                    MouseEventKind::ScrollDown => self.send(InputEvent::Wheel(-1.0)),
                    MouseEventKind::Moved => self.scene.pointer_moved(x, y),
                    MouseEventKind::Down(_) => {
                        if let Some(url) = self.scene.click(x, y) {
                            log::info!("link clicked: {url}");
                            self.notice = Some(format!("Open {url}"));
                        }
                    }
                    _ => {}
                }
            }
            Event::Resize(cols, rows) => {
                self.surface
                    .resize(cols as usize, rows.saturating_sub(STATUS_ROWS) as usize);
                let (width, height) = wire3d_core::DrawingSurface::size(&self.surface);
                self.scene.resize(width, height);
            }
            _ => {}
        }
    }

    fn send(&mut self, event: InputEvent) {
        // The scene owns the receiver, so this only fails after dispose
        if self.inputs.send(event).is_err() {
            log::warn!("input dropped: {event:?}");
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "wire3d | FPS: {:.1} | Arrows/WASD/PgUp/PgDn/Home/End=Rotate IJKLUO=Move +/-=Zoom Wheel=Scale Q=Quit",
                self.fps
            )),
            ResetColor
        )?;
        if let Some(notice) = &self.notice {
            queue!(stdout, Print(" | "), Print(notice))?;
        }

        queue!(stdout, cursor::MoveTo(0, STATUS_ROWS))?;
        self.surface.draw(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }
}

fn map_key_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}
