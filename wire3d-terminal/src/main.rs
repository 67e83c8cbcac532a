//! wire3d terminal demo
//!
//! Usage: wire3d-terminal [--config scene.json] [--graph | --sketch | model.stl]
//!
//! Controls:
//!   - Arrow keys, WASD, keypad 8/4/6/2, E/R: rotate about one axis
//!   - PageUp/PageDown/Home/End, keypad 9/3/7/1: rotate about X and Y
//!   - I/J/K/L/U/O: translate
//!   - +/-: zoom, mouse wheel: scale
//!   - Q/ESC: quit
//!
//! Pressing the same key again stops a running rotation or translation.

use anyhow::{bail, Context};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use wire3d_core::{demo, stl, Color, SceneConfig};
use wire3d_terminal::TerminalApp;

enum Mode {
    Demo,
    Graph,
    Sketch,
    Model(PathBuf),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config_path = None;
    let mut mode = Mode::Demo;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = Some(args.next().context("--config needs a file")?),
            "--graph" => mode = Mode::Graph,
            "--sketch" => mode = Mode::Sketch,
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            path => mode = Mode::Model(PathBuf::from(path)),
        }
    }

    let config: SceneConfig = match config_path {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("failed to read config {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("invalid config {path}"))?
        }
        None => SceneConfig::default(),
    };

    let app = match mode {
        Mode::Demo => TerminalApp::new(config, demo::solids)?,
        Mode::Graph => {
            let config = SceneConfig {
                show_grid: true,
                ..config
            };
            TerminalApp::new(config, demo::functions)?
        }
        Mode::Sketch => {
            let seed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default();
            TerminalApp::new(config, |scene| demo::sketch(scene, seed))?
        }
                Mode::Model(path) => {
            let data = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "model".to_string());
            let model = stl::parse_stl(&name, Color::rgb(70, 130, 180), &data)?;
            log::info!("loaded {} with {} surfaces", path.display(), model.surfaces.len());
            TerminalApp::new(config, |scene| scene.import(&model, 0.0, 0.0, 0.0))?
        }
    };

    app.run()?;
    Ok(())
}
