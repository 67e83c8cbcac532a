/// Example: place two copies of an STL model side by side in the terminal
///
/// Usage: cargo run --example load_stl -- path/to/file.stl
use anyhow::Context;
use std::env;
use std::fs;
use wire3d_core::{demo, stl, Color, SceneConfig};
use wire3d_terminal::TerminalApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <stl-file>", args[0]);
        eprintln!("\nNo STL file provided, using the demo scene...");
        return Ok(TerminalApp::new(SceneConfig::default(), demo::solids)?.run()?);
    }

    let stl_path = &args[1];
    let data = fs::read(stl_path).with_context(|| format!("failed to read STL file {stl_path}"))?;
    let left = stl::parse_stl("left", Color::RED, &data)?;
    let right = left.clone().with_name("right");

    println!("Loaded {} points, {} surfaces", left.points.len(), left.surfaces.len());

    let app = TerminalApp::new(SceneConfig::default(), |scene| {
        scene.import(&left, -5.0, 0.0, 0.0)?;
        scene.import(&right, 5.0, 0.0, 0.0)
    })?;
    app.run()?;
    Ok(())
}
