//! Demo scenes shared by the terminal and web hosts
use crate::animator::{OperationKind, OperationRequest};
use crate::error::SceneError;
use crate::geometry::Color;
use crate::graph;
use crate::scene::Scene;
use crate::shapes;

/// Solid shapes around a labelled axis triad, with a slow opening spin
pub fn solids(scene: &mut Scene) -> Result<(), SceneError> {
    scene.import(&shapes::axis_triad("axes", 6.0, Color::BLACK), 0.0, 0.0, 0.0)?;
    scene.import(&shapes::cube("cube", 4.0, Color::RED), -4.0, 0.0, 0.0)?;
    scene.import(&shapes::pyramid("pyramid", 4.0, 5.0, Color::GREEN), 4.0, 0.0, -2.0)?;
    scene.import(&shapes::cube("block", 2.0, Color::BLUE), 0.0, 4.0, 2.0)?;

    let config = scene.config();
    let opening = OperationRequest::new(
        OperationKind::Rotate,
        config.total_frames,
        config.part_count,
        config.rotate_degrees,
        config.rotate_degrees,
        0.0,
    );
    scene.seed(opening);
    Ok(())
}

/// Axes with a few function series. Nothing moves until a key is pressed.
pub fn functions(scene: &mut Scene) -> Result<(), SceneError> {
    scene.import(&graph::axes("axes", 10.0, Color::BLACK), 0.0, 0.0, 0.0)?;
    scene.import(&graph::series("sin", Color::RED, 1.0, -10.0, 10.0, 200, f64::sin), 0.0, 0.0, 0.0)?;
    scene.import(&graph::series("cos", Color::BLUE, 2.0, -10.0, 10.0, 200, f64::cos), 0.0, 0.0, 0.0)?;
    scene.import(
        &graph::series("x^2/8", Color::GREEN, 3.0, -10.0, 10.0, 200, |x| x * x / 8.0),
        0.0,
        0.0,
        0.0,
    )?;
    Ok(())
}

/// Random colored lines piling up on a blank background, one per frame
pub fn sketch(scene: &mut Scene, seed: u64) -> Result<(), SceneError> {
    scene.start_sketch(seed);
    Ok(())
}
