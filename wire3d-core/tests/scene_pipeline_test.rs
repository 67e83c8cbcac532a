use wire3d_core::graph;
use wire3d_core::shapes;
use wire3d_core::{
    Color, DrawCommand, InputEvent, Key, OperationKind, OperationRequest, RecordingSurface, Scene, SceneConfig,
};

fn scene_with_stack() -> Scene {
    let mut scene = Scene::init(SceneConfig::default(), 600.0, 600.0);
    scene
        .import(&shapes::cube("back", 2.0, Color::RED), 0.0, 0.0, -1.0)
        .unwrap();
    scene
        .import(&shapes::cube("middle", 2.0, Color::GREEN), 0.0, 0.0, 0.0)
        .unwrap();
    scene
        .import(&shapes::cube("front", 2.0, Color::BLUE), 0.0, 0.0, 2.0)
        .unwrap();
    scene
}

/// Object colors in the order their first surface was filled
fn object_fill_order(surface: &RecordingSurface) -> Vec<Color> {
    let mut order = Vec::new();
    for color in surface.fill_colors() {
        if color != Color::LIGHT_GREY && order.last() != Some(&color) {
            order.push(color);
        }
    }
    order
}

#[test]
fn test_painter_order_follows_midpoint_z() {
    let mut scene = scene_with_stack();
    let mut surface = RecordingSurface::new(600.0, 600.0);
    scene.tick(&mut surface);
    assert_eq!(object_fill_order(&surface), vec![Color::RED, Color::GREEN, Color::BLUE]);
}

#[test]
fn test_half_turn_about_y_reverses_draw_order() {
    let mut scene = scene_with_stack();
    let mut surface = RecordingSurface::new(600.0, 600.0);

    // 180 degrees over 12 parts, then cancel by repeating the request
    let request = OperationRequest::new(OperationKind::Rotate, 50, 12, 0.0, 180.0, 0.0);
    scene.seed(request);
    for _ in 0..12 {
        scene.tick(&mut surface);
    }
    scene.seed(request);
    assert!(scene.animator().is_idle());

    surface.clear();
    scene.tick(&mut surface);
    assert_eq!(object_fill_order(&surface), vec![Color::BLUE, Color::GREEN, Color::RED]);

    let front = scene.world().get("front").unwrap();
    assert!((front.midpoint.z + 2.0).abs() < 1e-9);
}

#[test]
fn test_wheel_scale_runs_to_completion() {
    let mut scene = scene_with_stack();
    let mut surface = RecordingSurface::new(600.0, 600.0);
    scene.input_sender().send(InputEvent::Wheel(5.0)).unwrap();

    // The first tick picks up the event and applies the first part
    for _ in 0..12 {
        scene.tick(&mut surface);
    }
    assert!(scene.animator().is_idle());
    assert_eq!(scene.animator().remaining_parts(), 0);

    // Linear steps of 1 + 1/12 compound to more than the requested factor
    let front = scene.world().get("front").unwrap();
    let expected = 2.0 * (1.0 + 1.0 / 12.0_f64).powi(12);
    assert!((front.midpoint.z - expected).abs() < 1e-9);

    let settled = front.clone();
    scene.tick(&mut surface);
    assert_eq!(scene.world().get("front").unwrap(), &settled);
}

#[test]
fn test_repeated_key_cancels_rotation() {
    let mut scene = scene_with_stack();
    let mut surface = RecordingSurface::new(600.0, 600.0);
    let sender = scene.input_sender();

    sender.send(InputEvent::Key(Key::Right)).unwrap();
    scene.tick(&mut surface);
    assert!(!scene.animator().is_idle());

    sender.send(InputEvent::Key(Key::Right)).unwrap();
    scene.tick(&mut surface);
    assert!(scene.animator().is_idle());
    assert_eq!(scene.animator().description(), "Cancelled");
}

#[test]
fn test_graph_scene_uses_static_order() {
    let config = SceneConfig {
        show_grid: true,
        ..SceneConfig::default()
    };
    let mut scene = Scene::init(config, 600.0, 600.0);
    scene
        .import(&graph::series("cos", Color::BLUE, 2.0, -5.0, 5.0, 40, f64::cos), 0.0, 0.0, 0.0)
        .unwrap();
    scene
        .import(&graph::series("sin", Color::RED, 1.0, -5.0, 5.0, 40, f64::sin), 0.0, 0.0, 0.0)
        .unwrap();
    scene
        .import(&graph::axes("axes", 5.0, Color::BLACK), 0.0, 0.0, 0.0)
        .unwrap();

    let mut surface = RecordingSurface::new(600.0, 600.0);
    scene.tick(&mut surface);

    let strokes: Vec<Color> = surface
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::SetStrokeColor(color) if *color != Color::GREY => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(strokes, vec![Color::BLACK, Color::RED, Color::BLUE]);
}

#[test]
fn test_config_from_json_drives_scene() {
    let config: SceneConfig = serde_json::from_str(r#"{ "part_count": 4, "rotate_degrees": 90 }"#).unwrap();
    let mut scene = Scene::init(config, 600.0, 600.0);
    scene
        .import(&shapes::cube("cube", 2.0, Color::RED), 3.0, 0.0, 0.0)
        .unwrap();
    let mut surface = RecordingSurface::new(600.0, 600.0);

    scene.input_sender().send(InputEvent::Key(Key::Char('e'))).unwrap();
    for _ in 0..4 {
        scene.tick(&mut surface);
    }

    let cube = scene.world().get("cube").unwrap();
    assert!(cube.midpoint.x.abs() < 1e-9);
    assert!((cube.midpoint.y - 3.0).abs() < 1e-9);
    scene.dispose();
}
