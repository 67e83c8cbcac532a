//! wire3d core library - world space, transforms and depth-order rendering
//!
//! This library holds everything that does not touch a real screen: the
//! matrix engine, the object model, the queued-operation animator and the
//! painter's-algorithm renderer that draws through a [`DrawingSurface`].

pub mod animator;
pub mod config;
pub mod demo;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod input;
pub mod render;
pub mod scene;
pub mod shapes;
pub mod sketch;
pub mod stl;
pub mod surface;
pub mod transform;
pub mod world;

// Re-export commonly used types
pub use animator::{Animator, Operation, OperationKind, OperationRequest};
pub use config::{LinkConfig, SceneConfig};
pub use error::SceneError;
pub use geometry::{Color, Edge, LabelAlign, Object, Point, Surface};
pub use input::{InputEvent, Key};
pub use render::{Layout, RenderOptions, Renderer};
pub use scene::Scene;
pub use sketch::Sketch;
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface};
pub use transform::{Matrix, Transform};
pub use world::WorldSpace;
