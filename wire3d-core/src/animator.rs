//! Operation animator
//!
//! One logical transform (rotate, scale or translate by a total amount) is
//! spread across many animation ticks. The per-tick increment matrix is
//! derived once, when the operation is set up, and then applied to the whole
//! world on every tick.
//!
//! Only scaling stops by itself, after `part_count` ticks. Rotation and
//! translation run until cancelled by repeating the request that started
//! them.
use std::fmt;

use crate::transform::{Matrix, Transform};
use crate::world::WorldSpace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Rotate,
    Scale,
    Translate,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Rotate => write!(f, "Rotating"),
            OperationKind::Scale => write!(f, "Scaling"),
            OperationKind::Translate => write!(f, "Translating"),
        }
    }
}

/// A request to start a queued operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationRequest {
    pub kind: OperationKind,
    pub total_frames: u32,
    pub part_count: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl OperationRequest {
    pub fn new(kind: OperationKind, total_frames: u32, part_count: u32, x: f64, y: f64, z: f64) -> Self {
        Self {
            kind,
            total_frames,
            part_count,
            x,
            y,
            z,
        }
    }

    /// The matrix applied on each tick
    pub fn increment(&self) -> Matrix {
        let parts = f64::from(self.part_count.max(1));
        let mut m = Transform::identity();
        match self.kind {
            OperationKind::Rotate => {
                if self.x != 0.0 {
                    m = Transform::rotate_x(&m, self.x / parts);
                }
                if self.y != 0.0 {
                    m = Transform::rotate_y(&m, self.y / parts);
                }
                if self.z != 0.0 {
                    m = Transform::rotate_z(&m, self.z / parts);
                }
            }
            OperationKind::Scale => {
                // Linear interpolation of the factor, not a compounding one
                let step = |factor: f64| if factor != 1.0 { (factor - 1.0) / parts + 1.0 } else { 1.0 };
                m = Transform::scale(&m, step(self.x), step(self.y), step(self.z));
            }
            OperationKind::Translate => {
                m = Transform::translate(&m, self.x / parts, self.y / parts, self.z / parts);
            }
        }
        m
    }

    fn describe(&self) -> String {
        format!(
            "{} by ({}, {}, {}) in {} parts over {} frames",
            self.kind, self.x, self.y, self.z, self.part_count, self.total_frames
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueuedOperation {
    pub kind: OperationKind,
    pub remaining_parts: i64,
    pub increment: Matrix,
    pub description: String,
}

/// Current animator state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Operation {
    #[default]
    Nothing,
    Active(QueuedOperation),
}

#[derive(Debug)]
pub struct Animator {
    operation: Operation,
    previous: Option<OperationRequest>,
    status: String,
}

impl Animator {
    pub fn new() -> Self {
        Self {
            operation: Operation::Nothing,
            previous: None,
            status: "Nothing queued".to_string(),
        }
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.operation, Operation::Nothing)
    }

    /// Parts left on the active operation; zero when idle
    pub fn remaining_parts(&self) -> i64 {
        match &self.operation {
            Operation::Nothing => 0,
            Operation::Active(op) => op.remaining_parts,
        }
    }

    /// Human-readable state of the animator
    pub fn description(&self) -> &str {
        match &self.operation {
            Operation::Active(op) => &op.description,
            Operation::Nothing => &self.status,
        }
    }

    /// Start a new operation, or cancel the running one if `request`
    /// repeats the request that started it.
    pub fn set_up_operation(&mut self, request: OperationRequest) {
        if !self.is_idle() && self.previous.as_ref() == Some(&request) {
            self.cancel();
            return;
        }

        let description = request.describe();
        log::debug!("set up operation: {description}");

        self.operation = Operation::Active(QueuedOperation {
            kind: request.kind,
            remaining_parts: i64::from(request.part_count),
            increment: request.increment(),
            description,
        });
        self.previous = Some(request);
    }

    pub fn cancel(&mut self) {
        if let Operation::Active(op) = &self.operation {
            log::debug!("cancelled: {}", op.description);
            self.operation = Operation::Nothing;
            self.status = "Cancelled".to_string();
        }
    }

    /// Advance the running operation by one part. Returns whether the world
    /// was changed.
    pub fn apply_step(&mut self, world: &mut WorldSpace) -> bool {
        let op = match &mut self.operation {
            Operation::Nothing => return false,
            Operation::Active(op) => op,
        };

        if op.kind == OperationKind::Scale && op.remaining_parts < 1 {
            self.complete();
            return false;
        }

        world.apply(&op.increment);
        op.remaining_parts = op.remaining_parts.saturating_sub(1);

        if op.kind == OperationKind::Scale && op.remaining_parts < 1 {
            self.complete();
        }
        true
    }

    fn complete(&mut self) {
        if let Operation::Active(op) = &self.operation {
            log::debug!("complete: {}", op.description);
        }
        self.operation = Operation::Nothing;
        self.status = "Complete".to_string();
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}
