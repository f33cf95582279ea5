use thiserror::Error;

/// Rejected phase schedules.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("phase schedule must contain at least one phase")]
    Empty,
    #[error("phase {index} has non-positive duration {duration_ms}ms")]
    NonPositiveDuration { index: usize, duration_ms: f64 },
}

/// Rejected 3D scene configurations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("scene needs at least {min} items, got {got}")]
    TooFewItems { min: usize, got: usize },
    #[error("grid must have at least one segment per axis (got {x}x{z})")]
    EmptyGrid { x: u32, z: u32 },
    #[error("proficiency {0} is outside [0, 1]")]
    Proficiency(f32),
}
