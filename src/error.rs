//! Engine error types
//!
//! No error here is fatal to the render loop: public setters degrade to a
//! clamped or defaulted value instead of failing, and these variants surface
//! only at boundaries where the caller picks the fallback (registry lookups,
//! persistence).

use crate::effects::EffectId;

/// Errors reported by the engine's boundary operations
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Effect id is not present in the registry
    UnknownEffect(EffectId),
    /// A parameter value fell outside its schema range
    ParameterOutOfRange {
        slot: usize,
        value: f32,
        min: f32,
        max: f32,
    },
    /// A speed or duration was not strictly positive
    InvalidDuration(f32),
    /// No config directory is available for persistence
    NoConfigDir,
    /// Persistence I/O failed
    Io(String),
    /// Snapshot/settings serialization failed
    Serialize(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::UnknownEffect(id) => write!(f, "Unknown effect: {}", id.as_str()),
            EngineError::ParameterOutOfRange {
                slot,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "Parameter slot {} value {} outside range [{}, {}]",
                    slot, value, min, max
                )
            }
            EngineError::InvalidDuration(v) => write!(f, "Duration must be positive, got {}", v),
            EngineError::NoConfigDir => write!(f, "No config directory available"),
            EngineError::Io(msg) => write!(f, "I/O error: {}", msg),
            EngineError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
