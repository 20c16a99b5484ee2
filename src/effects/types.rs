//! Core effect data types
//!
//! These types define the parameter data model for effects. Schemas are
//! static descriptions owned by the registry; `ParamSlots` is the live value
//! store for the currently selected effect.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of fixed parameter slots available to an effect
pub const PARAM_SLOTS: usize = 4;

/// Metadata for one tunable parameter (describes the parameter, doesn't hold
/// the value)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterDef {
    /// Display label
    pub name: &'static str,
    /// Default value, restored on selection change
    pub default: f32,
    /// Inclusive minimum
    pub min: f32,
    /// Inclusive maximum
    pub max: f32,
}

impl ParameterDef {
    /// Create a new parameter definition
    ///
    /// Invariants (`min < max`, `default` within range) are checked for the
    /// builtin catalog by test; custom registrations are expected to hold
    /// them too.
    pub const fn new(name: &'static str, default: f32, min: f32, max: f32) -> Self {
        Self {
            name,
            default,
            min,
            max,
        }
    }

    /// Clamp a value into this parameter's range
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Check whether a value lies within the range
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Live values for the four fixed parameter slots
///
/// At most `schema.len()` slots are meaningful for the active effect; the
/// rest are carried along untouched and ignored by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamSlots {
    values: [f32; PARAM_SLOTS],
}

impl Default for ParamSlots {
    fn default() -> Self {
        Self {
            values: [0.0; PARAM_SLOTS],
        }
    }
}

impl ParamSlots {
    /// Create slots initialized to a schema's defaults
    pub fn from_schema(schema: &[ParameterDef]) -> Self {
        let mut slots = Self::default();
        slots.reset(schema);
        slots
    }

    /// Reset every schema-covered slot to its default, zeroing the rest
    pub fn reset(&mut self, schema: &[ParameterDef]) {
        for (i, value) in self.values.iter_mut().enumerate() {
            *value = schema.get(i).map(|def| def.default).unwrap_or(0.0);
        }
    }

    /// Store a value into a slot, clamped to the schema range for that slot
    ///
    /// Returns the value actually stored. Slots beyond the schema have no
    /// range and store the value as given; out-of-bounds indices are ignored.
    pub fn set(&mut self, index: usize, value: f32, schema: &[ParameterDef]) -> f32 {
        let Some(slot) = self.values.get_mut(index) else {
            log::warn!("parameter slot {} out of bounds, ignoring", index);
            return 0.0;
        };
        let stored = match schema.get(index) {
            Some(def) => {
                let clamped = def.clamp(value);
                if clamped != value {
                    log::debug!(
                        "parameter '{}' clamped from {} to {}",
                        def.name,
                        value,
                        clamped
                    );
                }
                clamped
            }
            None => value,
        };
        *slot = stored;
        stored
    }

    /// Read a slot value (0.0 for out-of-bounds indices)
    pub fn get(&self, index: usize) -> f32 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    /// Sample every schema-covered slot uniformly from its range
    ///
    /// Slots beyond the schema are left untouched. Deterministic for a seeded
    /// `rng`.
    pub fn randomize(&mut self, schema: &[ParameterDef], rng: &mut impl Rng) {
        for (i, def) in schema.iter().take(PARAM_SLOTS).enumerate() {
            self.values[i] = rng.random_range(def.min..=def.max);
        }
    }

    /// All four slot values in order
    pub fn as_array(&self) -> [f32; PARAM_SLOTS] {
        self.values
    }
}

/// Inputs to a procedural effect evaluation for one frame
///
/// Effects output normalized luminance only; the theme color is provided
/// because a few effects use it to weight an accent region, never as an
/// output tint.
#[derive(Debug, Clone, Copy)]
pub struct EffectContext {
    /// Scaled seconds since the overlay became visible
    pub elapsed: f32,
    /// Current overlay intensity
    pub intensity: f32,
    /// Theme color, linear RGB
    pub theme: Vec3,
    /// Output size in pixels
    pub size: Vec2,
    /// Slot values for the effect's schema
    pub params: [f32; PARAM_SLOTS],
}
