//! Effect subsystem
//!
//! The registry holds the catalog of effect definitions (display name, glyph,
//! parameter schema, luminance function); the types module carries the
//! parameter data model shared between the registry and the live engine
//! state.

pub mod builtin;
pub mod noise;
pub mod registry;
pub mod types;

pub use registry::{EffectDefinition, EffectId, EffectRegistry, LuminanceFn};
pub use types::{EffectContext, ParamSlots, ParameterDef, PARAM_SLOTS};
