//! Checkerboard
//!
//! Alternating cells at a subtle fixed lightness.

use glam::Vec2;

use crate::effects::registry::{EffectDefinition, EffectId};
use crate::effects::types::{EffectContext, ParameterDef};

const SCHEMA: &[ParameterDef] = &[ParameterDef::new("Size", 12.0, 4.0, 40.0)];

pub(super) fn definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::Checkerboard,
        display_name: "Checkerboard",
        glyph: "%",
        schema: SCHEMA,
        luminance: evaluate,
    }
}

fn evaluate(ctx: &EffectContext, uv: Vec2) -> f32 {
    let size = ctx.params[0].max(1.0);
    let cell = (uv * ctx.size / size).floor();
    if (cell.x + cell.y).rem_euclid(2.0) < 1.0 {
        0.3
    } else {
        0.0
    }
}
