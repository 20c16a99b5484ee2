//! Scanlines
//!
//! Horizontal interlace lines darkening alternating rows.

use glam::Vec2;

use crate::effects::noise::fract;
use crate::effects::registry::{EffectDefinition, EffectId};
use crate::effects::types::{EffectContext, ParameterDef};

const SCHEMA: &[ParameterDef] = &[
    ParameterDef::new("Line Width", 3.0, 1.0, 10.0),
    ParameterDef::new("Strength", 0.5, 0.0, 1.0),
];

pub(super) fn definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::Interlace,
        display_name: "Scanlines",
        glyph: "-",
        schema: SCHEMA,
        luminance: evaluate,
    }
}

fn evaluate(ctx: &EffectContext, uv: Vec2) -> f32 {
    let width = ctx.params[0].max(1.0);
    let strength = ctx.params[1];

    let y = uv.y * ctx.size.y;
    let dark_row = fract(y / (width * 2.0)) < 0.5;

    let base = 0.85;
    if dark_row {
        (base * (1.0 - strength)).clamp(0.0, 1.0)
    } else {
        base
    }
}
