//! Shimmer
//!
//! A diagonal highlight band sweeping across the surface on a fixed cycle.

use glam::Vec2;

use crate::effects::noise::fract;
use crate::effects::registry::{EffectDefinition, EffectId};
use crate::effects::types::{EffectContext, ParameterDef};
use crate::render::color::smoothstep;

const SCHEMA: &[ParameterDef] = &[
    ParameterDef::new("Duration", 2.0, 0.5, 5.0),
    ParameterDef::new("Gradient Width", 0.3, 0.1, 1.0),
    ParameterDef::new("Max Lightness", 0.5, 0.0, 1.0),
];

pub(super) fn definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::Shimmer,
        display_name: "Shimmer",
        glyph: "^",
        schema: SCHEMA,
        luminance: evaluate,
    }
}

fn evaluate(ctx: &EffectContext, uv: Vec2) -> f32 {
    let duration = ctx.params[0].max(0.05);
    let width = ctx.params[1].clamp(0.05, 1.0);
    let max_lightness = ctx.params[2];

    // Sweep travels past both edges so the band fully clears the surface
    let phase = fract(ctx.elapsed / duration);
    let sweep = phase * (1.0 + 2.0 * width) - width;

    let coord = (uv.x + uv.y) * 0.5;
    let d = ((coord - sweep) / width).abs();
    ((1.0 - smoothstep(0.0, 1.0, d)) * max_lightness).clamp(0.0, 1.0)
}
