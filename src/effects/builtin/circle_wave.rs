//! Circle Wave
//!
//! Rings expanding from the center, sharpened by a strength exponent.

use glam::Vec2;

use super::centered;
use crate::effects::registry::{EffectDefinition, EffectId};
use crate::effects::types::{EffectContext, ParameterDef};
use crate::render::color::smoothstep;

const SCHEMA: &[ParameterDef] = &[
    ParameterDef::new("Brightness", 3.0, 0.5, 10.0),
    ParameterDef::new("Speed", 2.0, 0.5, 10.0),
    ParameterDef::new("Strength", 1.5, 0.5, 5.0),
    ParameterDef::new("Density", 40.0, 5.0, 100.0),
];

pub(super) fn definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::CircleWave,
        display_name: "Circle Wave",
        glyph: "o",
        schema: SCHEMA,
        luminance: evaluate,
    }
}

fn evaluate(ctx: &EffectContext, uv: Vec2) -> f32 {
    let brightness = ctx.params[0];
    let speed = ctx.params[1];
    let strength = ctx.params[2];
    let density = ctx.params[3];

    let d = centered(ctx, uv).length();
    let wave = ((d * density - ctx.elapsed * speed).sin() * 0.5 + 0.5).powf(strength);
    let falloff = 1.0 - smoothstep(0.0, 1.4, d);

    (wave * falloff * brightness * 0.35).clamp(0.0, 1.0)
}
