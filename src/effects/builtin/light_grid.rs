//! Light Grid
//!
//! Cells flashing out of phase, optionally grouped so neighbors share a
//! phase.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::effects::noise::hash21;
use crate::effects::registry::{EffectDefinition, EffectId};
use crate::effects::types::{EffectContext, ParameterDef};

const SCHEMA: &[ParameterDef] = &[
    ParameterDef::new("Density", 8.0, 1.0, 50.0),
    ParameterDef::new("Speed", 3.0, 1.0, 20.0),
    ParameterDef::new("Group Size", 1.0, 1.0, 8.0),
    ParameterDef::new("Brightness", 3.0, 0.2, 10.0),
];

pub(super) fn definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::LightGrid,
        display_name: "Light Grid",
        glyph: "=",
        schema: SCHEMA,
        luminance: evaluate,
    }
}

fn evaluate(ctx: &EffectContext, uv: Vec2) -> f32 {
    let density = ctx.params[0].max(1.0);
    let speed = ctx.params[1];
    let group = ctx.params[2].max(1.0);
    let brightness = ctx.params[3];

    // Group adjacent cells so they flash together
    let cell = (uv * density / group).floor() * group;
    let h = hash21(cell);

    let flash = 0.5 + 0.5 * (ctx.elapsed * speed * (0.5 + h * 0.5) + h * TAU).sin();
    (flash.powi(3) * brightness * 0.33).clamp(0.0, 1.0)
}
