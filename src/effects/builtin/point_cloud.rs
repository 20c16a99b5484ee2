//! Point Cloud
//!
//! Drifting, twinkling points scattered on a jittered grid.

use std::f32::consts::TAU;

use glam::Vec2;

use super::centered;
use crate::effects::noise::hash22;
use crate::effects::registry::{EffectDefinition, EffectId};
use crate::effects::types::EffectContext;
use crate::render::color::smoothstep;

pub(super) fn definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::PointCloud,
        display_name: "Point Cloud",
        glyph: ".",
        schema: &[],
        luminance: evaluate,
    }
}

pub(super) fn evaluate(ctx: &EffectContext, uv: Vec2) -> f32 {
    let p = centered(ctx, uv) * 9.0;
    let cell = p.floor();
    let frac = p - cell;

    let mut lum: f32 = 0.0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let offset = Vec2::new(dx as f32, dy as f32);
            let h = hash22(cell + offset);
            let drift = Vec2::new(
                (ctx.elapsed * 0.6 + h.x * TAU).sin(),
                (ctx.elapsed * 0.5 + h.y * TAU).cos(),
            ) * 0.35;
            let to_point = offset + Vec2::splat(0.5) + drift - frac;
            let twinkle = 0.5 + 0.5 * (ctx.elapsed * 2.0 + h.x * 40.0).sin();
            lum += (1.0 - smoothstep(0.05, 0.4, to_point.length())) * twinkle;
        }
    }
    lum.clamp(0.0, 1.0)
}
