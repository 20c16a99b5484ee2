//! White Noise
//!
//! Per-pixel static, re-seeded every frame.

use glam::Vec2;

use crate::effects::noise::{fract, hash21};
use crate::effects::registry::{EffectDefinition, EffectId};
use crate::effects::types::EffectContext;

pub(super) fn definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::WhiteNoise,
        display_name: "White Noise",
        glyph: "?",
        schema: &[],
        luminance: evaluate,
    }
}

fn evaluate(ctx: &EffectContext, uv: Vec2) -> f32 {
    let seed = fract(ctx.elapsed) * 917.0;
    hash21(uv * ctx.size + Vec2::splat(seed)).clamp(0.0, 1.0)
}
