//! Organic Flow
//!
//! Slow domain-warped noise drifting across the surface.

use glam::Vec2;

use super::centered;
use crate::effects::noise::fbm;
use crate::effects::registry::{EffectDefinition, EffectId};
use crate::effects::types::EffectContext;

pub(super) fn definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::OrganicFlow,
        display_name: "Organic Flow",
        glyph: "~",
        schema: &[],
        luminance: evaluate,
    }
}

pub(super) fn evaluate(ctx: &EffectContext, uv: Vec2) -> f32 {
    let p = centered(ctx, uv);
    let t = ctx.elapsed * 0.25;

    let n = fbm(p * 1.8 + Vec2::new(t * 0.4, -t * 0.2), ctx.elapsed);
    (n * 0.5 + 0.5).clamp(0.0, 1.0)
}
