//! Aurora
//!
//! A glowing curtain displaced by low-frequency noise, with vertical streaks.

use glam::Vec2;

use super::centered;
use crate::effects::noise::{fbm, simplex2d};
use crate::effects::registry::{EffectDefinition, EffectId};
use crate::effects::types::EffectContext;

pub(super) fn definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::Aurora,
        display_name: "Aurora",
        glyph: "/",
        schema: &[],
        luminance: evaluate,
    }
}

pub(super) fn evaluate(ctx: &EffectContext, uv: Vec2) -> f32 {
    let p = centered(ctx, uv);
    let t = ctx.elapsed;

    // Curtain centerline wanders with slow noise
    let band = fbm(Vec2::new(p.x * 1.5, t * 0.15), t * 0.5);
    let distance = (p.y - band * 0.6).abs();
    let glow = (-distance * 3.0).exp();

    let streaks = 0.5 + 0.5 * simplex2d(Vec2::new(p.x * 6.0, t * 0.8));
    (glow * (0.4 + 0.6 * streaks)).clamp(0.0, 1.0)
}
