//! Mandala
//!
//! Rotationally symmetric petals intersecting slow radial rings.

use glam::Vec2;

use super::centered;
use crate::effects::registry::{EffectDefinition, EffectId};
use crate::effects::types::EffectContext;
use crate::render::color::smoothstep;

pub(super) fn definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::Mandala,
        display_name: "Mandala",
        glyph: "*",
        schema: &[],
        luminance: evaluate,
    }
}

pub(super) fn evaluate(ctx: &EffectContext, uv: Vec2) -> f32 {
    let p = centered(ctx, uv);
    let r = p.length();
    let angle = p.y.atan2(p.x);
    let t = ctx.elapsed * 0.3;

    let petals = (angle * 8.0 + t).sin();
    let rings = (r * 9.0 - t * 2.0).sin();
    let field = petals * rings * 0.5 + 0.5;

    // Fade toward the edges so the figure stays centered
    let falloff = 1.0 - smoothstep(0.2, 1.3, r) * 0.8;
    (field * falloff).clamp(0.0, 1.0)
}
