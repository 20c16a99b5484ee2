//! Combined
//!
//! Weighted blend of the ambient modes; the default effect.

use glam::Vec2;

use crate::effects::registry::{EffectDefinition, EffectId};
use crate::effects::types::EffectContext;

pub(super) fn definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::Combined,
        display_name: "Combined",
        glyph: "+",
        schema: &[],
        luminance: evaluate,
    }
}

pub(super) fn evaluate(ctx: &EffectContext, uv: Vec2) -> f32 {
    let flow = super::organic_flow::evaluate(ctx, uv);
    let aurora = super::aurora::evaluate(ctx, uv);
    let grid = super::pulse_grid::evaluate(ctx, uv);
    (flow * 0.5 + aurora * 0.35 + grid * 0.3).clamp(0.0, 1.0)
}
