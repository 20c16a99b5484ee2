//! Pulse Grid
//!
//! A cell grid whose lines and nodes pulse with per-cell phase offsets.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::effects::noise::{fract, hash21};
use crate::effects::registry::{EffectDefinition, EffectId};
use crate::effects::types::EffectContext;
use crate::render::color::smoothstep;

/// Cell edge length in pixels
const CELL_SIZE: f32 = 48.0;

pub(super) fn definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::PulseGrid,
        display_name: "Pulse Grid",
        glyph: "#",
        schema: &[],
        luminance: evaluate,
    }
}

pub(super) fn evaluate(ctx: &EffectContext, uv: Vec2) -> f32 {
    let px = uv * ctx.size;
    let g = px / CELL_SIZE;
    let cell = g.floor();

    let lx = (fract(g.x) - 0.5).abs();
    let ly = (fract(g.y) - 0.5).abs();

    // Lines live at the cell edges, nodes at the centers
    let edge = smoothstep(0.42, 0.5, lx.max(ly));
    let node = 1.0 - smoothstep(0.0, 0.25, Vec2::new(lx, ly).length());

    let pulse = 0.5 + 0.5 * (ctx.elapsed * 2.0 + hash21(cell) * TAU).sin();
    (edge * (0.3 + 0.7 * pulse) + node * pulse * 0.6).clamp(0.0, 1.0)
}
