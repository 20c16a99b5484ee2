//! Builtin effect catalog
//!
//! Each effect lives in its own module and contributes one
//! [`EffectDefinition`]. The six ambient modes (Organic Flow through
//! Combined) are non-parametric; the remaining effects expose up to four
//! bounded parameters.

mod aurora;
mod checkerboard;
mod circle_wave;
mod combined;
mod interlace;
mod light_grid;
mod mandala;
mod organic_flow;
mod point_cloud;
mod pulse_grid;
mod shimmer;
mod white_noise;

use glam::Vec2;

use super::registry::{EffectDefinition, EffectId, EffectRegistry};
use super::types::EffectContext;

/// Register the full builtin catalog, in stable catalog order
pub fn register_all(registry: &mut EffectRegistry) {
    registry.register(none_definition());
    registry.register(organic_flow::definition());
    registry.register(mandala::definition());
    registry.register(point_cloud::definition());
    registry.register(aurora::definition());
    registry.register(pulse_grid::definition());
    registry.register(combined::definition());
    registry.register(light_grid::definition());
    registry.register(circle_wave::definition());
    registry.register(interlace::definition());
    registry.register(checkerboard::definition());
    registry.register(white_noise::definition());
    registry.register(shimmer::definition());
}

/// The `None` sentinel: a cataloged entry that renders nothing
fn none_definition() -> EffectDefinition {
    EffectDefinition {
        id: EffectId::None,
        display_name: "None",
        glyph: " ",
        schema: &[],
        luminance: |_ctx, _uv| 0.0,
    }
}

/// Centered, aspect-corrected coordinates (x scaled by width/height)
fn centered(ctx: &EffectContext, uv: Vec2) -> Vec2 {
    let mut c = uv * 2.0 - Vec2::ONE;
    c.x *= ctx.size.x / ctx.size.y.max(1.0);
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::types::PARAM_SLOTS;
    use glam::{Vec2, Vec3};

    fn context(def: &EffectDefinition) -> EffectContext {
        let mut params = [0.0; PARAM_SLOTS];
        for (i, p) in def.schema.iter().enumerate() {
            params[i] = p.default;
        }
        EffectContext {
            elapsed: 1.75,
            intensity: 1.0,
            theme: Vec3::new(0.3, 0.6, 1.0),
            size: Vec2::new(320.0, 200.0),
            params,
        }
    }

    #[test]
    fn test_catalog_is_complete() {
        let registry = EffectRegistry::builtin();
        for &id in EffectId::all() {
            assert!(registry.contains(id), "missing catalog entry for {:?}", id);
        }
        assert_eq!(registry.len(), EffectId::all().len());
    }

    #[test]
    fn test_schemas_are_well_formed() {
        let registry = EffectRegistry::builtin();
        for def in registry.iter() {
            assert!(
                def.schema.len() <= PARAM_SLOTS,
                "{:?} schema too long",
                def.id
            );
            for p in def.schema {
                assert!(p.min < p.max, "{:?} '{}' empty range", def.id, p.name);
                assert!(
                    p.contains(p.default),
                    "{:?} '{}' default outside range",
                    def.id,
                    p.name
                );
            }
        }
    }

    #[test]
    fn test_luminance_stays_normalized() {
        let registry = EffectRegistry::builtin();
        for def in registry.iter() {
            let ctx = context(def);
            for yi in 0..12 {
                for xi in 0..12 {
                    let uv = Vec2::new(xi as f32 / 11.0, yi as f32 / 11.0);
                    let lum = (def.luminance)(&ctx, uv);
                    assert!(
                        (0.0..=1.0).contains(&lum),
                        "{:?} luminance {} at {:?}",
                        def.id,
                        lum,
                        uv
                    );
                    assert!(lum.is_finite());
                }
            }
        }
    }

    #[test]
    fn test_sentinel_renders_nothing() {
        let registry = EffectRegistry::builtin();
        let def = registry.get(EffectId::None).unwrap();
        let ctx = context(def);
        assert_eq!((def.luminance)(&ctx, Vec2::new(0.5, 0.5)), 0.0);
    }
}
