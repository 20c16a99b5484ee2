//! Layered render pipeline
//!
//! Stage 1 evaluates the effect's luminance field at full resolution, stage 2
//! pre-smooths it when pixelation is on, stage 3 turns it into colored,
//! intensity-weighted output (pixelate, grid lines, contrast, posterize or
//! plain tint). During a crossfade the pipeline runs twice and composites the
//! two layers through the luminance-weighted fade masks.

use glam::{Vec2, Vec3};

use super::blur::box_blur;
use super::color::{posterize, smoothstep};
use super::frame::{Frame, Rgba};
use crate::effects::{EffectContext, EffectDefinition};
use crate::transition::{fade_in_weight, fade_out_weight};

/// Opacity of the black underlay that dims content beneath the overlay,
/// scaled by intensity
const DIM_OPACITY: f32 = 0.3;

/// Post-process stage settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostParams {
    /// Pixelation cell edge in pixels; `<= 1` disables blocking and the grid
    pub block_size: f32,
    /// Grid line darkening, 0 disables lines even when blocking is on
    pub grid_opacity: f32,
    /// Number of posterize bands; `< 2` means plain tint, no quantization
    pub posterize_levels: f32,
    /// Analogous hue offset across posterize bands
    pub hue_spread: f32,
    /// Complementary accent strength in the highlight bands
    pub complement_mix: f32,
}

impl Default for PostParams {
    fn default() -> Self {
        Self {
            block_size: 0.0,
            grid_opacity: 0.6,
            posterize_levels: 5.0,
            hue_spread: 0.10,
            complement_mix: 0.0,
        }
    }
}

/// Per-pixel cell setup: sampling coordinate and grid darkening
struct CellSetup {
    uv: Vec2,
    grid_darken: f32,
}

fn cell_setup(px: Vec2, size: Vec2, block_size: f32, grid_opacity: f32) -> CellSetup {
    let mut uv = px / size;
    let mut grid_darken = 0.0;

    if block_size > 1.0 {
        // Snap to cell centers
        let grid_count = size / block_size;
        uv = ((uv * grid_count).floor() + Vec2::splat(0.5)) / grid_count;

        // One-pixel grid line at the leading edge of each cell
        let cell_pos = px / block_size;
        let cell_pos = cell_pos - cell_pos.floor();
        let line_thickness = 1.0 / block_size;
        let line_x: f32 = if cell_pos.x <= line_thickness { 1.0 } else { 0.0 };
        let line_y = if cell_pos.y <= line_thickness { 1.0 } else { 0.0 };
        grid_darken = line_x.max(line_y) * grid_opacity;
    }

    CellSetup { uv, grid_darken }
}

/// Contrast boost + colorize + grid darken, producing a premultiplied pixel
fn finalize(lum: f32, intensity: f32, theme: Vec3, post: &PostParams, grid_darken: f32) -> Rgba {
    // Aggressive S-curve before colorizing
    let mut lum = smoothstep(0.0, 0.55, lum);
    lum = lum * lum * (3.0 - 2.0 * lum);

    let color = if post.posterize_levels >= 2.0 {
        posterize(
            lum,
            theme,
            post.posterize_levels,
            post.hue_spread,
            post.complement_mix,
        )
    } else {
        theme * lum
    };
    let color = color * (1.0 - grid_darken);

    let alpha = (intensity * lum * 1.5).min(intensity * 0.85).max(0.0);
    let alpha = alpha * (1.0 - grid_darken);

    Rgba::premultiplied(color.x, color.y, color.z, alpha)
}

/// Composite the dim underlay beneath an effect pixel
fn over_dim(pixel: Rgba, intensity: f32) -> Rgba {
    let dim = (intensity * DIM_OPACITY).clamp(0.0, 1.0);
    Rgba {
        a: (pixel.a + dim * (1.0 - pixel.a)).min(1.0),
        ..pixel
    }
}

/// Nearest-sample a scalar field by normalized coordinates
fn sample(field: &[f32], width: usize, height: usize, uv: Vec2) -> f32 {
    let x = ((uv.x * width as f32) as usize).min(width.saturating_sub(1));
    let y = ((uv.y * height as f32) as usize).min(height.saturating_sub(1));
    field[y * width + x]
}

/// Stages 1+2: evaluate the raw field and pre-smooth it for blocking
fn evaluate_field(
    field: &mut Vec<f32>,
    scratch: &mut Vec<f32>,
    def: &EffectDefinition,
    ctx: &EffectContext,
    width: usize,
    height: usize,
    block_size: f32,
) {
    field.clear();
    field.resize(width * height, 0.0);
    for y in 0..height {
        for x in 0..width {
            let uv = Vec2::new(
                (x as f32 + 0.5) / width as f32,
                (y as f32 + 0.5) / height as f32,
            );
            field[y * width + x] = (def.luminance)(ctx, uv).clamp(0.0, 1.0);
        }
    }
    if block_size > 1.0 {
        box_blur(field, scratch, width, height, block_size * 0.4);
    }
}

/// The CPU render pipeline with reusable scratch fields
pub struct RenderPipeline {
    field_a: Vec<f32>,
    field_b: Vec<f32>,
    scratch: Vec<f32>,
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self {
            field_a: Vec::new(),
            field_b: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Render a single effect into `frame`
    pub fn render(
        &mut self,
        frame: &mut Frame,
        def: &EffectDefinition,
        ctx: &EffectContext,
        post: &PostParams,
    ) {
        let (width, height) = (frame.width(), frame.height());
        if width == 0 || height == 0 {
            return;
        }
        evaluate_field(
            &mut self.field_a,
            &mut self.scratch,
            def,
            ctx,
            width,
            height,
            post.block_size,
        );

        let size = Vec2::new(width as f32, height as f32);
        for y in 0..height {
            for x in 0..width {
                let px = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let setup = cell_setup(px, size, post.block_size, post.grid_opacity);
                let lum = sample(&self.field_a, width, height, setup.uv);
                let pixel = finalize(lum, ctx.intensity, ctx.theme, post, setup.grid_darken);
                frame.put(x, y, over_dim(pixel, ctx.intensity));
            }
        }
    }

    /// Render a crossfade between the outgoing and incoming effects
    ///
    /// `progress` is the eased transition progress in `[0, 1]`. Both layers
    /// run the full pipeline; their premultiplied outputs are weighted by the
    /// luminance fade masks and summed.
    #[allow(clippy::too_many_arguments)]
    pub fn render_transition(
        &mut self,
        frame: &mut Frame,
        prev_def: &EffectDefinition,
        prev_ctx: &EffectContext,
        def: &EffectDefinition,
        ctx: &EffectContext,
        post: &PostParams,
        progress: f32,
    ) {
        let (width, height) = (frame.width(), frame.height());
        if width == 0 || height == 0 {
            return;
        }
        evaluate_field(
            &mut self.field_a,
            &mut self.scratch,
            prev_def,
            prev_ctx,
            width,
            height,
            post.block_size,
        );
        evaluate_field(
            &mut self.field_b,
            &mut self.scratch,
            def,
            ctx,
            width,
            height,
            post.block_size,
        );

        let size = Vec2::new(width as f32, height as f32);
        for y in 0..height {
            for x in 0..width {
                let px = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let setup = cell_setup(px, size, post.block_size, post.grid_opacity);

                let lum_out = sample(&self.field_a, width, height, setup.uv);
                let lum_in = sample(&self.field_b, width, height, setup.uv);

                let outgoing =
                    finalize(lum_out, prev_ctx.intensity, prev_ctx.theme, post, setup.grid_darken)
                        .scaled(fade_out_weight(lum_out, progress));
                let incoming = finalize(lum_in, ctx.intensity, ctx.theme, post, setup.grid_darken)
                    .scaled(fade_in_weight(lum_in, progress));

                let combined = outgoing.saturating_add(incoming);
                frame.put(x, y, over_dim(combined, ctx.intensity));
            }
        }
    }
}

/// Additively wash the whole frame with a flat color (completion flash)
pub fn apply_wash(frame: &mut Frame, color: Vec3, opacity: f32) {
    if opacity <= 0.0 {
        return;
    }
    for p in frame.pixels_mut() {
        p.r = (p.r + color.x * opacity).min(1.0);
        p.g = (p.g + color.y * opacity).min(1.0);
        p.b = (p.b + color.z * opacity).min(1.0);
        p.a = (p.a + opacity * (1.0 - p.a)).min(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectId, EffectRegistry};

    const W: usize = 24;
    const H: usize = 16;

    fn context(registry: &EffectRegistry, id: EffectId, intensity: f32) -> EffectContext {
        let def = registry.get(id).unwrap();
        let mut params = [0.0; 4];
        for (i, p) in def.schema.iter().enumerate() {
            params[i] = p.default;
        }
        EffectContext {
            elapsed: 2.3,
            intensity,
            theme: Vec3::new(0.3, 0.6, 1.0),
            size: Vec2::new(W as f32, H as f32),
            params,
        }
    }

    fn disabled_post() -> PostParams {
        PostParams {
            block_size: 0.0,
            grid_opacity: 0.6,
            posterize_levels: 0.0,
            hue_spread: 0.10,
            complement_mix: 0.0,
        }
    }

    #[test]
    fn test_disabled_stages_match_a_pipeline_without_them() {
        let registry = EffectRegistry::builtin();
        let def = registry.get(EffectId::Aurora).unwrap();
        let ctx = context(&registry, EffectId::Aurora, 0.8);

        let mut pipeline = RenderPipeline::new();
        let mut frame = Frame::new(W, H);
        pipeline.render(&mut frame, def, &ctx, &disabled_post());

        // Reference: raw luminance -> contrast -> plain tint -> dim, with the
        // blur/pixelate/grid/posterize stages absent altogether
        for y in 0..H {
            for x in 0..W {
                let uv = Vec2::new((x as f32 + 0.5) / W as f32, (y as f32 + 0.5) / H as f32);
                let raw = (def.luminance)(&ctx, uv).clamp(0.0, 1.0);
                let mut lum = smoothstep(0.0, 0.55, raw);
                lum = lum * lum * (3.0 - 2.0 * lum);
                let color = ctx.theme * lum;
                let alpha = (ctx.intensity * lum * 1.5).min(ctx.intensity * 0.85);
                let expected = over_dim(
                    Rgba::premultiplied(color.x, color.y, color.z, alpha),
                    ctx.intensity,
                );
                assert_eq!(frame.get(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_transition_endpoints_match_single_renders() {
        let registry = EffectRegistry::builtin();
        let prev_def = registry.get(EffectId::Aurora).unwrap();
        let def = registry.get(EffectId::Mandala).unwrap();
        let prev_ctx = context(&registry, EffectId::Aurora, 0.8);
        let ctx = context(&registry, EffectId::Mandala, 0.8);
        let post = PostParams::default();

        let mut pipeline = RenderPipeline::new();

        let mut only_prev = Frame::new(W, H);
        pipeline.render(&mut only_prev, prev_def, &prev_ctx, &post);
        let mut only_new = Frame::new(W, H);
        pipeline.render(&mut only_new, def, &ctx, &post);

        let mut start = Frame::new(W, H);
        pipeline.render_transition(&mut start, prev_def, &prev_ctx, def, &ctx, &post, 0.0);
        assert_eq!(start, only_prev);

        let mut end = Frame::new(W, H);
        pipeline.render_transition(&mut end, prev_def, &prev_ctx, def, &ctx, &post, 1.0);
        assert_eq!(end, only_new);
    }

    #[test]
    fn test_pixelation_produces_flat_cells() {
        let registry = EffectRegistry::builtin();
        let def = registry.get(EffectId::OrganicFlow).unwrap();
        let ctx = context(&registry, EffectId::OrganicFlow, 1.0);
        let post = PostParams {
            block_size: 8.0,
            grid_opacity: 0.0,
            ..PostParams::default()
        };

        let mut pipeline = RenderPipeline::new();
        let mut frame = Frame::new(W, H);
        pipeline.render(&mut frame, def, &ctx, &post);

        // Pixels within one cell (and off the grid line) are identical
        assert_eq!(frame.get(2, 2), frame.get(6, 6));
        assert_eq!(frame.get(10, 2), frame.get(14, 6));
    }

    #[test]
    fn test_grid_lines_darken_cell_edges() {
        let registry = EffectRegistry::builtin();
        let def = registry.get(EffectId::Aurora).unwrap();
        let ctx = context(&registry, EffectId::Aurora, 1.0);
        let post = PostParams {
            block_size: 8.0,
            grid_opacity: 1.0,
            ..PostParams::default()
        };

        let mut pipeline = RenderPipeline::new();
        let mut frame = Frame::new(W, H);
        pipeline.render(&mut frame, def, &ctx, &post);

        // Full-opacity grid lines zero the effect layer; only the dim
        // underlay remains on the edge pixel
        let edge = frame.get(0, 4);
        assert_eq!(edge.r, 0.0);
        assert_eq!(edge.g, 0.0);
        assert_eq!(edge.b, 0.0);
    }

    #[test]
    fn test_zero_intensity_leaves_only_transparent_output() {
        let registry = EffectRegistry::builtin();
        let def = registry.get(EffectId::Combined).unwrap();
        let ctx = context(&registry, EffectId::Combined, 0.0);

        let mut pipeline = RenderPipeline::new();
        let mut frame = Frame::new(W, H);
        pipeline.render(&mut frame, def, &ctx, &PostParams::default());

        for p in frame.pixels() {
            assert_eq!(p.a, 0.0);
        }
    }

    #[test]
    fn test_wash_lifts_every_pixel() {
        let mut frame = Frame::new(4, 4);
        apply_wash(&mut frame, Vec3::new(1.0, 1.0, 1.0), 0.4);
        for p in frame.pixels() {
            assert!((p.r - 0.4).abs() < 1e-6);
            assert!((p.a - 0.4).abs() < 1e-6);
        }
    }
}
