//! Render subsystem
//!
//! Turns an effect's luminance field into the final colored overlay frame:
//! raw evaluation, optional pre-pixelation blur, and the post-process stage
//! (pixelate, grid lines, contrast, posterize/tint), plus the two-layer
//! crossfade composite used during transitions.

pub mod blur;
pub mod color;
pub mod frame;
pub mod pipeline;

pub use frame::{Frame, Rgba};
pub use pipeline::{PostParams, RenderPipeline};
