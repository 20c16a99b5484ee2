//! Pre-pixelation blur
//!
//! A separable box blur over the scalar luminance field. The pipeline runs
//! it with `radius = block_size * 0.4` before blocking so coarse cells sample
//! smoothed values instead of aliasing.

/// Blur a `width * height` scalar field in place
///
/// `scratch` is resized as needed and holds the horizontal pass. A radius
/// rounding to zero pixels leaves the field untouched.
pub fn box_blur(
    field: &mut [f32],
    scratch: &mut Vec<f32>,
    width: usize,
    height: usize,
    radius: f32,
) {
    let r = radius.round().max(0.0) as usize;
    if r == 0 || width == 0 || height == 0 {
        return;
    }
    scratch.clear();
    scratch.resize(width * height, 0.0);

    // Horizontal pass: field -> scratch
    for y in 0..height {
        let row = &field[y * width..(y + 1) * width];
        for x in 0..width {
            let lo = x.saturating_sub(r);
            let hi = (x + r + 1).min(width);
            let sum: f32 = row[lo..hi].iter().sum();
            scratch[y * width + x] = sum / (hi - lo) as f32;
        }
    }

    // Vertical pass: scratch -> field
    for x in 0..width {
        for y in 0..height {
            let lo = y.saturating_sub(r);
            let hi = (y + r + 1).min(height);
            let mut sum = 0.0;
            for row in lo..hi {
                sum += scratch[row * width + x];
            }
            field[y * width + x] = sum / (hi - lo) as f32;
        }
    }
}
