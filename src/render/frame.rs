//! Output color field
//!
//! A `Frame` is the per-frame pipeline output: a row-major field of
//! premultiplied RGBA f32 pixels. Premultiplied storage is what the additive
//! crossfade composite and the dim underlay operate on directly; hosts that
//! need straight alpha use [`Frame::to_rgba8`].

use bytemuck::{Pod, Zeroable};

/// One premultiplied RGBA pixel, channels in `[0, 1]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent pixel
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Premultiply a straight color/alpha pair
    pub fn premultiplied(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r * a,
            g: g * a,
            b: b * a,
            a,
        }
    }

    /// Scale all channels (layer opacity on a premultiplied pixel)
    pub fn scaled(self, weight: f32) -> Self {
        Self {
            r: self.r * weight,
            g: self.g * weight,
            b: self.b * weight,
            a: self.a * weight,
        }
    }

    /// Channel-wise sum, clamped to `[0, 1]`
    pub fn saturating_add(self, other: Self) -> Self {
        Self {
            r: (self.r + other.r).min(1.0),
            g: (self.g + other.g).min(1.0),
            b: (self.b + other.b).min(1.0),
            a: (self.a + other.a).min(1.0),
        }
    }
}

/// Row-major premultiplied RGBA color field
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Frame {
    /// Create a transparent frame
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels, row-major
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Mutable access to all pixels, row-major
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Pixel at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * self.width + x]
    }

    /// Store a pixel at `(x, y)`
    pub fn put(&mut self, x: usize, y: usize, pixel: Rgba) {
        self.pixels[y * self.width + x] = pixel;
    }

    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    /// View the field as raw bytes (f32 little-endian quadruples)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Convert to straight-alpha 8-bit RGBA, row-major
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            let (r, g, b) = if p.a > f32::EPSILON {
                (
                    (p.r / p.a).clamp(0.0, 1.0),
                    (p.g / p.a).clamp(0.0, 1.0),
                    (p.b / p.a).clamp(0.0, 1.0),
                )
            } else {
                (0.0, 0.0, 0.0)
            };
            out.push((r * 255.0).round() as u8);
            out.push((g * 255.0).round() as u8);
            out.push((b * 255.0).round() as u8);
            out.push((p.a.clamp(0.0, 1.0) * 255.0).round() as u8);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frame_is_transparent() {
        let frame = Frame::new(4, 3);
        assert_eq!(frame.pixels().len(), 12);
        assert!(frame.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
    }

    #[test]
    fn test_put_get_round_trip() {
        let mut frame = Frame::new(4, 3);
        let pixel = Rgba::premultiplied(1.0, 0.5, 0.25, 0.5);
        frame.put(2, 1, pixel);
        assert_eq!(frame.get(2, 1), pixel);
        assert_eq!(frame.get(0, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_saturating_add_clamps() {
        let a = Rgba::premultiplied(1.0, 1.0, 1.0, 0.8);
        let b = Rgba::premultiplied(1.0, 1.0, 1.0, 0.8);
        let sum = a.saturating_add(b);
        assert_eq!(sum.a, 1.0);
        assert_eq!(sum.r, 1.0);
    }

    #[test]
    fn test_bytes_view_size() {
        let frame = Frame::new(8, 2);
        assert_eq!(frame.as_bytes().len(), 8 * 2 * 4 * std::mem::size_of::<f32>());
    }

    #[test]
    fn test_to_rgba8_unpremultiplies() {
        let mut frame = Frame::new(1, 1);
        frame.put(0, 0, Rgba::premultiplied(1.0, 0.0, 0.0, 0.5));
        let bytes = frame.to_rgba8();
        assert_eq!(bytes, vec![255, 0, 0, 128]);
    }
}
