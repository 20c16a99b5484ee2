//! Procedural noise primitives
//!
//! Hash, simplex and warped fbm noise shared by the builtin effects. The
//! constants follow the common GPU shader formulations so the fields match
//! their established look.

use glam::{Vec2, Vec3};

/// GLSL-style fract: always in `[0, 1)`, also for negative inputs
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
fn fract2(v: Vec2) -> Vec2 {
    Vec2::new(fract(v.x), fract(v.y))
}

#[inline]
fn fract3(v: Vec3) -> Vec3 {
    Vec3::new(fract(v.x), fract(v.y), fract(v.z))
}

/// Hash a 2D point to one pseudo-random value in `[0, 1)`
pub fn hash21(p: Vec2) -> f32 {
    let mut p3 = fract3(Vec3::new(p.x, p.y, p.x) * 0.1031);
    p3 += Vec3::splat(p3.dot(Vec3::new(p3.y, p3.z, p3.x) + Vec3::splat(33.33)));
    fract((p3.x + p3.y) * p3.z)
}

/// Hash a 2D point to two pseudo-random values in `[0, 1)`
pub fn hash22(p: Vec2) -> Vec2 {
    let mut p3 = fract3(Vec3::new(p.x, p.y, p.x) * Vec3::new(0.1031, 0.1030, 0.0973));
    p3 += Vec3::splat(p3.dot(Vec3::new(p3.y, p3.z, p3.x) + Vec3::splat(33.33)));
    fract2(Vec2::new((p3.x + p3.y) * p3.z, (p3.x + p3.z) * p3.y))
}

/// 2D simplex noise, roughly in `[-1, 1]`
pub fn simplex2d(p: Vec2) -> f32 {
    const K1: f32 = 0.366_025_4; // (sqrt(3) - 1) / 2
    const K2: f32 = 0.211_324_87; // (3 - sqrt(3)) / 6

    let i = (p + Vec2::splat((p.x + p.y) * K1)).floor();
    let a = p - i + Vec2::splat((i.x + i.y) * K2);
    let o = if a.x > a.y {
        Vec2::new(1.0, 0.0)
    } else {
        Vec2::new(0.0, 1.0)
    };
    let b = a - o + Vec2::splat(K2);
    let c = a - Vec2::ONE + Vec2::splat(2.0 * K2);

    let mut h = Vec3::new(
        0.5 - a.length_squared(),
        0.5 - b.length_squared(),
        0.5 - c.length_squared(),
    )
    .max(Vec3::ZERO);
    h = h * h * h * h;

    let ga = hash22(i) * 2.0 - Vec2::ONE;
    let gb = hash22(i + o) * 2.0 - Vec2::ONE;
    let gc = hash22(i + Vec2::ONE) * 2.0 - Vec2::ONE;

    let n = h * Vec3::new(ga.dot(a), gb.dot(b), gc.dot(c));
    n.dot(Vec3::splat(70.0))
}

/// Five-octave fractal brownian motion with a time-animated domain warp
pub fn fbm(p: Vec2, time: f32) -> f32 {
    let warp = Vec2::new(
        simplex2d(p + Vec2::new(0.0, time * 0.3)),
        simplex2d(p + Vec2::new(5.2, time * 0.36)),
    );
    let mut p = p + warp * 0.5;

    let mut value = 0.0;
    let mut amplitude = 0.5;
    let shift = Vec2::splat(100.0);
    for _ in 0..5 {
        value += amplitude * simplex2d(p);
        p = p * 2.0 + shift;
        amplitude *= 0.5;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fract_handles_negatives() {
        assert_eq!(fract(1.25), 0.25);
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_hash_range_and_determinism() {
        for i in 0..100 {
            let p = Vec2::new(i as f32 * 1.7, i as f32 * -0.3);
            let h = hash21(p);
            assert!((0.0..1.0).contains(&h), "hash21 out of range: {}", h);
            assert_eq!(h, hash21(p));

            let h2 = hash22(p);
            assert!((0.0..1.0).contains(&h2.x));
            assert!((0.0..1.0).contains(&h2.y));
        }
    }

    #[test]
    fn test_simplex_bounded() {
        for i in 0..200 {
            let p = Vec2::new(i as f32 * 0.37, (i as f32 * 0.61).sin() * 10.0);
            let n = simplex2d(p);
            assert!(n.abs() <= 1.5, "simplex2d unbounded at {:?}: {}", p, n);
        }
    }

    #[test]
    fn test_fbm_varies_with_time() {
        let p = Vec2::new(0.3, 0.7);
        assert_ne!(fbm(p, 0.0), fbm(p, 5.0));
    }
}
