//! Animation clock
//!
//! Produces the monotonically increasing elapsed-time signal the effects
//! consume. The anchor resets on every invisible-to-visible edge so effects
//! restart from zero each time the overlay appears. The clock never reads
//! wall time itself; the host passes `now` in, which keeps every timed
//! behavior testable with a synthetic timeline.

use std::time::Instant;

/// Smallest accepted speed multiplier; lower/invalid values clamp here
pub const MIN_SPEED: f32 = 0.01;

/// Elapsed-time source scaled by a speed multiplier
#[derive(Debug, Clone)]
pub struct AnimationClock {
    anchor: Instant,
    speed: f32,
}

impl AnimationClock {
    /// Create a clock anchored at `now` with unit speed
    pub fn new(now: Instant) -> Self {
        Self {
            anchor: now,
            speed: 1.0,
        }
    }

    /// Scaled seconds since the anchor (zero if `now` precedes it)
    pub fn elapsed(&self, now: Instant) -> f32 {
        now.duration_since(self.anchor).as_secs_f32() * self.speed
    }

    /// Re-anchor the clock at `now`
    pub fn reset(&mut self, now: Instant) {
        self.anchor = now;
    }

    /// Current speed multiplier
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the speed multiplier, clamping invalid values to [`MIN_SPEED`]
    ///
    /// The speed rescales the whole timeline (`elapsed = (now - anchor) *
    /// speed`), matching the overlay's original behavior.
    pub fn set_speed(&mut self, speed: f32) {
        if !speed.is_finite() || speed < MIN_SPEED {
            log::warn!("invalid clock speed {}, clamping to {}", speed, MIN_SPEED);
            self.speed = MIN_SPEED;
        } else {
            self.speed = speed;
        }
    }
}
