//! Crossfade transition controller
//!
//! Watches the active effect id once per frame and runs a timed crossfade
//! whenever it changes while the overlay is visible. At most one transition
//! is in flight; a change during a crossfade restarts it with the most
//! recently active id as the new outgoing effect (the accepted
//! approximation: no N-way blending).

use std::time::{Duration, Instant};

use crate::effects::EffectId;
use crate::render::color::smoothstep;

/// Smallest accepted transition duration in seconds
pub const MIN_TRANSITION: f32 = 0.05;

/// An in-flight crossfade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The outgoing effect
    pub previous: EffectId,
    /// When the crossfade started
    pub started: Instant,
}

/// Detects effect changes and tracks crossfade progress
#[derive(Debug, Clone)]
pub struct TransitionController {
    duration: Duration,
    current: Option<Transition>,
    last_seen: Option<EffectId>,
}

impl TransitionController {
    /// Create a controller with the given crossfade duration in seconds
    pub fn new(duration_secs: f32) -> Self {
        let mut controller = Self {
            duration: Duration::from_secs_f32(MIN_TRANSITION),
            current: None,
            last_seen: None,
        };
        controller.set_duration(duration_secs);
        controller
    }

    /// Set the crossfade duration, clamping invalid values to [`MIN_TRANSITION`]
    pub fn set_duration(&mut self, secs: f32) {
        if !secs.is_finite() || secs < MIN_TRANSITION {
            log::warn!(
                "invalid transition duration {}, clamping to {}",
                secs,
                MIN_TRANSITION
            );
            self.duration = Duration::from_secs_f32(MIN_TRANSITION);
        } else {
            self.duration = Duration::from_secs_f32(secs);
        }
    }

    /// Crossfade duration in seconds
    pub fn duration_secs(&self) -> f32 {
        self.duration.as_secs_f32()
    }

    /// Observe the active effect for this frame
    ///
    /// Starts a crossfade when the id changed while visible; a change while
    /// hidden switches without one.
    pub fn observe(&mut self, active: EffectId, visible: bool, now: Instant) {
        match self.last_seen {
            Some(previous) if previous != active => {
                if visible {
                    log::info!(
                        "crossfade {} -> {}",
                        previous.as_str(),
                        active.as_str()
                    );
                    self.current = Some(Transition {
                        previous,
                        started: now,
                    });
                } else {
                    self.current = None;
                }
                self.last_seen = Some(active);
            }
            Some(_) => {}
            None => self.last_seen = Some(active),
        }
    }

    /// Clear the transition record once the crossfade has completed
    pub fn update(&mut self, now: Instant) {
        if let Some(t) = self.current {
            if now.duration_since(t.started) >= self.duration {
                self.current = None;
            }
        }
    }

    /// The in-flight transition, if any
    pub fn active(&self) -> Option<&Transition> {
        self.current.as_ref()
    }

    /// Unclamped linear progress of the in-flight transition
    pub fn raw_progress(&self, now: Instant) -> Option<f32> {
        self.current.map(|t| {
            (now.duration_since(t.started).as_secs_f32() / self.duration.as_secs_f32())
                .clamp(0.0, 1.0)
        })
    }

    /// Smoothstep-eased progress with the outgoing effect id
    pub fn progress(&self, now: Instant) -> Option<(EffectId, f32)> {
        let transition = self.current?;
        let raw = self.raw_progress(now)?;
        Some((transition.previous, smoothstep(0.0, 1.0, raw)))
    }
}

/// Opacity of the outgoing layer for a pixel of the given luminance
///
/// Brighter pixels fade out first: full weight at `progress == 0`, zero at
/// `progress == 1`, and the bright end of the field reaches zero earliest.
#[inline]
pub fn fade_out_weight(lum: f32, progress: f32) -> f32 {
    (1.0 - progress * (1.0 + lum)).clamp(0.0, 1.0)
}

/// Opacity of the incoming layer for a pixel of the given luminance
///
/// Mirror of [`fade_out_weight`]: brighter pixels reach full opacity first.
#[inline]
pub fn fade_in_weight(lum: f32, progress: f32) -> f32 {
    (progress * (1.0 + lum)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(t0: Instant, millis: u64) -> Instant {
        t0 + Duration::from_millis(millis)
    }

    #[test]
    fn test_first_observation_starts_nothing() {
        let t0 = Instant::now();
        let mut c = TransitionController::new(2.0);
        c.observe(EffectId::Aurora, true, t0);
        assert!(c.active().is_none());
    }

    #[test]
    fn test_change_while_visible_starts_crossfade() {
        let t0 = Instant::now();
        let mut c = TransitionController::new(2.0);
        c.observe(EffectId::Aurora, true, t0);
        c.observe(EffectId::Mandala, true, at(t0, 100));

        let transition = c.active().expect("crossfade in flight");
        assert_eq!(transition.previous, EffectId::Aurora);
    }

    #[test]
    fn test_change_while_hidden_switches_without_crossfade() {
        let t0 = Instant::now();
        let mut c = TransitionController::new(2.0);
        c.observe(EffectId::Aurora, false, t0);
        c.observe(EffectId::Mandala, false, at(t0, 100));
        assert!(c.active().is_none());

        // And the new id is the baseline for later changes
        c.observe(EffectId::Shimmer, true, at(t0, 200));
        assert_eq!(c.active().unwrap().previous, EffectId::Mandala);
    }

    #[test]
    fn test_smoothstep_midpoint_is_exact() {
        let t0 = Instant::now();
        let mut c = TransitionController::new(2.0);
        c.observe(EffectId::Aurora, true, t0);
        c.observe(EffectId::Mandala, true, t0);

        // At t = 1.0s of a 2.0s transition, raw progress is 0.5 and the
        // smoothstep value is exactly 0.5
        assert_eq!(c.raw_progress(at(t0, 1_000)), Some(0.5));
        let (_, eased) = c.progress(at(t0, 1_000)).unwrap();
        assert_eq!(eased, 0.5);
    }

    #[test]
    fn test_record_clears_after_completion() {
        let t0 = Instant::now();
        let mut c = TransitionController::new(2.0);
        c.observe(EffectId::Aurora, true, t0);
        c.observe(EffectId::Mandala, true, t0);

        c.update(at(t0, 1_999));
        assert!(c.active().is_some());
        assert_eq!(c.raw_progress(at(t0, 2_500)), Some(1.0));

        c.update(at(t0, 2_000));
        assert!(c.active().is_none());
    }

    #[test]
    fn test_restart_uses_most_recent_id_as_previous() {
        let t0 = Instant::now();
        let mut c = TransitionController::new(2.0);
        c.observe(EffectId::Aurora, true, t0);
        c.observe(EffectId::Mandala, true, at(t0, 100));
        // Second change mid-flight: restart from Mandala, not Aurora
        c.observe(EffectId::Shimmer, true, at(t0, 600));

        let transition = c.active().unwrap();
        assert_eq!(transition.previous, EffectId::Mandala);
        assert_eq!(c.raw_progress(at(t0, 600)), Some(0.0));
    }

    #[test]
    fn test_duration_clamps_to_positive_minimum() {
        let c = TransitionController::new(0.0);
        assert_eq!(c.duration_secs(), MIN_TRANSITION);
        let c = TransitionController::new(-1.0);
        assert_eq!(c.duration_secs(), MIN_TRANSITION);
    }

    #[test]
    fn test_fade_weights_at_the_endpoints() {
        for lum in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(fade_out_weight(lum, 0.0), 1.0);
            assert_eq!(fade_out_weight(lum, 1.0), 0.0);
            assert_eq!(fade_in_weight(lum, 0.0), 0.0);
            assert_eq!(fade_in_weight(lum, 1.0), 1.0);
        }
    }

    #[test]
    fn test_brighter_pixels_lead_the_fade() {
        // Mid-transition the bright pixel is further along in both directions
        assert!(fade_out_weight(1.0, 0.4) < fade_out_weight(0.0, 0.4));
        assert!(fade_in_weight(1.0, 0.4) > fade_in_weight(0.0, 0.4));
    }
}
