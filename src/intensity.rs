//! Activity/focus intensity state machine
//!
//! Drives the single scalar overlay intensity toward targets determined by
//! the activity and focus flags. Visibility is decoupled from the intensity
//! reaching zero: the overlay stays visible through the whole deactivation
//! fade, and a re-activation during the fade cancels the pending hide. All
//! timing is expressed as eased ramps evaluated against stored timestamps;
//! nothing is scheduled.

use std::time::{Duration, Instant};

/// Upper bound for the intensity targets
pub const MAX_INTENSITY_CEILING: f32 = 1.5;

/// Easing curve applied to a ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    /// Quadratic ease-in (slow start)
    In,
    /// Quadratic ease-out (slow finish)
    Out,
    /// Cubic ease-in-out
    InOut,
}

impl Ease {
    fn apply(self, t: f32) -> f32 {
        match self {
            Ease::In => t * t,
            Ease::Out => t * (2.0 - t),
            Ease::InOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// A timed ramp from one intensity to another
#[derive(Debug, Clone, Copy)]
struct Ramp {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    ease: Ease,
}

impl Ramp {
    fn value(&self, now: Instant) -> f32 {
        let duration = self.duration.as_secs_f32();
        if duration <= f32::EPSILON {
            return self.to;
        }
        let t = (now.duration_since(self.start).as_secs_f32() / duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    fn finished(&self, now: Instant) -> bool {
        now.duration_since(self.start) >= self.duration
    }
}

/// Lifecycle phase of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Intensity zero, overlay invisible
    Idle,
    /// Easing in toward the focus-dependent target
    Activating,
    /// Tracking the focus-dependent target
    Active,
    /// Easing to zero; overlay still visible until the fade completes
    Deactivating,
}

/// Tuning for the intensity machine
#[derive(Debug, Clone)]
pub struct IntensityConfig {
    /// Target while active and unfocused
    pub max_intensity: f32,
    /// Target while active and focused
    pub focused_intensity: f32,
    /// Ease duration when focus turns on
    pub focus_in: Duration,
    /// Ease duration when focus turns off
    pub focus_out: Duration,
    /// Ease-in duration for activation (independent of the focus durations)
    pub activate: Duration,
    /// Ease-out duration for deactivation
    pub deactivate: Duration,
    /// Extra delay after the fade before the overlay hides
    pub hide_grace: Duration,
    /// Short re-ease used when a target value is edited live
    pub retarget: Duration,
}

impl Default for IntensityConfig {
    fn default() -> Self {
        Self {
            max_intensity: 1.0,
            focused_intensity: 0.08,
            focus_in: Duration::from_millis(200),
            focus_out: Duration::from_millis(500),
            activate: Duration::from_millis(400),
            deactivate: Duration::from_millis(500),
            hide_grace: Duration::from_millis(100),
            retarget: Duration::from_millis(150),
        }
    }
}

/// The four-state intensity driver
#[derive(Debug, Clone)]
pub struct IntensityDriver {
    config: IntensityConfig,
    phase: Phase,
    ramp: Option<Ramp>,
    visible: bool,
    active: bool,
    focused: bool,
}

impl IntensityDriver {
    /// Create an idle driver
    pub fn new(config: IntensityConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            ramp: None,
            visible: false,
            active: false,
            focused: true,
        }
    }

    /// Current intensity value
    pub fn value(&self, now: Instant) -> f32 {
        self.ramp.map(|r| r.value(now)).unwrap_or(0.0)
    }

    /// Whether the overlay should be drawn at all
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether activity is currently on
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the surface is currently focused
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Tuning values
    pub fn config(&self) -> &IntensityConfig {
        &self.config
    }

    fn active_target(&self) -> f32 {
        if self.focused {
            self.config.focused_intensity
        } else {
            self.config.max_intensity
        }
    }

    fn retarget(&mut self, to: f32, duration: Duration, ease: Ease, now: Instant) {
        let from = self.value(now);
        self.ramp = Some(Ramp {
            from,
            to,
            start: now,
            duration,
            ease,
        });
    }

    /// Turn activity on or off
    ///
    /// Returns `true` when the overlay just became visible (the caller
    /// re-anchors the animation clock on that edge).
    pub fn set_active(&mut self, active: bool, now: Instant) -> bool {
        if active == self.active {
            return false;
        }
        self.active = active;

        if active {
            let became_visible = !self.visible;
            self.visible = true;
            // A re-activation during the fade cancels the pending hide
            self.phase = Phase::Activating;
            self.retarget(self.active_target(), self.config.activate, Ease::In, now);
            became_visible
        } else {
            if matches!(self.phase, Phase::Activating | Phase::Active) {
                self.phase = Phase::Deactivating;
                self.retarget(0.0, self.config.deactivate, Ease::Out, now);
            }
            false
        }
    }

    /// Toggle the focus flag, re-targeting intensity while active
    pub fn set_focused(&mut self, focused: bool, now: Instant) {
        if focused == self.focused {
            return;
        }
        self.focused = focused;

        if !self.active || !matches!(self.phase, Phase::Activating | Phase::Active) {
            return;
        }
        if focused {
            self.retarget(
                self.config.focused_intensity,
                self.config.focus_in,
                Ease::Out,
                now,
            );
        } else {
            self.retarget(
                self.config.max_intensity,
                self.config.focus_out,
                Ease::In,
                now,
            );
        }
    }

    /// Update the unfocused target, re-easing immediately when it is live
    pub fn set_max_intensity(&mut self, value: f32, now: Instant) {
        let value = value.clamp(0.0, MAX_INTENSITY_CEILING);
        self.config.max_intensity = value;
        if self.active && !self.focused {
            self.retarget(value, self.config.retarget, Ease::InOut, now);
        }
    }

    /// Update the focused target, re-easing immediately when it is live
    pub fn set_focused_intensity(&mut self, value: f32, now: Instant) {
        let value = value.clamp(0.0, MAX_INTENSITY_CEILING);
        self.config.focused_intensity = value;
        if self.active && self.focused {
            self.retarget(value, self.config.retarget, Ease::InOut, now);
        }
    }

    /// Update the focus ease durations
    pub fn set_focus_durations(&mut self, focus_in: Duration, focus_out: Duration) {
        self.config.focus_in = focus_in;
        self.config.focus_out = focus_out;
    }

    /// Advance discrete state: activation completion and the deferred hide
    pub fn update(&mut self, now: Instant) {
        match self.phase {
            Phase::Activating => {
                if self.ramp.map(|r| r.finished(now)).unwrap_or(true) {
                    self.phase = Phase::Active;
                }
            }
            Phase::Deactivating => {
                let hidden_at = self
                    .ramp
                    .map(|r| r.start + r.duration + self.config.hide_grace);
                if !self.active && hidden_at.map(|t| now >= t).unwrap_or(true) {
                    self.phase = Phase::Idle;
                    self.visible = false;
                    self.ramp = None;
                    log::debug!("overlay hidden");
                }
            }
            Phase::Idle | Phase::Active => {}
        }
    }
}
