//! Completion flash cue
//!
//! A tiered attack/hold/fade envelope fired when the host reports a finished
//! task. Levels are pure functions of the trigger timestamp; re-triggering
//! restarts the envelope.

use std::time::Instant;

/// How celebratory the flash is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashTier {
    /// Brief white blink
    Short,
    /// Theme-colored flash with a visible border glow
    Medium,
    /// Long celebration with the strongest glow
    Long,
}

/// Envelope shape for one tier
#[derive(Debug, Clone, Copy)]
struct Envelope {
    peak_fill: f32,
    peak_border: f32,
    hold: f32,
    fade: f32,
}

/// Rise time shared by all tiers
const ATTACK: f32 = 0.08;

impl FlashTier {
    /// All tiers in escalation order
    pub fn all() -> &'static [FlashTier] {
        &[FlashTier::Short, FlashTier::Medium, FlashTier::Long]
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            FlashTier::Short => "Short",
            FlashTier::Medium => "Medium",
            FlashTier::Long => "Long",
        }
    }

    /// Whether this tier flashes white instead of the theme color
    pub fn is_white(&self) -> bool {
        matches!(self, FlashTier::Short)
    }

    fn envelope(self) -> Envelope {
        match self {
            FlashTier::Short => Envelope {
                peak_fill: 0.12,
                peak_border: 0.0,
                hold: 0.0,
                fade: 0.25,
            },
            FlashTier::Medium => Envelope {
                peak_fill: 0.45,
                peak_border: 0.7,
                hold: 0.2,
                fade: 0.8,
            },
            FlashTier::Long => Envelope {
                peak_fill: 0.7,
                peak_border: 1.0,
                hold: 0.8,
                fade: 3.0,
            },
        }
    }
}

/// Current flash opacities
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlashLevels {
    /// Full-surface wash opacity
    pub fill: f32,
    /// Border/glow opacity (host chrome)
    pub border: f32,
}

/// The flash envelope state
#[derive(Debug, Clone, Default)]
pub struct FlashCue {
    current: Option<(FlashTier, Instant)>,
}

impl FlashCue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire (or restart) the flash
    pub fn trigger(&mut self, tier: FlashTier, now: Instant) {
        log::debug!("flash triggered: {}", tier.label());
        self.current = Some((tier, now));
    }

    /// Cancel any in-flight flash
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The tier currently flashing, if any
    pub fn tier(&self, now: Instant) -> Option<FlashTier> {
        let (tier, start) = self.current?;
        let env = tier.envelope();
        let t = now.duration_since(start).as_secs_f32();
        (t < ATTACK + env.hold + env.fade).then_some(tier)
    }

    /// Envelope levels at `now` (zero when idle or expired)
    pub fn levels(&self, now: Instant) -> FlashLevels {
        let Some((tier, start)) = self.current else {
            return FlashLevels::default();
        };
        let env = tier.envelope();
        let t = now.duration_since(start).as_secs_f32();

        let shape = if t < ATTACK {
            // Ease-in rise
            let u = t / ATTACK;
            u * u
        } else if t < ATTACK + env.hold {
            1.0
        } else if t < ATTACK + env.hold + env.fade {
            // Ease-out decay
            let u = (t - ATTACK - env.hold) / env.fade;
            (1.0 - u) * (1.0 - u)
        } else {
            0.0
        };

        FlashLevels {
            fill: env.peak_fill * shape,
            border: env.peak_border * shape,
        }
    }
}
