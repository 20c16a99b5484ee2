//! Engine facade
//!
//! `OverlayEngine` owns all engine state and exposes the host-facing control
//! surface: effect selection, parameter edits, activity/focus toggles, tuning
//! knobs, rating tiers, the flash cue, and the per-frame `render` entry
//! point. It is explicitly constructed and owned by the host; there is no
//! global state and no internal locking. The host serializes frame reads
//! against control writes.
//!
//! Every time-dependent method takes an explicit `now` so the whole engine
//! can be driven on a synthetic timeline in tests.

use std::time::{Duration, Instant};

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::clock::AnimationClock;
use crate::effects::{EffectContext, EffectId, EffectRegistry, ParamSlots, PARAM_SLOTS};
use crate::flash::{FlashCue, FlashLevels, FlashTier};
use crate::intensity::{IntensityConfig, IntensityDriver, Phase};
use crate::rating::{RatingBoard, RatingSnapshot, Tier};
use crate::render::pipeline::apply_wash;
use crate::render::{Frame, PostParams, RenderPipeline};
use crate::settings::EngineSettings;
use crate::transition::TransitionController;

/// A consistent per-frame view of the engine state for host UIs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineStatus {
    /// The selected effect
    pub effect: EffectId,
    /// Scaled seconds since the overlay became visible
    pub elapsed: f32,
    /// Current overlay intensity
    pub intensity: f32,
    /// Whether the overlay is drawn at all
    pub visible: bool,
    /// Lifecycle phase of the intensity machine
    pub phase: Phase,
    /// In-flight crossfade: outgoing id and eased progress
    pub transition: Option<(EffectId, f32)>,
    /// Live parameter slot values
    pub params: [f32; PARAM_SLOTS],
}

/// The overlay effects engine
pub struct OverlayEngine {
    registry: EffectRegistry,
    settings: EngineSettings,
    active: EffectId,
    slots: ParamSlots,
    clock: AnimationClock,
    intensity: IntensityDriver,
    transitions: TransitionController,
    pipeline: RenderPipeline,
    ratings: RatingBoard,
    flash: FlashCue,
}

impl OverlayEngine {
    /// Create an engine with the builtin catalog
    pub fn new(settings: EngineSettings, now: Instant) -> Self {
        Self::with_registry(EffectRegistry::builtin(), settings, now)
    }

    /// Create an engine with a custom registry
    pub fn with_registry(registry: EffectRegistry, settings: EngineSettings, now: Instant) -> Self {
        let intensity_config = IntensityConfig {
            max_intensity: settings.max_intensity,
            focused_intensity: settings.focused_intensity,
            focus_in: Duration::from_secs_f32(settings.focus_in_secs.max(0.0)),
            focus_out: Duration::from_secs_f32(settings.focus_out_secs.max(0.0)),
            ..IntensityConfig::default()
        };
        let active = EffectRegistry::DEFAULT;
        let slots = ParamSlots::from_schema(registry.schema(active));
        let transitions = TransitionController::new(settings.transition_secs);

        let mut clock = AnimationClock::new(now);
        clock.set_speed(settings.speed);

        Self {
            registry,
            settings,
            active,
            slots,
            clock,
            intensity: IntensityDriver::new(intensity_config),
            transitions,
            pipeline: RenderPipeline::new(),
            ratings: RatingBoard::seeded(),
            flash: FlashCue::new(),
        }
    }

    // --- Accessors -----------------------------------------------------

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn active_effect(&self) -> EffectId {
        self.active
    }

    /// Live parameter slot values
    pub fn parameters(&self) -> [f32; PARAM_SLOTS] {
        self.slots.as_array()
    }

    pub fn ratings(&self) -> &RatingBoard {
        &self.ratings
    }

    /// Replace the rating board (e.g. with one loaded from disk)
    pub fn set_ratings(&mut self, board: RatingBoard) {
        self.ratings = board;
    }

    // --- Effect selection & parameters ---------------------------------

    /// Select the active effect
    ///
    /// Unknown ids fall back to the default effect. Selection resets the
    /// parameter slots to the new effect's schema defaults before first use.
    pub fn set_active_effect(&mut self, id: EffectId) {
        let id = if self.registry.contains(id) {
            id
        } else {
            log::warn!(
                "unknown effect '{}', selecting '{}'",
                id.as_str(),
                EffectRegistry::DEFAULT.as_str()
            );
            EffectRegistry::DEFAULT
        };
        if id == self.active {
            return;
        }
        self.active = id;
        self.slots.reset(self.registry.schema(id));
        log::info!("effect selected: {}", id.as_str());
    }

    /// Store a parameter value, clamped to the active schema's range
    pub fn set_parameter(&mut self, slot: usize, value: f32) {
        self.slots.set(slot, value, self.registry.schema(self.active));
    }

    /// Reset the parameter slots to the active effect's schema defaults
    pub fn reset_parameters(&mut self) {
        self.slots.reset(self.registry.schema(self.active));
    }

    /// Sample every parameter of the active effect uniformly from its range
    pub fn randomize_all(&mut self, rng: &mut impl Rng) {
        self.slots
            .randomize(self.registry.schema(self.active), rng);
    }

    /// Select a uniformly random effect (excluding the sentinel) and
    /// randomize its parameters
    pub fn pick_random_effect(&mut self, rng: &mut impl Rng) {
        let id = self.registry.pick_random(rng);
        self.set_active_effect(id);
        self.randomize_all(rng);
    }

    // --- Activity, focus, timing ---------------------------------------

    /// Turn overlay activity on or off
    pub fn set_activity(&mut self, active: bool, now: Instant) {
        if self.intensity.set_active(active, now) {
            // Invisible -> visible edge: effects restart from zero
            self.clock.reset(now);
            log::info!("overlay shown");
        }
    }

    /// Report focus changes of the host surface
    pub fn set_focus(&mut self, focused: bool, now: Instant) {
        self.intensity.set_focused(focused, now);
    }

    /// Set the animation speed multiplier (clamped to a positive minimum)
    pub fn set_speed(&mut self, speed: f32) {
        self.clock.set_speed(speed);
        self.settings.speed = self.clock.speed();
    }

    /// Set the unfocused intensity target, re-easing live if applicable
    pub fn set_max_intensity(&mut self, value: f32, now: Instant) {
        self.intensity.set_max_intensity(value, now);
        self.settings.max_intensity = self.intensity.config().max_intensity;
    }

    /// Set the focused intensity target, re-easing live if applicable
    pub fn set_focused_intensity(&mut self, value: f32, now: Instant) {
        self.intensity.set_focused_intensity(value, now);
        self.settings.focused_intensity = self.intensity.config().focused_intensity;
    }

    /// Set the focus ease durations in seconds
    pub fn set_focus_durations(&mut self, focus_in_secs: f32, focus_out_secs: f32) {
        let focus_in = focus_in_secs.max(0.0);
        let focus_out = focus_out_secs.max(0.0);
        self.intensity.set_focus_durations(
            Duration::from_secs_f32(focus_in),
            Duration::from_secs_f32(focus_out),
        );
        self.settings.focus_in_secs = focus_in;
        self.settings.focus_out_secs = focus_out;
    }

    /// Set the crossfade duration in seconds (clamped to a positive minimum)
    pub fn set_transition_duration(&mut self, secs: f32) {
        self.transitions.set_duration(secs);
        self.settings.transition_secs = self.transitions.duration_secs();
    }

    // --- Post-process knobs --------------------------------------------

    pub fn set_theme_color(&mut self, r: f32, g: f32, b: f32) {
        self.settings.theme = [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)];
    }

    pub fn set_block_size(&mut self, block_size: f32) {
        self.settings.block_size = block_size.max(0.0);
    }

    pub fn set_grid_opacity(&mut self, opacity: f32) {
        self.settings.grid_opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_posterize_levels(&mut self, levels: f32) {
        self.settings.posterize_levels = levels.max(0.0);
    }

    pub fn set_hue_spread(&mut self, spread: f32) {
        self.settings.hue_spread = spread.clamp(0.0, 0.5);
    }

    pub fn set_complement_mix(&mut self, mix: f32) {
        self.settings.complement_mix = mix.clamp(0.0, 1.0);
    }

    // --- Flash cue ------------------------------------------------------

    /// Fire the completion flash
    pub fn trigger_flash(&mut self, tier: FlashTier, now: Instant) {
        self.flash.trigger(tier, now);
    }

    /// Current flash levels (the border level is host chrome)
    pub fn flash_levels(&self, now: Instant) -> FlashLevels {
        self.flash.levels(now)
    }

    // --- Ratings --------------------------------------------------------

    /// Toggle an effect's membership in a rating tier
    pub fn toggle_tier(&mut self, id: EffectId, tier: Tier) -> Option<Tier> {
        self.ratings.toggle(id, tier)
    }

    /// The tier an effect currently belongs to
    pub fn tier_of(&self, id: EffectId) -> Option<Tier> {
        self.ratings.tier_of(id)
    }

    /// Serializable snapshot of the rating state
    pub fn rating_snapshot(&self) -> RatingSnapshot {
        self.ratings.snapshot()
    }

    // --- Per-frame ------------------------------------------------------

    /// Advance discrete state: intensity phases and crossfade lifecycle
    pub fn update(&mut self, now: Instant) {
        self.intensity.update(now);
        self.transitions
            .observe(self.active, self.intensity.visible(), now);
        self.transitions.update(now);
    }

    /// A consistent snapshot of the observable state
    pub fn status(&self, now: Instant) -> EngineStatus {
        EngineStatus {
            effect: self.active,
            elapsed: self.clock.elapsed(now),
            intensity: self.intensity.value(now),
            visible: self.intensity.visible(),
            phase: self.intensity.phase(),
            transition: self.transitions.progress(now),
            params: self.slots.as_array(),
        }
    }

    fn post_params(&self) -> PostParams {
        PostParams {
            block_size: self.settings.block_size,
            grid_opacity: self.settings.grid_opacity,
            posterize_levels: self.settings.posterize_levels,
            hue_spread: self.settings.hue_spread,
            complement_mix: self.settings.complement_mix,
        }
    }

    fn context(&self, id: EffectId, size: Vec2, intensity: f32, elapsed: f32) -> EffectContext {
        let params = if id == self.active {
            self.slots.as_array()
        } else {
            // The outgoing layer of a crossfade renders with its defaults:
            // its live values were replaced on selection change
            ParamSlots::from_schema(self.registry.schema(id)).as_array()
        };
        EffectContext {
            elapsed,
            intensity,
            theme: self.settings.theme_color(),
            size,
            params,
        }
    }

    /// Run the full pipeline for one frame
    ///
    /// Returns a transparent frame while the overlay is hidden. Includes
    /// crossfade compositing and the flash wash.
    pub fn render(&mut self, width: usize, height: usize, now: Instant) -> Frame {
        self.update(now);

        let mut frame = Frame::new(width, height);
        if !self.intensity.visible() {
            return frame;
        }

        let Some(def) = self.registry.resolve(self.active) else {
            return frame;
        };
        let intensity = self.intensity.value(now);
        let elapsed = self.clock.elapsed(now);
        let size = Vec2::new(width as f32, height as f32);
        let post = self.post_params();

        match self.transitions.progress(now) {
            Some((previous, progress)) if self.registry.resolve(previous).is_some() => {
                let prev_def = self.registry.resolve(previous).unwrap();
                let prev_ctx = self.context(prev_def.id, size, intensity, elapsed);
                let ctx = self.context(def.id, size, intensity, elapsed);
                self.pipeline.render_transition(
                    &mut frame, prev_def, &prev_ctx, def, &ctx, &post, progress,
                );
            }
            _ => {
                let ctx = self.context(def.id, size, intensity, elapsed);
                self.pipeline.render(&mut frame, def, &ctx, &post);
            }
        }

        let levels = self.flash.levels(now);
        if levels.fill > 0.0 {
            let color = match self.flash.tier(now) {
                Some(tier) if tier.is_white() => Vec3::ONE,
                _ => self.settings.theme_color(),
            };
            apply_wash(&mut frame, color, levels.fill);
        }

        frame
    }
}
