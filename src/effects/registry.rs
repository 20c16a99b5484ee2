//! Effect registry for managing the available effects
//!
//! The registry holds the catalog of effect definitions and provides lookup
//! and random-pick operations. Registration is append-only: adding an entry
//! never renumbers or alters existing ones.

use std::collections::HashMap;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::{EffectContext, ParameterDef};
use crate::error::EngineError;

/// A pure luminance function: `(context, uv) -> [0, 1]`
pub type LuminanceFn = fn(&EffectContext, Vec2) -> f32;

/// Stable identifiers for the cataloged effects
///
/// Serialized as snake_case strings; these are the persistent keys used by
/// the rating snapshot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum EffectId {
    /// Sentinel: renders nothing, excluded from random pick
    None,
    OrganicFlow,
    Mandala,
    PointCloud,
    Aurora,
    PulseGrid,
    #[default]
    Combined,
    LightGrid,
    CircleWave,
    Interlace,
    Checkerboard,
    WhiteNoise,
    Shimmer,
}

impl EffectId {
    /// Stable snake_case name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectId::None => "none",
            EffectId::OrganicFlow => "organic_flow",
            EffectId::Mandala => "mandala",
            EffectId::PointCloud => "point_cloud",
            EffectId::Aurora => "aurora",
            EffectId::PulseGrid => "pulse_grid",
            EffectId::Combined => "combined",
            EffectId::LightGrid => "light_grid",
            EffectId::CircleWave => "circle_wave",
            EffectId::Interlace => "interlace",
            EffectId::Checkerboard => "checkerboard",
            EffectId::WhiteNoise => "white_noise",
            EffectId::Shimmer => "shimmer",
        }
    }

    /// Parse a stable name back into an id
    pub fn from_name(name: &str) -> Option<EffectId> {
        EffectId::all().iter().copied().find(|id| id.as_str() == name)
    }

    /// Every cataloged id, in catalog order
    pub fn all() -> &'static [EffectId] {
        &[
            EffectId::None,
            EffectId::OrganicFlow,
            EffectId::Mandala,
            EffectId::PointCloud,
            EffectId::Aurora,
            EffectId::PulseGrid,
            EffectId::Combined,
            EffectId::LightGrid,
            EffectId::CircleWave,
            EffectId::Interlace,
            EffectId::Checkerboard,
            EffectId::WhiteNoise,
            EffectId::Shimmer,
        ]
    }
}

/// Immutable catalog entry for one effect
#[derive(Clone, PartialEq)]
pub struct EffectDefinition {
    /// Stable identifier
    pub id: EffectId,
    /// Human-readable name
    pub display_name: &'static str,
    /// Single-glyph icon for compact pickers
    pub glyph: &'static str,
    /// Ordered parameter schema (0..=4 entries); empty means the effect is
    /// non-parametric
    pub schema: &'static [ParameterDef],
    /// The procedural luminance function
    pub luminance: LuminanceFn,
}

impl std::fmt::Debug for EffectDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectDefinition")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("glyph", &self.glyph)
            .field("schema", &self.schema)
            .finish()
    }
}

/// Registry of available effects
///
/// Effects are registered at startup and queried by id. The pipeline falls
/// back to [`EffectRegistry::DEFAULT`] for ids that were never registered so
/// an unknown id can never stall a frame.
pub struct EffectRegistry {
    definitions: Vec<EffectDefinition>,
    index: HashMap<EffectId, usize>,
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EffectRegistry {
    /// The designated fallback effect for unknown ids
    pub const DEFAULT: EffectId = EffectId::Combined;

    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a registry populated with the builtin catalog
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        super::builtin::register_all(&mut registry);
        registry
    }

    /// Register an effect definition (append-only)
    ///
    /// A duplicate id is rejected so existing entries keep their position.
    pub fn register(&mut self, definition: EffectDefinition) {
        if self.index.contains_key(&definition.id) {
            log::warn!(
                "effect '{}' already registered, ignoring duplicate",
                definition.id.as_str()
            );
            return;
        }
        self.index.insert(definition.id, self.definitions.len());
        self.definitions.push(definition);
    }

    /// Look up a definition, failing for unregistered ids
    pub fn lookup(&self, id: EffectId) -> Result<&EffectDefinition, EngineError> {
        self.get(id).ok_or(EngineError::UnknownEffect(id))
    }

    /// Look up a definition by id
    pub fn get(&self, id: EffectId) -> Option<&EffectDefinition> {
        self.index.get(&id).map(|&i| &self.definitions[i])
    }

    /// Resolve an id to a definition, falling back to the default effect
    ///
    /// Returns `None` only when the registry holds neither the id nor any
    /// fallback (an empty custom registry).
    pub fn resolve(&self, id: EffectId) -> Option<&EffectDefinition> {
        if let Some(def) = self.get(id) {
            return Some(def);
        }
        log::warn!(
            "unknown effect '{}', falling back to '{}'",
            id.as_str(),
            Self::DEFAULT.as_str()
        );
        self.get(Self::DEFAULT).or_else(|| self.definitions.first())
    }

    /// Parameter schema for an id (empty for unknown ids)
    pub fn schema(&self, id: EffectId) -> &'static [ParameterDef] {
        self.get(id).map(|def| def.schema).unwrap_or(&[])
    }

    /// Check whether an id is registered
    pub fn contains(&self, id: EffectId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of registered effects
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &EffectDefinition> {
        self.definitions.iter()
    }

    /// Uniformly pick a registered effect, excluding the `None` sentinel
    pub fn pick_random(&self, rng: &mut impl Rng) -> EffectId {
        let candidates: Vec<EffectId> = self
            .definitions
            .iter()
            .map(|def| def.id)
            .filter(|&id| id != EffectId::None)
            .collect();
        if candidates.is_empty() {
            return Self::DEFAULT;
        }
        candidates[rng.random_range(0..candidates.len())]
    }
}
