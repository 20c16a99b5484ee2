//! Rating classifier
//!
//! Assigns catalog entries to at most one of four mutually exclusive tiers.
//! The board is plain data with explicit mutation functions; the host loads a
//! snapshot at startup and saves on every change. Load failures fall back
//! silently to the seeded default classification.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::effects::EffectId;
use crate::error::EngineError;

/// The four mutually exclusive rating tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Best,
    Good,
    Mid,
    Rejected,
}

impl Tier {
    /// All tiers in display order
    pub fn all() -> &'static [Tier] {
        &[Tier::Best, Tier::Good, Tier::Mid, Tier::Rejected]
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Best => "Best",
            Tier::Good => "Good",
            Tier::Mid => "Mid",
            Tier::Rejected => "Rejected",
        }
    }

    fn index(self) -> usize {
        match self {
            Tier::Best => 0,
            Tier::Good => 1,
            Tier::Mid => 2,
            Tier::Rejected => 3,
        }
    }
}

/// Serializable snapshot of the board
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSnapshot {
    #[serde(default)]
    pub best: Vec<EffectId>,
    #[serde(default)]
    pub good: Vec<EffectId>,
    #[serde(default)]
    pub mid: Vec<EffectId>,
    #[serde(default)]
    pub rejected: Vec<EffectId>,
}

/// The live rating state: four pairwise disjoint id sets
#[derive(Debug, Clone, PartialEq)]
pub struct RatingBoard {
    tiers: [BTreeSet<EffectId>; 4],
}

impl Default for RatingBoard {
    fn default() -> Self {
        Self::seeded()
    }
}

impl RatingBoard {
    /// A board with nothing rated
    pub fn empty() -> Self {
        Self {
            tiers: Default::default(),
        }
    }

    /// The first-run default classification
    pub fn seeded() -> Self {
        let mut board = Self::empty();
        for id in [EffectId::Combined, EffectId::Aurora] {
            board.tiers[Tier::Best.index()].insert(id);
        }
        for id in [
            EffectId::OrganicFlow,
            EffectId::CircleWave,
            EffectId::LightGrid,
        ] {
            board.tiers[Tier::Good.index()].insert(id);
        }
        for id in [EffectId::Mandala, EffectId::PulseGrid, EffectId::Shimmer] {
            board.tiers[Tier::Mid.index()].insert(id);
        }
        for id in [EffectId::WhiteNoise, EffectId::Interlace] {
            board.tiers[Tier::Rejected.index()].insert(id);
        }
        board
    }

    /// Toggle an id's membership in a tier
    ///
    /// Evicts the id from every tier first; unless it was already in the
    /// target tier, it is then inserted there, so toggling the same tier
    /// twice returns the id to unrated. Returns the resulting tier.
    pub fn toggle(&mut self, id: EffectId, tier: Tier) -> Option<Tier> {
        let was_in_target = self.tiers[tier.index()].contains(&id);
        for set in &mut self.tiers {
            set.remove(&id);
        }
        if was_in_target {
            log::debug!("{} -> unrated", id.as_str());
            None
        } else {
            self.tiers[tier.index()].insert(id);
            log::debug!("{} -> {}", id.as_str(), tier.label());
            Some(tier)
        }
    }

    /// The tier an id currently belongs to, if any
    pub fn tier_of(&self, id: EffectId) -> Option<Tier> {
        Tier::all()
            .iter()
            .copied()
            .find(|t| self.tiers[t.index()].contains(&id))
    }

    /// Ids in a tier, in stable id order
    pub fn ids_in(&self, tier: Tier) -> impl Iterator<Item = EffectId> + '_ {
        self.tiers[tier.index()].iter().copied()
    }

    /// Produce a serializable snapshot
    pub fn snapshot(&self) -> RatingSnapshot {
        RatingSnapshot {
            best: self.ids_in(Tier::Best).collect(),
            good: self.ids_in(Tier::Good).collect(),
            mid: self.ids_in(Tier::Mid).collect(),
            rejected: self.ids_in(Tier::Rejected).collect(),
        }
    }

    /// Rebuild a board from a snapshot
    ///
    /// Disjointness is enforced on load: if an id appears in multiple tiers,
    /// the first (best-most) occurrence wins.
    pub fn from_snapshot(snapshot: &RatingSnapshot) -> Self {
        let mut board = Self::empty();
        let tiers = [
            (Tier::Best, &snapshot.best),
            (Tier::Good, &snapshot.good),
            (Tier::Mid, &snapshot.mid),
            (Tier::Rejected, &snapshot.rejected),
        ];
        for (tier, ids) in tiers {
            for &id in ids.iter() {
                if board.tier_of(id).is_none() {
                    board.tiers[tier.index()].insert(id);
                }
            }
        }
        board
    }

    /// Default snapshot location under the user config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("overlay-engine");
            p.push("ratings.json");
            p
        })
    }

    /// Load a board from disk, falling back silently to the seeded default
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RatingSnapshot>(&contents) {
                Ok(snapshot) => Self::from_snapshot(&snapshot),
                Err(e) => {
                    log::warn!("corrupt rating snapshot ({}), using defaults", e);
                    Self::seeded()
                }
            },
            Err(_) => Self::seeded(),
        }
    }

    /// Save the board as a JSON snapshot
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| EngineError::Io(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| EngineError::Serialize(e.to_string()))?;
        fs::write(path, json).map_err(|e| EngineError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_on_then_off_returns_to_unrated() {
        let mut board = RatingBoard::empty();
        assert_eq!(board.toggle(EffectId::Aurora, Tier::Best), Some(Tier::Best));
        assert_eq!(board.tier_of(EffectId::Aurora), Some(Tier::Best));

        assert_eq!(board.toggle(EffectId::Aurora, Tier::Best), None);
        assert_eq!(board.tier_of(EffectId::Aurora), None);
    }

    #[test]
    fn test_toggle_evicts_from_other_tiers() {
        let mut board = RatingBoard::empty();
        board.toggle(EffectId::Aurora, Tier::Best);
        board.toggle(EffectId::Aurora, Tier::Rejected);

        assert_eq!(board.tier_of(EffectId::Aurora), Some(Tier::Rejected));
        assert_eq!(board.ids_in(Tier::Best).count(), 0);
    }

    #[test]
    fn test_membership_stays_disjoint_under_any_sequence() {
        let mut board = RatingBoard::seeded();
        let sequence = [
            (EffectId::Aurora, Tier::Mid),
            (EffectId::Aurora, Tier::Good),
            (EffectId::Mandala, Tier::Best),
            (EffectId::Aurora, Tier::Good),
            (EffectId::Mandala, Tier::Best),
            (EffectId::Mandala, Tier::Rejected),
        ];
        for (id, tier) in sequence {
            board.toggle(id, tier);
            let memberships = Tier::all()
                .iter()
                .filter(|t| board.ids_in(**t).any(|i| i == id))
                .count();
            assert!(memberships <= 1, "{:?} in {} tiers", id, memberships);
        }
    }

    #[test]
    fn test_seeded_default_is_disjoint() {
        let board = RatingBoard::seeded();
        let mut seen = BTreeSet::new();
        for &tier in Tier::all() {
            for id in board.ids_in(tier) {
                assert!(seen.insert(id), "{:?} rated twice", id);
            }
        }
        assert_eq!(board.tier_of(EffectId::Combined), Some(Tier::Best));
        assert_eq!(board.tier_of(EffectId::PointCloud), None);
        assert_eq!(board.tier_of(EffectId::Checkerboard), None);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut board = RatingBoard::seeded();
        board.toggle(EffectId::PointCloud, Tier::Good);

        let snapshot = board.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: RatingSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(RatingBoard::from_snapshot(&parsed), board);
    }

    #[test]
    fn test_snapshot_load_enforces_disjointness() {
        let snapshot = RatingSnapshot {
            best: vec![EffectId::Aurora],
            good: vec![EffectId::Aurora, EffectId::Mandala],
            mid: vec![],
            rejected: vec![EffectId::Mandala],
        };
        let board = RatingBoard::from_snapshot(&snapshot);
        assert_eq!(board.tier_of(EffectId::Aurora), Some(Tier::Best));
        assert_eq!(board.tier_of(EffectId::Mandala), Some(Tier::Good));
    }

    #[test]
    fn test_snapshot_keys_are_stable_strings() {
        let board = RatingBoard::seeded();
        let json = serde_json::to_string(&board.snapshot()).unwrap();
        assert!(json.contains("\"combined\""));
        assert!(json.contains("\"white_noise\""));
    }

    #[test]
    fn test_load_missing_file_uses_seeded_default() {
        let board = RatingBoard::load(Path::new("/nonexistent/ratings.json"));
        assert_eq!(board, RatingBoard::seeded());
    }
}
