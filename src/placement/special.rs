use std::collections::{BTreeMap, HashMap};

use xxhash_rust::xxh3::Xxh3;

use crate::{
    foundation::core::{ActorId, GridMode, Vec2},
    foundation::error::{PictographError, PictographResult},
    motion::letter::Letter,
    motion::model::{MotionDescriptor, MotionKind},
    placement::keys::{EntryKey, OrientationCategory, SpecialKey},
};

const XXH3_SEED: u64 = 0x5f3a_91c4_e2d7_086b;

#[derive(Clone, Debug, Default, PartialEq)]
/// One leaf of the special-placement table.
pub struct SpecialEntry {
    /// Positional overrides keyed by actor or motion kind.
    pub offsets: BTreeMap<EntryKey, Vec2>,
    /// Rotation-angle overrides (degrees) for dash/static motions.
    pub rotation_overrides: BTreeMap<ActorId, f64>,
}

impl SpecialEntry {
    /// `true` when the leaf carries no overrides.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty() && self.rotation_overrides.is_empty()
    }

    /// Offset for `motion`'s actor, falling back to its motion kind.
    ///
    /// Float motions try their literal kind before their prefloat kind.
    pub fn offset_for(&self, motion: &MotionDescriptor) -> Option<Vec2> {
        if let Some(v) = self.offsets.get(&EntryKey::Actor(motion.actor)) {
            return Some(*v);
        }
        if let Some(v) = self.offsets.get(&EntryKey::Motion(motion.motion_kind)) {
            return Some(*v);
        }
        match motion.prefloat_motion_kind {
            Some(kind) if motion.motion_kind == MotionKind::Float => {
                self.offsets.get(&EntryKey::Motion(kind)).copied()
            }
            _ => None,
        }
    }
}

/// Stable 128-bit digest of a [`SpecialPlacements`] snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SnapshotFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

#[derive(Clone, Debug, Default)]
/// Immutable-by-convention special-placement table.
///
/// Readers hold an `Arc` of a snapshot; writers clone, mutate the clone through
/// the `record_*` methods and swap it in (see [`crate::SpecialPlacementStore`]).
pub struct SpecialPlacements {
    entries: HashMap<SpecialKey, SpecialEntry>,
}

impl SpecialPlacements {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the table has no leaves.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Leaf stored under `key`.
    pub fn entry(&self, key: &SpecialKey) -> Option<&SpecialEntry> {
        self.entries.get(key)
    }

    /// Replace a whole leaf; empty leaves are dropped.
    pub fn insert_entry(&mut self, key: SpecialKey, entry: SpecialEntry) {
        if entry.is_empty() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, entry);
        }
    }

    /// Leaves of one configuration directory, sorted by letter then turns key.
    pub fn entries_in(
        &self,
        grid_mode: GridMode,
        orientation: OrientationCategory,
    ) -> Vec<(&SpecialKey, &SpecialEntry)> {
        let mut out: Vec<_> = self
            .entries
            .iter()
            .filter(|(k, _)| k.grid_mode == grid_mode && k.orientation == orientation)
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// Positional override for one actor, or `None` when no leaf applies.
    pub fn lookup(
        &self,
        grid_mode: GridMode,
        letter: &Letter,
        blue: &MotionDescriptor,
        red: &MotionDescriptor,
        actor: ActorId,
    ) -> Option<Vec2> {
        let key = SpecialKey::derive(grid_mode, letter, blue, red);
        let motion = match actor {
            ActorId::Blue => blue,
            ActorId::Red => red,
        };
        let hit = self.entries.get(&key).and_then(|e| e.offset_for(motion));
        tracing::trace!(%key, %actor, hit = hit.is_some(), "special placement lookup");
        hit
    }

    /// Rotation-angle override for one actor, or `None`.
    pub fn rotation_override(
        &self,
        grid_mode: GridMode,
        letter: &Letter,
        blue: &MotionDescriptor,
        red: &MotionDescriptor,
        actor: ActorId,
    ) -> Option<f64> {
        let key = SpecialKey::derive(grid_mode, letter, blue, red);
        self.entries
            .get(&key)
            .and_then(|e| e.rotation_overrides.get(&actor))
            .copied()
    }

    /// Record an actor's positional override.
    ///
    /// For mixed-orientation pictographs the mirrored leaf is rewritten from the
    /// source leaf with the actors swapped. Returns every leaf key touched.
    pub fn record_adjustment(
        &mut self,
        grid_mode: GridMode,
        letter: &Letter,
        blue: &MotionDescriptor,
        red: &MotionDescriptor,
        actor: ActorId,
        offset: Vec2,
    ) -> Vec<SpecialKey> {
        let key = SpecialKey::derive(grid_mode, letter, blue, red);
        let mut entry = self.entries.get(&key).cloned().unwrap_or_default();
        entry.offsets.insert(EntryKey::Actor(actor), offset);
        self.insert_entry(key.clone(), entry);
        self.propagate_mirror(key)
    }

    /// Set or (with `None`) delete a rotation-angle override.
    ///
    /// Only dash and static motions carry rotation overrides.
    pub fn record_rotation_override(
        &mut self,
        grid_mode: GridMode,
        letter: &Letter,
        blue: &MotionDescriptor,
        red: &MotionDescriptor,
        actor: ActorId,
        angle: Option<f64>,
    ) -> PictographResult<Vec<SpecialKey>> {
        let motion = match actor {
            ActorId::Blue => blue,
            ActorId::Red => red,
        };
        if !matches!(motion.motion_kind, MotionKind::Dash | MotionKind::Static) {
            return Err(PictographError::validation(format!(
                "rotation overrides apply to dash/static motions, {actor} is {}",
                motion.motion_kind.as_str()
            )));
        }

        let key = SpecialKey::derive(grid_mode, letter, blue, red);
        let mut entry = self.entries.get(&key).cloned().unwrap_or_default();
        match angle {
            Some(a) => {
                entry.rotation_overrides.insert(actor, a);
            }
            None => {
                entry.rotation_overrides.remove(&actor);
            }
        }
        self.insert_entry(key.clone(), entry);
        Ok(self.propagate_mirror(key))
    }

    /// Rewrite the mirrored leaf of `key` with swapped actors.
    fn propagate_mirror(&mut self, key: SpecialKey) -> Vec<SpecialKey> {
        if !key.orientation.is_mixed() {
            return vec![key];
        }
        let mirrored_key = key.mirrored();
        let source = self.entries.get(&key).cloned().unwrap_or_default();
        let mut mirrored = self.entries.get(&mirrored_key).cloned().unwrap_or_default();

        for actor in ActorId::ALL {
            let slot = EntryKey::Actor(actor);
            match source.offsets.get(&EntryKey::Actor(actor.other())) {
                Some(v) => {
                    mirrored.offsets.insert(slot, *v);
                }
                None => {
                    mirrored.offsets.remove(&slot);
                }
            }
            match source.rotation_overrides.get(&actor.other()) {
                Some(a) => {
                    mirrored.rotation_overrides.insert(actor, *a);
                }
                None => {
                    mirrored.rotation_overrides.remove(&actor);
                }
            }
        }
        for kind in MotionKind::ALL {
            let slot = EntryKey::Motion(kind);
            match source.offsets.get(&slot) {
                Some(v) => {
                    mirrored.offsets.insert(slot, *v);
                }
                None => {
                    mirrored.offsets.remove(&slot);
                }
            }
        }

        tracing::debug!(source = %key, mirror = %mirrored_key, "propagated mirrored special placement");
        self.insert_entry(mirrored_key.clone(), mirrored);
        vec![key, mirrored_key]
    }

    /// Order-independent digest of the whole table.
    pub fn fingerprint(&self) -> SnapshotFingerprint {
        let mut keys: Vec<&SpecialKey> = self.entries.keys().collect();
        keys.sort();

        let mut h = Xxh3::with_seed(XXH3_SEED);
        h.update(&(keys.len() as u64).to_le_bytes());
        for key in keys {
            h.update(key.to_string().as_bytes());
            let Some(entry) = self.entries.get(key) else {
                continue;
            };
            for (slot, v) in &entry.offsets {
                h.update(slot.as_str().as_bytes());
                h.update(&v.x.to_bits().to_le_bytes());
                h.update(&v.y.to_bits().to_le_bytes());
            }
            for (actor, angle) in &entry.rotation_overrides {
                h.update(actor.as_str().as_bytes());
                h.update(&angle.to_bits().to_le_bytes());
            }
        }
        let v = h.digest128();
        SnapshotFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/special.rs"]
mod tests;
