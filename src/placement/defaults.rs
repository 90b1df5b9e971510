use std::{collections::HashMap, path::Path};

use crate::{
    foundation::core::{GridMode, Turns, Vec2},
    motion::model::{MotionDescriptor, MotionKind},
    placement::store::parse_offset,
};

/// Base offsets fed to the directional tuple calculator when no special
/// placement applies, keyed by grid, motion kind and turns.
#[derive(Clone, Debug, Default)]
pub struct DefaultPlacements {
    offsets: HashMap<(GridMode, MotionKind, Turns), Vec2>,
}

impl DefaultPlacements {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base offset for one grid, kind and turns.
    pub fn insert(&mut self, grid_mode: GridMode, kind: MotionKind, turns: Turns, offset: Vec2) {
        self.offsets.insert((grid_mode, kind, turns), offset);
    }

    /// Number of configured offsets.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// `true` when nothing is configured.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Load `{root}/{grid_mode}/default/{kind}_placements.json` files.
    ///
    /// Missing files and malformed turns entries are logged and skipped. A file
    /// missing under an existing grid directory is logged at warn.
    #[tracing::instrument]
    pub fn load(root: &Path) -> Self {
        let mut out = Self::new();
        for grid_mode in [GridMode::Diamond, GridMode::Box] {
            for kind in MotionKind::ALL {
                let file = root
                    .join(grid_mode.as_str())
                    .join("default")
                    .join(format!("{}_placements.json", kind.as_str()));
                if !file.is_file() {
                    if root.join(grid_mode.as_str()).is_dir() {
                        tracing::warn!(file = %file.display(), "default placements file missing");
                    } else {
                        tracing::debug!(file = %file.display(), "no default placements file");
                    }
                    continue;
                }
                let doc = match std::fs::read_to_string(&file)
                    .map_err(anyhow::Error::from)
                    .and_then(|s| Ok(serde_json::from_str::<serde_json::Value>(&s)?))
                {
                    Ok(doc) => doc,
                    Err(err) => {
                        tracing::warn!(file = %file.display(), %err, "default placements unreadable; skipping");
                        continue;
                    }
                };
                let Some(map) = doc.as_object() else {
                    tracing::warn!(file = %file.display(), "default placements file is not an object");
                    continue;
                };
                for (raw_turns, value) in map {
                    match (Turns::parse_key(raw_turns), parse_offset(value)) {
                        (Ok(turns), Some(offset)) => out.insert(grid_mode, kind, turns, offset),
                        _ => tracing::warn!(
                            file = %file.display(),
                            turns = %raw_turns,
                            "malformed default placement; skipping"
                        ),
                    }
                }
            }
        }
        out
    }

    /// Base offset for a motion; zero when nothing is configured.
    pub fn base_offset(&self, grid_mode: GridMode, motion: &MotionDescriptor) -> Vec2 {
        match self.offsets.get(&(grid_mode, motion.motion_kind, motion.turns)) {
            Some(v) => *v,
            None => {
                tracing::warn!(
                    %grid_mode,
                    kind = motion.motion_kind.as_str(),
                    turns = %motion.turns,
                    "no default placement; using zero offset"
                );
                Vec2::ZERO
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/defaults.rs"]
mod tests;
