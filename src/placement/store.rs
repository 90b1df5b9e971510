use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::Context;
use arc_swap::ArcSwap;

use crate::{
    foundation::core::{ActorId, GridMode, Vec2},
    foundation::error::{PictographError, PictographResult},
    motion::letter::Letter,
    motion::model::{MotionDescriptor, PictographRecord},
    placement::keys::{
        EntryKey, OrientationCategory, SpecialKey, TurnsKey, TurnsKeyScheme, parse_rot_angle_key,
        rot_angle_key,
    },
    placement::special::{SnapshotFingerprint, SpecialEntry, SpecialPlacements},
};

type LetterGroup = (GridMode, OrientationCategory, Letter);

/// File each letter was loaded from, so writes land back in the same document.
#[derive(Clone, Debug, Default)]
struct SourceIndex {
    files: BTreeMap<LetterGroup, PathBuf>,
}

/// `{root}/{grid_mode}/special/{orientation}`.
pub fn special_dir(root: &Path, grid_mode: GridMode, orientation: OrientationCategory) -> PathBuf {
    root.join(grid_mode.as_str())
        .join("special")
        .join(orientation.as_str())
}

pub(crate) fn parse_offset(value: &serde_json::Value) -> Option<Vec2> {
    match value.as_array()?.as_slice() {
        [x, y] => Some(Vec2::new(x.as_f64()?, y.as_f64()?)),
        _ => None,
    }
}

pub(crate) fn list_json_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for item in std::fs::read_dir(dir)? {
        let path = item?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every special placement under `root`.
///
/// Missing directories and unreadable files are logged and skipped; a malformed
/// letter entry only drops that letter.
pub fn load_special_placements(root: &Path) -> SpecialPlacements {
    load_with_sources(root).0
}

#[tracing::instrument]
fn load_with_sources(root: &Path) -> (SpecialPlacements, SourceIndex) {
    let mut table = SpecialPlacements::new();
    let mut sources = SourceIndex::default();
    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "config root missing; special placements empty");
        return (table, sources);
    }

    for grid_mode in [GridMode::Diamond, GridMode::Box] {
        for orientation in OrientationCategory::ALL {
            let dir = special_dir(root, grid_mode, orientation);
            let files = match list_json_files(&dir) {
                Ok(files) => files,
                Err(err) => {
                    tracing::warn!(dir = %dir.display(), %err, "special placement directory unreadable; skipping");
                    continue;
                }
            };
            for file in files {
                load_file(&mut table, &mut sources, grid_mode, orientation, &file);
            }
        }
    }
    tracing::debug!(entries = table.len(), "special placements loaded");
    (table, sources)
}

fn load_file(
    table: &mut SpecialPlacements,
    sources: &mut SourceIndex,
    grid_mode: GridMode,
    orientation: OrientationCategory,
    file: &Path,
) {
    let doc = match read_json_object(file) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(file = %file.display(), %err, "special placement file unreadable; skipping");
            return;
        }
    };

    for (raw_letter, value) in &doc {
        let letter = Letter::new(raw_letter.as_str());
        match parse_letter(&letter, value) {
            Ok(leaves) => {
                for (turns, parsed) in leaves {
                    let key = SpecialKey {
                        grid_mode,
                        orientation,
                        letter: letter.clone(),
                        turns,
                    };
                    let mut entry = table.entry(&key).cloned().unwrap_or_default();
                    entry.offsets.extend(parsed.offsets);
                    entry.rotation_overrides.extend(parsed.rotation_overrides);
                    table.insert_entry(key, entry);
                }
                sources
                    .files
                    .insert((grid_mode, orientation, letter), file.to_path_buf());
            }
            Err(err) => {
                tracing::warn!(file = %file.display(), %letter, %err, "malformed letter entry; skipping");
            }
        }
    }
}

fn read_json_object(file: &Path) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
    let s = std::fs::read_to_string(file).with_context(|| format!("read '{}'", file.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&s).with_context(|| format!("parse '{}'", file.display()))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => anyhow::bail!("'{}' is not a JSON object", file.display()),
    }
}

fn parse_letter(
    letter: &Letter,
    value: &serde_json::Value,
) -> PictographResult<Vec<(TurnsKey, SpecialEntry)>> {
    let scheme = TurnsKeyScheme::for_letter(letter);
    let turns_map = value
        .as_object()
        .ok_or_else(|| PictographError::config("letter entry is not an object"))?;

    let mut out = Vec::with_capacity(turns_map.len());
    for (raw_turns, leaf) in turns_map {
        let turns = TurnsKey::parse(scheme, raw_turns)?;
        let leaf = leaf.as_object().ok_or_else(|| {
            PictographError::config(format!("turns entry '{raw_turns}' is not an object"))
        })?;

        let mut entry = SpecialEntry::default();
        for (slot, v) in leaf {
            if let Some(actor) = parse_rot_angle_key(slot) {
                let angle = v.as_f64().ok_or_else(|| {
                    PictographError::config(format!("'{slot}' under '{raw_turns}' is not a number"))
                })?;
                entry.rotation_overrides.insert(actor, angle);
            } else if let Some(key) = EntryKey::parse(slot) {
                let offset = parse_offset(v).ok_or_else(|| {
                    PictographError::config(format!("'{slot}' under '{raw_turns}' is not [dx, dy]"))
                })?;
                entry.offsets.insert(key, offset);
            } else {
                return Err(PictographError::config(format!(
                    "unknown key '{slot}' under '{raw_turns}'"
                )));
            }
        }
        out.push((turns, entry));
    }
    Ok(out)
}

fn leaf_to_json(entry: &SpecialEntry) -> serde_json::Value {
    let mut leaf = serde_json::Map::new();
    for (slot, v) in &entry.offsets {
        leaf.insert(slot.as_str().to_string(), serde_json::json!([v.x, v.y]));
    }
    for (actor, angle) in &entry.rotation_overrides {
        leaf.insert(rot_angle_key(*actor), serde_json::json!(angle));
    }
    serde_json::Value::Object(leaf)
}

fn letter_to_json(
    table: &SpecialPlacements,
    grid_mode: GridMode,
    orientation: OrientationCategory,
    letter: &Letter,
) -> serde_json::Map<String, serde_json::Value> {
    table
        .entries_in(grid_mode, orientation)
        .into_iter()
        .filter(|(k, _)| &k.letter == letter)
        .map(|(k, e)| (k.turns.to_string(), leaf_to_json(e)))
        .collect()
}

/// A letter document rendered in memory, not yet on disk.
struct StagedFile {
    group: LetterGroup,
    path: PathBuf,
    body: String,
}

fn stage_letter(
    root: &Path,
    table: &SpecialPlacements,
    sources: &SourceIndex,
    group: LetterGroup,
) -> PictographResult<StagedFile> {
    let (grid_mode, orientation, letter) = &group;
    let path = match sources.files.get(&group) {
        Some(path) => path.clone(),
        None => special_dir(root, *grid_mode, *orientation)
            .join(format!("{}_placements.json", letter.as_str())),
    };

    let mut doc = if path.is_file() {
        read_json_object(&path)?
    } else {
        serde_json::Map::new()
    };
    let body = letter_to_json(table, *grid_mode, *orientation, letter);
    if body.is_empty() {
        doc.remove(letter.as_str());
    } else {
        doc.insert(letter.as_str().to_string(), serde_json::Value::Object(body));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create config dir '{}'", parent.display()))?;
    }
    let body = serde_json::to_string_pretty(&serde_json::Value::Object(doc))?;
    Ok(StagedFile { group, path, body })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write every staged file next to its target, then rename them all into place.
///
/// Nothing under the config tree changes unless every temp write succeeded.
fn commit_staged(staged: &[StagedFile]) -> PictographResult<()> {
    let mut written = Vec::with_capacity(staged.len());
    for file in staged {
        let tmp = temp_path(&file.path);
        if let Err(err) = std::fs::write(&tmp, &file.body) {
            for t in written.iter().chain(std::iter::once(&tmp)) {
                let _ = std::fs::remove_file(t);
            }
            return Err(anyhow::Error::from(err)
                .context(format!("write '{}'", tmp.display()))
                .into());
        }
        written.push(tmp);
    }
    for (file, tmp) in staged.iter().zip(&written) {
        std::fs::rename(tmp, &file.path)
            .with_context(|| format!("replace '{}'", file.path.display()))?;
        tracing::debug!(file = %file.path.display(), letter = %file.group.2, "persisted special placements");
    }
    Ok(())
}

/// Shared, read-mostly owner of the special-placement table.
///
/// Reads never block: [`SpecialPlacementStore::snapshot`] hands out the current
/// `Arc`. Writes are serialized, applied to a private copy, persisted, and then
/// swapped in whole. A failed write leaves the snapshot and the files on disk
/// untouched.
pub struct SpecialPlacementStore {
    root: Option<PathBuf>,
    current: ArcSwap<SpecialPlacements>,
    writer: Mutex<SourceIndex>,
}

impl SpecialPlacementStore {
    /// Load from a configuration tree; writes are persisted back under `root`.
    pub fn load(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let (table, sources) = load_with_sources(&root);
        Self {
            root: Some(root),
            current: ArcSwap::from_pointee(table),
            writer: Mutex::new(sources),
        }
    }

    /// Wrap an in-memory table; writes are not persisted.
    pub fn in_memory(table: SpecialPlacements) -> Self {
        Self {
            root: None,
            current: ArcSwap::from_pointee(table),
            writer: Mutex::new(SourceIndex::default()),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<SpecialPlacements> {
        self.current.load_full()
    }

    /// Fingerprint of the current snapshot.
    pub fn fingerprint(&self) -> SnapshotFingerprint {
        self.current.load().fingerprint()
    }

    /// Re-read the configuration tree and swap in the result.
    pub fn reload(&self) -> PictographResult<SnapshotFingerprint> {
        let mut sources = self.lock_writer()?;
        let Some(root) = &self.root else {
            return Ok(self.fingerprint());
        };
        let (table, fresh) = load_with_sources(root);
        let fingerprint = table.fingerprint();
        *sources = fresh;
        self.current.store(Arc::new(table));
        Ok(fingerprint)
    }

    /// Record a positional override for `actor` in `pictograph`.
    pub fn record_adjustment(
        &self,
        pictograph: &PictographRecord,
        actor: ActorId,
        offset: Vec2,
    ) -> PictographResult<Vec<SpecialKey>> {
        let (letter, blue, red) = authoring_inputs(pictograph)?;
        self.write_with(|table| {
            Ok(table.record_adjustment(pictograph.grid_mode, letter, blue, red, actor, offset))
        })
    }

    /// Set or (with `None`) delete a rotation-angle override for `actor`.
    pub fn record_rotation_override(
        &self,
        pictograph: &PictographRecord,
        actor: ActorId,
        angle: Option<f64>,
    ) -> PictographResult<Vec<SpecialKey>> {
        let (letter, blue, red) = authoring_inputs(pictograph)?;
        self.write_with(|table| {
            table.record_rotation_override(pictograph.grid_mode, letter, blue, red, actor, angle)
        })
    }

    fn write_with(
        &self,
        apply: impl FnOnce(&mut SpecialPlacements) -> PictographResult<Vec<SpecialKey>>,
    ) -> PictographResult<Vec<SpecialKey>> {
        let mut sources = self.lock_writer()?;
        let mut next = SpecialPlacements::clone(&self.current.load());
        let touched = apply(&mut next)?;

        if let Some(root) = &self.root {
            let groups: BTreeSet<LetterGroup> = touched
                .iter()
                .map(|k| (k.grid_mode, k.orientation, k.letter.clone()))
                .collect();
            let staged = groups
                .into_iter()
                .map(|group| stage_letter(root, &next, &sources, group))
                .collect::<PictographResult<Vec<_>>>()?;
            commit_staged(&staged)?;
            for file in staged {
                sources.files.insert(file.group, file.path);
            }
        }

        self.current.store(Arc::new(next));
        Ok(touched)
    }

    fn lock_writer(&self) -> PictographResult<std::sync::MutexGuard<'_, SourceIndex>> {
        self.writer
            .lock()
            .map_err(|_| PictographError::config("special placement writer lock poisoned"))
    }
}

fn authoring_inputs(
    pictograph: &PictographRecord,
) -> PictographResult<(&Letter, &MotionDescriptor, &MotionDescriptor)> {
    let letter = pictograph
        .letter
        .as_ref()
        .ok_or_else(|| PictographError::validation("cannot record an override without a letter"))?;
    let (blue, red) = pictograph
        .pair()
        .ok_or_else(|| PictographError::validation("cannot record an override without both motions"))?;
    Ok((letter, blue, red))
}

#[cfg(test)]
#[path = "../../tests/unit/placement/store.rs"]
mod tests;
