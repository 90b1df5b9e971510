use std::{collections::BTreeMap, sync::Arc};

use arc_swap::ArcSwap;
use rayon::prelude::*;

use crate::{
    foundation::config::EngineConfig,
    foundation::core::{ActorId, Location, Point, RotationDir, Vec2},
    foundation::error::{PictographError, PictographResult},
    motion::letter::LetterType,
    motion::model::{MotionDescriptor, MotionKind, PictographRecord},
    placement::defaults::DefaultPlacements,
    placement::grid::{
        CoordinateSystem, DefaultCoordinateSystem, DefaultLocationCalculator,
        DefaultRotationCalculator, LocationCalculator, RotationCalculator,
    },
    placement::special::{SnapshotFingerprint, SpecialPlacements},
    placement::store::SpecialPlacementStore,
    placement::tuples::{directional_tuples, quadrant_index},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
/// Where an arrow's adjustment came from.
pub enum AdjustmentSource {
    /// Authored special placement.
    Special,
    /// Default base offset run through the directional tuples.
    Default,
    /// No motion data; the arrow sits at the scene center.
    Fallback,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Final placement of one actor's arrow.
pub struct ArrowPlacementResult {
    /// Scene position after adjustment.
    pub position: Point,
    /// Degrees, clockwise from north.
    pub rotation_angle: f64,
    /// Whether the arrow graphic is mirrored.
    pub is_mirrored: bool,
    /// Grid location used; `None` for the fallback.
    pub location: Option<Location>,
    /// Where the adjustment came from.
    pub adjustment_source: AdjustmentSource,
}

impl ArrowPlacementResult {
    /// Safe default for an actor with no motion data.
    pub fn fallback(center: Point) -> Self {
        Self {
            position: center,
            rotation_angle: 0.0,
            is_mirrored: false,
            location: None,
            adjustment_source: AdjustmentSource::Fallback,
        }
    }
}

/// Whether an arrow is drawn mirrored.
///
/// `anti` mirrors on clockwise rotation, every other kind on counter-clockwise;
/// no rotation never mirrors.
pub fn is_mirrored(motion_kind: MotionKind, rotation_dir: RotationDir) -> bool {
    match (motion_kind, rotation_dir) {
        (_, RotationDir::NoRotation) => false,
        (MotionKind::Anti, dir) => dir == RotationDir::Cw,
        (_, dir) => dir == RotationDir::Ccw,
    }
}

/// Composition root for arrow placement.
///
/// Owns the special-placement store, the default base offsets and the grid
/// collaborators. `place` is synchronous and read-only; authoring goes through
/// [`PlacementEngine::store`].
pub struct PlacementEngine {
    config: EngineConfig,
    store: SpecialPlacementStore,
    defaults: ArcSwap<DefaultPlacements>,
    locations: Box<dyn LocationCalculator>,
    coordinates: Box<dyn CoordinateSystem>,
    rotations: Box<dyn RotationCalculator>,
}

impl PlacementEngine {
    /// Build from a validated config, loading tables from `config_root` when set.
    pub fn new(config: EngineConfig) -> PictographResult<Self> {
        config.validate()?;
        let (store, defaults) = match &config.config_root {
            Some(root) => (SpecialPlacementStore::load(root), DefaultPlacements::load(root)),
            None => (
                SpecialPlacementStore::in_memory(SpecialPlacements::new()),
                DefaultPlacements::new(),
            ),
        };
        Ok(Self::with_tables(config, store, defaults))
    }

    /// Build around already-constructed tables.
    pub fn with_tables(
        config: EngineConfig,
        store: SpecialPlacementStore,
        defaults: DefaultPlacements,
    ) -> Self {
        let coordinates = DefaultCoordinateSystem::new(config.scene_size);
        Self {
            config,
            store,
            defaults: ArcSwap::from_pointee(defaults),
            locations: Box::new(DefaultLocationCalculator),
            coordinates: Box::new(coordinates),
            rotations: Box::new(DefaultRotationCalculator),
        }
    }

    /// Replace the location calculator.
    pub fn with_location_calculator(mut self, calc: impl LocationCalculator + 'static) -> Self {
        self.locations = Box::new(calc);
        self
    }

    /// Replace the coordinate system.
    pub fn with_coordinate_system(mut self, cs: impl CoordinateSystem + 'static) -> Self {
        self.coordinates = Box::new(cs);
        self
    }

    /// Replace the rotation calculator.
    pub fn with_rotation_calculator(mut self, calc: impl RotationCalculator + 'static) -> Self {
        self.rotations = Box::new(calc);
        self
    }

    /// Settings the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Special placements consulted before defaults.
    pub fn store(&self) -> &SpecialPlacementStore {
        &self.store
    }

    /// Re-read both tables from disk and swap them in.
    pub fn reload(&self) -> PictographResult<SnapshotFingerprint> {
        let fingerprint = self.store.reload()?;
        if let Some(root) = &self.config.config_root {
            self.defaults.store(Arc::new(DefaultPlacements::load(root)));
        }
        tracing::info!(hi = fingerprint.hi, lo = fingerprint.lo, "placement tables reloaded");
        Ok(fingerprint)
    }

    /// Place every visible actor of one pictograph.
    #[tracing::instrument(skip_all, fields(letter = ?pictograph.letter, grid = %pictograph.grid_mode))]
    pub fn place(&self, pictograph: &PictographRecord) -> BTreeMap<ActorId, ArrowPlacementResult> {
        let special = self.store.snapshot();
        let defaults = self.defaults.load();
        let mut out = BTreeMap::new();

        for actor in ActorId::ALL {
            let Some(motion) = pictograph.motion(actor) else {
                tracing::warn!(%actor, "pictograph has no motion for actor; placing at scene center");
                out.insert(actor, ArrowPlacementResult::fallback(self.coordinates.scene_center()));
                continue;
            };
            if !motion.visible {
                continue;
            }
            out.insert(actor, self.place_motion(pictograph, motion, &special, &defaults));
        }
        out
    }

    fn place_motion(
        &self,
        pictograph: &PictographRecord,
        motion: &MotionDescriptor,
        special: &SpecialPlacements,
        defaults: &DefaultPlacements,
    ) -> ArrowPlacementResult {
        let grid_mode = pictograph.grid_mode;
        let location = self.locations.calculate_location(motion, pictograph);
        let initial = self.coordinates.initial_position(motion, location);

        let authored = pictograph
            .letter
            .as_ref()
            .zip(pictograph.pair())
            .map(|(letter, (blue, red))| {
                (
                    special.lookup(grid_mode, letter, blue, red, motion.actor),
                    special.rotation_override(grid_mode, letter, blue, red, motion.actor),
                )
            });
        let (special_offset, rotation_override) = authored.unwrap_or((None, None));

        let rotation_angle = rotation_override
            .unwrap_or_else(|| self.rotations.rotation_angle(motion, location, grid_mode));

        let (adjustment, adjustment_source) = match special_offset {
            Some(offset) => (offset, AdjustmentSource::Special),
            None => (
                self.default_adjustment(pictograph, motion, location, defaults),
                AdjustmentSource::Default,
            ),
        };

        ArrowPlacementResult {
            position: initial + adjustment,
            rotation_angle,
            is_mirrored: is_mirrored(motion.motion_kind, motion.rotation_dir),
            location: Some(location),
            adjustment_source,
        }
    }

    fn default_adjustment(
        &self,
        pictograph: &PictographRecord,
        motion: &MotionDescriptor,
        location: Location,
        defaults: &DefaultPlacements,
    ) -> Vec2 {
        let grid_mode = pictograph.grid_mode;
        let base = defaults.base_offset(grid_mode, motion);
        let tuples = directional_tuples(
            base,
            motion.motion_kind,
            motion.rotation_dir,
            grid_mode,
            motion.start_loc,
            motion.end_loc,
            is_zero_turn_type5(pictograph),
        );
        tuples[quadrant_index(grid_mode, motion.motion_kind, location)]
    }

    /// Place every beat of a sequence, on a rayon pool when `parallel` is set.
    #[tracing::instrument(skip_all, fields(beats = beats.len(), parallel = self.config.parallel))]
    pub fn place_sequence(
        &self,
        beats: &[PictographRecord],
    ) -> PictographResult<Vec<BTreeMap<ActorId, ArrowPlacementResult>>> {
        if !self.config.parallel {
            return Ok(beats.iter().map(|b| self.place(b)).collect());
        }
        let pool = build_thread_pool(self.config.threads)?;
        Ok(pool.install(|| beats.par_iter().map(|b| self.place(b)).collect()))
    }
}

/// Type 5 letters with both actors at zero turns use the literal-location table.
fn is_zero_turn_type5(pictograph: &PictographRecord) -> bool {
    let type5 = pictograph
        .letter
        .as_ref()
        .and_then(|l| l.letter_type())
        .is_some_and(|t| t == LetterType::Type5);
    type5 && pictograph.motions.values().all(|m| m.turns.is_zero())
}

fn build_thread_pool(threads: Option<usize>) -> PictographResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PictographError::validation(
            "placement 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PictographError::config(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/placement/orchestrator.rs"]
mod tests;
