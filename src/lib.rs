//! Deterministic motion resolution and arrow placement for two-actor pictographs.
//!
//! A pictograph is one frame of a choreographed sequence: two actors (blue and
//! red), each performing a motion on a diamond or box grid. This crate answers
//! three questions about it:
//!
//! 1. **Orientation**: where does each actor's prop face at the end of the beat?
//!    See [`propagate`] and [`propagate_sequence`].
//! 2. **Classification**: which letter does the motion pair spell? See
//!    [`LetterClassifier`].
//! 3. **Placement**: where and how is each arrow drawn? See [`PlacementEngine`].
//!
//! Placement consults authored overrides first ([`SpecialPlacements`], held in a
//! lock-free [`SpecialPlacementStore`]) and otherwise rotates a default base
//! offset into the arrow's quadrant with [`directional_tuples`].
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Total core**: propagation, tuples, lookup and placement never fail; only
//!   loading, persisting and classification return `Result`.
//!
//! For a walkthrough of the configuration tree and the authoring write path, see
//! [`crate::guide`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod classify;
mod foundation;
mod motion;
mod placement;

/// Standalone walkthrough of the placement pipeline and configuration tree.
pub mod guide;

pub use classify::classifier::LetterClassifier;
pub use classify::dataset::{MotionSignature, PairSignature, ReferenceDataset, pair_signature};
pub use classify::strategy::{
    Classification, ClassificationFailure, ClassificationOutcome, ClassificationStrategy,
    DualFloatStrategy, ExactStrategy, HybridFloatStrategy, NO_MATCHING_PATTERN, StrategyKind,
};
pub use foundation::config::{DEFAULT_DUAL_FLOAT_THRESHOLD, EngineConfig};
pub use foundation::core::{
    ActorId, FLOAT_TURNS_TOKEN, GridMode, Location, Orientation, Point, RotationDir, Turns, Vec2,
};
pub use foundation::error::{PictographError, PictographResult};
pub use motion::letter::{Letter, LetterType};
pub use motion::model::{MotionDescriptor, MotionKind, PictographRecord, read_sequence};
pub use motion::orientation::{ContinuityBreak, check_continuity, propagate, propagate_sequence};
pub use motion::predicates;
pub use placement::defaults::DefaultPlacements;
pub use placement::grid::{
    CoordinateSystem, DEFAULT_SCENE_SIZE, DefaultCoordinateSystem, DefaultLocationCalculator,
    DefaultRotationCalculator, LocationCalculator, RotationCalculator, direction_of,
};
pub use placement::keys::{
    EntryKey, OrientationCategory, ROT_ANGLE_SUFFIX, SpecialKey, TurnsKey, TurnsKeyScheme,
    derive_turns_key, lead_actor, parse_rot_angle_key, rot_angle_key,
};
pub use placement::orchestrator::{
    AdjustmentSource, ArrowPlacementResult, PlacementEngine, is_mirrored,
};
pub use placement::special::{SnapshotFingerprint, SpecialEntry, SpecialPlacements};
pub use placement::store::{SpecialPlacementStore, load_special_placements, special_dir};
pub use placement::tuples::{QuadrantTransform, directional_tuples, quadrant_index};
