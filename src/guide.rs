//! # Pictograph engine guide
//!
//! This module walks through the data model, the placement pipeline and the
//! configuration tree end to end. For copy/paste commands, start with the
//! repository `README.md`.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`PictographRecord`](crate::PictographRecord): one frame; a grid mode, an
//!   optional [`Letter`](crate::Letter) and one
//!   [`MotionDescriptor`](crate::MotionDescriptor) per [`ActorId`](crate::ActorId)
//! - [`MotionKind`](crate::MotionKind): `static`, `pro`, `anti`, `float`, `dash`
//! - [`Orientation`](crate::Orientation): `in`/`out` are radial, `clock`/`counter`
//!   are non-radial
//! - [`Turns`](crate::Turns): whole and half turns, or the `fl` sentinel carried
//!   by float motions
//!
//! A motion's end orientation is never stored. It is derived on demand by
//! [`propagate`](crate::propagate), so editing a motion cannot leave a stale end
//! orientation behind. Across a sequence,
//! [`propagate_sequence`](crate::propagate_sequence) rewrites each beat's start
//! orientation from the previous beat's end, and
//! [`check_continuity`](crate::check_continuity) reports disagreements without
//! touching anything.
//!
//! ---
//!
//! ## Placing an arrow
//!
//! [`PlacementEngine::place`](crate::PlacementEngine::place) runs these steps per
//! visible actor:
//!
//! 1. A [`LocationCalculator`](crate::LocationCalculator) picks the grid location
//!    the arrow sits on.
//! 2. A [`CoordinateSystem`](crate::CoordinateSystem) maps it to scene
//!    coordinates.
//! 3. The rotation angle comes from an authored override, or from a
//!    [`RotationCalculator`](crate::RotationCalculator).
//! 4. The adjustment is the authored special placement for this exact
//!    configuration. Without one, the default base offset for the motion kind
//!    and turns is expanded by [`directional_tuples`](crate::directional_tuples)
//!    and the variant at [`quadrant_index`](crate::quadrant_index) is used.
//! 5. The final position is the initial position plus the adjustment.
//!
//! Hidden actors produce no result. An actor with no motion data is placed at the
//! scene center, unrotated and unmirrored.
//!
//! ---
//!
//! ## Configuration tree
//!
//! ```text
//! <root>/
//!   diamond/
//!     default/
//!       pro_placements.json        { "0": [dx, dy], "0.5": [dx, dy], ... }
//!       anti_placements.json
//!       ...
//!     special/
//!       from_layer1/               both actors start radial
//!       from_layer2/               both actors start non-radial
//!       from_layer3_blue1_red2/    blue radial, red non-radial
//!       from_layer3_blue2_red1/    blue non-radial, red radial
//!         *.json                   { "<letter>": { "(a, b)": { ... } } }
//!   box/
//!     ...
//! ```
//!
//! Each special leaf maps an actor (`blue`, `red`) or a motion kind (`pro`,
//! `dash`, ...) to an `[dx, dy]` offset. Dash and static motions may also carry a
//! `"<actor>_rot_angle"` override in degrees.
//!
//! The `(a, b)` turns key depends on the letter:
//!
//! - ordinary letters list `(blue, red)` turns,
//! - Type 1 hybrids (`C F I L O R U V`) list `(pro, anti)` turns,
//! - other hybrids list `(lead, trail)` turns, where a shift leads a dash and a
//!   dash leads a static.
//!
//! Missing directories read as empty tables. A malformed letter entry is skipped
//! on its own without dropping the rest of its file.
//!
//! ---
//!
//! ## Authoring
//!
//! [`SpecialPlacementStore`](crate::SpecialPlacementStore) serves lock-free
//! snapshots to readers. A write clones the current snapshot, applies the change,
//! rewrites the affected letter in its source file and swaps the new snapshot in.
//!
//! For layer-3 pictographs every write has a mirror: the same letter and turns
//! under the opposite `from_layer3_*` directory, with the blue and red values
//! exchanged (and `(blue, red)` turns keys swapped). Role and lead keys name no
//! color, so they stay as they are.
//!
//! ---
//!
//! ## Classification
//!
//! [`LetterClassifier`](crate::LetterClassifier) tries, in order:
//!
//! - dual-float similarity when both motions float,
//! - an exact lookup with the float compared by its prefloat fields when one
//!   motion floats,
//! - an exact lookup otherwise.
//!
//! A miss is an ordinary [`ClassificationFailure`](crate::ClassificationFailure);
//! placement never depends on classification succeeding.
