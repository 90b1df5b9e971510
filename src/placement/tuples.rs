use crate::{
    foundation::core::{GridMode, Location, RotationDir, Vec2},
    motion::model::MotionKind,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One of the eight symmetries of the square applied to an `(x, y)` offset.
///
/// Rotations are clockwise in screen coordinates (y grows downwards).
pub enum QuadrantTransform {
    /// `(x, y)`
    Identity,
    /// `(-y, x)`
    Rot90,
    /// `(-x, -y)`
    Rot180,
    /// `(y, -x)`
    Rot270,
    /// `(-y, -x)`
    NegSwap,
    /// `(x, -y)`
    FlipY,
    /// `(y, x)`
    Swap,
    /// `(-x, y)`
    FlipX,
}

impl QuadrantTransform {
    /// Apply the transform to `v`.
    pub fn apply(self, v: Vec2) -> Vec2 {
        let (x, y) = (v.x, v.y);
        match self {
            Self::Identity => Vec2::new(x, y),
            Self::Rot90 => Vec2::new(-y, x),
            Self::Rot180 => Vec2::new(-x, -y),
            Self::Rot270 => Vec2::new(y, -x),
            Self::NegSwap => Vec2::new(-y, -x),
            Self::FlipY => Vec2::new(x, -y),
            Self::Swap => Vec2::new(y, x),
            Self::FlipX => Vec2::new(-x, y),
        }
    }
}

type Table = [QuadrantTransform; 4];

use QuadrantTransform::{FlipX, FlipY, Identity, NegSwap, Rot90, Rot180, Rot270, Swap};

const TURNING_CW: Table = [Identity, Rot90, Rot180, Rot270];
const MIRRORED_CCW: Table = [NegSwap, FlipY, Swap, FlipX];
const BOX_TURNING_CW: Table = [FlipX, NegSwap, FlipY, Swap];
const BOX_MIRRORED_CCW: Table = [Identity, Rot90, Rot180, Rot270];
const STILL_DIAMOND: Table = [Identity, Rot180, Rot90, Rot270];
const STILL_BOX: Table = [Rot90, Rot270, Rot180, Identity];
const DASH_CW: Table = [FlipX, NegSwap, FlipY, Swap];
const DASH_CCW: Table = [Identity, Rot270, Rot180, Rot90];

/// Transform table for a motion kind and rotation on a grid.
fn table_for(grid_mode: GridMode, motion_kind: MotionKind, rotation_dir: RotationDir) -> Option<Table> {
    use GridMode::{Box, Diamond};
    use MotionKind::{Anti, Dash, Float, Pro, Static};
    use RotationDir::{Ccw, Cw, NoRotation};

    let table = match (grid_mode, motion_kind, rotation_dir) {
        (Diamond, Pro, Cw) | (Diamond, Anti, Ccw) => TURNING_CW,
        (Diamond, Pro, Ccw) | (Diamond, Anti, Cw) => MIRRORED_CCW,
        (Box, Pro, Cw) | (Box, Anti, Ccw) => BOX_TURNING_CW,
        (Box, Pro, Ccw) | (Box, Anti, Cw) => BOX_MIRRORED_CCW,
        (_, Pro | Anti, NoRotation) => return None,

        // Float rows are indexed by hand rotation, not prop rotation.
        (Diamond, Float, Cw) => TURNING_CW,
        (Diamond, Float, Ccw) => MIRRORED_CCW,
        (Box, Float, Cw) => BOX_TURNING_CW,
        (Box, Float, Ccw) => BOX_MIRRORED_CCW,
        (_, Float, NoRotation) => return None,

        (Diamond, Dash, Cw) => DASH_CW,
        (Diamond, Dash, Ccw) => DASH_CCW,
        (Box, Dash, Cw) => DASH_CCW,
        (Box, Dash, Ccw) => DASH_CW,
        (Diamond, Dash | Static, NoRotation) => STILL_DIAMOND,
        (Box, Dash | Static, NoRotation) => STILL_BOX,

        (Diamond, Static, Cw) => TURNING_CW,
        (Diamond, Static, Ccw) => MIRRORED_CCW,
        (Box, Static, Cw) => BOX_TURNING_CW,
        (Box, Static, Ccw) => BOX_MIRRORED_CCW,
    };
    Some(table)
}

/// Zero-turn dual-dash table keyed by the literal `(start_loc, end_loc)` pair.
const TYPE5_ZERO_TURN: [(Location, Location, Table); 8] = [
    (Location::N, Location::S, [Identity, Rot90, Rot180, Rot270]),
    (Location::S, Location::N, [Rot180, Rot270, Identity, Rot90]),
    (Location::E, Location::W, [Rot90, Rot180, Rot270, Identity]),
    (Location::W, Location::E, [Rot270, Identity, Rot90, Rot180]),
    (Location::Ne, Location::Sw, [Identity, Rot90, Rot180, Rot270]),
    (Location::Sw, Location::Ne, [Rot180, Rot270, Identity, Rot90]),
    (Location::Se, Location::Nw, [Rot90, Rot180, Rot270, Identity]),
    (Location::Nw, Location::Se, [Rot270, Identity, Rot90, Rot180]),
];

/// Four candidate offsets for `base`, one per grid quadrant.
///
/// Unknown combinations replicate `base` four times.
pub fn directional_tuples(
    base: Vec2,
    motion_kind: MotionKind,
    rotation_dir: RotationDir,
    grid_mode: GridMode,
    start_loc: Location,
    end_loc: Location,
    is_zero_turn_type5: bool,
) -> [Vec2; 4] {
    let table = if is_zero_turn_type5 {
        TYPE5_ZERO_TURN
            .iter()
            .find(|(s, e, _)| *s == start_loc && *e == end_loc)
            .map(|(_, _, t)| *t)
    } else if motion_kind == MotionKind::Float {
        let hand_dir = RotationDir::of_hand_path(start_loc, end_loc);
        table_for(grid_mode, motion_kind, hand_dir)
    } else {
        table_for(grid_mode, motion_kind, rotation_dir)
    };

    match table {
        Some(table) => table.map(|t| t.apply(base)),
        None => {
            tracing::debug!(
                ?motion_kind,
                ?rotation_dir,
                %grid_mode,
                %start_loc,
                %end_loc,
                is_zero_turn_type5,
                "no directional table; replicating base offset"
            );
            [base; 4]
        }
    }
}

/// Which of the four tuples applies to an arrow at `location`.
///
/// Shift arrows sit between hand points, so on the diamond grid they index the
/// diagonals and on the box grid the cardinals; dash and static arrows sit on
/// the hand points themselves.
pub fn quadrant_index(grid_mode: GridMode, motion_kind: MotionKind, location: Location) -> usize {
    let ring = match (grid_mode, motion_kind.is_shift()) {
        (GridMode::Diamond, true) | (GridMode::Box, false) => {
            [Location::Ne, Location::Se, Location::Sw, Location::Nw]
        }
        (GridMode::Diamond, false) | (GridMode::Box, true) => {
            [Location::N, Location::E, Location::S, Location::W]
        }
    };
    ring.iter().position(|l| *l == location).unwrap_or_else(|| {
        tracing::debug!(%grid_mode, ?motion_kind, %location, "location off the quadrant ring");
        0
    })
}

#[cfg(test)]
#[path = "../../tests/unit/placement/tuples.rs"]
mod tests;
