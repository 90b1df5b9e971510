use crate::{
    foundation::core::{GridMode, Location, Point, RotationDir, Vec2},
    motion::model::{MotionDescriptor, MotionKind, PictographRecord},
};

/// Edge length of the square scene, in scene units.
pub const DEFAULT_SCENE_SIZE: f64 = 950.0;

/// Where on the grid an actor's arrow is drawn.
pub trait LocationCalculator: Send + Sync {
    /// Location the arrow for `motion` sits on.
    fn calculate_location(&self, motion: &MotionDescriptor, pictograph: &PictographRecord) -> Location;
}

/// Maps grid locations to scene coordinates.
pub trait CoordinateSystem: Send + Sync {
    /// Scene point of `location` before any adjustment.
    fn initial_position(&self, motion: &MotionDescriptor, location: Location) -> Point;
    /// Center of the scene.
    fn scene_center(&self) -> Point;
}

/// Arrow rotation in degrees, clockwise from north.
pub trait RotationCalculator: Send + Sync {
    /// Rotation in degrees for `motion` drawn at `location`.
    fn rotation_angle(&self, motion: &MotionDescriptor, location: Location, grid_mode: GridMode) -> f64;
}

#[derive(Clone, Copy, Debug, Default)]
/// Static arrows sit on the start, shifts between start and end, dashes beside the start.
pub struct DefaultLocationCalculator;

impl LocationCalculator for DefaultLocationCalculator {
    fn calculate_location(&self, motion: &MotionDescriptor, _pictograph: &PictographRecord) -> Location {
        match motion.motion_kind {
            MotionKind::Static => motion.start_loc,
            MotionKind::Pro | MotionKind::Anti | MotionKind::Float => motion
                .start_loc
                .between(motion.end_loc)
                .unwrap_or(motion.start_loc),
            MotionKind::Dash => match motion.rotation_dir {
                RotationDir::Cw => motion.start_loc.rotated(2),
                RotationDir::Ccw => motion.start_loc.rotated(-2),
                RotationDir::NoRotation => motion.start_loc,
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
/// Square scene with the grid centered in it.
///
/// Locations that are hand points of the motion's grid sit on the hand-point
/// radius; the in-between locations sit on the layer-2 radius, the midpoint of
/// the chord joining two neighboring hand points.
pub struct DefaultCoordinateSystem {
    /// Edge length of the scene.
    pub scene_size: f64,
    /// Distance from the center to a hand point.
    pub hand_point_radius: f64,
    /// Distance from the center to an in-between location.
    pub layer2_radius: f64,
}

impl DefaultCoordinateSystem {
    /// Radii derived from `scene_size`.
    pub fn new(scene_size: f64) -> Self {
        let hand_point_radius = scene_size * 0.158;
        Self {
            scene_size,
            hand_point_radius,
            layer2_radius: hand_point_radius * std::f64::consts::FRAC_1_SQRT_2,
        }
    }

    fn radius_for(&self, location: Location, motion: &MotionDescriptor) -> f64 {
        let on_hand_point = if motion.start_loc.is_cardinal() {
            location.is_cardinal()
        } else {
            location.is_diagonal()
        };
        if on_hand_point {
            self.hand_point_radius
        } else {
            self.layer2_radius
        }
    }
}

impl Default for DefaultCoordinateSystem {
    fn default() -> Self {
        Self::new(DEFAULT_SCENE_SIZE)
    }
}

/// Unit vector from the grid center towards `location` (y grows downwards).
pub fn direction_of(location: Location) -> Vec2 {
    let theta = f64::from(location.step_index()) * std::f64::consts::FRAC_PI_4;
    Vec2::new(theta.sin(), -theta.cos())
}

impl CoordinateSystem for DefaultCoordinateSystem {
    fn initial_position(&self, motion: &MotionDescriptor, location: Location) -> Point {
        self.scene_center() + direction_of(location) * self.radius_for(location, motion)
    }

    fn scene_center(&self) -> Point {
        Point::new(self.scene_size / 2.0, self.scene_size / 2.0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Fixed per-kind rotation tables.
///
/// Every table is an offset added to the location's compass angle.
pub struct DefaultRotationCalculator;

impl DefaultRotationCalculator {
    fn table_offset(motion: &MotionDescriptor, grid_mode: GridMode) -> f64 {
        let dir = match motion.motion_kind {
            MotionKind::Float => RotationDir::of_hand_path(motion.start_loc, motion.end_loc),
            _ => motion.rotation_dir,
        };
        let offset = match (motion.motion_kind, dir) {
            (MotionKind::Pro | MotionKind::Float, RotationDir::Cw) => 0.0,
            (MotionKind::Pro | MotionKind::Float, RotationDir::Ccw) => 90.0,
            (MotionKind::Anti, RotationDir::Cw) => 90.0,
            (MotionKind::Anti, RotationDir::Ccw) => 0.0,
            (MotionKind::Pro | MotionKind::Anti | MotionKind::Float, RotationDir::NoRotation) => 0.0,
            (MotionKind::Dash, RotationDir::Cw) => 90.0,
            (MotionKind::Dash, RotationDir::Ccw) => 270.0,
            (MotionKind::Dash, RotationDir::NoRotation) => 180.0,
            (MotionKind::Static, RotationDir::Cw) => 90.0,
            (MotionKind::Static, RotationDir::Ccw) => 270.0,
            (MotionKind::Static, RotationDir::NoRotation) => 0.0,
        };
        // Box-grid shift arrows sit on cardinal points, an eighth off the diamond layout.
        match (grid_mode, motion.motion_kind.is_shift()) {
            (GridMode::Box, true) => offset - 45.0,
            _ => offset,
        }
    }
}

impl RotationCalculator for DefaultRotationCalculator {
    fn rotation_angle(&self, motion: &MotionDescriptor, location: Location, grid_mode: GridMode) -> f64 {
        let base = f64::from(location.step_index()) * 45.0;
        (base + Self::table_offset(motion, grid_mode)).rem_euclid(360.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/grid.rs"]
mod tests;
