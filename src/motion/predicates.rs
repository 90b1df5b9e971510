//! Boolean classification queries over a single pictograph.
//!
//! Queries that need both motions return `false` when either is missing.

use crate::{
    foundation::core::{ActorId, Location, Orientation},
    motion::model::{MotionKind, PictographRecord},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Relative placement of the two hands.
pub enum PositionFamily {
    /// Hands on opposite locations.
    Alpha,
    /// Hands on the same location.
    Beta,
    /// Hands a quarter turn apart.
    Gamma,
}

impl PositionFamily {
    /// Family of a pair of hand locations.
    pub fn from_locations(blue: Location, red: Location) -> Option<Self> {
        match blue.steps_to(red) {
            0 => Some(Self::Beta),
            4 => Some(Self::Alpha),
            2 | 6 => Some(Self::Gamma),
            _ => None,
        }
    }

    /// Family of a composite position key such as `alpha3` or `gamma11`.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        if key.starts_with("alpha") {
            Some(Self::Alpha)
        } else if key.starts_with("beta") {
            Some(Self::Beta)
        } else if key.starts_with("gamma") {
            Some(Self::Gamma)
        } else {
            None
        }
    }
}

/// Family at the start of the beat; motions win over the stored position key.
pub fn start_family(p: &PictographRecord) -> Option<PositionFamily> {
    match p.pair() {
        Some((blue, red)) => PositionFamily::from_locations(blue.start_loc, red.start_loc),
        None => p.start_pos.as_deref().and_then(PositionFamily::from_key),
    }
}

/// Family at the end of the beat; motions win over the stored position key.
pub fn end_family(p: &PictographRecord) -> Option<PositionFamily> {
    match p.pair() {
        Some((blue, red)) => PositionFamily::from_locations(blue.end_loc, red.end_loc),
        None => p.end_pos.as_deref().and_then(PositionFamily::from_key),
    }
}

/// Ends in an alpha position.
pub fn ends_with_alpha(p: &PictographRecord) -> bool {
    end_family(p) == Some(PositionFamily::Alpha)
}

/// Ends in a beta position.
pub fn ends_with_beta(p: &PictographRecord) -> bool {
    end_family(p) == Some(PositionFamily::Beta)
}

/// Ends in a gamma position.
pub fn ends_with_gamma(p: &PictographRecord) -> bool {
    end_family(p) == Some(PositionFamily::Gamma)
}

/// Starts in an alpha position.
pub fn starts_with_alpha(p: &PictographRecord) -> bool {
    start_family(p) == Some(PositionFamily::Alpha)
}

/// Starts in a beta position.
pub fn starts_with_beta(p: &PictographRecord) -> bool {
    start_family(p) == Some(PositionFamily::Beta)
}

/// Starts in a gamma position.
pub fn starts_with_gamma(p: &PictographRecord) -> bool {
    start_family(p) == Some(PositionFamily::Gamma)
}

fn end_orientations(p: &PictographRecord) -> Option<(Orientation, Orientation)> {
    let (blue, red) = p.pair()?;
    Some((blue.end_orientation(), red.end_orientation()))
}

fn start_orientations(p: &PictographRecord) -> Option<(Orientation, Orientation)> {
    let (blue, red) = p.pair()?;
    Some((blue.start_orientation, red.start_orientation))
}

/// Both props end `in`/`out`.
pub fn ends_with_radial_orientation(p: &PictographRecord) -> bool {
    end_orientations(p).is_some_and(|(a, b)| a.is_radial() && b.is_radial())
}

/// Both props end `clock`/`counter`.
pub fn ends_with_nonradial_orientation(p: &PictographRecord) -> bool {
    end_orientations(p).is_some_and(|(a, b)| !a.is_radial() && !b.is_radial())
}

/// One prop ends radial, the other non-radial.
pub fn ends_with_layer3(p: &PictographRecord) -> bool {
    end_orientations(p).is_some_and(|(a, b)| a.is_radial() != b.is_radial())
}

/// One prop starts radial, the other non-radial.
pub fn starts_with_layer3(p: &PictographRecord) -> bool {
    start_orientations(p).is_some_and(|(a, b)| a.is_radial() != b.is_radial())
}

/// The two actors perform different motion kinds.
pub fn has_hybrid_motions(p: &PictographRecord) -> bool {
    p.pair()
        .is_some_and(|(blue, red)| blue.motion_kind != red.motion_kind)
}

/// Both motions float.
pub fn is_dual_float(p: &PictographRecord) -> bool {
    p.pair().is_some_and(|(blue, red)| {
        blue.motion_kind == MotionKind::Float && red.motion_kind == MotionKind::Float
    })
}

/// At least one motion floats.
pub fn has_float_motion(p: &PictographRecord) -> bool {
    ActorId::ALL
        .into_iter()
        .filter_map(|actor| p.motion(actor))
        .any(|m| m.motion_kind == MotionKind::Float)
}

#[cfg(test)]
#[path = "../../tests/unit/motion/predicates.rs"]
mod tests;
