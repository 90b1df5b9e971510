use std::fmt;

use crate::foundation::error::{PictographError, PictographResult};

pub use kurbo::{Point, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// One of the two tracked actors. `Blue` is actor A, `Red` is actor B.
pub enum ActorId {
    /// Actor A.
    Blue,
    /// Actor B.
    Red,
}

impl ActorId {
    /// Both actors in canonical (A, B) order.
    pub const ALL: [ActorId; 2] = [ActorId::Blue, ActorId::Red];

    /// The other actor.
    pub fn other(self) -> Self {
        match self {
            Self::Blue => Self::Red,
            Self::Red => Self::Blue,
        }
    }

    /// Stable lowercase name used in configuration keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
        }
    }

    /// Parse a configuration key (`"blue"` / `"red"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "blue" => Some(Self::Blue),
            "red" => Some(Self::Red),
            _ => None,
        }
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Grid topology a pictograph is drawn on.
pub enum GridMode {
    /// Hand points on the cardinal locations.
    Diamond,
    /// Hand points on the diagonal locations.
    Box,
}

impl GridMode {
    /// Stable lowercase name used as the configuration directory.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Diamond => "diamond",
            Self::Box => "box",
        }
    }

    /// Locations an actor's hand can occupy on this grid.
    pub fn hand_points(self) -> [Location; 4] {
        match self {
            Self::Diamond => [Location::N, Location::E, Location::S, Location::W],
            Self::Box => [Location::Ne, Location::Se, Location::Sw, Location::Nw],
        }
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Compass location on the grid, listed clockwise from north.
pub enum Location {
    /// North.
    N,
    /// North-east.
    Ne,
    /// East.
    E,
    /// South-east.
    Se,
    /// South.
    S,
    /// South-west.
    Sw,
    /// West.
    W,
    /// North-west.
    Nw,
}

impl Location {
    /// All locations clockwise from north.
    pub const ALL: [Location; 8] = [
        Location::N,
        Location::Ne,
        Location::E,
        Location::Se,
        Location::S,
        Location::Sw,
        Location::W,
        Location::Nw,
    ];

    /// Clockwise index in 45 degree steps, `N == 0`.
    pub fn step_index(self) -> u8 {
        match self {
            Self::N => 0,
            Self::Ne => 1,
            Self::E => 2,
            Self::Se => 3,
            Self::S => 4,
            Self::Sw => 5,
            Self::W => 6,
            Self::Nw => 7,
        }
    }

    /// Inverse of [`Location::step_index`], wrapping modulo 8.
    pub fn from_step_index(idx: u8) -> Self {
        Self::ALL[usize::from(idx % 8)]
    }

    /// Rotate clockwise by `steps` eighths of a turn (negative rotates counter-clockwise).
    pub fn rotated(self, steps: i8) -> Self {
        let idx = (i16::from(self.step_index()) + i16::from(steps)).rem_euclid(8);
        Self::from_step_index(idx as u8)
    }

    /// Location directly across the grid.
    pub fn opposite(self) -> Self {
        self.rotated(4)
    }

    /// `true` for `n e s w`.
    pub fn is_cardinal(self) -> bool {
        self.step_index() % 2 == 0
    }

    /// `true` for `ne se sw nw`.
    pub fn is_diagonal(self) -> bool {
        !self.is_cardinal()
    }

    /// Clockwise distance from `self` to `other` in eighths of a turn (`0..8`).
    pub fn steps_to(self, other: Location) -> u8 {
        (other.step_index() + 8 - self.step_index()) % 8
    }

    /// The location halfway between two hand points a quarter turn apart.
    pub fn between(self, other: Location) -> Option<Location> {
        match self.steps_to(other) {
            2 => Some(self.rotated(1)),
            6 => Some(self.rotated(-1)),
            _ => None,
        }
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
/// Direction a prop spins during a motion.
pub enum RotationDir {
    /// Clockwise.
    #[serde(rename = "cw")]
    Cw,
    /// Counter-clockwise.
    #[serde(rename = "ccw")]
    Ccw,
    /// No rotation.
    #[default]
    #[serde(rename = "none")]
    NoRotation,
}

impl RotationDir {
    /// Opposite spin; `NoRotation` stays put.
    pub fn reversed(self) -> Self {
        match self {
            Self::Cw => Self::Ccw,
            Self::Ccw => Self::Cw,
            Self::NoRotation => Self::NoRotation,
        }
    }

    /// Direction the hand travels from `start` to `end` around the grid.
    ///
    /// Only quarter-turn travel has a direction; static, opposite and
    /// diagonal-crossing travel report [`RotationDir::NoRotation`].
    pub fn of_hand_path(start: Location, end: Location) -> Self {
        match start.steps_to(end) {
            2 => Self::Cw,
            6 => Self::Ccw,
            _ => Self::NoRotation,
        }
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cw => "cw",
            Self::Ccw => "ccw",
            Self::NoRotation => "none",
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Rotational facing state of an actor's prop.
pub enum Orientation {
    /// Facing the grid center.
    In,
    /// Facing away from the grid center.
    Out,
    /// Facing clockwise.
    Clock,
    /// Facing counter-clockwise.
    Counter,
}

impl Orientation {
    /// `true` for `in`/`out`.
    pub fn is_radial(self) -> bool {
        matches!(self, Self::In | Self::Out)
    }

    /// Flip used for clockwise rotation: `in<->out`, `clock<->counter`.
    pub fn flip(self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
            Self::Clock => Self::Counter,
            Self::Counter => Self::Clock,
        }
    }

    /// Flip used for counter-clockwise rotation; currently the same table as
    /// [`Orientation::flip`].
    pub fn flip_ccw(self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
            Self::Clock => Self::Counter,
            Self::Counter => Self::Clock,
        }
    }

    /// Quarter step around `in -> clock -> out -> counter -> in`.
    pub fn quarter_step(self, dir: RotationDir) -> Self {
        const CYCLE: [Orientation; 4] = [
            Orientation::In,
            Orientation::Clock,
            Orientation::Out,
            Orientation::Counter,
        ];
        let idx = CYCLE.iter().position(|o| *o == self).unwrap_or(0);
        match dir {
            RotationDir::Cw => CYCLE[(idx + 1) % 4],
            RotationDir::Ccw => CYCLE[(idx + 3) % 4],
            RotationDir::NoRotation => self,
        }
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Clock => "clock",
            Self::Counter => "counter",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token used for the float sentinel in files and keys.
pub const FLOAT_TURNS_TOKEN: &str = "fl";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TurnsRepr", into = "TurnsRepr")]
/// Rotation magnitude of a motion: a count of half turns, or the float sentinel.
pub enum Turns {
    /// Number of half turns (`3` means `1.5` turns).
    HalfTurns(u32),
    /// Float-indeterminate turns.
    Float,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum TurnsRepr {
    Number(f64),
    Token(String),
}

impl Turns {
    /// Zero turns.
    pub const ZERO: Turns = Turns::HalfTurns(0);

    /// Build from a turn count; must be a non-negative multiple of `0.5`.
    pub fn from_f64(turns: f64) -> PictographResult<Self> {
        let halves = turns * 2.0;
        if !turns.is_finite() || turns < 0.0 || halves.fract() != 0.0 {
            return Err(PictographError::validation(format!(
                "turns must be a non-negative multiple of 0.5, got {turns}"
            )));
        }
        Ok(Self::HalfTurns(halves as u32))
    }

    /// Numeric value; `None` for the float sentinel.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::HalfTurns(h) => Some(f64::from(h) / 2.0),
            Self::Float => None,
        }
    }

    /// Whole turns, rounding down. The float sentinel counts as zero.
    pub fn whole(self) -> u32 {
        match self {
            Self::HalfTurns(h) => h / 2,
            Self::Float => 0,
        }
    }

    /// `true` when a trailing half turn is present.
    pub fn has_half(self) -> bool {
        matches!(self, Self::HalfTurns(h) if h % 2 == 1)
    }

    /// `true` for exactly zero turns (the float sentinel is not zero).
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// `true` for the float sentinel.
    pub fn is_float(self) -> bool {
        self == Self::Float
    }

    /// Key rendering: integers without a decimal point, float sentinel as `fl`.
    pub fn key_repr(self) -> String {
        match self {
            Self::HalfTurns(h) if h % 2 == 0 => (h / 2).to_string(),
            Self::HalfTurns(h) => format!("{}.5", h / 2),
            Self::Float => FLOAT_TURNS_TOKEN.to_string(),
        }
    }

    /// Parse the key rendering produced by [`Turns::key_repr`] (also accepts `1.0`).
    pub fn parse_key(s: &str) -> PictographResult<Self> {
        let s = s.trim();
        if s == FLOAT_TURNS_TOKEN {
            return Ok(Self::Float);
        }
        let v: f64 = s
            .parse()
            .map_err(|_| PictographError::validation(format!("invalid turns token '{s}'")))?;
        Self::from_f64(v)
    }
}

impl Default for Turns {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key_repr())
    }
}

impl TryFrom<TurnsRepr> for Turns {
    type Error = PictographError;

    fn try_from(value: TurnsRepr) -> Result<Self, Self::Error> {
        match value {
            TurnsRepr::Number(v) => Self::from_f64(v),
            TurnsRepr::Token(s) => Self::parse_key(&s),
        }
    }
}

impl From<Turns> for TurnsRepr {
    fn from(value: Turns) -> Self {
        match value.as_f64() {
            Some(v) => TurnsRepr::Number(v),
            None => TurnsRepr::Token(FLOAT_TURNS_TOKEN.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
