use std::fmt;

use crate::{
    foundation::core::{ActorId, GridMode, Orientation, Turns},
    foundation::error::{PictographError, PictographResult},
    motion::letter::{Letter, LetterType},
    motion::model::{MotionDescriptor, MotionKind},
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Which orientation family each actor starts in.
pub enum OrientationCategory {
    /// Both actors start radial (`in`/`out`).
    #[serde(rename = "from_layer1")]
    Layer1,
    /// Both actors start non-radial (`clock`/`counter`).
    #[serde(rename = "from_layer2")]
    Layer2,
    /// Blue starts radial, red non-radial.
    #[serde(rename = "from_layer3_blue1_red2")]
    Layer3Blue1Red2,
    /// Blue starts non-radial, red radial.
    #[serde(rename = "from_layer3_blue2_red1")]
    Layer3Blue2Red1,
}

impl OrientationCategory {
    /// All categories in directory order.
    pub const ALL: [OrientationCategory; 4] = [
        OrientationCategory::Layer1,
        OrientationCategory::Layer2,
        OrientationCategory::Layer3Blue1Red2,
        OrientationCategory::Layer3Blue2Red1,
    ];

    /// Category from the two start orientations.
    pub fn from_orientations(blue: Orientation, red: Orientation) -> Self {
        match (blue.is_radial(), red.is_radial()) {
            (true, true) => Self::Layer1,
            (false, false) => Self::Layer2,
            (true, false) => Self::Layer3Blue1Red2,
            (false, true) => Self::Layer3Blue2Red1,
        }
    }

    /// `true` for the two layer-3 variants.
    pub fn is_mixed(self) -> bool {
        matches!(self, Self::Layer3Blue1Red2 | Self::Layer3Blue2Red1)
    }

    /// Category with the actors' families swapped.
    pub fn mirrored(self) -> Self {
        match self {
            Self::Layer3Blue1Red2 => Self::Layer3Blue2Red1,
            Self::Layer3Blue2Red1 => Self::Layer3Blue1Red2,
            other => other,
        }
    }

    /// Directory name under `{grid_mode}/special/`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Layer1 => "from_layer1",
            Self::Layer2 => "from_layer2",
            Self::Layer3Blue1Red2 => "from_layer3_blue1_red2",
            Self::Layer3Blue2Red1 => "from_layer3_blue2_red1",
        }
    }
}

impl fmt::Display for OrientationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
/// How the two turn values of a [`TurnsKey`] are ordered.
pub enum TurnsKeyScheme {
    /// `(blue, red)`; used by non-hybrid letters.
    ColorPair,
    /// `(pro, anti)`; used by hybrid Type 1 letters.
    MotionRole,
    /// `(lead, trail)`; used by hybrid Type 2+ letters.
    LeadState,
}

impl TurnsKeyScheme {
    /// Scheme a letter's turns keys are written in.
    pub fn for_letter(letter: &Letter) -> Self {
        if !letter.is_hybrid() {
            return Self::ColorPair;
        }
        match letter.letter_type() {
            Some(LetterType::Type1) => Self::MotionRole,
            _ => Self::LeadState,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Derived key for the turns pair of a pictograph, rendered `"(a, b)"`.
pub struct TurnsKey {
    /// How `first` and `second` are chosen.
    pub scheme: TurnsKeyScheme,
    /// Left-hand turns.
    pub first: Turns,
    /// Right-hand turns.
    pub second: Turns,
}

impl TurnsKey {
    /// Key from an explicit pair.
    pub fn new(scheme: TurnsKeyScheme, first: Turns, second: Turns) -> Self {
        Self {
            scheme,
            first,
            second,
        }
    }

    /// Parse the file rendering; the scheme comes from the owning letter.
    pub fn parse(scheme: TurnsKeyScheme, s: &str) -> PictographResult<Self> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| PictographError::config(format!("turns key '{s}' is not parenthesized")))?;
        let mut parts = inner.split(',');
        let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(PictographError::config(format!(
                "turns key '{s}' must have exactly two entries"
            )));
        };
        Ok(Self::new(scheme, Turns::parse_key(a)?, Turns::parse_key(b)?))
    }

    /// Key of the color-swapped pictograph.
    ///
    /// Only color-ordered keys change; role and lead keys do not mention color.
    pub fn mirrored(self) -> Self {
        match self.scheme {
            TurnsKeyScheme::ColorPair => Self::new(self.scheme, self.second, self.first),
            TurnsKeyScheme::MotionRole | TurnsKeyScheme::LeadState => self,
        }
    }
}

impl fmt::Display for TurnsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Motion roles `(first, second)` used by the Type 1 hybrid generator of a letter.
///
/// Generators are picked by the first two characters of the letter name.
fn role_order(letter: &Letter) -> Option<(MotionKind, MotionKind)> {
    match letter.base().as_str() {
        "C" | "F" | "I" | "L" | "O" | "R" | "U" | "V" => Some((MotionKind::Pro, MotionKind::Anti)),
        _ => None,
    }
}

/// Turns key for a letter and its two motions.
pub fn derive_turns_key(letter: &Letter, blue: &MotionDescriptor, red: &MotionDescriptor) -> TurnsKey {
    let color_pair = TurnsKey::new(TurnsKeyScheme::ColorPair, blue.turns, red.turns);
    match TurnsKeyScheme::for_letter(letter) {
        TurnsKeyScheme::ColorPair => color_pair,
        TurnsKeyScheme::MotionRole => {
            let Some((first_role, second_role)) = role_order(letter) else {
                tracing::debug!(%letter, "no role generator; using color order");
                return color_pair;
            };
            let (b, r) = (blue.effective_motion_kind(), red.effective_motion_kind());
            if b == first_role && r == second_role {
                TurnsKey::new(TurnsKeyScheme::MotionRole, blue.turns, red.turns)
            } else if r == first_role && b == second_role {
                TurnsKey::new(TurnsKeyScheme::MotionRole, red.turns, blue.turns)
            } else {
                tracing::debug!(%letter, ?b, ?r, "motions do not fill the letter's roles");
                TurnsKey::new(TurnsKeyScheme::MotionRole, blue.turns, red.turns)
            }
        }
        TurnsKeyScheme::LeadState => match lead_actor(blue, red) {
            Some(ActorId::Red) => TurnsKey::new(TurnsKeyScheme::LeadState, red.turns, blue.turns),
            Some(ActorId::Blue) | None => {
                TurnsKey::new(TurnsKeyScheme::LeadState, blue.turns, red.turns)
            }
        },
    }
}

/// Actor whose motion leads: the higher motion precedence wins, ties have no lead.
pub fn lead_actor(blue: &MotionDescriptor, red: &MotionDescriptor) -> Option<ActorId> {
    let b = blue.motion_kind.lead_precedence();
    let r = red.motion_kind.lead_precedence();
    match b.cmp(&r) {
        std::cmp::Ordering::Greater => Some(ActorId::Blue),
        std::cmp::Ordering::Less => Some(ActorId::Red),
        std::cmp::Ordering::Equal => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Composite index of one special-placement leaf.
pub struct SpecialKey {
    /// Grid the pictograph is drawn on.
    pub grid_mode: GridMode,
    /// Start-orientation directory.
    pub orientation: OrientationCategory,
    /// Letter the leaf belongs to.
    pub letter: Letter,
    /// Turns pair inside the letter.
    pub turns: TurnsKey,
}

impl SpecialKey {
    /// Key for a pictograph's letter and motions.
    pub fn derive(
        grid_mode: GridMode,
        letter: &Letter,
        blue: &MotionDescriptor,
        red: &MotionDescriptor,
    ) -> Self {
        Self {
            grid_mode,
            orientation: OrientationCategory::from_orientations(
                blue.start_orientation,
                red.start_orientation,
            ),
            letter: letter.clone(),
            turns: derive_turns_key(letter, blue, red),
        }
    }

    /// Key of the color-swapped configuration.
    pub fn mirrored(&self) -> Self {
        Self {
            grid_mode: self.grid_mode,
            orientation: self.orientation.mirrored(),
            letter: self.letter.clone(),
            turns: self.turns.mirrored(),
        }
    }
}

impl fmt::Display for SpecialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.grid_mode, self.orientation, self.letter, self.turns
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Key inside a special-placement leaf.
pub enum EntryKey {
    /// Offset for one actor.
    Actor(ActorId),
    /// Actor-agnostic offset for a motion kind.
    Motion(MotionKind),
}

impl EntryKey {
    /// Parse an actor or motion-kind slot name.
    pub fn parse(s: &str) -> Option<Self> {
        ActorId::parse(s)
            .map(Self::Actor)
            .or_else(|| MotionKind::parse(s).map(Self::Motion))
    }

    /// Slot name as written in the config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Actor(actor) => actor.as_str(),
            Self::Motion(kind) => kind.as_str(),
        }
    }
}

/// Suffix of rotation-override keys (`blue_rot_angle`).
pub const ROT_ANGLE_SUFFIX: &str = "_rot_angle";

/// Parse a rotation-override key into its actor.
pub fn parse_rot_angle_key(s: &str) -> Option<ActorId> {
    s.strip_suffix(ROT_ANGLE_SUFFIX).and_then(ActorId::parse)
}

/// Rotation-override key for `actor` (`blue_rot_angle`).
pub fn rot_angle_key(actor: ActorId) -> String {
    format!("{}{ROT_ANGLE_SUFFIX}", actor.as_str())
}

#[cfg(test)]
#[path = "../../tests/unit/placement/keys.rs"]
mod tests;
