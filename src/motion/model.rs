use std::{collections::BTreeMap, path::Path};

use anyhow::Context;

use crate::{
    foundation::core::{ActorId, GridMode, Location, Orientation, RotationDir, Turns},
    foundation::error::{PictographError, PictographResult},
    motion::letter::Letter,
    motion::orientation::propagate,
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Category of movement an actor performs.
pub enum MotionKind {
    /// Hand stays on its location.
    Static,
    /// Prop spins with the hand's travel.
    Pro,
    /// Prop spins against the hand's travel.
    Anti,
    /// Hand travels while prop rotation is suspended.
    Float,
    /// Hand crosses the grid center to the opposite location.
    Dash,
}

impl MotionKind {
    /// All kinds in configuration order.
    pub const ALL: [MotionKind; 5] = [
        MotionKind::Static,
        MotionKind::Pro,
        MotionKind::Anti,
        MotionKind::Float,
        MotionKind::Dash,
    ];

    /// `true` for `pro`, `anti` and `float`.
    pub fn is_shift(self) -> bool {
        matches!(self, Self::Pro | Self::Anti | Self::Float)
    }

    /// Lead precedence for hybrid letters: shift > dash > static.
    pub fn lead_precedence(self) -> u8 {
        match self {
            Self::Pro | Self::Anti | Self::Float => 2,
            Self::Dash => 1,
            Self::Static => 0,
        }
    }

    /// Stable lowercase name used in configuration keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Pro => "pro",
            Self::Anti => "anti",
            Self::Float => "float",
            Self::Dash => "dash",
        }
    }

    /// Parse a configuration key.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

fn default_visible() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One actor's motion within a pictograph.
///
/// The end orientation is not stored: it is always derived from the other
/// fields by [`MotionDescriptor::end_orientation`].
pub struct MotionDescriptor {
    /// Actor performing the motion.
    pub actor: ActorId,
    /// Motion category.
    pub motion_kind: MotionKind,
    /// Hand location at the start of the beat.
    pub start_loc: Location,
    /// Hand location at the end of the beat.
    pub end_loc: Location,
    /// Prop spin direction.
    #[serde(default)]
    pub rotation_dir: RotationDir,
    /// Rotation magnitude.
    #[serde(default)]
    pub turns: Turns,
    /// Prop orientation at the start of the beat.
    pub start_orientation: Orientation,
    /// Motion kind before the motion entered the float state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefloat_motion_kind: Option<MotionKind>,
    /// Rotation direction before the motion entered the float state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefloat_rotation_dir: Option<RotationDir>,
    /// Whether the actor is drawn at all.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl MotionDescriptor {
    /// Motion with no rotation, zero turns and `in` start orientation.
    pub fn new(actor: ActorId, motion_kind: MotionKind, start_loc: Location, end_loc: Location) -> Self {
        Self {
            actor,
            motion_kind,
            start_loc,
            end_loc,
            rotation_dir: RotationDir::NoRotation,
            turns: Turns::ZERO,
            start_orientation: Orientation::In,
            prefloat_motion_kind: None,
            prefloat_rotation_dir: None,
            visible: true,
        }
    }

    /// Float motion remembering the kind and direction it had before floating.
    pub fn float_from(
        actor: ActorId,
        prefloat_kind: MotionKind,
        prefloat_rotation: RotationDir,
        start_loc: Location,
        end_loc: Location,
    ) -> Self {
        Self {
            turns: Turns::Float,
            prefloat_motion_kind: Some(prefloat_kind),
            prefloat_rotation_dir: Some(prefloat_rotation),
            ..Self::new(actor, MotionKind::Float, start_loc, end_loc)
        }
    }

    /// Set the spin direction.
    pub fn with_rotation(mut self, rotation_dir: RotationDir) -> Self {
        self.rotation_dir = rotation_dir;
        self
    }

    /// Set the turns.
    pub fn with_turns(mut self, turns: Turns) -> Self {
        self.turns = turns;
        self
    }

    /// Set the start orientation.
    pub fn with_start_orientation(mut self, orientation: Orientation) -> Self {
        self.start_orientation = orientation;
        self
    }

    /// Hide the actor.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Orientation at the end of the beat, derived from the motion parameters.
    pub fn end_orientation(&self) -> Orientation {
        propagate(
            self.start_orientation,
            self.motion_kind,
            self.rotation_dir,
            self.turns,
            self.start_loc,
            self.end_loc,
        )
    }

    /// Motion kind used for comparisons: the prefloat kind for float motions.
    pub fn effective_motion_kind(&self) -> MotionKind {
        match (self.motion_kind, self.prefloat_motion_kind) {
            (MotionKind::Float, Some(kind)) => kind,
            (kind, _) => kind,
        }
    }

    /// Rotation direction used for comparisons: the prefloat direction for float motions.
    pub fn effective_rotation_dir(&self) -> RotationDir {
        match (self.motion_kind, self.prefloat_rotation_dir) {
            (MotionKind::Float, Some(dir)) => dir,
            (_, _) => self.rotation_dir,
        }
    }

    /// Check the float shadow-field invariant.
    pub fn validate(&self) -> PictographResult<()> {
        if self.motion_kind == MotionKind::Float && self.prefloat_motion_kind.is_none() {
            return Err(PictographError::validation(format!(
                "{} float motion is missing prefloat_motion_kind",
                self.actor
            )));
        }
        if self.prefloat_motion_kind == Some(MotionKind::Float) {
            return Err(PictographError::validation(format!(
                "{} prefloat_motion_kind cannot itself be float",
                self.actor
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One frame: two motions, a letter, composite positions and a grid mode.
pub struct PictographRecord {
    /// Classification label, if known.
    #[serde(default)]
    pub letter: Option<Letter>,
    /// Composite start position key (`alpha1`, `gamma11`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_pos: Option<String>,
    /// Composite end position key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_pos: Option<String>,
    /// Grid topology.
    pub grid_mode: GridMode,
    /// Motions keyed by actor.
    pub motions: BTreeMap<ActorId, MotionDescriptor>,
}

impl PictographRecord {
    /// Build a record from the blue and red motions.
    pub fn new(grid_mode: GridMode, blue: MotionDescriptor, red: MotionDescriptor) -> Self {
        let mut motions = BTreeMap::new();
        motions.insert(ActorId::Blue, MotionDescriptor { actor: ActorId::Blue, ..blue });
        motions.insert(ActorId::Red, MotionDescriptor { actor: ActorId::Red, ..red });
        Self {
            letter: None,
            start_pos: None,
            end_pos: None,
            grid_mode,
            motions,
        }
    }

    /// Attach a letter.
    pub fn with_letter(mut self, letter: impl Into<Letter>) -> Self {
        self.letter = Some(letter.into());
        self
    }

    /// Motion for one actor.
    pub fn motion(&self, actor: ActorId) -> Option<&MotionDescriptor> {
        self.motions.get(&actor)
    }

    /// Both motions in (blue, red) order, if present.
    pub fn pair(&self) -> Option<(&MotionDescriptor, &MotionDescriptor)> {
        Some((self.motion(ActorId::Blue)?, self.motion(ActorId::Red)?))
    }

    /// Structural checks applied to loaded input.
    pub fn validate(&self) -> PictographResult<()> {
        if self.motions.len() != 2 {
            return Err(PictographError::validation(format!(
                "pictograph must carry exactly 2 motions, found {}",
                self.motions.len()
            )));
        }
        for (actor, motion) in &self.motions {
            if motion.actor != *actor {
                return Err(PictographError::validation(format!(
                    "motion keyed '{actor}' declares actor '{}'",
                    motion.actor
                )));
            }
            motion.validate()?;
        }
        Ok(())
    }

    /// Parse and validate a single pictograph from JSON.
    pub fn from_json_str(s: &str) -> PictographResult<Self> {
        let record: Self = serde_json::from_str(s)?;
        record.validate()?;
        Ok(record)
    }

    /// Read, parse and validate a single pictograph from a JSON file.
    pub fn from_path(path: &Path) -> PictographResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read pictograph '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

/// Read, parse and validate a sequence of pictographs (a JSON array) from a file.
pub fn read_sequence(path: &Path) -> PictographResult<Vec<PictographRecord>> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read sequence '{}'", path.display()))?;
    let beats: Vec<PictographRecord> = serde_json::from_str(&s)?;
    for (idx, beat) in beats.iter().enumerate() {
        beat.validate()
            .map_err(|e| PictographError::validation(format!("beat {idx}: {e}")))?;
    }
    Ok(beats)
}

#[cfg(test)]
#[path = "../../tests/unit/motion/model.rs"]
mod tests;
