use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use anyhow::Context;

use crate::{
    foundation::core::{Location, RotationDir},
    foundation::error::{PictographError, PictographResult},
    motion::letter::Letter,
    motion::model::{MotionDescriptor, MotionKind, PictographRecord},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Comparison view of one motion.
///
/// Float motions are compared through their prefloat kind and direction.
pub struct MotionSignature {
    /// Kind compared; the prefloat kind for floats.
    pub motion_kind: MotionKind,
    /// Direction compared; the prefloat direction for floats.
    pub rotation_dir: RotationDir,
    /// Start location.
    pub start_loc: Location,
    /// End location.
    pub end_loc: Location,
}

impl MotionSignature {
    /// Signature of `motion`.
    pub fn of(motion: &MotionDescriptor) -> Self {
        debug_assert!(
            motion.motion_kind != MotionKind::Float || motion.prefloat_motion_kind.is_some(),
            "float motion without prefloat_motion_kind"
        );
        Self {
            motion_kind: motion.effective_motion_kind(),
            rotation_dir: motion.effective_rotation_dir(),
            start_loc: motion.start_loc,
            end_loc: motion.end_loc,
        }
    }

    /// Number of compared attributes per motion.
    pub const ATTRIBUTES: usize = 4;

    /// How many attributes agree with `other`.
    pub fn matches(&self, other: &Self) -> usize {
        usize::from(self.motion_kind == other.motion_kind)
            + usize::from(self.rotation_dir == other.rotation_dir)
            + usize::from(self.start_loc == other.start_loc)
            + usize::from(self.end_loc == other.end_loc)
    }
}

/// Signature pair `(blue, red)` used as the exact-match index key.
pub type PairSignature = (MotionSignature, MotionSignature);

/// Labeled examples grouped by letter, with an attribute index for exact lookups.
#[derive(Clone, Debug, Default)]
pub struct ReferenceDataset {
    letters: BTreeMap<Letter, Vec<PictographRecord>>,
    index: HashMap<PairSignature, Letter>,
}

impl ReferenceDataset {
    /// Index `letters`, stamping each example with its letter; the first letter listed wins a shared signature.
    pub fn new(mut letters: BTreeMap<Letter, Vec<PictographRecord>>) -> Self {
        let mut index = HashMap::new();
        for (letter, examples) in &mut letters {
            for example in examples.iter_mut() {
                example.letter = Some(letter.clone());
                let Some((blue, red)) = example.pair() else {
                    tracing::warn!(%letter, "reference example without both motions; not indexed");
                    continue;
                };
                index
                    .entry((MotionSignature::of(blue), MotionSignature::of(red)))
                    .or_insert_with(|| letter.clone());
            }
        }
        Self { letters, index }
    }

    /// Parse `{ "<letter>": [pictograph, ...], ... }`.
    pub fn from_json_str(s: &str) -> PictographResult<Self> {
        let letters: BTreeMap<Letter, Vec<PictographRecord>> = serde_json::from_str(s)?;
        for (letter, examples) in &letters {
            for example in examples {
                example.validate().map_err(|e| {
                    PictographError::validation(format!("reference example for '{letter}': {e}"))
                })?;
            }
        }
        Ok(Self::new(letters))
    }

    /// Read and parse a dataset file.
    pub fn from_path(path: &Path) -> PictographResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read reference dataset '{}'", path.display()))?;
        let dataset = Self::from_json_str(&s)?;
        tracing::debug!(
            path = %path.display(),
            letters = dataset.letters.len(),
            examples = dataset.len(),
            "loaded reference dataset"
        );
        Ok(dataset)
    }

    /// Total number of examples.
    pub fn len(&self) -> usize {
        self.letters.values().map(Vec::len).sum()
    }

    /// `true` when the dataset holds no examples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Examples in letter order.
    pub fn examples(&self) -> impl Iterator<Item = (&Letter, &PictographRecord)> {
        self.letters
            .iter()
            .flat_map(|(letter, examples)| examples.iter().map(move |e| (letter, e)))
    }

    /// First letter whose example has exactly this signature pair.
    pub fn lookup(&self, key: &PairSignature) -> Option<&Letter> {
        self.index.get(key)
    }
}

/// Signature pair of a pictograph in `(blue, red)` order.
pub fn pair_signature(blue: &MotionDescriptor, red: &MotionDescriptor) -> PairSignature {
    (MotionSignature::of(blue), MotionSignature::of(red))
}

#[cfg(test)]
#[path = "../../tests/unit/classify/dataset.rs"]
mod tests;
