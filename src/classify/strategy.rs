use crate::{
    classify::dataset::{MotionSignature, PairSignature, ReferenceDataset, pair_signature},
    motion::letter::Letter,
    motion::model::{MotionDescriptor, MotionKind},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Which strategy produced an outcome.
pub enum StrategyKind {
    /// Both motions float.
    DualFloat,
    /// Exactly one motion floats.
    HybridFloat,
    /// Neither motion floats.
    Exact,
}

impl StrategyKind {
    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DualFloat => "dual_float",
            Self::HybridFloat => "hybrid_float",
            Self::Exact => "exact",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A successful classification.
pub struct Classification {
    /// Matched letter.
    pub letter: Letter,
    /// Similarity in `[0, 1]`; exact lookups report `1.0`.
    pub confidence: f64,
    /// Strategy that matched.
    pub strategy: StrategyKind,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, thiserror::Error)]
#[error("{reason}")]
/// Why classification did not produce a letter.
pub struct ClassificationFailure {
    /// Human-readable cause.
    pub reason: String,
    /// Strategy that ran, or `None` when none applied.
    pub strategy: Option<StrategyKind>,
}

impl ClassificationFailure {
    /// Failure with `reason`, attributed to `strategy`.
    pub fn new(reason: impl Into<String>, strategy: Option<StrategyKind>) -> Self {
        Self {
            reason: reason.into(),
            strategy,
        }
    }
}

/// Result of running a classification strategy.
pub type ClassificationOutcome = Result<Classification, ClassificationFailure>;

/// Reason reported when no example matches.
pub const NO_MATCHING_PATTERN: &str = "no matching pattern";

/// One way of labeling a motion pair.
pub trait ClassificationStrategy: Send + Sync {
    /// Kind reported in outcomes.
    fn kind(&self) -> StrategyKind;
    /// Whether this strategy handles the pair.
    fn applies_to(&self, blue: &MotionDescriptor, red: &MotionDescriptor) -> bool;
    /// Classify the pair against `dataset`.
    fn execute(
        &self,
        blue: &MotionDescriptor,
        red: &MotionDescriptor,
        dataset: &ReferenceDataset,
    ) -> ClassificationOutcome;
}

fn is_float(m: &MotionDescriptor) -> bool {
    m.motion_kind == MotionKind::Float
}

/// Both motions float: best-effort similarity scan.
#[derive(Clone, Copy, Debug)]
pub struct DualFloatStrategy {
    /// A score must be strictly above this to match.
    pub threshold: f64,
}

impl DualFloatStrategy {
    /// Fraction of compared attributes that agree across both actors.
    pub fn similarity(query: &PairSignature, example: &PairSignature) -> f64 {
        let agreed = query.0.matches(&example.0) + query.1.matches(&example.1);
        agreed as f64 / (2 * MotionSignature::ATTRIBUTES) as f64
    }
}

impl ClassificationStrategy for DualFloatStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DualFloat
    }

    fn applies_to(&self, blue: &MotionDescriptor, red: &MotionDescriptor) -> bool {
        is_float(blue) && is_float(red)
    }

    fn execute(
        &self,
        blue: &MotionDescriptor,
        red: &MotionDescriptor,
        dataset: &ReferenceDataset,
    ) -> ClassificationOutcome {
        let query = pair_signature(blue, red);
        for (letter, example) in dataset.examples() {
            let Some((eb, er)) = example.pair() else {
                continue;
            };
            let score = Self::similarity(&query, &pair_signature(eb, er));
            if score > self.threshold {
                return Ok(Classification {
                    letter: letter.clone(),
                    confidence: score,
                    strategy: self.kind(),
                });
            }
        }
        Err(ClassificationFailure::new(NO_MATCHING_PATTERN, Some(self.kind())))
    }
}

fn indexed_lookup(
    kind: StrategyKind,
    blue: &MotionDescriptor,
    red: &MotionDescriptor,
    dataset: &ReferenceDataset,
) -> ClassificationOutcome {
    match dataset.lookup(&pair_signature(blue, red)) {
        Some(letter) => Ok(Classification {
            letter: letter.clone(),
            confidence: 1.0,
            strategy: kind,
        }),
        None => Err(ClassificationFailure::new(NO_MATCHING_PATTERN, Some(kind))),
    }
}

/// Exactly one motion floats: exact lookup comparing the float by its prefloat fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct HybridFloatStrategy;

impl ClassificationStrategy for HybridFloatStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::HybridFloat
    }

    fn applies_to(&self, blue: &MotionDescriptor, red: &MotionDescriptor) -> bool {
        is_float(blue) != is_float(red)
    }

    fn execute(
        &self,
        blue: &MotionDescriptor,
        red: &MotionDescriptor,
        dataset: &ReferenceDataset,
    ) -> ClassificationOutcome {
        indexed_lookup(self.kind(), blue, red, dataset)
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Neither motion floats: exact indexed lookup.
pub struct ExactStrategy;

impl ClassificationStrategy for ExactStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Exact
    }

    fn applies_to(&self, blue: &MotionDescriptor, red: &MotionDescriptor) -> bool {
        !is_float(blue) && !is_float(red)
    }

    fn execute(
        &self,
        blue: &MotionDescriptor,
        red: &MotionDescriptor,
        dataset: &ReferenceDataset,
    ) -> ClassificationOutcome {
        indexed_lookup(self.kind(), blue, red, dataset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/classify/strategy.rs"]
mod tests;
