use crate::{
    classify::dataset::ReferenceDataset,
    classify::strategy::{
        ClassificationFailure, ClassificationOutcome, ClassificationStrategy, DualFloatStrategy,
        ExactStrategy, HybridFloatStrategy,
    },
    foundation::config::{DEFAULT_DUAL_FLOAT_THRESHOLD, EngineConfig},
    motion::model::{MotionDescriptor, PictographRecord},
};

/// Runs the first applicable strategy; read-only over the dataset.
pub struct LetterClassifier {
    strategies: Vec<Box<dyn ClassificationStrategy>>,
}

impl Default for LetterClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_DUAL_FLOAT_THRESHOLD)
    }
}

impl LetterClassifier {
    /// Dual-float, hybrid-float, then exact.
    pub fn new(dual_float_threshold: f64) -> Self {
        Self::with_strategies(vec![
            Box::new(DualFloatStrategy {
                threshold: dual_float_threshold,
            }),
            Box::new(HybridFloatStrategy),
            Box::new(ExactStrategy),
        ])
    }

    /// Default strategy order using the config's dual-float threshold.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.dual_float_threshold)
    }

    /// Custom strategy order; the first strategy that applies runs.
    pub fn with_strategies(strategies: Vec<Box<dyn ClassificationStrategy>>) -> Self {
        Self { strategies }
    }

    /// Classify a `(blue, red)` motion pair.
    #[tracing::instrument(skip_all, fields(blue = blue.motion_kind.as_str(), red = red.motion_kind.as_str()))]
    pub fn classify(
        &self,
        blue: &MotionDescriptor,
        red: &MotionDescriptor,
        dataset: &ReferenceDataset,
    ) -> ClassificationOutcome {
        let Some(strategy) = self.strategies.iter().find(|s| s.applies_to(blue, red)) else {
            return Err(ClassificationFailure::new("no strategy applies", None));
        };
        let outcome = strategy.execute(blue, red, dataset);
        match &outcome {
            Ok(c) => tracing::debug!(
                letter = %c.letter,
                confidence = c.confidence,
                strategy = c.strategy.as_str(),
                "classified"
            ),
            Err(f) => tracing::debug!(
                reason = %f.reason,
                strategy = strategy.kind().as_str(),
                "classification failed"
            ),
        }
        outcome
    }

    /// Classify a pictograph's `(blue, red)` motions.
    pub fn classify_pictograph(
        &self,
        pictograph: &PictographRecord,
        dataset: &ReferenceDataset,
    ) -> ClassificationOutcome {
        let Some((blue, red)) = pictograph.pair() else {
            return Err(ClassificationFailure::new("pictograph is missing a motion", None));
        };
        self.classify(blue, red, dataset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/classify/classifier.rs"]
mod tests;
