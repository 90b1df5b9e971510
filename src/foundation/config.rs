use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::error::{PictographError, PictographResult},
    placement::grid::DEFAULT_SCENE_SIZE,
};

/// Default similarity threshold for dual-float classification.
pub const DEFAULT_DUAL_FLOAT_THRESHOLD: f64 = 0.9;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Engine-wide settings.
pub struct EngineConfig {
    /// Root of the placement configuration tree; `None` runs with empty tables.
    pub config_root: Option<PathBuf>,
    /// A dual-float example must score strictly above this to match.
    pub dual_float_threshold: f64,
    /// Place sequence beats on a rayon pool.
    pub parallel: bool,
    /// Override rayon worker threads (parallel mode only). `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Edge length of the square scene.
    pub scene_size: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_root: None,
            dual_float_threshold: DEFAULT_DUAL_FLOAT_THRESHOLD,
            parallel: false,
            threads: None,
            scene_size: DEFAULT_SCENE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Read and validate a JSON config file.
    ///
    /// A relative `config_root` is resolved against the file's directory.
    pub fn from_path(path: &Path) -> PictographResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read engine config '{}'", path.display()))?;
        let mut cfg: Self = serde_json::from_str(&s)?;
        if let (Some(root), Some(dir)) = (&cfg.config_root, path.parent())
            && root.is_relative()
        {
            cfg.config_root = Some(dir.join(root));
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Point the engine at a configuration tree.
    pub fn with_config_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config_root = Some(root.into());
        self
    }

    /// Reject out-of-range thresholds, zero threads and non-positive scene sizes.
    pub fn validate(&self) -> PictographResult<()> {
        if !(self.dual_float_threshold.is_finite() && (0.0..=1.0).contains(&self.dual_float_threshold)) {
            return Err(PictographError::validation(
                "dual_float_threshold must be within [0, 1]",
            ));
        }
        if let Some(0) = self.threads {
            return Err(PictographError::validation(
                "threads must be >= 1 when set",
            ));
        }
        if !(self.scene_size.is_finite() && self.scene_size > 0.0) {
            return Err(PictographError::validation(
                "scene_size must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
