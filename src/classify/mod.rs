pub(crate) mod classifier;
pub(crate) mod dataset;
pub(crate) mod strategy;
