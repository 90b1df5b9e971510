pub(crate) mod defaults;
pub(crate) mod grid;
pub(crate) mod keys;
pub(crate) mod orchestrator;
pub(crate) mod special;
pub(crate) mod store;
pub(crate) mod tuples;
