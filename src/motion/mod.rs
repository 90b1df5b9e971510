pub(crate) mod letter;
pub(crate) mod model;
pub(crate) mod orientation;
pub mod predicates;
