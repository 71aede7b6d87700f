//! Value objects - access predicates and field rules

pub mod permissions;
pub mod validation;

pub use permissions::{Access, Actor, Verdict};
