//! Core traits and functionalities for discrete-time coastal indicator models.
//!
//! A leaf model advances a fixed set of scalar quantities one year at a time over a
//! horizon fixed at construction. This crate provides the pieces every such model shares:
//! the [`timeseries::TimeAxis`] horizon, the [`trajectory::TrajectorySet`] arena holding one
//! trajectory per quantity, typed state vectors, and the generic [`model::LeafModel`] engine
//! that drives a domain's [`model::Dynamics`].

// Allows the `StateVector` derive, which emits `::coastal_core` paths, to be used in this crate
extern crate self as coastal_core;

pub mod errors;
pub mod model;
pub mod rules;
pub mod state;
pub mod timeseries;
pub mod trajectory;
pub mod validation;
pub mod variable;

// Re-export derive macro for convenience
pub use coastal_macros::StateVector;
