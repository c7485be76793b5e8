//! Coupled coastal resilience and blue economy trajectories.
//!
//! Five independent leaf models (climate, environment, socioeconomic, blue economy and
//! policy) are advanced in lockstep by an [`IntegratedSimulation`], which derives the
//! resilience, sustainability and development indices from their state every year.
//!
//! ```no_run
//! use coastal::IntegratedSimulation;
//!
//! let mut simulation = IntegratedSimulation::with_defaults()?;
//! let record = simulation.advance_to_end()?;
//! assert_eq!(record.years().len(), 16);
//! # Ok::<(), coastal::CoastalError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod indices;
pub mod simulation;

#[cfg(feature = "python")]
mod python;

pub use coastal_core::errors::{CoastalError, CoastalResult};

pub use config::ScenarioConfig;
pub use indices::{
    CompositeIndex, CompositeIndices, IndexTerm, IndexValues, LeafStates, TermTransform,
};
pub use simulation::{
    IntegratedSimulation, IntegratedSimulationBuilder, SimulationRecord, SimulationState,
    StepRecord,
};
