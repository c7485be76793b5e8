//! Model parameters
//!
//! One record per domain. Every record carries the shared [`Horizon`] (flattened, so
//! `start_year`, `end_year` and `time_step` sit next to the rate constants) and provides
//! calibrated defaults, so a partial TOML table fills in the rest.
//!
//! [`Horizon`]: coastal_core::timeseries::Horizon

mod blue_economy;
mod climate;
mod environment;
mod policy;
mod socioeconomic;

pub use blue_economy::BlueEconomyParameters;
pub use climate::ClimateParameters;
pub use environment::EnvironmentalParameters;
pub use policy::PolicyParameters;
pub use socioeconomic::SocioeconomicParameters;
