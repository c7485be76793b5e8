use crate::timeseries::Year;
use thiserror::Error;

/// Error type for invalid operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoastalError {
    #[error("{model} has reached the end of its horizon: current year {current_year}, end year {end_year}")]
    HorizonExceeded {
        model: String,
        current_year: Year,
        end_year: Year,
    },
    #[error("Invalid horizon: start_year={start_year}, end_year={end_year}, time_step={time_step}")]
    InvalidHorizon {
        start_year: Year,
        end_year: Year,
        time_step: Year,
    },
    #[error("Invalid parameter {model}.{parameter}: {reason}")]
    InvalidParameter {
        model: String,
        parameter: String,
        reason: String,
    },
    #[error("Horizon of {model} ({found}) does not match the simulation horizon ({expected})")]
    HorizonMismatch {
        model: String,
        expected: String,
        found: String,
    },
    #[error("Variable {0} is not provided by any model")]
    MissingVariable(String),
    #[error("Wrong state length. Expected {expected} values, got {found}")]
    StateLength { expected: usize, found: usize },
    #[error("Invalid scenario configuration: {0}")]
    Config(String),
    #[error("Inconsistent checkpoint: {0}")]
    Checkpoint(String),
}

/// Convenience type for `Result<T, CoastalError>`.
pub type CoastalResult<T> = Result<T, CoastalError>;

impl CoastalError {
    /// True for the end-of-horizon signal a driving loop treats as "simulation complete"
    pub fn is_horizon_exceeded(&self) -> bool {
        matches!(self, CoastalError::HorizonExceeded { .. })
    }
}
