//! Parameter sanity checks.
//!
//! Out-of-range parameters are otherwise propagated silently into trajectories, so
//! models expose an opt-in `validate` built from these checks.

use crate::errors::{CoastalError, CoastalResult};
use crate::timeseries::FloatValue;
use log::warn;

/// Checks applied to the parameters of a single model
#[derive(Debug, Clone, Copy)]
pub struct ParameterChecks<'a> {
    model: &'a str,
}

impl<'a> ParameterChecks<'a> {
    pub fn new(model: &'a str) -> Self {
        Self { model }
    }

    fn invalid(&self, parameter: &str, reason: String) -> CoastalError {
        CoastalError::InvalidParameter {
            model: self.model.to_string(),
            parameter: parameter.to_string(),
            reason,
        }
    }

    /// Rejects NaN and infinite values
    pub fn finite(&self, parameter: &str, value: FloatValue) -> CoastalResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(self.invalid(parameter, format!("must be finite, got {}", value)))
        }
    }

    /// Stocks, capacities and initial values
    pub fn non_negative(&self, parameter: &str, value: FloatValue) -> CoastalResult<()> {
        self.finite(parameter, value)?;
        if value < 0.0 {
            return Err(self.invalid(parameter, format!("must be non-negative, got {}", value)));
        }
        Ok(())
    }

    /// Ratios expected to lie in `[0, 1]`.
    ///
    /// Values outside the range are legal (a growth rate may exceed 100%) and only logged.
    pub fn fraction(&self, parameter: &str, value: FloatValue) -> CoastalResult<()> {
        self.finite(parameter, value)?;
        if !(0.0..=1.0).contains(&value) {
            warn!(
                "{}.{} = {} lies outside [0, 1]",
                self.model, parameter, value
            );
        }
        Ok(())
    }
}
