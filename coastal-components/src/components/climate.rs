//! Climate forcing of the coastal zone
//!
//! Sea level and temperature drift linearly; the remaining hazards compound at a fixed
//! fractional rate. Indexed quantities are percentages of their start-year value.

use crate::parameters::ClimateParameters;
use coastal_core::errors::CoastalResult;
use coastal_core::model::{Domain, Dynamics};
use coastal_core::rules::{compound, drift};
use coastal_core::timeseries::{FloatValue, Horizon};
use coastal_core::validation::ParameterChecks;
use coastal_core::StateVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, StateVector)]
pub struct ClimateState {
    #[variable(unit = "cm", description = "Sea level relative to the start year")]
    pub sea_level: FloatValue,
    #[variable(unit = "degC", description = "Temperature relative to the start year")]
    pub temperature: FloatValue,
    #[variable(unit = "%")]
    pub rainfall: FloatValue,
    #[variable(unit = "%")]
    pub cyclone_frequency: FloatValue,
    #[variable(unit = "%")]
    pub storm_surge_intensity: FloatValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Climate {
    parameters: ClimateParameters,
}

impl Dynamics for Climate {
    type Parameters = ClimateParameters;
    type State = ClimateState;
    const DOMAIN: Domain = Domain::Climate;

    fn from_parameters(parameters: ClimateParameters) -> Self {
        Self { parameters }
    }

    fn parameters(&self) -> &ClimateParameters {
        &self.parameters
    }

    fn horizon(&self) -> Horizon {
        self.parameters.horizon
    }

    fn initial_state(&self) -> ClimateState {
        ClimateState {
            sea_level: 0.0,
            temperature: 0.0,
            rainfall: 100.0,
            cyclone_frequency: 100.0,
            storm_surge_intensity: 100.0,
        }
    }

    fn advance(&self, current: &ClimateState) -> ClimateState {
        let p = &self.parameters;
        ClimateState {
            sea_level: drift(current.sea_level, p.sea_level_rise_rate),
            temperature: drift(current.temperature, p.temperature_increase_rate),
            rainfall: compound(current.rainfall, p.rainfall_change_rate),
            cyclone_frequency: compound(current.cyclone_frequency, p.cyclone_frequency_change),
            storm_surge_intensity: compound(
                current.storm_surge_intensity,
                p.storm_surge_intensity_change,
            ),
        }
    }

    fn validate(&self) -> CoastalResult<()> {
        let p = &self.parameters;
        let checks = ParameterChecks::new(Self::DOMAIN.name());
        checks.finite("sea_level_rise_rate", p.sea_level_rise_rate)?;
        checks.finite("temperature_increase_rate", p.temperature_increase_rate)?;
        checks.fraction("rainfall_change_rate", p.rainfall_change_rate)?;
        checks.fraction("cyclone_frequency_change", p.cyclone_frequency_change)?;
        checks.fraction("storm_surge_intensity_change", p.storm_surge_intensity_change)
    }
}
