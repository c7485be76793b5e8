//! Scenario configuration
//!
//! A scenario is a TOML document with one optional table per model. Missing tables and
//! missing keys fall back to the calibrated defaults.
//!
//! ```toml
//! validate = true
//!
//! [horizon]
//! start_year = 2024
//! end_year = 2050
//!
//! [climate]
//! sea_level_rise_rate = 0.8
//!
//! [blue_economy]
//! maximum_potential = 8.0
//! ```
//!
//! A `[horizon]` table overrides the horizon of every model.

use crate::simulation::{IntegratedSimulation, IntegratedSimulationBuilder};
use coastal_components::parameters::{
    BlueEconomyParameters, ClimateParameters, EnvironmentalParameters, PolicyParameters,
    SocioeconomicParameters,
};
use coastal_core::errors::{CoastalError, CoastalResult};
use coastal_core::timeseries::Horizon;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Run the optional parameter and horizon checks when building
    pub validate: bool,
    pub horizon: Option<Horizon>,
    pub climate: ClimateParameters,
    pub environment: EnvironmentalParameters,
    pub socioeconomic: SocioeconomicParameters,
    pub blue_economy: BlueEconomyParameters,
    pub policy: PolicyParameters,
}

impl ScenarioConfig {
    pub fn from_toml_str(content: &str) -> CoastalResult<Self> {
        toml::from_str(content).map_err(|e| CoastalError::Config(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> CoastalResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoastalError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> CoastalResult<String> {
        toml::to_string(self).map_err(|e| CoastalError::Config(e.to_string()))
    }

    pub fn builder(&self) -> IntegratedSimulationBuilder {
        let builder = IntegratedSimulation::builder()
            .climate(self.climate.clone())
            .environment(self.environment.clone())
            .socioeconomic(self.socioeconomic.clone())
            .blue_economy(self.blue_economy.clone())
            .policy(self.policy.clone())
            .with_validation(self.validate);
        match self.horizon {
            Some(horizon) => builder.horizon(horizon),
            None => builder,
        }
    }

    pub fn build(&self) -> CoastalResult<IntegratedSimulation> {
        self.builder().build()
    }
}
