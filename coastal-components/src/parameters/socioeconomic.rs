use coastal_core::timeseries::{FloatValue, Horizon};
use serde::{Deserialize, Serialize};

/// Parameters for the socioeconomic model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocioeconomicParameters {
    #[serde(flatten)]
    pub horizon: Horizon,

    /// Coastal population in the start year
    /// unit: million
    pub initial_population: FloatValue,
    /// unit: 1 / yr
    pub population_growth_rate: FloatValue,
    /// Fraction of the population leaving the coast each year
    /// unit: 1 / yr
    pub climate_migration_rate: FloatValue,

    /// Coastal GDP in the start year
    /// unit: % of national GDP
    pub initial_gdp: FloatValue,
    /// unit: 1 / yr
    pub gdp_growth_rate: FloatValue,
    /// Share of coastal GDP attributed to the blue economy
    pub blue_economy_share: FloatValue,

    /// unit: 1 / yr
    pub infrastructure_damage_rate: FloatValue,
    /// unit: 1 / yr
    pub infrastructure_investment_rate: FloatValue,

    /// unit: 1 / yr
    pub employment_growth_rate: FloatValue,
    /// unit: 1 / yr
    pub poverty_reduction_rate: FloatValue,
}

impl Default for SocioeconomicParameters {
    fn default() -> Self {
        Self {
            horizon: Horizon::default(),
            initial_population: 35.0,
            population_growth_rate: 0.015,
            climate_migration_rate: 0.02,
            initial_gdp: 3.0,
            gdp_growth_rate: 0.06,
            blue_economy_share: 0.03,
            infrastructure_damage_rate: 0.05,
            infrastructure_investment_rate: 0.08,
            employment_growth_rate: 0.04,
            poverty_reduction_rate: 0.03,
        }
    }
}
