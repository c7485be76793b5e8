use coastal_core::timeseries::{FloatValue, Horizon};
use serde::{Deserialize, Serialize};

/// Parameters for the environmental model
///
/// # Mangroves
/// Coverage loses a fixed fraction every year and gains a constant restored area.
/// Every year the restored stock adds `coverage * mangrove_carbon_sequestration` to the
/// cumulative carbon store.
///
/// # Biodiversity and water quality
/// Both indices decline by the sum of their loss rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentalParameters {
    #[serde(flatten)]
    pub horizon: Horizon,

    // Mangroves
    /// unit: 1 / yr
    pub mangrove_degradation_rate: FloatValue,
    /// Coverage restored each year
    /// unit: % / yr
    pub mangrove_restoration_rate: FloatValue,
    /// unit: t CO2 / yr per % coverage
    pub mangrove_carbon_sequestration: FloatValue,

    // Salinity
    /// unit: 1 / yr
    pub salinity_intrusion_rate: FloatValue,
    /// Not used by the dynamics; carried for configuration compatibility
    /// unit: 1 / yr
    pub groundwater_salinity_increase: FloatValue,

    // Biodiversity
    /// unit: 1 / yr
    pub species_loss_rate: FloatValue,
    /// unit: 1 / yr
    pub habitat_fragmentation_rate: FloatValue,

    // Water quality
    /// unit: 1 / yr
    pub water_pollution_increase: FloatValue,
    /// unit: 1 / yr
    pub nutrient_loading_increase: FloatValue,
}

impl Default for EnvironmentalParameters {
    fn default() -> Self {
        Self {
            horizon: Horizon::default(),
            mangrove_degradation_rate: 0.013,
            mangrove_restoration_rate: 0.02,
            mangrove_carbon_sequestration: 0.5,
            salinity_intrusion_rate: 0.03,
            groundwater_salinity_increase: 0.02,
            species_loss_rate: 0.01,
            habitat_fragmentation_rate: 0.015,
            water_pollution_increase: 0.02,
            nutrient_loading_increase: 0.025,
        }
    }
}
