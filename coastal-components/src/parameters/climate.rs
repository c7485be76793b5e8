use coastal_core::timeseries::{FloatValue, Horizon};
use serde::{Deserialize, Serialize};

/// Parameters for the climate model
///
/// All rates are applied once per step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateParameters {
    #[serde(flatten)]
    pub horizon: Horizon,
    /// Additive sea level rise
    /// unit: cm / yr
    pub sea_level_rise_rate: FloatValue,
    /// Additive warming
    /// unit: degC / yr
    pub temperature_increase_rate: FloatValue,
    /// Fractional change in rainfall
    /// unit: 1 / yr
    pub rainfall_change_rate: FloatValue,
    /// Fractional change in cyclone frequency
    /// unit: 1 / yr
    pub cyclone_frequency_change: FloatValue,
    /// Fractional change in storm surge intensity
    /// unit: 1 / yr
    pub storm_surge_intensity_change: FloatValue,
}

impl Default for ClimateParameters {
    fn default() -> Self {
        Self {
            horizon: Horizon::default(),
            sea_level_rise_rate: 0.5,
            temperature_increase_rate: 0.03,
            rainfall_change_rate: 0.02,
            cyclone_frequency_change: 0.05,
            storm_surge_intensity_change: 0.03,
        }
    }
}
