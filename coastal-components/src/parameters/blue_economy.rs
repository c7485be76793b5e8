use coastal_core::timeseries::{FloatValue, Horizon};
use serde::{Deserialize, Serialize};

/// Parameters for the blue economy model
///
/// Values are in billion USD except renewable energy, which is installed capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueEconomyParameters {
    #[serde(flatten)]
    pub horizon: Horizon,

    // === Fisheries ===
    /// Default: 1.0 billion USD
    pub initial_fisheries_value: FloatValue,
    /// Default: 0.05 / yr
    pub fisheries_growth_rate: FloatValue,
    /// Fraction of the grown catch that is sustainably harvested.
    ///
    /// Applied every year, so values below 1 shrink the sector over time.
    /// Default: 0.7
    pub sustainable_harvest_rate: FloatValue,

    // === Aquaculture ===
    /// Default: 0.5 billion USD
    pub initial_aquaculture_value: FloatValue,
    /// Default: 0.08 / yr
    pub aquaculture_growth_rate: FloatValue,
    /// Fraction of carrying capacity in sustainable use.
    ///
    /// Default: 0.8
    pub sustainable_aquaculture_rate: FloatValue,

    // === Marine tourism ===
    /// Default: 0.3 billion USD
    pub initial_tourism_value: FloatValue,
    /// Default: 0.1 / yr
    pub tourism_growth_rate: FloatValue,
    /// Visitor capacity, not used by the dynamics.
    ///
    /// Default: 1.0 million visitors / yr
    pub tourism_carrying_capacity: FloatValue,

    // === Marine renewable energy ===
    /// Default: 0.1 GW
    pub initial_renewable_energy: FloatValue,
    /// Default: 0.15 / yr
    pub renewable_energy_growth_rate: FloatValue,
    /// Capacity at which renewable energy saturates.
    ///
    /// Default: 5.0 GW
    pub maximum_potential: FloatValue,

    // === Marine biotechnology ===
    /// Default: 0.05 billion USD
    pub initial_biotech_value: FloatValue,
    /// Default: 0.12 / yr
    pub biotech_growth_rate: FloatValue,
    /// Extra growth from research reinvestment.
    ///
    /// Default: 0.1
    pub research_investment_rate: FloatValue,
}

impl Default for BlueEconomyParameters {
    fn default() -> Self {
        Self {
            horizon: Horizon::default(),
            // Fisheries
            initial_fisheries_value: 1.0,
            fisheries_growth_rate: 0.05,
            sustainable_harvest_rate: 0.7,
            // Aquaculture
            initial_aquaculture_value: 0.5,
            aquaculture_growth_rate: 0.08,
            sustainable_aquaculture_rate: 0.8,
            // Tourism
            initial_tourism_value: 0.3,
            tourism_growth_rate: 0.1,
            tourism_carrying_capacity: 1.0,
            // Renewable energy
            initial_renewable_energy: 0.1,
            renewable_energy_growth_rate: 0.15,
            maximum_potential: 5.0, // GW
            // Biotechnology
            initial_biotech_value: 0.05,
            biotech_growth_rate: 0.12,
            research_investment_rate: 0.1,
        }
    }
}
