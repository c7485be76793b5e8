use coastal_core::timeseries::{FloatValue, Horizon};
use serde::{Deserialize, Serialize};

/// Parameters for the policy model
///
/// Most values are fractions of an ideal (full impact, full capacity, full coverage).
/// The initial policy indicators are seeded directly from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyParameters {
    #[serde(flatten)]
    pub horizon: Horizon,

    /// Fraction of intended impact achieved in the start year
    pub policy_effectiveness: FloatValue,
    /// Lag before interventions take effect.
    /// Not used by the dynamics.
    /// unit: years
    pub implementation_delay: i32,
    /// Growth of policy impact per year
    pub coordination_efficiency: FloatValue,

    /// Not used by the dynamics.
    /// unit: billion USD
    pub initial_budget: FloatValue,
    /// unit: 1 / yr
    pub budget_growth_rate: FloatValue,
    /// Fraction of allocated resources that is used
    pub resource_utilization: FloatValue,

    /// Fraction of the required institutional capacity in place
    pub institutional_capacity: FloatValue,
    /// unit: 1 / yr
    pub capacity_growth_rate: FloatValue,
    pub stakeholder_engagement: FloatValue,

    /// Fraction of interventions that are monitored
    pub monitoring_coverage: FloatValue,
    pub data_quality: FloatValue,
    /// Fraction of required evaluations carried out
    pub evaluation_frequency: FloatValue,
}

impl Default for PolicyParameters {
    fn default() -> Self {
        Self {
            horizon: Horizon::default(),
            policy_effectiveness: 0.7,
            implementation_delay: 2,
            coordination_efficiency: 0.8,
            initial_budget: 1.0,
            budget_growth_rate: 0.1,
            resource_utilization: 0.85,
            institutional_capacity: 0.7,
            capacity_growth_rate: 0.05,
            stakeholder_engagement: 0.75,
            monitoring_coverage: 0.8,
            data_quality: 0.85,
            evaluation_frequency: 0.9,
        }
    }
}
