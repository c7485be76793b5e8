use crate::parameters::PolicyParameters;
use coastal_core::errors::CoastalResult;
use coastal_core::model::{Domain, Dynamics};
use coastal_core::rules::{compound, damped_growth};
use coastal_core::timeseries::{FloatValue, Horizon};
use coastal_core::validation::ParameterChecks;
use coastal_core::StateVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, StateVector)]
pub struct PolicyState {
    pub policy_impact: FloatValue,
    pub budget_utilization: FloatValue,
    pub institutional_performance: FloatValue,
    pub monitoring_effectiveness: FloatValue,
    #[variable(description = "Product of the four policy indicators")]
    pub overall_effectiveness: FloatValue,
}

impl PolicyState {
    fn with_overall(mut self) -> Self {
        self.overall_effectiveness = self.policy_impact
            * self.budget_utilization
            * self.institutional_performance
            * self.monitoring_effectiveness;
        self
    }
}

/// Governance and policy interventions
///
/// The indicators are dimensionless and unbounded; with the default parameters policy
/// impact and monitoring effectiveness grow geometrically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    parameters: PolicyParameters,
}

impl Dynamics for Policy {
    type Parameters = PolicyParameters;
    type State = PolicyState;
    const DOMAIN: Domain = Domain::Policy;

    fn from_parameters(parameters: PolicyParameters) -> Self {
        Self { parameters }
    }

    fn parameters(&self) -> &PolicyParameters {
        &self.parameters
    }

    fn horizon(&self) -> Horizon {
        self.parameters.horizon
    }

    fn initial_state(&self) -> PolicyState {
        let p = &self.parameters;
        PolicyState {
            policy_impact: p.policy_effectiveness,
            budget_utilization: p.resource_utilization,
            institutional_performance: p.institutional_capacity,
            monitoring_effectiveness: p.monitoring_coverage
                * p.data_quality
                * p.evaluation_frequency,
            overall_effectiveness: 0.0,
        }
        .with_overall()
    }

    fn advance(&self, current: &PolicyState) -> PolicyState {
        let p = &self.parameters;
        PolicyState {
            policy_impact: compound(current.policy_impact, p.coordination_efficiency),
            budget_utilization: damped_growth(
                current.budget_utilization,
                p.budget_growth_rate,
                p.resource_utilization,
            ),
            institutional_performance: damped_growth(
                current.institutional_performance,
                p.capacity_growth_rate,
                p.stakeholder_engagement,
            ),
            monitoring_effectiveness: compound(
                current.monitoring_effectiveness,
                p.evaluation_frequency,
            ),
            overall_effectiveness: 0.0,
        }
        .with_overall()
    }

    fn validate(&self) -> CoastalResult<()> {
        let p = &self.parameters;
        let checks = ParameterChecks::new(Self::DOMAIN.name());
        checks.fraction("policy_effectiveness", p.policy_effectiveness)?;
        checks.non_negative("implementation_delay", p.implementation_delay as FloatValue)?;
        checks.fraction("coordination_efficiency", p.coordination_efficiency)?;
        checks.non_negative("initial_budget", p.initial_budget)?;
        checks.fraction("budget_growth_rate", p.budget_growth_rate)?;
        checks.fraction("resource_utilization", p.resource_utilization)?;
        checks.fraction("institutional_capacity", p.institutional_capacity)?;
        checks.fraction("capacity_growth_rate", p.capacity_growth_rate)?;
        checks.fraction("stakeholder_engagement", p.stakeholder_engagement)?;
        checks.fraction("monitoring_coverage", p.monitoring_coverage)?;
        checks.fraction("data_quality", p.data_quality)?;
        checks.fraction("evaluation_frequency", p.evaluation_frequency)
    }
}
