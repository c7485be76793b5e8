//! Blue economy sectors
//!
//! Five marine sectors grow independently. Fisheries and aquaculture are damped every year by
//! their sustainability rates, renewable energy saturates at its maximum potential and
//! biotechnology gets a research bonus on top of its growth rate.

use crate::parameters::BlueEconomyParameters;
use coastal_core::errors::CoastalResult;
use coastal_core::model::{Domain, Dynamics};
use coastal_core::rules::{capped_growth, compound, damped_growth};
use coastal_core::timeseries::{FloatValue, Horizon};
use coastal_core::validation::ParameterChecks;
use coastal_core::StateVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, StateVector)]
pub struct BlueEconomyState {
    #[variable(unit = "billion USD")]
    pub fisheries_value: FloatValue,
    #[variable(unit = "billion USD")]
    pub aquaculture_value: FloatValue,
    #[variable(unit = "billion USD")]
    pub tourism_value: FloatValue,
    #[variable(unit = "GW", description = "Installed marine renewable capacity")]
    pub renewable_energy: FloatValue,
    #[variable(unit = "billion USD")]
    pub biotech_value: FloatValue,
    #[variable(
        unit = "billion USD",
        description = "Fisheries, aquaculture, tourism and biotechnology combined"
    )]
    pub total_value: FloatValue,
}

impl BlueEconomyState {
    /// Sum of the monetary sectors.
    ///
    /// Renewable energy is a capacity, not a value, and is left out.
    pub fn sector_total(&self) -> FloatValue {
        self.fisheries_value + self.aquaculture_value + self.tourism_value + self.biotech_value
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueEconomy {
    parameters: BlueEconomyParameters,
}

impl Dynamics for BlueEconomy {
    type Parameters = BlueEconomyParameters;
    type State = BlueEconomyState;
    const DOMAIN: Domain = Domain::BlueEconomy;

    fn from_parameters(parameters: BlueEconomyParameters) -> Self {
        Self { parameters }
    }

    fn parameters(&self) -> &BlueEconomyParameters {
        &self.parameters
    }

    fn horizon(&self) -> Horizon {
        self.parameters.horizon
    }

    fn initial_state(&self) -> BlueEconomyState {
        let p = &self.parameters;
        let mut state = BlueEconomyState {
            fisheries_value: p.initial_fisheries_value,
            aquaculture_value: p.initial_aquaculture_value,
            tourism_value: p.initial_tourism_value,
            renewable_energy: p.initial_renewable_energy,
            biotech_value: p.initial_biotech_value,
            total_value: 0.0,
        };
        state.total_value = state.sector_total();
        state
    }

    fn advance(&self, current: &BlueEconomyState) -> BlueEconomyState {
        let p = &self.parameters;
        let mut next = BlueEconomyState {
            fisheries_value: damped_growth(
                current.fisheries_value,
                p.fisheries_growth_rate,
                p.sustainable_harvest_rate,
            ),
            aquaculture_value: damped_growth(
                current.aquaculture_value,
                p.aquaculture_growth_rate,
                p.sustainable_aquaculture_rate,
            ),
            tourism_value: compound(current.tourism_value, p.tourism_growth_rate),
            renewable_energy: capped_growth(
                current.renewable_energy,
                p.renewable_energy_growth_rate,
                p.maximum_potential,
            ),
            biotech_value: damped_growth(
                current.biotech_value,
                p.biotech_growth_rate,
                1.0 + p.research_investment_rate,
            ),
            total_value: 0.0,
        };
        next.total_value = next.sector_total();
        next
    }

    fn validate(&self) -> CoastalResult<()> {
        let p = &self.parameters;
        let checks = ParameterChecks::new(Self::DOMAIN.name());
        checks.non_negative("initial_fisheries_value", p.initial_fisheries_value)?;
        checks.fraction("fisheries_growth_rate", p.fisheries_growth_rate)?;
        checks.fraction("sustainable_harvest_rate", p.sustainable_harvest_rate)?;
        checks.non_negative("initial_aquaculture_value", p.initial_aquaculture_value)?;
        checks.fraction("aquaculture_growth_rate", p.aquaculture_growth_rate)?;
        checks.fraction(
            "sustainable_aquaculture_rate",
            p.sustainable_aquaculture_rate,
        )?;
        checks.non_negative("initial_tourism_value", p.initial_tourism_value)?;
        checks.fraction("tourism_growth_rate", p.tourism_growth_rate)?;
        checks.non_negative("tourism_carrying_capacity", p.tourism_carrying_capacity)?;
        checks.non_negative("initial_renewable_energy", p.initial_renewable_energy)?;
        checks.fraction(
            "renewable_energy_growth_rate",
            p.renewable_energy_growth_rate,
        )?;
        checks.non_negative("maximum_potential", p.maximum_potential)?;
        checks.non_negative("initial_biotech_value", p.initial_biotech_value)?;
        checks.fraction("biotech_growth_rate", p.biotech_growth_rate)?;
        checks.fraction("research_investment_rate", p.research_investment_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlueEconomyModel;
    use coastal_core::model::SteppableModel;
    use is_close::is_close;

    fn model() -> BlueEconomyModel {
        BlueEconomyModel::from_parameters(BlueEconomyParameters::default()).unwrap()
    }

    #[test]
    fn initial_total_excludes_renewables() {
        let state = *model().current();
        assert!(is_close!(state.total_value, 1.0 + 0.5 + 0.3 + 0.05));
        assert_eq!(state.renewable_energy, 0.1);
    }

    #[test]
    fn single_step() {
        let mut model = model();
        model.step().unwrap();
        let state = *model.current();

        assert!(is_close!(state.fisheries_value, 0.735));
        assert!(is_close!(state.aquaculture_value, 0.5 * 1.08 * 0.8));
        assert!(is_close!(state.tourism_value, 0.33));
        assert!(is_close!(state.renewable_energy, 0.115));
        assert!(is_close!(state.biotech_value, 0.05 * 1.12 * 1.1));
        assert_eq!(
            state.total_value,
            state.fisheries_value
                + state.aquaculture_value
                + state.tourism_value
                + state.biotech_value
        );
    }

    #[test]
    fn renewable_energy_saturates() {
        let mut model = BlueEconomyModel::from_parameters(BlueEconomyParameters {
            initial_renewable_energy: 4.5,
            ..Default::default()
        })
        .unwrap();
        let record = model.advance_to_end().unwrap();
        let renewables = record.get("renewable_energy").unwrap();
        assert!(is_close!(renewables[1], 5.0));
        assert!(renewables.iter().all(|v| *v <= 5.0));
        assert_eq!(renewables[15], 5.0);
    }

    #[test]
    fn zero_sectors_give_zero_total() {
        let model = BlueEconomyModel::from_parameters(BlueEconomyParameters {
            initial_fisheries_value: 0.0,
            initial_aquaculture_value: 0.0,
            initial_tourism_value: 0.0,
            initial_biotech_value: 0.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(model.current().total_value, 0.0);
    }
}
