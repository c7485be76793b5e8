use crate::parameters::EnvironmentalParameters;
use coastal_core::errors::CoastalResult;
use coastal_core::model::{Domain, Dynamics};
use coastal_core::rules::{combined_decay, compound, decay_with_inflow, drift};
use coastal_core::timeseries::{FloatValue, Horizon};
use coastal_core::validation::ParameterChecks;
use coastal_core::StateVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, StateVector)]
pub struct EnvironmentalState {
    #[variable(unit = "%")]
    pub mangrove_coverage: FloatValue,
    #[variable(unit = "%")]
    pub salinity_levels: FloatValue,
    #[variable(unit = "%")]
    pub biodiversity_index: FloatValue,
    #[variable(unit = "%")]
    pub water_quality_index: FloatValue,
    #[variable(
        unit = "t CO2",
        description = "Carbon sequestered by mangroves since the start year"
    )]
    pub carbon_sequestration: FloatValue,
}

/// Coastal ecosystem dynamics
///
/// Carbon sequestration is cumulative and uses the coverage of the year being computed,
/// so it is the only quantity that depends on another quantity's next value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environmental {
    parameters: EnvironmentalParameters,
}

impl Dynamics for Environmental {
    type Parameters = EnvironmentalParameters;
    type State = EnvironmentalState;
    const DOMAIN: Domain = Domain::Environment;

    fn from_parameters(parameters: EnvironmentalParameters) -> Self {
        Self { parameters }
    }

    fn parameters(&self) -> &EnvironmentalParameters {
        &self.parameters
    }

    fn horizon(&self) -> Horizon {
        self.parameters.horizon
    }

    fn initial_state(&self) -> EnvironmentalState {
        EnvironmentalState {
            mangrove_coverage: 100.0,
            salinity_levels: 100.0,
            biodiversity_index: 100.0,
            water_quality_index: 100.0,
            carbon_sequestration: 0.0,
        }
    }

    fn advance(&self, current: &EnvironmentalState) -> EnvironmentalState {
        let p = &self.parameters;
        let mangrove_coverage = decay_with_inflow(
            current.mangrove_coverage,
            p.mangrove_degradation_rate,
            p.mangrove_restoration_rate,
        );
        EnvironmentalState {
            mangrove_coverage,
            salinity_levels: compound(current.salinity_levels, p.salinity_intrusion_rate),
            biodiversity_index: combined_decay(
                current.biodiversity_index,
                &[p.species_loss_rate, p.habitat_fragmentation_rate],
            ),
            water_quality_index: combined_decay(
                current.water_quality_index,
                &[p.water_pollution_increase, p.nutrient_loading_increase],
            ),
            carbon_sequestration: drift(
                current.carbon_sequestration,
                mangrove_coverage * p.mangrove_carbon_sequestration,
            ),
        }
    }

    fn validate(&self) -> CoastalResult<()> {
        let p = &self.parameters;
        let checks = ParameterChecks::new(Self::DOMAIN.name());
        checks.fraction("mangrove_degradation_rate", p.mangrove_degradation_rate)?;
        checks.finite("mangrove_restoration_rate", p.mangrove_restoration_rate)?;
        checks.non_negative(
            "mangrove_carbon_sequestration",
            p.mangrove_carbon_sequestration,
        )?;
        checks.fraction("salinity_intrusion_rate", p.salinity_intrusion_rate)?;
        checks.fraction(
            "groundwater_salinity_increase",
            p.groundwater_salinity_increase,
        )?;
        checks.fraction("species_loss_rate", p.species_loss_rate)?;
        checks.fraction("habitat_fragmentation_rate", p.habitat_fragmentation_rate)?;
        checks.fraction("water_pollution_increase", p.water_pollution_increase)?;
        checks.fraction("nutrient_loading_increase", p.nutrient_loading_increase)
    }
}
