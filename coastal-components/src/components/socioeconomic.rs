use crate::parameters::SocioeconomicParameters;
use coastal_core::errors::CoastalResult;
use coastal_core::model::{Domain, Dynamics};
use coastal_core::rules::{compound, net_growth, offset_decay};
use coastal_core::timeseries::{FloatValue, Horizon};
use coastal_core::validation::ParameterChecks;
use coastal_core::StateVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, StateVector)]
pub struct SocioeconomicState {
    #[variable(unit = "million")]
    pub population: FloatValue,
    #[variable(unit = "% of national GDP")]
    pub gdp: FloatValue,
    #[variable(unit = "% of national GDP", description = "Blue economy share of coastal GDP")]
    pub blue_economy: FloatValue,
    #[variable(unit = "%")]
    pub infrastructure_quality: FloatValue,
    #[variable(unit = "%")]
    pub employment_rate: FloatValue,
    #[variable(unit = "%")]
    pub poverty_rate: FloatValue,
}

/// Population, output and livelihoods of the coastal zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Socioeconomic {
    parameters: SocioeconomicParameters,
}

impl Socioeconomic {
    fn blue_economy(&self, gdp: FloatValue) -> FloatValue {
        gdp * self.parameters.blue_economy_share
    }
}

impl Dynamics for Socioeconomic {
    type Parameters = SocioeconomicParameters;
    type State = SocioeconomicState;
    const DOMAIN: Domain = Domain::Socioeconomic;

    fn from_parameters(parameters: SocioeconomicParameters) -> Self {
        Self { parameters }
    }

    fn parameters(&self) -> &SocioeconomicParameters {
        &self.parameters
    }

    fn horizon(&self) -> Horizon {
        self.parameters.horizon
    }

    fn initial_state(&self) -> SocioeconomicState {
        let gdp = self.parameters.initial_gdp;
        SocioeconomicState {
            population: self.parameters.initial_population,
            gdp,
            blue_economy: self.blue_economy(gdp),
            infrastructure_quality: 100.0,
            employment_rate: 100.0,
            poverty_rate: 100.0,
        }
    }

    fn advance(&self, current: &SocioeconomicState) -> SocioeconomicState {
        let p = &self.parameters;
        let gdp = compound(current.gdp, p.gdp_growth_rate);
        SocioeconomicState {
            population: net_growth(
                current.population,
                p.population_growth_rate,
                p.climate_migration_rate,
            ),
            gdp,
            // Derived from this year's GDP, not from last year's value
            blue_economy: self.blue_economy(gdp),
            infrastructure_quality: offset_decay(
                current.infrastructure_quality,
                p.infrastructure_damage_rate,
                p.infrastructure_investment_rate,
            ),
            employment_rate: compound(current.employment_rate, p.employment_growth_rate),
            poverty_rate: compound(current.poverty_rate, -p.poverty_reduction_rate),
        }
    }

    fn validate(&self) -> CoastalResult<()> {
        let p = &self.parameters;
        let checks = ParameterChecks::new(Self::DOMAIN.name());
        checks.non_negative("initial_population", p.initial_population)?;
        checks.fraction("population_growth_rate", p.population_growth_rate)?;
        checks.fraction("climate_migration_rate", p.climate_migration_rate)?;
        checks.non_negative("initial_gdp", p.initial_gdp)?;
        checks.fraction("gdp_growth_rate", p.gdp_growth_rate)?;
        checks.fraction("blue_economy_share", p.blue_economy_share)?;
        checks.fraction("infrastructure_damage_rate", p.infrastructure_damage_rate)?;
        checks.fraction(
            "infrastructure_investment_rate",
            p.infrastructure_investment_rate,
        )?;
        checks.fraction("employment_growth_rate", p.employment_growth_rate)?;
        checks.fraction("poverty_reduction_rate", p.poverty_reduction_rate)
    }
}
