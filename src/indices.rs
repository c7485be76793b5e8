//! Composite indices derived from the five leaf models
//!
//! An index is a fixed-weight linear combination of quantities drawn from one year of leaf
//! state. Indices are described as data ([`CompositeIndex`]) so the evaluation is a pure
//! function of a [`LeafStates`] snapshot and nothing else.

use coastal_components::components::{
    BlueEconomyState, ClimateState, EnvironmentalState, PolicyState, SocioeconomicState,
};
use coastal_core::errors::{CoastalError, CoastalResult};
use coastal_core::model::Domain;
use coastal_core::state::StateVector;
use coastal_core::timeseries::FloatValue;
use coastal_core::variable::VariableDefinition;
use serde::{Deserialize, Serialize};

pub const RESILIENCE_INDEX: &str = "resilience_index";
pub const SUSTAINABILITY_INDEX: &str = "sustainability_index";
pub const DEVELOPMENT_INDEX: &str = "development_index";

/// Values of the three composite indices at one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, coastal_core::StateVector)]
pub struct IndexValues {
    #[variable(description = "Hazard exposure, mangroves, infrastructure and governance")]
    pub resilience_index: FloatValue,
    #[variable(description = "Ecosystem condition, blue economy and monitoring")]
    pub sustainability_index: FloatValue,
    #[variable(description = "Output, blue economy, employment and poverty")]
    pub development_index: FloatValue,
}

/// Typed state of every leaf model at the same year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeafStates {
    pub climate: ClimateState,
    pub environment: EnvironmentalState,
    pub socioeconomic: SocioeconomicState,
    pub blue_economy: BlueEconomyState,
    pub policy: PolicyState,
}

fn lookup<S: StateVector>(state: &S, name: &str) -> Option<FloatValue> {
    let index = S::definitions().iter().position(|d| d.name == name)?;
    state.to_values().get(index).copied()
}

impl LeafStates {
    /// Value of a named quantity of one domain
    pub fn value(&self, domain: Domain, name: &str) -> Option<FloatValue> {
        match domain {
            Domain::Climate => lookup(&self.climate, name),
            Domain::Environment => lookup(&self.environment, name),
            Domain::Socioeconomic => lookup(&self.socioeconomic, name),
            Domain::BlueEconomy => lookup(&self.blue_economy, name),
            Domain::Policy => lookup(&self.policy, name),
        }
    }

    /// Quantities tracked by a domain
    pub fn definitions(domain: Domain) -> Vec<VariableDefinition> {
        match domain {
            Domain::Climate => ClimateState::definitions(),
            Domain::Environment => EnvironmentalState::definitions(),
            Domain::Socioeconomic => SocioeconomicState::definitions(),
            Domain::BlueEconomy => BlueEconomyState::definitions(),
            Domain::Policy => PolicyState::definitions(),
        }
    }
}

/// How a quantity is transformed before it is weighted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermTransform {
    /// The value itself
    Identity,
    /// `c - value`, for quantities where lower is better
    Complement(FloatValue),
    /// `value / value`.
    ///
    /// This is 1 for any finite non-zero value and NaN at zero. The standard indices use it
    /// for the blue economy value, which therefore contributes a constant.
    SelfRatio,
}

impl TermTransform {
    pub fn apply(&self, value: FloatValue) -> FloatValue {
        match self {
            TermTransform::Identity => value,
            TermTransform::Complement(reference) => reference - value,
            TermTransform::SelfRatio => value / value,
        }
    }
}

/// One weighted quantity of a composite index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexTerm {
    pub domain: Domain,
    pub variable: String,
    pub weight: FloatValue,
    pub transform: TermTransform,
}

impl IndexTerm {
    pub fn new(domain: Domain, variable: impl Into<String>, weight: FloatValue) -> Self {
        Self {
            domain,
            variable: variable.into(),
            weight,
            transform: TermTransform::Identity,
        }
    }

    pub fn complement(mut self, reference: FloatValue) -> Self {
        self.transform = TermTransform::Complement(reference);
        self
    }

    pub fn self_ratio(mut self) -> Self {
        self.transform = TermTransform::SelfRatio;
        self
    }

    fn missing(&self) -> CoastalError {
        CoastalError::MissingVariable(format!("{}.{}", self.domain, self.variable))
    }

    pub fn evaluate(&self, states: &LeafStates) -> CoastalResult<FloatValue> {
        let value = states
            .value(self.domain, &self.variable)
            .ok_or_else(|| self.missing())?;
        Ok(self.weight * self.transform.apply(value))
    }
}

/// A named linear combination of leaf quantities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeIndex {
    pub name: String,
    pub terms: Vec<IndexTerm>,
}

impl CompositeIndex {
    pub fn new(name: impl Into<String>, terms: Vec<IndexTerm>) -> Self {
        Self {
            name: name.into(),
            terms,
        }
    }

    /// Sum of the weighted terms, in declaration order
    pub fn evaluate(&self, states: &LeafStates) -> CoastalResult<FloatValue> {
        self.terms
            .iter()
            .try_fold(0.0, |acc, term| Ok(acc + term.evaluate(states)?))
    }

    /// Total weight of the terms
    pub fn total_weight(&self) -> FloatValue {
        self.terms.iter().map(|t| t.weight).sum()
    }
}

/// The three indices computed by an integrated simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeIndices {
    pub resilience: CompositeIndex,
    pub sustainability: CompositeIndex,
    pub development: CompositeIndex,
}

impl Default for CompositeIndices {
    fn default() -> Self {
        Self::standard()
    }
}

impl CompositeIndices {
    /// The standard resilience, sustainability and development indices
    pub fn standard() -> Self {
        use Domain::*;

        Self {
            resilience: CompositeIndex::new(
                RESILIENCE_INDEX,
                vec![
                    IndexTerm::new(Climate, "storm_surge_intensity", 0.3).complement(100.0),
                    IndexTerm::new(Environment, "mangrove_coverage", 0.3),
                    IndexTerm::new(Socioeconomic, "infrastructure_quality", 0.2),
                    IndexTerm::new(Policy, "overall_effectiveness", 0.2),
                ],
            ),
            sustainability: CompositeIndex::new(
                SUSTAINABILITY_INDEX,
                vec![
                    IndexTerm::new(Environment, "biodiversity_index", 0.25),
                    IndexTerm::new(Environment, "water_quality_index", 0.25),
                    // TODO: normalise against a start-year reference value once one is agreed
                    IndexTerm::new(BlueEconomy, "total_value", 0.25).self_ratio(),
                    IndexTerm::new(Policy, "monitoring_effectiveness", 0.25),
                ],
            ),
            development: CompositeIndex::new(
                DEVELOPMENT_INDEX,
                vec![
                    IndexTerm::new(Socioeconomic, "gdp", 0.3),
                    IndexTerm::new(BlueEconomy, "total_value", 0.3).self_ratio(),
                    IndexTerm::new(Socioeconomic, "employment_rate", 0.2),
                    IndexTerm::new(Socioeconomic, "poverty_rate", 0.2).complement(100.0),
                ],
            ),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompositeIndex> {
        [&self.resilience, &self.sustainability, &self.development].into_iter()
    }

    /// Evaluate all three indices for one year of leaf state
    pub fn evaluate(&self, states: &LeafStates) -> CoastalResult<IndexValues> {
        Ok(IndexValues {
            resilience_index: self.resilience.evaluate(states)?,
            sustainability_index: self.sustainability.evaluate(states)?,
            development_index: self.development.evaluate(states)?,
        })
    }

    /// Check that every term refers to a quantity its domain tracks
    pub fn check_variables(&self) -> CoastalResult<()> {
        for term in self.iter().flat_map(|index| index.terms.iter()) {
            let definitions = LeafStates::definitions(term.domain);
            if !definitions.iter().any(|d| d.name == term.variable) {
                return Err(term.missing());
            }
        }
        Ok(())
    }
}
