//! Lockstep integration of the five leaf models
//!
//! An [`IntegratedSimulation`] owns one instance of each leaf model, advances them together
//! one year at a time and records the composite indices computed from their post-step state.

use crate::indices::{CompositeIndices, IndexValues, LeafStates};
use coastal_components::parameters::{
    BlueEconomyParameters, ClimateParameters, EnvironmentalParameters, PolicyParameters,
    SocioeconomicParameters,
};
use coastal_components::{
    BlueEconomyModel, ClimateModel, EnvironmentalModel, PolicyModel, SocioeconomicModel,
};
use coastal_core::errors::{CoastalError, CoastalResult};
use coastal_core::model::{Domain, SteppableModel};
use coastal_core::state::ModelState;
use coastal_core::timeseries::{FloatValue, Horizon, TimeAxis, Year};
use coastal_core::trajectory::{TrajectoryRecord, TrajectorySet};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Combined state of the simulation at one year.
///
/// Serializes as `{year, resilience_index, ..., climate_state: {...}, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationState {
    pub year: Year,
    #[serde(flatten)]
    pub indices: IndexValues,
    pub climate_state: ModelState,
    pub environment_state: ModelState,
    pub socioeconomic_state: ModelState,
    pub blue_economy_state: ModelState,
    pub policy_state: ModelState,
}

/// Record returned by [`IntegratedSimulation::step`]: the state the step reached
pub type StepRecord = SimulationState;

impl SimulationState {
    pub fn leaf(&self, domain: Domain) -> &ModelState {
        match domain {
            Domain::Climate => &self.climate_state,
            Domain::Environment => &self.environment_state,
            Domain::Socioeconomic => &self.socioeconomic_state,
            Domain::BlueEconomy => &self.blue_economy_state,
            Domain::Policy => &self.policy_state,
        }
    }

    /// Flat mapping of the year, every leaf quantity and the three index values
    pub fn flatten(&self) -> ModelState {
        let mut flat = ModelState::new(self.year);
        for domain in Domain::ALL {
            for (name, value) in self.leaf(domain).iter() {
                flat.insert(name, value);
            }
        }
        flat.insert(crate::indices::RESILIENCE_INDEX, self.indices.resilience_index);
        flat.insert(
            crate::indices::SUSTAINABILITY_INDEX,
            self.indices.sustainability_index,
        );
        flat.insert(crate::indices::DEVELOPMENT_INDEX, self.indices.development_index);
        flat
    }
}

/// Full trajectories of an integrated run.
///
/// Serializes as `{years, resilience_index, sustainability_index, development_index,
/// climate_data: {...}, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRecord {
    #[serde(flatten)]
    pub indices: TrajectoryRecord,
    pub climate_data: TrajectoryRecord,
    pub environment_data: TrajectoryRecord,
    pub socioeconomic_data: TrajectoryRecord,
    pub blue_economy_data: TrajectoryRecord,
    pub policy_data: TrajectoryRecord,
}

impl SimulationRecord {
    pub fn years(&self) -> &[Year] {
        self.indices.years()
    }

    /// Trajectory of a composite index
    pub fn index(&self, name: &str) -> Option<&[FloatValue]> {
        self.indices.get(name)
    }

    pub fn leaf(&self, domain: Domain) -> &TrajectoryRecord {
        match domain {
            Domain::Climate => &self.climate_data,
            Domain::Environment => &self.environment_data,
            Domain::Socioeconomic => &self.socioeconomic_data,
            Domain::BlueEconomy => &self.blue_economy_data,
            Domain::Policy => &self.policy_data,
        }
    }
}

/// Five leaf models advanced in lockstep, plus the composite index trajectories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SimulationCheckpoint")]
pub struct IntegratedSimulation {
    climate: ClimateModel,
    environment: EnvironmentalModel,
    socioeconomic: SocioeconomicModel,
    blue_economy: BlueEconomyModel,
    policy: PolicyModel,
    indices: CompositeIndices,
    index_trajectories: TrajectorySet,
    current_indices: IndexValues,
}

#[derive(Deserialize)]
struct SimulationCheckpoint {
    climate: ClimateModel,
    environment: EnvironmentalModel,
    socioeconomic: SocioeconomicModel,
    blue_economy: BlueEconomyModel,
    policy: PolicyModel,
    indices: CompositeIndices,
    index_trajectories: TrajectorySet,
    current_indices: IndexValues,
}

impl TryFrom<SimulationCheckpoint> for IntegratedSimulation {
    type Error = CoastalError;

    fn try_from(checkpoint: SimulationCheckpoint) -> CoastalResult<Self> {
        let simulation = Self {
            climate: checkpoint.climate,
            environment: checkpoint.environment,
            socioeconomic: checkpoint.socioeconomic,
            blue_economy: checkpoint.blue_economy,
            policy: checkpoint.policy,
            indices: checkpoint.indices,
            index_trajectories: checkpoint.index_trajectories,
            current_indices: checkpoint.current_indices,
        };
        simulation.check_consistency()?;
        Ok(simulation)
    }
}

impl IntegratedSimulation {
    pub fn builder() -> IntegratedSimulationBuilder {
        IntegratedSimulationBuilder::default()
    }

    /// Simulation with every model at its default parameters
    pub fn with_defaults() -> CoastalResult<Self> {
        Self::builder().build()
    }

    fn from_models(
        climate: ClimateModel,
        environment: EnvironmentalModel,
        socioeconomic: SocioeconomicModel,
        blue_economy: BlueEconomyModel,
        policy: PolicyModel,
        indices: CompositeIndices,
    ) -> CoastalResult<Self> {
        indices.check_variables()?;

        let mut simulation = Self {
            index_trajectories: TrajectorySet::zeros(*climate.time_axis(), Vec::new()),
            current_indices: IndexValues {
                resilience_index: 0.0,
                sustainability_index: 0.0,
                development_index: 0.0,
            },
            climate,
            environment,
            socioeconomic,
            blue_economy,
            policy,
            indices,
        };
        simulation.seed_indices()?;
        Ok(simulation)
    }

    /// Recompute the indices at the start year from the leaf models' current state
    fn seed_indices(&mut self) -> CoastalResult<()> {
        let initial = self.indices.evaluate(&self.leaf_states())?;
        self.index_trajectories = TrajectorySet::seeded(*self.time_axis(), &initial);
        self.current_indices = initial;
        Ok(())
    }

    /// Leaf models must be at the same step and the index trajectories on the climate axis
    fn check_consistency(&self) -> CoastalResult<()> {
        self.indices.check_variables()?;

        let step = self.climate.cursor().index();
        for model in self.models() {
            if model.cursor().index() != step {
                return Err(CoastalError::Checkpoint(format!(
                    "{} is at step {} but climate is at step {}",
                    model.domain(),
                    model.cursor().index(),
                    step
                )));
            }
        }
        if self.index_trajectories.time_axis() != self.time_axis()
            || self.index_trajectories.definitions()
                != IndexValues::generated_definitions().as_slice()
        {
            return Err(CoastalError::Checkpoint(
                "index trajectories do not match the climate time axis".to_string(),
            ));
        }
        Ok(())
    }

    /// Time axis shared by the index trajectories, taken from the climate model
    pub fn time_axis(&self) -> &TimeAxis {
        self.climate.time_axis()
    }

    pub fn current_year(&self) -> Year {
        self.climate.current_year()
    }

    /// Read-only views of the leaf models, in the order they are stepped
    pub fn models(&self) -> [&dyn SteppableModel; 5] {
        [
            &self.climate,
            &self.environment,
            &self.socioeconomic,
            &self.blue_economy,
            &self.policy,
        ]
    }

    fn models_mut(&mut self) -> [&mut dyn SteppableModel; 5] {
        [
            &mut self.climate,
            &mut self.environment,
            &mut self.socioeconomic,
            &mut self.blue_economy,
            &mut self.policy,
        ]
    }

    pub fn climate(&self) -> &ClimateModel {
        &self.climate
    }

    pub fn environment(&self) -> &EnvironmentalModel {
        &self.environment
    }

    pub fn socioeconomic(&self) -> &SocioeconomicModel {
        &self.socioeconomic
    }

    pub fn blue_economy(&self) -> &BlueEconomyModel {
        &self.blue_economy
    }

    pub fn policy(&self) -> &PolicyModel {
        &self.policy
    }

    pub fn indices(&self) -> &CompositeIndices {
        &self.indices
    }

    pub fn current_indices(&self) -> IndexValues {
        self.current_indices
    }

    pub fn index_trajectories(&self) -> &TrajectorySet {
        &self.index_trajectories
    }

    /// Typed state of every leaf model at its cursor
    pub fn leaf_states(&self) -> LeafStates {
        LeafStates {
            climate: *self.climate.current(),
            environment: *self.environment.current(),
            socioeconomic: *self.socioeconomic.current(),
            blue_economy: *self.blue_economy.current(),
            policy: *self.policy.current(),
        }
    }

    /// True while every leaf model can take another step
    pub fn can_step(&self) -> bool {
        self.models().iter().all(|model| model.can_step())
    }

    pub fn finished(&self) -> bool {
        !self.can_step()
    }

    /// Advance every leaf model by one step and compute the indices at the new year.
    ///
    /// If any model has reached the end of its horizon nothing is modified and the
    /// [`CoastalError::HorizonExceeded`] of the first such model (climate, environment,
    /// socioeconomic, blue economy, policy) is returned.
    pub fn step(&mut self) -> CoastalResult<StepRecord> {
        // Compute everything before committing so a failure leaves no partial update
        let climate = self.climate.transition()?;
        let environment = self.environment.transition()?;
        let socioeconomic = self.socioeconomic.transition()?;
        let blue_economy = self.blue_economy.transition()?;
        let policy = self.policy.transition()?;
        let next = LeafStates {
            climate: climate.0,
            environment: environment.0,
            socioeconomic: socioeconomic.0,
            blue_economy: blue_economy.0,
            policy: policy.0,
        };
        let values = self.indices.evaluate(&next)?;

        self.climate.commit(climate.0, climate.1);
        self.environment.commit(environment.0, environment.1);
        self.socioeconomic.commit(socioeconomic.0, socioeconomic.1);
        self.blue_economy.commit(blue_economy.0, blue_economy.1);
        self.policy.commit(policy.0, policy.1);

        let index = self.climate.cursor().index();
        self.index_trajectories.record(index, &values);
        self.current_indices = values;

        Ok(self.current_state())
    }

    /// Step until the shared end year is reached and return every trajectory
    pub fn advance_to_end(&mut self) -> CoastalResult<SimulationRecord> {
        while self.can_step() {
            self.step()?;
        }
        info!(
            "Integrated simulation reached {} ({})",
            self.current_year(),
            self.time_axis()
        );
        Ok(self.record())
    }

    /// Trajectories from the start year up to and including the current year.
    ///
    /// The leaf models are stepped together, so every record holds the same number of years
    /// even when their horizons differ.
    pub fn record(&self) -> SimulationRecord {
        let computed = self.climate.cursor().index() + 1;
        SimulationRecord {
            indices: self.index_trajectories.to_record_truncated(computed),
            climate_data: self.climate.computed_record(),
            environment_data: self.environment.computed_record(),
            socioeconomic_data: self.socioeconomic.computed_record(),
            blue_economy_data: self.blue_economy.computed_record(),
            policy_data: self.policy.computed_record(),
        }
    }

    pub fn current_state(&self) -> SimulationState {
        SimulationState {
            year: self.current_year(),
            indices: self.current_indices,
            climate_state: self.climate.current_state(),
            environment_state: self.environment.current_state(),
            socioeconomic_state: self.socioeconomic.current_state(),
            blue_economy_state: self.blue_economy.current_state(),
            policy_state: self.policy.current_state(),
        }
    }

    /// Reset every leaf model and recompute the indices at the start year.
    ///
    /// Only fails if the indices refer to an unknown quantity, which construction rejects.
    pub fn reset(&mut self) -> CoastalResult<()> {
        for model in self.models_mut() {
            model.reset();
        }
        self.seed_indices()?;
        debug!("Integrated simulation reset to {}", self.current_year());
        Ok(())
    }
}

/// Assembles an [`IntegratedSimulation`] from per-model parameters
#[derive(Debug, Clone, Default)]
pub struct IntegratedSimulationBuilder {
    climate: ClimateParameters,
    environment: EnvironmentalParameters,
    socioeconomic: SocioeconomicParameters,
    blue_economy: BlueEconomyParameters,
    policy: PolicyParameters,
    indices: CompositeIndices,
    validate: bool,
}

impl IntegratedSimulationBuilder {
    pub fn climate(mut self, parameters: ClimateParameters) -> Self {
        self.climate = parameters;
        self
    }

    pub fn environment(mut self, parameters: EnvironmentalParameters) -> Self {
        self.environment = parameters;
        self
    }

    pub fn socioeconomic(mut self, parameters: SocioeconomicParameters) -> Self {
        self.socioeconomic = parameters;
        self
    }

    pub fn blue_economy(mut self, parameters: BlueEconomyParameters) -> Self {
        self.blue_economy = parameters;
        self
    }

    pub fn policy(mut self, parameters: PolicyParameters) -> Self {
        self.policy = parameters;
        self
    }

    /// Use the same horizon for all five models
    pub fn horizon(mut self, horizon: Horizon) -> Self {
        self.climate.horizon = horizon;
        self.environment.horizon = horizon;
        self.socioeconomic.horizon = horizon;
        self.blue_economy.horizon = horizon;
        self.policy.horizon = horizon;
        self
    }

    pub fn with_indices(mut self, indices: CompositeIndices) -> Self {
        self.indices = indices;
        self
    }

    /// Validate parameters and require every model to share the climate model's horizon
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    fn check_horizons(&self) -> CoastalResult<()> {
        let expected = self.climate.horizon;
        let horizons = [
            (Domain::Environment, self.environment.horizon),
            (Domain::Socioeconomic, self.socioeconomic.horizon),
            (Domain::BlueEconomy, self.blue_economy.horizon),
            (Domain::Policy, self.policy.horizon),
        ];
        for (domain, found) in horizons {
            if found != expected {
                return Err(CoastalError::HorizonMismatch {
                    model: domain.to_string(),
                    expected: describe(&expected),
                    found: describe(&found),
                });
            }
        }
        Ok(())
    }

    pub fn build(self) -> CoastalResult<IntegratedSimulation> {
        if self.validate {
            self.check_horizons()?;
            IntegratedSimulation::from_models(
                ClimateModel::validated(self.climate)?,
                EnvironmentalModel::validated(self.environment)?,
                SocioeconomicModel::validated(self.socioeconomic)?,
                BlueEconomyModel::validated(self.blue_economy)?,
                PolicyModel::validated(self.policy)?,
                self.indices,
            )
        } else {
            IntegratedSimulation::from_models(
                ClimateModel::from_parameters(self.climate)?,
                EnvironmentalModel::from_parameters(self.environment)?,
                SocioeconomicModel::from_parameters(self.socioeconomic)?,
                BlueEconomyModel::from_parameters(self.blue_economy)?,
                PolicyModel::from_parameters(self.policy)?,
                self.indices,
            )
        }
    }
}

fn describe(horizon: &Horizon) -> String {
    format!(
        "{}..={} every {}",
        horizon.start_year, horizon.end_year, horizon.time_step
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    fn simulation() -> IntegratedSimulation {
        IntegratedSimulation::with_defaults().unwrap()
    }

    #[test]
    fn initial_indices() {
        let simulation = simulation();
        let values = simulation.current_indices();

        let overall = 0.7 * 0.85 * 0.7 * (0.8 * 0.85 * 0.9);
        assert!(is_close!(
            values.resilience_index,
            0.3 * 0.0 + 0.3 * 100.0 + 0.2 * 100.0 + 0.2 * overall
        ));
        assert!(is_close!(
            values.sustainability_index,
            0.25 * 100.0 + 0.25 * 100.0 + 0.25 + 0.25 * (0.8 * 0.85 * 0.9)
        ));
        assert!(is_close!(
            values.development_index,
            0.3 * 3.0 + 0.3 + 0.2 * 100.0 + 0.2 * 0.0
        ));
        assert_eq!(simulation.index_trajectories().row(0).unwrap()[0], values.resilience_index);
    }

    #[test]
    fn step_uses_post_step_state() {
        let mut simulation = simulation();
        let record = simulation.step().unwrap();

        assert_eq!(record.year, 2025);
        assert_eq!(record.climate_state.year, 2025);
        assert_eq!(record.policy_state.year, 2025);
        assert_eq!(
            record.indices,
            simulation
                .indices()
                .evaluate(&simulation.leaf_states())
                .unwrap()
        );
        assert!(is_close!(
            record.indices.development_index,
            0.3 * 3.18 + 0.3 + 0.2 * 104.0 + 0.2 * 3.0
        ));
    }

    #[test]
    fn failed_step_changes_nothing() {
        let mut simulation = IntegratedSimulation::builder()
            .horizon(Horizon::new(2024, 2026, 1))
            .policy(PolicyParameters {
                horizon: Horizon::new(2024, 2025, 1),
                ..Default::default()
            })
            .build()
            .unwrap();

        simulation.step().unwrap();
        let before = simulation.current_state();
        let err = simulation.step().unwrap_err();

        assert!(matches!(
            err,
            CoastalError::HorizonExceeded { ref model, .. } if model == "policy"
        ));
        assert_eq!(simulation.current_state(), before);
        assert_eq!(simulation.climate().current_year(), 2025);
    }

    #[test]
    fn nan_parameters_propagate_silently() {
        let mut simulation = IntegratedSimulation::builder()
            .climate(ClimateParameters {
                rainfall_change_rate: FloatValue::NAN,
                ..Default::default()
            })
            .build()
            .unwrap();

        let record = simulation.step().unwrap();
        assert!(record.climate_state.get("rainfall").unwrap().is_nan());
        assert_eq!(record.climate_state.get("sea_level"), Some(0.5));

        let full = simulation.advance_to_end().unwrap();
        let rainfall = full.climate_data.get("rainfall").unwrap();
        assert_eq!(rainfall[0], 100.0);
        assert!(rainfall[1..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn first_exhausted_model_is_reported() {
        let mut simulation = IntegratedSimulation::builder()
            .horizon(Horizon::new(2024, 2024, 1))
            .build()
            .unwrap();
        let err = simulation.step().unwrap_err();
        assert!(matches!(
            err,
            CoastalError::HorizonExceeded { ref model, .. } if model == "climate"
        ));
    }

    #[test]
    fn flattened_step_record() {
        let mut simulation = simulation();
        let flat = simulation.step().unwrap().flatten();
        assert_eq!(flat.year, 2025);
        assert_eq!(flat.get("sea_level"), Some(0.5));
        assert!(flat.has("total_value"));
        assert!(flat.has("overall_effectiveness"));
        assert!(flat.has("resilience_index"));
        // 5 + 5 + 6 + 6 + 5 leaf quantities and 3 indices
        assert_eq!(flat.len(), 30);
    }

    #[test]
    fn reset_restores_construction() {
        let fresh = simulation();
        let mut simulation = simulation();
        simulation.advance_to_end().unwrap();
        simulation.reset().unwrap();

        assert_eq!(simulation.current_state(), fresh.current_state());
        assert_eq!(simulation.index_trajectories(), fresh.index_trajectories());
        assert_eq!(simulation.record(), fresh.record());
    }

    #[test]
    fn validation_rejects_mismatched_horizons() {
        let builder = IntegratedSimulation::builder().environment(EnvironmentalParameters {
            horizon: Horizon::new(2024, 2050, 1),
            ..Default::default()
        });
        assert!(builder.clone().build().is_ok());
        assert!(matches!(
            builder.with_validation(true).build(),
            Err(CoastalError::HorizonMismatch { ref model, .. }) if model == "environment"
        ));
    }

    #[test]
    fn records_cover_the_computed_span() {
        let mut simulation = simulation();
        simulation.step().unwrap();
        simulation.step().unwrap();

        let record = simulation.record();
        assert_eq!(record.years(), &[2024, 2025, 2026]);
        for domain in Domain::ALL {
            let data = record.leaf(domain);
            assert_eq!(data.years(), record.years());
            assert!(data.iter().all(|(_, values)| values.len() == 3));
        }
    }

    #[test]
    fn unvalidated_horizons_share_the_computed_span() {
        let shorter = IntegratedSimulation::builder().environment(EnvironmentalParameters {
            horizon: Horizon::new(2024, 2030, 1),
            ..Default::default()
        });
        let record = shorter.build().unwrap().advance_to_end().unwrap();
        assert_eq!(record.years().len(), 7);
        assert_eq!(record.environment_data.len(), 7);
        assert_eq!(record.climate_data.len(), 7);

        let longer = IntegratedSimulation::builder().environment(EnvironmentalParameters {
            horizon: Horizon::new(2024, 2050, 1),
            ..Default::default()
        });
        let record = longer.build().unwrap().advance_to_end().unwrap();
        assert_eq!(record.years().len(), 16);
        assert_eq!(record.environment_data.years(), record.years());
        assert_eq!(
            record.environment_data.get("mangrove_coverage").unwrap().len(),
            16
        );
    }

    #[test]
    fn validation_rejects_bad_parameters() {
        let result = IntegratedSimulation::builder()
            .blue_economy(BlueEconomyParameters {
                maximum_potential: -1.0,
                ..Default::default()
            })
            .with_validation(true)
            .build();
        assert!(matches!(
            result,
            Err(CoastalError::InvalidParameter { ref parameter, .. }) if parameter == "maximum_potential"
        ));
    }

    #[test]
    fn models_are_listed_in_step_order() {
        let simulation = simulation();
        let domains: Vec<_> = simulation.models().iter().map(|m| m.domain()).collect();
        assert_eq!(domains, Domain::ALL.to_vec());
    }
}
