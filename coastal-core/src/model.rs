//! Leaf-model contracts and the generic engine that drives them.
//!
//! A domain supplies its update rules by implementing [`Dynamics`]: a parameter record,
//! a typed state, the seeded initial state and a pure one-year transition.
//! [`LeafModel`] owns the horizon, the trajectory arena and the cursor, and exposes the
//! shared [`SteppableModel`] contract (`step`, `advance_to_end`, `current_state`, `reset`).

use crate::errors::{CoastalError, CoastalResult};
use crate::state::{ModelState, StateVector};
use crate::timeseries::{Horizon, TimeAxis, Year};
use crate::trajectory::{TrajectoryRecord, TrajectorySet};
use crate::variable::VariableDefinition;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Debug;

/// The five leaf-model domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Climate,
    Environment,
    Socioeconomic,
    BlueEconomy,
    Policy,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Climate,
        Domain::Environment,
        Domain::Socioeconomic,
        Domain::BlueEconomy,
        Domain::Policy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Domain::Climate => "climate",
            Domain::Environment => "environment",
            Domain::Socioeconomic => "socioeconomic",
            Domain::BlueEconomy => "blue_economy",
            Domain::Policy => "policy",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Update rules of one domain.
///
/// `advance` must be a pure function of the current state and the parameters: it is
/// evaluated exactly once per step and never reads other models.
pub trait Dynamics: Debug + Clone {
    type Parameters: Debug + Clone + Default + Serialize + DeserializeOwned;
    type State: StateVector + Debug + PartialEq + Serialize + DeserializeOwned;

    const DOMAIN: Domain;

    fn from_parameters(parameters: Self::Parameters) -> Self;

    fn parameters(&self) -> &Self::Parameters;

    fn horizon(&self) -> Horizon;

    /// State at the start year, derived deterministically from the parameters
    fn initial_state(&self) -> Self::State;

    /// State one step after `current`
    fn advance(&self, current: &Self::State) -> Self::State;

    /// Optional sanity checks on the parameters
    fn validate(&self) -> CoastalResult<()> {
        Ok(())
    }
}

/// Position of a model on its time axis.
///
/// The cursor is the most recent year for which every trajectory holds a computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    index: usize,
    year: Year,
}

impl Cursor {
    /// Cursor at the start of an axis
    pub fn start(time_axis: &TimeAxis) -> Self {
        Self {
            index: 0,
            year: time_axis.start_year(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn year(&self) -> Year {
        self.year
    }

    /// The following cursor, or `None` at the end of the axis
    pub fn next(&self, time_axis: &TimeAxis) -> Option<Cursor> {
        let index = self.index + 1;
        time_axis.at(index).map(|year| Cursor { index, year })
    }
}

/// Capability contract shared by every leaf model.
///
/// Object safe so that heterogeneous models can be driven through `&mut dyn SteppableModel`.
pub trait SteppableModel: Debug {
    fn domain(&self) -> Domain;

    fn time_axis(&self) -> &TimeAxis;

    fn cursor(&self) -> Cursor;

    fn current_year(&self) -> Year {
        self.cursor().year()
    }

    /// True while another step fits on the time axis
    fn can_step(&self) -> bool {
        self.cursor().next(self.time_axis()).is_some()
    }

    /// Returns true if the model has no more time steps to process.
    fn finished(&self) -> bool {
        !self.can_step()
    }

    fn definitions(&self) -> Vec<VariableDefinition>;

    /// Every quantity at the current year
    fn current_state(&self) -> ModelState;

    /// Advance exactly one step.
    ///
    /// Fails with [`CoastalError::HorizonExceeded`] at the end of the horizon, in which
    /// case the model is left untouched.
    fn step(&mut self) -> CoastalResult<ModelState>;

    /// Step until the end of the horizon and return every trajectory
    fn advance_to_end(&mut self) -> CoastalResult<TrajectoryRecord> {
        while self.can_step() {
            self.step()?;
        }
        Ok(self.computed_record())
    }

    /// Discard all trajectories and reseed the start year
    fn reset(&mut self);

    fn trajectories(&self) -> &TrajectorySet;

    /// Trajectories from the start year up to and including the current year
    fn computed_record(&self) -> TrajectoryRecord {
        self.trajectories()
            .to_record_truncated(self.cursor().index() + 1)
    }

    /// Error returned when stepping past the end of the horizon
    fn horizon_exceeded(&self) -> CoastalError {
        CoastalError::HorizonExceeded {
            model: self.domain().to_string(),
            current_year: self.current_year(),
            end_year: self.time_axis().end_year(),
        }
    }
}

/// A leaf model: one domain's dynamics plus its trajectories and cursor.
///
/// Entries of the arena beyond the cursor are zero placeholders, not valid data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    bound(serialize = "D: Serialize", deserialize = "D: DeserializeOwned"),
    try_from = "LeafModelData<D>"
)]
pub struct LeafModel<D: Dynamics> {
    dynamics: D,
    time_axis: TimeAxis,
    trajectories: TrajectorySet,
    cursor: Cursor,
    current: D::State,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
struct LeafModelData<D: Dynamics> {
    dynamics: D,
    time_axis: TimeAxis,
    trajectories: TrajectorySet,
    cursor: Cursor,
    current: D::State,
}

impl<D: Dynamics> TryFrom<LeafModelData<D>> for LeafModel<D> {
    type Error = CoastalError;

    fn try_from(data: LeafModelData<D>) -> CoastalResult<Self> {
        let inconsistent =
            |what: &str| CoastalError::Checkpoint(format!("{}: {}", D::DOMAIN, what));

        if data.dynamics.horizon().time_axis()? != data.time_axis
            || *data.trajectories.time_axis() != data.time_axis
        {
            return Err(inconsistent("time axis does not match the horizon"));
        }
        if data.trajectories.definitions() != D::State::definitions().as_slice() {
            return Err(inconsistent("trajectories do not match the state variables"));
        }
        if data.time_axis.at(data.cursor.index()) != Some(data.cursor.year()) {
            return Err(inconsistent("cursor is not on the time axis"));
        }

        Ok(Self {
            dynamics: data.dynamics,
            time_axis: data.time_axis,
            trajectories: data.trajectories,
            cursor: data.cursor,
            current: data.current,
        })
    }
}

impl<D: Dynamics> LeafModel<D> {
    /// Create a model, seeding the start year from the dynamics' initial state.
    ///
    /// Only the horizon is checked; other parameter values are taken as given.
    pub fn new(dynamics: D) -> CoastalResult<Self> {
        let time_axis = dynamics.horizon().time_axis()?;
        let initial = dynamics.initial_state();
        Ok(Self {
            trajectories: TrajectorySet::seeded(time_axis, &initial),
            cursor: Cursor::start(&time_axis),
            current: initial,
            time_axis,
            dynamics,
        })
    }

    pub fn from_parameters(parameters: D::Parameters) -> CoastalResult<Self> {
        Self::new(D::from_parameters(parameters))
    }

    /// Like [`LeafModel::from_parameters`] but also runs [`Dynamics::validate`]
    pub fn validated(parameters: D::Parameters) -> CoastalResult<Self> {
        let dynamics = D::from_parameters(parameters);
        dynamics.validate()?;
        Self::new(dynamics)
    }

    pub fn dynamics(&self) -> &D {
        &self.dynamics
    }

    pub fn parameters(&self) -> &D::Parameters {
        self.dynamics.parameters()
    }

    /// Typed state at the cursor
    pub fn current(&self) -> &D::State {
        &self.current
    }

    /// Typed state at `year`, if that year has been computed
    pub fn state_at(&self, year: Year) -> Option<D::State> {
        let index = self.time_axis.index_of(year)?;
        if index > self.cursor.index() {
            return None;
        }
        self.trajectories.state(index)
    }

    /// Compute the next state and cursor without committing them
    pub fn transition(&self) -> CoastalResult<(D::State, Cursor)> {
        let next_cursor = self
            .cursor
            .next(&self.time_axis)
            .ok_or_else(|| self.horizon_exceeded())?;
        Ok((self.dynamics.advance(&self.current), next_cursor))
    }

    /// Apply a transition returned by [`LeafModel::transition`].
    ///
    /// `cursor` must be the step directly after the current one.
    pub fn commit(&mut self, state: D::State, cursor: Cursor) {
        debug_assert_eq!(Some(cursor), self.cursor.next(&self.time_axis));
        self.trajectories.record(cursor.index(), &state);
        self.current = state;
        self.cursor = cursor;
        debug!("{} advanced to {}", D::DOMAIN, cursor.year());
    }
}

impl<D: Dynamics> SteppableModel for LeafModel<D> {
    fn domain(&self) -> Domain {
        D::DOMAIN
    }

    fn time_axis(&self) -> &TimeAxis {
        &self.time_axis
    }

    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn definitions(&self) -> Vec<VariableDefinition> {
        D::State::definitions()
    }

    fn current_state(&self) -> ModelState {
        ModelState::from_vector(self.cursor.year(), &self.current)
    }

    fn step(&mut self) -> CoastalResult<ModelState> {
        let (state, cursor) = self.transition()?;
        self.commit(state, cursor);
        Ok(self.current_state())
    }

    fn reset(&mut self) {
        let initial = self.dynamics.initial_state();
        self.trajectories = TrajectorySet::seeded(self.time_axis, &initial);
        self.cursor = Cursor::start(&self.time_axis);
        self.current = initial;
        debug!("{} reset to {}", D::DOMAIN, self.cursor.year());
    }

    fn trajectories(&self) -> &TrajectorySet {
        &self.trajectories
    }
}
