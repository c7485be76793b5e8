use crate::errors::{CoastalError, CoastalResult};
use crate::timeseries::{FloatValue, Year};
use crate::variable::VariableDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fixed-size vector of a leaf model's quantities.
///
/// Implemented via `#[derive(StateVector)]` on a struct of `FloatValue` fields.
/// `to_values` and `from_values` use the order of [`StateVector::definitions`].
pub trait StateVector: Sized + Copy {
    fn definitions() -> Vec<VariableDefinition>;

    fn to_values(&self) -> Vec<FloatValue>;

    fn from_values(values: &[FloatValue]) -> CoastalResult<Self>;
}

/// Snapshot of one model at one year.
///
/// Serializes as a flat mapping `{"year": 2025, "<quantity>": value, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    pub year: Year,
    #[serde(flatten)]
    values: BTreeMap<String, FloatValue>,
}

impl ModelState {
    pub fn new(year: Year) -> Self {
        Self {
            year,
            values: BTreeMap::new(),
        }
    }

    /// Build a snapshot from a typed state
    pub fn from_vector<S: StateVector>(year: Year, state: &S) -> Self {
        let values = S::definitions()
            .into_iter()
            .map(|d| d.name)
            .zip(state.to_values())
            .collect();
        Self { year, values }
    }

    /// Recover a typed state, failing if any of its quantities is absent
    pub fn to_vector<S: StateVector>(&self) -> CoastalResult<S> {
        let values = S::definitions()
            .iter()
            .map(|d| self.require(&d.name))
            .collect::<CoastalResult<Vec<_>>>()?;
        S::from_values(&values)
    }

    pub fn get(&self, name: &str) -> Option<FloatValue> {
        self.values.get(name).copied()
    }

    /// Like [`ModelState::get`] but a missing quantity is an error
    pub fn require(&self, name: &str) -> CoastalResult<FloatValue> {
        self.get(name)
            .ok_or_else(|| CoastalError::MissingVariable(name.to_string()))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FloatValue) {
        self.values.insert(name.into(), value);
    }

    /// Test if the state contains a value with the given name
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FloatValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
