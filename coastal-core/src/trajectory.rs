use crate::errors::{CoastalError, CoastalResult};
use crate::state::StateVector;
use crate::timeseries::{FloatValue, TimeAxis, Year};
use crate::variable::VariableDefinition;
use ndarray::{Array2, ArrayView1, Axis};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Pre-sized storage for every trajectory of one model.
///
/// Values are held in a `(years, variables)` array indexed by year offset on the
/// [`TimeAxis`] and by the declaration order of the variable definitions.
/// The horizon is fixed at construction so the arena never grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrajectoryData")]
pub struct TrajectorySet {
    time_axis: TimeAxis,
    definitions: Vec<VariableDefinition>,
    values: Array2<FloatValue>,
}

#[derive(Deserialize)]
struct TrajectoryData {
    time_axis: TimeAxis,
    definitions: Vec<VariableDefinition>,
    values: Array2<FloatValue>,
}

impl TryFrom<TrajectoryData> for TrajectorySet {
    type Error = CoastalError;

    fn try_from(data: TrajectoryData) -> CoastalResult<Self> {
        let expected = (data.time_axis.len(), data.definitions.len());
        if data.values.dim() != expected {
            return Err(CoastalError::Checkpoint(format!(
                "trajectories have shape {:?}, expected {:?} for {}",
                data.values.dim(),
                expected,
                data.time_axis
            )));
        }
        Ok(Self {
            time_axis: data.time_axis,
            definitions: data.definitions,
            values: data.values,
        })
    }
}

impl TrajectorySet {
    /// Create a zero-filled arena
    pub fn zeros(time_axis: TimeAxis, definitions: Vec<VariableDefinition>) -> Self {
        let values = Array2::zeros((time_axis.len(), definitions.len()));
        Self {
            time_axis,
            definitions,
            values,
        }
    }

    /// Create an arena for a typed state with `initial` stored at index 0
    pub fn seeded<S: StateVector>(time_axis: TimeAxis, initial: &S) -> Self {
        let mut set = Self::zeros(time_axis, S::definitions());
        set.record(0, initial);
        set
    }

    /// Store a typed state at a year offset.
    ///
    /// The arena must have been created for `S`.
    ///
    /// # Panics
    /// Panics if `index` is outside the time axis.
    pub fn record<S: StateVector>(&mut self, index: usize, state: &S) {
        let values = state.to_values();
        debug_assert_eq!(values.len(), self.definitions.len());
        let mut row = self.values.row_mut(index);
        row.iter_mut().zip(values).for_each(|(dst, src)| *dst = src);
    }

    /// Read back a typed state stored at a year offset
    pub fn state<S: StateVector>(&self, index: usize) -> Option<S> {
        self.row(index).and_then(|row| S::from_values(&row).ok())
    }

    pub fn time_axis(&self) -> &TimeAxis {
        &self.time_axis
    }

    pub fn definitions(&self) -> &[VariableDefinition] {
        &self.definitions
    }

    /// Write the values of all variables at a year offset
    ///
    /// # Panics
    /// Panics if `index` is outside the time axis.
    pub fn set_row(&mut self, index: usize, values: &[FloatValue]) -> CoastalResult<()> {
        if values.len() != self.definitions.len() {
            return Err(CoastalError::StateLength {
                expected: self.definitions.len(),
                found: values.len(),
            });
        }
        let mut row = self.values.row_mut(index);
        row.iter_mut().zip(values).for_each(|(dst, src)| *dst = *src);
        Ok(())
    }

    /// Values of all variables at a year offset
    pub fn row(&self, index: usize) -> Option<Vec<FloatValue>> {
        if index < self.values.nrows() {
            Some(self.values.row(index).to_vec())
        } else {
            None
        }
    }

    fn variable_index(&self, name: &str) -> Option<usize> {
        self.definitions.iter().position(|d| d.name == name)
    }

    /// A single value of one variable
    pub fn value(&self, name: &str, index: usize) -> Option<FloatValue> {
        let column = self.variable_index(name)?;
        self.values.get((index, column)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VariableDefinition, ArrayView1<'_, FloatValue>)> {
        self.definitions
            .iter()
            .zip(self.values.axis_iter(Axis(1)))
    }

    /// Copy the first `len` years of the arena into the hand-off record
    pub fn to_record_truncated(&self, len: usize) -> TrajectoryRecord {
        let len = len.min(self.values.nrows());
        TrajectoryRecord {
            years: self.time_axis.years().into_iter().take(len).collect(),
            series: self
                .iter()
                .map(|(d, v)| (d.name.clone(), v.iter().take(len).copied().collect()))
                .collect(),
        }
    }
}

/// Full-trajectory record of one model.
///
/// Serializes as `{"years": [...], "<quantity>": [...], ...}` with quantities in
/// declaration order. Every sequence has the same length as `years`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryRecord {
    years: Vec<Year>,
    series: Vec<(String, Vec<FloatValue>)>,
}

impl TrajectoryRecord {
    pub fn new(years: Vec<Year>) -> Self {
        Self {
            years,
            series: Vec::new(),
        }
    }

    /// Append a series, which must cover every year
    pub fn with_series(
        mut self,
        name: impl Into<String>,
        values: Vec<FloatValue>,
    ) -> CoastalResult<Self> {
        if values.len() != self.years.len() {
            return Err(CoastalError::StateLength {
                expected: self.years.len(),
                found: values.len(),
            });
        }
        self.series.push((name.into(), values));
        Ok(self)
    }

    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn get(&self, name: &str) -> Option<&[FloatValue]> {
        self.series
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FloatValue])> {
        self.series.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Number of years
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl Serialize for TrajectoryRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.series.len() + 1))?;
        map.serialize_entry("years", &self.years)?;
        for (name, values) in &self.series {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}
