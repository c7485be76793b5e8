use crate::errors::{CoastalError, CoastalResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type FloatValue = f64;
pub type Year = i32;

/// The annual horizon `[start_year, end_year]` sampled every `time_step` years.
///
/// The number of points is `(end_year - start_year) / time_step + 1`. When the step does
/// not divide the span evenly the last point falls before `end_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Horizon", into = "Horizon")]
pub struct TimeAxis {
    start_year: Year,
    end_year: Year,
    time_step: Year,
}

impl TimeAxis {
    pub fn new(start_year: Year, end_year: Year, time_step: Year) -> CoastalResult<Self> {
        if time_step <= 0 || end_year < start_year {
            return Err(CoastalError::InvalidHorizon {
                start_year,
                end_year,
                time_step,
            });
        }
        Ok(Self {
            start_year,
            end_year,
            time_step,
        })
    }

    pub fn start_year(&self) -> Year {
        self.start_year
    }

    pub fn end_year(&self) -> Year {
        self.end_year
    }

    pub fn time_step(&self) -> Year {
        self.time_step
    }

    /// Number of years on the axis
    pub fn len(&self) -> usize {
        ((self.end_year - self.start_year) / self.time_step) as usize + 1
    }

    /// An axis always holds at least the start year
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the last year on the axis
    pub fn last_index(&self) -> usize {
        self.len() - 1
    }

    /// Year at a given offset, if it lies on the axis
    pub fn at(&self, index: usize) -> Option<Year> {
        if index < self.len() {
            Some(self.start_year + index as Year * self.time_step)
        } else {
            None
        }
    }

    /// Offset of `year`, if it lies on the axis
    pub fn index_of(&self, year: Year) -> Option<usize> {
        if year < self.start_year || year > self.end_year {
            return None;
        }
        let offset = year - self.start_year;
        if offset % self.time_step != 0 {
            return None;
        }
        Some((offset / self.time_step) as usize)
    }

    pub fn years(&self) -> Vec<Year> {
        (0..self.len()).filter_map(|i| self.at(i)).collect()
    }
}

/// Horizon settings carried by every parameter record.
///
/// Unlike [`TimeAxis`] this is plain configuration and may hold unusable values until
/// converted with [`Horizon::time_axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Horizon {
    pub start_year: Year,
    pub end_year: Year,
    /// unit: years
    pub time_step: Year,
}

impl Default for Horizon {
    fn default() -> Self {
        Self {
            start_year: 2024,
            end_year: 2039,
            time_step: 1,
        }
    }
}

impl Horizon {
    pub fn new(start_year: Year, end_year: Year, time_step: Year) -> Self {
        Self {
            start_year,
            end_year,
            time_step,
        }
    }

    pub fn time_axis(&self) -> CoastalResult<TimeAxis> {
        TimeAxis::new(self.start_year, self.end_year, self.time_step)
    }
}

impl TryFrom<Horizon> for TimeAxis {
    type Error = CoastalError;

    fn try_from(horizon: Horizon) -> CoastalResult<Self> {
        horizon.time_axis()
    }
}

impl From<TimeAxis> for Horizon {
    fn from(axis: TimeAxis) -> Self {
        Horizon::new(axis.start_year, axis.end_year, axis.time_step)
    }
}

impl fmt::Display for TimeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..={} every {} year(s)",
            self.start_year, self.end_year, self.time_step
        )
    }
}
