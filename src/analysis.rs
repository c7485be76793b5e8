//! Summaries of a completed run
//!
//! Plain data transformations over a [`SimulationRecord`]; nothing here writes files or
//! plots.

use crate::indices::{DEVELOPMENT_INDEX, RESILIENCE_INDEX, SUSTAINABILITY_INDEX};
use crate::simulation::SimulationRecord;
use coastal_core::errors::{CoastalError, CoastalResult};
use coastal_core::model::Domain;
use coastal_core::timeseries::{FloatValue, Year};
use coastal_core::trajectory::TrajectoryRecord;
use ndarray::{Array2, ArrayView1, Axis};
use serde::Serialize;

/// Per-year mean across every quantity of one model.
///
/// The year column is not a quantity and is left out. A record without quantities
/// yields NaN for every year.
pub fn domain_mean(record: &TrajectoryRecord) -> Vec<FloatValue> {
    let n_years = record.len();
    let n_series = record.names().count();

    let mut values = Array2::<FloatValue>::zeros((n_series, n_years));
    for (mut row, (_, series)) in values.axis_iter_mut(Axis(0)).zip(record.iter()) {
        row.assign(&ArrayView1::from(series));
    }

    match values.mean_axis(Axis(0)) {
        Some(mean) => mean.to_vec(),
        None => vec![FloatValue::NAN; n_years],
    }
}

/// Aggregate trajectories of the climate, environment and socioeconomic models
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallIndicators {
    pub years: Vec<Year>,
    /// Mean of the climate quantities
    pub overall_impact: Vec<FloatValue>,
    /// Mean of the environmental quantities
    pub overall_health: Vec<FloatValue>,
    /// Mean of the socioeconomic quantities
    pub overall_development: Vec<FloatValue>,
}

pub fn overall_indicators(record: &SimulationRecord) -> OverallIndicators {
    OverallIndicators {
        years: record.years().to_vec(),
        overall_impact: domain_mean(record.leaf(Domain::Climate)),
        overall_health: domain_mean(record.leaf(Domain::Environment)),
        overall_development: domain_mean(record.leaf(Domain::Socioeconomic)),
    }
}

/// Trailing rolling mean over `window` values.
///
/// Entries are `None` until a full window is available.
pub fn moving_average(values: &[FloatValue], window: usize) -> CoastalResult<Vec<Option<FloatValue>>> {
    if window == 0 {
        return Err(CoastalError::InvalidParameter {
            model: "analysis".to_string(),
            parameter: "window".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let mut averages = vec![None; values.len().min(window - 1)];
    averages.extend(
        values
            .windows(window)
            .map(|w| Some(w.iter().sum::<FloatValue>() / window as FloatValue)),
    );
    Ok(averages)
}

/// Headline quantities of one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyIndicators {
    pub year: Year,
    pub resilience_index: FloatValue,
    pub sustainability_index: FloatValue,
    pub development_index: FloatValue,
    pub sea_level: FloatValue,
    pub mangrove_coverage: FloatValue,
    pub gdp: FloatValue,
    pub blue_economy_value: FloatValue,
    pub policy_effectiveness: FloatValue,
}

fn series<'a>(
    record: &'a TrajectoryRecord,
    name: &str,
    len: usize,
) -> CoastalResult<&'a [FloatValue]> {
    let values = record
        .get(name)
        .ok_or_else(|| CoastalError::MissingVariable(name.to_string()))?;
    if values.len() != len {
        return Err(CoastalError::StateLength {
            expected: len,
            found: values.len(),
        });
    }
    Ok(values)
}

/// One row of headline quantities per simulated year.
///
/// Fails with [`CoastalError::StateLength`] if a series does not cover every year.
pub fn key_indicators(record: &SimulationRecord) -> CoastalResult<Vec<KeyIndicators>> {
    let n = record.years().len();
    let resilience = series(&record.indices, RESILIENCE_INDEX, n)?;
    let sustainability = series(&record.indices, SUSTAINABILITY_INDEX, n)?;
    let development = series(&record.indices, DEVELOPMENT_INDEX, n)?;
    let sea_level = series(&record.climate_data, "sea_level", n)?;
    let mangroves = series(&record.environment_data, "mangrove_coverage", n)?;
    let gdp = series(&record.socioeconomic_data, "gdp", n)?;
    let blue_economy = series(&record.blue_economy_data, "total_value", n)?;
    let policy = series(&record.policy_data, "overall_effectiveness", n)?;

    Ok(record
        .years()
        .iter()
        .enumerate()
        .map(|(i, year)| KeyIndicators {
            year: *year,
            resilience_index: resilience[i],
            sustainability_index: sustainability[i],
            development_index: development[i],
            sea_level: sea_level[i],
            mangrove_coverage: mangroves[i],
            gdp: gdp[i],
            blue_economy_value: blue_economy[i],
            policy_effectiveness: policy[i],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::IntegratedSimulation;
    use coastal_components::parameters::EnvironmentalParameters;
    use coastal_core::timeseries::Horizon;
    use is_close::is_close;

    #[test]
    fn mean_across_quantities() {
        let record = TrajectoryRecord::new(vec![2024, 2025])
            .with_series("a", vec![1.0, 2.0])
            .unwrap()
            .with_series("b", vec![3.0, 6.0])
            .unwrap();
        assert_eq!(domain_mean(&record), vec![2.0, 4.0]);
    }

    #[test]
    fn mean_of_nothing_is_nan() {
        let record = TrajectoryRecord::new(vec![2024, 2025]);
        let mean = domain_mean(&record);
        assert_eq!(mean.len(), 2);
        assert!(mean.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rolling_mean() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let averages = moving_average(&values, 3).unwrap();
        assert_eq!(averages, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);

        assert_eq!(
            moving_average(&values, 1).unwrap(),
            values.iter().map(|v| Some(*v)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn rolling_mean_longer_than_series() {
        let averages = moving_average(&[1.0, 2.0], 5).unwrap();
        assert_eq!(averages, vec![None, None]);
    }

    #[test]
    fn rolling_mean_rejects_empty_window() {
        assert!(matches!(
            moving_average(&[1.0], 0),
            Err(CoastalError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn indicators_of_a_run() {
        let mut simulation = IntegratedSimulation::with_defaults().unwrap();
        let record = simulation.advance_to_end().unwrap();

        let overall = overall_indicators(&record);
        assert_eq!(overall.years.len(), 16);
        // sea level 0, temperature 0 and three hazards at 100
        assert!(is_close!(overall.overall_impact[0], 60.0));
        assert_eq!(overall.overall_health.len(), 16);

        let rows = key_indicators(&record).unwrap();
        assert_eq!(rows.len(), 16);
        assert_eq!(rows[0].year, 2024);
        assert_eq!(rows[15].year, 2039);
        assert!(is_close!(rows[1].sea_level, 0.5));
        assert_eq!(
            rows[3].resilience_index,
            record.index(RESILIENCE_INDEX).unwrap()[3]
        );
    }

    #[test]
    fn indicators_with_a_shorter_leaf_horizon() {
        let mut simulation = IntegratedSimulation::builder()
            .environment(EnvironmentalParameters {
                horizon: Horizon::new(2024, 2030, 1),
                ..Default::default()
            })
            .build()
            .unwrap();
        let record = simulation.advance_to_end().unwrap();

        let rows = key_indicators(&record).unwrap();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[6].year, 2030);

        let overall = overall_indicators(&record);
        assert_eq!(overall.overall_health.len(), overall.years.len());
    }

    #[test]
    fn indicators_reject_uneven_series() {
        let mut simulation = IntegratedSimulation::with_defaults().unwrap();
        let mut record = simulation.advance_to_end().unwrap();
        record.environment_data = TrajectoryRecord::new(vec![2024])
            .with_series("mangrove_coverage", vec![100.0])
            .unwrap();

        assert_eq!(
            key_indicators(&record),
            Err(CoastalError::StateLength {
                expected: 16,
                found: 1
            })
        );
    }
}
