use approx::assert_relative_eq;
use coastal_components::parameters::{
    BlueEconomyParameters, ClimateParameters, EnvironmentalParameters, PolicyParameters,
    SocioeconomicParameters,
};
use coastal_components::{
    BlueEconomyModel, ClimateModel, EnvironmentalModel, PolicyModel, SocioeconomicModel,
};
use coastal_core::errors::CoastalError;
use coastal_core::model::SteppableModel;
use coastal_core::timeseries::Horizon;

fn default_models() -> Vec<Box<dyn SteppableModel>> {
    vec![
        Box::new(ClimateModel::from_parameters(ClimateParameters::default()).unwrap()),
        Box::new(EnvironmentalModel::from_parameters(EnvironmentalParameters::default()).unwrap()),
        Box::new(SocioeconomicModel::from_parameters(SocioeconomicParameters::default()).unwrap()),
        Box::new(BlueEconomyModel::from_parameters(BlueEconomyParameters::default()).unwrap()),
        Box::new(PolicyModel::from_parameters(PolicyParameters::default()).unwrap()),
    ]
}

#[test]
fn every_model_steps_end_minus_start_times() {
    for mut model in default_models() {
        let mut steps = 0;
        loop {
            match model.step() {
                Ok(_) => steps += 1,
                Err(err) => {
                    assert!(err.is_horizon_exceeded(), "{}: {}", model.domain(), err);
                    break;
                }
            }
        }
        assert_eq!(steps, 2039 - 2024, "{}", model.domain());
        assert_eq!(model.current_year(), 2039);
    }
}

#[test]
fn every_record_covers_the_horizon() {
    for mut model in default_models() {
        let definitions = model.definitions();
        let record = model.advance_to_end().unwrap();

        assert_eq!(record.len(), 16);
        assert_eq!(record.years().first(), Some(&2024));
        assert_eq!(record.years().last(), Some(&2039));
        assert_eq!(record.names().count(), definitions.len());
        for (name, values) in record.iter() {
            assert_eq!(values.len(), 16, "{}.{}", model.domain(), name);
        }
    }
}

#[test]
fn reset_is_equivalent_to_construction() {
    let fresh = default_models();
    for (mut model, fresh) in default_models().into_iter().zip(fresh) {
        model.step().unwrap();
        model.step().unwrap();
        model.reset();

        assert_eq!(model.current_state(), fresh.current_state());
        assert_eq!(model.trajectories(), fresh.trajectories());
    }
}

#[test]
fn custom_horizon() {
    let mut model = ClimateModel::from_parameters(ClimateParameters {
        horizon: Horizon::new(2030, 2035, 1),
        sea_level_rise_rate: 1.2,
        ..Default::default()
    })
    .unwrap();
    let record = model.advance_to_end().unwrap();
    assert_eq!(record.years(), &[2030, 2031, 2032, 2033, 2034, 2035]);
    assert_relative_eq!(record.get("sea_level").unwrap()[5], 6.0, epsilon = 1e-12);
}

#[test]
fn uneven_time_step_stops_before_end_year() {
    let mut model = PolicyModel::from_parameters(PolicyParameters {
        horizon: Horizon::new(2024, 2039, 2),
        ..Default::default()
    })
    .unwrap();
    let record = model.advance_to_end().unwrap();
    assert_eq!(record.len(), 8);
    assert_eq!(model.current_year(), 2038);
    assert!(matches!(
        model.step(),
        Err(CoastalError::HorizonExceeded {
            current_year: 2038,
            end_year: 2039,
            ..
        })
    ));
}

#[test]
fn compounding_over_the_full_horizon() {
    let mut model = ClimateModel::from_parameters(ClimateParameters::default()).unwrap();
    let record = model.advance_to_end().unwrap();
    assert_relative_eq!(
        record.get("rainfall").unwrap()[15],
        100.0 * 1.02_f64.powi(15),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        record.get("temperature").unwrap()[15],
        0.45,
        epsilon = 1e-12
    );
}

#[test]
fn typed_history_is_available() {
    let mut model = BlueEconomyModel::from_parameters(BlueEconomyParameters::default()).unwrap();
    model.advance_to_end().unwrap();
    let first = model.state_at(2025).unwrap();
    assert_relative_eq!(first.fisheries_value, 0.735, epsilon = 1e-12);
    assert!(model.state_at(2040).is_none());
}
