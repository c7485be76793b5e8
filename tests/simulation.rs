use approx::assert_relative_eq;
use coastal::analysis::{domain_mean, moving_average};
use coastal::indices::{DEVELOPMENT_INDEX, RESILIENCE_INDEX, SUSTAINABILITY_INDEX};
use coastal::{CoastalError, IntegratedSimulation, ScenarioConfig};
use coastal_core::model::{Domain, SteppableModel};
use coastal_core::timeseries::Horizon;

#[test]
fn full_run_covers_horizon() {
    let mut simulation = IntegratedSimulation::with_defaults().unwrap();
    let record = simulation.advance_to_end().unwrap();

    assert_eq!(record.years().len(), 16);
    for name in [RESILIENCE_INDEX, SUSTAINABILITY_INDEX, DEVELOPMENT_INDEX] {
        assert_eq!(record.index(name).unwrap().len(), 16);
    }
    for domain in Domain::ALL {
        let data = record.leaf(domain);
        assert_eq!(data.years(), record.years());
        for (_, values) in data.iter() {
            assert_eq!(values.len(), 16);
        }
    }
    assert!(simulation.finished());
    assert_eq!(simulation.current_year(), 2039);
}

#[test]
fn stepping_past_the_end_is_an_error() {
    let mut simulation = IntegratedSimulation::with_defaults().unwrap();
    for _ in 0..15 {
        simulation.step().unwrap();
    }
    let before = simulation.record();
    let err = simulation.step().unwrap_err();

    assert!(err.is_horizon_exceeded());
    assert_eq!(
        err,
        CoastalError::HorizonExceeded {
            model: "climate".to_string(),
            current_year: 2039,
            end_year: 2039,
        }
    );
    assert_eq!(simulation.record(), before);
}

#[test]
fn indices_are_recomputable_from_leaf_states() {
    let mut simulation = IntegratedSimulation::with_defaults().unwrap();
    simulation.step().unwrap();
    simulation.step().unwrap();

    let snapshot = simulation.leaf_states();
    let recomputed = simulation.indices().evaluate(&snapshot).unwrap();
    assert_eq!(recomputed, simulation.current_indices());

    let record = simulation.record();
    assert_eq!(
        record.index(RESILIENCE_INDEX).unwrap()[2],
        recomputed.resilience_index
    );
}

#[test]
fn blue_economy_term_is_constant() {
    let mut simulation = IntegratedSimulation::with_defaults().unwrap();
    let record = simulation.advance_to_end().unwrap();

    let environment = &record.environment_data;
    let policy = &record.policy_data;
    let sustainability = record.index(SUSTAINABILITY_INDEX).unwrap();
    for i in 0..record.years().len() {
        let remainder = sustainability[i]
            - 0.25 * environment.get("biodiversity_index").unwrap()[i]
            - 0.25 * environment.get("water_quality_index").unwrap()[i]
            - 0.25 * policy.get("monitoring_effectiveness").unwrap()[i];
        assert_relative_eq!(remainder, 0.25, epsilon = 1e-9);
    }
}

#[test]
fn resilience_after_one_step() {
    let mut simulation = IntegratedSimulation::with_defaults().unwrap();
    let record = simulation.step().unwrap();

    let policy = record.policy_state.get("overall_effectiveness").unwrap();
    let expected = 0.3 * (100.0 - 103.0) + 0.3 * 98.72 + 0.2 * 103.0 + 0.2 * policy;
    assert_relative_eq!(record.indices.resilience_index, expected, epsilon = 1e-9);
}

#[test]
fn checkpoint_and_resume() {
    let mut reference = IntegratedSimulation::with_defaults().unwrap();
    let mut simulation = IntegratedSimulation::with_defaults().unwrap();
    for _ in 0..5 {
        simulation.step().unwrap();
    }

    let serialised = toml::to_string(&simulation).unwrap();
    let mut resumed: IntegratedSimulation = toml::from_str(&serialised).unwrap();
    assert_eq!(resumed.current_year(), 2029);

    let resumed_record = resumed.advance_to_end().unwrap();
    let reference_record = reference.advance_to_end().unwrap();
    assert_eq!(resumed_record.years(), reference_record.years());
    for domain in Domain::ALL {
        for (name, values) in reference_record.leaf(domain).iter() {
            let resumed_values = resumed_record.leaf(domain).get(name).unwrap();
            for (a, b) in values.iter().zip(resumed_values) {
                assert_relative_eq!(*a, *b, max_relative = 1e-12);
            }
        }
    }
}

#[test]
fn inconsistent_checkpoints_are_rejected() {
    let mut simulation = IntegratedSimulation::with_defaults().unwrap();
    for _ in 0..5 {
        simulation.step().unwrap();
    }
    let checkpoint = serde_json::to_value(&simulation).unwrap();
    let resumed: IntegratedSimulation = serde_json::from_value(checkpoint.clone()).unwrap();
    assert_eq!(resumed.current_state(), simulation.current_state());

    let mut zero_step = checkpoint.clone();
    zero_step["climate"]["time_axis"]["time_step"] = serde_json::json!(0);
    assert!(serde_json::from_value::<IntegratedSimulation>(zero_step).is_err());

    let mut behind = checkpoint;
    behind["environment"]["cursor"]["index"] = serde_json::json!(4);
    behind["environment"]["cursor"]["year"] = serde_json::json!(2028);
    let err = serde_json::from_value::<IntegratedSimulation>(behind).unwrap_err();
    assert!(err.to_string().contains("environment is at step 4"));
}

#[test]
fn records_serialise_with_expected_keys() {
    let mut simulation = IntegratedSimulation::with_defaults().unwrap();
    let step = serde_json::to_value(simulation.step().unwrap()).unwrap();
    assert_eq!(step["year"], 2025);
    assert!(step["resilience_index"].is_number());
    assert_eq!(step["climate_state"]["year"], 2025);
    assert_eq!(step["climate_state"]["sea_level"], 0.5);

    let record = serde_json::to_value(simulation.advance_to_end().unwrap()).unwrap();
    assert_eq!(record["years"].as_array().unwrap().len(), 16);
    assert_eq!(record["development_index"].as_array().unwrap().len(), 16);
    assert_eq!(record["blue_economy_data"]["years"][0], 2024);
    assert_eq!(
        record["policy_data"]["overall_effectiveness"]
            .as_array()
            .unwrap()
            .len(),
        16
    );
}

#[test]
fn scenario_with_shorter_horizon() {
    let config = ScenarioConfig::from_toml_str(
        r#"
[horizon]
start_year = 2024
end_year = 2029

[climate]
sea_level_rise_rate = 1.0
"#,
    )
    .unwrap();
    let mut simulation = config.build().unwrap();
    let record = simulation.advance_to_end().unwrap();

    assert_eq!(record.years(), &[2024, 2025, 2026, 2027, 2028, 2029]);
    assert_relative_eq!(
        record.climate_data.get("sea_level").unwrap()[5],
        5.0,
        epsilon = 1e-12
    );
}

#[test]
fn reset_mid_run() {
    let mut simulation = IntegratedSimulation::builder()
        .horizon(Horizon::new(2024, 2030, 1))
        .build()
        .unwrap();
    let first = simulation.advance_to_end().unwrap();

    simulation.step().unwrap_err();
    simulation.reset().unwrap();
    assert_eq!(simulation.current_year(), 2024);
    for model in simulation.models() {
        assert_eq!(model.current_year(), 2024);
    }

    let second = simulation.advance_to_end().unwrap();
    assert_eq!(first, second);
}

#[test]
fn analysis_of_a_run() {
    let mut simulation = IntegratedSimulation::with_defaults().unwrap();
    let record = simulation.advance_to_end().unwrap();

    let health = domain_mean(&record.environment_data);
    let first_year: f64 = record
        .environment_data
        .iter()
        .map(|(_, values)| values[0])
        .sum::<f64>()
        / 5.0;
    assert_relative_eq!(health[0], first_year, epsilon = 1e-12);

    let smoothed = moving_average(record.index(RESILIENCE_INDEX).unwrap(), 3).unwrap();
    assert_eq!(smoothed.len(), 16);
    assert!(smoothed[1].is_none());
    assert!(smoothed[2].is_some());
}
