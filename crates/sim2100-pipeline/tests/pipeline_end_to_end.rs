//! End-to-end runs over the full seven-stage pipeline

use pretty_assertions::assert_eq;
use serde_json::json;
use sim2100_model::metrics::Mode;
use sim2100_pipeline::{generar_escenario_2100, ScenarioPipeline, RESULT_VERSION};
use sim2100_test_utils::{metropolitan_request, minimal_request, stressed_request, FixedClock};

fn frozen_pipeline() -> ScenarioPipeline {
    ScenarioPipeline::new().with_clock(Box::new(FixedClock::epoch_2100()))
}

#[test]
fn metropolitan_scenario_is_compliant() {
    let result = generar_escenario_2100(&metropolitan_request()).unwrap();

    assert_eq!(result.version, RESULT_VERSION);
    assert!(result.governance.compliant);
    assert_eq!(result.evaluation.best, Some(Mode::Utopico));
    assert!(result.evaluation.xai_explanation.is_some());
    assert_eq!(result.visualization.variants.len(), 4);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn identical_requests_identical_results_under_fixed_clock() {
    let pipeline = frozen_pipeline();
    let a = pipeline.run(&metropolitan_request()).unwrap();
    let b = pipeline.run(&metropolitan_request()).unwrap();
    assert_eq!(a, b);

    let json_a = serde_json::to_string(&a).unwrap();
    let json_b = serde_json::to_string(&b).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn frozen_timestamp_lands_in_the_result() {
    let result = frozen_pipeline().run(&minimal_request()).unwrap();
    assert!(result.timestamp.starts_with("2100-01-01T00:00:00"));
}

#[test]
fn negotiation_pulls_pressures_down_and_capacities_up() {
    let result = generar_escenario_2100(&metropolitan_request()).unwrap();

    // The agreed biodiversity loss sits below the declared 0.3 and the
    // agreed water availability above the declared 0.6, so base
    // biodiversity exceeds 0.7 and base risk stays below 0.3.
    let base = &result.evaluation.variants[0];
    assert_eq!(base.mode, Mode::Base);
    assert!(base.metrics.biodiversidad > 0.7);
    assert!(base.metrics.riesgo < 0.3);
}

#[test]
fn stressed_scenario_detects_the_full_dynamics_set() {
    let result = generar_escenario_2100(&stressed_request()).unwrap();
    let dynamics = &result.dynamics;

    assert!(dynamics.patterns.contains(&"urbanizacion_rapida".to_string()));
    assert!(dynamics.patterns.contains(&"crecimiento_acelerado".to_string()));
    assert!(dynamics.risks.contains(&"colapso_biodiversidad".to_string()));
    assert!(dynamics.risks.contains(&"riesgo_climatico".to_string()));
    assert!(dynamics.risks.contains(&"estres_termico".to_string()));
    assert!(dynamics.risks.contains(&"estres_hidrico".to_string()));
    assert!(dynamics.inequities.contains(&"desigualdad_acceso".to_string()));
    assert!(dynamics.inequities.contains(&"exclusion_participativa".to_string()));
}

#[test]
fn all_variant_metrics_are_bounded() {
    for request in [metropolitan_request(), minimal_request(), stressed_request()] {
        let result = generar_escenario_2100(&request).unwrap();
        for variant in &result.evaluation.variants {
            assert!(variant.metrics.is_bounded(), "{}", variant.mode);
        }
    }
}

#[test]
fn strict_rules_fail_the_audit() {
    let mut body = metropolitan_request();
    body["reglas"]["min_sostenibilidad"] = json!(0.95);
    let result = generar_escenario_2100(&body).unwrap();

    assert!(!result.governance.compliant);
    let audit = result.evaluation.audit.unwrap();
    assert_eq!(audit.checks.get("min_sostenibilidad"), Some(&false));
    assert!(audit.risks.iter().any(|r| r.contains("min_sostenibilidad")));
}

#[test]
fn degraded_fields_accumulate_diagnostics_without_aborting() {
    let mut body = metropolitan_request();
    body["ecologico"]["temperatura_aumento"] = json!("dos grados");
    body["humano"]["poblacion"] = json!(null);

    let result = generar_escenario_2100(&body).unwrap();
    assert!(result.diagnostics.len() >= 2);
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.field == "ecologico.temperatura_aumento"));
}

#[test]
fn wire_contract_keys_are_spanish() {
    let result = frozen_pipeline().run(&metropolitan_request()).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    for key in [
        "version",
        "timestamp",
        "visualizacion",
        "evaluacion",
        "grafo_conocimiento",
        "dinamicas",
        "gobernanza",
        "diagnosticos",
    ] {
        assert!(value.get(key).is_some(), "missing top-level key {key}");
    }
    assert!(value["evaluacion"].get("mejor_escenario").is_some());
    assert!(value["evaluacion"].get("auditoria_etica").is_some());
    assert!(value["gobernanza"].get("reglas").is_some());
    assert!(value["gobernanza"].get("cumple").is_some());
    assert!(value["grafo_conocimiento"].get("nodos").is_some());
    assert!(value["grafo_conocimiento"].get("aristas").is_some());
}

#[test]
fn result_round_trips_through_json() {
    let result = frozen_pipeline().run(&metropolitan_request()).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: sim2100_pipeline::ScenarioResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result, back);
}

mod property {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn arbitrary_inputs_never_break_metric_bounds(
            poblacion in 0.0..100_000_000.0f64,
            area in 0.0..1_000_000.0f64,
            perdida in 0.0..1.0f64,
            temperatura in 0.0..6.0f64,
            recursos in 0.0..1.0f64,
            participacion in 0.0..1.0f64,
        ) {
            let body = json!({
                "humano": {"poblacion": poblacion, "participacion_civica": participacion},
                "espacial": {"area_km2": area},
                "temporal": {"horizonte": "2100"},
                "ecologico": {
                    "biodiversidad_perdida": perdida,
                    "temperatura_aumento": temperatura,
                    "recursos_hidricos": recursos
                },
                "reglas": {}
            });
            let result = generar_escenario_2100(&body).unwrap();
            prop_assert_eq!(result.evaluation.variants.len(), 4);
            for variant in &result.evaluation.variants {
                prop_assert!(variant.metrics.is_bounded());
            }
            for layer in result.visualization.semantic_layers.values() {
                for value in layer.values() {
                    prop_assert!((0.0..=1.0).contains(value));
                }
            }
        }
    }
}
