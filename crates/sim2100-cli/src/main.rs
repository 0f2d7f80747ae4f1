//! SpatialSim 2100 command line
//!
//! `sim2100 run` executes the scenario pipeline on the built-in seed request
//! (or a JSON file) and writes the full result document next to a printed
//! summary. `sim2100 health` prints the service health document.

use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use serde_json::{json, Value};
use sim2100_model::policy::PolicyConfig;
use sim2100_pipeline::{health, ScenarioPipeline, ScenarioResult};

fn cli() -> Command {
    Command::new("sim2100")
        .version(env!("CARGO_PKG_VERSION"))
        .about("SpatialSim 2100 scenario generator")
        .arg_required_else_help(false)
        .subcommand(
            Command::new("run")
                .about("Run the scenario pipeline")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .help("JSON request file (defaults to the built-in seed scenario)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .default_value("scenario_output.json")
                        .help("Where to write the result document"),
                )
                .arg(
                    Arg::new("policy")
                        .long("policy")
                        .help("TOML policy file overriding the default constants"),
                )
                .arg(
                    Arg::new("quiet")
                        .long("quiet")
                        .action(ArgAction::SetTrue)
                        .help("Skip the printed summary"),
                ),
        )
        .subcommand(Command::new("health").about("Print the service health document"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("health", _)) => {
            println!("{}", serde_json::to_string_pretty(&health().body)?);
            Ok(())
        }
        Some(("run", args)) => run(
            args.get_one::<String>("input").map(String::as_str),
            args.get_one::<String>("output").map_or("scenario_output.json", String::as_str),
            args.get_one::<String>("policy").map(String::as_str),
            args.get_flag("quiet"),
        ),
        _ => run(None, "scenario_output.json", None, false),
    }
}

fn run(input: Option<&str>, output: &str, policy_path: Option<&str>, quiet: bool) -> anyhow::Result<()> {
    let body = match input {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("leyendo {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("JSON invalido en {path}"))?
        }
        None => seed_request(),
    };

    let mut pipeline = ScenarioPipeline::new();
    if let Some(path) = policy_path {
        let policy = PolicyConfig::load(Path::new(path))
            .with_context(|| format!("cargando politica desde {path}"))?;
        pipeline = pipeline.with_policy(policy);
    }

    let result = pipeline.run(&body).context("generando el escenario")?;

    if !quiet {
        print_summary(&result);
    }

    let rendered = serde_json::to_string_pretty(&result)?;
    fs::write(output, rendered).with_context(|| format!("escribiendo {output}"))?;
    println!("Resultados guardados en {output}");
    Ok(())
}

/// The built-in seed scenario: the metropolitan example from the service
/// documentation
fn seed_request() -> Value {
    json!({
        "humano": {
            "poblacion": 10_000_000.0,
            "diversidad_cultural": 0.8,
            "desigualdad_recursos": 0.4,
            "participacion_civica": 0.6
        },
        "espacial": {
            "area_km2": 50_000.0,
            "conectividad": 0.7,
            "infraestructura_verde": 0.3,
            "accesibilidad": 0.6
        },
        "temporal": {
            "horizonte": "2100",
            "tendencia_crecimiento": 0.02,
            "velocidad_cambio": 0.5
        },
        "ecologico": {
            "biodiversidad_perdida": 0.3,
            "temperatura_aumento": 1.8,
            "recursos_hidricos": 0.6,
            "calidad_aire": 0.7
        },
        "reglas": {
            "min_sostenibilidad": 0.5,
            "min_equidad": 0.5
        }
    })
}

fn print_summary(result: &ScenarioResult) {
    let line = "-".repeat(72);
    println!("{}", "=".repeat(72));
    println!("SPATIALSIM 2100 - ESCENARIOS GENERADOS");
    println!("{}\n", "=".repeat(72));

    println!("ESCENARIOS:");
    println!("{line}");
    for variant in &result.evaluation.variants {
        let m = &variant.metrics;
        println!("  {:<11} sost {:.2}  equidad {:.2}  riesgo {:.2}  biodiv {:.2}", variant.mode, m.sostenibilidad, m.equidad, m.riesgo, m.biodiversidad);
    }

    if result.dynamics.is_empty() {
        println!("\nDINAMICAS:");
        println!("{line}");
        println!("  (ninguna detectada)");
    } else {
        print_labels("PATRONES DETECTADOS", &result.dynamics.patterns);
        print_labels("RIESGOS DETECTADOS", &result.dynamics.risks);
        print_labels("DESIGUALDADES DETECTADAS", &result.dynamics.inequities);
    }

    println!("\nEVALUACION:");
    println!("{line}");
    if let Some(best) = result.evaluation.best {
        println!("  Mejor escenario: {best}");
    }
    if let Some(explanation) = &result.evaluation.xai_explanation {
        println!("  {explanation}");
    }
    let verdict = if result.governance.compliant { "cumple" } else { "NO cumple" };
    println!("  Auditoria etica: {verdict}");
    if let Some(audit) = &result.evaluation.audit {
        for risk in &audit.risks {
            println!("    - {risk}");
        }
    }

    if !result.diagnostics.is_empty() {
        println!("\nDIAGNOSTICOS:");
        println!("{line}");
        for diagnostic in &result.diagnostics {
            println!("  [{}] {}", diagnostic.field, diagnostic.message);
        }
    }
    println!();
}

fn print_labels(title: &str, labels: &[String]) {
    println!("\n{title}:");
    println!("{}", "-".repeat(72));
    if labels.is_empty() {
        println!("  (ninguno)");
    } else {
        for (i, label) in labels.iter().enumerate() {
            println!("  {}. {label}", i + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn seed_request_runs_compliant() {
        let result = ScenarioPipeline::new().run(&seed_request()).unwrap();
        assert!(result.governance.compliant);
        assert_eq!(result.evaluation.variants.len(), 4);
    }

    #[test]
    fn calm_request_detects_no_dynamics() {
        // Every value sits inside its threshold, so the summary takes the
        // no-dynamics branch.
        let body = json!({
            "humano": {
                "poblacion": 100_000.0,
                "desigualdad_recursos": 0.2,
                "participacion_civica": 0.5
            },
            "espacial": {"area_km2": 2_000.0},
            "temporal": {"horizonte": "2100", "tendencia_crecimiento": 0.0},
            "ecologico": {
                "biodiversidad_perdida": 0.1,
                "temperatura_aumento": 1.0,
                "recursos_hidricos": 0.5,
                "calidad_aire": 0.6
            },
            "reglas": {}
        });
        let result = ScenarioPipeline::new().run(&body).unwrap();
        assert!(result.dynamics.is_empty());
        print_summary(&result);
    }

    #[test]
    fn run_writes_result_document() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        run(None, output.to_str().unwrap(), None, true).unwrap();

        let raw = fs::read_to_string(&output).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("visualizacion").is_some());
    }

    #[test]
    fn run_accepts_custom_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("request.json");
        let mut file = fs::File::create(&input).unwrap();
        write!(file, "{}", seed_request()).unwrap();

        let output = dir.path().join("out.json");
        run(Some(input.to_str().unwrap()), output.to_str().unwrap(), None, true).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn malformed_input_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.json");
        fs::write(&input, "{ not json").unwrap();

        let err = run(Some(input.to_str().unwrap()), "unused.json", None, true).unwrap_err();
        assert!(err.to_string().contains("JSON invalido"));
    }

    #[test]
    fn policy_file_overrides_constants() {
        let dir = tempfile::tempdir().unwrap();
        let policy = dir.path().join("policy.toml");
        fs::write(&policy, "[umbrales]\ndensidad_urbanizacion = 100.0\n").unwrap();

        let output = dir.path().join("out.json");
        run(None, output.to_str().unwrap(), Some(policy.to_str().unwrap()), true).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        // Seed density is 200 /km², above the lowered 100 threshold.
        let patterns = value["dinamicas"]["patrones"].as_array().unwrap();
        assert!(patterns.iter().any(|p| p == "urbanizacion_rapida"));
    }
}
