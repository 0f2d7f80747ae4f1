//! Trade-off evaluation: pairwise deltas, best-scenario selection with an
//! explanation, and the ethical audit
//!
//! Scoring reuses the agent weight table: the combined score of a variant is
//! the equal-weighted average of every objective's utility for it. Exact
//! ties go to the mode with the lower rank, so the selection does not depend
//! on the order variants were generated in.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sim2100_model::input::GovernanceRules;
use sim2100_model::metrics::{Metric, MetricDeltas, Metrics, Mode, Objective};
use sim2100_model::policy::PolicyConfig;

use crate::variants::ScenarioVariant;

/// Pass/fail audit of the selected scenario against the governance rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EthicalAudit {
    /// Overall compliance: logical AND of all active checks (vacuously true)
    #[serde(rename = "cumple")]
    pub compliant: bool,
    /// Per-rule verdicts, in rule-table order
    #[serde(rename = "reglas_evaluadas")]
    pub checks: IndexMap<String, bool>,
    /// Descriptions of each non-compliant rule
    #[serde(rename = "riesgos")]
    pub risks: Vec<String>,
}

/// Result of the evaluation stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// The evaluated variants, in generation order
    #[serde(rename = "escenarios")]
    pub variants: Vec<ScenarioVariant>,
    /// Per-metric deltas for every unordered variant pair
    #[serde(rename = "tradeoffs")]
    pub tradeoffs: IndexMap<String, MetricDeltas>,
    /// Selected best mode (absent when no variants were generated)
    #[serde(rename = "mejor_escenario", skip_serializing_if = "Option::is_none")]
    pub best: Option<Mode>,
    /// XAI explanation of the selection (present when requested)
    #[serde(rename = "explicacion_xai", skip_serializing_if = "Option::is_none")]
    pub xai_explanation: Option<String>,
    /// Ethical audit (present when requested)
    #[serde(rename = "auditoria_etica", skip_serializing_if = "Option::is_none")]
    pub audit: Option<EthicalAudit>,
}

impl Evaluation {
    /// The selected variant, when one exists
    #[must_use]
    pub fn best_variant(&self) -> Option<&ScenarioVariant> {
        let best = self.best?;
        self.variants.iter().find(|v| v.mode == best)
    }
}

/// Combined score of a metrics block: equal-weighted average of every
/// objective's utility
#[must_use]
pub fn combined_score(metrics: &Metrics, policy: &PolicyConfig) -> f64 {
    let total: f64 = Objective::ALL
        .iter()
        .map(|objective| policy.weights.for_objective(*objective).score(metrics))
        .sum();
    total / Objective::ALL.len() as f64
}

/// Evaluate generated variants against the governance rules
#[must_use]
pub fn evaluate(
    variants: &[ScenarioVariant],
    rules: &GovernanceRules,
    xai: bool,
    audit: bool,
    policy: &PolicyConfig,
) -> Evaluation {
    let tradeoffs = pairwise_tradeoffs(variants);
    let best = select_best(variants, policy);
    let best_variant = best.and_then(|mode| variants.iter().find(|v| v.mode == mode));

    let xai_explanation = if xai {
        best_variant.map(|variant| explain(variant, policy))
    } else {
        None
    };

    let audit = if audit {
        Some(run_audit(best_variant, rules))
    } else {
        None
    };

    if let Some(mode) = best {
        tracing::info!(best = %mode, "scenario evaluation complete");
    }

    Evaluation {
        variants: variants.to_vec(),
        tradeoffs,
        best,
        xai_explanation,
        audit,
    }
}

/// Per-metric deltas for every unordered pair, keyed `"a_vs_b"`
fn pairwise_tradeoffs(variants: &[ScenarioVariant]) -> IndexMap<String, MetricDeltas> {
    let mut tradeoffs = IndexMap::new();
    for (i, a) in variants.iter().enumerate() {
        for b in variants.iter().skip(i + 1) {
            let key = format!("{}_vs_{}", a.mode, b.mode);
            tradeoffs.insert(key, MetricDeltas::between(&a.metrics, &b.metrics));
        }
    }
    tradeoffs
}

/// Variant maximizing the combined score; exact ties go to the lower
/// [`Mode::rank`]
fn select_best(variants: &[ScenarioVariant], policy: &PolicyConfig) -> Option<Mode> {
    let mut best: Option<(Mode, f64)> = None;
    for variant in variants {
        let score = combined_score(&variant.metrics, policy);
        let better = match best {
            None => true,
            Some((mode, top)) => score > top || (score == top && variant.mode.rank() < mode.rank()),
        };
        if better {
            best = Some((variant.mode, score));
        }
    }
    best.map(|(mode, _)| mode)
}

/// Deterministic template naming the winner and its top contributing metrics
fn explain(variant: &ScenarioVariant, policy: &PolicyConfig) -> String {
    let metrics = &variant.metrics;
    // Contribution view: risk counts through its inverse so "low risk" can
    // rank as a strength.
    let mut contributions: Vec<(Metric, f64)> = vec![
        (Metric::Sostenibilidad, metrics.sostenibilidad),
        (Metric::Equidad, metrics.equidad),
        (Metric::Riesgo, 1.0 - metrics.riesgo),
        (Metric::Biodiversidad, metrics.biodiversidad),
    ];
    contributions.sort_by(|a, b| b.1.total_cmp(&a.1));

    let describe_metric = |(metric, value): &(Metric, f64)| match metric {
        Metric::Riesgo => format!("riesgo bajo ({:.2})", 1.0 - value),
        other => format!("{other} ({value:.2})"),
    };

    format!(
        "Se selecciona el escenario '{}' con puntuacion combinada {:.2}, impulsada por {} y {}",
        variant.mode,
        combined_score(metrics, policy),
        describe_metric(&contributions[0]),
        describe_metric(&contributions[1]),
    )
}

/// Check the selected variant against every active rule
///
/// No selected variant or no active rules means vacuous compliance.
fn run_audit(best: Option<&ScenarioVariant>, rules: &GovernanceRules) -> EthicalAudit {
    let mut audit = EthicalAudit {
        compliant: true,
        checks: IndexMap::new(),
        risks: Vec::new(),
    };
    let Some(variant) = best else {
        return audit;
    };

    let mut check = |rule: &str, threshold: Option<f64>, value: f64, is_minimum: bool| {
        let Some(threshold) = threshold else { return };
        let ok = if is_minimum { value >= threshold } else { value <= threshold };
        audit.checks.insert(rule.to_string(), ok);
        if !ok {
            let relation = if is_minimum { "<" } else { ">" };
            audit
                .risks
                .push(format!("incumplimiento de {rule}: {value:.2} {relation} {threshold:.2}"));
            audit.compliant = false;
        }
    };

    let metrics = &variant.metrics;
    check("min_sostenibilidad", rules.min_sostenibilidad, metrics.sostenibilidad, true);
    check("min_equidad", rules.min_equidad, metrics.equidad, true);
    check("max_riesgo", rules.max_riesgo, metrics.riesgo, false);
    check("min_biodiversidad", rules.min_biodiversidad, metrics.biodiversidad, true);

    audit
}
