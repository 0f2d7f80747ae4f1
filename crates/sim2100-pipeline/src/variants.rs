//! Variant generation: the four named scenario transforms
//!
//! Each requested mode applies a fixed deterministic transform to the
//! negotiated consensus to produce its metrics block. Caller mode order is
//! preserved; the default order is the governance order (base, disruptivo,
//! utopico, hibrido). Every metric output is clamped to [0,1] and every
//! normalization is guarded against zero denominators.

use serde::{Deserialize, Serialize};
use sim2100_model::error::Diagnostic;
use sim2100_model::metrics::{clamp01, safe_ratio, Metrics, Mode};
use sim2100_model::policy::PolicyConfig;

use crate::negotiation::Negotiation;

/// °C span over which temperature rise saturates the risk metric
pub const TEMPERATURE_SCALE: f64 = 5.0;

/// Weight of biodiversity loss in base sustainability
const LOSS_SUSTAINABILITY_WEIGHT: f64 = 0.5;
/// Weight of temperature rise (per °C) in base sustainability
const TEMPERATURE_SUSTAINABILITY_WEIGHT: f64 = 0.1;
/// Weight of consensus tension in disruptive risk
const TENSION_RISK_WEIGHT: f64 = 0.1;

/// One generated future scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioVariant {
    /// Variant mode
    #[serde(rename = "modo")]
    pub mode: Mode,
    /// Free-text description of the trajectory
    #[serde(rename = "descripcion")]
    pub description: String,
    /// The four metrics, each in [0,1]
    #[serde(rename = "metricas")]
    pub metrics: Metrics,
    /// Recommended interventions
    #[serde(rename = "recomendaciones")]
    pub recommendations: Vec<String>,
}

/// Generate scenario variants in the caller-specified mode order
#[must_use]
pub fn generate(
    negotiation: &Negotiation,
    modes: &[Mode],
    policy: &PolicyConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ScenarioVariant> {
    let base = base_metrics(negotiation);
    let tension = consensus_tension(negotiation, diagnostics);
    let utopian = utopian_metrics(&base, policy);

    modes
        .iter()
        .map(|mode| {
            let metrics = match mode {
                Mode::Base => base,
                Mode::Disruptivo => disruptive_metrics(&base, tension, policy),
                Mode::Utopico => utopian,
                Mode::Hibrido => base.blend(&utopian),
            };
            ScenarioVariant {
                mode: *mode,
                description: describe(*mode).to_string(),
                metrics,
                recommendations: recommend(*mode, &metrics),
            }
        })
        .collect()
}

/// Base metrics: the negotiated consensus passed through the documented
/// derivation, bounded to [0,1]
///
/// Missing consensus keys read as their neutral defaults, so an empty
/// consensus still yields a valid metrics block.
fn base_metrics(negotiation: &Negotiation) -> Metrics {
    let loss = negotiation.value_or("biodiversidad_perdida", 0.0);
    let temperature = negotiation.value_or("temperatura_aumento", 0.0);
    let water = negotiation.value_or("recursos_hidricos", 0.5);
    let pressure = negotiation.value_or("presion_demografica", 0.0);

    Metrics::clamped(
        1.0 - LOSS_SUSTAINABILITY_WEIGHT * loss - TEMPERATURE_SUSTAINABILITY_WEIGHT * temperature,
        0.5 * (1.0 - pressure) + 0.5 * water,
        0.5 * loss + 0.5 * clamp01(temperature / TEMPERATURE_SCALE),
        1.0 - loss,
    )
}

/// Normalized tension of the consensus map: how far its mean sits between
/// its minimum and maximum value
///
/// Equal (or absent) consensus values would divide by zero; the guard
/// substitutes 0.0 and records a diagnostic.
fn consensus_tension(negotiation: &Negotiation, diagnostics: &mut Vec<Diagnostic>) -> f64 {
    if negotiation.consensus.is_empty() {
        return 0.0;
    }
    let values: Vec<f64> = negotiation.consensus.values().copied().collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    clamp01(safe_ratio(mean - min, max - min, "tension_consenso", diagnostics))
}

/// Disruptive transform: variance pushed outward, risk multiplied
fn disruptive_metrics(base: &Metrics, tension: f64, policy: &PolicyConfig) -> Metrics {
    let swing = policy.modes.oscilacion_disruptiva;
    Metrics::clamped(
        push_from_center(base.sostenibilidad, swing),
        base.equidad - swing / 2.0,
        base.riesgo * policy.modes.multiplicador_riesgo_disruptivo + TENSION_RISK_WEIGHT * tension,
        push_from_center(base.biodiversidad, swing),
    )
}

/// Utopian transform: ceiling-biased cooperative maximum, risk floored
fn utopian_metrics(base: &Metrics, policy: &PolicyConfig) -> Metrics {
    let ceiling = policy.modes.techo_utopico;
    Metrics::clamped(
        base.sostenibilidad.max(ceiling),
        base.equidad.max(ceiling),
        base.riesgo.min(policy.modes.piso_riesgo_utopico),
        base.biodiversidad.max(ceiling),
    )
}

/// Push a value away from the midpoint (raises variance deterministically)
fn push_from_center(value: f64, swing: f64) -> f64 {
    if value >= 0.5 {
        value + swing
    } else {
        value - swing
    }
}

/// Fixed description per mode
fn describe(mode: Mode) -> &'static str {
    match mode {
        Mode::Base => "Escenario tendencial: el consenso negociado se proyecta sin cambios estructurales",
        Mode::Disruptivo => "Escenario disruptivo: cambio radical con varianza amplificada y riesgo multiplicado",
        Mode::Utopico => "Escenario utopico: cooperacion plena, metricas al techo y riesgo minimizado",
        Mode::Hibrido => "Escenario hibrido: promedio entre la trayectoria tendencial y la aspiracion utopica",
    }
}

/// Mode recommendations, extended when the variant's own risk is high
fn recommend(mode: Mode, metrics: &Metrics) -> Vec<String> {
    let mut recommendations: Vec<String> = match mode {
        Mode::Base => vec!["mantener monitoreo de tendencias actuales".to_string()],
        Mode::Disruptivo => vec![
            "preparar amortiguadores sociales ante el cambio radical".to_string(),
            "asegurar reversibilidad de las intervenciones".to_string(),
        ],
        Mode::Utopico => vec!["invertir en cooperacion institucional sostenida".to_string()],
        Mode::Hibrido => vec!["combinar pilotos utopicos con la trayectoria tendencial".to_string()],
    };
    if metrics.riesgo > 0.5 {
        recommendations.push("priorizar mitigacion de riesgo".to_string());
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn negotiation(entries: &[(&str, f64)]) -> Negotiation {
        Negotiation {
            consensus: entries.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            notes: Vec::new(),
        }
    }

    #[test]
    fn default_order_is_governance_order() {
        let mut diagnostics = Vec::new();
        let variants = generate(
            &negotiation(&[("biodiversidad_perdida", 0.2)]),
            &Mode::ALL,
            &PolicyConfig::default(),
            &mut diagnostics,
        );
        let modes: Vec<Mode> = variants.iter().map(|v| v.mode).collect();
        assert_eq!(modes, Mode::ALL.to_vec());
    }

    #[test]
    fn caller_order_preserved_content_unchanged() {
        let policy = PolicyConfig::default();
        let input = negotiation(&[("biodiversidad_perdida", 0.2), ("recursos_hidricos", 0.6)]);
        let mut d1 = Vec::new();
        let mut d2 = Vec::new();

        let forward = generate(&input, &[Mode::Base, Mode::Hibrido], &policy, &mut d1);
        let reversed = generate(&input, &[Mode::Hibrido, Mode::Base], &policy, &mut d2);

        assert_eq!(forward[0], reversed[1]);
        assert_eq!(forward[1], reversed[0]);
    }

    #[test]
    fn empty_consensus_still_generates_bounded_variants() {
        let mut diagnostics = Vec::new();
        let variants = generate(
            &Negotiation::default(),
            &Mode::ALL,
            &PolicyConfig::default(),
            &mut diagnostics,
        );
        assert_eq!(variants.len(), 4);
        for variant in &variants {
            assert!(variant.metrics.is_bounded(), "{}", variant.mode);
        }
    }

    #[test]
    fn equal_consensus_values_guarded_against_zero_range() {
        let mut diagnostics = Vec::new();
        let input = negotiation(&[("recursos_hidricos", 0.4), ("calidad_aire", 0.4)]);
        let variants = generate(&input, &[Mode::Disruptivo], &PolicyConfig::default(), &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert!(variants[0].metrics.is_bounded());
    }

    #[test]
    fn utopian_metrics_hit_ceiling_and_risk_floor() {
        let mut diagnostics = Vec::new();
        let input = negotiation(&[("biodiversidad_perdida", 0.4), ("temperatura_aumento", 2.0)]);
        let variants = generate(&input, &[Mode::Utopico], &PolicyConfig::default(), &mut diagnostics);
        let metrics = variants[0].metrics;
        assert!(metrics.sostenibilidad >= 0.9);
        assert!(metrics.equidad >= 0.9);
        assert!(metrics.biodiversidad >= 0.9);
        assert!(metrics.riesgo <= 0.1);
    }

    #[test]
    fn disruptive_risk_exceeds_base_risk() {
        let policy = PolicyConfig::default();
        let input = negotiation(&[("biodiversidad_perdida", 0.4), ("temperatura_aumento", 2.0)]);
        let mut diagnostics = Vec::new();
        let variants = generate(&input, &[Mode::Base, Mode::Disruptivo], &policy, &mut diagnostics);
        assert!(variants[1].metrics.riesgo > variants[0].metrics.riesgo);
    }

    #[test]
    fn hybrid_is_mean_of_base_and_utopian() {
        let policy = PolicyConfig::default();
        let input = negotiation(&[("biodiversidad_perdida", 0.4)]);
        let mut diagnostics = Vec::new();
        let variants = generate(
            &input,
            &[Mode::Base, Mode::Utopico, Mode::Hibrido],
            &policy,
            &mut diagnostics,
        );
        let expected = variants[0].metrics.blend(&variants[1].metrics);
        assert_eq!(variants[2].metrics, expected);
    }

    #[test]
    fn high_risk_variant_gets_mitigation_recommendation() {
        let policy = PolicyConfig::default();
        let input = negotiation(&[("biodiversidad_perdida", 0.9), ("temperatura_aumento", 4.0)]);
        let mut diagnostics = Vec::new();
        let variants = generate(&input, &[Mode::Disruptivo], &policy, &mut diagnostics);
        assert!(variants[0]
            .recommendations
            .contains(&"priorizar mitigacion de riesgo".to_string()));
    }
}
