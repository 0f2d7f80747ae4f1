//! The policy constants table
//!
//! Every heuristic constant of the pipeline lives here: detection thresholds,
//! per-objective agent weights, negotiation parameters, and the mode
//! transform multipliers. The defaults are the documented reference values;
//! a caller may override them from a TOML table because the exact weights are
//! configurable policy, not physical law.

use crate::error::PolicyError;
use crate::metrics::{clamp01, Metrics, Objective};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds for dynamics detection
///
/// A graph node value crossing a threshold emits the corresponding pattern,
/// risk, or inequity label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionThresholds {
    /// Population density (people/km²) above which "urbanizacion_rapida" fires
    pub densidad_urbanizacion: f64,
    /// Annual growth trend above which "crecimiento_acelerado" fires
    pub tendencia_crecimiento: f64,
    /// Biodiversity loss above which "colapso_biodiversidad" fires
    pub perdida_colapso: f64,
    /// Biodiversity loss above which climate risk is considered
    pub perdida_riesgo_climatico: f64,
    /// Temperature rise (°C) above which climate risk is considered
    pub temperatura_riesgo_climatico: f64,
    /// Temperature rise (°C) above which "estres_termico" fires
    pub temperatura_estres: f64,
    /// Water availability below which "estres_hidrico" fires
    pub recursos_hidricos_minimo: f64,
    /// Resource inequality above which "desigualdad_acceso" fires
    pub desigualdad_recursos: f64,
    /// Civic participation below which "exclusion_participativa" fires
    pub participacion_minima: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            densidad_urbanizacion: 1000.0,
            tendencia_crecimiento: 0.02,
            perdida_colapso: 0.5,
            perdida_riesgo_climatico: 0.2,
            temperatura_riesgo_climatico: 1.5,
            temperatura_estres: 2.0,
            recursos_hidricos_minimo: 0.3,
            desigualdad_recursos: 0.6,
            participacion_minima: 0.3,
        }
    }
}

/// Linear weights one objective places on the four metrics
///
/// `riesgo_inverso` weights `1 - riesgo`, so every term rewards values in
/// [0,1] and the normalized score stays in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveWeights {
    /// Weight on sostenibilidad
    pub sostenibilidad: f64,
    /// Weight on equidad
    pub equidad: f64,
    /// Weight on `1 - riesgo`
    pub riesgo_inverso: f64,
    /// Weight on biodiversidad
    pub biodiversidad: f64,
    /// Agent priority in negotiation and combined scoring
    pub prioridad: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            sostenibilidad: 0.0,
            equidad: 0.0,
            riesgo_inverso: 0.0,
            biodiversidad: 0.0,
            prioridad: 1.0,
        }
    }
}

impl ObjectiveWeights {
    /// Weighted utility of a metrics block, normalized to [0,1]
    ///
    /// A degenerate all-zero weight row scores 0.0 rather than dividing by
    /// zero.
    #[must_use]
    pub fn score(&self, metrics: &Metrics) -> f64 {
        let total = self.sostenibilidad + self.equidad + self.riesgo_inverso + self.biodiversidad;
        if total == 0.0 {
            return 0.0;
        }
        let weighted = self.sostenibilidad * metrics.sostenibilidad
            + self.equidad * metrics.equidad
            + self.riesgo_inverso * (1.0 - metrics.riesgo)
            + self.biodiversidad * metrics.biodiversidad;
        clamp01(weighted / total)
    }
}

/// Weight table for the closed objective set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    /// Efficiency agent: sustainability plus inverse risk
    pub eficiencia: ObjectiveWeights,
    /// Equity agent: equity metric only
    pub equidad: ObjectiveWeights,
    /// Biodiversity agent: biodiversity metric only
    pub biodiversidad: ObjectiveWeights,
    /// Memory agent: continuity proxy (stability of sustainability and risk)
    pub memoria: ObjectiveWeights,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            eficiencia: ObjectiveWeights {
                sostenibilidad: 0.6,
                riesgo_inverso: 0.4,
                prioridad: 1.0,
                ..ObjectiveWeights::default()
            },
            equidad: ObjectiveWeights {
                equidad: 1.0,
                prioridad: 1.0,
                ..ObjectiveWeights::default()
            },
            biodiversidad: ObjectiveWeights {
                biodiversidad: 1.0,
                prioridad: 0.9,
                ..ObjectiveWeights::default()
            },
            memoria: ObjectiveWeights {
                sostenibilidad: 0.5,
                riesgo_inverso: 0.5,
                prioridad: 0.7,
                ..ObjectiveWeights::default()
            },
        }
    }
}

impl WeightTable {
    /// Weight row for an objective
    #[inline]
    #[must_use]
    pub fn for_objective(&self, objective: Objective) -> &ObjectiveWeights {
        match objective {
            Objective::Eficiencia => &self.eficiencia,
            Objective::Equidad => &self.equidad,
            Objective::Biodiversidad => &self.biodiversidad,
            Objective::Memoria => &self.memoria,
        }
    }
}

/// Negotiation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationPolicy {
    /// Magnitude of the bounded consensus correction per unit net vote
    pub ganancia_voto: f64,
    /// Vote spread beyond which a constraint is noted as an unresolved
    /// trade-off
    pub umbral_divergencia: f64,
}

impl Default for NegotiationPolicy {
    fn default() -> Self {
        Self {
            ganancia_voto: 0.2,
            umbral_divergencia: 0.35,
        }
    }
}

/// Mode transform multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModePolicy {
    /// Risk multiplier of the disruptive mode
    pub multiplicador_riesgo_disruptivo: f64,
    /// Variance push applied by the disruptive mode
    pub oscilacion_disruptiva: f64,
    /// Cooperative ceiling the utopian mode raises metrics to
    pub techo_utopico: f64,
    /// Risk floor the utopian mode lowers risk to
    pub piso_riesgo_utopico: f64,
}

impl Default for ModePolicy {
    fn default() -> Self {
        Self {
            multiplicador_riesgo_disruptivo: 1.5,
            oscilacion_disruptiva: 0.25,
            techo_utopico: 0.9,
            piso_riesgo_utopico: 0.1,
        }
    }
}

/// The complete policy table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Dynamics detection thresholds
    #[serde(rename = "umbrales")]
    pub thresholds: DetectionThresholds,
    /// Agent objective weights
    #[serde(rename = "pesos")]
    pub weights: WeightTable,
    /// Negotiation parameters
    #[serde(rename = "negociacion")]
    pub negotiation: NegotiationPolicy,
    /// Mode transform multipliers
    #[serde(rename = "modos")]
    pub modes: ModePolicy,
}

impl PolicyConfig {
    /// The documented reference policy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML override table
    ///
    /// Absent sections and fields keep their defaults. Ratio-valued fields
    /// are clamped into their valid range on load.
    pub fn from_toml_str(raw: &str) -> Result<Self, PolicyError> {
        let mut policy: Self = toml::from_str(raw)?;
        policy.sanitize();
        Ok(policy)
    }

    /// Load an override table from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Clamp ratio-valued parameters into their valid ranges
    fn sanitize(&mut self) {
        self.negotiation.ganancia_voto = clamp01(self.negotiation.ganancia_voto);
        self.negotiation.umbral_divergencia = clamp01(self.negotiation.umbral_divergencia);
        self.modes.oscilacion_disruptiva = clamp01(self.modes.oscilacion_disruptiva);
        self.modes.techo_utopico = clamp01(self.modes.techo_utopico);
        self.modes.piso_riesgo_utopico = clamp01(self.modes.piso_riesgo_utopico);
        self.modes.multiplicador_riesgo_disruptivo = self.modes.multiplicador_riesgo_disruptivo.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weight_table() {
        let table = WeightTable::default();
        assert_eq!(table.eficiencia.sostenibilidad, 0.6);
        assert_eq!(table.equidad.equidad, 1.0);
        assert_eq!(table.memoria.prioridad, 0.7);
    }

    #[test]
    fn objective_score_is_bounded() {
        let metrics = Metrics::clamped(0.9, 0.8, 0.2, 0.7);
        let table = WeightTable::default();
        for objective in Objective::ALL {
            let score = table.for_objective(objective).score(&metrics);
            assert!((0.0..=1.0).contains(&score), "{objective}: {score}");
        }
    }

    #[test]
    fn eficiencia_rewards_low_risk() {
        let table = WeightTable::default();
        let safe = Metrics::clamped(0.8, 0.5, 0.1, 0.5);
        let risky = Metrics::clamped(0.8, 0.5, 0.9, 0.5);
        assert!(table.eficiencia.score(&safe) > table.eficiencia.score(&risky));
    }

    #[test]
    fn zero_weight_row_scores_zero() {
        let weights = ObjectiveWeights::default();
        assert_eq!(weights.score(&Metrics::clamped(1.0, 1.0, 0.0, 1.0)), 0.0);
    }

    #[test]
    fn partial_toml_override() {
        let policy = PolicyConfig::from_toml_str(
            r#"
            [negociacion]
            ganancia_voto = 0.1

            [pesos.equidad]
            prioridad = 2.0
            equidad = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(policy.negotiation.ganancia_voto, 0.1);
        assert_eq!(policy.weights.equidad.prioridad, 2.0);
        // Untouched sections keep their defaults
        assert_eq!(policy.thresholds, DetectionThresholds::default());
        assert_eq!(policy.modes, ModePolicy::default());
    }

    #[test]
    fn sanitize_clamps_ratios() {
        let policy = PolicyConfig::from_toml_str(
            r#"
            [modos]
            techo_utopico = 1.4
            piso_riesgo_utopico = -0.2
            "#,
        )
        .unwrap();
        assert_eq!(policy.modes.techo_utopico, 1.0);
        assert_eq!(policy.modes.piso_riesgo_utopico, 0.0);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(PolicyConfig::from_toml_str("pesos = 3").is_err());
    }

    #[test]
    fn load_reads_policy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.toml");
        std::fs::write(&path, "[negociacion]\nganancia_voto = 0.05\n").unwrap();

        let policy = PolicyConfig::load(&path).unwrap();
        assert_eq!(policy.negotiation.ganancia_voto, 0.05);
        assert!(PolicyConfig::load(dir.path().join("ausente.toml")).is_err());
    }
}
