//! Scenario metrics, variant modes, and agent objectives
//!
//! The four scenario metrics (sostenibilidad, equidad, riesgo, biodiversidad)
//! are always held in [0,1]. Modes and objectives are closed sets: modes come
//! from the governance order base → disruptivo → utopico → hibrido, and agent
//! objectives outside the closed set are rejected at construction.

use crate::error::{Diagnostic, UnknownObjective};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Clamp a value to the unit interval
#[inline]
#[must_use]
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Divide, substituting 0.0 on a zero (or non-finite) denominator
///
/// Guards the normalizations against zero population or zero area; records a
/// diagnostic instead of raising a floating-point error.
#[must_use]
pub fn safe_ratio(numerator: f64, denominator: f64, field: &str, diagnostics: &mut Vec<Diagnostic>) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        diagnostics.push(Diagnostic::zero_denominator(field));
        return 0.0;
    }
    numerator / denominator
}

/// One of the four scenario metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Long-term sustainability of the configuration
    Sostenibilidad,
    /// Distributive fairness of access and resources
    Equidad,
    /// Aggregate climate/social risk (lower is better)
    Riesgo,
    /// Ecosystem health
    Biodiversidad,
}

impl Metric {
    /// All metrics, in wire order
    pub const ALL: [Metric; 4] = [
        Metric::Sostenibilidad,
        Metric::Equidad,
        Metric::Riesgo,
        Metric::Biodiversidad,
    ];

    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Sostenibilidad => "sostenibilidad",
            Metric::Equidad => "equidad",
            Metric::Riesgo => "riesgo",
            Metric::Biodiversidad => "biodiversidad",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The metrics block of a scenario variant, each value in [0,1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Sustainability score
    pub sostenibilidad: f64,
    /// Equity score
    pub equidad: f64,
    /// Risk score (lower is better)
    pub riesgo: f64,
    /// Biodiversity score
    pub biodiversidad: f64,
}

impl Metrics {
    /// Create metrics, clamping every value to [0,1]
    #[inline]
    #[must_use]
    pub fn clamped(sostenibilidad: f64, equidad: f64, riesgo: f64, biodiversidad: f64) -> Self {
        Self {
            sostenibilidad: clamp01(sostenibilidad),
            equidad: clamp01(equidad),
            riesgo: clamp01(riesgo),
            biodiversidad: clamp01(biodiversidad),
        }
    }

    /// Value of a single metric
    #[inline]
    #[must_use]
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Sostenibilidad => self.sostenibilidad,
            Metric::Equidad => self.equidad,
            Metric::Riesgo => self.riesgo,
            Metric::Biodiversidad => self.biodiversidad,
        }
    }

    /// Per-metric mean of two metric blocks
    #[must_use]
    pub fn blend(&self, other: &Metrics) -> Self {
        Self::clamped(
            (self.sostenibilidad + other.sostenibilidad) / 2.0,
            (self.equidad + other.equidad) / 2.0,
            (self.riesgo + other.riesgo) / 2.0,
            (self.biodiversidad + other.biodiversidad) / 2.0,
        )
    }

    /// Whether every value lies in [0,1]
    #[inline]
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        Metric::ALL.iter().all(|m| (0.0..=1.0).contains(&self.get(*m)))
    }
}

/// Per-metric signed deltas between two variants (not clamped)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDeltas {
    /// Delta on sustainability
    pub sostenibilidad: f64,
    /// Delta on equity
    pub equidad: f64,
    /// Delta on risk
    pub riesgo: f64,
    /// Delta on biodiversity
    pub biodiversidad: f64,
}

impl MetricDeltas {
    /// Signed difference `a - b`, per metric
    #[must_use]
    pub fn between(a: &Metrics, b: &Metrics) -> Self {
        Self {
            sostenibilidad: a.sostenibilidad - b.sostenibilidad,
            equidad: a.equidad - b.equidad,
            riesgo: a.riesgo - b.riesgo,
            biodiversidad: a.biodiversidad - b.biodiversidad,
        }
    }
}

/// Scenario variant mode (closed, order-preserving set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Consensus values passed through unchanged
    Base,
    /// Radical change: pushed variance, multiplied risk
    Disruptivo,
    /// Ceiling-biased cooperative maximum, minimized risk
    Utopico,
    /// Arithmetic blend of base and utopico
    Hibrido,
}

impl Mode {
    /// Default generation order (governance doc order)
    pub const ALL: [Mode; 4] = [Mode::Base, Mode::Disruptivo, Mode::Utopico, Mode::Hibrido];

    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Base => "base",
            Mode::Disruptivo => "disruptivo",
            Mode::Utopico => "utopico",
            Mode::Hibrido => "hibrido",
        }
    }

    /// Position in the default generation order (tie-break key)
    #[inline]
    #[must_use]
    pub fn rank(&self) -> usize {
        Mode::ALL.iter().position(|m| m == self).unwrap_or(usize::MAX)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agent objective (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// Throughput and resource efficiency
    Eficiencia,
    /// Distributive fairness
    Equidad,
    /// Ecosystem preservation
    Biodiversidad,
    /// Continuity with the existing place (memory)
    Memoria,
}

impl Objective {
    /// All objectives, the default agent roster
    pub const ALL: [Objective; 4] = [
        Objective::Eficiencia,
        Objective::Equidad,
        Objective::Biodiversidad,
        Objective::Memoria,
    ];

    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Eficiencia => "eficiencia",
            Objective::Equidad => "equidad",
            Objective::Biodiversidad => "biodiversidad",
            Objective::Memoria => "memoria",
        }
    }
}

impl FromStr for Objective {
    type Err = UnknownObjective;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eficiencia" => Ok(Objective::Eficiencia),
            "equidad" => Ok(Objective::Equidad),
            "biodiversidad" => Ok(Objective::Biodiversidad),
            "memoria" => Ok(Objective::Memoria),
            other => Err(UnknownObjective::new(other)),
        }
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
