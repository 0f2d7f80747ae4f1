//! Dynamics detection: patterns, risks, and inequities from the graph
//!
//! Purely threshold-driven over graph node values; every threshold lives in
//! the policy table. Identical graph and policy produce identical label
//! sequences in identical order.

use serde::{Deserialize, Serialize};
use sim2100_model::graph::{Domain, KnowledgeGraph};
use sim2100_model::policy::PolicyConfig;

use crate::fusion::DENSITY_NODE;

/// Detected spatial-temporal dynamics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dynamics {
    /// Detected patterns
    #[serde(rename = "patrones")]
    pub patterns: Vec<String>,
    /// Identified risks
    #[serde(rename = "riesgos")]
    pub risks: Vec<String>,
    /// Detected inequities
    #[serde(rename = "desigualdades")]
    pub inequities: Vec<String>,
}

impl Dynamics {
    /// Whether nothing was detected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.risks.is_empty() && self.inequities.is_empty()
    }
}

/// Push a label unless already present (sequences stay deduplicated)
fn push_unique(labels: &mut Vec<String>, label: &str) {
    if !labels.iter().any(|l| l == label) {
        labels.push(label.to_string());
    }
}

/// Detect patterns, risks, and inequities from graph node values
#[must_use]
pub fn detect(graph: &KnowledgeGraph, policy: &PolicyConfig) -> Dynamics {
    let t = &policy.thresholds;
    let mut dynamics = Dynamics::default();

    // Patterns
    if graph.number(Domain::Espacial, DENSITY_NODE) > t.densidad_urbanizacion {
        push_unique(&mut dynamics.patterns, "urbanizacion_rapida");
    }
    if graph.number(Domain::Temporal, "tendencia_crecimiento") > t.tendencia_crecimiento {
        push_unique(&mut dynamics.patterns, "crecimiento_acelerado");
    }

    // Risks
    let loss = graph.number(Domain::Ecologico, "biodiversidad_perdida");
    let temperature = graph.number(Domain::Ecologico, "temperatura_aumento");
    if loss > t.perdida_colapso {
        push_unique(&mut dynamics.risks, "colapso_biodiversidad");
    }
    if loss > t.perdida_riesgo_climatico && temperature > t.temperatura_riesgo_climatico {
        push_unique(&mut dynamics.risks, "riesgo_climatico");
    }
    if temperature > t.temperatura_estres {
        push_unique(&mut dynamics.risks, "estres_termico");
    }
    if graph.number(Domain::Ecologico, "recursos_hidricos") < t.recursos_hidricos_minimo {
        push_unique(&mut dynamics.risks, "estres_hidrico");
    }

    // Inequities
    if graph.number(Domain::Humano, "desigualdad_recursos") > t.desigualdad_recursos
        || graph.flag(Domain::Humano, "acceso_desigual")
    {
        push_unique(&mut dynamics.inequities, "desigualdad_acceso");
    }
    if graph.number(Domain::Humano, "participacion_civica") < t.participacion_minima {
        push_unique(&mut dynamics.inequities, "exclusion_participativa");
    }

    tracing::debug!(
        patterns = dynamics.patterns.len(),
        risks = dynamics.risks.len(),
        inequities = dynamics.inequities.len(),
        "dynamics detected"
    );
    dynamics
}
