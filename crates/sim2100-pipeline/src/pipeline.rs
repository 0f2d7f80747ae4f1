//! Pipeline orchestration: the seven stages run in fixed order
//!
//! fusion -> dynamics -> agents -> negotiation -> variants -> evaluation ->
//! visualization. Every stage is pure; the only ambient effect is the result
//! timestamp, taken from the injected [`Clock`]. A run either returns a
//! complete result or a structural validation error from the input boundary;
//! degraded inputs never abort, they accumulate diagnostics instead.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sim2100_model::error::{Diagnostic, SimResult};
use sim2100_model::graph::{Domain, KnowledgeGraph};
use sim2100_model::input::{GovernanceRules, ScenarioInputs};
use sim2100_model::metrics::{clamp01, Mode};
use sim2100_model::policy::PolicyConfig;

use crate::agents::build_default_agents;
use crate::clock::{Clock, SystemClock};
use crate::dynamics::{detect, Dynamics};
use crate::evaluation::{evaluate, Evaluation};
use crate::fusion::{fuse, DENSITY_NODE};
use crate::negotiation::negotiate;
use crate::variants::generate;
use crate::visualization::{shape, Overlay, VisualizationDocument};

/// Version tag written into every result document
pub const RESULT_VERSION: &str = "1.0.0";

/// Density (inhabitants per km²) at which demographic pressure saturates
const DENSITY_PRESSURE_SCALE: f64 = 10_000.0;

/// Governance section of the result: the rules as applied plus the verdict
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GovernanceEcho {
    /// The rules the run was evaluated against
    #[serde(rename = "reglas")]
    pub rules: GovernanceRules,
    /// Verdict of the ethical audit
    #[serde(rename = "cumple")]
    pub compliant: bool,
}

/// Complete result of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Result schema version
    #[serde(rename = "version")]
    pub version: String,
    /// RFC 3339 timestamp of the run
    #[serde(rename = "timestamp")]
    pub timestamp: String,
    /// XR export document
    #[serde(rename = "visualizacion")]
    pub visualization: VisualizationDocument,
    /// Trade-off evaluation, selection, and audit
    #[serde(rename = "evaluacion")]
    pub evaluation: Evaluation,
    /// The fused knowledge graph
    #[serde(rename = "grafo_conocimiento")]
    pub graph: KnowledgeGraph,
    /// Detected dynamics
    #[serde(rename = "dinamicas")]
    pub dynamics: Dynamics,
    /// Governance rules and verdict
    #[serde(rename = "gobernanza")]
    pub governance: GovernanceEcho,
    /// Degraded-input warnings accumulated across the run
    #[serde(rename = "diagnosticos")]
    pub diagnostics: Vec<Diagnostic>,
}

/// The scenario-generation pipeline
///
/// Holds the policy table and the clock; everything else is per-run state.
#[derive(Debug)]
pub struct ScenarioPipeline {
    policy: PolicyConfig,
    clock: Box<dyn Clock>,
}

impl Default for ScenarioPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioPipeline {
    /// Pipeline with the documented default policy and the system clock
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: PolicyConfig::default(),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the policy table
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the clock
    #[inline]
    #[must_use]
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The active policy table
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Run the pipeline on a raw JSON request body
    ///
    /// Fails only on structural validation errors; degraded field values
    /// surface as diagnostics in the result.
    pub fn run(&self, body: &Value) -> SimResult<ScenarioResult> {
        let (inputs, diagnostics) = ScenarioInputs::from_value(body)?;
        Ok(self.run_with(&inputs, diagnostics))
    }

    /// Run the pipeline on already-validated inputs, seeding the diagnostics
    /// accumulated at the boundary
    #[must_use]
    pub fn run_with(&self, inputs: &ScenarioInputs, mut diagnostics: Vec<Diagnostic>) -> ScenarioResult {
        let span = tracing::info_span!("scenario_run");
        let _guard = span.enter();

        let graph = fuse(inputs, &mut diagnostics);
        let dynamics = detect(&graph, &self.policy);
        let agents = build_default_agents(&self.policy);
        let constraints = assemble_constraints(&graph);
        let negotiation = negotiate(&agents, &dynamics.patterns, &constraints, &self.policy);
        let variants = generate(&negotiation, &Mode::ALL, &self.policy, &mut diagnostics);
        let evaluation = evaluate(&variants, &inputs.rules, true, true, &self.policy);
        let visualization = shape(&variants, &Overlay::ALL);

        let compliant = evaluation.audit.as_ref().map_or(true, |a| a.compliant);
        tracing::info!(
            variants = variants.len(),
            diagnostics = diagnostics.len(),
            compliant,
            "scenario run complete"
        );

        ScenarioResult {
            version: RESULT_VERSION.to_string(),
            timestamp: self.clock.now().to_rfc3339(),
            visualization,
            evaluation,
            graph,
            dynamics,
            governance: GovernanceEcho {
                rules: inputs.rules.clone(),
                compliant,
            },
            diagnostics,
        }
    }

    /// Run the pipeline over a batch of independent request bodies
    ///
    /// Items are fully isolated: one structural failure never affects the
    /// others' results or diagnostics.
    #[must_use]
    pub fn run_batch(&self, bodies: &[Value]) -> Vec<SimResult<ScenarioResult>> {
        bodies.iter().map(|body| self.run(body)).collect()
    }
}

/// Constraint map handed to the negotiation, in documented order
///
/// Demographic pressure is derived from the graph's density node, saturating
/// at [`DENSITY_PRESSURE_SCALE`] inhabitants per km².
fn assemble_constraints(graph: &KnowledgeGraph) -> IndexMap<String, f64> {
    let mut constraints = IndexMap::new();
    for key in [
        "biodiversidad_perdida",
        "temperatura_aumento",
        "recursos_hidricos",
        "calidad_aire",
    ] {
        constraints.insert(key.to_string(), graph.number(Domain::Ecologico, key));
    }
    let density = graph.number(Domain::Espacial, DENSITY_NODE);
    constraints.insert(
        "presion_demografica".to_string(),
        clamp01(density / DENSITY_PRESSURE_SCALE),
    );
    constraints
}

/// Run one scenario with the default pipeline
///
/// Convenience entry point matching the service contract.
pub fn generar_escenario_2100(body: &Value) -> SimResult<ScenarioResult> {
    ScenarioPipeline::new().run(body)
}
