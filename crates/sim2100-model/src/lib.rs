//! SpatialSim 2100 Domain Model
//!
//! Shared value types for the scenario-generation pipeline:
//!
//! - **Inputs**: the four domain inputs plus governance rules, validated once
//!   at the boundary into typed records with documented defaults
//! - **Knowledge graph**: nodes tagged with their source domain, undirected
//!   deduplicated domain-pair edges
//! - **Metrics**: the four scenario metrics bounded to [0,1], the closed
//!   mode and objective sets
//! - **Policy**: the single named constants table (thresholds, weights, mode
//!   multipliers), overridable from TOML
//! - **Errors**: structural validation aborts; degraded inputs become
//!   [`Diagnostic`] warnings carried alongside the result

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod graph;
pub mod input;
pub mod metrics;
pub mod policy;

pub use error::{
    Diagnostic, DiagnosticKind, PolicyError, SimError, SimResult, UnknownObjective, ValidationError,
};
pub use graph::{Domain, Edge, KnowledgeGraph, Node, NodeValue};
pub use input::{
    EcologicalInput, GovernanceRules, HumanInput, ScenarioInputs, SpatialInput, TemporalInput,
};
pub use metrics::{clamp01, safe_ratio, Metric, MetricDeltas, Metrics, Mode, Objective};
pub use policy::{
    DetectionThresholds, ModePolicy, NegotiationPolicy, ObjectiveWeights, PolicyConfig, WeightTable,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the domain model
    pub use crate::error::{Diagnostic, SimError, SimResult, UnknownObjective, ValidationError};
    pub use crate::graph::{Domain, KnowledgeGraph};
    pub use crate::input::{GovernanceRules, ScenarioInputs};
    pub use crate::metrics::{Metric, Metrics, Mode, Objective};
    pub use crate::policy::PolicyConfig;
}
