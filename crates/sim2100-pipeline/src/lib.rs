//! SpatialSim 2100 Scenario Pipeline
//!
//! The seven-stage deterministic pipeline that turns four domain inputs into
//! evaluated future scenarios for the year 2100:
//!
//! 1. **Fusion**: merge inputs into a domain-tagged knowledge graph
//! 2. **Dynamics**: threshold-driven pattern, risk, and inequity detection
//! 3. **Agents**: one negotiating agent per objective in the closed set
//! 4. **Negotiation**: priority-weighted consensus over the constraint map
//! 5. **Variants**: the four named scenario transforms (base, disruptivo,
//!    utopico, hibrido)
//! 6. **Evaluation**: pairwise trade-offs, best-scenario selection with an
//!    explanation, and the ethical audit against governance rules
//! 7. **Visualization**: shaping into the XR export document
//!
//! Every stage is a pure function; the pipeline's only ambient input is the
//! result timestamp, injected through the [`clock::Clock`] seam. All wire
//! names are Spanish per the service contract.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod agents;
pub mod api;
pub mod clock;
pub mod dynamics;
pub mod evaluation;
pub mod fusion;
pub mod negotiation;
pub mod pipeline;
pub mod variants;
pub mod visualization;

pub use agents::{build_agents, build_default_agents, Agent};
pub use api::{handle, handle_batch, health, ApiResponse};
pub use clock::{Clock, SystemClock};
pub use dynamics::{detect, Dynamics};
pub use evaluation::{combined_score, evaluate, EthicalAudit, Evaluation};
pub use fusion::{fuse, DENSITY_NODE};
pub use negotiation::{negotiate, Negotiation};
pub use pipeline::{
    generar_escenario_2100, GovernanceEcho, ScenarioPipeline, ScenarioResult, RESULT_VERSION,
};
pub use variants::{generate, ScenarioVariant};
pub use visualization::{shape, Interactivity, Overlay, VariantDisplay, VisualizationDocument};
