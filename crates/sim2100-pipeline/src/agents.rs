//! Multi-objective agent construction
//!
//! Agents are built fresh per run from a requested name list. The objective
//! set is closed: unknown names fail with [`UnknownObjective`] rather than
//! fabricating a default. Each agent scores candidate metrics through the
//! fixed linear weighting in the policy table; the same weights are reused
//! by negotiation and evaluation.

use sim2100_model::error::UnknownObjective;
use sim2100_model::metrics::{Metrics, Objective};
use sim2100_model::policy::{ObjectiveWeights, PolicyConfig};

/// Substrings that mark a constraint key as a pressure (something agents
/// want reduced) rather than a capacity
const PRESSURE_MARKERS: [&str; 5] = ["perdida", "aumento", "desigualdad", "riesgo", "presion"];

/// A negotiating agent with one fixed objective
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// The agent's objective
    pub objective: Objective,
    /// Priority weight used in consensus and combined scoring
    pub priority: f64,
    weights: ObjectiveWeights,
}

impl Agent {
    /// Build an agent for an objective from the policy weight table
    #[must_use]
    pub fn new(objective: Objective, policy: &PolicyConfig) -> Self {
        let weights = *policy.weights.for_objective(objective);
        Self {
            objective,
            priority: weights.prioridad,
            weights,
        }
    }

    /// Utility of a candidate metrics block, in [0,1]
    #[inline]
    #[must_use]
    pub fn score(&self, metrics: &Metrics) -> f64 {
        self.weights.score(metrics)
    }

    /// Preferred direction for a constraint key
    ///
    /// Direction table: pressure keys (name contains a marker like "perdida"
    /// or "aumento") are voted down by the equity and biodiversity agents
    /// (-1.0), softly down by memory (-0.5), and tolerated by efficiency
    /// (+0.5, accepted as the cost of throughput). Capacity keys are voted up
    /// by everyone (memory at half strength, preferring small change).
    #[must_use]
    pub fn vote_direction(&self, key: &str) -> f64 {
        let is_pressure = PRESSURE_MARKERS.iter().any(|marker| key.contains(marker));
        match (self.objective, is_pressure) {
            (Objective::Eficiencia, true) => 0.5,
            (Objective::Eficiencia, false) => 1.0,
            (Objective::Equidad | Objective::Biodiversidad, true) => -1.0,
            (Objective::Equidad | Objective::Biodiversidad, false) => 1.0,
            (Objective::Memoria, true) => -0.5,
            (Objective::Memoria, false) => 0.5,
        }
    }
}

/// Construct agents for an ordered list of objective names
///
/// An empty list yields an empty roster without error; any unknown name
/// aborts construction.
pub fn build_agents(names: &[&str], policy: &PolicyConfig) -> Result<Vec<Agent>, UnknownObjective> {
    names
        .iter()
        .map(|name| {
            let objective: Objective = name.parse()?;
            Ok(Agent::new(objective, policy))
        })
        .collect()
}

/// The default roster: one agent per objective, in closed-set order
#[must_use]
pub fn build_default_agents(policy: &PolicyConfig) -> Vec<Agent> {
    Objective::ALL
        .iter()
        .map(|objective| Agent::new(*objective, policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_order() {
        let agents = build_default_agents(&PolicyConfig::default());
        let objectives: Vec<Objective> = agents.iter().map(|a| a.objective).collect();
        assert_eq!(objectives, Objective::ALL.to_vec());
    }

    #[test]
    fn unknown_name_rejected() {
        let err = build_agents(&["eficiencia", "ilegal"], &PolicyConfig::default()).unwrap_err();
        assert_eq!(err.name, "ilegal");
    }

    #[test]
    fn empty_list_is_empty_roster() {
        let agents = build_agents(&[], &PolicyConfig::default()).unwrap();
        assert!(agents.is_empty());
    }

    #[test]
    fn equity_agent_scores_equity_only() {
        let policy = PolicyConfig::default();
        let agent = Agent::new(Objective::Equidad, &policy);
        let high = Metrics::clamped(0.1, 0.9, 0.9, 0.1);
        let low = Metrics::clamped(0.9, 0.1, 0.1, 0.9);
        assert_eq!(agent.score(&high), 0.9);
        assert_eq!(agent.score(&low), 0.1);
    }

    #[test]
    fn vote_directions_follow_the_table() {
        let policy = PolicyConfig::default();
        let efficiency = Agent::new(Objective::Eficiencia, &policy);
        let biodiversity = Agent::new(Objective::Biodiversidad, &policy);
        let memory = Agent::new(Objective::Memoria, &policy);

        assert_eq!(efficiency.vote_direction("biodiversidad_perdida"), 0.5);
        assert_eq!(biodiversity.vote_direction("biodiversidad_perdida"), -1.0);
        assert_eq!(memory.vote_direction("temperatura_aumento"), -0.5);
        assert_eq!(biodiversity.vote_direction("recursos_hidricos"), 1.0);
        assert_eq!(memory.vote_direction("calidad_aire"), 0.5);
    }

    #[test]
    fn scores_are_bounded() {
        let policy = PolicyConfig::default();
        let metrics = Metrics::clamped(1.0, 1.0, 0.0, 1.0);
        for agent in build_default_agents(&policy) {
            let score = agent.score(&metrics);
            assert!((0.0..=1.0).contains(&score));
        }
    }
}
