//! Negotiation simulation: weighted consensus under constraints
//!
//! Every numeric constraint gets a consensus value: the constraint's own
//! value adjusted by a bounded correction from the agents' priority-weighted
//! votes, clipped to the domain-valid range. Constraints whose raw votes
//! spread beyond the divergence threshold are recorded as unresolved
//! trade-off notes. Empty agents, patterns, or constraints are all fine.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sim2100_model::metrics::clamp01;
use sim2100_model::policy::PolicyConfig;

use crate::agents::Agent;

/// Outcome of the negotiation stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Negotiation {
    /// Agreed value per constraint key, in constraint order
    #[serde(rename = "consenso")]
    pub consensus: IndexMap<String, f64>,
    /// Unresolved trade-off notes
    #[serde(rename = "notas")]
    pub notes: Vec<String>,
}

impl Negotiation {
    /// Consensus value for a key, or a caller-chosen default when absent
    #[inline]
    #[must_use]
    pub fn value_or(&self, key: &str, default: f64) -> f64 {
        self.consensus.get(key).copied().unwrap_or(default)
    }
}

/// Run the negotiation over an ordered constraint map
#[must_use]
pub fn negotiate(
    agents: &[Agent],
    patterns: &[String],
    constraints: &IndexMap<String, f64>,
    policy: &PolicyConfig,
) -> Negotiation {
    let mut negotiation = Negotiation::default();
    if !patterns.is_empty() {
        tracing::debug!(patterns = patterns.len(), "negotiating under detected patterns");
    }

    let total_priority: f64 = agents.iter().map(|a| a.priority).sum();

    for (key, &value) in constraints {
        let consensus = if total_priority > 0.0 {
            let net_vote: f64 = agents
                .iter()
                .map(|a| a.priority * a.vote_direction(key))
                .sum();
            // A net vote of exactly zero leaves the constraint unchanged.
            let correction = policy.negotiation.ganancia_voto * net_vote / total_priority;
            clip_to_domain(value + correction, value)
        } else {
            value
        };
        negotiation.consensus.insert(key.clone(), consensus);

        if let Some(note) = divergence_note(agents, key, policy) {
            negotiation.notes.push(note);
        }
    }

    tracing::debug!(
        constraints = negotiation.consensus.len(),
        notes = negotiation.notes.len(),
        "negotiation complete"
    );
    negotiation
}

/// Clip a consensus value to the constraint's valid range
///
/// Ratio-like constraints (original value within [0,1]) stay in [0,1];
/// unbounded magnitudes (e.g. temperature in °C) stay non-negative.
fn clip_to_domain(candidate: f64, original: f64) -> f64 {
    if (0.0..=1.0).contains(&original) {
        clamp01(candidate)
    } else {
        candidate.max(0.0)
    }
}

/// Note a constraint whose raw vote spread exceeds the divergence threshold
fn divergence_note(agents: &[Agent], key: &str, policy: &PolicyConfig) -> Option<String> {
    let most_for = agents
        .iter()
        .max_by(|a, b| a.vote_direction(key).total_cmp(&b.vote_direction(key)))?;
    let most_against = agents
        .iter()
        .min_by(|a, b| a.vote_direction(key).total_cmp(&b.vote_direction(key)))?;

    let spread = most_for.vote_direction(key) - most_against.vote_direction(key);
    if spread > policy.negotiation.umbral_divergencia {
        Some(format!(
            "conflicto en '{key}': {} ({:+.1}) frente a {} ({:+.1})",
            most_for.objective,
            most_for.vote_direction(key),
            most_against.objective,
            most_against.vote_direction(key),
        ))
    } else {
        None
    }
}
