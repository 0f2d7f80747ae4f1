//! Error types for the SpatialSim domain model
//!
//! Provides comprehensive error handling for:
//! - Structural input validation (boundary errors, abort the run)
//! - Agent construction (unknown objective names)
//! - Policy table loading
//!
//! Degraded-input conditions are deliberately *not* errors: they resolve to
//! documented defaults and surface as [`Diagnostic`] entries in the result.

use serde::{Deserialize, Serialize};

/// Structural validation errors
///
/// These abort the whole run before the pipeline starts.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A domain input that must be a JSON mapping is something else
    #[error("field '{field}' must be a mapping, got {actual}")]
    NotAMapping {
        /// Offending top-level field
        field: String,
        /// JSON type actually supplied
        actual: String,
    },

    /// Required top-level field missing from the request document
    #[error("missing required field: '{0}'")]
    MissingField(String),

    /// Request body is not a JSON object at all
    #[error("request body must be a JSON object")]
    NotAnObject,
}

impl ValidationError {
    /// Create a not-a-mapping error for a named field
    #[inline]
    #[must_use]
    pub fn not_a_mapping(field: impl Into<String>, value: &serde_json::Value) -> Self {
        Self::NotAMapping {
            field: field.into(),
            actual: json_type_name(value).to_string(),
        }
    }
}

/// Agent name outside the closed objective set
///
/// Construction rejects unknown names rather than fabricating a default.
#[derive(Debug, thiserror::Error)]
#[error("unknown objective: '{name}' (expected one of: eficiencia, equidad, biodiversidad, memoria)")]
pub struct UnknownObjective {
    /// The rejected name
    pub name: String,
}

impl UnknownObjective {
    /// Create error for a rejected name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Errors loading a policy override table
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// IO error reading the policy file
    #[error("io error reading policy file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML
    #[error("invalid policy table: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level simulation error
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Structural input validation failed
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Agent construction rejected an objective name
    #[error("agent construction failed: {0}")]
    UnknownObjective(#[from] UnknownObjective),

    /// Policy table could not be loaded
    #[error("policy error: {0}")]
    Policy(#[from] PolicyError),
}

impl SimError {
    /// Whether this error is the caller's fault (maps to HTTP 400)
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnknownObjective(_))
    }
}

/// Result alias for pipeline operations
pub type SimResult<T> = Result<T, SimError>;

/// Kind of degraded-input condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Non-numeric value where a number was expected; default substituted
    NonNumeric,
    /// Zero denominator during normalization; safe default substituted
    ZeroDenominator,
    /// Documented optional field absent; default substituted
    MissingOptional,
}

/// Non-fatal degraded-input warning, collected alongside the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Condition classification
    #[serde(rename = "tipo")]
    pub kind: DiagnosticKind,
    /// Field or derivation the condition occurred in
    #[serde(rename = "campo")]
    pub field: String,
    /// Human-readable description
    #[serde(rename = "mensaje")]
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic entry
    #[inline]
    #[must_use]
    pub fn new(kind: DiagnosticKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Non-numeric value coerced to a default
    #[must_use]
    pub fn non_numeric(field: impl Into<String>, default: f64) -> Self {
        let field = field.into();
        let message = format!("valor no numerico en '{field}', se usa {default}");
        Self::new(DiagnosticKind::NonNumeric, field, message)
    }

    /// Zero denominator substituted with a safe default
    #[must_use]
    pub fn zero_denominator(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("denominador cero al derivar '{field}', se usa 0.0");
        Self::new(DiagnosticKind::ZeroDenominator, field, message)
    }
}

/// Name of a JSON value's type, for error messages
#[must_use]
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
