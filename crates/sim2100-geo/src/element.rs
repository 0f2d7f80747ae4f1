//! Map element contract consumed by the presentation layer
//!
//! English camelCase wire keys here: this document is consumed by the map
//! client, not by the scenario service. Ids supplied by the caller survive
//! round-trips untouched; elements created without one get a fresh ULID.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::coords::LatLng;

/// Stable element identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Wrap a caller-supplied id
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh ULID-backed id
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// The id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One element on the map, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapElement {
    /// A fixed point of interest
    PointOfInterest {
        /// Stable id
        id: ElementId,
        /// Display name
        name: String,
        /// Position
        location: LatLng,
    },
    /// A mobile agent
    Agent {
        /// Stable id
        id: ElementId,
        /// Display name
        name: String,
        /// Current position
        location: LatLng,
    },
    /// A circular zone
    Zone {
        /// Stable id
        id: ElementId,
        /// Display name
        name: String,
        /// Zone center
        center: LatLng,
        /// Radius in metres
        radius: f64,
    },
    /// A two-endpoint connection
    Connection {
        /// Stable id
        id: ElementId,
        /// Display name
        name: String,
        /// The two endpoints
        points: [LatLng; 2],
    },
}

impl MapElement {
    /// The element's id regardless of kind
    #[must_use]
    pub fn id(&self) -> &ElementId {
        match self {
            MapElement::PointOfInterest { id, .. }
            | MapElement::Agent { id, .. }
            | MapElement::Zone { id, .. }
            | MapElement::Connection { id, .. } => id,
        }
    }

    /// The element's display name regardless of kind
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            MapElement::PointOfInterest { name, .. }
            | MapElement::Agent { name, .. }
            | MapElement::Zone { name, .. }
            | MapElement::Connection { name, .. } => name,
        }
    }
}

/// The document exported to (and re-importable from) the map client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// All elements on the map
    pub elements: Vec<MapElement>,
    /// The viewer's position, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_location: Option<LatLng>,
    /// RFC 3339 export instant
    pub timestamp: String,
}
