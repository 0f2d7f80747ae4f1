//! XR export shaping: the immersive-visualization document
//!
//! A pure reshaping of already-computed variants into the fixed export
//! contract: a typed document carrying the scenario list, the requested
//! semantic overlay layers keyed by overlay then mode, and the static
//! interactivity block. Nothing here recomputes metrics.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sim2100_model::metrics::{Metric, Metrics, Mode};

use crate::variants::ScenarioVariant;

/// Document type tag for XR consumers
pub const DOCUMENT_TYPE: &str = "escenarios_xr";

/// Semantic overlay layers exposed to the XR client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    /// Distributional-justice layer, fed by the equity metric
    #[serde(rename = "justicia")]
    Justice,
    /// Risk layer, fed by the risk metric
    #[serde(rename = "riesgo")]
    Risk,
    /// Access layer, fed by the sustainability metric
    #[serde(rename = "acceso")]
    Access,
    /// Ecological-memory layer, fed by the biodiversity metric
    #[serde(rename = "memoria")]
    Memory,
}

impl Overlay {
    /// All overlays in export order
    pub const ALL: [Overlay; 4] = [Overlay::Justice, Overlay::Risk, Overlay::Access, Overlay::Memory];

    /// Wire name of the overlay
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Overlay::Justice => "justicia",
            Overlay::Risk => "riesgo",
            Overlay::Access => "acceso",
            Overlay::Memory => "memoria",
        }
    }

    /// Metric feeding this overlay
    #[must_use]
    pub fn source_metric(self) -> Metric {
        match self {
            Overlay::Justice => Metric::Equidad,
            Overlay::Risk => Metric::Riesgo,
            Overlay::Access => Metric::Sostenibilidad,
            Overlay::Memory => Metric::Biodiversidad,
        }
    }
}

impl std::fmt::Display for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scenario as shown to the XR client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDisplay {
    /// Mode of the displayed variant
    #[serde(rename = "modo")]
    pub mode: Mode,
    /// Human-readable description
    #[serde(rename = "descripcion")]
    pub description: String,
    /// Metrics block driving the overlays
    #[serde(rename = "metricas")]
    pub metrics: Metrics,
}

/// Interactivity capabilities advertised to the XR client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interactivity {
    /// Free rotation of the scene
    #[serde(rename = "rotacion")]
    pub rotation: bool,
    /// Zooming in and out
    #[serde(rename = "zoom")]
    pub zoom: bool,
    /// Per-element selection
    #[serde(rename = "seleccion")]
    pub selection: bool,
    /// Modes navigable along the temporal axis, in governance order
    #[serde(rename = "navegacion_temporal")]
    pub temporal_navigation: Vec<String>,
}

static DEFAULT_INTERACTIVITY: Lazy<Interactivity> = Lazy::new(|| Interactivity {
    rotation: true,
    zoom: true,
    selection: true,
    temporal_navigation: Mode::ALL.iter().map(|m| m.as_str().to_string()).collect(),
});

impl Default for Interactivity {
    fn default() -> Self {
        DEFAULT_INTERACTIVITY.clone()
    }
}

/// The complete XR export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationDocument {
    /// Fixed document type tag
    #[serde(rename = "tipo")]
    pub doc_type: String,
    /// Scenarios in generation order
    #[serde(rename = "escenarios")]
    pub variants: Vec<VariantDisplay>,
    /// Overlay layers: overlay name to per-mode value
    #[serde(rename = "capas_semanticas")]
    pub semantic_layers: IndexMap<String, IndexMap<String, f64>>,
    /// Advertised interactivity
    #[serde(rename = "interactividad")]
    pub interactivity: Interactivity,
}

/// Shape generated variants into the XR export document
///
/// `overlays` selects the semantic layers and their order; duplicates keep
/// the first occurrence. The full service document uses [`Overlay::ALL`].
#[must_use]
pub fn shape(variants: &[ScenarioVariant], overlays: &[Overlay]) -> VisualizationDocument {
    let displays = variants
        .iter()
        .map(|variant| VariantDisplay {
            mode: variant.mode,
            description: variant.description.clone(),
            metrics: variant.metrics,
        })
        .collect();

    let mut semantic_layers = IndexMap::new();
    for overlay in overlays.iter().copied() {
        let metric = overlay.source_metric();
        let layer: IndexMap<String, f64> = variants
            .iter()
            .map(|variant| (variant.mode.as_str().to_string(), variant.metrics.get(metric)))
            .collect();
        semantic_layers.insert(overlay.as_str().to_string(), layer);
    }

    tracing::debug!(scenarios = variants.len(), "visualization document shaped");
    VisualizationDocument {
        doc_type: DOCUMENT_TYPE.to_string(),
        variants: displays,
        semantic_layers,
        interactivity: Interactivity::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::negotiation::Negotiation;
    use crate::variants::generate;
    use sim2100_model::policy::PolicyConfig;

    fn sample_variants() -> Vec<ScenarioVariant> {
        let mut negotiation = Negotiation::default();
        negotiation.consensus.insert("biodiversidad_perdida".to_string(), 0.3);
        negotiation.consensus.insert("temperatura_aumento".to_string(), 1.8);
        let mut diagnostics = Vec::new();
        generate(&negotiation, &Mode::ALL, &PolicyConfig::default(), &mut diagnostics)
    }

    #[test]
    fn document_carries_type_tag_and_all_variants() {
        let document = shape(&sample_variants(), &Overlay::ALL);
        assert_eq!(document.doc_type, DOCUMENT_TYPE);
        assert_eq!(document.variants.len(), 4);
        assert_eq!(document.variants[0].mode, Mode::Base);
    }

    #[test]
    fn four_overlays_keyed_by_mode() {
        let document = shape(&sample_variants(), &Overlay::ALL);
        assert_eq!(document.semantic_layers.len(), 4);
        let keys: Vec<&String> = document.semantic_layers.keys().collect();
        assert_eq!(keys, ["justicia", "riesgo", "acceso", "memoria"]);
        for layer in document.semantic_layers.values() {
            assert_eq!(layer.len(), 4);
            assert!(layer.contains_key("utopico"));
        }
    }

    #[test]
    fn overlay_values_mirror_source_metrics() {
        let variants = sample_variants();
        let document = shape(&variants, &Overlay::ALL);
        let risk_layer = &document.semantic_layers["riesgo"];
        for variant in &variants {
            assert_eq!(risk_layer[variant.mode.as_str()], variant.metrics.riesgo);
        }
        let access_layer = &document.semantic_layers["acceso"];
        assert_eq!(access_layer["base"], variants[0].metrics.sostenibilidad);
    }

    #[test]
    fn overlay_subset_kept_in_caller_order() {
        let variants = sample_variants();
        let requested = [Overlay::Memory, Overlay::Justice];
        let document = shape(&variants, &requested);

        let keys: Vec<&String> = document.semantic_layers.keys().collect();
        assert_eq!(keys, ["memoria", "justicia"]);
        assert_eq!(
            document.semantic_layers["memoria"]["base"],
            variants[0].metrics.biodiversidad
        );
        // The scenario list is overlay-independent.
        assert_eq!(document.variants.len(), 4);
    }

    #[test]
    fn interactivity_advertises_temporal_navigation() {
        let document = shape(&[], &Overlay::ALL);
        assert!(document.interactivity.rotation);
        assert!(document.interactivity.zoom);
        assert!(document.interactivity.selection);
        assert_eq!(
            document.interactivity.temporal_navigation,
            ["base", "disruptivo", "utopico", "hibrido"]
        );
    }

    #[test]
    fn empty_variants_still_produce_complete_layer_set() {
        let document = shape(&[], &Overlay::ALL);
        assert_eq!(document.semantic_layers.len(), 4);
        for layer in document.semantic_layers.values() {
            assert!(layer.is_empty());
        }
    }

    #[test]
    fn serialized_wire_names_are_spanish() {
        let document = shape(&sample_variants(), &Overlay::ALL);
        let json = serde_json::to_value(&document).unwrap();
        assert!(json.get("tipo").is_some());
        assert!(json.get("escenarios").is_some());
        assert!(json.get("capas_semanticas").is_some());
        assert!(json["interactividad"].get("navegacion_temporal").is_some());
    }
}
