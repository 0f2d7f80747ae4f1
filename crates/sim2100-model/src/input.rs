//! Domain inputs for a pipeline run
//!
//! The four domain inputs (human, spatial, temporal, ecological) plus the
//! governance rules arrive as open JSON mappings. They are validated once at
//! the boundary into typed records with explicit optional fields and
//! documented defaults; after that the pipeline operates on strongly-typed
//! values only.
//!
//! Degraded values (non-numeric where a number is expected, explicit null)
//! are coerced to the field default and recorded as [`Diagnostic`] warnings;
//! only a non-mapping input aborts the run.

use crate::error::{Diagnostic, DiagnosticKind, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Human domain input (demographics and social signals)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanInput {
    /// Total population
    pub poblacion: f64,
    /// Cultural diversity index in [0,1]
    pub diversidad_cultural: f64,
    /// Declared urban density (people per km²); 0.0 means "derive it"
    pub densidad_urbana: f64,
    /// Resource inequality index in [0,1]
    pub desigualdad_recursos: f64,
    /// Whether access to services is known to be unequal
    pub acceso_desigual: bool,
    /// Civic participation index in [0,1]
    pub participacion_civica: f64,
}

impl Default for HumanInput {
    fn default() -> Self {
        Self {
            poblacion: 0.0,
            diversidad_cultural: 0.5,
            densidad_urbana: 0.0,
            desigualdad_recursos: 0.0,
            acceso_desigual: false,
            participacion_civica: 0.5,
        }
    }
}

/// Spatial domain input (geography and infrastructure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialInput {
    /// Territory area in km²
    pub area_km2: f64,
    /// Connectivity index in [0,1]
    pub conectividad: f64,
    /// Green infrastructure coverage in [0,1]
    pub infraestructura_verde: f64,
    /// Accessibility index in [0,1]
    pub accesibilidad: f64,
}

impl Default for SpatialInput {
    fn default() -> Self {
        Self {
            area_km2: 0.0,
            conectividad: 0.5,
            infraestructura_verde: 0.0,
            accesibilidad: 0.5,
        }
    }
}

/// Temporal domain input (horizon and trends)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalInput {
    /// Scenario horizon label
    pub horizonte: String,
    /// Annual growth trend (fraction, e.g. 0.02)
    pub tendencia_crecimiento: f64,
    /// Pace-of-change index in [0,1]
    pub velocidad_cambio: f64,
}

impl Default for TemporalInput {
    fn default() -> Self {
        Self {
            horizonte: "2100".to_string(),
            tendencia_crecimiento: 0.0,
            velocidad_cambio: 0.0,
        }
    }
}

/// Ecological domain input (environmental constraints)
///
/// Every numeric field here also becomes a negotiation constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcologicalInput {
    /// Biodiversity loss fraction in [0,1]
    pub biodiversidad_perdida: f64,
    /// Temperature increase in °C (unbounded magnitude)
    pub temperatura_aumento: f64,
    /// Water resource availability index in [0,1]
    pub recursos_hidricos: f64,
    /// Air quality index in [0,1]
    pub calidad_aire: f64,
}

impl Default for EcologicalInput {
    fn default() -> Self {
        Self {
            biodiversidad_perdida: 0.0,
            temperatura_aumento: 0.0,
            recursos_hidricos: 0.5,
            calidad_aire: 0.5,
        }
    }
}

/// Caller-supplied governance thresholds for the ethical audit
///
/// Absent rules are simply not audited; no active rules means the audit
/// passes by default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceRules {
    /// Minimum sustainability of the selected variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sostenibilidad: Option<f64>,
    /// Minimum equity of the selected variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_equidad: Option<f64>,
    /// Maximum tolerated risk of the selected variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_riesgo: Option<f64>,
    /// Minimum biodiversity of the selected variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_biodiversidad: Option<f64>,
}

impl GovernanceRules {
    /// Whether any rule is active
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_sostenibilidad.is_none()
            && self.min_equidad.is_none()
            && self.max_riesgo.is_none()
            && self.min_biodiversidad.is_none()
    }
}

/// The five validated inputs of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    /// Human domain
    #[serde(rename = "humano")]
    pub human: HumanInput,
    /// Spatial domain
    #[serde(rename = "espacial")]
    pub spatial: SpatialInput,
    /// Temporal domain
    #[serde(rename = "temporal")]
    pub temporal: TemporalInput,
    /// Ecological domain
    #[serde(rename = "ecologico")]
    pub ecological: EcologicalInput,
    /// Governance rules
    #[serde(rename = "reglas")]
    pub rules: GovernanceRules,
}

impl ScenarioInputs {
    /// Validate a raw request document into typed inputs
    ///
    /// All five top-level fields are required and must be mappings; values
    /// inside them degrade to documented defaults with diagnostics.
    pub fn from_value(body: &Value) -> Result<(Self, Vec<Diagnostic>), ValidationError> {
        let object = body.as_object().ok_or(ValidationError::NotAnObject)?;
        let mut diagnostics = Vec::new();

        let human = HumanInput::from_field(object, "humano", &mut diagnostics)?;
        let spatial = SpatialInput::from_field(object, "espacial", &mut diagnostics)?;
        let temporal = TemporalInput::from_field(object, "temporal", &mut diagnostics)?;
        let ecological = EcologicalInput::from_field(object, "ecologico", &mut diagnostics)?;
        let rules = GovernanceRules::from_field(object, "reglas", &mut diagnostics)?;

        let inputs = Self {
            human,
            spatial,
            temporal,
            ecological,
            rules,
        };
        Ok((inputs, diagnostics))
    }
}

/// Pull a required mapping out of the request object
fn required_mapping<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Map<String, Value>, ValidationError> {
    let value = object
        .get(field)
        .ok_or_else(|| ValidationError::MissingField(field.to_string()))?;
    value
        .as_object()
        .ok_or_else(|| ValidationError::not_a_mapping(field, value))
}

/// Lenient numeric field: absent → default, null → default (diagnostic),
/// non-numeric → default (diagnostic)
fn lenient_number(
    map: &Map<String, Value>,
    key: &str,
    default: f64,
    prefix: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> f64 {
    match map.get(key) {
        None => default,
        Some(Value::Null) => {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::MissingOptional,
                format!("{prefix}.{key}"),
                format!("valor nulo en '{key}', se usa {default}"),
            ));
            default
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
        Some(_) => {
            diagnostics.push(Diagnostic::non_numeric(format!("{prefix}.{key}"), default));
            default
        }
    }
}

/// Lenient boolean field: absent → default, anything non-boolean → default
/// with a diagnostic
fn lenient_bool(
    map: &Map<String, Value>,
    key: &str,
    default: bool,
    prefix: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    match map.get(key) {
        None => default,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::NonNumeric,
                format!("{prefix}.{key}"),
                format!("valor no booleano en '{key}', se usa {default}"),
            ));
            default
        }
    }
}

/// Lenient string field: absent → default; numbers render to text
fn lenient_string(
    map: &Map<String, Value>,
    key: &str,
    default: &str,
    prefix: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    match map.get(key) {
        None => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::NonNumeric,
                format!("{prefix}.{key}"),
                format!("valor no textual en '{key}', se usa '{default}'"),
            ));
            default.to_string()
        }
    }
}

/// Optional numeric rule: absent/non-numeric → None (diagnostic on coercion)
fn lenient_rule(
    map: &Map<String, Value>,
    key: &str,
    prefix: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<f64> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::NonNumeric,
                format!("{prefix}.{key}"),
                format!("regla no numerica '{key}' ignorada"),
            ));
            None
        }
    }
}

impl HumanInput {
    fn from_field(
        object: &Map<String, Value>,
        field: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Self, ValidationError> {
        let map = required_mapping(object, field)?;
        let defaults = Self::default();
        Ok(Self {
            poblacion: lenient_number(map, "poblacion", defaults.poblacion, field, diagnostics),
            diversidad_cultural: lenient_number(
                map,
                "diversidad_cultural",
                defaults.diversidad_cultural,
                field,
                diagnostics,
            ),
            densidad_urbana: lenient_number(
                map,
                "densidad_urbana",
                defaults.densidad_urbana,
                field,
                diagnostics,
            ),
            desigualdad_recursos: lenient_number(
                map,
                "desigualdad_recursos",
                defaults.desigualdad_recursos,
                field,
                diagnostics,
            ),
            acceso_desigual: lenient_bool(
                map,
                "acceso_desigual",
                defaults.acceso_desigual,
                field,
                diagnostics,
            ),
            participacion_civica: lenient_number(
                map,
                "participacion_civica",
                defaults.participacion_civica,
                field,
                diagnostics,
            ),
        })
    }
}

impl SpatialInput {
    fn from_field(
        object: &Map<String, Value>,
        field: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Self, ValidationError> {
        let map = required_mapping(object, field)?;
        let defaults = Self::default();
        Ok(Self {
            area_km2: lenient_number(map, "area_km2", defaults.area_km2, field, diagnostics),
            conectividad: lenient_number(map, "conectividad", defaults.conectividad, field, diagnostics),
            infraestructura_verde: lenient_number(
                map,
                "infraestructura_verde",
                defaults.infraestructura_verde,
                field,
                diagnostics,
            ),
            accesibilidad: lenient_number(map, "accesibilidad", defaults.accesibilidad, field, diagnostics),
        })
    }
}

impl TemporalInput {
    fn from_field(
        object: &Map<String, Value>,
        field: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Self, ValidationError> {
        let map = required_mapping(object, field)?;
        let defaults = Self::default();
        Ok(Self {
            horizonte: lenient_string(map, "horizonte", &defaults.horizonte, field, diagnostics),
            tendencia_crecimiento: lenient_number(
                map,
                "tendencia_crecimiento",
                defaults.tendencia_crecimiento,
                field,
                diagnostics,
            ),
            velocidad_cambio: lenient_number(
                map,
                "velocidad_cambio",
                defaults.velocidad_cambio,
                field,
                diagnostics,
            ),
        })
    }
}

impl EcologicalInput {
    fn from_field(
        object: &Map<String, Value>,
        field: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Self, ValidationError> {
        let map = required_mapping(object, field)?;
        let defaults = Self::default();
        Ok(Self {
            biodiversidad_perdida: lenient_number(
                map,
                "biodiversidad_perdida",
                defaults.biodiversidad_perdida,
                field,
                diagnostics,
            ),
            temperatura_aumento: lenient_number(
                map,
                "temperatura_aumento",
                defaults.temperatura_aumento,
                field,
                diagnostics,
            ),
            recursos_hidricos: lenient_number(
                map,
                "recursos_hidricos",
                defaults.recursos_hidricos,
                field,
                diagnostics,
            ),
            calidad_aire: lenient_number(map, "calidad_aire", defaults.calidad_aire, field, diagnostics),
        })
    }
}

impl GovernanceRules {
    fn from_field(
        object: &Map<String, Value>,
        field: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Self, ValidationError> {
        let map = required_mapping(object, field)?;
        Ok(Self {
            min_sostenibilidad: lenient_rule(map, "min_sostenibilidad", field, diagnostics),
            min_equidad: lenient_rule(map, "min_equidad", field, diagnostics),
            max_riesgo: lenient_rule(map, "max_riesgo", field, diagnostics),
            min_biodiversidad: lenient_rule(map, "min_biodiversidad", field, diagnostics),
        })
    }
}
