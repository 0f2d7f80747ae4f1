//! Shared test fixtures for the SpatialSim 2100 workspace
//!
//! A frozen clock for timestamp-stable assertions and canonical seed
//! requests used across integration tests.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use sim2100_pipeline::clock::Clock;

/// Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock frozen at 2100-01-01T00:00:00Z
    #[must_use]
    pub fn epoch_2100() -> Self {
        // Constant date, always valid.
        match Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0) {
            chrono::LocalResult::Single(instant) => Self(instant),
            _ => Self(DateTime::<Utc>::UNIX_EPOCH),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Canonical metropolitan scenario request: ten million inhabitants over
/// fifty thousand km² with moderate ecological stress
#[must_use]
pub fn metropolitan_request() -> Value {
    json!({
        "humano": {
            "poblacion": 10_000_000.0,
            "diversidad_cultural": 0.8,
            "desigualdad_recursos": 0.4,
            "participacion_civica": 0.6
        },
        "espacial": {
            "area_km2": 50_000.0,
            "conectividad": 0.7,
            "infraestructura_verde": 0.3,
            "accesibilidad": 0.6
        },
        "temporal": {
            "horizonte": "2100",
            "tendencia_crecimiento": 0.02,
            "velocidad_cambio": 0.5
        },
        "ecologico": {
            "biodiversidad_perdida": 0.3,
            "temperatura_aumento": 2.0,
            "recursos_hidricos": 0.6,
            "calidad_aire": 0.7
        },
        "reglas": {
            "min_sostenibilidad": 0.5,
            "min_equidad": 0.5
        }
    })
}

/// Minimal structurally-valid request: every section present but empty, so
/// every field takes its documented default
#[must_use]
pub fn minimal_request() -> Value {
    json!({
        "humano": {},
        "espacial": {},
        "temporal": {},
        "ecologico": {},
        "reglas": {}
    })
}

/// High-stress request: collapse-level biodiversity loss, severe warming,
/// scarce water, unequal access
#[must_use]
pub fn stressed_request() -> Value {
    json!({
        "humano": {
            "poblacion": 25_000_000.0,
            "densidad_urbana": 12_000.0,
            "desigualdad_recursos": 0.8,
            "acceso_desigual": true,
            "participacion_civica": 0.2
        },
        "espacial": {
            "area_km2": 8_000.0,
            "conectividad": 0.4
        },
        "temporal": {
            "horizonte": "2100",
            "tendencia_crecimiento": 0.05,
            "velocidad_cambio": 0.9
        },
        "ecologico": {
            "biodiversidad_perdida": 0.6,
            "temperatura_aumento": 3.5,
            "recursos_hidricos": 0.2,
            "calidad_aire": 0.3
        },
        "reglas": {
            "min_sostenibilidad": 0.5,
            "min_equidad": 0.5,
            "max_riesgo": 0.4,
            "min_biodiversidad": 0.4
        }
    })
}
