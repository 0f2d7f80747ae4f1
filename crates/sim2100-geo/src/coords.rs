//! Geographic coordinates and the WGS84 to Web Mercator transform

use serde::{Deserialize, Serialize};

/// Rough degrees-to-kilometres factor (varies with latitude)
pub const DEGREES_TO_KM: f64 = 111.0;

/// Maximum latitude representable in Web Mercator
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.06;

/// Half the Web Mercator world extent in metres
const WEB_MERCATOR_HALF_EXTENT: f64 = 20_037_508.34;

/// Coordinate errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    /// Latitude outside the Web Mercator domain
    #[error("latitud {0} fuera del rango valido para Web Mercator (±{WEB_MERCATOR_MAX_LAT} grados)")]
    LatitudeOutOfRange(f64),
}

/// WGS84 geographic position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl LatLng {
    /// New position
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Project a WGS84 position to Web Mercator (EPSG:3857) metres
///
/// Latitudes beyond [`WEB_MERCATOR_MAX_LAT`] have no Mercator image and are
/// rejected.
pub fn to_web_mercator(position: LatLng) -> Result<(f64, f64), GeoError> {
    if position.lat.abs() > WEB_MERCATOR_MAX_LAT {
        return Err(GeoError::LatitudeOutOfRange(position.lat));
    }
    let x = position.lng * WEB_MERCATOR_HALF_EXTENT / 180.0;
    let y = ((90.0 + position.lat) * std::f64::consts::PI / 360.0).tan().ln()
        / (std::f64::consts::PI / 180.0)
        * WEB_MERCATOR_HALF_EXTENT
        / 180.0;
    Ok((x, y))
}
