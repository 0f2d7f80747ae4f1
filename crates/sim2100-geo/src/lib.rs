//! SpatialSim 2100 Geocomputing
//!
//! Geospatial support for the simulator and its map client:
//!
//! - **Coordinates**: WGS84 positions and the Web Mercator transform
//! - **Distance**: haversine and planar distances, approximate polygon area
//! - **Analysis**: DBSCAN-style cluster detection, Moran's I spatial
//!   autocorrelation, hot/cold spot analysis
//! - **Elements**: the map client's element-list and export-document
//!   contract with stable ids

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod analysis;
pub mod coords;
pub mod distance;
pub mod element;

pub use analysis::{detect_clusters, find_hotspots, morans_i, Confidence, Hotspot, SpotKind};
pub use coords::{to_web_mercator, GeoError, LatLng, DEGREES_TO_KM, WEB_MERCATOR_MAX_LAT};
pub use distance::{euclidean_deg, haversine_km, polygon_area_km2};
pub use element::{ElementId, ExportDocument, MapElement};
