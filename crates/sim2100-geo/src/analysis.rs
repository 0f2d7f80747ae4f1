//! Spatial analysis: cluster detection, autocorrelation, hotspots

use serde::{Deserialize, Serialize};

use crate::coords::LatLng;
use crate::distance::haversine_km;

/// Damping added to distances in inverse-distance weights so co-located
/// points never divide by zero
const DISTANCE_DAMPING: f64 = 0.1;

/// Two-sided z threshold at 95% confidence
const Z_SIGNIFICANT: f64 = 1.96;
/// Two-sided z threshold at 99% confidence
const Z_HIGH_CONFIDENCE: f64 = 2.58;

/// Hotspot polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotKind {
    /// Local mean significantly above the global mean
    Hot,
    /// Local mean significantly below the global mean
    Cold,
}

/// Statistical confidence bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// |z| above the 99% threshold
    High,
    /// |z| above the 95% threshold only
    Medium,
}

/// One statistically significant hot or cold spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Index of the point in the input slice
    pub index: usize,
    /// Position of the point
    pub location: LatLng,
    /// The point's own value
    pub value: f64,
    /// Mean of values within the influence radius
    pub local_mean: f64,
    /// Z-score of the local mean against the global distribution
    pub z_score: f64,
    /// Hot or cold
    pub kind: SpotKind,
    /// Confidence bucket
    pub confidence: Confidence,
}

/// Detect spatial clusters by DBSCAN-style region growth
///
/// Returns clusters as lists of point indices. Points whose neighborhood
/// holds fewer than `min_points` neighbors and that no cluster absorbs are
/// noise and appear in no cluster.
#[must_use]
pub fn detect_clusters(points: &[LatLng], radius_km: f64, min_points: usize) -> Vec<Vec<usize>> {
    let mut visited = vec![false; points.len()];
    let mut clusters = Vec::new();

    for i in 0..points.len() {
        if visited[i] {
            continue;
        }
        visited[i] = true;
        let neighbors = neighbors_within(points, i, radius_km);
        if neighbors.len() < min_points {
            continue;
        }
        clusters.push(grow_cluster(points, i, neighbors, &mut visited, radius_km, min_points));
    }

    tracing::debug!(points = points.len(), clusters = clusters.len(), "cluster detection done");
    clusters
}

fn neighbors_within(points: &[LatLng], index: usize, radius_km: f64) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(i, point)| *i != index && haversine_km(points[index], **point) <= radius_km)
        .map(|(i, _)| i)
        .collect()
}

fn grow_cluster(
    points: &[LatLng],
    seed: usize,
    mut frontier: Vec<usize>,
    visited: &mut [bool],
    radius_km: f64,
    min_points: usize,
) -> Vec<usize> {
    let mut cluster = vec![seed];
    let mut i = 0;
    while i < frontier.len() {
        let candidate = frontier[i];
        if !visited[candidate] {
            visited[candidate] = true;
            let reachable = neighbors_within(points, candidate, radius_km);
            if reachable.len() >= min_points {
                frontier.extend(reachable);
            }
        }
        if !cluster.contains(&candidate) {
            cluster.push(candidate);
        }
        i += 1;
    }
    cluster
}

/// Moran's I spatial autocorrelation with inverse-distance weights
///
/// Degenerate inputs (length mismatch, fewer than two points, constant
/// values) return 0.0.
#[must_use]
pub fn morans_i(points: &[LatLng], values: &[f64]) -> f64 {
    if points.len() != values.len() || points.len() < 2 {
        return 0.0;
    }
    let n = points.len();
    let mean = values.iter().sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut weight_sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let weight = 1.0 / (haversine_km(points[i], points[j]) + DISTANCE_DAMPING);
            numerator += weight * (values[i] - mean) * (values[j] - mean);
            weight_sum += weight;
        }
    }

    let denominator: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    if denominator == 0.0 || weight_sum == 0.0 {
        return 0.0;
    }
    (n as f64 / weight_sum) * (numerator / denominator)
}

/// Find statistically significant hot and cold spots
///
/// Each point's local mean over its influence radius is z-scored against the
/// global value distribution; |z| beyond the 95% threshold qualifies.
/// Degenerate inputs (length mismatch, no points, constant values, or a
/// non-positive radius) detect nothing.
#[must_use]
pub fn find_hotspots(points: &[LatLng], values: &[f64], radius_km: f64) -> Vec<Hotspot> {
    if points.len() != values.len() || points.is_empty() || radius_km <= 0.0 || radius_km.is_nan() {
        return Vec::new();
    }
    let n = points.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std_dev = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64).sqrt();
    if std_dev == 0.0 {
        return Vec::new();
    }

    let mut hotspots = Vec::new();
    for i in 0..n {
        let mut local_sum = 0.0;
        let mut local_count = 0usize;
        for j in 0..n {
            if haversine_km(points[i], points[j]) <= radius_km {
                local_sum += values[j];
                local_count += 1;
            }
        }
        // local_count >= 1: the point itself is always within radius
        let local_mean = local_sum / local_count as f64;
        let z_score = (local_mean - mean) / std_dev;
        if z_score.abs() > Z_SIGNIFICANT {
            hotspots.push(Hotspot {
                index: i,
                location: points[i],
                value: values[i],
                local_mean,
                z_score,
                kind: if z_score > 0.0 { SpotKind::Hot } else { SpotKind::Cold },
                confidence: if z_score.abs() > Z_HIGH_CONFIDENCE {
                    Confidence::High
                } else {
                    Confidence::Medium
                },
            });
        }
    }
    hotspots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downtown_and_north() -> Vec<LatLng> {
        vec![
            // downtown cluster
            LatLng::new(19.43, -99.13),
            LatLng::new(19.44, -99.14),
            LatLng::new(19.42, -99.12),
            LatLng::new(19.45, -99.13),
            // northern cluster
            LatLng::new(19.50, -99.10),
            LatLng::new(19.51, -99.11),
            LatLng::new(19.49, -99.09),
            // isolated point
            LatLng::new(19.30, -99.30),
        ]
    }

    #[test]
    fn two_clusters_one_noise_point() {
        let clusters = detect_clusters(&downtown_and_north(), 2.5, 2);
        assert_eq!(clusters.len(), 2);
        let clustered: usize = clusters.iter().map(Vec::len).sum();
        assert_eq!(clustered, 7, "the isolated point stays noise");
    }

    #[test]
    fn wide_radius_merges_everything() {
        let clusters = detect_clusters(&downtown_and_north(), 100.0, 3);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 8);
    }

    #[test]
    fn no_points_no_clusters() {
        assert!(detect_clusters(&[], 1.0, 3).is_empty());
    }

    #[test]
    fn morans_i_positive_for_spatially_smooth_values() {
        let points: Vec<LatLng> = (0..5).map(|i| LatLng::new(19.40 + 0.01 * i as f64, -99.10)).collect();
        let smooth = [10.0, 11.0, 12.0, 13.0, 14.0];
        assert!(morans_i(&points, &smooth) > 0.0);
    }

    #[test]
    fn morans_i_degenerate_inputs_are_zero() {
        let points = [LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)];
        assert_eq!(morans_i(&points, &[1.0]), 0.0);
        assert_eq!(morans_i(&points[..1], &[1.0]), 0.0);
        assert_eq!(morans_i(&points, &[3.0, 3.0]), 0.0);
    }

    #[test]
    fn morans_i_handles_co_located_points() {
        let points = [LatLng::new(19.0, -99.0), LatLng::new(19.0, -99.0), LatLng::new(19.5, -99.5)];
        let index = morans_i(&points, &[1.0, 2.0, 10.0]);
        assert!(index.is_finite());
    }

    /// Ten background points at value 20 plus a distant two-point outlier
    /// neighborhood at `outlier_value`
    fn background_with_outliers(outlier_value: f64) -> (Vec<LatLng>, Vec<f64>) {
        let mut points: Vec<LatLng> =
            (0..10).map(|i| LatLng::new(19.40 + 0.01 * i as f64, -99.10)).collect();
        points.push(LatLng::new(19.90, -99.60));
        points.push(LatLng::new(19.91, -99.61));
        let mut values = vec![20.0; 10];
        values.extend([outlier_value, outlier_value]);
        (points, values)
    }

    #[test]
    fn high_outlier_neighborhood_is_a_hotspot() {
        let (points, values) = background_with_outliers(50.0);
        let hotspots = find_hotspots(&points, &values, 10.0);
        assert_eq!(hotspots.len(), 2);
        for spot in &hotspots {
            assert_eq!(spot.kind, SpotKind::Hot);
            assert_eq!(spot.confidence, Confidence::Medium);
            assert!(spot.index >= 10, "only the outliers qualify");
        }
    }

    #[test]
    fn low_outlier_neighborhood_is_a_coldspot() {
        let (points, values) = background_with_outliers(0.0);
        let hotspots = find_hotspots(&points, &values, 10.0);
        assert_eq!(hotspots.len(), 2);
        assert!(hotspots.iter().all(|h| h.kind == SpotKind::Cold));
    }

    #[test]
    fn non_positive_radius_yields_no_hotspots() {
        let (points, values) = background_with_outliers(50.0);
        assert!(find_hotspots(&points, &values, -5.0).is_empty());
        assert!(find_hotspots(&points, &values, 0.0).is_empty());
        assert!(find_hotspots(&points, &values, f64::NAN).is_empty());
    }

    #[test]
    fn constant_values_yield_no_hotspots() {
        let points = [LatLng::new(19.0, -99.0), LatLng::new(19.1, -99.1)];
        assert!(find_hotspots(&points, &[7.0, 7.0], 10.0).is_empty());
    }
}
