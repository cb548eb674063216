//! Per-level displacement bounds and geometric error, per spec §4.D.
//! Grounded on `calculateErrorDifference`/`calculateRemainingError`/
//! `calculateRegionError` in `original_source/src/terrainGenerator.cc`.

use crate::address::BoundingRegion;
use crate::ellipsoid::{cartographic_to_cartesian, Ellipsoid};

/// `levelDisplacement = -maximumDisplacement / ln(persistence)`: the
/// antiderivative normalization such that `∫ pˣ dx = pˣ / ln(p)`.
pub fn level_displacement(maximum_displacement: f64, persistence: f64) -> f64 {
    -maximum_displacement / persistence.ln()
}

/// The positive displacement accumulated by octaves in `[a, b)`.
pub fn calculate_error_difference(level_displacement: f64, persistence: f64, a: u32, b: u32) -> f64 {
    level_displacement * (persistence.powi(b as i32) - persistence.powi(a as i32)) / persistence.ln()
}

/// An upper bound on the displacement contributed by all octaves past
/// `level`.
pub fn calculate_remaining_error(level_displacement: f64, persistence: f64, level: u32) -> f64 {
    level_displacement * -persistence.powi(level as i32) / persistence.ln()
}

/// The sagitta (chord-to-arc deviation) across the finest subdivision
/// of `region`, used as the geometric component of a tile's reported
/// error. Averages the four corner radii under `ellipsoid` (not the
/// fixed sampling ellipsoid `sampleHeight` uses) and, per spec §9,
/// divides only the longitudinal span by `2^contentGenerationDepth`
/// (latitude-blind, kept verbatim from the original).
pub fn calculate_region_error(region: &BoundingRegion, ellipsoid: &Ellipsoid, content_generation_depth: u32) -> f64 {
    let corners = [
        (region.w, region.s),
        (region.e, region.s),
        (region.w, region.n),
        (region.e, region.n),
    ];
    let mut radius_sum = 0.0;
    for (lon, lat) in corners {
        let (position, _normal) = cartographic_to_cartesian(lon, lat, 0.0, ellipsoid);
        radius_sum += (position[0] * position[0] + position[1] * position[1] + position[2] * position[2]).sqrt();
    }
    let radius = radius_sum / 4.0;

    let theta = (region.e - region.w) / 2f64.powi(content_generation_depth as i32);
    radius * (1.0 - (theta / 2.0).cos())
}
