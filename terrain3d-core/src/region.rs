//! Bounding region builder (spec §4.F): resolves a tile's geodetic
//! footprint and a height interval tight enough to bound every
//! descendant down to `contentGenerationDepth`.

use crate::address::{get_bounding_tile, BoundingRegion, Hemisphere};
use crate::error_model::calculate_error_difference;
use crate::height::sample_height;

/// Build the `(w, s, e, n, h1, h2)` bounding region for `(hemisphere,
/// index)`, sampling corner heights at the tile's own depth and
/// padding by the displacement still to be contributed by octaves
/// through `depth + content_generation_depth`.
pub fn generate_bounding_region(
    hemisphere: Hemisphere,
    index: u64,
    persistence: f64,
    level_displacement: f64,
    content_generation_depth: u32,
) -> BoundingRegion {
    let (region, depth) = get_bounding_tile(hemisphere, index);

    let corners = [
        (region.w, region.s),
        (region.e, region.s),
        (region.w, region.n),
        (region.e, region.n),
    ];
    let mut h_min = f64::INFINITY;
    let mut h_max = f64::NEG_INFINITY;
    for (lon, lat) in corners {
        let h = sample_height(lon, lat, depth, persistence, level_displacement);
        h_min = h_min.min(h);
        h_max = h_max.max(h);
    }

    let error = calculate_error_difference(level_displacement, persistence, depth, depth + content_generation_depth);

    let built = BoundingRegion {
        w: region.w,
        s: region.s,
        e: region.e,
        n: region.n,
        h1: h_min - error,
        h2: h_max + error,
    };
    log::trace!(
        "{hemisphere:?}:{index} depth={depth} bounding region=({:.6},{:.6},{:.6},{:.6}) h=[{:.6},{:.6}]",
        built.w, built.s, built.e, built.n, built.h1, built.h2
    );
    built
}
