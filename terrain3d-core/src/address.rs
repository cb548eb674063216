//! Quadtree addressing on the two hemispherical root regions.
//!
//! Grounded on `terrainGenerator.cc`'s `ROOT_REGIONS`, `regionModifiers`
//! and `getBoundingTile`/`getDepth` (see `original_source/`). The
//! closure table the original uses for quadrant bisection is replaced
//! here with a plain data table of which half each quadrant keeps, per
//! spec §9's redesign note.

use serde_derive::{Deserialize, Serialize};

/// One of the two hemispherical root regions a [`TileAddress`] is
/// anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    West,
    East,
}

impl Hemisphere {
    /// The integer rendering used in tile content filenames (`"<hemi>_<index>.b3dm"`).
    pub fn as_index(self) -> u8 {
        match self {
            Hemisphere::West => 0,
            Hemisphere::East => 1,
        }
    }
}

/// A tile address: a hemisphere plus a linear quadtree index, where
/// index 0 is the hemispherical root and children of `i` are
/// `{4i+1, 4i+2, 4i+3, 4i+4}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileAddress {
    pub hemisphere: Hemisphere,
    pub index: u64,
}

impl TileAddress {
    pub fn new(hemisphere: Hemisphere, index: u64) -> Self {
        Self { hemisphere, index }
    }
}

/// A geodetic bounding box plus an ellipsoidal height interval:
/// `(west, south, east, north, h1, h2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    pub w: f64,
    pub s: f64,
    pub e: f64,
    pub n: f64,
    pub h1: f64,
    pub h2: f64,
}

impl BoundingRegion {
    pub const fn new(w: f64, s: f64, e: f64, n: f64) -> Self {
        Self { w, s, e, n, h1: 0.0, h2: 0.0 }
    }

    /// The `[w, s, e, n, h1, h2]` array shape 3D Tiles `region` bounding
    /// volumes and spec §6's `generateBoundingRegion` both use.
    pub fn to_array(self) -> [f64; 6] {
        [self.w, self.s, self.e, self.n, self.h1, self.h2]
    }
}

const ROOT_REGIONS: [BoundingRegion; 2] = [
    BoundingRegion::new(-std::f64::consts::PI, -std::f64::consts::FRAC_PI_2, 0.0, std::f64::consts::FRAC_PI_2),
    BoundingRegion::new(0.0, -std::f64::consts::FRAC_PI_2, std::f64::consts::PI, std::f64::consts::FRAC_PI_2),
];

/// `(keep_west, keep_south)` per child slot, in SW, SE, NE, NW order.
/// `keep_west = true` means the bisection keeps the western half of
/// the current longitude span (i.e. `e` is pulled in to the midpoint);
/// `keep_south` is the latitude analogue.
const QUADRANTS: [(bool, bool); 4] = [
    (true, true),   // SW
    (false, true),  // SE
    (false, false), // NE
    (true, false),  // NW
];

fn bisect(region: &mut BoundingRegion, slot: usize) {
    let (keep_west, keep_south) = QUADRANTS[slot];
    let mid_lon = (region.w + region.e) / 2.0;
    let mid_lat = (region.s + region.n) / 2.0;
    if keep_west {
        region.e = mid_lon;
    } else {
        region.w = mid_lon;
    }
    if keep_south {
        region.n = mid_lat;
    } else {
        region.s = mid_lat;
    }
}

/// The quadtree parent of `index`, or `None` at the root.
pub fn parent(index: u64) -> Option<u64> {
    if index == 0 {
        None
    } else {
        Some((index - 1) / 4)
    }
}

/// Which of the four child slots (0=SW, 1=SE, 2=NE, 3=NW) `index` is
/// relative to its parent. `index` must be nonzero.
pub fn child_slot(index: u64) -> u8 {
    debug_assert!(index > 0, "the root has no child slot");
    let p = (index - 1) / 4;
    (index - 4 * p - 1) as u8
}

/// The four children of `index`, in SW, SE, NE, NW order.
pub fn children(index: u64) -> [u64; 4] {
    [4 * index + 1, 4 * index + 2, 4 * index + 3, 4 * index + 4]
}

/// The number of refinement steps from the hemispherical root.
pub fn get_depth(mut index: u64) -> u32 {
    let mut depth = 0;
    while index > 0 {
        depth += 1;
        index = (index + 3) / 4 - 1;
    }
    depth
}

/// Resolve a tile address to its geodetic region (with `h1 == h2 == 0`,
/// to be padded in by the caller) and its depth.
pub fn get_bounding_tile(hemisphere: Hemisphere, index: u64) -> (BoundingRegion, u32) {
    let depth = get_depth(index);
    let mut region = ROOT_REGIONS[hemisphere.as_index() as usize];

    let mut slots = Vec::new();
    let mut idx = index;
    while idx > 0 {
        let next = (idx - 1) / 4;
        let slot = (idx - next * 4 - 1) as usize;
        slots.push(slot);
        idx = next;
    }
    // `slots` was recorded leaf-to-root; replay root-to-leaf.
    for &slot in slots.iter().rev() {
        bisect(&mut region, slot);
    }

    (region, depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_depth_is_zero() {
        assert_eq!(get_depth(0), 0);
    }

    #[test]
    fn s1_west_root_region() {
        let (region, depth) = get_bounding_tile(Hemisphere::West, 0);
        assert_eq!(depth, 0);
        assert_eq!(region.w, -std::f64::consts::PI);
        assert_eq!(region.s, -std::f64::consts::FRAC_PI_2);
        assert_eq!(region.e, 0.0);
        assert_eq!(region.n, std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn s2_west_sw_child() {
        let (region, depth) = get_bounding_tile(Hemisphere::West, 1);
        assert_eq!(depth, 1);
        assert_eq!(region.w, -std::f64::consts::PI);
        assert_eq!(region.s, -std::f64::consts::FRAC_PI_2);
        assert_eq!(region.e, -std::f64::consts::FRAC_PI_2);
        assert_eq!(region.n, 0.0);
    }

    #[test]
    fn s3_depth_of_21_is_3() {
        assert_eq!(get_depth(21), 3);
    }

    #[test]
    fn depth_law_holds_for_all_children() {
        for i in 0..200u64 {
            let d = get_depth(i);
            for k in 1..=4u64 {
                assert_eq!(get_depth(4 * i + k), d + 1, "child of {i}");
            }
        }
    }

    #[test]
    fn quadtree_partitions_parent_exactly() {
        for i in 0..64u64 {
            let (parent_region, _) = get_bounding_tile(Hemisphere::West, i);
            let mid_lon = (parent_region.w + parent_region.e) / 2.0;
            let mid_lat = (parent_region.s + parent_region.n) / 2.0;
            for (k, child) in children(i).into_iter().enumerate() {
                let (child_region, _) = get_bounding_tile(Hemisphere::West, child);
                assert_eq!(child_slot(child), k as u8);
                // Every child edge is either a parent edge or the exact midpoint.
                assert!(child_region.w == parent_region.w || child_region.w == mid_lon);
                assert!(child_region.e == parent_region.e || child_region.e == mid_lon);
                assert!(child_region.s == parent_region.s || child_region.s == mid_lat);
                assert!(child_region.n == parent_region.n || child_region.n == mid_lat);
            }
        }
    }

    #[test]
    fn sibling_boundaries_are_bit_identical() {
        let (sw, _) = get_bounding_tile(Hemisphere::West, 1);
        let (se, _) = get_bounding_tile(Hemisphere::West, 2);
        assert_eq!(sw.e, se.w);
    }

    #[test]
    fn determinism_across_calls() {
        let (a, da) = get_bounding_tile(Hemisphere::East, 37);
        let (b, db) = get_bounding_tile(Hemisphere::East, 37);
        assert_eq!(a, b);
        assert_eq!(da, db);
    }
}
