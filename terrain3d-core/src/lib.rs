//! Deterministic, out-of-core procedural planetary terrain exposed as
//! a 3D Tiles tileset: value-noise heights, ellipsoid geodetic
//! mapping, quadtree tile addressing, a screen-space-error model, and
//! glTF 1.0 binary / Batched 3D Model (b3dm) v1 container output.
//!
//! [`TerrainGenerator`] is the public entry point; everything else is
//! a supporting module it composes. See `SPEC_FULL.md` for the full
//! design.

pub mod address;
pub mod b3dm;
pub mod config;
pub mod ellipsoid;
pub mod error;
pub mod error_model;
pub mod gltf;
pub mod height;
pub mod mesh;
pub mod noise;
pub mod region;
pub mod tileset;

pub use address::{BoundingRegion, Hemisphere, TileAddress};
pub use config::{TerrainConfig, TerrainGenerator};
pub use error::{ConfigError, TerrainError};
pub use tileset::{BoundingVolume, Refine, Tile, TileContent};

impl TerrainGenerator {
    /// The bounding region for a tile address, as the `[w, s, e, n, h1,
    /// h2]` array 3D Tiles uses for `region` bounding volumes (spec
    /// §6's `generateBoundingRegion`).
    pub fn generate_bounding_region(&self, hemisphere: Hemisphere, index: u64) -> [f64; 6] {
        region::generate_bounding_region(
            hemisphere,
            index,
            self.config().persistence,
            self.level_displacement(),
            self.config().content_generation_depth,
        )
        .to_array()
    }

    /// Build the tile's b3dm payload: a watertight grid mesh of the
    /// tile's surface embedded in glTF 1.0 binary, wrapped in a b3dm
    /// v1 container (spec §6's `generateTerrain`).
    pub fn generate_terrain(&self, hemisphere: Hemisphere, index: u64) -> Result<Vec<u8>, TerrainError> {
        log::debug!("generating terrain mesh for {hemisphere:?}:{index}");
        let tile_mesh = mesh::build(
            hemisphere,
            index,
            &self.config().ellipsoid,
            self.config().persistence,
            self.level_displacement(),
            self.config().content_generation_depth,
        )?;
        let glb = gltf::build_glb(&self.base_template, &tile_mesh);
        let b3dm = b3dm::build_b3dm(&glb);
        log::trace!("emitted b3dm container for {hemisphere:?}:{index} ({} bytes)", b3dm.len());
        Ok(b3dm)
    }
}
