//! Tileset node emitter (spec §4.J): recursive descent over the
//! quadtree producing 3D Tiles `Tile` JSON nodes.
//!
//! Struct shapes trimmed from `examples/pka-3d-tiles/3d-tiles/src/tileset.rs`
//! down to the fields this generator actually populates; the extension
//! and transform fields the reader side supports have no writer-side
//! counterpart here and are dropped.

use serde_derive::{Deserialize, Serialize};

use crate::address::{children, get_depth, Hemisphere};
use crate::config::TerrainGenerator;
use crate::error_model::{calculate_region_error, calculate_remaining_error};
use crate::region::generate_bounding_region;

/// A tile in a 3D Tiles tileset (mirrors
/// `examples/pka-3d-tiles/3d-tiles/src/tileset.rs::Tile`, trimmed to
/// this generator's writer-side fields).
#[derive(Debug, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "boundingVolume")]
    pub bounding_volume: BoundingVolume,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Tile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<TileContent>,
    #[serde(rename = "geometricError")]
    pub geometric_error: f64,
    pub refine: Refine,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundingVolume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<[f64; 6]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sphere: Option<[f64; 4]>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TileContent {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum Refine {
    #[serde(rename = "replace")]
    Replace,
}

fn content_filename(hemisphere: Hemisphere, index: u64, is_leaf: bool) -> String {
    let extension = if is_leaf { "json" } else { "b3dm" };
    format!("{}_{}.{}", hemisphere.as_index(), index, extension)
}

impl TerrainGenerator {
    /// The tileset's root node: a fixed geometric error and bounding
    /// sphere, with the eight depth-1 tiles (four per hemisphere) as
    /// children (spec §4.J's "Root node"). Returns the same `Tile`
    /// shape as [`Self::generate_node`], matching spec §6's "getRoot()
    /// → tileset node... generateNode(...) → tileset node" — there is
    /// no separate top-level tileset-document type, per
    /// `terrainGeneratorBindings.cc`'s `GetRoot`, which constructs and
    /// returns a bare node object.
    pub fn get_root(&self) -> Tile {
        let sphere_radius = self.config.ellipsoid.max_radius() + self.config.maximum_displacement;
        let children = [Hemisphere::West, Hemisphere::East]
            .into_iter()
            .flat_map(|hemisphere| children(0).into_iter().map(move |index| (hemisphere, index)))
            .map(|(hemisphere, index)| self.generate_node(hemisphere, index, 1))
            .collect();

        Tile {
            bounding_volume: BoundingVolume { region: None, sphere: Some([0.0, 0.0, 0.0, sphere_radius]) },
            children: Some(children),
            content: None,
            geometric_error: 1e8,
            refine: Refine::Replace,
        }
    }

    /// A single tileset node at `generation_depth` recursion steps from
    /// the root (spec §4.J). `generation_depth` is a recursion counter
    /// compared against `config.generation_depth`, not the tile's true
    /// quadtree depth from [`crate::address::get_depth`] — see
    /// SPEC_FULL.md's supplemented-behavior note on this distinction.
    pub fn generate_node(&self, hemisphere: Hemisphere, index: u64, generation_depth: u32) -> Tile {
        log::debug!("generating tileset node {hemisphere:?}:{index} at generation depth {generation_depth}");
        let region = generate_bounding_region(
            hemisphere,
            index,
            self.config.persistence,
            self.level_displacement,
            self.config.content_generation_depth,
        );
        let depth = get_depth(index);
        let geometric_error = calculate_region_error(&region, &self.config.ellipsoid, self.config.content_generation_depth)
            + calculate_remaining_error(
                self.level_displacement,
                self.config.persistence,
                depth + self.config.content_generation_depth,
            );

        let is_leaf = generation_depth == self.config.generation_depth;
        let content = Some(TileContent { url: content_filename(hemisphere, index, is_leaf) });
        let children = if is_leaf {
            None
        } else {
            Some(
                children(index)
                    .into_iter()
                    .map(|child_index| self.generate_node(hemisphere, child_index, generation_depth + 1))
                    .collect(),
            )
        };

        Tile {
            bounding_volume: BoundingVolume { region: Some(region.to_array()), sphere: None },
            children,
            content,
            geometric_error,
            refine: Refine::Replace,
        }
    }
}
