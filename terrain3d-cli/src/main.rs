//! CLI front end: loads a [`terrain3d_core::TerrainConfig`] (from flags
//! or a JSON file), builds a [`terrain3d_core::TerrainGenerator`], and
//! walks the quadtree to depth `generationDepth`, writing `tileset.json`
//! plus every referenced `.b3dm`/`.json` tile to an output directory.
//!
//! Argument parsing style and subcommand layout are grounded on
//! `examples/pka-3d-tiles/src/main.rs`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use argh::FromArgs;
use log::info;
use terrain3d_core::address::{children, Hemisphere};
use terrain3d_core::{TerrainConfig, TerrainGenerator};

#[derive(FromArgs)]
/// Procedural planetary terrain generator, emitted as a 3D Tiles tileset.
struct App {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
enum Command {
    Generate(Generate),
}

#[derive(FromArgs, PartialEq, Debug)]
/// Generate a tileset and its content into an output directory.
#[argh(subcommand, name = "generate")]
struct Generate {
    /// path to a JSON file holding a TerrainConfig
    #[argh(option)]
    config: PathBuf,

    /// directory to write tileset.json and tile content into
    #[argh(option)]
    out: PathBuf,
}

fn load_config(path: &Path) -> Result<TerrainConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading config file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
}

/// Write b3dm content for `index` and recurse into its children, if
/// any. `generation_depth` is the recursion counter from
/// [`TerrainGenerator::generate_node`], not the tile's quadtree depth:
/// nodes at `generation_depth == config.generation_depth` are leaves
/// that point to a further tileset JSON rather than mesh content, so
/// this walk stops one level short of them and writes no b3dm there.
fn write_subtree(generator: &TerrainGenerator, out_dir: &Path, hemisphere: Hemisphere, index: u64, generation_depth: u32) -> Result<()> {
    let b3dm_path = out_dir.join(format!("{}_{}.b3dm", hemisphere.as_index(), index));
    let payload = generator.generate_terrain(hemisphere, index)?;
    fs::write(&b3dm_path, &payload).with_context(|| format!("writing {}", b3dm_path.display()))?;
    info!("wrote {} ({} bytes)", b3dm_path.display(), payload.len());

    if generation_depth + 1 < generator.config().generation_depth {
        for child_index in children(index) {
            write_subtree(generator, out_dir, hemisphere, child_index, generation_depth + 1)?;
        }
    }
    Ok(())
}

fn run(args: Generate) -> Result<()> {
    let config = load_config(&args.config)?;
    let generator = TerrainGenerator::new(config)?;

    fs::create_dir_all(&args.out).with_context(|| format!("creating output directory {}", args.out.display()))?;

    // `get_root` returns the bare tileset node the core operates on
    // (spec §6); wrapping it into a top-level tileset document with
    // `asset`/`geometricError` is this host's concern, not the core's.
    let root = generator.get_root();
    let tileset_path = args.out.join("tileset.json");
    let tileset_document = serde_json::json!({
        "asset": { "version": "1.0" },
        "geometricError": root.geometric_error,
        "root": root,
    });
    let tileset_json = serde_json::to_string_pretty(&tileset_document).context("serializing tileset")?;
    fs::write(&tileset_path, tileset_json).with_context(|| format!("writing {}", tileset_path.display()))?;
    info!("wrote {}", tileset_path.display());

    if generator.config().generation_depth > 1 {
        for hemisphere in [Hemisphere::West, Hemisphere::East] {
            for index in children(0) {
                write_subtree(&generator, &args.out, hemisphere, index, 1)?;
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let app: App = argh::from_env();
    match app.command {
        Command::Generate(args) => run(args),
    }
}
