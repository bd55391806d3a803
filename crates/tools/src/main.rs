mod config_file;
mod preview;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_core::{DungeonConfig, DungeonGenerator, GeneratedDungeon};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config_file::ConfigFile;
use crate::preview::render_preview;

const DEFAULT_SEED: u64 = 42;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate and preview procedural dungeon layouts",
    long_about = None
)]
struct Args {
    /// TOML file with an optional `seed` and a `[dungeon]` table
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Run seed; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long)]
    rooms: Option<usize>,
    #[arg(long)]
    room_radius: Option<usize>,
    #[arg(long)]
    corridor_width: Option<usize>,
    #[arg(long)]
    max_scatter: Option<usize>,
    /// Number of successive generations to run from the same seed
    #[arg(short, long, default_value_t = 1)]
    generations: u32,
    /// Preview width in characters; 0 disables the preview
    #[arg(long, default_value_t = 64)]
    preview_columns: usize,
    /// Write the resolved configuration to this path before generating
    #[arg(long)]
    write_config: Option<PathBuf>,
}

impl Args {
    fn resolve(&self) -> Result<ConfigFile> {
        let mut file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        file.seed = self.seed.or(file.seed);
        apply_overrides(&mut file.dungeon, self);
        Ok(file)
    }
}

fn apply_overrides(config: &mut DungeonConfig, args: &Args) {
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(rooms) = args.rooms {
        config.num_rooms = rooms;
    }
    if let Some(room_radius) = args.room_radius {
        config.room_radius = room_radius;
    }
    if args.corridor_width.is_some() {
        config.corridor_width = args.corridor_width;
    }
    if let Some(max_scatter) = args.max_scatter {
        config.max_scatter_count = max_scatter;
    }
}

fn print_summary(generation: u32, dungeon: &GeneratedDungeon) {
    let [floor, wall, exterior] = dungeon.layer_counts();
    println!("Generation {generation}: {}x{}", dungeon.width(), dungeon.height());
    println!("  generation seed: {:#018x}", dungeon.seed);
    for (index, room) in dungeon.rooms.iter().enumerate() {
        let (x, y) = (room.center.x, room.center.y);
        println!("  room {index}: centre ({x}, {y}) radius {}", room.radius);
    }
    println!("  carved cells: {}", dungeon.occupied_cell_count());
    println!("  surface: floor {floor}, wall {wall}, exterior {exterior}");
    println!("  scatter points: {}", dungeon.scatter.len());
    println!("  fingerprint: {:#018x}", dungeon.fingerprint());
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let resolved = args.resolve()?;
    if let Some(path) = &args.write_config {
        resolved
            .write_atomic(path)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        info!(path = %path.display(), "config.written");
    }

    let seed = resolved.seed.unwrap_or(DEFAULT_SEED);
    let mut generator = DungeonGenerator::new(seed, resolved.dungeon);
    println!("Seed: {seed}");
    for generation in 0..args.generations {
        let dungeon = generator
            .generate()
            .with_context(|| format!("generation {generation} failed"))?;
        print_summary(generation, dungeon);
        if args.preview_columns > 0 {
            print!("{}", render_preview(dungeon, args.preview_columns));
        }
    }

    Ok(())
}
