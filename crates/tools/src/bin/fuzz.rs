use anyhow::{Result, ensure};
use clap::Parser;
use dungeon_core::{
    DungeonConfig, DungeonGenerator, GeneratedDungeon, PaintSource, RandomSource, ScatterStrategy,
    SurfaceLayer,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of random configurations to try
    #[arg(short, long, default_value_t = 200)]
    cases: u32,
    /// Generations run per configuration
    #[arg(short, long, default_value_t = 3)]
    generations: u32,
}

fn pick(rng: &mut ChaCha8Rng, min: usize, max_inclusive: usize) -> usize {
    min + rng.next_u64() as usize % (max_inclusive - min + 1)
}

fn random_config(rng: &mut ChaCha8Rng) -> DungeonConfig {
    let width = pick(rng, 8, 96);
    let height = pick(rng, 8, 96);
    let room_radius = pick(rng, 1, (width.min(height) - 1) / 2);
    let scatter_strategy = if rng.next_u64() % 2 == 0 {
        ScatterStrategy::FullScan
    } else {
        ScatterStrategy::RandomDraws { attempts: pick(rng, 0, 2_000) }
    };
    let paint_source =
        if rng.next_u64() % 4 == 0 { PaintSource::Normalized } else { PaintSource::Flattened };
    DungeonConfig {
        width,
        height,
        detail_radius: pick(rng, 1, 64),
        amplitude: rng.unit_f32() * 50.0,
        num_rooms: pick(rng, 0, 8),
        room_radius,
        corridor_width: if rng.next_u64() % 3 == 0 { None } else { Some(pick(rng, 1, 4)) },
        elevation_threshold: rng.unit_f32(),
        accept_probability: rng.unit_f32(),
        max_scatter_count: pick(rng, 0, 300),
        scatter_strategy,
        alphamap_width: pick(rng, 0, 128),
        alphamap_height: pick(rng, 0, 128),
        paint_source,
        ..DungeonConfig::default()
    }
}

fn check_invariants(config: &DungeonConfig, dungeon: &GeneratedDungeon) -> Result<()> {
    ensure!(dungeon.rooms.len() == config.num_rooms, "room count mismatch");
    ensure!(dungeon.scatter.len() <= config.max_scatter_count, "scatter cap exceeded");
    ensure!(
        dungeon.alphamap.dimensions() == config.alphamap_resolution(),
        "alphamap resolution mismatch"
    );

    for (x, y, &carved) in dungeon.mask.iter() {
        let height = dungeon.heights[(x, y)];
        ensure!((0.0..=1.0).contains(&height), "height {height} at ({x}, {y}) outside [0, 1]");
        ensure!(!carved || height == 0.0, "carved cell ({x}, {y}) is not flat");
    }
    for room in &dungeon.rooms {
        ensure!(dungeon.is_occupied(room.top_left()), "room corner not carved");
        ensure!(dungeon.is_occupied(room.bottom_right()), "room corner not carved");
    }
    for weights in dungeon.alphamap.cells() {
        let hot = weights.iter().filter(|&&weight| weight == 1.0).count();
        ensure!(hot == 1, "alphamap not one-hot");
    }
    if config.alphamap_resolution() == (config.width, config.height)
        && config.paint_source == PaintSource::Flattened
    {
        for (x, y, &carved) in dungeon.mask.iter() {
            let is_floor = dungeon.layer_at(x, y) == Some(SurfaceLayer::Floor);
            ensure!(is_floor == carved, "floor layer disagrees with the mask at ({x}, {y})");
        }
    }
    for point in &dungeon.scatter {
        ensure!(!dungeon.is_occupied(point.pos), "scatter point on a carved cell");
        ensure!(point.elevation > config.elevation_threshold, "scatter point below threshold");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} cases...", args.seed, args.cases);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for case in 0..args.cases {
        let config = random_config(&mut rng);
        let mut generator = DungeonGenerator::new(rng.next_u64(), config.clone());
        for generation in 0..args.generations {
            let dungeon = generator.generate()?;
            check_invariants(&config, dungeon).map_err(|error| {
                error.context(format!("case {case}, generation {generation}: {config:?}"))
            })?;
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
