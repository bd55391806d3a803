//! Single-pass pipeline that composes every mapgen stage.

use tracing::debug;

use crate::config::{DungeonConfig, PaintSource};
use crate::error::GenerateError;
use crate::grid::Grid;
use crate::heightfield::HeightfieldSource;
use crate::rng::RandomSource;

use super::super::flatten::flatten_occupied;
use super::super::layout::{Room, connect_rooms, place_rooms};
use super::super::model::GeneratedDungeon;
use super::super::normalize::normalize_heightfield;
use super::super::paint::{PaintRules, paint_surface};
use super::super::scatter::{ScatterRules, scatter_vegetation};

/// Mutable state owned by exactly one generation pass and consumed into its output.
struct GenerationContext {
    mask: Grid<bool>,
    rooms: Vec<Room>,
}

impl GenerationContext {
    fn new(width: usize, height: usize) -> Self {
        Self { mask: Grid::new(width, height, false), rooms: Vec::new() }
    }
}

/// Runs the whole pipeline once from a fresh context.
///
/// `seed` is recorded on the output. Room centres are drawn from `room_draws` and scatter
/// decisions from `scatter_draws`.
/// Nothing is produced unless the configuration and the raw heightfield are valid.
pub fn generate_dungeon<S, R>(
    config: &DungeonConfig,
    seed: u64,
    source: &mut S,
    room_draws: &mut R,
    scatter_draws: &mut R,
) -> Result<GeneratedDungeon, GenerateError>
where
    S: HeightfieldSource,
    R: RandomSource,
{
    config.validate()?;

    let raw = source.generate(config.width, config.height, config.detail_radius, config.amplitude);
    check_raw_heightfield(&raw, (config.width, config.height))?;
    let normalized = normalize_heightfield(&raw);

    let mut context = GenerationContext::new(config.width, config.height);
    context.rooms =
        place_rooms(&mut context.mask, config.num_rooms, config.room_radius, room_draws)?;
    connect_rooms(&mut context.mask, &context.rooms, config.resolved_corridor_width());

    let unflattened = match config.paint_source {
        PaintSource::Normalized => Some(normalized.clone()),
        PaintSource::Flattened => None,
    };
    let mut heights = normalized;
    flatten_occupied(&mut heights, &context.mask);
    debug!(carved = context.mask.cells().iter().filter(|&&cell| cell).count(), "mapgen.flattened");

    let scatter = scatter_vegetation(
        &context.mask,
        &heights,
        &ScatterRules {
            elevation_threshold: config.elevation_threshold,
            accept_probability: config.accept_probability,
            max_count: config.max_scatter_count,
            strategy: config.scatter_strategy,
        },
        scatter_draws,
    );

    let alphamap = paint_surface(
        &context.mask,
        unflattened.as_ref().unwrap_or(&heights),
        &PaintRules {
            resolution: config.alphamap_resolution(),
            floor_height_threshold: config.floor_height_threshold,
            surface_layers: config.surface_layers,
        },
    )?;

    let GenerationContext { mask, rooms } = context;
    Ok(GeneratedDungeon { seed, heights, mask, rooms, alphamap, scatter })
}

fn check_raw_heightfield(raw: &Grid<f32>, expected: (usize, usize)) -> Result<(), GenerateError> {
    if raw.dimensions() != expected {
        return Err(GenerateError::HeightfieldShape { expected, actual: raw.dimensions() });
    }
    match raw.iter().find(|(_, _, value)| !value.is_finite()) {
        Some((x, y, _)) => Err(GenerateError::NonFiniteHeight { x, y }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::error::ConfigError;

    fn config() -> DungeonConfig {
        DungeonConfig { width: 24, height: 18, num_rooms: 3, room_radius: 3, ..Default::default() }
    }

    fn ramp(width: usize, height: usize, _detail: usize, _amplitude: f32) -> Grid<f32> {
        Grid::from_fn(width, height, |x, y| (x + y) as f32)
    }

    #[test]
    fn invalid_config_fails_before_the_source_is_called() {
        let mut calls = 0;
        let mut source = |width: usize, height: usize, _detail: usize, _amplitude: f32| {
            calls += 1;
            Grid::new(width, height, 0.0)
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let bad = DungeonConfig { room_radius: 9, ..config() };

        let result = generate_dungeon(&bad, 1, &mut source, &mut rng.clone(), &mut rng);
        assert_eq!(
            result,
            Err(GenerateError::Config(ConfigError::RoomRadiusTooLarge {
                room_radius: 9,
                width: 24,
                height: 18,
            }))
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn wrongly_sized_heightfield_is_rejected() {
        let mut source =
            |_width: usize, _height: usize, _detail: usize, _amplitude: f32| Grid::new(4, 4, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let result = generate_dungeon(&config(), 2, &mut source, &mut rng.clone(), &mut rng);
        assert_eq!(
            result,
            Err(GenerateError::HeightfieldShape { expected: (24, 18), actual: (4, 4) })
        );
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        let mut source = |width: usize, height: usize, _detail: usize, _amplitude: f32| {
            Grid::from_fn(width, height, |x, y| if (x, y) == (5, 2) { f32::NAN } else { 1.0 })
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let result = generate_dungeon(&config(), 3, &mut source, &mut rng.clone(), &mut rng);
        assert_eq!(result, Err(GenerateError::NonFiniteHeight { x: 5, y: 2 }));
    }

    #[test]
    fn carved_cells_are_flat_and_rooms_are_in_the_mask() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let dungeon = generate_dungeon(&config(), 4, &mut ramp, &mut rng.clone(), &mut rng)
            .expect("valid configuration");

        assert_eq!(dungeon.seed, 4);
        assert_eq!(dungeon.rooms.len(), 3);
        for (x, y, &carved) in dungeon.mask.iter() {
            if carved {
                assert_eq!(dungeon.heights[(x, y)], 0.0);
            }
        }
        for room in &dungeon.rooms {
            assert!(dungeon.is_occupied(room.center));
            assert!(dungeon.is_occupied(room.top_left()));
            assert!(dungeon.is_occupied(room.bottom_right()));
        }
    }

    #[test]
    fn normalized_paint_source_sees_pre_flattening_heights() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let flattened =
            generate_dungeon(&config(), 5, &mut ramp, &mut rng.clone(), &mut rng.clone())
                .expect("valid configuration");
        let normalized_config = DungeonConfig { paint_source: PaintSource::Normalized, ..config() };
        let normalized =
            generate_dungeon(&normalized_config, 5, &mut ramp, &mut rng.clone(), &mut rng)
                .expect("valid configuration");

        assert_eq!(flattened.mask, normalized.mask);
        let [flat_floor, ..] = flattened.layer_counts();
        let [raw_floor, ..] = normalized.layer_counts();
        assert_eq!(flat_floor, flattened.occupied_cell_count());
        assert!(raw_floor < flat_floor, "ramp heights lift most carved cells above the floor test");
    }
}
