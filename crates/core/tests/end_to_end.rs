use dungeon_core::{
    DiamondSquare, DungeonConfig, Grid, Pos, ScriptedRandom, SurfaceLayer, generate_dungeon,
};

fn scenario_config() -> DungeonConfig {
    DungeonConfig {
        width: 20,
        height: 20,
        detail_radius: 4,
        num_rooms: 2,
        room_radius: 3,
        corridor_width: Some(1),
        ..DungeonConfig::default()
    }
}

fn expected_carved(x: i32, y: i32) -> bool {
    let first_room = (2..=8).contains(&x) && (2..=8).contains(&y);
    let second_room = (11..=17).contains(&x) && (11..=17).contains(&y);
    let horizontal_run = (5..=14).contains(&x) && (4..=6).contains(&y);
    let vertical_run = (13..=15).contains(&x) && (5..=14).contains(&y);
    first_room || second_room || horizontal_run || vertical_run
}

fn touches_carved(mask: &Grid<bool>, x: usize, y: usize) -> bool {
    mask.neighborhood(x, y).any(|&carved| carved)
}

#[test]
fn two_room_scenario_carves_paints_and_flattens_as_expected() {
    let config = scenario_config();
    let mut source = DiamondSquare::new(2024);
    let mut room_draws = ScriptedRandom::new([5, 5, 14, 14], [0.0_f32; 0]);
    let mut scatter_draws = ScriptedRandom::new([0_i32; 0], [0.0_f32; 0]);

    let dungeon = generate_dungeon(&config, 11, &mut source, &mut room_draws, &mut scatter_draws)
        .expect("scenario configuration is valid");

    assert_eq!(dungeon.seed, 11);
    let centers: Vec<Pos> = dungeon.rooms.iter().map(|room| room.center).collect();
    assert_eq!(centers, vec![Pos { y: 5, x: 5 }, Pos { y: 14, x: 14 }]);

    for (x, y, &carved) in dungeon.mask.iter() {
        assert_eq!(carved, expected_carved(x as i32, y as i32), "mask cell ({x}, {y})");
        if carved {
            assert_eq!(dungeon.heights[(x, y)], 0.0, "carved cell ({x}, {y}) must be flat");
        }
    }

    for (x, y, weights) in dungeon.alphamap.iter() {
        assert_eq!(weights.iter().sum::<f32>(), 1.0);
        let layer = SurfaceLayer::dominant(weights);
        let carved = dungeon.mask[(x, y)];
        assert_eq!(layer == SurfaceLayer::Floor, carved, "floor layer at ({x}, {y})");
        if !carved {
            let expected = if touches_carved(&dungeon.mask, x, y) {
                SurfaceLayer::Wall
            } else {
                SurfaceLayer::Exterior
            };
            assert_eq!(layer, expected, "sample ({x}, {y})");
        }
    }

    // The ring hugs both rooms and the corridor bend.
    assert_eq!(dungeon.layer_at(1, 1), Some(SurfaceLayer::Wall));
    assert_eq!(dungeon.layer_at(9, 9), Some(SurfaceLayer::Wall));
    assert_eq!(dungeon.layer_at(16, 5), Some(SurfaceLayer::Wall));
    assert_eq!(dungeon.layer_at(0, 0), Some(SurfaceLayer::Exterior));
    assert_eq!(dungeon.layer_at(19, 0), Some(SurfaceLayer::Exterior));
}

#[test]
fn scenario_scatter_avoids_carved_cells_and_low_ground() {
    let config =
        DungeonConfig { accept_probability: 1.0, max_scatter_count: 500, ..scenario_config() };
    let mut source = DiamondSquare::new(7);
    let mut room_draws = ScriptedRandom::new([5, 5, 14, 14], [0.0_f32; 0]);
    let mut scatter_draws = ScriptedRandom::new([0_i32; 0], [0.0_f32; 0]);

    let dungeon = generate_dungeon(&config, 11, &mut source, &mut room_draws, &mut scatter_draws)
        .expect("scenario configuration is valid");

    let qualifying = dungeon
        .mask
        .iter()
        .filter(|&(x, y, &carved)| !carved && dungeon.heights[(x, y)] > config.elevation_threshold)
        .count();
    assert_eq!(dungeon.scatter.len(), qualifying, "certain acceptance takes every qualifying cell");
    for point in &dungeon.scatter {
        assert!(!expected_carved(point.pos.x, point.pos.y));
        assert!(point.elevation > config.elevation_threshold);
    }
}

#[test]
fn zero_rooms_leave_the_terrain_untouched_and_fully_exterior() {
    let config = DungeonConfig { num_rooms: 0, ..scenario_config() };
    let mut source = DiamondSquare::new(3);
    let mut room_draws = ScriptedRandom::new([0_i32; 0], [0.0_f32; 0]);
    let mut scatter_draws = ScriptedRandom::new([0_i32; 0], [0.0_f32; 0]);

    let dungeon = generate_dungeon(&config, 11, &mut source, &mut room_draws, &mut scatter_draws)
        .expect("zero rooms is a valid configuration");

    assert!(dungeon.rooms.is_empty());
    assert_eq!(dungeon.occupied_cell_count(), 0);
    assert_eq!(dungeon.layer_counts(), [0, 0, 400]);
    assert!(dungeon.heights.cells().iter().any(|&height| height == 1.0));
}
