pub mod config;
pub mod error;
pub mod grid;
pub mod heightfield;
pub mod mapgen;
pub mod rng;
pub mod types;

pub use config::{DungeonConfig, PaintSource, ScatterStrategy};
pub use error::{ConfigError, GenerateError};
pub use grid::Grid;
pub use heightfield::{DiamondSquare, HeightfieldSource};
pub use mapgen::{
    AlphaMap, DungeonGenerator, GeneratedDungeon, PipelineState, Room, ScatterPoint,
    generate_dungeon,
};
pub use rng::{RandomSource, ScriptedRandom};
pub use types::*;
