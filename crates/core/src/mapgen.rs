//! Dungeon-in-terrain synthesis split into one submodule per pipeline stage.

pub mod model;

mod flatten;
mod generator;
mod layout;
mod normalize;
mod paint;
mod scatter;
mod seed;

pub use flatten::flatten_occupied;
pub use generator::{DungeonGenerator, PipelineState, generate_dungeon};
pub use layout::{Room, carve_room, connect_rooms, place_rooms};
pub use model::{AlphaMap, GeneratedDungeon, ScatterPoint};
pub use normalize::{FLAT_FIELD_HEIGHT, normalize_heightfield};
pub use paint::{PaintRules, classify_sample, paint_surface};
pub use scatter::{ScatterRules, scatter_vegetation};
