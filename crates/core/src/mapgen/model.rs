//! Consumer-facing artifacts of one generation pass.

use xxhash_rust::xxh3::xxh3_64;

use crate::grid::Grid;
use crate::types::{Pos, SURFACE_LAYER_COUNT, SurfaceLayer};

use super::layout::Room;

/// Per-cell blend weights for the floor, wall and exterior layers.
pub type AlphaMap = Grid<[f32; SURFACE_LAYER_COUNT]>;

#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPoint {
    pub pos: Pos,
    pub elevation: f32,
    /// Sub-cell placement offset, each axis in `[-0.3, 0.3]`.
    pub jitter: (f32, f32),
    pub width_scale: f32,
    pub height_scale: f32,
}

impl ScatterPoint {
    /// Position in unit terrain space: `(x / width, elevation, y / height)`.
    pub fn normalized_position(&self, width: usize, height: usize) -> (f32, f32, f32) {
        (self.pos.x as f32 / width as f32, self.elevation, self.pos.y as f32 / height as f32)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedDungeon {
    /// Generation seed every stage stream was derived from.
    pub seed: u64,
    pub heights: Grid<f32>,
    pub mask: Grid<bool>,
    pub rooms: Vec<Room>,
    pub alphamap: AlphaMap,
    pub scatter: Vec<ScatterPoint>,
}

impl GeneratedDungeon {
    pub fn width(&self) -> usize {
        self.mask.width()
    }

    pub fn height(&self) -> usize {
        self.mask.height()
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.mask.at(pos).copied().unwrap_or(false)
    }

    pub fn layer_at(&self, x: usize, y: usize) -> Option<SurfaceLayer> {
        self.alphamap.get(x, y).map(SurfaceLayer::dominant)
    }

    pub fn occupied_cell_count(&self) -> usize {
        self.mask.cells().iter().filter(|&&cell| cell).count()
    }

    pub fn layer_counts(&self) -> [usize; SURFACE_LAYER_COUNT] {
        let mut counts = [0; SURFACE_LAYER_COUNT];
        for weights in self.alphamap.cells() {
            counts[SurfaceLayer::dominant(weights).index()] += 1;
        }
        counts
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for &height in self.heights.cells() {
            bytes.extend(height.to_bits().to_le_bytes());
        }
        for &cell in self.mask.cells() {
            bytes.push(u8::from(cell));
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend(room.center.y.to_le_bytes());
            bytes.extend(room.center.x.to_le_bytes());
            bytes.extend(room.radius.to_le_bytes());
        }

        bytes.extend((self.alphamap.width() as u32).to_le_bytes());
        bytes.extend((self.alphamap.height() as u32).to_le_bytes());
        for weights in self.alphamap.cells() {
            bytes.push(SurfaceLayer::dominant(weights).index() as u8);
        }

        bytes.extend((self.scatter.len() as u32).to_le_bytes());
        for point in &self.scatter {
            bytes.extend(point.pos.y.to_le_bytes());
            bytes.extend(point.pos.x.to_le_bytes());
            bytes.extend(point.elevation.to_bits().to_le_bytes());
        }

        bytes
    }

    /// Stable hash of [`Self::canonical_bytes`], used to compare generations.
    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
