//! Owner of the generated artifact set and of the "generate" transition.

mod pipeline;

use tracing::{info, instrument};

use crate::config::DungeonConfig;
use crate::error::GenerateError;
use crate::heightfield::{DiamondSquare, HeightfieldSource};

use super::model::GeneratedDungeon;
use super::seed::{HEIGHTFIELD_STREAM, ROOM_STREAM, SCATTER_STREAM};
use super::seed::{derive_generation_seed, mix_seed_stream, stage_rng};

pub use pipeline::generate_dungeon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Generated,
}

/// Re-runs the full pipeline on every call to [`DungeonGenerator::generate`].
///
/// Each generation derives its seed from the run seed and a generation counter. The heightfield
/// source is reseeded and every stochastic stage draws from its own stream of that seed, so a
/// generation never depends on what earlier generations did. A failed generation keeps the
/// previous artifact.
pub struct DungeonGenerator<S = DiamondSquare> {
    run_seed: u64,
    config: DungeonConfig,
    source: S,
    generations: u64,
    current: Option<GeneratedDungeon>,
}

impl DungeonGenerator<DiamondSquare> {
    pub fn new(run_seed: u64, config: DungeonConfig) -> Self {
        Self::with_source(run_seed, config, DiamondSquare::new(run_seed))
    }
}

impl<S: HeightfieldSource> DungeonGenerator<S> {
    pub fn with_source(run_seed: u64, config: DungeonConfig, source: S) -> Self {
        Self { run_seed, config, source, generations: 0, current: None }
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Replaces the configuration; it is validated on the next generation.
    pub fn set_config(&mut self, config: DungeonConfig) {
        self.config = config;
    }

    pub fn state(&self) -> PipelineState {
        if self.current.is_some() { PipelineState::Generated } else { PipelineState::Idle }
    }

    pub fn current(&self) -> Option<&GeneratedDungeon> {
        self.current.as_ref()
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }

    #[instrument(skip(self), fields(run_seed = self.run_seed, generation = self.generations))]
    pub fn generate(&mut self) -> Result<&GeneratedDungeon, GenerateError> {
        let generation_seed = derive_generation_seed(self.run_seed, self.generations);
        self.source.reseed(mix_seed_stream(generation_seed, HEIGHTFIELD_STREAM));
        let dungeon = generate_dungeon(
            &self.config,
            generation_seed,
            &mut self.source,
            &mut stage_rng(generation_seed, ROOM_STREAM),
            &mut stage_rng(generation_seed, SCATTER_STREAM),
        )?;

        self.generations += 1;
        info!(
            rooms = dungeon.rooms.len(),
            carved = dungeon.occupied_cell_count(),
            scatter = dungeon.scatter.len(),
            "mapgen.generated"
        );
        Ok(&*self.current.insert(dungeon))
    }

    /// Drops the current artifact and returns to [`PipelineState::Idle`].
    pub fn reset(&mut self) {
        self.current = None;
    }
}
