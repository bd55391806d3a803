//! Generation parameters, their defaults, and up-front validation.
//! Every field has a default so partial configuration files deserialize cleanly.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::SURFACE_LAYER_COUNT;

/// Largest accepted grid extent on either axis.
pub const MAX_GRID_EXTENT: usize = 8192;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScatterStrategy {
    /// Visit every cell in raster order; the cap favours the first rows scanned.
    #[default]
    FullScan,
    /// Draw a fixed number of uniformly random cells; repeats are possible.
    RandomDraws { attempts: usize },
}

/// Which heightfield the surface painter samples for its floor test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintSource {
    #[default]
    Flattened,
    Normalized,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub width: usize,
    pub height: usize,
    pub detail_radius: usize,
    pub amplitude: f32,
    pub num_rooms: usize,
    pub room_radius: usize,
    /// Cells added on each side of a corridor's centre line.
    /// `None` derives it from the room radius.
    pub corridor_width: Option<usize>,
    pub elevation_threshold: f32,
    pub accept_probability: f32,
    pub max_scatter_count: usize,
    pub scatter_strategy: ScatterStrategy,
    pub floor_height_threshold: f32,
    pub surface_layers: usize,
    /// Alphamap resolution; zero means "match the grid".
    pub alphamap_width: usize,
    pub alphamap_height: usize,
    pub paint_source: PaintSource,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            detail_radius: 32,
            amplitude: 20.0,
            num_rooms: 5,
            room_radius: 8,
            corridor_width: None,
            elevation_threshold: 0.3,
            accept_probability: 0.02,
            max_scatter_count: 200,
            scatter_strategy: ScatterStrategy::FullScan,
            floor_height_threshold: 0.01,
            surface_layers: SURFACE_LAYER_COUNT,
            alphamap_width: 0,
            alphamap_height: 0,
            paint_source: PaintSource::Flattened,
        }
    }
}

impl DungeonConfig {
    pub fn resolved_corridor_width(&self) -> usize {
        self.corridor_width.unwrap_or_else(|| derived_corridor_width(self.room_radius))
    }

    pub fn alphamap_resolution(&self) -> (usize, usize) {
        let width = if self.alphamap_width == 0 { self.width } else { self.alphamap_width };
        let height = if self.alphamap_height == 0 { self.height } else { self.alphamap_height };
        (width, height)
    }

    /// Checks every parameter before any generation work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_extent("width", self.width)?;
        check_extent("height", self.height)?;
        check_extent("alphamap_width", self.alphamap_resolution().0)?;
        check_extent("alphamap_height", self.alphamap_resolution().1)?;

        if !self.amplitude.is_finite() {
            return Err(ConfigError::NonFinite { name: "amplitude", value: self.amplitude });
        }

        if self.room_radius == 0 {
            return Err(ConfigError::ZeroRoomRadius);
        }
        if self.room_radius * 2 >= self.width || self.room_radius * 2 >= self.height {
            return Err(ConfigError::RoomRadiusTooLarge {
                room_radius: self.room_radius,
                width: self.width,
                height: self.height,
            });
        }
        if self.resolved_corridor_width() == 0 {
            return Err(ConfigError::ZeroCorridorWidth);
        }

        check_unit("elevation_threshold", self.elevation_threshold)?;
        check_unit("accept_probability", self.accept_probability)?;

        let floor = self.floor_height_threshold;
        if floor.is_nan() || floor <= 0.0 || floor > 1.0 {
            return Err(ConfigError::InvalidFloorThreshold { value: floor });
        }
        if self.surface_layers < SURFACE_LAYER_COUNT {
            return Err(ConfigError::TooFewSurfaceLayers { layers: self.surface_layers });
        }
        Ok(())
    }
}

pub fn derived_corridor_width(room_radius: usize) -> usize {
    (room_radius / 2).max(2)
}

fn check_extent(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::NonPositiveDimension { name });
    }
    if value > MAX_GRID_EXTENT {
        return Err(ConfigError::DimensionTooLarge { name, value, max: MAX_GRID_EXTENT });
    }
    Ok(())
}

fn check_unit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}
