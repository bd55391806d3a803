//! Error types surfaced by configuration validation and the generation pipeline.
//! Every configuration variant names the offending parameter so callers can report it verbatim.

use std::error::Error;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositiveDimension { name: &'static str },
    DimensionTooLarge { name: &'static str, value: usize, max: usize },
    ZeroRoomRadius,
    RoomRadiusTooLarge { room_radius: usize, width: usize, height: usize },
    ZeroCorridorWidth,
    OutOfUnitRange { name: &'static str, value: f32 },
    NonFinite { name: &'static str, value: f32 },
    InvalidFloorThreshold { value: f32 },
    TooFewSurfaceLayers { layers: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveDimension { name } => {
                write!(f, "`{name}` must be greater than zero")
            }
            ConfigError::DimensionTooLarge { name, value, max } => {
                write!(f, "`{name}` is {value}, above the supported maximum of {max}")
            }
            ConfigError::ZeroRoomRadius => write!(f, "`room_radius` must be greater than zero"),
            ConfigError::RoomRadiusTooLarge { room_radius, width, height } => write!(
                f,
                "`room_radius` {room_radius} leaves no valid room centre on a \
                 {width}x{height} grid (twice the radius must be below both extents)"
            ),
            ConfigError::ZeroCorridorWidth => {
                write!(f, "`corridor_width` must be at least 1")
            }
            ConfigError::OutOfUnitRange { name, value } => {
                write!(f, "`{name}` is {value}, expected a value in [0, 1]")
            }
            ConfigError::NonFinite { name, value } => {
                write!(f, "`{name}` is {value}, expected a finite number")
            }
            ConfigError::InvalidFloorThreshold { value } => {
                write!(f, "`floor_height_threshold` is {value}, expected a value in (0, 1]")
            }
            ConfigError::TooFewSurfaceLayers { layers } => {
                write!(f, "`surface_layers` is {layers}, the surface painter needs at least 3")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Clone, Debug, PartialEq)]
pub enum GenerateError {
    Config(ConfigError),
    HeightfieldShape { expected: (usize, usize), actual: (usize, usize) },
    NonFiniteHeight { x: usize, y: usize },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Config(error) => write!(f, "invalid configuration: {error}"),
            GenerateError::HeightfieldShape { expected, actual } => write!(
                f,
                "heightfield source returned a {}x{} grid, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            GenerateError::NonFiniteHeight { x, y } => {
                write!(f, "heightfield source returned a non-finite sample at ({x}, {y})")
            }
        }
    }
}

impl Error for GenerateError {}

impl From<ConfigError> for GenerateError {
    fn from(error: ConfigError) -> Self {
        GenerateError::Config(error)
    }
}
