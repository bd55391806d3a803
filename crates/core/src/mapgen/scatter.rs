//! Vegetation scattering over uncarved high ground.
//!
//! Scattering stops the moment the cap is reached. With `FullScan` that means the first rows
//! in raster order are populated preferentially whenever the cap binds. The bias is
//! intentional.

use tracing::debug;

use crate::config::ScatterStrategy;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::Pos;

use super::model::ScatterPoint;

const JITTER_EXTENT: f32 = 0.3;
const WIDTH_SCALE_RANGE: (f32, f32) = (0.8, 1.2);
const HEIGHT_SCALE_RANGE: (f32, f32) = (0.8, 1.5);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterRules {
    pub elevation_threshold: f32,
    pub accept_probability: f32,
    pub max_count: usize,
    pub strategy: ScatterStrategy,
}

/// Emits up to `rules.max_count` points on cells that are uncarved and above the threshold.
///
/// Each qualifying candidate consumes one unit draw for acceptance; an accepted candidate
/// then consumes four more (jitter x, jitter y, width scale, height scale).
pub fn scatter_vegetation(
    mask: &Grid<bool>,
    heights: &Grid<f32>,
    rules: &ScatterRules,
    rng: &mut impl RandomSource,
) -> Vec<ScatterPoint> {
    debug_assert_eq!(mask.dimensions(), heights.dimensions());
    let mut points = Vec::new();
    if rules.max_count == 0 || mask.is_empty() {
        return points;
    }

    match rules.strategy {
        ScatterStrategy::FullScan => {
            'scan: for y in 0..mask.height() {
                for x in 0..mask.width() {
                    if let Some(point) = try_scatter(mask, heights, x, y, rules, rng) {
                        points.push(point);
                        if points.len() >= rules.max_count {
                            break 'scan;
                        }
                    }
                }
            }
        }
        ScatterStrategy::RandomDraws { attempts } => {
            for _ in 0..attempts {
                let x = rng.range_i32(0, mask.width() as i32) as usize;
                let y = rng.range_i32(0, mask.height() as i32) as usize;
                if let Some(point) = try_scatter(mask, heights, x, y, rules, rng) {
                    points.push(point);
                    if points.len() >= rules.max_count {
                        break;
                    }
                }
            }
        }
    }

    debug!(points = points.len(), cap = rules.max_count, "mapgen.scatter.complete");
    points
}

fn try_scatter(
    mask: &Grid<bool>,
    heights: &Grid<f32>,
    x: usize,
    y: usize,
    rules: &ScatterRules,
    rng: &mut impl RandomSource,
) -> Option<ScatterPoint> {
    let elevation = heights[(x, y)];
    if mask[(x, y)] || elevation <= rules.elevation_threshold {
        return None;
    }
    if rng.unit_f32() >= rules.accept_probability {
        return None;
    }

    let jitter_x = rng.range_f32(-JITTER_EXTENT, JITTER_EXTENT);
    let jitter_y = rng.range_f32(-JITTER_EXTENT, JITTER_EXTENT);
    let width_scale = rng.range_f32(WIDTH_SCALE_RANGE.0, WIDTH_SCALE_RANGE.1);
    let height_scale = rng.range_f32(HEIGHT_SCALE_RANGE.0, HEIGHT_SCALE_RANGE.1);
    Some(ScatterPoint {
        pos: Pos { y: y as i32, x: x as i32 },
        elevation,
        jitter: (jitter_x, jitter_y),
        width_scale,
        height_scale,
    })
}
