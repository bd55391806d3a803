//! Surface layer classification into alphamap blend weights.
//!
//! The alphamap, occupancy mask and heightfield may each have their own resolution. Every
//! texture sample is mapped into mask space and height space independently by nearest-cell
//! rounding, then classified:
//! - floor: the mask cell is carved and its height is below the floor threshold;
//! - wall: otherwise, when any cell of the 3x3 mask neighborhood is carved;
//! - exterior: everything else.
//!
//! This yields a one-cell wall ring around every carved region.

use tracing::debug;

use crate::error::ConfigError;
use crate::grid::Grid;
use crate::types::{SURFACE_LAYER_COUNT, SurfaceLayer};

use super::model::AlphaMap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintRules {
    pub resolution: (usize, usize),
    pub floor_height_threshold: f32,
    pub surface_layers: usize,
}

pub fn paint_surface(
    mask: &Grid<bool>,
    heights: &Grid<f32>,
    rules: &PaintRules,
) -> Result<AlphaMap, ConfigError> {
    if rules.surface_layers < SURFACE_LAYER_COUNT {
        return Err(ConfigError::TooFewSurfaceLayers { layers: rules.surface_layers });
    }
    let (samples_x, samples_y) = rules.resolution;
    for (name, extent) in [
        ("alphamap_width", samples_x),
        ("alphamap_height", samples_y),
        ("width", mask.width().min(heights.width())),
        ("height", mask.height().min(heights.height())),
    ] {
        if extent == 0 {
            return Err(ConfigError::NonPositiveDimension { name });
        }
    }

    let alphamap = Grid::from_fn(samples_x, samples_y, |x, y| {
        let mask_cell =
            (nearest_cell(x, samples_x, mask.width()), nearest_cell(y, samples_y, mask.height()));
        let height_cell = (
            nearest_cell(x, samples_x, heights.width()),
            nearest_cell(y, samples_y, heights.height()),
        );
        classify_sample(mask, mask_cell, heights[height_cell], rules.floor_height_threshold)
            .weights()
    });
    debug!(samples_x, samples_y, "mapgen.surface.painted");
    Ok(alphamap)
}

/// Classifies one sample given its mask-space cell and the elevation sampled for it.
pub fn classify_sample(
    mask: &Grid<bool>,
    (x, y): (usize, usize),
    elevation: f32,
    floor_height_threshold: f32,
) -> SurfaceLayer {
    if mask[(x, y)] && elevation < floor_height_threshold {
        return SurfaceLayer::Floor;
    }
    if mask.neighborhood(x, y).any(|&carved| carved) {
        SurfaceLayer::Wall
    } else {
        SurfaceLayer::Exterior
    }
}

/// Maps sample `index` of `samples` onto the nearest of `target` cells.
fn nearest_cell(index: usize, samples: usize, target: usize) -> usize {
    let unit = index as f64 / samples as f64;
    ((unit * target as f64).round() as usize).min(target - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(resolution: (usize, usize)) -> PaintRules {
        PaintRules { resolution, floor_height_threshold: 0.01, surface_layers: 3 }
    }

    fn plus_mask() -> Grid<bool> {
        Grid::from_fn(7, 7, |x, y| {
            (x == 3 && (2..=4).contains(&y)) || (y == 3 && (2..=4).contains(&x))
        })
    }

    #[test]
    fn matching_resolutions_classify_floor_wall_and_exterior() {
        let mask = plus_mask();
        let heights = Grid::from_fn(7, 7, |x, y| if mask[(x, y)] { 0.0 } else { 0.6 });
        let alphamap = paint_surface(&mask, &heights, &rules((7, 7))).expect("valid rules");

        for (x, y, weights) in alphamap.iter() {
            assert_eq!(weights.iter().sum::<f32>(), 1.0);
            let layer = SurfaceLayer::dominant(weights);
            let expected = if mask[(x, y)] {
                SurfaceLayer::Floor
            } else if mask.neighborhood(x, y).any(|&carved| carved) {
                SurfaceLayer::Wall
            } else {
                SurfaceLayer::Exterior
            };
            assert_eq!(layer, expected, "sample ({x}, {y})");
        }
        assert_eq!(SurfaceLayer::dominant(&alphamap[(2, 2)]), SurfaceLayer::Wall);
        assert_eq!(SurfaceLayer::dominant(&alphamap[(0, 0)]), SurfaceLayer::Exterior);
    }

    #[test]
    fn carved_cell_above_floor_threshold_is_a_wall() {
        let mask = plus_mask();
        let heights = Grid::new(7, 7, 0.4);
        let alphamap = paint_surface(&mask, &heights, &rules((7, 7))).expect("valid rules");
        assert_eq!(SurfaceLayer::dominant(&alphamap[(3, 3)]), SurfaceLayer::Wall);
    }

    #[test]
    fn finer_alphamap_upsamples_the_mask() {
        let mask = Grid::from_fn(4, 4, |x, y| x >= 2 && y >= 2);
        let heights = Grid::new(4, 4, 0.0);
        let alphamap = paint_surface(&mask, &heights, &rules((8, 8))).expect("valid rules");

        assert_eq!(alphamap.dimensions(), (8, 8));
        assert_eq!(SurfaceLayer::dominant(&alphamap[(7, 7)]), SurfaceLayer::Floor);
        assert_eq!(SurfaceLayer::dominant(&alphamap[(0, 0)]), SurfaceLayer::Exterior);
        assert_eq!(SurfaceLayer::dominant(&alphamap[(2, 2)]), SurfaceLayer::Wall);
    }

    #[test]
    fn heightfield_is_sampled_at_its_own_resolution() {
        let mask = Grid::new(4, 4, true);
        let heights = Grid::from_fn(2, 2, |x, _| if x == 0 { 0.0 } else { 0.9 });
        let alphamap = paint_surface(&mask, &heights, &rules((4, 4))).expect("valid rules");

        assert_eq!(SurfaceLayer::dominant(&alphamap[(0, 1)]), SurfaceLayer::Floor);
        assert_eq!(SurfaceLayer::dominant(&alphamap[(3, 1)]), SurfaceLayer::Wall);
    }

    #[test]
    fn too_few_layers_is_a_precondition_failure() {
        let mask = Grid::new(3, 3, false);
        let heights = Grid::new(3, 3, 0.0);
        let result =
            paint_surface(&mask, &heights, &PaintRules { surface_layers: 2, ..rules((3, 3)) });
        assert_eq!(result, Err(ConfigError::TooFewSurfaceLayers { layers: 2 }));
    }

    #[test]
    fn empty_resolution_is_rejected() {
        let mask = Grid::new(3, 3, false);
        let heights = Grid::new(3, 3, 0.0);
        let result = paint_surface(&mask, &heights, &rules((0, 3)));
        assert_eq!(result, Err(ConfigError::NonPositiveDimension { name: "alphamap_width" }));
    }

    #[test]
    fn nearest_cell_is_identity_at_matching_resolution_and_clamped_otherwise() {
        for index in 0..37 {
            assert_eq!(nearest_cell(index, 37, 37), index);
        }
        assert_eq!(nearest_cell(7, 8, 4), 3);
        assert_eq!(nearest_cell(0, 8, 4), 0);
    }
}
