//! Zeroing of elevation under carved cells.

use crate::grid::Grid;

/// Sets every occupied cell's elevation to 0; unoccupied cells are left as they are.
pub fn flatten_occupied(heights: &mut Grid<f32>, mask: &Grid<bool>) {
    debug_assert_eq!(heights.dimensions(), mask.dimensions());
    for (height, &occupied) in heights.cells_mut().iter_mut().zip(mask.cells()) {
        if occupied {
            *height = 0.0;
        }
    }
}
