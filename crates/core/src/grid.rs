//! Fixed-size row-major grids shared by every pipeline stage.
//! Cells are addressed by `(x, y)` and stored at `y * width + x`; a grid never resizes.

use std::ops::{Index, IndexMut, RangeInclusive};

use crate::types::Pos;

#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self { width, height, cells: vec![fill; width * height] }
    }

    /// Sets every in-bounds cell of the inclusive rectangle spanned by the two corners.
    /// Corners may lie outside the grid; the rectangle is clipped.
    pub fn fill_rect(&mut self, corner_a: Pos, corner_b: Pos, value: T) {
        let Some(columns) = clipped_span(corner_a.x, corner_b.x, self.width) else {
            return;
        };
        let Some(rows) = clipped_span(corner_a.y, corner_b.y, self.height) else {
            return;
        };
        for y in rows {
            let row_start = y * self.width;
            for x in columns.clone() {
                self.cells[row_start + x] = value.clone();
            }
        }
    }
}

impl<T> Grid<T> {
    pub fn from_fn(width: usize, height: usize, mut cell: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(cell(x, y));
            }
        }
        Self { width, height, cells }
    }

    /// Wraps row-major cells, or returns `None` when the length does not match the extents.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Option<Self> {
        (cells.len() == width * height).then_some(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        (x < self.width && y < self.height).then(|| &self.cells[y * self.width + x])
    }

    pub fn at(&self, pos: Pos) -> Option<&T> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.get(pos.x as usize, pos.y as usize)
    }

    /// Iterates `(x, y, cell)` in raster order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| (index % width, index / width, cell))
    }

    /// Cells of the 3x3 block centred on `(x, y)`, including the centre, clipped to bounds.
    pub fn neighborhood(&self, x: usize, y: usize) -> impl Iterator<Item = &T> + '_ {
        let columns = x.saturating_sub(1)..=(x + 1).min(self.width.saturating_sub(1));
        let rows = y.saturating_sub(1)..=(y + 1).min(self.height.saturating_sub(1));
        rows.flat_map(move |row| columns.clone().map(move |column| &self[(column, row)]))
    }

    pub fn map<U>(&self, convert: impl FnMut(&T) -> U) -> Grid<U> {
        let cells = self.cells.iter().map(convert).collect();
        Grid { width: self.width, height: self.height, cells }
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) outside grid");
        &self.cells[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) outside grid");
        &mut self.cells[y * self.width + x]
    }
}

/// Inclusive index span between `from` and `to` (either order) clipped to `[0, len)`.
pub(crate) fn clipped_span(from: i32, to: i32, len: usize) -> Option<RangeInclusive<usize>> {
    if len == 0 {
        return None;
    }
    let low = i64::from(from.min(to)).max(0);
    let high = i64::from(from.max(to)).min(len as i64 - 1);
    (low <= high).then(|| low as usize..=high as usize)
}
