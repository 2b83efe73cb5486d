/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct used to speed up the connect
 * pass. It divides the canvas into square cells no smaller than the connect
 * distance, so any pair closer than that distance lies in the same or an
 * adjacent cell.
 *
 * Particles pushed off the canvas are clamped into the border cells. Clamping
 * never moves two cells further apart, so no close pair is lost.
 */

use nannou::prelude::*;

pub struct SpatialGrid {
    pub cell_size: f32,
    pub grid: Vec<Vec<usize>>,
    pub columns: usize,
    pub rows: usize,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        let columns = cells_along(width, cell_size);
        let rows = cells_along(height, cell_size);

        Self {
            cell_size,
            grid: vec![Vec::new(); columns * rows],
            columns,
            rows,
        }
    }

    // Convert canvas coordinates to (column, row), clamped to the grid
    #[inline]
    pub fn cell_coords(&self, pos: Vec2) -> (usize, usize) {
        (
            clamp_cell(pos.x / self.cell_size, self.columns),
            clamp_cell(pos.y / self.cell_size, self.rows),
        )
    }

    // Clear the grid
    pub fn clear(&mut self) {
        for cell in &mut self.grid {
            cell.clear();
        }
    }

    // Insert a particle into the grid
    #[inline]
    pub fn insert(&mut self, index: usize, position: Vec2) {
        let (column, row) = self.cell_coords(position);
        self.grid[row * self.columns + column].push(index);
    }

    // Rebuild the grid from a full set of positions
    pub fn rebuild<I: IntoIterator<Item = Vec2>>(&mut self, positions: I) {
        self.clear();
        for (index, position) in positions.into_iter().enumerate() {
            self.insert(index, position);
        }
    }

    // Indices in the cell containing `position` and its 8 neighbours
    pub fn get_nearby_indices(&self, position: Vec2) -> Vec<usize> {
        let (column, row) = self.cell_coords(position);
        let mut result = Vec::new();

        for check_row in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
            let row_start = check_row * self.columns;
            for check_column in column.saturating_sub(1)..=(column + 1).min(self.columns - 1) {
                result.extend_from_slice(&self.grid[row_start + check_column]);
            }
        }

        result
    }
}

fn cells_along(extent: f32, cell_size: f32) -> usize {
    if extent.is_finite() && extent > 0.0 && cell_size > 0.0 {
        ((extent / cell_size).ceil() as usize).max(1)
    } else {
        1
    }
}

fn clamp_cell(coord: f32, count: usize) -> usize {
    // NaN saturates to 0 in the cast
    coord.floor().clamp(0.0, (count - 1) as f32) as usize
}
