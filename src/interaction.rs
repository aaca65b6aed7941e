//! Pointer-to-cell mapping for the drawing canvas.
//!
//! Kept free of UI types so the mapping stays testable headlessly; the egui
//! layer feeds in coordinates relative to the canvas origin.

use crate::grid::CellAddress;

/// Map canvas-relative coordinates to a cell by integer division against the
/// cell pixel size. Coordinates outside the grid return `None` and must be
/// ignored by the caller (no mutation, no error).
pub fn cell_at(x: f32, y: f32, cell_px: f32, grid_size: usize) -> Option<CellAddress> {
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let col = (x / cell_px).floor() as usize;
    let row = (y / cell_px).floor() as usize;
    if row < grid_size && col < grid_size {
        Some(CellAddress { row, col })
    } else {
        None
    }
}
