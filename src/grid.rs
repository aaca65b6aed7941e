//! Dense binary grid holding the current drawing.

/// One addressable cell position, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddress {
    pub row: usize,
    pub col: usize,
}

/// How a pointer event mutates the addressed cell.
///
/// Toggle is reserved for discrete clicks; drags use the idempotent
/// `Paint`/`Erase` forms so continuous motion never flickers a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintAction {
    /// Flip the cell between 0 and 1 (primary click).
    Toggle,
    /// Force the cell to 1 (primary drag).
    Paint,
    /// Force the cell to 0 (secondary click or drag).
    Erase,
}

/// Fixed-size N×N binary matrix, every cell always defined.
///
/// Created zero-filled; mutated one cell at a time by the interaction
/// handler; flattened row-major when a drawing is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a zero-filled grid with `size` cells per side.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current value of a cell, 0 or 1.
    pub fn get(&self, cell: CellAddress) -> u8 {
        self.cells[cell.row * self.size + cell.col]
    }

    /// Apply a paint action to a cell. Returns `true` if the value changed.
    pub fn apply(&mut self, cell: CellAddress, action: PaintAction) -> bool {
        let index = cell.row * self.size + cell.col;
        let current = self.cells[index];
        let next = match action {
            PaintAction::Toggle => current ^ 1,
            PaintAction::Paint => 1,
            PaintAction::Erase => 0,
        };
        self.cells[index] = next;
        next != current
    }

    /// True when no cell is set.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == 0)
    }

    /// Zero every cell. Idempotent; safe on an already-empty grid.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Row-major flattening: cell (r, c) lands at index `r * size + c`.
    pub fn flatten(&self) -> Vec<u8> {
        self.cells.clone()
    }
}
