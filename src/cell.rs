//! A single grid position.

use serde::{Deserialize, Serialize};

/// Occupancy and attack flags for one coordinate of a board.
///
/// Both flags only ever move from `false` to `true`; the board enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: usize,
    col: usize,
    occupied: bool,
    attacked: bool,
}

impl Cell {
    /// An empty, untouched cell at (`row`, `col`).
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            occupied: false,
            attacked: false,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// (row, col) pair identifying this cell on its board.
    pub fn coord(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn is_attacked(&self) -> bool {
        self.attacked
    }

    pub(crate) fn set_occupied(&mut self) {
        self.occupied = true;
    }

    pub(crate) fn set_attacked(&mut self) {
        self.attacked = true;
    }
}
