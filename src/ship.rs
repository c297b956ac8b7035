//! Ships and the fleet entries they are built from.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// Type of ship: name and length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipType {
    name: String,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    /// Ship's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// An unplaced ship of this type.
    pub fn build(&self) -> Ship {
        Ship::new(self.name.clone(), self.length)
    }
}

/// A named vessel occupying an ordered run of cells on its board.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    name: String,
    length: usize,
    cells: Vec<(usize, usize)>,
    hits: usize,
}

impl Ship {
    /// A ship with no cells and no hits.
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
            cells: Vec::with_capacity(length),
            hits: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of hits taken so far.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Coordinates owned by this ship, in placement order.
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    /// `true` once the ship owns its cells.
    pub fn is_placed(&self) -> bool {
        !self.cells.is_empty()
    }

    /// Whether (`row`, `col`) belongs to this ship.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }

    /// Claim `cell` for this ship and mark it occupied.
    ///
    /// Overlap checks are the board's job; this only records the claim.
    pub fn add_cell(&mut self, cell: &mut Cell) {
        cell.set_occupied();
        self.cells.push(cell.coord());
    }

    /// Count one hit. Callers invoke this at most once per distinct cell.
    pub fn register_hit(&mut self) {
        self.hits += 1;
    }

    /// Check if the ship is sunk (hits reached its length).
    pub fn is_sunk(&self) -> bool {
        self.hits >= self.length
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: {:?}, length: {}, hits: {}, cells: {:?} }}",
            self.name, self.length, self.hits, self.cells,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_cell_marks_occupied() {
        let mut ship = Ship::new("Destroyer", 2);
        let mut cell = Cell::new(3, 4);
        ship.add_cell(&mut cell);
        assert!(cell.is_occupied());
        assert!(ship.contains(3, 4));
        assert!(!ship.contains(4, 3));
        assert!(ship.is_placed());
    }

    #[test]
    fn sunk_only_after_length_hits() {
        let mut ship = ShipType::new("Cruiser", 3).build();
        for _ in 0..2 {
            ship.register_hit();
            assert!(!ship.is_sunk());
        }
        ship.register_hit();
        assert!(ship.is_sunk());
        assert_eq!(ship.hits(), 3);
    }
}
