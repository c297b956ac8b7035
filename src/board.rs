//! Game board state: a grid of cells plus the ships placed on it.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::common::{GameError, GuessResult, Orientation, PlacementError};
use crate::config::{PlacementRule, BOARD_SIZE};
use crate::ship::{Ship, ShipType};

/// Attempts made by [`Board::random_placement`] before giving up.
const RANDOM_PLACEMENT_ATTEMPTS: usize = 100;

/// A fixed-size grid of cells and the fleet placed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    grid: Vec<Vec<Cell>>,
    ships: Vec<Ship>,
    #[serde(default)]
    placement: PlacementRule,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty standard-size board (no ships placed).
    pub fn new() -> Self {
        Self::with_size(BOARD_SIZE, BOARD_SIZE)
    }

    /// Create an empty `rows`×`cols` board where ships may touch.
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self::with_rule(rows, cols, PlacementRule::AllowTouching)
    }

    /// Create an empty `rows`×`cols` board using `placement` for new ships.
    pub fn with_rule(rows: usize, cols: usize, placement: PlacementRule) -> Self {
        let grid = (0..rows)
            .map(|r| (0..cols).map(|c| Cell::new(r, c)).collect())
            .collect();
        Board {
            rows,
            cols,
            grid,
            ships: Vec::new(),
            placement,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn placement_rule(&self) -> PlacementRule {
        self.placement
    }

    /// Whether (`row`, `col`) lies on the grid.
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Bounds-checked cell lookup.
    pub fn get_cell(&self, row: usize, col: usize) -> Result<&Cell, GameError> {
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(GameError::OutOfBounds { row, col })
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell, GameError> {
        self.grid
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(GameError::OutOfBounds { row, col })
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter().flatten()
    }

    /// Read-only view of placed ships.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// The ship owning (`row`, `col`), if any.
    pub fn ship_at(&self, row: usize, col: usize) -> Option<&Ship> {
        self.ships.iter().find(|s| s.contains(row, col))
    }

    /// Returns `true` when a fleet has been placed and every ship is sunk.
    ///
    /// A board without ships has nothing left to lose and reports `false`.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    /// Check whether a ship of `length` fits at (`row`, `col`) without
    /// breaking the board's placement rule.
    pub fn check_placement(
        &self,
        length: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        if length == 0 {
            return Err(PlacementError::EmptyShip);
        }
        let fits = match orientation {
            Orientation::Horizontal => {
                row < self.rows && col.checked_add(length).is_some_and(|end| end <= self.cols)
            }
            Orientation::Vertical => {
                col < self.cols && row.checked_add(length).is_some_and(|end| end <= self.rows)
            }
        };
        if !fits {
            return Err(PlacementError::OutOfBounds);
        }
        for i in 0..length {
            let (r, c) = orientation.step(row, col, i);
            if self.grid[r][c].is_occupied() {
                return Err(PlacementError::Overlap { row: r, col: c });
            }
        }
        if self.placement == PlacementRule::RequireGap {
            for i in 0..length {
                let (r, c) = orientation.step(row, col, i);
                if let Some((nr, nc)) = self.occupied_neighbour(r, c) {
                    return Err(PlacementError::TooClose { row: nr, col: nc });
                }
            }
        }
        Ok(())
    }

    fn occupied_neighbour(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        let rows = row.saturating_sub(1)..=(row + 1).min(self.rows - 1);
        rows.flat_map(|r| {
            (col.saturating_sub(1)..=(col + 1).min(self.cols - 1)).map(move |c| (r, c))
        })
        .find(|&(r, c)| self.grid[r][c].is_occupied())
    }

    /// Place `ship` starting at (`row`, `col`) and extending along `orientation`.
    pub fn place_ship(
        &mut self,
        mut ship: Ship,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        if ship.is_placed() {
            return Err(PlacementError::AlreadyPlaced.into());
        }
        self.check_placement(ship.length(), row, col, orientation)?;
        for i in 0..ship.length() {
            let (r, c) = orientation.step(row, col, i);
            ship.add_cell(&mut self.grid[r][c]);
        }
        debug!(
            "placed {} (length {}) at ({}, {}) {:?}",
            ship.name(),
            ship.length(),
            row,
            col,
            orientation
        );
        self.ships.push(ship);
        Ok(())
    }

    /// Returns a random valid (row, col, Orientation) for a ship of `length`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<(usize, usize, Orientation), PlacementError> {
        if length == 0 {
            return Err(PlacementError::EmptyShip);
        }
        let fits_h = self.rows > 0 && length <= self.cols;
        let fits_v = self.cols > 0 && length <= self.rows;
        if !fits_h && !fits_v {
            return Err(PlacementError::OutOfBounds);
        }
        for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
            let orient = match (fits_h, fits_v) {
                (true, true) if rng.random() => Orientation::Horizontal,
                (true, true) => Orientation::Vertical,
                (true, false) => Orientation::Horizontal,
                _ => Orientation::Vertical,
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (self.rows - 1, self.cols - length),
                Orientation::Vertical => (self.rows - length, self.cols - 1),
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            if self.check_placement(length, r, c, orient).is_ok() {
                return Ok((r, c, orient));
            }
        }
        Err(PlacementError::UnableToPlace)
    }

    /// Place every ship of `fleet` at random positions.
    pub fn place_fleet_randomly<R: Rng>(
        &mut self,
        rng: &mut R,
        fleet: &[ShipType],
    ) -> Result<(), GameError> {
        for def in fleet {
            let (r, c, orient) = self.random_placement(rng, def.length())?;
            self.place_ship(def.build(), r, c, orient)?;
        }
        Ok(())
    }

    /// Resolve a shot at (`row`, `col`): mark the cell attacked and count a
    /// hit against the owning ship. Nothing changes when an error is returned.
    pub(crate) fn receive_shot(&mut self, row: usize, col: usize) -> Result<GuessResult, GameError> {
        let target = self.cell_mut(row, col)?;
        if target.is_attacked() {
            return Err(GameError::AlreadyAttacked { row, col });
        }
        target.set_attacked();
        if !target.is_occupied() {
            return Ok(GuessResult::Miss);
        }
        match self.ships.iter_mut().find(|s| s.contains(row, col)) {
            Some(ship) => {
                ship.register_hit();
                if ship.is_sunk() {
                    Ok(GuessResult::Sink(ship.name().to_string()))
                } else {
                    Ok(GuessResult::Hit)
                }
            }
            // occupied cells always belong to a ship; treat a stray flag as a hit
            None => Ok(GuessResult::Hit),
        }
    }

    /// Verify the invariants tying grid cells to ships. Used on restored
    /// snapshots, which may have been edited by hand.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.grid.len() != self.rows || self.grid.iter().any(|r| r.len() != self.cols) {
            return Err(format!("grid is not {}x{}", self.rows, self.cols));
        }
        for (r, row) in self.grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.coord() != (r, c) {
                    return Err(format!("cell at ({r}, {c}) claims {:?}", cell.coord()));
                }
            }
        }
        let mut owned = vec![vec![false; self.cols]; self.rows];
        for ship in &self.ships {
            if ship.cells().len() != ship.length() {
                return Err(format!("ship {} covers the wrong number of cells", ship.name()));
            }
            let mut attacked = 0;
            for &(r, c) in ship.cells() {
                let cell = self
                    .get_cell(r, c)
                    .map_err(|_| format!("ship {} leaves the board", ship.name()))?;
                if !cell.is_occupied() || owned[r][c] {
                    return Err(format!("cell ({r}, {c}) has inconsistent ownership"));
                }
                owned[r][c] = true;
                if cell.is_attacked() {
                    attacked += 1;
                }
            }
            if ship.hits() != attacked {
                return Err(format!(
                    "ship {} records {} hits but {} of its cells were attacked",
                    ship.name(),
                    ship.hits(),
                    attacked
                ));
            }
        }
        if let Some(cell) = self.cells().find(|c| c.is_occupied() && !owned[c.row()][c.col()]) {
            return Err(format!("cell {:?} is occupied by no ship", cell.coord()));
        }
        Ok(())
    }
}
