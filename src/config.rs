//! Board dimensions, fleet composition and placement rules.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ship::ShipType;

pub const BOARD_SIZE: usize = 10;

/// The classic five-ship fleet.
pub fn standard_fleet() -> Vec<ShipType> {
    vec![
        ShipType::new("Carrier", 5),
        ShipType::new("Battleship", 4),
        ShipType::new("Cruiser", 3),
        ShipType::new("Submarine", 3),
        ShipType::new("Destroyer", 2),
    ]
}

/// Whether ships may sit next to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementRule {
    /// Only overlapping is forbidden.
    #[default]
    AllowTouching,
    /// Ships must also keep one free cell around them, diagonals included.
    RequireGap,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must have at least one row and one column")]
    EmptyBoard,
    #[error("fleet must contain at least one ship")]
    EmptyFleet,
    #[error("ship {0:?} has zero length")]
    ZeroLengthShip(String),
    #[error("ship {name:?} of length {length} does not fit on a {rows}x{cols} board")]
    ShipTooLong {
        name: String,
        length: usize,
        rows: usize,
        cols: usize,
    },
    #[error("fleet needs {cells} cells but a {rows}x{cols} board only has {available}")]
    FleetTooLarge {
        cells: usize,
        rows: usize,
        cols: usize,
        available: usize,
    },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings shared by both boards of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub fleet: Vec<ShipType>,
    pub placement: PlacementRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_SIZE,
            cols: BOARD_SIZE,
            fleet: standard_fleet(),
            placement: PlacementRule::AllowTouching,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; absent fields keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.fleet.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        for ship in &self.fleet {
            if ship.length() == 0 {
                return Err(ConfigError::ZeroLengthShip(ship.name().to_string()));
            }
            if ship.length() > self.rows.max(self.cols) {
                return Err(ConfigError::ShipTooLong {
                    name: ship.name().to_string(),
                    length: ship.length(),
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        }
        let available = self.rows.saturating_mul(self.cols);
        if self.total_ship_cells() > available {
            return Err(ConfigError::FleetTooLarge {
                cells: self.total_ship_cells(),
                rows: self.rows,
                cols: self.cols,
                available,
            });
        }
        Ok(())
    }

    /// Total number of ship segments in the fleet.
    pub fn total_ship_cells(&self) -> usize {
        self.fleet.iter().map(ShipType::length).sum()
    }
}
