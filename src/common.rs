//! Common types for the engine: errors, shot results and ship orientation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::PlayerId;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Maps the `horizontal` flag used by callers that think in booleans.
    pub fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// Coordinate of the `i`-th segment of a run starting at (`row`, `col`).
    pub(crate) fn step(self, row: usize, col: usize, i: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        }
    }
}

/// Result of a fired shot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessResult {
    /// Shot landed in open water.
    Miss,
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot sank a ship, carrying its name.
    Sink(String),
}

impl GuessResult {
    /// `true` for `Hit` and `Sink`.
    pub fn is_hit(&self) -> bool {
        !matches!(self, GuessResult::Miss)
    }
}

/// Reason a ship could not be placed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// The run would leave the grid.
    #[error("ship does not fit on the board at the requested position")]
    OutOfBounds,
    /// The run crosses a cell already owned by another ship.
    #[error("cell ({row}, {col}) is already occupied")]
    Overlap { row: usize, col: usize },
    /// The run touches another ship while gaps are required.
    #[error("cell ({row}, {col}) touches another ship")]
    TooClose { row: usize, col: usize },
    /// The ship already owns cells.
    #[error("ship is already placed")]
    AlreadyPlaced,
    /// A ship of length zero cannot be placed.
    #[error("ship has no length")]
    EmptyShip,
    /// Random placement ran out of attempts.
    #[error("unable to find a free position for the ship")]
    UnableToPlace,
}

/// Errors surfaced by board and game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinate ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("invalid placement: {0}")]
    InvalidPlacement(#[from] PlacementError),
    #[error("no player named {0:?} in this game")]
    UnknownPlayer(String),
    #[error("coordinate ({row}, {col}) was already attacked")]
    AlreadyAttacked { row: usize, col: usize },
    #[error("it is not {0:?}'s turn")]
    NotYourTurn(PlayerId),
    #[error("the game is already finished")]
    GameFinished,
}
