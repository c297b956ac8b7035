//! Players, their boards and the shots they have fired.

use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Seat of a participant in a two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// The other seat.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// One fired coordinate and whether it hit. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    row: usize,
    col: usize,
    hit: bool,
}

impl Shot {
    pub fn new(row: usize, col: usize, hit: bool) -> Self {
        Self { row, col, hit }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }
}

/// A named participant with an exclusively owned board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    board: Board,
    shots_fired: Vec<Shot>,
}

impl Player {
    /// A player with an empty standard board.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_board(name, Board::new())
    }

    pub fn with_board(name: impl Into<String>, board: Board) -> Self {
        Self {
            name: name.into(),
            board,
            shots_fired: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, for placing ships before play.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Shots fired so far, oldest first.
    pub fn shots(&self) -> &[Shot] {
        &self.shots_fired
    }

    /// Number of fired shots that hit.
    pub fn hits(&self) -> usize {
        self.shots_fired.iter().filter(|s| s.is_hit()).count()
    }

    /// Append `shot` to the history.
    pub fn record_shot(&mut self, shot: Shot) {
        self.shots_fired.push(shot);
    }
}
