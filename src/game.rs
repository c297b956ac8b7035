//! Two-player game state machine: shot resolution, turn order and fleet checks.

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::common::{GameError, GuessResult};
use crate::config::GameConfig;
use crate::player::{Player, PlayerId, Shot};
use crate::ship::ShipType;

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Finished,
}

/// Two players, whose turn it is, and whether the game is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    players: [Player; 2],
    turn: PlayerId,
    finished: bool,
    winner: Option<PlayerId>,
    #[serde(default)]
    fleet: Vec<ShipType>,
}

impl Game {
    /// Create a standard game; both boards start empty.
    pub fn new(name_one: impl Into<String>, name_two: impl Into<String>) -> Self {
        Self::with_config(name_one, name_two, &GameConfig::default())
    }

    /// Create a game whose boards follow `config`.
    pub fn with_config(
        name_one: impl Into<String>,
        name_two: impl Into<String>,
        config: &GameConfig,
    ) -> Self {
        let board = || Board::with_rule(config.rows, config.cols, config.placement);
        let mut game = Self::from_players(
            Player::with_board(name_one, board()),
            Player::with_board(name_two, board()),
        );
        game.fleet = config.fleet.clone();
        game
    }

    /// Start a game from already prepared players. Player one moves first.
    pub fn from_players(one: Player, two: Player) -> Self {
        Self {
            players: [one, two],
            turn: PlayerId::One,
            finished: false,
            winner: None,
            fleet: Vec::new(),
        }
    }

    /// Fleet each player is expected to place.
    pub fn fleet(&self) -> &[ShipType] {
        &self.fleet
    }

    /// Place the configured fleet at random on both boards. Neither board
    /// changes unless both fleets fit.
    pub fn place_fleets_randomly<R: Rng>(&mut self, rng: &mut R) -> Result<(), GameError> {
        let mut one = self.players[0].board().clone();
        let mut two = self.players[1].board().clone();
        one.place_fleet_randomly(rng, &self.fleet)?;
        two.place_fleet_randomly(rng, &self.fleet)?;
        *self.players[0].board_mut() = one;
        *self.players[1].board_mut() = two;
        Ok(())
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Mutable player access, for ship placement before play.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Seat of the player called `name`. Player one wins on a tie; see
    /// [`Game::fire_shot`] for how shots resolve a shared name.
    pub fn player_id(&self, name: &str) -> Result<PlayerId, GameError> {
        [PlayerId::One, PlayerId::Two]
            .into_iter()
            .find(|id| self.player(*id).name() == name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))
    }

    /// Player expected to fire next.
    pub fn current_turn(&self) -> PlayerId {
        self.turn
    }

    pub fn is_player_one_turn(&self) -> bool {
        self.turn == PlayerId::One
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn status(&self) -> GameStatus {
        if self.finished {
            GameStatus::Finished
        } else {
            GameStatus::InProgress
        }
    }

    /// The player who sank the opposing fleet, once the game is over.
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Fire for the player called `name` at (`row`, `col`) on the opponent's board.
    ///
    /// When both players share `name` the shot goes to whoever's turn it is.
    pub fn fire_shot(&mut self, name: &str, row: usize, col: usize) -> Result<GuessResult, GameError> {
        let attacker = if self.names_clash() && self.player(self.turn).name() == name {
            self.turn
        } else {
            self.player_id(name)?
        };
        self.fire(attacker, row, col)
    }

    /// Whether both seats carry the same name.
    pub fn names_clash(&self) -> bool {
        self.players[0].name() == self.players[1].name()
    }

    /// Fire for `attacker` at (`row`, `col`) on the opponent's board.
    ///
    /// Every check runs before the first mutation, so an error leaves the
    /// game exactly as it was. On success the turn always passes to the other
    /// player, including on the shot that ends the game.
    pub fn fire(&mut self, attacker: PlayerId, row: usize, col: usize) -> Result<GuessResult, GameError> {
        if self.finished {
            return Err(GameError::GameFinished);
        }
        if attacker != self.turn {
            return Err(GameError::NotYourTurn(attacker));
        }
        let defender = attacker.opponent();
        let result = self.players[defender.index()]
            .board_mut()
            .receive_shot(row, col)?;
        self.players[attacker.index()].record_shot(Shot::new(row, col, result.is_hit()));
        debug!(
            "{} fired at ({}, {}): {:?}",
            self.player(attacker).name(),
            row,
            col,
            result
        );

        if let GuessResult::Sink(ship) = &result {
            info!("{} sank {}'s {}", self.player(attacker).name(), self.player(defender).name(), ship);
            self.check_fleets(attacker);
        }

        self.turn = self.turn.opponent();
        Ok(result)
    }

    /// End the game as soon as either side has lost its whole fleet.
    fn check_fleets(&mut self, attacker: PlayerId) {
        let defender = attacker.opponent();
        let defender_sunk = self.player(defender).board().all_sunk();
        let attacker_sunk = self.player(attacker).board().all_sunk();
        if defender_sunk || attacker_sunk {
            let winner = if defender_sunk { attacker } else { defender };
            self.finished = true;
            self.winner = Some(winner);
            info!("game over, {} wins", self.player(winner).name());
        }
    }

    /// Verify that boards, shot histories and flags agree with each other.
    pub fn check_consistency(&self) -> Result<(), String> {
        for id in [PlayerId::One, PlayerId::Two] {
            let board = self.player(id.opponent()).board();
            board.check_consistency()?;
            let shots = self.player(id).shots();
            if shots.len() != board.cells().filter(|c| c.is_attacked()).count() {
                return Err(format!(
                    "{} fired {} shots but the opposing board disagrees",
                    self.player(id).name(),
                    shots.len()
                ));
            }
            for shot in shots {
                let cell = board.get_cell(shot.row(), shot.col()).map_err(|e| e.to_string())?;
                if !cell.is_attacked() || cell.is_occupied() != shot.is_hit() {
                    return Err(format!("shot at ({}, {}) does not match the board", shot.row(), shot.col()));
                }
            }
        }
        let any_sunk = self.players.iter().any(|p| p.board().all_sunk());
        if self.finished != any_sunk || self.finished != self.winner.is_some() {
            return Err("finished flag disagrees with the fleets".to_string());
        }
        if let Some(winner) = self.winner {
            if !self.player(winner.opponent()).board().all_sunk() {
                return Err(format!("{:?} is recorded as winner but the opposing fleet floats", winner));
            }
        }
        let fired_one = self.player(PlayerId::One).shots().len();
        let fired_two = self.player(PlayerId::Two).shots().len();
        let expected_turn = match fired_one.checked_sub(fired_two) {
            Some(0) => PlayerId::One,
            Some(1) => PlayerId::Two,
            _ => {
                return Err(format!(
                    "shot counts {} and {} cannot come from alternating turns",
                    fired_one, fired_two
                ))
            }
        };
        if self.turn != expected_turn {
            return Err(format!("turn is {:?} but the shot counts say {:?}", self.turn, expected_turn));
        }
        Ok(())
    }
}
