//! Game-state engine for two-player "sink the fleet" battleship.
//!
//! Each player owns a board of cells with ships placed on it. Players take
//! turns firing at the opponent's board through [`Game::fire`] (or
//! [`Game::fire_shot`] by name) until one fleet is entirely sunk. Games can be
//! checkpointed to disk with the types in [`checkpoint`].

mod board;
mod cell;
pub mod checkpoint;
mod common;
mod config;
mod game;
mod logging;
mod player;
mod ship;

pub use board::*;
pub use cell::*;
pub use checkpoint::{BinaryFile, CheckPoint, CheckpointError, GameManager, JsonFile, Persistence};
pub use common::*;
pub use config::*;
pub use game::*;
pub use logging::{init_logging, LOG_ENV};
pub use player::*;
pub use ship::*;
