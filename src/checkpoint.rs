//! Saving and restoring whole games.
//!
//! A checkpoint is a versioned snapshot of a [`Game`]: both players, their
//! boards with every cell and ship, the shot histories and the turn and
//! finished flags. [`JsonFile`] writes it as pretty-printed JSON; [`BinaryFile`]
//! uses bincode when size matters more than readability.
//!
//! Saving reports every failure. Loading treats any failure, including a
//! snapshot whose boards contradict each other, as "no checkpoint".

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::Game;

/// Format revision written into every checkpoint.
pub const CHECKPOINT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("checkpoint JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("checkpoint binary data is malformed: {0}")]
    Binary(#[from] bincode::Error),
    #[error("unsupported checkpoint version {0}")]
    Version(u32),
    #[error("checkpoint is inconsistent: {0}")]
    Inconsistent(String),
}

/// Serializable snapshot of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPoint {
    pub version: u32,
    pub game: Game,
}

impl CheckPoint {
    pub fn new(game: &Game) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            game: game.clone(),
        }
    }

    /// Unwrap the game after checking the version and board invariants.
    pub fn into_game(self) -> Result<Game, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::Version(self.version));
        }
        self.game
            .check_consistency()
            .map_err(CheckpointError::Inconsistent)?;
        Ok(self.game)
    }
}

/// Durable storage for a single checkpoint.
pub trait Persistence {
    /// Write a snapshot of `game`, replacing any previous one.
    fn save(&self, game: &Game) -> Result<(), CheckpointError>;

    /// Read the stored snapshot back.
    fn try_load(&self) -> Result<Game, CheckpointError>;

    /// Like [`Persistence::try_load`], but reports failures as absence.
    fn load(&self) -> Option<Game> {
        match self.try_load() {
            Ok(game) => Some(game),
            Err(e) => {
                warn!("no usable checkpoint: {}", e);
                None
            }
        }
    }
}

/// `path` with `.tmp` appended to its full file name.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write through a sibling temp file so a failed save never truncates the
/// previous checkpoint. The temp file is removed if anything fails.
fn write_replacing(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> Result<(), CheckpointError>,
) -> Result<(), CheckpointError> {
    let tmp = temp_path(path);
    let mut out = BufWriter::new(File::create(&tmp)?);
    let written = write(&mut out).and_then(|()| Ok(out.flush()?));
    drop(out);
    let written = written.and_then(|()| Ok(fs::rename(&tmp, path)?));
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written?;
    debug!("checkpoint written to {}", path.display());
    Ok(())
}

/// Human-readable JSON checkpoint file.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render `game` as the JSON text stored on disk.
    pub fn render(game: &Game) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(&CheckPoint::new(game))?)
    }

    /// Parse JSON checkpoint text.
    pub fn parse(s: &str) -> Result<Game, CheckpointError> {
        serde_json::from_str::<CheckPoint>(s)?.into_game()
    }
}

impl Persistence for JsonFile {
    fn save(&self, game: &Game) -> Result<(), CheckpointError> {
        write_replacing(&self.path, |out| {
            serde_json::to_writer_pretty(&mut *out, &CheckPoint::new(game))?;
            writeln!(out)?;
            Ok(())
        })
    }

    fn try_load(&self) -> Result<Game, CheckpointError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let checkpoint: CheckPoint = serde_json::from_reader(reader)?;
        checkpoint.into_game()
    }
}

/// Compact bincode checkpoint file.
#[derive(Debug, Clone)]
pub struct BinaryFile {
    path: PathBuf,
}

impl BinaryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for BinaryFile {
    fn save(&self, game: &Game) -> Result<(), CheckpointError> {
        write_replacing(&self.path, |out| {
            bincode::serialize_into(out, &CheckPoint::new(game))?;
            Ok(())
        })
    }

    fn try_load(&self) -> Result<Game, CheckpointError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let checkpoint: CheckPoint = bincode::deserialize_from(reader)?;
        checkpoint.into_game()
    }
}

/// The game being played together with the store its checkpoints go to.
pub struct GameManager<P: Persistence> {
    game: Game,
    store: P,
}

impl<P: Persistence> GameManager<P> {
    pub fn new(game: Game, store: P) -> Self {
        Self { game, store }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn into_game(self) -> Game {
        self.game
    }

    /// Snapshot the current game.
    pub fn save_checkpoint(&self) -> Result<(), CheckpointError> {
        self.store.save(&self.game)
    }

    /// Replace the current game with the stored one. Returns `false`, keeping
    /// the current game, when no usable checkpoint exists.
    pub fn load_checkpoint(&mut self) -> bool {
        match self.store.load() {
            Some(game) => {
                self.game = game;
                true
            }
            None => false,
        }
    }
}
