use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use naval_battle::{init_logging, Game, GameConfig, JsonFile, Persistence, PlayerId};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about = "Drive a battleship game stored in a JSON checkpoint")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a game with randomly placed fleets and write its checkpoint.
    New {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, help = "Fix RNG seed for reproducible layouts (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "JSON file overriding board size, fleet or placement rule")]
        config: Option<PathBuf>,
        player_one: String,
        player_two: String,
    },
    /// Fire one shot and update the checkpoint.
    Fire {
        #[arg(long)]
        checkpoint: PathBuf,
        player: String,
        row: usize,
        col: usize,
    },
    /// Print a summary of a checkpoint.
    Show {
        #[arg(long)]
        checkpoint: PathBuf,
    },
}

fn load(store: &JsonFile) -> anyhow::Result<Game> {
    store
        .try_load()
        .with_context(|| format!("cannot load checkpoint {}", store.path().display()))
}

fn summary(game: &Game) -> serde_json::Value {
    let side = |id: PlayerId| {
        let player = game.player(id);
        json!({
            "name": player.name(),
            "shots": player.shots().len(),
            "hits": player.hits(),
            "ships_afloat": player.board().ships().iter().filter(|s| !s.is_sunk()).count(),
        })
    };
    json!({
        "player_one": side(PlayerId::One),
        "player_two": side(PlayerId::Two),
        "turn": game.player(game.current_turn()).name(),
        "finished": game.is_finished(),
        "winner": game.winner().map(|id| game.player(id).name()),
    })
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::New {
            out,
            seed,
            config,
            player_one,
            player_two,
        } => {
            if player_one == player_two {
                bail!("players must have different names, both are {:?}", player_one);
            }
            let config = match config {
                Some(path) => GameConfig::load(&path)
                    .with_context(|| format!("cannot read config {}", path.display()))?,
                None => GameConfig::default(),
            };
            let mut rng = match seed {
                Some(s) => SmallRng::seed_from_u64(s),
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            let mut game = Game::with_config(player_one, player_two, &config);
            game.place_fleets_randomly(&mut rng)
                .map_err(|e| anyhow!(e))?;
            JsonFile::new(out).save(&game)?;
            println!("{}", serde_json::to_string(&summary(&game))?);
        }
        Commands::Fire {
            checkpoint,
            player,
            row,
            col,
        } => {
            let store = JsonFile::new(checkpoint);
            let mut game = load(&store)?;
            let result = game.fire_shot(&player, row, col)?;
            store.save(&game)?;
            let report = json!({
                "hit": result.is_hit(),
                "result": result,
                "game": summary(&game),
            });
            println!("{}", serde_json::to_string(&report)?);
        }
        Commands::Show { checkpoint } => {
            let game = load(&JsonFile::new(checkpoint))?;
            println!("{}", serde_json::to_string_pretty(&summary(&game))?);
        }
    }
    Ok(())
}
