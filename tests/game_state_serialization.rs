use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use naval_battle::{
    BinaryFile, Game, GameManager, JsonFile, Persistence, PlayerId, BOARD_SIZE,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

fn temp_path(ext: &str) -> PathBuf {
    let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "naval-battle-test-{}-{}.{}",
        std::process::id(),
        n,
        ext
    ))
}

/// A game with random fleets and a random number of shots already fired.
fn played_game(seed: u64) -> Game {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = Game::new("A", "B");
    game.place_fleets_randomly(&mut rng).unwrap();
    let shots = rng.random_range(0..150);
    for _ in 0..shots {
        let row = rng.random_range(0..BOARD_SIZE);
        let col = rng.random_range(0..BOARD_SIZE);
        let _ = game.fire(game.current_turn(), row, col);
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn json_checkpoint_roundtrip(seed in any::<u64>()) {
        let game = played_game(seed);
        let store = JsonFile::new(temp_path("json"));
        store.save(&game).unwrap();
        let restored = store.load();
        let _ = std::fs::remove_file(store.path());
        prop_assert_eq!(restored, Some(game));
    }

    #[test]
    fn binary_checkpoint_roundtrip(seed in any::<u64>()) {
        let game = played_game(seed);
        let store = BinaryFile::new(temp_path("bin"));
        store.save(&game).unwrap();
        let restored = store.load();
        let _ = std::fs::remove_file(store.path());
        prop_assert_eq!(restored, Some(game));
    }
}

#[test]
fn restored_game_keeps_playing_identically() {
    let mut original = played_game(11);
    let mut restored = JsonFile::parse(&JsonFile::render(&original).unwrap()).unwrap();
    assert_eq!(restored.is_player_one_turn(), original.is_player_one_turn());
    assert_eq!(
        restored.player(PlayerId::Two).shots(),
        original.player(PlayerId::Two).shots()
    );
    for row in 0..BOARD_SIZE {
        let a = original.fire(original.current_turn(), row, row);
        let b = restored.fire(restored.current_turn(), row, row);
        assert_eq!(a, b);
    }
    assert_eq!(original, restored);
}

#[test]
fn missing_or_corrupt_checkpoint_loads_as_none() {
    let missing = JsonFile::new(temp_path("json"));
    assert!(missing.load().is_none());
    assert!(missing.try_load().is_err());

    let path = temp_path("json");
    std::fs::write(&path, "{\"version\": 1, \"game\": ").unwrap();
    assert!(JsonFile::new(&path).load().is_none());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn failed_save_is_reported() {
    let dir = temp_path("dir");
    let store = JsonFile::new(dir.join("nested").join("game.json"));
    assert!(store.save(&Game::new("A", "B")).is_err());
}

#[test]
fn manager_only_replaces_game_on_successful_load() {
    let path = temp_path("json");
    let mut manager = GameManager::new(played_game(3), JsonFile::new(&path));
    assert!(!manager.load_checkpoint());
    let current = manager.game().clone();

    manager.save_checkpoint().unwrap();
    manager
        .game_mut()
        .fire(current.current_turn(), 0, 0)
        .ok();
    assert!(manager.load_checkpoint());
    assert_eq!(manager.game(), &current);

    let _ = std::fs::remove_file(&path);
}
