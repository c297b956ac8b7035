use naval_battle::{
    standard_fleet, Board, GameError, Orientation, PlacementError, PlacementRule, Ship, BOARD_SIZE,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_manual_place_marks_cells() {
    let mut board = Board::new();
    board
        .place_ship(Ship::new("Carrier", 5), 2, 3, Orientation::Horizontal)
        .unwrap();

    for c in 3..8 {
        assert!(board.get_cell(2, c).unwrap().is_occupied());
    }
    assert!(!board.get_cell(2, 8).unwrap().is_occupied());
    assert_eq!(board.cells().filter(|c| c.is_occupied()).count(), 5);

    let ship = &board.ships()[0];
    assert_eq!(ship.cells(), &[(2, 3), (2, 4), (2, 5), (2, 6), (2, 7)]);
    assert_eq!(board.ship_at(2, 7).map(Ship::name), Some("Carrier"));
    assert!(board.ship_at(3, 3).is_none());
}

#[test]
fn test_place_out_of_bounds() {
    let mut board = Board::new();
    let err = board
        .place_ship(Ship::new("Battleship", 4), 0, 7, Orientation::Horizontal)
        .unwrap_err();
    assert_eq!(err, GameError::InvalidPlacement(PlacementError::OutOfBounds));

    let err = board
        .place_ship(Ship::new("Battleship", 4), 7, 0, Orientation::Vertical)
        .unwrap_err();
    assert_eq!(err, GameError::InvalidPlacement(PlacementError::OutOfBounds));

    // exactly touching the edge is fine
    board
        .place_ship(Ship::new("Battleship", 4), 6, 0, Orientation::Vertical)
        .unwrap();
    assert!(board.ships()[0].contains(9, 0));
}

#[test]
fn test_place_overlap_rejected() {
    let mut board = Board::new();
    board
        .place_ship(Ship::new("Cruiser", 3), 4, 4, Orientation::Vertical)
        .unwrap();
    let err = board
        .place_ship(Ship::new("Destroyer", 2), 5, 3, Orientation::Horizontal)
        .unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidPlacement(PlacementError::Overlap { row: 5, col: 4 })
    );
    assert_eq!(board.ships().len(), 1);
    assert!(!board.get_cell(5, 3).unwrap().is_occupied());
}

#[test]
fn test_touching_allowed_unless_gap_required() {
    let mut loose = Board::new();
    loose
        .place_ship(Ship::new("Destroyer", 2), 0, 0, Orientation::Horizontal)
        .unwrap();
    loose
        .place_ship(Ship::new("Submarine", 3), 1, 0, Orientation::Horizontal)
        .unwrap();

    let mut strict = Board::with_rule(BOARD_SIZE, BOARD_SIZE, PlacementRule::RequireGap);
    strict
        .place_ship(Ship::new("Destroyer", 2), 0, 0, Orientation::Horizontal)
        .unwrap();
    let err = strict
        .place_ship(Ship::new("Submarine", 3), 1, 0, Orientation::Horizontal)
        .unwrap_err();
    assert!(matches!(
        err,
        GameError::InvalidPlacement(PlacementError::TooClose { .. })
    ));
}

#[test]
fn test_placed_ship_cannot_be_placed_again() {
    let mut first = Board::new();
    first
        .place_ship(Ship::new("Destroyer", 2), 0, 0, Orientation::Horizontal)
        .unwrap();
    let placed = first.ships()[0].clone();

    let mut second = Board::new();
    assert_eq!(
        second.place_ship(placed, 5, 5, Orientation::Vertical),
        Err(GameError::InvalidPlacement(PlacementError::AlreadyPlaced))
    );
    assert_eq!(
        second.place_ship(Ship::new("Ghost", 0), 5, 5, Orientation::Vertical),
        Err(GameError::InvalidPlacement(PlacementError::EmptyShip))
    );
}

#[test]
fn test_get_cell_bounds() {
    let board = Board::new();
    assert_eq!(board.get_cell(9, 9).unwrap().coord(), (9, 9));
    assert_eq!(
        board.get_cell(10, 0).unwrap_err(),
        GameError::OutOfBounds { row: 10, col: 0 }
    );
    assert_eq!(
        board.get_cell(0, 10).unwrap_err(),
        GameError::OutOfBounds { row: 0, col: 10 }
    );
}

#[test]
fn test_place_random_all_ships_no_overlap() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(42);
    let fleet = standard_fleet();
    board.place_fleet_randomly(&mut rng, &fleet).unwrap();

    assert_eq!(board.ships().len(), fleet.len());
    assert_eq!(
        board.cells().filter(|c| c.is_occupied()).count(),
        17,
        "all ships should be placed without overlap"
    );
    assert!(board.check_consistency().is_ok());
}

#[test]
fn test_random_placement_gives_up_when_full() {
    let mut board = Board::with_size(1, 2);
    board
        .place_ship(Ship::new("Raft", 1), 0, 0, Orientation::Horizontal)
        .unwrap();
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(
        board.random_placement(&mut rng, 2),
        Err(PlacementError::UnableToPlace)
    );
    assert_eq!(
        board.random_placement(&mut rng, 3),
        Err(PlacementError::OutOfBounds)
    );
    let (r, c, _) = board.random_placement(&mut rng, 1).unwrap();
    assert_eq!((r, c), (0, 1));
}
