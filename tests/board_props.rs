use battleship_server::{Board, Cell, Orientation, Ship, ShipKind, ShotOutcome, BOARD_SIZE, CELL_COUNT};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

const KINDS: [ShipKind; 4] = [ShipKind::Small, ShipKind::Medium, ShipKind::Large, ShipKind::Huge];

/// Fleet of ships that fit and never overlap, built by rejection sampling.
fn random_fleet(seed: u64) -> Vec<Ship> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut fleet: Vec<Ship> = Vec::new();
    let wanted = rng.random_range(1..=6);
    let mut attempts = 0;
    while fleet.len() < wanted && attempts < 500 {
        attempts += 1;
        let kind = KINDS[rng.random_range(0..KINDS.len())];
        let orientation = if rng.random_bool(0.5) {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        let anchor = Cell::new(rng.random_range(0..BOARD_SIZE), rng.random_range(0..BOARD_SIZE));
        let ship = Ship::of_kind(kind, anchor, orientation);
        if ship.fits() && !fleet.iter().any(|s| ship.cells().any(|c| s.cells().any(|o| o == c))) {
            fleet.push(ship);
        }
    }
    if fleet.is_empty() {
        fleet.push(Ship::of_kind(ShipKind::Small, Cell::new(0, 0), Orientation::Horizontal));
    }
    fleet
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placed_cells_match_fleet(seed in any::<u64>()) {
        let fleet = random_fleet(seed);
        let mut board = Board::new();
        board.place(&fleet).unwrap();

        let expected: usize = fleet.iter().map(|s| s.length).sum();
        prop_assert_eq!(board.ship_cell_count(), expected);
        prop_assert_eq!(board.ships(), fleet);
    }

    #[test]
    fn repeat_shot_changes_nothing(seed in any::<u64>(), x in 0..BOARD_SIZE, y in 0..BOARD_SIZE) {
        let mut board = Board::new();
        board.place(&random_fleet(seed)).unwrap();
        let cell = Cell::new(x, y);

        board.resolve_shot(cell).unwrap();
        let remaining = board.uncalled_count();
        let defeated = board.is_defeated();
        prop_assert!(board.resolve_shot(cell).is_err());
        prop_assert_eq!(board.uncalled_count(), remaining);
        prop_assert_eq!(board.is_defeated(), defeated);
    }

    #[test]
    fn firing_everywhere_defeats_exactly_at_last_ship_cell(seed in any::<u64>()) {
        let fleet = random_fleet(seed);
        let mut board = Board::new();
        board.place(&fleet).unwrap();
        let ship_cells = board.ship_cell_count();
        let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);

        let mut hits = 0;
        let mut sinks = 0;
        let mut shots = 0;
        while let Some(cell) = board.pick_uncalled_cell(&mut rng) {
            prop_assert!(!board.is_called(cell));
            let outcome = board.resolve_shot(cell).unwrap();
            shots += 1;
            prop_assert_eq!(board.uncalled_count(), CELL_COUNT - shots);
            if outcome != ShotOutcome::Miss {
                hits += 1;
            }
            if outcome == ShotOutcome::Sunk {
                sinks += 1;
            }
            prop_assert_eq!(board.is_defeated(), hits == ship_cells);
        }
        prop_assert_eq!(shots, CELL_COUNT);
        prop_assert_eq!(sinks, fleet.len());
    }
}
