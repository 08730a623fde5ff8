use battleships::{Board, Coord, Glyph, Orientation, ShotResult, STANDARD_FLEET};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

const SIZE: usize = 10;

fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(SIZE);
    board.place_random_fleet(&mut rng, &STANDARD_FLEET).unwrap();
    board
}

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Right), Just(Orientation::Down)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every square a successful placement covers points back at the new ship,
    /// and the ship starts with one hit point per square.
    #[test]
    fn placement_links_squares(
        length in 1..=5usize,
        x in 0..SIZE,
        y in 0..SIZE,
        orient in orientation(),
    ) {
        let mut board = Board::new(SIZE);
        let placed = board.place_ship(length, Coord::new(x, y), orient);
        let fits = match orient {
            Orientation::Right => x + length <= SIZE,
            Orientation::Down => y + length <= SIZE,
        };
        prop_assert_eq!(placed.is_ok(), fits);
        if let Ok(ship) = placed {
            let ship = ship.clone();
            prop_assert_eq!(ship.hit_points(), length);
            prop_assert_eq!(ship.cells().len(), length);
            for &cell in ship.cells() {
                prop_assert_eq!(board.ship_at(cell).map(|s| s.id()), Some(ship.id()));
            }
        } else {
            prop_assert!(board.ships().is_empty());
        }
    }

    /// A ship reports sunk exactly once all of its squares are hit, and stays sunk.
    #[test]
    fn sunk_exactly_when_all_hit(seed in any::<u64>(), shots in 0..300usize) {
        let mut board = random_board(seed);
        let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);
        let mut was_sunk = vec![false; board.ships().len()];
        for _ in 0..shots {
            let x = rng.random_range(0..SIZE);
            let y = rng.random_range(0..SIZE);
            let result = board.shoot(x, y);
            for (i, ship) in board.ships().iter().enumerate() {
                let all_hit = ship
                    .cells()
                    .iter()
                    .all(|&c| board.square(c).unwrap().is_hit());
                prop_assert_eq!(ship.is_sunk(), all_hit);
                prop_assert!(!was_sunk[i] || ship.is_sunk());
                was_sunk[i] = ship.is_sunk();
            }
            let expected = match board.ship_at(Coord::new(x, y)) {
                None => ShotResult::Miss,
                Some(ship) if ship.is_sunk() => ShotResult::Sunk,
                Some(_) => ShotResult::Hit,
            };
            prop_assert_eq!(result, expected);
        }
    }

    /// The public view never shows a ship letter, so hidden ships stay blank.
    #[test]
    fn public_view_hides_ships(seed in any::<u64>(), shots in 0..100usize) {
        let mut board = random_board(seed);
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
        for _ in 0..shots {
            board.shoot(rng.random_range(0..SIZE), rng.random_range(0..SIZE));
        }
        let view = board.public_view();
        for (y, row) in view.board.iter().enumerate() {
            for (x, glyph) in row.iter().enumerate() {
                prop_assert!(!matches!(glyph, Glyph::Ship(_)));
                let square = board.square(Coord::new(x, y)).unwrap();
                if !square.is_hit() {
                    prop_assert_eq!(*glyph, Glyph::Blank);
                }
            }
        }
        // A five ship fleet is lettered a to e.
        let json = serde_json::to_string(&view).unwrap();
        for letter in 'a'..='e' {
            let quoted = format!("\"{}\"", letter);
            prop_assert!(!json.contains(&quoted), "ship letter {} leaked", letter);
        }
    }

    /// Shooting an empty square again changes nothing after the first time.
    #[test]
    fn repeated_miss_is_idempotent(seed in any::<u64>(), x in 0..SIZE, y in 0..SIZE) {
        let mut board = random_board(seed);
        prop_assume!(board.ship_at(Coord::new(x, y)).is_none());
        prop_assert_eq!(board.shoot(x, y), ShotResult::Miss);
        let after_first = board.clone();
        for _ in 0..3 {
            prop_assert_eq!(board.shoot(x, y), ShotResult::Miss);
            prop_assert_eq!(&board, &after_first);
        }
    }
}
