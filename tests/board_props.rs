use std::collections::BTreeSet;

use adaship::{
    coords, Board, Coordinate, DamageOutcome, Fleet, Orientation, SectionRef, ShipId,
    ShipTemplate,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

/// Board with single-tile blockers scattered by `seed` and an unplaced mover
/// ship of `mover_len` as the last ship of the fleet.
fn cluttered(width: usize, height: usize, seed: u64, mover_len: usize) -> (Board, Fleet, ShipId) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let blockers = rng.random_range(0..=(width * height) / 3);
    let mut templates: Vec<_> = (0..blockers)
        .map(|i| ShipTemplate::new(format!("Buoy{}", i), 1).unwrap())
        .collect();
    templates.push(ShipTemplate::new("Mover", mover_len).unwrap());
    let mut board = Board::new(width, height).unwrap();
    let mut fleet = Fleet::new(&mut board, &templates).unwrap();
    let ids: Vec<_> = fleet.ship_ids().collect();
    let (mover, buoys) = ids.split_last().unwrap();
    for &id in buoys {
        let start = board.random_tile(&mut rng, |t| t.is_free()).unwrap().coord();
        fleet.place_ship(&mut board, id, start, Orientation::Horizontal).unwrap();
    }
    (board, fleet, *mover)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn tile_at_iff_in_bounds(w in 1usize..20, h in 1usize..20, x in 0usize..25, y in 0usize..25) {
        let board = Board::new(w, h).unwrap();
        let tile = board.tile_at(Coordinate::new(x, y));
        prop_assert_eq!(tile.is_some(), x < w && y < h);
        if let Some(tile) = tile {
            prop_assert_eq!(tile.coord(), Coordinate::new(x, y));
        }
    }

    #[test]
    fn placement_is_contiguous_and_unplace_restores(
        w in 1usize..12,
        h in 1usize..12,
        seed in any::<u64>(),
        len in 1usize..6,
        x in 0usize..12,
        y in 0usize..12,
        orient in orientation(),
    ) {
        let (mut board, mut fleet, mover) = cluttered(w, h, seed, len);
        let free_before = board.free_tile_count();
        let board_before = board.clone();
        match fleet.place_ship(&mut board, mover, Coordinate::new(x, y), orient) {
            Ok(()) => {
                let tiles: Vec<_> = board
                    .tiles()
                    .iter()
                    .filter(|t| t.section().map(|s| s.ship) == Some(mover))
                    .map(|t| t.coord())
                    .collect();
                prop_assert_eq!(tiles.len(), len);
                let (start, end) = fleet.ship(mover).unwrap().span().unwrap();
                let line = board.span(start, end).unwrap();
                prop_assert_eq!(line.len(), len);
                let line_set: BTreeSet<_> = line.iter().copied().collect();
                let tile_set: BTreeSet<_> = tiles.iter().copied().collect();
                prop_assert_eq!(line_set, tile_set);
                if len > 1 {
                    match orient {
                        Orientation::Horizontal => prop_assert!(tiles.iter().all(|c| c.y == start.y)),
                        Orientation::Vertical => prop_assert!(tiles.iter().all(|c| c.x == start.x)),
                    }
                }
                prop_assert_eq!(board.free_tile_count(), free_before - len);

                fleet.unplace_ship(&mut board, mover).unwrap();
                prop_assert_eq!(board.free_tile_count(), free_before);
                prop_assert_eq!(&board, &board_before);
            }
            Err(_) => prop_assert_eq!(&board, &board_before),
        }
    }

    #[test]
    fn damage_in_any_order_destroys_once(len in 1usize..8, seed in any::<u64>()) {
        let mut board = Board::new(len, 1).unwrap();
        let mut fleet = Fleet::new(&mut board, &[ShipTemplate::new("Hulk", len).unwrap()]).unwrap();
        let id = fleet.ship_ids().next().unwrap();
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut SmallRng::seed_from_u64(seed));
        let mut destroyed_events = 0;
        for (n, &section) in order.iter().enumerate() {
            let outcome = fleet.damage_section(SectionRef { ship: id, section }).unwrap();
            if outcome == DamageOutcome::Destroyed {
                destroyed_events += 1;
                prop_assert_eq!(n, len - 1);
            }
            let again = fleet.damage_section(SectionRef { ship: id, section }).unwrap();
            prop_assert_eq!(again, DamageOutcome::AlreadyDamaged);
        }
        prop_assert_eq!(destroyed_events, 1);
        prop_assert_eq!(fleet.destroyed_count(), 1);
        prop_assert!(fleet.ship(id).unwrap().destroyed());
    }

    #[test]
    fn chain_reaction_resolves_closure(w in 1usize..15, h in 1usize..15, seed in any::<u64>(), density in 0.0f64..=1.0) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(w, h).unwrap();
        let mut fleet = Fleet::new(&mut board, &[]).unwrap();
        let coords: Vec<_> = board.tiles().iter().map(|t| t.coord()).collect();
        for &coord in &coords {
            if rng.random_bool(density) {
                board.lay_mine(coord).unwrap();
            }
        }
        let center = coords[rng.random_range(0..coords.len())];
        if board.tile_at(center).unwrap().mine().is_none() {
            board.lay_mine(center).unwrap();
        }
        let mined: BTreeSet<_> = board
            .tiles()
            .iter()
            .filter(|t| t.mine().is_some())
            .map(|t| t.coord())
            .collect();

        // expected chain by flood fill over adjacent mines
        let mut chain = BTreeSet::from([center]);
        let mut frontier = vec![center];
        while let Some(m) = frontier.pop() {
            for n in board.neighbours(m) {
                if mined.contains(&n) && chain.insert(n) {
                    frontier.push(n);
                }
            }
        }
        let expected: BTreeSet<_> = chain.iter().flat_map(|&m| board.neighbours(m)).collect();

        let detonation = board.detonate_mine(center, &mut fleet).unwrap();
        let exploded: BTreeSet<_> = detonation.exploded.iter().copied().collect();
        prop_assert_eq!(exploded.len(), detonation.exploded.len());
        prop_assert_eq!(exploded, chain);
        let affected: BTreeSet<_> = detonation.affected.iter().map(|(c, _)| *c).collect();
        prop_assert_eq!(affected.len(), detonation.affected.len());
        prop_assert_eq!(affected, expected);
    }

    #[test]
    fn letters_round_trip(i in 0usize..=coords::MAX_LETTER_INDEX) {
        let label = coords::index_to_letters(i).unwrap();
        prop_assert!(label.len() <= 2);
        prop_assert_eq!(coords::letters_to_index(&label), Some(i));
    }
}
