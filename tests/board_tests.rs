use adaship::{Board, BoardError, Coordinate, Orientation, ShipId, TileState};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn c(x: usize, y: usize) -> Coordinate {
    Coordinate::new(x, y)
}

/// Claim `tiles` for a throwaway ship id; the board does not check ids.
fn occupy(board: &mut Board, tiles: &[Coordinate]) {
    board.claim_tiles(tiles, fake_ship()).unwrap();
}

fn fake_ship() -> ShipId {
    let mut scratch = Board::new(1, 1).unwrap();
    let fleet =
        adaship::Fleet::new(&mut scratch, &[adaship::ShipTemplate::new("Blocker", 1).unwrap()])
            .unwrap();
    let ids: Vec<_> = fleet.ship_ids().collect();
    ids[0]
}

#[test]
fn test_new_rejects_empty_dimensions() {
    assert_eq!(
        Board::new(0, 5).unwrap_err(),
        BoardError::InvalidDimensions { width: 0, height: 5 }
    );
    assert!(Board::new(5, 0).is_err());
    assert_eq!(Board::new(1, 1).unwrap().tiles().len(), 1);
}

#[test]
fn test_tiles_in_construction_order() {
    let board = Board::new(3, 2).unwrap();
    let coords: Vec<_> = board.tiles().iter().map(|t| t.coord()).collect();
    assert_eq!(coords, vec![c(0, 1), c(1, 1), c(2, 1), c(0, 0), c(1, 0), c(2, 0)]);
    for tile in board.tiles() {
        assert_eq!(board.tile_at(tile.coord()), Some(tile));
        assert_eq!(tile.state(), TileState::None);
        assert!(tile.is_free());
        assert!(tile.mine().is_none());
    }
}

#[test]
fn test_tile_at_out_of_range() {
    let board = Board::new(4, 6).unwrap();
    assert!(board.tile_at(c(3, 5)).is_some());
    assert!(board.tile_at(c(4, 0)).is_none());
    assert!(board.tile_at(c(0, 6)).is_none());
    assert!(board.tile_at(c(usize::MAX, usize::MAX)).is_none());
}

#[test]
fn test_run_extends_east_first() {
    let board = Board::new(10, 10).unwrap();
    let run = board.find_continuous_run(c(5, 5), Orientation::Horizontal, 3).unwrap();
    assert_eq!(run, vec![c(5, 5), c(6, 5), c(7, 5)]);
}

#[test]
fn test_run_falls_back_west_when_east_blocked() {
    let mut board = Board::new(10, 10).unwrap();
    occupy(&mut board, &[c(7, 5)]);
    let mut run = board.find_continuous_run(c(5, 5), Orientation::Horizontal, 3).unwrap();
    run.sort();
    assert_eq!(run, vec![c(3, 5), c(4, 5), c(5, 5)]);
}

#[test]
fn test_run_falls_back_west_at_edge() {
    let board = Board::new(10, 10).unwrap();
    let run = board.find_continuous_run(c(9, 0), Orientation::Horizontal, 4).unwrap();
    assert_eq!(run, vec![c(9, 0), c(8, 0), c(7, 0), c(6, 0)]);
}

#[test]
fn test_vertical_run_north_then_south() {
    let mut board = Board::new(10, 10).unwrap();
    let run = board.find_continuous_run(c(2, 2), Orientation::Vertical, 3).unwrap();
    assert_eq!(run, vec![c(2, 2), c(2, 3), c(2, 4)]);

    occupy(&mut board, &[c(2, 4)]);
    let run = board.find_continuous_run(c(2, 2), Orientation::Vertical, 3).unwrap();
    assert_eq!(run, vec![c(2, 2), c(2, 1), c(2, 0)]);
}

#[test]
fn test_no_run_found() {
    let mut board = Board::new(5, 5).unwrap();
    occupy(&mut board, &[c(0, 2), c(4, 2)]);
    assert_eq!(
        board.find_continuous_run(c(2, 2), Orientation::Horizontal, 4),
        Err(BoardError::NoRunFound)
    );
    assert_eq!(
        board.find_continuous_run(c(0, 2), Orientation::Vertical, 2),
        Err(BoardError::NoRunFound)
    );
    assert_eq!(
        board.find_continuous_run(c(2, 2), Orientation::Vertical, 6),
        Err(BoardError::NoRunFound)
    );
    assert_eq!(
        board.find_continuous_run(c(5, 2), Orientation::Vertical, 1),
        Err(BoardError::InvalidCoordinate { x: 5, y: 2 })
    );
}

#[test]
fn test_claim_and_unclaim_counts() {
    let mut board = Board::new(6, 6).unwrap();
    let id = fake_ship();
    let run = board.find_continuous_run(c(1, 1), Orientation::Horizontal, 3).unwrap();
    assert_eq!(board.claim_tiles(&run, id).unwrap(), 3);
    assert_eq!(board.free_tile_count(), 33);
    for (i, coord) in run.iter().enumerate() {
        let section = board.tile_at(*coord).unwrap().section().unwrap();
        assert_eq!(section.ship, id);
        assert_eq!(section.section, i);
    }

    // claiming over a claimed tile changes nothing
    assert_eq!(
        board.claim_tiles(&[c(0, 1), c(1, 1)], id),
        Err(BoardError::TileClaimed)
    );
    assert!(board.tile_at(c(0, 1)).unwrap().is_free());

    assert_eq!(board.unclaim_tiles(&[c(1, 1), c(2, 1), c(3, 1), c(4, 1)]).unwrap(), 3);
    assert_eq!(board.free_tile_count(), 36);
    assert!(board.unclaim_tiles(&[c(6, 6)]).is_err());
}

#[test]
fn test_span() {
    let board = Board::new(5, 5).unwrap();
    assert_eq!(board.span(c(3, 1), c(1, 1)), Some(vec![c(3, 1), c(2, 1), c(1, 1)]));
    assert_eq!(board.span(c(0, 0), c(0, 2)), Some(vec![c(0, 0), c(0, 1), c(0, 2)]));
    assert_eq!(board.span(c(2, 2), c(2, 2)), Some(vec![c(2, 2)]));
    assert_eq!(board.span(c(0, 0), c(1, 1)), None);
    assert_eq!(board.span(c(0, 0), c(5, 0)), None);
}

#[test]
fn test_random_tile_respects_predicate() {
    let mut board = Board::new(4, 4).unwrap();
    let mut rng = SmallRng::seed_from_u64(7);
    board.mark(c(1, 2), TileState::Miss).unwrap();
    for _ in 0..50 {
        let tile = board
            .random_tile(&mut rng, |t| t.state() == TileState::Miss)
            .unwrap();
        assert_eq!(tile.coord(), c(1, 2));
    }
    for _ in 0..50 {
        let tile = board.random_tile(&mut rng, |t| t.is_unattacked()).unwrap();
        assert_ne!(tile.coord(), c(1, 2));
    }
    assert!(board.tile_at(board.random_any_tile(&mut rng).coord()).is_some());
}

#[test]
fn test_random_tile_empty_selection() {
    let board = Board::new(3, 3).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(
        board.random_tile(&mut rng, |t| !t.is_free()).unwrap_err(),
        BoardError::EmptySelection
    );
}

#[test]
fn test_neighbours_clipped() {
    let board = Board::new(10, 10).unwrap();
    assert_eq!(board.neighbours(c(5, 5)).count(), 8);
    assert_eq!(board.neighbours(c(0, 0)).count(), 3);
    assert_eq!(board.neighbours(c(9, 4)).count(), 5);
    let single = Board::new(1, 1).unwrap();
    assert_eq!(single.neighbours(c(0, 0)).count(), 0);
}

#[test]
fn test_lay_mine_twice() {
    let mut board = Board::new(3, 3).unwrap();
    board.lay_mine(c(1, 1)).unwrap();
    assert_eq!(board.lay_mine(c(1, 1)), Err(BoardError::MineAlreadyLaid));
    assert!(board.tile_at(c(1, 1)).unwrap().has_live_mine());
    assert!(board.lay_mine(c(3, 3)).is_err());
}
