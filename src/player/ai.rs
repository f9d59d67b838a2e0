use alloc::vec::Vec;
use rand::rngs::SmallRng;

use super::Player;
use crate::{
    board::Board,
    common::BoardError,
    coords::Coordinate,
    game::{Admiral, AttackReport},
    tile::Tile,
};

/// Computer player. Places ships at random and hunts at random until it
/// scores a hit, then works through the tiles around its hits.
#[derive(Debug, Default)]
pub struct AiPlayer {
    follow_up: Vec<Coordinate>,
}

impl AiPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Player for AiPlayer {
    fn place_ships(&mut self, rng: &mut SmallRng, admiral: &mut Admiral) -> Result<(), BoardError> {
        admiral.auto_place_ships(rng, true)
    }

    fn select_target(&mut self, rng: &mut SmallRng, target: &Board) -> Result<Coordinate, BoardError> {
        while let Some(coord) = self.follow_up.pop() {
            if target.tile_at(coord).map_or(false, Tile::is_unattacked) {
                return Ok(coord);
            }
        }
        Ok(target.random_tile(rng, Tile::is_unattacked)?.coord())
    }

    fn handle_attack_result(&mut self, report: &AttackReport) {
        if !report.result.is_hit() {
            return;
        }
        if !report.sunk().is_empty() {
            self.follow_up.clear();
            return;
        }
        let c = report.coord;
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            if let Some(next) = c.offset(dx, dy) {
                self.follow_up.push(next);
            }
        }
    }
}
