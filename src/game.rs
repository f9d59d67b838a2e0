//! Per-player game state: an admiral's board, fleet and target board, and
//! attack resolution composed from the board and fleet primitives.

use alloc::vec::Vec;
use log::debug;
use rand::Rng;

use crate::board::{Board, Detonation};
use crate::common::{BoardError, GuessResult};
use crate::config::GameConfig;
use crate::coords::Coordinate;
use crate::fleet::Fleet;
use crate::ship::{DamageOutcome, Orientation, ShipId};
use crate::tile::{Tile, TileState};

/// Attempts per ship before automatic placement gives up.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Current status of a game from one admiral's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// What an attack on one tile did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub coord: Coordinate,
    pub result: GuessResult,
    /// Chain reaction, if the tile held a live mine.
    pub detonation: Option<Detonation>,
}

impl AttackReport {
    /// Ships destroyed by this attack, directly or by mines.
    pub fn sunk(&self) -> Vec<ShipId> {
        let mut sunk = Vec::new();
        if let GuessResult::Sink(id) = self.result {
            sunk.push(id);
        }
        if let Some(d) = &self.detonation {
            sunk.extend(d.sunk.iter().copied());
        }
        sunk
    }
}

/// One player's side of the match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Admiral {
    board: Board,
    target: Board,
    fleet: Fleet,
}

impl Admiral {
    /// Build an admiral with empty boards sized from `config` and one ship
    /// per configured template.
    pub fn new(config: &GameConfig) -> Result<Self, BoardError> {
        let mut board = Board::new(config.width, config.height)?;
        let fleet = Fleet::new(&mut board, &config.ships)?;
        Ok(Self {
            board,
            target: Board::new(config.width, config.height)?,
            fleet,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Record of this admiral's attacks on the opponent.
    pub fn target(&self) -> &Board {
        &self.target
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Every ship placed; the admiral may start the match.
    pub fn ready(&self) -> bool {
        self.fleet.unplaced_ships().next().is_none()
    }

    pub fn is_defeated(&self) -> bool {
        self.fleet.all_destroyed()
    }

    pub fn place_ship(
        &mut self,
        id: ShipId,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        self.fleet.place_ship(&mut self.board, id, start, orientation)
    }

    pub fn unplace_ship(&mut self, id: ShipId) -> Result<(), BoardError> {
        self.fleet.unplace_ship(&mut self.board, id)
    }

    /// Unplace every ship.
    pub fn reset_fleet(&mut self) -> Result<(), BoardError> {
        self.fleet.unplace_all(&mut self.board)
    }

    /// Place ships on random free tiles with random orientations. With
    /// `all` set every ship is (re)placed, otherwise only unplaced ones.
    pub fn auto_place_ships<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        all: bool,
    ) -> Result<(), BoardError> {
        let ids: Vec<ShipId> = if all {
            self.fleet.ship_ids().collect()
        } else {
            self.fleet.unplaced_ships().map(|s| s.id()).collect()
        };
        if all {
            self.reset_fleet()?;
        }
        for id in ids {
            self.auto_place_ship(rng, id)?;
        }
        Ok(())
    }

    fn auto_place_ship<R: Rng + ?Sized>(&mut self, rng: &mut R, id: ShipId) -> Result<(), BoardError> {
        let mut last = BoardError::NoRunFound;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let start = self.board.random_tile(rng, Tile::is_free)?.coord();
            let orientation = if rng.random() {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };
            match self.place_ship(id, start, orientation) {
                Ok(()) => return Ok(()),
                Err(err) => last = err,
            }
        }
        Err(last)
    }

    /// Lay a mine on a chosen tile.
    pub fn lay_mine(&mut self, coord: Coordinate) -> Result<(), BoardError> {
        self.board.lay_mine(coord)
    }

    /// Lay `count` mines on random mine-free tiles. Lays none if fewer than
    /// `count` such tiles remain.
    pub fn seed_mines<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> Result<(), BoardError> {
        let available = self
            .board
            .tiles()
            .iter()
            .filter(|t| t.mine().is_none())
            .count();
        if available < count {
            return Err(BoardError::EmptySelection);
        }
        for _ in 0..count {
            let coord = self.board.random_tile(rng, |t| t.mine().is_none())?.coord();
            self.board.lay_mine(coord)?;
        }
        debug!("laid {} mines", count);
        Ok(())
    }

    /// Resolve an opponent's attack on `coord`: mark the tile, damage the
    /// section there if any, then set off a live mine.
    pub fn receive_attack(&mut self, coord: Coordinate) -> Result<AttackReport, BoardError> {
        let tile = self.board.tile_at(coord).ok_or(BoardError::InvalidCoordinate {
            x: coord.x,
            y: coord.y,
        })?;
        if !tile.is_unattacked() {
            return Err(BoardError::AlreadyAttacked);
        }
        let section = tile.section();
        let mined = tile.has_live_mine();

        let result = match section {
            Some(section) => {
                self.board.mark(coord, TileState::Hit)?;
                match self.fleet.damage_section(section)? {
                    DamageOutcome::Destroyed => GuessResult::Sink(section.ship),
                    _ => GuessResult::Hit,
                }
            }
            None => {
                self.board.mark(coord, TileState::Miss)?;
                GuessResult::Miss
            }
        };
        let detonation = if mined {
            Some(self.board.detonate_mine(coord, &mut self.fleet)?)
        } else {
            None
        };
        debug!("attack at {:?}: {:?}, mine: {}", coord, result, mined);
        Ok(AttackReport {
            coord,
            result,
            detonation,
        })
    }

    /// Copy the outcome of one of our attacks onto the target board.
    pub fn record_attack(&mut self, report: &AttackReport) -> Result<(), BoardError> {
        let state = if report.result.is_hit() {
            TileState::Hit
        } else {
            TileState::Miss
        };
        self.target.mark(report.coord, state)?;
        if let Some(detonation) = &report.detonation {
            for &(coord, state) in &detonation.affected {
                self.target.mark(coord, state)?;
            }
        }
        Ok(())
    }

    /// Status given the opponent's state.
    pub fn status(&self, opponent: &Admiral) -> GameStatus {
        if self.is_defeated() {
            GameStatus::Lost
        } else if opponent.is_defeated() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }
}
