//! Board state: the fixed tile grid, run search for ship placement,
//! random tile sampling and mine detonation.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use log::{debug, trace};
use rand::Rng;

use crate::common::BoardError;
use crate::coords::{self, Coordinate};
use crate::fleet::{Fleet, FleetId};
use crate::ship::{DamageOutcome, Orientation, ShipId};
use crate::tile::{SectionRef, Tile, TileState};

/// Offsets of the eight tiles surrounding a blast.
const NEIGHBOURHOOD: [(isize, isize); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Everything a mine chain reaction touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Detonation {
    /// Mines that went off, the triggering mine first.
    pub exploded: Vec<Coordinate>,
    /// Tiles caught in a blast, each listed once, with the state they were
    /// left in.
    pub affected: Vec<(Coordinate, TileState)>,
    /// Ships destroyed by the blasts.
    pub sunk: Vec<ShipId>,
}

impl Detonation {
    /// Number of tiles in the blast area that held a ship section.
    pub fn hits(&self) -> usize {
        self.affected
            .iter()
            .filter(|(_, state)| *state == TileState::Hit)
            .count()
    }
}

/// A `width` x `height` grid of tiles. The size never changes after
/// construction.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    fleet: Option<FleetId>,
}

impl Board {
    /// Create a board with every tile unattacked, unclaimed and mine free.
    /// Tiles are stored in construction order, top row first.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width < 1 || height < 1 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        let tiles = coords::grid_order(width, height).map(Tile::new).collect();
        Ok(Board {
            width,
            height,
            tiles,
            fleet: None,
        })
    }

    /// Fleet this board was handed to, if any.
    pub fn fleet(&self) -> Option<FleetId> {
        self.fleet
    }

    pub(crate) fn bind(&mut self, fleet: FleetId) {
        self.fleet = Some(fleet);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All tiles in construction order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles no section has claimed.
    pub fn free_tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_free()).count()
    }

    fn index_of(&self, coord: Coordinate) -> Option<usize> {
        coords::coords_valid(self.width, self.height, coord)
            .then(|| (self.height - 1 - coord.y) * self.width + coord.x)
    }

    /// Look up a tile. Off-board coordinates yield `None`.
    pub fn tile_at(&self, coord: Coordinate) -> Option<&Tile> {
        self.index_of(coord).map(|i| &self.tiles[i])
    }

    fn tile(&self, coord: Coordinate) -> Result<&Tile, BoardError> {
        self.tile_at(coord).ok_or(BoardError::InvalidCoordinate {
            x: coord.x,
            y: coord.y,
        })
    }

    fn tile_mut(&mut self, coord: Coordinate) -> Result<&mut Tile, BoardError> {
        match self.index_of(coord) {
            Some(i) => Ok(&mut self.tiles[i]),
            None => Err(BoardError::InvalidCoordinate {
                x: coord.x,
                y: coord.y,
            }),
        }
    }

    /// Find `length` contiguous unclaimed tiles in a straight line through
    /// `start`. Horizontal runs try east of `start` then west; vertical runs
    /// try north then south. The returned run begins at `start`.
    pub fn find_continuous_run(
        &self,
        start: Coordinate,
        orientation: Orientation,
        length: usize,
    ) -> Result<Vec<Coordinate>, BoardError> {
        self.find_run_for(start, orientation, length, None)
    }

    /// Run search where tiles already claimed by `owner` count as free, so a
    /// placed ship can be moved over its own footprint.
    pub(crate) fn find_run_for(
        &self,
        start: Coordinate,
        orientation: Orientation,
        length: usize,
        owner: Option<ShipId>,
    ) -> Result<Vec<Coordinate>, BoardError> {
        self.tile(start)?;
        if length == 0 {
            return Err(BoardError::NoRunFound);
        }
        orientation
            .steps()
            .into_iter()
            .find_map(|(dx, dy)| self.run_from(start, dx, dy, length, owner))
            .ok_or(BoardError::NoRunFound)
    }

    fn run_from(
        &self,
        start: Coordinate,
        dx: isize,
        dy: isize,
        length: usize,
        owner: Option<ShipId>,
    ) -> Option<Vec<Coordinate>> {
        let mut run = Vec::with_capacity(length);
        let mut coord = start;
        for i in 0..length {
            if i > 0 {
                coord = coord.offset(dx, dy)?;
            }
            let claimable = match self.tile_at(coord)?.section() {
                None => true,
                Some(section) => Some(section.ship) == owner,
            };
            if !claimable {
                return None;
            }
            run.push(coord);
        }
        Some(run)
    }

    /// Straight line of tiles from `start` to `end` inclusive, or `None` if
    /// the two do not share a row or column or lie off the board.
    pub fn span(&self, start: Coordinate, end: Coordinate) -> Option<Vec<Coordinate>> {
        self.tile_at(start)?;
        self.tile_at(end)?;
        let (dx, dy, steps) = if start.y == end.y {
            (signum(start.x, end.x), 0, start.x.abs_diff(end.x))
        } else if start.x == end.x {
            (0, signum(start.y, end.y), start.y.abs_diff(end.y))
        } else {
            return None;
        };
        let mut tiles = vec![start];
        let mut coord = start;
        for _ in 0..steps {
            coord = coord.offset(dx, dy)?;
            tiles.push(coord);
        }
        Some(tiles)
    }

    /// Link each tile of `run` to the matching section of `ship`, by index.
    /// Either every tile is claimed or none is.
    pub fn claim_tiles(&mut self, run: &[Coordinate], ship: ShipId) -> Result<usize, BoardError> {
        for &coord in run {
            if !self.tile(coord)?.is_free() {
                return Err(BoardError::TileClaimed);
            }
        }
        for (section, &coord) in run.iter().enumerate() {
            self.tile_mut(coord)?
                .set_section(Some(SectionRef { ship, section }));
        }
        Ok(run.len())
    }

    /// Clear the section link of every tile in `tiles`. Returns how many
    /// tiles were actually claimed before the call.
    pub fn unclaim_tiles(&mut self, tiles: &[Coordinate]) -> Result<usize, BoardError> {
        for &coord in tiles {
            self.tile(coord)?;
        }
        let mut released = 0;
        for &coord in tiles {
            let tile = self.tile_mut(coord)?;
            if !tile.is_free() {
                tile.set_section(None);
                released += 1;
            }
        }
        Ok(released)
    }

    /// Pick a tile uniformly among those matching `predicate`.
    pub fn random_tile<R, F>(&self, rng: &mut R, predicate: F) -> Result<&Tile, BoardError>
    where
        R: Rng + ?Sized,
        F: Fn(&Tile) -> bool,
    {
        let candidates: Vec<&Tile> = self.tiles.iter().filter(|t| predicate(t)).collect();
        if candidates.is_empty() {
            return Err(BoardError::EmptySelection);
        }
        Ok(candidates[rng.random_range(0..candidates.len())])
    }

    /// Pick any tile uniformly.
    pub fn random_any_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> &Tile {
        &self.tiles[rng.random_range(0..self.tiles.len())]
    }

    /// Set the attack state of a tile.
    pub fn mark(&mut self, coord: Coordinate, state: TileState) -> Result<(), BoardError> {
        self.tile_mut(coord)?.set_state(state);
        Ok(())
    }

    /// Lay an unexploded mine on a tile.
    pub fn lay_mine(&mut self, coord: Coordinate) -> Result<(), BoardError> {
        let tile = self.tile_mut(coord)?;
        if tile.mine().is_some() {
            return Err(BoardError::MineAlreadyLaid);
        }
        tile.lay_mine();
        Ok(())
    }

    /// On-board tiles surrounding `coord`, clipped at the edges.
    pub fn neighbours(&self, coord: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        NEIGHBOURHOOD.iter().filter_map(move |&(dx, dy)| {
            coord
                .offset(dx, dy)
                .filter(|&c| coords::coords_valid(self.width, self.height, c))
        })
    }

    /// Explode the mine at `center` and resolve the blast against its eight
    /// neighbours: sections there are damaged and marked `Hit`, empty tiles
    /// are marked `Miss`. Live mines in the blast go off too, so the whole
    /// chain is resolved before returning.
    ///
    /// Every mine explodes at most once, so the worklist holds at most one
    /// entry per mine and the chain always terminates.
    ///
    /// `fleet` must be the fleet bound to this board.
    pub fn detonate_mine(
        &mut self,
        center: Coordinate,
        fleet: &mut Fleet,
    ) -> Result<Detonation, BoardError> {
        match self.tile(center)?.mine() {
            None => return Err(BoardError::NoMine),
            Some(mine) if mine.exploded() => return Err(BoardError::MineExploded),
            Some(_) => {}
        }
        fleet.check_board(self)?;

        let mut detonation = Detonation::default();
        let mut resolved = vec![false; self.tiles.len()];
        let mut pending = vec![center];
        self.explode(center, &mut detonation)?;

        while let Some(blast) = pending.pop() {
            let around: Vec<Coordinate> = self.neighbours(blast).collect();
            for coord in around {
                if self.tile(coord)?.has_live_mine() {
                    self.explode(coord, &mut detonation)?;
                    pending.push(coord);
                }
                let Some(index) = self.index_of(coord) else {
                    continue;
                };
                if resolved[index] {
                    continue;
                }
                resolved[index] = true;

                let state = match self.tiles[index].section() {
                    Some(section) => {
                        if fleet.damage_section(section)? == DamageOutcome::Destroyed {
                            detonation.sunk.push(section.ship);
                        }
                        TileState::Hit
                    }
                    None => TileState::Miss,
                };
                self.tiles[index].set_state(state);
                trace!("blast at {:?} left {:?} at {:?}", blast, state, coord);
                detonation.affected.push((coord, state));
            }
        }

        debug!(
            "mine at {:?}: {} exploded, {} tiles hit, {} ships sunk",
            center,
            detonation.exploded.len(),
            detonation.hits(),
            detonation.sunk.len()
        );
        Ok(detonation)
    }

    fn explode(&mut self, coord: Coordinate, detonation: &mut Detonation) -> Result<(), BoardError> {
        let mine = self.tile_mut(coord)?.mine_mut().ok_or(BoardError::NoMine)?;
        mine.explode();
        detonation.exploded.push(coord);
        Ok(())
    }
}

fn signum(from: usize, to: usize) -> isize {
    if to >= from {
        1
    } else {
        -1
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{}:", self.width, self.height)?;
        for row in self.tiles.chunks(self.width) {
            for tile in row {
                let ch = match (tile.state(), tile.section(), tile.mine()) {
                    (TileState::Hit, _, _) => 'X',
                    (TileState::Miss, _, _) => 'o',
                    (TileState::None, Some(_), _) => 'S',
                    (TileState::None, None, Some(_)) => '*',
                    (TileState::None, None, None) => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
