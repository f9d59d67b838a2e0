//! One admiral's ships: atomic placement and unplacement, section damage and
//! the destroyed-ship counter.

use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use log::debug;

use crate::board::Board;
use crate::common::BoardError;
use crate::config::ShipTemplate;
use crate::coords::Coordinate;
use crate::ship::{DamageOutcome, Orientation, Ship, ShipId};
use crate::tile::SectionRef;

static NEXT_FLEET: AtomicUsize = AtomicUsize::new(0);

/// Identity of a fleet, recorded on the board it is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetId(usize);

/// The ships of one player, in template order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    id: FleetId,
    ships: Vec<Ship>,
    destroyed: usize,
}

impl Fleet {
    /// Build one ship per template and bind the fleet to `board`. Placement,
    /// unplacement and mine blasts are only accepted between a fleet and the
    /// board it is bound to.
    ///
    /// Fails with [`BoardError::BoardInUse`] if `board` already has a fleet.
    pub fn new(board: &mut Board, templates: &[ShipTemplate]) -> Result<Self, BoardError> {
        if board.fleet().is_some() {
            return Err(BoardError::BoardInUse);
        }
        let id = FleetId(NEXT_FLEET.fetch_add(1, Ordering::Relaxed));
        board.bind(id);
        let ships = templates
            .iter()
            .enumerate()
            .map(|(i, t)| Ship::new(ShipId(i), String::from(t.name()), t.length()))
            .collect();
        Ok(Fleet {
            id,
            ships,
            destroyed: 0,
        })
    }

    pub fn id(&self) -> FleetId {
        self.id
    }

    /// `true` if `board` is the board this fleet was built on.
    pub fn is_bound_to(&self, board: &Board) -> bool {
        board.fleet() == Some(self.id)
    }

    pub(crate) fn check_board(&self, board: &Board) -> Result<(), BoardError> {
        if self.is_bound_to(board) {
            Ok(())
        } else {
            Err(BoardError::ForeignBoard)
        }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0)
    }

    /// Ids of all ships in template order.
    pub fn ship_ids(&self) -> impl Iterator<Item = ShipId> + '_ {
        self.ships.iter().map(Ship::id)
    }

    pub fn placed_ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(|s| s.placed())
    }

    pub fn unplaced_ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(|s| !s.placed())
    }

    /// Number of destroyed ships, maintained as ships go down.
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    /// `true` once every ship has been destroyed.
    pub fn all_destroyed(&self) -> bool {
        self.destroyed == self.ships.len()
    }

    fn ship_mut(&mut self, id: ShipId) -> Result<&mut Ship, BoardError> {
        self.ships.get_mut(id.0).ok_or(BoardError::UnknownShip)
    }

    /// Place `id` on `board` through `start`.
    ///
    /// A ship that is already placed is moved: the new run may overlap its
    /// current footprint. On any error the board and the ship are left
    /// exactly as they were.
    pub fn place_ship(
        &mut self,
        board: &mut Board,
        id: ShipId,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        self.check_board(board)?;
        let ship = self.ship(id).ok_or(BoardError::UnknownShip)?;
        let tile = board.tile_at(start).ok_or(BoardError::InvalidCoordinate {
            x: start.x,
            y: start.y,
        })?;
        if let Some(section) = tile.section() {
            if section.ship != id {
                return Err(BoardError::TileOwnedByOtherShip);
            }
        }

        let run = board.find_run_for(start, orientation, ship.length(), Some(id))?;
        if let Some((first, last)) = ship.span() {
            let current = board.span(first, last).ok_or(BoardError::ReleaseFailed)?;
            let blocked = run.iter().any(|coord| {
                !current.contains(coord) && board.tile_at(*coord).map_or(true, |t| !t.is_free())
            });
            if blocked {
                return Err(BoardError::TileClaimed);
            }
            self.release(board, id)?;
        }
        // `run` now crosses only free tiles, so the claim cannot fail.
        board.claim_tiles(&run, id)?;
        let (first, last) = (run[0], run[run.len() - 1]);
        self.ship_mut(id)?.set_placement(orientation, first, last);
        debug!(
            "placed {} {:?} from {:?} to {:?}",
            self.ships[id.0].name(),
            orientation,
            first,
            last
        );
        Ok(())
    }

    /// Remove `id` from `board`. Unplacing an unplaced ship succeeds and does
    /// nothing.
    pub fn unplace_ship(&mut self, board: &mut Board, id: ShipId) -> Result<(), BoardError> {
        self.check_board(board)?;
        if !self.ship(id).ok_or(BoardError::UnknownShip)?.placed() {
            return Ok(());
        }
        self.release(board, id)?;
        debug!("unplaced {}", self.ships[id.0].name());
        Ok(())
    }

    /// Unplace every placed ship.
    pub fn unplace_all(&mut self, board: &mut Board) -> Result<(), BoardError> {
        self.check_board(board)?;
        let placed: Vec<ShipId> = self.placed_ships().map(Ship::id).collect();
        for id in placed {
            self.unplace_ship(board, id)?;
        }
        Ok(())
    }

    /// Release the recorded range of a placed ship and clear its placement.
    /// Nothing changes unless every tile of the range still holds the
    /// matching section.
    fn release(&mut self, board: &mut Board, id: ShipId) -> Result<(), BoardError> {
        let ship = self.ship(id).ok_or(BoardError::UnknownShip)?;
        let (start, end) = ship.span().ok_or(BoardError::ShipNotPlaced)?;
        let tiles = board.span(start, end).ok_or(BoardError::ReleaseFailed)?;
        if tiles.len() != ship.length() {
            return Err(BoardError::ReleaseFailed);
        }
        let owned = tiles.iter().enumerate().all(|(section, &coord)| {
            board.tile_at(coord).and_then(|t| t.section()) == Some(SectionRef { ship: id, section })
        });
        if !owned {
            return Err(BoardError::ReleaseFailed);
        }
        board.unclaim_tiles(&tiles)?;
        self.ship_mut(id)?.clear_placement();
        Ok(())
    }

    /// Damage one section. Bumps the destroyed counter when this damage
    /// destroys its ship.
    pub fn damage_section(&mut self, section: SectionRef) -> Result<DamageOutcome, BoardError> {
        let ship = self.ship_mut(section.ship)?;
        let outcome = ship
            .damage_section(section.section)
            .ok_or(BoardError::UnknownShip)?;
        if outcome == DamageOutcome::Destroyed {
            debug!("{} destroyed", ship.name());
            self.destroyed += 1;
        }
        Ok(outcome)
    }
}
