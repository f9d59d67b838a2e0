//! A single board cell and the mine it may hold.

use crate::coords::Coordinate;
use crate::ship::ShipId;

/// Attack state of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TileState {
    #[default]
    None,
    Hit,
    Miss,
}

/// Index of a section inside the fleet's ship arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionRef {
    pub ship: ShipId,
    pub section: usize,
}

/// A mine laid on a tile. Once exploded it stays exploded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Mine {
    exploded: bool,
}

impl Mine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exploded(&self) -> bool {
        self.exploded
    }

    pub(crate) fn explode(&mut self) {
        self.exploded = true;
    }
}

/// One addressable board cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    coord: Coordinate,
    state: TileState,
    section: Option<SectionRef>,
    mine: Option<Mine>,
}

impl Tile {
    pub(crate) fn new(coord: Coordinate) -> Self {
        Self {
            coord,
            state: TileState::None,
            section: None,
            mine: None,
        }
    }

    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    /// Section claiming this tile, if any.
    pub fn section(&self) -> Option<SectionRef> {
        self.section
    }

    pub fn mine(&self) -> Option<&Mine> {
        self.mine.as_ref()
    }

    /// `true` if no section claims this tile.
    pub fn is_free(&self) -> bool {
        self.section.is_none()
    }

    /// `true` if the tile has not been attacked yet.
    pub fn is_unattacked(&self) -> bool {
        self.state == TileState::None
    }

    /// `true` if the tile holds a mine that has not exploded.
    pub fn has_live_mine(&self) -> bool {
        self.mine.map_or(false, |m| !m.exploded())
    }

    pub(crate) fn set_state(&mut self, state: TileState) {
        self.state = state;
    }

    pub(crate) fn set_section(&mut self, section: Option<SectionRef>) {
        self.section = section;
    }

    pub(crate) fn mine_mut(&mut self) -> Option<&mut Mine> {
        self.mine.as_mut()
    }

    pub(crate) fn lay_mine(&mut self) {
        self.mine = Some(Mine::new());
    }
}
