//! Common types for the engine: board errors and attack results.

use crate::ship::ShipId;

/// Result of resolving an attack against a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessResult {
    /// Attack struck an undamaged ship section.
    Hit,
    /// Attack found open water.
    Miss,
    /// Attack destroyed a ship, carrying its id.
    Sink(ShipId),
}

impl GuessResult {
    /// Returns `true` for both hits and sinks.
    pub fn is_hit(&self) -> bool {
        !matches!(self, GuessResult::Miss)
    }
}

/// Errors returned by Board, Fleet and Admiral operations.
///
/// None of these are fatal: every one leaves the engine state as it was
/// before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside the board.
    InvalidCoordinate { x: usize, y: usize },
    /// Coordinate text is not a letter column followed by a row number.
    MalformedCoordinate,
    /// Board dimensions must both be at least one.
    InvalidDimensions { width: usize, height: usize },
    /// Ship id does not belong to this fleet.
    UnknownShip,
    /// Board is bound to a different fleet.
    ForeignBoard,
    /// Board already has a fleet bound to it.
    BoardInUse,
    /// Start tile already holds a section of another ship.
    TileOwnedByOtherShip,
    /// No contiguous free run exists in either direction.
    NoRunFound,
    /// A tile in the requested run is already claimed.
    TileClaimed,
    /// The recorded placement range could not be released.
    ReleaseFailed,
    /// Operation requires a placed ship.
    ShipNotPlaced,
    /// Random selection had no eligible tile.
    EmptySelection,
    /// Tile was already attacked.
    AlreadyAttacked,
    /// Tile holds no mine.
    NoMine,
    /// Mine on this tile has already exploded.
    MineExploded,
    /// Tile already holds a mine.
    MineAlreadyLaid,
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::InvalidCoordinate { x, y } => {
                write!(f, "Coordinate ({}, {}) is not on the board", x, y)
            }
            BoardError::MalformedCoordinate => {
                write!(f, "Coordinate must be a column letter and row number (e.g. B7)")
            }
            BoardError::InvalidDimensions { width, height } => {
                write!(f, "Board dimensions {}x{} are invalid", width, height)
            }
            BoardError::UnknownShip => write!(f, "Ship does not belong to this fleet"),
            BoardError::ForeignBoard => write!(f, "Board belongs to another fleet"),
            BoardError::BoardInUse => write!(f, "Board already has a fleet"),
            BoardError::TileOwnedByOtherShip => {
                write!(f, "Tile is already occupied by another ship")
            }
            BoardError::NoRunFound => write!(f, "No free run of tiles fits the ship"),
            BoardError::TileClaimed => write!(f, "Tile is already claimed"),
            BoardError::ReleaseFailed => write!(f, "Unable to release the ship's tiles"),
            BoardError::ShipNotPlaced => write!(f, "Ship is not placed on the board"),
            BoardError::EmptySelection => write!(f, "No tile matches the selection"),
            BoardError::AlreadyAttacked => write!(f, "Tile has already been attacked"),
            BoardError::NoMine => write!(f, "Tile holds no mine"),
            BoardError::MineExploded => write!(f, "Mine has already exploded"),
            BoardError::MineAlreadyLaid => write!(f, "Tile already holds a mine"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
