//! Commonly used types and utilities for ease of import.

pub use crate::{
    take_turn, Admiral, AiPlayer, Board, BoardError, Coordinate, Fleet, GameConfig, GameStatus,
    GuessResult, Orientation, Player, ShipId, TileState,
};

#[cfg(feature = "std")]
pub use crate::init_logging;
