//! Board, fleet and ship engine for a configurable game of Battleships with
//! optional mines.
//!
//! The engine is synchronous and performs no I/O. Without the default `std`
//! feature it builds as `no_std` + `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod common;
pub mod config;
pub mod coords;
mod fleet;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod player;
pub mod prelude;
mod ship;
mod tile;

pub use board::{Board, Detonation};
pub use common::{BoardError, GuessResult};
pub use config::{ConfigError, GameConfig, ShipTemplate};
pub use coords::Coordinate;
pub use fleet::{Fleet, FleetId};
pub use game::{Admiral, AttackReport, GameStatus, PLACEMENT_ATTEMPTS};
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use player::{take_turn, AiPlayer, Player};
pub use ship::{DamageOutcome, Orientation, Section, Ship, ShipId};
pub use tile::{Mine, SectionRef, Tile, TileState};
