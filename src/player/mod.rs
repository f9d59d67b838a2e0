//! Player trait and implementations
//!
//! A Player decides where its admiral's ships go and which enemy tile to
//! attack next. Turn order and input collection stay with the caller.

use rand::rngs::SmallRng;

use crate::{
    board::Board,
    common::BoardError,
    coords::Coordinate,
    game::{Admiral, AttackReport},
};

/// Interface implemented by different player types.
pub trait Player {
    /// Place all ships of `admiral`.
    fn place_ships(&mut self, rng: &mut SmallRng, admiral: &mut Admiral) -> Result<(), BoardError>;

    /// Choose the next tile to attack given our target board.
    fn select_target(&mut self, rng: &mut SmallRng, target: &Board) -> Result<Coordinate, BoardError>;

    /// Inform the player of the result of its last attack.
    fn handle_attack_result(&mut self, _report: &AttackReport) {}
}

/// Play one turn: `player` picks a tile on its target board, `defender`
/// resolves the attack, and the attacker records the outcome.
pub fn take_turn(
    player: &mut dyn Player,
    rng: &mut SmallRng,
    attacker: &mut Admiral,
    defender: &mut Admiral,
) -> Result<AttackReport, BoardError> {
    let coord = player.select_target(rng, attacker.target())?;
    let report = defender.receive_attack(coord)?;
    attacker.record_attack(&report)?;
    player.handle_attack_result(&report);
    Ok(report)
}

pub mod ai;
pub use ai::AiPlayer;
