//! Ships, their sections, and the damage state machine.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::coords::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Unit steps tried by the run search, in precedence order.
    /// Horizontal extends east then west; vertical extends north then south.
    pub fn steps(self) -> [(isize, isize); 2] {
        match self {
            Orientation::Horizontal => [(1, 0), (-1, 0)],
            Orientation::Vertical => [(0, 1), (0, -1)],
        }
    }
}

/// Index of a ship inside its fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub(crate) usize);

impl ShipId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of damaging one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageOutcome {
    /// Section was already damaged; nothing changed.
    AlreadyDamaged,
    /// Section newly damaged, ship still afloat.
    Damaged,
    /// Section newly damaged and the ship was destroyed by it.
    Destroyed,
}

/// One length-unit of a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    ship: ShipId,
    damaged: bool,
}

impl Section {
    fn new(ship: ShipId) -> Self {
        Self {
            ship,
            damaged: false,
        }
    }

    /// Owning ship.
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    pub fn damaged(&self) -> bool {
        self.damaged
    }

    /// Returns `true` only on the undamaged -> damaged transition.
    fn mark_damaged(&mut self) -> bool {
        if self.damaged {
            return false;
        }
        self.damaged = true;
        true
    }
}

/// A ship: a named, fixed-length array of sections plus its placement record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: ShipId,
    name: String,
    direction: Option<Orientation>,
    sections: Vec<Section>,
    placed: bool,
    start: Option<Coordinate>,
    end: Option<Coordinate>,
    damage: usize,
    destroyed: bool,
}

impl Ship {
    pub(crate) fn new(id: ShipId, name: String, length: usize) -> Self {
        Self {
            id,
            name,
            direction: None,
            sections: (0..length).map(|_| Section::new(id)).collect(),
            placed: false,
            start: None,
            end: None,
            damage: 0,
            destroyed: false,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.sections.len()
    }

    /// Orientation while placed, `None` otherwise.
    pub fn direction(&self) -> Option<Orientation> {
        self.direction
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn placed(&self) -> bool {
        self.placed
    }

    /// First and last tile of the current placement.
    pub fn span(&self) -> Option<(Coordinate, Coordinate)> {
        self.start.zip(self.end)
    }

    /// Number of damaged sections.
    pub fn damage(&self) -> usize {
        self.damage
    }

    pub fn destroyed(&self) -> bool {
        self.destroyed
    }

    /// Damage the section at `index`. Returns `None` if the index is out of
    /// range.
    pub(crate) fn damage_section(&mut self, index: usize) -> Option<DamageOutcome> {
        let section = self.sections.get_mut(index)?;
        if !section.mark_damaged() {
            return Some(DamageOutcome::AlreadyDamaged);
        }
        if self.on_section_damaged() {
            Some(DamageOutcome::Destroyed)
        } else {
            Some(DamageOutcome::Damaged)
        }
    }

    /// Count a newly damaged section. Returns `true` exactly once, on the
    /// transition to destroyed.
    fn on_section_damaged(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.damage += 1;
        if self.damage == self.length() {
            self.destroyed = true;
            return true;
        }
        false
    }

    pub(crate) fn set_placement(&mut self, direction: Orientation, start: Coordinate, end: Coordinate) {
        self.direction = Some(direction);
        self.start = Some(start);
        self.end = Some(end);
        self.placed = true;
    }

    pub(crate) fn clear_placement(&mut self) {
        self.direction = None;
        self.start = None;
        self.end = None;
        self.placed = false;
    }
}
