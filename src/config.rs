//! Game configuration: board size, ship templates and mine count.
//!
//! Parsing works on text already in memory; reading the file is left to the
//! caller.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// Smallest board edge accepted by the config loader.
pub const MIN_BOARD_DIM: usize = 5;
/// Largest board edge accepted by the config loader (two-letter columns and
/// a terminal that can still show the board).
pub const MAX_BOARD_DIM: usize = 80;

/// Name and length of one ship in a fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipTemplate {
    name: String,
    length: usize,
}

impl ShipTemplate {
    /// Create a template. Returns `None` for a zero length.
    pub fn new(name: impl Into<String>, length: usize) -> Option<Self> {
        (length > 0).then(|| Self {
            name: name.into(),
            length,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Everything needed to set up one match. Constructed once and handed to
/// each admiral.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub ships: Vec<ShipTemplate>,
    pub mines: usize,
}

/// The classic fleet.
const DEFAULT_SHIPS: [(&str, usize); 5] = [
    ("Carrier", 5),
    ("Battleship", 4),
    ("Destroyer", 3),
    ("Submarine", 3),
    ("Patrol Boat", 2),
];

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            ships: default_ships(),
            mines: 0,
        }
    }
}

fn default_ships() -> Vec<ShipTemplate> {
    DEFAULT_SHIPS
        .iter()
        .map(|&(name, length)| ShipTemplate {
            name: name.to_string(),
            length,
        })
        .collect()
}

/// Errors raised while parsing configuration text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Line is not of the form `key: value`.
    MissingSeparator { line: usize },
    /// Key is not `board`, `boat` or `mines`.
    UnknownKey { line: usize, key: String },
    /// Board size is not `<width>x<height>`.
    BadBoardSize { line: usize },
    /// Boat entry is not `<name>, <length>` with a positive length.
    BadBoat { line: usize },
    /// Mine count is not a number.
    BadMineCount { line: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingSeparator { line } => {
                write!(f, "line {}: expected `key: value`", line)
            }
            ConfigError::UnknownKey { line, key } => {
                write!(f, "line {}: unknown key `{}`", line, key)
            }
            ConfigError::BadBoardSize { line } => {
                write!(f, "line {}: board must be `<width>x<height>`", line)
            }
            ConfigError::BadBoat { line } => {
                write!(f, "line {}: boat must be `<name>, <length>`", line)
            }
            ConfigError::BadMineCount { line } => {
                write!(f, "line {}: mines must be a number", line)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Parse `adaship_config.ini` style text:
    ///
    /// ```text
    /// board: 10x10
    /// boat: Carrier, 5
    /// mines: 5
    /// ```
    ///
    /// Keys are case insensitive and whitespace around values is ignored.
    /// Board edges are clamped to [`MIN_BOARD_DIM`]..=[`MAX_BOARD_DIM`]. If
    /// no boats are listed the classic fleet is used.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = GameConfig {
            ships: Vec::new(),
            ..GameConfig::default()
        };
        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }
            let (key, value) = trimmed
                .split_once(':')
                .ok_or(ConfigError::MissingSeparator { line })?;
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();
            match key.as_str() {
                "board" => {
                    let (w, h) = parse_board_size(value).ok_or(ConfigError::BadBoardSize { line })?;
                    config.width = w;
                    config.height = h;
                }
                "boat" => {
                    let ship = parse_boat(value).ok_or(ConfigError::BadBoat { line })?;
                    config.ships.push(ship);
                }
                "mines" => {
                    config.mines = value
                        .parse()
                        .map_err(|_| ConfigError::BadMineCount { line })?;
                }
                _ => return Err(ConfigError::UnknownKey { line, key }),
            }
        }
        if config.ships.is_empty() {
            config.ships = default_ships();
        }
        Ok(config)
    }
}

fn parse_board_size(value: &str) -> Option<(usize, usize)> {
    let (w, h) = value.to_ascii_lowercase().split_once('x').map(|(w, h)| {
        (w.trim().parse::<usize>(), h.trim().parse::<usize>())
    })?;
    let clamp = |n: usize| n.clamp(MIN_BOARD_DIM, MAX_BOARD_DIM);
    Some((clamp(w.ok()?), clamp(h.ok()?)))
}

fn parse_boat(value: &str) -> Option<ShipTemplate> {
    let (name, length) = value.split_once(',')?;
    let name = capitalise(name.trim());
    if name.is_empty() {
        return None;
    }
    ShipTemplate::new(name, length.trim().parse().ok()?)
}

/// Upper-case the first letter, lower-case the rest.
fn capitalise(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_classic() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (10, 10));
        let lengths: Vec<_> = config.ships.iter().map(ShipTemplate::length).collect();
        assert_eq!(lengths, [5, 4, 3, 3, 2]);
        assert_eq!(config.mines, 0);
    }

    #[test]
    fn parse_full_file() {
        let text = "\
# sample
Board: 12 x 8
boat: carrier, 5
BOAT: patrol boat,2

mines: 4
";
        let config = GameConfig::parse(text).unwrap();
        assert_eq!((config.width, config.height), (12, 8));
        assert_eq!(config.ships[0].name(), "Carrier");
        assert_eq!(config.ships[1].name(), "Patrol boat");
        assert_eq!(config.ships[1].length(), 2);
        assert_eq!(config.mines, 4);
    }

    #[test]
    fn board_is_clamped() {
        let config = GameConfig::parse("board: 2x500").unwrap();
        assert_eq!((config.width, config.height), (MIN_BOARD_DIM, MAX_BOARD_DIM));
    }

    #[test]
    fn no_boats_falls_back_to_default_fleet() {
        let config = GameConfig::parse("board: 8x8").unwrap();
        assert_eq!(config.ships, GameConfig::default().ships);
    }

    #[test]
    fn reports_bad_lines() {
        assert_eq!(
            GameConfig::parse("board 10x10"),
            Err(ConfigError::MissingSeparator { line: 1 })
        );
        assert_eq!(
            GameConfig::parse("board: 10x10\nboat: raft, 0"),
            Err(ConfigError::BadBoat { line: 2 })
        );
        assert_eq!(
            GameConfig::parse("board: tenxten"),
            Err(ConfigError::BadBoardSize { line: 1 })
        );
        assert!(matches!(
            GameConfig::parse("ships: 3"),
            Err(ConfigError::UnknownKey { line: 1, .. })
        ));
    }
}
