//! Coordinate helpers: letter columns, bounds checks and the board's
//! construction order.
//!
//! Columns are labelled like spreadsheet columns (`A`..`Z`, then `AA`..`ZZ`).
//! Rows are labelled from `1` at the bottom of the board, so `y = 0` is the
//! lowest printed row and `y = height - 1` the highest.

use alloc::string::String;

use crate::common::BoardError;

/// Alphabet used for column labels.
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Highest column index expressible with two letters (`ZZ`).
pub const MAX_LETTER_INDEX: usize = 26 + 26 * 26 - 1;

/// Zero-based board position. `x` grows to the east, `y` grows to the north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Offset by a signed delta, returning `None` on underflow.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Convert a one or two letter column label to its index.
///
/// `A` is 0, `Z` is 25, `AA` is 26 and `ZZ` is 701. Letters are case
/// insensitive. Empty input, non-letters and labels longer than two letters
/// return `None`.
pub fn letters_to_index(label: &str) -> Option<usize> {
    let bytes = label.as_bytes();
    let value = |b: u8| {
        let b = b.to_ascii_uppercase();
        b.is_ascii_uppercase().then(|| (b - b'A') as usize)
    };
    match bytes {
        [a] => value(*a),
        [a, b] => Some((value(*a)? + 1) * 26 + value(*b)?),
        _ => None,
    }
}

/// Inverse of [`letters_to_index`]. Returns `None` past `ZZ`.
pub fn index_to_letters(index: usize) -> Option<String> {
    let mut label = String::new();
    if index < 26 {
        label.push(ALPHABET[index] as char);
    } else if index <= MAX_LETTER_INDEX {
        let rest = index - 26;
        label.push(ALPHABET[rest / 26] as char);
        label.push(ALPHABET[rest % 26] as char);
    } else {
        return None;
    }
    Some(label)
}

/// Returns `true` if `coord` lies on a `width` x `height` board.
pub fn coords_valid(width: usize, height: usize, coord: Coordinate) -> bool {
    coord.x < width && coord.y < height
}

/// Parse a label such as `B7` into a coordinate on a `width` x `height`
/// board.
pub fn parse_coordinate(input: &str, width: usize, height: usize) -> Result<Coordinate, BoardError> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .ok_or(BoardError::MalformedCoordinate)?;
    let (letters, digits) = input.split_at(split);
    let x = letters_to_index(letters).ok_or(BoardError::MalformedCoordinate)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BoardError::MalformedCoordinate);
    }
    let row: usize = digits
        .parse()
        .map_err(|_| BoardError::MalformedCoordinate)?;
    if row == 0 {
        return Err(BoardError::MalformedCoordinate);
    }
    let coord = Coordinate::new(x, row - 1);
    if !coords_valid(width, height, coord) {
        return Err(BoardError::InvalidCoordinate { x: coord.x, y: coord.y });
    }
    Ok(coord)
}

/// Format a coordinate as its column letters and 1-based row number.
pub fn format_coordinate(coord: Coordinate) -> Option<String> {
    let mut label = index_to_letters(coord.x)?;
    label.push_str(&alloc::format!("{}", coord.y + 1));
    Some(label)
}

/// Next coordinate in construction order: left to right along a row, then
/// down to the start of the row below. Returns `None` after `(width - 1, 0)`.
pub fn next_coord(width: usize, last: Coordinate) -> Option<Coordinate> {
    if last.x + 1 < width {
        Some(Coordinate::new(last.x + 1, last.y))
    } else if last.y > 0 {
        Some(Coordinate::new(0, last.y - 1))
    } else {
        None
    }
}

/// Every coordinate of a `width` x `height` board in construction order,
/// starting at the top-left `(0, height - 1)`.
pub fn grid_order(width: usize, height: usize) -> impl Iterator<Item = Coordinate> {
    let first = (width > 0 && height > 0).then(|| Coordinate::new(0, height - 1));
    core::iter::successors(first, move |&last| next_coord(width, last))
}
