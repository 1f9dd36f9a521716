//! Move notation: a row letter followed by a 1-based column number, e.g. `H8`.

use std::fmt;
use std::str::FromStr;

use super::board::BOARD_SIZE;
use super::error::GomokuError;

/// Letter labelling `row`.
pub fn row_letter(row: usize) -> char {
    (b'A' + row as u8) as char
}

/// Last valid row letter.
pub fn last_row_letter() -> char {
    row_letter(BOARD_SIZE - 1)
}

/// A board coordinate, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn to_notation(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", row_letter(self.row), self.col + 1)
    }
}

impl FromStr for Position {
    type Err = GomokuError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_move(input)
    }
}

/// Decode a move such as `h8` or ` O15 `.
pub fn parse_move(input: &str) -> Result<Position, GomokuError> {
    let normalized = input.trim().to_ascii_uppercase();
    let chars: Vec<char> = normalized.chars().collect();
    if !(2..=3).contains(&chars.len()) {
        return Err(GomokuError::Format(format!(
            "expected a move like H8, got '{}'",
            input.trim()
        )));
    }

    let letter = chars[0];
    if !('A'..=last_row_letter()).contains(&letter) {
        return Err(GomokuError::Format(format!(
            "row must be a letter between A and {}, got '{letter}'",
            last_row_letter()
        )));
    }
    let row = (letter as u8 - b'A') as usize;

    let digits = &chars[1..];
    if !digits.iter().all(char::is_ascii_digit) {
        return Err(GomokuError::Format(format!(
            "column must be a number, got '{}'",
            digits.iter().collect::<String>()
        )));
    }
    let column: usize = digits
        .iter()
        .fold(0, |acc, d| acc * 10 + d.to_digit(10).unwrap_or(0) as usize);
    if !(1..=BOARD_SIZE).contains(&column) {
        return Err(GomokuError::Format(format!(
            "column must be between 1 and {BOARD_SIZE}, got {column}"
        )));
    }

    Ok(Position::new(row, column - 1))
}
