use console::style;
use serde::Serialize;

use super::notation::row_letter;

/// Board dimension. Rows are lettered `A..=O`, columns numbered `1..=15`.
pub const BOARD_SIZE: usize = 15;

/// Number of aligned stones required to win.
pub const WIN_LENGTH: usize = 5;

const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // diagonal down
    (-1, 1), // diagonal up
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Human,
    Oracle,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '·',
            Cell::Human => 'X',
            Cell::Oracle => 'O',
        }
    }
}

/// One occupied cell as handed to the move oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StonePosition {
    pub row: String,
    pub column: usize,
    pub stone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Cell at `(row, col)`, or `None` when outside the board
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < BOARD_SIZE && col < BOARD_SIZE
    }

    /// Place a stone. Returns false without touching the board when the
    /// coordinates are out of range or the cell is already occupied.
    pub fn place_stone(&mut self, row: usize, col: usize, stone: Cell) -> bool {
        if stone == Cell::Empty || !Self::in_bounds(row, col) {
            return false;
        }
        if self.cells[row][col] != Cell::Empty {
            return false;
        }
        self.cells[row][col] = stone;
        true
    }

    /// Check whether the stone just placed at `(row, col)` completes a line of
    /// five. Only the four axes through that cell are scanned.
    pub fn check_win(&self, row: usize, col: usize, stone: Cell) -> bool {
        if stone == Cell::Empty || self.get(row, col) != Some(stone) {
            return false;
        }

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let count = 1
                + self.count_direction(row, col, dr, dc, stone)
                + self.count_direction(row, col, -dr, -dc, stone);
            count >= WIN_LENGTH
        })
    }

    fn count_direction(&self, row: usize, col: usize, dr: isize, dc: isize, stone: Cell) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row as isize, col as isize);
        loop {
            r += dr;
            c += dc;
            if r < 0 || c < 0 {
                break;
            }
            match self.get(r as usize, c as usize) {
                Some(cell) if cell == stone => count += 1,
                _ => break,
            }
        }
        count
    }

    pub fn stone_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell != Cell::Empty)
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.stone_count() == BOARD_SIZE * BOARD_SIZE
    }

    /// Occupied cells in row-major order.
    pub fn positions(&self) -> Vec<StonePosition> {
        let mut positions = Vec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if *cell != Cell::Empty {
                    positions.push(StonePosition {
                        row: row_letter(row).to_string(),
                        column: col + 1,
                        stone: cell.symbol().to_string(),
                    });
                }
            }
        }
        positions
    }

    /// JSON array of the occupied cells. This is the only board
    /// representation sent to the move oracle, so empty cells are left out.
    pub fn serialize_positions(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.positions())
    }

    /// Full grid for terminal display.
    pub fn render(&self) -> String {
        let mut out = String::from("\n   ");
        for col in 1..=BOARD_SIZE {
            out.push_str(&format!(" {col:>2}"));
        }
        out.push('\n');

        for (row, cells) in self.cells.iter().enumerate() {
            out.push_str(&format!("{:>2} ", row_letter(row)));
            for cell in cells {
                let marker = match cell {
                    Cell::Human => style('X').green().to_string(),
                    Cell::Oracle => style('O').red().to_string(),
                    Cell::Empty => Cell::Empty.symbol().to_string(),
                };
                out.push_str(&format!("  {marker}"));
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
