use super::board::{BOARD_SIZE, Board, Cell};
use super::error::GomokuError;
use super::notation::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Human,
    Oracle,
}

impl Side {
    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::Human => Side::Oracle,
            Side::Oracle => Side::Human,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Side::Human => Cell::Human,
            Side::Oracle => Cell::Oracle,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Human => "You",
            Side::Oracle => "AI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Side),
    Draw,
}

/// A stone placed by one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub position: Position,
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    turn: Side,
    move_count: usize,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Empty board, human to move
    pub fn new() -> Self {
        GameState {
            board: Board::new(),
            turn: Side::Human,
            move_count: 0,
            outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Place a stone for the side to move.
    ///
    /// The turn passes to the other side only when the move is accepted and
    /// does not end the game.
    pub fn play(&mut self, position: Position) -> Result<Option<GameOutcome>, GomokuError> {
        if self.is_terminal() {
            return Err(GomokuError::GameOver);
        }
        if !Board::in_bounds(position.row, position.col) {
            return Err(GomokuError::Format(format!(
                "({}, {}) is outside the {BOARD_SIZE}x{BOARD_SIZE} board",
                position.row, position.col
            )));
        }

        let stone = self.turn.to_cell();
        if !self.board.place_stone(position.row, position.col, stone) {
            return Err(GomokuError::Occupied(position.to_string()));
        }
        self.move_count += 1;

        if self.board.check_win(position.row, position.col, stone) {
            self.outcome = Some(GameOutcome::Winner(self.turn));
        } else if self.move_count >= BOARD_SIZE * BOARD_SIZE {
            self.outcome = Some(GameOutcome::Draw);
        } else {
            self.turn = self.turn.other();
        }

        Ok(self.outcome)
    }

    /// Play `mv`, checking it belongs to the side to move.
    pub fn apply(&mut self, mv: Move) -> Result<Option<GameOutcome>, GomokuError> {
        if mv.side != self.turn {
            return Err(GomokuError::Format(format!(
                "it is not {}'s turn",
                mv.side.name()
            )));
        }
        self.play(mv.position)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
