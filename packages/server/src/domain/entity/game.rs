//! Renju game engine.
//!
//! Pure board-state and rule logic: placement validation, win detection,
//! the black-only double-open-three restriction, undo and reset. The engine
//! knows nothing about who the players are; whose turn it is gets enforced
//! by the owning [`Room`](super::Room).

use crate::domain::{error::GameError, value_object::Stone};

/// Default side length of the board.
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// Stones in a row needed to win.
const WIN_LENGTH: usize = 5;

/// Horizontal, vertical, diagonal `\` and diagonal `/`.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A stone placed on the board, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub stone: Stone,
}

/// Contiguous run of one color through a cell along one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    /// Stones in the run, including the origin cell.
    length: usize,
    /// Run ends whose next cell is inside the board and empty (0..=2).
    open_ends: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    size: usize,
    cells: Vec<Option<Stone>>,
    history: Vec<Move>,
    current_turn: Stone,
    winner: Option<Stone>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl GameEngine {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            history: Vec::new(),
            current_turn: Stone::Black,
            winner: None,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Stone at `(row, col)`; `None` for empty or out-of-board cells.
    pub fn cell(&self, row: usize, col: usize) -> Option<Stone> {
        if row < self.size && col < self.size {
            self.cells[row * self.size + col]
        } else {
            None
        }
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    pub fn current_turn(&self) -> Stone {
        self.current_turn
    }

    pub fn winner(&self) -> Option<Stone> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn has_started(&self) -> bool {
        !self.history.is_empty()
    }

    /// Board rows in `.`/`B`/`W` notation, top row first.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', Stone::symbol))
                    .collect()
            })
            .collect()
    }

    /// Place a stone of `stone`'s color at `(row, col)`.
    ///
    /// Only board legality is checked here; turn order is the caller's
    /// concern. On a winning placement the turn stays with the winner.
    ///
    /// # Errors
    ///
    /// * [`GameError::GameOver`] if a winner is already set
    /// * [`GameError::InvalidPosition`] if the position is off the board
    /// * [`GameError::OccupiedCell`] if the cell already holds a stone
    /// * [`GameError::ForbiddenMove`] if black would form two open threes
    pub fn place_stone(&mut self, row: i32, col: i32, stone: Stone) -> Result<(), GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }

        let (r, c) = self
            .checked_position(row, col)
            .ok_or(GameError::InvalidPosition { row, col })?;

        if self.cell(r, c).is_some() {
            return Err(GameError::OccupiedCell { row: r, col: c });
        }

        if stone == Stone::Black && self.is_double_open_three(r, c) {
            return Err(GameError::ForbiddenMove);
        }

        self.set(r, c, Some(stone));
        self.history.push(Move {
            row: r,
            col: c,
            stone,
        });

        if self.is_winning_move(r, c, stone) {
            self.winner = Some(stone);
        } else {
            self.current_turn = stone.opponent();
        }

        Ok(())
    }

    /// Take back the most recent stone.
    ///
    /// The turn returns to the player who made the undone move and any
    /// winner is cleared.
    pub fn undo_move(&mut self) -> Result<Move, GameError> {
        let last = self.history.pop().ok_or(GameError::NoHistory)?;
        self.set(last.row, last.col, None);
        self.current_turn = last.stone;
        self.winner = None;
        Ok(last)
    }

    /// Award the game to `stone` without a fifth stone (forfeit).
    pub fn declare_winner(&mut self, stone: Stone) {
        self.winner = Some(stone);
    }

    pub fn reset(&mut self) {
        self.cells.fill(None);
        self.history.clear();
        self.winner = None;
        self.current_turn = Stone::Black;
    }

    fn checked_position(&self, row: i32, col: i32) -> Option<(usize, usize)> {
        let r = usize::try_from(row).ok()?;
        let c = usize::try_from(col).ok()?;
        (r < self.size && c < self.size).then_some((r, c))
    }

    fn set(&mut self, row: usize, col: usize, value: Option<Stone>) {
        let index = row * self.size + col;
        self.cells[index] = value;
    }

    /// Cell at signed coordinates: `None` when off the board.
    fn probe(&self, row: isize, col: isize) -> Option<Option<Stone>> {
        let r = usize::try_from(row).ok()?;
        let c = usize::try_from(col).ok()?;
        (r < self.size && c < self.size).then(|| self.cells[r * self.size + c])
    }

    fn scan(&self, row: usize, col: usize, (dr, dc): (isize, isize), stone: Stone) -> Run {
        let mut run = Run {
            length: 1,
            open_ends: 0,
        };

        for sign in [1, -1] {
            let (step_r, step_c) = (dr * sign, dc * sign);
            let mut r = row as isize + step_r;
            let mut c = col as isize + step_c;
            loop {
                match self.probe(r, c) {
                    Some(Some(s)) if s == stone => {
                        run.length += 1;
                        r += step_r;
                        c += step_c;
                    }
                    Some(None) => {
                        run.open_ends += 1;
                        break;
                    }
                    _ => break,
                }
            }
        }

        run
    }

    fn is_winning_move(&self, row: usize, col: usize, stone: Stone) -> bool {
        DIRECTIONS
            .iter()
            .any(|&dir| self.scan(row, col, dir, stone).length >= WIN_LENGTH)
    }

    /// Tentatively place black at `(row, col)` and count open threes.
    fn is_double_open_three(&mut self, row: usize, col: usize) -> bool {
        self.set(row, col, Some(Stone::Black));
        let open_threes = DIRECTIONS
            .iter()
            .filter(|&&dir| {
                let run = self.scan(row, col, dir, Stone::Black);
                run.length == 3 && run.open_ends == 2
            })
            .count();
        self.set(row, col, None);

        open_threes >= 2
    }
}
