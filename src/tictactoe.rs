//! Tic-tac-toe with an exhaustive depth-aware minimax.
//!
//! `X` is the computer and maximizes; `O` is the opponent. Wins found sooner
//! score higher and losses found later score higher, so the computer takes
//! the fastest win and delays a forced loss.

use std::fmt;

use crate::constants::{TTT_CELLS, TTT_LINES};
use crate::error::SearchError;

/// Score of an immediate win for `X`.
const WIN_SCORE: i32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Mark>; TTT_CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board from a 9-character string of `X`, `O` and anything else for empty.
    pub fn from_str_lossy(s: &str) -> Self {
        let mut board = Self::new();
        for (cell, ch) in board.cells.iter_mut().zip(s.chars()) {
            *cell = match ch {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                _ => None,
            };
        }
        board
    }

    pub fn get(&self, idx: usize) -> Option<Mark> {
        self.cells.get(idx).copied().flatten()
    }

    /// Place `mark` on an empty cell.
    pub fn play(&mut self, idx: usize, mark: Mark) -> Result<(), SearchError> {
        match self.cells.get_mut(idx) {
            Some(cell @ None) => {
                *cell = Some(mark);
                Ok(())
            }
            _ => Err(SearchError::IllegalMove(idx)),
        }
    }

    fn clear(&mut self, idx: usize) {
        self.cells[idx] = None;
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Owner of the first completed line, if any.
    pub fn winner(&self) -> Option<Mark> {
        TTT_LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.cells[a]?;
            (self.cells[b] == Some(mark) && self.cells[c] == Some(mark)).then_some(mark)
        })
    }

    /// `1` if `X` has won, `-1` if `O` has, `0` otherwise.
    pub fn evaluate(&self) -> i32 {
        match self.winner() {
            Some(Mark::X) => 1,
            Some(Mark::O) => -1,
            None => 0,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(3) {
            for cell in row {
                let ch = match cell {
                    Some(Mark::X) => 'X',
                    Some(Mark::O) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Minimax value of `board` with `X` to move when `maximizing`.
///
/// `depth` counts plies already played below the move being evaluated.
/// The board is restored before returning.
pub fn minimax(board: &mut Board, depth: i32, maximizing: bool) -> i32 {
    match board.evaluate() {
        1 => return WIN_SCORE - depth,
        -1 => return depth - WIN_SCORE,
        _ => {}
    }
    if board.is_full() {
        return 0;
    }

    let (mark, mut best) = if maximizing {
        (Mark::X, i32::MIN)
    } else {
        (Mark::O, i32::MAX)
    };
    let empty: Vec<usize> = board.empty_cells().collect();
    for idx in empty {
        board.cells[idx] = Some(mark);
        let score = minimax(board, depth + 1, !maximizing);
        board.clear(idx);
        best = if maximizing { best.max(score) } else { best.min(score) };
    }
    best
}

/// Best cell for `X`, or `None` on a full board.
///
/// Ties go to the lowest cell index.
pub fn best_move(board: &mut Board) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    let empty: Vec<usize> = board.empty_cells().collect();
    for idx in empty {
        board.cells[idx] = Some(Mark::X);
        let score = minimax(board, 0, false);
        board.clear(idx);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((idx, score));
        }
    }
    best.map(|(idx, _)| idx)
}
