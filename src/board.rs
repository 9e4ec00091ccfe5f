//! The N×N game board and its win, fill and occupancy queries

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidMoveReason};
use crate::{MAX_CELLS, MAX_SIZE, MIN_SIZE};

/// One of the two competing sides. `PlayerOne` always moves first.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::PlayerOne => Side::PlayerTwo,
            Side::PlayerTwo => Side::PlayerOne,
        }
    }

    /// The mark drawn for this side
    pub fn mark(self) -> char {
        match self {
            Side::PlayerOne => 'X',
            Side::PlayerTwo => 'O',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::PlayerOne => write!(f, "Player 1 ({})", self.mark()),
            Side::PlayerTwo => write!(f, "Player 2 ({})", self.mark()),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Side::PlayerOne),
            Cell::PlayerTwo => Some(Side::PlayerTwo),
        }
    }

    fn mark(&self) -> char {
        self.side().map_or('.', Side::mark)
    }

    // two bits per cell in the board key
    fn bits(&self) -> u64 {
        match self {
            Cell::Empty => 0b00,
            Cell::PlayerOne => 0b01,
            Cell::PlayerTwo => 0b10,
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::PlayerOne => Cell::PlayerOne,
            Side::PlayerTwo => Cell::PlayerTwo,
        }
    }
}

/// A cell coordinate, zero-indexed from the top left corner
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The result of a round, derived from the board on demand
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    InProgress,
    Win(Side),
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// A square grid of 3×3, 4×4 or 5×5 cells
///
/// # Notes
/// The board knows nothing about turn order: it accepts any side in any empty
/// cell. Alternation and terminal blocking belong to the caller (see
/// [`Game`](crate::game::Game)).
///
/// A line only counts as a win when *every* one of its N cells belongs to the
/// same side, so a 5×5 board needs five in a row.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [Cell; MAX_CELLS], // row-major, only the first size * size cells are used
    size: usize,
    num_moves: usize,
}

impl Board {
    /// Creates an empty board of the given dimension
    pub fn new(size: usize) -> Result<Self, Error> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(Error::UnsupportedSize(size));
        }
        Ok(Self {
            cells: [Cell::Empty; MAX_CELLS],
            size,
            num_moves: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of occupied cells
    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn is_empty(&self) -> bool {
        self.num_moves == 0
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn in_range(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    // callers guarantee the coordinates are in range
    fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if self.in_range(row, col) {
            Some(self.at(row, col))
        } else {
            None
        }
    }

    /// Whether the cell holds a mark. Cells outside the board are never occupied.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).map_or(false, |cell| !cell.is_empty())
    }

    /// Whether a move may be placed on the cell
    pub fn is_playable(&self, row: usize, col: usize) -> bool {
        self.get(row, col).map_or(false, |cell| cell.is_empty())
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == self.size * self.size
    }

    /// Places a mark for `side`, refusing occupied or out of range cells
    pub fn place(&mut self, row: usize, col: usize, side: Side) -> Result<(), Error> {
        if !self.in_range(row, col) {
            return Err(Error::InvalidMove {
                row,
                col,
                reason: InvalidMoveReason::OutOfRange,
            });
        }
        if self.is_occupied(row, col) {
            return Err(Error::InvalidMove {
                row,
                col,
                reason: InvalidMoveReason::Occupied,
            });
        }
        self.play(row, col, side);
        Ok(())
    }

    /// Places a mark without validation, for the search's try/undo loop
    pub(crate) fn play(&mut self, row: usize, col: usize, side: Side) {
        debug_assert!(self.is_playable(row, col));
        let index = self.index(row, col);
        self.cells[index] = Cell::from(side);
        self.num_moves += 1;
    }

    /// Empties an occupied cell, undoing a hypothetical move.
    ///
    /// Cells outside the board are left alone.
    pub fn clear(&mut self, row: usize, col: usize) {
        if !self.in_range(row, col) {
            return;
        }
        debug_assert!(self.is_occupied(row, col), "clearing an empty cell");
        let index = self.index(row, col);
        if !self.cells[index].is_empty() {
            self.cells[index] = Cell::Empty;
            self.num_moves -= 1;
        }
    }

    /// Returns true if `side` owns every cell of a row, a column or a diagonal
    pub fn has_win(&self, side: Side) -> bool {
        let cell = Cell::from(side);
        let n = self.size;

        // rows and columns
        for i in 0..n {
            if (0..n).all(|j| self.at(i, j) == cell) || (0..n).all(|j| self.at(j, i) == cell) {
                return true;
            }
        }

        // main diagonal, then anti-diagonal
        (0..n).all(|i| self.at(i, i) == cell) || (0..n).all(|i| self.at(i, n - 1 - i) == cell)
    }

    pub fn winner(&self) -> Option<Side> {
        [Side::PlayerOne, Side::PlayerTwo]
            .iter()
            .copied()
            .find(|&side| self.has_win(side))
    }

    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(side) => Outcome::Win(side),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// The empty cells in row-major order
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        let size = self.size;
        (0..size * size)
            .filter(move |&i| self.cells[i].is_empty())
            .map(move |i| Move::new(i / size, i % size))
    }

    /// Replaces the grid with an empty one of a new dimension.
    ///
    /// Only allowed before the first move of a round.
    pub fn resize(&mut self, size: usize) -> Result<(), Error> {
        if !self.is_empty() {
            return Err(Error::ResizeInProgress);
        }
        *self = Self::new(size)?;
        Ok(())
    }

    /// Empties every cell, keeping the dimension
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; MAX_CELLS];
        self.num_moves = 0;
    }

    /// A key identifying the exact contents of the board
    pub fn key(&self) -> u64 {
        self.cells[..self.size * self.size]
            .iter()
            .enumerate()
            .fold(self.size as u64, |key, (i, cell)| {
                key ^ (cell.bits() << (2 * i + 4))
            })
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parses rows separated by `/`, e.g. `"X.O/.X./..O"`. `X` is player one,
    /// `O` player two and `.` an empty cell.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.trim().split('/').collect();
        let mut board = Self::new(rows.len())?;

        for (row, line) in rows.iter().enumerate() {
            let marks: Vec<char> = line.trim().chars().collect();
            if marks.len() != board.size {
                return Err(Error::Parse(format!(
                    "row {} has {} cells, expected {}",
                    row + 1,
                    marks.len(),
                    board.size
                )));
            }
            for (col, mark) in marks.into_iter().enumerate() {
                match mark.to_ascii_uppercase() {
                    'X' => board.play(row, col, Side::PlayerOne),
                    'O' => board.play(row, col, Side::PlayerTwo),
                    '.' => {}
                    other => {
                        return Err(Error::Parse(format!("unknown mark '{}'", other)));
                    }
                }
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            let line: String = (0..self.size).map(|col| self.at(row, col).mark()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
