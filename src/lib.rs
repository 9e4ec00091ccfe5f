//! A perfect agent for playing or analysing tic-tac-toe on 3×3, 4×4 and 5×5 boards
//!
//! This agent uses an exhaustive minimax game tree search to find the
//! mathematically optimal move for any position.
//!
//! # Basic Usage
//!
//! ```
//! use tictactoe_ai::{board::{Board, Move, Side}, solver::Solver};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board: Board = "X../.X./...".parse()?;
//! let mut solver = Solver::new(&mut board, Side::PlayerOne);
//! let (score, best_move) = solver.solve()?;
//!
//! assert_eq!(best_move, Move::new(2, 2));
//! assert!(score > 0);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod error;

pub mod board;

pub mod solver;

pub mod game;


pub use error::Error;

/// The smallest supported board dimension
pub const MIN_SIZE: usize = 3;

/// The largest supported board dimension
pub const MAX_SIZE: usize = 5;

/// The number of cells on the largest board
pub const MAX_CELLS: usize = MAX_SIZE * MAX_SIZE;

const_assert!(MIN_SIZE <= MAX_SIZE);
// ensure that two bits per cell plus the size tag fit in a u64 board key
const_assert!(2 * MAX_CELLS + 4 <= 64);
