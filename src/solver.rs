//! An exhaustive minimax agent for N×N tic-tac-toe

use rayon::prelude::*;
use tracing::debug;

use crate::board::{Board, Move, Side};
use crate::error::Error;
use crate::MAX_CELLS;

/// The game-theoretic value of a position for the optimizing side
pub type Score = i32;

/// The maximum possible score of a position
pub const MAX_SCORE: Score = MAX_CELLS as Score;
/// The minimum possible score of a position
pub const MIN_SCORE: Score = -MAX_SCORE;
/// The score of a drawn position
pub const DRAW_SCORE: Score = 0;

/// An agent that finds the optimal move for one side
///
/// # Notes
/// The search is a plain exhaustive minimax: every reachable leaf of the
/// remaining game tree is visited, with no pruning and no transposition table.
/// Hypothetical moves are played on the borrowed board and cleared again, so
/// the board is left exactly as it was found on every return path.
///
/// The solver never applies the move it returns, that is left to the caller.
///
/// # Position Scoring
/// A position won by the optimizing side scores the number of empty cells left
/// plus one, a lost position scores the negation of that and a drawn position
/// scores 0. Every win therefore outranks every draw, which outranks every
/// loss, and quicker wins (or slower losses) score further from 0.
pub struct Solver<'a> {
    board: &'a mut Board,
    side: Side,

    /// The number of positions searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl<'a> Solver<'a> {
    /// Creates a new `Solver` maximizing the score of `side`
    pub fn new(board: &'a mut Board, side: Side) -> Self {
        Self {
            board,
            side,
            node_count: 0,
        }
    }

    fn terminal_score(&self) -> Option<Score> {
        let remaining = (self.board.size() * self.board.size() - self.board.num_moves()) as Score;
        if self.board.has_win(self.side) {
            Some(remaining + 1)
        } else if self.board.has_win(self.side.opponent()) {
            Some(-(remaining + 1))
        } else if self.board.is_full() {
            Some(DRAW_SCORE)
        } else {
            None
        }
    }

    /// Scores the current position with `to_move` about to play
    pub fn evaluate(&mut self, to_move: Side) -> Score {
        self.node_count += 1;

        if let Some(score) = self.terminal_score() {
            return score;
        }

        let maximizing = to_move == self.side;
        let mut best = if maximizing { MIN_SCORE } else { MAX_SCORE };
        let size = self.board.size();

        for row in 0..size {
            for col in 0..size {
                if self.board.is_occupied(row, col) {
                    continue;
                }
                self.board.play(row, col, to_move);
                let score = self.evaluate(to_move.opponent());
                self.board.clear(row, col);

                best = if maximizing {
                    best.max(score)
                } else {
                    best.min(score)
                };
            }
        }
        best
    }

    /// Calculates the score of the position and the best move for the optimizing side
    ///
    /// Candidates are tried in row-major order and the first one reaching the
    /// highest score is kept.
    pub fn solve(&mut self) -> Result<(Score, Move), Error> {
        if self.board.is_terminal() {
            return Err(Error::NoLegalMove);
        }
        let key = self.board.key();
        let size = self.board.size();

        let mut best: Option<(Score, Move)> = None;
        for row in 0..size {
            for col in 0..size {
                if self.board.is_occupied(row, col) {
                    continue;
                }
                self.board.play(row, col, self.side);
                let score = self.evaluate(self.side.opponent());
                self.board.clear(row, col);

                if best.map_or(true, |(best_score, _)| score > best_score) {
                    best = Some((score, Move::new(row, col)));
                }
            }
        }
        debug_assert_eq!(self.board.key(), key, "search did not restore the board");

        let (score, best_move) = best.ok_or(Error::NoLegalMove)?;
        debug!(
            side = ?self.side,
            %best_move,
            score,
            nodes = self.node_count,
            "search finished"
        );
        Ok((score, best_move))
    }

    /// Calculates the best move for the optimizing side
    pub fn best_move(&mut self) -> Result<Move, Error> {
        self.solve().map(|(_, best_move)| best_move)
    }

    /// Calculates the score and best move with the top-level candidates searched in parallel
    ///
    /// Each candidate is searched on its own copy of the board, and the results
    /// are combined in row-major order, so this returns exactly what
    /// [`solve`](Self::solve) would.
    pub fn solve_parallel(board: &Board, side: Side) -> Result<(Score, Move), Error> {
        if board.is_terminal() {
            return Err(Error::NoLegalMove);
        }
        let candidates: Vec<Move> = board.moves().collect();

        let results: Vec<(Score, Move, usize)> = candidates
            .par_iter()
            .map(|&candidate| {
                let mut next = *board;
                next.play(candidate.row, candidate.col, side);
                let mut solver = Solver::new(&mut next, side);
                let score = solver.evaluate(side.opponent());
                (score, candidate, solver.node_count)
            })
            .collect();

        let nodes: usize = results.iter().map(|&(_, _, nodes)| nodes).sum();
        let mut best: Option<(Score, Move)> = None;
        for (score, candidate, _) in results {
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, candidate));
            }
        }

        let (score, best_move) = best.ok_or(Error::NoLegalMove)?;
        debug!(?side, %best_move, score, nodes, "parallel search finished");
        Ok((score, best_move))
    }
}

/// Returns the optimal move for `side`, leaving the board unchanged
pub fn best_move(board: &mut Board, side: Side) -> Result<Move, Error> {
    Solver::new(board, side).best_move()
}

/// Converts a position score to the number of cells still empty when the
/// game ends under perfect play. Draws fill the whole board.
pub fn score_to_empty_cells(score: Score) -> usize {
    if score == DRAW_SCORE {
        0
    } else {
        (score.abs() - 1) as usize
    }
}
