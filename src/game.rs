//! Round flow: turn order, automated replies and restarts around a single board

use tracing::{debug, info, instrument};

use crate::board::{Board, Move, Outcome, Side};
use crate::error::Error;
use crate::solver::{Score, Solver};

/// Which sides are played by the engine
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Mode {
    PlayerVsPlayer,
    /// Player one is human, player two is the engine
    PlayerVsAi,
    AiVsAi,
}

impl Mode {
    pub fn is_ai(&self, side: Side) -> bool {
        match self {
            Mode::PlayerVsPlayer => false,
            Mode::PlayerVsAi => side == Side::PlayerTwo,
            Mode::AiVsAi => true,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct GameConfig {
    pub size: usize,
    pub mode: Mode,
    /// Search the engine's top-level candidates on all cores
    pub parallel_search: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 3,
            mode: Mode::PlayerVsAi,
            parallel_search: false,
        }
    }
}

/// A round of play on one board
///
/// Player one always opens and the sides strictly alternate. Once a side has
/// completed a line or the board is full, further moves are refused until
/// [`restart`](Game::restart).
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Side,
    config: GameConfig,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, Error> {
        Ok(Self {
            board: Board::new(config.size)?,
            to_move: Side::PlayerOne,
            config,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// Whether the side to move is played by the engine
    pub fn is_ai_turn(&self) -> bool {
        !self.outcome().is_terminal() && self.config.mode.is_ai(self.to_move)
    }

    /// Places a mark for the side to move and hands the turn over
    ///
    /// An invalid move leaves the board and the turn untouched.
    #[instrument(skip(self), fields(side = ?self.to_move))]
    pub fn play(&mut self, row: usize, col: usize) -> Result<Outcome, Error> {
        if self.outcome().is_terminal() {
            return Err(Error::GameOver);
        }
        if let Err(err) = self.board.place(row, col, self.to_move) {
            debug!(%err, "move rejected");
            return Err(err);
        }
        self.to_move = self.to_move.opponent();

        let outcome = self.outcome();
        if outcome.is_terminal() {
            info!(?outcome, moves = self.board.num_moves(), "round finished");
        }
        Ok(outcome)
    }

    fn search(&mut self) -> Result<(Score, Move), Error> {
        if self.outcome().is_terminal() {
            return Err(Error::GameOver);
        }
        if self.config.parallel_search {
            Solver::solve_parallel(&self.board, self.to_move)
        } else {
            Solver::new(&mut self.board, self.to_move).solve()
        }
    }

    /// The engine's score and move for the side to move, without playing it
    pub fn analyse(&mut self) -> Result<(Score, Move), Error> {
        self.search()
    }

    /// The engine's move for the side to move, without playing it
    pub fn hint(&mut self) -> Result<Move, Error> {
        self.search().map(|(_, best_move)| best_move)
    }

    /// Computes the engine's move for the side to move and plays it
    #[instrument(skip(self), fields(side = ?self.to_move))]
    pub fn play_best(&mut self) -> Result<(Move, Outcome), Error> {
        let (score, best_move) = self.search()?;
        info!(%best_move, score, "engine move");
        let outcome = self.play(best_move.row, best_move.col)?;
        Ok((best_move, outcome))
    }

    /// Clears the board for a new round, player one to move
    pub fn restart(&mut self) {
        self.board.reset();
        self.to_move = Side::PlayerOne;
    }

    /// Changes the board dimension before the first move of a round
    pub fn resize(&mut self, size: usize) -> Result<(), Error> {
        self.board.resize(size)?;
        self.config.size = size;
        Ok(())
    }
}
