use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::cmp::Ordering;
use std::io::{stdin, stdout, Write};

use tictactoe_ai::{
    board::{Move, Outcome, Side},
    game::{Game, GameConfig, Mode},
    solver::{score_to_empty_cells, Score},
    Error, MAX_SIZE, MIN_SIZE,
};

mod terminal;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Two human players
    Pvp,
    /// Human player one against the engine
    Pvai,
    /// The engine against itself
    Aivai,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pvp => Mode::PlayerVsPlayer,
            ModeArg::Pvai => Mode::PlayerVsAi,
            ModeArg::Aivai => Mode::AiVsAi,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tictactoe",
    about = "Tic-tac-toe on 3x3, 4x4 or 5x5 boards against a perfect minimax opponent"
)]
struct Args {
    /// Board dimension, asked for when omitted
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(MIN_SIZE as i64..=MAX_SIZE as i64))]
    size: Option<u8>,

    /// Which sides the engine plays, asked for when omitted
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Search the engine's candidate moves on all cores
    #[arg(long)]
    parallel: bool,

    /// Show the engine's evaluation and suggested move on human turns
    #[arg(long)]
    hints: bool,
}

enum Command {
    Play(usize, usize),
    Restart,
    Quit,
}

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    stdout().flush()?;

    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(buffer.trim().to_lowercase())
}

fn choose_size() -> Result<usize> {
    loop {
        let answer = prompt(&format!("Board size ({} to {}): ", MIN_SIZE, MAX_SIZE))?;
        match answer.parse::<usize>() {
            Ok(size @ MIN_SIZE..=MAX_SIZE) => return Ok(size),
            _ => println!("Unknown answer given"),
        }
    }
}

fn choose_mode() -> Result<Mode> {
    loop {
        let answer = prompt("1) Player vs Player  2) Player vs AI  3) AI vs AI\nGame mode: ")?;
        match answer.chars().next() {
            Some('1') => return Ok(Mode::PlayerVsPlayer),
            Some('2') => return Ok(Mode::PlayerVsAi),
            Some('3') => return Ok(Mode::AiVsAi),
            _ => println!("Unknown answer given"),
        }
    }
}

fn parse_command(input: &str) -> Result<Command> {
    match input {
        "q" | "quit" => return Ok(Command::Quit),
        "r" | "restart" => return Ok(Command::Restart),
        _ => {}
    }

    let numbers = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<usize>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| anyhow!("Invalid input: {}", input))?;

    match numbers.as_slice() {
        &[row, col] if row >= 1 && col >= 1 => Ok(Command::Play(row - 1, col - 1)),
        &[_, _] => Err(anyhow!("Rows and columns are numbered from 1")),
        _ => Err(anyhow!("Expected a row and a column, e.g. '2 3'")),
    }
}

fn thinking(side: Side) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} [{elapsed}]"));
    spinner.set_message(&format!("{} is thinking...", side));
    spinner.enable_steady_tick(100);
    spinner
}

fn report_score(side: Side, score: Score) {
    let empty = score_to_empty_cells(score);
    let cell_string = if empty == 1 { "cell" } else { "cells" };
    match score.cmp(&0) {
        Ordering::Greater => println!(
            "{} can force a win with {} {} to spare.",
            side, empty, cell_string
        ),
        Ordering::Less => println!(
            "{} can force a win with {} {} to spare.",
            side.opponent(),
            empty,
            cell_string
        ),
        Ordering::Equal => println!("{} can at best force a draw.", side),
    }
}

/// Whether the engine will search a board larger than 3x3, either as a player
/// or to give hints
fn slow_search_expected(size: usize, mode: Mode, hints: bool) -> bool {
    size > MIN_SIZE && (mode != Mode::PlayerVsPlayer || hints)
}

/// Plays one round, returning false if the player asked to quit
fn play_round(game: &mut Game, hints: bool) -> Result<bool> {
    let mut last_move = None;

    loop {
        terminal::display(game.board(), last_move)?;

        match game.outcome() {
            Outcome::InProgress => {}
            Outcome::Win(side) => {
                println!("{} wins!", side);
                return Ok(true);
            }
            Outcome::Draw => {
                println!("Draw!");
                return Ok(true);
            }
        }

        let side = game.to_move();

        // engine player
        if game.is_ai_turn() {
            // slow down play if both players are AI
            if game.config().mode == Mode::AiVsAi {
                std::thread::sleep(std::time::Duration::from_secs(1));
            }

            let spinner = thinking(side);
            let result = game.play_best();
            spinner.finish_and_clear();

            let (best_move, _) = result?;
            println!("{} plays {} {}", side, best_move.row + 1, best_move.col + 1);
            last_move = Some(best_move);
            continue;
        }

        // human player
        if hints {
            let spinner = thinking(side);
            let result = game.analyse();
            spinner.finish_and_clear();

            let (score, best_move) = result?;
            report_score(side, score);
            println!("Suggested move: {} {}", best_move.row + 1, best_move.col + 1);
        }

        let input = prompt(&format!("{} move (row col), r to restart, q to quit > ", side))?;
        match parse_command(&input) {
            Err(err) => println!("{}", err),
            Ok(Command::Quit) => return Ok(false),
            Ok(Command::Restart) => {
                game.restart();
                last_move = None;
            }
            Ok(Command::Play(row, col)) => match game.play(row, col) {
                Ok(_) => last_move = Some(Move::new(row, col)),
                Err(Error::InvalidMove { reason, .. }) => {
                    println!("Invalid move at {} {}: {}", row + 1, col + 1, reason)
                }
                Err(err) => println!("{}", err),
            },
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    println!("Welcome to Tic-Tac-Toe\n");

    let size = match args.size {
        Some(size) => size as usize,
        None => choose_size()?,
    };
    let mode = match args.mode {
        Some(mode) => mode.into(),
        None => choose_mode()?,
    };
    if slow_search_expected(size, mode, args.hints) {
        println!(
            "The engine searches every possible game, expect early moves on a {}x{} board to take a very long time",
            size, size
        );
    }

    let config = GameConfig {
        size,
        mode,
        parallel_search: args.parallel,
    };
    info!(?config, "starting game");
    let mut game = Game::new(config)?;

    // round loop
    while play_round(&mut game, args.hints)? {
        match prompt("Play again? y/n: ")?.chars().next() {
            Some('y') => game.restart(),
            _ => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slow_search_warning() {
        assert!(slow_search_expected(4, Mode::PlayerVsAi, false));
        assert!(slow_search_expected(5, Mode::AiVsAi, false));
        assert!(slow_search_expected(4, Mode::PlayerVsPlayer, true));
        assert!(!slow_search_expected(5, Mode::PlayerVsPlayer, false));
        assert!(!slow_search_expected(3, Mode::PlayerVsAi, true));
    }
}
