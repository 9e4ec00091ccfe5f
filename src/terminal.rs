use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use tictactoe_ai::board::{Board, Move, Side};

fn side_color(side: Side) -> Color {
    match side {
        Side::PlayerOne => Color::Red,
        Side::PlayerTwo => Color::Yellow,
    }
}

/// Draws the board with 1-based row and column labels, the last move in bold
pub fn display(board: &Board, last_move: Option<Move>) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=board.size()).map(|col| format!(" {}", col)).collect();
    stdout.queue(PrintStyledContent(
        style(format!("\n  {}\n", cols)).attribute(Attribute::Bold),
    ))?;

    for row in 0..board.size() {
        stdout.queue(PrintStyledContent(
            style(format!("{} ", row + 1)).attribute(Attribute::Bold),
        ))?;
        for col in 0..board.size() {
            let side = board.get(row, col).and_then(|cell| cell.side());
            let mut content = match side {
                Some(side) => style(format!(" {}", side.mark())).with(side_color(side)),
                None => style(" .".to_string()).with(Color::DarkGrey),
            };
            if last_move == Some(Move::new(row, col)) {
                content = content.attribute(Attribute::Bold);
            }
            stdout.queue(PrintStyledContent(content))?;
        }
        stdout.queue(PrintStyledContent(style("\n".to_string())))?;
    }
    stdout.flush()?;
    Ok(())
}
