/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use raumschach::{Game, GameStatus, Move};

/// Replay a sequence of moves, printing the board after each one.
#[derive(Debug, Parser)]
struct Cli {
    /// The layout string of the starting position, optionally followed by `w` or `b`.
    #[arg(short, long)]
    layout: Option<String>,

    /// Moves to play, in order (such as `Bc2Bc3 Dc4Dc3`).
    moves: Vec<String>,

    /// If set, list the legal moves of the side to move once the replay has finished.
    #[arg(short = 'm', long, default_value = "false")]
    list_moves: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "raumschach=info".into()),
        )
        .init();

    let args = Cli::parse();

    let mut game = if let Some(layout) = &args.layout {
        Game::from_layout(layout)?
    } else {
        Game::default()
    };

    println!("{game}\n");

    for (i, mv_str) in args.moves.iter().enumerate() {
        let mv: Move = mv_str
            .parse()
            .with_context(|| format!("Failed to parse {mv_str:?} as a move"))?;

        let side = game.side_to_move();
        game.make_move_checked(mv)
            .with_context(|| format!("Move #{} ({mv}) was refused", i + 1))?;

        println!("{}. {side} plays {mv}\n{game}\n", i + 1);
    }

    let status = game.status()?;
    let side = game.side_to_move();
    let summary = match status {
        GameStatus::Ongoing => format!("{side} to move").as_str().normal(),
        GameStatus::Check => format!("{side} is in check").as_str().yellow(),
        GameStatus::Checkmate => format!("Checkmate! {} wins", side.opponent())
            .as_str()
            .green()
            .bold(),
        GameStatus::Stalemate => "Stalemate".cyan().bold(),
    };
    println!("{summary}");
    println!("{}", game.to_layout().as_str().dimmed());

    if args.list_moves {
        let moves = game
            .legal_moves()?
            .iter()
            .map(Move::to_notation)
            .collect::<Vec<_>>();
        println!("\n{} legal moves: {}", moves.len(), moves.join(" "));
    }

    Ok(())
}
