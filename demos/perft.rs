/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use raumschach::{perft, splitperft, Game, Move};

/// Compute total number of states reachable from a position, given a depth.
#[derive(Debug, Parser)]
struct Cli {
    /// Depth to run the perft.
    depth: usize,

    /// The layout string of the position to run the perft, optionally followed by `w` or `b`.
    #[arg(short, long)]
    layout: Option<String>,

    /// List of moves (such as `Bc2Bc3`) to apply to the position before running the perft.
    #[arg(required = false)]
    moves: Vec<String>,

    /// If set, perform a splitperft, displaying the number of nodes reachable after each move available from the root.
    #[arg(short, long, default_value = "false")]
    split: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "raumschach=info".into()),
        )
        .init();

    let args = Cli::parse();

    // Parse args appropriately
    let start = if let Some(layout) = &args.layout {
        Game::from_layout(layout)?
    } else {
        Game::default()
    };

    // Apply moves, if any were provided
    let moves = args
        .moves
        .iter()
        .map(|mv_str| {
            mv_str
                .parse::<Move>()
                .with_context(|| format!("Failed to parse {mv_str:?} as a move"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let game = Game::replay(start, moves)?;

    println!(
        "Computing PERFT({}) of the following position:\n{}\n",
        args.depth,
        game.to_layout()
    );

    let now = Instant::now();
    let total_nodes = if args.split {
        let split = splitperft(&game, args.depth)?;
        for (mv, nodes) in &split {
            println!("{mv}\t{nodes}");
        }
        let nodes = split.iter().map(|(_, nodes)| nodes).sum::<u64>();
        println!("\n{nodes}\n");
        nodes
    } else {
        perft(&game, args.depth)?
    };

    let elapsed = now.elapsed();

    // Compute nodes-per-second metrics
    let nps = total_nodes as f32 / elapsed.as_secs_f32();
    let m_nps = nps / 1_000_000.0;

    println!("  Total Nodes:\t{total_nodes}");
    println!(" Elapsed Time:\t{elapsed:.1?}");
    println!("  Nodes / Sec:\t{nps:.0}");
    println!("M Nodes / Sec:\t{m_nps:.1}");

    Ok(())
}
