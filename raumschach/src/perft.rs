/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Board, Color, Game, Move, RulesError};

/// Counts the leaf nodes of the legal move tree rooted at `game`, `depth` plies deep.
///
/// # Example
/// ```
/// # use raumschach::{perft, Game};
/// assert_eq!(perft(&Game::default(), 1).unwrap(), 61);
/// ```
pub fn perft(game: &Game, depth: usize) -> Result<u64, RulesError> {
    perft_board(game.board(), game.side_to_move(), depth)
}

/// Like [`perft`], but reports the node count below each legal move at the root.
///
/// Moves are listed in generation order. For any `depth` of at least 1, their counts sum to
/// `perft(game, depth)`. A depth of 0 splits nothing and yields an empty list.
pub fn splitperft(game: &Game, depth: usize) -> Result<Vec<(Move, u64)>, RulesError> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let color = game.side_to_move();

    game.legal_moves()?
        .into_iter()
        .map(|mv| -> Result<(Move, u64), RulesError> {
            let child = game.apply_move(mv)?;
            let nodes = perft_board(&child, color.opponent(), depth - 1)?;
            Ok((mv, nodes))
        })
        .collect()
}

fn perft_board(board: &Board, color: Color, depth: usize) -> Result<u64, RulesError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = board.generate_all_legal_moves(color)?;

    // Bulk counting
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    // Recursively accumulate the nodes from the remaining depths
    moves.into_iter().try_fold(0, |nodes, mv| -> Result<u64, RulesError> {
        Ok(nodes + perft_board(&board.apply_move(mv)?, color.opponent(), depth - 1)?)
    })
}
