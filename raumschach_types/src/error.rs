/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Color, Coord};

/// Everything that can go wrong when asking the rules engine a question.
///
/// None of these are transient: each one means the caller handed the engine
/// an input (or a board) that violates its contract, so they are reported
/// immediately and never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// A numeric triple outside of `[0, 4]` on some axis, or a notation string
    /// outside of the `LevelFileRank` alphabet.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Move generation was requested for a square that holds no piece.
    #[error("no piece on {0}")]
    EmptySquare(Coord),

    /// The board has no King of the requested color.
    #[error("no {0} king on the board")]
    KingNotFound(Color),

    /// A promotion code outside of `Q R B N U`, or an ineligible promotion kind.
    #[error("invalid promotion: {0}")]
    InvalidPromotion(String),

    /// A board layout string that could not be parsed.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}
