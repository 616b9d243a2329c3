/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

pub use raumschach_types::*;

/// A 5x5x5 board of pieces, with layout strings and move application.
mod board;
/// The side to move, move history, and game status on top of a [`Board`].
mod game;
/// Pseudo-legal and legal move generation, check, checkmate, and stalemate detection.
mod movegen;
/// A single move of a piece, with optional promotion.
mod moves;
/// Utility function for performance testing.
mod perft;
/// Serializable messages for starting games and exchanging moves between players.
pub mod wire;

pub use board::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::board::*;
    pub use crate::game::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::perft::*;
    pub use crate::wire::*;
    pub use raumschach_types::*;
}
