/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

/// Squares of the 5x5x5 board, along with their `LevelFileRank` notation.
mod coord;
/// The error type shared by every fallible rules operation.
mod error;
/// Enums for piece kinds, colors, and a struct for a chess piece.
mod piece;
/// Direction vectors for every piece kind that moves along fixed lines.
mod vectors;

pub use coord::*;
pub use error::*;
pub use piece::*;
pub use vectors::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::coord::*;
    pub use crate::error::*;
    pub use crate::piece::*;
    pub use crate::vectors::*;
}
