/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Board, Color, Coord, Move, Piece, PieceKind, RulesError, Vector};

/// Most moves a single piece can have. A Queen in the center reaches 52 squares.
pub const MAX_MOVES_PER_SQUARE: usize = 64;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_MOVES_PER_SQUARE`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_MOVES_PER_SQUARE>;

/// The two non-capturing Pawn directions (Forward, Up) for a Pawn advancing along `direction`.
#[inline(always)]
pub const fn pawn_push_vectors(direction: i8) -> [Vector; 2] {
    [[0, 0, direction], [direction, 0, 0]]
}

/// The five capture-only Pawn directions for a Pawn advancing along `direction`.
///
/// In order: Forward-Up, Forward-Left, Forward-Right, Up-Left, Up-Right.
#[inline(always)]
pub const fn pawn_capture_vectors(direction: i8) -> [Vector; 5] {
    [
        [direction, 0, direction],
        [0, -1, direction],
        [0, 1, direction],
        [direction, -1, 0],
        [direction, 1, 0],
    ]
}

impl Board {
    /// Generates every pseudo-legal move for the piece on `from`.
    ///
    /// These follow the piece's movement geometry and the occupancy of the board, but may
    /// leave the mover's own King in check. See [`Board::generate_legal_moves`].
    ///
    /// # Example
    /// ```
    /// # use raumschach::*;
    /// let mut board = Board::new();
    /// let center = Coord::new(2, 2, 2).unwrap();
    /// board.place(Piece::new(Color::White, PieceKind::Rook), center);
    /// assert_eq!(board.generate_potential_moves(center).unwrap().len(), 12);
    /// ```
    pub fn generate_potential_moves(&self, from: Coord) -> Result<MoveList, RulesError> {
        let piece = self.piece_at(from).ok_or(RulesError::EmptySquare(from))?;
        Ok(self.potential_moves_for(piece, from))
    }

    /// Pseudo-legal moves of `piece`, which must be standing on `from`.
    fn potential_moves_for(&self, piece: Piece, from: Coord) -> MoveList {
        let mut moves = MoveList::new();

        // Only Pawns have special movement
        if piece.is_pawn() {
            self.serialize_pawn_moves(piece.color(), from, &mut moves);
        } else {
            self.serialize_vector_moves(piece, from, &mut moves);
        }

        moves
    }

    /// Walks each of the piece's direction vectors, stopping at the first occupied square.
    ///
    /// Steppers only ever look at the first square along each vector.
    fn serialize_vector_moves(&self, piece: Piece, from: Coord, moves: &mut MoveList) {
        let kind = piece.kind();
        let reach = if kind.is_slider() { Coord::MAX as i8 } else { 1 };

        for &vector in kind.vectors() {
            for distance in 1..=reach {
                let Some(to) = from.offset(vector, distance) else {
                    break;
                };

                match self.color_at(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(occupant) => {
                        // Enemies are offered as a capture, but block the ray regardless
                        if occupant != piece.color() {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn serialize_pawn_moves(&self, color: Color, from: Coord, moves: &mut MoveList) {
        let direction = color.pawn_direction();

        // Pushes never capture, and are simply dropped when blocked by anything
        for vector in pawn_push_vectors(direction) {
            if let Some(to) = from.offset(vector, 1).filter(|&to| !self.has(to)) {
                serialize_pawn_move(color, from, to, moves);
            }
        }

        // Diagonals only ever capture
        for vector in pawn_capture_vectors(direction) {
            if let Some(to) = from
                .offset(vector, 1)
                .filter(|&to| self.color_at(to) == Some(color.opponent()))
            {
                serialize_pawn_move(color, from, to, moves);
            }
        }
    }

    /// Returns `true` if any `by` piece has `target` among its pseudo-legal destinations.
    ///
    /// Pawns only attack the diagonal squares that hold an enemy piece, so an empty square
    /// diagonally ahead of a Pawn is never reported as attacked.
    pub fn is_square_attacked(&self, target: Coord, by: Color) -> bool {
        self.pieces_of(by).any(|(from, piece)| {
            self.potential_moves_for(piece, from)
                .iter()
                .any(|mv| mv.to() == target)
        })
    }

    /// Returns `true` if the King of `color` is attacked by the opponent.
    pub fn in_check(&self, color: Color) -> Result<bool, RulesError> {
        let king = self.find_king(color)?;
        Ok(self.is_square_attacked(king, color.opponent()))
    }

    /// Generates every legal move for the piece on `from`.
    ///
    /// Each pseudo-legal move is played out on a copy of the board and kept only if it does
    /// not leave the mover's King in check. Pins, discovered checks, and walking into an
    /// attacked square are all handled by this one rule.
    ///
    /// # Example
    /// ```
    /// # use raumschach::*;
    /// // A Black Rook pinned between its King and a White Rook may only slide along the pin.
    /// let board = Board::from_layout("k4/5/5/5/5|5/5/5/5/5|r4/5/5/5/5|5/5/5/5/5|R4/5/5/5/5").unwrap();
    /// let rook = Coord::from_notation("Ca5").unwrap();
    /// let moves = board.generate_legal_moves(rook).unwrap();
    /// let mut targets = moves.iter().map(|mv| mv.to().to_notation()).collect::<Vec<_>>();
    /// targets.sort();
    /// assert_eq!(targets, ["Ba5", "Da5", "Ea5"]);
    /// ```
    pub fn generate_legal_moves(&self, from: Coord) -> Result<MoveList, RulesError> {
        let piece = self.piece_at(from).ok_or(RulesError::EmptySquare(from))?;

        let mut legal = MoveList::new();
        for mv in self.potential_moves_for(piece, from) {
            if self.is_safe_for(piece.color(), mv)? {
                legal.push(mv);
            }
        }

        Ok(legal)
    }

    /// Generates every legal move for every `color` piece on the board.
    pub fn generate_all_legal_moves(&self, color: Color) -> Result<Vec<Move>, RulesError> {
        let mut moves = Vec::new();
        for (from, _) in self.pieces_of(color) {
            moves.extend(self.generate_legal_moves(from)?);
        }
        Ok(moves)
    }

    /// Returns `true` if `color` has at least one legal move.
    ///
    /// Same answer as checking [`Board::generate_all_legal_moves`] for emptiness, but stops at the first legal move found.
    pub fn has_legal_moves(&self, color: Color) -> Result<bool, RulesError> {
        for (from, piece) in self.pieces_of(color) {
            for mv in self.potential_moves_for(piece, from) {
                if self.is_safe_for(color, mv)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Returns `true` if `color` is in check and has no legal moves.
    pub fn is_checkmate(&self, color: Color) -> Result<bool, RulesError> {
        Ok(self.in_check(color)? && !self.has_legal_moves(color)?)
    }

    /// Returns `true` if `color` is not in check, yet has no legal moves.
    pub fn is_stalemate(&self, color: Color) -> Result<bool, RulesError> {
        Ok(!self.in_check(color)? && !self.has_legal_moves(color)?)
    }

    /// Plays `mv` on a copy of the board and checks whether `color`'s King survives it.
    #[inline(always)]
    fn is_safe_for(&self, color: Color, mv: Move) -> Result<bool, RulesError> {
        let after = self.apply_move(mv)?;
        Ok(!after.in_check(color)?)
    }
}

/// Appends a Pawn move, fanning it out into one move per promotion kind on the promotion square.
#[inline(always)]
fn serialize_pawn_move(color: Color, from: Coord, to: Coord, moves: &mut MoveList) {
    if to.is_promotion_square_for(color) {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::new(from, to).with_promotion(kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}
