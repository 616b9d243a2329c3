/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use serde::{Deserialize, Serialize};

use super::{
    RulesError, Vector, BISHOP_VECTORS, KNIGHT_VECTORS, QUEEN_VECTORS, ROOK_VECTORS,
    UNICORN_VECTORS,
};

/// Represents the color of a player, piece, etc.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Creates a new [`Color`] from a char: `w` for White, `b` for Black.
    #[inline(always)]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'w' | 'W' => Some(Self::White),
            'b' | 'B' => Some(Self::Black),
            _ => None,
        }
    }

    /// Returns the opposite color.
    ///
    /// # Example
    /// ```
    /// # use raumschach_types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns this [`Color`] as a `usize`, for indexing into arrays.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns `true` if this [`Color`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Direction in which this color's Pawns advance, along both the rank and level axes.
    #[inline(always)]
    pub const fn pawn_direction(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Character used for the side-to-move field of a layout string.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Lowercase name of this color.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl<T> Index<Color> for [T; Color::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Color> for [T; Color::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the kind (or "role") that a chess piece can be.
///
/// The Unicorn slides along the four space diagonals, changing all three axes at once.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Unicorn,
    Pawn,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 7;

    /// Every kind a Pawn may promote to, in the order promotions are generated.
    pub const PROMOTIONS: [Self; 5] = [
        Self::Queen,
        Self::Rook,
        Self::Bishop,
        Self::Knight,
        Self::Unicorn,
    ];

    /// An array of all piece kinds.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::King,
            Self::Queen,
            Self::Rook,
            Self::Bishop,
            Self::Knight,
            Self::Unicorn,
            Self::Pawn,
        ]
    }

    /// Returns this [`PieceKind`] as a `usize`, for indexing into arrays.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Uppercase letter for this kind.
    ///
    /// Knight is `N` and Unicorn is `U`, keeping both apart from the King's `K`.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Rook => 'R',
            Self::Bishop => 'B',
            Self::Knight => 'N',
            Self::Unicorn => 'U',
            Self::Pawn => 'P',
        }
    }

    /// Parses a kind from its letter, in either case.
    #[inline(always)]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'R' => Some(Self::Rook),
            'B' => Some(Self::Bishop),
            'N' => Some(Self::Knight),
            'U' => Some(Self::Unicorn),
            'P' => Some(Self::Pawn),
            _ => None,
        }
    }

    /// Parses a single-letter promotion code (`Q`, `R`, `B`, `N`, or `U`).
    ///
    /// # Example
    /// ```
    /// # use raumschach_types::PieceKind;
    /// assert_eq!(PieceKind::from_promotion_code('U').unwrap(), PieceKind::Unicorn);
    /// assert!(PieceKind::from_promotion_code('K').is_err());
    /// assert!(PieceKind::from_promotion_code('q').is_err());
    /// ```
    pub fn from_promotion_code(code: char) -> Result<Self, RulesError> {
        Self::PROMOTIONS
            .into_iter()
            .find(|kind| kind.char() == code)
            .ok_or_else(|| RulesError::InvalidPromotion(format!("{code:?}")))
    }

    /// Returns `true` if a Pawn may promote to this kind (anything but a King or Pawn).
    #[inline(always)]
    pub const fn is_promotion_target(&self) -> bool {
        !matches!(self, Self::King | Self::Pawn)
    }

    /// Returns `true` if this kind keeps moving along a direction until blocked.
    #[inline(always)]
    pub const fn is_slider(&self) -> bool {
        matches!(
            self,
            Self::Queen | Self::Rook | Self::Bishop | Self::Unicorn
        )
    }

    /// The direction vectors this kind moves along.
    ///
    /// Pawns move by color-dependent rules instead, so their table is empty.
    #[inline(always)]
    pub const fn vectors(&self) -> &'static [Vector] {
        match self {
            Self::King | Self::Queen => &QUEEN_VECTORS,
            Self::Rook => &ROOK_VECTORS,
            Self::Bishop => &BISHOP_VECTORS,
            Self::Unicorn => &UNICORN_VECTORS,
            Self::Knight => &KNIGHT_VECTORS,
            Self::Pawn => &[],
        }
    }

    /// Capitalized name of this kind.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::King => "King",
            Self::Queen => "Queen",
            Self::Rook => "Rook",
            Self::Bishop => "Bishop",
            Self::Knight => "Knight",
            Self::Unicorn => "Unicorn",
            Self::Pawn => "Pawn",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A chess piece: nothing more than a [`Color`] and a [`PieceKind`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    /// Creates a new [`Piece`] from the given [`Color`] and [`PieceKind`].
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Fetches the [`Color`] of this piece.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`PieceKind`] of this piece.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns `true` if this piece is a Pawn.
    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Returns `true` if this piece is a King.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns a copy of this piece, changed to `kind`, keeping its color.
    #[inline(always)]
    pub const fn promoted(self, kind: PieceKind) -> Self {
        Self::new(self.color, kind)
    }

    /// Layout character for this piece: uppercase for White, lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use raumschach_types::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::new(Color::White, PieceKind::Unicorn).char(), 'U');
    /// assert_eq!(Piece::new(Color::Black, PieceKind::Knight).char(), 'n');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        let c = self.kind.char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Inverse of [`Piece::char`].
    #[inline(always)]
    pub const fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        match PieceKind::from_char(c) {
            Some(kind) => Some(Self::new(color, kind)),
            None => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
