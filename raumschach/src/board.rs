/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Range},
    str::FromStr,
};

use tracing::trace;

use super::{Color, Coord, Move, Piece, PieceKind, RulesError, FILES, LEVELS, RANKS};

/// Layout string for the standard 40-piece starting array.
///
/// White starts on Levels A and B (Rooks, Knights and King on Level A, Bishops,
/// Unicorns and Queen on Level B, Pawns on rank 2 of both). Black mirrors this on Levels E and D.
pub const LAYOUT_STARTPOS: &str =
    "5/5/5/PPPPP/RNKNR|5/5/5/PPPPP/BUQBU|5/5/5/5/5|buqbu/ppppp/5/5/5|rnknr/ppppp/5/5/5";

/// Represents all pieces and their locations on a 5x5x5 board.
///
/// Has no knowledge of whose turn it is or of previous moves. If you need those, see [`crate::Game`].
///
/// Internally a flat mailbox of [`Coord::COUNT`] cells, so copying a [`Board`] is cheap and
/// every copy is an independent snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    mailbox: [Option<Piece>; Coord::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use raumschach::Board;
    /// let board = Board::new();
    /// assert_eq!(board.population(), 0);
    /// assert_eq!(board.to_layout(), "5/5/5/5/5|5/5/5/5/5|5/5/5/5/5|5/5/5/5/5|5/5/5/5/5");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            mailbox: [None; Coord::COUNT],
        }
    }

    /// Creates a [`Board`] holding the standard starting array. Equivalent to [`Board::default`].
    #[inline(always)]
    pub fn starting_position() -> Self {
        Self::default()
    }

    /// Constructs a [`Board`] from the provided layout string.
    ///
    /// A layout lists Levels `A` through `E` separated by `|`. Each level lists its ranks from
    /// `5` down to `1`, separated by `/`, and each rank lists files `a` through `e` using piece
    /// letters (uppercase for White, lowercase for Black) and digits for runs of empty squares.
    /// Anything after the first whitespace is ignored.
    ///
    /// # Example
    /// ```
    /// # use raumschach::{Board, Color, Coord, PieceKind};
    /// let board = Board::from_layout("k4/5/5/5/5|5/5/5/5/5|5/5/2Q2/5/5|5/5/5/5/5|5/5/5/5/4K").unwrap();
    /// let queen = Coord::from_notation("Cc3").unwrap();
    /// assert_eq!(board.kind_at(queen), Some(PieceKind::Queen));
    /// assert_eq!(board.find_king(Color::Black).unwrap().to_notation(), "Aa5");
    /// assert_eq!(board.find_king(Color::White).unwrap().to_notation(), "Ee1");
    /// ```
    pub fn from_layout(layout: &str) -> Result<Self, RulesError> {
        let mut board = Self::new();

        let placements = layout.split_whitespace().next().unwrap_or_default();

        let levels = placements.split('|').collect::<Vec<_>>();
        if levels.len() != Coord::SIDE as usize {
            return Err(RulesError::InvalidLayout(format!(
                "expected {} levels, found {} in {layout:?}",
                Coord::SIDE,
                levels.len()
            )));
        }

        for (z, level) in levels.into_iter().enumerate() {
            let ranks = level.split('/').collect::<Vec<_>>();
            if ranks.len() != Coord::SIDE as usize {
                return Err(RulesError::InvalidLayout(format!(
                    "level {} has {} ranks, expected {}",
                    LEVELS[z],
                    ranks.len(),
                    Coord::SIDE
                )));
            }

            // Ranks are listed from the top (rank 5) down
            for (i, placements) in ranks.into_iter().enumerate() {
                let y = Coord::MAX - i as u8;
                let mut x = 0;

                for c in placements.chars() {
                    let (piece, width) = match Piece::from_char(c) {
                        Some(piece) => (Some(piece), 1),
                        None => match c.to_digit(10).filter(|n| (1..=5).contains(n)) {
                            Some(empty) => (None, empty as u8),
                            None => {
                                return Err(RulesError::InvalidLayout(format!(
                                    "found non-piece, non-numeric char {c:?} on {}{}",
                                    LEVELS[z], RANKS[y as usize]
                                )))
                            }
                        },
                    };

                    // Reject the rank as soon as it runs past the last file
                    if x + width > Coord::SIDE {
                        return Err(RulesError::InvalidLayout(format!(
                            "too many files on {}{}: {placements:?}",
                            LEVELS[z], RANKS[y as usize]
                        )));
                    }

                    if let Some(piece) = piece {
                        board.place(piece, Coord::new_unchecked(x, y, z as u8));
                    }
                    x += width;
                }

                if x != Coord::SIDE {
                    return Err(RulesError::InvalidLayout(format!(
                        "rank {} of level {} does not describe exactly {} files: {placements:?}",
                        RANKS[y as usize],
                        LEVELS[z],
                        Coord::SIDE
                    )));
                }
            }
        }

        Ok(board)
    }

    /// Generates a layout string of this [`Board`]. Inverse of [`Board::from_layout`].
    pub fn to_layout(&self) -> String {
        let mut levels = Vec::with_capacity(Coord::SIDE as usize);

        for z in 0..Coord::SIDE {
            let mut ranks = Vec::with_capacity(Coord::SIDE as usize);

            for y in (0..Coord::SIDE).rev() {
                let mut placements = String::new();
                let mut empty_spaces = 0;

                for x in 0..Coord::SIDE {
                    if let Some(piece) = self.piece_at(Coord::new_unchecked(x, y, z)) {
                        if empty_spaces != 0 {
                            placements += &empty_spaces.to_string();
                            empty_spaces = 0;
                        }
                        placements.push(piece.char());
                    } else {
                        empty_spaces += 1;
                    }
                }

                if empty_spaces != 0 {
                    placements += &empty_spaces.to_string();
                }
                ranks.push(placements);
            }

            levels.push(ranks.join("/"));
        }

        levels.join("|")
    }

    /// Returns `true` if there is a piece at the given [`Coord`], else `false`.
    #[inline(always)]
    pub const fn has(&self, square: Coord) -> bool {
        self.mailbox[square.index()].is_some()
    }

    /// Places the provided [`Piece`] on the supplied [`Coord`], replacing whatever was there.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Coord) {
        self.mailbox[square] = Some(piece);
    }

    /// Clears the supplied [`Coord`] of any pieces.
    #[inline(always)]
    pub fn clear(&mut self, square: Coord) {
        self.take(square);
    }

    /// Takes the [`Piece`] from a given [`Coord`], if there is one present.
    #[inline(always)]
    pub fn take(&mut self, square: Coord) -> Option<Piece> {
        self.mailbox[square].take()
    }

    /// Clears the entire board, removing all pieces.
    #[inline(always)]
    pub fn clear_all(&mut self) {
        *self = Self::new();
    }

    /// Fetches the [`Piece`] at the provided [`Coord`], if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Coord) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    /// Fetches the [`Color`] of the piece at the provided [`Coord`], if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Coord) -> Option<Color> {
        self.mailbox[square].map(|piece| piece.color())
    }

    /// Fetches the [`PieceKind`] of the piece at the provided [`Coord`], if there is one.
    #[inline(always)]
    pub fn kind_at(&self, square: Coord) -> Option<PieceKind> {
        self.mailbox[square].map(|piece| piece.kind())
    }

    /// Number of pieces on the board.
    #[inline(always)]
    pub fn population(&self) -> usize {
        self.mailbox.iter().flatten().count()
    }

    /// Creates a [`BoardIter`] to iterate over all occupied squares of this [`Board`].
    #[inline(always)]
    pub fn iter(&self) -> BoardIter<'_> {
        BoardIter {
            board: self,
            indices: 0..Coord::COUNT,
        }
    }

    /// Returns an iterator over every `color` piece on this board, along with its location.
    #[inline(always)]
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.color() == color)
    }

    /// Finds the King of the provided color.
    ///
    /// Callers are expected to keep at most one King per color on the board; the first one
    /// found (in [`Coord::index`] order) is returned.
    pub fn find_king(&self, color: Color) -> Result<Coord, RulesError> {
        self.iter()
            .find(|(_, piece)| piece.is_king() && piece.color() == color)
            .map(|(square, _)| square)
            .ok_or(RulesError::KingNotFound(color))
    }

    /// Applies the move in place. No enforcement of legality.
    ///
    /// The piece on `from` is moved to `to`, capturing anything there. A Pawn landing on its
    /// promotion square becomes the move's promotion kind if one was named and it is neither a
    /// King nor a Pawn; in every other case the promotion kind is ignored.
    pub fn make_move(&mut self, mv: Move) -> Result<(), RulesError> {
        let (from, to, promotion) = mv.parts();

        let mut piece = self.take(from).ok_or(RulesError::EmptySquare(from))?;

        if let Some(kind) = promotion {
            if piece.is_pawn()
                && to.is_promotion_square_for(piece.color())
                && kind.is_promotion_target()
            {
                piece = piece.promoted(kind);
            } else {
                trace!(%mv, "ignoring promotion on a non-promoting move");
            }
        }

        self.place(piece, to);
        Ok(())
    }

    /// Copies `self` and returns a [`Board`] after having applied the provided [`Move`].
    ///
    /// `self` is left untouched.
    ///
    /// # Example
    /// ```
    /// # use raumschach::{Board, Move};
    /// let board = Board::default();
    /// let after = board.apply_move("Ac2Ac3".parse::<Move>().unwrap()).unwrap();
    /// assert!(board.has("Ac2".parse().unwrap()));
    /// assert!(!after.has("Ac2".parse().unwrap()));
    /// assert!(after.has("Ac3".parse().unwrap()));
    /// ```
    #[inline(always)]
    pub fn apply_move(&self, mv: Move) -> Result<Self, RulesError> {
        let mut copied = *self;
        copied.make_move(mv)?;
        Ok(copied)
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        // Safe unwrap because the starting layout is always valid
        Self::from_layout(LAYOUT_STARTPOS).unwrap()
    }
}

impl FromStr for Board {
    type Err = RulesError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_layout(s)
    }
}

impl From<[Option<Piece>; Coord::COUNT]> for Board {
    fn from(mailbox: [Option<Piece>; Coord::COUNT]) -> Self {
        Self { mailbox }
    }
}

impl Index<Coord> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Coord) -> &Self::Output {
        &self.mailbox[index]
    }
}

impl IndexMut<Coord> for Board {
    #[inline(always)]
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        &mut self.mailbox[index]
    }
}

impl<'a> IntoIterator for &'a Board {
    type IntoIter = BoardIter<'a>;
    type Item = <BoardIter<'a> as Iterator>::Item;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Board {
    /// Draws every level side by side, Level A on the left, rank 5 on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const GAP: &str = "   ";

        let header = LEVELS
            .iter()
            .map(|level| format!("{:^12}", format!("Level {level}")))
            .collect::<Vec<_>>()
            .join(GAP);
        writeln!(f, "{}", header.trim_end())?;

        for y in (0..Coord::SIDE).rev() {
            let row = (0..Coord::SIDE)
                .map(|z| {
                    let mut cells = format!("{}|", RANKS[y as usize]);
                    for x in 0..Coord::SIDE {
                        let square = Coord::new_unchecked(x, y, z);
                        cells.push(' ');
                        cells.push(self.piece_at(square).map(|p| p.char()).unwrap_or('.'));
                    }
                    cells
                })
                .collect::<Vec<_>>()
                .join(GAP);
            writeln!(f, "{row}")?;
        }

        let rule = vec![" +----------"; Coord::SIDE as usize].join(GAP);
        writeln!(f, "{rule}")?;

        let files = FILES.iter().map(|c| format!(" {c}")).collect::<String>();
        let footer = vec![format!("  {files}"); Coord::SIDE as usize].join(GAP);
        write!(f, "{footer}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layout: {}\n{}", self.to_layout(), self)
    }
}

/// An iterator over the occupied squares of a [`Board`].
///
/// Calls to [`Iterator::next`] will yield a tuple of a [`Coord`] and a [`Piece`].
pub struct BoardIter<'a> {
    /// The board to retrieve pieces from.
    board: &'a Board,

    /// Mailbox indices not yet visited.
    indices: Range<usize>,
}

impl<'a> Iterator for BoardIter<'a> {
    type Item = (Coord, Piece);

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let index = self.indices.next()?;
            if let Some(piece) = self.board.mailbox[index] {
                return Some((Coord::from_index(index)?, piece));
            }
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.indices.len()))
    }
}
