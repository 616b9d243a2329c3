/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use super::{Color, RulesError, Vector};

/// Level letters, indexed by `z`.
pub const LEVELS: [char; Coord::SIDE as usize] = ['A', 'B', 'C', 'D', 'E'];

/// File letters, indexed by `x`.
pub const FILES: [char; Coord::SIDE as usize] = ['a', 'b', 'c', 'd', 'e'];

/// Rank digits, indexed by `y`.
pub const RANKS: [char; Coord::SIDE as usize] = ['1', '2', '3', '4', '5'];

/// One of the 125 squares of the board.
///
/// A [`Coord`] can only be constructed from values inside of `[0, 4]`, so every
/// value of this type addresses a real square. Raw triples that may lie outside
/// of the board are checked with [`Coord::is_inside`] or [`Coord::new`].
///
/// The display form is the three-character `LevelFileRank` notation, where the
/// Level (`A..E`) encodes `z`, the File (`a..e`) encodes `x`, and the Rank (`1..5`) encodes `y`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    x: u8,
    y: u8,
    z: u8,
}

impl Coord {
    /// Number of squares along each axis.
    pub const SIDE: u8 = 5;

    /// Number of squares on the board.
    pub const COUNT: usize = 125;

    /// Largest valid value on any axis.
    pub const MAX: u8 = Self::SIDE - 1;

    /// Returns `true` if all three axes lie within `[0, 4]`.
    ///
    /// # Example
    /// ```
    /// # use raumschach_types::Coord;
    /// assert!(Coord::is_inside(0, 0, 0));
    /// assert!(Coord::is_inside(4, 4, 4));
    /// assert!(!Coord::is_inside(-1, 0, 0));
    /// assert!(!Coord::is_inside(0, 5, 0));
    /// ```
    #[inline(always)]
    pub const fn is_inside(x: i8, y: i8, z: i8) -> bool {
        let max = Self::MAX as i8;
        x >= 0 && x <= max && y >= 0 && y <= max && z >= 0 && z <= max
    }

    /// Creates a new [`Coord`], failing if any axis lies outside of the board.
    pub fn new(x: i8, y: i8, z: i8) -> Result<Self, RulesError> {
        if !Self::is_inside(x, y, z) {
            return Err(RulesError::InvalidCoordinate(format!("({x}, {y}, {z})")));
        }

        Ok(Self::new_unchecked(x as u8, y as u8, z as u8))
    }

    /// Creates a new [`Coord`] without checking the bounds of its axes.
    ///
    /// Only meant for values already known to be in `[0, 4]`.
    #[inline(always)]
    pub const fn new_unchecked(x: u8, y: u8, z: u8) -> Self {
        Self { x, y, z }
    }

    /// The file axis.
    #[inline(always)]
    pub const fn x(&self) -> u8 {
        self.x
    }

    /// The rank axis.
    #[inline(always)]
    pub const fn y(&self) -> u8 {
        self.y
    }

    /// The level axis.
    #[inline(always)]
    pub const fn z(&self) -> u8 {
        self.z
    }

    /// Index of this square in a flat, level-major array of [`Coord::COUNT`] cells.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        let side = Self::SIDE as usize;
        (self.z as usize * side + self.x as usize) * side + self.y as usize
    }

    /// Inverse of [`Coord::index`].
    ///
    /// # Example
    /// ```
    /// # use raumschach_types::Coord;
    /// let square = Coord::from_index(124).unwrap();
    /// assert_eq!(square.to_notation(), "Ee5");
    /// assert!(Coord::from_index(125).is_none());
    /// ```
    #[inline(always)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= Self::COUNT {
            return None;
        }

        Some(Self::from_index_unchecked(index))
    }

    /// Inverse of [`Coord::index`], for indices already known to be below [`Coord::COUNT`].
    #[inline(always)]
    const fn from_index_unchecked(index: usize) -> Self {
        let side = Self::SIDE as usize;
        Self::new_unchecked(
            ((index / side) % side) as u8,
            (index % side) as u8,
            (index / (side * side)) as u8,
        )
    }

    /// An iterator over every square of the board, in [`Coord::index`] order.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT).map(Self::from_index_unchecked)
    }

    /// Steps from this square along `vector` (ordered `[dz, dx, dy]`), scaled by `distance`.
    ///
    /// Returns `None` if the destination falls off the board.
    ///
    /// # Example
    /// ```
    /// # use raumschach_types::Coord;
    /// let center = Coord::from_notation("Cc3").unwrap();
    /// assert_eq!(center.offset([1, 0, 0], 2).unwrap().to_notation(), "Ec3");
    /// assert!(center.offset([1, 0, 0], 3).is_none());
    /// ```
    #[inline(always)]
    pub const fn offset(&self, vector: Vector, distance: i8) -> Option<Self> {
        let [dz, dx, dy] = vector;
        let x = self.x as i8 + dx * distance;
        let y = self.y as i8 + dy * distance;
        let z = self.z as i8 + dz * distance;

        if Self::is_inside(x, y, z) {
            Some(Self::new_unchecked(x as u8, y as u8, z as u8))
        } else {
            None
        }
    }

    /// Returns `true` if a `color` Pawn arriving here must promote.
    ///
    /// White promotes on `y = 4, z = 4`, Black on `y = 0, z = 0`, on any file.
    #[inline(always)]
    pub const fn is_promotion_square_for(&self, color: Color) -> bool {
        match color {
            Color::White => self.y == Self::MAX && self.z == Self::MAX,
            Color::Black => self.y == 0 && self.z == 0,
        }
    }

    /// Formats this square in `LevelFileRank` notation.
    ///
    /// # Example
    /// ```
    /// # use raumschach_types::Coord;
    /// let square = Coord::new(1, 2, 3).unwrap();
    /// assert_eq!(square.to_notation(), "Db3");
    /// ```
    pub fn to_notation(&self) -> String {
        [
            LEVELS[self.z as usize],
            FILES[self.x as usize],
            RANKS[self.y as usize],
        ]
        .iter()
        .collect()
    }

    /// Formats a raw triple in `LevelFileRank` notation, failing if it lies off the board.
    ///
    /// # Example
    /// ```
    /// # use raumschach_types::Coord;
    /// assert_eq!(Coord::notation_for(0, 0, 0).unwrap(), "Aa1");
    /// assert!(Coord::notation_for(5, 0, 0).is_err());
    /// ```
    pub fn notation_for(x: i8, y: i8, z: i8) -> Result<String, RulesError> {
        Self::new(x, y, z).map(|square| square.to_notation())
    }

    /// Parses a square from `LevelFileRank` notation, such as `Aa1` or `Ee5`.
    ///
    /// # Example
    /// ```
    /// # use raumschach_types::Coord;
    /// let square = Coord::from_notation("Bc4").unwrap();
    /// assert_eq!((square.x(), square.y(), square.z()), (2, 3, 1));
    /// assert!(Coord::from_notation("Fa1").is_err());
    /// assert!(Coord::from_notation("aA1").is_err());
    /// ```
    pub fn from_notation(notation: &str) -> Result<Self, RulesError> {
        let invalid = || RulesError::InvalidCoordinate(format!("{notation:?}"));

        let mut chars = notation.chars();
        let (Some(level), Some(file), Some(rank), None) =
            (chars.next(), chars.next(), chars.next(), chars.next())
        else {
            return Err(invalid());
        };

        let z = LEVELS.iter().position(|&c| c == level).ok_or_else(invalid)?;
        let x = FILES.iter().position(|&c| c == file).ok_or_else(invalid)?;
        let y = RANKS.iter().position(|&c| c == rank).ok_or_else(invalid)?;

        Ok(Self::new_unchecked(x as u8, y as u8, z as u8))
    }
}

impl FromStr for Coord {
    type Err = RulesError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

impl TryFrom<(i8, i8, i8)> for Coord {
    type Error = RulesError;
    fn try_from((x, y, z): (i8, i8, i8)) -> Result<Self, Self::Error> {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {}, {})", self.to_notation(), self.x, self.y, self.z)
    }
}

impl<T> Index<Coord> for [T; Coord::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Coord) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Coord> for [T; Coord::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation_round_trip_from_coords() {
        for square in Coord::iter() {
            let notation = square.to_notation();
            assert_eq!(Coord::from_notation(&notation).unwrap(), square);
        }
    }

    #[test]
    fn test_notation_round_trip_from_strings() {
        for level in LEVELS {
            for file in FILES {
                for rank in RANKS {
                    let notation = format!("{level}{file}{rank}");
                    let square = Coord::from_notation(&notation).unwrap();
                    assert_eq!(square.to_notation(), notation);
                }
            }
        }
    }

    #[test]
    fn test_notation_axes() {
        assert_eq!(Coord::notation_for(0, 0, 0).unwrap(), "Aa1");
        assert_eq!(Coord::notation_for(4, 4, 4).unwrap(), "Ee5");
        assert_eq!(Coord::notation_for(4, 0, 0).unwrap(), "Ae1");
        assert_eq!(Coord::notation_for(0, 4, 0).unwrap(), "Aa5");
        assert_eq!(Coord::notation_for(0, 0, 4).unwrap(), "Ea1");
    }

    #[test]
    fn test_is_inside_boundaries() {
        assert!(Coord::is_inside(0, 0, 0));
        assert!(Coord::is_inside(4, 4, 4));
        assert!(Coord::is_inside(2, 0, 4));

        assert!(!Coord::is_inside(-1, 0, 0));
        assert!(!Coord::is_inside(0, 5, 0));
        assert!(!Coord::is_inside(0, 0, 5));
        assert!(!Coord::is_inside(5, 5, 5));
        assert!(!Coord::is_inside(0, -1, 0));
        assert!(!Coord::is_inside(0, 0, -1));
    }

    #[test]
    fn test_out_of_range_triples_are_rejected() {
        for (x, y, z) in [(-1, 0, 0), (0, 5, 0), (0, 0, 5), (5, 5, 5), (0, 0, -3)] {
            assert!(matches!(
                Coord::new(x, y, z),
                Err(RulesError::InvalidCoordinate(_))
            ));
            assert!(matches!(
                Coord::notation_for(x, y, z),
                Err(RulesError::InvalidCoordinate(_))
            ));
        }
    }

    #[test]
    fn test_malformed_notation_is_rejected() {
        for notation in [
            "", "A", "Aa", "Aa11", "Fa1", "Af1", "Aa0", "Aa6", "aA1", "aa1", "AA1", "1Aa", " Aa1",
            "Aa1 ", "Ää1",
        ] {
            assert!(
                matches!(
                    Coord::from_notation(notation),
                    Err(RulesError::InvalidCoordinate(_))
                ),
                "{notation:?} should not parse"
            );
        }
    }

    #[test]
    fn test_index_is_bijective() {
        let mut seen = [false; Coord::COUNT];
        for (i, square) in Coord::iter().enumerate() {
            assert_eq!(square.index(), i);
            assert!(!seen[square]);
            seen[square] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(Coord::iter().len(), Coord::COUNT);
    }

    #[test]
    fn test_offset_stops_at_edges() {
        let corner = Coord::new(0, 0, 0).unwrap();
        assert!(corner.offset([-1, 0, 0], 1).is_none());
        assert!(corner.offset([0, 0, 1], 5).is_none());
        assert_eq!(corner.offset([1, 1, 1], 4), Coord::new(4, 4, 4).ok());
        assert_eq!(corner.offset([0, 2, 1], 1), Coord::new(2, 1, 0).ok());
    }

    #[test]
    fn test_promotion_squares() {
        for x in 0..5 {
            let white = Coord::new(x, 4, 4).unwrap();
            let black = Coord::new(x, 0, 0).unwrap();
            assert!(white.is_promotion_square_for(Color::White));
            assert!(!white.is_promotion_square_for(Color::Black));
            assert!(black.is_promotion_square_for(Color::Black));
            assert!(!black.is_promotion_square_for(Color::White));
        }
        assert!(!Coord::new(0, 4, 3).unwrap().is_promotion_square_for(Color::White));
    }
}
