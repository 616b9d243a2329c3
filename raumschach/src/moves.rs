/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use super::{Coord, PieceKind, RulesError};

/// Represents a move made on a chess board, including the promotion a Pawn undergoes, if any.
///
/// A [`Move`] carries no knowledge of the piece being moved or captured; it is just
/// a pair of squares. The promotion kind only has an effect when a Pawn lands on
/// its promotion square.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Coord,
    to: Coord,
    promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a new [`Move`] from `from` to `to`, without a promotion.
    #[inline(always)]
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Returns a copy of this [`Move`] that promotes to `kind`.
    #[inline(always)]
    pub const fn with_promotion(self, kind: PieceKind) -> Self {
        Self {
            promotion: Some(kind),
            ..self
        }
    }

    /// The square the piece moves away from.
    #[inline(always)]
    pub const fn from(&self) -> Coord {
        self.from
    }

    /// The square the piece lands on.
    #[inline(always)]
    pub const fn to(&self) -> Coord {
        self.to
    }

    /// The kind a Pawn becomes on arrival, if one was named.
    #[inline(always)]
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns `true` if this move names a promotion.
    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Returns the `from`, `to`, and `promotion` fields of this move.
    #[inline(always)]
    pub const fn parts(&self) -> (Coord, Coord, Option<PieceKind>) {
        (self.from, self.to, self.promotion)
    }

    /// Formats this move as `<from><to>[promotion]`, such as `Bc2Bc3` or `Dc4Ec5Q`.
    pub fn to_notation(&self) -> String {
        let mut notation = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            notation.push(kind.char());
        }
        notation
    }

    /// Parses a move from `<from><to>[promotion]` notation.
    ///
    /// # Example
    /// ```
    /// # use raumschach::{Coord, Move, PieceKind};
    /// let mv = Move::from_notation("Dc4Ec5U").unwrap();
    /// assert_eq!(mv.from(), Coord::from_notation("Dc4").unwrap());
    /// assert_eq!(mv.to(), Coord::from_notation("Ec5").unwrap());
    /// assert_eq!(mv.promotion(), Some(PieceKind::Unicorn));
    ///
    /// assert!(Move::from_notation("Dc4Ec5K").is_err());
    /// assert!(Move::from_notation("Dc4Fc5").is_err());
    /// ```
    pub fn from_notation(notation: &str) -> Result<Self, RulesError> {
        let invalid = || RulesError::InvalidCoordinate(format!("{notation:?}"));

        let from: Coord = notation.get(..3).ok_or_else(invalid)?.parse()?;
        let to: Coord = notation.get(3..6).ok_or_else(invalid)?.parse()?;
        let mv = Self::new(from, to);

        let mut promotion = notation.get(6..).ok_or_else(invalid)?.chars();
        match (promotion.next(), promotion.next()) {
            (None, _) => Ok(mv),
            (Some(code), None) => Ok(mv.with_promotion(PieceKind::from_promotion_code(code)?)),
            _ => Err(RulesError::InvalidPromotion(format!("{notation:?}"))),
        }
    }
}

impl FromStr for Move {
    type Err = RulesError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_notation() {
        let from = Coord::new(2, 1, 0).unwrap();
        let to = Coord::new(2, 2, 0).unwrap();
        assert_eq!(Move::new(from, to).to_notation(), "Ac2Ac3");

        let promo = Move::new(Coord::new(2, 3, 3).unwrap(), Coord::new(2, 4, 4).unwrap())
            .with_promotion(PieceKind::Knight);
        assert_eq!(promo.to_string(), "Dc4Ec5N");
        assert_eq!("Dc4Ec5N".parse::<Move>().unwrap(), promo);
    }

    #[test]
    fn test_move_notation_errors() {
        assert!(matches!(
            Move::from_notation("Ac2"),
            Err(RulesError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            Move::from_notation("Ac2Ac6"),
            Err(RulesError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            Move::from_notation("Ac2Ac3P"),
            Err(RulesError::InvalidPromotion(_))
        ));
        assert!(matches!(
            Move::from_notation("Ac2Ac3QQ"),
            Err(RulesError::InvalidPromotion(_))
        ));
    }
}
