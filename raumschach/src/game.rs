/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref, str::FromStr};

use anyhow::{bail, Context, Result};
use tracing::{debug, trace};

use super::{Board, Color, Coord, Move, MoveList, RulesError};

/// Where a [`Game`] stands from the perspective of the side to move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameStatus {
    /// Not in check, with legal moves available.
    Ongoing,
    /// In check, but with at least one legal move.
    Check,
    /// In check, with no legal moves.
    Checkmate,
    /// Not in check, with no legal moves.
    Stalemate,
}

impl GameStatus {
    /// Derives a [`GameStatus`] from whether the side to move is in check and whether it can move.
    ///
    /// # Example
    /// ```
    /// # use raumschach::GameStatus;
    /// assert_eq!(GameStatus::from_parts(true, false), GameStatus::Checkmate);
    /// assert_eq!(GameStatus::from_parts(false, false), GameStatus::Stalemate);
    /// ```
    #[inline(always)]
    pub const fn from_parts(in_check: bool, has_legal_moves: bool) -> Self {
        match (in_check, has_legal_moves) {
            (false, true) => Self::Ongoing,
            (true, true) => Self::Check,
            (true, false) => Self::Checkmate,
            (false, false) => Self::Stalemate,
        }
    }

    /// Returns `true` if no further moves can be made.
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        matches!(self, Self::Checkmate | Self::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            Self::Ongoing => "ongoing",
            Self::Check => "check",
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
        };
        write!(f, "{status}")
    }
}

/// A game in progress: the current [`Board`], whose turn it is, and every [`Move`] made so far.
///
/// The side to move is never stored on the [`Board`]. It starts with the color given at
/// construction and flips after every applied move.
#[derive(Clone, PartialEq, Eq)]
pub struct Game {
    /// Piece placement after the most recent move.
    board: Board,

    /// Color whose turn it is.
    side_to_move: Color,

    /// Every move applied since this game was created, oldest first.
    history: Vec<Move>,
}

impl Game {
    /// Creates a new [`Game`] from the provided [`Board`], with `side_to_move` to play.
    #[inline(always)]
    pub fn new(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            history: Vec::new(),
        }
    }

    /// Creates a new [`Game`] from a layout string, optionally followed by `w` or `b` for the side to move.
    ///
    /// If the side to move is omitted, White moves first.
    ///
    /// # Example
    /// ```
    /// # use raumschach::{Color, Game};
    /// let game = Game::from_layout("k4/5/5/5/R4|5/5/5/5/5|5/5/5/5/5|5/5/5/5/5|4K/5/5/5/5 b").unwrap();
    /// assert_eq!(game.side_to_move(), Color::Black);
    /// assert!(game.is_in_check().unwrap());
    /// ```
    pub fn from_layout(layout: &str) -> Result<Self> {
        let mut split = layout.split_whitespace();

        let Some(placements) = split.next() else {
            bail!("Layout string is empty");
        };
        let board = Board::from_layout(placements)?;

        let side_to_move = match split.next() {
            None => Color::White,
            Some(side) => {
                let mut chars = side.chars();
                match (chars.next().and_then(Color::from_char), chars.next()) {
                    (Some(color), None) => color,
                    _ => bail!("Side to move must be `w` or `b`, found {side:?}"),
                }
            }
        };

        if let Some(extra) = split.next() {
            bail!("Unexpected trailing field {extra:?} in layout string");
        }

        Ok(Self::new(board, side_to_move))
    }

    /// Rebuilds a game by playing `moves`, in order, from `start`.
    ///
    /// Every move is validated with [`Game::make_move_checked`], so an illegal entry aborts the replay.
    pub fn replay(start: Self, moves: impl IntoIterator<Item = Move>) -> Result<Self> {
        let mut game = start;
        for (i, mv) in moves.into_iter().enumerate() {
            game.make_move_checked(mv)
                .with_context(|| format!("Failed to replay move #{} ({mv})", i + 1))?;
        }
        Ok(game)
    }

    /// Renders this game as its board layout followed by the side to move.
    ///
    /// # Example
    /// ```
    /// # use raumschach::{Game, LAYOUT_STARTPOS};
    /// assert_eq!(Game::default().to_layout(), format!("{LAYOUT_STARTPOS} w"));
    /// ```
    pub fn to_layout(&self) -> String {
        format!("{} {}", self.board.to_layout(), self.side_to_move.char())
    }

    /// Fetch the current [`Board`] of this [`Game`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The [`Color`] whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Every move applied so far, oldest first.
    #[inline(always)]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Generate all legal moves for the side to move.
    #[inline(always)]
    pub fn legal_moves(&self) -> Result<Vec<Move>, RulesError> {
        self.board.generate_all_legal_moves(self.side_to_move)
    }

    /// Generate all legal moves of the piece on `square`.
    ///
    /// Pieces of the side not to move have no legal moves.
    pub fn legal_moves_from(&self, square: Coord) -> Result<MoveList, RulesError> {
        if self.board.color_at(square) == Some(self.side_to_move.opponent()) {
            return Ok(MoveList::new());
        }
        self.board.generate_legal_moves(square)
    }

    /// Returns `true` if the side to move is in check.
    #[inline(always)]
    pub fn is_in_check(&self) -> Result<bool, RulesError> {
        self.board.in_check(self.side_to_move)
    }

    /// Computes the [`GameStatus`] for the side to move.
    pub fn status(&self) -> Result<GameStatus, RulesError> {
        let color = self.side_to_move;
        Ok(GameStatus::from_parts(
            self.board.in_check(color)?,
            self.board.has_legal_moves(color)?,
        ))
    }

    /// The color that delivered checkmate, if the game ended in one.
    pub fn winner(&self) -> Result<Option<Color>, RulesError> {
        Ok((self.status()? == GameStatus::Checkmate).then(|| self.side_to_move.opponent()))
    }

    /// Applies the provided [`Move`]. No enforcement of legality.
    ///
    /// Fails only if `mv` does not start on an occupied square.
    pub fn make_move(&mut self, mv: Move) -> Result<(), RulesError> {
        self.board.make_move(mv)?;
        trace!(%mv, side = %self.side_to_move, "applied move");

        self.history.push(mv);
        self.side_to_move = self.side_to_move.opponent();
        Ok(())
    }

    /// Copies `self` and returns a [`Game`] after having applied the provided [`Move`].
    #[inline(always)]
    pub fn with_move_made(&self, mv: Move) -> Result<Self, RulesError> {
        let mut copied = self.clone();
        copied.make_move(mv)?;
        Ok(copied)
    }

    /// Applies the move, if it is legal to make. If it is not legal, returns an `Err` explaining why.
    ///
    /// # Example
    /// ```
    /// # use raumschach::{Game, Move};
    /// let mut game = Game::default();
    /// assert!(game.make_move_checked("Bc2Bc4".parse().unwrap()).is_err());
    /// assert!(game.make_move_checked("Bc2Bc3".parse().unwrap()).is_ok());
    /// assert_eq!(game.history().len(), 1);
    /// ```
    pub fn make_move_checked(&mut self, mv: Move) -> Result<()> {
        if let Err(err) = self.check_legality_of(mv) {
            debug!(%mv, side = %self.side_to_move, reason = %err, "rejected move");
            return Err(err);
        }

        self.make_move(mv)?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let status = self.status()?;
            if status.is_over() {
                let winner = self.winner()?;
                debug!(%status, ?winner, moves = self.history.len(), "game over");
            }
        }

        Ok(())
    }

    /// Checks whether `mv` may be played by the side to move. If not, returns an `Err` explaining why.
    pub fn check_legality_of(&self, mv: Move) -> Result<()> {
        let (from, to, promotion) = mv.parts();

        let status = self.status()?;
        if status.is_over() {
            bail!("The game is already over ({status})");
        }

        // If there's no piece here, illegal move
        let Some(piece) = self.board.piece_at(from) else {
            bail!("No piece on {from} to move");
        };

        // If it's not this piece's color's turn, illegal move
        if piece.color() != self.side_to_move {
            bail!(
                "It is {}'s turn, but {from} holds a {} piece",
                self.side_to_move,
                piece.color()
            );
        }

        let legal = self.board.generate_legal_moves(from)?;
        if legal.contains(&mv) {
            return Ok(());
        }

        // Give a better reason when only the promotion kind is missing
        if promotion.is_none()
            && legal
                .iter()
                .any(|candidate| candidate.to() == to && candidate.is_promotion())
        {
            bail!("{mv} reaches the promotion square and must name a promotion (Q, R, B, N, or U)");
        }

        bail!("{mv} is not a legal move for {piece:?} on {from}");
    }
}

impl Deref for Game {
    type Target = Board;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.board
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_layout(s)
    }
}

impl Default for Game {
    #[inline(always)]
    fn default() -> Self {
        Self::new(Board::default(), Color::White)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{} to move", self.board, self.side_to_move)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history = self
            .history
            .iter()
            .map(Move::to_notation)
            .collect::<Vec<_>>()
            .join(" ");

        write!(
            f,
            "{:?}\nSide to move: {}\nHistory: [{history}]",
            self.board, self.side_to_move
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, PieceKind};

    fn mv(notation: &str) -> Move {
        notation.parse().unwrap()
    }

    fn sq(notation: &str) -> Coord {
        notation.parse().unwrap()
    }

    const MATE_IN_ONE: &str = "5/5/5/5/K4|5/5/5/5/5|4R/5/5/5/5|5/5/5/5/4Q|4k/5/5/5/5 w";
    const STALEMATE: &str = "5/5/5/1R3/k4|5/5/5/RR3/1R3|5/5/5/5/5|5/5/5/5/5|4K/5/5/5/5 b";
    const PROMOTION: &str = "5/5/2k2/5/4K|5/5/5/5/5|5/5/5/5/5|5/5/5/5/5|5/P4/5/5/5 w";

    #[test]
    fn default_game() {
        let game = Game::default();
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.history().is_empty());
        assert_eq!(game.legal_moves().unwrap().len(), 61);
        assert_eq!(game.status().unwrap(), GameStatus::Ongoing);
        assert_eq!(game.winner().unwrap(), None);
    }

    #[test]
    fn layout_round_trip() {
        for layout in [MATE_IN_ONE, STALEMATE, PROMOTION] {
            let game = Game::from_layout(layout).unwrap();
            assert_eq!(game.to_layout(), layout);
            assert_eq!(layout.parse::<Game>().unwrap(), game);
        }
    }

    #[test]
    fn layout_side_to_move() {
        let placements = crate::LAYOUT_STARTPOS;
        assert_eq!(
            Game::from_layout(placements).unwrap().side_to_move(),
            Color::White
        );
        assert_eq!(
            Game::from_layout(&format!("{placements} b"))
                .unwrap()
                .side_to_move(),
            Color::Black
        );
        assert!(Game::from_layout(&format!("{placements} x")).is_err());
        assert!(Game::from_layout(&format!("{placements} white")).is_err());
        assert!(Game::from_layout(&format!("{placements} w 1")).is_err());
        assert!(Game::from_layout("").is_err());
        assert!(Game::from_layout("5/5/5/5/5 w").is_err());
    }

    #[test]
    fn turns_alternate() {
        let mut game = Game::default();
        game.make_move_checked(mv("Bc2Bc3")).unwrap();
        assert_eq!(game.side_to_move(), Color::Black);

        game.make_move_checked(mv("Dc4Dc3")).unwrap();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.history(), [mv("Bc2Bc3"), mv("Dc4Dc3")]);

        assert_eq!(
            game.piece_at(sq("Bc3")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert!(!game.has(sq("Bc2")));
    }

    #[test]
    fn rejects_wrong_side() {
        let mut game = Game::default();
        let err = game.make_move_checked(mv("Dc4Dc3")).unwrap_err();
        assert!(err.to_string().contains("turn"), "{err}");
        assert_eq!(game, Game::default());
    }

    #[test]
    fn rejects_empty_origin() {
        let mut game = Game::default();
        let err = game.make_move_checked(mv("Cc3Cc4")).unwrap_err();
        assert!(err.to_string().contains("No piece"), "{err}");
    }

    #[test]
    fn rejects_illegal_moves() {
        let mut game = Game::default();
        // Pawns never advance two squares
        assert!(game.make_move_checked(mv("Bc2Bc4")).is_err());
        // A Rook blocked by its own Pawn
        assert!(game.make_move_checked(mv("Aa1Aa3")).is_err());
        assert!(game.history().is_empty());
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn opponent_pieces_have_no_moves() {
        let game = Game::default();
        assert!(game.legal_moves_from(sq("Dc4")).unwrap().is_empty());
        assert_eq!(game.legal_moves_from(sq("Bc2")).unwrap().len(), 2);
        assert_eq!(
            game.legal_moves_from(sq("Cc3")),
            Err(RulesError::EmptySquare(sq("Cc3")))
        );
    }

    #[test]
    fn checkmate_ends_the_game() {
        let mut game = Game::from_layout(MATE_IN_ONE).unwrap();
        assert_eq!(game.status().unwrap(), GameStatus::Ongoing);

        game.make_move_checked(mv("De1De5")).unwrap();
        assert_eq!(game.side_to_move(), Color::Black);
        assert!(game.is_in_check().unwrap());
        assert_eq!(game.status().unwrap(), GameStatus::Checkmate);
        assert!(game.status().unwrap().is_over());
        assert_eq!(game.winner().unwrap(), Some(Color::White));
        assert!(game.legal_moves().unwrap().is_empty());

        let err = game.make_move_checked(mv("Ee5Ed5")).unwrap_err();
        assert!(err.to_string().contains("over"), "{err}");
    }

    #[test]
    fn stalemate_is_a_draw() {
        let game = Game::from_layout(STALEMATE).unwrap();
        assert!(!game.is_in_check().unwrap());
        assert_eq!(game.status().unwrap(), GameStatus::Stalemate);
        assert_eq!(game.winner().unwrap(), None);
    }

    #[test]
    fn check_is_not_mate() {
        let game =
            Game::from_layout("k4/5/5/5/R4|5/5/5/5/5|5/5/5/5/5|5/5/5/5/5|4K/5/5/5/5 b").unwrap();
        assert_eq!(game.status().unwrap(), GameStatus::Check);
        assert_eq!(game.legal_moves().unwrap().len(), 6);
    }

    #[test]
    fn promotion_must_be_named() {
        let mut game = Game::from_layout(PROMOTION).unwrap();

        let err = game.make_move_checked(mv("Ea4Ea5")).unwrap_err();
        assert!(err.to_string().contains("promotion"), "{err}");

        game.make_move_checked(mv("Ea4Ea5U")).unwrap();
        assert_eq!(
            game.piece_at(sq("Ea5")),
            Some(Piece::new(Color::White, PieceKind::Unicorn))
        );
    }

    #[test]
    fn replay_matches_manual_moves() {
        let moves = [mv("Bc2Bc3"), mv("Dc4Dc3"), mv("Bb2Bb3")];
        let replayed = Game::replay(Game::default(), moves).unwrap();

        let mut manual = Game::default();
        for m in moves {
            manual.make_move(m).unwrap();
        }

        assert_eq!(replayed, manual);
        assert_eq!(replayed.history(), moves);
    }

    #[test]
    fn replay_reports_the_failing_move() {
        let err = Game::replay(Game::default(), [mv("Bc2Bc3"), mv("Bc3Bc4")]).unwrap_err();
        assert!(format!("{err:#}").contains("#2"), "{err:#}");
    }

    #[test]
    fn with_move_made_copies() {
        let game = Game::default();
        let next = game.with_move_made(mv("Bc2Bc3")).unwrap();
        assert_eq!(game, Game::default());
        assert_eq!(next.history().len(), 1);
        assert_eq!(
            game.with_move_made(mv("Cc3Cc4")),
            Err(RulesError::EmptySquare(sq("Cc3")))
        );
    }

    #[test]
    fn missing_king_propagates() {
        let game = Game::from_layout("5/5/5/5/R4|5/5/5/5/5|5/5/5/5/5|5/5/5/5/5|5/5/5/5/5").unwrap();
        assert_eq!(
            game.status(),
            Err(RulesError::KingNotFound(Color::White))
        );
    }
}
