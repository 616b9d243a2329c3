/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Serializable game messages, as exchanged between two players through a relay.
//!
//! Coordinates travel as notation strings (`"Bc2"`), promotions as single letters,
//! and starting positions as layout strings.

use serde::{Deserialize, Serialize};

use super::{Color, Coord, Game, Move, PieceKind, RulesError};

/// A piece kind a Pawn may promote to, in its single-letter transport form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Promotion {
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "R")]
    Rook,
    #[serde(rename = "B")]
    Bishop,
    #[serde(rename = "N")]
    Knight,
    #[serde(rename = "U")]
    Unicorn,
}

impl From<Promotion> for PieceKind {
    fn from(value: Promotion) -> Self {
        match value {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
            Promotion::Unicorn => Self::Unicorn,
        }
    }
}

impl TryFrom<PieceKind> for Promotion {
    type Error = RulesError;
    fn try_from(value: PieceKind) -> Result<Self, Self::Error> {
        Ok(match value {
            PieceKind::Queen => Self::Queen,
            PieceKind::Rook => Self::Rook,
            PieceKind::Bishop => Self::Bishop,
            PieceKind::Knight => Self::Knight,
            PieceKind::Unicorn => Self::Unicorn,
            PieceKind::King | PieceKind::Pawn => {
                return Err(RulesError::InvalidPromotion(value.name().to_string()))
            }
        })
    }
}

/// A move requested by a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMove {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
}

/// A move that was accepted and played, broadcast to both players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveMade {
    pub by: Color,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
}

/// Sent to each player when a game begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStart {
    /// The color the receiving player controls.
    pub color: Color,

    /// Layout of the starting position, with the side to move. The standard array when absent.
    #[serde(
        rename = "initialPosition",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_position: Option<String>,
}

impl GameStart {
    /// Starts `color` on the standard array.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            initial_position: None,
        }
    }

    /// Starts `color` on the current position of `game`.
    pub fn from_game(color: Color, game: &Game) -> Self {
        Self {
            color,
            initial_position: Some(game.to_layout()),
        }
    }

    /// Builds the [`Game`] this message starts.
    pub fn to_game(&self) -> anyhow::Result<Game> {
        match &self.initial_position {
            Some(layout) => Game::from_layout(layout),
            None => Ok(Game::default()),
        }
    }
}

/// Envelope for relay traffic, tagged by its `"type"` field.
///
/// # Example
/// ```
/// # use raumschach::wire::{RelayMessage, WireMove};
/// let json = r#"{"type":"move","from":"Dc4","to":"Ec5","promotion":"Q"}"#;
/// let RelayMessage::Move(wire) = serde_json::from_str(json).unwrap() else {
///     panic!("expected a move request");
/// };
/// let mv = raumschach::Move::try_from(&wire).unwrap();
/// assert_eq!(mv.to_notation(), "Dc4Ec5Q");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelayMessage {
    GameStart(GameStart),
    Move(WireMove),
    MoveMade(MoveMade),
}

impl MoveMade {
    /// Announces `mv` as played by `by`.
    pub fn new(by: Color, mv: Move) -> Result<Self, RulesError> {
        let WireMove {
            from,
            to,
            promotion,
        } = WireMove::try_from(mv)?;

        Ok(Self {
            by,
            from,
            to,
            promotion,
        })
    }

    /// The [`Move`] this message announces.
    pub fn to_move(&self) -> Result<Move, RulesError> {
        decode(&self.from, &self.to, self.promotion)
    }
}

impl TryFrom<Move> for WireMove {
    type Error = RulesError;
    fn try_from(mv: Move) -> Result<Self, Self::Error> {
        Ok(Self {
            from: mv.from().to_notation(),
            to: mv.to().to_notation(),
            promotion: mv.promotion().map(Promotion::try_from).transpose()?,
        })
    }
}

impl TryFrom<&WireMove> for Move {
    type Error = RulesError;
    fn try_from(wire: &WireMove) -> Result<Self, Self::Error> {
        decode(&wire.from, &wire.to, wire.promotion)
    }
}

fn decode(from: &str, to: &str, promotion: Option<Promotion>) -> Result<Move, RulesError> {
    let mv = Move::new(Coord::from_notation(from)?, Coord::from_notation(to)?);
    Ok(match promotion {
        Some(promotion) => mv.with_promotion(promotion.into()),
        None => mv,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn move_request_shape() {
        let mv: Move = "Bc2Bc3".parse().unwrap();
        let message = RelayMessage::Move(WireMove::try_from(mv).unwrap());

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({ "type": "move", "from": "Bc2", "to": "Bc3" })
        );
    }

    #[test]
    fn move_made_shape() {
        let mv: Move = "Dc4Ec5U".parse().unwrap();
        let message = RelayMessage::MoveMade(MoveMade::new(Color::Black, mv).unwrap());

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "move_made",
                "by": "black",
                "from": "Dc4",
                "to": "Ec5",
                "promotion": "U",
            })
        );
    }

    #[test]
    fn decode_move_made() {
        let message: RelayMessage = serde_json::from_value(json!({
            "type": "move_made",
            "by": "white",
            "from": "Ea4",
            "to": "Ea5",
            "promotion": "N",
        }))
        .unwrap();

        let RelayMessage::MoveMade(made) = message else {
            panic!("expected a move_made message");
        };
        assert_eq!(made.by, Color::White);
        assert_eq!(
            made.to_move().unwrap(),
            "Ea4Ea5N".parse::<Move>().unwrap()
        );
    }

    #[test]
    fn rejects_bad_payloads() {
        // Unknown promotion letter
        assert!(serde_json::from_value::<RelayMessage>(
            json!({ "type": "move", "from": "Ea4", "to": "Ea5", "promotion": "K" })
        )
        .is_err());

        // Unknown message type
        assert!(serde_json::from_value::<RelayMessage>(
            json!({ "type": "resign", "from": "Ea4", "to": "Ea5" })
        )
        .is_err());

        // Well-formed JSON, but not a coordinate
        let wire = WireMove {
            from: "Fa1".to_string(),
            to: "Aa2".to_string(),
            promotion: None,
        };
        assert!(matches!(
            Move::try_from(&wire),
            Err(RulesError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn game_start_shape() {
        let message = RelayMessage::GameStart(GameStart::new(Color::White));
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({ "type": "game_start", "color": "white" })
        );

        let game = Game::from_layout("k4/5/5/5/R4|5/5/5/5/5|5/5/5/5/5|5/5/5/5/5|4K/5/5/5/5 b").unwrap();
        let message = RelayMessage::GameStart(GameStart::from_game(Color::Black, &game));
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "game_start",
                "color": "black",
                "initialPosition": "k4/5/5/5/R4|5/5/5/5/5|5/5/5/5/5|5/5/5/5/5|4K/5/5/5/5 b",
            })
        );
    }

    #[test]
    fn game_start_builds_the_game() {
        let message: RelayMessage = serde_json::from_value(json!({
            "type": "game_start",
            "color": "black",
            "initialPosition": "k4/5/5/5/R4|5/5/5/5/5|5/5/5/5/5|5/5/5/5/5|4K/5/5/5/5 b",
        }))
        .unwrap();

        let RelayMessage::GameStart(start) = message else {
            panic!("expected a game_start message");
        };
        assert_eq!(start.color, Color::Black);

        let game = start.to_game().unwrap();
        assert_eq!(game.side_to_move(), Color::Black);
        assert!(game.is_in_check().unwrap());

        assert_eq!(GameStart::new(Color::White).to_game().unwrap(), Game::default());
    }

    #[test]
    fn game_start_rejects_bad_layouts() {
        let start = GameStart {
            color: Color::White,
            initial_position: Some("5/5/5/5/5 w".to_string()),
        };
        assert!(start.to_game().is_err());
    }

    #[test]
    fn only_promotion_kinds_convert() {
        for kind in PieceKind::PROMOTIONS {
            assert_eq!(PieceKind::from(Promotion::try_from(kind).unwrap()), kind);
        }
        assert!(Promotion::try_from(PieceKind::King).is_err());
        assert!(Promotion::try_from(PieceKind::Pawn).is_err());
    }
}
