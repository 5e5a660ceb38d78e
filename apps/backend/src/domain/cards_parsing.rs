//! Card parsing from wire representations (e.g., "spade_ace", "heart_10")

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, CardValue, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

impl FromStr for Suit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spade" => Ok(Suit::Spades),
            "heart" => Ok(Suit::Hearts),
            "club" => Ok(Suit::Clubs),
            "diamond" => Ok(Suit::Diamonds),
            _ => Err(DomainError::validation(
                ValidationKind::Suit,
                format!("{s} is not a valid suit"),
            )),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for CardValue {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "9" => Ok(CardValue::Nine),
            "jack" => Ok(CardValue::Jack),
            "queen" => Ok(CardValue::Queen),
            "king" => Ok(CardValue::King),
            "10" => Ok(CardValue::Ten),
            "ace" => Ok(CardValue::Ace),
            _ => Err(DomainError::validation(
                ValidationKind::CardName,
                format!("{s} is not a valid card value"),
            )),
        }
    }
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (suit_str, value_str) = s.split_once('_').ok_or_else(|| {
            DomainError::validation(
                ValidationKind::CardName,
                format!("{s} is not a valid card name"),
            )
        })?;
        let suit = suit_str.parse::<Suit>().map_err(|_| {
            DomainError::validation(
                ValidationKind::CardName,
                format!("{s} is not a valid card name"),
            )
        })?;
        let value = value_str.parse::<CardValue>().map_err(|_| {
            DomainError::validation(
                ValidationKind::CardName,
                format!("{s} is not a valid card name"),
            )
        })?;
        Ok(Card { suit, value })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.suit.as_wire_str(), self.value.as_wire_str())
    }
}

/// Non-panicking helper to parse card tokens (e.g., "spade_ace") into Card
/// instances. Returns an error if any token is invalid.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}

/// Parse a comma-separated card list as it appears in query strings.
/// An empty string parses to an empty list.
pub fn parse_card_list(s: &str) -> Result<Vec<Card>, DomainError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    try_parse_cards(s.split(','))
}

/// Render cards as the comma-separated wire list.
pub fn card_list_to_string(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
