//! Meld and trick scorers.
//!
//! Both scorers take a [`Deck`] and read trump from its rank table, so the
//! caller applies trump (or not) before scoring. Scores depend only on the
//! multiset of cards, never on their order.

use super::cards_types::{CardValue, Suit};
use super::deck::Deck;

/// Meld score for a deck of melded cards.
pub fn score_meld(deck: &Deck) -> u32 {
    nines(deck) + marriages(deck) + arounds(deck) + run(deck) + pinochle(deck)
}

/// Trick score for a team's collected cards: each ace, 10, and king counts
/// one point regardless of trump. The last-trick bonus is the round engine's
/// business, not the scorer's.
pub fn score_tricks(deck: &Deck) -> u32 {
    deck.cards()
        .iter()
        .filter(|c| {
            matches!(
                c.value,
                CardValue::Ace | CardValue::Ten | CardValue::King
            )
        })
        .count() as u32
}

/// Nines of trump, one point each. Worth nothing until trump is called.
fn nines(deck: &Deck) -> u32 {
    match deck.ranks().trump() {
        Some(trump) => deck.count(CardValue::Nine, trump) as u32,
        None => 0,
    }
}

/// King and queen of the same suit, two points per pair, doubled in trump.
fn marriages(deck: &Deck) -> u32 {
    let trump = deck.ranks().trump();
    let mut total = 0;
    for suit in Suit::ALL {
        let pairs = deck
            .count(CardValue::King, suit)
            .min(deck.count(CardValue::Queen, suit)) as u32;
        let mut value = 2 * pairs;
        if Some(suit) == trump {
            value *= 2;
        }
        total += value;
    }
    total
}

/// One of a value in every suit. The minimum count across suits decides:
/// one of each scores the single value, two of each scores the double.
fn arounds(deck: &Deck) -> u32 {
    const TABLE: [(CardValue, u32, u32); 4] = [
        (CardValue::Jack, 4, 40),
        (CardValue::Queen, 6, 60),
        (CardValue::King, 8, 80),
        (CardValue::Ace, 10, 100),
    ];

    let mut total = 0;
    for (value, single, double) in TABLE {
        let count = Suit::ALL
            .into_iter()
            .map(|suit| deck.count(value, suit))
            .min()
            .unwrap_or(0);
        total += match count {
            0 => 0,
            1 => single,
            _ => double,
        };
    }
    total
}

/// Jack, queen, king, 10, and ace of trump: 11 points per complete run.
/// The trump marriage inside a run still counts separately.
fn run(deck: &Deck) -> u32 {
    let Some(trump) = deck.ranks().trump() else {
        return 0;
    };
    let runs = [
        CardValue::Jack,
        CardValue::Queen,
        CardValue::King,
        CardValue::Ten,
        CardValue::Ace,
    ]
    .into_iter()
    .map(|value| deck.count(value, trump))
    .min()
    .unwrap_or(0) as u32;
    runs * 11
}

/// Queen of spades plus jack of diamonds: 4 for one of each, 30 for both
/// pairs.
fn pinochle(deck: &Deck) -> u32 {
    let count = deck
        .count(CardValue::Queen, Suit::Spades)
        .min(deck.count(CardValue::Jack, Suit::Diamonds));
    match count {
        0 => 0,
        1 => 4,
        _ => 30,
    }
}
