//! Deck container and the rank table that drives sorting and trump.

use rand::seq::SliceRandom;
use rand::Rng;

use super::cards_types::{Card, CardValue, Suit};

/// Sentinel suit weight marking the trump suit in a rank table.
/// Deliberately larger than any default weight.
pub const TRUMP_VALUE: u8 = 25;

/// Per-deck card weights: a suit weight and a value weight per card.
///
/// Default suit weights are equal, so sorting and comparison treat suits
/// alike until a trump is applied. Value weights follow the fixed pinochle
/// ordering 9 < jack < queen < king < 10 < ace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable {
    suit_weight: [u8; 4],
    value_weight: [u8; 6],
}

impl RankTable {
    pub fn standard() -> Self {
        Self {
            suit_weight: [1; 4],
            value_weight: [1, 2, 3, 4, 5, 6],
        }
    }

    /// Raises `suit` above all others. Any previously-set trump is cleared.
    pub fn set_trump(&mut self, suit: Suit) {
        self.suit_weight = [1; 4];
        self.suit_weight[suit as usize] = TRUMP_VALUE;
    }

    /// The trump suit, detected by scanning suit weights for the sentinel.
    pub fn trump(&self) -> Option<Suit> {
        Suit::ALL
            .into_iter()
            .find(|suit| self.suit_weight[*suit as usize] == TRUMP_VALUE)
    }

    pub fn suit_weight(&self, suit: Suit) -> u8 {
        self.suit_weight[suit as usize]
    }

    pub fn value_weight(&self, value: CardValue) -> u8 {
        self.value_weight[value as usize]
    }
}

impl Default for RankTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// An ordered multiset of cards plus its rank table.
///
/// All four hand roles (kitty, player hand, team collected hand, trick hand)
/// are stored as this one type.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<Card>,
    ranks: RankTable,
}

impl Deck {
    pub fn empty() -> Self {
        Self {
            cards: Vec::new(),
            ranks: RankTable::standard(),
        }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            ranks: RankTable::standard(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn ranks(&self) -> &RankTable {
        &self.ranks
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Removes one copy of `card`, preserving the order of the rest.
    /// Returns false when the card is not present.
    pub fn remove_one(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|c| *c == card) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Uniform random permutation. The RNG is pluggable so tests can seed it.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes and returns the top `n` cards (fewer when the deck runs out).
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        let n = n.min(self.cards.len());
        let at = self.cards.len() - n;
        self.cards.split_off(at)
    }

    /// All cards matching `predicate`, order preserved.
    pub fn find(&self, predicate: impl Fn(&Card) -> bool) -> Vec<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|c| predicate(c))
            .collect()
    }

    /// Copies of `(value, suit)` currently in the deck.
    pub fn count(&self, value: CardValue, suit: Suit) -> usize {
        self.cards
            .iter()
            .filter(|c| c.value == value && c.suit == suit)
            .count()
    }

    /// Stable sort by (suit weight descending, value weight descending).
    pub fn sort(&mut self) {
        let ranks = self.ranks.clone();
        self.cards.sort_by(|a, b| {
            let ka = (ranks.suit_weight(a.suit), ranks.value_weight(a.value));
            let kb = (ranks.suit_weight(b.suit), ranks.value_weight(b.value));
            kb.cmp(&ka)
        });
    }

    /// Deep copy with `suit` raised to trump in the copy's rank table.
    pub fn with_trump(&self, suit: Suit) -> Deck {
        let mut copy = self.clone();
        copy.ranks.set_trump(suit);
        copy
    }
}

/// One set of the 24 pinochle (value, suit) combinations.
/// Jokers and values 2-8 do not exist in a pinochle deck.
pub fn build_single_set() -> Deck {
    let mut cards = Vec::with_capacity(24);
    for suit in Suit::ALL {
        for value in CardValue::ALL {
            cards.push(Card::new(suit, value));
        }
    }
    Deck::from_cards(cards)
}

/// The standard 48-card double pinochle deck: every combination twice.
pub fn build_double_deck() -> Deck {
    let mut deck = build_single_set();
    deck.extend(build_single_set().into_cards());
    deck
}
