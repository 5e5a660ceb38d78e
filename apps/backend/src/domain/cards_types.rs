//! Core card-related types: Card, CardValue, Suit

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    /// Singular lowercase wire name, e.g. `spade`.
    pub const fn as_wire_str(&self) -> &'static str {
        match self {
            Suit::Spades => "spade",
            Suit::Hearts => "heart",
            Suit::Clubs => "club",
            Suit::Diamonds => "diamond",
        }
    }
}

/// Pinochle card values in ascending strength order.
///
/// The in-suit ordering is fixed: 9 < Jack < Queen < King < 10 < Ace.
/// The derived `Ord` follows that ordering.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CardValue {
    Nine,
    Jack,
    Queen,
    King,
    Ten,
    Ace,
}

impl CardValue {
    pub const ALL: [CardValue; 6] = [
        CardValue::Nine,
        CardValue::Jack,
        CardValue::Queen,
        CardValue::King,
        CardValue::Ten,
        CardValue::Ace,
    ];

    /// Lowercase wire name, e.g. `ace` or `10`.
    pub const fn as_wire_str(&self) -> &'static str {
        match self {
            CardValue::Nine => "9",
            CardValue::Jack => "jack",
            CardValue::Queen => "queen",
            CardValue::King => "king",
            CardValue::Ten => "10",
            CardValue::Ace => "ace",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub value: CardValue,
}

impl Card {
    pub const fn new(suit: Suit, value: CardValue) -> Self {
        Self { suit, value }
    }
}

// Note: Ord on Card is only for stable test assertions: suit order S<H<C<D
// then value order. Trick resolution goes through the rank table instead.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.value.cmp(&other.value),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
