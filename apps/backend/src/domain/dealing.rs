//! Dealing a round: kitty first, then round-robin hands.

use rand::Rng;

use super::cards_types::Card;
use super::deck::build_double_deck;
use crate::errors::domain::{DomainError, ValidationKind};

pub const DECK_SIZE: usize = 48;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;
pub const MAX_KITTY: u8 = 8;

/// Cards dealt for one round: the kitty plus one hand per seat,
/// in seating order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealResult {
    pub kitty: Vec<Card>,
    pub hands: Vec<Vec<Card>>,
}

/// Shuffle a fresh double deck and deal it out.
///
/// When the caller asks for no kitty but the deck does not divide evenly
/// among the players, the remainder is forced into the kitty. The kitty is
/// dealt first, the rest of the deck is shuffled again, and the remaining
/// cards go out one at a time in seating order. Every hand ends up with
/// `(48 - kitty) / player_count` cards.
pub fn deal_hands<R: Rng + ?Sized>(
    player_count: usize,
    kitty_size: u8,
    rng: &mut R,
) -> Result<DealResult, DomainError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(DomainError::validation(
            ValidationKind::PlayerCount,
            format!("Player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}"),
        ));
    }
    if kitty_size > MAX_KITTY {
        return Err(DomainError::validation(
            ValidationKind::KittySize,
            format!("Kitty size must be between 0 and {MAX_KITTY}"),
        ));
    }

    let mut kitty_size = kitty_size as usize;
    let remainder = DECK_SIZE % player_count;
    if kitty_size == 0 && remainder != 0 {
        kitty_size = remainder;
    }
    if (DECK_SIZE - kitty_size) % player_count != 0 {
        return Err(DomainError::validation(
            ValidationKind::KittySize,
            format!("Kitty of {kitty_size} leaves unequal hands for {player_count} players"),
        ));
    }

    let mut deck = build_double_deck();
    deck.shuffle(rng);

    let kitty = deck.deal(kitty_size);
    deck.shuffle(rng);

    let mut hands = vec![Vec::with_capacity((DECK_SIZE - kitty_size) / player_count); player_count];
    while !deck.is_empty() {
        for hand in hands.iter_mut() {
            hand.extend(deck.deal(1));
        }
    }

    Ok(DealResult { kitty, hands })
}
