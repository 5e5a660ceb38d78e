//! Meld and trick scorer tests, pinned to the fixed reference decks.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards_types::{Card, CardValue, Suit};
use crate::domain::deck::{build_double_deck, build_single_set, Deck};
use crate::domain::scoring::{score_meld, score_tricks};

fn deck_of(cards: &[(Suit, CardValue)]) -> Deck {
    Deck::from_cards(cards.iter().map(|(s, v)| Card::new(*s, *v)).collect())
}

#[test]
fn marriage_in_trump_scores_double() {
    // Two marriages, one of them in trump: 2*2 + 2*1 = 6.
    let deck = deck_of(&[
        (Suit::Spades, CardValue::King),
        (Suit::Spades, CardValue::Queen),
        (Suit::Hearts, CardValue::King),
        (Suit::Hearts, CardValue::Queen),
    ]);
    assert_eq!(score_meld(&deck.with_trump(Suit::Spades)), 6);
}

#[test]
fn marriage_without_trump_scores_plain() {
    let deck = deck_of(&[
        (Suit::Spades, CardValue::King),
        (Suit::Spades, CardValue::Queen),
        (Suit::Hearts, CardValue::King),
        (Suit::Hearts, CardValue::Queen),
    ]);
    assert_eq!(score_meld(&deck), 4);
}

#[test]
fn single_set_scores_54_under_every_trump() {
    // One of every combination: 1 nine of trump, 4 marriages (one doubled),
    // four single arounds (4+6+8+10), one run, one pinochle.
    let deck = build_single_set();
    for trump in Suit::ALL {
        assert_eq!(score_meld(&deck.with_trump(trump)), 54, "trump {trump}");
    }
}

#[test]
fn double_deck_scores_354_under_every_trump() {
    // Two of everything: 2 nines, 8 marriage points in trump + 12 outside,
    // all four double arounds (40+60+80+100), a double run, double pinochle.
    let deck = build_double_deck();
    for trump in Suit::ALL {
        assert_eq!(score_meld(&deck.with_trump(trump)), 354, "trump {trump}");
    }
}

#[test]
fn single_set_without_trump_drops_trump_patterns() {
    // No nines, no run, no doubled marriage: 8 + 28 + 4.
    let deck = build_single_set();
    assert_eq!(score_meld(&deck), 40);
}

#[test]
fn score_is_independent_of_card_order() {
    let mut deck = build_double_deck().with_trump(Suit::Clubs);
    let before = score_meld(&deck);
    deck.shuffle(&mut ChaCha8Rng::seed_from_u64(99));
    assert_eq!(score_meld(&deck), before);
}

#[test]
fn empty_deck_scores_zero() {
    let deck = Deck::empty();
    assert_eq!(score_meld(&deck), 0);
    assert_eq!(score_meld(&deck.with_trump(Suit::Hearts)), 0);
    assert_eq!(score_tricks(&deck), 0);
}

#[test]
fn nines_count_only_in_trump() {
    let deck = deck_of(&[
        (Suit::Diamonds, CardValue::Nine),
        (Suit::Diamonds, CardValue::Nine),
        (Suit::Clubs, CardValue::Nine),
    ]);
    assert_eq!(score_meld(&deck.with_trump(Suit::Diamonds)), 2);
    assert_eq!(score_meld(&deck.with_trump(Suit::Spades)), 0);
    assert_eq!(score_meld(&deck), 0);
}

#[test]
fn mixed_around_counts_score_single() {
    // Two queens of spades but only one of each other suit: still a single
    // around (6), not a double, plus the lone pinochle (4).
    let deck = deck_of(&[
        (Suit::Spades, CardValue::Queen),
        (Suit::Spades, CardValue::Queen),
        (Suit::Hearts, CardValue::Queen),
        (Suit::Clubs, CardValue::Queen),
        (Suit::Diamonds, CardValue::Queen),
        (Suit::Diamonds, CardValue::Jack),
    ]);
    assert_eq!(score_meld(&deck), 6 + 4);
}

#[test]
fn incomplete_around_scores_nothing() {
    let deck = deck_of(&[
        (Suit::Spades, CardValue::King),
        (Suit::Hearts, CardValue::King),
        (Suit::Clubs, CardValue::King),
    ]);
    assert_eq!(score_meld(&deck), 0);
}

#[test]
fn run_in_trump_keeps_its_marriage() {
    // Jack through ace of trump: run (11) plus the doubled marriage (4).
    let deck = deck_of(&[
        (Suit::Hearts, CardValue::Jack),
        (Suit::Hearts, CardValue::Queen),
        (Suit::Hearts, CardValue::King),
        (Suit::Hearts, CardValue::Ten),
        (Suit::Hearts, CardValue::Ace),
    ]);
    assert_eq!(score_meld(&deck.with_trump(Suit::Hearts)), 15);
    // The same cards off-trump are just a plain marriage.
    assert_eq!(score_meld(&deck.with_trump(Suit::Spades)), 2);
}

#[test]
fn pinochle_single_and_double() {
    let single = deck_of(&[
        (Suit::Spades, CardValue::Queen),
        (Suit::Diamonds, CardValue::Jack),
    ]);
    assert_eq!(score_meld(&single), 4);

    let double = deck_of(&[
        (Suit::Spades, CardValue::Queen),
        (Suit::Spades, CardValue::Queen),
        (Suit::Diamonds, CardValue::Jack),
        (Suit::Diamonds, CardValue::Jack),
    ]);
    assert_eq!(score_meld(&double), 30);
}

#[test]
fn trick_scorer_counts_aces_tens_and_kings() {
    let deck = deck_of(&[
        (Suit::Spades, CardValue::Ace),
        (Suit::Hearts, CardValue::Ten),
        (Suit::Clubs, CardValue::King),
        (Suit::Diamonds, CardValue::Queen),
        (Suit::Diamonds, CardValue::Jack),
        (Suit::Hearts, CardValue::Nine),
    ]);
    assert_eq!(score_tricks(&deck), 3);
}

#[test]
fn trick_scorer_ignores_trump() {
    let deck = deck_of(&[
        (Suit::Spades, CardValue::Ace),
        (Suit::Hearts, CardValue::Ten),
    ]);
    assert_eq!(score_tricks(&deck), score_tricks(&deck.with_trump(Suit::Spades)));
}

#[test]
fn full_double_deck_holds_24_trick_points() {
    // Two aces, tens, and kings in each of the four suits.
    assert_eq!(score_tricks(&build_double_deck()), 24);
}
