//! Dealing tests: conservation, fairness, and kitty validation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards_types::Card;
use crate::domain::dealing::{deal_hands, DECK_SIZE};
use crate::domain::deck::build_double_deck;

fn sorted(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort();
    cards
}

#[test]
fn four_players_with_kitty_get_equal_hands() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let deal = deal_hands(4, 4, &mut rng).unwrap();

    assert_eq!(deal.kitty.len(), 4);
    assert_eq!(deal.hands.len(), 4);
    for hand in &deal.hands {
        assert_eq!(hand.len(), 11);
    }
}

#[test]
fn dealt_cards_are_exactly_the_double_deck() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let deal = deal_hands(4, 4, &mut rng).unwrap();

    let mut all = deal.kitty.clone();
    for hand in &deal.hands {
        all.extend(hand.iter().copied());
    }
    assert_eq!(sorted(all), sorted(build_double_deck().into_cards()));
}

#[test]
fn deals_are_reproducible_per_seed() {
    let first = deal_hands(3, 0, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
    let second = deal_hands(3, 0, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
    assert_eq!(first.kitty, second.kitty);
    assert_eq!(first.hands, second.hands);
}

#[test]
fn zero_kitty_grows_to_cover_the_remainder() {
    // 48 % 5 = 3, so five players with no requested kitty get one of 3.
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let deal = deal_hands(5, 0, &mut rng).unwrap();
    assert_eq!(deal.kitty.len(), 3);
    for hand in &deal.hands {
        assert_eq!(hand.len(), 9);
    }
}

#[test]
fn two_players_split_the_deck_evenly() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let deal = deal_hands(2, 0, &mut rng).unwrap();
    assert!(deal.kitty.is_empty());
    assert_eq!(deal.hands[0].len(), 24);
    assert_eq!(deal.hands[1].len(), 24);
}

#[test]
fn player_count_out_of_range_is_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert!(deal_hands(1, 0, &mut rng).is_err());
    assert!(deal_hands(6, 0, &mut rng).is_err());
}

#[test]
fn oversized_kitty_is_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    assert!(deal_hands(4, 9, &mut rng).is_err());
}

#[test]
fn kitty_leaving_unequal_hands_is_rejected() {
    // 48 - 4 = 44 does not divide by 5.
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    assert!(deal_hands(5, 4, &mut rng).is_err());
}

#[test]
fn every_valid_combination_conserves_the_deck() {
    for players in 2..=5usize {
        for kitty in 0..=8u8 {
            let mut rng = ChaCha8Rng::seed_from_u64(players as u64 * 100 + kitty as u64);
            match deal_hands(players, kitty, &mut rng) {
                Ok(deal) => {
                    let total: usize =
                        deal.kitty.len() + deal.hands.iter().map(Vec::len).sum::<usize>();
                    assert_eq!(total, DECK_SIZE);
                    let per_hand = (DECK_SIZE - deal.kitty.len()) / players;
                    for hand in &deal.hands {
                        assert_eq!(hand.len(), per_hand, "players {players} kitty {kitty}");
                    }
                }
                Err(_) => {
                    assert!(
                        kitty > 0 && (DECK_SIZE - kitty as usize) % players != 0,
                        "unexpected rejection for players {players} kitty {kitty}"
                    );
                }
            }
        }
    }
}
