//! Property tests for trick resolution.

use proptest::prelude::*;

use crate::domain::cards_logic::{card_beats, winning_index};
use crate::domain::cards_types::{Card, CardValue, Suit};
use crate::domain::deck::RankTable;

fn any_suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Spades),
        Just(Suit::Hearts),
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
    ]
}

fn any_value() -> impl Strategy<Value = CardValue> {
    prop_oneof![
        Just(CardValue::Nine),
        Just(CardValue::Jack),
        Just(CardValue::Queen),
        Just(CardValue::King),
        Just(CardValue::Ten),
        Just(CardValue::Ace),
    ]
}

fn any_card() -> impl Strategy<Value = Card> {
    (any_suit(), any_value()).prop_map(|(suit, value)| Card::new(suit, value))
}

fn trick_plays() -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(any_card(), 1..=5)
}

fn trump_table(trump: Suit) -> RankTable {
    let mut ranks = RankTable::standard();
    ranks.set_trump(trump);
    ranks
}

proptest! {
    /// The winner picked by the scan equals the winner of folding every
    /// later card against the current incumbent one pair at a time.
    #[test]
    fn prop_winner_matches_pairwise_comparison(
        plays in trick_plays(),
        trump in any_suit(),
    ) {
        let ranks = trump_table(trump);
        let led = plays[0].suit;

        let mut incumbent = 0usize;
        for (idx, card) in plays.iter().enumerate().skip(1) {
            if card_beats(*card, plays[incumbent], led, &ranks) {
                incumbent = idx;
            }
        }

        prop_assert_eq!(winning_index(&plays, &ranks), Some(incumbent));
    }

    /// Once any trump hits the table, no off-trump card can win the trick.
    #[test]
    fn prop_trump_always_wins_over_off_trump(
        plays in trick_plays(),
        trump in any_suit(),
    ) {
        let ranks = trump_table(trump);
        let winner = winning_index(&plays, &ranks).unwrap();

        if plays.iter().any(|card| card.suit == trump) {
            prop_assert_eq!(plays[winner].suit, trump);
        }
    }

    /// Without trump on the table, the winning card must follow the led suit.
    #[test]
    fn prop_winner_follows_led_suit_without_trump(
        plays in trick_plays(),
        trump in any_suit(),
    ) {
        let ranks = trump_table(trump);
        let winner = winning_index(&plays, &ranks).unwrap();

        if plays.iter().all(|card| card.suit != trump) {
            prop_assert_eq!(plays[winner].suit, plays[0].suit);
        }
    }

    /// A table with no trump configured reduces to plain follow-the-lead.
    #[test]
    fn prop_no_trump_table_follows_the_lead(plays in trick_plays()) {
        let ranks = RankTable::standard();
        let winner = winning_index(&plays, &ranks).unwrap();
        prop_assert_eq!(plays[winner].suit, plays[0].suit);
    }
}
