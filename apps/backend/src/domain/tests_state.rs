//! Phase machine and seating-order tests.

use crate::domain::state::{
    first_bidder_index, next_bidder_index, ordered_player_list, Phase,
};

#[test]
fn phase_round_trips_through_u8() {
    for raw in 0..=5u8 {
        let phase = Phase::from_u8(raw).unwrap();
        assert_eq!(phase.as_u8(), raw);
    }
    assert!(Phase::from_u8(6).is_err());
}

#[test]
fn phases_advance_in_order() {
    assert_eq!(Phase::Game.next(false), Phase::Bid);
    assert_eq!(Phase::Bid.next(false), Phase::BidFinal);
    assert_eq!(Phase::BidFinal.next(false), Phase::Reveal);
    assert_eq!(Phase::Reveal.next(false), Phase::Meld);
    assert_eq!(Phase::Meld.next(false), Phase::Trick);
}

#[test]
fn empty_kitty_skips_the_reveal() {
    assert_eq!(Phase::BidFinal.next(true), Phase::Meld);
}

#[test]
fn trick_wraps_to_the_next_bid() {
    assert_eq!(Phase::Trick.next(false), Phase::Bid);
    assert_eq!(Phase::Trick.next(true), Phase::Bid);
    for raw in 0..=5u8 {
        let phase = Phase::from_u8(raw).unwrap();
        assert_eq!(phase.wraps(), phase == Phase::Trick);
    }
}

#[test]
fn phase_serializes_as_integer() {
    assert_eq!(serde_json::to_string(&Phase::Meld).unwrap(), "4");
    let parsed: Phase = serde_json::from_str("4").unwrap();
    assert_eq!(parsed, Phase::Meld);
    assert!(serde_json::from_str::<Phase>("9").is_err());
}

#[test]
fn seating_alternates_between_teams() {
    let teams = vec![vec!["a1", "a2"], vec!["b1", "b2"]];
    assert_eq!(ordered_player_list(&teams), vec!["a1", "b1", "a2", "b2"]);
}

#[test]
fn seating_handles_uneven_teams() {
    let teams = vec![vec!["a1", "a2"], vec!["b1"]];
    assert_eq!(ordered_player_list(&teams), vec!["a1", "b1", "a2"]);
}

#[test]
fn first_bidder_rotates_with_the_round() {
    assert_eq!(first_bidder_index(0, 4), 0);
    assert_eq!(first_bidder_index(1, 4), 1);
    assert_eq!(first_bidder_index(4, 4), 0);
    assert_eq!(first_bidder_index(5, 3), 2);
}

#[test]
fn next_bidder_walks_the_remaining_list() {
    let bidders = vec!["p0", "p1", "p2"];
    assert_eq!(next_bidder_index(&"p0", &bidders), Some(1));
    assert_eq!(next_bidder_index(&"p2", &bidders), Some(0));
    assert_eq!(next_bidder_index(&"gone", &bidders), None);
}
