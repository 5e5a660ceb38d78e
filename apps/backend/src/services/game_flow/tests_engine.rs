//! Engine tests driven through [`GameFixture`]: the store and the
//! capturing broadcaster stand in for the HTTP and socket layers, so
//! these assert on state transitions and the exact events fanned out.

use uuid::Uuid;

use crate::domain::cards_types::Card;
use crate::domain::deck::build_double_deck;
use crate::domain::state::Phase;
use crate::entities::OPENING_BID;
use crate::error::AppError;
use crate::store::Store;
use crate::test_support::{GameFixture, TestStateBuilder};
use crate::ws::protocol::ServerMessage;

/// Run the auction so `seating[0]` takes the bid at `bid`.
async fn win_auction(fixture: &GameFixture, bid: i32) -> Result<(), AppError> {
    let seating = &fixture.seating;
    fixture
        .flow
        .submit_bid(fixture.round.id, seating[0], bid)
        .await?;
    for passer in &seating[1..] {
        fixture.flow.submit_bid(fixture.round.id, *passer, -1).await?;
    }
    Ok(())
}

async fn finalize_all_meld(fixture: &GameFixture) -> Result<(), AppError> {
    for player_id in &fixture.seating {
        fixture.flow.finalize_meld(fixture.round.id, *player_id).await?;
    }
    Ok(())
}

/// Every card the round can see: the kitty, each hand, each collected
/// pile, and the in-progress trick, as a sorted multiset.
async fn visible_cards(fixture: &GameFixture) -> Result<Vec<Card>, AppError> {
    let mut cards = fixture.store.hand_cards(fixture.round.hand_id).await?;
    for player_id in &fixture.seating {
        let player = fixture.store.require_player(*player_id).await?;
        cards.extend(fixture.store.hand_cards(player.hand_id).await?);
    }
    for round_team in fixture.store.round_teams(fixture.round.id).await? {
        cards.extend(fixture.store.hand_cards(round_team.hand_id).await?);
    }
    if let Some(trick) = fixture.store.trick_for_round(fixture.round.id).await? {
        cards.extend(fixture.store.hand_cards(trick.hand_id).await?);
    }
    cards.sort();
    Ok(cards)
}

fn canonical_deck() -> Vec<Card> {
    let mut cards = build_double_deck().into_cards();
    cards.sort();
    cards
}

#[tokio::test]
async fn the_last_registration_starts_the_game() {
    let fixture = TestStateBuilder::new().build().await.unwrap();
    let game_id = fixture.game.id;

    // Three of four seats join: the table stays in the lobby.
    for player_id in &fixture.player_ids[..3] {
        fixture.broadcaster.join(game_id, *player_id);
        fixture.flow.client_registered(game_id, *player_id).await.unwrap();
    }
    let game = fixture.store.require_game(game_id).await.unwrap();
    assert_eq!(game.phase, Phase::Game);
    assert!(!fixture.broadcaster.actions(game_id).contains(&"game_start"));

    fixture.broadcaster.join(game_id, fixture.player_ids[3]);
    fixture
        .flow
        .client_registered(game_id, fixture.player_ids[3])
        .await
        .unwrap();

    let game = fixture.store.require_game(game_id).await.unwrap();
    assert_eq!(game.phase, Phase::Bid);

    let actions = fixture.broadcaster.actions(game_id);
    assert!(actions.contains(&"game_start"));
    assert!(actions.contains(&"bid_prompt"));

    // The first round's auction opens at seat zero.
    let prompts = fixture.broadcaster.messages_for(game_id, "bid_prompt");
    assert_eq!(
        prompts.first(),
        Some(&ServerMessage::BidPrompt {
            player_id: fixture.seating[0],
            bid: OPENING_BID,
        })
    );

    // The deal happened as part of the start.
    for player_id in &fixture.seating {
        let player = fixture.store.require_player(*player_id).await.unwrap();
        let hand = fixture.store.hand_cards(player.hand_id).await.unwrap();
        assert_eq!(hand.len(), 12);
        assert!(player.bidding);
    }
}

#[tokio::test]
async fn a_reconnect_replays_the_untouched_auction() {
    let mut fixture = TestStateBuilder::new().started().build().await.unwrap();
    let game_id = fixture.game.id;
    let returning = fixture.seating[0];

    fixture.flow.client_registered(game_id, returning).await.unwrap();

    let events = fixture.broadcaster.events();
    let sent_directly: Vec<ServerMessage> = events
        .iter()
        .filter(|event| event.sent_to == Some(returning))
        .map(|event| event.message.clone())
        .collect();

    assert!(sent_directly.iter().any(|message| matches!(
        message,
        ServerMessage::GameState { state: Phase::Bid, .. }
    )));
    assert!(sent_directly.iter().any(|message| matches!(
        message,
        ServerMessage::BidPrompt { bid: OPENING_BID, .. }
    )));

    // Once the auction has moved, the prompt is no longer replayed.
    fixture
        .flow
        .submit_bid(fixture.round.id, fixture.seating[0], 25)
        .await
        .unwrap();
    fixture.broadcaster.clear();
    fixture.flow.client_registered(game_id, returning).await.unwrap();

    let events = fixture.broadcaster.events();
    assert!(!events.iter().any(|event| {
        event.sent_to == Some(returning)
            && matches!(event.message, ServerMessage::BidPrompt { .. })
    }));

    fixture.refresh().await.unwrap();
    assert_eq!(fixture.round.bid, 25);
}

#[tokio::test]
async fn a_reconnect_after_trump_replays_the_selection() {
    let mut fixture = TestStateBuilder::new().started().build().await.unwrap();
    win_auction(&fixture, 25).await.unwrap();
    fixture
        .flow
        .set_trump(fixture.round.id, fixture.seating[0], "heart")
        .await
        .unwrap();
    fixture.broadcaster.clear();

    let returning = fixture.seating[2];
    fixture
        .flow
        .client_registered(fixture.game.id, returning)
        .await
        .unwrap();

    let events = fixture.broadcaster.events();
    assert!(events.iter().any(|event| {
        event.sent_to == Some(returning)
            && matches!(event.message, ServerMessage::TrumpSelected { .. })
    }));
    fixture.refresh().await.unwrap();
    assert_eq!(fixture.game.phase, Phase::Meld);
}

#[tokio::test]
async fn meld_updates_skip_the_submitting_player() {
    let fixture = TestStateBuilder::new().started().build().await.unwrap();
    win_auction(&fixture, 25).await.unwrap();
    fixture
        .flow
        .set_trump(fixture.round.id, fixture.seating[0], "spade")
        .await
        .unwrap();

    let submitter = fixture.seating[0];
    let player = fixture.store.require_player(submitter).await.unwrap();
    let hand = fixture.store.hand_cards(player.hand_id).await.unwrap();
    let selection = format!("{},{}", hand[0], hand[1]);

    fixture.broadcaster.clear();
    let score = fixture
        .flow
        .score_meld(fixture.round.id, submitter, &selection)
        .await
        .unwrap();

    let player = fixture.store.require_player(submitter).await.unwrap();
    assert_eq!(player.meld_score, score);

    let events = fixture.broadcaster.events();
    let update = events
        .iter()
        .find(|event| event.message.action() == "meld_update")
        .expect("meld_update broadcast");
    assert_eq!(update.excluded, Some(submitter));
    assert_eq!(update.sent_to, None);
}

#[tokio::test]
async fn meld_is_rejected_while_the_auction_is_open() {
    let mut fixture = TestStateBuilder::new().started().build().await.unwrap();

    // Every seat finalizing early must not total scores or move the phase.
    for player_id in &fixture.seating {
        let err = fixture
            .flow
            .finalize_meld(fixture.round.id, *player_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    let submitter = fixture.seating[0];
    let player = fixture.store.require_player(submitter).await.unwrap();
    let card = fixture.store.hand_cards(player.hand_id).await.unwrap()[0];
    let err = fixture
        .flow
        .score_meld(fixture.round.id, submitter, &card.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    fixture.refresh().await.unwrap();
    assert_eq!(fixture.game.phase, Phase::Bid);
    for team_id in fixture.team_ids {
        assert_eq!(fixture.store.require_team(team_id).await.unwrap().score, 0);
    }
    for player_id in &fixture.seating {
        let player = fixture.store.require_player(*player_id).await.unwrap();
        assert!(!player.meld_final);
        assert_eq!(player.meld_score, 0);
    }
}

#[tokio::test]
async fn the_deck_is_conserved_through_a_round() {
    let mut fixture = TestStateBuilder::new()
        .with_kitty(4)
        .started()
        .build()
        .await
        .unwrap();
    let deck = canonical_deck();

    // After the deal: kitty of 4 plus four hands of 11.
    let kitty = fixture
        .store
        .hand_cards(fixture.round.hand_id)
        .await
        .unwrap();
    assert_eq!(kitty.len(), 4);
    assert_eq!(visible_cards(&fixture).await.unwrap(), deck);

    // The auction moves the kitty into the winner's hand.
    win_auction(&fixture, 25).await.unwrap();
    let winner = fixture.store.require_player(fixture.seating[0]).await.unwrap();
    assert_eq!(
        fixture.store.hand_cards(winner.hand_id).await.unwrap().len(),
        15
    );
    assert!(fixture
        .store
        .hand_cards(fixture.round.hand_id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(visible_cards(&fixture).await.unwrap(), deck);

    fixture
        .flow
        .set_trump(fixture.round.id, fixture.seating[0], "club")
        .await
        .unwrap();
    fixture.flow.advance_game(fixture.game.id).await.unwrap();
    finalize_all_meld(&fixture).await.unwrap();
    fixture.refresh().await.unwrap();
    assert_eq!(fixture.game.phase, Phase::Trick);

    // Two cards into the first trick, the union still covers the deck.
    for player_id in &fixture.seating[..2] {
        let player = fixture.store.require_player(*player_id).await.unwrap();
        let card = fixture.store.hand_cards(player.hand_id).await.unwrap()[0];
        fixture
            .flow
            .play_card(fixture.round.id, *player_id, &card.to_string())
            .await
            .unwrap();
    }
    let trick = fixture.store.require_trick(fixture.round.id).await.unwrap();
    assert_eq!(
        fixture.store.hand_cards(trick.hand_id).await.unwrap().len(),
        2
    );
    assert_eq!(visible_cards(&fixture).await.unwrap(), deck);
}

/// Drive a started fixture to the point where every hand holds exactly
/// one card and the game is in trick play, then play the single closing
/// trick. Trump is spades; `seating[1]` plays the only trump and takes
/// the trick, so the second team banks one card point plus the
/// last-trick bonus.
async fn play_closing_trick(fixture: &mut GameFixture, bid: i32) -> Result<(), AppError> {
    win_auction(fixture, bid).await?;
    fixture
        .flow
        .set_trump(fixture.round.id, fixture.seating[0], "spade")
        .await?;
    finalize_all_meld(fixture).await?;
    fixture.refresh().await?;
    assert_eq!(fixture.game.phase, Phase::Trick);

    let closing = [
        (fixture.seating[0], "club_9"),
        (fixture.seating[1], "spade_ace"),
        (fixture.seating[2], "club_jack"),
        (fixture.seating[3], "heart_9"),
    ];
    for (player_id, card) in closing {
        fixture.set_hand(player_id, card).await?;
    }
    for (player_id, card) in closing {
        fixture.flow.play_card(fixture.round.id, player_id, card).await?;
    }
    Ok(())
}

#[tokio::test]
async fn settling_a_round_scores_tricks_and_spawns_the_next_round() {
    let mut fixture = TestStateBuilder::new().started().build().await.unwrap();
    let settled_round_id = fixture.round.id;
    play_closing_trick(&mut fixture, 25).await.unwrap();

    // seating[1] is on the second team: one ace plus the last-trick bonus.
    let first_team = fixture.store.require_team(fixture.team_ids[0]).await.unwrap();
    let second_team = fixture.store.require_team(fixture.team_ids[1]).await.unwrap();
    assert_eq!(first_team.score, 0);
    assert_eq!(second_team.score, 2);

    let won = fixture
        .broadcaster
        .messages_for(fixture.game.id, "trick_won");
    assert!(matches!(
        won.last(),
        Some(ServerMessage::TrickWon { player_id, .. }) if *player_id == fixture.seating[1]
    ));
    assert_eq!(
        fixture
            .broadcaster
            .messages_for(fixture.game.id, "score_round")
            .len(),
        2
    );

    // The game wrapped into a fresh auction in a new round.
    fixture.refresh().await.unwrap();
    assert_eq!(fixture.game.phase, Phase::Bid);

    let rounds = fixture
        .store
        .rounds_for_game(fixture.game.id)
        .await
        .unwrap();
    assert_eq!(rounds.len(), 2);
    let next = rounds.last().unwrap();
    assert_ne!(next.id, settled_round_id);
    assert_eq!(next.round_seq, 1);
    assert_eq!(next.bid, OPENING_BID);
    assert!(next.bid_winner.is_none());
    assert!(next.trump.is_none());

    // Round two opens one seat later and with clean meld state.
    let prompts = fixture
        .broadcaster
        .messages_for(fixture.game.id, "bid_prompt");
    assert_eq!(
        prompts.last(),
        Some(&ServerMessage::BidPrompt {
            player_id: fixture.seating[1],
            bid: OPENING_BID,
        })
    );
    for player_id in &fixture.seating {
        let player = fixture.store.require_player(*player_id).await.unwrap();
        assert!(!player.meld_final);
        assert_eq!(player.meld_score, 0);
        assert!(player.bidding);
    }
}

#[tokio::test]
async fn a_team_that_misses_its_bid_goes_set() {
    let mut fixture = TestStateBuilder::new()
        .with_bid_enforcement()
        .started()
        .build()
        .await
        .unwrap();
    play_closing_trick(&mut fixture, 25).await.unwrap();

    // The bid winner's team took no tricks and melded nothing: its round
    // nets exactly -25. The other team keeps its trick points.
    let first_team = fixture.store.require_team(fixture.team_ids[0]).await.unwrap();
    let second_team = fixture.store.require_team(fixture.team_ids[1]).await.unwrap();
    assert_eq!(first_team.score, -25);
    assert_eq!(second_team.score, 2);
}

#[tokio::test]
async fn advancing_an_unknown_game_is_not_found() {
    let fixture = TestStateBuilder::new().build().await.unwrap();
    let err = fixture.flow.advance_game(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}
