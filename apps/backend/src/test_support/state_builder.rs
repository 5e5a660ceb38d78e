//! Builders for pre-wired game fixtures.
//!
//! A fixture is a full table: one game, two teams of two, and an active
//! round with both teams attached. Tests drive the engine through
//! [`GameFixture::flow`] and assert on the captured broadcasts.

use std::sync::Arc;

use uuid::Uuid;

use super::CapturingBroadcaster;
use crate::domain::cards_parsing::parse_card_list;
use crate::domain::state::Phase;
use crate::entities::{Game, Hand, Round};
use crate::error::AppError;
use crate::infra::GameLocks;
use crate::services::game_flow::GameFlowService;
use crate::services::{games, players, rounds, teams};
use crate::store::{MemoryStore, Store};

/// Builder for [`GameFixture`] instances.
pub struct TestStateBuilder {
    kitty_size: u8,
    bid_enforcement: bool,
    started: bool,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            kitty_size: 0,
            bid_enforcement: false,
            started: false,
        }
    }

    /// Deal with a kitty of `kitty_size` cards.
    pub fn with_kitty(mut self, kitty_size: u8) -> Self {
        self.kitty_size = kitty_size;
        self
    }

    /// Score `-bid` rounds for bid-winning teams that come up short.
    pub fn with_bid_enforcement(mut self) -> Self {
        self.bid_enforcement = true;
        self
    }

    /// Join all four players and let the engine start the round, then
    /// drop the setup broadcasts so assertions start from a clean slate.
    pub fn started(mut self) -> Self {
        self.started = true;
        self
    }

    pub async fn build(self) -> Result<GameFixture, AppError> {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let broadcaster = Arc::new(CapturingBroadcaster::new());
        let flow = GameFlowService::new(
            store.clone(),
            broadcaster.clone(),
            Arc::new(GameLocks::new()),
        )
        .with_bid_enforcement(self.bid_enforcement);

        let game = games::create_game(store.as_ref(), self.kitty_size).await?;
        let team_a = teams::create_team(store.as_ref(), "north_south").await?;
        let team_b = teams::create_team(store.as_ref(), "east_west").await?;

        let mut player_ids = [Uuid::nil(); 4];
        for (seat, name) in ["ann", "ben", "cam", "dee"].iter().enumerate() {
            player_ids[seat] = players::create_player(store.as_ref(), name).await?.id;
        }
        teams::add_player_to_team(store.as_ref(), team_a.id, player_ids[0]).await?;
        teams::add_player_to_team(store.as_ref(), team_a.id, player_ids[1]).await?;
        teams::add_player_to_team(store.as_ref(), team_b.id, player_ids[2]).await?;
        teams::add_player_to_team(store.as_ref(), team_b.id, player_ids[3]).await?;

        let round = flow.create_round(game.id).await?;
        rounds::add_teams_to_round(store.as_ref(), round.id, &[team_a.id, team_b.id]).await?;

        // Seating interleaves the two teams.
        let seating = vec![player_ids[0], player_ids[2], player_ids[1], player_ids[3]];

        let mut fixture = GameFixture {
            store,
            broadcaster,
            flow,
            game,
            round,
            team_ids: [team_a.id, team_b.id],
            player_ids,
            seating,
        };

        if self.started {
            for player_id in fixture.player_ids {
                fixture.broadcaster.join(fixture.game.id, player_id);
                fixture
                    .flow
                    .client_registered(fixture.game.id, player_id)
                    .await?;
            }
            fixture.broadcaster.clear();
            fixture.refresh().await?;
        }

        Ok(fixture)
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete table wired to an in-memory store and a capturing
/// broadcaster.
pub struct GameFixture {
    pub store: Arc<dyn Store>,
    pub broadcaster: Arc<CapturingBroadcaster>,
    pub flow: GameFlowService,
    pub game: Game,
    pub round: Round,
    /// Team ids in round order.
    pub team_ids: [Uuid; 2],
    /// Player ids in creation order: the first two are on the first
    /// team, the last two on the second.
    pub player_ids: [Uuid; 4],
    /// Seating order the engine deals and bids in.
    pub seating: Vec<Uuid>,
}

impl GameFixture {
    /// Re-read `game` and `round` from the store.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        self.game = self.store.require_game(self.game.id).await?;
        self.round = self.store.require_round(self.round.id).await?;
        Ok(())
    }

    /// Replace a player's hand with exactly the listed cards.
    pub async fn set_hand(&self, player_id: Uuid, cards: &str) -> Result<(), AppError> {
        let player = self.store.require_player(player_id).await?;
        let cards = parse_card_list(cards)?;
        self.store.put_hand(Hand::with_cards(player.hand_id, cards)).await?;
        Ok(())
    }

    /// Force the game into `phase` without going through the engine.
    pub async fn set_phase(&mut self, phase: Phase) -> Result<(), AppError> {
        let mut game = self.store.require_game(self.game.id).await?;
        game.phase = phase;
        self.store.update_game(game.clone()).await?;
        self.game = game;
        Ok(())
    }
}
