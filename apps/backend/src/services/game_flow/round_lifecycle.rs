use tracing::{debug, info};
use uuid::Uuid;

use super::{no_game_for_round, GameFlowService};
use crate::domain::dealing::{deal_hands, DealResult};
use crate::domain::state::{first_bidder_index, ordered_player_list, Phase};
use crate::entities::{Game, GameRound, Hand, Round, RoundTeam, Trick};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::ws::protocol::ServerMessage;

impl GameFlowService {
    /// Create a round for a game and make it the game's active round.
    pub async fn create_round(&self, game_id: Uuid) -> Result<Round, AppError> {
        let lock = self.locks.lock_for(game_id);
        let _guard = lock.lock().await;

        debug!(game_id = %game_id, "creating round");

        self.store.require_game(game_id).await?;
        self.store.deactivate_game_rounds(game_id).await?;

        let round = Round::new(0);
        self.store.insert_round(round.clone()).await?;
        self.store
            .insert_game_round(GameRound::new(game_id, round.id))
            .await?;

        info!(game_id = %game_id, round_id = %round.id, "round created");
        Ok(round)
    }

    /// Start a round: deal, arm the bidding flags, prompt the first bidder.
    pub async fn start_round(&self, round_id: Uuid) -> Result<(), AppError> {
        self.store.require_round(round_id).await?;

        if self.store.round_teams(round_id).await?.is_empty() {
            return Err(DomainError::conflict(
                ConflictKind::NoTeamsForRound,
                format!("No teams found for round {round_id}"),
            )
            .into());
        }

        let game_id = self.game_id_for_round(round_id).await?;
        if self.store.game(game_id).await?.is_none() {
            return Err(no_game_for_round(round_id).into());
        }

        let lock = self.locks.lock_for(game_id);
        let _guard = lock.lock().await;

        self.start_round_locked(game_id, round_id).await
    }

    pub(super) async fn start_round_locked(
        &self,
        game_id: Uuid,
        round_id: Uuid,
    ) -> Result<(), AppError> {
        debug!(game_id = %game_id, round_id = %round_id, "starting round");

        let round = self.store.require_round(round_id).await?;
        let game = match self.store.game(game_id).await? {
            Some(game) => game,
            None => return Err(no_game_for_round(round_id).into()),
        };

        let grouped = self.players_by_team(round_id).await?;
        let seating = ordered_player_list(&grouped);
        if seating.is_empty() {
            return Err(DomainError::conflict(
                ConflictKind::NoTeamsForRound,
                format!("No teams found for round {round_id}"),
            )
            .into());
        }

        let DealResult { kitty, hands } =
            deal_hands(seating.len(), game.kitty_size, &mut rand::rng())?;

        // The kitty lives in the round's own hand.
        self.store.clear_hand(round.hand_id).await?;
        self.store
            .put_hand(Hand::with_cards(round.hand_id, kitty))
            .await?;

        // Reissue every seat's hand id so stale references cannot read the
        // new deal, then hand out the cards.
        for (player_id, cards) in seating.iter().zip(hands) {
            let mut player = self.store.require_player(*player_id).await?;
            self.store.clear_hand(player.hand_id).await?;
            player.hand_id = Uuid::new_v4();
            player.bidding = true;
            self.store
                .put_hand(Hand::with_cards(player.hand_id, cards))
                .await?;
            self.store.update_player(player).await?;
        }

        if self.store.trick_for_round(round_id).await?.is_none() {
            self.store.put_trick(Trick::new(round_id)).await?;
        }

        let opener = seating[first_bidder_index(round.round_seq, seating.len())];
        self.broadcaster
            .broadcast(
                game_id,
                ServerMessage::BidPrompt {
                    player_id: opener,
                    bid: round.bid,
                },
                None,
            )
            .await;
        self.broadcaster
            .broadcast(
                game_id,
                ServerMessage::GameStart {
                    game_id,
                    state: game.phase,
                },
                None,
            )
            .await;

        info!(
            game_id = %game_id,
            round_id = %round_id,
            round_seq = round.round_seq,
            players = seating.len(),
            "round started"
        );
        Ok(())
    }

    /// Step the game to its next phase, rolling into a fresh round on wrap.
    pub async fn advance_game(&self, game_id: Uuid) -> Result<Game, AppError> {
        let lock = self.locks.lock_for(game_id);
        let _guard = lock.lock().await;

        let mut game = self.store.require_game(game_id).await?;
        debug!(game_id = %game_id, phase = game.phase.name(), "advancing game");

        if !game.phase.wraps() {
            game.phase = game.phase.next(game.kitty_size == 0);
            self.store.update_game(game.clone()).await?;
            self.broadcaster
                .broadcast(
                    game_id,
                    ServerMessage::GameState {
                        game_id,
                        state: game.phase,
                    },
                    None,
                )
                .await;
            return Ok(game);
        }

        // Past the trick phase the game wraps into a new round; the round
        // start announces the new state itself.
        game.phase = Phase::Bid;
        self.store.update_game(game.clone()).await?;

        let relation = self
            .store
            .active_game_round(game_id)
            .await?
            .ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("Game {game_id} wrapped without an active round"),
                )
            })?;
        self.new_round_locked(game_id, relation.round_id).await?;

        Ok(game)
    }

    /// Restate the current phase over the bus and return the game.
    pub async fn report_state(&self, game_id: Uuid) -> Result<Game, AppError> {
        let lock = self.locks.lock_for(game_id);
        let _guard = lock.lock().await;

        let game = self.store.require_game(game_id).await?;
        self.broadcaster
            .broadcast(
                game_id,
                ServerMessage::GameState {
                    game_id,
                    state: game.phase,
                },
                None,
            )
            .await;
        Ok(game)
    }

    /// Retire the current round and start its successor with the same
    /// teams in the same seats.
    pub(super) async fn new_round_locked(
        &self,
        game_id: Uuid,
        retired_round_id: Uuid,
    ) -> Result<(), AppError> {
        let retired = self.store.require_round(retired_round_id).await?;
        let round_teams = self.store.round_teams(retired_round_id).await?;

        // Meld bookkeeping restarts with the new round.
        for player_id in self
            .players_by_team(retired_round_id)
            .await?
            .into_iter()
            .flatten()
        {
            let mut player = self.store.require_player(player_id).await?;
            player.meld_final = false;
            player.meld_score = 0;
            self.store.update_player(player).await?;
        }

        self.store.deactivate_game_rounds(game_id).await?;

        let round = Round::new(retired.round_seq + 1);
        self.store.insert_round(round.clone()).await?;
        self.store
            .insert_game_round(GameRound::new(game_id, round.id))
            .await?;

        for round_team in &round_teams {
            self.store
                .insert_round_team(RoundTeam::new(
                    round.id,
                    round_team.team_id,
                    round_team.team_order,
                ))
                .await?;
        }

        self.store.put_trick(Trick::new(round.id)).await?;

        info!(
            game_id = %game_id,
            retired_round_id = %retired_round_id,
            round_id = %round.id,
            round_seq = round.round_seq,
            "rolled into new round"
        );

        self.start_round_locked(game_id, round.id).await
    }
}
