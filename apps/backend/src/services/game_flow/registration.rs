use tracing::{debug, info};
use uuid::Uuid;

use super::GameFlowService;
use crate::domain::state::{first_bidder_index, Phase};
use crate::entities::OPENING_BID;
use crate::error::AppError;
use crate::ws::protocol::ServerMessage;

impl GameFlowService {
    /// Runs after a socket registers for a game: announce the player
    /// list, start the game once the whole table has joined, and replay
    /// current state to the registrant.
    pub async fn client_registered(
        &self,
        game_id: Uuid,
        player_id: Uuid,
    ) -> Result<(), AppError> {
        let lock = self.locks.lock_for(game_id);
        let _guard = lock.lock().await;

        debug!(game_id = %game_id, player_id = %player_id, "client registered");

        let game = self.store.require_game(game_id).await?;
        let active = self.store.active_game_round(game_id).await?;

        let (round_id, seating) = match active {
            Some(relation) => (
                Some(relation.round_id),
                self.seating(relation.round_id).await?,
            ),
            None => (None, Vec::new()),
        };

        let joined = self.broadcaster.joined_players(game_id);
        self.broadcaster
            .broadcast(
                game_id,
                ServerMessage::NotificationPlayerList {
                    game_id,
                    player_ids: joined.clone(),
                    player_order: seating.clone(),
                },
                None,
            )
            .await;

        if game.phase == Phase::Game && !seating.is_empty() && joined.len() == seating.len() {
            info!(
                game_id = %game_id,
                players = seating.len(),
                "table is full, starting the game"
            );

            let mut game = game;
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

            if let Some(round_id) = round_id {
                self.start_round_locked(game_id, round_id).await?;
            }
        }

        self.resync(game_id, player_id).await
    }

    /// Replay state to one registrant so a refreshed page catches up.
    async fn resync(&self, game_id: Uuid, player_id: Uuid) -> Result<(), AppError> {
        let game = self.store.require_game(game_id).await?;

        self.broadcaster
            .send_to(
                game_id,
                player_id,
                ServerMessage::GameState {
                    game_id,
                    state: game.phase,
                },
            )
            .await;

        let Some(relation) = self.store.active_game_round(game_id).await? else {
            return Ok(());
        };
        let round = self.store.require_round(relation.round_id).await?;

        for round_team in self.store.round_teams(round.id).await? {
            let team = self.store.require_team(round_team.team_id).await?;
            self.broadcaster
                .send_to(
                    game_id,
                    player_id,
                    ServerMessage::TeamScore {
                        team_id: team.id,
                        score: team.score,
                        meld_score: 0,
                    },
                )
                .await;
        }

        match game.phase {
            // A prompt is replayed only while the auction has not moved
            // off the opening bid; later reconnects wait for the next
            // live prompt.
            Phase::Bid if round.bid == OPENING_BID => {
                let seating = self.seating(round.id).await?;
                if !seating.is_empty() {
                    let opener = seating[first_bidder_index(round.round_seq, seating.len())];
                    self.broadcaster
                        .send_to(
                            game_id,
                            player_id,
                            ServerMessage::BidPrompt {
                                player_id: opener,
                                bid: round.bid,
                            },
                        )
                        .await;
                }
            }
            Phase::BidFinal | Phase::Reveal => {
                if let Some(winner) = round.bid_winner {
                    self.broadcaster
                        .send_to(
                            game_id,
                            player_id,
                            ServerMessage::BidWinner {
                                player_id: winner,
                                bid: round.bid,
                            },
                        )
                        .await;
                }
            }
            Phase::Meld | Phase::Trick => {
                if let Some(trump) = round.trump {
                    self.broadcaster
                        .send_to(game_id, player_id, ServerMessage::TrumpSelected { trump })
                        .await;
                }
            }
            Phase::Game | Phase::Bid => {}
        }

        Ok(())
    }
}
