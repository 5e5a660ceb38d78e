//! Game flow engine - bridges the pure domain logic with the store and
//! fans results out through the broadcaster.
//!
//! Public operations resolve the owning game, hold its lock across the
//! whole mutation and broadcast, and delegate to `*_locked` internals.

mod player_actions;
mod registration;
mod round_lifecycle;

#[cfg(test)]
mod tests_engine;

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::state::{ordered_player_list, Phase};
use crate::entities::Game;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::infra::GameLocks;
use crate::store::Store;
use crate::ws::hub::Broadcaster;

pub struct GameFlowService {
    store: Arc<dyn Store>,
    broadcaster: Arc<dyn Broadcaster>,
    locks: Arc<GameLocks>,
    bid_enforcement: bool,
}

impl GameFlowService {
    pub fn new(
        store: Arc<dyn Store>,
        broadcaster: Arc<dyn Broadcaster>,
        locks: Arc<GameLocks>,
    ) -> Self {
        Self {
            store,
            broadcaster,
            locks,
            bid_enforcement: false,
        }
    }

    /// When enabled, a bid-winning team that comes up short of its bid
    /// scores `-bid` for the round in place of its meld and trick points.
    pub fn with_bid_enforcement(mut self, enabled: bool) -> Self {
        self.bid_enforcement = enabled;
        self
    }

    /// The per-game lock map, for callers that must coordinate with
    /// engine operations.
    pub fn locks(&self) -> &GameLocks {
        &self.locks
    }

    /// The owning game of a round, through the game-round relation.
    async fn game_id_for_round(&self, round_id: Uuid) -> Result<Uuid, DomainError> {
        match self.store.game_round_for_round(round_id).await? {
            Some(relation) => Ok(relation.game_id),
            None => Err(no_game_for_round(round_id)),
        }
    }

    /// Seated players of a round grouped by team, ascending `team_order`.
    async fn players_by_team(&self, round_id: Uuid) -> Result<Vec<Vec<Uuid>>, DomainError> {
        let round_teams = self.store.round_teams(round_id).await?;
        let mut grouped = Vec::with_capacity(round_teams.len());
        for round_team in &round_teams {
            grouped.push(self.store.team_players(round_team.team_id).await?);
        }
        Ok(grouped)
    }

    /// Turn order for a round, interleaving the teams.
    async fn seating(&self, round_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        Ok(ordered_player_list(&self.players_by_team(round_id).await?))
    }
}

fn no_game_for_round(round_id: Uuid) -> DomainError {
    DomainError::conflict(
        ConflictKind::Other("NO_GAME_FOR_ROUND".into()),
        format!("No game found for round {round_id}"),
    )
}

fn require_phase(game: &Game, expected: Phase) -> Result<(), DomainError> {
    if game.phase != expected {
        return Err(DomainError::conflict(
            ConflictKind::PhaseMismatch,
            format!(
                "Game {} is in the {} phase, not {}",
                game.id,
                game.phase.name(),
                expected.name()
            ),
        ));
    }
    Ok(())
}
