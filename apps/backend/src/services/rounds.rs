//! Round-scoped reads: round detail, team seating, collected cards, and
//! the kitty.

use tracing::info;
use uuid::Uuid;

use crate::domain::cards_types::Card;
use crate::entities::{Round, RoundTeam};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::store::Store;

pub async fn get_round(store: &dyn Store, round_id: Uuid) -> Result<Round, AppError> {
    store.require_round(round_id).await.map_err(Into::into)
}

/// Every round of a game, oldest first.
pub async fn rounds_for_game(store: &dyn Store, game_id: Uuid) -> Result<Vec<Round>, AppError> {
    store.require_game(game_id).await?;
    store.rounds_for_game(game_id).await.map_err(Into::into)
}

/// Seat teams on a round. Seats are handed out in arrival order, after
/// any teams already on the round.
pub async fn add_teams_to_round(
    store: &dyn Store,
    round_id: Uuid,
    team_ids: &[Uuid],
) -> Result<Vec<RoundTeam>, AppError> {
    store.require_round(round_id).await?;
    let existing = store.round_teams(round_id).await?;

    for (position, team_id) in team_ids.iter().enumerate() {
        store.require_team(*team_id).await?;
        let duplicate = existing.iter().any(|rt| rt.team_id == *team_id)
            || team_ids[..position].contains(team_id);
        if duplicate {
            return Err(DomainError::conflict(
                ConflictKind::TeamAlreadyOnRound,
                format!("Team {team_id} is already on round {round_id}"),
            )
            .into());
        }
    }

    let mut next_order = existing.len() as u32;
    let mut created = Vec::with_capacity(team_ids.len());
    for team_id in team_ids {
        let round_team = RoundTeam::new(round_id, *team_id, next_order);
        store.insert_round_team(round_team.clone()).await?;
        created.push(round_team);
        next_order += 1;
    }

    info!(round_id = %round_id, teams = created.len(), "teams seated on round");
    Ok(created)
}

/// Team ids seated on a round, in seating order.
pub async fn teams_for_round(store: &dyn Store, round_id: Uuid) -> Result<Vec<Uuid>, AppError> {
    store.require_round(round_id).await?;
    let round_teams = store.round_teams(round_id).await?;
    Ok(round_teams.into_iter().map(|rt| rt.team_id).collect())
}

/// The cards a team has collected from won tricks this round.
pub async fn collected_cards(
    store: &dyn Store,
    round_id: Uuid,
    team_id: Uuid,
) -> Result<Vec<Card>, AppError> {
    store.require_round(round_id).await?;
    store.require_team(team_id).await?;

    let round_team = store
        .round_teams(round_id)
        .await?
        .into_iter()
        .find(|rt| rt.team_id == team_id)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Hand,
                format!("No collected hand for team {team_id} in round {round_id}"),
            )
        })?;
    store
        .hand_cards(round_team.hand_id)
        .await
        .map_err(Into::into)
}

pub async fn kitty(store: &dyn Store, round_id: Uuid) -> Result<Vec<Card>, AppError> {
    let round = store.require_round(round_id).await?;
    store.hand_cards(round.hand_id).await.map_err(Into::into)
}

/// Empty the kitty hand once its reveal is over.
pub async fn clear_kitty(store: &dyn Store, round_id: Uuid) -> Result<(), AppError> {
    let round = store.require_round(round_id).await?;
    store.clear_hand(round.hand_id).await?;
    info!(round_id = %round_id, "kitty cleared");
    Ok(())
}
