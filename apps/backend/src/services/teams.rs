//! Team record services and roster membership.

use tracing::info;
use uuid::Uuid;

use crate::entities::Team;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::store::Store;

pub async fn create_team(store: &dyn Store, name: &str) -> Result<Team, AppError> {
    let team = Team::new(name);
    store.insert_team(team.clone()).await?;
    info!(team_id = %team.id, name, "team created");
    Ok(team)
}

/// A team together with its roster, in attachment order.
pub async fn team_with_players(
    store: &dyn Store,
    team_id: Uuid,
) -> Result<(Team, Vec<Uuid>), AppError> {
    let team = store.require_team(team_id).await?;
    let players = store.team_players(team_id).await?;
    Ok((team, players))
}

pub async fn add_player_to_team(
    store: &dyn Store,
    team_id: Uuid,
    player_id: Uuid,
) -> Result<(), AppError> {
    store.require_team(team_id).await?;
    store.require_player(player_id).await?;

    if store.team_players(team_id).await?.contains(&player_id) {
        return Err(DomainError::conflict(
            ConflictKind::PlayerAlreadyOnTeam,
            format!("Player {player_id} is already on team {team_id}"),
        )
        .into());
    }

    store.insert_team_player(team_id, player_id).await?;
    info!(team_id = %team_id, player_id = %player_id, "player joined team");
    Ok(())
}

pub async fn delete_team(store: &dyn Store, team_id: Uuid) -> Result<(), AppError> {
    store.require_team(team_id).await?;
    store.delete_team(team_id).await?;
    info!(team_id = %team_id, "team deleted");
    Ok(())
}
