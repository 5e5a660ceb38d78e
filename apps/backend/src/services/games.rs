//! Game record services: creation, reads, kitty updates, deletion.

use tracing::info;
use uuid::Uuid;

use crate::domain::dealing::MAX_KITTY;
use crate::entities::Game;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::infra::GameLocks;
use crate::store::Store;

fn check_kitty_size(kitty_size: u8) -> Result<(), DomainError> {
    if kitty_size > MAX_KITTY {
        return Err(DomainError::validation(
            ValidationKind::KittySize,
            format!("Kitty size must be between 0 and {MAX_KITTY}"),
        ));
    }
    Ok(())
}

/// Create a game with the requested kitty size.
pub async fn create_game(store: &dyn Store, kitty_size: u8) -> Result<Game, AppError> {
    check_kitty_size(kitty_size)?;

    let game = Game::new(kitty_size);
    store.insert_game(game.clone()).await?;
    info!(game_id = %game.id, kitty_size, "game created");
    Ok(game)
}

pub async fn list_games(store: &dyn Store) -> Result<Vec<Game>, AppError> {
    store.list_games().await.map_err(Into::into)
}

pub async fn get_game(store: &dyn Store, game_id: Uuid) -> Result<Game, AppError> {
    store.require_game(game_id).await.map_err(Into::into)
}

/// Change the kitty size; later deals pick the new value up.
pub async fn update_kitty_size(
    store: &dyn Store,
    game_id: Uuid,
    kitty_size: u8,
) -> Result<Game, AppError> {
    check_kitty_size(kitty_size)?;

    let mut game = store.require_game(game_id).await?;
    game.kitty_size = kitty_size;
    store.update_game(game.clone()).await?;
    info!(game_id = %game.id, kitty_size, "kitty size updated");
    Ok(game)
}

/// Delete a game with everything it owns, and drop its lock entry.
pub async fn delete_game(
    store: &dyn Store,
    locks: &GameLocks,
    game_id: Uuid,
) -> Result<(), AppError> {
    store.require_game(game_id).await?;
    store.delete_game(game_id).await?;
    locks.discard(game_id);
    info!(game_id = %game_id, "game deleted");
    Ok(())
}
