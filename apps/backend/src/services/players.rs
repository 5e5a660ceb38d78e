//! Player record services and direct hand access.

use tracing::info;
use uuid::Uuid;

use crate::domain::cards_types::Card;
use crate::entities::Player;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::store::Store;

pub async fn create_player(store: &dyn Store, name: &str) -> Result<Player, AppError> {
    let player = Player::new(name);
    store.insert_player(player.clone()).await?;
    info!(player_id = %player.id, name, "player created");
    Ok(player)
}

pub async fn get_player(store: &dyn Store, player_id: Uuid) -> Result<Player, AppError> {
    store.require_player(player_id).await.map_err(Into::into)
}

pub async fn delete_player(store: &dyn Store, player_id: Uuid) -> Result<(), AppError> {
    store.require_player(player_id).await?;
    store.delete_player(player_id).await?;
    info!(player_id = %player_id, "player deleted");
    Ok(())
}

pub async fn player_hand(store: &dyn Store, player_id: Uuid) -> Result<Vec<Card>, AppError> {
    let player = store.require_player(player_id).await?;
    store.hand_cards(player.hand_id).await.map_err(Into::into)
}

pub async fn add_card_to_hand(
    store: &dyn Store,
    player_id: Uuid,
    card: &str,
) -> Result<(), AppError> {
    let card: Card = card.parse()?;
    let player = store.require_player(player_id).await?;
    store.append_card(player.hand_id, card).await?;
    Ok(())
}

pub async fn remove_card_from_hand(
    store: &dyn Store,
    player_id: Uuid,
    card: &str,
) -> Result<(), AppError> {
    let card: Card = card.parse()?;
    let player = store.require_player(player_id).await?;
    if !store.remove_card(player.hand_id, card).await? {
        return Err(DomainError::not_found(
            NotFoundKind::Hand,
            format!("Card {card} not found in the hand of player {player_id}"),
        )
        .into());
    }
    Ok(())
}
