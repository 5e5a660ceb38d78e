//! Player HTTP routes, including direct hand manipulation.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::players;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreatePlayerBody {
    name: String,
}

async fn create_player(
    body: web::Json<CreatePlayerBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let player = players::create_player(app_state.store.as_ref(), &body.name).await?;
    Ok(HttpResponse::Created().json(player))
}

async fn get_player(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let player = players::get_player(app_state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(player))
}

async fn delete_player(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    players::delete_player(app_state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

async fn get_hand(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let cards = players::player_hand(app_state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(cards))
}

async fn add_card(
    path: web::Path<(Uuid, String)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (player_id, card) = path.into_inner();
    players::add_card_to_hand(app_state.store.as_ref(), player_id, &card).await?;
    Ok(HttpResponse::Ok().finish())
}

async fn remove_card(
    path: web::Path<(Uuid, String)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (player_id, card) = path.into_inner();
    players::remove_card_from_hand(app_state.store.as_ref(), player_id, &card).await?;
    Ok(HttpResponse::Ok().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/player").route(web::post().to(create_player)));
    cfg.service(
        web::resource("/player/{player_id}")
            .route(web::get().to(get_player))
            .route(web::delete().to(delete_player)),
    );
    cfg.service(web::resource("/player/{player_id}/hand").route(web::get().to(get_hand)));
    cfg.service(
        web::resource("/player/{player_id}/hand/{card}")
            .route(web::put().to(add_card))
            .route(web::delete().to(remove_card)),
    );
}
