//! Game HTTP routes: lifecycle, phase stepping, and round creation.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::{games, rounds};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateGameQuery {
    kitty_size: Option<u8>,
}

async fn create_game(
    query: web::Query<CreateGameQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = games::create_game(
        app_state.store.as_ref(),
        query.kitty_size.unwrap_or(0),
    )
    .await?;
    Ok(HttpResponse::Created().json(game))
}

async fn list_games(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let games = games::list_games(app_state.store.as_ref()).await?;
    Ok(HttpResponse::Ok().json(games))
}

async fn get_game(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = games::get_game(app_state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(game))
}

#[derive(Debug, Deserialize)]
struct UpdateGameQuery {
    state: Option<bool>,
    kitty_size: Option<u8>,
}

/// `?state=true` steps the phase, `?kitty_size=N` resizes the kitty, and
/// a bare PUT restates the current phase over the bus.
async fn update_game(
    path: web::Path<Uuid>,
    query: web::Query<UpdateGameQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();

    let game = if query.state.unwrap_or(false) {
        app_state.game_flow.advance_game(game_id).await?
    } else if let Some(kitty_size) = query.kitty_size {
        games::update_kitty_size(app_state.store.as_ref(), game_id, kitty_size).await?
    } else {
        app_state.game_flow.report_state(game_id).await?
    };

    Ok(HttpResponse::Ok().json(game))
}

async fn delete_game(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    games::delete_game(
        app_state.store.as_ref(),
        app_state.game_flow.locks(),
        path.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().finish())
}

async fn create_round(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round = app_state.game_flow.create_round(path.into_inner()).await?;
    Ok(HttpResponse::Created().json(round))
}

async fn list_rounds(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let rounds = rounds::rounds_for_game(app_state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(rounds))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/game")
            .route(web::post().to(create_game))
            .route(web::get().to(list_games)),
    );
    cfg.service(
        web::resource("/game/{game_id}")
            .route(web::get().to(get_game))
            .route(web::put().to(update_game))
            .route(web::delete().to(delete_game)),
    );
    cfg.service(
        web::resource("/game/{game_id}/round")
            .route(web::post().to(create_round))
            .route(web::get().to(list_rounds)),
    );
}
