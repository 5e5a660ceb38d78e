//! Round HTTP routes: detail, seating, collected cards, kitty, start.
//!
//! The literal segments (`teams`, `start`, `kitty`, `score_meld`) are
//! registered ahead of `/{team_id}` so they are not swallowed by the
//! path parameter.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::rounds;
use crate::state::app_state::AppState;

async fn get_round(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round = rounds::get_round(app_state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(round))
}

async fn add_teams(
    path: web::Path<Uuid>,
    team_ids: web::Json<Vec<Uuid>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let seated = rounds::add_teams_to_round(
        app_state.store.as_ref(),
        path.into_inner(),
        &team_ids.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Created().json(seated))
}

async fn list_teams(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let team_ids = rounds::teams_for_round(app_state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(team_ids))
}

async fn collected_cards(
    path: web::Path<(Uuid, Uuid)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (round_id, team_id) = path.into_inner();
    let cards = rounds::collected_cards(app_state.store.as_ref(), round_id, team_id).await?;
    Ok(HttpResponse::Ok().json(cards))
}

async fn start_round(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.game_flow.start_round(path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
struct ScoreMeldQuery {
    player_id: Uuid,
    cards: String,
}

async fn score_meld(
    path: web::Path<Uuid>,
    query: web::Query<ScoreMeldQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let score = app_state
        .game_flow
        .score_meld(path.into_inner(), query.player_id, &query.cards)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "score": score })))
}

async fn get_kitty(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let cards = rounds::kitty(app_state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(cards))
}

async fn clear_kitty(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    rounds::clear_kitty(app_state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/round/{round_id}").route(web::get().to(get_round)));
    cfg.service(web::resource("/round/{round_id}/team").route(web::post().to(add_teams)));
    cfg.service(web::resource("/round/{round_id}/teams").route(web::get().to(list_teams)));
    cfg.service(web::resource("/round/{round_id}/start").route(web::post().to(start_round)));
    cfg.service(web::resource("/round/{round_id}/score_meld").route(web::get().to(score_meld)));
    cfg.service(
        web::resource("/round/{round_id}/kitty")
            .route(web::get().to(get_kitty))
            .route(web::delete().to(clear_kitty)),
    );
    cfg.service(web::resource("/round/{round_id}/{team_id}").route(web::get().to(collected_cards)));
}
