//! Play HTTP routes: the in-round actions players drive the game with.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct SubmitBidQuery {
    player_id: Uuid,
    bid: i32,
}

async fn submit_bid(
    path: web::Path<Uuid>,
    query: web::Query<SubmitBidQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round = app_state
        .game_flow
        .submit_bid(path.into_inner(), query.player_id, query.bid)
        .await?;
    Ok(HttpResponse::Ok().json(round))
}

#[derive(Debug, Deserialize)]
struct SetTrumpQuery {
    player_id: Uuid,
    trump: String,
}

async fn set_trump(
    path: web::Path<Uuid>,
    query: web::Query<SetTrumpQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round = app_state
        .game_flow
        .set_trump(path.into_inner(), query.player_id, &query.trump)
        .await?;
    Ok(HttpResponse::Ok().json(round))
}

#[derive(Debug, Deserialize)]
struct PlayerQuery {
    player_id: Uuid,
}

async fn finalize_meld(
    path: web::Path<Uuid>,
    query: web::Query<PlayerQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state
        .game_flow
        .finalize_meld(path.into_inner(), query.player_id)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
struct PlayCardQuery {
    player_id: Uuid,
    card: String,
}

async fn play_card(
    path: web::Path<Uuid>,
    query: web::Query<PlayCardQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state
        .game_flow
        .play_card(path.into_inner(), query.player_id, &query.card)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

async fn next_trick(
    path: web::Path<Uuid>,
    query: web::Query<PlayerQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state
        .game_flow
        .next_trick(path.into_inner(), query.player_id)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/play/{round_id}/submit_bid").route(web::put().to(submit_bid)));
    cfg.service(web::resource("/play/{round_id}/set_trump").route(web::put().to(set_trump)));
    cfg.service(
        web::resource("/play/{round_id}/finalize_meld").route(web::put().to(finalize_meld)),
    );
    cfg.service(web::resource("/play/{round_id}/play_card").route(web::put().to(play_card)));
    cfg.service(web::resource("/play/{round_id}/next_trick").route(web::put().to(next_trick)));
}
