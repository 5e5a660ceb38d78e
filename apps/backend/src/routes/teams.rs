//! Team HTTP routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::services::teams;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateTeamBody {
    name: String,
}

async fn create_team(
    body: web::Json<CreateTeamBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let team = teams::create_team(app_state.store.as_ref(), &body.name).await?;
    Ok(HttpResponse::Created().json(team))
}

#[derive(Debug, Serialize)]
struct TeamResponse {
    id: Uuid,
    name: String,
    score: i32,
    player_ids: Vec<Uuid>,
}

async fn get_team(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (team, player_ids) =
        teams::team_with_players(app_state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TeamResponse {
        id: team.id,
        name: team.name,
        score: team.score,
        player_ids,
    }))
}

#[derive(Debug, Deserialize)]
struct AttachPlayerQuery {
    player_id: Uuid,
}

async fn attach_player(
    path: web::Path<Uuid>,
    query: web::Query<AttachPlayerQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    teams::add_player_to_team(app_state.store.as_ref(), path.into_inner(), query.player_id)
        .await?;
    Ok(HttpResponse::Created().finish())
}

async fn delete_team(
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    teams::delete_team(app_state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/team").route(web::post().to(create_team)));
    cfg.service(
        web::resource("/team/{team_id}")
            .route(web::get().to(get_team))
            .route(web::post().to(attach_player))
            .route(web::delete().to(delete_team)),
    );
}
