//! Shared helpers for HTTP-level tests.
#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App, Error};
use serde_json::Value;

use pinochle_backend::middleware::request_trace::RequestTrace;
use pinochle_backend::routes;
use pinochle_backend::state::app_state::AppState;

#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}

/// Build a test service running the full route surface over fresh
/// in-memory state. The state is returned so tests can inspect the
/// store behind the API.
pub async fn spawn_app() -> (
    AppState,
    impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
) {
    let state = AppState::in_memory();
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;
    (state, app)
}

/// Call the service and parse the JSON body, asserting the status
/// first. Returns `Value::Null` for empty bodies.
pub async fn call_json<S>(app: &S, req: Request, expected: StatusCode) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        expected,
        "unexpected status, body: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Call the service and assert the stable Problem Details contract.
pub async fn expect_problem<S>(
    app: &S,
    req: Request,
    expected_status: StatusCode,
    expected_code: &str,
    detail_contains: Option<&str>,
) where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    backend_test_support::problem_details::assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        expected_status,
        detail_contains,
    );
}

/// Create a game over the API and return its id as a string.
pub async fn create_game<S>(app: &S, kitty_size: u8) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri(&format!("/game?kitty_size={kitty_size}"))
        .to_request();
    let body = call_json(app, req, StatusCode::CREATED).await;
    body["id"].as_str().expect("game id").to_string()
}

/// Create a player over the API and return its id as a string.
pub async fn create_player<S>(app: &S, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/player")
        .set_json(serde_json::json!({ "name": name }))
        .to_request();
    let body = call_json(app, req, StatusCode::CREATED).await;
    body["id"].as_str().expect("player id").to_string()
}

/// Create a team over the API and return its id as a string.
pub async fn create_team<S>(app: &S, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/team")
        .set_json(serde_json::json!({ "name": name }))
        .to_request();
    let body = call_json(app, req, StatusCode::CREATED).await;
    body["id"].as_str().expect("team id").to_string()
}

/// A full table over the API: a game, a round, two teams of two, the
/// teams attached to the round. Players are listed team by team.
pub struct ApiTable {
    pub game_id: String,
    pub round_id: String,
    pub team_ids: [String; 2],
    pub player_ids: [String; 4],
}

impl ApiTable {
    /// Seating order the engine deals and bids in (teams interleaved).
    pub fn seating(&self) -> [&str; 4] {
        [
            &self.player_ids[0],
            &self.player_ids[2],
            &self.player_ids[1],
            &self.player_ids[3],
        ]
    }
}

/// Assemble an [`ApiTable`] through the public API only.
pub async fn setup_table<S>(app: &S, kitty_size: u8) -> ApiTable
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let game_id = create_game(app, kitty_size).await;

    let req = test::TestRequest::post()
        .uri(&format!("/game/{game_id}/round"))
        .to_request();
    let round = call_json(app, req, StatusCode::CREATED).await;
    let round_id = round["id"].as_str().expect("round id").to_string();

    let team_ids = [
        create_team(app, "north_south").await,
        create_team(app, "east_west").await,
    ];
    let player_ids = [
        create_player(app, "ann").await,
        create_player(app, "ben").await,
        create_player(app, "cam").await,
        create_player(app, "dee").await,
    ];

    for (team, players) in team_ids.iter().zip([&player_ids[..2], &player_ids[2..]]) {
        for player in players {
            let req = test::TestRequest::post()
                .uri(&format!("/team/{team}?player_id={player}"))
                .to_request();
            call_json(app, req, StatusCode::CREATED).await;
        }
    }

    let req = test::TestRequest::post()
        .uri(&format!("/round/{round_id}/team"))
        .set_json(serde_json::json!([team_ids[0], team_ids[1]]))
        .to_request();
    call_json(app, req, StatusCode::CREATED).await;

    ApiTable {
        game_id,
        round_id,
        team_ids,
        player_ids,
    }
}

/// Deal the table's round and step the game into the bidding phase.
pub async fn start_bidding<S>(app: &S, table: &ApiTable)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri(&format!("/round/{}/start", table.round_id))
        .to_request();
    call_json(app, req, StatusCode::OK).await;

    let req = test::TestRequest::put()
        .uri(&format!("/game/{}?state=true", table.game_id))
        .to_request();
    let game = call_json(app, req, StatusCode::OK).await;
    assert_eq!(game["state"], 1, "game should be in the bidding phase");
}

/// Fetch a player's hand as wire-format card names.
pub async fn hand_of<S>(app: &S, player_id: &str) -> Vec<String>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::get()
        .uri(&format!("/player/{player_id}/hand"))
        .to_request();
    let body = call_json(app, req, StatusCode::OK).await;
    body.as_array()
        .expect("hand is an array")
        .iter()
        .map(|card| card.as_str().expect("card is a string").to_string())
        .collect()
}

/// Submit a bid for a player, expecting success, and return the round.
pub async fn submit_bid<S>(app: &S, round_id: &str, player_id: &str, bid: i32) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::put()
        .uri(&format!(
            "/play/{round_id}/submit_bid?player_id={player_id}&bid={bid}"
        ))
        .to_request();
    call_json(app, req, StatusCode::OK).await
}
