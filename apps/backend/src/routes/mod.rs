use actix_web::web;

pub mod games;
pub mod health;
pub mod play;
pub mod players;
pub mod realtime;
pub mod rounds;
pub mod teams;

/// Wire every route group. `main.rs` and the HTTP tests both go through
/// this so they serve the same surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(games::configure_routes)
        .configure(rounds::configure_routes)
        .configure(teams::configure_routes)
        .configure(players::configure_routes)
        .configure(play::configure_routes)
        .configure(realtime::configure_routes);
}
