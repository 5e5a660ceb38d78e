//! Service layer: record CRUD plus the game flow engine.

pub mod game_flow;
pub mod games;
pub mod players;
pub mod rounds;
pub mod teams;

pub use game_flow::GameFlowService;
