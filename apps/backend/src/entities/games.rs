use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::state::Phase;

/// Top-level container for rounds, teams, and players.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Game {
    pub id: Uuid,
    pub kitty_size: u8,
    /// Current phase, persisted as the integer the wire uses.
    #[serde(rename = "state")]
    pub phase: Phase,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Game {
    pub fn new(kitty_size: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            kitty_size,
            phase: Phase::Game,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
