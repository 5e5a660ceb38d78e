use serde::Serialize;
use uuid::Uuid;

/// A seated player. `hand_id` is reissued at every round start so stale
/// hand references cannot leak across rounds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub hand_id: Uuid,
    pub bidding: bool,
    pub meld_score: i32,
    pub meld_final: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            hand_id: Uuid::new_v4(),
            bidding: false,
            meld_score: 0,
            meld_final: false,
        }
    }
}
