use serde::Serialize;
use uuid::Uuid;

/// A partnership. Scores accumulate across rounds and may go negative
/// when bid enforcement is on.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub score: i32,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            score: 0,
        }
    }
}

/// Membership of a player on a team.
#[derive(Clone, Debug, PartialEq)]
pub struct TeamPlayer {
    pub team_id: Uuid,
    pub player_id: Uuid,
}

/// A team seated on a round. `hand_id` is the round-scoped pile of cards
/// the team has taken in tricks; `team_order` fixes the seating interleave.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundTeam {
    pub round_id: Uuid,
    pub team_id: Uuid,
    pub hand_id: Uuid,
    pub team_order: u32,
}

impl RoundTeam {
    pub fn new(round_id: Uuid, team_id: Uuid, team_order: u32) -> Self {
        Self {
            round_id,
            team_id,
            hand_id: Uuid::new_v4(),
            team_order,
        }
    }
}
