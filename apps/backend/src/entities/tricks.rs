use uuid::Uuid;

use crate::domain::cards_types::Card;

/// One card played into a trick, in play order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrickPlay {
    pub player_id: Uuid,
    pub card: Card,
}

/// The in-progress trick of a round. The trick hand holds the played
/// cards; `plays` records who played each one so the winner can be
/// attributed by the engine rather than left to clients.
#[derive(Clone, Debug, PartialEq)]
pub struct Trick {
    pub id: Uuid,
    pub round_id: Uuid,
    pub hand_id: Uuid,
    pub trick_starter: Option<Uuid>,
    pub winner: Option<Uuid>,
    pub plays: Vec<TrickPlay>,
}

impl Trick {
    pub fn new(round_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            round_id,
            hand_id: Uuid::new_v4(),
            trick_starter: None,
            winner: None,
            plays: Vec::new(),
        }
    }

    pub fn with_starter(round_id: Uuid, starter: Uuid) -> Self {
        let mut trick = Self::new(round_id);
        trick.trick_starter = Some(starter);
        trick
    }
}
