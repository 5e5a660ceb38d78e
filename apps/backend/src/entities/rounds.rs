use serde::Serialize;
use uuid::Uuid;

use crate::domain::cards_types::Suit;

/// Every auction opens here; the first raise must beat it.
pub const OPENING_BID: i32 = 20;

/// Submitting this bid folds the player out of the auction.
pub const PASS_BID: i32 = -1;

/// One hand of play within a game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Round {
    pub id: Uuid,
    pub round_seq: u32,
    /// The kitty hand. Survives the round; its cards move to the bid winner.
    pub hand_id: Uuid,
    pub bid: i32,
    pub bid_winner: Option<Uuid>,
    pub trump: Option<Suit>,
}

impl Round {
    pub fn new(round_seq: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            round_seq,
            hand_id: Uuid::new_v4(),
            bid: OPENING_BID,
            bid_winner: None,
            trump: None,
        }
    }
}

/// Ties a round to its owning game. Exactly one relation per game is
/// active; starting a new round flips the previous one inactive.
#[derive(Clone, Debug, PartialEq)]
pub struct GameRound {
    pub game_id: Uuid,
    pub round_id: Uuid,
    pub active: bool,
}

impl GameRound {
    pub fn new(game_id: Uuid, round_id: Uuid) -> Self {
        Self {
            game_id,
            round_id,
            active: true,
        }
    }
}
