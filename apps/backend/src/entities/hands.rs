use uuid::Uuid;

use crate::domain::cards_types::Card;

/// An ordered pile of cards addressed only by id. The same shape backs
/// all four hand roles: player hands, the kitty, the trick pile, and a
/// team's collected cards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hand {
    pub id: Uuid,
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            cards: Vec::new(),
        }
    }

    pub fn with_cards(id: Uuid, cards: Vec<Card>) -> Self {
        Self { id, cards }
    }
}
