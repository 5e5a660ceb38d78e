//! Game phases and seating math.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Game progression phases, persisted as 0..=5 and cyclic after `Trick`.
///
/// Engine code matches on the enum, never on the stored integer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Game created; waiting for every seated player to register.
    Game,
    /// Players bid in turn order.
    Bid,
    /// Bidding settled; the winner owes a trump call.
    BidFinal,
    /// Kitty exposed to the table.
    Reveal,
    /// Players submit and finalize meld.
    Meld,
    /// Trick play until hands are empty.
    Trick,
}

impl Phase {
    pub const fn as_u8(self) -> u8 {
        match self {
            Phase::Game => 0,
            Phase::Bid => 1,
            Phase::BidFinal => 2,
            Phase::Reveal => 3,
            Phase::Meld => 4,
            Phase::Trick => 5,
        }
    }

    pub fn from_u8(value: u8) -> Result<Self, DomainError> {
        match value {
            0 => Ok(Phase::Game),
            1 => Ok(Phase::Bid),
            2 => Ok(Phase::BidFinal),
            3 => Ok(Phase::Reveal),
            4 => Ok(Phase::Meld),
            5 => Ok(Phase::Trick),
            other => Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Stored phase {other} is out of range"),
            )),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Phase::Game => "game",
            Phase::Bid => "bid",
            Phase::BidFinal => "bidfinal",
            Phase::Reveal => "reveal",
            Phase::Meld => "meld",
            Phase::Trick => "trick",
        }
    }

    /// The successor phase. Leaving `bidfinal` with an empty kitty skips
    /// `reveal`; leaving `trick` wraps to `bid` for the round the engine
    /// spawns.
    pub fn next(self, kitty_empty: bool) -> Phase {
        match self {
            Phase::Game => Phase::Bid,
            Phase::Bid => Phase::BidFinal,
            Phase::BidFinal if kitty_empty => Phase::Meld,
            Phase::BidFinal => Phase::Reveal,
            Phase::Reveal => Phase::Meld,
            Phase::Meld => Phase::Trick,
            Phase::Trick => Phase::Bid,
        }
    }

    /// True when advancing out of this phase spawns a new round.
    pub const fn wraps(self) -> bool {
        matches!(self, Phase::Trick)
    }
}

// Phase serde (wire and store format is the small integer)
impl Serialize for Phase {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for Phase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Phase::from_u8(value).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

/// Turn order for a round: flatten the teams in seating order, then take
/// the even positions followed by the odd positions. With two teams of two
/// this alternates teams, so partners sit across from each other.
pub fn ordered_player_list<T: Clone>(players_by_team: &[Vec<T>]) -> Vec<T> {
    let flat: Vec<T> = players_by_team.iter().flatten().cloned().collect();
    let mut ordered: Vec<T> = flat.iter().step_by(2).cloned().collect();
    ordered.extend(flat.iter().skip(1).step_by(2).cloned());
    ordered
}

/// The seat that opens bidding: seating rotates one step per round.
pub fn first_bidder_index(round_seq: u32, player_count: usize) -> usize {
    round_seq as usize % player_count
}

/// Index into `still_bidding` of the player after `current`, or `None`
/// when `current` is no longer in contention.
pub fn next_bidder_index<T: PartialEq>(current: &T, still_bidding: &[T]) -> Option<usize> {
    let idx = still_bidding.iter().position(|p| p == current)?;
    Some((idx + 1) % still_bidding.len())
}
