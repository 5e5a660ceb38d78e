//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod deck;
pub mod scoring;
pub mod state;

#[cfg(test)]
mod tests_dealing;
#[cfg(test)]
mod tests_props_tricks;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_state;

// Re-exports for ergonomics
pub use cards_logic::{card_beats, winning_index};
pub use cards_parsing::{card_list_to_string, parse_card_list, try_parse_cards};
pub use cards_types::{Card, CardValue, Suit};
pub use dealing::{deal_hands, DealResult};
pub use deck::{build_double_deck, build_single_set, Deck, RankTable, TRUMP_VALUE};
pub use scoring::{score_meld, score_tricks};
pub use state::Phase;
