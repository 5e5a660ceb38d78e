//! Narrow persistence contract for game records.
//!
//! The engine only ever needs lookup by id, list by parent, insert, a
//! whole-record update, and cascade delete, so that is all the trait
//! exposes. Records are small; updates replace the stored record. Any
//! backend that honors these signatures can sit behind the engine; the
//! in-memory store is the one shipped here.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cards_types::Card;
use crate::entities::{Game, GameRound, Hand, Player, Round, RoundTeam, Team, Trick};
use crate::errors::domain::{DomainError, NotFoundKind};

#[async_trait]
pub trait Store: Send + Sync {
    // Games
    async fn insert_game(&self, game: Game) -> Result<(), DomainError>;
    async fn game(&self, game_id: Uuid) -> Result<Option<Game>, DomainError>;
    async fn list_games(&self) -> Result<Vec<Game>, DomainError>;
    async fn update_game(&self, game: Game) -> Result<(), DomainError>;
    /// Removes the game with its rounds, relations, tricks, and the hands
    /// owned by those records. Players and teams are independent entities
    /// and survive.
    async fn delete_game(&self, game_id: Uuid) -> Result<(), DomainError>;

    // Rounds and the game-round relation
    async fn insert_round(&self, round: Round) -> Result<(), DomainError>;
    async fn round(&self, round_id: Uuid) -> Result<Option<Round>, DomainError>;
    async fn update_round(&self, round: Round) -> Result<(), DomainError>;
    /// Rounds linked to a game, ascending by `round_seq`.
    async fn rounds_for_game(&self, game_id: Uuid) -> Result<Vec<Round>, DomainError>;
    async fn insert_game_round(&self, relation: GameRound) -> Result<(), DomainError>;
    async fn game_round_for_round(&self, round_id: Uuid)
        -> Result<Option<GameRound>, DomainError>;
    /// The relation of the game's current round, if any round is active.
    async fn active_game_round(&self, game_id: Uuid) -> Result<Option<GameRound>, DomainError>;
    /// Flips every relation of the game inactive, ahead of linking a new
    /// active round.
    async fn deactivate_game_rounds(&self, game_id: Uuid) -> Result<(), DomainError>;

    // Teams and membership
    async fn insert_team(&self, team: Team) -> Result<(), DomainError>;
    async fn team(&self, team_id: Uuid) -> Result<Option<Team>, DomainError>;
    async fn update_team(&self, team: Team) -> Result<(), DomainError>;
    async fn delete_team(&self, team_id: Uuid) -> Result<(), DomainError>;
    async fn insert_team_player(&self, team_id: Uuid, player_id: Uuid)
        -> Result<(), DomainError>;
    /// Player ids on a team, in the order they were attached.
    async fn team_players(&self, team_id: Uuid) -> Result<Vec<Uuid>, DomainError>;

    // Round-team seating
    async fn insert_round_team(&self, round_team: RoundTeam) -> Result<(), DomainError>;
    /// Teams seated on a round, ascending by `team_order`.
    async fn round_teams(&self, round_id: Uuid) -> Result<Vec<RoundTeam>, DomainError>;

    // Players
    async fn insert_player(&self, player: Player) -> Result<(), DomainError>;
    async fn player(&self, player_id: Uuid) -> Result<Option<Player>, DomainError>;
    async fn update_player(&self, player: Player) -> Result<(), DomainError>;
    async fn delete_player(&self, player_id: Uuid) -> Result<(), DomainError>;

    // Hands
    /// Cards of a hand in stored order; an unknown hand reads as empty.
    async fn hand_cards(&self, hand_id: Uuid) -> Result<Vec<Card>, DomainError>;
    async fn put_hand(&self, hand: Hand) -> Result<(), DomainError>;
    async fn append_card(&self, hand_id: Uuid, card: Card) -> Result<(), DomainError>;
    /// Removes one copy of the card. `false` when the hand held none.
    async fn remove_card(&self, hand_id: Uuid, card: Card) -> Result<bool, DomainError>;
    async fn clear_hand(&self, hand_id: Uuid) -> Result<(), DomainError>;

    // Tricks
    /// Inserts or replaces the in-progress trick of the round.
    async fn put_trick(&self, trick: Trick) -> Result<(), DomainError>;
    async fn trick_for_round(&self, round_id: Uuid) -> Result<Option<Trick>, DomainError>;

    // Required-lookup helpers
    async fn require_game(&self, game_id: Uuid) -> Result<Game, DomainError> {
        self.game(game_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
        })
    }

    async fn require_round(&self, round_id: Uuid) -> Result<Round, DomainError> {
        self.round(round_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
        })
    }

    async fn require_team(&self, team_id: Uuid) -> Result<Team, DomainError> {
        self.team(team_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Team, format!("Team {team_id} not found"))
        })
    }

    async fn require_player(&self, player_id: Uuid) -> Result<Player, DomainError> {
        self.player(player_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
        })
    }

    async fn require_trick(&self, round_id: Uuid) -> Result<Trick, DomainError> {
        self.trick_for_round(round_id).await?.ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Trick,
                format!("Trick could not be found for round {round_id}"),
            )
        })
    }
}

// Re-exports for ergonomics
pub use memory::MemoryStore;
