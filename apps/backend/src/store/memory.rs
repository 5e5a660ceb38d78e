//! In-memory store backed by sharded concurrent maps.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::cards_types::Card;
use crate::entities::{Game, GameRound, Hand, Player, Round, RoundTeam, Team, Trick};
use crate::errors::domain::DomainError;
use crate::store::Store;

/// All tables of the game in process memory. List order guarantees come
/// from per-key `Vec`s (hands, seating, membership) rather than map
/// iteration order, which is unspecified.
#[derive(Default)]
pub struct MemoryStore {
    games: DashMap<Uuid, Game>,
    rounds: DashMap<Uuid, Round>,
    /// Keyed by round id; a round belongs to exactly one game.
    game_rounds: DashMap<Uuid, GameRound>,
    teams: DashMap<Uuid, Team>,
    /// Team id to player ids, in attach order.
    team_players: DashMap<Uuid, Vec<Uuid>>,
    /// Round id to seated teams, kept sorted by `team_order`.
    round_teams: DashMap<Uuid, Vec<RoundTeam>>,
    players: DashMap<Uuid, Player>,
    hands: DashMap<Uuid, Vec<Card>>,
    /// Round id to its in-progress trick.
    tricks: DashMap<Uuid, Trick>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_game(&self, game: Game) -> Result<(), DomainError> {
        self.games.insert(game.id, game);
        Ok(())
    }

    async fn game(&self, game_id: Uuid) -> Result<Option<Game>, DomainError> {
        Ok(self.games.get(&game_id).map(|entry| entry.clone()))
    }

    async fn list_games(&self) -> Result<Vec<Game>, DomainError> {
        let mut games: Vec<Game> = self.games.iter().map(|entry| entry.clone()).collect();
        games.sort_by_key(|game| game.created_at);
        Ok(games)
    }

    async fn update_game(&self, game: Game) -> Result<(), DomainError> {
        self.games.insert(game.id, game);
        Ok(())
    }

    async fn delete_game(&self, game_id: Uuid) -> Result<(), DomainError> {
        self.games.remove(&game_id);

        let round_ids: Vec<Uuid> = self
            .game_rounds
            .iter()
            .filter(|entry| entry.value().game_id == game_id)
            .map(|entry| entry.value().round_id)
            .collect();

        for round_id in round_ids {
            self.game_rounds.remove(&round_id);
            if let Some((_, round)) = self.rounds.remove(&round_id) {
                self.hands.remove(&round.hand_id);
            }
            if let Some((_, trick)) = self.tricks.remove(&round_id) {
                self.hands.remove(&trick.hand_id);
            }
            if let Some((_, seated)) = self.round_teams.remove(&round_id) {
                for round_team in seated {
                    self.hands.remove(&round_team.hand_id);
                }
            }
        }
        Ok(())
    }

    async fn insert_round(&self, round: Round) -> Result<(), DomainError> {
        self.rounds.insert(round.id, round);
        Ok(())
    }

    async fn round(&self, round_id: Uuid) -> Result<Option<Round>, DomainError> {
        Ok(self.rounds.get(&round_id).map(|entry| entry.clone()))
    }

    async fn update_round(&self, round: Round) -> Result<(), DomainError> {
        self.rounds.insert(round.id, round);
        Ok(())
    }

    async fn rounds_for_game(&self, game_id: Uuid) -> Result<Vec<Round>, DomainError> {
        let round_ids: Vec<Uuid> = self
            .game_rounds
            .iter()
            .filter(|entry| entry.value().game_id == game_id)
            .map(|entry| entry.value().round_id)
            .collect();

        let mut rounds: Vec<Round> = round_ids
            .into_iter()
            .filter_map(|round_id| self.rounds.get(&round_id).map(|entry| entry.clone()))
            .collect();
        rounds.sort_by_key(|round| round.round_seq);
        Ok(rounds)
    }

    async fn insert_game_round(&self, relation: GameRound) -> Result<(), DomainError> {
        self.game_rounds.insert(relation.round_id, relation);
        Ok(())
    }

    async fn game_round_for_round(
        &self,
        round_id: Uuid,
    ) -> Result<Option<GameRound>, DomainError> {
        Ok(self.game_rounds.get(&round_id).map(|entry| entry.clone()))
    }

    async fn active_game_round(&self, game_id: Uuid) -> Result<Option<GameRound>, DomainError> {
        Ok(self
            .game_rounds
            .iter()
            .find(|entry| entry.value().game_id == game_id && entry.value().active)
            .map(|entry| entry.value().clone()))
    }

    async fn deactivate_game_rounds(&self, game_id: Uuid) -> Result<(), DomainError> {
        for mut entry in self.game_rounds.iter_mut() {
            if entry.value().game_id == game_id {
                entry.value_mut().active = false;
            }
        }
        Ok(())
    }

    async fn insert_team(&self, team: Team) -> Result<(), DomainError> {
        self.teams.insert(team.id, team);
        Ok(())
    }

    async fn team(&self, team_id: Uuid) -> Result<Option<Team>, DomainError> {
        Ok(self.teams.get(&team_id).map(|entry| entry.clone()))
    }

    async fn update_team(&self, team: Team) -> Result<(), DomainError> {
        self.teams.insert(team.id, team);
        Ok(())
    }

    async fn delete_team(&self, team_id: Uuid) -> Result<(), DomainError> {
        self.teams.remove(&team_id);
        self.team_players.remove(&team_id);
        Ok(())
    }

    async fn insert_team_player(
        &self,
        team_id: Uuid,
        player_id: Uuid,
    ) -> Result<(), DomainError> {
        self.team_players.entry(team_id).or_default().push(player_id);
        Ok(())
    }

    async fn team_players(&self, team_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        Ok(self
            .team_players
            .get(&team_id)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }

    async fn insert_round_team(&self, round_team: RoundTeam) -> Result<(), DomainError> {
        let mut seated = self.round_teams.entry(round_team.round_id).or_default();
        seated.push(round_team);
        seated.sort_by_key(|entry| entry.team_order);
        Ok(())
    }

    async fn round_teams(&self, round_id: Uuid) -> Result<Vec<RoundTeam>, DomainError> {
        Ok(self
            .round_teams
            .get(&round_id)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }

    async fn insert_player(&self, player: Player) -> Result<(), DomainError> {
        self.players.insert(player.id, player);
        Ok(())
    }

    async fn player(&self, player_id: Uuid) -> Result<Option<Player>, DomainError> {
        Ok(self.players.get(&player_id).map(|entry| entry.clone()))
    }

    async fn update_player(&self, player: Player) -> Result<(), DomainError> {
        self.players.insert(player.id, player);
        Ok(())
    }

    async fn delete_player(&self, player_id: Uuid) -> Result<(), DomainError> {
        if let Some((_, player)) = self.players.remove(&player_id) {
            self.hands.remove(&player.hand_id);
        }
        for mut entry in self.team_players.iter_mut() {
            entry.value_mut().retain(|member| *member != player_id);
        }
        Ok(())
    }

    async fn hand_cards(&self, hand_id: Uuid) -> Result<Vec<Card>, DomainError> {
        Ok(self
            .hands
            .get(&hand_id)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }

    async fn put_hand(&self, hand: Hand) -> Result<(), DomainError> {
        self.hands.insert(hand.id, hand.cards);
        Ok(())
    }

    async fn append_card(&self, hand_id: Uuid, card: Card) -> Result<(), DomainError> {
        self.hands.entry(hand_id).or_default().push(card);
        Ok(())
    }

    async fn remove_card(&self, hand_id: Uuid, card: Card) -> Result<bool, DomainError> {
        let Some(mut cards) = self.hands.get_mut(&hand_id) else {
            return Ok(false);
        };
        match cards.iter().position(|held| *held == card) {
            Some(index) => {
                cards.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn clear_hand(&self, hand_id: Uuid) -> Result<(), DomainError> {
        self.hands.insert(hand_id, Vec::new());
        Ok(())
    }

    async fn put_trick(&self, trick: Trick) -> Result<(), DomainError> {
        self.tricks.insert(trick.round_id, trick);
        Ok(())
    }

    async fn trick_for_round(&self, round_id: Uuid) -> Result<Option<Trick>, DomainError> {
        Ok(self.tricks.get(&round_id).map(|entry| entry.clone()))
    }
}
