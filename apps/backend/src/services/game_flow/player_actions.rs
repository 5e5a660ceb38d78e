use tracing::{debug, info};
use uuid::Uuid;

use super::{require_phase, GameFlowService};
use crate::domain::cards_logic::winning_index;
use crate::domain::cards_parsing::parse_card_list;
use crate::domain::cards_types::Card;
use crate::domain::deck::{Deck, RankTable};
use crate::domain::scoring;
use crate::domain::state::{next_bidder_index, Phase};
use crate::entities::{Round, Trick, TrickPlay, PASS_BID};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::ws::protocol::ServerMessage;

impl GameFlowService {
    /// Process one bid: a raise keeps the auction moving, a pass drops the
    /// caller and may conclude it.
    pub async fn submit_bid(
        &self,
        round_id: Uuid,
        player_id: Uuid,
        bid: i32,
    ) -> Result<Round, AppError> {
        self.store.require_round(round_id).await?;
        self.store.require_player(player_id).await?;
        let game_id = self.game_id_for_round(round_id).await?;

        let lock = self.locks.lock_for(game_id);
        let _guard = lock.lock().await;

        debug!(round_id = %round_id, player_id = %player_id, bid, "bid submitted");

        let game = self.store.require_game(game_id).await?;
        require_phase(&game, Phase::Bid)?;
        let mut round = self.store.require_round(round_id).await?;

        if bid != PASS_BID && bid <= round.bid {
            return Err(DomainError::conflict(
                ConflictKind::BidBelowCurrent,
                format!("Bid {bid} is below current bid {}", round.bid),
            )
            .into());
        }

        // The auction order still includes the caller at this point; the
        // next seat is relative to them.
        let still_bidding = self.players_still_bidding(round_id).await?;
        let Some(next_index) = next_bidder_index(&player_id, &still_bidding) else {
            return Err(DomainError::conflict(
                ConflictKind::PlayerNotInRound,
                format!("Player {player_id} is not bidding in round {round_id}"),
            )
            .into());
        };

        if bid != PASS_BID {
            round.bid = bid;
            round.bid_winner = Some(player_id);
            self.store.update_round(round.clone()).await?;
            info!(round_id = %round_id, player_id = %player_id, bid, "bid raised");
            self.broadcaster
                .broadcast(
                    game_id,
                    ServerMessage::BidPrompt {
                        player_id: still_bidding[next_index],
                        bid: round.bid,
                    },
                    None,
                )
                .await;
            return Ok(round);
        }

        let mut passer = self.store.require_player(player_id).await?;
        passer.bidding = false;
        self.store.update_player(passer).await?;
        debug!(round_id = %round_id, player_id = %player_id, "player passed");

        if still_bidding.len() == 2 {
            let winner = still_bidding[next_index];
            info!(round_id = %round_id, winner = %winner, bid = round.bid, "bidding complete");
            self.broadcaster
                .broadcast(
                    game_id,
                    ServerMessage::BidWinner {
                        player_id: winner,
                        bid: round.bid,
                    },
                    None,
                )
                .await;

            // The kitty goes to the winner; the kitty hand stays behind,
            // emptied, so the deck stays conserved.
            let winner_hand = self.store.require_player(winner).await?.hand_id;
            for card in self.store.hand_cards(round.hand_id).await? {
                self.store.append_card(winner_hand, card).await?;
            }
            self.store.clear_hand(round.hand_id).await?;

            round.bid_winner = Some(winner);
            self.store.update_round(round.clone()).await?;

            // The first trick of the round is led by the bid winner.
            self.store
                .put_trick(Trick::with_starter(round_id, winner))
                .await?;

            let mut game = game;
            game.phase = game.phase.next(game.kitty_size == 0);
            self.store.update_game(game.clone()).await?;
            self.broadcaster
                .broadcast(
                    game_id,
                    ServerMessage::GameState {
                        game_id,
                        state: game.phase,
                    },
                    None,
                )
                .await;
        } else {
            self.broadcaster
                .broadcast(
                    game_id,
                    ServerMessage::BidPrompt {
                        player_id: still_bidding[next_index],
                        bid: round.bid,
                    },
                    None,
                )
                .await;
        }

        Ok(round)
    }

    /// The bid winner names the trump suit, which moves the game out of
    /// `bidfinal`.
    pub async fn set_trump(
        &self,
        round_id: Uuid,
        player_id: Uuid,
        trump: &str,
    ) -> Result<Round, AppError> {
        self.store.require_round(round_id).await?;
        self.store.require_player(player_id).await?;
        let game_id = self.game_id_for_round(round_id).await?;

        let lock = self.locks.lock_for(game_id);
        let _guard = lock.lock().await;

        debug!(round_id = %round_id, player_id = %player_id, trump, "trump submitted");

        let mut game = self.store.require_game(game_id).await?;
        let mut round = self.store.require_round(round_id).await?;

        if round.bid_winner != Some(player_id) {
            let detail = match round.bid_winner {
                Some(winner) => format!("Bid winner {winner} must submit trump"),
                None => format!("Round {round_id} has no bid winner yet"),
            };
            return Err(DomainError::conflict(ConflictKind::NotBidWinner, detail).into());
        }

        let Ok(suit) = trump.parse() else {
            return Err(DomainError::conflict(
                ConflictKind::Other("INVALID_TRUMP".into()),
                "Trump suit must be one of spade, heart, club, diamond".to_string(),
            )
            .into());
        };

        require_phase(&game, Phase::BidFinal)?;

        round.trump = Some(suit);
        self.store.update_round(round.clone()).await?;
        info!(round_id = %round_id, trump = %suit, "trump selected");
        self.broadcaster
            .broadcast(game_id, ServerMessage::TrumpSelected { trump: suit }, None)
            .await;

        game.phase = game.phase.next(game.kitty_size == 0);
        self.store.update_game(game.clone()).await?;
        self.broadcaster
            .broadcast(
                game_id,
                ServerMessage::GameState {
                    game_id,
                    state: game.phase,
                },
                None,
            )
            .await;

        Ok(round)
    }

    /// Score a meld selection and record it on the player. Submissions may
    /// repeat until the player finalizes; each one overwrites the last.
    pub async fn score_meld(
        &self,
        round_id: Uuid,
        player_id: Uuid,
        cards: &str,
    ) -> Result<i32, AppError> {
        self.store.require_round(round_id).await?;
        self.store.require_player(player_id).await?;
        let game_id = self.game_id_for_round(round_id).await?;

        let lock = self.locks.lock_for(game_id);
        let _guard = lock.lock().await;

        debug!(round_id = %round_id, player_id = %player_id, cards, "meld submitted");

        let game = self.store.require_game(game_id).await?;
        require_phase(&game, Phase::Meld)?;
        let round = self.store.require_round(round_id).await?;
        let mut player = self.store.require_player(player_id).await?;

        if player.meld_final {
            return Err(DomainError::conflict(
                ConflictKind::Other("MELD_ALREADY_FINAL".into()),
                format!("Player {player_id} has already finalized meld"),
            )
            .into());
        }

        let cards = parse_card_list(cards)?;

        // Every submitted card must come out of the player's own hand,
        // duplicates included.
        let mut hand = Deck::from_cards(self.store.hand_cards(player.hand_id).await?);
        for card in &cards {
            if !hand.remove_one(*card) {
                return Err(DomainError::conflict(
                    ConflictKind::CardNotInHand,
                    format!("Card {card} not in player's hand"),
                )
                .into());
            }
        }

        let deck = match round.trump {
            Some(trump) => Deck::from_cards(cards.clone()).with_trump(trump),
            None => Deck::from_cards(cards.clone()),
        };
        let score = scoring::score_meld(&deck) as i32;

        player.meld_score = score;
        self.store.update_player(player).await?;
        info!(round_id = %round_id, player_id = %player_id, score, "meld scored");

        self.broadcaster
            .broadcast(
                game_id,
                ServerMessage::MeldUpdate {
                    game_id,
                    player_id,
                    card_list: cards,
                    meld_score: score,
                },
                Some(player_id),
            )
            .await;

        Ok(score)
    }

    /// Lock in a player's meld. When the last seat finalizes, meld totals
    /// land on the team scores and the game moves to trick play.
    pub async fn finalize_meld(&self, round_id: Uuid, player_id: Uuid) -> Result<(), AppError> {
        self.store.require_round(round_id).await?;
        self.store.require_player(player_id).await?;
        let game_id = self.game_id_for_round(round_id).await?;

        let lock = self.locks.lock_for(game_id);
        let _guard = lock.lock().await;

        debug!(round_id = %round_id, player_id = %player_id, "meld finalized");

        let game = self.store.require_game(game_id).await?;
        require_phase(&game, Phase::Meld)?;
        let seating = self.seating(round_id).await?;
        if !seating.contains(&player_id) {
            return Err(DomainError::conflict(
                ConflictKind::PlayerNotInRound,
                format!("Player {player_id} is not playing in round {round_id}"),
            )
            .into());
        }

        let mut player = self.store.require_player(player_id).await?;
        if player.meld_final {
            // Repeat finalizes are no-ops so totaling can only run once.
            return Ok(());
        }
        player.meld_final = true;
        self.store.update_player(player).await?;

        for seated in &seating {
            if !self.store.require_player(*seated).await?.meld_final {
                return Ok(());
            }
        }

        info!(round_id = %round_id, "all meld final, totaling team scores");
        for round_team in self.store.round_teams(round_id).await? {
            let mut team = self.store.require_team(round_team.team_id).await?;
            let mut meld_sum = 0;
            for member in self.store.team_players(round_team.team_id).await? {
                meld_sum += self.store.require_player(member).await?.meld_score;
            }
            team.score += meld_sum;
            self.store.update_team(team.clone()).await?;
            self.broadcaster
                .broadcast(
                    game_id,
                    ServerMessage::TeamScore {
                        team_id: team.id,
                        score: team.score,
                        meld_score: meld_sum,
                    },
                    None,
                )
                .await;
        }

        let mut game = game;
        game.phase = game.phase.next(game.kitty_size == 0);
        self.store.update_game(game.clone()).await?;
        self.broadcaster
            .broadcast(
                game_id,
                ServerMessage::GameState {
                    game_id,
                    state: game.phase,
                },
                None,
            )
            .await;

        Ok(())
    }

    /// Play one card into the round's trick. The P-th card resolves the
    /// trick, and the last trick of the round settles it.
    pub async fn play_card(
        &self,
        round_id: Uuid,
        player_id: Uuid,
        card: &str,
    ) -> Result<(), AppError> {
        self.store.require_round(round_id).await?;
        self.store.require_player(player_id).await?;
        let game_id = self.game_id_for_round(round_id).await?;

        let lock = self.locks.lock_for(game_id);
        let _guard = lock.lock().await;

        debug!(round_id = %round_id, player_id = %player_id, card, "card played");

        let game = self.store.require_game(game_id).await?;
        require_phase(&game, Phase::Trick)?;

        let card: Card = card.parse()?;
        let round = self.store.require_round(round_id).await?;
        let player = self.store.require_player(player_id).await?;
        let mut trick = self.store.require_trick(round_id).await?;

        let hand = Deck::from_cards(self.store.hand_cards(player.hand_id).await?);
        if !hand.contains(card) {
            return Err(DomainError::conflict(
                ConflictKind::CardNotInHand,
                format!("Card {card} not in player's hand"),
            )
            .into());
        }
        if trick.plays.iter().any(|play| play.player_id == player_id) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateCardPlay,
                format!("Player {player_id} already played a card in this trick"),
            )
            .into());
        }

        self.store.remove_card(player.hand_id, card).await?;
        self.store.append_card(trick.hand_id, card).await?;
        trick.plays.push(TrickPlay { player_id, card });
        self.store.put_trick(trick.clone()).await?;

        self.broadcaster
            .broadcast(
                game_id,
                ServerMessage::TrickCard {
                    game_id,
                    player_id,
                    card,
                },
                Some(player_id),
            )
            .await;

        let seating = self.seating(round_id).await?;
        if trick.plays.len() == seating.len() {
            self.resolve_trick_locked(game_id, &round, trick).await?;
        }

        Ok(())
    }

    /// Post-trick acknowledgment: tell the table the next trick may begin.
    pub async fn next_trick(&self, round_id: Uuid, player_id: Uuid) -> Result<(), AppError> {
        self.store.require_round(round_id).await?;
        self.store.require_player(player_id).await?;
        let game_id = self.game_id_for_round(round_id).await?;

        let lock = self.locks.lock_for(game_id);
        let _guard = lock.lock().await;

        debug!(round_id = %round_id, player_id = %player_id, "next trick acknowledged");
        self.broadcaster
            .broadcast(
                game_id,
                ServerMessage::TrickNext { game_id, player_id },
                None,
            )
            .await;
        Ok(())
    }

    /// Seating order filtered down to the players still in the auction.
    async fn players_still_bidding(&self, round_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        let mut still_bidding = Vec::new();
        for player_id in self.seating(round_id).await? {
            if self.store.require_player(player_id).await?.bidding {
                still_bidding.push(player_id);
            }
        }
        Ok(still_bidding)
    }

    /// A full trick: pick the winner, bank the cards with the winning
    /// team, and either open the next trick or settle the round.
    async fn resolve_trick_locked(
        &self,
        game_id: Uuid,
        round: &Round,
        mut trick: Trick,
    ) -> Result<(), AppError> {
        let mut ranks = RankTable::standard();
        if let Some(trump) = round.trump {
            ranks.set_trump(trump);
        }

        let played: Vec<Card> = trick.plays.iter().map(|play| play.card).collect();
        let winner_index = winning_index(&played, &ranks).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Trick {} resolved with no plays", trick.id),
            )
        })?;
        let winner = trick.plays[winner_index].player_id;
        let winning_card = trick.plays[winner_index].card;

        let mut winning_team_hand = None;
        for round_team in self.store.round_teams(round.id).await? {
            if self
                .store
                .team_players(round_team.team_id)
                .await?
                .contains(&winner)
            {
                winning_team_hand = Some(round_team.hand_id);
                break;
            }
        }
        let winning_team_hand = winning_team_hand.ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Winner {winner} has no team in round {}", round.id),
            )
        })?;

        for card in self.store.hand_cards(trick.hand_id).await? {
            self.store.append_card(winning_team_hand, card).await?;
        }
        self.store.clear_hand(trick.hand_id).await?;

        trick.winner = Some(winner);
        self.store.put_trick(trick).await?;

        info!(
            round_id = %round.id,
            winner = %winner,
            winning_card = %winning_card,
            "trick won"
        );
        self.broadcaster
            .broadcast(
                game_id,
                ServerMessage::TrickWon {
                    game_id,
                    player_id: winner,
                    winning_card,
                },
                None,
            )
            .await;

        let winner_hand = self.store.require_player(winner).await?.hand_id;
        if self.store.hand_cards(winner_hand).await?.is_empty() {
            self.settle_round_locked(game_id, round, winner).await
        } else {
            self.store
                .put_trick(Trick::with_starter(round.id, winner))
                .await?;
            Ok(())
        }
    }

    /// Hands are empty: count each team's tricks into its score and roll
    /// the game into the next round.
    async fn settle_round_locked(
        &self,
        game_id: Uuid,
        round: &Round,
        last_trick_winner: Uuid,
    ) -> Result<(), AppError> {
        let round_teams = self.store.round_teams(round.id).await?;

        let mut last_trick_team = None;
        let mut bid_winner_team = None;
        for round_team in &round_teams {
            let members = self.store.team_players(round_team.team_id).await?;
            if members.contains(&last_trick_winner) {
                last_trick_team = Some(round_team.team_id);
            }
            if let Some(bid_winner) = round.bid_winner {
                if members.contains(&bid_winner) {
                    bid_winner_team = Some(round_team.team_id);
                }
            }
        }

        for round_team in &round_teams {
            let mut team = self.store.require_team(round_team.team_id).await?;
            let collected = Deck::from_cards(self.store.hand_cards(round_team.hand_id).await?);
            let mut trick_points = scoring::score_tricks(&collected) as i32;
            if last_trick_team == Some(round_team.team_id) {
                trick_points += 1;
            }

            let mut delta = trick_points;
            if self.bid_enforcement && bid_winner_team == Some(round_team.team_id) {
                let mut meld_sum = 0;
                for member in self.store.team_players(round_team.team_id).await? {
                    meld_sum += self.store.require_player(member).await?.meld_score;
                }
                if meld_sum + trick_points < round.bid {
                    info!(
                        round_id = %round.id,
                        team_id = %team.id,
                        bid = round.bid,
                        meld_sum,
                        trick_points,
                        "team fell short of its bid"
                    );
                    // Meld was credited when it was finalized; back it
                    // out so the round nets exactly -bid.
                    delta = -round.bid - meld_sum;
                }
            }

            team.score += delta;
            self.store.update_team(team.clone()).await?;
            self.broadcaster
                .broadcast(
                    game_id,
                    ServerMessage::ScoreRound {
                        game_id,
                        team_id: team.id,
                        score: team.score,
                        trick_score: trick_points,
                    },
                    None,
                )
                .await;
        }

        info!(round_id = %round.id, game_id = %game_id, "round settled");

        // Wrap to bidding; the new round announces itself as it starts.
        let mut game = self.store.require_game(game_id).await?;
        game.phase = Phase::Bid;
        self.store.update_game(game.clone()).await?;

        self.new_round_locked(game_id, round.id).await
    }
}
