/*
Game: Trickster
A scorekeeper for bid-and-take trick games: every player calls how many
tricks they will win each round, the hand shrinks by one card per round,
and the engine keeps score, tracks bidding streaks, and pays out
end-of-game bonuses.
*/

use serde::{Deserialize, Serialize};

use super::model::{
    GameConfig, GamePhase, Player, PlayerSetup, RoundError, RoundRecord, MAX_PLAYERS, MIN_PLAYERS,
    PERFECT_GAME_BONUS,
};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    #[default]
    Bid,
    Tricks,
    Score,
    Message,
    Dealer,
    History,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ChangeType {
    #[default]
    Bid,
    ClearBid,
    Tricks,
    ClearTricks,
    Score,
    StreakBonus,
    PerfectGameBonus,
    DealerButton,
    Message,
    GameOver,
}

/// Display instructions emitted alongside every transition. Batches in the
/// outer vec play sequentially, changes in the inner vecs play together.
/// Purely advisory - callers that only want the new snapshot can ignore them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    #[serde(rename(serialize = "type", deserialize = "type"))]
    pub change_type: ChangeType,
    pub player: usize,
    pub dest: Location,
    pub amount: i32,
    pub start_score: i32,
    pub end_score: i32,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    pub id: usize,
    pub name: String,
    pub total_score: i32,
    pub total_bids_made: i32,
    pub total_bids_success: i32,
    pub is_winner: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TricksterGame {
    pub players: Vec<Player>,
    pub current_round: i32,
    pub starting_card_count: i32,
    pub phase: GamePhase,
    pub config: GameConfig,
    pub winner: Option<usize>,
    pub changes: Vec<Vec<Change>>,
    pub no_changes: bool,
}

impl TricksterGame {
    pub fn new(setups: &[PlayerSetup], starting_card_count: i32, config: GameConfig) -> Self {
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&setups.len()),
            "a game needs {} to {} players",
            MIN_PLAYERS,
            MAX_PLAYERS
        );
        assert!(
            starting_card_count >= 1,
            "round 1 must deal at least one card"
        );

        let mut game = TricksterGame {
            players: setups
                .iter()
                .enumerate()
                .map(|(id, setup)| Player::new(id, setup))
                .collect(),
            current_round: 1,
            starting_card_count,
            config,
            ..Default::default()
        };
        game.show_message();
        game
    }

    /// Same seats, same settings, fresh scoreboard.
    pub fn restart(&self) -> Self {
        let setups: Vec<PlayerSetup> = self
            .players
            .iter()
            .map(|p| PlayerSetup {
                name: p.name.clone(),
                avatar_color: Some(p.avatar_color.clone()),
            })
            .collect();
        TricksterGame::new(&setups, self.starting_card_count, self.config)
    }

    /// The hand shrinks by one card every round: round r deals
    /// starting_card_count - r + 1 cards.
    pub fn cards_this_round(&self) -> i32 {
        self.starting_card_count - self.current_round + 1
    }

    pub fn update_bid(&mut self, player_id: usize, bid: Option<i32>) {
        assert_eq!(
            self.phase,
            GamePhase::Bidding,
            "bids can only be entered during the bidding phase"
        );
        if let Some(bid) = bid {
            assert!(
                bid >= 0 && bid <= self.cards_this_round(),
                "a bid must be between 0 and the number of cards in hand"
            );
        }
        let index = self.player_index(player_id);
        self.players[index].current_bid = bid;

        self.changes = vec![vec![]];
        self.add_change(
            0,
            Change {
                change_type: if bid.is_some() {
                    ChangeType::Bid
                } else {
                    ChangeType::ClearBid
                },
                player: index,
                dest: Location::Bid,
                amount: bid.unwrap_or(0),
                ..Default::default()
            },
        );
    }

    pub fn update_tricks(&mut self, player_id: usize, tricks: Option<i32>) {
        assert_eq!(
            self.phase,
            GamePhase::Scoring,
            "tricks taken can only be entered during the scoring phase"
        );
        if let Some(tricks) = tricks {
            assert!(
                tricks >= 0 && tricks <= self.cards_this_round(),
                "tricks taken must be between 0 and the number of cards in hand"
            );
        }
        let index = self.player_index(player_id);
        self.players[index].current_tricks = tricks;

        self.changes = vec![vec![]];
        self.add_change(
            0,
            Change {
                change_type: if tricks.is_some() {
                    ChangeType::Tricks
                } else {
                    ChangeType::ClearTricks
                },
                player: index,
                dest: Location::Tricks,
                amount: tricks.unwrap_or(0),
                ..Default::default()
            },
        );
    }

    pub fn all_bids_submitted(&self) -> bool {
        self.players.iter().all(|p| p.current_bid.is_some())
    }

    pub fn all_tricks_submitted(&self) -> bool {
        self.players.iter().all(|p| p.current_tricks.is_some())
    }

    /// House rule: the bids may not add up to exactly the number of cards
    /// in hand, so at least one player is guaranteed to miss.
    pub fn validate_bids(&self) -> Result<(), RoundError> {
        let total_bids: i32 = self.players.iter().filter_map(|p| p.current_bid).sum();
        let cards_this_round = self.cards_this_round();
        if total_bids == cards_this_round {
            return Err(RoundError::InvalidBids {
                total_bids,
                cards_this_round,
            });
        }
        Ok(())
    }

    /// Every card dealt is won by someone, so tricks taken must account
    /// for the entire hand.
    pub fn validate_tricks(&self) -> Result<(), RoundError> {
        let total_tricks: i32 = self.players.iter().filter_map(|p| p.current_tricks).sum();
        let cards_this_round = self.cards_this_round();
        if total_tricks != cards_this_round {
            return Err(RoundError::InvalidTricks {
                total_tricks,
                cards_this_round,
            });
        }
        Ok(())
    }

    /// Close the bidding phase. On a validation error the snapshot is
    /// untouched and the caller surfaces the message for correction.
    pub fn begin_scoring(&mut self) -> Result<(), RoundError> {
        assert_eq!(
            self.phase,
            GamePhase::Bidding,
            "scoring can only start from the bidding phase"
        );
        assert!(
            self.all_bids_submitted(),
            "every player must enter a bid before scoring starts"
        );
        self.validate_bids()?;

        self.changes = vec![vec![]];
        self.phase = GamePhase::Scoring;
        self.show_message();
        Ok(())
    }

    /// Score the round for every player and move to round-end. Bids and
    /// tricks stay on the table so the round-end view can show them;
    /// they are cleared when the next round starts.
    pub fn score_round(&mut self) -> Result<(), RoundError> {
        assert_eq!(
            self.phase,
            GamePhase::Scoring,
            "rounds can only be scored from the scoring phase"
        );
        assert!(
            self.all_tricks_submitted(),
            "every player must enter tricks taken before the round is scored"
        );
        self.validate_tricks()?;

        self.changes = vec![vec![]];
        let round = self.current_round;
        let score_index = self.new_change();

        for index in 0..self.players.len() {
            let (bid, tricks) = match (
                self.players[index].current_bid,
                self.players[index].current_tricks,
            ) {
                (Some(bid), Some(tricks)) => (bid, tricks),
                // Missing entries never score - the validators keep this
                // from happening in normal play
                _ => continue,
            };

            let successful = bid == tricks;
            let mut round_score = 0;
            let mut bonus = 0;

            if successful {
                round_score = (tricks + 1) * 10 + tricks;
                self.players[index].streak += 1;
                if self.config.enable_streak_bonus {
                    bonus = TricksterGame::streak_bonus(self.players[index].streak);
                    round_score += bonus;
                }
            } else {
                self.players[index].streak = 0;
            }

            let start_score = self.players[index].total_score;
            {
                let player = &mut self.players[index];
                player.bid_history.push(RoundRecord {
                    round,
                    bid,
                    tricks,
                    score: round_score,
                });
                player.total_score += round_score;
                player.is_bid_successful = Some(successful);
            }

            self.add_change(
                score_index,
                Change {
                    change_type: ChangeType::Score,
                    player: index,
                    dest: Location::Score,
                    amount: round_score,
                    start_score,
                    end_score: start_score + round_score,
                    ..Default::default()
                },
            );
            if bonus > 0 {
                self.add_change(
                    score_index,
                    Change {
                        change_type: ChangeType::StreakBonus,
                        player: index,
                        dest: Location::Score,
                        amount: bonus,
                        ..Default::default()
                    },
                );
            }
        }

        self.phase = GamePhase::RoundEnd;
        self.show_message();
        Ok(())
    }

    /// One-shot awards for hitting a streak of exactly 3 or 5. A streak of
    /// seven or more pays out again every round it holds.
    fn streak_bonus(streak: i32) -> i32 {
        match streak {
            3 => 10,
            5 => 25,
            s if s >= 7 => 50,
            _ => 0,
        }
    }

    /// Move on from round-end: either deal the next round (rotating the
    /// dealer and clearing the table) or finish the game and pay the
    /// perfect-game bonus. Calling this from any other phase is a caller
    /// bug, not a user-input problem.
    pub fn advance_round(&mut self) {
        assert_eq!(
            self.phase,
            GamePhase::RoundEnd,
            "rounds can only advance from the round-end phase"
        );
        self.changes = vec![vec![]];

        if self.current_round == self.starting_card_count {
            self.apply_perfect_game_bonus();
            self.phase = GamePhase::GameOver;
            self.winner = self.leader();

            let game_over_index = self.new_change();
            self.add_change(
                game_over_index,
                Change {
                    change_type: ChangeType::GameOver,
                    ..Default::default()
                },
            );
            self.show_message();
            return;
        }

        // Pre-increment round number: round r+1 is dealt by seat r % players
        let dealer_index = self.current_round as usize % self.players.len();
        let reset_index = self.new_change();
        for index in 0..self.players.len() {
            {
                let player = &mut self.players[index];
                player.current_bid = None;
                player.current_tricks = None;
                player.is_bid_successful = None;
                player.is_dealer = index == dealer_index;
            }
            self.add_change(
                reset_index,
                Change {
                    change_type: ChangeType::ClearBid,
                    player: index,
                    dest: Location::Bid,
                    ..Default::default()
                },
            );
            self.add_change(
                reset_index,
                Change {
                    change_type: ChangeType::ClearTricks,
                    player: index,
                    dest: Location::Tricks,
                    ..Default::default()
                },
            );
        }
        self.add_change(
            reset_index,
            Change {
                change_type: ChangeType::DealerButton,
                player: dealer_index,
                dest: Location::Dealer,
                ..Default::default()
            },
        );

        self.current_round += 1;
        self.phase = GamePhase::Bidding;
        self.show_message();
    }

    /// Runs exactly once, from the transition into game-over. Running it
    /// again would pay the bonus again - the caller owns exactly-once.
    fn apply_perfect_game_bonus(&mut self) {
        if !self.config.enable_perfect_game_bonus {
            return;
        }
        let bonus_index = self.new_change();
        for index in 0..self.players.len() {
            if !self.players[index].has_perfect_game(self.starting_card_count) {
                continue;
            }
            let start_score = self.players[index].total_score;
            self.players[index].total_score += PERFECT_GAME_BONUS;
            self.add_change(
                bonus_index,
                Change {
                    change_type: ChangeType::PerfectGameBonus,
                    player: index,
                    dest: Location::Score,
                    amount: PERFECT_GAME_BONUS,
                    start_score,
                    end_score: start_score + PERFECT_GAME_BONUS,
                    ..Default::default()
                },
            );
        }
    }

    /// Final standings for the external statistics consumer. Ties go to
    /// the earliest seat.
    pub fn final_results(&self) -> Vec<PlayerResult> {
        assert_eq!(
            self.phase,
            GamePhase::GameOver,
            "results are only final when the game is over"
        );
        self.players
            .iter()
            .map(|player| PlayerResult {
                id: player.id,
                name: player.name.clone(),
                total_score: player.total_score,
                total_bids_made: player.bid_history.len() as i32,
                total_bids_success: player.bids_successful() as i32,
                is_winner: Some(player.id) == self.winner,
            })
            .collect()
    }

    fn leader(&self) -> Option<usize> {
        let top_score = self.players.iter().map(|p| p.total_score).max()?;
        self.players.iter().position(|p| p.total_score == top_score)
    }

    fn player_index(&self, player_id: usize) -> usize {
        self.players
            .iter()
            .position(|p| p.id == player_id)
            .unwrap_or_else(|| panic!("no player with id {} in this game", player_id))
    }

    #[inline]
    fn new_change(&mut self) -> usize {
        self.changes.push(vec![]);
        self.changes.len() - 1
    }

    #[inline]
    fn add_change(&mut self, index: usize, change: Change) {
        if self.no_changes {
            return;
        }
        self.changes[index].push(change);
    }

    fn show_message(&mut self) {
        let message = match self.phase {
            GamePhase::Bidding => Some(format!(
                "Round {}: {} cards - enter bids",
                self.current_round,
                self.cards_this_round()
            )),
            GamePhase::Scoring => Some("Enter tricks taken".to_string()),
            GamePhase::RoundEnd => Some(format!("Round {} scored", self.current_round)),
            GamePhase::GameOver => self
                .winner
                .map(|winner| format!("{} wins!", self.players[winner].name)),
        };
        let index = self.new_change();
        self.add_change(
            index,
            Change {
                change_type: ChangeType::Message,
                dest: Location::Message,
                message,
                ..Default::default()
            },
        );
    }
}
