// Derived summaries for the external bid advisor. The advisor itself is an
// opaque service behind the BidAdvisor trait - its answers are suggestions
// for the bidding view and never feed back into scoring.

use serde::{Deserialize, Serialize};

use super::game::TricksterGame;
use super::model::Player;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct BidSuggestionRequest {
    pub hand_size: i32,
    pub current_round: i32,
    pub player_stats: String,
    pub game_state: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct BidSuggestion {
    pub suggested_bid: i32,
    pub reasoning: String,
}

pub trait BidAdvisor {
    fn suggest(&self, request: &BidSuggestionRequest) -> BidSuggestion;
}

/// Stand-in advisor for play without an AI service: bid an even share of
/// the hand, rounded down.
#[derive(Debug, Clone, Copy)]
pub struct EvenSplitAdvisor {
    pub player_count: usize,
}

impl BidAdvisor for EvenSplitAdvisor {
    fn suggest(&self, request: &BidSuggestionRequest) -> BidSuggestion {
        let suggested_bid = request.hand_size / self.player_count as i32;
        BidSuggestion {
            suggested_bid,
            reasoning: format!(
                "With {} cards split across {} players, an even share is about {} tricks.",
                request.hand_size, self.player_count, suggested_bid
            ),
        }
    }
}

/// Summarize the game from one player's point of view for the advisor.
pub fn suggestion_request(game: &TricksterGame, player_id: usize) -> BidSuggestionRequest {
    let player = game
        .players
        .iter()
        .find(|p| p.id == player_id)
        .unwrap_or_else(|| panic!("no player with id {} in this game", player_id));

    let player_stats = format!(
        "Win/Loss Ratio: N/A, Bidding Accuracy: {}, Current Streak: {}",
        bidding_accuracy(player),
        player.streak
    );

    let scores = game
        .players
        .iter()
        .map(|p| format!("{}: {}", p.name, p.total_score))
        .collect::<Vec<_>>()
        .join(", ");
    let others = game
        .players
        .iter()
        .filter(|p| p.id != player_id)
        .map(|p| {
            format!(
                "{}: {} pts, Current Bid: {}",
                p.name,
                p.total_score,
                p.current_bid
                    .map(|bid| bid.to_string())
                    .unwrap_or_else(|| "N/A".to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    BidSuggestionRequest {
        hand_size: game.cards_this_round(),
        current_round: game.current_round,
        player_stats,
        game_state: format!(
            "Current Scores: {}. Other players info: {}",
            scores, others
        ),
    }
}

/// Share of past rounds where the bid was hit exactly, as a rounded
/// percentage. "N/A" until at least one round is in the books.
fn bidding_accuracy(player: &Player) -> String {
    if player.bid_history.is_empty() {
        return "N/A".to_string();
    }
    let successful = player.bids_successful();
    let percent =
        (successful as f64 / player.bid_history.len() as f64 * 100.0).round() as i32;
    format!("{}%", percent)
}
