use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;
pub const PERFECT_GAME_BONUS: i32 = 50;

/// House rules chosen at game creation. Fixed for the life of the game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub enable_streak_bonus: bool,
    pub enable_perfect_game_bonus: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        // Both house rules are on unless the table turns them off
        GameConfig {
            enable_streak_bonus: true,
            enable_perfect_game_bonus: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Sequence, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum GamePhase {
    #[default]
    Bidding,
    Scoring,
    RoundEnd,
    GameOver,
}

/// Palette assigned to seats in order, wrapping around for tables
/// larger than eight would allow.
#[derive(Debug, Clone, Copy, Default, Serialize, Sequence, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum AvatarColor {
    #[default]
    Vermilion = 0,
    Lime = 1,
    Azure = 2,
    Magenta = 3,
    Violet = 4,
    Aqua = 5,
    Amber = 6,
    Scarlet = 7,
}

impl AvatarColor {
    pub fn hex(&self) -> &'static str {
        match self {
            AvatarColor::Vermilion => "#FF5733",
            AvatarColor::Lime => "#33FF57",
            AvatarColor::Azure => "#3357FF",
            AvatarColor::Magenta => "#FF33A1",
            AvatarColor::Violet => "#A133FF",
            AvatarColor::Aqua => "#33FFA1",
            AvatarColor::Amber => "#FFC300",
            AvatarColor::Scarlet => "#FF3333",
        }
    }

    pub fn for_seat(seat: usize) -> AvatarColor {
        let palette: Vec<AvatarColor> = all::<AvatarColor>().collect();
        palette[seat % palette.len()]
    }
}

/// One completed round as it appears in a player's history.
/// Immutable once appended.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round: i32,
    pub bid: i32,
    pub tricks: i32,
    pub score: i32,
}

/// Seat details supplied at game creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSetup {
    pub name: String,
    pub avatar_color: Option<String>,
}

impl PlayerSetup {
    pub fn named(name: &str) -> Self {
        PlayerSetup {
            name: name.to_string(),
            avatar_color: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: usize,
    pub name: String,
    pub avatar_color: String,
    pub total_score: i32,
    pub bid_history: Vec<RoundRecord>,
    // None means "not entered yet" - a bid or trick count of 0 is a real value
    pub current_bid: Option<i32>,
    pub current_tricks: Option<i32>,
    pub streak: i32,
    pub is_bid_successful: Option<bool>,
    pub is_dealer: bool,
}

impl Player {
    pub fn new(id: usize, setup: &PlayerSetup) -> Self {
        Player {
            id,
            name: setup.name.clone(),
            avatar_color: setup
                .avatar_color
                .clone()
                .unwrap_or_else(|| AvatarColor::for_seat(id).hex().to_string()),
            is_dealer: id == 0,
            ..Default::default()
        }
    }

    pub fn bids_successful(&self) -> usize {
        self.bid_history
            .iter()
            .filter(|record| record.bid == record.tricks)
            .count()
    }

    /// A perfect game is a successful bid in every round of the game,
    /// not just every round the player happened to record.
    pub fn has_perfect_game(&self, total_rounds: i32) -> bool {
        self.bid_history.len() as i32 == total_rounds
            && self
                .bid_history
                .iter()
                .all(|record| record.bid == record.tricks)
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
pub enum RoundError {
    #[error("the total number of bids ({total_bids}) cannot equal the number of cards in hand ({cards_this_round}) - someone has to break")]
    InvalidBids {
        total_bids: i32,
        cards_this_round: i32,
    },
    #[error("the total number of tricks taken ({total_tricks}) must equal the number of cards in hand ({cards_this_round})")]
    InvalidTricks {
        total_tricks: i32,
        cards_this_round: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps_around() {
        assert_eq!(AvatarColor::for_seat(0), AvatarColor::Vermilion);
        assert_eq!(AvatarColor::for_seat(7), AvatarColor::Scarlet);
        assert_eq!(AvatarColor::for_seat(8), AvatarColor::Vermilion);
        assert_eq!(AvatarColor::for_seat(10), AvatarColor::Azure);
    }

    #[test]
    fn test_player_new_defaults() {
        let player = Player::new(2, &PlayerSetup::named("North"));
        assert_eq!(player.name, "North");
        assert_eq!(player.avatar_color, "#3357FF");
        assert_eq!(player.total_score, 0);
        assert_eq!(player.streak, 0);
        assert!(player.bid_history.is_empty());
        assert_eq!(player.current_bid, None);
        assert_eq!(player.current_tricks, None);
        assert_eq!(player.is_bid_successful, None);
        assert!(!player.is_dealer, "only seat 0 deals the first round");
    }

    #[test]
    fn test_explicit_avatar_color_wins() {
        let setup = PlayerSetup {
            name: "West".to_string(),
            avatar_color: Some("#123456".to_string()),
        };
        assert_eq!(Player::new(1, &setup).avatar_color, "#123456");
    }

    #[test]
    fn test_has_perfect_game() {
        let mut player = Player::new(0, &PlayerSetup::named("You"));
        player.bid_history = vec![
            RoundRecord {
                round: 1,
                bid: 2,
                tricks: 2,
                score: 32,
            },
            RoundRecord {
                round: 2,
                bid: 0,
                tricks: 0,
                score: 10,
            },
        ];
        assert!(player.has_perfect_game(2));
        assert!(
            !player.has_perfect_game(3),
            "a skipped round is not a perfect game"
        );

        player.bid_history[1].tricks = 1;
        assert!(!player.has_perfect_game(2), "one miss spoils it");
    }

    #[test]
    fn test_bids_successful_counts_exact_bids_only() {
        let mut player = Player::new(0, &PlayerSetup::named("You"));
        assert_eq!(player.bids_successful(), 0);
        player.bid_history = vec![
            RoundRecord {
                round: 1,
                bid: 3,
                tricks: 3,
                score: 43,
            },
            RoundRecord {
                round: 2,
                bid: 2,
                tricks: 0,
                score: 0,
            },
            RoundRecord {
                round: 3,
                bid: 0,
                tricks: 0,
                score: 10,
            },
        ];
        assert_eq!(player.bids_successful(), 2);
    }

    #[test]
    fn test_phase_wire_format_matches_the_app() {
        // The document store the app syncs with stores phases as kebab-case strings
        assert_eq!(
            serde_json::to_string(&GamePhase::RoundEnd).unwrap(),
            "\"round-end\""
        );
        assert_eq!(
            serde_json::to_string(&GamePhase::GameOver).unwrap(),
            "\"game-over\""
        );
    }
}
