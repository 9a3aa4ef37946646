pub mod advisor;
pub mod game;
pub mod model;

// Re-export the main types
pub use game::{Change, ChangeType, Location, PlayerResult, TricksterGame};
pub use model::{AvatarColor, GameConfig, GamePhase, Player, PlayerSetup, RoundError, RoundRecord};
