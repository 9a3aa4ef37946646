// Repository seam between the engine and whatever persists game snapshots.
// The engine never touches this module; the calling layer loads a snapshot,
// applies one transition, and saves the result back.

use std::collections::HashMap;

use thiserror::Error;

use crate::games::trickster::TricksterGame;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no saved game with id {0}")]
    NotFound(String),
    #[error("failed to encode or decode a game snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub trait GameRepository {
    fn load(&self, game_id: &str) -> Result<TricksterGame, StoreError>;
    fn save(&mut self, game_id: &str, game: &TricksterGame) -> Result<(), StoreError>;
}

type Subscriber = Box<dyn FnMut(&TricksterGame)>;

/// In-memory stand-in for the document store the app syncs games through.
/// Snapshots are kept JSON-encoded so every load hands back a fresh copy,
/// and subscribers are notified on every save the way the app listens to
/// document snapshots.
#[derive(Default)]
pub struct MemoryGameStore {
    games: HashMap<String, String>,
    subscribers: HashMap<String, Vec<Subscriber>>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn subscribe(&mut self, game_id: &str, callback: impl FnMut(&TricksterGame) + 'static) {
        self.subscribers
            .entry(game_id.to_string())
            .or_default()
            .push(Box::new(callback));
    }
}

impl GameRepository for MemoryGameStore {
    fn load(&self, game_id: &str) -> Result<TricksterGame, StoreError> {
        let raw = self
            .games
            .get(game_id)
            .ok_or_else(|| StoreError::NotFound(game_id.to_string()))?;
        Ok(serde_json::from_str(raw)?)
    }

    fn save(&mut self, game_id: &str, game: &TricksterGame) -> Result<(), StoreError> {
        let raw = serde_json::to_string(game)?;
        self.games.insert(game_id.to_string(), raw);
        if let Some(subscribers) = self.subscribers.get_mut(game_id) {
            for callback in subscribers.iter_mut() {
                callback(game);
            }
        }
        Ok(())
    }
}
