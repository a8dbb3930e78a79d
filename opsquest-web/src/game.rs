//! Web-specific game engine implementation
//!
//! Provides the browser implementations of the opsquest-game platform traits
//! and re-exports the core game logic types.

use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};

// Re-export all types from opsquest-game
pub use opsquest_game::*;

/// The single localStorage key holding the serialized game state. Two tabs
/// sharing it overwrite each other last-writer-wins; accepted limitation for
/// a single-user client.
pub const PROGRESS_KEY: &str = "opsquest.progress";

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Progress slot backed by browser localStorage.
pub struct LocalProgressStore;

impl ProgressStore for LocalProgressStore {
    type Error = WebStorageError;

    fn save(&self, state: &GameState) -> Result<(), Self::Error> {
        LocalStorage::set(PROGRESS_KEY, state)
            .map_err(|e| WebStorageError::Storage(format!("{e:?}")))
    }

    fn load(&self) -> Result<Option<GameState>, Self::Error> {
        match LocalStorage::get(PROGRESS_KEY) {
            Ok(state) => Ok(Some(state)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            // Corrupt slot: report it so the engine can log and fall open.
            Err(err) => Err(WebStorageError::Storage(format!("{err:?}"))),
        }
    }

    fn clear(&self) -> Result<(), Self::Error> {
        LocalStorage::delete(PROGRESS_KEY);
        Ok(())
    }
}

/// Create a browser game engine over the embedded campaign and localStorage.
///
/// # Errors
///
/// Returns an error if the embedded catalog fails to parse.
pub fn create_web_engine() -> Result<GameEngine<LocalProgressStore>, anyhow::Error> {
    GameEngine::new(&BuiltinCatalog, LocalProgressStore)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn slot_round_trips_and_clears() {
        let store = LocalProgressStore;
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        let state = GameState {
            player_name: "Ada".to_string(),
            current_level: 2,
            score: 40,
            ..GameState::default()
        };
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn corrupt_slot_surfaces_as_error_not_panic() {
        LocalStorage::raw()
            .set_item(PROGRESS_KEY, "{not json")
            .unwrap();
        let store = LocalProgressStore;
        assert!(store.load().is_err());
        store.clear().unwrap();
    }
}
