//! Opsquest Game Engine
//!
//! Platform-agnostic core logic for Opsquest, an educational game that
//! teaches a server-administration workflow through multi-type challenges.
//! This crate provides the state model, transition reducer, level catalog,
//! challenge evaluators, and persistence seams without UI or
//! platform-specific dependencies.

pub mod catalog;
pub mod challenge;
pub mod screen;
pub mod session;
pub mod state;
pub mod unlock;

// Re-export commonly used types
pub use catalog::{
    BadgeSpec, Catalog, Challenge, ChallengeData, Character, Difficulty, DragDropData,
    DragDropItem, DropZone, LEVEL_COUNT, Level, Permission, PuzzleData, QuizData,
    RoleAssignmentData, TerminalData,
};
pub use challenge::{
    ChallengeSubmission, CommandOutcome, TerminalSession, Verdict, placements_complete,
};
pub use screen::{Screen, after_level, initial_screen, resolve};
pub use session::{LevelSession, SubmitOutcome};
pub use state::{Badge, GameAction, GameState, LevelProgress};
pub use unlock::{completed_level_ids, is_unlocked, total_earned_score, unlocked_level_ids};

/// Trait for abstracting catalog loading.
/// Platform-specific implementations should provide this.
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the static level catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or parsed.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;
}

/// Trait for abstracting the single durable progress slot.
/// Platform-specific implementations should provide this.
pub trait ProgressStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the full game state into the slot
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    fn save(&self, state: &GameState) -> Result<(), Self::Error>;

    /// Read the slot, `None` when no progress has been saved
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<GameState>, Self::Error>;

    /// Delete the slot
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be deleted.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// Time source for the timestamps stamped into actions. Kept behind a trait
/// so the reducer stays pure and tests control the clock.
pub trait Clock {
    /// Current time as Unix seconds.
    fn now(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Gameplay request errors. Wrong answers are not errors; these cover
/// malformed requests the UI should never have allowed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("player name must not be empty")]
    EmptyPlayerName,
    #[error("level {0} does not exist")]
    UnknownLevel(u32),
    #[error("level {0} is still locked")]
    LevelLocked(u32),
}

/// Single-writer handle over the game state: owns the state, routes every
/// mutation through the reducer, and persists reactively after each change.
pub struct GameEngine<S, C = SystemClock> {
    catalog: Catalog,
    storage: S,
    clock: C,
    state: GameState,
}

impl<S> GameEngine<S>
where
    S: ProgressStore,
{
    /// Create an engine with the system clock, loading the catalog and any
    /// saved progress. A snapshot that fails to load is logged and treated
    /// as absent; startup never fails on a bad save.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn new<L: CatalogSource>(loader: &L, storage: S) -> Result<Self, anyhow::Error> {
        Self::with_clock(loader, storage, SystemClock)
    }
}

impl<S, C> GameEngine<S, C>
where
    S: ProgressStore,
    C: Clock,
{
    /// Create an engine with an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn with_clock<L: CatalogSource>(
        loader: &L,
        storage: S,
        clock: C,
    ) -> Result<Self, anyhow::Error> {
        let catalog = loader.load_catalog()?;
        let mut state = GameState::default();
        match storage.load() {
            Ok(Some(snapshot)) => {
                state = state.apply(&GameAction::LoadProgress { snapshot });
            }
            Ok(None) => {}
            Err(err) => {
                log::warn!("discarding unreadable saved progress: {err}");
            }
        }
        Ok(Self {
            catalog,
            storage,
            clock,
            state,
        })
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Apply one action and persist the result. Persistence only happens
    /// once a player name exists; write failures are logged, never fatal.
    pub fn dispatch(&mut self, action: GameAction) {
        self.state = self.state.apply(&action);
        if !self.state.player_name.trim().is_empty() {
            if let Err(err) = self.storage.save(&self.state) {
                log::warn!("failed to persist progress: {err}");
            }
        }
    }

    /// Begin a fresh campaign.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyPlayerName`] for blank or whitespace names.
    pub fn start_game(&mut self, player_name: &str) -> Result<(), GameError> {
        let trimmed = player_name.trim();
        if trimmed.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        self.dispatch(GameAction::StartGame {
            player_name: trimmed.to_string(),
        });
        Ok(())
    }

    /// Whether a level exists and is unlocked by current progress.
    #[must_use]
    pub fn is_level_unlocked(&self, level_id: u32) -> bool {
        self.catalog
            .find_level(level_id)
            .is_some_and(|level| unlock::is_unlocked(level, &self.state.progress))
    }

    /// Open a play session for a level.
    ///
    /// # Errors
    ///
    /// Returns an error when the level does not exist or is still locked.
    pub fn begin_level(&self, level_id: u32) -> Result<LevelSession, GameError> {
        let level = self
            .catalog
            .find_level(level_id)
            .ok_or(GameError::UnknownLevel(level_id))?;
        if !unlock::is_unlocked(level, &self.state.progress) {
            return Err(GameError::LevelLocked(level_id));
        }
        Ok(LevelSession::new(level, self.clock.now()))
    }

    /// Submit an answer for the session's current challenge, awarding points
    /// into the global score on a first-time solve.
    pub fn submit(
        &mut self,
        session: &mut LevelSession,
        submission: &ChallengeSubmission,
    ) -> SubmitOutcome {
        let outcome = session.submit(submission);
        if let SubmitOutcome::Awarded { points } = outcome {
            self.dispatch(GameAction::CompleteChallenge { points });
        }
        outcome
    }

    /// Close out a finished session: records the level completion and awards
    /// the level badge when there is one.
    pub fn finish_level(&mut self, session: &LevelSession) {
        for action in session.finish(self.clock.now()) {
            self.dispatch(action);
        }
    }

    /// Award a badge outside the level flow.
    pub fn earn_badge(&mut self, badge: &BadgeSpec) {
        self.dispatch(GameAction::EarnBadge {
            badge: badge.clone(),
            earned_at: self.clock.now(),
        });
    }

    /// Wipe everything: the persisted slot is cleared before the in-memory
    /// reset, so a stale snapshot cannot resurrect old progress at the next
    /// startup.
    pub fn reset(&mut self) {
        if let Err(err) = self.storage.clear() {
            log::warn!("failed to clear saved progress: {err}");
        }
        self.dispatch(GameAction::ResetGame);
    }
}

/// Catalog source serving the campaign embedded in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    type Error = serde_json::Error;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Catalog::builtin()
    }
}
