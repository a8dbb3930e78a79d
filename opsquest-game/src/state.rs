//! Game state model and the transition reducer
//!
//! All gameplay mutation flows through [`GameState::apply`], a pure
//! `(state, action) -> state` function. Side effects (persistence) are the
//! engine's job and happen after the new state is computed.

use serde::{Deserialize, Serialize};

use crate::catalog::{BadgeSpec, LEVEL_COUNT};

/// A badge the player has earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub earned: bool,
    /// Unix seconds; set when the badge was earned.
    #[serde(default)]
    pub earned_at: Option<i64>,
}

impl Badge {
    /// Stamp a badge template as earned at the given time.
    #[must_use]
    pub fn from_spec(spec: &BadgeSpec, earned_at: i64) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            description: spec.description.clone(),
            icon: spec.icon.clone(),
            earned: true,
            earned_at: Some(earned_at),
        }
    }
}

/// Per-level completion record. One entry per level id; re-completion
/// replaces the entry wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LevelProgress {
    pub level_id: u32,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub time_spent_secs: u64,
    #[serde(default)]
    pub completed_at: Option<i64>,
}

/// The whole persisted game state. Single source of truth; mutated only via
/// [`GameState::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameState {
    pub current_level: u32,
    pub score: i32,
    pub player_name: String,
    pub is_game_completed: bool,
    pub badges: Vec<Badge>,
    pub progress: Vec<LevelProgress>,
}

/// A gameplay event. The enum is closed, so every reducer match is
/// exhaustive and unknown actions are unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    /// Begin a fresh campaign for the named player.
    StartGame { player_name: String },
    /// Rename the player without touching progress.
    SetPlayerName { player_name: String },
    /// Navigate to a level without completing anything.
    StartLevel { level_id: u32 },
    /// Award points for a correctly solved challenge. Callers guard against
    /// double-submission; the reducer trusts it fires once per challenge.
    CompleteChallenge { points: i32 },
    /// Raw score adjustment, same arithmetic as `CompleteChallenge`.
    UpdateScore { points: i32 },
    /// Record a finished level and advance the campaign.
    CompleteLevel {
        level_id: u32,
        score: i32,
        attempts: u32,
        time_spent_secs: u64,
        completed_at: i64,
    },
    /// Upsert a badge as earned.
    EarnBadge { badge: BadgeSpec, earned_at: i64 },
    /// Discard everything and return to the initial empty state.
    ResetGame,
    /// Adopt a previously persisted snapshot (startup only).
    LoadProgress { snapshot: GameState },
}

impl GameState {
    /// Apply one action, producing the next state. Never fails.
    #[must_use]
    pub fn apply(&self, action: &GameAction) -> Self {
        match action {
            GameAction::StartGame { player_name } => Self {
                current_level: 1,
                player_name: player_name.clone(),
                ..self.clone()
            },
            GameAction::SetPlayerName { player_name } => Self {
                player_name: player_name.clone(),
                ..self.clone()
            },
            GameAction::StartLevel { level_id } => Self {
                current_level: *level_id,
                ..self.clone()
            },
            GameAction::CompleteChallenge { points } | GameAction::UpdateScore { points } => {
                Self {
                    score: self.score + points,
                    ..self.clone()
                }
            }
            GameAction::CompleteLevel {
                level_id,
                score,
                attempts,
                time_spent_secs,
                completed_at,
            } => self.complete_level(*level_id, *score, *attempts, *time_spent_secs, *completed_at),
            GameAction::EarnBadge { badge, earned_at } => {
                let mut next = self.clone();
                next.badges.retain(|b| b.id != badge.id);
                next.badges.push(Badge::from_spec(badge, *earned_at));
                next
            }
            GameAction::ResetGame => Self::default(),
            GameAction::LoadProgress { snapshot } => snapshot.clone(),
        }
    }

    fn complete_level(
        &self,
        level_id: u32,
        score: i32,
        attempts: u32,
        time_spent_secs: u64,
        completed_at: i64,
    ) -> Self {
        let mut next = self.clone();
        next.progress.retain(|p| p.level_id != level_id);
        next.progress.push(LevelProgress {
            level_id,
            is_completed: true,
            score,
            attempts,
            time_spent_secs,
            completed_at: Some(completed_at),
        });
        if level_id < LEVEL_COUNT {
            next.current_level = level_id + 1;
        }
        next.is_game_completed = level_id == LEVEL_COUNT;
        next
    }

    /// Progress record for a level, if any.
    #[must_use]
    pub fn progress_for(&self, level_id: u32) -> Option<&LevelProgress> {
        self.progress.iter().find(|p| p.level_id == level_id)
    }

    /// Badge by id, if earned.
    #[must_use]
    pub fn badge(&self, badge_id: &str) -> Option<&Badge> {
        self.badges.iter().find(|b| b.id == badge_id)
    }

    /// Number of completed levels.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.progress.iter().filter(|p| p.is_completed).count()
    }
}
