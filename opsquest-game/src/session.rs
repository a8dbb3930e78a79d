//! Per-level play session
//!
//! Tracks the in-level interaction state the reducer deliberately does not
//! hold: which challenges of the level are already solved, the running level
//! score, the attempt counter, and the start time. The completed-challenge
//! set is what makes the caller-side idempotence contract of
//! `CompleteChallenge` explicit instead of conventional.

use std::collections::HashSet;

use crate::catalog::{BadgeSpec, Challenge, Level};
use crate::challenge::ChallengeSubmission;
use crate::state::GameAction;

/// What one submission did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Correct, first time: points were awarded.
    Awarded { points: i32 },
    /// Correct, but this challenge was already solved; nothing awarded.
    AlreadyCompleted,
    /// Wrong answer; the player retries without losing level progress.
    Incorrect,
}

/// Mutable state of one level being played.
#[derive(Debug, Clone)]
pub struct LevelSession {
    level_id: u32,
    badge: Option<BadgeSpec>,
    challenges: Vec<Challenge>,
    current: usize,
    completed: HashSet<String>,
    score: i32,
    attempts: u32,
    started_at: i64,
}

impl LevelSession {
    #[must_use]
    pub fn new(level: &Level, started_at: i64) -> Self {
        Self {
            level_id: level.id,
            badge: level.badge.clone(),
            challenges: level.challenges.clone(),
            current: 0,
            completed: HashSet::new(),
            score: 0,
            attempts: 1,
            started_at,
        }
    }

    #[must_use]
    pub const fn level_id(&self) -> u32 {
        self.level_id
    }

    #[must_use]
    pub const fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The challenge the player is currently facing.
    #[must_use]
    pub fn current_challenge(&self) -> Option<&Challenge> {
        self.challenges.get(self.current)
    }

    /// (solved, total) challenge counts for the progress bar.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.completed.len(), self.challenges.len())
    }

    /// Whether a specific challenge has been solved in this session.
    #[must_use]
    pub fn is_challenge_completed(&self, challenge_id: &str) -> bool {
        self.completed.contains(challenge_id)
    }

    /// Whether every challenge of the level has been solved.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.completed.len() == self.challenges.len()
    }

    /// Grade a submission against the current challenge. Points are awarded
    /// at most once per challenge; the completed set is checked before any
    /// award.
    pub fn submit(&mut self, submission: &ChallengeSubmission) -> SubmitOutcome {
        let Some(challenge) = self.challenges.get(self.current) else {
            return SubmitOutcome::AlreadyCompleted;
        };
        if !challenge.data.grade(submission).is_correct() {
            return SubmitOutcome::Incorrect;
        }
        if self.completed.contains(&challenge.id) {
            return SubmitOutcome::AlreadyCompleted;
        }
        let points = challenge.points;
        self.completed.insert(challenge.id.clone());
        self.score += points;
        SubmitOutcome::Awarded { points }
    }

    /// Move the cursor to the next challenge once the current one is solved.
    /// Returns whether the cursor moved.
    pub fn advance(&mut self) -> bool {
        let solved = self
            .current_challenge()
            .is_some_and(|c| self.completed.contains(&c.id));
        if solved && self.current + 1 < self.challenges.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Jump back to an earlier, already reachable challenge. Indices past the
    /// furthest point reached are ignored.
    pub fn revisit(&mut self, index: usize) {
        if index <= self.current {
            self.current = index;
        }
    }

    /// Record a retry of the current challenge. Solved challenges stay
    /// solved; only the attempt counter moves.
    pub fn retry(&mut self) {
        self.attempts += 1;
    }

    /// Close out the level: the `CompleteLevel` record plus the badge award
    /// when the level carries one. Call once [`Self::is_finished`] holds.
    #[must_use]
    pub fn finish(&self, now: i64) -> Vec<GameAction> {
        let time_spent_secs = u64::try_from(now.saturating_sub(self.started_at)).unwrap_or(0);
        let mut actions = vec![GameAction::CompleteLevel {
            level_id: self.level_id,
            score: self.score,
            attempts: self.attempts,
            time_spent_secs,
            completed_at: now,
        }];
        if let Some(badge) = &self.badge {
            actions.push(GameAction::EarnBadge {
                badge: badge.clone(),
                earned_at: now,
            });
        }
        actions
    }
}
