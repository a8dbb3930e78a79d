//! Prerequisite / unlock evaluation
//!
//! Evaluated fresh from current progress on every query; no unlocked flag is
//! ever stored, so there is nothing to go stale.

use std::collections::BTreeSet;

use crate::catalog::{Catalog, Level};
use crate::state::LevelProgress;

/// Whether a level is playable given the player's progress. Level 1 has no
/// prerequisites and is always unlocked; any other level requires every one
/// of its prerequisites to carry a completed progress entry.
#[must_use]
pub fn is_unlocked(level: &Level, progress: &[LevelProgress]) -> bool {
    if level.id == 1 {
        return true;
    }
    level.prerequisites.iter().all(|prereq_id| {
        progress
            .iter()
            .any(|p| p.level_id == *prereq_id && p.is_completed)
    })
}

/// Ids of all completed levels.
#[must_use]
pub fn completed_level_ids(progress: &[LevelProgress]) -> BTreeSet<u32> {
    progress
        .iter()
        .filter(|p| p.is_completed)
        .map(|p| p.level_id)
        .collect()
}

/// Ids of every level currently unlocked, in catalog order.
#[must_use]
pub fn unlocked_level_ids(catalog: &Catalog, progress: &[LevelProgress]) -> Vec<u32> {
    catalog
        .levels
        .iter()
        .filter(|level| is_unlocked(level, progress))
        .map(|level| level.id)
        .collect()
}

/// Total score accumulated across completed levels.
#[must_use]
pub fn total_earned_score(progress: &[LevelProgress]) -> i32 {
    progress
        .iter()
        .filter(|p| p.is_completed)
        .map(|p| p.score)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Difficulty;

    fn level(id: u32, prerequisites: Vec<u32>) -> Level {
        Level {
            id,
            title: format!("level {id}"),
            description: String::new(),
            icon: String::new(),
            difficulty: Difficulty::Easy,
            estimated_time_mins: 5,
            prerequisites,
            badge: None,
            challenges: Vec::new(),
        }
    }

    fn completed(level_id: u32) -> LevelProgress {
        LevelProgress {
            level_id,
            is_completed: true,
            score: 10,
            attempts: 1,
            time_spent_secs: 60,
            completed_at: Some(0),
        }
    }

    #[test]
    fn level_one_is_always_unlocked() {
        assert!(is_unlocked(&level(1, vec![]), &[]));
        // Even a nonsensical prerequisite list cannot lock level 1.
        assert!(is_unlocked(&level(1, vec![4]), &[]));
    }

    #[test]
    fn locked_until_every_prerequisite_is_completed() {
        let gated = level(5, vec![3, 4]);
        assert!(!is_unlocked(&gated, &[]));
        assert!(!is_unlocked(&gated, &[completed(3)]));
        assert!(is_unlocked(&gated, &[completed(3), completed(4)]));
    }

    #[test]
    fn incomplete_progress_entries_do_not_count() {
        let mut started = completed(1);
        started.is_completed = false;
        assert!(!is_unlocked(&level(2, vec![1]), &[started]));
    }

    #[test]
    fn unlocked_ids_follow_catalog_order() {
        let catalog = Catalog {
            levels: vec![
                level(1, vec![]),
                level(2, vec![1]),
                level(3, vec![2]),
            ],
        };
        assert_eq!(unlocked_level_ids(&catalog, &[]), vec![1]);
        assert_eq!(unlocked_level_ids(&catalog, &[completed(1)]), vec![1, 2]);
    }

    #[test]
    fn score_sums_only_completed_levels() {
        let mut abandoned = completed(2);
        abandoned.is_completed = false;
        abandoned.score = 999;
        assert_eq!(total_earned_score(&[completed(1), abandoned]), 10);
    }
}
