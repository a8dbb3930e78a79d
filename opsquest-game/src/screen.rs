//! Screen routing derived from game state
//!
//! Pure presentation routing: which screen a UI should show is a function of
//! state plus the requested destination, never stored anywhere.

use crate::catalog::Catalog;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Dashboard,
    LevelSelector,
    Level(u32),
    Completion,
}

/// Where a fresh UI lands: the welcome screen until a player name exists.
#[must_use]
pub fn initial_screen(state: &GameState) -> Screen {
    if state.player_name.trim().is_empty() {
        Screen::Welcome
    } else {
        Screen::Dashboard
    }
}

/// Resolve a navigation request. A level id missing from the catalog is a
/// navigation fault and silently lands on the dashboard; everything else
/// passes through.
#[must_use]
pub fn resolve(state: &GameState, catalog: &Catalog, requested: Screen) -> Screen {
    if state.player_name.trim().is_empty() {
        return Screen::Welcome;
    }
    match requested {
        Screen::Level(level_id) if catalog.find_level(level_id).is_none() => Screen::Dashboard,
        other => other,
    }
}

/// Where to go after closing out a level.
#[must_use]
pub fn after_level(state: &GameState) -> Screen {
    if state.is_game_completed {
        Screen::Completion
    } else {
        Screen::Dashboard
    }
}
