//! Static level and challenge catalog
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Total number of levels in the campaign. The catalog is fixed-size.
pub const LEVEL_COUNT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(()),
        }
    }
}

/// Badge template attached to a level. Earning it stamps the timestamp and
/// turns it into a [`crate::state::Badge`] in the player's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSpec {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// A draggable item in a drag-drop challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragDropItem {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub kind: String,
}

/// A target zone items get dropped into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropZone {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub accepted_kinds: Vec<String>,
}

/// A fictional team member in a role-assignment challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub description: String,
}

/// A grantable permission in a role-assignment challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizData {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragDropData {
    pub instruction: String,
    pub items: Vec<DragDropItem>,
    pub drop_zones: Vec<DropZone>,
    /// Canonical item id -> drop zone id mapping.
    pub correct_mappings: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalData {
    pub instruction: String,
    /// Commands the player must enter, in this exact order.
    pub expected_commands: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    /// Output printed after each expected command, keyed by the command text.
    #[serde(default)]
    pub simulated_output: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignmentData {
    pub instruction: String,
    pub characters: Vec<Character>,
    pub permissions: Vec<Permission>,
    /// Canonical character id -> permission ids. A character absent from the
    /// map correctly receives no permissions.
    pub correct_assignments: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleData {
    pub instruction: String,
    pub answer: String,
}

/// Type-specific challenge payload. The tag fixes the payload schema, and
/// grading dispatches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ChallengeData {
    Quiz(QuizData),
    DragDrop(DragDropData),
    Terminal(TerminalData),
    RoleAssignment(RoleAssignmentData),
    Puzzle(PuzzleData),
}

impl ChallengeData {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Quiz(_) => "quiz",
            Self::DragDrop(_) => "drag-drop",
            Self::Terminal(_) => "terminal",
            Self::RoleAssignment(_) => "role-assignment",
            Self::Puzzle(_) => "puzzle",
        }
    }
}

/// One challenge within a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub points: i32,
    pub data: ChallengeData,
}

/// A campaign level. Static and immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Rough play time in minutes, shown on the level card.
    #[serde(default)]
    pub estimated_time_mins: u32,
    /// Level ids that must be completed before this one unlocks.
    #[serde(default)]
    pub prerequisites: Vec<u32>,
    #[serde(default)]
    pub badge: Option<BadgeSpec>,
    pub challenges: Vec<Challenge>,
}

impl Level {
    /// Sum of the points of every challenge in this level.
    #[must_use]
    pub fn total_points(&self) -> i32 {
        self.challenges.iter().map(|c| c.points).sum()
    }
}

/// Container for the full level catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Catalog {
    pub levels: Vec<Level>,
}

impl Catalog {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self { levels: Vec::new() }
    }

    /// Load catalog data from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a valid catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the embedded campaign shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset fails to parse.
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(include_str!("../assets/levels.json"))
    }

    /// Find a level by id.
    #[must_use]
    pub fn find_level(&self, level_id: u32) -> Option<&Level> {
        self.levels.iter().find(|level| level.id == level_id)
    }

    /// Find a challenge anywhere in the catalog.
    #[must_use]
    pub fn find_challenge(&self, challenge_id: &str) -> Option<&Challenge> {
        self.levels
            .iter()
            .flat_map(|level| level.challenges.iter())
            .find(|challenge| challenge.id == challenge_id)
    }

    /// Sum of points across every challenge of every level.
    #[must_use]
    pub fn total_points(&self) -> i32 {
        self.levels.iter().map(Level::total_points).sum()
    }
}
