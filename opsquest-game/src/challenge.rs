//! Challenge evaluators
//!
//! All challenge types share one outer contract: a submission yields a
//! correctness verdict, points are awarded only on success, and an incorrect
//! submission never grants partial credit. The terminal type additionally has
//! an interactive form ([`TerminalSession`]) that checks one command at a
//! time.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{ChallengeData, DragDropData, RoleAssignmentData, TerminalData};

/// Outcome of grading a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Player input for a single challenge, one variant per challenge type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeSubmission {
    /// Index of the chosen option.
    Quiz { selected: usize },
    /// Item id -> drop zone id placements.
    DragDrop { placements: BTreeMap<String, String> },
    /// Full command transcript, graded by replay in order.
    Terminal { transcript: Vec<String> },
    /// Character id -> granted permission ids.
    RoleAssignment {
        assignments: BTreeMap<String, BTreeSet<String>>,
    },
    /// Free-text answer.
    Puzzle { answer: String },
}

impl ChallengeData {
    /// Grade a submission against this challenge. A submission of the wrong
    /// kind is simply incorrect, never an error.
    #[must_use]
    pub fn grade(&self, submission: &ChallengeSubmission) -> Verdict {
        let correct = match (self, submission) {
            (Self::Quiz(quiz), ChallengeSubmission::Quiz { selected }) => {
                *selected == quiz.correct_answer
            }
            (Self::DragDrop(data), ChallengeSubmission::DragDrop { placements }) => {
                check_drag_drop(data, placements)
            }
            (Self::Terminal(data), ChallengeSubmission::Terminal { transcript }) => {
                check_transcript(data, transcript)
            }
            (Self::RoleAssignment(data), ChallengeSubmission::RoleAssignment { assignments }) => {
                check_role_assignment(data, assignments)
            }
            (Self::Puzzle(puzzle), ChallengeSubmission::Puzzle { answer }) => {
                commands_match(&puzzle.answer, answer)
            }
            _ => false,
        };
        if correct {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }
}

/// Whether every item has been placed in some zone. Submission is only
/// enabled once this holds.
#[must_use]
pub fn placements_complete(data: &DragDropData, placements: &BTreeMap<String, String>) -> bool {
    data.items
        .iter()
        .all(|item| placements.contains_key(&item.id))
}

fn check_drag_drop(data: &DragDropData, placements: &BTreeMap<String, String>) -> bool {
    data.correct_mappings
        .iter()
        .all(|(item_id, zone_id)| placements.get(item_id) == Some(zone_id))
}

fn check_role_assignment(
    data: &RoleAssignmentData,
    assignments: &BTreeMap<String, BTreeSet<String>>,
) -> bool {
    data.characters.iter().all(|character| {
        let canonical: BTreeSet<&str> = data
            .correct_assignments
            .get(&character.id)
            .map(|perms| perms.iter().map(String::as_str).collect())
            .unwrap_or_default();
        let submitted: BTreeSet<&str> = assignments
            .get(&character.id)
            .map(|perms| perms.iter().map(String::as_str).collect())
            .unwrap_or_default();
        submitted == canonical
    })
}

fn check_transcript(data: &TerminalData, transcript: &[String]) -> bool {
    let mut session = TerminalSession::new(data);
    for line in transcript {
        if matches!(session.submit(line), CommandOutcome::Rejected { .. }) {
            return false;
        }
    }
    session.is_complete()
}

/// Case-insensitive comparison of trimmed command text.
fn commands_match(expected: &str, entered: &str) -> bool {
    expected.trim().eq_ignore_ascii_case(entered.trim())
}

/// Result of entering one command into a [`TerminalSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command matched; the sequence moved forward.
    Advanced { output: Option<String> },
    /// The command matched and it was the last one in the sequence.
    Completed { output: Option<String> },
    /// The command did not match the next expected command. The cursor does
    /// not move; the player must retry this step.
    Rejected { expected: String },
}

/// Interactive state for a terminal challenge: a cursor into the expected
/// command sequence. Commands must be entered in full, in order; there is no
/// way to skip or reorder.
#[derive(Debug, Clone)]
pub struct TerminalSession {
    expected: Vec<String>,
    output: BTreeMap<String, String>,
    cursor: usize,
}

impl TerminalSession {
    #[must_use]
    pub fn new(data: &TerminalData) -> Self {
        Self {
            expected: data.expected_commands.clone(),
            output: data.simulated_output.clone(),
            cursor: 0,
        }
    }

    /// Enter one command line.
    pub fn submit(&mut self, line: &str) -> CommandOutcome {
        let Some(expected) = self.expected.get(self.cursor) else {
            // Sequence already finished; extra input changes nothing.
            return CommandOutcome::Completed { output: None };
        };
        if !commands_match(expected, line) {
            return CommandOutcome::Rejected {
                expected: expected.clone(),
            };
        }
        let output = self.output.get(expected).cloned();
        self.cursor += 1;
        if self.cursor == self.expected.len() {
            CommandOutcome::Completed { output }
        } else {
            CommandOutcome::Advanced { output }
        }
    }

    /// Restart the sequence from the first command (the retry action).
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Whether the full expected sequence has been entered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.expected.len()
    }

    /// (entered, total) step counts for the prompt.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.expected.len())
    }

    /// The command the player is expected to enter next.
    #[must_use]
    pub fn next_expected(&self) -> Option<&str> {
        self.expected.get(self.cursor).map(String::as_str)
    }
}
