//! Outcome model: result of comparing two moves.
//!
//! `Outcome` is what the resolver derives. `ReportLabel` is the shape the
//! reporter receives on the wire; the two are kept apart so the wire names can
//! stay fixed while the domain enum stays descriptive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one round from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Draw,
    PlayerWin,
    PlayerLose,
}

impl Outcome {
    pub fn label(self) -> ReportLabel {
        match self {
            Outcome::Draw => ReportLabel::Draw,
            Outcome::PlayerWin => ReportLabel::Win,
            Outcome::PlayerLose => ReportLabel::Lose,
        }
    }

    /// The same comparison seen from the other side of the table.
    pub fn reversed(self) -> Self {
        match self {
            Outcome::Draw => Outcome::Draw,
            Outcome::PlayerWin => Outcome::PlayerLose,
            Outcome::PlayerLose => Outcome::PlayerWin,
        }
    }
}

/// Outcome label handed to the result reporter.
///
/// Serialized as `"Win"`, `"Lose"`, `"Draw"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportLabel {
    Win,
    Lose,
    Draw,
}

impl fmt::Display for ReportLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportLabel::Win => "Win",
            ReportLabel::Lose => "Lose",
            ReportLabel::Draw => "Draw",
        };
        f.write_str(s)
    }
}
