//! Scoreboard - セッション内の勝敗集計

use serde::Serialize;
use std::fmt;

use crate::domain::Outcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWin => self.wins += 1,
            Outcome::PlayerLose => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} played: {} won, {} lost, {} drawn",
            self.played(),
            self.wins,
            self.losses,
            self.draws
        )
    }
}
