//! Presentation metadata for moves and the player-facing messages built from it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::moves::MoveId;
use super::outcome::Outcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDisplay {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
}

impl MoveDisplay {
    pub fn new(name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
        }
    }
}

/// Labels and emoji keyed by move id.
///
/// Lookups never fail: an id without metadata renders as itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayCatalog {
    entries: HashMap<MoveId, MoveDisplay>,
}

impl DisplayCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for (id, name, emoji) in [
            ("rock", "Rock", "✊"),
            ("paper", "Paper", "🧻"),
            ("scissors", "Scissors", "✂️"),
            ("lizard", "Lizard", "🦎"),
            ("spock", "Spock", "🖖"),
        ] {
            catalog.insert(MoveId::from(id), MoveDisplay::new(name, emoji));
        }
        catalog
    }

    pub fn insert(&mut self, id: MoveId, display: MoveDisplay) {
        self.entries.insert(id, display);
    }

    pub fn get(&self, id: &MoveId) -> Option<&MoveDisplay> {
        self.entries.get(id)
    }

    pub fn name<'a>(&'a self, id: &'a MoveId) -> &'a str {
        self.get(id).map_or(id.as_str(), |d| d.name.as_str())
    }

    /// "✊ - Rock", or just the name when no emoji is configured.
    pub fn badge(&self, id: &MoveId) -> String {
        match self.get(id) {
            Some(d) if !d.emoji.is_empty() => format!("{} - {}", d.emoji, d.name),
            Some(d) => d.name.clone(),
            None => id.to_string(),
        }
    }

    pub fn player_choice_message(&self, id: &MoveId) -> String {
        format!("You have chosen {}", self.badge(id))
    }

    pub fn opponent_choice_message(&self, id: &MoveId) -> String {
        format!("PC has chosen {}", self.badge(id))
    }

    pub fn result_message(&self, outcome: Outcome, player: &MoveId, opponent: &MoveId) -> String {
        match outcome {
            Outcome::Draw => "Draw 🤷🏽‍♀️".to_string(),
            Outcome::PlayerWin => format!(
                "✅ You have won with {} against {}",
                self.name(player),
                self.name(opponent)
            ),
            Outcome::PlayerLose => format!(
                "❌ You have lost with {} against {}",
                self.name(player),
                self.name(opponent)
            ),
        }
    }
}
