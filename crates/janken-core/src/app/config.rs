//! GameConfig - 手の表・表示情報・演出時間の設定
//!
//! 設定は起動時に 1 回だけ読み込み、以後は変更しない。
//! JSON の形:
//!
//! ```json
//! {
//!   "moves": [
//!     { "id": "rock", "name": "Rock", "emoji": "✊", "beats": ["scissors", "lizard"] }
//!   ],
//!   "pacing": { "opponent_delay_ms": 1500, "result_delay_ms": 1500 },
//!   "report_timeout_ms": 5000
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{ConfigError, DisplayCatalog, MoveDisplay, MoveId, MoveSpec, OutcomeTable};
use crate::domain::table::standard_specs;

const DEFAULT_STAGE_DELAY_MS: u64 = 1500;
const DEFAULT_REPORT_TIMEOUT_MS: u64 = 5000;

/// One move as written in the configuration file (rules + presentation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveConfig {
    pub id: MoveId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub beats: Vec<MoveId>,
}

impl MoveConfig {
    fn spec(&self) -> MoveSpec {
        MoveSpec {
            id: self.id.clone(),
            beats: self.beats.clone(),
        }
    }

    fn display(&self) -> MoveDisplay {
        let name = if self.name.is_empty() {
            self.id.to_string()
        } else {
            self.name.clone()
        };
        MoveDisplay::new(name, self.emoji.clone())
    }
}

/// Delays between the staged reveals of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Player move accepted -> opponent move revealed.
    #[serde(default = "default_stage_delay_ms")]
    pub opponent_delay_ms: u64,
    /// Opponent move revealed -> outcome resolved.
    #[serde(default = "default_stage_delay_ms")]
    pub result_delay_ms: u64,
}

impl PacingConfig {
    pub fn instant() -> Self {
        Self {
            opponent_delay_ms: 0,
            result_delay_ms: 0,
        }
    }

    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    pub fn result_delay(&self) -> Duration {
        Duration::from_millis(self.result_delay_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            opponent_delay_ms: DEFAULT_STAGE_DELAY_MS,
            result_delay_ms: DEFAULT_STAGE_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub moves: Vec<MoveConfig>,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default = "default_report_timeout_ms")]
    pub report_timeout_ms: u64,
}

impl GameConfig {
    /// Rock-paper-scissors-lizard-Spock with the standard pacing.
    pub fn standard() -> Self {
        let display = DisplayCatalog::standard();
        let moves = standard_specs()
            .into_iter()
            .map(|spec| {
                let (name, emoji) = display
                    .get(&spec.id)
                    .map(|d| (d.name.clone(), d.emoji.clone()))
                    .unwrap_or_default();
                MoveConfig {
                    id: spec.id,
                    name,
                    emoji,
                    beats: spec.beats,
                }
            })
            .collect();
        Self {
            moves,
            pacing: PacingConfig::default(),
            report_timeout_ms: DEFAULT_REPORT_TIMEOUT_MS,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Unreadable(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn report_timeout(&self) -> Duration {
        Duration::from_millis(self.report_timeout_ms)
    }

    /// Split into validated rule data and presentation metadata.
    pub fn parts(&self) -> Result<(OutcomeTable, DisplayCatalog), ConfigError> {
        let table = OutcomeTable::new(self.moves.iter().map(MoveConfig::spec).collect())?;
        let mut display = DisplayCatalog::new();
        for mv in &self.moves {
            display.insert(mv.id.clone(), mv.display());
        }
        Ok((table, display))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn default_stage_delay_ms() -> u64 {
    DEFAULT_STAGE_DELAY_MS
}

fn default_report_timeout_ms() -> u64 {
    DEFAULT_REPORT_TIMEOUT_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_matches_standard_table() {
        let (table, display) = GameConfig::standard().parts().unwrap();
        assert_eq!(table, OutcomeTable::standard());
        assert_eq!(display, DisplayCatalog::standard());
    }

    #[test]
    fn standard_pacing_is_one_and_a_half_seconds_per_stage() {
        let pacing = GameConfig::standard().pacing;
        assert_eq!(pacing.opponent_delay(), Duration::from_millis(1500));
        assert_eq!(
            pacing.opponent_delay() + pacing.result_delay(),
            Duration::from_secs(3)
        );
    }

    #[test]
    fn parses_minimal_json_with_defaults() {
        let config = GameConfig::from_json_str(
            r#"{
                "moves": [
                    {"id": "rock", "beats": ["scissors"]},
                    {"id": "paper", "name": "Paper", "beats": ["rock"]},
                    {"id": "scissors", "emoji": "✂️", "beats": ["paper"]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.pacing, PacingConfig::default());
        assert_eq!(config.report_timeout(), Duration::from_secs(5));

        let (table, display) = config.parts().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(display.name(&MoveId::new("rock")), "rock");
        assert_eq!(display.badge(&MoveId::new("scissors")), "✂️ - scissors");
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn broken_relation_fails_on_split() {
        let config = GameConfig::from_json_str(
            r#"{"moves": [{"id": "rock"}, {"id": "paper"}]}"#,
        )
        .unwrap();
        assert_eq!(
            config.parts().unwrap_err(),
            ConfigError::Undecided(MoveId::new("rock"), MoveId::new("paper"))
        );
    }

    #[tokio::test]
    async fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        let json = serde_json::to_string(&GameConfig::standard()).unwrap();
        tokio::fs::write(&path, json).await.unwrap();

        let loaded = GameConfig::from_path(&path).await.unwrap();
        assert_eq!(loaded, GameConfig::standard());
    }

    #[tokio::test]
    async fn missing_file_is_unreadable() {
        let err = GameConfig::from_path("/definitely/not/here.json")
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable(_)));
    }
}
