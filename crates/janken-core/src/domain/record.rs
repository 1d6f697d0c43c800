//! Records handed to and persisted by result reporters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::RoundId;
use super::outcome::ReportLabel;
use super::player::PlayerName;

/// The record a reporter receives for one completed round.
///
/// Wire shape: `{"player":"Ada","outcome":"Win"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub player: PlayerName,
    pub outcome: ReportLabel,
}

/// A persisted result document (one per reported round).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RoundId,
    pub player: PlayerName,
    pub outcome: ReportLabel,
    pub recorded_at: DateTime<Utc>,
}

impl StoredRecord {
    pub fn new(id: RoundId, record: &GameRecord, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id,
            player: record.player.clone(),
            outcome: record.outcome,
            recorded_at,
        }
    }
}
