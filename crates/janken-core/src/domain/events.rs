//! Events - ラウンド中に発生するドメインイベント
//!
//! フロントエンドはこれを受け取って中間状態（相手の手を待っている、など）を描画する。

use serde::Serialize;

use super::ids::RoundId;
use super::moves::MoveId;
use super::outcome::Outcome;
use super::player::PlayerName;

/// RoundEvent はライフサイクル順に発行される
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    Started {
        round_id: RoundId,
        player: PlayerName,
    },
    PlayerChose {
        round_id: RoundId,
        player_move: MoveId,
    },
    OpponentChose {
        round_id: RoundId,
        opponent_move: MoveId,
    },
    Resolved {
        round_id: RoundId,
        outcome: Outcome,
    },
    Reported {
        round_id: RoundId,
    },
    /// Reporter failed; informational only, the round is already reported.
    ReportFailed {
        round_id: RoundId,
        reason: String,
    },
}

impl RoundEvent {
    pub fn round_id(&self) -> RoundId {
        match self {
            RoundEvent::Started { round_id, .. }
            | RoundEvent::PlayerChose { round_id, .. }
            | RoundEvent::OpponentChose { round_id, .. }
            | RoundEvent::Resolved { round_id, .. }
            | RoundEvent::Reported { round_id }
            | RoundEvent::ReportFailed { round_id, .. } => *round_id,
        }
    }
}
