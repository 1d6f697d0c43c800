//! State - Round の状態

use serde::{Deserialize, Serialize};

/// RoundState は 1 ラウンドの状態を表現
///
/// # 状態遷移
/// - AwaitingPlayerMove -> AwaitingOpponentMove -> Resolved -> Reported
///
/// Reported は終端。もう一度遊ぶには新しい Round を作る。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    /// Waiting for the player's selection (initial).
    AwaitingPlayerMove,

    /// Player move accepted; opponent move not revealed yet.
    AwaitingOpponentMove,

    /// Both moves known and the outcome computed.
    Resolved,

    /// Outcome handed to the reporter.
    Reported,
}

impl RoundState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundState::Reported)
    }

    /// Is player input accepted in this state?
    pub fn accepts_player_move(self) -> bool {
        matches!(self, RoundState::AwaitingPlayerMove)
    }
}
