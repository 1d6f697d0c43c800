//! Errors - エラー型と分類
//!
//! # 分類
//! - **InvalidMove**: 入力境界で拒否（Round は変更しない）
//! - **InvalidConfiguration**: 起動時に致命的（壊れた表で Round を始めない）
//! - **InvalidPlayerIdentity**: 名前が空なら Round を作らない
//! - **ReportError**: 報告失敗は core が吸収し、ゲーム進行を止めない

use std::time::Duration;

use thiserror::Error;

use super::moves::MoveId;
use super::state::RoundState;

/// ConfigError は OutcomeTable の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("move set is empty")]
    EmptyMoveSet,

    #[error("move '{0}' is defined more than once")]
    DuplicateMove(MoveId),

    #[error("move '{owner}' beats unknown move '{target}'")]
    UnknownMove { owner: MoveId, target: MoveId },

    #[error("move '{0}' beats itself")]
    SelfBeating(MoveId),

    #[error("moves '{0}' and '{1}' beat each other")]
    MutualBeat(MoveId, MoveId),

    #[error("no outcome defined between '{0}' and '{1}'")]
    Undecided(MoveId, MoveId),

    #[error("failed to read configuration: {0}")]
    Unreadable(String),

    #[error("failed to parse configuration: {0}")]
    Malformed(String),
}

/// GameError は Round のライフサイクルで発生するドメインエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("move '{0}' is not part of the configured move set")]
    InvalidMove(MoveId),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("player name must not be empty")]
    InvalidPlayerIdentity,

    #[error("round cannot be resolved in state {state:?}")]
    NotReady { state: RoundState },

    #[error("outcome table is inconsistent: {0}")]
    Inconsistent(String),

    #[error("no round has been started")]
    NoActiveRound,

    #[error("round is already in progress (state {0:?})")]
    RoundInProgress(RoundState),
}

/// ReportError は ResultReporter の失敗
///
/// core はこのエラーをログに記録するだけで、呼び出し元には返さない。
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("reporter rejected the record: {0}")]
    Rejected(String),

    #[error("reporter I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("reporter did not answer within {0:?}")]
    TimedOut(Duration),
}
