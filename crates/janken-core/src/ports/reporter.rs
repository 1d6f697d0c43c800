//! ResultReporter port - 結果の永続化・送信
//!
//! # 設計原則
//! - 完了したラウンドごとに 1 回だけ呼ばれる
//! - 失敗しても呼び出し側はゲームを続ける（best-effort、リトライなし）
//!
//! # 実装
//! - InMemoryReporter（テスト用、失敗モードあり）
//! - LogReporter（tracing に出すだけ）
//! - JsonLinesReporter（ファイルに 1 行 1 ドキュメントで追記）

use async_trait::async_trait;

use crate::domain::{GameRecord, ReportError, RoundId};

#[async_trait]
pub trait ResultReporter: Send + Sync {
    /// Deliver one record. `round_id` lets stores key documents; the
    /// payload itself is `{player, outcome}`.
    async fn report(&self, round_id: RoundId, record: &GameRecord) -> Result<(), ReportError>;
}
