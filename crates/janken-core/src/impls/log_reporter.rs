//! LogReporter - 結果をログに出すだけの ResultReporter
//!
//! 保存先を設定しないときのデフォルト。

use async_trait::async_trait;

use crate::domain::{GameRecord, ReportError, RoundId};
use crate::ports::ResultReporter;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

#[async_trait]
impl ResultReporter for LogReporter {
    async fn report(&self, round_id: RoundId, record: &GameRecord) -> Result<(), ReportError> {
        let payload = serde_json::to_string(record)?;
        tracing::info!(%round_id, %payload, "game result");
        Ok(())
    }
}
