//! InMemoryReporter - 開発・テスト用の ResultReporter
//!
//! 受け取ったレコードをメモリに溜めるだけ。`failing()` で作ると
//! 呼び出しは記録した上で常に失敗する（報告失敗のシナリオ用）。

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{GameRecord, ReportError, RoundId};
use crate::ports::ResultReporter;

#[derive(Debug, Default)]
pub struct InMemoryReporter {
    records: Mutex<Vec<(RoundId, GameRecord)>>,
    calls: AtomicUsize,
    fail_with: Option<String>,
}

impl InMemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter whose every call fails with `Rejected`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Successfully stored records, in arrival order.
    pub async fn records(&self) -> Vec<(RoundId, GameRecord)> {
        self.records.lock().await.clone()
    }

    /// Number of `report` calls, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResultReporter for InMemoryReporter {
    async fn report(&self, round_id: RoundId, record: &GameRecord) -> Result<(), ReportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.fail_with {
            return Err(ReportError::Rejected(reason.clone()));
        }
        self.records.lock().await.push((round_id, record.clone()));
        Ok(())
    }
}
