//! Pacer の実装
//!
//! - TokioPacer: tokio::time::sleep（本番用、paused clock でもテスト可能）
//! - NoPause: 待たない（テスト・`--fast` 用）

use std::time::Duration;

use async_trait::async_trait;

use crate::ports::Pacer;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        tokio::time::sleep(delay).await;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

#[async_trait]
impl Pacer for NoPause {
    async fn pause(&self, _delay: Duration) {}
}
