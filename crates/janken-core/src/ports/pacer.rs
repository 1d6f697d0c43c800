//! Pacer port - 演出用の待ち時間
//!
//! 待ちは協調的な中断（await）であり、スレッドをブロックしない。
//! テストでは NoPause か tokio の paused clock を使う。

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}
