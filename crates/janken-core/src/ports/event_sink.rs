//! EventSink port - イベント通知の抽象化
//!
//! # 実装
//! - NoopEventSink: 何もしない
//! - ChannelEventSink: tokio mpsc で UI 側に流す

use crate::domain::RoundEvent;

/// EventSink はラウンドのイベントを受け取る
///
/// 同期メソッド: 送信側はイベントの処理を待たない。
pub trait EventSink: Send + Sync {
    fn emit(&self, event: RoundEvent);
}
