//! EventSink の実装

use tokio::sync::mpsc;

use crate::domain::RoundEvent;
use crate::ports::EventSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: RoundEvent) {}
}

/// Forwards events to an unbounded channel.
///
/// A dropped receiver is not an error: the game keeps running without a listener.
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<RoundEvent>,
}

impl ChannelEventSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RoundEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: RoundEvent) {
        // ignore send error: listener may already be gone
        let _ = self.tx.send(event);
    }
}
