//! Playback event emitter port.
//!
//! Implementations handle transport details (channels, terminal output,
//! UI bindings). The controller only ever calls [`PlaybackEventEmitter::emit`].

use tokio::sync::mpsc;

use crate::events::PlaybackEvent;

/// Trait for emitting playback events.
///
/// # Implementations
///
/// - `NoopPlaybackEmitter` - For tests and contexts without listeners
/// - `ChannelPlaybackEmitter` - Forwards into an unbounded channel
pub trait PlaybackEventEmitter: Send + Sync {
    /// Emit a playback event. Must not block.
    fn emit(&self, event: PlaybackEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn PlaybackEventEmitter>;
}

/// Emitter that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopPlaybackEmitter;

impl NoopPlaybackEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl PlaybackEventEmitter for NoopPlaybackEmitter {
    fn emit(&self, _event: PlaybackEvent) {}

    fn clone_box(&self) -> Box<dyn PlaybackEventEmitter> {
        Box::new(self.clone())
    }
}

/// Emitter that forwards events into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelPlaybackEmitter {
    tx: mpsc::UnboundedSender<PlaybackEvent>,
}

impl ChannelPlaybackEmitter {
    /// Create an emitter and the receiver its events arrive on.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PlaybackEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PlaybackEventEmitter for ChannelPlaybackEmitter {
    fn emit(&self, event: PlaybackEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Playback event receiver dropped");
        }
    }

    fn clone_box(&self) -> Box<dyn PlaybackEventEmitter> {
        Box::new(self.clone())
    }
}
