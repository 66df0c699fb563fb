//! Playback session: drives a controller and publishes state snapshots.
//!
//! The controller itself never waits. A session pumps engine events into
//! it and broadcasts a [`PlaybackState`] snapshot over a `watch` channel
//! after every change, which is what renderers subscribe to.

use lingo_core::{PlaybackState, Sentence};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::controller::PlaybackController;
use crate::error::PlaybackError;

/// A controller plus a snapshot channel.
pub struct PlaybackSession {
    controller: PlaybackController,
    snapshots: watch::Sender<PlaybackState>,
}

impl PlaybackSession {
    /// Wrap `controller`.
    pub fn new(controller: PlaybackController) -> Self {
        let (snapshots, _) = watch::channel(controller.snapshot());
        Self {
            controller,
            snapshots,
        }
    }

    /// Subscribe to state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.snapshots.subscribe()
    }

    /// The wrapped controller.
    pub const fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Play one sentence. See [`PlaybackController::play_sentence`].
    pub fn play_sentence(&mut self, sentence: Sentence) -> Result<(), PlaybackError> {
        let result = self.controller.play_sentence(sentence);
        self.publish();
        result
    }

    /// Play every sentence in order. See [`PlaybackController::play_all`].
    pub fn play_all(&mut self, sentences: Vec<Sentence>) -> Result<(), PlaybackError> {
        let result = self.controller.play_all(sentences);
        self.publish();
        result
    }

    /// Stop playback and return to idle.
    pub fn stop(&mut self) {
        self.controller.stop();
        self.publish();
    }

    /// Toggle pause. Returns the new paused flag.
    pub fn toggle_pause_resume(&mut self) -> bool {
        let paused = self.controller.toggle_pause_resume();
        self.publish();
        paused
    }

    /// Apply the next engine event. Returns `false` once idle.
    pub async fn step(&mut self) -> bool {
        let advanced = self.controller.advance().await;
        if advanced {
            self.publish();
        }
        advanced
    }

    /// Pump engine events until playback finishes or `cancel` fires.
    ///
    /// Cancellation stops playback before returning.
    pub async fn run_until_idle(&mut self, cancel: &CancellationToken) {
        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    tracing::info!("Playback session cancelled");
                    self.stop();
                    return;
                }

                advanced = self.step() => {
                    if !advanced {
                        return;
                    }
                }
            }
        }
    }

    /// Publish only when the state actually changed.
    fn publish(&self) {
        let current = self.controller.snapshot();
        self.snapshots.send_if_modified(|state| {
            if *state == current {
                false
            } else {
                *state = current;
                true
            }
        });
    }
}
