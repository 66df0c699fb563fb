//! Paced speech engine that reports word boundaries on a timer.
//!
//! Stands in for a platform voice where none is available. Utterances are
//! spoken one at a time by a background task, in submission order, at a
//! fixed number of words per minute.
//!
//! Cancellation uses a generation counter: `cancel_all` bumps it and queued
//! jobs from an older generation are skipped. The in-flight job stops at
//! its next word without reporting `ended`; a pending gap is cut short.
//! A paused engine does not start its next utterance.

use std::time::Duration;

use lingo_core::{EngineError, Settings, SpeechEngine, Utterance, UtteranceEvents};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::segment::segment;

/// Pacing for the [`PacedSpeechEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacedEngineConfig {
    /// Speaking rate.
    pub words_per_minute: u32,
    /// Silence after each utterance.
    pub utterance_gap: Duration,
}

impl PacedEngineConfig {
    /// Pacing taken from application settings.
    #[must_use]
    pub const fn from_settings(settings: &Settings) -> Self {
        Self {
            words_per_minute: settings.effective_words_per_minute(),
            utterance_gap: Duration::from_millis(settings.effective_utterance_gap_ms()),
        }
    }

    /// Time spent on each word.
    #[must_use]
    pub fn word_duration(&self) -> Duration {
        Duration::from_millis(60_000 / u64::from(self.words_per_minute.max(1)))
    }
}

impl Default for PacedEngineConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

struct Job {
    utterance: Utterance,
    events: UtteranceEvents,
    generation: u64,
}

/// Timer-driven [`SpeechEngine`].
///
/// Must be created inside a Tokio runtime. Dropping the engine stops its
/// worker.
pub struct PacedSpeechEngine {
    jobs: mpsc::UnboundedSender<Job>,
    generation: watch::Sender<u64>,
    paused: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl PacedSpeechEngine {
    /// Start the engine's worker task.
    #[must_use]
    pub fn spawn(config: PacedEngineConfig) -> Self {
        let (jobs, jobs_rx) = mpsc::unbounded_channel();
        let (generation, generation_rx) = watch::channel(0);
        let (paused, paused_rx) = watch::channel(false);

        tracing::debug!(
            wpm = config.words_per_minute,
            gap_ms = config.utterance_gap.as_millis(),
            "Starting paced speech engine"
        );
        let worker = tokio::spawn(run(config, jobs_rx, generation_rx, paused_rx));

        Self {
            jobs,
            generation,
            paused,
            worker,
        }
    }
}

impl SpeechEngine for PacedSpeechEngine {
    fn speak(&mut self, utterance: Utterance, events: UtteranceEvents) -> Result<(), EngineError> {
        if utterance.text.trim().is_empty() {
            return Err(EngineError::Rejected("utterance has no text".to_string()));
        }
        let job = Job {
            generation: *self.generation.borrow(),
            utterance,
            events,
        };
        self.jobs.send(job).map_err(|_| EngineError::Closed)
    }

    fn cancel_all(&mut self) {
        self.generation.send_modify(|g| *g += 1);
        self.paused.send_replace(false);
    }

    fn pause(&mut self) {
        self.paused.send_replace(true);
    }

    fn resume(&mut self) {
        self.paused.send_replace(false);
    }
}

impl Drop for PacedSpeechEngine {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

// ── Worker ─────────────────────────────────────────────────────────

async fn run(
    config: PacedEngineConfig,
    mut jobs: mpsc::UnboundedReceiver<Job>,
    mut generation: watch::Receiver<u64>,
    mut paused: watch::Receiver<bool>,
) {
    while let Some(job) = jobs.recv().await {
        if job.generation != *generation.borrow() {
            tracing::trace!(utterance = %job.utterance.id, "Skipping cancelled utterance");
            continue;
        }

        if speak(&config, &job, &mut generation, &mut paused).await {
            job.events.ended();
            if !config.utterance_gap.is_zero() {
                tokio::select! {
                    biased;
                    () = cancelled(&mut generation, job.generation) => {}
                    () = sleep(config.utterance_gap) => {}
                }
            }
        } else {
            tracing::trace!(utterance = %job.utterance.id, "Utterance cancelled mid-speech");
        }
    }
    tracing::debug!("Paced speech engine stopped");
}

/// Speak one job. Returns `false` if it was cancelled.
async fn speak(
    config: &PacedEngineConfig,
    job: &Job,
    generation: &mut watch::Receiver<u64>,
    paused: &mut watch::Receiver<bool>,
) -> bool {
    if !wait_until_resumed(paused, generation, job.generation).await {
        return false;
    }
    job.events.started();
    let word = config.word_duration();

    for span in segment(&job.utterance.text)
        .iter()
        .filter(|s| !s.word.is_empty())
    {
        if !wait_until_resumed(paused, generation, job.generation).await {
            return false;
        }
        job.events.progress(span.start);

        tokio::select! {
            biased;
            () = cancelled(generation, job.generation) => return false,
            () = sleep(word) => {}
        }
    }

    wait_until_resumed(paused, generation, job.generation).await
}

/// Block while paused. Returns `false` if cancelled meanwhile.
async fn wait_until_resumed(
    paused: &mut watch::Receiver<bool>,
    generation: &mut watch::Receiver<u64>,
    current: u64,
) -> bool {
    while *paused.borrow_and_update() {
        tokio::select! {
            biased;
            () = cancelled(generation, current) => return false,
            changed = paused.changed() => {
                if changed.is_err() {
                    return false;
                }
            }
        }
    }
    *generation.borrow() == current
}

/// Resolves once the generation moves past `current`.
async fn cancelled(generation: &mut watch::Receiver<u64>, current: u64) {
    while *generation.borrow() == current {
        if generation.changed().await.is_err() {
            return;
        }
    }
}
