//! Play command handler.
//!
//! Wires the paced engine into a playback session, renders playback events
//! as they arrive and lets the user pause or stop from the keyboard.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use lingo_core::{
    ChannelPlaybackEmitter, LanguageCode, PlaybackEvent, Sentence, SentenceId, TranslationService,
};
use lingo_speech::{PacedSpeechEngine, PlaybackController, PlaybackSession};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::glossary::GlossaryTranslator;
use crate::handlers::validate::load_batch;
use crate::presentation::PlaybackRenderer;

/// Keyboard command read from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    TogglePause,
    Quit,
}

impl Key {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "q" | "quit" | "s" | "stop" => Self::Quit,
            _ => Self::TogglePause,
        }
    }
}

/// Play a batch file, or one sentence of it.
///
/// # Arguments
///
/// * `index` - 1-based sentence to play alone; the whole list when `None`
/// * `translate_to` - overlay target, falling back to the configured one
/// * `glossary` - translation source for the overlay
/// * `words_per_minute` - speaking rate override
pub async fn execute(
    ctx: &CliContext,
    file: &Path,
    index: Option<u32>,
    translate_to: Option<&str>,
    glossary: Option<&Path>,
    words_per_minute: Option<u32>,
) -> Result<()> {
    let sentences = load_batch(file)?;
    let selection = select(&sentences, index)?;

    let target = ctx.translation_target(translate_to)?;
    let translations = translations(&sentences, target.as_ref(), glossary).await?;

    let engine = PacedSpeechEngine::spawn(ctx.engine_config(words_per_minute)?);
    let (emitter, events) = ChannelPlaybackEmitter::new();
    let controller = PlaybackController::new(Box::new(engine), Arc::new(emitter));
    let mut session = PlaybackSession::new(controller);

    let renderer = PlaybackRenderer::new(&sentences, translations);
    let printer = tokio::spawn(print_events(events, renderer));

    let cancel = CancellationToken::new();
    watch_ctrl_c(cancel.clone());
    let mut keys = spawn_key_reader();
    println!("Press Enter to pause or resume, q then Enter to stop.\n");

    let started = match selection {
        Some(sentence) => session.play_sentence(sentence),
        None => session.play_all(sentences),
    };
    started.map_err(CliError::from)?;

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                session.stop();
                break;
            }

            Some(key) = keys.recv() => match key {
                Key::TogglePause => {
                    session.toggle_pause_resume();
                }
                Key::Quit => {
                    session.stop();
                    break;
                }
            },

            advanced = session.step() => {
                if !advanced {
                    break;
                }
            }
        }
    }

    // Dropping the session drops the emitter, which ends the printer.
    drop(session);
    printer.await?;
    Ok(())
}

/// The sentence chosen by a 1-based `index`, if any.
fn select(sentences: &[Sentence], index: Option<u32>) -> Result<Option<Sentence>, CliError> {
    let Some(index) = index else {
        return Ok(None);
    };
    usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| sentences.get(i))
        .cloned()
        .map(Some)
        .ok_or_else(|| {
            CliError::Arguments(format!(
                "index {index} is out of range (batch has {} sentences)",
                sentences.len()
            ))
        })
}

async fn translations(
    sentences: &[Sentence],
    target: Option<&LanguageCode>,
    glossary: Option<&Path>,
) -> Result<HashMap<SentenceId, String>, CliError> {
    let Some(target) = target else {
        return Ok(HashMap::new());
    };
    let Some(glossary) = glossary else {
        tracing::warn!(target = %target, "No glossary given; skipping translations");
        return Ok(HashMap::new());
    };

    let service = TranslationService::new(Arc::new(GlossaryTranslator::load(glossary)?));
    Ok(service.overlay_by_id(sentences, target).await)
}

async fn print_events(mut events: mpsc::UnboundedReceiver<PlaybackEvent>, renderer: PlaybackRenderer) {
    while let Some(event) = events.recv().await {
        if let Some(line) = renderer.render(&event) {
            println!("{line}");
        }
    }
}

fn watch_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });
}

/// Read keyboard commands on a plain thread so a pending read never holds
/// up runtime shutdown.
fn spawn_key_reader() -> mpsc::UnboundedReceiver<Key> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Key::parse(&line)).is_err() {
                break;
            }
        }
    });
    rx
}
