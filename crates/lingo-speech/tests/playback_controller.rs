//! Integration tests for the `PlaybackController` state machine.
//!
//! A scripted engine records every command and hands back the per-utterance
//! event handles, so each test decides exactly when the "engine" reports
//! start, progress, end or failure. No timers or audio are involved.

use std::sync::{Arc, Mutex};

use lingo_core::{
    ChannelPlaybackEmitter, EngineError, LanguageCode, NO_WORD, PlaybackEvent, PlaybackMode,
    PlaybackState, Sentence, SentenceId, SpeechEngine, Utterance, UtteranceEvents, UtteranceId,
    parse_sentence_response,
};
use lingo_speech::{PlaybackController, PlaybackError, PlaybackPhase, PlaybackSession};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

// ── Scripted engine ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Speak(UtteranceId, String),
    CancelAll,
    Pause,
    Resume,
}

#[derive(Clone, Default)]
struct ScriptedEngine {
    calls: Arc<Mutex<Vec<Call>>>,
    handles: Arc<Mutex<Vec<UtteranceEvents>>>,
    reject: Option<String>,
}

impl ScriptedEngine {
    fn rejecting(text: &str) -> Self {
        Self {
            reject: Some(text.to_string()),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn speak_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Speak(..)))
            .collect()
    }

    fn handle(&self, n: usize) -> UtteranceEvents {
        self.handles.lock().unwrap()[n].clone()
    }
}

impl SpeechEngine for ScriptedEngine {
    fn speak(&mut self, utterance: Utterance, events: UtteranceEvents) -> Result<(), EngineError> {
        if self.reject.as_deref() == Some(utterance.text.as_str()) {
            return Err(EngineError::Rejected("unsupported voice".to_string()));
        }
        self.calls
            .lock()
            .unwrap()
            .push(Call::Speak(utterance.id, utterance.text));
        self.handles.lock().unwrap().push(events);
        Ok(())
    }

    fn cancel_all(&mut self) {
        self.calls.lock().unwrap().push(Call::CancelAll);
    }

    fn pause(&mut self) {
        self.calls.lock().unwrap().push(Call::Pause);
    }

    fn resume(&mut self) {
        self.calls.lock().unwrap().push(Call::Resume);
    }
}

/// Engine that reports start and end as soon as it is asked to speak.
struct InstantEngine;

impl SpeechEngine for InstantEngine {
    fn speak(&mut self, _utterance: Utterance, events: UtteranceEvents) -> Result<(), EngineError> {
        events.started();
        events.progress(0);
        events.ended();
        Ok(())
    }

    fn cancel_all(&mut self) {}
    fn pause(&mut self) {}
    fn resume(&mut self) {}
}

// ── Helpers ────────────────────────────────────────────────────────

fn sentence(id: &str, text: &str) -> Sentence {
    Sentence::new(SentenceId::new(id), LanguageCode::new("en").unwrap(), text)
}

fn setup() -> (
    PlaybackController,
    ScriptedEngine,
    UnboundedReceiver<PlaybackEvent>,
) {
    let engine = ScriptedEngine::default();
    let (emitter, rx) = ChannelPlaybackEmitter::new();
    let controller = PlaybackController::new(Box::new(engine.clone()), Arc::new(emitter));
    (controller, engine, rx)
}

/// Drain all pending events from the event receiver and return them.
fn drain_events(rx: &mut UnboundedReceiver<PlaybackEvent>) -> Vec<PlaybackEvent> {
    let mut events = Vec::new();
    while let Ok(e) = rx.try_recv() {
        events.push(e);
    }
    events
}

fn active_id(controller: &PlaybackController) -> Option<&str> {
    controller
        .state()
        .active_sentence_id
        .as_ref()
        .map(SentenceId::as_str)
}

// ── Idle behaviour ─────────────────────────────────────────────────

#[test]
fn stop_on_idle_leaves_state_unchanged() {
    let (mut controller, engine, mut rx) = setup();

    controller.stop();

    assert_eq!(controller.state(), &PlaybackState::idle());
    assert_eq!(controller.phase(), PlaybackPhase::Idle);
    assert_eq!(engine.calls(), vec![Call::CancelAll]);
    assert!(drain_events(&mut rx).is_empty());
}

#[test]
fn toggle_while_idle_does_nothing() {
    let (mut controller, engine, _rx) = setup();

    assert!(!controller.toggle_pause_resume());
    assert!(!controller.state().paused);
    assert!(engine.calls().is_empty());
}

// ── Single sentence ────────────────────────────────────────────────

#[test]
fn progress_offset_highlights_word() {
    let (mut controller, engine, _rx) = setup();

    controller
        .play_sentence(sentence("s1", "Hello there friend"))
        .unwrap();
    assert_eq!(active_id(&controller), Some("s1"));
    assert_eq!(controller.state().active_word_index, NO_WORD);

    let spans: Vec<_> = controller
        .state()
        .word_spans
        .iter()
        .map(|s| (s.start, s.end))
        .collect();
    assert_eq!(spans, vec![(0, 5), (6, 11), (12, 17)]);

    let h = engine.handle(0);
    h.started();
    h.progress(7);
    controller.process_pending();

    assert_eq!(controller.state().active_word_index, 1);
}

#[test]
fn unmatched_offset_keeps_highlight() {
    let (mut controller, engine, _rx) = setup();
    controller.play_sentence(sentence("s1", "Hello there")).unwrap();

    let h = engine.handle(0);
    h.progress(6);
    h.progress(99);
    controller.process_pending();

    assert_eq!(controller.state().active_word_index, 1);
}

#[test]
fn end_resets_and_runs_hook() {
    let completed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&completed);

    let engine = ScriptedEngine::default();
    let (emitter, mut rx) = ChannelPlaybackEmitter::new();
    let mut controller = PlaybackController::new(Box::new(engine.clone()), Arc::new(emitter))
        .with_completion_hook(move |s| sink.lock().unwrap().push(s.id.to_string()));

    controller.play_sentence(sentence("s1", "Hi")).unwrap();
    let h = engine.handle(0);
    h.started();
    h.ended();
    controller.process_pending();

    assert_eq!(controller.state(), &PlaybackState::idle());
    assert_eq!(*completed.lock().unwrap(), vec!["s1".to_string()]);
    assert_eq!(
        drain_events(&mut rx),
        vec![
            PlaybackEvent::PlaybackStarted {
                mode: PlaybackMode::Single,
                sentence_count: 1
            },
            PlaybackEvent::SentenceStarted {
                sentence_id: SentenceId::new("s1")
            },
            PlaybackEvent::SentenceFinished {
                sentence_id: SentenceId::new("s1")
            },
            PlaybackEvent::PlaybackFinished,
        ]
    );
}

#[test]
fn play_sentence_while_active_is_busy() {
    let (mut controller, engine, _rx) = setup();
    controller.play_sentence(sentence("s1", "Hi")).unwrap();

    let err = controller.play_sentence(sentence("s2", "Bye")).unwrap_err();

    assert_eq!(err, PlaybackError::Busy);
    assert_eq!(active_id(&controller), Some("s1"));
    assert_eq!(engine.speak_calls().len(), 1);
}

// ── Queued batch ───────────────────────────────────────────────────

#[test]
fn play_all_submits_in_order_and_finishes_on_last_end() {
    let (mut controller, engine, _rx) = setup();

    controller
        .play_all(vec![sentence("s1", "Hi"), sentence("s2", "Bye")])
        .unwrap();

    let calls = engine.calls();
    assert_eq!(calls[0], Call::CancelAll);
    let Call::Speak(first, ref first_text) = calls[1] else {
        panic!("expected speak, got {:?}", calls[1]);
    };
    let Call::Speak(second, ref second_text) = calls[2] else {
        panic!("expected speak, got {:?}", calls[2]);
    };
    assert_eq!((first.index, first_text.as_str()), (0, "Hi"));
    assert_eq!((second.index, second_text.as_str()), (1, "Bye"));
    assert_eq!(first.lease, second.lease);

    let (h1, h2) = (engine.handle(0), engine.handle(1));

    h1.started();
    controller.process_pending();
    assert_eq!(active_id(&controller), Some("s1"));

    h1.ended();
    controller.process_pending();
    assert!(!controller.state().is_idle());
    assert_eq!(controller.phase(), PlaybackPhase::PlayingAll);

    h2.started();
    controller.process_pending();
    assert_eq!(active_id(&controller), Some("s2"));
    assert_eq!(controller.state().word_spans.len(), 1);

    h2.ended();
    controller.process_pending();
    assert_eq!(controller.state(), &PlaybackState::idle());
}

#[test]
fn play_all_marks_first_sentence_active_immediately() {
    let (mut controller, _engine, _rx) = setup();

    controller
        .play_all(vec![sentence("s1", "Hi"), sentence("s2", "Bye")])
        .unwrap();

    assert_eq!(active_id(&controller), Some("s1"));
}

#[test]
fn progress_for_queued_sentence_not_started_is_ignored() {
    let (mut controller, engine, _rx) = setup();
    controller
        .play_all(vec![sentence("s1", "one two"), sentence("s2", "three four")])
        .unwrap();

    engine.handle(0).started();
    engine.handle(1).progress(6);
    controller.process_pending();

    assert_eq!(active_id(&controller), Some("s1"));
    assert_eq!(controller.state().active_word_index, NO_WORD);
}

#[test]
fn hook_runs_for_every_queued_sentence() {
    let completed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&completed);
    let (mut controller, engine, _rx) = setup();
    controller.set_completion_hook(Some(Box::new(move |s: &Sentence| {
        sink.lock().unwrap().push(s.id.to_string());
    })));

    controller
        .play_all(vec![sentence("s1", "Hi"), sentence("s2", "Bye")])
        .unwrap();
    for n in 0..2 {
        let h = engine.handle(n);
        h.started();
        h.ended();
    }
    controller.process_pending();

    assert_eq!(*completed.lock().unwrap(), vec!["s1", "s2"]);
}

#[test]
fn empty_batch_is_rejected_without_side_effects() {
    let (mut controller, engine, mut rx) = setup();

    assert_eq!(controller.play_all(Vec::new()), Err(PlaybackError::EmptyBatch));
    assert!(engine.calls().is_empty());
    assert!(drain_events(&mut rx).is_empty());
}

// ── Cancellation and stale events ──────────────────────────────────

#[test]
fn stop_clears_active_sentence_immediately() {
    let (mut controller, engine, mut rx) = setup();
    controller.play_sentence(sentence("s1", "Hi there")).unwrap();
    engine.handle(0).started();
    controller.process_pending();

    controller.stop();

    assert_eq!(controller.state(), &PlaybackState::idle());
    assert_eq!(engine.calls().last(), Some(&Call::CancelAll));
    assert_eq!(drain_events(&mut rx).last(), Some(&PlaybackEvent::Stopped));
}

#[test]
fn late_end_from_replaced_batch_is_dropped() {
    let (mut controller, engine, mut rx) = setup();
    controller.play_all(vec![sentence("a1", "old")]).unwrap();
    let old = engine.handle(0);
    old.started();
    controller.process_pending();

    controller
        .play_all(vec![sentence("b1", "new one"), sentence("b2", "new two")])
        .unwrap();
    engine.handle(1).started();
    old.ended();
    controller.process_pending();

    assert_eq!(active_id(&controller), Some("b1"));
    assert_eq!(controller.phase(), PlaybackPhase::PlayingAll);
    let events = drain_events(&mut rx);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, PlaybackEvent::StaleEventDropped { .. }))
    );
    assert!(!events.contains(&PlaybackEvent::PlaybackFinished));
}

#[test]
fn late_end_after_stop_is_dropped() {
    let (mut controller, engine, _rx) = setup();
    controller.play_sentence(sentence("s1", "Hi")).unwrap();
    controller.stop();
    controller.play_sentence(sentence("s2", "Bye")).unwrap();

    engine.handle(0).ended();
    controller.process_pending();

    assert_eq!(active_id(&controller), Some("s2"));
}

// ── Pause / resume ─────────────────────────────────────────────────

#[test]
fn toggle_pauses_then_resumes() {
    let (mut controller, engine, _rx) = setup();
    controller.play_sentence(sentence("s1", "Hi")).unwrap();

    assert!(controller.toggle_pause_resume());
    assert!(controller.state().paused);
    assert!(!controller.toggle_pause_resume());
    assert!(!controller.state().paused);

    let tail: Vec<_> = engine.calls().into_iter().rev().take(2).collect();
    assert_eq!(tail, vec![Call::Resume, Call::Pause]);
}

#[test]
fn stop_clears_paused_flag() {
    let (mut controller, _engine, _rx) = setup();
    controller.play_sentence(sentence("s1", "Hi")).unwrap();
    controller.toggle_pause_resume();

    controller.stop();

    assert!(!controller.state().paused);
}

// ── Engine failure ─────────────────────────────────────────────────

#[test]
fn engine_failure_resets_to_idle() {
    let (mut controller, engine, mut rx) = setup();
    controller
        .play_all(vec![sentence("s1", "Hi"), sentence("s2", "Bye")])
        .unwrap();

    engine.handle(0).failed("voice unavailable");
    controller.process_pending();

    assert_eq!(controller.state(), &PlaybackState::idle());
    assert_eq!(engine.calls().last(), Some(&Call::CancelAll));
    assert_eq!(
        drain_events(&mut rx).last(),
        Some(&PlaybackEvent::EngineFailed {
            reason: "voice unavailable".to_string()
        })
    );
}

#[test]
fn refused_utterance_resets_and_reports() {
    let engine = ScriptedEngine::rejecting("Bye");
    let (emitter, _rx) = ChannelPlaybackEmitter::new();
    let mut controller = PlaybackController::new(Box::new(engine.clone()), Arc::new(emitter));

    let err = controller
        .play_all(vec![sentence("s1", "Hi"), sentence("s2", "Bye")])
        .unwrap_err();

    assert!(matches!(err, PlaybackError::Engine(EngineError::Rejected(_))));
    assert_eq!(controller.state(), &PlaybackState::idle());
}

// ── Batch validation ───────────────────────────────────────────────

#[test]
fn malformed_batch_never_reaches_the_engine() {
    let (mut controller, engine, _rx) = setup();
    let body = r#"[{ "lang_code": "en", "text": "Hi" }, { "lang_code": "en", "text": 7 }]"#;

    if let Ok(batch) = parse_sentence_response(body) {
        controller.play_all(batch).unwrap();
    }

    assert!(engine.calls().is_empty());
    assert_eq!(controller.state(), &PlaybackState::idle());
}

// ── Session ────────────────────────────────────────────────────────

#[tokio::test]
async fn session_runs_batch_to_completion() {
    let (emitter, _rx) = ChannelPlaybackEmitter::new();
    let controller = PlaybackController::new(Box::new(InstantEngine), Arc::new(emitter));
    let mut session = PlaybackSession::new(controller);
    let mut snapshots = session.subscribe();

    session
        .play_all(vec![sentence("s1", "Hi"), sentence("s2", "Bye")])
        .unwrap();
    assert!(snapshots.has_changed().unwrap());
    assert_eq!(
        snapshots.borrow_and_update().active_sentence_id,
        Some(SentenceId::new("s1"))
    );

    session.run_until_idle(&CancellationToken::new()).await;

    assert!(session.controller().state().is_idle());
    assert!(snapshots.borrow_and_update().is_idle());
}

#[test]
fn cancelled_session_stops_playback() {
    let (mut controller, engine, _rx) = setup();
    controller.play_sentence(sentence("s1", "Hi")).unwrap();
    let mut session = PlaybackSession::new(controller);

    let cancel = CancellationToken::new();
    cancel.cancel();
    tokio_test::block_on(session.run_until_idle(&cancel));

    assert!(session.controller().state().is_idle());
    assert_eq!(engine.calls().last(), Some(&Call::CancelAll));
}
