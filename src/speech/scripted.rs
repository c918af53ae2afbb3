//! Scripted recognition backend
//!
//! Plays configured utterances back as a stream of growing partial
//! transcripts, the way a host recognizer would report them. Each `Start`
//! takes the next utterance in the list (wrapping around); `Stop` cuts the
//! playback short and ends the capture with whatever was emitted so far.

use crate::speech::{RecognizerConfig, RecognizerHandle, SpeechCommand, SpeechEvent};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use tracing::debug;

/// Number of partial emissions an utterance is split into
const PARTIAL_STEPS: usize = 4;

pub struct ScriptedRecognizer;

impl ScriptedRecognizer {
    /// Start the scripted recognizer worker
    pub fn spawn(config: RecognizerConfig) -> RecognizerHandle {
        let (command_tx, command_rx) = bounded::<SpeechCommand>(16);
        let (event_tx, event_rx) = bounded::<SpeechEvent>(64);

        let worker = std::thread::spawn(move || {
            worker_loop(config, command_rx, event_tx);
        });

        RecognizerHandle::new(command_tx, event_rx, worker)
    }
}

fn worker_loop(
    config: RecognizerConfig,
    command_rx: Receiver<SpeechCommand>,
    event_tx: Sender<SpeechEvent>,
) {
    let mut next_utterance = 0usize;

    loop {
        match command_rx.recv() {
            Ok(SpeechCommand::Start) => {
                if config.utterances.is_empty() {
                    let _ = event_tx.send(SpeechEvent::Error(
                        "scripted backend has no utterances configured".to_string(),
                    ));
                    continue;
                }

                let utterance = &config.utterances[next_utterance % config.utterances.len()];
                next_utterance = next_utterance.wrapping_add(1);
                debug!("scripted capture: {}", utterance);

                if !play_utterance(utterance, &config, &command_rx, &event_tx) {
                    return;
                }
            }
            // Stop without an active capture is a no-op
            Ok(SpeechCommand::Stop) => {}
            Ok(SpeechCommand::Shutdown) | Err(_) => return,
        }
    }
}

/// Emit the utterance as growing partials, honoring stop/shutdown.
///
/// Returns false when the worker should exit entirely.
fn play_utterance(
    utterance: &str,
    config: &RecognizerConfig,
    command_rx: &Receiver<SpeechCommand>,
    event_tx: &Sender<SpeechEvent>,
) -> bool {
    for prefix in partial_prefixes(utterance, PARTIAL_STEPS) {
        if event_tx.send(SpeechEvent::Partial(prefix)).is_err() {
            return false;
        }

        match command_rx.recv_timeout(config.partial_interval) {
            Ok(SpeechCommand::Stop) => break,
            Ok(SpeechCommand::Shutdown) => {
                let _ = event_tx.send(SpeechEvent::Ended);
                return false;
            }
            // A second Start during capture is ignored, like a host
            // recognizer that is already listening
            Ok(SpeechCommand::Start) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return false,
        }
    }

    event_tx.send(SpeechEvent::Ended).is_ok()
}

/// Split an utterance into at most `steps` growing prefixes on char
/// boundaries; the last prefix is always the full utterance.
fn partial_prefixes(text: &str, steps: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let steps = steps.clamp(1, chars.len());
    (1..=steps)
        .map(|step| {
            let end = (chars.len() * step).div_ceil(steps);
            chars[..end].iter().collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::SpeechBackend;
    use std::time::Duration;

    fn fast_config() -> RecognizerConfig {
        RecognizerConfig {
            backend: SpeechBackend::Scripted,
            utterances: vec!["今日大市點睇？".to_string()],
            partial_interval: Duration::from_millis(5),
            ..RecognizerConfig::default()
        }
    }

    fn collect_session(handle: &RecognizerHandle) -> (Vec<String>, bool) {
        let mut partials = Vec::new();
        let mut ended = false;
        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while std::time::Instant::now() < deadline {
            match handle.try_recv_event() {
                Some(SpeechEvent::Partial(text)) => partials.push(text),
                Some(SpeechEvent::Ended) => {
                    ended = true;
                    break;
                }
                Some(SpeechEvent::Error(e)) => panic!("unexpected error: {}", e),
                None => std::thread::sleep(Duration::from_millis(2)),
            }
        }
        (partials, ended)
    }

    #[test]
    fn test_partial_prefixes_grow_to_full_text() {
        let prefixes = partial_prefixes("今日大市點睇？", 4);
        assert_eq!(prefixes.len(), 4);
        assert_eq!(prefixes.last().unwrap(), "今日大市點睇？");
        for pair in prefixes.windows(2) {
            assert!(pair[1].starts_with(pair[0].as_str()));
            assert!(pair[1].chars().count() > pair[0].chars().count());
        }
    }

    #[test]
    fn test_partial_prefixes_short_text() {
        assert_eq!(partial_prefixes("你", 4), vec!["你".to_string()]);
        assert!(partial_prefixes("", 4).is_empty());
    }

    #[test]
    fn test_capture_streams_partials_then_ends() {
        let handle = ScriptedRecognizer::spawn(fast_config());
        handle.start().unwrap();

        let (partials, ended) = collect_session(&handle);
        assert!(ended);
        assert_eq!(partials.last().unwrap(), "今日大市點睇？");

        handle.shutdown().unwrap();
    }

    #[test]
    fn test_stop_cuts_capture_short() {
        let mut config = fast_config();
        config.partial_interval = Duration::from_millis(50);
        let handle = ScriptedRecognizer::spawn(config);
        handle.start().unwrap();
        std::thread::sleep(Duration::from_millis(10));
        handle.stop().unwrap();

        let (partials, ended) = collect_session(&handle);
        assert!(ended);
        assert!(!partials.is_empty());

        handle.shutdown().unwrap();
    }

    #[test]
    fn test_utterances_cycle_across_captures() {
        let mut config = fast_config();
        config.utterances = vec!["一".to_string(), "二".to_string()];
        let handle = ScriptedRecognizer::spawn(config);

        handle.start().unwrap();
        let (first, _) = collect_session(&handle);
        handle.start().unwrap();
        let (second, _) = collect_session(&handle);
        handle.start().unwrap();
        let (third, _) = collect_session(&handle);

        assert_eq!(first.last().unwrap(), "一");
        assert_eq!(second.last().unwrap(), "二");
        assert_eq!(third.last().unwrap(), "一");

        handle.shutdown().unwrap();
    }
}
