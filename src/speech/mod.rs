//! Optional speech-recognition integration
//!
//! Recognition fills the transcript field and nothing else. The capability
//! is optional: the app probes for a backend at startup and, when none is
//! available, surfaces an unsupported notice instead of ever setting the
//! listening flag.
//!
//! Backends:
//! - `system`: a host speech service. No engine ships with this build, so
//!   the probe reports absent.
//! - `scripted`: plays configured utterances back as streaming partials.
//!   Used for demos and end-to-end tests.
//! - `disabled`: never available.

mod scripted;

pub use scripted::ScriptedRecognizer;

use crate::{EtLightError, Result};
use crossbeam_channel::{Receiver, Sender};
use serde::Deserialize;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::debug;

/// Notice shown when listening is initiated without a usable backend
pub const UNSUPPORTED_NOTICE: &str =
    "部機唔支援語音辨識功能，請檢查系統語音服務，或者用文字搜尋。";

/// Which recognition backend to use
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechBackend {
    /// Host speech service (absent in this build)
    #[default]
    System,
    /// Scripted playback of configured utterances
    Scripted,
    /// No recognition at all
    Disabled,
}

/// Recognizer configuration
#[derive(Clone, Debug)]
pub struct RecognizerConfig {
    pub backend: SpeechBackend,
    /// Recognition locale. The product targets Hong-Kong Cantonese.
    pub language: String,
    /// Utterances the scripted backend cycles through
    pub utterances: Vec<String>,
    /// Interval between partial-transcript emissions
    pub partial_interval: Duration,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            backend: SpeechBackend::System,
            language: "zh-HK".to_string(),
            utterances: vec![
                "今日大市點睇？".to_string(),
                "科技股仲可唔可以入？".to_string(),
                "利是錢應該點部署？".to_string(),
            ],
            partial_interval: Duration::from_millis(250),
        }
    }
}

/// Commands sent to a recognition session
#[derive(Clone, Debug)]
pub enum SpeechCommand {
    /// Begin capturing an utterance
    Start,
    /// Stop the capture; the session emits `Ended` in response
    Stop,
    /// Shutdown the worker
    Shutdown,
}

/// Events emitted by a recognition session
#[derive(Clone, Debug)]
pub enum SpeechEvent {
    /// Cumulative partial transcript of the current utterance
    Partial(String),
    /// The capture finished (stop requested or utterance complete)
    Ended,
    /// The backend failed; the session is back to idle
    Error(String),
}

/// Handle for a running recognition session worker
pub struct RecognizerHandle {
    command_tx: Sender<SpeechCommand>,
    event_rx: Receiver<SpeechEvent>,
    worker: Option<JoinHandle<()>>,
}

impl RecognizerHandle {
    pub(crate) fn new(
        command_tx: Sender<SpeechCommand>,
        event_rx: Receiver<SpeechEvent>,
        worker: JoinHandle<()>,
    ) -> Self {
        Self {
            command_tx,
            event_rx,
            worker: Some(worker),
        }
    }

    /// Begin capturing an utterance
    pub fn start(&self) -> Result<()> {
        self.command_tx
            .send(SpeechCommand::Start)
            .map_err(|e| EtLightError::ChannelError(format!("failed to send start: {}", e)))
    }

    /// Request the capture to stop
    pub fn stop(&self) -> Result<()> {
        self.command_tx
            .send(SpeechCommand::Stop)
            .map_err(|e| EtLightError::ChannelError(format!("failed to send stop: {}", e)))
    }

    /// Try to receive an event without blocking
    pub fn try_recv_event(&self) -> Option<SpeechEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Shutdown the worker and wait for it to finish
    pub fn shutdown(mut self) -> Result<()> {
        let _ = self.command_tx.send(SpeechCommand::Shutdown);
        if let Some(handle) = self.worker.take() {
            handle
                .join()
                .map_err(|_| EtLightError::SpeechError("worker thread panicked".to_string()))?;
        }
        Ok(())
    }
}

/// Probe for a usable recognition backend
///
/// Returns `None` when recognition is unavailable; the caller surfaces
/// [`UNSUPPORTED_NOTICE`] on the next listening attempt.
pub fn spawn_recognizer(config: &RecognizerConfig) -> Option<RecognizerHandle> {
    match config.backend {
        SpeechBackend::System => {
            // Recognition is delegated to a host speech service and none is
            // bundled with this build.
            debug!("no host speech service available, voice input disabled");
            None
        }
        SpeechBackend::Scripted => {
            debug!(
                utterances = config.utterances.len(),
                "starting scripted recognizer ({})", config.language
            );
            Some(ScriptedRecognizer::spawn(config.clone()))
        }
        SpeechBackend::Disabled => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_backend_probes_absent() {
        let config = RecognizerConfig::default();
        assert_eq!(config.backend, SpeechBackend::System);
        assert!(spawn_recognizer(&config).is_none());
    }

    #[test]
    fn test_disabled_backend_probes_absent() {
        let config = RecognizerConfig {
            backend: SpeechBackend::Disabled,
            ..RecognizerConfig::default()
        };
        assert!(spawn_recognizer(&config).is_none());
    }

    #[test]
    fn test_scripted_backend_is_available() {
        let config = RecognizerConfig {
            backend: SpeechBackend::Scripted,
            ..RecognizerConfig::default()
        };
        let handle = spawn_recognizer(&config).expect("scripted backend should be available");
        handle.shutdown().unwrap();
    }

    #[test]
    fn test_default_locale_is_hong_kong_cantonese() {
        assert_eq!(RecognizerConfig::default().language, "zh-HK");
    }

    #[test]
    fn test_backend_parses_from_config_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            backend: SpeechBackend,
        }
        let parsed: Wrapper = toml::from_str("backend = \"scripted\"").unwrap();
        assert_eq!(parsed.backend, SpeechBackend::Scripted);
        let parsed: Wrapper = toml::from_str("backend = \"system\"").unwrap();
        assert_eq!(parsed.backend, SpeechBackend::System);
    }
}
