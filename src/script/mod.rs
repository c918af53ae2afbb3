//! Session scripts for automated end-to-end checks
//!
//! A session script is a TOML file of timed actions against the live page
//! (open the modal, toggle listening, inject speech, exit) with optional
//! assertions on the voice flow after each action. Scripts drive both the
//! `--script` mode of the binary and the integration tests.

mod runner;

pub use runner::{CheckResult, FlowProbe, SessionCommand, SessionRunner};

use crate::{EtLightError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// A session script loaded from a TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct SessionScript {
    /// Script metadata
    pub session: SessionMetadata,
    /// Timed steps, ordered by time
    pub steps: Vec<SessionStep>,
}

/// Metadata about the script
#[derive(Debug, Clone, Deserialize)]
pub struct SessionMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A single timed step
#[derive(Debug, Clone, Deserialize)]
pub struct SessionStep {
    /// Time in milliseconds after session start to execute this step
    pub at_ms: u64,
    /// The action to perform
    pub action: Action,
    /// Optional assertion checked after the action
    #[serde(default)]
    pub assert: Option<Check>,
}

impl SessionStep {
    /// Delay from session start for this step
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }
}

/// Actions a script can perform
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Open the voice modal
    OpenModal,
    /// Close the voice modal
    CloseModal,
    /// Toggle the listening state
    ToggleListening,
    /// Inject a cumulative partial transcript (requires active listening)
    Speak { text: String },
    /// Log a message
    Log { message: String },
    /// End the session
    Exit {
        #[serde(default)]
        code: i32,
    },
}

/// Assertions a script can check
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// The voice modal is open
    ModalOpen,
    /// The voice modal is closed
    ModalClosed,
    /// A capture session is active
    IsListening,
    /// Nothing is in flight
    IsIdle,
    /// The assistant is thinking
    IsThinking,
    /// A transcript was captured
    HasTranscript,
    /// The transcript contains a substring
    TranscriptContains { text: String },
    /// A response is shown
    HasResponse,
    /// The response is one of the canned replies
    ResponseIsCanned,
    /// The blocking notice is shown
    NoticeShown,
}

impl SessionScript {
    /// Load a session script from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EtLightError::ScriptError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| EtLightError::ScriptError(format!("{}: {}", path.display(), e)))
    }

    /// Parse a session script from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let script: SessionScript = toml::from_str(content)
            .map_err(|e| EtLightError::ScriptError(format!("failed to parse script: {}", e)))?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(EtLightError::ScriptError(
                "script must have at least one step".to_string(),
            ));
        }

        let mut last_time = 0;
        for step in &self.steps {
            if step.at_ms < last_time {
                return Err(EtLightError::ScriptError(format!(
                    "steps must be ordered by time; found step at {}ms after {}ms",
                    step.at_ms, last_time
                )));
            }
            last_time = step.at_ms;
        }

        let has_exit = self
            .steps
            .iter()
            .any(|s| matches!(s.action, Action::Exit { .. }));
        if !has_exit {
            return Err(EtLightError::ScriptError(
                "script must have an exit step".to_string(),
            ));
        }

        Ok(())
    }
}
