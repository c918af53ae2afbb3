//! Shared voice-flow state
//!
//! The voice interaction is a handful of flags with one ordering rule:
//! listening must stop before a response is generated. The state is shared
//! between the UI (render + commands), the workers' event drain, and the
//! session-script runner, so it lives behind an `Arc<RwLock>` with cheap
//! snapshots for lock-free reads.

use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// State of one voice interaction
#[derive(Clone, Debug, Default)]
pub struct FlowState {
    /// A capture session is active
    pub listening: bool,
    /// Cumulative transcript of the current capture
    pub transcript: String,
    /// The assistant is "thinking" about the captured transcript
    pub thinking: bool,
    /// The reply for the captured transcript
    pub response: Option<String>,
    /// Blocking notice (e.g. recognition unavailable)
    pub notice: Option<String>,
    /// Ask issued for the current capture, if any
    pub request_id: Option<Uuid>,
}

impl FlowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a capture: clears the previous transcript and response
    pub fn begin_listening(&mut self) {
        self.listening = true;
        self.transcript.clear();
        self.thinking = false;
        self.response = None;
        self.request_id = None;
    }

    /// Record a cumulative partial transcript. Partials arriving after the
    /// capture ended are dropped.
    pub fn push_partial(&mut self, text: &str) {
        if self.listening {
            self.transcript = text.to_string();
        }
    }

    /// The capture finished (user toggle, backend end, or backend error)
    pub fn end_listening(&mut self) {
        self.listening = false;
    }

    /// Whether an ask should be issued now.
    ///
    /// True only once per capture, and never while listening: the listening
    /// flag must drop before a response can be generated.
    pub fn ask_ready(&self) -> bool {
        !self.listening && !self.transcript.is_empty() && self.request_id.is_none()
    }

    /// Record that an ask was issued for the current capture
    pub fn mark_asked(&mut self, request_id: Uuid) {
        self.request_id = Some(request_id);
    }

    /// The assistant accepted the ask
    pub fn begin_thinking(&mut self, request_id: Uuid) {
        if self.request_id == Some(request_id) {
            self.thinking = true;
        }
    }

    /// The reply arrived. Replies for stale request ids are dropped.
    pub fn complete(&mut self, request_id: Uuid, text: String) {
        if self.request_id == Some(request_id) {
            self.thinking = false;
            self.response = Some(text);
        }
    }

    /// Raise a blocking notice
    pub fn set_notice(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }

    /// Dismiss the notice
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Whether anything is in flight
    pub fn is_busy(&self) -> bool {
        self.listening || self.thinking
    }

    /// Create an immutable snapshot of the current state
    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            listening: self.listening,
            transcript: self.transcript.clone(),
            thinking: self.thinking,
            response: self.response.clone(),
            notice: self.notice.clone(),
            request_id: self.request_id,
        }
    }
}

/// Immutable snapshot of the flow state, for rendering and assertions
#[derive(Clone, Debug)]
pub struct FlowSnapshot {
    pub listening: bool,
    pub transcript: String,
    pub thinking: bool,
    pub response: Option<String>,
    pub notice: Option<String>,
    pub request_id: Option<Uuid>,
}

/// Thread-safe shared flow state
#[derive(Clone, Default)]
pub struct SharedFlowState {
    inner: Arc<RwLock<FlowState>>,
}

impl SharedFlowState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(FlowState::new())),
        }
    }

    /// Get a read lock on the state
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, FlowState> {
        self.inner.read()
    }

    /// Get a write lock on the state
    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, FlowState> {
        self.inner.write()
    }

    /// Get a snapshot of the current state (no lock held after return)
    pub fn snapshot(&self) -> FlowSnapshot {
        self.inner.read().snapshot()
    }

    pub fn is_listening(&self) -> bool {
        self.inner.read().listening
    }

    pub fn is_thinking(&self) -> bool {
        self.inner.read().thinking
    }

    pub fn transcript(&self) -> String {
        self.inner.read().transcript.clone()
    }

    pub fn response(&self) -> Option<String> {
        self.inner.read().response.clone()
    }

    pub fn notice(&self) -> Option<String> {
        self.inner.read().notice.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_listening_clears_previous_interaction() {
        let mut flow = FlowState::new();
        flow.transcript = "舊嘢".to_string();
        flow.response = Some("舊回應".to_string());
        flow.request_id = Some(Uuid::new_v4());

        flow.begin_listening();

        assert!(flow.listening);
        assert!(flow.transcript.is_empty());
        assert!(flow.response.is_none());
        assert!(flow.request_id.is_none());
    }

    #[test]
    fn test_partials_only_land_while_listening() {
        let mut flow = FlowState::new();
        flow.push_partial("唔應該出現");
        assert!(flow.transcript.is_empty());

        flow.begin_listening();
        flow.push_partial("今日");
        flow.push_partial("今日大市");
        assert_eq!(flow.transcript, "今日大市");

        flow.end_listening();
        flow.push_partial("遲到嘅partial");
        assert_eq!(flow.transcript, "今日大市");
    }

    #[test]
    fn test_ask_never_ready_while_listening() {
        let mut flow = FlowState::new();
        flow.begin_listening();
        flow.push_partial("今日大市點睇");
        assert!(!flow.ask_ready());

        flow.end_listening();
        assert!(flow.ask_ready());
    }

    #[test]
    fn test_ask_not_ready_without_transcript() {
        let mut flow = FlowState::new();
        flow.begin_listening();
        flow.end_listening();
        assert!(!flow.ask_ready());
    }

    #[test]
    fn test_ask_ready_only_once_per_capture() {
        let mut flow = FlowState::new();
        flow.begin_listening();
        flow.push_partial("今日大市點睇");
        flow.end_listening();

        assert!(flow.ask_ready());
        flow.mark_asked(Uuid::new_v4());
        assert!(!flow.ask_ready());

        // A new capture re-arms the ask
        flow.begin_listening();
        flow.push_partial("科技股點睇");
        flow.end_listening();
        assert!(flow.ask_ready());
    }

    #[test]
    fn test_complete_matches_request_id() {
        let mut flow = FlowState::new();
        flow.begin_listening();
        flow.push_partial("今日大市點睇");
        flow.end_listening();

        let id = Uuid::new_v4();
        flow.mark_asked(id);
        flow.begin_thinking(id);
        assert!(flow.thinking);

        // A stale reply is dropped
        flow.complete(Uuid::new_v4(), "唔啱嘅回應".to_string());
        assert!(flow.response.is_none());
        assert!(flow.thinking);

        flow.complete(id, "啱嘅回應".to_string());
        assert_eq!(flow.response.as_deref(), Some("啱嘅回應"));
        assert!(!flow.thinking);
    }

    #[test]
    fn test_notice_set_and_clear() {
        let mut flow = FlowState::new();
        flow.set_notice("冇得用");
        assert_eq!(flow.notice.as_deref(), Some("冇得用"));
        flow.clear_notice();
        assert!(flow.notice.is_none());
    }

    #[test]
    fn test_shared_state_snapshot_is_independent() {
        let shared = SharedFlowState::new();
        let before = shared.snapshot();
        assert!(!before.listening);

        shared.write().begin_listening();

        assert!(!before.listening);
        assert!(shared.snapshot().listening);
        assert!(shared.is_listening());
    }
}
