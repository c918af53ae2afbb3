//! Page state
//!
//! The single page owns all UI-local state (tab, modal, search text) plus
//! the worker handles. `poll()` runs once per frame: it drains recognition
//! and assistant events into the shared flow state and arms the ask once
//! listening has stopped with a captured transcript.

use crate::assistant::{self, AssistantEvent, AssistantHandle};
use crate::cards::{self, Card, CardKind};
use crate::config::AppConfig;
use crate::speech::{self, RecognizerHandle, SpeechEvent, UNSUPPORTED_NOTICE};
use crate::state::SharedFlowState;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

/// Delay between opening the modal from the floating mic and auto-toggling
/// listening
pub const AUTO_LISTEN_DELAY: Duration = Duration::from_millis(300);

/// Bottom-navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTab {
    Classic,
    ForYou,
    Builder,
}

impl NavTab {
    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            NavTab::Classic => "傳統",
            NavTab::ForYou => "推薦",
            NavTab::Builder => "自訂",
        }
    }

    /// Tab icon glyph
    pub fn glyph(&self) -> &'static str {
        match self {
            NavTab::Classic => "☰",
            NavTab::ForYou => "✦",
            NavTab::Builder => "⚙",
        }
    }
}

/// State owned by the single page
pub struct PageState {
    /// Selected bottom-nav tab
    pub active_tab: NavTab,
    /// Search field text (stored, otherwise inert in this snapshot)
    pub search_query: String,
    /// Voice modal visibility
    pub modal_open: bool,
    /// Set for the frame the modal opens on, so the opening click is not
    /// read as a click outside the modal
    pub modal_just_opened: bool,
    /// The fixed sample deck
    pub cards: Vec<Card>,
    /// Shared voice-flow state
    pub flow: SharedFlowState,

    assistant: Option<AssistantHandle>,
    recognizer: Option<RecognizerHandle>,
    /// Pending auto-listen from the floating mic
    deferred_listen: Option<Instant>,
}

impl PageState {
    /// Build the page from configuration, spawning the workers
    pub fn new(config: &AppConfig) -> Self {
        let cards = cards::sample_deck();
        debug_assert!(cards::ids_are_unique(&cards));

        Self {
            active_tab: NavTab::ForYou,
            search_query: String::new(),
            modal_open: false,
            modal_just_opened: false,
            cards,
            flow: SharedFlowState::new(),
            assistant: Some(assistant::spawn(config.assistant_config())),
            recognizer: speech::spawn_recognizer(&config.recognizer_config()),
            deferred_listen: None,
        }
    }

    /// Whether a recognition backend is available
    pub fn speech_available(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Open the voice modal
    pub fn open_modal(&mut self) {
        self.modal_open = true;
        self.modal_just_opened = true;
    }

    /// Open the voice modal and toggle listening shortly after
    pub fn open_modal_and_listen(&mut self) {
        self.open_modal();
        self.deferred_listen = Some(Instant::now() + AUTO_LISTEN_DELAY);
    }

    /// Close the voice modal. Transcript and response stay; the next
    /// listening session clears them.
    pub fn close_modal(&mut self) {
        self.modal_open = false;
        self.modal_just_opened = false;
    }

    /// Handle a card click: voice cards open the modal, the rest are inert
    pub fn card_clicked(&mut self, card: &Card) {
        if card.kind == CardKind::Voice {
            self.open_modal();
        }
    }

    /// Toggle the listening state
    ///
    /// Without a backend this raises the unsupported notice and the
    /// listening flag is never set.
    pub fn toggle_listening(&mut self) {
        let Some(recognizer) = &self.recognizer else {
            warn!("listening requested without a recognition backend");
            self.flow.write().set_notice(UNSUPPORTED_NOTICE);
            return;
        };

        if self.flow.is_listening() {
            // The flag drops when the session reports Ended
            if let Err(e) = recognizer.stop() {
                warn!("recognizer stop failed: {}", e);
                self.flow.write().end_listening();
            }
        } else {
            self.flow.write().begin_listening();
            if let Err(e) = recognizer.start() {
                warn!("recognizer start failed: {}", e);
                self.flow.write().end_listening();
            }
        }
    }

    /// Per-frame event pump
    pub fn poll(&mut self) {
        self.drain_speech_events();
        self.arm_ask();
        self.drain_assistant_events();
        self.tick_deferred_listen();
    }

    fn drain_speech_events(&mut self) {
        let Some(recognizer) = &self.recognizer else {
            return;
        };
        while let Some(event) = recognizer.try_recv_event() {
            match event {
                SpeechEvent::Partial(text) => self.flow.write().push_partial(&text),
                SpeechEvent::Ended => self.flow.write().end_listening(),
                SpeechEvent::Error(e) => {
                    // Errors reset the listening flag silently
                    warn!("recognition error: {}", e);
                    self.flow.write().end_listening();
                }
            }
        }
    }

    /// Issue the ask once listening has stopped with a captured transcript
    fn arm_ask(&mut self) {
        let ask = {
            let mut flow = self.flow.write();
            if flow.ask_ready() {
                let request_id = Uuid::new_v4();
                flow.mark_asked(request_id);
                Some((request_id, flow.transcript.clone()))
            } else {
                None
            }
        };

        if let Some((request_id, prompt)) = ask {
            debug!(%request_id, "asking: {}", prompt);
            if let Some(assistant) = &self.assistant {
                if let Err(e) = assistant.ask(&prompt, request_id) {
                    warn!("ask failed: {}", e);
                }
            }
        }
    }

    fn drain_assistant_events(&mut self) {
        let Some(assistant) = &self.assistant else {
            return;
        };
        while let Some(event) = assistant.try_recv_event() {
            match event {
                AssistantEvent::Thinking { request_id } => {
                    self.flow.write().begin_thinking(request_id);
                }
                AssistantEvent::Reply { request_id, text } => {
                    self.flow.write().complete(request_id, text);
                }
                AssistantEvent::Shutdown => {}
            }
        }
    }

    fn tick_deferred_listen(&mut self) {
        if let Some(at) = self.deferred_listen {
            if Instant::now() >= at {
                self.deferred_listen = None;
                self.toggle_listening();
            }
        }
    }

    /// Shut down the workers
    pub fn shutdown(&mut self) {
        if let Some(recognizer) = self.recognizer.take() {
            if let Err(e) = recognizer.shutdown() {
                warn!("recognizer shutdown failed: {}", e);
            }
        }
        if let Some(assistant) = self.assistant.take() {
            if let Err(e) = assistant.shutdown() {
                warn!("assistant shutdown failed: {}", e);
            }
        }
    }
}

impl Drop for PageState {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Mascot greeting line by hour of day
pub fn greeting_line(hour: u32) -> &'static str {
    match hour {
        5..=11 => "早晨！Net仔喺度等你",
        12..=17 => "午安！Net仔喺度等你",
        _ => "夜晚好！Net仔喺度等你",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::SpeechBackend;

    fn test_config(backend: SpeechBackend) -> AppConfig {
        let mut config = AppConfig::default();
        config.speech.backend = backend;
        config.assistant.thinking_delay_ms = 10;
        config.speech.partial_interval_ms = 5;
        config
    }

    #[test]
    fn test_defaults() {
        let page = PageState::new(&test_config(SpeechBackend::Disabled));
        assert_eq!(page.active_tab, NavTab::ForYou);
        assert!(!page.modal_open);
        assert!(page.search_query.is_empty());
        assert_eq!(page.cards.len(), 6);
    }

    #[test]
    fn test_voice_card_opens_modal_other_cards_do_not() {
        let mut page = PageState::new(&test_config(SpeechBackend::Disabled));

        let deck = page.cards.clone();
        for card in &deck {
            page.modal_open = false;
            page.card_clicked(card);
            assert_eq!(
                page.modal_open,
                card.kind == CardKind::Voice,
                "card {} routed wrongly",
                card.id
            );
        }
    }

    #[test]
    fn test_listening_without_backend_raises_notice() {
        let mut page = PageState::new(&test_config(SpeechBackend::System));
        assert!(!page.speech_available());

        page.toggle_listening();

        assert!(!page.flow.is_listening());
        assert_eq!(page.flow.notice().as_deref(), Some(UNSUPPORTED_NOTICE));
    }

    #[test]
    fn test_nav_switch_has_no_side_effects() {
        let mut page = PageState::new(&test_config(SpeechBackend::Disabled));
        page.active_tab = NavTab::Classic;
        assert_eq!(page.active_tab, NavTab::Classic);
        assert!(!page.modal_open);
        assert!(!page.flow.is_listening());
        assert_eq!(page.cards.len(), 6);
    }

    #[test]
    fn test_greeting_line_by_hour() {
        assert_eq!(greeting_line(8), "早晨！Net仔喺度等你");
        assert_eq!(greeting_line(14), "午安！Net仔喺度等你");
        assert_eq!(greeting_line(23), "夜晚好！Net仔喺度等你");
        assert_eq!(greeting_line(2), "夜晚好！Net仔喺度等你");
    }
}
