//! Assistant worker thread
//!
//! Mirrors a streaming-inference worker in shape: commands in, events out,
//! one request in flight at a time. The "inference" is a fixed delay
//! followed by a uniformly random canned reply.

use crate::assistant::replies;
use crate::{EtLightError, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::collections::VecDeque;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

/// Configuration for the simulated engine
#[derive(Clone, Debug)]
pub struct AssistantConfig {
    /// Artificial delay between an ask and its reply
    pub thinking_delay: Duration,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            thinking_delay: Duration::from_millis(1500),
        }
    }
}

impl AssistantConfig {
    /// Override the thinking delay (tests use a short one)
    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }
}

/// Commands sent to the assistant worker
#[derive(Clone, Debug)]
pub enum AssistantCommand {
    /// Answer the given prompt. The prompt is logged but never influences
    /// the reply; that is the whole simulation.
    Ask { prompt: String, request_id: Uuid },
    /// Shutdown the worker
    Shutdown,
}

/// Events emitted by the assistant worker
#[derive(Clone, Debug)]
pub enum AssistantEvent {
    /// The worker accepted an ask and is "thinking"
    Thinking { request_id: Uuid },
    /// The reply for an ask
    Reply { request_id: Uuid, text: String },
    /// Worker shut down
    Shutdown,
}

/// Handle for interacting with a running assistant worker
pub struct AssistantHandle {
    command_tx: Sender<AssistantCommand>,
    event_rx: Receiver<AssistantEvent>,
    worker: Option<JoinHandle<()>>,
}

impl AssistantHandle {
    /// Submit an ask
    pub fn ask(&self, prompt: &str, request_id: Uuid) -> Result<()> {
        self.command_tx
            .send(AssistantCommand::Ask {
                prompt: prompt.to_string(),
                request_id,
            })
            .map_err(|e| EtLightError::ChannelError(format!("failed to send ask: {}", e)))
    }

    /// Try to receive an event without blocking
    pub fn try_recv_event(&self) -> Option<AssistantEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Receive an event, blocking until one is available
    pub fn recv_event(&self) -> Result<AssistantEvent> {
        self.event_rx
            .recv()
            .map_err(|e| EtLightError::ChannelError(format!("failed to receive event: {}", e)))
    }

    /// Shutdown the worker and wait for it to finish
    pub fn shutdown(mut self) -> Result<()> {
        let _ = self.command_tx.send(AssistantCommand::Shutdown);
        if let Some(handle) = self.worker.take() {
            handle
                .join()
                .map_err(|_| EtLightError::AssistantError("worker thread panicked".to_string()))?;
        }
        Ok(())
    }
}

/// Start the assistant worker thread
pub fn spawn(config: AssistantConfig) -> AssistantHandle {
    let (command_tx, command_rx) = bounded::<AssistantCommand>(16);
    let (event_tx, event_rx) = bounded::<AssistantEvent>(16);

    let worker = std::thread::spawn(move || {
        worker_loop(config, command_rx, event_tx);
    });

    AssistantHandle {
        command_tx,
        event_rx,
        worker: Some(worker),
    }
}

fn worker_loop(
    config: AssistantConfig,
    command_rx: Receiver<AssistantCommand>,
    event_tx: Sender<AssistantEvent>,
) {
    info!("assistant worker starting");
    let mut rng = rand::rng();
    // Asks that arrive while a reply is being timed, answered in order
    let mut pending: VecDeque<(String, Uuid)> = VecDeque::new();

    'outer: loop {
        let (prompt, request_id) = match pending.pop_front() {
            Some(request) => request,
            None => match command_rx.recv() {
                Ok(AssistantCommand::Ask { prompt, request_id }) => (prompt, request_id),
                Ok(AssistantCommand::Shutdown) | Err(_) => break,
            },
        };

        debug!(%request_id, "ask: {}", prompt);
        if event_tx
            .send(AssistantEvent::Thinking { request_id })
            .is_err()
        {
            break;
        }

        // Wait out the thinking delay, staying responsive to shutdown
        let deadline = Instant::now() + config.thinking_delay;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match command_rx.recv_timeout(deadline - now) {
                Ok(AssistantCommand::Ask { prompt, request_id }) => {
                    pending.push_back((prompt, request_id));
                }
                Ok(AssistantCommand::Shutdown) => break 'outer,
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => break 'outer,
            }
        }

        let text = replies::pick(&mut rng).to_string();
        debug!(%request_id, "reply: {}", text);
        if event_tx
            .send(AssistantEvent::Reply { request_id, text })
            .is_err()
        {
            break;
        }
    }

    let _ = event_tx.send(AssistantEvent::Shutdown);
    info!("assistant worker shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> AssistantConfig {
        AssistantConfig::default().with_thinking_delay(Duration::from_millis(20))
    }

    #[test]
    fn test_ask_produces_canned_reply() {
        let handle = spawn(fast_config());
        let id = Uuid::new_v4();
        handle.ask("今日大市點睇？", id).unwrap();

        match handle.recv_event().unwrap() {
            AssistantEvent::Thinking { request_id } => assert_eq!(request_id, id),
            other => panic!("expected Thinking, got {:?}", other),
        }
        match handle.recv_event().unwrap() {
            AssistantEvent::Reply { request_id, text } => {
                assert_eq!(request_id, id);
                assert!(replies::is_canned(&text));
            }
            other => panic!("expected Reply, got {:?}", other),
        }

        handle.shutdown().unwrap();
    }

    #[test]
    fn test_reply_waits_for_thinking_delay() {
        let config = AssistantConfig::default().with_thinking_delay(Duration::from_millis(80));
        let handle = spawn(config);
        let started = Instant::now();
        handle.ask("hello", Uuid::new_v4()).unwrap();

        let _thinking = handle.recv_event().unwrap();
        let _reply = handle.recv_event().unwrap();
        assert!(started.elapsed() >= Duration::from_millis(80));

        handle.shutdown().unwrap();
    }

    #[test]
    fn test_queued_asks_are_answered_in_order() {
        let handle = spawn(fast_config());
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        handle.ask("first", first).unwrap();
        handle.ask("second", second).unwrap();

        let mut reply_ids = Vec::new();
        while reply_ids.len() < 2 {
            if let AssistantEvent::Reply { request_id, .. } = handle.recv_event().unwrap() {
                reply_ids.push(request_id);
            }
        }
        assert_eq!(reply_ids, vec![first, second]);

        handle.shutdown().unwrap();
    }

    #[test]
    fn test_shutdown_interrupts_thinking() {
        let config = AssistantConfig::default().with_thinking_delay(Duration::from_secs(30));
        let handle = spawn(config);
        handle.ask("hello", Uuid::new_v4()).unwrap();

        let started = Instant::now();
        handle.shutdown().unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
