//! Simulated assistant engine
//!
//! "Net仔" does not call a model. Every ask is answered after a fixed
//! thinking delay with one of a small set of canned replies, chosen
//! uniformly at random. The engine still runs as a worker thread behind a
//! command/event channel pair so the UI treats it like a real backend.

mod engine;
mod replies;

pub use engine::{
    spawn, AssistantCommand, AssistantConfig, AssistantEvent, AssistantHandle,
};
pub use replies::{is_canned, pick, CANNED_REPLIES};
