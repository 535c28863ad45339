//! In-memory planning adapters.

mod scripted;

pub use scripted::ScriptedAiClient;
