pub mod chat;
pub mod config;
pub mod controller;
pub mod grok;

// Re-export main types for convenience
pub use chat::{Conversation, Message, Role};
pub use config::Config;
pub use controller::{ConversationController, GrokController, ScriptedController};
pub use grok::{GrokClient, GrokError, DEFAULT_MODEL};
