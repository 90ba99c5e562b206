//! Conversation state shared between the controller and the UI.

use serde::{Deserialize, Serialize};

/// The author of a chat turn.
///
/// `System` entries are synthesized locally for error and status notices.
/// They are never part of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single chat turn. Turns are immutable once created; the conversation
/// supports deleting them but not editing or reordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// The ordered message history for one session plus the loading flag.
///
/// Insertion order is display order. A conversation starts empty, lives for
/// the process lifetime and is never persisted.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    is_loading: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Remove the message at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index < self.messages.len() {
            self.messages.remove(index);
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True while a completion request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("first"));
        conversation.push(Message::assistant("second"));
        conversation.push(Message::system("third"));

        let contents: Vec<&str> = conversation
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_remove_shifts_later_messages() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("a"));
        conversation.push(Message::assistant("b"));
        conversation.push(Message::user("c"));

        conversation.remove(1);

        assert_eq!(conversation.messages().len(), 2);
        assert_eq!(conversation.messages()[0].content, "a");
        assert_eq!(conversation.messages()[1].content, "c");
    }

    #[test]
    fn test_remove_out_of_range_is_ignored() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("only"));

        conversation.remove(1);
        conversation.remove(99);

        assert_eq!(conversation.messages().len(), 1);
    }

    #[test]
    fn test_append_then_delete_all_leaves_empty() {
        let mut conversation = Conversation::new();
        for i in 0..5 {
            conversation.push(Message::user(format!("message {}", i)));
        }

        // Delete from the middle, the front and the back, tracking shifts.
        conversation.remove(2);
        conversation.remove(0);
        conversation.remove(2);
        conversation.remove(0);
        conversation.remove(0);

        assert!(conversation.messages().is_empty());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let message = Message::user("hi");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "user");

        let reply: Message =
            serde_json::from_str(r#"{"role": "assistant", "content": "hello"}"#).unwrap();
        assert_eq!(reply.role, Role::Assistant);
    }

    #[test]
    fn test_loading_flag_defaults_false() {
        let mut conversation = Conversation::new();
        assert!(!conversation.is_loading());
        conversation.set_loading(true);
        assert!(conversation.is_loading());
        conversation.set_loading(false);
        assert!(!conversation.is_loading());
    }
}
