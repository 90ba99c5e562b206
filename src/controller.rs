//! Conversation orchestration: user input in, completion or notice out.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::chat::{Conversation, Message};
use crate::config::Config;
use crate::grok::{GrokClient, GrokError};

/// Notice appended when a send is attempted without a configured API key.
pub const MISSING_KEY_NOTICE: &str = "API key is missing";

/// The surface the UI consumes. One networked implementation drives the
/// real API; a scripted one stands in for it in tests.
pub trait ConversationController {
    /// Submit a user message. Blank input and sends made while a request is
    /// already outstanding are ignored.
    fn send_message(&mut self, text: &str);

    /// Delete the message at `index`. Out-of-range indices are ignored.
    fn delete_message(&mut self, index: usize);

    /// The conversation so far, in display order.
    fn messages(&self) -> &[Message];

    /// True while a completion request is outstanding.
    fn is_loading(&self) -> bool;

    /// Pick up the result of an in-flight request, if any. Called on every
    /// UI tick; controllers that resolve synchronously keep the no-op.
    fn poll(&mut self) {}
}

/// The networked controller. Owns the conversation, one [`GrokClient`] and
/// the loaded config.
///
/// `send_message` appends the user turn, spawns the completion call onto the
/// runtime and returns immediately; `poll` picks the outcome up from the
/// channel. All conversation mutation stays on the caller's task.
pub struct GrokController {
    conversation: Conversation,
    client: GrokClient,
    config: Config,
    model: String,
    outcome_tx: UnboundedSender<Result<Message, GrokError>>,
    outcome_rx: UnboundedReceiver<Result<Message, GrokError>>,
}

impl GrokController {
    pub fn new(config: Config, model: String) -> Self {
        Self::with_client(GrokClient::new(), config, model)
    }

    pub fn with_client(client: GrokClient, config: Config, model: String) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            conversation: Conversation::new(),
            client,
            config,
            model,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.config.resolve_api_key().is_some()
    }
}

impl ConversationController for GrokController {
    fn send_message(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() || self.conversation.is_loading() {
            return;
        }

        // The user's own turn always shows, even if the request fails.
        let message = Message::user(text);
        self.conversation.push(message.clone());
        self.conversation.set_loading(true);

        let Some(api_key) = self.config.resolve_api_key() else {
            self.conversation.push(Message::system(MISSING_KEY_NOTICE));
            self.conversation.set_loading(false);
            return;
        };

        // Only the newest user turn goes upstream, not the full history.
        let client = self.client.clone();
        let model = self.model.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = client.complete(&api_key, &[message], &model).await;
            let _ = tx.send(outcome);
        });
    }

    fn delete_message(&mut self, index: usize) {
        self.conversation.remove(index);
    }

    fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    fn is_loading(&self) -> bool {
        self.conversation.is_loading()
    }

    fn poll(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            match outcome {
                Ok(reply) => self.conversation.push(reply),
                Err(err) => self
                    .conversation
                    .push(Message::system(format!("Error: {}", err))),
            }
            self.conversation.set_loading(false);
        }
    }
}

/// In-memory controller that answers every send with the next canned reply.
/// Never loading, never touches the network.
pub struct ScriptedController {
    conversation: Conversation,
    replies: Vec<String>,
    next_reply: usize,
}

impl ScriptedController {
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            conversation: Conversation::new(),
            replies,
            next_reply: 0,
        }
    }
}

impl ConversationController for ScriptedController {
    fn send_message(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        self.conversation.push(Message::user(text));

        let reply = self
            .replies
            .get(self.next_reply)
            .cloned()
            .unwrap_or_else(|| "...".to_string());
        self.next_reply += 1;
        self.conversation.push(Message::assistant(reply));
    }

    fn delete_message(&mut self, index: usize) {
        self.conversation.remove(index);
    }

    fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    fn is_loading(&self) -> bool {
        false
    }
}
