use std::time::Duration;

use tracing::debug;

use crate::chat::{Responder, Response};

/// How long the UI waits before showing the bot's reply.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// The messages of one chat session. Nothing is persisted.
pub struct Conversation<'a> {
    responder: Responder<'a>,
    messages: Vec<ChatMessage>,
    reply_delay: Duration,
}

impl<'a> Conversation<'a> {
    pub fn new(responder: Responder<'a>) -> Self {
        Self {
            responder,
            messages: Vec::new(),
            reply_delay: DEFAULT_REPLY_DELAY,
        }
    }

    /// Opens the conversation with a message from the bot.
    pub fn with_welcome(mut self, welcome: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            sender: Sender::Bot,
            text: welcome.into(),
        });
        self
    }

    pub fn with_reply_delay(mut self, reply_delay: Duration) -> Self {
        self.reply_delay = reply_delay;
        self
    }

    /// The cosmetic pause the presentation layer shows before the reply.
    /// The reply itself is computed immediately.
    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Records the visitor's message and the bot's reply, returning the reply.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let Response { kind, text } = self.responder.respond(input);
        debug!(?kind, "chat reply");

        self.messages.push(ChatMessage {
            sender: Sender::User,
            text: input.to_string(),
        });
        self.messages.push(ChatMessage {
            sender: Sender::Bot,
            text,
        });

        self.messages.last()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
