use crate::models::chat::{ChatMessage, ChatRole};

const ADVISORY_REPLY: &str = "I understand your concern about environmental impact. Based on your current data, I recommend focusing on reducing energy consumption in your manufacturing process.";

pub trait ChatResponder {
    fn respond(&self, transcript: &[ChatMessage]) -> ChatMessage;
}

/// Replies with the same advisory message regardless of input.
pub struct StaticResponder;

impl ChatResponder for StaticResponder {
    fn respond(&self, _transcript: &[ChatMessage]) -> ChatMessage {
        ChatMessage {
            role: ChatRole::Assistant,
            content: ADVISORY_REPLY.to_string(),
        }
    }
}

pub struct ChatSession<R: ChatResponder> {
    responder: R,
    transcript: Vec<ChatMessage>,
}

impl<R: ChatResponder> ChatSession<R> {
    pub fn new(responder: R) -> Self {
        Self {
            responder,
            transcript: Vec::new(),
        }
    }

    /// Blank input is ignored and yields `None`.
    pub fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            content: text.to_string(),
        });
        let reply = self.responder.respond(&self.transcript);
        self.transcript.push(reply);
        self.transcript.last()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_messages_are_ignored() {
        let mut session = ChatSession::new(StaticResponder);
        assert!(session.send("   ").is_none());
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn each_message_gets_a_reply() {
        let mut session = ChatSession::new(StaticResponder);
        let reply = session.send("How do we cut waste?").cloned().expect("reply");

        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.content, ADVISORY_REPLY);
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[0].role, ChatRole::User);
    }
}
