//! Stub chat assistant.
//!
//! Replies are canned; no model is called. The session only records the
//! conversation for display.

use serde::{Deserialize, Serialize};

const GREETING: &str = "Hi! I can summarize school docs, draft advocacy emails, or suggest supportive responses. Try one of the prompts below.";

/// Suggested prompts offered before the first message.
pub const STARTER_PROMPTS: [&str; 4] = [
    "Help me write an email to request a meeting about his accommodations.",
    "Summarize this IEP section and tell me what questions to ask.",
    "What does \u{201c}executive functioning difficulties\u{201d} mean?",
    "What should I log when he comes home upset from school?",
];

const CANNED_REPLIES: [&str; 2] = [
    "Got it. I can draft a supportive email that references accommodations, asks for collaborative solutions, and keeps a positive tone.",
    "Tip: include concrete examples and a clear ask (meeting date/time or updated supports).",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    fn assistant(content: &str) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.to_string(),
        }
    }
}

/// One conversation, starting with the greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantSession {
    messages: Vec<ChatMessage>,
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Appends `prompt` and the canned replies.
    ///
    /// Blank prompts are ignored and return `false`.
    pub fn send(&mut self, prompt: &str) -> bool {
        if prompt.trim().is_empty() {
            return false;
        }
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content: prompt.to_string(),
        });
        self.messages
            .extend(CANNED_REPLIES.iter().map(|reply| ChatMessage::assistant(reply)));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{AssistantSession, ChatRole, STARTER_PROMPTS};

    #[test]
    fn session_starts_with_greeting() {
        let session = AssistantSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, ChatRole::Assistant);
    }

    #[test]
    fn send_appends_prompt_and_canned_replies() {
        let mut session = AssistantSession::new();
        assert!(session.send(STARTER_PROMPTS[1]));
        let roles: Vec<_> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::Assistant,
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::Assistant
            ]
        );
        assert_eq!(session.messages()[1].content, STARTER_PROMPTS[1]);
    }

    #[test]
    fn blank_prompt_is_ignored() {
        let mut session = AssistantSession::new();
        assert!(!session.send("   "));
        assert_eq!(session.messages().len(), 1);
    }
}
