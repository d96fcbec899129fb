//! The conversation log: an append-only sequence of chat turns.

use chrono::{DateTime, Local};

pub const WELCOME_TEXT: &str = "📚 Hello! I'm your AI assistant for the Physical AI & Humanoid Robotics Book. Ask me anything about ROS 2, Gazebo/Unity simulation, NVIDIA Isaac, or Vision-Language-Action models!";

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

/// One turn in the conversation. Immutable once appended.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: u64,
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub citations: Vec<String>,
}

/// Append-only message log, seeded with the assistant welcome turn.
///
/// There is no removal or mutation API: the length only ever grows, and it
/// starts at 1.
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        let mut log = Self {
            messages: Vec::new(),
            next_id: 0,
        };
        log.push(Author::Assistant, WELCOME_TEXT.to_string(), Vec::new());
        log
    }

    pub fn push_user(&mut self, text: String) {
        self.push(Author::User, text, Vec::new());
    }

    pub fn push_assistant(&mut self, text: String, citations: Vec<String>) {
        self.push(Author::Assistant, text, citations);
    }

    fn push(&mut self, author: Author, text: String, citations: Vec<String>) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            author,
            text,
            timestamp: Local::now(),
            citations,
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the log is seeded with the welcome turn and has no
    /// removal API.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_with_welcome_message() {
        let log = Conversation::new();
        assert_eq!(log.len(), 1);
        assert!(!log.is_empty());
        let seed = &log.messages()[0];
        assert_eq!(seed.author, Author::Assistant);
        assert_eq!(seed.text, WELCOME_TEXT);
        assert!(seed.citations.is_empty());
    }

    #[test]
    fn appends_preserve_insertion_order() {
        let mut log = Conversation::new();
        log.push_user("first".to_string());
        log.push_assistant("second".to_string(), vec!["Ch.1".to_string()]);
        let texts: Vec<&str> = log.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, [WELCOME_TEXT, "first", "second"]);
        assert_eq!(log.messages()[2].citations, ["Ch.1"]);
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut log = Conversation::new();
        for i in 0..10 {
            log.push_user(format!("q{}", i));
        }
        let ids: Vec<u64> = log.messages().iter().map(|m| m.id).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
