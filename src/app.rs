//! Application state: the conversation, the request lifecycle, and the
//! availability indicator.

use tokio::task::JoinHandle;

use crate::backend::{Availability, BackendClient, ChatError, ChatReply};
use crate::conversation::Conversation;

pub struct App {
    pub should_quit: bool,

    // Conversation state
    pub conversation: Conversation,
    pub availability: Availability,

    // Input state
    pub input: String,
    pub input_cursor: usize, // cursor position in chars

    // Chat viewport state (pane size captured during render)
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,

    // Animation state (typing indicator, 3-frame ellipsis)
    pub animation_frame: u8,

    backend: BackendClient,
    chat_task: Option<JoinHandle<Result<ChatReply, ChatError>>>,
    health_task: Option<JoinHandle<Availability>>,
}

impl App {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            should_quit: false,
            conversation: Conversation::new(),
            availability: Availability::Checking,
            input: String::new(),
            input_cursor: 0,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            animation_frame: 0,
            backend,
            chat_task: None,
            health_task: None,
        }
    }

    /// Kick off the one-shot health probe. The indicator shows Checking
    /// until the probe settles on the first tick after completion.
    pub fn start_health_probe(&mut self) {
        let backend = self.backend.clone();
        self.health_task = Some(tokio::spawn(async move { backend.check_health().await }));
    }

    /// True while exactly one chat request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.chat_task.is_some()
    }

    /// Submit the current input as a question.
    ///
    /// Blank input (after trimming) or an already-pending request is a
    /// silent no-op. On dispatch the user turn is appended with the
    /// original untrimmed text, the input is cleared, and the request runs
    /// as a background task.
    pub fn submit(&mut self) {
        if self.input.trim().is_empty() || self.is_pending() {
            return;
        }

        let question = std::mem::take(&mut self.input);
        self.input_cursor = 0;
        self.conversation.push_user(question.clone());

        let backend = self.backend.clone();
        self.chat_task = Some(tokio::spawn(async move { backend.ask(&question).await }));

        self.scroll_chat_to_bottom();
    }

    /// Poll the background tasks for completion. Called on every tick.
    pub async fn poll_tasks(&mut self) {
        if self.health_task.as_ref().is_some_and(|t| t.is_finished()) {
            if let Some(task) = self.health_task.take() {
                if let Ok(availability) = task.await {
                    self.availability = availability;
                }
            }
        }

        if self.chat_task.as_ref().is_some_and(|t| t.is_finished()) {
            if let Some(task) = self.chat_task.take() {
                // A panicked task still settles the request.
                let outcome = task.await.unwrap_or(Err(ChatError::Internal));
                self.finish_chat(outcome);
            }
        }
    }

    /// Append the assistant turn for a settled request. The task handle has
    /// already been consumed, so pending is false on every path through
    /// here, including the error branches.
    fn finish_chat(&mut self, outcome: Result<ChatReply, ChatError>) {
        match outcome {
            Ok(reply) => {
                self.conversation.push_assistant(reply.response, reply.citations);
                self.availability = Availability::Online;
            }
            Err(err) => {
                if err == ChatError::Connectivity {
                    self.availability = Availability::Offline;
                }
                self.conversation.push_assistant(err.user_message(), Vec::new());
            }
        }
        self.scroll_chat_to_bottom();
    }

    /// Tick animation frame while a request is pending.
    pub fn tick_animation(&mut self) {
        if self.is_pending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let max = self.chat_line_count().saturating_sub(self.chat_height);
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(max);
    }

    /// Keep the newest message visible: called whenever the log grows.
    pub fn scroll_chat_to_bottom(&mut self) {
        let total = self.chat_line_count();
        let visible = if self.chat_height > 0 { self.chat_height } else { 20 };
        self.chat_scroll = total.saturating_sub(visible);
    }

    /// Estimate the rendered line count of the chat log, mirroring the
    /// layout in `ui.rs`: one role line per message, wrapped content lines,
    /// the citation block, and a blank separator.
    fn chat_line_count(&self) -> u16 {
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total: u16 = 0;
        for msg in self.conversation.messages() {
            total += 1; // role + timestamp line
            for line in msg.text.lines() {
                // Character count, not byte length, for UTF-8 content
                let chars = line.chars().count();
                total += chars.div_ceil(wrap_width).max(1) as u16;
            }
            if !msg.citations.is_empty() {
                total += 1 + msg.citations.len() as u16;
            }
            total += 1; // blank line after message
        }

        if self.is_pending() {
            total += 2; // "AI:" + typing indicator
        }

        total
    }
}
