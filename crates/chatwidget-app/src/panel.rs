//! Widget panel view model.
//!
//! Mirrors the session's transcript and visibility from the event bus.
//! The renderer reads it; nothing here talks to the network.

use chatwidget_common::{ChatMessage, Color, Event};
use chatwidget_config::colors::parse_color;
use chatwidget_config::{Position, WidgetConfig};

/// Header fallback when the configured theme color does not parse.
const FALLBACK_THEME: Color = Color::from_rgba(0x2e, 0x29, 0x4e, 255);

pub struct WidgetPanel {
    title: String,
    theme: Color,
    position: Position,
    open: bool,
    messages: Vec<ChatMessage>,
    scroll_offset: usize,
    status: Option<String>,
}

impl WidgetPanel {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            title: config.widget.title.clone(),
            theme: parse_color(&config.widget.theme_color).unwrap_or(FALLBACK_THEME),
            position: config.widget.position,
            open: true,
            messages: Vec::new(),
            scroll_offset: 0,
            status: None,
        }
    }

    /// Apply one session event. Returns `true` if a redraw is needed.
    pub fn apply(&mut self, event: &Event) -> bool {
        match event {
            Event::MessageAppended { index, message } => {
                if *index < self.messages.len() {
                    return false;
                }
                self.messages.push(message.clone());
                self.scroll_offset = 0;
                true
            }
            Event::VisibilityChanged { open } => {
                self.open = *open;
                if self.open {
                    self.scroll_offset = 0;
                }
                true
            }
            Event::ConversationStarted { .. } => {
                self.status = None;
                false
            }
            Event::BootstrapFailed { reason } | Event::ExchangeFailed { reason } => {
                self.status = Some(reason.clone());
                false
            }
            Event::Shutdown | Event::Unknown => false,
        }
    }

    /// Replace the mirrored transcript, e.g. after the subscriber lagged.
    pub fn sync(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
        self.scroll_offset = 0;
    }

    pub fn scroll_up(&mut self, n: usize) {
        let max = self.messages.len().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.saturating_add(n).min(max);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    /// The newest `limit` messages, shifted back by the scroll offset.
    pub fn visible_messages(&self, limit: usize) -> &[ChatMessage] {
        let end = self.messages.len().saturating_sub(self.scroll_offset);
        let start = end.saturating_sub(limit);
        &self.messages[start..end]
    }

    // -- Getters --

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn theme(&self) -> Color {
        self.theme
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Last backend failure, cleared when a conversation starts.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}
