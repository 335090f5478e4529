//! Status bar component for showing messages and key hints

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::review_tui::ui::Styles;

/// Types of status messages
#[derive(Debug, Clone, PartialEq)]
pub enum StatusType {
    Success,
    Warning,
    Error,
    Loading,
}

/// Status message with type and content
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub status_type: StatusType,
    pub timestamp: DateTime<Local>,
}

impl StatusMessage {
    pub fn new(message: String, status_type: StatusType) -> Self {
        Self {
            message,
            status_type,
            timestamp: Local::now(),
        }
    }

    pub fn success(message: String) -> Self {
        Self::new(message, StatusType::Success)
    }

    pub fn warning(message: String) -> Self {
        Self::new(message, StatusType::Warning)
    }

    pub fn error(message: String) -> Self {
        Self::new(message, StatusType::Error)
    }

    pub fn loading(message: String) -> Self {
        Self::new(message, StatusType::Loading)
    }
}

/// Status bar: the latest message, or key hints when there is none
#[derive(Default)]
pub struct StatusDisplay {
    pub current_message: Option<StatusMessage>,
}

impl StatusDisplay {
    pub fn set(&mut self, message: StatusMessage) {
        self.current_message = Some(message);
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self.current_message,
            Some(StatusMessage {
                status_type: StatusType::Error,
                ..
            })
        )
    }

    pub fn render(&self, f: &mut Frame, area: Rect, hints: &str) {
        let (text, style) = match &self.current_message {
            Some(msg) => {
                let style = match msg.status_type {
                    StatusType::Success => Styles::success(),
                    StatusType::Warning => Styles::warning(),
                    StatusType::Error => Styles::error(),
                    StatusType::Loading => Styles::inactive(),
                };
                (
                    format!("[{}] {}", msg.timestamp.format("%H:%M:%S"), msg.message),
                    style,
                )
            }
            None => (hints.to_string(), Styles::inactive()),
        };

        let widget = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }
}
