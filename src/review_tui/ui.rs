//! Common UI styles and layout helpers for the review TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::resolver::Treatment;

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn selected() -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn warning() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn inactive() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_border() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn inactive_border() -> Style {
        Style::default().fg(Color::Gray)
    }

    /// Cell style for each treatment bucket. Valid, Warning, Critical and
    /// Neutral must stay visually distinct from one another.
    pub fn treatment(treatment: Treatment) -> Style {
        match treatment {
            Treatment::Valid => Style::default().fg(Color::Green),
            Treatment::Warning => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow),
            Treatment::Critical => Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            Treatment::Neutral => Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
            Treatment::Blank => Style::default(),
        }
    }
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Truncate to a display width, marking the cut with an ellipsis (Unicode-aware)
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let target_width = max_width.saturating_sub(1);
    let mut truncated = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        truncated.push(ch);
        current_width += ch_width;
    }

    format!("{}…", truncated)
}
