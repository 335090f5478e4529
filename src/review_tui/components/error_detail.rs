//! Error detail popup listing every annotation of one record

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use crate::{
    models::Record,
    render::detail_entries,
    review_tui::ui::{centered_rect, Styles},
};

pub fn render(f: &mut Frame, area: Rect, record: &Record) {
    let popup_area = centered_rect(70, 50, area);
    let entries = detail_entries(record);

    let items: Vec<ListItem> = if entries.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No issues on this record",
            Styles::success(),
        )))]
    } else {
        let field_width = entries.iter().map(|e| e.field.len()).max().unwrap_or(0);

        entries
            .iter()
            .map(|entry| {
                let mut spans = vec![
                    Span::styled(
                        format!("{:<width$}", entry.field, width = field_width),
                        Styles::title(),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("[{}]", entry.severity),
                        Styles::treatment(entry.treatment),
                    ),
                    Span::raw(" "),
                    Span::raw(entry.message.clone()),
                ];
                if !entry.known_field {
                    spans.push(Span::styled(" (unknown field)", Styles::inactive()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let title = format!("Issues for #{} {} (Esc to close)", record.id, record.name);
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Styles::active_border()),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(list, popup_area);
}
