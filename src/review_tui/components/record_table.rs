//! Record table component: one row per record, one styled cell per field

use ratatui::{
    layout::{Constraint, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::{
    models::{Field, RecordSet},
    render::{render_rows, summary_label, TABLE_COLUMNS},
    resolver::{resolve_cell, Treatment},
    review_tui::ui::{truncate_string, Styles},
};

/// Relative column widths, the issues column last
const COLUMN_PERCENTAGES: [u16; 8] = [16, 20, 16, 11, 8, 11, 9, 9];

/// Selection state for the record table
pub struct RecordTable {
    pub state: TableState,
    pub selected_column: usize,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTable {
    pub fn new() -> Self {
        Self {
            state: TableState::default(),
            selected_column: 0,
        }
    }

    /// Reset selection after the record set was replaced
    pub fn reset(&mut self, len: usize) {
        self.state = TableState::default();
        self.state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn selected_field(&self) -> Field {
        TABLE_COLUMNS[self.selected_column]
    }

    pub fn navigate_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.state.select(Some(next));
    }

    pub fn navigate_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let previous = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(previous));
    }

    pub fn go_to_first(&mut self, len: usize) {
        self.state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn go_to_last(&mut self, len: usize) {
        self.state.select(len.checked_sub(1));
    }

    pub fn next_column(&mut self) {
        self.selected_column = (self.selected_column + 1) % TABLE_COLUMNS.len();
    }

    pub fn previous_column(&mut self) {
        self.selected_column = if self.selected_column == 0 {
            TABLE_COLUMNS.len() - 1
        } else {
            self.selected_column - 1
        };
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, records: &RecordSet) {
        if records.is_empty() {
            let empty = Paragraph::new("No records loaded. Press r to reload.")
                .style(Styles::inactive())
                .block(
                    Block::default()
                        .title("Records")
                        .borders(Borders::ALL)
                        .border_style(Styles::inactive_border()),
                );
            f.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(2) as usize;
        let max_widths: Vec<usize> = COLUMN_PERCENTAGES
            .iter()
            .map(|pct| (inner_width * *pct as usize / 100).saturating_sub(1).max(1))
            .collect();

        let header = Row::new(
            TABLE_COLUMNS
                .iter()
                .map(|field| field.title())
                .chain(std::iter::once("Issues"))
                .map(|title| Cell::from(title).style(Styles::title())),
        );

        let selected_row = self.state.selected();
        let rows: Vec<Row> = render_rows(records, &TABLE_COLUMNS)
            .into_iter()
            .zip(records.iter())
            .enumerate()
            .map(|(row_idx, (rendered, record))| {
                let mut cells: Vec<Cell> = rendered
                    .cells
                    .iter()
                    .enumerate()
                    .map(|(col_idx, cell)| {
                        let mut style = Styles::treatment(cell.treatment);
                        if selected_row == Some(row_idx) && col_idx == self.selected_column {
                            style = style.add_modifier(Modifier::UNDERLINED);
                        }
                        Cell::from(truncate_string(&cell.display_value, max_widths[col_idx]))
                            .style(style)
                    })
                    .collect();

                let summary_style = if rendered.annotation_count == 0 {
                    Styles::treatment(Treatment::Valid)
                } else {
                    Styles::warning()
                };
                cells.push(Cell::from(summary_label(record)).style(summary_style));
                Row::new(cells)
            })
            .collect();

        let widths: Vec<Constraint> = COLUMN_PERCENTAGES
            .iter()
            .map(|pct| Constraint::Percentage(*pct))
            .collect();

        let title = format!(
            "Records ({} loaded, {} issues)",
            records.len(),
            records.annotation_count()
        );

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected())
            .highlight_symbol("> ");

        f.render_stateful_widget(table, area, &mut self.state);
    }

    /// One-line tooltip for the selected cell
    pub fn render_tooltip(&self, f: &mut Frame, area: Rect, records: &RecordSet) {
        let field = self.selected_field();
        let cell = self
            .selected_index()
            .and_then(|idx| records.get(idx))
            .map(|record| resolve_cell(record, field));

        let line = match cell {
            Some(cell) => match cell.tooltip {
                Some(message) => Line::from(vec![
                    Span::styled(format!("{}: ", field.title()), Styles::title()),
                    Span::styled(message, Styles::treatment(cell.treatment)),
                ]),
                None => Line::from(Span::styled(
                    format!("{}: no issues", field.title()),
                    Styles::treatment(Treatment::Valid),
                )),
            },
            None => Line::from(Span::styled("Nothing selected", Styles::inactive())),
        };

        let widget = Paragraph::new(line).block(
            Block::default()
                .title("Cell")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_navigation_wraps() {
        let mut table = RecordTable::new();
        table.reset(3);
        assert_eq!(table.selected_index(), Some(0));

        table.navigate_up(3);
        assert_eq!(table.selected_index(), Some(2));
        table.navigate_down(3);
        assert_eq!(table.selected_index(), Some(0));

        table.go_to_last(3);
        assert_eq!(table.selected_index(), Some(2));

        table.reset(0);
        assert_eq!(table.selected_index(), None);
        table.navigate_down(0);
        assert_eq!(table.selected_index(), None);
    }

    #[test]
    fn test_column_navigation_wraps() {
        let mut table = RecordTable::new();
        assert_eq!(table.selected_field(), Field::Name);
        table.previous_column();
        assert_eq!(table.selected_field(), Field::Status);
        table.next_column();
        table.next_column();
        assert_eq!(table.selected_field(), Field::Email);
    }
}
