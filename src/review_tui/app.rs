//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::{error, info, warn};

use super::components::{error_detail, RecordTable, StatusDisplay, StatusMessage};
use super::ui::{centered_rect, Styles};
use crate::config::Config;
use crate::errors::ReviewError;
use crate::export;
use crate::models::RecordSet;
use crate::render::DetailView;
use crate::source::{source_for, RecordSource};

/// Whether a record set is available to draw
#[derive(Debug)]
pub enum LoadState {
    /// A fetch is in flight; nothing may be resolved or drawn from records
    Loading,
    Ready(RecordSet),
}

/// What the event loop has to do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    Reload,
}

const KEY_HINTS: &str =
    "↑/↓: Row | ←/→: Field | Enter: Issues | e: Export CSV | r: Reload | ?: Help | q: Quit";

/// Main TUI application state
pub struct App {
    pub config: Config,
    source: Box<dyn RecordSource>,
    pub load_state: LoadState,
    pub table: RecordTable,
    pub detail: DetailView,
    pub status: StatusDisplay,
    pub show_help_popup: bool,
    pub should_quit: bool,
}

impl App {
    /// Create a new TUI application reading from the configured source
    pub fn new(config: Config) -> Result<Self> {
        let source = source_for(&config.source, &config)?;
        Ok(Self::with_source(config, source))
    }

    pub fn with_source(config: Config, source: Box<dyn RecordSource>) -> Self {
        Self {
            config,
            source,
            load_state: LoadState::Loading,
            table: RecordTable::new(),
            detail: DetailView::Closed,
            status: StatusDisplay::default(),
            show_help_popup: false,
            should_quit: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading)
    }

    /// The loaded records, or `None` while a fetch is in flight
    pub fn records(&self) -> Option<&RecordSet> {
        match &self.load_state {
            LoadState::Ready(records) => Some(records),
            LoadState::Loading => None,
        }
    }

    /// Enter the loading state. Returns false when a fetch is already
    /// outstanding, in which case the caller must not start another.
    pub fn begin_fetch(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.load_state = LoadState::Loading;
        self.detail.dismiss();
        self.status
            .set(StatusMessage::loading(format!("Loading {}...", self.source.describe())));
        true
    }

    /// Leave the loading state with the outcome of a fetch. A failure is
    /// logged and leaves an empty table behind.
    pub fn finish_fetch(&mut self, result: Result<RecordSet, ReviewError>) {
        let records = match result {
            Ok(records) => {
                info!("Loaded {} records", records.len());
                self.status.set(StatusMessage::success(format!(
                    "Loaded {} records ({} issues)",
                    records.len(),
                    records.annotation_count()
                )));
                records
            }
            Err(e) => {
                error!("Error fetching records: {}", e);
                self.status.set(StatusMessage::error(e.to_string()));
                RecordSet::empty()
            }
        };

        self.table.reset(records.len());
        self.detail.dismiss();
        self.load_state = LoadState::Ready(records);
    }

    /// Fetch from the source and store the outcome
    pub async fn fetch_records(&mut self) {
        let result = self.source.fetch().await;
        self.finish_fetch(result);
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.status
            .set(StatusMessage::loading(format!("Loading {}...", self.source.describe())));
        terminal.draw(|f| self.draw(f))?;
        self.fetch_records().await;

        loop {
            terminal.draw(|f| self.draw(f))?;

            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press
                    && self.handle_key_event(key) == AppAction::Reload
                    && self.begin_fetch()
                {
                    terminal.draw(|f| self.draw(f))?;
                    self.fetch_records().await;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return AppAction::None;
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                self.show_help_popup = !self.show_help_popup;
                return AppAction::None;
            }
            KeyCode::Esc if self.show_help_popup => {
                self.show_help_popup = false;
                return AppAction::None;
            }
            _ => {}
        }

        if self.show_help_popup {
            return AppAction::None;
        }

        let len = match self.records() {
            Some(records) => records.len(),
            None => return AppAction::None,
        };

        match key.code {
            KeyCode::Esc => self.detail.dismiss(),
            KeyCode::Down | KeyCode::Char('j') => self.table.navigate_down(len),
            KeyCode::Up | KeyCode::Char('k') => self.table.navigate_up(len),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.table.next_column(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.table.previous_column(),
            KeyCode::Home => self.table.go_to_first(len),
            KeyCode::End => self.table.go_to_last(len),
            KeyCode::Enter | KeyCode::Char('d') => self.open_selected_detail(),
            KeyCode::Char('e') => self.export_records(),
            KeyCode::Char('r') => return AppAction::Reload,
            _ => {}
        }

        AppAction::None
    }

    fn open_selected_detail(&mut self) {
        let records = match &self.load_state {
            LoadState::Ready(records) => records,
            LoadState::Loading => return,
        };
        if let Some(record) = self.table.selected_index().and_then(|i| records.get(i)) {
            self.detail.open(record);
        }
    }

    /// Export the loaded record set to `<export_dir>/<export_name>.csv`
    pub fn export_records(&mut self) {
        let records = match &self.load_state {
            LoadState::Ready(records) => records,
            LoadState::Loading => return,
        };

        let message = match export::export_to_csv(
            records,
            &self.config.export_name,
            &self.config.export_dir,
        ) {
            Ok(path) => StatusMessage::success(format!(
                "Exported {} records to {}",
                records.len(),
                path.display()
            )),
            Err(ReviewError::EmptyExport) => {
                warn!("Export requested with no records loaded");
                StatusMessage::warning("No records to export".to_string())
            }
            Err(e) => {
                error!("Export failed: {}", e);
                StatusMessage::error(format!("Export failed: {}", e))
            }
        };
        self.status.set(message);
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(size);

        match &self.load_state {
            LoadState::Loading => {
                let loading = Paragraph::new("Loading...")
                    .style(Styles::inactive())
                    .block(Block::default().title("Records").borders(Borders::ALL));
                f.render_widget(loading, chunks[0]);
                f.render_widget(
                    Paragraph::new("").block(Block::default().title("Cell").borders(Borders::ALL)),
                    chunks[1],
                );
            }
            LoadState::Ready(records) => {
                self.table.render(f, chunks[0], records);
                self.table.render_tooltip(f, chunks[1], records);

                if let Some(record) = self.detail.selected(records) {
                    error_detail::render(f, size, record);
                }
            }
        }

        self.status.render(f, chunks[2], KEY_HINTS);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 60, area);

        let help = "Record Review:\n\
            ↑/↓ or j/k - Select record\n\
            ←/→ or h/l - Select field (shows its issue below the table)\n\
            Home/End - First/last record\n\
            Enter / d - Show all issues of the record\n\
            Esc - Close issue list\n\
            e - Export loaded records to CSV\n\
            r - Reload records\n\
            F1 / ? - Toggle this help\n\
            q - Quit\n\n\
            Cell colours:\n\
            green - no issues\n\
            yellow - warning\n\
            red - critical\n\
            magenta - unrecognised severity";

        let popup = Paragraph::new(help)
            .block(
                Block::default()
                    .title("Help")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(Clear, popup_area);
        f.render_widget(popup, popup_area);
    }
}
