//! Table model: resolved rows and the error-detail state machine
//!
//! Nothing here touches the terminal. The TUI draws what this module computes.

use crate::annotation::Severity;
use crate::models::{Field, Record, RecordSet};
use crate::resolver::{resolve_row, style, CellView, Treatment};

/// Columns shown in the table, before the issues column
pub const TABLE_COLUMNS: [Field; 7] = Field::ALL;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub record_id: i64,
    pub cells: Vec<CellView>,
    pub annotation_count: usize,
}

/// One row per record in set order, cells in `columns` order
pub fn render_rows(records: &RecordSet, columns: &[Field]) -> Vec<RenderedRow> {
    records
        .iter()
        .map(|record| RenderedRow {
            record_id: record.id,
            cells: resolve_row(record, columns),
            annotation_count: record.errors.len(),
        })
        .collect()
}

/// Text of the per-row error summary affordance
pub fn summary_label(record: &Record) -> String {
    match record.errors.len() {
        0 => "ok".to_string(),
        1 => "1 issue".to_string(),
        n => format!("{} issues", n),
    }
}

/// Whether the error detail panel is showing, and for which record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailView {
    #[default]
    Closed,
    Open { record_id: i64 },
}

impl DetailView {
    /// Open the panel for `record`, replacing whatever was open
    pub fn open(&mut self, record: &Record) {
        *self = DetailView::Open {
            record_id: record.id,
        };
    }

    pub fn dismiss(&mut self) {
        *self = DetailView::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DetailView::Open { .. })
    }

    pub fn record_id(&self) -> Option<i64> {
        match self {
            DetailView::Open { record_id } => Some(*record_id),
            DetailView::Closed => None,
        }
    }

    /// The record being inspected, if it is still in `records`
    pub fn selected<'a>(&self, records: &'a RecordSet) -> Option<&'a Record> {
        self.record_id().and_then(|id| records.find(id))
    }
}

/// A line of the error detail panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEntry {
    pub field: String,
    pub message: String,
    pub severity: Severity,
    pub treatment: Treatment,
    /// False when the key names no display field
    pub known_field: bool,
}

pub fn detail_entries(record: &Record) -> Vec<DetailEntry> {
    record
        .errors
        .in_display_order()
        .into_iter()
        .map(|(key, annotation)| {
            let known_field = key.parse::<Field>().is_ok();
            DetailEntry {
                field: key.to_string(),
                message: annotation.message.clone(),
                severity: annotation.severity.clone(),
                treatment: if known_field {
                    style(&annotation.severity)
                } else {
                    Treatment::Neutral
                },
                known_field,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{ErrorMap, FieldError};
    use crate::models::fixtures::record;

    fn sample_set() -> RecordSet {
        RecordSet::new(vec![
            record(
                10,
                "Jo, Ann",
                ErrorMap::new().with("email", FieldError::new("bad domain", "warning")),
            ),
            record(4, "Bob", ErrorMap::new()),
            record(
                7,
                "Cy",
                ErrorMap::new()
                    .with("zipcode", FieldError::new("odd format", "banana"))
                    .with("status", FieldError::new("blocked", "critical"))
                    .with("nickname", FieldError::new("stray key", "warning")),
            ),
        ])
    }

    #[test]
    fn test_rows_follow_record_set_order() {
        let rows = render_rows(&sample_set(), &TABLE_COLUMNS);
        let ids: Vec<i64> = rows.iter().map(|r| r.record_id).collect();
        assert_eq!(ids, vec![10, 4, 7]);
        assert!(rows.iter().all(|r| r.cells.len() == TABLE_COLUMNS.len()));
    }

    #[test]
    fn test_rows_follow_caller_column_order() {
        let rows = render_rows(&sample_set(), &[Field::Status, Field::Name]);
        assert_eq!(rows[0].cells[1].display_value, "Jo, Ann");
        assert_eq!(rows[2].cells[0].treatment, Treatment::Critical);
    }

    #[test]
    fn test_scenario_a_email_warning() {
        let rows = render_rows(&sample_set(), &TABLE_COLUMNS);
        let email = &rows[0].cells[1];
        assert_eq!(email.treatment, Treatment::Warning);
        assert_eq!(email.tooltip.as_deref(), Some("bad domain"));
    }

    #[test]
    fn test_detail_view_transitions() {
        let set = sample_set();
        let mut view = DetailView::default();
        assert!(!view.is_open());

        view.open(set.get(0).unwrap());
        assert_eq!(view.record_id(), Some(10));

        view.open(set.get(2).unwrap());
        assert_eq!(view, DetailView::Open { record_id: 7 });
        assert_eq!(view.selected(&set).unwrap().name, "Cy");

        view.dismiss();
        assert_eq!(view, DetailView::Closed);
        assert!(view.selected(&set).is_none());
    }

    #[test]
    fn test_detail_entries_include_unknown_severity_and_keys() {
        let set = sample_set();
        let entries = detail_entries(set.find(7).unwrap());

        let fields: Vec<&str> = entries.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["zipcode", "status", "nickname"]);

        assert_eq!(entries[0].message, "odd format");
        assert_eq!(entries[0].treatment, Treatment::Neutral);
        assert!(entries[0].known_field);

        assert_eq!(entries[1].treatment, Treatment::Critical);

        assert!(!entries[2].known_field);
        assert_eq!(entries[2].treatment, Treatment::Neutral);
    }

    #[test]
    fn test_summary_label() {
        let set = sample_set();
        assert_eq!(summary_label(set.find(4).unwrap()), "ok");
        assert_eq!(summary_label(set.find(10).unwrap()), "1 issue");
        assert_eq!(summary_label(set.find(7).unwrap()), "3 issues");
    }
}
