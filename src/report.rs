//! Plain-text rendering of a record set for non-interactive use

use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

use crate::models::RecordSet;
use crate::render::{detail_entries, render_rows, summary_label, TABLE_COLUMNS};
use crate::review_tui::ui::truncate_string;

const COLUMN_WIDTH: usize = 22;

/// Table of records with a severity marker after each annotated value,
/// followed by a list of every issue.
///
/// Markers: `!` warning, `!!` critical, `?` unrecognised severity.
pub fn text_report(records: &RecordSet) -> String {
    let mut out = String::new();

    if records.is_empty() {
        out.push_str("No records loaded.\n");
        return out;
    }

    let _ = write!(out, "{:<6}", "ID");
    for field in TABLE_COLUMNS {
        let _ = write!(out, " {:<width$}", field.title(), width = COLUMN_WIDTH);
    }
    let _ = writeln!(out, " Issues");
    let _ = writeln!(out, "{}", "-".repeat(6 + (COLUMN_WIDTH + 1) * TABLE_COLUMNS.len() + 7));

    for (row, record) in render_rows(records, &TABLE_COLUMNS).iter().zip(records.iter()) {
        let _ = write!(out, "{:<6}", row.record_id);
        for cell in &row.cells {
            let text = format!(
                "{}{}",
                truncate_string(&cell.display_value, COLUMN_WIDTH - 2),
                cell.treatment.marker()
            );
            let _ = write!(out, " {}", pad(&text, COLUMN_WIDTH));
        }
        let _ = writeln!(out, " {}", summary_label(record));
    }

    let issues: Vec<_> = records
        .iter()
        .flat_map(|record| {
            detail_entries(record)
                .into_iter()
                .map(move |entry| (record.id, entry))
        })
        .collect();

    let _ = writeln!(out);
    let _ = writeln!(out, "Total: {} records, {} issues", records.len(), issues.len());

    for (id, entry) in issues {
        let _ = write!(
            out,
            "  #{} {} [{}] {}",
            id, entry.field, entry.severity, entry.message
        );
        if !entry.known_field {
            let _ = write!(out, " (unknown field)");
        }
        let _ = writeln!(out);
    }

    out
}

/// Left-align to a display width; `{:<n}` pads by chars, which misaligns wide glyphs
fn pad(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{ErrorMap, FieldError};
    use crate::models::fixtures::record;

    #[test]
    fn test_report_marks_annotated_cells() {
        let set = RecordSet::new(vec![
            record(
                1,
                "Jo, Ann",
                ErrorMap::new()
                    .with("email", FieldError::new("bad domain", "warning"))
                    .with("status", FieldError::new("blocked", "critical")),
            ),
            record(
                2,
                "Bob",
                ErrorMap::new().with("zipcode", FieldError::new("odd format", "banana")),
            ),
        ]);

        let report = text_report(&set);
        assert!(report.contains("user1@example.com!"));
        assert!(report.contains("active!!"));
        assert!(report.contains("12345?"));
        assert!(report.contains("#1 email [warning] bad domain"));
        assert!(report.contains("#2 zipcode [banana] odd format"));
        assert!(report.contains("Total: 2 records, 3 issues"));
    }

    #[test]
    fn test_wide_values_keep_columns_aligned() {
        let mut wide = record(2, "山田太郎", ErrorMap::new());
        wide.city = "東京都新宿区西新宿二丁目八番一号".to_string();
        let set = RecordSet::new(vec![record(1, "Jo", ErrorMap::new()), wide]);

        let report = text_report(&set);
        let lines: Vec<&str> = report.lines().collect();

        // Display offset of the Issues column must match the header on every row
        let issues_at = lines[0].width() - "Issues".width();
        for (line, record) in lines[2..4].iter().zip(set.iter()) {
            assert_eq!(line.width() - summary_label(record).width(), issues_at);
        }
        assert!(lines[3].contains("山田太郎"));
        assert!(lines[3].contains("東京都新宿区西新宿…"));
    }

    #[test]
    fn test_report_on_empty_set() {
        assert_eq!(text_report(&RecordSet::empty()), "No records loaded.\n");
    }
}
