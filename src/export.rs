//! CSV export of the loaded record set

use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::{Result, ReviewError};
use crate::models::{Field, Record, RecordSet};

/// Scalar columns of a record in declaration order. The annotation map is
/// not a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportColumn {
    Id,
    Field(Field),
}

impl ExportColumn {
    pub const ALL: [ExportColumn; 8] = [
        ExportColumn::Id,
        ExportColumn::Field(Field::Name),
        ExportColumn::Field(Field::Email),
        ExportColumn::Field(Field::Street),
        ExportColumn::Field(Field::City),
        ExportColumn::Field(Field::Zipcode),
        ExportColumn::Field(Field::Phone),
        ExportColumn::Field(Field::Status),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportColumn::Id => "id",
            ExportColumn::Field(field) => field.as_str(),
        }
    }

    fn value(&self, record: &Record) -> String {
        match self {
            ExportColumn::Id => record.id.to_string(),
            ExportColumn::Field(field) => record.value(*field).to_string(),
        }
    }
}

/// Serialize the record set: header first, every field quoted, quotes
/// doubled, rows separated by `\n` with no trailing terminator.
pub fn to_csv_string(records: &RecordSet) -> Result<String> {
    if records.is_empty() {
        return Err(ReviewError::EmptyExport);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .double_quote(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(ExportColumn::ALL.iter().map(|c| c.as_str()))?;
    for record in records {
        writer.write_record(ExportColumn::ALL.iter().map(|c| c.value(record)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReviewError::Io(e.into_error()))?;
    let mut text = String::from_utf8(bytes)
        .map_err(|e| ReviewError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// `<filename>.csv`, unless the name already carries the extension
pub fn export_file_name(filename: &str) -> String {
    if filename.to_lowercase().ends_with(".csv") {
        filename.to_string()
    } else {
        format!("{}.csv", filename)
    }
}

/// Write the record set to `<dir>/<filename>.csv` in one go.
///
/// An empty set fails with [`ReviewError::EmptyExport`] before anything is
/// created on disk.
pub fn export_to_csv(records: &RecordSet, filename: &str, dir: &Path) -> Result<PathBuf> {
    let contents = to_csv_string(records)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(filename));
    std::fs::write(&path, contents)?;

    info!("Exported {} records to {}", records.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{ErrorMap, FieldError};
    use crate::models::fixtures::record;
    use tempfile::TempDir;

    fn sample_set() -> RecordSet {
        let mut quoted = record(2, "Bob \"The Builder\"", ErrorMap::new());
        quoted.street = "4 Pine, Apt \"B\"".to_string();

        RecordSet::new(vec![
            record(
                1,
                "Jo, Ann",
                ErrorMap::new().with("email", FieldError::new("bad domain", "warning")),
            ),
            quoted,
        ])
    }

    #[test]
    fn test_header_excludes_annotations() {
        let text = to_csv_string(&sample_set()).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            r#""id","name","email","street","city","zipcode","phone","status""#
        );
        assert!(!text.contains("errors"));
        assert!(!text.contains("bad domain"));
    }

    #[test]
    fn test_values_are_quoted_and_escaped() {
        let text = to_csv_string(&sample_set()).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with(r#""1","Jo, Ann","#));
        assert!(lines[2].contains(r#""Bob ""The Builder""""#));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_rows_follow_arrival_order() {
        let set = RecordSet::new(vec![
            record(9, "Nina", ErrorMap::new()),
            record(1, "Abe", ErrorMap::new()),
            record(5, "Eli", ErrorMap::new()),
        ]);

        let text = to_csv_string(&set).unwrap();
        let ids: Vec<String> = csv::Reader::from_reader(text.as_bytes())
            .records()
            .map(|r| r.unwrap()[0].to_string())
            .collect();
        assert_eq!(ids, vec!["9", "1", "5"]);

        let lines: Vec<&str> = text.split('\n').skip(1).collect();
        assert!(lines[0].starts_with(r#""9","Nina""#));
        assert!(lines[1].starts_with(r#""1","Abe""#));
        assert!(lines[2].starts_with(r#""5","Eli""#));
    }

    #[test]
    fn test_round_trip_with_standard_reader() {
        let set = sample_set();
        let text = to_csv_string(&set).unwrap();

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), set.len());

        for (row, record) in rows.iter().zip(set.iter()) {
            assert_eq!(&row[0], record.id.to_string());
            for (i, field) in Field::ALL.iter().enumerate() {
                assert_eq!(&row[i + 1], record.value(*field));
            }
        }
    }

    #[test]
    fn test_empty_set_is_rejected() {
        assert!(matches!(
            to_csv_string(&RecordSet::empty()),
            Err(ReviewError::EmptyExport)
        ));
    }

    #[test]
    fn test_export_writes_named_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = export_to_csv(&sample_set(), "review", temp_dir.path()).unwrap();

        assert_eq!(path, temp_dir.path().join("review.csv"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_csv_string(&sample_set()).unwrap());
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("exports");

        let result = export_to_csv(&RecordSet::empty(), "review", &out);
        assert!(matches!(result, Err(ReviewError::EmptyExport)));
        assert!(!out.exists());
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("records"), "records.csv");
        assert_eq!(export_file_name("records.CSV"), "records.CSV");
    }
}
