//! Cell resolution: what a cell shows and how it is flagged

use tracing::error;

use crate::annotation::Severity;
use crate::errors::{Result, ReviewError};
use crate::models::{Field, Record};

/// Visual bucket assigned to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Treatment {
    /// No annotation on this field
    Valid,
    /// Moderate emphasis
    Warning,
    /// High emphasis
    Critical,
    /// Annotated with a severity we do not recognise
    Neutral,
    /// Bookkeeping pseudo-field, rendered as nothing
    Blank,
}

impl Treatment {
    /// Short marker used in plain-text output
    pub fn marker(&self) -> &'static str {
        match self {
            Treatment::Valid => "",
            Treatment::Warning => "!",
            Treatment::Critical => "!!",
            Treatment::Neutral => "?",
            Treatment::Blank => "",
        }
    }
}

/// Map an annotation severity to its treatment
pub fn style(severity: &Severity) -> Treatment {
    match severity {
        Severity::Warning => Treatment::Warning,
        Severity::Critical => Treatment::Critical,
        Severity::Other(_) => Treatment::Neutral,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub display_value: String,
    pub treatment: Treatment,
    pub tooltip: Option<String>,
}

impl CellView {
    pub fn blank() -> Self {
        Self {
            display_value: String::new(),
            treatment: Treatment::Blank,
            tooltip: None,
        }
    }
}

pub fn resolve_cell(record: &Record, field: Field) -> CellView {
    let display_value = record.value(field).to_string();

    match record.annotation(field) {
        Some(annotation) => CellView {
            display_value,
            treatment: style(&annotation.severity),
            tooltip: Some(annotation.message.clone()),
        },
        None => CellView {
            display_value,
            treatment: Treatment::Valid,
            tooltip: None,
        },
    }
}

/// Resolve a cell from a field name coming from outside the type system.
///
/// `id` and `errors` resolve to a blank cell. Any other unknown name is a
/// caller bug and is returned as [`ReviewError::InvalidField`].
pub fn resolve_cell_by_name(record: &Record, name: &str) -> Result<CellView> {
    if Field::is_pseudo(name) {
        return Ok(CellView::blank());
    }

    match name.parse::<Field>() {
        Ok(field) => Ok(resolve_cell(record, field)),
        Err(err) => {
            if cfg!(debug_assertions) {
                error!("Asked to resolve unknown field '{}' on record {}", name, record.id);
            }
            Err(err)
        }
    }
}

/// Resolve every cell of a record in the given column order
pub fn resolve_row(record: &Record, columns: &[Field]) -> Vec<CellView> {
    columns.iter().map(|f| resolve_cell(record, *f)).collect()
}
