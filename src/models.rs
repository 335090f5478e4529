use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use crate::annotation::{ErrorMap, FieldError};
use crate::errors::ReviewError;

/// Displayable fields of a record, in column order.
///
/// `id` and `errors` are deliberately absent: they are bookkeeping and can
/// never be looked up as cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Street,
    City,
    Zipcode,
    Phone,
    Status,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Email,
        Field::Street,
        Field::City,
        Field::Zipcode,
        Field::Phone,
        Field::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Street => "street",
            Field::City => "city",
            Field::Zipcode => "zipcode",
            Field::Phone => "phone",
            Field::Status => "status",
        }
    }

    /// Column heading
    pub fn title(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Street => "Street",
            Field::City => "City",
            Field::Zipcode => "Zipcode",
            Field::Phone => "Phone",
            Field::Status => "Status",
        }
    }

    /// Names that exist on a record but are not display fields
    pub fn is_pseudo(name: &str) -> bool {
        matches!(name, "id" | "errors")
    }
}

impl FromStr for Field {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "street" => Ok(Field::Street),
            "city" => Ok(Field::City),
            "zipcode" => Ok(Field::Zipcode),
            "phone" => Ok(Field::Phone),
            "status" => Ok(Field::Status),
            other => Err(ReviewError::InvalidField(other.to_string())),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub zipcode: String,
    pub phone: String,
    pub status: String,
    #[serde(default)]
    pub errors: ErrorMap,
}

impl Record {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Street => &self.street,
            Field::City => &self.city,
            Field::Zipcode => &self.zipcode,
            Field::Phone => &self.phone,
            Field::Status => &self.status,
        }
    }

    pub fn has_annotation(&self, field: Field) -> bool {
        self.errors.contains(field.as_str())
    }

    pub fn annotation(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(field.as_str())
    }
}

/// Payload returned by the records endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub records: Vec<Record>,
}

/// Records from a single fetch, in arrival order.
///
/// A set is never edited; a new fetch replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        for (id, key) in malformed_annotations(&records) {
            warn!(
                "Record {} has an annotation for unknown field '{}'; it will not be shown on any cell",
                id, key
            );
        }
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn find(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Total number of annotations across all records
    pub fn annotation_count(&self) -> usize {
        self.records.iter().map(|r| r.errors.len()).sum()
    }

    /// `(record id, key)` for every annotation key that names no display field
    pub fn malformed_annotations(&self) -> Vec<(i64, String)> {
        malformed_annotations(&self.records)
    }
}

impl From<ApiResponse> for RecordSet {
    fn from(response: ApiResponse) -> Self {
        RecordSet::new(response.records)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn malformed_annotations(records: &[Record]) -> Vec<(i64, String)> {
    records
        .iter()
        .flat_map(|r| {
            r.errors
                .malformed_keys()
                .into_iter()
                .map(move |key| (r.id, key.to_string()))
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(id: i64, name: &str, errors: ErrorMap) -> Record {
        Record {
            id,
            name: name.to_string(),
            email: format!("user{}@example.com", id),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            zipcode: "12345".to_string(),
            phone: "555-0100".to_string(),
            status: "active".to_string(),
            errors,
        }
    }
}
