//! Field-level validation annotations
//!
//! Annotations are computed upstream and arrive attached to each record as an
//! `errors` object keyed by field name. This module only models them; it never
//! decides what counts as invalid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Field;

/// Seriousness of a single annotation.
///
/// Upstream sends an open string. Exactly `"warning"` and `"critical"` get
/// their own variants; any other text, including other spellings of those two,
/// is carried verbatim in `Other` so that it never fails to parse and always
/// serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Warning,
    Critical,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Warning => "warning",
            Severity::Critical => "critical",
            Severity::Other(s) => s,
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "warning" => Severity::Warning,
            "critical" => Severity::Critical,
            _ => Severity::Other(value),
        }
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        Severity::from(value.to_string())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation message attached to one field of one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
    pub severity: Severity,
}

impl FieldError {
    pub fn new(message: &str, severity: impl Into<Severity>) -> Self {
        Self {
            message: message.to_string(),
            severity: severity.into(),
        }
    }
}

/// Annotations of a record, keyed by field name.
///
/// Keys are expected to name display fields, but nothing upstream guarantees
/// it; see [`ErrorMap::malformed_keys`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<String, FieldError>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, error: FieldError) {
        self.0.insert(field.to_string(), error);
    }

    pub fn with(mut self, field: &str, error: FieldError) -> Self {
        self.insert(field, error);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries for display fields in column order, followed by any keys that
    /// match no display field (sorted).
    pub fn in_display_order(&self) -> Vec<(&str, &FieldError)> {
        let mut entries: Vec<(&str, &FieldError)> = Field::ALL
            .iter()
            .filter_map(|field| {
                self.0
                    .get_key_value(field.as_str())
                    .map(|(k, v)| (k.as_str(), v))
            })
            .collect();

        entries.extend(
            self.0
                .iter()
                .filter(|(k, _)| k.parse::<Field>().is_err())
                .map(|(k, v)| (k.as_str(), v)),
        );
        entries
    }

    /// Keys that do not name any display field
    pub fn malformed_keys(&self) -> Vec<&str> {
        self.0
            .keys()
            .filter(|k| k.parse::<Field>().is_err())
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parsing() {
        let warning: Severity = serde_json::from_str(r#""warning""#).unwrap();
        let critical: Severity = serde_json::from_str(r#""critical""#).unwrap();
        let unknown: Severity = serde_json::from_str(r#""banana""#).unwrap();

        assert_eq!(warning, Severity::Warning);
        assert_eq!(critical, Severity::Critical);
        assert_eq!(unknown, Severity::Other("banana".to_string()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), r#""banana""#);
    }

    #[test]
    fn test_severity_serializes_back_verbatim() {
        for raw in [r#""warning""#, r#""critical""#, r#""Critical""#, r#""WARNING""#, r#""banana""#] {
            let severity: Severity = serde_json::from_str(raw).unwrap();
            assert_eq!(serde_json::to_string(&severity).unwrap(), raw);
        }

        let mixed: Severity = serde_json::from_str(r#""Critical""#).unwrap();
        assert_eq!(mixed, Severity::Other("Critical".to_string()));
    }

    #[test]
    fn test_error_map_deserialization() {
        let json = r#"{
            "email": { "message": "bad domain", "severity": "warning" },
            "zipcode": { "message": "not a zipcode", "severity": "banana" }
        }"#;

        let map: ErrorMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("email").unwrap().message, "bad domain");
        assert_eq!(map.get("email").unwrap().severity, Severity::Warning);
        assert!(map.contains("zipcode"));
        assert!(!map.contains("name"));
    }

    #[test]
    fn test_display_order_puts_unknown_keys_last() {
        let map = ErrorMap::new()
            .with("status", FieldError::new("inactive", "critical"))
            .with("age", FieldError::new("not a field", "warning"))
            .with("email", FieldError::new("bad domain", "warning"));

        let keys: Vec<&str> = map.in_display_order().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["email", "status", "age"]);
        assert_eq!(map.malformed_keys(), vec!["age"]);
    }

    #[test]
    fn test_pseudo_fields_are_malformed_keys() {
        let map = ErrorMap::new().with("errors", FieldError::new("recursive", "warning"));
        assert_eq!(map.malformed_keys(), vec!["errors"]);
    }
}
