//! datareview: review records carrying per-field validation annotations
//!
//! Records arrive with an `errors` map computed upstream. This crate resolves
//! each displayed cell to a value plus a visual treatment derived from the
//! annotation severity, drives a terminal table with an issue detail view, and
//! exports the loaded records to CSV.

pub mod annotation;
pub mod config;
pub mod errors;
pub mod export;
pub mod models;
pub mod render;
pub mod report;
pub mod resolver;
pub mod review_tui;
pub mod source;

pub use annotation::{ErrorMap, FieldError, Severity};
pub use errors::ReviewError;
pub use export::{export_to_csv, to_csv_string};
pub use models::{Field, Record, RecordSet};
pub use resolver::{resolve_cell, resolve_cell_by_name, style, CellView, Treatment};
