//! Reusable UI components for the review TUI

pub mod error_detail;
pub mod record_table;
pub mod status_display;

pub use record_table::RecordTable;
pub use status_display::{StatusDisplay, StatusMessage, StatusType};
