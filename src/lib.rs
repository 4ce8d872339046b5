//! # Campus Events - registration and attendance reporting
//!
//! Campus events keeps colleges, students, events, registrations and
//! attendance/feedback records in SQLite and aggregates them into reports.
//!
//! Campus events provides:
//! - A five-table relational schema with declarative integrity constraints
//! - Explicit insert operations and a sample dataset loader
//! - Five read-only reports restricted to scheduled events
//! - A CLI that renders reports as tables or JSON

pub mod model;
pub mod storage;
pub mod report;
pub mod seed;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use model::{AttendanceFeedback, College, Event, EventStatus, Registration, Student};
pub use report::ReportGenerator;
pub use storage::EventStore;

/// Result type alias for campus event operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for campus event operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Schema error: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Invalid event status: {0}")]
    InvalidStatus(String),
}
