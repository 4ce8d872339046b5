//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - colleges(id, name)
//! - students(id, name, college_id)
//! - events(id, name, event_type, event_date, status, college_id)
//! - registrations(id, student_id, event_id, registered_at)
//! - attendance_feedback(id, reg_id, is_present, feedback_score)

pub mod schema;
pub mod sqlite;

pub use sqlite::{DbStats, EventStore};
