//! Domain records stored by the campus event schema
//!
//! Five entities, from root to leaf:
//! - `College`: owning institution
//! - `Student`: optionally belongs to a college
//! - `Event`: categorized, dated, scheduled or cancelled
//! - `Registration`: a student's intent to attend an event
//! - `AttendanceFeedback`: whether the student showed up, plus an optional score
//!
//! Identifiers are opaque strings generated outside the store.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of an event.
///
/// Only `Scheduled` events are visible to reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    Scheduled,
    Cancelled,
}

impl EventStatus {
    /// Get the string stored in the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Scheduled => "Scheduled",
            EventStatus::Cancelled => "Cancelled",
        }
    }

    /// Get all statuses
    pub fn all() -> &'static [EventStatus] {
        &[EventStatus::Scheduled, EventStatus::Cancelled]
    }
}

impl FromStr for EventStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // US spelling
        if s.eq_ignore_ascii_case("canceled") {
            return Ok(EventStatus::Cancelled);
        }
        EventStatus::all()
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidStatus(s.to_string()))
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    pub id: String,
    pub name: String,
}

impl College {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub college_id: Option<String>,
}

impl Student {
    /// Create a student that belongs to no college
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            college_id: None,
        }
    }

    /// Attach the student to a college
    pub fn with_college(mut self, college_id: impl Into<String>) -> Self {
        self.college_id = Some(college_id.into());
        self
    }
}

/// A campus event.
///
/// `event_type` is a free-form category label such as "Workshop", "Fest" or
/// "Seminar"; reports filter on it by exact match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub event_type: Option<String>,
    pub date: NaiveDateTime,
    pub status: EventStatus,
    pub college_id: Option<String>,
}

impl Event {
    /// Create a scheduled event with no category or college
    pub fn new(id: impl Into<String>, name: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            event_type: None,
            date,
            status: EventStatus::Scheduled,
            college_id: None,
        }
    }

    /// Set the category label
    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Set the lifecycle status
    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the event to a hosting college
    pub fn with_college(mut self, college_id: impl Into<String>) -> Self {
        self.college_id = Some(college_id.into());
        self
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == EventStatus::Scheduled
    }
}

/// A student's registration for an event.
///
/// A (student_id, event_id) pair may be registered at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: String,
    pub student_id: String,
    pub event_id: String,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(
        id: impl Into<String>,
        student_id: impl Into<String>,
        event_id: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            student_id: student_id.into(),
            event_id: event_id.into(),
            registered_at,
        }
    }
}

/// Post-event attendance record for one registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceFeedback {
    pub id: String,
    pub reg_id: String,
    pub is_present: bool,
    /// Absent when the student did not attend or has not scored the event yet
    pub feedback_score: Option<i64>,
}

impl AttendanceFeedback {
    /// Record that the student attended, without a score yet
    pub fn present(id: impl Into<String>, reg_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reg_id: reg_id.into(),
            is_present: true,
            feedback_score: None,
        }
    }

    /// Record that the student did not show up
    pub fn absent(id: impl Into<String>, reg_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reg_id: reg_id.into(),
            is_present: false,
            feedback_score: None,
        }
    }

    /// Set the feedback score
    pub fn with_score(mut self, score: i64) -> Self {
        self.feedback_score = Some(score);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_event_status_roundtrip() {
        for status in EventStatus::all() {
            let parsed: EventStatus = status.as_str().parse().unwrap();
            assert_eq!(*status, parsed);
        }
    }

    #[test]
    fn test_event_status_is_case_insensitive() {
        assert_eq!(EventStatus::from_str("SCHEDULED").unwrap(), EventStatus::Scheduled);
        assert_eq!(EventStatus::from_str("canceled").unwrap(), EventStatus::Cancelled);
        assert!(matches!(
            EventStatus::from_str("Postponed"),
            Err(Error::InvalidStatus(_))
        ));
    }

    #[test]
    fn test_event_builder() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 22)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let event = Event::new("e1", "AI Hackathon", date)
            .with_type("Workshop")
            .with_college("col_01");

        assert!(event.is_scheduled());
        assert_eq!(event.event_type.as_deref(), Some("Workshop"));
        assert_eq!(event.college_id.as_deref(), Some("col_01"));

        let cancelled = event.with_status(EventStatus::Cancelled);
        assert!(!cancelled.is_scheduled());
    }

    #[test]
    fn test_attendance_constructors() {
        let present = AttendanceFeedback::present("a1", "r1").with_score(4);
        assert!(present.is_present);
        assert_eq!(present.feedback_score, Some(4));

        let absent = AttendanceFeedback::absent("a2", "r2");
        assert!(!absent.is_present);
        assert_eq!(absent.feedback_score, None);
    }
}
