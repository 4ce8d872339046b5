//! Report generator implementation
//!
//! Provides the read-only aggregate reports:
//! - Event popularity (registrations per event, optional type filter)
//! - Student participation (events a named student attended)
//! - Top active students (present-attendance counts)
//! - Event attendance (registrations vs. attendances per event)
//! - Event feedback (average score per event)
//!
//! Every report only sees events whose status is `Scheduled`.

use chrono::NaiveDateTime;
use rusqlite::params;
use serde::Serialize;
use crate::Result;
use crate::model::EventStatus;
use crate::storage::EventStore;

/// Default number of rows for [`ReportGenerator::top_active_students`]
pub const DEFAULT_TOP_STUDENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPopularity {
    pub event_name: String,
    pub event_type: Option<String>,
    pub registration_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentParticipation {
    pub student_name: String,
    pub event_name: String,
    pub event_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveStudent {
    pub student_name: String,
    pub college_name: String,
    pub attended_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventAttendance {
    pub event_name: String,
    pub registration_count: usize,
    pub attendance_count: usize,
}

impl EventAttendance {
    /// Share of registrations that attended, in percent.
    ///
    /// Zero when nobody registered.
    pub fn attendance_percentage(&self) -> f64 {
        if self.registration_count == 0 {
            return 0.0;
        }
        self.attendance_count as f64 / self.registration_count as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventFeedback {
    pub event_name: String,
    pub average_score: f64,
}

/// All five reports in one serializable bundle
#[derive(Debug, Clone, Serialize)]
pub struct CampusReport {
    pub popularity: Vec<EventPopularity>,
    pub participation: Option<Vec<StudentParticipation>>,
    pub top_students: Vec<ActiveStudent>,
    pub attendance: Vec<EventAttendance>,
    pub feedback: Vec<EventFeedback>,
}

/// Report generator over a campus event store
pub struct ReportGenerator<'a> {
    store: &'a EventStore,
}

impl<'a> ReportGenerator<'a> {
    /// Create a new report generator
    pub fn new(store: &'a EventStore) -> Self {
        Self { store }
    }

    /// Registrations per scheduled event, most popular first.
    ///
    /// Events without registrations are listed with a count of 0. When
    /// `event_type` is given only events of exactly that type are included.
    pub fn event_popularity(&self, event_type: Option<&str>) -> Result<Vec<EventPopularity>> {
        let sql = if event_type.is_some() {
            "SELECT e.name, e.event_type, COUNT(r.id) AS registration_count
             FROM events e
             LEFT JOIN registrations r ON e.id = r.event_id
             WHERE e.status = ?1 AND e.event_type = ?2
             GROUP BY e.id
             ORDER BY registration_count DESC, e.name ASC"
        } else {
            "SELECT e.name, e.event_type, COUNT(r.id) AS registration_count
             FROM events e
             LEFT JOIN registrations r ON e.id = r.event_id
             WHERE e.status = ?1
             GROUP BY e.id
             ORDER BY registration_count DESC, e.name ASC"
        };

        let mut stmt = self.store.conn().prepare(sql)?;

        let scheduled = EventStatus::Scheduled.as_str();
        let rows = if let Some(t) = event_type {
            stmt.query_map(params![scheduled, t], Self::row_to_popularity)?
                .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
            stmt.query_map(params![scheduled], Self::row_to_popularity)?
                .collect::<rusqlite::Result<Vec<_>>>()?
        };

        tracing::debug!("event popularity (type: {:?}): {} rows", event_type, rows.len());
        Ok(rows)
    }

    /// Helper to convert a row to an EventPopularity
    fn row_to_popularity(row: &rusqlite::Row) -> rusqlite::Result<EventPopularity> {
        let count: i64 = row.get(2)?;
        Ok(EventPopularity {
            event_name: row.get(0)?,
            event_type: row.get(1)?,
            registration_count: count as usize,
        })
    }

    /// Scheduled events the named student registered for and attended
    pub fn student_participation(&self, student_name: &str) -> Result<Vec<StudentParticipation>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT s.name, e.name, e.event_date
             FROM students s
             JOIN registrations r ON s.id = r.student_id
             JOIN events e ON r.event_id = e.id
             JOIN attendance_feedback af ON r.id = af.reg_id
             WHERE s.name = ?1 AND af.is_present = 1 AND e.status = ?2
             ORDER BY e.event_date ASC, e.name ASC",
        )?;

        let rows = stmt
            .query_map(params![student_name, EventStatus::Scheduled.as_str()], |row| {
                Ok(StudentParticipation {
                    student_name: row.get(0)?,
                    event_name: row.get(1)?,
                    event_date: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("participation for {:?}: {} rows", student_name, rows.len());
        Ok(rows)
    }

    /// Students with the most present attendances, at most `limit` rows.
    ///
    /// Students who never attended, or who belong to no college, are left out.
    pub fn top_active_students(&self, limit: usize) -> Result<Vec<ActiveStudent>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT s.name, c.name, COUNT(af.id) AS attended_count
             FROM students s
             JOIN registrations r ON s.id = r.student_id
             JOIN events e ON r.event_id = e.id
             JOIN attendance_feedback af ON r.id = af.reg_id
             JOIN colleges c ON s.college_id = c.id
             WHERE af.is_present = 1 AND e.status = ?1
             GROUP BY s.id
             ORDER BY attended_count DESC, s.name ASC
             LIMIT ?2",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![EventStatus::Scheduled.as_str(), limit], |row| {
                let count: i64 = row.get(2)?;
                Ok(ActiveStudent {
                    student_name: row.get(0)?,
                    college_name: row.get(1)?,
                    attended_count: count as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("top active students (limit {}): {} rows", limit, rows.len());
        Ok(rows)
    }

    /// Registration and attendance counts per scheduled event, by event name
    pub fn event_attendance(&self) -> Result<Vec<EventAttendance>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT e.name,
                    COUNT(r.id) AS registration_count,
                    COALESCE(SUM(CASE WHEN af.is_present = 1 THEN 1 ELSE 0 END), 0) AS attendance_count
             FROM events e
             LEFT JOIN registrations r ON e.id = r.event_id
             LEFT JOIN attendance_feedback af ON r.id = af.reg_id
             WHERE e.status = ?1
             GROUP BY e.id
             ORDER BY e.name ASC",
        )?;

        let rows = stmt
            .query_map([EventStatus::Scheduled.as_str()], |row| {
                let registrations: i64 = row.get(1)?;
                let attended: i64 = row.get(2)?;
                Ok(EventAttendance {
                    event_name: row.get(0)?,
                    registration_count: registrations as usize,
                    attendance_count: attended as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("event attendance: {} rows", rows.len());
        Ok(rows)
    }

    /// Average feedback score per scheduled event, best first.
    ///
    /// Only present attendances with a score count; events without any
    /// scored feedback are omitted.
    pub fn event_feedback(&self) -> Result<Vec<EventFeedback>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT e.name, AVG(af.feedback_score) AS average_score
             FROM events e
             JOIN registrations r ON e.id = r.event_id
             JOIN attendance_feedback af ON r.id = af.reg_id
             WHERE e.status = ?1 AND af.is_present = 1 AND af.feedback_score IS NOT NULL
             GROUP BY e.id
             ORDER BY average_score DESC, e.name ASC",
        )?;

        let rows = stmt
            .query_map([EventStatus::Scheduled.as_str()], |row| {
                Ok(EventFeedback {
                    event_name: row.get(0)?,
                    average_score: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("event feedback: {} rows", rows.len());
        Ok(rows)
    }

    /// Run every report; participation is only included when a student is named
    pub fn full_report(&self, student_name: Option<&str>, limit: usize) -> Result<CampusReport> {
        let participation = match student_name {
            Some(name) => Some(self.student_participation(name)?),
            None => None,
        };

        Ok(CampusReport {
            popularity: self.event_popularity(None)?,
            participation,
            top_students: self.top_active_students(limit)?,
            attendance: self.event_attendance()?,
            feedback: self.event_feedback()?,
        })
    }
}
