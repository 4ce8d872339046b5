//! Sample dataset for demos and smoke tests
//!
//! Two colleges, five students, four events (one cancelled) and five
//! registrations with attendance. Ids other than the college keys are
//! random UUIDs, so only names are stable across runs.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;
use crate::Result;
use crate::model::{AttendanceFeedback, College, Event, EventStatus, Registration, Student};
use crate::storage::EventStore;

/// Rows inserted by [`populate_sample_data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SeedSummary {
    pub colleges: usize,
    pub students: usize,
    pub events: usize,
    /// Events still open to reports
    pub scheduled_events: usize,
    pub registrations: usize,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Insert the sample dataset in a single transaction.
///
/// Expects an initialized, empty store; colliding college ids fail the
/// whole load.
pub fn populate_sample_data(store: &EventStore) -> Result<SeedSummary> {
    let colleges = [
        College::new("col_01", "Global Tech Institute"),
        College::new("col_02", "National Arts University"),
    ];

    let students = [
        Student::new(new_id(), "Alice Johnson").with_college("col_01"),
        Student::new(new_id(), "Bob Williams").with_college("col_01"),
        Student::new(new_id(), "Charlie Brown").with_college("col_01"),
        Student::new(new_id(), "Diana Miller").with_college("col_02"),
        Student::new(new_id(), "Ethan Davis").with_college("col_02"),
    ];

    let events = [
        Event::new(new_id(), "AI Hackathon 2025", midnight(2025, 10, 22))
            .with_type("Workshop")
            .with_college("col_01"),
        Event::new(new_id(), "Annual Tech Fest", midnight(2025, 11, 15))
            .with_type("Fest")
            .with_college("col_01"),
        Event::new(new_id(), "Modern Art Exhibition", midnight(2025, 10, 5))
            .with_type("Seminar")
            .with_college("col_02"),
        Event::new(new_id(), "Cancelled Coding Contest", midnight(2025, 9, 1))
            .with_type("Workshop")
            .with_status(EventStatus::Cancelled)
            .with_college("col_01"),
    ];

    // (student index, event index, present, score)
    let attendance: [(usize, usize, bool, Option<i64>); 5] = [
        (0, 0, true, Some(5)),
        (1, 0, true, Some(4)),
        (0, 1, true, Some(5)),
        (2, 1, false, None),
        (3, 2, true, Some(3)),
    ];

    store.transaction(|store| {
        for college in &colleges {
            store.insert_college(college)?;
        }
        for student in &students {
            store.insert_student(student)?;
        }
        for event in &events {
            store.insert_event(event)?;
        }

        for &(student, event, present, score) in &attendance {
            let registration =
                Registration::new(new_id(), &students[student].id, &events[event].id, Utc::now());
            store.insert_registration(&registration)?;

            let record = if present {
                AttendanceFeedback::present(new_id(), &registration.id)
            } else {
                AttendanceFeedback::absent(new_id(), &registration.id)
            };
            let record = match score {
                Some(score) => record.with_score(score),
                None => record,
            };
            store.insert_attendance(&record)?;
        }
        Ok(())
    })?;

    let summary = SeedSummary {
        colleges: colleges.len(),
        students: students.len(),
        events: events.len(),
        scheduled_events: events.iter().filter(|e| e.is_scheduled()).count(),
        registrations: attendance.len(),
    };
    tracing::info!(
        "Seeded {} colleges, {} students, {} events ({} scheduled), {} registrations",
        summary.colleges,
        summary.students,
        summary.events,
        summary.scheduled_events,
        summary.registrations
    );
    Ok(summary)
}
