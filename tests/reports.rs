use campus_events::model::{AttendanceFeedback, College, Event, EventStatus, Registration, Student};
use campus_events::report::DEFAULT_TOP_STUDENTS;
use campus_events::{seed, Error, EventStore, ReportGenerator};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use tempfile::TempDir;

fn date(month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn seeded_file_store() -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campus_events.db");
    let store = EventStore::create(&path).unwrap();
    seed::populate_sample_data(&store).unwrap();
    (dir, path)
}

#[test]
fn reports_survive_reopening_the_file() {
    let (_dir, path) = seeded_file_store();

    let store = EventStore::open(&path).unwrap();
    assert!(store.has_schema().unwrap());
    let reports = ReportGenerator::new(&store);

    let popularity = reports.event_popularity(None).unwrap();
    let names: Vec<_> = popularity.iter().map(|p| p.event_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["AI Hackathon 2025", "Annual Tech Fest", "Modern Art Exhibition"]
    );

    let top = reports.top_active_students(DEFAULT_TOP_STUDENTS).unwrap();
    assert!(top.len() <= DEFAULT_TOP_STUDENTS);
    assert!(top.iter().all(|s| s.attended_count > 0));
    assert!(top.iter().all(|s| s.student_name != "Charlie Brown"));
    assert!(top.iter().all(|s| s.student_name != "Ethan Davis"));
}

#[test]
fn cancelled_event_is_hidden_from_every_report() {
    let (_dir, path) = seeded_file_store();
    let store = EventStore::open(&path).unwrap();
    let reports = ReportGenerator::new(&store);
    let cancelled = "Cancelled Coding Contest";

    let everything = reports
        .full_report(Some("Alice Johnson"), DEFAULT_TOP_STUDENTS)
        .unwrap();
    assert!(everything.popularity.iter().all(|r| r.event_name != cancelled));
    assert!(everything
        .participation
        .unwrap_or_default()
        .iter()
        .all(|r| r.event_name != cancelled));
    assert!(everything.attendance.iter().all(|r| r.event_name != cancelled));
    assert!(everything.feedback.iter().all(|r| r.event_name != cancelled));

    let workshops = reports.event_popularity(Some("Workshop")).unwrap();
    assert_eq!(workshops.len(), 1);
}

#[test]
fn fresh_file_has_no_schema_and_reports_fail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");

    let store = EventStore::open(&path).unwrap();
    assert!(!store.has_schema().unwrap());

    let reports = ReportGenerator::new(&store);
    assert!(matches!(reports.event_attendance(), Err(Error::Storage(_))));
    assert!(matches!(
        reports.student_participation("Alice Johnson"),
        Err(Error::Storage(_))
    ));
}

#[test]
fn create_wipes_existing_data() {
    let (_dir, path) = seeded_file_store();

    let store = EventStore::create(&path).unwrap();
    let stats = store.stats().unwrap();
    assert_eq!(stats.students, 0);
    assert_eq!(stats.attendance, 0);
    assert!(ReportGenerator::new(&store).event_popularity(None).unwrap().is_empty());
}

#[test]
fn absent_only_event_reports_zero_percent() {
    let dir = tempfile::tempdir().unwrap();
    let store = EventStore::create(&dir.path().join("campus.db")).unwrap();

    store.insert_college(&College::new("col_01", "X")).unwrap();
    store
        .insert_student(&Student::new("s1", "Charlie").with_college("col_01"))
        .unwrap();
    store
        .insert_event(&Event::new("e1", "Late Lecture", date(11, 2)).with_type("Seminar"))
        .unwrap();
    store
        .insert_event(
            &Event::new("e2", "Called Off", date(11, 3)).with_status(EventStatus::Cancelled),
        )
        .unwrap();
    store
        .insert_registration(&Registration::new("r1", "s1", "e1", Utc::now()))
        .unwrap();
    store.insert_attendance(&AttendanceFeedback::absent("a1", "r1")).unwrap();

    let reports = ReportGenerator::new(&store);
    let attendance = reports.event_attendance().unwrap();
    assert_eq!(attendance.len(), 1);
    assert_eq!(attendance[0].registration_count, 1);
    assert_eq!(attendance[0].attendance_count, 0);
    assert_eq!(format!("{:.2}", attendance[0].attendance_percentage()), "0.00");

    assert!(reports.student_participation("Charlie").unwrap().is_empty());
    assert!(reports.top_active_students(3).unwrap().is_empty());
    assert!(reports.event_feedback().unwrap().is_empty());
}
