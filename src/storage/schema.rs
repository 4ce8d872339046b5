//! Database schema definitions

/// Drop statements, children before parents so foreign keys never dangle
pub const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS attendance_feedback",
    "DROP TABLE IF EXISTS registrations",
    "DROP TABLE IF EXISTS events",
    "DROP TABLE IF EXISTS students",
    "DROP TABLE IF EXISTS colleges",
];

/// SQL to create the colleges table
pub const CREATE_COLLEGES_TABLE: &str = r#"
CREATE TABLE colleges (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL
)
"#;

/// SQL to create the students table
pub const CREATE_STUDENTS_TABLE: &str = r#"
CREATE TABLE students (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    college_id TEXT,
    FOREIGN KEY (college_id) REFERENCES colleges (id)
)
"#;

/// SQL to create the events table
pub const CREATE_EVENTS_TABLE: &str = r#"
CREATE TABLE events (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    event_type TEXT,
    event_date TEXT NOT NULL,
    status TEXT NOT NULL,
    college_id TEXT,
    FOREIGN KEY (college_id) REFERENCES colleges (id)
)
"#;

/// SQL to create the registrations table
/// A student registers for a given event at most once
pub const CREATE_REGISTRATIONS_TABLE: &str = r#"
CREATE TABLE registrations (
    id TEXT PRIMARY KEY,
    student_id TEXT NOT NULL,
    event_id TEXT NOT NULL,
    registered_at TEXT NOT NULL,
    FOREIGN KEY (student_id) REFERENCES students (id),
    FOREIGN KEY (event_id) REFERENCES events (id),
    UNIQUE (student_id, event_id)
)
"#;

/// SQL to create the attendance_feedback table
/// At most one attendance record per registration
pub const CREATE_ATTENDANCE_FEEDBACK_TABLE: &str = r#"
CREATE TABLE attendance_feedback (
    id TEXT PRIMARY KEY,
    reg_id TEXT NOT NULL UNIQUE,
    is_present INTEGER NOT NULL,
    feedback_score INTEGER,
    FOREIGN KEY (reg_id) REFERENCES registrations (id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_events_status ON events(status)",
    "CREATE INDEX IF NOT EXISTS idx_students_name ON students(name)",
    "CREATE INDEX IF NOT EXISTS idx_registrations_event ON registrations(event_id)",
    "CREATE INDEX IF NOT EXISTS idx_registrations_student ON registrations(student_id)",
];

/// Tables that must exist for the store to be usable
pub const TABLE_NAMES: &[&str] = &[
    "colleges",
    "students",
    "events",
    "registrations",
    "attendance_feedback",
];

/// All statements for a destructive reset: drops, creates, indexes
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts: Vec<&'static str> = DROP_TABLES.to_vec();
    stmts.extend([
        CREATE_COLLEGES_TABLE,
        CREATE_STUDENTS_TABLE,
        CREATE_EVENTS_TABLE,
        CREATE_REGISTRATIONS_TABLE,
        CREATE_ATTENDANCE_FEEDBACK_TABLE,
    ]);
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
