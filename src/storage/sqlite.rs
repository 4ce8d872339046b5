//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::model::{AttendanceFeedback, College, Event, EventStatus, Registration, Student};
use super::schema;

/// SQLite-backed storage for campus event data.
///
/// The handle owns its connection; dropping the store releases it.
pub struct EventStore {
    conn: Connection,
}

impl EventStore {
    /// Open an existing database file (creates an empty file if missing).
    ///
    /// The schema is left untouched; call [`EventStore::initialize_schema`]
    /// or use [`EventStore::create`] to (re)build it.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a database file and reset it to an empty schema
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(Error::Schema)?;
        enable_foreign_keys(&conn).map_err(Error::Schema)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database with a fresh schema (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self::from_connection(conn)?;
        store.initialize_schema()?;
        Ok(store)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        enable_foreign_keys(&conn)?;
        Ok(Self { conn })
    }

    /// Drop and recreate every table.
    ///
    /// Destructive: all existing rows are lost. Runs in a single transaction,
    /// so a failure leaves the previous schema in place.
    pub fn initialize_schema(&mut self) -> Result<()> {
        let tx = self.conn.transaction().map_err(Error::Schema)?;
        for stmt in schema::all_schema_statements() {
            tx.execute(stmt, []).map_err(Error::Schema)?;
        }
        tx.commit().map_err(Error::Schema)?;
        tracing::info!("Initialized campus event schema");
        Ok(())
    }

    /// Check whether all five tables exist
    pub fn has_schema(&self) -> Result<bool> {
        let mut stmt = self.conn.prepare(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        )?;
        for name in schema::TABLE_NAMES {
            let count: i64 = stmt.query_row([name], |row| row.get(0))?;
            if count == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    // ========== Insert Operations ==========

    pub fn insert_college(&self, college: &College) -> Result<()> {
        self.conn.execute(
            "INSERT INTO colleges (id, name) VALUES (?1, ?2)",
            params![college.id, college.name],
        )?;
        Ok(())
    }

    pub fn insert_student(&self, student: &Student) -> Result<()> {
        self.conn.execute(
            "INSERT INTO students (id, name, college_id) VALUES (?1, ?2, ?3)",
            params![student.id, student.name, student.college_id],
        )?;
        Ok(())
    }

    pub fn insert_event(&self, event: &Event) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO events (id, name, event_type, event_date, status, college_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                event.id,
                event.name,
                event.event_type,
                event.date,
                event.status.as_str(),
                event.college_id,
            ],
        )?;
        Ok(())
    }

    /// Insert a registration.
    ///
    /// Fails if the student or event does not exist, or if the student is
    /// already registered for the event.
    pub fn insert_registration(&self, registration: &Registration) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO registrations (id, student_id, event_id, registered_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                registration.id,
                registration.student_id,
                registration.event_id,
                registration.registered_at,
            ],
        )?;
        Ok(())
    }

    /// Insert an attendance record for an existing registration
    pub fn insert_attendance(&self, attendance: &AttendanceFeedback) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO attendance_feedback (id, reg_id, is_present, feedback_score)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                attendance.id,
                attendance.reg_id,
                attendance.is_present,
                attendance.feedback_score,
            ],
        )?;
        Ok(())
    }

    // ========== Lookup Operations ==========

    /// Get an event by id
    pub fn get_event(&self, id: &str) -> Result<Option<Event>> {
        self.conn
            .query_row(
                "SELECT id, name, event_type, event_date, status, college_id FROM events WHERE id = ?1",
                [id],
                |row| self.row_to_event(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Find students by exact name
    pub fn find_students_by_name(&self, name: &str) -> Result<Vec<Student>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, college_id FROM students WHERE name = ?1 ORDER BY id",
        )?;

        let students = stmt
            .query_map([name], |row| {
                Ok(Student {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    college_id: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(students)
    }

    /// Helper to convert a row to an Event
    fn row_to_event(&self, row: &rusqlite::Row) -> rusqlite::Result<Event> {
        let status_str: String = row.get(4)?;
        let status: EventStatus = status_str.parse().map_err(|e: Error| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Event {
            id: row.get(0)?,
            name: row.get(1)?,
            event_type: row.get(2)?,
            date: row.get(3)?,
            status,
            college_id: row.get(5)?,
        })
    }

    // ========== Bulk Operations ==========

    /// Begin a transaction for bulk operations
    pub fn begin_transaction(&self) -> Result<()> {
        self.conn.execute_batch("BEGIN TRANSACTION")?;
        Ok(())
    }

    /// Commit a transaction
    pub fn commit(&self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    /// Rollback a transaction
    pub fn rollback(&self) -> Result<()> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    /// Run `f` inside a transaction, committing on success and rolling back on error
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        self.begin_transaction()?;
        match f(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = self.rollback() {
                    tracing::warn!("Rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    // ========== Statistics ==========

    fn count_rows(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get row counts for every table
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            colleges: self.count_rows("colleges")?,
            students: self.count_rows("students")?,
            events: self.count_rows("events")?,
            registrations: self.count_rows("registrations")?,
            attendance: self.count_rows("attendance_feedback")?,
        })
    }
}

// SQLite ignores declared foreign keys unless asked per connection
fn enable_foreign_keys(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", true)
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DbStats {
    pub colleges: usize,
    pub students: usize,
    pub events: usize,
    pub registrations: usize,
    pub attendance: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rusqlite::OpenFlags;

    fn sample_date() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 22)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn store_with_event() -> EventStore {
        let store = EventStore::open_in_memory().unwrap();
        store.insert_college(&College::new("col_01", "Global Tech Institute")).unwrap();
        store
            .insert_student(&Student::new("s1", "Alice").with_college("col_01"))
            .unwrap();
        store
            .insert_event(
                &Event::new("e1", "Hack", sample_date())
                    .with_type("Workshop")
                    .with_college("col_01"),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_fresh_schema_is_empty() {
        let store = EventStore::open_in_memory().unwrap();
        assert!(store.has_schema().unwrap());
        let stats = store.stats().unwrap();
        assert_eq!(stats.colleges + stats.students + stats.events, 0);
        assert_eq!(stats.registrations + stats.attendance, 0);
    }

    #[test]
    fn test_event_roundtrip() {
        let store = store_with_event();
        let event = store.get_event("e1").unwrap().unwrap();
        assert_eq!(event.name, "Hack");
        assert_eq!(event.status, EventStatus::Scheduled);
        assert_eq!(event.date, sample_date());
        assert!(store.get_event("missing").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let store = store_with_event();
        store
            .insert_registration(&Registration::new("r1", "s1", "e1", Utc::now()))
            .unwrap();
        let dup = store.insert_registration(&Registration::new("r2", "s1", "e1", Utc::now()));
        assert!(matches!(dup, Err(Error::Storage(_))));
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let store = store_with_event();
        let dangling = store.insert_registration(&Registration::new("r1", "ghost", "e1", Utc::now()));
        assert!(matches!(dangling, Err(Error::Storage(_))));

        let orphan = store.insert_attendance(&AttendanceFeedback::present("a1", "no-such-reg"));
        assert!(matches!(orphan, Err(Error::Storage(_))));
    }

    #[test]
    fn test_single_attendance_per_registration() {
        let store = store_with_event();
        store
            .insert_registration(&Registration::new("r1", "s1", "e1", Utc::now()))
            .unwrap();
        store.insert_attendance(&AttendanceFeedback::present("a1", "r1")).unwrap();
        let second = store.insert_attendance(&AttendanceFeedback::absent("a2", "r1"));
        assert!(second.is_err());
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let store = EventStore::open_in_memory().unwrap();
        let result: Result<()> = store.transaction(|s| {
            s.insert_college(&College::new("col_01", "First"))?;
            s.insert_college(&College::new("col_01", "Duplicate"))?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(store.stats().unwrap().colleges, 0);
    }

    #[test]
    fn test_reinitialize_clears_rows() {
        let mut store = store_with_event();
        assert_eq!(store.stats().unwrap().events, 1);
        store.initialize_schema().unwrap();
        assert_eq!(store.stats().unwrap().events, 0);
    }

    #[test]
    fn test_find_students_by_name() {
        let store = store_with_event();
        store.insert_student(&Student::new("s2", "Alice")).unwrap();
        let alices = store.find_students_by_name("Alice").unwrap();
        assert_eq!(alices.len(), 2);
        assert_eq!(alices[1].college_id, None);
    }

    #[test]
    fn test_failed_reinitialize_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus.db");
        let store = EventStore::create(&path).unwrap();
        store.insert_college(&College::new("col_01", "Kept")).unwrap();
        drop(store);

        let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY).unwrap();
        let mut read_only = EventStore::from_connection(conn).unwrap();
        assert!(matches!(read_only.initialize_schema(), Err(Error::Schema(_))));
        drop(read_only);

        let store = EventStore::open(&path).unwrap();
        assert!(store.has_schema().unwrap());
        assert_eq!(store.stats().unwrap().colleges, 1);
    }
}
