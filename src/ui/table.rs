use crate::report::{
    ActiveStudent, EventAttendance, EventFeedback, EventPopularity, StudentParticipation,
};
use crate::storage::DbStats;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &DbStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Colleges", &stats.colleges.to_string());
    builder.add_row("Students", &stats.students.to_string());
    builder.add_row("Events", &stats.events.to_string());
    builder.add_row("Registrations", &stats.registrations.to_string());
    builder.add_row("Attendance records", &stats.attendance.to_string());
    builder.build()
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct PopularityRow {
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Type")]
    event_type: String,
    #[tabled(rename = "Registrations")]
    registrations: usize,
}

pub fn popularity_table(rows: &[EventPopularity]) -> String {
    render(
        rows.iter()
            .map(|r| PopularityRow {
                event: r.event_name.clone(),
                event_type: r.event_type.clone().unwrap_or_else(|| "-".to_string()),
                registrations: r.registration_count,
            })
            .collect(),
    )
}

#[derive(Tabled)]
struct ParticipationRow {
    #[tabled(rename = "Student")]
    student: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Date")]
    date: String,
}

pub fn participation_table(rows: &[StudentParticipation]) -> String {
    render(
        rows.iter()
            .map(|r| ParticipationRow {
                student: r.student_name.clone(),
                event: r.event_name.clone(),
                date: r.event_date.format("%Y-%m-%d").to_string(),
            })
            .collect(),
    )
}

#[derive(Tabled)]
struct TopStudentRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Student")]
    student: String,
    #[tabled(rename = "College")]
    college: String,
    #[tabled(rename = "Attended")]
    attended: usize,
}

pub fn top_students_table(rows: &[ActiveStudent]) -> String {
    render(
        rows.iter()
            .enumerate()
            .map(|(i, r)| TopStudentRow {
                rank: i + 1,
                student: r.student_name.clone(),
                college: r.college_name.clone(),
                attended: r.attended_count,
            })
            .collect(),
    )
}

#[derive(Tabled)]
struct AttendanceRow {
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Registrations")]
    registrations: usize,
    #[tabled(rename = "Attended")]
    attended: usize,
    #[tabled(rename = "Rate")]
    rate: String,
}

pub fn attendance_table(rows: &[EventAttendance]) -> String {
    render(
        rows.iter()
            .map(|r| AttendanceRow {
                event: r.event_name.clone(),
                registrations: r.registration_count,
                attended: r.attendance_count,
                rate: format!("{:.2}%", r.attendance_percentage()),
            })
            .collect(),
    )
}

#[derive(Tabled)]
struct FeedbackRow {
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Average score")]
    average: String,
}

pub fn feedback_table(rows: &[EventFeedback]) -> String {
    render(
        rows.iter()
            .map(|r| FeedbackRow {
                event: r.event_name.clone(),
                average: format!("{:.2}", r.average_score),
            })
            .collect(),
    )
}
