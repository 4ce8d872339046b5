pub mod engine;

pub use engine::{
    ActiveStudent, CampusReport, EventAttendance, EventFeedback, EventPopularity,
    ReportGenerator, StudentParticipation, DEFAULT_TOP_STUDENTS,
};
