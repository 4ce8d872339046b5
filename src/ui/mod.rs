pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{empty, error, header, section, status, success, summary_row};
pub use table::{
    attendance_table, feedback_table, participation_table, popularity_table, stats_table,
    top_students_table, TableBuilder,
};
pub use theme::{theme, Theme};
