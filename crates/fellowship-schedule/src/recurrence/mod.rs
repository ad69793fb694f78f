//! Recurrence rules for programs: building them from form input, describing
//! them to people and expanding them into dated occurrences.

mod builder;
mod label;
mod project;
mod schedule;
mod selection;
mod spec;

pub use builder::{
    CustomDateInput, MonthlyWeekInput, build_custom, build_monthly_by_date, build_monthly_by_week,
    build_weekly, monthly_by_week,
};
pub(crate) use builder::monthly_by_day;
pub use label::{label_for, monthly_by_date_label, monthly_by_week_label};
pub use project::{ProjectionPolicy, ProjectionWindow, project_occurrences};
pub use schedule::Schedule;
pub use selection::{MonthlyMode, RecurrenceSelection, SelectionState};
pub use spec::{
    CustomDate, MonthlyWeekSlot, RecurrenceKind, RecurrenceSpec, TimeInput, TimeSlot, WeeklySlot,
};
