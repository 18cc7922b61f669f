//! Core module - category tree, recovery, reminder and report logic

pub(crate) mod category;
pub(crate) mod recovery;
pub(crate) mod reminder;
pub(crate) mod report;
pub(crate) mod report_schedule;

pub(crate) use category::{Category, CategoryPath, CategoryTree};
pub(crate) use recovery::{RecoveredSession, recover};
pub(crate) use reminder::ReminderScheduler;
pub(crate) use report::{Report, build_report, generate_report};
pub(crate) use report_schedule::ReportSchedule;
