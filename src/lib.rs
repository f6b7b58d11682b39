//! Weekly shift planner.
//!
//! Employees mark the shifts they can work, the organization sets a
//! headcount per shift, and [`schedule::generate_schedule`] fills every
//! (day, slot) of the week, preferring employees with the lighter workload.
//! [`roster::Roster`] owns the state that the host edits between runs, and
//! [`display`] renders the result as the plain-text report.

pub mod error;
pub mod schedule;
pub mod roster;
pub mod display;
pub mod config;
pub mod web;

pub use error::ScheduleError;
pub use roster::Roster;
pub use schedule::{generate_schedule, Schedule, WorkloadPolicy};
