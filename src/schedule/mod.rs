pub mod types;
pub mod workload;
pub mod assign;
pub mod builder;

pub use types::{
    parse_count, Assignee, Availability, Day, Employee, EmployeeId, Requirements, Schedule,
    ShiftCell, TimeSlot, DEFAULT_REQUIRED, MAX_REQUIRED,
};
pub use workload::{ProjectedWorkload, RunningTally, WorkloadAccountant};
pub use assign::assign_slot;
pub use builder::{generate_schedule, projected_workloads, WorkloadPolicy};
