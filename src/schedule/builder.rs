use serde::{Serialize, Deserialize};
use tracing::{debug, info};
use crate::error::{Result, ScheduleError};
use super::assign::assign_slot;
use super::types::{Assignee, Day, Employee, Requirements, Schedule, ShiftCell, TimeSlot};
use super::workload::{ProjectedWorkload, RunningTally, WorkloadAccountant};

/// Where the slot assigner takes its workload figures from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadPolicy {
    /// Roster-order projection recomputed from the roster and requirements
    #[default]
    Projected,
    /// Tally of the shifts assigned earlier in the same pass
    Running,
}

impl WorkloadPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkloadPolicy::Projected => "projected",
            WorkloadPolicy::Running => "running",
        }
    }
}

/// Builds the weekly schedule for a roster snapshot
///
/// Cells are filled Monday to Sunday, and within a day in slot order. Fails
/// with `EmptyRoster` when there is nobody to schedule; any other input
/// yields all 28 cells, possibly empty.
pub fn generate_schedule(
    employees: &[Employee],
    requirements: &Requirements,
    policy: WorkloadPolicy,
) -> Result<Schedule> {
    if employees.is_empty() {
        return Err(ScheduleError::EmptyRoster);
    }

    let schedule = match policy {
        WorkloadPolicy::Projected => {
            let accountant = ProjectedWorkload::new(employees, requirements);
            fill_week(employees, requirements, |available, needed| {
                assign_slot(available, needed, &accountant)
            })
        }
        WorkloadPolicy::Running => {
            let mut tally = RunningTally::new();
            fill_week(employees, requirements, |available, needed| {
                let picked = assign_slot(available, needed, &tally);
                tally.record(picked.iter().map(|e| e.id));
                picked
            })
        }
    };

    info!(
        policy = policy.as_str(),
        employees = employees.len(),
        required = requirements.total(),
        understaffed = schedule.understaffed().count(),
        shortfall = schedule.shortfall(),
        "generated schedule"
    );
    Ok(schedule)
}

fn fill_week<'a, F>(employees: &'a [Employee], requirements: &Requirements, mut pick: F) -> Schedule
where
    F: FnMut(Vec<&'a Employee>, usize) -> Vec<&'a Employee>,
{
    let mut cells = Vec::with_capacity(Day::ALL.len() * TimeSlot::ALL.len());
    for day in Day::ALL {
        for slot in TimeSlot::ALL {
            let needed = requirements.get(day, slot);
            let available: Vec<&Employee> = employees
                .iter()
                .filter(|e| e.is_available(day, slot))
                .collect();
            let available_count = available.len();
            let assigned: Vec<Assignee> = pick(available, needed)
                .into_iter()
                .map(Assignee::from)
                .collect();

            if assigned.len() < needed {
                debug!(%day, %slot, needed, assigned = assigned.len(), "shift understaffed");
            }
            cells.push(ShiftCell {
                day,
                slot,
                required: needed,
                available: available_count,
                assigned,
            });
        }
    }
    Schedule::from_cells(cells)
}

/// Workload figures the builder would use, for inspection by callers
pub fn projected_workloads(employees: &[Employee], requirements: &Requirements) -> Vec<(Assignee, usize)> {
    let accountant = ProjectedWorkload::new(employees, requirements);
    employees
        .iter()
        .map(|e| (Assignee::from(e), accountant.workload(e.id)))
        .collect()
}
