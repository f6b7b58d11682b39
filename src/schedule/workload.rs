use std::collections::HashMap;
use super::types::{Day, Employee, EmployeeId, Requirements, TimeSlot};

/// Reports how many shifts an employee already carries this week
pub trait WorkloadAccountant {
    fn workload(&self, id: EmployeeId) -> usize;
}

/// Workload projected from the roster alone
///
/// For every (day, slot) it takes the first N available employees in roster
/// order, N being the requirement, and counts how often `id` is among them.
/// The projection ignores fairness and ignores the schedule under
/// construction, so it can disagree with the assignments actually made.
pub struct ProjectedWorkload<'a> {
    employees: &'a [Employee],
    requirements: &'a Requirements,
}

impl<'a> ProjectedWorkload<'a> {
    pub fn new(employees: &'a [Employee], requirements: &'a Requirements) -> Self {
        Self { employees, requirements }
    }
}

impl WorkloadAccountant for ProjectedWorkload<'_> {
    fn workload(&self, id: EmployeeId) -> usize {
        let mut count = 0;
        for day in Day::ALL {
            for slot in TimeSlot::ALL {
                let needed = self.requirements.get(day, slot);
                let picked = self
                    .employees
                    .iter()
                    .filter(|e| e.is_available(day, slot))
                    .take(needed)
                    .any(|e| e.id == id);
                if picked {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Workload counted from the assignments made so far in the current pass
#[derive(Debug, Default)]
pub struct RunningTally {
    counts: HashMap<EmployeeId, usize>,
}

impl RunningTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<I>(&mut self, assigned: I)
    where
        I: IntoIterator<Item = EmployeeId>,
    {
        for id in assigned {
            *self.counts.entry(id).or_insert(0) += 1;
        }
    }
}

impl WorkloadAccountant for RunningTally {
    fn workload(&self, id: EmployeeId) -> usize {
        self.counts.get(&id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: u64, slots: &[(Day, TimeSlot)]) -> Employee {
        let mut e = Employee::new(EmployeeId(id), format!("E{}", id));
        for &(day, slot) in slots {
            e.availability.insert(day, slot);
        }
        e
    }

    #[test]
    fn test_projection_uses_roster_order() {
        let roster = vec![
            employee(1, &[(Day::Monday, TimeSlot::Early), (Day::Monday, TimeSlot::Midday)]),
            employee(2, &[(Day::Monday, TimeSlot::Early)]),
        ];
        let requirements = Requirements::default();
        let accountant = ProjectedWorkload::new(&roster, &requirements);

        // First in roster order wins both projected slots
        assert_eq!(accountant.workload(EmployeeId(1)), 2);
        assert_eq!(accountant.workload(EmployeeId(2)), 0);
    }

    #[test]
    fn test_projection_respects_requirement_counts() {
        let roster = vec![
            employee(1, &[(Day::Friday, TimeSlot::Evening)]),
            employee(2, &[(Day::Friday, TimeSlot::Evening)]),
        ];
        let mut requirements = Requirements::default();
        requirements.set(Day::Friday, TimeSlot::Evening, 2);
        let accountant = ProjectedWorkload::new(&roster, &requirements);
        assert_eq!(accountant.workload(EmployeeId(2)), 1);

        requirements.set(Day::Friday, TimeSlot::Evening, 0);
        let accountant = ProjectedWorkload::new(&roster, &requirements);
        assert_eq!(accountant.workload(EmployeeId(1)), 0);
        assert_eq!(accountant.workload(EmployeeId(2)), 0);
    }

    #[test]
    fn test_projection_unknown_employee() {
        let roster = vec![employee(1, &[(Day::Monday, TimeSlot::Early)])];
        let requirements = Requirements::default();
        let accountant = ProjectedWorkload::new(&roster, &requirements);
        assert_eq!(accountant.workload(EmployeeId(99)), 0);
    }

    #[test]
    fn test_running_tally() {
        let mut tally = RunningTally::new();
        assert_eq!(tally.workload(EmployeeId(1)), 0);
        tally.record([EmployeeId(1), EmployeeId(2)]);
        tally.record([EmployeeId(1)]);
        assert_eq!(tally.workload(EmployeeId(1)), 2);
        assert_eq!(tally.workload(EmployeeId(2)), 1);
    }
}
