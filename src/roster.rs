use tracing::{debug, info};
use crate::error::{Result, ScheduleError};
use crate::schedule::{
    generate_schedule, parse_count, Day, Employee, EmployeeId, Requirements, Schedule, TimeSlot,
    WorkloadPolicy,
};

/// Employees and staffing requirements owned by the host for the life of the app
#[derive(Debug, Clone, Default)]
pub struct Roster {
    employees: Vec<Employee>,
    requirements: Requirements,
    next_id: u64,
}

impl Roster {
    /// Empty roster with every shift requiring one person
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster seeded with the three demo employees
    pub fn with_sample_data() -> Self {
        use TimeSlot::{Afternoon, Early, Evening, Midday};

        let samples: [(&str, [&[TimeSlot]; 7]); 3] = [
            (
                "Alice Johnson",
                [
                    &[Early, Midday],
                    &[Midday, Afternoon],
                    &[Early, Evening],
                    &[Midday, Afternoon],
                    &[Afternoon, Evening],
                    &[Early, Midday, Afternoon],
                    &[Midday],
                ],
            ),
            (
                "Bob Smith",
                [
                    &[Afternoon, Evening],
                    &[Early, Evening],
                    &[Midday, Afternoon],
                    &[Early, Evening],
                    &[Early, Midday],
                    &[Afternoon, Evening],
                    &[Early, Afternoon, Evening],
                ],
            ),
            (
                "Carol Davis",
                [
                    &[Midday, Afternoon],
                    &[Afternoon],
                    &[Early, Midday],
                    &[Afternoon, Evening],
                    &[Midday, Evening],
                    &[Early, Evening],
                    &[Early, Midday, Evening],
                ],
            ),
        ];

        let mut roster = Self::new();
        for (name, week) in samples {
            let id = roster.allocate_id();
            let mut employee = Employee::new(id, name);
            for (day, slots) in Day::ALL.into_iter().zip(week) {
                for &slot in slots {
                    employee.availability.insert(day, slot);
                }
            }
            roster.employees.push(employee);
        }
        roster
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Adds an employee with empty availability
    ///
    /// The name is trimmed first. Rejects blank names and names already on
    /// the roster, leaving the roster unchanged.
    pub fn add_employee(&mut self, name: &str) -> Result<&Employee> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScheduleError::EmptyName);
        }
        if self.employees.iter().any(|e| e.name == name) {
            return Err(ScheduleError::DuplicateName(name.to_string()));
        }

        let id = self.allocate_id();
        info!(%id, name, "employee added");
        let index = self.employees.len();
        self.employees.push(Employee::new(id, name));
        Ok(&self.employees[index])
    }

    /// Removes the employee; unknown ids are ignored
    pub fn delete_employee(&mut self, id: EmployeeId) {
        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        if self.employees.len() < before {
            info!(%id, "employee deleted");
        }
    }

    /// Marks or clears one shift in an employee's availability
    ///
    /// Both directions are idempotent. Unknown ids are ignored.
    pub fn set_availability(&mut self, id: EmployeeId, day: Day, slot: TimeSlot, present: bool) {
        let Some(employee) = self.employees.iter_mut().find(|e| e.id == id) else {
            debug!(%id, "availability change for unknown employee ignored");
            return;
        };
        let changed = if present {
            employee.availability.insert(day, slot)
        } else {
            employee.availability.remove(day, slot)
        };
        if changed {
            debug!(%id, %day, %slot, present, "availability updated");
        }
    }

    /// Sets the headcount for a shift, clamped to 0..=10; returns the stored value
    pub fn set_requirement(&mut self, day: Day, slot: TimeSlot, count: i64) -> u8 {
        let stored = self.requirements.set(day, slot, count);
        debug!(%day, %slot, requested = count, stored, "requirement updated");
        stored
    }

    /// Same as `set_requirement` for raw user input; non-numeric input counts as 0
    pub fn set_requirement_input(&mut self, day: Day, slot: TimeSlot, input: &str) -> u8 {
        self.set_requirement(day, slot, parse_count(input))
    }

    /// Generates a schedule from the current snapshot
    pub fn generate_schedule(&self, policy: WorkloadPolicy) -> Result<Schedule> {
        generate_schedule(&self.employees, &self.requirements, policy)
    }

    fn allocate_id(&mut self) -> EmployeeId {
        self.next_id += 1;
        EmployeeId(self.next_id)
    }
}
