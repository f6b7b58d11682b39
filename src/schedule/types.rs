use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use serde::{Serialize, Deserialize};

/// Upper bound for the headcount of a single shift
pub const MAX_REQUIRED: u8 = 10;

/// Headcount every shift starts with
pub const DEFAULT_REQUIRED: u8 = 1;

/// Day of the week, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase key used on the wire
    pub fn key(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the four fixed 4-hour shifts of a day, ordered by start time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "6:00-10:00")]
    Early,
    #[serde(rename = "10:00-14:00")]
    Midday,
    #[serde(rename = "14:00-18:00")]
    Afternoon,
    #[serde(rename = "18:00-22:00")]
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Early,
        TimeSlot::Midday,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Early => "6:00-10:00",
            TimeSlot::Midday => "10:00-14:00",
            TimeSlot::Afternoon => "14:00-18:00",
            TimeSlot::Evening => "18:00-22:00",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque employee identity, never reused within one roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slots an employee is willing to work, kept for all seven days
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Day, BTreeSet<TimeSlot>>",
    into = "BTreeMap<Day, BTreeSet<TimeSlot>>"
)]
pub struct Availability {
    days: [BTreeSet<TimeSlot>; 7],
}

impl Availability {
    /// Returns true if the slot was not already present
    pub fn insert(&mut self, day: Day, slot: TimeSlot) -> bool {
        self.days[day.index()].insert(slot)
    }

    /// Returns true if the slot was present
    pub fn remove(&mut self, day: Day, slot: TimeSlot) -> bool {
        self.days[day.index()].remove(&slot)
    }

    pub fn contains(&self, day: Day, slot: TimeSlot) -> bool {
        self.days[day.index()].contains(&slot)
    }

    pub fn slots(&self, day: Day) -> impl Iterator<Item = TimeSlot> + '_ {
        self.days[day.index()].iter().copied()
    }

    /// Total number of (day, slot) cells marked available
    pub fn len(&self) -> usize {
        self.days.iter().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<BTreeMap<Day, BTreeSet<TimeSlot>>> for Availability {
    fn from(map: BTreeMap<Day, BTreeSet<TimeSlot>>) -> Self {
        let mut availability = Availability::default();
        for (day, slots) in map {
            availability.days[day.index()] = slots;
        }
        availability
    }
}

impl From<Availability> for BTreeMap<Day, BTreeSet<TimeSlot>> {
    fn from(availability: Availability) -> Self {
        Day::ALL.into_iter().zip(availability.days).collect()
    }
}

/// Required headcount for every (day, slot), each in 0..=MAX_REQUIRED
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Day, BTreeMap<TimeSlot, i64>>",
    into = "BTreeMap<Day, BTreeMap<TimeSlot, u8>>"
)]
pub struct Requirements {
    counts: [[u8; 4]; 7],
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            counts: [[DEFAULT_REQUIRED; 4]; 7],
        }
    }
}

impl Requirements {
    pub fn get(&self, day: Day, slot: TimeSlot) -> usize {
        self.counts[day.index()][slot.index()] as usize
    }

    /// Stores `count` clamped to 0..=MAX_REQUIRED and returns the stored value
    pub fn set(&mut self, day: Day, slot: TimeSlot, count: i64) -> u8 {
        let clamped = count.clamp(0, MAX_REQUIRED as i64) as u8;
        self.counts[day.index()][slot.index()] = clamped;
        clamped
    }

    /// Sum of all 28 headcounts
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().map(|&c| c as usize).sum()
    }
}

impl From<BTreeMap<Day, BTreeMap<TimeSlot, i64>>> for Requirements {
    fn from(map: BTreeMap<Day, BTreeMap<TimeSlot, i64>>) -> Self {
        let mut requirements = Requirements::default();
        for (day, slots) in map {
            for (slot, count) in slots {
                requirements.set(day, slot, count);
            }
        }
        requirements
    }
}

impl From<Requirements> for BTreeMap<Day, BTreeMap<TimeSlot, u8>> {
    fn from(requirements: Requirements) -> Self {
        Day::ALL
            .into_iter()
            .map(|day| {
                let slots = TimeSlot::ALL
                    .into_iter()
                    .map(|slot| (slot, requirements.counts[day.index()][slot.index()]))
                    .collect();
                (day, slots)
            })
            .collect()
    }
}

/// Parses a headcount typed by a user
///
/// Reads an optional sign and the leading digits, ignoring whatever follows
/// ("3.7" -> 3, "5 people" -> 5). Input with no leading digits yields 0.
/// Out-of-range values saturate; clamping is left to `Requirements::set`.
pub fn parse_count(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return 0;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// A staff member and their weekly availability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub availability: Availability,
}

impl Employee {
    /// Creates an employee with empty availability on all seven days
    pub fn new(id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            availability: Availability::default(),
        }
    }

    pub fn is_available(&self, day: Day, slot: TimeSlot) -> bool {
        self.availability.contains(day, slot)
    }
}

/// Snapshot of an employee placed on a shift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub id: EmployeeId,
    pub name: String,
}

impl From<&Employee> for Assignee {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
        }
    }
}

/// Assignment for a single (day, slot)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftCell {
    pub day: Day,
    pub slot: TimeSlot,
    /// Headcount requested when the schedule was generated
    pub required: usize,
    /// Employees who had marked this slot available
    pub available: usize,
    pub assigned: Vec<Assignee>,
}

impl ShiftCell {
    pub fn is_understaffed(&self) -> bool {
        self.assigned.len() < self.required
    }

    pub fn shortfall(&self) -> usize {
        self.required.saturating_sub(self.assigned.len())
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.assigned.iter().any(|a| a.id == id)
    }

    pub fn names(&self) -> Vec<&str> {
        self.assigned.iter().map(|a| a.name.as_str()).collect()
    }
}

/// Full week of assignments: 28 cells, days outer, slots inner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    cells: Vec<ShiftCell>,
}

impl Schedule {
    pub(crate) fn from_cells(cells: Vec<ShiftCell>) -> Self {
        debug_assert_eq!(cells.len(), Day::ALL.len() * TimeSlot::ALL.len());
        Self { cells }
    }

    pub fn cells(&self) -> &[ShiftCell] {
        &self.cells
    }

    pub fn cell(&self, day: Day, slot: TimeSlot) -> &ShiftCell {
        &self.cells[day.index() * TimeSlot::ALL.len() + slot.index()]
    }

    /// The four cells of `day`, in slot order
    pub fn day(&self, day: Day) -> &[ShiftCell] {
        let start = day.index() * TimeSlot::ALL.len();
        &self.cells[start..start + TimeSlot::ALL.len()]
    }

    /// Number of cells the employee is placed on
    pub fn workload_of(&self, id: EmployeeId) -> usize {
        self.cells.iter().filter(|c| c.contains(id)).count()
    }

    pub fn understaffed(&self) -> impl Iterator<Item = &ShiftCell> {
        self.cells.iter().filter(|c| c.is_understaffed())
    }

    /// Missing headcount summed over the week
    pub fn shortfall(&self) -> usize {
        self.cells.iter().map(ShiftCell::shortfall).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_and_slot_order() {
        assert_eq!(Day::ALL[0], Day::Monday);
        assert_eq!(Day::ALL[6], Day::Sunday);
        assert_eq!(Day::Thursday.key(), "thursday");
        assert_eq!(Day::Thursday.to_string(), "Thursday");
        let labels: Vec<&str> = TimeSlot::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["6:00-10:00", "10:00-14:00", "14:00-18:00", "18:00-22:00"]);
        assert!(TimeSlot::Early < TimeSlot::Evening);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Day::Saturday).unwrap(), "\"saturday\"");
        assert_eq!(serde_json::to_string(&TimeSlot::Afternoon).unwrap(), "\"14:00-18:00\"");
        let slot: TimeSlot = serde_json::from_str("\"6:00-10:00\"").unwrap();
        assert_eq!(slot, TimeSlot::Early);
        assert!(serde_json::from_str::<TimeSlot>("\"22:00-02:00\"").is_err());
    }

    #[test]
    fn test_new_employee_has_empty_availability() {
        let e = Employee::new(EmployeeId(1), "Alice");
        assert!(e.availability.is_empty());
        for day in Day::ALL {
            assert_eq!(e.availability.slots(day).count(), 0);
        }
    }

    #[test]
    fn test_availability_insert_remove_idempotent() {
        let mut a = Availability::default();
        a.insert(Day::Monday, TimeSlot::Midday);
        let before = a.clone();

        assert!(a.insert(Day::Monday, TimeSlot::Early));
        assert!(!a.insert(Day::Monday, TimeSlot::Early));
        assert!(a.remove(Day::Monday, TimeSlot::Early));
        assert!(!a.remove(Day::Monday, TimeSlot::Early));
        assert_eq!(a, before);
    }

    #[test]
    fn test_availability_deserialize_fills_missing_days() {
        let a: Availability = serde_json::from_str(r#"{"tuesday": ["18:00-22:00"]}"#).unwrap();
        assert!(a.contains(Day::Tuesday, TimeSlot::Evening));
        assert_eq!(a.len(), 1);

        let json = serde_json::to_value(&a).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 7);
        assert_eq!(map["monday"], serde_json::json!([]));
    }

    #[test]
    fn test_requirements_default_and_clamp() {
        let mut r = Requirements::default();
        assert_eq!(r.get(Day::Sunday, TimeSlot::Evening), 1);
        assert_eq!(r.total(), 28);

        assert_eq!(r.set(Day::Monday, TimeSlot::Early, 25), 10);
        assert_eq!(r.set(Day::Monday, TimeSlot::Midday, -4), 0);
        assert_eq!(r.set(Day::Monday, TimeSlot::Afternoon, 3), 3);
        assert_eq!(r.get(Day::Monday, TimeSlot::Early), 10);
        assert_eq!(r.get(Day::Monday, TimeSlot::Midday), 0);
    }

    #[test]
    fn test_requirements_deserialize_clamps_and_defaults() {
        let r: Requirements =
            serde_json::from_str(r#"{"friday": {"6:00-10:00": 42, "10:00-14:00": 0}}"#).unwrap();
        assert_eq!(r.get(Day::Friday, TimeSlot::Early), 10);
        assert_eq!(r.get(Day::Friday, TimeSlot::Midday), 0);
        assert_eq!(r.get(Day::Friday, TimeSlot::Evening), 1);
        assert_eq!(r.get(Day::Monday, TimeSlot::Early), 1);

        let r: Requirements =
            serde_json::from_str(r#"{"monday": {"6:00-10:00": 300, "10:00-14:00": -1}}"#).unwrap();
        assert_eq!(r.get(Day::Monday, TimeSlot::Early), 10);
        assert_eq!(r.get(Day::Monday, TimeSlot::Midday), 0);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("4"), 4);
        assert_eq!(parse_count("  7"), 7);
        assert_eq!(parse_count("3.7"), 3);
        assert_eq!(parse_count("5 people"), 5);
        assert_eq!(parse_count("-2"), -2);
        assert_eq!(parse_count("+6"), 6);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("-"), 0);
        assert_eq!(parse_count("99999999999999999999"), i64::MAX);
    }

    #[test]
    fn test_shift_cell_shortfall() {
        let cell = ShiftCell {
            day: Day::Monday,
            slot: TimeSlot::Early,
            required: 3,
            available: 1,
            assigned: vec![Assignee { id: EmployeeId(1), name: "Alice".into() }],
        };
        assert!(cell.is_understaffed());
        assert_eq!(cell.shortfall(), 2);
        assert!(cell.contains(EmployeeId(1)));
        assert_eq!(cell.names(), ["Alice"]);
    }
}
