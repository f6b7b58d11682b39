use std::fs::File;
use std::io::Write;
use std::path::Path;
use chrono::NaiveDate;
use crate::schedule::{Day, Schedule, ShiftCell};

/// Placeholder printed for a shift nobody was assigned to
pub const EMPTY_SHIFT: &str = "No one available";

/// Comma-joined names of a shift, or the empty-shift placeholder
pub fn format_shift_staff(cell: &ShiftCell) -> String {
    if cell.assigned.is_empty() {
        EMPTY_SHIFT.to_string()
    } else {
        cell.names().join(", ")
    }
}

/// Renders the plain-text weekly report
///
/// Each day gets its upper-cased name, a dash underline as long as the name,
/// one `<slot>: <staff>` line per shift and a trailing blank line.
pub fn format_schedule_report(schedule: &Schedule) -> String {
    let mut out = String::from("WEEKLY SCHEDULE\n");
    out.push_str("================\n\n");

    for day in Day::ALL {
        out.push_str(&day.name().to_uppercase());
        out.push('\n');
        out.push_str(&"-".repeat(day.name().len()));
        out.push('\n');
        for cell in schedule.day(day) {
            out.push_str(&format!("{}: {}\n", cell.slot, format_shift_staff(cell)));
        }
        out.push('\n');
    }
    out
}

/// File name offered for a report downloaded on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("schedule-{}.txt", date.format("%Y-%m-%d"))
}

/// Writes the weekly report to `path`
pub fn write_schedule_to_file<P: AsRef<Path>>(schedule: &Schedule, path: P) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(format_schedule_report(schedule).as_bytes())?;
    file.flush()
}

/// Prints a schedule in a readable format
pub fn print_schedule(schedule: &Schedule) {
    let assigned: usize = schedule.cells().iter().map(|c| c.assigned.len()).sum();
    println!("\n=== Weekly Schedule ===");
    println!("Total shifts filled: {}", assigned);

    let understaffed: Vec<&ShiftCell> = schedule.understaffed().collect();
    if !understaffed.is_empty() {
        println!("⚠️  Understaffed shifts ({}, {} people short):", understaffed.len(), schedule.shortfall());
        for cell in understaffed {
            println!(
                "  - {} {} (needed {}, assigned {}, available {})",
                cell.day, cell.slot, cell.required, cell.assigned.len(), cell.available
            );
        }
    }

    for day in Day::ALL {
        println!("\n{}:", day);
        for cell in schedule.day(day) {
            println!("  {} -> {}", cell.slot, format_shift_staff(cell));
        }
    }
}
