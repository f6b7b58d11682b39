use super::types::Employee;
use super::workload::WorkloadAccountant;

/// Picks up to `needed` employees for one shift, lightest workload first
///
/// `available` must already be filtered to employees who marked the shift.
/// The sort is stable, so equal workloads keep roster order. When fewer than
/// `needed` are available all of them are returned.
pub fn assign_slot<'a, A>(
    mut available: Vec<&'a Employee>,
    needed: usize,
    accountant: &A,
) -> Vec<&'a Employee>
where
    A: WorkloadAccountant + ?Sized,
{
    if needed == 0 {
        return Vec::new();
    }
    available.sort_by_cached_key(|e| accountant.workload(e.id));
    available.truncate(needed);
    available
}
