use thiserror::Error;

/// Errors surfaced by roster edits and schedule generation.
///
/// None of these are fatal: the rejected operation leaves state unchanged
/// and the caller may retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Please enter an employee name")]
    EmptyName,

    #[error("Employee already exists")]
    DuplicateName(String),

    #[error("Please add employees first")]
    EmptyRoster,
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ScheduleError::EmptyName.to_string(), "Please enter an employee name");
        assert_eq!(
            ScheduleError::DuplicateName("Alice".into()).to_string(),
            "Employee already exists"
        );
        assert_eq!(ScheduleError::EmptyRoster.to_string(), "Please add employees first");
    }
}
