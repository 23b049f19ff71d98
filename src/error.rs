// ❗ Registry errors
//
// Every failure the core can produce is a value handed back to the caller.
// Presentation of the message belongs to whoever drives the registry.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// One or more person fields failed validation (aggregated message)
    #[error("Invalid personal data: {0}")]
    InvalidPersonalData(String),

    /// Blank course subject
    #[error("Invalid course data: {0}")]
    InvalidCourseData(String),

    /// Grade label outside the nine recognized values
    #[error("Invalid grade: {0}")]
    InvalidGrade(String),

    /// Referenced entity or relationship does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or inconsistent persisted document
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}

impl RegistryError {
    /// True for the save/load family (I/O, malformed document, encoding)
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            RegistryError::Persistence(_)
                | RegistryError::Io(_)
                | RegistryError::Serialization(_)
                | RegistryError::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_are_persistence_errors() {
        let err: RegistryError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.is_persistence());
        assert!(!RegistryError::NotFound("x".to_string()).is_persistence());
    }

    #[test]
    fn test_display_carries_message() {
        let err = RegistryError::InvalidCourseData("Empty course name".to_string());
        assert_eq!(err.to_string(), "Invalid course data: Empty course name");
    }
}
