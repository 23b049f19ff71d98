// 📚 Course Entity
//
// A course is nothing but its subject. Two courses with the same subject
// are the same course.

use crate::error::{RegistryError, Result};
use crate::validation::validate_subject;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Course {
    subject: String,
}

impl Course {
    /// Create a course, rejecting a blank subject
    pub fn new(subject: impl Into<String>) -> Result<Self> {
        let subject = subject.into();
        validate_subject(&subject).map_err(RegistryError::InvalidCourseData)?;
        Ok(Course { subject })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Re-run the constructor check on a deserialized value
    pub(crate) fn validate(&self) -> Result<()> {
        validate_subject(&self.subject).map_err(RegistryError::InvalidCourseData)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.subject)
    }
}
