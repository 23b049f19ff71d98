// 👤 Person Entities - Teacher and Student
//
// Both roles share name, security number, email and a set of assigned
// course subjects. Teacher adds experience years, Student adds class year.
//
// Identity is structural on (name, security number, email, year). The
// course set is relationship state, not identity.

use crate::error::{RegistryError, Result};
use crate::validation::validate_personal_data;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// ROLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SHARED PERSON DATA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDetails {
    pub(crate) name: String,
    pub(crate) security_number: String,
    pub(crate) email: String,

    /// Assigned course subjects (set: no duplicates, order irrelevant)
    #[serde(default)]
    pub(crate) courses: BTreeSet<String>,
}

impl PersonDetails {
    fn new(name: String, security_number: String, email: String) -> Self {
        PersonDetails {
            name,
            security_number,
            email,
            courses: BTreeSet::new(),
        }
    }

    /// Returns true if the assignment is new
    pub(crate) fn assign_course(&mut self, subject: &str) -> bool {
        self.courses.insert(subject.to_string())
    }

    /// Returns true if the assignment existed
    pub(crate) fn unassign_course(&mut self, subject: &str) -> bool {
        self.courses.remove(subject)
    }
}

// ============================================================================
// PERSON CAPABILITY
// ============================================================================

/// Behaviour shared by every role
pub trait Person {
    fn details(&self) -> &PersonDetails;

    fn role(&self) -> Role;

    /// Experience years for a teacher, class year for a student
    fn years(&self) -> i64;

    fn name(&self) -> &str {
        &self.details().name
    }

    fn security_number(&self) -> &str {
        &self.details().security_number
    }

    fn email(&self) -> &str {
        &self.details().email
    }

    /// Assigned subjects in sorted order
    fn courses(&self) -> &BTreeSet<String> {
        &self.details().courses
    }

    fn is_assigned_to(&self, subject: &str) -> bool {
        self.details().courses.contains(subject)
    }

    /// Structural identity, ignoring course assignments
    fn same_identity(&self, other: &dyn Person) -> bool {
        self.role() == other.role()
            && self.name() == other.name()
            && self.security_number() == other.security_number()
            && self.email() == other.email()
            && self.years() == other.years()
    }
}

fn check_personal_data(name: &str, security_number: &str, email: &str, year: i64) -> Result<()> {
    let message = validate_personal_data(name, security_number, email, year);
    if !message.is_empty() {
        return Err(RegistryError::InvalidPersonalData(message));
    }
    Ok(())
}

// ============================================================================
// TEACHER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(flatten)]
    pub(crate) details: PersonDetails,
    pub(crate) experience_years: i64,
}

impl Teacher {
    /// Validated constructor; the teacher is not yet in any registry
    pub fn new(
        name: impl Into<String>,
        security_number: impl Into<String>,
        email: impl Into<String>,
        experience_years: i64,
    ) -> Result<Self> {
        let (name, security_number, email) = (name.into(), security_number.into(), email.into());
        check_personal_data(&name, &security_number, &email, experience_years)?;

        Ok(Teacher {
            details: PersonDetails::new(name, security_number, email),
            experience_years,
        })
    }

    pub fn experience_years(&self) -> i64 {
        self.experience_years
    }

    /// Re-run the constructor checks on an already built value
    pub(crate) fn validate(&self) -> Result<()> {
        check_personal_data(
            &self.details.name,
            &self.details.security_number,
            &self.details.email,
            self.experience_years,
        )
    }
}

impl Person for Teacher {
    fn details(&self) -> &PersonDetails {
        &self.details
    }

    fn role(&self) -> Role {
        Role::Teacher
    }

    fn years(&self) -> i64 {
        self.experience_years
    }
}

// ============================================================================
// STUDENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(flatten)]
    pub(crate) details: PersonDetails,
    pub(crate) class_year: i64,
}

impl Student {
    /// Validated constructor; the student is not yet in any registry
    pub fn new(
        name: impl Into<String>,
        security_number: impl Into<String>,
        email: impl Into<String>,
        class_year: i64,
    ) -> Result<Self> {
        let (name, security_number, email) = (name.into(), security_number.into(), email.into());
        check_personal_data(&name, &security_number, &email, class_year)?;

        Ok(Student {
            details: PersonDetails::new(name, security_number, email),
            class_year,
        })
    }

    pub fn class_year(&self) -> i64 {
        self.class_year
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_personal_data(
            &self.details.name,
            &self.details.security_number,
            &self.details.email,
            self.class_year,
        )
    }
}

impl Person for Student {
    fn details(&self) -> &PersonDetails {
        &self.details
    }

    fn role(&self) -> Role {
        Role::Student
    }

    fn years(&self) -> i64 {
        self.class_year
    }
}

// ============================================================================
// TESTS
// ============================================================================
