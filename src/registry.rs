// 🏫 Registry - owns every entity and the grade journal
//
// Students and teachers are keyed by security number, courses by subject.
// Assignments and journal entries refer to those keys, so every reference
// resolves to the single instance held here.
//
// The registry is an ordinary owned value: build one, pass it to whoever
// drives it. Nothing here is global.

use crate::entities::{Course, Grade, JournalEntry, Person, PersonDetails, Role, Student, Teacher};
use crate::error::{RegistryError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    pub(crate) students: BTreeMap<String, Student>,
    pub(crate) teachers: BTreeMap<String, Teacher>,
    pub(crate) courses: BTreeMap<String, Course>,
    /// Append-only; insertion order is recency order
    pub(crate) journal: Vec<JournalEntry>,
}

/// Entity counts, used by the CLI and load/save logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrySummary {
    pub students: usize,
    pub teachers: usize,
    pub courses: usize,
    pub journal_entries: usize,
}

/// A journal entry with its references resolved to registry instances
#[derive(Debug, Clone, Copy)]
pub struct ResolvedEntry<'a> {
    pub entry: &'a JournalEntry,
    pub course: &'a Course,
    pub teacher: &'a Teacher,
    pub student: &'a Student,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // ADDING ENTITIES
    // ========================================================================

    /// Validate and insert a teacher.
    ///
    /// Returns false if an identical teacher is already registered. A
    /// different teacher with the same security number is rejected.
    pub fn add_teacher(
        &mut self,
        name: &str,
        security_number: &str,
        email: &str,
        experience_years: i64,
    ) -> Result<bool> {
        let teacher = Teacher::new(name, security_number, email, experience_years)?;
        let inserted = insert_person(&mut self.teachers, teacher)?;
        debug!(security_number, inserted, "add_teacher");
        Ok(inserted)
    }

    /// Validate and insert a student. Same contract as `add_teacher`.
    pub fn add_student(
        &mut self,
        name: &str,
        security_number: &str,
        email: &str,
        class_year: i64,
    ) -> Result<bool> {
        let student = Student::new(name, security_number, email, class_year)?;
        let inserted = insert_person(&mut self.students, student)?;
        debug!(security_number, inserted, "add_student");
        Ok(inserted)
    }

    /// Validate and insert a course; false if the subject already exists
    pub fn add_course(&mut self, subject: &str) -> Result<bool> {
        let course = Course::new(subject)?;
        if self.courses.contains_key(subject) {
            debug!(subject, inserted = false, "add_course");
            return Ok(false);
        }
        self.courses.insert(course.subject().to_string(), course);
        debug!(subject, inserted = true, "add_course");
        Ok(true)
    }

    // ========================================================================
    // ASSIGNMENTS
    // ========================================================================

    /// Assign a course to a person; false if already assigned
    pub fn assign_course(&mut self, role: Role, security_number: &str, subject: &str) -> Result<bool> {
        self.require_course(subject)?;
        let changed = self.person_details_mut(role, security_number)?.assign_course(subject);
        debug!(%role, security_number, subject, changed, "assign_course");
        Ok(changed)
    }

    /// Remove a course from a person; false if it was not assigned.
    ///
    /// Journal entries for the pair are kept.
    pub fn unassign_course(&mut self, role: Role, security_number: &str, subject: &str) -> Result<bool> {
        self.require_course(subject)?;
        let changed = self.person_details_mut(role, security_number)?.unassign_course(subject);
        debug!(%role, security_number, subject, changed, "unassign_course");
        Ok(changed)
    }

    // ========================================================================
    // JOURNAL
    // ========================================================================

    /// Append a grading event.
    ///
    /// All three entities must exist. Current assignment is not checked and
    /// nothing is deduplicated: repeated grades for a pair form its history.
    pub fn record_grade(
        &mut self,
        subject: &str,
        teacher: &str,
        student: &str,
        grade: Grade,
        comment: Option<&str>,
        date: NaiveDate,
    ) -> Result<&JournalEntry> {
        self.require_course(subject)?;
        self.require_teacher(teacher)?;
        self.require_student(student)?;

        self.journal.push(JournalEntry::new(
            subject,
            teacher,
            student,
            grade,
            comment.map(str::to_string),
            date,
        ));
        debug!(subject, teacher, student, %grade, %date, "record_grade");

        self.journal
            .last()
            .ok_or_else(|| RegistryError::NotFound(format!("journal entry for '{}'", subject)))
    }

    /// Resolve an entry's keys to the instances held by this registry
    pub fn resolve<'a>(&'a self, entry: &'a JournalEntry) -> Option<ResolvedEntry<'a>> {
        Some(ResolvedEntry {
            entry,
            course: self.courses.get(entry.course())?,
            teacher: self.teachers.get(entry.teacher())?,
            student: self.students.get(entry.student())?,
        })
    }

    // ========================================================================
    // READ-ONLY VIEWS
    // ========================================================================

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn teachers(&self) -> impl Iterator<Item = &Teacher> {
        self.teachers.values()
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    pub fn student(&self, security_number: &str) -> Option<&Student> {
        self.students.get(security_number)
    }

    pub fn teacher(&self, security_number: &str) -> Option<&Teacher> {
        self.teachers.get(security_number)
    }

    pub fn course(&self, subject: &str) -> Option<&Course> {
        self.courses.get(subject)
    }

    /// Look up a person of either role
    pub fn person(&self, role: Role, security_number: &str) -> Option<&dyn Person> {
        match role {
            Role::Student => self.student(security_number).map(|s| s as &dyn Person),
            Role::Teacher => self.teacher(security_number).map(|t| t as &dyn Person),
        }
    }

    pub fn summary(&self) -> RegistrySummary {
        RegistrySummary {
            students: self.students.len(),
            teachers: self.teachers.len(),
            courses: self.courses.len(),
            journal_entries: self.journal.len(),
        }
    }

    // ========================================================================
    // LOOKUP HELPERS
    // ========================================================================

    pub(crate) fn require_course(&self, subject: &str) -> Result<&Course> {
        self.courses
            .get(subject)
            .ok_or_else(|| RegistryError::NotFound(format!("course '{}'", subject)))
    }

    pub(crate) fn require_teacher(&self, security_number: &str) -> Result<&Teacher> {
        self.teachers
            .get(security_number)
            .ok_or_else(|| RegistryError::NotFound(format!("teacher {}", security_number)))
    }

    pub(crate) fn require_student(&self, security_number: &str) -> Result<&Student> {
        self.students
            .get(security_number)
            .ok_or_else(|| RegistryError::NotFound(format!("student {}", security_number)))
    }

    fn person_details_mut(&mut self, role: Role, security_number: &str) -> Result<&mut PersonDetails> {
        let details = match role {
            Role::Student => self.students.get_mut(security_number).map(|s| &mut s.details),
            Role::Teacher => self.teachers.get_mut(security_number).map(|t| &mut t.details),
        };
        details.ok_or_else(|| {
            RegistryError::NotFound(format!("{} {}", role.as_str().to_lowercase(), security_number))
        })
    }
}

/// Set-union insert keyed by security number.
///
/// Identical person: no-op, false. Same security number with different
/// fields: rejected, no two people of one role share a security number.
pub(crate) fn insert_person<P: Person>(people: &mut BTreeMap<String, P>, person: P) -> Result<bool> {
    if let Some(existing) = people.get(person.security_number()) {
        if existing.same_identity(&person) {
            return Ok(false);
        }
        return Err(RegistryError::InvalidPersonalData(format!(
            "Security number {} is already registered to another {}",
            person.security_number(),
            person.role().as_str().to_lowercase()
        )));
    }
    people.insert(person.security_number().to_string(), person);
    Ok(true)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ANNA: &str = "1980010112";
    const DAVE: &str = "2006010112";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn registry_with_people() -> Registry {
        let mut registry = Registry::new();
        registry.add_teacher("Anna", ANNA, "a@b.com", 10).unwrap();
        registry.add_student("Dave", DAVE, "d@b.com", 1).unwrap();
        registry.add_course("Mathematics").unwrap();
        registry
    }

    #[test]
    fn test_add_is_set_union() {
        let mut registry = Registry::new();

        assert!(registry.add_teacher("Anna", ANNA, "a@b.com", 10).unwrap());
        assert!(!registry.add_teacher("Anna", ANNA, "a@b.com", 10).unwrap());
        assert_eq!(registry.teachers().count(), 1);

        assert!(registry.add_course("Mathematics").unwrap());
        assert!(!registry.add_course("Mathematics").unwrap());
        assert_eq!(registry.courses().count(), 1);
    }

    #[test]
    fn test_re_add_does_not_overwrite_assignments() {
        let mut registry = registry_with_people();
        registry.assign_course(Role::Teacher, ANNA, "Mathematics").unwrap();

        assert!(!registry.add_teacher("Anna", ANNA, "a@b.com", 10).unwrap());
        assert!(registry.teacher(ANNA).unwrap().is_assigned_to("Mathematics"));
    }

    #[test]
    fn test_same_security_number_different_person_rejected() {
        let mut registry = registry_with_people();

        let err = registry.add_student("Eve", DAVE, "e@b.com", 2).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPersonalData(_)));
        assert_eq!(registry.student(DAVE).unwrap().name(), "Dave");

        // Roles are separate key spaces
        assert!(registry.add_teacher("Dave", DAVE, "d@b.com", 1).unwrap());
    }

    #[test]
    fn test_invalid_data_leaves_registry_untouched() {
        let mut registry = Registry::new();

        let err = registry.add_student("Dave", "20060101", "d@b.com", 1).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPersonalData(_)));
        assert!(matches!(
            registry.add_course(""),
            Err(RegistryError::InvalidCourseData(_))
        ));
        assert_eq!(registry, Registry::new());
    }

    #[test]
    fn test_assign_twice_changes_set_once() {
        let mut registry = registry_with_people();

        assert!(registry.assign_course(Role::Student, DAVE, "Mathematics").unwrap());
        assert!(!registry.assign_course(Role::Student, DAVE, "Mathematics").unwrap());
        assert_eq!(registry.student(DAVE).unwrap().courses().len(), 1);
    }

    #[test]
    fn test_unassign() {
        let mut registry = registry_with_people();
        registry.assign_course(Role::Teacher, ANNA, "Mathematics").unwrap();

        assert!(registry.unassign_course(Role::Teacher, ANNA, "Mathematics").unwrap());
        assert!(!registry.unassign_course(Role::Teacher, ANNA, "Mathematics").unwrap());
        assert!(registry.teacher(ANNA).unwrap().courses().is_empty());
    }

    #[test]
    fn test_assignment_with_unknown_entities() {
        let mut registry = registry_with_people();

        assert!(matches!(
            registry.assign_course(Role::Student, DAVE, "Physics"),
            Err(RegistryError::NotFound(_))
        ));
        assert!(matches!(
            registry.assign_course(Role::Student, ANNA, "Mathematics"),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn test_record_grade_appends_history() {
        let mut registry = registry_with_people();

        registry
            .record_grade("Mathematics", ANNA, DAVE, Grade::B, None, date(2024, 1, 10))
            .unwrap();
        let second = registry
            .record_grade("Mathematics", ANNA, DAVE, Grade::A, Some("Improved"), date(2024, 2, 10))
            .unwrap();
        assert_eq!(second.grade(), Grade::A);
        assert_eq!(second.comment(), Some("Improved"));
        assert_eq!(second.date(), date(2024, 2, 10));

        let grades: Vec<Grade> = registry.journal().iter().map(|e| e.grade()).collect();
        assert_eq!(grades, vec![Grade::B, Grade::A]);
    }

    #[test]
    fn test_record_grade_requires_known_entities() {
        let mut registry = registry_with_people();

        let err = registry
            .record_grade("Mathematics", DAVE, DAVE, Grade::A, None, date(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
        assert!(registry.journal().is_empty());
    }

    #[test]
    fn test_journal_survives_unassignment() {
        let mut registry = registry_with_people();
        registry.assign_course(Role::Student, DAVE, "Mathematics").unwrap();
        registry
            .record_grade("Mathematics", ANNA, DAVE, Grade::C, None, date(2024, 1, 1))
            .unwrap();

        registry.unassign_course(Role::Student, DAVE, "Mathematics").unwrap();
        assert_eq!(registry.journal().len(), 1);
    }

    #[test]
    fn test_resolve_returns_registry_instances() {
        let mut registry = registry_with_people();
        registry
            .record_grade("Mathematics", ANNA, DAVE, Grade::E, None, date(2024, 1, 1))
            .unwrap();

        let entry = &registry.journal()[0];
        let resolved = registry.resolve(entry).unwrap();

        assert!(std::ptr::eq(resolved.teacher, registry.teacher(ANNA).unwrap()));
        assert!(std::ptr::eq(resolved.student, registry.student(DAVE).unwrap()));
        assert!(std::ptr::eq(resolved.course, registry.course("Mathematics").unwrap()));
    }

    #[test]
    fn test_person_lookup_by_role() {
        let registry = registry_with_people();

        assert_eq!(registry.person(Role::Teacher, ANNA).unwrap().name(), "Anna");
        assert!(registry.person(Role::Student, ANNA).is_none());
    }

    #[test]
    fn test_independent_registries() {
        let mut first = Registry::new();
        let second = Registry::new();
        first.add_course("Art").unwrap();

        assert_eq!(first.summary().courses, 1);
        assert_eq!(second.summary().courses, 0);
    }
}
