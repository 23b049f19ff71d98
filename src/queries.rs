// 🔎 Relationship Queries - derived views over the registry
//
// Nothing here mutates. Rosters and candidate lists are computed from the
// people's assignment sets; grades come from a scan of the journal.

use crate::entities::{Course, JournalEntry, Person, Role, Student, Teacher};
use crate::error::Result;
use crate::registry::Registry;

/// Teachers assigned to a course plus its student head-count
#[derive(Debug, Clone)]
pub struct Roster<'a> {
    pub course: &'a Course,
    /// Sorted by name
    pub teachers: Vec<&'a Teacher>,
    pub student_count: usize,
}

impl Roster<'_> {
    pub fn teacher_names(&self) -> Vec<&str> {
        self.teachers.iter().map(|t| t.name()).collect()
    }
}

/// Per-course counts for every course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOverview {
    pub subject: String,
    pub teacher_count: usize,
    pub student_count: usize,
}

impl Registry {
    /// Teachers (by name) and number of students assigned to `subject`
    pub fn roster_for(&self, subject: &str) -> Result<Roster<'_>> {
        let course = self.require_course(subject)?;

        let mut teachers: Vec<&Teacher> = self
            .teachers()
            .filter(|t| t.is_assigned_to(subject))
            .collect();
        teachers.sort_by(|a, b| a.name().cmp(b.name()));

        let student_count = self.students().filter(|s| s.is_assigned_to(subject)).count();

        Ok(Roster {
            course,
            teachers,
            student_count,
        })
    }

    /// Students assigned to `subject`, sorted by name
    pub fn students_in(&self, subject: &str) -> Result<Vec<&Student>> {
        self.require_course(subject)?;
        let mut students: Vec<&Student> = self
            .students()
            .filter(|s| s.is_assigned_to(subject))
            .collect();
        students.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(students)
    }

    /// The current grade: last journal entry for (course, student).
    ///
    /// Ok(None) means both exist but the student has not been graded.
    pub fn latest_grade(&self, subject: &str, student: &str) -> Result<Option<&JournalEntry>> {
        self.require_course(subject)?;
        self.require_student(student)?;

        Ok(self
            .journal()
            .iter()
            .rev()
            .find(|entry| entry.concerns(subject, student)))
    }

    /// Every entry for (course, student) in insertion order
    pub fn grade_history(&self, subject: &str, student: &str) -> Result<Vec<&JournalEntry>> {
        self.require_course(subject)?;
        self.require_student(student)?;

        Ok(self
            .journal()
            .iter()
            .filter(|entry| entry.concerns(subject, student))
            .collect())
    }

    /// People of `role` not yet assigned to `subject`, sorted by name.
    ///
    /// Offering only these keeps the assignment workflow from ever
    /// attempting a duplicate.
    pub fn unassigned_candidates(&self, subject: &str, role: Role) -> Result<Vec<&dyn Person>> {
        self.require_course(subject)?;

        let mut candidates: Vec<&dyn Person> = match role {
            Role::Student => self
                .students()
                .filter(|s| !s.is_assigned_to(subject))
                .map(|s| s as &dyn Person)
                .collect(),
            Role::Teacher => self
                .teachers()
                .filter(|t| !t.is_assigned_to(subject))
                .map(|t| t as &dyn Person)
                .collect(),
        };
        candidates.sort_by(|a, b| a.name().cmp(b.name()));

        Ok(candidates)
    }

    /// Teacher and student counts for every course, by subject
    pub fn course_overview(&self) -> Vec<CourseOverview> {
        self.courses()
            .map(|course| {
                let subject = course.subject();
                CourseOverview {
                    subject: subject.to_string(),
                    teacher_count: self.teachers().filter(|t| t.is_assigned_to(subject)).count(),
                    student_count: self.students().filter(|s| s.is_assigned_to(subject)).count(),
                }
            })
            .collect()
    }

    // ========================================================================
    // LISTINGS
    // ========================================================================

    pub fn students_by_name(&self) -> Vec<&Student> {
        let mut students: Vec<&Student> = self.students().collect();
        students.sort_by(|a, b| a.name().cmp(b.name()));
        students
    }

    pub fn teachers_by_name(&self) -> Vec<&Teacher> {
        let mut teachers: Vec<&Teacher> = self.teachers().collect();
        teachers.sort_by(|a, b| a.name().cmp(b.name()));
        teachers
    }

    /// Courses are keyed by subject, so map order is already sorted
    pub fn courses_by_subject(&self) -> Vec<&Course> {
        self.courses().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Grade;
    use crate::error::RegistryError;
    use chrono::NaiveDate;

    const ANNA: &str = "1980010112";
    const BORIS: &str = "1975020212";
    const DAVE: &str = "2006010112";
    const CLARA: &str = "2005050512";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn school() -> Registry {
        let mut registry = Registry::new();
        registry.add_teacher("Boris", BORIS, "b@b.com", 20).unwrap();
        registry.add_teacher("Anna", ANNA, "a@b.com", 10).unwrap();
        registry.add_student("Dave", DAVE, "d@b.com", 1).unwrap();
        registry.add_student("Clara", CLARA, "c@b.com", 2).unwrap();
        registry.add_course("Mathematics").unwrap();
        registry.add_course("Art").unwrap();
        registry
    }

    #[test]
    fn test_roster_teachers_sorted_by_name() {
        let mut registry = school();
        registry.assign_course(Role::Teacher, BORIS, "Mathematics").unwrap();
        registry.assign_course(Role::Teacher, ANNA, "Mathematics").unwrap();
        registry.assign_course(Role::Student, DAVE, "Mathematics").unwrap();

        let roster = registry.roster_for("Mathematics").unwrap();
        assert_eq!(roster.course.subject(), "Mathematics");
        assert_eq!(roster.teacher_names(), vec!["Anna", "Boris"]);
        assert_eq!(roster.student_count, 1);

        let art = registry.roster_for("Art").unwrap();
        assert!(art.teachers.is_empty());
        assert_eq!(art.student_count, 0);
    }

    #[test]
    fn test_roster_unknown_course() {
        let registry = school();
        assert!(matches!(
            registry.roster_for("Latin"),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn test_latest_grade_is_last_appended() {
        let mut registry = school();
        registry
            .record_grade("Mathematics", ANNA, DAVE, Grade::B, None, date(2024, 5, 1))
            .unwrap();
        // Earlier date but appended later: recency is insertion order
        registry
            .record_grade("Mathematics", ANNA, DAVE, Grade::A, None, date(2024, 4, 1))
            .unwrap();
        registry
            .record_grade("Art", BORIS, DAVE, Grade::F, None, date(2024, 6, 1))
            .unwrap();

        let latest = registry.latest_grade("Mathematics", DAVE).unwrap().unwrap();
        assert_eq!(latest.grade(), Grade::A);

        let history = registry.grade_history("Mathematics", DAVE).unwrap();
        let grades: Vec<Grade> = history.iter().map(|e| e.grade()).collect();
        assert_eq!(grades, vec![Grade::B, Grade::A]);
    }

    #[test]
    fn test_latest_grade_none_and_not_found() {
        let registry = school();

        assert!(registry.latest_grade("Mathematics", DAVE).unwrap().is_none());
        assert!(matches!(
            registry.latest_grade("Latin", DAVE),
            Err(RegistryError::NotFound(_))
        ));
        assert!(matches!(
            registry.latest_grade("Mathematics", ANNA),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn test_unassigned_candidates_shrink_as_people_are_assigned() {
        let mut registry = school();

        let names = |r: &Registry| -> Vec<String> {
            r.unassigned_candidates("Mathematics", Role::Student)
                .unwrap()
                .iter()
                .map(|p| p.name().to_string())
                .collect()
        };

        assert_eq!(names(&registry), vec!["Clara", "Dave"]);
        registry.assign_course(Role::Student, DAVE, "Mathematics").unwrap();
        assert_eq!(names(&registry), vec!["Clara"]);

        let teachers = registry.unassigned_candidates("Mathematics", Role::Teacher).unwrap();
        assert_eq!(teachers.len(), 2);
        assert!(teachers.iter().all(|p| p.role() == Role::Teacher));
    }

    #[test]
    fn test_course_overview_and_students_in() {
        let mut registry = school();
        registry.assign_course(Role::Teacher, ANNA, "Art").unwrap();
        registry.assign_course(Role::Student, DAVE, "Art").unwrap();
        registry.assign_course(Role::Student, CLARA, "Art").unwrap();

        let overview = registry.course_overview();
        assert_eq!(
            overview,
            vec![
                CourseOverview {
                    subject: "Art".to_string(),
                    teacher_count: 1,
                    student_count: 2,
                },
                CourseOverview {
                    subject: "Mathematics".to_string(),
                    teacher_count: 0,
                    student_count: 0,
                },
            ]
        );

        let names: Vec<&str> = registry
            .students_in("Art")
            .unwrap()
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(names, vec!["Clara", "Dave"]);
    }

    #[test]
    fn test_listings_sorted() {
        let registry = school();

        let teachers: Vec<&str> = registry.teachers_by_name().iter().map(|t| t.name()).collect();
        assert_eq!(teachers, vec!["Anna", "Boris"]);

        let students: Vec<&str> = registry.students_by_name().iter().map(|s| s.name()).collect();
        assert_eq!(students, vec!["Clara", "Dave"]);

        let courses: Vec<&str> = registry.courses_by_subject().iter().map(|c| c.subject()).collect();
        assert_eq!(courses, vec!["Art", "Mathematics"]);
    }
}
