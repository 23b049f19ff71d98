// 📒 Journal Entry - one grading event
//
// Entries are immutable and append-only. A corrected grade is a new entry
// for the same (course, student) pair; insertion order is recency order.
//
// Course, teacher and student are held by natural key (subject, security
// numbers) and resolved through the registry that owns the entry.

use crate::entities::Grade;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    course: String,
    teacher: String,
    student: String,
    grade: Grade,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    /// Serialized as YYYY-MM-DD
    date: NaiveDate,
}

impl JournalEntry {
    pub(crate) fn new(
        course: &str,
        teacher: &str,
        student: &str,
        grade: Grade,
        comment: Option<String>,
        date: NaiveDate,
    ) -> Self {
        JournalEntry {
            course: course.to_string(),
            teacher: teacher.to_string(),
            student: student.to_string(),
            grade,
            // Blank comments are stored as absent
            comment: comment.filter(|c| !c.trim().is_empty()),
            date,
        }
    }

    /// Subject of the graded course
    pub fn course(&self) -> &str {
        &self.course
    }

    /// Security number of the grading teacher
    pub fn teacher(&self) -> &str {
        &self.teacher
    }

    /// Security number of the graded student
    pub fn student(&self) -> &str {
        &self.student
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn concerns(&self, subject: &str, student: &str) -> bool {
        self.course == subject && self.student == student
    }
}
