// Entity Models
//
// People and courses are identified by their natural keys: a person by
// security number within their role, a course by subject. Cross-references
// (assignments, journal entries) hold those keys and are resolved through
// the registry, so there is exactly one instance of every entity.

pub mod course;
pub mod grade;
pub mod journal;
pub mod person;

pub use course::Course;
pub use grade::Grade;
pub use journal::JournalEntry;
pub use person::{Person, PersonDetails, Role, Student, Teacher};
