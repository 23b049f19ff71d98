// School Journal - Core Library
// Entity graph, relationship rules, derived views and persistence for a
// small academic record: teachers, students, courses and a grade journal.

pub mod codec;
pub mod config;
pub mod entities;
pub mod error;
pub mod logging;
pub mod queries;
pub mod registry;
pub mod validation;

// Re-export commonly used types
pub use codec::{export_journal_csv, load, save, FORMAT_VERSION};
pub use config::Config;
pub use entities::{Course, Grade, JournalEntry, Person, PersonDetails, Role, Student, Teacher};
pub use error::{RegistryError, Result};
pub use queries::{CourseOverview, Roster};
pub use registry::{Registry, RegistrySummary, ResolvedEntry};
pub use validation::{
    validate_email, validate_name, validate_personal_data, validate_security_number, validate_year,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
