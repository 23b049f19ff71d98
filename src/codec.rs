// 💾 Persistence Codec - registry <-> JSON document
//
// Document layout:
//   { format_version, students, teachers, courses, journal, checksum }
//
// People carry their assigned subjects; journal entries carry natural keys
// (subject, security numbers). Dates are YYYY-MM-DD.
//
// Loading is arena-style: courses first, then people (their subjects must
// resolve), then the journal (all three keys must resolve). Any failure
// rejects the whole document; a partial registry is never returned.

use crate::entities::{Course, JournalEntry, Person, Student, Teacher};
use crate::error::{RegistryError, Result};
use crate::registry::{insert_person, Registry};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

pub const FORMAT_VERSION: u32 = 1;

// ============================================================================
// DOCUMENT
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    format_version: u32,
    students: Vec<Student>,
    teachers: Vec<Teacher>,
    courses: Vec<Course>,
    journal: Vec<JournalEntry>,
    /// SHA-256 of the payload; absent in hand-written documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    checksum: Option<String>,
}

/// Borrowed view of everything the checksum covers
#[derive(Serialize)]
struct Payload<'a> {
    format_version: u32,
    students: &'a [Student],
    teachers: &'a [Teacher],
    courses: &'a [Course],
    journal: &'a [JournalEntry],
}

impl Document {
    fn from_registry(registry: &Registry) -> Result<Self> {
        let mut document = Document {
            format_version: FORMAT_VERSION,
            students: registry.students().cloned().collect(),
            teachers: registry.teachers().cloned().collect(),
            courses: registry.courses().cloned().collect(),
            journal: registry.journal().to_vec(),
            checksum: None,
        };
        document.checksum = Some(document.compute_checksum()?);
        Ok(document)
    }

    fn compute_checksum(&self) -> Result<String> {
        let payload = Payload {
            format_version: self.format_version,
            students: &self.students,
            teachers: &self.teachers,
            courses: &self.courses,
            journal: &self.journal,
        };
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(&payload)?);
        Ok(format!("{:x}", hasher.finalize()))
    }

    fn verify(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(RegistryError::Persistence(format!(
                "unsupported format version {} (expected {})",
                self.format_version, FORMAT_VERSION
            )));
        }
        if let Some(expected) = &self.checksum {
            let actual = self.compute_checksum()?;
            if &actual != expected {
                return Err(RegistryError::Persistence(
                    "checksum mismatch, document was modified or truncated".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Rebuild the registry: entities first, then references into them
    fn into_registry(self) -> Result<Registry> {
        let mut registry = Registry::new();

        for course in self.courses {
            course.validate().map_err(|e| malformed(e.to_string()))?;
            let subject = course.subject().to_string();
            if registry.courses.insert(subject.clone(), course).is_some() {
                return Err(malformed(format!("duplicate course '{}'", subject)));
            }
        }

        for teacher in self.teachers {
            teacher.validate().map_err(|e| malformed(e.to_string()))?;
            check_assignments(&registry.courses, &teacher)?;
            insert_unique(&mut registry.teachers, teacher)?;
        }

        for student in self.students {
            student.validate().map_err(|e| malformed(e.to_string()))?;
            check_assignments(&registry.courses, &student)?;
            insert_unique(&mut registry.students, student)?;
        }

        for (index, entry) in self.journal.into_iter().enumerate() {
            if registry.resolve(&entry).is_none() {
                return Err(malformed(format!(
                    "journal entry {} references unknown course, teacher or student",
                    index
                )));
            }
            registry.journal.push(entry);
        }

        Ok(registry)
    }
}

fn malformed(reason: String) -> RegistryError {
    RegistryError::Persistence(format!("malformed document: {}", reason))
}

fn check_assignments(courses: &BTreeMap<String, Course>, person: &dyn Person) -> Result<()> {
    match person.courses().iter().find(|subject| !courses.contains_key(*subject)) {
        Some(subject) => Err(malformed(format!(
            "{} {} is assigned to unknown course '{}'",
            person.role().as_str().to_lowercase(),
            person.security_number(),
            subject
        ))),
        None => Ok(()),
    }
}

/// Any repeated security number in a document is an error, identical or not
fn insert_unique<P: Person>(people: &mut BTreeMap<String, P>, person: P) -> Result<()> {
    let security_number = person.security_number().to_string();
    match insert_person(people, person) {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err(malformed(format!(
            "duplicate security number {}",
            security_number
        ))),
    }
}

// ============================================================================
// TEXT
// ============================================================================

/// Encode the whole registry as a pretty-printed JSON document
pub fn serialize(registry: &Registry) -> Result<String> {
    let document = Document::from_registry(registry)?;
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Decode a document produced by `serialize`
pub fn deserialize(text: &str) -> Result<Registry> {
    let document: Document = serde_json::from_str(text)
        .map_err(|e| RegistryError::Persistence(format!("invalid document: {}", e)))?;
    document.verify()?;
    document.into_registry()
}

// ============================================================================
// FILES
// ============================================================================

/// Write the registry to `path`.
///
/// The document goes to a sibling temp file first and is renamed into
/// place, so an interrupted save never leaves a half-written file.
pub fn save(registry: &Registry, path: &Path) -> Result<()> {
    let text = serialize(registry)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| RegistryError::Persistence(format!("not a file path: {}", path.display())))?;
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    if let Err(e) = fs::write(&tmp_path, text).and_then(|_| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    let summary = registry.summary();
    info!(
        path = %path.display(),
        students = summary.students,
        teachers = summary.teachers,
        courses = summary.courses,
        journal_entries = summary.journal_entries,
        "registry saved"
    );
    Ok(())
}

/// Read a registry from `path`. Missing or malformed files are errors.
pub fn load(path: &Path) -> Result<Registry> {
    let text = fs::read_to_string(path)?;
    let registry = deserialize(&text).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "rejected registry document");
    })?;

    let summary = registry.summary();
    info!(
        path = %path.display(),
        students = summary.students,
        teachers = summary.teachers,
        courses = summary.courses,
        journal_entries = summary.journal_entries,
        "registry loaded"
    );
    Ok(registry)
}

impl Registry {
    pub fn save(&self, path: &Path) -> Result<()> {
        save(self, path)
    }

    /// Replace this registry with the file's contents.
    ///
    /// On any error the current state is kept as it was.
    pub fn reload_from(&mut self, path: &Path) -> Result<()> {
        *self = load(path)?;
        Ok(())
    }
}

// ============================================================================
// CSV EXPORT
// ============================================================================

#[derive(Serialize)]
struct JournalRow<'a> {
    date: String,
    course: &'a str,
    teacher: &'a str,
    student: &'a str,
    grade: &'static str,
    comment: &'a str,
}

/// Write the journal as CSV, one row per entry in insertion order.
///
/// Teacher and student columns hold names, resolved through the registry.
pub fn export_journal_csv<W: Write>(registry: &Registry, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for entry in registry.journal() {
        let resolved = registry
            .resolve(entry)
            .ok_or_else(|| RegistryError::NotFound(format!("references of entry for '{}'", entry.course())))?;

        csv_writer.serialize(JournalRow {
            date: entry.date().format("%Y-%m-%d").to_string(),
            course: resolved.course.subject(),
            teacher: resolved.teacher.name(),
            student: resolved.student.name(),
            grade: entry.grade().as_str(),
            comment: entry.comment().unwrap_or(""),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
