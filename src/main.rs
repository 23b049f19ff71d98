use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::env;
use std::io;

use school_journal::logging::init_logger;
use school_journal::{export_journal_csv, load, Config, Grade, Person, Registry, Role};

const USAGE: &str = "usage: school-journal <summary|demo|export-csv> [FILE] [-v]";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    let positional: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|a| !a.starts_with('-'))
        .collect();

    let command = positional.first().copied().unwrap_or("summary");
    let config = Config::resolve(positional.get(1).copied(), verbose);
    init_logger(config.verbose);

    match command {
        "summary" => run_summary(&config),
        "demo" => run_demo(&config),
        "export-csv" => run_export(&config),
        other => bail!("unknown command '{}'\n{}", other, USAGE),
    }
}

fn run_summary(config: &Config) -> Result<()> {
    let registry = load(&config.data_file)
        .with_context(|| format!("loading {}", config.data_file.display()))?;

    let summary = registry.summary();
    println!("School Journal v{}", school_journal::VERSION);
    println!(
        "{} students, {} teachers, {} courses, {} journal entries\n",
        summary.students, summary.teachers, summary.courses, summary.journal_entries
    );

    for course in registry.courses_by_subject() {
        let roster = registry.roster_for(course.subject())?;
        println!(
            "{} - teachers: [{}], students: {}",
            course,
            roster.teacher_names().join(", "),
            roster.student_count
        );

        for student in registry.students_in(course.subject())? {
            let grade = registry
                .latest_grade(course.subject(), student.security_number())?
                .map(|entry| format!("{} ({})", entry.grade(), entry.date()))
                .unwrap_or_else(|| "-".to_string());
            println!("    {:<20} {}", student.name(), grade);
        }
    }

    Ok(())
}

/// Build a small sample school and save it
fn run_demo(config: &Config) -> Result<()> {
    let mut registry = Registry::new();

    registry.add_teacher("Anna", "1980010112", "a@b.com", 10)?;
    registry.add_student("Dave", "2006010112", "d@b.com", 1)?;
    registry.add_course("Mathematics")?;
    registry.assign_course(Role::Teacher, "1980010112", "Mathematics")?;
    registry.assign_course(Role::Student, "2006010112", "Mathematics")?;

    let first = NaiveDate::from_ymd_opt(2024, 9, 20).context("invalid demo date")?;
    let second = NaiveDate::from_ymd_opt(2024, 11, 8).context("invalid demo date")?;
    registry.record_grade("Mathematics", "1980010112", "2006010112", Grade::B, None, first)?;
    registry.record_grade(
        "Mathematics",
        "1980010112",
        "2006010112",
        Grade::A,
        Some("Retake"),
        second,
    )?;

    registry
        .save(&config.data_file)
        .with_context(|| format!("saving {}", config.data_file.display()))?;
    println!("✓ Demo registry written to {}", config.data_file.display());

    Ok(())
}

fn run_export(config: &Config) -> Result<()> {
    let registry = load(&config.data_file)
        .with_context(|| format!("loading {}", config.data_file.display()))?;
    if registry.journal().is_empty() {
        eprintln!("Journal is empty.");
        return Ok(());
    }
    export_journal_csv(&registry, io::stdout().lock())?;
    Ok(())
}
