// ✅ Field validation for people and courses
//
// Each check returns Ok(()) or the failure reason as a lowercase phrase, so
// several failures can be joined into one message for the caller.

/// Result of a single field check: Err carries the reason
pub type FieldCheck = Result<(), String>;

pub fn validate_name(name: &str) -> FieldCheck {
    if name.trim().is_empty() {
        return Err("blank name".to_string());
    }
    Ok(())
}

/// Security numbers are 10 or 12 ASCII digits
pub fn validate_security_number(security_number: &str) -> FieldCheck {
    if security_number.trim().is_empty() {
        return Err("empty security number".to_string());
    }

    // Length is counted in chars so a multi-byte digit lookalike is still one position
    let len = security_number.chars().count();
    if len != 10 && len != 12 {
        return Err("security number length must be 10 or 12 digits".to_string());
    }

    if !security_number.chars().all(|c| c.is_ascii_digit()) {
        return Err("security number must have decimal digits only".to_string());
    }

    Ok(())
}

/// Presence check only, not RFC validation
pub fn validate_email(email: &str) -> FieldCheck {
    if email.trim().is_empty() {
        return Err("empty email".to_string());
    }
    if !email.contains('@') || !email.contains('.') {
        return Err("email is not in the format <address>@<domain>.<ext>".to_string());
    }
    Ok(())
}

/// Class year / experience years must be positive
pub fn validate_year(year: i64) -> FieldCheck {
    if year <= 0 {
        return Err("year must be positive".to_string());
    }
    Ok(())
}

/// Run every personal-data check and join the failures.
///
/// Returns an empty string when all checks pass, otherwise the reasons
/// separated by ", " with the first letter capitalized.
pub fn validate_personal_data(name: &str, security_number: &str, email: &str, year: i64) -> String {
    let errors: Vec<String> = [
        validate_name(name),
        validate_security_number(security_number),
        validate_email(email),
        validate_year(year),
    ]
    .into_iter()
    .filter_map(|check| check.err())
    .collect();

    capitalize(&errors.join(", "))
}

pub fn validate_subject(subject: &str) -> FieldCheck {
    if subject.trim().is_empty() {
        return Err("Empty course name".to_string());
    }
    Ok(())
}

/// Uppercase the first character, leave the rest untouched
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
