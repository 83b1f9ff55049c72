use serde::{Deserialize, Serialize};

/// Largest resume upload accepted, in bytes.
pub const MAX_RESUME_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

/// Minimal structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace.
pub fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

/// Validates an upload the way the application form does.
/// Returns every failing field, not just the first.
pub fn validate_upload(
    name: &str,
    email: &str,
    file_name: &str,
    file_size: usize,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(field_error("name", "Name is required."));
    }
    if !is_well_formed_email(email.trim()) {
        errors.push(field_error("email", "Enter a valid email address."));
    }
    if !file_name.to_lowercase().ends_with(".pdf") {
        errors.push(field_error("resume", "Only PDF files are allowed."));
    }
    if file_size > MAX_RESUME_BYTES {
        errors.push(field_error("resume", "File size must be under 2MB."));
    }

    errors
}

/// Reduces a client-supplied file name to a safe single path component.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "resume.pdf".to_string()
    } else {
        cleaned.to_string()
    }
}

fn field_error(field: &str, reason: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
