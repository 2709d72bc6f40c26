//! Input sanitization and the field validation rule table.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::database::models::{EmployeePatch, NewEmployee};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

const MAX_SEARCH_TERM_CHARS: usize = 100;

/// Strips the control characters that have no place in a single-line field
/// (NUL, CR, LF, TAB) and trims surrounding whitespace. Total: never fails.
pub fn sanitize(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, '\0' | '\r' | '\n' | '\t'))
        .collect();
    cleaned.trim().to_string()
}

/// Search terms additionally get lower-cased, stripped of SQL metacharacters
/// and capped at 100 characters. The store still binds the term as a query
/// parameter; this is a second line of defense, not the primary one.
pub fn sanitize_search_term(input: &str) -> String {
    let mut term = input.to_lowercase();
    for pattern in [";", "--", "/*", "*/", "'", "\"", "\\"] {
        term = term.replace(pattern, "");
    }
    term.trim().chars().take(MAX_SEARCH_TERM_CHARS).collect()
}

/// Applies `sanitize` to every free-text field of a create payload.
pub fn sanitize_new(input: NewEmployee) -> NewEmployee {
    NewEmployee {
        name: sanitize(&input.name),
        email: sanitize(&input.email),
        department: sanitize(&input.department),
        position: sanitize(&input.position),
        salary: input.salary,
    }
}

/// Applies `sanitize` to the free-text fields present in a partial update.
pub fn sanitize_patch(patch: EmployeePatch) -> EmployeePatch {
    EmployeePatch {
        name: patch.name.as_deref().map(sanitize),
        email: patch.email.as_deref().map(sanitize),
        department: patch.department.as_deref().map(sanitize),
        position: patch.position.as_deref().map(sanitize),
        salary: patch.salary,
    }
}

/// Uniform view over create and update payloads. `None` means the field was
/// absent from the request, so its rules are skipped.
struct Fields<'a> {
    name: Option<&'a str>,
    email: Option<&'a str>,
    department: Option<&'a str>,
    position: Option<&'a str>,
    salary: Option<Decimal>,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The rule table: (field, violated, reason). Rules are evaluated
/// independently so every violation is reported, not just the first.
fn run_rules(fields: &Fields<'_>) -> Vec<String> {
    let checks = [
        ("name", fields.name.is_some_and(str::is_empty), "is required"),
        (
            "name",
            fields.name.is_some_and(|v| char_len(v) > 255),
            "must be at most 255 characters",
        ),
        ("email", fields.email.is_some_and(str::is_empty), "is required"),
        (
            "email",
            fields.email.is_some_and(|v| !v.is_empty() && !EMAIL_RE.is_match(v)),
            "must be a valid email address",
        ),
        (
            "email",
            fields.email.is_some_and(|v| char_len(v) > 255),
            "must be at most 255 characters",
        ),
        (
            "department",
            fields.department.is_some_and(|v| char_len(v) > 100),
            "must be at most 100 characters",
        ),
        (
            "position",
            fields.position.is_some_and(|v| char_len(v) > 100),
            "must be at most 100 characters",
        ),
        (
            "salary",
            fields.salary.is_some_and(|v| v < Decimal::ZERO),
            "must be greater than or equal to 0",
        ),
    ];

    checks
        .iter()
        .filter(|(_, violated, _)| *violated)
        .map(|(field, _, reason)| format!("{} {}", field, reason))
        .collect()
}

/// Validates a create payload; name and email are required.
pub fn validate_new(input: &NewEmployee) -> Result<(), Vec<String>> {
    let fields = Fields {
        name: Some(&input.name),
        email: Some(&input.email),
        department: Some(&input.department),
        position: Some(&input.position),
        salary: Some(input.salary),
    };

    let errors = run_rules(&fields);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates only the fields present in a partial update.
pub fn validate_patch(patch: &EmployeePatch) -> Result<(), Vec<String>> {
    let fields = Fields {
        name: patch.name.as_deref(),
        email: patch.email.as_deref(),
        department: patch.department.as_deref(),
        position: patch.position.as_deref(),
        salary: patch.salary,
    };

    let errors = run_rules(&fields);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
