//! Client-side field validators
//!
//! Pure message-returning checks run before any network submission.
//! An empty message means the field is valid.

use regex::Regex;
use std::collections::BTreeMap;

lazy_static::lazy_static! {
    /// Alphabetic-only name validation regex.
    /// Rejects digits, whitespace, hyphens, and apostrophes. This matches
    /// the server's contract and is deliberate, not an oversight.
    static ref ALPHABETIC_REGEX: Regex = Regex::new(r"^[a-zA-Z]+$").unwrap();

    /// Email shape: local part, domain, and a final label of two or more letters
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// Validate that a value is alphabetic and within `[min, max]` characters inclusive.
///
/// Returns an empty string when valid, a human-readable message otherwise.
/// Total function: never panics on any input.
pub fn validate_length(value: &str, min: usize, max: usize) -> String {
    if !ALPHABETIC_REGEX.is_match(value) {
        return "Input must contain only alphabetic characters.".to_string();
    }
    if value.len() < min || value.len() > max {
        return format!("Input must be between {} and {} characters.", min, max);
    }
    String::new()
}

/// Validate an email address shape.
///
/// Returns an empty string when valid, a human-readable message otherwise.
pub fn validate_email(value: &str) -> String {
    if !EMAIL_REGEX.is_match(value) {
        return "Please enter a valid email address.".to_string();
    }
    String::new()
}

/// Field-name to error-message mapping produced by a validation pass.
///
/// An empty message means the field is valid. Produced fresh per pass,
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of a single field check
    pub fn set(&mut self, field: &'static str, message: String) {
        self.0.insert(field, message);
    }

    /// Message for a field; empty string when the field is valid or unchecked
    pub fn message(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    /// True iff every checked field has an empty message
    pub fn is_valid(&self) -> bool {
        self.0.values().all(String::is_empty)
    }

    /// Iterate over fields with non-empty messages
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(f, m)| (*f, m.as_str()))
    }

    /// Flatten failures into a single display message
    pub fn summary(&self) -> String {
        self.failures()
            .map(|(f, m)| format!("{}: {}", f, m))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
