//! Constraint records: a pure predicate paired with the error it reports
//!
//! Each field owns an ordered list of [`Constraint`]s. They are evaluated
//! independently and every failure is collected, so a password can report
//! both [`ErrorKind::TooShort`] and [`ErrorKind::MissingDigit`] at once.

use crate::result::FieldError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address pattern accepted for the email field.
///
/// The leading-dot and double-dot rules are checked separately since the
/// `regex` crate has no lookaround.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Every way a field can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Field absent from the submission
    Required,
    /// Field present but not a string
    InvalidType,
    /// Not a syntactically valid email address
    InvalidFormat,
    /// Valid address on a domain other than the allowed one
    DomainNotAllowed,
    /// Trimmed value shorter than the configured minimum
    TooShort,
    /// No decimal digit in the value
    MissingDigit,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Required => "required",
            ErrorKind::InvalidType => "invalid_type",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::DomainNotAllowed => "domain_not_allowed",
            ErrorKind::TooShort => "too_short",
            ErrorKind::MissingDigit => "missing_digit",
        };
        f.write_str(name)
    }
}

/// Predicate over an already-trimmed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// At least `n` UTF-16 code units
    MinLength(usize),
    EmailSyntax,
    /// Domain part (after the last `@`) equals this domain exactly
    DomainEquals(String),
    /// Contains at least one ASCII digit
    ContainsDigit,
}

impl Check {
    pub fn holds(&self, value: &str) -> bool {
        match self {
            Check::MinLength(min) => value.encode_utf16().count() >= *min,
            Check::EmailSyntax => is_valid_email(value),
            Check::DomainEquals(domain) => email_domain(value)
                .map(|d| d == domain.as_str())
                .unwrap_or(false),
            Check::ContainsDigit => value.chars().any(|c| c.is_ascii_digit()),
        }
    }
}

/// When a constraint runs relative to the ones before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// Only when no earlier constraint on the same field has failed
    WhenClean,
}

/// A single named rule a field value must satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub kind: ErrorKind,
    pub message: String,
    pub check: Check,
    pub gate: Gate,
}

impl Constraint {
    pub fn new(kind: ErrorKind, check: Check, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            check,
            gate: Gate::Always,
        }
    }

    /// Skip this constraint once the field already has an error
    pub fn when_clean(mut self) -> Self {
        self.gate = Gate::WhenClean;
        self
    }

    /// Run the check, given whether the field has failed so far
    pub fn evaluate(&self, value: &str, field_has_errors: bool) -> Option<FieldError> {
        if self.gate == Gate::WhenClean && field_has_errors {
            return None;
        }
        if self.check.holds(value) {
            None
        } else {
            Some(FieldError::new(self.kind, self.message.clone()))
        }
    }
}

/// Validates email address syntax
pub fn is_valid_email(email: &str) -> bool {
    if email.starts_with('.') || email.contains("..") {
        return false;
    }
    EMAIL_REGEX.is_match(email)
}

/// Everything after the last `@`, if there is one
pub fn email_domain(email: &str) -> Option<&str> {
    email.rsplit_once('@').map(|(_, domain)| domain)
}
