// File: src/schema.rs
// Purpose: The login schema and the stateless submission handler

use crate::config::SchemaConfig;
use crate::constraint::{Check, Constraint, ErrorKind};
use crate::field::{Field, FieldValue, FormInput};
use crate::result::{FieldError, FieldErrors, ValidationResult};
use crate::state::SubmissionState;
use tracing::debug;

/// Rules for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub required_message: String,
    /// Replaces the default "Expected string, received <type>" message
    pub invalid_type_message: Option<String>,
    /// Evaluated in order on the trimmed value
    pub constraints: Vec<Constraint>,
}

impl FieldSpec {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            required_message: format!("{} is required.", field.label()),
            invalid_type_message: None,
            constraints: Vec::new(),
        }
    }

    pub fn invalid_type_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_type_message = Some(message.into());
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// All errors for one raw value.
    ///
    /// Absence and wrong type short-circuit: they are reported alone and no
    /// format constraint runs.
    pub fn check(&self, value: &FieldValue) -> Vec<FieldError> {
        let text = match value {
            FieldValue::Absent => {
                return vec![FieldError::new(ErrorKind::Required, &self.required_message)]
            }
            FieldValue::NonText(received) => {
                let message = self
                    .invalid_type_message
                    .clone()
                    .unwrap_or_else(|| format!("Expected string, received {}", received));
                return vec![FieldError::new(ErrorKind::InvalidType, message)];
            }
            FieldValue::Text(text) => text.trim(),
        };

        let mut errors = Vec::new();
        for constraint in &self.constraints {
            if let Some(error) = constraint.evaluate(text, !errors.is_empty()) {
                errors.push(error);
            }
        }
        errors
    }
}

/// Validation schema for the email/username/password form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSchema {
    email: FieldSpec,
    username: FieldSpec,
    password: FieldSpec,
}

impl LoginSchema {
    pub fn new(config: &SchemaConfig) -> Self {
        let email = FieldSpec::new(Field::Email)
            .constraint(Constraint::new(
                ErrorKind::InvalidFormat,
                Check::EmailSyntax,
                "Please enter a valid email address.",
            ))
            .constraint(
                Constraint::new(
                    ErrorKind::DomainNotAllowed,
                    Check::DomainEquals(config.allowed_domain.clone()),
                    format!("Only @{} email addresses are allowed.", config.allowed_domain),
                )
                .when_clean(),
            );

        let username = FieldSpec::new(Field::Username)
            .invalid_type_message("Username must be a string.")
            .constraint(Constraint::new(
                ErrorKind::TooShort,
                Check::MinLength(config.username_min_length),
                format!(
                    "Username should be at least {} characters long.",
                    config.username_min_length
                ),
            ));

        let password = FieldSpec::new(Field::Password)
            .constraint(Constraint::new(
                ErrorKind::TooShort,
                Check::MinLength(config.password_min_length),
                format!(
                    "Password should be at least {} characters long.",
                    config.password_min_length
                ),
            ))
            .constraint(Constraint::new(
                ErrorKind::MissingDigit,
                Check::ContainsDigit,
                "Password should contain at least one number (0-9).",
            ));

        Self {
            email,
            username,
            password,
        }
    }

    pub fn spec(&self, field: Field) -> &FieldSpec {
        match field {
            Field::Email => &self.email,
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }

    /// Errors for a single field, in constraint order
    pub fn validate_field(&self, field: Field, value: &FieldValue) -> Vec<FieldError> {
        self.spec(field).check(value)
    }

    /// Validate the three raw values. Never fails; every violation is data.
    pub fn validate(
        &self,
        email: &FieldValue,
        username: &FieldValue,
        password: &FieldValue,
    ) -> ValidationResult {
        let mut errors = FieldErrors::new();
        for (field, value) in [
            (Field::Email, email),
            (Field::Username, username),
            (Field::Password, password),
        ] {
            errors.insert(field, self.validate_field(field, value));
        }

        if errors.is_empty() {
            debug!("login form valid");
        } else {
            let summary: Vec<String> = errors
                .iter()
                .map(|(field, errs)| {
                    let kinds: Vec<String> = errs.iter().map(|e| e.kind.to_string()).collect();
                    format!("{}=[{}]", field, kinds.join(","))
                })
                .collect();
            debug!(errors = %summary.join(" "), "login form invalid");
        }

        ValidationResult::from_errors(errors)
    }

    /// Run one submission. `previous` is accepted for stateful callers and
    /// has no effect on the result; unknown keys in `input` are ignored.
    pub fn handle_submission(
        &self,
        _previous: &SubmissionState,
        input: &FormInput,
    ) -> ValidationResult {
        self.validate(
            input.get(Field::Email),
            input.get(Field::Username),
            input.get(Field::Password),
        )
    }
}

impl Default for LoginSchema {
    fn default() -> Self {
        Self::new(&SchemaConfig::default())
    }
}
