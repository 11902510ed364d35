// File: src/result.rs
// Purpose: Validation outcome and its serialized response shape

use crate::constraint::ErrorKind;
use crate::field::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One violated constraint on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Per-field error lists, ordered by [`Field`].
///
/// A field is only ever present with at least one error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, Vec<FieldError>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the errors for a field. An empty list is ignored.
    pub fn insert(&mut self, field: Field, errors: Vec<FieldError>) {
        if !errors.is_empty() {
            self.errors.insert(field, errors);
        }
    }

    pub fn get(&self, field: Field) -> &[FieldError] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn kinds(&self, field: Field) -> Vec<ErrorKind> {
        self.get(field).iter().map(|e| e.kind).collect()
    }

    pub fn messages(&self, field: Field) -> Vec<&str> {
        self.get(field).iter().map(|e| e.message.as_str()).collect()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Fields with errors, in display order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &[FieldError])> + '_ {
        self.errors.iter().map(|(field, errors)| (*field, errors.as_slice()))
    }

    /// Number of fields with errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message-only view keyed by field name
    pub fn flatten(&self) -> FlattenedErrors {
        let field_errors = self
            .iter()
            .map(|(field, errors)| {
                let messages = errors.iter().map(|e| e.message.clone()).collect();
                (field.name().to_string(), messages)
            })
            .collect();

        FlattenedErrors {
            form_errors: Vec::new(),
            field_errors,
        }
    }
}

/// Outcome of one validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Success,
    Failure(FieldErrors),
}

impl ValidationResult {
    /// `Success` when no field has errors
    pub fn from_errors(errors: FieldErrors) -> Self {
        if errors.is_empty() {
            ValidationResult::Success
        } else {
            ValidationResult::Failure(errors)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResult::Success)
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            ValidationResult::Success => None,
            ValidationResult::Failure(errors) => Some(errors),
        }
    }

    /// Error kinds for a field; empty on success
    pub fn kinds(&self, field: Field) -> Vec<ErrorKind> {
        self.errors().map(|e| e.kinds(field)).unwrap_or_default()
    }

    pub fn to_form_state(&self) -> FormState {
        match self {
            ValidationResult::Success => FormState {
                is_success: true,
                error: None,
            },
            ValidationResult::Failure(errors) => FormState {
                is_success: false,
                error: Some(errors.flatten()),
            },
        }
    }
}

/// Errors flattened to messages, split into form-level and per-field lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

/// Response body for a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub is_success: bool,
    pub error: Option<FlattenedErrors>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn password_errors() -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.insert(
            Field::Password,
            vec![
                FieldError::new(ErrorKind::TooShort, "too short"),
                FieldError::new(ErrorKind::MissingDigit, "no digit"),
            ],
        );
        errors
    }

    #[test]
    fn test_empty_lists_are_not_stored() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Email, Vec::new());
        assert!(errors.is_empty());
        assert!(!errors.contains(Field::Email));
        assert_eq!(ValidationResult::from_errors(errors), ValidationResult::Success);
    }

    #[test]
    fn test_kinds_preserve_order() {
        let result = ValidationResult::from_errors(password_errors());
        assert_eq!(
            result.kinds(Field::Password),
            vec![ErrorKind::TooShort, ErrorKind::MissingDigit]
        );
        assert!(result.kinds(Field::Email).is_empty());
    }

    #[test]
    fn test_form_state_json_shape() {
        let state = ValidationResult::from_errors(password_errors()).to_form_state();
        let value = serde_json::to_value(&state).unwrap();

        assert_eq!(
            value,
            json!({
                "isSuccess": false,
                "error": {
                    "formErrors": [],
                    "fieldErrors": { "password": ["too short", "no digit"] }
                }
            })
        );
    }

    #[test]
    fn test_success_form_state_json_shape() {
        let value = serde_json::to_value(ValidationResult::Success.to_form_state()).unwrap();
        assert_eq!(value, json!({ "isSuccess": true, "error": null }));
    }
}
