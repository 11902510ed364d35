// File: src/form_context.rs
// Purpose: Submission state plus the values to echo back into the re-rendered form

use login_form::{Field, FieldError, FormInput, SubmissionState};
use std::collections::HashMap;

/// Everything the page needs to render the form after a submission
#[derive(Debug, Clone, Default)]
pub struct FormContext {
    pub state: SubmissionState,
    /// Submitted text per field; never holds the password
    values: HashMap<Field, String>,
}

impl FormContext {
    /// Blank form, nothing submitted
    pub fn empty() -> Self {
        Self::default()
    }

    /// Context for a settled submission
    pub fn from_submission(state: SubmissionState, input: &FormInput) -> Self {
        let values = Field::ALL
            .into_iter()
            .filter(|field| *field != Field::Password)
            .filter_map(|field| input.text(field).map(|text| (field, text.to_string())))
            .collect();

        Self { state, values }
    }

    pub fn get_value(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(|s| s.as_str())
    }

    pub fn errors(&self, field: Field) -> &[FieldError] {
        self.state.errors_for(field)
    }

    pub fn has_error(&self, field: Field) -> bool {
        !self.errors(field).is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.state.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use login_form::{LoginSchema, SubmissionState};

    #[test]
    fn test_password_is_never_echoed() {
        let input = FormInput::new()
            .with("email", "a@zod.com")
            .with("username", "al")
            .with("password", "short");
        let state = SubmissionState::Idle.submit(&LoginSchema::default(), &input);

        let context = FormContext::from_submission(state, &input);
        assert_eq!(context.get_value(Field::Email), Some("a@zod.com"));
        assert_eq!(context.get_value(Field::Username), Some("al"));
        assert_eq!(context.get_value(Field::Password), None);
        assert!(context.has_error(Field::Password));
        assert!(!context.has_error(Field::Email));
    }

    #[test]
    fn test_empty_form_context() {
        let context = FormContext::empty();
        assert!(!context.is_success());
        assert!(!context.has_error(Field::Email));
        assert!(context.get_value(Field::Username).is_none());
    }
}
