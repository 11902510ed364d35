// File: src/state.rs
// Purpose: Submission state machine driven by the presentation layer

use crate::field::{Field, FormInput};
use crate::result::{FieldError, FieldErrors, FormState, ValidationResult};
use crate::schema::LoginSchema;
use tracing::debug;

/// Where a single form is in its submit cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Submitted; result not yet incorporated
    Pending,
    Succeeded,
    Failed(FieldErrors),
}

/// Input to [`SubmissionState::transition`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// The user submitted the form
    Submit,
    /// The handler returned
    Resolved(ValidationResult),
    /// Back to a blank form
    Reset,
}

impl SubmissionState {
    /// Apply one event.
    ///
    /// A second `Submit` while pending and a `Resolved` outside pending are
    /// dropped, leaving the state unchanged.
    pub fn transition(self, event: SubmissionEvent) -> SubmissionState {
        match (self, event) {
            (_, SubmissionEvent::Reset) => SubmissionState::Idle,
            (SubmissionState::Pending, SubmissionEvent::Submit) => {
                debug!("submit ignored: submission already pending");
                SubmissionState::Pending
            }
            (_, SubmissionEvent::Submit) => SubmissionState::Pending,
            (SubmissionState::Pending, SubmissionEvent::Resolved(result)) => match result {
                ValidationResult::Success => SubmissionState::Succeeded,
                ValidationResult::Failure(errors) => SubmissionState::Failed(errors),
            },
            (state, SubmissionEvent::Resolved(_)) => {
                debug!(state = state.name(), "stale result ignored");
                state
            }
        }
    }

    /// Submit, run the handler, and incorporate its result
    pub fn submit(self, schema: &LoginSchema, input: &FormInput) -> SubmissionState {
        let pending = self.transition(SubmissionEvent::Submit);
        let result = schema.handle_submission(&pending, input);
        pending.transition(SubmissionEvent::Resolved(result))
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Pending => "pending",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed(_) => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionState::Succeeded)
    }

    /// Errors to show under a field; empty unless `Failed`
    pub fn errors_for(&self, field: Field) -> &[FieldError] {
        match self {
            SubmissionState::Failed(errors) => errors.get(field),
            _ => &[],
        }
    }

    /// Serialized view of a settled submission; `None` before one settles
    pub fn to_form_state(&self) -> Option<FormState> {
        match self {
            SubmissionState::Idle | SubmissionState::Pending => None,
            SubmissionState::Succeeded => Some(ValidationResult::Success.to_form_state()),
            SubmissionState::Failed(errors) => {
                Some(ValidationResult::Failure(errors.clone()).to_form_state())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::ErrorKind;

    fn failure() -> ValidationResult {
        let mut errors = FieldErrors::new();
        errors.insert(
            Field::Email,
            vec![FieldError::new(ErrorKind::Required, "Email is required.")],
        );
        ValidationResult::Failure(errors)
    }

    #[test]
    fn test_submit_then_resolve() {
        let state = SubmissionState::Idle.transition(SubmissionEvent::Submit);
        assert!(state.is_pending());

        let state = state.transition(SubmissionEvent::Resolved(ValidationResult::Success));
        assert!(state.is_success());
    }

    #[test]
    fn test_failure_carries_errors() {
        let state = SubmissionState::Pending.transition(SubmissionEvent::Resolved(failure()));
        assert_eq!(state.errors_for(Field::Email).len(), 1);
        assert!(state.errors_for(Field::Password).is_empty());
    }

    #[test]
    fn test_duplicate_submit_stays_pending() {
        let state = SubmissionState::Pending.transition(SubmissionEvent::Submit);
        assert_eq!(state, SubmissionState::Pending);
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let state = SubmissionState::Idle.transition(SubmissionEvent::Resolved(failure()));
        assert_eq!(state, SubmissionState::Idle);

        let state = SubmissionState::Succeeded.transition(SubmissionEvent::Resolved(failure()));
        assert_eq!(state, SubmissionState::Succeeded);
    }

    #[test]
    fn test_resubmit_after_failure() {
        let failed = SubmissionState::Pending.transition(SubmissionEvent::Resolved(failure()));
        let state = failed.transition(SubmissionEvent::Submit);
        assert_eq!(state, SubmissionState::Pending);
    }

    #[test]
    fn test_reset_from_any_state() {
        for state in [
            SubmissionState::Idle,
            SubmissionState::Pending,
            SubmissionState::Succeeded,
            SubmissionState::Pending.transition(SubmissionEvent::Resolved(failure())),
        ] {
            assert_eq!(state.transition(SubmissionEvent::Reset), SubmissionState::Idle);
        }
    }

    #[test]
    fn test_submit_drives_full_cycle() {
        let schema = LoginSchema::default();
        let input = FormInput::new()
            .with("email", "a@zod.com")
            .with("username", "alice")
            .with("password", "password1!");

        let state = SubmissionState::Idle.submit(&schema, &input);
        assert!(state.is_success());

        let state = state.submit(&schema, &FormInput::new());
        assert_eq!(state.name(), "failed");
        assert_eq!(state.errors_for(Field::Username)[0].kind, ErrorKind::Required);
    }

    #[test]
    fn test_form_state_only_when_settled() {
        assert!(SubmissionState::Idle.to_form_state().is_none());
        assert!(SubmissionState::Pending.to_form_state().is_none());
        let state = SubmissionState::Succeeded.to_form_state().unwrap();
        assert!(state.is_success);
    }
}
