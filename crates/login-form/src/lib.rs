//! Login form validation
//!
//! Validates the three inputs of the login form (email, username, password)
//! against a declarative schema and reports either success or per-field error
//! lists. Everything here is pure and synchronous: the same input always
//! yields the same [`ValidationResult`].
//!
//! ```
//! use login_form::{Field, FormInput, LoginSchema, SubmissionState};
//!
//! let schema = LoginSchema::default();
//! let input = FormInput::new()
//!     .with("email", "a@zod.com")
//!     .with("username", "al")
//!     .with("password", "password1!");
//!
//! let result = schema.handle_submission(&SubmissionState::Idle, &input);
//! assert!(!result.is_success());
//! assert_eq!(result.errors().unwrap().fields().collect::<Vec<_>>(), vec![Field::Username]);
//! ```

pub mod config;
pub mod constraint;
pub mod field;
pub mod result;
pub mod schema;
pub mod state;

pub use config::{Config, SchemaConfig, ServerConfig};
pub use constraint::{Check, Constraint, ErrorKind, Gate};
pub use field::{Field, FieldValue, FormInput};
pub use result::{FieldError, FieldErrors, FlattenedErrors, FormState, ValidationResult};
pub use schema::{FieldSpec, LoginSchema};
pub use state::{SubmissionEvent, SubmissionState};
