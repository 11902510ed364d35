// File: src/app.rs
// Purpose: Routes and handlers for the login page

use crate::form_context::FormContext;
use crate::page::login_page;
use axum::{
    extract::{Form, State},
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use login_form::{FormInput, FormState, LoginSchema, SubmissionState};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    schema: Arc<LoginSchema>,
}

impl AppState {
    pub fn new(schema: LoginSchema) -> Self {
        Self {
            schema: Arc::new(schema),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/api/submit", post(submit_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - blank form
async fn show_form() -> Html<String> {
    Html(login_page(&FormContext::empty()).into_string())
}

/// POST / - validate a browser form post and re-render the page
async fn submit_form(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Html<String> {
    let input = FormInput::from_fields(fields);
    let submission = run(&state, &input);
    let context = FormContext::from_submission(submission, &input);
    Html(login_page(&context).into_string())
}

/// POST /api/submit - validate a JSON body and return the form state
async fn submit_json(
    State(state): State<AppState>,
    Json(body): Json<JsonValue>,
) -> Json<FormState> {
    let input = FormInput::from_json(body);
    let result = state
        .schema
        .handle_submission(&SubmissionState::Idle, &input);
    Json(result.to_form_state())
}

fn run(state: &AppState, input: &FormInput) -> SubmissionState {
    let extra = input.extra_keys();
    if !extra.is_empty() {
        info!(keys = ?extra, "ignoring unknown form keys");
    }

    let submission = SubmissionState::Idle.submit(&state.schema, input);
    info!(outcome = submission.name(), "login form submitted");
    submission
}
