// File: src/page.rs
// Purpose: Maud markup for the login page

use crate::form_context::FormContext;
use login_form::Field;
use maud::{html, Markup, DOCTYPE};

pub const SUCCESS_MESSAGE: &str = "Welcome back!";

/// Full page: heading, the form, and the success message once submitted
pub fn login_page(context: &FormContext) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Log in" }
            }
            body {
                main class="login" {
                    h1 { "Log in" }
                    form method="post" action="/" novalidate {
                        @for field in Field::ALL {
                            (field_input(field, context))
                        }
                        button type="submit" { "Log in" }
                        @if context.is_success() {
                            p class="success" role="status" { (SUCCESS_MESSAGE) }
                        }
                    }
                }
            }
        }
    }
}

/// One labeled input followed by its error list
fn field_input(field: Field, context: &FormContext) -> Markup {
    let id = format!("field-{}", field.name());
    let errors = context.errors(field);

    html! {
        div class="field" {
            label for=(id) { (field.label()) }
            input
                id=(id)
                name=(field.name())
                type=(field.input_type())
                placeholder=(field.placeholder())
                value=[context.get_value(field)]
                aria-invalid=[context.has_error(field).then_some("true")]
                required;
            @if !errors.is_empty() {
                ul class="errors" {
                    @for error in errors {
                        li data-kind=(error.kind.to_string()) { (error.message) }
                    }
                }
            }
        }
    }
}
