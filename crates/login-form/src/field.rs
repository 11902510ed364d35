// File: src/field.rs
// Purpose: The three form fields and the raw values submitted for them

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;

/// One of the three inputs on the login form.
///
/// Declaration order is the order fields are rendered and reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Username,
    Password,
}

impl Field {
    /// All fields, in display order
    pub const ALL: [Field; 3] = [Field::Email, Field::Username, Field::Password];

    /// Name used as the form key and in serialized error maps
    pub fn name(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Username => "username",
            Field::Password => "password",
        }
    }

    /// Human-readable label, also the prefix of every error message
    pub fn label(self) -> &'static str {
        match self {
            Field::Email => "Email",
            Field::Username => "Username",
            Field::Password => "Password",
        }
    }

    pub fn placeholder(self) -> &'static str {
        self.label()
    }

    /// HTML `type` attribute for the rendered input
    pub fn input_type(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Username => "text",
            Field::Password => "password",
        }
    }

    /// Parse a form key. Matching is exact.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw value submitted for a single key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Key not present in the submission
    Absent,
    /// A string value, untrimmed
    Text(String),
    /// Present but not a string; carries the JSON type name
    NonText(&'static str),
}

static ABSENT: FieldValue = FieldValue::Absent;

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Classify a JSON value. Only JSON strings become `Text`.
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::String(s) => FieldValue::Text(s),
            JsonValue::Null => FieldValue::NonText("null"),
            JsonValue::Bool(_) => FieldValue::NonText("boolean"),
            JsonValue::Number(_) => FieldValue::NonText("number"),
            JsonValue::Array(_) => FieldValue::NonText("array"),
            JsonValue::Object(_) => FieldValue::NonText("object"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Absent)
    }
}

/// Everything a single submission carried, keyed by form name.
///
/// Unknown keys are kept so callers can inspect them, but validation only
/// ever reads the three known fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    values: HashMap<String, FieldValue>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded `application/x-www-form-urlencoded` pairs
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        let values = fields
            .into_iter()
            .map(|(key, value)| (key, FieldValue::Text(value)))
            .collect();
        Self { values }
    }

    /// Build from a JSON body. Anything other than an object yields an empty input.
    pub fn from_json(json: JsonValue) -> Self {
        match json {
            JsonValue::Object(map) => {
                let values = map
                    .into_iter()
                    .map(|(key, value)| (key, FieldValue::from_json(value)))
                    .collect();
                Self { values }
            }
            _ => Self::default(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Value submitted for a known field, or `Absent`
    pub fn get(&self, field: Field) -> &FieldValue {
        self.values.get(field.name()).unwrap_or(&ABSENT)
    }

    /// Submitted text for a field, if it was a string
    pub fn text(&self, field: Field) -> Option<&str> {
        self.get(field).as_text()
    }

    /// Keys that do not name a form field
    pub fn extra_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .values
            .keys()
            .map(String::as_str)
            .filter(|key| Field::from_name(key).is_none())
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
