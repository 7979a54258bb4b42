//! Request payload validation.
//!
//! Payloads derive [`validator::Validate`]. Failures are rendered as
//! `{"message": <first error>, "errors": {"field": ["..."]}}` with status 422. Rules
//! declared without a `message` get one built from the rule's code and parameters.
//!
//! Struct-level (`schema`) errors are filed under their code, which names the field
//! they concern.

use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
pub use validator::Validate;
use validator::{ValidationError, ValidationErrorsKind};

/// Key the `validator` crate uses for struct-level errors.
const SCHEMA_KEY: &str = "__all__";

/// Field-level validation errors, in field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    /// Shorthand for a single failing field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    /// The message shown at the top level of the error body.
    pub fn first_message(&self) -> Option<&str> {
        self.0.values().flatten().next().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn collect(&mut self, prefix: &str, errors: &validator::ValidationErrors) {
        for (field, kind) in errors.errors() {
            let key = if prefix.is_empty() {
                field.to_string()
            } else {
                format!("{prefix}.{field}")
            };
            match kind {
                ValidationErrorsKind::Field(list) if field == SCHEMA_KEY => {
                    for error in list {
                        let key = if prefix.is_empty() {
                            error.code.to_string()
                        } else {
                            format!("{prefix}.{}", error.code)
                        };
                        self.add(&key, render(&key, error));
                    }
                }
                ValidationErrorsKind::Field(list) => {
                    for error in list {
                        self.add(&key, render(&key, error));
                    }
                }
                ValidationErrorsKind::Struct(inner) => self.collect(&key, inner),
                ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        self.collect(&format!("{key}.{index}"), inner);
                    }
                }
            }
        }
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected = Self::default();
        collected.collect("", &errors);
        collected
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.first_message().unwrap_or("The given data was invalid."))
    }
}

impl std::error::Error for ValidationErrors {}

/// "items.0.postal_code" -> "postal code"
fn human(key: &str) -> String {
    key.rsplit('.').next().unwrap_or(key).replace('_', " ")
}

/// Renders a number parameter without a trailing `.0`.
fn number(value: &Value) -> String {
    match value.as_f64() {
        Some(n) => n.to_string(),
        None => value.to_string(),
    }
}

fn render(key: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    let field = human(key);
    let param = |name: &str| error.params.get(name).map(number);
    match error.code.as_ref() {
        "required" => format!("The {field} field is required."),
        "email" => format!("The {field} must be a valid email address."),
        "length" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("The {field} must be between {min} and {max} characters."),
            (Some(min), None) => format!("The {field} must be at least {min} characters."),
            (None, Some(max)) => format!("The {field} may not be greater than {max} characters."),
            (None, None) => format!("The {field} has an invalid length."),
        },
        "range" => match (param("min"), param("max"), param("exclusive_min")) {
            (Some(min), Some(max), _) => format!("The {field} must be between {min} and {max}."),
            (Some(min), None, _) => format!("The {field} must be at least {min}."),
            (None, Some(max), _) => format!("The {field} may not be greater than {max}."),
            (None, None, Some(min)) => format!("The {field} must be greater than {min}."),
            (None, None, None) => format!("The {field} is out of range."),
        },
        _ => format!("The {field} is invalid."),
    }
}

pub(crate) fn with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// A slug must already be in canonical form and must not look like an id, since
/// `/{id|slug}` routes read all-digit keys as ids.
pub fn usable_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() || slug.bytes().all(|b| b.is_ascii_digit()) {
        return Err(with_message("slug", "The slug must contain at least one letter."));
    }
    if crate::model::slugify(slug) != slug {
        return Err(with_message(
            "slug",
            "The slug may only contain lowercase letters, numbers and dashes.",
        ));
    }
    Ok(())
}

/// Checks the slug a create payload will end up with: the given one, or the one
/// derived from `name`.
pub fn creatable_slug(name: &str, slug: Option<&str>) -> Result<(), ValidationError> {
    let checked = usable_slug(&crate::model::effective_slug(slug, name));
    if slug.is_some_and(|s| !s.is_empty()) {
        return checked;
    }
    checked.map_err(|_| {
        with_message(
            "slug",
            "A slug could not be derived from the name; provide one.",
        )
    })
}
