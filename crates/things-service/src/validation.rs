//! Request parsing and validation.
//!
//! Validation never stops at the first problem: every field is checked and
//! all messages are returned together, in field order.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use things_core::{ApiEvent, ThingError, ValidationErrors};

/// Canonical textual UUID: 8-4-4-4-12 hex groups, any case.
pub const THING_ID_PATTERN: &str =
    r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";

static THING_ID_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

/// Returns true if `id` is a canonical textual UUID.
///
/// Fails closed: if the pattern could not be compiled, nothing matches.
///
/// # Example
///
/// ```
/// use things_service::validation::is_valid_thing_id;
///
/// assert!(is_valid_thing_id("550E8400-e29b-41d4-a716-446655440000"));
/// assert!(!is_valid_thing_id("550e8400e29b41d4a716446655440000"));
/// ```
pub fn is_valid_thing_id(id: &str) -> bool {
    THING_ID_REGEX
        .get_or_init(|| Regex::new(THING_ID_PATTERN).ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(id))
}

/// Checks a path identifier, returning it on success.
pub fn require_thing_id(id: Option<&str>) -> Result<&str, ThingError> {
    let id = id.ok_or(ThingError::MissingId)?;
    if is_valid_thing_id(id) {
        Ok(id)
    } else {
        Err(ThingError::invalid_id(id))
    }
}

/// Parses the event body as JSON.
///
/// An absent or empty body parses as `{}`.
pub fn parse_body(event: &ApiEvent) -> Result<Value, ThingError> {
    let text = event
        .body_text()
        .map_err(|e| ThingError::invalid_json(e.to_string()))?;

    serde_json::from_str(text.as_deref().unwrap_or("{}")).map_err(|e| ThingError::invalid_json(e.to_string()))
}

/// Validated input of the create operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateThingInput {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Description, `None` when absent or empty.
    pub description: Option<String>,
}

/// Validated input of the update operation.
///
/// `description` distinguishes "not supplied" (`None`) from "clear it"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateThingInput {
    /// Trimmed, non-empty name, if supplied.
    pub name: Option<String>,
    /// New description, if supplied.
    pub description: Option<Option<String>>,
}

impl UpdateThingInput {
    /// Returns true if no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Validates a create body.
///
/// # Example
///
/// ```
/// use things_service::validation::validate_create;
///
/// let input = validate_create(&serde_json::json!({"name": "  lamp  ", "description": ""})).unwrap();
/// assert_eq!(input.name, "lamp");
/// assert_eq!(input.description, None);
///
/// let errors = validate_create(&serde_json::json!({"description": 1})).unwrap_err();
/// assert_eq!(errors.messages(), ["Name is required", "Description must be a string"]);
/// ```
pub fn validate_create(body: &Value) -> Result<CreateThingInput, ValidationErrors> {
    let object = as_object(body)?;
    let mut errors = ValidationErrors::new();

    let name = match object.get("name") {
        None | Some(Value::Null) => {
            errors.push("Name is required");
            None
        }
        Some(Value::String(name)) if name.trim().is_empty() => {
            errors.push("Name is required");
            None
        }
        Some(Value::String(name)) => Some(name.trim().to_string()),
        Some(_) => {
            errors.push("Name must be a string");
            None
        }
    };

    let description = match object.get("description") {
        None => None,
        Some(Value::Null) => {
            errors.push("Description cannot be null");
            None
        }
        Some(Value::String(description)) => non_empty(description),
        Some(_) => {
            errors.push("Description must be a string");
            None
        }
    };

    match name {
        Some(name) if errors.is_empty() => Ok(CreateThingInput { name, description }),
        _ => Err(errors),
    }
}

/// Validates an update body.
///
/// An empty object is valid here; the caller decides whether nothing to
/// update is an error.
pub fn validate_update(body: &Value) -> Result<UpdateThingInput, ValidationErrors> {
    let object = as_object(body)?;
    let mut errors = ValidationErrors::new();

    let name = match object.get("name") {
        None => None,
        Some(Value::Null) => {
            errors.push("Name cannot be null");
            None
        }
        Some(Value::String(name)) if name.trim().is_empty() => {
            errors.push("Name cannot be empty");
            None
        }
        Some(Value::String(name)) => Some(name.trim().to_string()),
        Some(_) => {
            errors.push("Name must be a string");
            None
        }
    };

    let description = match object.get("description") {
        None => None,
        Some(Value::Null) => Some(None),
        Some(Value::String(description)) => Some(non_empty(description)),
        Some(_) => {
            errors.push("Description must be a string");
            None
        }
    };

    errors.into_result(UpdateThingInput { name, description })
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    body.as_object()
        .ok_or_else(|| ["Request body must be a JSON object"].into_iter().collect())
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
