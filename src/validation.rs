//! Input validation for new projects.
//!
//! Untrusted JSON is checked field by field and turned into a
//! [`ProjectCreate`]. Every offending field is reported, not just the first.

use lettre::Address;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::ProjectCreate;

/// One field-level problem, shaped as `{loc, msg, type}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    fn body(msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    fn field(field: &str, msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    /// Error for a request that carries no body at all
    pub fn missing_body() -> Self {
        Self::body("Field required", "missing")
    }

    /// Error for a request body that could not be read as JSON at all
    pub fn invalid_json(msg: impl Into<String>) -> Self {
        Self::body(msg, "json_invalid")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for {} field(s)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl From<FieldError> for ValidationError {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl ValidationError {
    /// Names of the offending fields, `body` for whole-body errors
    pub fn fields(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|e| e.loc.last().map(String::as_str))
            .collect()
    }
}

/// Check the syntax of an email address.
///
/// The address must parse as `local@domain`. The domain must be a dotted
/// host name: no bracketed IP literal, no underscore, no empty label, and a
/// top-level label that is not all digits. Nothing is resolved or contacted.
pub fn validate_email(raw: &str) -> Result<(), String> {
    let address: Address = raw.parse().map_err(|e: lettre::address::AddressError| e.to_string())?;

    let domain = address.domain();
    if domain.starts_with('[') {
        return Err("a bracketed IP address is not allowed after the @-sign".to_string());
    }
    if !domain.contains('.') {
        return Err("the part after the @-sign must contain a period".to_string());
    }
    if domain.contains('_') {
        return Err("the part after the @-sign contains an invalid character: '_'".to_string());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.iter().any(|label| label.is_empty()) {
        return Err("the part after the @-sign has an empty label".to_string());
    }
    if labels
        .last()
        .is_some_and(|tld| tld.chars().all(|c| c.is_ascii_digit()))
    {
        return Err("the part after the @-sign is not valid: it may not end with a number".to_string());
    }

    Ok(())
}

fn required_string(
    object: &serde_json::Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::field(field, "Field required", "missing"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::field(
                field,
                "Input should be a valid string",
                "string_type",
            ));
            None
        }
    }
}

impl ProjectCreate {
    /// Parse and validate a raw request body
    pub fn from_body(bytes: &[u8]) -> Result<Self, ValidationError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(FieldError::missing_body().into());
        }

        let value: Value = serde_json::from_slice(bytes)
            .map_err(|err| FieldError::invalid_json(format!("JSON decode error: {err}")))?;

        Self::from_json(&value)
    }

    /// Validate an untrusted JSON body
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let Some(object) = value.as_object() else {
            return Err(FieldError::body(
                "Input should be a valid dictionary or object to extract fields from",
                "model_attributes_type",
            )
            .into());
        };

        let mut errors = Vec::new();
        let name = required_string(object, "name", &mut errors);
        let owner = required_string(object, "owner", &mut errors);
        let location = required_string(object, "location", &mut errors);
        let sector = required_string(object, "sector", &mut errors);
        let email = required_string(object, "email", &mut errors);

        if let Some(email) = &email {
            if let Err(reason) = validate_email(email) {
                errors.push(FieldError::field(
                    "email",
                    format!("value is not a valid email address: {reason}"),
                    "value_error",
                ));
            }
        }

        match (name, owner, location, sector, email) {
            (Some(name), Some(owner), Some(location), Some(sector), Some(email))
                if errors.is_empty() =>
            {
                Ok(Self {
                    name,
                    owner,
                    location,
                    sector,
                    email,
                })
            }
            _ => Err(ValidationError { errors }),
        }
    }
}
