use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};
use crate::errors::AppError;

/// A scalar body field as clients send it: form bodies carry text, JSON
/// bodies may carry numbers or booleans as well.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Empty text, zero and `false` count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Bool(value) => *value,
            FieldValue::Integer(value) => *value != 0,
            FieldValue::Float(value) => *value != 0.0 && !value.is_nan(),
            FieldValue::Text(value) => !value.is_empty(),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::Integer(value) => value.to_string(),
            FieldValue::Float(value) => value.to_string(),
            FieldValue::Text(value) => value.clone(),
        }
    }

    /// Whole number of minutes, if the value reads as one.
    pub fn to_minutes(&self) -> Option<i64> {
        let number = match self {
            FieldValue::Integer(value) => return Some(*value),
            FieldValue::Float(value) => *value,
            FieldValue::Text(value) => value.trim().parse::<f64>().ok()?,
            FieldValue::Bool(_) => return None,
        };
        if number.is_finite() && number.fract() == 0.0 && number.abs() <= i64::MAX as f64 {
            Some(number as i64)
        } else {
            None
        }
    }
}

/// Returns the field if it is present in the truthy sense of `FieldValue::is_present`.
pub fn present(field: Option<&FieldValue>) -> Option<&FieldValue> {
    field.filter(|value| value.is_present())
}

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate()
        .map_err(|err| AppError::BadRequest(first_message(&err)))
}

// Clients expect the bare message, not the field-prefixed validator rendering.
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .find_map(|error| error.message.as_ref().map(|message| message.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
