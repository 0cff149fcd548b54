//! Request validation against entity field definitions.

use crate::config::EntitySchema;
use crate::error::AppError;
use crate::store::Fields;
use serde_json::Value;

pub struct RequestValidator;

impl RequestValidator {
    /// Keep only fields the entity declares and coerce scalars to text.
    /// Undeclared fields are dropped; arrays and objects are rejected.
    pub fn sanitize(entity: &EntitySchema, body: Fields) -> Result<Fields, AppError> {
        let mut out = Fields::new();
        for (key, value) in body {
            if entity.field(&key).is_none() {
                tracing::debug!(entity = entity.label, field = %key, "dropping undeclared field");
                continue;
            }
            let value = coerce_text(&key, value)?;
            out.insert(key, value);
        }
        Ok(out)
    }

    /// Validate a full record for creation. All required fields must be present and non-empty.
    pub fn validate(entity: &EntitySchema, fields: &Fields) -> Result<(), AppError> {
        for spec in entity.required_fields() {
            if is_blank(fields.get(spec.name)) {
                return Err(required(entity, spec.name));
            }
        }
        Ok(())
    }

    /// Validate only the fields present in an update. A required field may be omitted
    /// but not cleared. Null is treated as a clear here; `CrudService::update` drops nulls
    /// before calling this.
    pub fn validate_partial(entity: &EntitySchema, patch: &Fields) -> Result<(), AppError> {
        for (key, value) in patch {
            let is_required = entity.field(key).map(|f| f.required).unwrap_or(false);
            if is_required && is_blank(Some(value)) {
                return Err(required(entity, key));
            }
        }
        Ok(())
    }
}

fn required(entity: &EntitySchema, field: &str) -> AppError {
    AppError::Validation(format!("{} validation failed: {} is required", entity.label, field))
}

fn is_blank(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn coerce_text(key: &str, v: Value) -> Result<Value, AppError> {
    match v {
        Value::Null | Value::String(_) => Ok(v),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        Value::Array(_) | Value::Object(_) => {
            Err(AppError::Validation(format!("{} must be a text value", key)))
        }
    }
}
