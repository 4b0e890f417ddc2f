//! Request models for the run cache API
//!
//! Validation of run ids and the merge-patch body accepted by `PATCH /runs/:id`.

use serde_json::{Map, Value};

/// Maximum allowed run id length in bytes
pub const MAX_RUN_ID_LENGTH: usize = 256;

/// Validates a run id taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_run_id(id: &str) -> Option<String> {
    if id.is_empty() {
        return Some("Run id cannot be empty".to_string());
    }
    if id.len() > MAX_RUN_ID_LENGTH {
        return Some(format!(
            "Run id exceeds maximum length of {} bytes",
            MAX_RUN_ID_LENGTH
        ));
    }
    None
}

// == Run Patch ==
/// Body of a `PATCH /runs/:id` request: a JSON object merged into the stored run.
///
/// Merging is shallow: each top-level field replaces the stored field of the
/// same name, and a `null` field removes it. A stored value that is not an
/// object is treated as an empty object.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPatch {
    fields: Map<String, Value>,
}

impl RunPatch {
    /// Accepts any JSON object; other JSON values are rejected with a message.
    pub fn from_value(value: Value) -> std::result::Result<Self, String> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(format!(
                "Patch body must be a JSON object, got {}",
                json_kind(&other)
            )),
        }
    }

    /// Returns `current` with this patch merged in.
    pub fn apply(&self, current: Option<&Value>) -> Value {
        let mut merged = match current {
            Some(Value::Object(fields)) => fields.clone(),
            _ => Map::new(),
        };

        for (name, value) in &self.fields {
            if value.is_null() {
                merged.remove(name);
            } else {
                merged.insert(name.clone(), value.clone());
            }
        }

        Value::Object(merged)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_empty_id() {
        assert!(validate_run_id("").is_some());
    }

    #[test]
    fn test_validate_long_id() {
        let id = "x".repeat(MAX_RUN_ID_LENGTH + 1);
        assert!(validate_run_id(&id).is_some());
        assert!(validate_run_id(&id[1..]).is_none());
    }

    #[test]
    fn test_patch_rejects_non_object() {
        let err = RunPatch::from_value(json!([1, 2])).unwrap_err();
        assert!(err.contains("an array"));
    }

    #[test]
    fn test_patch_merges_into_existing_object() {
        let patch = RunPatch::from_value(json!({"status": "done", "owner": null})).unwrap();
        let current = json!({"status": "running", "owner": "ci", "color": "red"});

        assert_eq!(
            patch.apply(Some(&current)),
            json!({"status": "done", "color": "red"})
        );
    }

    #[test]
    fn test_patch_on_missing_or_scalar_value() {
        let patch = RunPatch::from_value(json!({"status": "queued"})).unwrap();

        assert_eq!(patch.apply(None), json!({"status": "queued"}));
        assert_eq!(patch.apply(Some(&json!(42))), json!({"status": "queued"}));
    }
}
