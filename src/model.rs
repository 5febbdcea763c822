//! The consultant entity and its request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored consultant. `skills` is an opaque JSONB document.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Consultant {
    pub id: i64,
    pub name: String,
    pub skills: Value,
    pub assigned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload. Presence of `name` is checked by the handler; `skills`
/// only at the storage layer. `assigned` defaults to false when absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewConsultant {
    pub name: Option<String>,
    pub skills: Option<Value>,
    pub assigned: Option<bool>,
}

/// Partial update: only the fields present are written. `skills` is replaced
/// whole, never merged. Unknown keys are dropped during deserialization.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateFields {
    pub name: Option<String>,
    pub skills: Option<Value>,
    pub assigned: Option<bool>,
}

/// Empty in the presence-check sense: null, `""`, `[]`, or `{}`.
pub fn json_is_empty(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(m) => m.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_documents_are_empty() {
        assert!(json_is_empty(&Value::Null));
        assert!(json_is_empty(&json!("")));
        assert!(json_is_empty(&json!([])));
        assert!(json_is_empty(&json!({})));
    }

    #[test]
    fn populated_documents_are_not_empty() {
        assert!(!json_is_empty(&json!(["rust"])));
        assert!(!json_is_empty(&json!({"lang": "rust"})));
        assert!(!json_is_empty(&json!("rust")));
        assert!(!json_is_empty(&json!(0)));
        assert!(!json_is_empty(&json!(false)));
    }
}
