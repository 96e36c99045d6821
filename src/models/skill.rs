use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Reads a skill reference out of a stored document. Ids were written both as
/// plain strings and as extended-JSON `{"$oid": "..."}` objects.
pub fn skill_id_of(value: &JsonValue) -> Option<String> {
    let id = match value {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Object(map) => map.get("$oid")?.as_str()?.trim().to_string(),
        _ => return None,
    };
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Numbers stored either as JSON numbers or numeric strings.
pub fn number_of(value: Option<&JsonValue>) -> Option<f64> {
    match value? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn skill_ids_accept_both_shapes() {
        assert_eq!(skill_id_of(&json!(" AbC ")), Some("AbC".to_string()));
        assert_eq!(
            skill_id_of(&json!({"$oid": "65f0c0ffee"})),
            Some("65f0c0ffee".to_string())
        );
        assert_eq!(skill_id_of(&json!("  ")), None);
        assert_eq!(skill_id_of(&json!(42)), None);
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        assert_eq!(number_of(Some(&json!(3))), Some(3.0));
        assert_eq!(number_of(Some(&json!("2.5"))), Some(2.5));
        assert_eq!(number_of(Some(&json!("n/a"))), None);
        assert_eq!(number_of(None), None);
    }
}
