use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a recipe. Append-only; displayed newest-first.
///
/// Wire names match the store's `comments` collection. The document id is
/// assigned by the store and injected after read/write, so it is not part
/// of the serialized payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(skip)]
    pub id: String,
    pub recipe_id: String,
    /// Author display label captured at post time
    pub user: String,
    pub user_id: String,
    #[serde(rename = "comment")]
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl Comment {
    /// Maximum comment body length, enforced on write. The UI enforces the
    /// same bound in its form.
    pub const MAX_LEN: usize = 500;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Comment {
        Comment {
            id: "c1".to_string(),
            recipe_id: "52772".to_string(),
            user: "Alex".to_string(),
            user_id: "u1".to_string(),
            body: "Loved it".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["recipeId"], "52772");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["comment"], "Loved it");
        assert_eq!(json["user"], "Alex");
        // Store assigns the document id; it never travels in the payload.
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_roundtrip_without_id() {
        let json = serde_json::to_value(sample()).unwrap();
        let back: Comment = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, "");
        assert_eq!(back.body, "Loved it");
        assert_eq!(back.timestamp, sample().timestamp);
    }
}
