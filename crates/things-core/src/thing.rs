//! The managed resource.

use serde::{Deserialize, Serialize};

/// A persisted Thing.
///
/// Timestamps are kept in the textual form the store returns them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thing {
    /// Canonical textual UUID; immutable once assigned.
    pub id: String,
    /// Trimmed, non-empty name.
    pub name: String,
    /// Non-empty description, or `None`.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last-update timestamp.
    pub updated_at: String,
    /// Creator identity.
    pub created_by: String,
    /// Last-updater identity.
    pub updated_by: String,
}

/// Payload of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    /// Identifier of the deleted Thing.
    pub id: String,
    /// Always `true`.
    pub deleted: bool,
}

impl DeleteResult {
    /// Creates the payload for a deleted identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thing_wire_names() {
        let thing = Thing {
            id: "1".to_string(),
            name: "n".to_string(),
            description: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            created_by: "system".to_string(),
            updated_by: "system".to_string(),
        };

        let json = serde_json::to_value(&thing).unwrap();
        assert!(json["description"].is_null());
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(json["updatedBy"], "system");
    }

    #[test]
    fn test_delete_result() {
        let json = serde_json::to_value(DeleteResult::new("abc")).unwrap();
        assert_eq!(json, serde_json::json!({"id": "abc", "deleted": true}));
    }
}
