//! User Record
//!
//! The domain entity owned by the backing store. Identity is assigned by the
//! store on insert, never by this service.

use serde::{Deserialize, Serialize};

/// A user record as stored and served.
///
/// Serialized as a flat JSON object `{"id": integer, "name": string}`;
/// field order is irrelevant, field names are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Store-assigned identifier
    pub id: i64,
    /// Display name
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialize_round_trip() {
        let user = User {
            id: 1,
            name: "Ada".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"name\":\"Ada\""));

        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_user_deserialize_field_order_irrelevant() {
        let user: User = serde_json::from_str(r#"{"name":"Ada","id":2}"#).unwrap();
        assert_eq!(user.id, 2);
        assert_eq!(user.name, "Ada");
    }
}
