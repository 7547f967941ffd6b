//! Request DTOs for the users API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for Create (POST /v1/users) and Update (PUT /v1/users/:id).
///
/// # Fields
/// - `name`: the user's display name; must be non-empty
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    /// The user's display name
    pub name: String,
}

impl UserPayload {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if self.name.len() > 256 {
            return Some("Name exceeds maximum length of 256 characters".to_string());
        }
        None
    }
}
