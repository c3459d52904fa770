//! Data transfer objects for HTTP message serialization.

use serde::{Deserialize, Serialize};

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Response from the users listing.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}
