use chrono::{DateTime, Utc};
use schoolmis_db::{Collection, Resource};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A login account. Passwords are stored and compared as plain text.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for User {
    const COLLECTION: Collection = Collection::Users;
}

fn default_role() -> String {
    "admin".to_string()
}

/// Account written by the seeding tools.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: String,
    pub email: Option<String>,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_never_serialises() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "username": "admin",
            "password": "admin123"
        }))
        .unwrap();
        assert_eq!(user.password, "admin123");
        assert_eq!(user.role, "admin");

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
    }
}
