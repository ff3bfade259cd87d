use schoolmis_core::normalize::{Normalize, trim_opt};
use schoolmis_db::StoreSource;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(
        required(message = "\"username\" is required"),
        length(min = 1, message = "\"username\" is not allowed to be empty")
    )]
    #[schema(example = "admin")]
    pub username: Option<String>,
    #[validate(
        required(message = "\"password\" is required"),
        length(
            min = 6,
            message = "\"password\" length must be at least 6 characters long"
        )
    )]
    #[schema(example = "admin123", format = Password)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Credentials after validation has guaranteed both are present.
    pub fn credentials(&self) -> (&str, &str) {
        (
            self.username.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
        )
    }
}

impl Normalize for LoginRequest {
    fn normalize(&mut self) {
        trim_opt(&mut self.username);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    /// Bearer token to send as `Authorization: Bearer <token>`
    pub token: String,
    pub user: AuthenticatedUser,
    /// Backend that matched the credentials
    #[schema(value_type = String, example = "memory")]
    pub source: StoreSource,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

impl Default for LogoutResponse {
    fn default() -> Self {
        Self {
            success: true,
            message: "Successfully logged out".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_rules() {
        let mut request: LoginRequest =
            serde_json::from_str(r#"{"username":"  admin ","password":"admin123"}"#).unwrap();
        request.normalize();
        assert!(request.validate().is_ok());
        assert_eq!(request.credentials(), ("admin", "admin123"));

        let short = LoginRequest {
            username: Some("admin".into()),
            password: Some("12345".into()),
        };
        assert!(short.validate().is_err());
        assert!(LoginRequest::default().validate().is_err());
    }

    #[test]
    fn test_login_response_shape() {
        let response = LoginResponse {
            success: true,
            token: "demo-jwt-token".into(),
            user: AuthenticatedUser {
                username: "admin".into(),
                role: "admin".into(),
            },
            source: StoreSource::Memory,
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "success": true,
                "token": "demo-jwt-token",
                "user": { "username": "admin", "role": "admin" },
                "source": "memory"
            })
        );
    }
}
