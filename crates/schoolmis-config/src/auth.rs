use std::env;

/// The one credential pair accepted when no document store user matches.
#[derive(Clone, Debug)]
pub struct FallbackAccount {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Issued when the fallback account authenticates.
    pub memory_token: String,
    /// Issued when a document store user authenticates.
    pub store_token: String,
    pub fallback: FallbackAccount,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            memory_token: env::var("DEMO_TOKEN").unwrap_or(defaults.memory_token),
            store_token: env::var("STORE_TOKEN").unwrap_or(defaults.store_token),
            fallback: FallbackAccount {
                username: env::var("FALLBACK_ADMIN_USERNAME")
                    .unwrap_or(defaults.fallback.username),
                password: env::var("FALLBACK_ADMIN_PASSWORD")
                    .unwrap_or(defaults.fallback.password),
                role: defaults.fallback.role,
            },
        }
    }

    /// Constant-value comparison against the two known tokens.
    pub fn accepts(&self, token: &str) -> bool {
        token == self.memory_token || token == self.store_token
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            memory_token: "demo-jwt-token".to_string(),
            store_token: "real-jwt-token-from-db".to_string(),
            fallback: FallbackAccount {
                username: "admin".to_string(),
                password: "admin123".to_string(),
                role: "admin".to_string(),
            },
        }
    }
}
