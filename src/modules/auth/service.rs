use schoolmis_config::AuthConfig;
use schoolmis_core::AppError;
use schoolmis_db::{DocumentStore, Filter, MemoryStore, Repository, StoreSource};
use schoolmis_models::auth::{AuthenticatedUser, LoginResponse};
use schoolmis_models::users::User;
use tracing::{info, instrument, warn};

use crate::metrics::track_login;
use crate::utils::store_error;

pub struct AuthService;

impl AuthService {
    /// Checks the document store's users first when it is the active store,
    /// then the in-memory fallback account. The token returned tells which
    /// of the two matched.
    #[instrument(skip(store, memory, config, password))]
    pub async fn login(
        store: &dyn DocumentStore,
        memory: &MemoryStore,
        config: &AuthConfig,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, AppError> {
        let credentials = Filter::new()
            .eq("username", username)
            .eq("password", password);

        if store.source() == StoreSource::Mongodb {
            let user = Repository::<User>::new(store)
                .find_one(&credentials)
                .await
                .map_err(store_error)?;
            if let Some(user) = user {
                info!(username, "Login via document store");
                track_login("mongodb", true);
                return Ok(Self::response(user, &config.store_token, StoreSource::Mongodb));
            }
        }

        let user = Repository::<User>::new(memory)
            .find_one(&credentials)
            .await
            .map_err(store_error)?;
        match user {
            Some(user) => {
                info!(username, "Login via in-memory account");
                track_login("memory", true);
                Ok(Self::response(user, &config.memory_token, StoreSource::Memory))
            }
            None => {
                warn!(username, "Login failed");
                track_login("none", false);
                Err(AppError::unauthorized("Invalid credentials"))
            }
        }
    }

    fn response(user: User, token: &str, source: StoreSource) -> LoginResponse {
        LoginResponse {
            success: true,
            token: token.to_string(),
            user: AuthenticatedUser {
                username: user.username,
                role: user.role,
            },
            source,
        }
    }
}
