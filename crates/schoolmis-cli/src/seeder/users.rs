use schoolmis_db::{DocumentStore, Filter, Repository};
use schoolmis_models::users::{NewUser, User};

/// Credentials for the administrator written by [`seed_admin`].
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl Default for AdminAccount {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            email: "admin@school.com".to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SeedAdminOutcome {
    Created,
    AlreadyExists,
}

/// Creates the administrator unless a user with that username exists.
pub async fn seed_admin(
    store: &dyn DocumentStore,
    account: &AdminAccount,
) -> anyhow::Result<SeedAdminOutcome> {
    let repo = Repository::<User>::new(store);
    let existing = repo
        .find_one(&Filter::new().eq("username", account.username.as_str()))
        .await?;
    if existing.is_some() {
        return Ok(SeedAdminOutcome::AlreadyExists);
    }

    repo.create(&NewUser {
        username: account.username.clone(),
        password: account.password.clone(),
        role: "admin".to_string(),
        email: Some(account.email.clone()),
        is_active: true,
    })
    .await?;
    Ok(SeedAdminOutcome::Created)
}
