//! Login service verifying admin credentials against stored Argon2 hashes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{AdminAccountRepository, AdminAccountRepositoryError, LoginService};
use crate::domain::{AdminAccount, AdminId, AdminPasswordHasher, Error, LoginCredentials};

/// [`LoginService`] backed by an [`AdminAccountRepository`].
#[derive(Clone)]
pub struct AdminLoginService<R> {
    repo: Arc<R>,
    hasher: AdminPasswordHasher,
}

impl<R> AdminLoginService<R> {
    /// Create a service using the default Argon2 parameters.
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_hasher(repo, AdminPasswordHasher::default())
    }

    /// Create a service with an explicit hasher.
    pub fn with_hasher(repo: Arc<R>, hasher: AdminPasswordHasher) -> Self {
        Self { repo, hasher }
    }
}

fn map_repository_error(error: AdminAccountRepositoryError) -> Error {
    match error {
        AdminAccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("admin repository unavailable: {message}"))
        }
        other => Error::internal(format!("admin repository error: {other}")),
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

impl<R> AdminLoginService<R> {
    /// Argon2 is deliberately slow; keep it off the async workers.
    async fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, Error> {
        let hasher = self.hasher.clone();
        let password = zeroize::Zeroizing::new(password.to_owned());
        let stored_hash = stored_hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &stored_hash))
            .await
            .map_err(|err| Error::internal(format!("password verification aborted: {err}")))?
            .map_err(|err| {
                warn!(error = %err, "stored admin password hash is unusable");
                Error::internal("stored credentials are unusable")
            })
    }
}

#[async_trait]
impl<R> LoginService for AdminLoginService<R>
where
    R: AdminAccountRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminAccount, Error> {
        let Some(account) = self
            .repo
            .find_by_username(credentials.username())
            .await
            .map_err(map_repository_error)?
        else {
            info!("login rejected: unknown admin");
            return Err(invalid_credentials());
        };

        if self
            .verify(credentials.password(), &account.password_hash)
            .await?
        {
            info!(admin_id = %account.id, "admin logged in");
            Ok(account)
        } else {
            info!(admin_id = %account.id, "login rejected: wrong password");
            Err(invalid_credentials())
        }
    }

    async fn find_admin(&self, id: AdminId) -> Result<AdminAccount, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized("session refers to an unknown admin"))
    }
}
