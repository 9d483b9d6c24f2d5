//! Port for admin account persistence.

use async_trait::async_trait;

use crate::domain::{AdminAccount, AdminId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by admin account repository adapters.
    pub enum AdminAccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "admin repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "admin repository query failed: {message}",
        /// Username already registered.
        DuplicateUsername { username: String } => "admin '{username}' already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminAccountRepository: Send + Sync {
    /// Look up an account by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AdminAccountRepositoryError>;

    /// Look up an account by identifier.
    async fn find_by_id(&self, id: AdminId)
    -> Result<Option<AdminAccount>, AdminAccountRepositoryError>;

    /// Number of stored accounts.
    async fn count(&self) -> Result<i64, AdminAccountRepositoryError>;

    /// Store a new account with an already hashed password.
    async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AdminAccount, AdminAccountRepositoryError>;
}
