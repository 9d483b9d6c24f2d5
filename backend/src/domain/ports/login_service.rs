//! Driving port for admin authentication.
//!
//! Inbound adapters call it to check credentials and to resolve the admin
//! behind a session without importing persistence.

use async_trait::async_trait;

use crate::domain::{AdminAccount, AdminId, Error, LoginCredentials};

/// Domain use-case port for admin authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and return the matching account.
    ///
    /// Unknown usernames and wrong passwords both fail with the same
    /// `unauthorized` error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminAccount, Error>;

    /// Resolve the account stored in a session.
    ///
    /// Fails with `unauthorized` when the account no longer exists.
    async fn find_admin(&self, id: AdminId) -> Result<AdminAccount, Error>;
}
