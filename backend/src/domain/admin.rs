//! Admin accounts and password hashing.

use std::fmt;

use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable admin account identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct AdminId(i32);

impl AdminId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored administrator.
///
/// `password_hash` is an Argon2 PHC string and never leaves the process.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub id: AdminId,
    pub username: String,
    pub password_hash: String,
}

impl fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAccount")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Failures while hashing or parsing a stored hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    #[error("argon2 parameters rejected: {0}")]
    Params(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("stored password hash is malformed: {0}")]
    Malformed(String),
}

/// Salted Argon2id hashing for admin passwords.
#[derive(Clone)]
pub struct AdminPasswordHasher {
    argon2: Argon2<'static>,
}

impl Default for AdminPasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl AdminPasswordHasher {
    /// Argon2id with explicit cost parameters.
    ///
    /// Tests use small values to keep hashing fast.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHashError::Params(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash `password` with a fresh random salt, returning a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::Hash(err.to_string()))
    }

    /// Check `password` against a stored PHC string.
    ///
    /// A wrong password is `Ok(false)`; only a malformed hash is an error.
    /// Cost parameters are read from the stored hash.
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, PasswordHashError> {
        let parsed =
            PasswordHash::new(stored).map_err(|err| PasswordHashError::Malformed(err.to_string()))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> AdminPasswordHasher {
        AdminPasswordHasher::with_params(64, 1, 1).expect("light params")
    }

    #[rstest]
    fn hash_verifies_original_password(hasher: AdminPasswordHasher) {
        let stored = hasher.hash("schnitzel").expect("hash");
        assert!(stored.starts_with("$argon2id$"));
        assert!(hasher.verify("schnitzel", &stored).expect("verify"));
        assert!(!hasher.verify("Schnitzel", &stored).expect("verify"));
    }

    #[rstest]
    fn hashes_are_salted(hasher: AdminPasswordHasher) {
        let first = hasher.hash("same").expect("hash");
        let second = hasher.hash("same").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_hash_is_an_error(hasher: AdminPasswordHasher) {
        let err = hasher.verify("pw", "plain-text").expect_err("malformed");
        assert!(matches!(err, PasswordHashError::Malformed(_)));
    }

    #[rstest]
    fn debug_output_hides_hash() {
        let account = AdminAccount {
            id: AdminId::new(1),
            username: "admin".into(),
            password_hash: "$argon2id$secret".into(),
        };
        assert!(!format!("{account:?}").contains("secret"));
    }
}
