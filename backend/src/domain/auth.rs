//! Shape checks for the admin login payload.
//!
//! These run before any account lookup or password hashing, so a malformed
//! request never reaches Argon2.

use zeroize::Zeroizing;

/// Longest username the admin table stores.
pub const MAX_USERNAME_CHARS: usize = 100;
/// Upper bound on password bytes handed to the hasher.
pub const MAX_PASSWORD_BYTES: usize = 1024;

/// Why a login payload was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be at most {} characters", MAX_USERNAME_CHARS)]
    UsernameTooLong,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("password must be at most {} bytes", MAX_PASSWORD_BYTES)]
    PasswordTooLong,
}

impl LoginValidationError {
    /// Stable code placed in the error details.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::UsernameTooLong => "username_too_long",
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooLong => "password_too_long",
        }
    }

    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameTooLong => "username",
            Self::EmptyPassword | Self::PasswordTooLong => "password",
        }
    }
}

/// A username and password that passed the shape checks.
///
/// The username is trimmed; the password is kept byte for byte and wiped from
/// memory on drop.
///
/// ```
/// use menuboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" wirt ", " kartoffel ").unwrap();
/// assert_eq!(creds.username(), "wirt");
/// assert_eq!(creds.password(), " kartoffel ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        match username.chars().count() {
            0 => return Err(LoginValidationError::EmptyUsername),
            n if n > MAX_USERNAME_CHARS => return Err(LoginValidationError::UsernameTooLong),
            _ => {}
        }
        match password.len() {
            0 => return Err(LoginValidationError::EmptyPassword),
            n if n > MAX_PASSWORD_BYTES => return Err(LoginValidationError::PasswordTooLong),
            _ => {}
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case(" \t ", "pw", LoginValidationError::EmptyUsername)]
    #[case(&"ü".repeat(MAX_USERNAME_CHARS + 1), "pw", LoginValidationError::UsernameTooLong)]
    #[case("wirt", "", LoginValidationError::EmptyPassword)]
    #[case("wirt", &"x".repeat(MAX_PASSWORD_BYTES + 1), LoginValidationError::PasswordTooLong)]
    fn refused_payloads(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password),
            Err(expected)
        );
    }

    #[rstest]
    fn limits_are_inclusive() {
        let username = "ü".repeat(MAX_USERNAME_CHARS);
        let password = "x".repeat(MAX_PASSWORD_BYTES);

        let creds = LoginCredentials::try_from_parts(&username, &password).expect("at the limit");

        assert_eq!(creds.username(), username);
        assert_eq!(creds.password().len(), MAX_PASSWORD_BYTES);
    }

    #[rstest]
    fn only_the_username_is_trimmed() {
        let creds = LoginCredentials::try_from_parts("  wirt\n", "  spaced  ").expect("valid");

        assert_eq!(creds.username(), "wirt");
        assert_eq!(creds.password(), "  spaced  ");
    }

    #[rstest]
    #[case(LoginValidationError::UsernameTooLong, "username", "username_too_long")]
    #[case(LoginValidationError::EmptyPassword, "password", "empty_password")]
    #[case(LoginValidationError::PasswordTooLong, "password", "password_too_long")]
    fn details_name_field_and_code(
        #[case] err: LoginValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        assert_eq!((err.field(), err.code()), (field, code));
    }
}
