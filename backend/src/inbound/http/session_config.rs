//! Where the admin cookie gets its key and flags.
//!
//! | Variable | Meaning |
//! |---|---|
//! | `SESSION_KEY_FILE` | at least 64 bytes of key material |
//! | `SESSION_COOKIE_SECURE` | mark the cookie `Secure` |
//! | `SESSION_SAMESITE` | `Strict`, `Lax` or `None` |
//! | `SESSION_ALLOW_EPHEMERAL` | accept a random key when the file is unreadable |
//! | `SESSION_TTL_HOURS` | optional lifetime, 1 to 168, default 2 |
//!
//! A release binary refuses to start on a missing or bad value. A debug
//! binary logs a warning and uses a development default instead.

use std::path::PathBuf;

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::{info, warn};
use zeroize::Zeroizing;

pub mod fingerprint;
mod parsing;

use parsing::EnvReader;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/menuboard_session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const DEFAULT_TTL_HOURS: i64 = 2;
const MAX_TTL_HOURS: i64 = 24 * 7;
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
pub(crate) const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub(crate) const TTL_HOURS_ENV: &str = "SESSION_TTL_HOURS";

/// How strictly the variables are checked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// `Debug` exactly when `debug_assertions` are on.
    ///
    /// ```rust
    /// use menuboard::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    pub(crate) fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Resolved cookie settings handed to `SessionMiddleware`.
pub struct SessionSettings {
    /// Encrypts and signs the private cookie.
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    /// How long a login lasts.
    pub ttl: Duration,
}

impl SessionSettings {
    #[must_use]
    pub fn key_fingerprint(&self) -> String {
        fingerprint::key_fingerprint(&self.key)
    }
}

/// A variable the current build mode will not accept.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("{name} is not set")]
    MissingEnv { name: &'static str },
    #[error("{name}='{value}' is not one of {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("cannot read session key {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key {path} has {length} bytes, at least {min_len} are needed")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None needs SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL=1 is only honoured by debug builds")]
    EphemeralNotAllowed,
}

/// Read and check every `SESSION_*` variable.
///
/// ```rust
/// use menuboard::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("menuboard_session_key_example");
/// std::fs::write(&key_path, vec![b'k'; 64])?;
///
/// let key_path = key_path.to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "SESSION_KEY_FILE" => Some(key_path.clone()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     "SESSION_SAMESITE" => Some("Strict".to_owned()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     "SESSION_TTL_HOURS" => Some("8".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// assert_eq!(settings.ttl.whole_hours(), 8);
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let reader = EnvReader::new(env, mode);
    let cookie_secure = reader.flag(COOKIE_SECURE_ENV, true)?;
    let same_site = reader.same_site(cookie_secure)?;
    let allow_ephemeral = reader.flag(ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let ttl = reader.ttl()?;
    let key = load_key(&reader, allow_ephemeral)?;

    let settings = SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl,
    };
    info!(
        fingerprint = %settings.key_fingerprint(),
        cookie_secure,
        same_site = %settings.same_site,
        ttl_hours = settings.ttl.whole_hours(),
        "admin session configured"
    );
    Ok(settings)
}

fn load_key<E: Env>(
    reader: &EnvReader<'_, E>,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = reader
        .raw(KEY_FILE_ENV)
        .map_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH), PathBuf::from);

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => Zeroizing::new(bytes),
        Err(source) if reader.mode().is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %source,
                "session key unreadable; logins will not survive a restart"
            );
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    if bytes.len() < SESSION_KEY_MIN_LEN {
        let length = bytes.len();
        return reader.tolerate(
            Key::generate(),
            SessionConfigError::KeyTooShort {
                path,
                length,
                min_len: SESSION_KEY_MIN_LEN,
            },
        );
    }
    Ok(Key::derive_from(&bytes))
}
