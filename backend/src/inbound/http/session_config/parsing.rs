//! Typed reads of the `SESSION_*` variables.

use actix_web::cookie::SameSite;
use actix_web::cookie::time::Duration;
use mockable::Env;
use tracing::warn;

use super::{
    BuildMode, DEFAULT_TTL_HOURS, MAX_TTL_HOURS, SAMESITE_ENV, SessionConfigError, TTL_HOURS_ENV,
};

/// Reads variables for one build mode.
///
/// Debug builds turn every problem into a logged warning and a development
/// default; release builds return the problem as an error.
pub(super) struct EnvReader<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<'a, E: Env> EnvReader<'a, E> {
    pub(super) fn new(env: &'a E, mode: BuildMode) -> Self {
        Self { env, mode }
    }

    pub(super) fn mode(&self) -> BuildMode {
        self.mode
    }

    pub(super) fn raw(&self, name: &str) -> Option<String> {
        self.env.string(name)
    }

    /// `fallback` in debug builds, `problem` in release builds.
    pub(super) fn tolerate<T>(
        &self,
        fallback: T,
        problem: SessionConfigError,
    ) -> Result<T, SessionConfigError> {
        if self.mode.is_debug() {
            warn!(%problem, "using development session default");
            Ok(fallback)
        } else {
            Err(problem)
        }
    }

    /// A required on/off toggle; `debug_default` applies only when tolerated.
    pub(super) fn flag(
        &self,
        name: &'static str,
        debug_default: bool,
    ) -> Result<bool, SessionConfigError> {
        let Some(value) = self.raw(name) else {
            return self.tolerate(debug_default, SessionConfigError::MissingEnv { name });
        };
        match parse_bool(&value) {
            Some(flag) => Ok(flag),
            None => self.tolerate(
                debug_default,
                SessionConfigError::InvalidEnv {
                    name,
                    value,
                    expected: "1|0|true|false|yes|no|y|n",
                },
            ),
        }
    }

    /// Required `SameSite` policy. Debug builds default to `Lax` so the admin
    /// UI works over plain HTTP on localhost.
    pub(super) fn same_site(&self, cookie_secure: bool) -> Result<SameSite, SessionConfigError> {
        let default = if self.mode.is_debug() {
            SameSite::Lax
        } else {
            SameSite::Strict
        };
        let Some(value) = self.raw(SAMESITE_ENV) else {
            return self.tolerate(default, SessionConfigError::MissingEnv { name: SAMESITE_ENV });
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" if cookie_secure => Ok(SameSite::None),
            "none" => self.tolerate(SameSite::None, SessionConfigError::InsecureSameSiteNone),
            _ => self.tolerate(
                default,
                SessionConfigError::InvalidEnv {
                    name: SAMESITE_ENV,
                    value,
                    expected: "Strict|Lax|None",
                },
            ),
        }
    }

    /// Optional session lifetime in whole hours.
    pub(super) fn ttl(&self) -> Result<Duration, SessionConfigError> {
        let default = Duration::hours(DEFAULT_TTL_HOURS);
        let Some(value) = self.raw(TTL_HOURS_ENV) else {
            return Ok(default);
        };
        match value.trim().parse::<i64>() {
            Ok(hours) if (1..=MAX_TTL_HOURS).contains(&hours) => Ok(Duration::hours(hours)),
            _ => self.tolerate(
                default,
                SessionConfigError::InvalidEnv {
                    name: TTL_HOURS_ENV,
                    value,
                    expected: "whole hours between 1 and 168",
                },
            ),
        }
    }
}

pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
