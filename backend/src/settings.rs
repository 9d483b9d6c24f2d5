//! Application settings loaded via OrthoConfig.
//!
//! Values come from `MENUBOARD_*` environment variables, CLI flags or a
//! configuration file. Session cookie settings are read separately by
//! [`crate::inbound::http::session_config`].

use std::fmt;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::bootstrap::BootstrapOptions;
use crate::domain::{DisplayLocale, DisplayLocaleError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Process-wide configuration.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MENUBOARD")]
pub struct AppSettings {
    /// PostgreSQL connection string. Without one the catalog lives in memory.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Locale of the public opening-hours listing (`en` or `de`).
    pub display_locale: Option<String>,
    /// Username of the admin created on first start.
    pub admin_username: Option<String>,
    /// Password of the admin created on first start.
    pub admin_password: Option<String>,
    /// Directory holding uploaded menu images.
    pub image_dir: Option<PathBuf>,
    /// Leave the category list empty on first start.
    #[ortho_config(default = false)]
    pub skip_category_seed: bool,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("bind_addr", &self.bind_addr)
            .field("display_locale", &self.display_locale)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "<redacted>"))
            .field("image_dir", &self.image_dir)
            .field("skip_category_seed", &self.skip_category_seed)
            .finish()
    }
}

impl AppSettings {
    /// Bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Parsed display locale, German unless configured otherwise.
    pub fn display_locale(&self) -> Result<DisplayLocale, DisplayLocaleError> {
        self.display_locale
            .as_deref()
            .map_or(Ok(DisplayLocale::default()), str::parse)
    }

    /// Username for the first admin.
    pub fn admin_username(&self) -> &str {
        self.admin_username
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_USERNAME)
    }

    /// Startup initialisation options derived from these settings.
    ///
    /// `allow_dev_password` is decided by the caller's build mode.
    pub fn bootstrap_options(&self, allow_dev_password: bool) -> BootstrapOptions {
        BootstrapOptions {
            admin_username: self.admin_username().to_owned(),
            admin_password: self
                .admin_password
                .clone()
                .filter(|password| !password.is_empty())
                .map(Zeroizing::new),
            allow_dev_password,
            seed_categories: !self.skip_category_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "MENUBOARD_DATABASE_URL",
        "MENUBOARD_BIND_ADDR",
        "MENUBOARD_DISPLAY_LOCALE",
        "MENUBOARD_ADMIN_USERNAME",
        "MENUBOARD_ADMIN_PASSWORD",
        "MENUBOARD_IMAGE_DIR",
        "MENUBOARD_SKIP_CATEGORY_SEED",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("menuboard")]).expect("config should load")
    }

    /// Every `MENUBOARD_*` variable, unset unless named in `overrides`.
    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();

        assert!(settings.database_url.is_none());
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(settings.display_locale(), Ok(DisplayLocale::De));
        assert_eq!(settings.admin_username(), "admin");
        assert!(!settings.skip_category_seed);
        let options = settings.bootstrap_options(false);
        assert!(options.admin_password.is_none());
        assert!(options.seed_categories);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("MENUBOARD_DATABASE_URL", "postgres://localhost/menu"),
            ("MENUBOARD_BIND_ADDR", "127.0.0.1:9000"),
            ("MENUBOARD_DISPLAY_LOCALE", "en"),
            ("MENUBOARD_ADMIN_USERNAME", "wirt"),
            ("MENUBOARD_ADMIN_PASSWORD", "s3cret"),
            ("MENUBOARD_IMAGE_DIR", "/srv/menu/images"),
            ("MENUBOARD_SKIP_CATEGORY_SEED", "true"),
        ]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/menu")
        );
        assert_eq!(settings.bind_addr(), "127.0.0.1:9000");
        assert_eq!(settings.display_locale(), Ok(DisplayLocale::En));
        assert_eq!(settings.image_dir, Some(PathBuf::from("/srv/menu/images")));
        let options = settings.bootstrap_options(false);
        assert_eq!(options.admin_username, "wirt");
        assert_eq!(
            options.admin_password.as_deref().map(String::as_str),
            Some("s3cret")
        );
        assert!(!options.seed_categories);
    }

    #[rstest]
    fn unsupported_locale_is_reported() {
        let _guard = lock_env(env_with(&[("MENUBOARD_DISPLAY_LOCALE", "fr")]));

        let settings = load_from_empty_args();

        assert!(settings.display_locale().is_err());
    }

    #[rstest]
    fn debug_output_redacts_secrets() {
        let _guard = lock_env(env_with(&[("MENUBOARD_ADMIN_PASSWORD", "s3cret")]));

        let rendered = format!("{:?}", load_from_empty_args());

        assert!(!rendered.contains("s3cret"));
    }
}
