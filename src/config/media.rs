//! # Media Configuration Loader
//!
//! Loads the settings that shape how validation rules are derived.
//!
//! Automatically loads `.env` files for non-production environments,
//! checking `DOTENV_FILE` first and then `.env.{APP_ENV}` or `.env`.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `APP_ENV` | Current environment (`development`, `production`, etc.) | `"development"` |
//! | `DOTENV_FILE` | Optional path to a custom dotenv file | *none* |
//! | `MEDIA_CONVERSION_SCOPE` | `override` or `merge` | `"override"` |
//! | `MEDIA_EXTRA_IMAGE_MIME_TYPES` | Comma separated extra image MIME types | `""` |
//!
//! # Example
//! ```rust
//! use wzs_media::config::media::MediaConfig;
//! use wzs_media::media::registry::ScopePolicy;
//!
//! let cfg = MediaConfig::from_provider(|key| match key {
//!     "MEDIA_CONVERSION_SCOPE" => Some("merge".into()),
//!     _ => None,
//! })
//! .unwrap();
//! assert_eq!(cfg.scope_policy, ScopePolicy::Merge);
//! ```

use std::env;

use tracing::warn;

use crate::config::env::{read_list, read_list_from, read_string_from};
use crate::error::media::ConfigError;
use crate::media::registry::ScopePolicy;

pub const SCOPE_VAR: &str = "MEDIA_CONVERSION_SCOPE";
pub const EXTRA_IMAGE_TYPES_VAR: &str = "MEDIA_EXTRA_IMAGE_MIME_TYPES";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaConfig {
    /// How collection-scoped conversions combine with global ones.
    pub scope_policy: ScopePolicy,
    /// MIME types treated as images in addition to the built-in list.
    pub extra_image_mime_types: Vec<String>,
}

impl MediaConfig {
    /// Loads configuration from the environment.
    ///
    /// An unknown `MEDIA_CONVERSION_SCOPE` is logged and replaced by the default.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_provider(|k| env::var(k).ok()).unwrap_or_else(|err| {
            warn!(error = %err, "invalid media configuration, using defaults");
            Self {
                extra_image_mime_types: read_list(EXTRA_IMAGE_TYPES_VAR),
                ..Self::default()
            }
        })
    }

    /// Builds configuration from a custom lookup function.
    pub fn from_provider<F>(provider: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scope_policy = match read_string_from(&provider, SCOPE_VAR) {
            Some(raw) => raw.parse()?,
            None => ScopePolicy::default(),
        };
        Ok(Self {
            scope_policy,
            extra_image_mime_types: read_list_from(&provider, EXTRA_IMAGE_TYPES_VAR),
        })
    }
}

fn load_dotenv() {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
    if app_env == "production" {
        return;
    }
    if let Ok(path) = env::var("DOTENV_FILE") {
        let _ = dotenvy::from_filename(path);
    } else {
        let candidate = format!(".env.{app_env}");
        dotenvy::from_filename(&candidate)
            .or_else(|_| dotenvy::dotenv())
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = MediaConfig::from_provider(|_| None).unwrap();
        assert_eq!(cfg, MediaConfig::default());
        assert_eq!(cfg.scope_policy, ScopePolicy::Override);
    }

    #[test]
    fn provider_values_are_parsed() {
        let cfg = MediaConfig::from_provider(|k| match k {
            SCOPE_VAR => Some("MERGE".into()),
            EXTRA_IMAGE_TYPES_VAR => Some("image/heic,image/jxl".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.scope_policy, ScopePolicy::Merge);
        assert_eq!(cfg.extra_image_mime_types, ["image/heic", "image/jxl"]);
    }

    #[test]
    fn unknown_scope_is_an_error() {
        let err = MediaConfig::from_provider(|k| (k == SCOPE_VAR).then(|| "both".into()))
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownScopePolicy("both".into()));
    }

    #[test]
    fn from_env_reads_process_environment() {
        temp_env::with_vars(
            [
                ("APP_ENV", Some("production")),
                (SCOPE_VAR, Some("merge")),
                (EXTRA_IMAGE_TYPES_VAR, Some("image/heic")),
            ],
            || {
                let cfg = MediaConfig::from_env();
                assert_eq!(cfg.scope_policy, ScopePolicy::Merge);
                assert_eq!(cfg.extra_image_mime_types, ["image/heic"]);
            },
        );
    }

    #[test]
    fn from_env_falls_back_on_invalid_scope() {
        temp_env::with_vars(
            [
                ("APP_ENV", Some("production")),
                (SCOPE_VAR, Some("sideways")),
                (EXTRA_IMAGE_TYPES_VAR, Some("image/jxl")),
            ],
            || {
                let cfg = MediaConfig::from_env();
                assert_eq!(cfg.scope_policy, ScopePolicy::Override);
                assert_eq!(cfg.extra_image_mime_types, ["image/jxl"]);
            },
        );
    }
}
