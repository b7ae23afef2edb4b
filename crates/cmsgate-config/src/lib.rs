//! Configuration for the CMS gateway.
//!
//! Settings come from an optional `cmsgate.toml` in the working
//! directory, overridden by `CMS_`-prefixed environment variables
//! (`CMS_IP`, `CMS_USERNAME`, `CMS_PASSWORD`, ...). The controller
//! credentials are required; everything else has a sensible default.

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Default TOML file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "cmsgate.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CMS_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Runtime settings for the gateway binary.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Controller address (IP or hostname, no scheme or port).
    pub ip: String,

    /// Northbound account username.
    pub username: String,

    /// Northbound account password. Never logged or serialized.
    pub password: SecretString,

    /// Comma-separated node names this gateway fronts (without the
    /// `NTWK-` prefix).
    #[serde(default)]
    pub nodes: String,

    /// HTTP bind address of the REST facade.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Default per-request timeout towards the controller, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_listen() -> String {
    "0.0.0.0:8003".into()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Settings {
    /// Load and validate settings from `cmsgate.toml` plus environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    /// Load from an explicit figment (tests inject their own providers).
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let settings: Self = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ip.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "ip",
                reason: "controller address must not be empty",
            });
        }
        if self.username.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "username",
                reason: "username must not be empty",
            });
        }
        if self.password.expose_secret().is_empty() {
            return Err(ConfigError::Validation {
                field: "password",
                reason: "password must not be empty",
            });
        }
        Ok(())
    }

    /// Configured node names, trimmed, empty entries dropped.
    pub fn node_list(&self) -> Vec<String> {
        self.nodes
            .split(',')
            .map(str::trim)
            .filter(|node| !node.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use figment::Jail;

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                    ip = "10.0.0.1"
                    username = "file-user"
                    password = "file-pass"
                "#,
            )?;
            jail.set_env("CMS_USERNAME", "env-user");

            let settings = Settings::load().unwrap();
            assert_eq!(settings.ip, "10.0.0.1");
            assert_eq!(settings.username, "env-user");
            assert_eq!(settings.listen, "0.0.0.0:8003");
            assert_eq!(settings.timeout_secs, 10);
            Ok(())
        });
    }

    #[test]
    fn missing_credentials_are_fatal() {
        Jail::expect_with(|jail| {
            jail.set_env("CMS_IP", "10.0.0.1");
            jail.set_env("CMS_USERNAME", "ops");

            assert!(Settings::load().is_err());
            Ok(())
        });
    }

    #[test]
    fn empty_required_field_fails_validation() {
        Jail::expect_with(|jail| {
            jail.set_env("CMS_IP", "10.0.0.1");
            jail.set_env("CMS_USERNAME", "ops");
            jail.set_env("CMS_PASSWORD", "");

            let err = Settings::load().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Validation { field: "password", .. }
            ));
            Ok(())
        });
    }

    #[test]
    fn node_list_splits_and_trims() {
        Jail::expect_with(|jail| {
            jail.set_env("CMS_IP", "10.0.0.1");
            jail.set_env("CMS_USERNAME", "ops");
            jail.set_env("CMS_PASSWORD", "secret");
            jail.set_env("CMS_NODES", "rsvt-pon-1, rsvt-pon-2 ,,lab-dsl-1");

            let settings = Settings::load().unwrap();
            assert_eq!(
                settings.node_list(),
                vec!["rsvt-pon-1", "rsvt-pon-2", "lab-dsl-1"]
            );
            Ok(())
        });
    }
}
