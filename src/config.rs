//! Environment-derived configuration, read once at startup.
//!
//! Credentials are deliberately optional here. A deployment missing any of
//! them still boots and serves `/health`; requests that need a token fail
//! with a configuration error instead. See [Config::credentials].

use crate::relay::{auth::Credentials, error::RelayError};
use secrecy::SecretString;
use std::{env, fmt};
use thiserror::Error;
use url::Url;

/// Default base URL of the Zoom REST API.
pub const API_BASE: &str = "https://api.zoom.us/v2";

/// Default Zoom OAuth token endpoint.
pub const OAUTH_URL: &str = "https://zoom.us/oauth/token";

pub const ACCOUNT_ID_VAR: &str = "ZOOM_ACCOUNT_ID";
pub const CLIENT_ID_VAR: &str = "ZOOM_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "ZOOM_CLIENT_SECRET";

const DEFAULT_PORT: u16 = 8080;

/// Failures which prevent the process from starting at all.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not parse ${0} to a u16 port")]
    Port(&'static str),
    #[error("${var} is not a usable base URL: {value}")]
    Url { var: &'static str, value: String },
}

/// The deployment mode, which only influences logging defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl Environment {
    /// Anything other than a recognised development alias is production.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Environment::Development,
            _ => Environment::Production,
        }
    }

    /// The `EnvFilter` directive used when `$RUST_LOG` is unset.
    pub fn default_log_directive(&self) -> &'static str {
        match self {
            Environment::Production => "info",
            Environment::Development => "debug",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
        }
    }
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub environment: Environment,
    pub api_base: Url,
    pub oauth_url: Url,
    pub account_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<SecretString>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|k| env::var(k).ok())
    }

    /// Read configuration from any key-value source. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(x) => x.trim().parse().map_err(|_| ConfigError::Port("PORT"))?,
            None => DEFAULT_PORT,
        };

        let environment = get("APP_ENV")
            .map(|x| Environment::parse(&x))
            .unwrap_or_default();

        let api_base = parse_base("ZOOM_API_BASE", get("ZOOM_API_BASE"), API_BASE)?;
        let oauth_url = parse_base("ZOOM_OAUTH_URL", get("ZOOM_OAUTH_URL"), OAUTH_URL)?;

        Ok(Config {
            port,
            environment,
            api_base,
            oauth_url,
            account_id: get(ACCOUNT_ID_VAR),
            client_id: get(CLIENT_ID_VAR),
            client_secret: get(CLIENT_SECRET_VAR).map(SecretString::from),
        })
    }

    /// Names of any credential variables which are unset.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut xs = Vec::with_capacity(3);

        if self.account_id.is_none() {
            xs.push(ACCOUNT_ID_VAR);
        }
        if self.client_id.is_none() {
            xs.push(CLIENT_ID_VAR);
        }
        if self.client_secret.is_none() {
            xs.push(CLIENT_SECRET_VAR);
        }

        xs
    }

    /// Borrow the three service credentials, failing before any network I/O
    /// if one of them is absent.
    pub fn credentials(&self) -> Result<Credentials<'_>, RelayError> {
        match (&self.account_id, &self.client_id, &self.client_secret) {
            (Some(account_id), Some(client_id), Some(client_secret)) => Ok(Credentials {
                account_id,
                client_id,
                client_secret,
            }),
            _ => Err(RelayError::Configuration(format!(
                "Missing Zoom credentials: {}",
                self.missing_credentials().join(", ")
            ))),
        }
    }
}

fn parse_base(var: &'static str, raw: Option<String>, default: &str) -> Result<Url, ConfigError> {
    let value = raw.unwrap_or_else(|| default.to_owned());

    match Url::parse(&value) {
        Ok(url) if !url.cannot_be_a_base() => Ok(url),
        _ => Err(ConfigError::Url { var, value }),
    }
}
