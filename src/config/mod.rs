mod database;

pub use database::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// Env: `LISTEN_ADDR`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// Env: `LISTEN_PORT`. Default: `8081`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// Env: `LOGLEVEL`. Default: `info`.
    #[serde(default)]
    pub loglevel: String,

    /// Full store URL (`sqlite://...` or `mysql://...`). Takes precedence over the `DB_*` parts.
    /// Env: `DATABASE_URL`. Default: unset.
    #[serde(default)]
    pub database_url: Option<String>,

    /// MySQL host, optionally with `:port`.
    /// Env: `DB_HOST`. Default: unset (local SQLite file).
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    pub db_host: Option<String>,

    /// Env: `DB_USER`.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    pub db_user: Option<String>,

    /// Env: `DB_PASS`. Never logged.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    pub db_pass: Option<String>,

    /// Env: `DB_NAME`. Required when `DB_HOST` is set.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    pub db_name: Option<String>,

    /// The single origin allowed by CORS.
    /// Env: `CORS_ORIGIN`. Default: `http://localhost:3000`.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Create the `student` table on connect if it does not exist.
    /// Env: `BOOTSTRAP_SCHEMA`. Default: `true`.
    #[serde(default = "default_bootstrap_schema")]
    pub bootstrap_schema: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            loglevel: "info".to_string(),
            database_url: None,
            db_host: None,
            db_user: None,
            db_pass: None,
            db_name: None,
            cors_origin: default_cors_origin(),
            bootstrap_schema: default_bootstrap_schema(),
        }
    }
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Environment variables read by [`Config::figment`].
const ENV_KEYS: [&str; 10] = [
    "LISTEN_ADDR",
    "LISTEN_PORT",
    "LOGLEVEL",
    "DATABASE_URL",
    "DB_HOST",
    "DB_USER",
    "DB_PASS",
    "DB_NAME",
    "CORS_ORIGIN",
    "BOOTSTRAP_SCHEMA",
];

impl Config {
    /// Builds a Figment that merges defaults, `config.toml` if present, then environment variables.
    /// Uses raw env mapping, so field names map to env vars in UPPER_SNAKE_CASE.
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::raw().only(&ENV_KEYS))
    }

    /// Loads configuration and checks that the store location can be resolved.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cfg: Self = Self::figment().extract().map_err(Box::new)?;
        cfg.resolve_database_url()?;
        Ok(cfg)
    }
}

fn deserialize_opt_string_lax<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;

    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        _ => Err(serde::de::Error::custom(
            "expected a string or a number for a DB_* setting",
        )),
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_listen_port() -> u16 {
    8081
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_bootstrap_schema() -> bool {
    true
}
