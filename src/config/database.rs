use super::Config;
use thiserror::Error as ThisError;
use url::Url;

/// Local store used when neither `DATABASE_URL` nor `DB_HOST` is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://students.db?mode=rwc";

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to extract configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("DB_NAME must be set when DB_HOST is set")]
    MissingDbName,

    #[error("invalid DB_HOST {host:?}: {reason}")]
    InvalidDbHost { host: String, reason: String },
}

impl Config {
    /// Store URL in effect: `database_url` if set, otherwise a MySQL URL composed from the
    /// `db_*` parts, otherwise the local SQLite default.
    pub fn resolve_database_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.database_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.to_string());
        }
        let Some(host) = self.db_host.as_deref().filter(|h| !h.trim().is_empty()) else {
            return Ok(DEFAULT_DATABASE_URL.to_string());
        };
        let name = self
            .db_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or(ConfigError::MissingDbName)?;

        let invalid = |reason: &str| ConfigError::InvalidDbHost {
            host: host.to_string(),
            reason: reason.to_string(),
        };

        let mut url = Url::parse(&format!("mysql://{}", host.trim()))
            .map_err(|e| invalid(&e.to_string()))?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host name"));
        }
        // Url percent-encodes credentials and path segments.
        if let Some(user) = self.db_user.as_deref().filter(|u| !u.is_empty()) {
            url.set_username(user)
                .map_err(|()| invalid("cannot carry a user name"))?;
        }
        if let Some(pass) = self.db_pass.as_deref().filter(|p| !p.is_empty()) {
            url.set_password(Some(pass))
                .map_err(|()| invalid("cannot carry a password"))?;
        }
        url.path_segments_mut()
            .map_err(|()| invalid("cannot carry a database name"))?
            .clear()
            .push(name);

        Ok(url.to_string())
    }

    /// Same as [`Config::resolve_database_url`] with any password masked, for logs.
    pub fn redacted_database_url(&self) -> String {
        match self.resolve_database_url() {
            Ok(raw) => match Url::parse(&raw) {
                Ok(mut url) if url.password().is_some() => {
                    let _ = url.set_password(Some("***"));
                    url.to_string()
                }
                _ => raw,
            },
            Err(e) => format!("<unresolved: {e}>"),
        }
    }
}
