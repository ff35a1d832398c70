use crate::{Error, Result};
use std::fmt;

pub const HOST_VAR: &str = "PGHOST";
pub const PORT_VAR: &str = "PGPORT";
pub const USER_VAR: &str = "PGUSER";
pub const PASSWORD_VAR: &str = "PGPASSWORD";
pub const DATABASE_VAR: &str = "PGDATABASE";

/// Connection settings resolved once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Config {
    /// Resolves the settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves the settings through `lookup`, substituting the documented
    /// defaults for absent variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = get_env(&lookup, HOST_VAR, Some(default_host()))?;
        let port = get_env(&lookup, PORT_VAR, Some(default_port()))?;
        let user = get_env(&lookup, USER_VAR, Some(default_user()))?;
        let password = lookup(PASSWORD_VAR).unwrap_or_default();
        let database = get_env(&lookup, DATABASE_VAR, Some(default_database()))?;

        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|e| Error::Config(format!("invalid {} value {:?}: {}", PORT_VAR, port, e)))?;

        Ok(Self {
            host,
            port,
            user,
            password,
            database,
        })
    }

    pub fn connection_summary(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }

    pub fn postgres_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .user(&self.user)
            .dbname(&self.database);
        if !self.password.is_empty() {
            config.password(&self.password);
        }
        config
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Looks up `name`, falling back to `default`.
///
/// Fails with [`Error::MissingEnv`] when the variable is absent and no
/// default is given.
pub fn get_env<F>(lookup: &F, name: &str, default: Option<&str>) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => Ok(value),
        None => default.map(str::to_string).ok_or_else(|| Error::MissingEnv {
            name: name.to_string(),
        }),
    }
}

fn default_host() -> &'static str {
    "localhost"
}

fn default_port() -> &'static str {
    "5432"
}

fn default_user() -> &'static str {
    "postgres"
}

fn default_database() -> &'static str {
    "postgres"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_environment_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.user, "postgres");
        assert_eq!(config.password, "");
        assert_eq!(config.database, "postgres");
    }

    #[test]
    fn test_values_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            ("PGHOST", "standby-1.internal"),
            ("PGPORT", "6432"),
            ("PGUSER", "monitor"),
            ("PGPASSWORD", "secret"),
            ("PGDATABASE", "app"),
        ]))
        .unwrap();

        assert_eq!(config.host, "standby-1.internal");
        assert_eq!(config.port, 6432);
        assert_eq!(config.user, "monitor");
        assert_eq!(config.password, "secret");
        assert_eq!(config.database, "app");
        assert_eq!(config.connection_summary(), "monitor@standby-1.internal:6432/app");
    }

    #[test]
    fn test_get_env_without_default_fails_with_name() {
        let lookup = lookup_from(&[]);
        let err = get_env(&lookup, "PGHOST", None).unwrap_err();

        match err {
            Error::MissingEnv { ref name } => assert_eq!(name, "PGHOST"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("PGHOST"));
    }

    #[test]
    fn test_get_env_prefers_set_value_over_default() {
        let lookup = lookup_from(&[("PGUSER", "replica_reader")]);
        assert_eq!(get_env(&lookup, "PGUSER", Some("postgres")).unwrap(), "replica_reader");
    }

    #[test]
    fn test_empty_value_is_kept() {
        // Set-but-empty is not the same as unset.
        let lookup = lookup_from(&[("PGDATABASE", "")]);
        assert_eq!(get_env(&lookup, "PGDATABASE", Some("postgres")).unwrap(), "");
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("PGPORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("PGPORT"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = Config::from_lookup(lookup_from(&[("PGPASSWORD", "hunter2")])).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
