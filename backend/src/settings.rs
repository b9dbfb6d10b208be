//! Environment-driven process settings.
//!
//! Reads go through [`mockable::Env`] so parsing can be tested without
//! touching the real process environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use mockable::Env;

use crate::outbound::persistence::PoolConfig;

const PORT_ENV: &str = "PORT";
const BIND_HOST_ENV: &str = "BIND_HOST";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const DATABASE_MAX_CONNECTIONS_ENV: &str = "DATABASE_MAX_CONNECTIONS";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while reading settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Validated process settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string; `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Settings {
    /// Read settings from `env`, applying defaults for absent variables.
    ///
    /// # Examples
    /// ```
    /// use mockable::MockEnv;
    /// use user_service::settings::Settings;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "PORT" => Some("8080".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = Settings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.bind_addr.port(), 8080);
    /// assert!(settings.database_url.is_none());
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, SettingsError> {
        let port = parse_or(env, PORT_ENV, DEFAULT_PORT, "a port number between 0 and 65535")?;
        let host = parse_or(env, BIND_HOST_ENV, DEFAULT_BIND_HOST, "an IP address")?;
        let max_connections = parse_or(
            env,
            DATABASE_MAX_CONNECTIONS_ENV,
            DEFAULT_MAX_CONNECTIONS,
            "a positive integer",
        )?;
        if max_connections == 0 {
            return Err(SettingsError::InvalidEnv {
                name: DATABASE_MAX_CONNECTIONS_ENV,
                value: "0".to_owned(),
                expected: "a positive integer",
            });
        }
        let database_url = env
            .string(DATABASE_URL_ENV)
            .filter(|url| !url.trim().is_empty());

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            database_url,
            max_connections,
        })
    }

    /// Pool configuration for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url
            .as_deref()
            .map(|url| PoolConfig::new(url).with_max_size(self.max_connections))
    }
}

fn parse_or<E, T>(
    env: &E,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, SettingsError>
where
    E: Env,
    T: std::str::FromStr,
{
    match env.string(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| SettingsError::InvalidEnv {
                name,
                value,
                expected,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = Settings::from_env(&mock_env(&[])).expect("defaults");
        assert_eq!(
            settings,
            Settings {
                bind_addr: SocketAddr::new(DEFAULT_BIND_HOST, DEFAULT_PORT),
                database_url: None,
                max_connections: DEFAULT_MAX_CONNECTIONS,
            }
        );
        assert!(settings.pool_config().is_none());
    }

    #[rstest]
    fn explicit_values_are_used() {
        let env = mock_env(&[
            (PORT_ENV, "8080"),
            (BIND_HOST_ENV, "127.0.0.1"),
            (DATABASE_URL_ENV, "postgres://localhost/users"),
            (DATABASE_MAX_CONNECTIONS_ENV, "4"),
        ]);
        let settings = Settings::from_env(&env).expect("valid settings");
        assert_eq!(settings.bind_addr, "127.0.0.1:8080".parse().expect("addr"));
        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.database_url(), "postgres://localhost/users");
        assert_eq!(pool.max_size(), 4);
    }

    #[rstest]
    #[case(PORT_ENV, "http")]
    #[case(PORT_ENV, "70000")]
    #[case(BIND_HOST_ENV, "localhost:80")]
    #[case(DATABASE_MAX_CONNECTIONS_ENV, "-1")]
    #[case(DATABASE_MAX_CONNECTIONS_ENV, "0")]
    fn invalid_values_are_rejected(#[case] name: &'static str, #[case] value: &str) {
        let err = Settings::from_env(&mock_env(&[(name, value)])).expect_err("invalid");
        let SettingsError::InvalidEnv { name: reported, .. } = err;
        assert_eq!(reported, name);
    }

    #[rstest]
    fn blank_database_url_selects_memory_store() {
        let settings =
            Settings::from_env(&mock_env(&[(DATABASE_URL_ENV, "  ")])).expect("settings");
        assert!(settings.database_url.is_none());
    }
}
