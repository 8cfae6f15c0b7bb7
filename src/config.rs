use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_AUTHORITY_BASE, DEFAULT_SCOPE};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

/// Fixed service-account credentials. Loaded once; read-only afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub authority_url: String,
    pub username: String,
    pub password: String,
    pub scope: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub rest_api: RestApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestApiConfig {
    pub base_url: String,
    pub timeout: u64,
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self
            .scope
            .iter()
            .map(|s| format!("\"{}\"", s))
            .collect::<Vec<_>>()
            .join(",");
        write!(
            f,
            "{{\"client_id\":\"{}\",\"authority_url\":\"{}\",\"username\":\"{}\",\"password\":\"[REDACTED]\",\"scope\":[{}]}}",
            self.client_id, self.authority_url, self.username, scope
        )
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"credentials\":{},\"rest_api\":{}}}",
            self.credentials, self.rest_api
        )
    }
}

impl fmt::Display for RestApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"base_url\":\"{}\",\"timeout\":{}}}",
            self.base_url, self.timeout
        )
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        let tenant_id = get_env_or_default("PBI_TENANT_ID", String::from("common"));
        let authority_url = get_env_or_default(
            "PBI_AUTHORITY_URL",
            format!("{}/{}", DEFAULT_AUTHORITY_BASE, tenant_id),
        );
        let scope = get_env_or_default("PBI_SCOPE", String::from(DEFAULT_SCOPE))
            .split_whitespace()
            .map(String::from)
            .collect();

        Config {
            credentials: Credentials {
                client_id: get_env_or_default("PBI_CLIENT_ID", String::from("default_client_id")),
                authority_url,
                username: get_env_or_default("PBI_USER", String::from("default_username")),
                password: get_env_or_default("PBI_PASSWORD", String::from("default_password")),
                scope,
            },
            rest_api: RestApiConfig {
                base_url: get_env_or_default(
                    "PBI_API_BASE_URL",
                    String::from(DEFAULT_API_BASE_URL),
                ),
                timeout: get_env_or_default("PBI_REST_TIMEOUT", 30),
            },
        }
    }
}

#[cfg(test)]
mod tests_config {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn with_env_vars<F>(vars: Vec<(&str, &str)>, test: F)
    where
        F: FnOnce(),
    {
        let _lock = ENV_MUTEX.lock().unwrap();
        let mut old_vars = Vec::new();

        for (key, value) in vars {
            old_vars.push((key, env::var(key).ok()));
            env::set_var(key, value);
        }

        test();

        for (key, value) in old_vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_config_new() {
        with_env_vars(
            vec![
                ("PBI_CLIENT_ID", "test_client"),
                ("PBI_TENANT_ID", "test_tenant"),
                ("PBI_USER", "test_user"),
                ("PBI_PASSWORD", "test_pass"),
                ("PBI_API_BASE_URL", "https://test-api.powerbi.com/v1.0/myorg"),
                ("PBI_REST_TIMEOUT", "60"),
            ],
            || {
                let config = Config::new();

                assert_eq!(config.credentials.client_id, "test_client");
                assert_eq!(
                    config.credentials.authority_url,
                    "https://login.microsoftonline.com/test_tenant"
                );
                assert_eq!(config.credentials.username, "test_user");
                assert_eq!(config.credentials.password, "test_pass");
                assert_eq!(
                    config.rest_api.base_url,
                    "https://test-api.powerbi.com/v1.0/myorg"
                );
                assert_eq!(config.rest_api.timeout, 60);
            },
        );
    }

    #[test]
    fn test_authority_override() {
        with_env_vars(
            vec![
                ("PBI_TENANT_ID", "ignored_tenant"),
                ("PBI_AUTHORITY_URL", "https://login.example.com/custom"),
            ],
            || {
                let config = Config::new();
                assert_eq!(
                    config.credentials.authority_url,
                    "https://login.example.com/custom"
                );
            },
        );
    }

    #[test]
    fn test_scope_split() {
        with_env_vars(
            vec![("PBI_SCOPE", "https://example.com/a https://example.com/b")],
            || {
                let config = Config::new();
                assert_eq!(
                    config.credentials.scope,
                    vec!["https://example.com/a", "https://example.com/b"]
                );
            },
        );
    }

    #[test]
    fn test_default_values() {
        with_env_vars(vec![], || {
            let config = Config::new();

            assert_eq!(config.credentials.client_id, "default_client_id");
            assert_eq!(
                config.credentials.authority_url,
                "https://login.microsoftonline.com/common"
            );
            assert_eq!(config.credentials.username, "default_username");
            assert_eq!(config.credentials.password, "default_password");
            assert_eq!(
                config.credentials.scope,
                vec!["https://analysis.windows.net/powerbi/api/Report.Read.All"]
            );
            assert_eq!(
                config.rest_api.base_url,
                "https://api.powerbi.com/v1.0/myorg"
            );
            assert_eq!(config.rest_api.timeout, 30);
        });
    }
}
