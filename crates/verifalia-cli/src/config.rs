/*
[INPUT]:  YAML configuration file and VERIFALIA_* environment variables
[OUTPUT]: Parsed CLI configuration and a ready-to-use client
[POS]:    Configuration layer - credentials and endpoints
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use verifalia_client::{AuthProvider, ClientConfig, VerifaliaClient};

pub const ENV_USERNAME: &str = "VERIFALIA_USERNAME";
pub const ENV_PASSWORD: &str = "VERIFALIA_PASSWORD";
pub const ENV_APP_KEY: &str = "VERIFALIA_APP_KEY";

/// Top-level configuration of the command line client
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    /// Overrides the endpoints implied by the auth method
    #[serde(default)]
    pub base_urls: Vec<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

/// Credential material; the first complete method wins (certificate, app key, user)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub app_key: Option<String>,
    pub certificate_pem_path: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content).context("parse config")?;
        Ok(config)
    }

    /// Environment variables take precedence over the file
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// A credential taken from the environment also drops the file's other auth methods,
    /// so it is the one `auth_provider` picks.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value = |key: &str| lookup(key).filter(|value| !value.is_empty());
        if let Some(username) = value(ENV_USERNAME) {
            self.auth.username = Some(username);
            self.auth.app_key = None;
            self.auth.certificate_pem_path = None;
        }
        if let Some(password) = value(ENV_PASSWORD) {
            self.auth.password = Some(password);
        }
        if let Some(app_key) = value(ENV_APP_KEY) {
            self.auth.app_key = Some(app_key);
            self.auth.certificate_pem_path = None;
        }
    }

    pub fn auth_provider(&self) -> Result<AuthProvider> {
        let auth = &self.auth;
        if let Some(path) = &auth.certificate_pem_path {
            return AuthProvider::certificate_pem_file(path)
                .with_context(|| format!("load client certificate {}", path.display()));
        }
        if let Some(app_key) = &auth.app_key {
            return Ok(AuthProvider::app_key(app_key.clone()));
        }
        match (&auth.username, &auth.password) {
            (Some(username), password) => Ok(AuthProvider::basic(
                username.clone(),
                password.clone().unwrap_or_default(),
            )),
            (None, _) => bail!(
                "no credentials configured; set auth in the config file or {ENV_USERNAME} / {ENV_APP_KEY}"
            ),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(timeout) = self.timeout_secs {
            config.timeout = Duration::from_secs(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout_secs {
            config.connect_timeout = Duration::from_secs(connect_timeout);
        }
        config
    }

    pub fn build_client(&self) -> Result<VerifaliaClient> {
        let auth = self.auth_provider()?;
        let config = self.client_config();
        let client = if self.base_urls.is_empty() {
            VerifaliaClient::with_config(auth, config)
        } else {
            let base_urls: Vec<&str> = self.base_urls.iter().map(String::as_str).collect();
            VerifaliaClient::with_config_and_base_urls(auth, config, &base_urls)
        };
        client.context("build verifalia client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
auth:
  username: batman
  password: robin
base_urls:
  - http://localhost:8080/v2.5
timeout_secs: 5
"#;

    #[test]
    fn test_parse_yaml() {
        let config: CliConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(config.auth.username.as_deref(), Some("batman"));
        assert_eq!(config.base_urls, vec!["http://localhost:8080/v2.5"]);
        assert_eq!(config.client_config().timeout, Duration::from_secs(5));
        assert_eq!(config.client_config().connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config: CliConfig = serde_yaml::from_str(SAMPLE).unwrap();
        let env = HashMap::from([(ENV_USERNAME, "robin"), (ENV_PASSWORD, "")]);
        config.apply_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.auth.username.as_deref(), Some("robin"));
        assert_eq!(config.auth.password.as_deref(), Some("robin"));
    }

    #[test]
    fn test_env_user_replaces_file_app_key() {
        let mut config: CliConfig = serde_yaml::from_str(SAMPLE).unwrap();
        config.auth.app_key = Some("file-key".to_string());
        config.auth.certificate_pem_path = Some(PathBuf::from("/nonexistent/client.pem"));
        let env = HashMap::from([(ENV_USERNAME, "alfred"), (ENV_PASSWORD, "butler")]);
        config.apply_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert!(config.auth.app_key.is_none());
        assert!(config.auth.certificate_pem_path.is_none());
        assert!(matches!(
            config.auth_provider().unwrap(),
            AuthProvider::Basic(_)
        ));
    }

    #[test]
    fn test_env_app_key_replaces_file_certificate() {
        let mut config: CliConfig = serde_yaml::from_str(SAMPLE).unwrap();
        config.auth.certificate_pem_path = Some(PathBuf::from("/nonexistent/client.pem"));
        let env = HashMap::from([(ENV_APP_KEY, "env-key")]);
        config.apply_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert!(matches!(
            config.auth_provider().unwrap(),
            AuthProvider::AppKey(_)
        ));
    }

    #[test]
    fn test_app_key_preferred_over_user() {
        let mut config: CliConfig = serde_yaml::from_str(SAMPLE).unwrap();
        config.auth.app_key = Some("key".to_string());
        assert!(matches!(
            config.auth_provider().unwrap(),
            AuthProvider::AppKey(_)
        ));
    }

    #[test]
    fn test_missing_credentials() {
        let config = CliConfig::default();
        let err = config.auth_provider().unwrap_err();
        assert!(err.to_string().contains("no credentials configured"));
    }

    #[test]
    fn test_build_client_with_custom_endpoints() {
        let config: CliConfig = serde_yaml::from_str(SAMPLE).unwrap();
        let client = config.build_client().unwrap();
        assert_eq!(client.base_urls()[0].as_str(), "http://localhost:8080/v2.5");
    }
}
