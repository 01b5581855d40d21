use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level Triage configuration stored as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub access: AccessSettings,
    #[serde(default)]
    pub web: WebSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessSettings {
    /// Route a denied navigation is redirected to.
    #[serde(default = "default_route")]
    pub default_route: String,
    /// Route an unauthenticated navigation is redirected to.
    #[serde(default = "default_login_route")]
    pub login_route: String,
    /// Shared HS256 secret used to verify session credentials.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Lifetime of credentials minted by `triage token`.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSettings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_route() -> String {
    "/dashboard".to_string()
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_jwt_secret() -> String {
    "triage-jwt-secret-change-me".to_string()
}

fn default_token_ttl() -> u64 {
    86400
}

/// Longest credential lifetime accepted from config: one year.
pub const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

fn default_listen_addr() -> String {
    "127.0.0.1:9480".to_string()
}

impl Default for AccessSettings {
    fn default() -> Self {
        Self {
            default_route: default_route(),
            login_route: default_login_route(),
            jwt_secret: default_jwt_secret(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl TriageConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| CoreError::TomlDe(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(CoreError::ConfigNotFound(p)) => {
                tracing::debug!("no config at {p}, using defaults");
                Ok(Self::default_config())
            }
            other => other,
        }
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::TomlSer(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config for `triage init`.
    pub fn default_config() -> Self {
        Self {
            access: AccessSettings::default(),
            web: WebSettings::default(),
        }
    }

    /// Routes must be absolute paths, the secret must not be empty and the
    /// token lifetime must be between one second and `MAX_TOKEN_TTL_SECS`.
    pub fn validate(&self) -> Result<()> {
        for (name, route) in [
            ("default_route", &self.access.default_route),
            ("login_route", &self.access.login_route),
        ] {
            if !route.starts_with('/') {
                return Err(CoreError::Config(format!(
                    "{name} must start with '/', got {route:?}"
                )));
            }
        }
        if self.access.jwt_secret.is_empty() {
            return Err(CoreError::Config("jwt_secret must not be empty".to_string()));
        }
        let ttl = self.access.token_ttl_secs;
        if ttl == 0 || ttl > MAX_TOKEN_TTL_SECS {
            return Err(CoreError::Config(format!(
                "token_ttl_secs must be between 1 and {MAX_TOKEN_TTL_SECS}, got {ttl}"
            )));
        }
        Ok(())
    }

    /// Resolve the config file path: `<base_dir>/triage.toml`
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join("triage.toml")
    }

    /// Resolve the default triage home directory: `~/.triage`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".triage"))
            .ok_or_else(|| CoreError::Config("Cannot determine home directory".to_string()))
    }
}
