use contracts::domain::a005_contact::links::OrphanPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Load the demo clients, people, contacts and subscriptions at startup
    #[serde(default = "default_true")]
    pub seed_mock_data: bool,
    #[serde(default)]
    pub orphan_policy: OrphanPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_mock_data: true,
            orphan_policy: OrphanPolicy::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// The single agent working the CRM; stamped into modified_by and agent fields
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub agent: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            agent: "Agent Actuel".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "logs".into(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[store]
seed_mock_data = true
orphan_policy = "allow_dangling"

[session]
agent = "Agent Actuel"

[logging]
dir = "logs"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Resolve the log directory. Relative paths are taken from the executable
/// directory.
pub fn get_log_dir(config: &Config) -> PathBuf {
    let dir = Path::new(&config.logging.dir);

    if dir.is_absolute() {
        return dir.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(dir);
        }
    }

    Path::new("target").join(dir)
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert!(config.store.seed_mock_data);
        assert_eq!(config.store.orphan_policy, OrphanPolicy::AllowDangling);
        assert_eq!(config.session.agent, "Agent Actuel");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[store]
orphan_policy = "cascade"
"#,
        )
        .unwrap();
        assert_eq!(config.store.orphan_policy, OrphanPolicy::Cascade);
        assert!(config.store.seed_mock_data);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.dir, "logs");
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let config: Result<Config, _> = toml::from_str(
            r#"
[store]
orphan_policy = "delete_everything"
"#,
        );
        assert!(config.is_err());
    }
}
