use crate::content::site::SiteContent;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub console: ConsoleProfile,

    #[serde(default)]
    pub content: SiteContent,
}

/// Identity and timing of the console itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleProfile {
    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_cwd")]
    pub cwd: String,

    /// What `whoami` prints
    #[serde(default = "default_user")]
    pub identity: String,

    /// Lines the output log starts with
    #[serde(default = "default_welcome")]
    pub welcome: Vec<String>,

    #[serde(default = "default_double_tab_window")]
    pub double_tab_window_ms: u64,

    /// Delay before a freshly mounted console opens itself
    #[serde(default = "default_auto_open_delay")]
    pub auto_open_delay_ms: u64,
}

fn default_user() -> String {
    "chirag".to_string()
}

fn default_host() -> String {
    "human".to_string()
}

fn default_cwd() -> String {
    "/".to_string()
}

fn default_welcome() -> Vec<String> {
    vec![
        "Welcome to the Human text interface — a textual rendition of this site.".to_string(),
        "Type 'help' or try: cat all | open human | tree".to_string(),
    ]
}

fn default_double_tab_window() -> u64 {
    600
}

fn default_auto_open_delay() -> u64 {
    350
}

impl Default for ConsoleProfile {
    fn default() -> Self {
        Self {
            user: default_user(),
            host: default_host(),
            cwd: default_cwd(),
            identity: default_user(),
            welcome: default_welcome(),
            double_tab_window_ms: default_double_tab_window(),
            auto_open_delay_ms: default_auto_open_delay(),
        }
    }
}

impl ConsoleProfile {
    /// `user@host cwd %`
    pub fn prompt(&self) -> String {
        format!("{}@{} {} %", self.user, self.host, self.cwd)
    }

    pub fn double_tab_window(&self) -> Duration {
        Duration::from_millis(self.double_tab_window_ms)
    }

    pub fn auto_open_delay(&self) -> Duration {
        Duration::from_millis(self.auto_open_delay_ms)
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("no config at {:?}, using defaults", path.as_ref());
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path.as_ref(), self.to_json()?)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Pretty-printed JSON of the effective configuration
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let console = &self.console;
        if console.user.trim().is_empty() || console.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "user and host cannot be empty".to_string(),
            ));
        }

        if console.user.chars().any(char::is_whitespace) {
            return Err(ConfigError::ValidationError(
                "user cannot contain whitespace".to_string(),
            ));
        }

        if console.double_tab_window_ms == 0 {
            return Err(ConfigError::ValidationError(
                "double_tab_window_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.console.prompt(), "chirag@human / %");
        assert_eq!(config.console.identity, "chirag");
        assert_eq!(config.console.welcome.len(), 2);
        assert_eq!(
            config.console.double_tab_window(),
            Duration::from_millis(600)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.console.double_tab_window_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let mut config = Config::default();
        config.console.user = "two words".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let mut config = Config::default();
        config.console.host = "mirror".to_string();
        config.save_to_file(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.console, config.console);
        assert_eq!(loaded.content.quote.author, config.content.quote.author);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{
            "console": {
                "user": "guest",
                "auto_open_delay_ms": 0
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.console.prompt(), "guest@human / %");
        assert_eq!(config.console.identity, "chirag");
        assert_eq!(config.console.auto_open_delay(), Duration::ZERO);
        assert!(!config.content.timeline.is_empty());
    }

    #[test]
    fn test_partial_content_keeps_other_sections() {
        let json = r#"{"content": {"hero": "Robot."}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        let registry = crate::content::ContentRegistry::from_site(&config.content);

        assert_eq!(registry.resolve("hero").unwrap(), "Robot.");
        let quote = registry.resolve("quote").unwrap();
        assert!(quote.contains("Albert Camus"), "quote was {quote:?}");
        let human = registry.resolve("human").unwrap();
        assert!(human.contains("ID: CB-24-HMN"), "human was {human:?}");
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("nope.json");

        assert!(matches!(
            Config::load_from_file(&missing),
            Err(ConfigError::IoError(_))
        ));
        let config = Config::load_or_default(&missing).unwrap();
        assert_eq!(config.console, ConsoleProfile::default());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(err.to_string().starts_with("Parse error:"));
    }
}
