use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::chat::Messages;
use crate::{Error, Result};
use crate::query::DEFAULT_THRESHOLD;

/// Environment variable naming the escalation spreadsheet
pub const SHEET_NAME_ENV: &str = "GOOGLE_SHEET_NAME";

pub const DEFAULT_SHEET_NAME: &str = "chatbotAccess";
pub const DEFAULT_CREDENTIALS_PATH: &str = "credentials.json";
pub const DEFAULT_SHEET_DB_PATH: &str = "escalations.db";
pub const DEFAULT_DATABASE_PATH: &str = "qa.db";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SheetBackend {
    #[default]
    Google,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SheetConfig {
    pub backend: Option<SheetBackend>,
    pub name: Option<String>,
    pub credentials: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessagesConfig {
    pub empty_prompt: Option<String>,
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QabotConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
    pub threshold: Option<f32>,
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
}

impl QabotConfig {
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(self.database.as_deref().unwrap_or(DEFAULT_DATABASE_PATH))
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold.unwrap_or(DEFAULT_THRESHOLD)
    }

    pub fn sheet_backend(&self) -> SheetBackend {
        self.sheet.backend.unwrap_or_default()
    }

    /// Config file value, then `GOOGLE_SHEET_NAME`, then the default
    pub fn sheet_name(&self) -> String {
        resolve_sheet_name(self.sheet.name.as_deref(), std::env::var(SHEET_NAME_ENV).ok())
    }

    pub fn credentials_path(&self) -> PathBuf {
        PathBuf::from(self.sheet.credentials.as_deref().unwrap_or(DEFAULT_CREDENTIALS_PATH))
    }

    pub fn sheet_db_path(&self) -> PathBuf {
        PathBuf::from(self.sheet.path.as_deref().unwrap_or(DEFAULT_SHEET_DB_PATH))
    }

    pub fn messages(&self) -> Messages {
        let defaults = Messages::default();
        Messages {
            empty_prompt: self.messages.empty_prompt.clone().unwrap_or(defaults.empty_prompt),
            fallback: self.messages.fallback.clone().unwrap_or(defaults.fallback),
        }
    }
}

fn resolve_sheet_name(configured: Option<&str>, env: Option<String>) -> String {
    configured
        .map(str::to_string)
        .or_else(|| env.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string())
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("qabot.toml")
}

/// Load the config file; a missing default file is not an error
pub fn load_config(path: Option<&Path>) -> Result<QabotConfig> {
    let explicit = path.is_some();
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        if explicit {
            return Err(Error::Config(format!("config file not found: {}", path.display())));
        }
        return Ok(QabotConfig::default());
    }

    let contents = std::fs::read_to_string(&path)?;
    toml::from_str(&contents).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QabotConfig::default();
        assert_eq!(config.port(), 5000);
        assert_eq!(config.threshold(), 0.5);
        assert_eq!(config.sheet_backend(), SheetBackend::Google);
        assert_eq!(config.credentials_path(), PathBuf::from("credentials.json"));
        assert_eq!(config.messages(), Messages::default());
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qabot.toml");
        std::fs::write(
            &path,
            r#"
database = "faq.db"
threshold = 0.4

[sheet]
backend = "sqlite"
path = "local.db"

[messages]
fallback = "No idea."
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("faq.db"));
        assert_eq!(config.threshold(), 0.4);
        assert_eq!(config.sheet_backend(), SheetBackend::Sqlite);
        assert_eq!(config.sheet_db_path(), PathBuf::from("local.db"));
        assert_eq!(config.messages().fallback, "No idea.");
        assert_eq!(config.messages().empty_prompt, "Please ask a question.");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_config(Some(&dir.path().join("nope.toml"))),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qabot.toml");
        std::fs::write(&path, "port = \"not a number\"").unwrap();

        assert!(matches!(load_config(Some(&path)), Err(Error::Config(_))));
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but cannot be read as a file.
        assert!(matches!(load_config(Some(dir.path())), Err(Error::Io(_))));
    }

    #[test]
    fn test_sheet_name_precedence() {
        assert_eq!(resolve_sheet_name(Some("fromfile"), Some("fromenv".into())), "fromfile");
        assert_eq!(resolve_sheet_name(None, Some("fromenv".into())), "fromenv");
        assert_eq!(resolve_sheet_name(None, Some("  ".into())), "chatbotAccess");
        assert_eq!(resolve_sheet_name(None, None), "chatbotAccess");
    }
}
