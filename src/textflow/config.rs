use crate::error::{Result, TextflowError};
use crate::model::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const KEY_PAGE_SIZE: &str = "page-size";
pub const KEY_USER: &str = "user";

/// Configuration for textflow, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextflowConfig {
    /// Histories shown per page by `list` and `search`
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Caller token used when neither `--user` nor `TEXTFLOW_USER` is given
    #[serde(default)]
    pub user: Option<String>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for TextflowConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            user: None,
        }
    }
}

impl TextflowConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TextflowError::Io)?;
        let config: TextflowConfig =
            serde_json::from_str(&content).map_err(TextflowError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TextflowError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TextflowError::Serialization)?;
        fs::write(config_path, content).map_err(TextflowError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            KEY_PAGE_SIZE => Some(self.page_size.to_string()),
            KEY_USER => Some(self.user.clone().unwrap_or_default()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            KEY_PAGE_SIZE => {
                let size: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid page size: {}", value))?;
                if size == 0 {
                    return Err("Page size must be at least 1".to_string());
                }
                self.page_size = size;
            }
            KEY_USER => {
                self.user = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &[KEY_PAGE_SIZE, KEY_USER]
    }
}
