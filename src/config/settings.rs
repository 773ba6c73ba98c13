use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::Location;

fn default_city() -> String {
    "Dhaka".to_string()
}
fn default_country() -> String {
    "Bangladesh".to_string()
}
fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_country")]
    pub country: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            country: default_country(),
        }
    }
}

impl LocationConfig {
    pub fn to_location(&self) -> Location {
        Location::new(self.city.clone(), self.country.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AlarmConfig {
    /// Start with the adhan alarm armed.
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotesConfig {
    /// Generative model used for the quote carousel. The credential comes
    /// from the GEMINI_API_KEY environment variable, never from this file.
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub alarm: AlarmConfig,
    #[serde(default)]
    pub quotes: QuotesConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "waqt").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_gets_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.location.city, "Dhaka");
        assert_eq!(config.location.country, "Bangladesh");
        assert!(!config.alarm.enabled);
        assert_eq!(config.quotes.model, "gemini-2.5-flash");
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config: AppConfig = toml::from_str(
            "[location]\ncity = \"Istanbul\"\ncountry = \"Turkey\"\n\n[alarm]\nenabled = true\n",
        )
        .unwrap();
        assert_eq!(config.location.to_location().to_string(), "Istanbul, Turkey");
        assert!(config.alarm.enabled);
        assert_eq!(config.quotes.model, "gemini-2.5-flash");
    }
}
