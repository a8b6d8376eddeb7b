//! Configuration for the market history viewer

use anyhow::{Context, Result};
use market_core::{Language, DEFAULT_PAGE_SIZE};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// =============================================================================
// File-based Configuration (config.toml)
// =============================================================================

/// Configuration loaded from config.toml. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Display settings
#[derive(Debug, Default, Deserialize)]
pub struct DisplayConfig {
    /// "en" or "zh"
    #[serde(default)]
    pub language: Option<Language>,
    /// Transactions per page
    #[serde(default)]
    pub page_size: Option<usize>,
}

/// Storage settings
#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the cache database
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Directory for exported CSV reports
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).with_context(|| {
            format!(
                "Failed to parse {}. Check for:\n\
                 - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
                 - display.language must be \"en\" or \"zh\"\n\
                 - display.page_size must be a positive integer",
                path.display()
            )
        })
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        info!("Loading config from {}", path.display());
        Self::load(path)
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Command-line values that take precedence over the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub language: Option<Language>,
    pub page_size: Option<usize>,
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub language: Language,
    pub page_size: usize,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Config {
    /// Merge the file config with command-line overrides
    pub fn resolve(file_config: FileConfig, overrides: Overrides) -> Result<Self> {
        let page_size = overrides
            .page_size
            .or(file_config.display.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            anyhow::bail!("Page size must be at least 1");
        }

        Ok(Self {
            language: overrides
                .language
                .or(file_config.display.language)
                .unwrap_or_default(),
            page_size,
            data_dir: overrides
                .data_dir
                .or(file_config.storage.data_dir)
                .unwrap_or_else(|| PathBuf::from("./data")),
            output_dir: overrides
                .output_dir
                .or(file_config.storage.output_dir)
                .unwrap_or_else(|| PathBuf::from("./output")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::resolve(FileConfig::default(), Overrides::default()).unwrap();
        assert_eq!(
            config,
            Config {
                language: Language::En,
                page_size: 20,
                data_dir: PathBuf::from("./data"),
                output_dir: PathBuf::from("./output"),
            }
        );
    }

    #[test]
    fn test_parse_file_values() {
        let file = FileConfig::parse(
            r#"
            [display]
            language = "zh"
            page_size = 50

            [storage]
            data_dir = "/tmp/market"
            "#,
        )
        .unwrap();

        let config = Config::resolve(file, Overrides::default()).unwrap();
        assert_eq!(config.language, Language::Zh);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/market"));
        assert_eq!(config.output_dir, PathBuf::from("./output"));
    }

    #[test]
    fn test_overrides_win() {
        let file = FileConfig::parse("[display]\nlanguage = \"zh\"\npage_size = 50\n").unwrap();
        let overrides = Overrides {
            language: Some(Language::En),
            page_size: Some(10),
            ..Default::default()
        };

        let config = Config::resolve(file, overrides).unwrap();
        assert_eq!(config.language, Language::En);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_invalid_language_rejected() {
        assert!(FileConfig::parse("[display]\nlanguage = \"fr\"\n").is_err());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let overrides = Overrides {
            page_size: Some(0),
            ..Default::default()
        };
        assert!(Config::resolve(FileConfig::default(), overrides).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = Path::new("/definitely/not/here/config.toml");
        let file = FileConfig::load_or_default(path).unwrap();
        assert!(file.display.language.is_none());
    }
}
