pub mod model;

use crate::bingo::Pool;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub use model::{AppConfig, LoggingConfig, PoolConfig, StorageConfig, UiConfig};

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bingo-board")
        .join("config.toml")
}

/// Load the config, writing a default one on first run.
pub fn load_config() -> Result<AppConfig> {
    load_or_create(&config_path())
}

fn load_or_create(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let config = AppConfig::default();
        // First run without a writable config dir still works on defaults
        if let Err(e) = save_config_to(&config, path) {
            warn!(path = %path.display(), error = %e, "could not write default config");
        }
        return Ok(config);
    }
    load_config_from(path)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config file")?;
    Ok(config)
}

fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Resolve the item pool from config.
///
/// An unreadable pool file yields an empty pool: the components report it
/// as a configuration error in their own views instead of aborting startup.
pub fn load_pool(config: &PoolConfig) -> Pool {
    if let Some(file) = &config.file {
        let path = expand_home(&file.to_string_lossy());
        return match std::fs::read_to_string(&path) {
            Ok(text) => {
                let pool = Pool::from_text(&text);
                info!(path = %path.display(), items = pool.len(), "loaded pool file");
                pool
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "bingo items not available");
                Pool::new(Vec::<String>::new())
            }
        };
    }
    if !config.items.is_empty() {
        return Pool::new(config.items.iter().cloned());
    }
    Pool::builtin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.pool.file.is_none());
        assert!(config.pool.items.is_empty());
        assert_eq!(config.storage.data_dir, "~/.local/share/bingo-board");
        assert!(config.ui.show_help);
        assert!(config.logging.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [pool]
            items = ["one", "two"]

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.pool.items, vec!["one", "two"]);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.enabled);
    }

    #[test]
    fn test_config_round_trip_through_file() {
        let mut config = AppConfig::default();
        config.ui.show_help = false;
        config.pool.items = vec!["x".to_string()];
        let file = NamedTempFile::new().unwrap();
        save_config_to(&config, file.path()).unwrap();
        let loaded = load_config_from(file.path()).unwrap();
        assert!(!loaded.ui.show_help);
        assert_eq!(loaded.pool.items, vec!["x"]);
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bingo-board").join("config.toml");
        let config = load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(load_config_from(&path).unwrap().ui.show_help, config.ui.show_help);
    }

    #[test]
    fn test_first_run_survives_unwritable_config_dir() {
        // A regular file where the config directory should be
        let blocker = NamedTempFile::new().unwrap();
        let path = blocker.path().join("config.toml");
        let config = load_or_create(&path).unwrap();
        assert!(config.logging.enabled);
        assert!(!path.exists());
    }

    #[test]
    fn test_load_config_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[pool\nitems = 3").unwrap();
        assert!(load_config_from(file.path()).is_err());
    }

    #[test]
    fn test_load_pool_precedence() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# items\nfrom file\nanother").unwrap();

        let from_file = load_pool(&PoolConfig {
            file: Some(file.path().to_path_buf()),
            items: vec!["ignored".to_string()],
        });
        assert_eq!(from_file.items(), &["from file", "another"]);

        let from_items = load_pool(&PoolConfig {
            file: None,
            items: vec!["inline".to_string()],
        });
        assert_eq!(from_items.items(), &["inline"]);

        assert_eq!(load_pool(&PoolConfig::default()), Pool::builtin());
    }

    #[test]
    fn test_missing_pool_file_yields_empty_pool() {
        let pool = load_pool(&PoolConfig {
            file: Some(PathBuf::from("/definitely/not/here/pool.txt")),
            items: Vec::new(),
        });
        assert!(pool.is_empty());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/x"), PathBuf::from("/tmp/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/data"), home.join("data"));
            assert_eq!(expand_home("~"), home);
        }
    }
}
