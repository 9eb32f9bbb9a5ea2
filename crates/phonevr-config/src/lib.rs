mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "PHONEVR_CONFIG";

/// Where phonevr keeps its settings, under the platform's per-user config
/// location. Only computed here; [`save_config_to`] creates it on first save
/// so that loading never touches the filesystem.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("platform has no per-user config directory")?;
    Ok(base.join("phonevr"))
}

/// `$PHONEVR_CONFIG` if set, otherwise `config.toml` in [`config_dir`].
pub fn config_path() -> Result<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(config_dir()?.join("config.toml")),
    }
}

/// Parse a TOML config. Missing sections and fields take their defaults.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    Ok(toml::from_str(contents)?)
}

/// Load the config at `path`, or defaults if the file does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        info!(?path, "No config found, using defaults");
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = parse_config(&contents).with_context(|| format!("parsing {}", path.display()))?;
    info!(?path, "Loaded config");
    Ok(config)
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path()?)
}

/// Write `config` to `path` as pretty TOML, creating parent directories.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    info!(?path, "Saved config");
    Ok(())
}

pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to(&config_path()?, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("phonevr-config-does-not-exist.toml");
        assert_eq!(load_config_from(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn saved_file_loads_back() {
        let path = std::env::temp_dir().join(format!("phonevr-config-{}.toml", std::process::id()));
        let mut config = AppConfig::default();
        config.driver.frames = 42;
        config.tracking.unknown_screen = UnknownScreenSetting::Suppress;

        save_config_to(&path, &config).unwrap();
        let loaded = load_config_from(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = std::env::temp_dir().join(format!("phonevr-nested-{}", std::process::id()));
        let path = dir.join("a").join("config.toml");
        save_config_to(&path, &AppConfig::default()).unwrap();
        let loaded = load_config_from(&path);
        std::fs::remove_dir_all(&dir).ok();
        assert_eq!(loaded.unwrap(), AppConfig::default());
    }

    #[test]
    fn config_dir_is_named_for_the_app() {
        // Hosts without a config location report an error instead of a path.
        if let Ok(dir) = config_dir() {
            assert!(dir.ends_with("phonevr"));
        }
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("phonevr-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[driver\nframes = ").unwrap();
        let result = load_config_from(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
