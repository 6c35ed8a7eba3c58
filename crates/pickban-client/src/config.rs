// Configuration loading and parsing (client.toml, optional player.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub data_paths: DataPaths,
    pub session: SessionConfig,
    pub player: PlayerConfig,
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.polling.interval_ms)
    }

    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.polling.countdown_tick_ms)
    }

    pub fn cleanup_grace(&self) -> Duration {
        Duration::from_millis(self.polling.cleanup_grace_ms)
    }
}

// ---------------------------------------------------------------------------
// client.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire client.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ClientFile {
    api: ApiConfig,
    polling: PollingConfig,
    data_paths: DataPaths,
    #[serde(default)]
    session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    pub interval_ms: u64,
    pub countdown_tick_ms: u64,
    pub warning_threshold_secs: u64,
    pub cleanup_grace_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub catalog: String,
}

/// Location of the local session store. `None` means the platform data dir.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SessionConfig {
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// player.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PlayerConfig {
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/client.toml` and
/// (optionally) `config/player.toml`, relative to the given `base_dir`.
///
/// Does not auto-copy defaults; `load_config()` does.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- client.toml (required) ---
    let client_path = config_dir.join("client.toml");
    let client_text = read_file(&client_path)?;
    let client: ClientFile =
        toml::from_str(&client_text).map_err(|e| ConfigError::ParseError {
            path: client_path.clone(),
            source: e,
        })?;

    // --- player.toml (optional) ---
    let player_path = config_dir.join("player.toml");
    let player = if player_path.exists() {
        let player_text = read_file(&player_path)?;
        toml::from_str(&player_text).map_err(|e| ConfigError::ParseError {
            path: player_path.clone(),
            source: e,
        })?
    } else {
        PlayerConfig::default()
    };

    let config = Config {
        api: client.api,
        polling: client.polling,
        data_paths: client.data_paths,
        session: client.session,
        player,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        // Without defaults an existing config/ is enough; with neither there
        // is nothing to load.
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the crate root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        // Only plain files are copied.
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        // player.toml.example stays a template; the user copies it by hand.
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // Keep the user's edited copy.
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Loads config relative to the current working directory, copying
/// defaults first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: "must not be empty".into(),
        });
    }
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must start with http:// or https://, got {base_url}"),
        });
    }

    let positive_fields: &[(&str, u64)] = &[
        ("api.request_timeout_secs", config.api.request_timeout_secs),
        ("polling.interval_ms", config.polling.interval_ms),
        ("polling.countdown_tick_ms", config.polling.countdown_tick_ms),
        ("polling.cleanup_grace_ms", config.polling.cleanup_grace_ms),
    ];
    for (name, val) in positive_fields {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0".into(),
            });
        }
    }

    if config.data_paths.catalog.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data_paths.catalog".into(),
            message: "must not be empty".into(),
        });
    }

    if let Some(name) = &config.player.name {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "player.name".into(),
                message: "must not be blank when set".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn crate_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    /// Fresh temp dir with `config/client.toml` copied from the shipped defaults.
    fn scratch_with_defaults(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::copy(
            crate_root().join("defaults/client.toml"),
            tmp.join("config/client.toml"),
        )
        .unwrap();
        tmp
    }

    fn rewrite_client(tmp: &Path, from: &str, to: &str) {
        let path = tmp.join("config/client.toml");
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains(from), "fixture missing `{from}`");
        fs::write(&path, text.replace(from, to)).unwrap();
    }

    fn expect_validation_field(tmp: &Path, expected: &str) {
        match load_config_from(tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_valid_config_from_shipped_defaults() {
        let tmp = scratch_with_defaults("pickban_config_valid");
        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(
            config.api.base_url,
            "https://ilzcew85i3.execute-api.us-east-1.amazonaws.com/dev"
        );
        assert_eq!(config.api.request_timeout_secs, 10);
        assert_eq!(config.polling.interval_ms, 3000);
        assert_eq!(config.polling.countdown_tick_ms, 1000);
        assert_eq!(config.polling.warning_threshold_secs, 10);
        assert_eq!(config.poll_interval(), Duration::from_secs(3));
        assert_eq!(config.data_paths.catalog, "data/resonators.json");
        assert!(config.session.path.is_none());
        assert!(config.player.name.is_none());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn player_toml_prefills_name() {
        let tmp = scratch_with_defaults("pickban_config_player");
        fs::write(tmp.join("config/player.toml"), "name = \"Andy\"\n").unwrap();

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.player.name.as_deref(), Some("Andy"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn session_path_is_optional_but_honored() {
        let tmp = scratch_with_defaults("pickban_config_session");
        rewrite_client(&tmp, "# path = \"pickban-session.db\"", "path = \"s.db\"");

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.session.path.as_deref(), Some("s.db"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let tmp = scratch_with_defaults("pickban_config_zero_poll");
        rewrite_client(&tmp, "interval_ms = 3000", "interval_ms = 0");
        expect_validation_field(&tmp, "polling.interval_ms");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_countdown_tick() {
        let tmp = scratch_with_defaults("pickban_config_zero_tick");
        rewrite_client(&tmp, "countdown_tick_ms = 1000", "countdown_tick_ms = 0");
        expect_validation_field(&tmp, "polling.countdown_tick_ms");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let tmp = scratch_with_defaults("pickban_config_bad_url");
        rewrite_client(
            &tmp,
            "https://ilzcew85i3.execute-api.us-east-1.amazonaws.com/dev",
            "ftp://example.com",
        );
        expect_validation_field(&tmp, "api.base_url");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_blank_player_name() {
        let tmp = scratch_with_defaults("pickban_config_blank_player");
        fs::write(tmp.join("config/player.toml"), "name = \"  \"\n").unwrap();
        expect_validation_field(&tmp, "player.name");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_client_toml() {
        let tmp = std::env::temp_dir().join("pickban_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("client.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = std::env::temp_dir().join("pickban_config_invalid");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/client.toml"), "this is not valid [[[ toml").unwrap();

        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("client.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_and_skips_examples() {
        let tmp = std::env::temp_dir().join("pickban_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::copy(
            crate_root().join("defaults/client.toml"),
            defaults_dir.join("client.toml"),
        )
        .unwrap();
        fs::copy(
            crate_root().join("defaults/player.toml.example"),
            defaults_dir.join("player.toml.example"),
        )
        .unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/client.toml").exists());
        assert!(!tmp.join("config/player.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_keeps_existing() {
        let tmp = std::env::temp_dir().join("pickban_config_ensure_keeps");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("defaults/client.toml"), "# default\n").unwrap();
        fs::write(tmp.join("config/client.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).unwrap();
        assert!(copied.is_empty());
        let content = fs::read_to_string(tmp.join("config/client.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("pickban_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match ensure_config_files(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
