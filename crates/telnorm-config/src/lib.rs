use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use telnorm_core::{MalformedPolicy, MarkerMatch, ReplaceMode, DEFAULT_OUTPUT_PREFIX};
use thiserror::Error;

const APP_DIR: &str = "telnorm";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub output_prefix: String,
    pub rewrite: RewriteConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteConfig {
    pub replace: ReplaceMode,
    pub on_malformed: MalformedPolicy,
    pub markers: MarkerMatch,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            rewrite: RewriteConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid output_prefix value: {0:?}")]
    InvalidOutputPrefix(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    output_prefix: Option<String>,
    rewrite: Option<RewriteFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RewriteFile {
    replace: Option<ReplaceMode>,
    on_malformed: Option<MalformedPolicy>,
    markers: Option<MarkerMatch>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(prefix) = parsed.output_prefix {
        config.output_prefix = validate_output_prefix(prefix)?;
    }

    if let Some(rewrite) = parsed.rewrite {
        if let Some(replace) = rewrite.replace {
            config.rewrite.replace = replace;
        }
        if let Some(on_malformed) = rewrite.on_malformed {
            config.rewrite.on_malformed = on_malformed;
        }
        if let Some(markers) = rewrite.markers {
            config.rewrite.markers = markers;
        }
    }

    Ok(config)
}

/// The prefix is prepended to a bare file name, so it must not be empty or
/// contain a path separator.
pub fn validate_output_prefix(prefix: String) -> Result<String> {
    if prefix.is_empty() || prefix.contains(['/', '\\']) {
        return Err(ConfigError::InvalidOutputPrefix(prefix));
    }
    Ok(prefix)
}
