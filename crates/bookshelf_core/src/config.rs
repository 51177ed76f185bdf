//! Runtime configuration resolution.
//!
//! Each setting resolves as: explicit value, then environment variable, then
//! default. Blank environment values count as unset. The default database
//! lives under `$HOME`; without a home directory an explicit path is required.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "BOOKSHELF_DB_PATH";
pub const ENV_LOG_DIR: &str = "BOOKSHELF_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "BOOKSHELF_LOG_LEVEL";

const DEFAULT_DIR_NAME: &str = ".bookshelf";
const DEFAULT_DB_FILE_NAME: &str = "books.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Log directory must be absolute.
    RelativeLogDir(PathBuf),
    /// No database path was given and `HOME` is unset.
    NoDefaultDbPath,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeLogDir(path) => {
                write!(f, "log directory must be absolute, got `{}`", path.display())
            }
            Self::NoDefaultDbPath => write!(f, "HOME is unset; pass --db or set {ENV_DB_PATH}"),
        }
    }
}

impl Error for ConfigError {}

/// Raw inputs gathered by a front end.
#[derive(Debug, Clone, Default)]
pub struct ConfigInput {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub home: Option<PathBuf>,
}

impl ConfigInput {
    /// Fills unset fields from the process environment.
    pub fn with_process_env(self) -> Self {
        self.with_env(|key| std::env::var(key).ok())
    }

    /// Fills unset fields from `lookup`.
    pub fn with_env(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            db_path: self.db_path.or_else(|| non_blank(ENV_DB_PATH).map(PathBuf::from)),
            log_dir: self.log_dir.or_else(|| non_blank(ENV_LOG_DIR).map(PathBuf::from)),
            log_level: self.log_level.or_else(|| non_blank(ENV_LOG_LEVEL)),
            home: self
                .home
                .or_else(|| non_blank("HOME").map(PathBuf::from)),
        }
    }
}

/// Effective catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub db_path: PathBuf,
    /// File logging is enabled only when set.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl CatalogConfig {
    pub fn resolve(input: ConfigInput) -> Result<Self, ConfigError> {
        if let Some(dir) = &input.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }

        let db_path = match (input.db_path, input.home) {
            (Some(path), _) => path,
            (None, Some(home)) => home.join(DEFAULT_DIR_NAME).join(DEFAULT_DB_FILE_NAME),
            (None, None) => return Err(ConfigError::NoDefaultDbPath),
        };

        Ok(Self {
            db_path,
            log_dir: input.log_dir,
            log_level: input
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
        })
    }
}
