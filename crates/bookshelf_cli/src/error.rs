//! User-facing CLI errors and exit codes.

use bookshelf_core::{BookValidationError, ConfigError, LoggingError, RepoError, TransferError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INVALID_INPUT: i32 = 2;
pub const EXIT_NOT_FOUND: i32 = 3;

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Logging(LoggingError),
    Validation(BookValidationError),
    Store(RepoError),
    Transfer(TransferError),
    Io(std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) => EXIT_INVALID_INPUT,
            Self::Store(RepoError::NotFound(_)) => EXIT_NOT_FOUND,
            _ => EXIT_FAILURE,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Validation(BookValidationError::MissingField(_)) => {
                write!(f, "Title, Author, and Location are required!")
            }
            Self::Store(RepoError::NotFound(id)) => write!(f, "Book not found (id {id})"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Transfer(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<BookValidationError> for CliError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl From<TransferError> for CliError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Io(value.into())
    }
}
