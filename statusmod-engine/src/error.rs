use std::io;

use thiserror::Error;

/// Rejections produced while validating user supplied status text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("status needs at least {required} word(s)")]
    InsufficientWords { required: u32 },
}

/// Errors emitted while reading or writing the settings file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("settings read failed: {0}")]
    Read(#[source] io::Error),

    #[error("settings write failed: {0}")]
    Write(#[source] io::Error),

    #[error("settings JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by the command entry points.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("setting was not saved: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, CommandError>;
