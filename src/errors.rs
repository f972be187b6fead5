//! Unified error type for `BuildBoard`.
//!
//! Every fallible operation in the crate returns [`Result`], so storage,
//! validation, and Discord framework failures all flow through one enum.

use thiserror::Error;

/// All errors that can occur while serving the dashboard.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A filesystem operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The key-value table could not be read or written
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A collection could not be serialized before saving
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required form field was blank
    #[error("{message}")]
    Validation {
        /// User-facing explanation, shown as-is
        message: String,
    },

    /// No material exists at the given list position. Displayed 1-based, the
    /// way lists number their entries.
    #[error("No material number {} in the inventory", .index.saturating_add(1))]
    MaterialNotFound {
        /// Position that was requested
        index: usize,
    },

    /// No worker carries the given id
    #[error("Worker not found: {id}")]
    WorkerNotFound {
        /// Id that was requested
        id: i64,
    },

    /// No project carries the given id
    #[error("Project not found: {id}")]
    ProjectNotFound {
        /// Id that was requested
        id: i64,
    },

    /// An integer option did not fit the target type
    #[error("Number conversion error: {0}")]
    Conversion(#[from] std::num::TryFromIntError),

    /// Building a reply message failed
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// A required environment variable is missing
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise reported a failure
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Builds a [`Error::Validation`] from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
