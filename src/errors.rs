//! Unified error type for the storefront API.
//!
//! Every layer returns [`Result`]; the HTTP layer maps the variants onto status
//! codes in [`crate::api::error`].

use thiserror::Error;

/// All failures the service can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing configuration (environment, seed file).
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// Storage backend failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The site-settings singleton has not been written yet.
    #[error("Site settings not found; seed the database first")]
    SettingsNotFound,

    /// No catalog record matches the given id or slug.
    #[error("{collection} record not found: {key}")]
    RecordNotFound {
        /// Collection that was searched
        collection: String,
        /// Id or slug that was looked up
        key: String,
    },

    /// A patch, record or import bundle has the wrong shape.
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable reason
        message: String,
    },

    /// A record with the same id or slug already exists.
    #[error("{collection} record with {field} '{value}' already exists")]
    Conflict {
        /// Collection the record belongs to
        collection: String,
        /// `id` or `slug`
        field: &'static str,
        /// The duplicated value
        value: String,
    },

    /// Theme import failed after some collections had already been replaced.
    #[error("Import failed after replacing {completed:?}: {source}")]
    PartialImport {
        /// Collections that were fully replaced before the failure
        completed: Vec<String>,
        /// The failure that stopped the import
        source: Box<Error>,
    },

    /// A stored document could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O failure (seed file, listener).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True for the not-found variants.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::SettingsNotFound | Self::RecordNotFound { .. })
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
