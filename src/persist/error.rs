//! Persistence error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::layout::migrate::DecodeError;

/// Errors from reading or writing stored layouts.
#[derive(Error, Debug)]
pub enum PersistError {
    /// Reading a stored layout failed.
    #[error("Failed to read layout {}: {source}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing a layout failed.
    #[error("Failed to write layout {}: {source}", path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Removing a stored layout failed.
    #[error("Failed to remove layout {}: {source}", path.display())]
    Remove {
        /// File being removed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The layout could not be encoded.
    #[error("Failed to encode layout: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backend refused the operation.
    #[error("Layout store unavailable: {0}")]
    Unavailable(String),
}

/// Errors from named layout collections.
#[derive(Error, Debug)]
pub enum CollectionError {
    /// Collection names must contain something other than whitespace.
    #[error("Collection name must not be blank")]
    BlankName,

    /// No collection with the given name in this scope.
    #[error("No layout collection named '{name}'")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The stored collection cannot be turned into a layout.
    #[error("Layout collection '{name}' is unreadable: {source}")]
    Malformed {
        /// Collection name.
        name: String,
        /// Why decoding failed.
        #[source]
        source: DecodeError,
    },

    /// The backend failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
}
