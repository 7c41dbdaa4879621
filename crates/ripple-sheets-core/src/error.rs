//! Error types for ripple-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ripple-sheets-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid sheet dimensions
    #[error("Invalid sheet dimensions: {0}")]
    InvalidDimensions(String),

    /// Address outside the sheet's fixed bounds
    #[error("Address {address} outside sheet bounds ({rows} rows, {columns} columns)")]
    AddressOutOfBounds {
        address: String,
        rows: usize,
        columns: usize,
    },

    /// Circular reference detected
    #[error("Circular reference detected involving cell {0}")]
    CircularReference(String),

    /// Expression uses a construct outside the supported grammar
    #[error("Unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// Formula parse error
    #[error("Formula parse error: {0}")]
    FormulaParse(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
