//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Formula parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// The formula uses a construct outside the supported grammar
    #[error("Unsupported expression: {0}")]
    Unsupported(String),

    /// A reference inside the formula is not a valid address
    #[error(transparent)]
    Address(#[from] ripple_sheets_core::Error),

    /// Addition overflowed the value range
    #[error("numeric overflow during evaluation")]
    Overflow,
}
