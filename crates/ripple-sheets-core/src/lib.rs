//! # ripple-sheets-core
//!
//! Core data structures for the ripple-sheets reactive spreadsheet
//! engine.
//!
//! This crate provides the fundamental types used throughout
//! ripple-sheets:
//! - [`Address`] - Cell addressing (row letter + column number)
//! - [`Expression`] - A formula string plus its referenced addresses
//! - [`Cell`] - A grid slot holding an expression, its computed value,
//!   and its dependents
//! - [`Sheet`] - The bounded grid that owns all cells
//!
//! Formula parsing and evaluation live in `ripple-sheets-formula`; the
//! update protocol that keeps dependent cells consistent lives in the
//! `ripple-sheets` facade crate.
//!
//! ## Example
//!
//! ```rust
//! use ripple_sheets_core::{Address, Sheet};
//!
//! let sheet = Sheet::new(5, 5).unwrap();
//! let a1 = Address::parse("A1").unwrap();
//!
//! // Nothing set yet: reads fall back to the empty state
//! assert!(sheet.cell(&a1).is_none());
//! assert_eq!(sheet.value(&a1), 0);
//! assert_eq!(sheet.display(&a1), "");
//! ```

pub mod cell;
pub mod error;
pub mod sheet;

// Re-exports for convenience
pub use cell::{Address, Cell, Expression, Subject};
pub use error::{Error, Result};
pub use sheet::Sheet;

/// Maximum number of rows in a sheet (rows are lettered `A`-`Z`)
pub const MAX_SHEET_ROWS: usize = 26;
