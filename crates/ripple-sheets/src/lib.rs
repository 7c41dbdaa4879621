//! # ripple-sheets
//!
//! A reactive toy spreadsheet engine: a bounded grid of cells holding
//! arithmetic expressions that may reference other cells by address,
//! with automatic recomputation on dependency change and cycle rejection
//! before commit.
//!
//! The expression grammar is deliberately restricted to integer
//! literals, cell references, addition, and parentheses; anything else
//! is rejected with a typed error.
//!
//! ## Example
//!
//! ```rust
//! use ripple_sheets::prelude::*;
//!
//! let mut sheet = Sheet::new(5, 5).unwrap();
//!
//! sheet.set("A1", "2").unwrap();
//! sheet.set("A2", "5").unwrap();
//! sheet.set("A3", "A1+A2").unwrap();
//!
//! let a3 = Address::parse("A3").unwrap();
//! assert_eq!(sheet.value(&a3), 7);
//!
//! // Changing a dependency recomputes every dependent before returning
//! sheet.set("A1", "4").unwrap();
//! assert_eq!(sheet.value(&a3), 9);
//!
//! // A reference chain back to the changed cell is rejected up front
//! assert!(sheet.set("A1", "A3").is_err());
//! assert_eq!(sheet.display(&a3), "A1+A2=9");
//! ```

pub mod prelude;
pub mod update;

// Re-export update types
pub use update::{SheetUpdateExt, UpdateStats};

// Re-export core types
pub use ripple_sheets_core::{
    Address, Cell, Error, Expression, Result, Sheet, Subject, MAX_SHEET_ROWS,
};

// Re-export the formula toolkit
pub use ripple_sheets_formula::{
    evaluate, find_cycle, parse_formula, EvaluationContext, FormulaError, FormulaExpr,
    FormulaResult,
};
