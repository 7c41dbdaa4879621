//! # ripple-sheets-formula
//!
//! Formula parsing and evaluation for ripple-sheets.
//!
//! This crate provides:
//! - Formula parsing (text → AST) over the restricted grammar of integer
//!   literals, cell references, addition, and parentheses
//! - Formula evaluation (AST → value) against a sheet
//! - Cycle detection over the sheet's reference graph
//!
//! ## Example
//!
//! ```rust
//! use ripple_sheets_formula::{evaluate, parse_formula, EvaluationContext};
//!
//! let ast = parse_formula("1+(2+3)").unwrap();
//! let value = evaluate(&ast, &EvaluationContext::simple()).unwrap();
//! assert_eq!(value, 6);
//! ```

pub mod ast;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::FormulaExpr;
pub use dependency::find_cycle;
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, EvaluationContext};
pub use parser::parse_formula;
