//! Formula evaluator
//!
//! Evaluates formula ASTs to produce values.

use crate::ast::FormulaExpr;
use crate::error::{FormulaError, FormulaResult};
use ripple_sheets_core::{Address, Sheet};

/// Context for formula evaluation
pub struct EvaluationContext<'a> {
    /// Reference to the sheet for cell lookups
    pub sheet: Option<&'a Sheet>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context resolving references against a sheet
    pub fn new(sheet: &'a Sheet) -> Self {
        Self { sheet: Some(sheet) }
    }

    /// Create a simple context without a sheet (for testing); every
    /// reference resolves to 0
    pub fn simple() -> Self {
        Self { sheet: None }
    }

    /// Resolve a referenced cell to its current value.
    ///
    /// Unset cells evaluate as 0, the same policy the sheet applies.
    pub fn cell_value(&self, address: &Address) -> i64 {
        self.sheet.map(|sheet| sheet.value(address)).unwrap_or(0)
    }
}

/// Evaluate a formula AST against a context
pub fn evaluate(expr: &FormulaExpr, ctx: &EvaluationContext) -> FormulaResult<i64> {
    match expr {
        FormulaExpr::Number(n) => Ok(*n),
        FormulaExpr::CellRef(address) => Ok(ctx.cell_value(address)),
        FormulaExpr::Add { left, right } => {
            let left = evaluate(left, ctx)?;
            let right = evaluate(right, ctx)?;
            left.checked_add(right).ok_or(FormulaError::Overflow)
        }
    }
}
