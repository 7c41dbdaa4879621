//! Sheet update engine
//!
//! Implements the full update protocol on top of the raw storage
//! operations in `ripple-sheets-core`:
//!
//! 1. validate the target address and formula,
//! 2. reject expressions that would close a reference cycle,
//! 3. re-point the observer edges (detach stale, attach new),
//! 4. commit the expression and re-evaluate,
//! 5. cascade the recomputation through all transitive dependents.
//!
//! Validation happens strictly before any mutation, so a rejected update
//! leaves the sheet exactly as it was.

use ripple_sheets_core::{Address, Error, Expression, Result, Sheet, Subject};
use ripple_sheets_formula::{
    evaluate, find_cycle, parse_formula, EvaluationContext, FormulaError,
};

/// Statistics from a single update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Number of cell evaluations performed, counting repeats when a
    /// cell is reachable through more than one dependent chain
    pub cells_recalculated: usize,
    /// Observer edges added for newly referenced cells
    pub edges_attached: usize,
    /// Observer edges removed for no-longer-referenced cells
    pub edges_detached: usize,
}

/// Extension trait for [`Sheet`] that adds the update protocol
pub trait SheetUpdateExt {
    /// Set the cell at `address` to `formula`, re-evaluating the cell
    /// and every transitive dependent before returning
    fn set(&mut self, address: &str, formula: &str) -> Result<UpdateStats>;

    /// Typed-address variant of [`set`](SheetUpdateExt::set)
    fn set_expression(&mut self, address: Address, formula: &str) -> Result<UpdateStats>;

    /// Evaluate the expression at `address` against the current sheet
    /// without mutating anything; unset cells evaluate as 0
    fn evaluate_at(&self, address: &Address) -> Result<i64>;
}

impl SheetUpdateExt for Sheet {
    fn set(&mut self, address: &str, formula: &str) -> Result<UpdateStats> {
        let address = Address::parse(address)?;
        self.set_expression(address, formula)
    }

    fn set_expression(&mut self, address: Address, formula: &str) -> Result<UpdateStats> {
        UpdateEngine::new(self).apply(address, formula)
    }

    fn evaluate_at(&self, address: &Address) -> Result<i64> {
        let Some(cell) = self.cell(address) else {
            return Ok(0);
        };
        if cell.is_empty() {
            return Ok(0);
        }
        let ast = parse_formula(cell.expression().text()).map_err(into_core_error)?;
        evaluate(&ast, &EvaluationContext::new(self)).map_err(into_core_error)
    }
}

/// The update engine: one instance per `set` call
struct UpdateEngine<'a> {
    sheet: &'a mut Sheet,
    stats: UpdateStats,
}

impl<'a> UpdateEngine<'a> {
    fn new(sheet: &'a mut Sheet) -> Self {
        Self {
            sheet,
            stats: UpdateStats::default(),
        }
    }

    fn apply(mut self, address: Address, formula: &str) -> Result<UpdateStats> {
        tracing::debug!("set {} = {}", address, formula);

        // Validation: nothing below may mutate the sheet.
        self.check_bounds(&address)?;
        parse_formula(formula).map_err(into_core_error)?;

        let expression = Expression::new(formula)?;
        for reference in expression.references() {
            self.check_bounds(reference)?;
        }

        if let Some(path) = find_cycle(self.sheet, &address, expression.references()) {
            tracing::debug!("rejected {}: reference chain {:?} closes a cycle", address, path);
            return Err(Error::CircularReference(address.to_string()));
        }

        // Commit: re-point observer edges, then store the expression.
        let previous = self.sheet.references(&address);
        let current = expression.references().clone();

        for stale in previous.difference(&current) {
            self.sheet.ensure_cell(*stale)?.detach(address);
            self.stats.edges_detached += 1;
            tracing::trace!("cell {} is no longer observing {}", address, stale);
        }
        for fresh in current.difference(&previous) {
            self.sheet.ensure_cell(*fresh)?.attach(address);
            self.stats.edges_attached += 1;
            tracing::trace!("cell {} is now observing {}", address, fresh);
        }

        self.sheet.ensure_cell(address)?.set_expression(expression);

        // Cascade: the cell, then every transitive dependent.
        self.recalculate(address)?;

        Ok(self.stats)
    }

    /// Re-evaluate one cell and notify its observers, depth-first in
    /// ascending address order. Returns once the whole dependent
    /// subgraph is consistent.
    fn recalculate(&mut self, address: Address) -> Result<()> {
        let Some(cell) = self.sheet.cell(&address) else {
            return Ok(());
        };
        if cell.is_empty() {
            // Placeholders hold no expression and stay at 0.
            return Ok(());
        }

        let ast = parse_formula(cell.expression().text()).map_err(into_core_error)?;
        let value = evaluate(&ast, &EvaluationContext::new(self.sheet)).map_err(into_core_error)?;

        if let Some(cell) = self.sheet.cell_mut(&address) {
            cell.set_value(value);
        }
        self.stats.cells_recalculated += 1;
        tracing::trace!("recalculated {} = {}", address, value);

        let observers: Vec<Address> = self
            .sheet
            .cell(&address)
            .map(|cell| cell.observers().iter().copied().collect())
            .unwrap_or_default();
        for observer in observers {
            self.recalculate(observer)?;
        }

        Ok(())
    }

    fn check_bounds(&self, address: &Address) -> Result<()> {
        if self.sheet.contains(address) {
            return Ok(());
        }
        Err(Error::AddressOutOfBounds {
            address: address.to_string(),
            rows: self.sheet.row_count(),
            columns: self.sheet.column_count(),
        })
    }
}

/// Map formula-level failures onto the core taxonomy
fn into_core_error(err: FormulaError) -> Error {
    match err {
        FormulaError::Parse(msg) => Error::FormulaParse(msg),
        FormulaError::Unsupported(what) => Error::UnsupportedExpression(what),
        FormulaError::Address(err) => err,
        FormulaError::Overflow => Error::other("numeric overflow during evaluation"),
    }
}
