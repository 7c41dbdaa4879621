//! Cell-related types
//!
//! This module contains:
//! - [`Address`] - A cell's location (e.g., "A1")
//! - [`Expression`] - A formula string plus its referenced addresses
//! - [`Cell`] - A grid slot: expression, computed value, and observers
//! - [`Subject`] - The observer-registration capability cells implement

mod address;
mod expression;

pub use address::Address;
pub use expression::Expression;

use std::collections::BTreeSet;
use std::fmt;

/// Observer registration for dependency tracking
///
/// A cell whose expression references another cell attaches itself to
/// that cell as an observer; when the observed cell's value changes, the
/// update engine walks the observer set and recomputes each entry.
pub trait Subject {
    /// Register a dependent cell
    fn attach(&mut self, observer: Address);

    /// Remove a dependent cell.
    ///
    /// Detaching an observer that was never attached is a bug in the
    /// caller's edge bookkeeping: it trips a debug assertion and is a
    /// no-op in release builds.
    fn detach(&mut self, observer: Address);

    /// Currently attached dependents, in ascending address order
    fn observers(&self) -> &BTreeSet<Address>;
}

/// A cell in the sheet
///
/// Owned exclusively by the [`Sheet`](crate::Sheet) that created it.
/// Holds the current expression, the value last computed for it, and the
/// set of dependent cells to notify when the value changes. A freshly
/// referenced but never-set cell exists in placeholder state: empty
/// expression, value 0.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    address: Address,
    expression: Expression,
    value: i64,
    dependents: BTreeSet<Address>,
}

impl Cell {
    /// Create a cell holding an expression; the value starts at 0 until
    /// the update engine evaluates it
    pub fn new(address: Address, expression: Expression) -> Self {
        Self {
            address,
            expression,
            value: 0,
            dependents: BTreeSet::new(),
        }
    }

    /// Create a placeholder cell for an address that has been referenced
    /// but never set
    pub fn placeholder(address: Address) -> Self {
        Self::new(address, Expression::empty())
    }

    /// The cell's own address
    pub fn address(&self) -> Address {
        self.address
    }

    /// The current expression
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// The value last computed for this cell (0 for placeholders)
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Whether the cell is still in placeholder state
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }

    /// Replace the stored expression. The caller is responsible for
    /// re-evaluating and notifying observers afterwards.
    pub fn set_expression(&mut self, expression: Expression) {
        self.expression = expression;
    }

    /// Store a freshly computed value
    pub fn set_value(&mut self, value: i64) {
        self.value = value;
    }
}

impl Subject for Cell {
    fn attach(&mut self, observer: Address) {
        self.dependents.insert(observer);
    }

    fn detach(&mut self, observer: Address) {
        let removed = self.dependents.remove(&observer);
        debug_assert!(
            removed,
            "detached observer {observer} was not attached to {}",
            self.address
        );
    }

    fn observers(&self) -> &BTreeSet<Address> {
        &self.dependents
    }
}

impl fmt::Display for Cell {
    /// The cell's display form: empty for placeholders, the raw
    /// expression when it textually equals the value, otherwise
    /// `<expression>=<value>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        if self.expression.text() == self.value.to_string() {
            return write!(f, "{}", self.value);
        }
        write!(f, "{}={}", self.expression, self.value)
    }
}
