//! Sheet type

use ahash::AHashMap;

use crate::cell::{Address, Cell};
use crate::error::{Error, Result};
use crate::MAX_SHEET_ROWS;
use std::collections::BTreeSet;
use std::fmt;

/// A bounded grid of cells
///
/// The sheet is the sole owner of its cells and the sole entry point for
/// reading them. Storage is sparse: an address inside the bounds with no
/// stored cell has simply never been set (and never been referenced).
/// Mutation with dependency maintenance lives in the facade crate's
/// update engine; the methods here are the raw storage operations it
/// builds on.
#[derive(Debug)]
pub struct Sheet {
    row_count: usize,
    column_count: usize,
    cells: AHashMap<Address, Cell>,
}

impl Sheet {
    /// Create a sheet with fixed bounds
    ///
    /// Rows are lettered, so `row_count` cannot exceed 26.
    pub fn new(row_count: usize, column_count: usize) -> Result<Self> {
        if row_count == 0 || column_count == 0 {
            return Err(Error::InvalidDimensions(format!(
                "{row_count} rows x {column_count} columns"
            )));
        }
        if row_count > MAX_SHEET_ROWS {
            return Err(Error::InvalidDimensions(format!(
                "{row_count} rows exceeds the {MAX_SHEET_ROWS}-row limit"
            )));
        }
        Ok(Self {
            row_count,
            column_count,
            cells: AHashMap::new(),
        })
    }

    /// Number of rows (lettered `A` onward)
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns (numbered 1 onward)
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Whether an address falls inside the sheet's bounds
    pub fn contains(&self, address: &Address) -> bool {
        address.row_index() < self.row_count && address.column_index() < self.column_count
    }

    /// Get the cell at an address, or `None` if it was never set or
    /// referenced
    pub fn cell(&self, address: &Address) -> Option<&Cell> {
        self.cells.get(address)
    }

    /// Mutable access to the cell at an address
    pub fn cell_mut(&mut self, address: &Address) -> Option<&mut Cell> {
        self.cells.get_mut(address)
    }

    /// Get a cell by address string (e.g., "A1")
    pub fn cell_at(&self, address: &str) -> Result<Option<&Cell>> {
        let address = Address::parse(address)?;
        self.check_bounds(&address)?;
        Ok(self.cell(&address))
    }

    /// Get the cell at an address, materializing a placeholder if the
    /// address has never been touched
    pub fn ensure_cell(&mut self, address: Address) -> Result<&mut Cell> {
        self.check_bounds(&address)?;
        Ok(self
            .cells
            .entry(address)
            .or_insert_with(|| Cell::placeholder(address)))
    }

    /// The set of addresses referenced by the cell at `address`, empty if
    /// the cell was never set
    pub fn references(&self, address: &Address) -> BTreeSet<Address> {
        self.cell(address)
            .map(|cell| cell.expression().references().clone())
            .unwrap_or_default()
    }

    /// The current value at `address`; unset cells evaluate as 0
    pub fn value(&self, address: &Address) -> i64 {
        self.cell(address).map(Cell::value).unwrap_or(0)
    }

    /// The display form at `address`; empty string if the cell was never
    /// set
    pub fn display(&self, address: &Address) -> String {
        self.cell(address)
            .map(|cell| cell.to_string())
            .unwrap_or_default()
    }

    /// Every address inside the bounds, in row-major order
    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        (0..self.row_count).flat_map(move |row| {
            (0..self.column_count).map(move |column| Address::from_indices(row, column))
        })
    }

    /// Number of materialized cells (set cells plus referenced
    /// placeholders)
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn check_bounds(&self, address: &Address) -> Result<()> {
        if self.contains(address) {
            return Ok(());
        }
        Err(Error::AddressOutOfBounds {
            address: address.to_string(),
            rows: self.row_count,
            columns: self.column_count,
        })
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widest = self
            .cells
            .values()
            .map(|cell| cell.to_string().chars().count())
            .max()
            .unwrap_or(1)
            .max(1);

        for row in 0..self.row_count {
            let mut line = String::new();
            for column in 0..self.column_count {
                let address = Address::from_indices(row, column);
                let text = self.display(&address);
                line.push_str(&format!("{text:<width$}", width = widest + 2));
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Expression;
    use pretty_assertions::assert_eq;

    fn addr(s: &str) -> Address {
        Address::parse(s).unwrap()
    }

    #[test]
    fn test_new_validates_dimensions() {
        assert!(Sheet::new(5, 5).is_ok());
        assert!(Sheet::new(26, 1).is_ok());
        assert!(matches!(
            Sheet::new(0, 5),
            Err(Error::InvalidDimensions(_))
        ));
        assert!(matches!(
            Sheet::new(5, 0),
            Err(Error::InvalidDimensions(_))
        ));
        assert!(matches!(
            Sheet::new(27, 5),
            Err(Error::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_contains() {
        let sheet = Sheet::new(2, 3).unwrap();
        assert!(sheet.contains(&addr("A1")));
        assert!(sheet.contains(&addr("B3")));
        assert!(!sheet.contains(&addr("C1")));
        assert!(!sheet.contains(&addr("A4")));
    }

    #[test]
    fn test_unset_cells_read_as_empty() {
        let sheet = Sheet::new(5, 5).unwrap();
        assert!(sheet.cell(&addr("A1")).is_none());
        assert_eq!(sheet.value(&addr("A1")), 0);
        assert_eq!(sheet.display(&addr("A1")), "");
        assert!(sheet.references(&addr("A1")).is_empty());
    }

    #[test]
    fn test_ensure_cell_materializes_placeholder() {
        let mut sheet = Sheet::new(5, 5).unwrap();
        assert_eq!(sheet.cell_count(), 0);

        let cell = sheet.ensure_cell(addr("B2")).unwrap();
        assert!(cell.is_empty());
        assert_eq!(sheet.cell_count(), 1);

        // Second call returns the same slot
        sheet.ensure_cell(addr("B2")).unwrap();
        assert_eq!(sheet.cell_count(), 1);
    }

    #[test]
    fn test_ensure_cell_rejects_out_of_bounds() {
        let mut sheet = Sheet::new(2, 2).unwrap();
        assert!(matches!(
            sheet.ensure_cell(addr("C1")),
            Err(Error::AddressOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_cell_at_parses_and_bounds_checks() {
        let sheet = Sheet::new(2, 2).unwrap();
        assert!(sheet.cell_at("A1").unwrap().is_none());
        assert!(matches!(
            sheet.cell_at("not-an-address"),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            sheet.cell_at("Z9"),
            Err(Error::AddressOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_addresses_row_major() {
        let sheet = Sheet::new(2, 2).unwrap();
        let all: Vec<String> = sheet.addresses().map(|a| a.to_string()).collect();
        assert_eq!(all, ["A1", "A2", "B1", "B2"]);
    }

    #[test]
    fn test_display_grid() {
        let mut sheet = Sheet::new(2, 2).unwrap();
        let cell = sheet.ensure_cell(addr("A1")).unwrap();
        cell.set_expression(Expression::new("2").unwrap());
        cell.set_value(2);
        let cell = sheet.ensure_cell(addr("B2")).unwrap();
        cell.set_expression(Expression::new("A1+3").unwrap());
        cell.set_value(5);

        let rendered = sheet.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].trim_end(), "2");
        assert!(lines[1].contains("A1+3=5"));
    }
}
