//! Cell address type

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// The address grammar: one uppercase row letter, then a column number
/// with no leading zero.
fn address_re() -> &'static Regex {
    static ADDRESS_RE: OnceLock<Regex> = OnceLock::new();
    ADDRESS_RE
        .get_or_init(|| Regex::new(r"^([A-Z])([1-9][0-9]*)$").expect("address regex must compile"))
}

/// A cell address (e.g., "A1")
///
/// The letter names the row (`A`-`Z`) and the number names the column
/// (1-based). Addresses are immutable value types: cheap to copy, usable
/// as map keys, and ordered row-first so that sorted collections iterate
/// deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    row: char,
    column: u32,
}

impl Address {
    /// Create an address from a row letter and a 1-based column number
    pub fn new(row: char, column: u32) -> Result<Self> {
        if !row.is_ascii_uppercase() {
            return Err(Error::InvalidAddress(format!("{row}{column}")));
        }
        if column == 0 {
            return Err(Error::InvalidAddress(format!("{row}{column}")));
        }
        Ok(Self { row, column })
    }

    /// Parse an address from its textual form
    ///
    /// # Examples
    /// ```
    /// use ripple_sheets_core::Address;
    ///
    /// let addr = Address::parse("B12").unwrap();
    /// assert_eq!(addr.row(), 'B');
    /// assert_eq!(addr.column(), 12);
    ///
    /// assert!(Address::parse("b1").is_err());
    /// assert!(Address::parse("A0").is_err());
    /// assert!(Address::parse("A01").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let caps = address_re()
            .captures(s)
            .ok_or_else(|| Error::InvalidAddress(s.to_string()))?;

        let row = caps[1]
            .chars()
            .next()
            .ok_or_else(|| Error::InvalidAddress(s.to_string()))?;
        let column: u32 = caps[2]
            .parse()
            .map_err(|_| Error::InvalidAddress(s.to_string()))?;

        Self::new(row, column)
    }

    /// The row letter (`A`-`Z`)
    pub fn row(&self) -> char {
        self.row
    }

    /// The 1-based column number
    pub fn column(&self) -> u32 {
        self.column
    }

    /// 0-based row index (A = 0, B = 1, ...)
    pub fn row_index(&self) -> usize {
        (self.row as u8 - b'A') as usize
    }

    /// 0-based column index
    pub fn column_index(&self) -> usize {
        (self.column - 1) as usize
    }

    /// Build an address from 0-based grid indices.
    ///
    /// Callers must already have checked the indices against the grid
    /// bounds; `row_index` above 25 cannot be represented.
    pub(crate) fn from_indices(row_index: usize, column_index: usize) -> Self {
        Self {
            row: (b'A' + row_index as u8) as char,
            column: column_index as u32 + 1,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
