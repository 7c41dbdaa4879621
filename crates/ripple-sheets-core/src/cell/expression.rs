//! Formula expression with statically extracted references

use crate::cell::Address;
use crate::error::Result;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

/// Matches every substring that looks like a cell address. Unanchored on
/// purpose: references are collected wherever they appear in the text.
fn reference_re() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE
        .get_or_init(|| Regex::new(r"[A-Z][1-9][0-9]*").expect("reference regex must compile"))
}

/// A formula string plus the set of addresses it textually references
///
/// The reference set is derived once at construction and never changes;
/// replacing a cell's formula means constructing a new `Expression`.
/// Equality is by raw text.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expression {
    text: String,
    references: BTreeSet<Address>,
}

impl Expression {
    /// Construct an expression, scanning the text for referenced addresses
    ///
    /// Fails exactly like [`Address::parse`] when a scanned reference
    /// cannot be represented (e.g. a column number too large to store).
    pub fn new<S: Into<String>>(text: S) -> Result<Self> {
        let text = text.into();
        let mut references = BTreeSet::new();
        for found in reference_re().find_iter(&text) {
            references.insert(Address::parse(found.as_str())?);
        }
        Ok(Self { text, references })
    }

    /// The placeholder expression: no text, no references
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            references: BTreeSet::new(),
        }
    }

    /// The raw formula text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Addresses this expression references, in ascending order
    pub fn references(&self) -> &BTreeSet<Address> {
        &self.references
    }

    /// Whether this is the placeholder expression
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Expression {}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
