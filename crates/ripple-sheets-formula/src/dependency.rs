//! Cycle detection over the sheet's reference graph
//!
//! Before a cell's expression is replaced, the candidate reference set
//! must be checked: if the target cell is reachable from any of the
//! candidate references by following existing reference edges, the new
//! expression would close a cycle and must be rejected before anything
//! is mutated.

use ripple_sheets_core::{Address, Sheet};
use std::collections::{BTreeSet, HashSet};

/// Search for a reference chain that leads from the candidate references
/// back to `target`.
///
/// Returns the offending path (ending in `target`) if one exists, `None`
/// otherwise. Unset cells have no references and contribute no edges.
/// The walk is O(V+E) over the reachable subgraph; nothing is memoized
/// across calls because every committed update changes the graph.
pub fn find_cycle(
    sheet: &Sheet,
    target: &Address,
    candidate_refs: &BTreeSet<Address>,
) -> Option<Vec<Address>> {
    let mut visited = HashSet::new();
    let mut path = Vec::new();

    for start in candidate_refs {
        if visit(sheet, target, *start, &mut visited, &mut path) {
            return Some(path);
        }
    }

    None
}

fn visit(
    sheet: &Sheet,
    target: &Address,
    current: Address,
    visited: &mut HashSet<Address>,
    path: &mut Vec<Address>,
) -> bool {
    path.push(current);

    if current == *target {
        return true;
    }

    if !visited.insert(current) {
        path.pop();
        return false;
    }

    for next in sheet.references(&current) {
        if visit(sheet, target, next, visited, path) {
            return true;
        }
    }

    path.pop();
    false
}
