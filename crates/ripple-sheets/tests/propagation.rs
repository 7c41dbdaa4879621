//! Tests for the update protocol: cascading recomputation, edge
//! maintenance, and cycle rejection

use ripple_sheets::prelude::*;
use ripple_sheets::{evaluate, parse_formula, EvaluationContext};

fn addr(s: &str) -> Address {
    Address::parse(s).unwrap()
}

/// Snapshot of every cell's display form, for before/after comparisons
fn visible_state(sheet: &Sheet) -> Vec<String> {
    sheet.addresses().map(|a| sheet.display(&a)).collect()
}

/// Every set cell's stored value must equal evaluating its expression
/// against the current values of its references
fn assert_consistent(sheet: &Sheet) {
    for address in sheet.addresses() {
        let Some(cell) = sheet.cell(&address) else {
            continue;
        };
        if cell.is_empty() {
            continue;
        }
        let ast = parse_formula(cell.expression().text()).unwrap();
        let expected = evaluate(&ast, &EvaluationContext::new(sheet)).unwrap();
        assert_eq!(
            cell.value(),
            expected,
            "cell {address} is stale: stored {} but evaluates to {expected}",
            cell.value()
        );
    }
}

/// The walkthrough scenario: literals, a dependent sum, a cascaded
/// update, and a rejected cycle
#[test]
fn test_sum_cascade_and_cycle_rejection() {
    let mut sheet = Sheet::new(5, 5).unwrap();

    sheet.set("A1", "2").unwrap();
    sheet.set("A2", "5").unwrap();
    sheet.set("A3", "A1+A2").unwrap();
    assert_eq!(sheet.value(&addr("A3")), 7);

    // Changing A1 cascades into A3 before set() returns
    sheet.set("A1", "4").unwrap();
    assert_eq!(sheet.value(&addr("A3")), 9);

    // A1 = A3 would close A1 -> A3 -> A1
    let err = sheet.set("A1", "A3").unwrap_err();
    assert!(matches!(err, Error::CircularReference(_)));
    assert_eq!(sheet.value(&addr("A1")), 4);
    assert_consistent(&sheet);
}

/// A rejected set must leave the visible sheet state byte-for-byte
/// unchanged
#[test]
fn test_rejected_cycle_leaves_state_unchanged() {
    let mut sheet = Sheet::new(5, 5).unwrap();
    sheet.set("A1", "2").unwrap();
    sheet.set("A2", "A1+1").unwrap();
    sheet.set("A3", "A2+1").unwrap();

    let before = visible_state(&sheet);

    // Direct and transitive cycles
    assert!(sheet.set("A1", "A1").is_err());
    assert!(sheet.set("A1", "A3").is_err());
    assert!(sheet.set("A1", "A2+5").is_err());

    assert_eq!(visible_state(&sheet), before);
}

/// Re-pointing a cell's expression removes its stale dependency edges
#[test]
fn test_replacing_expression_drops_stale_dependencies() {
    let mut sheet = Sheet::new(5, 5).unwrap();
    sheet.set("A1", "4").unwrap();
    sheet.set("A2", "5").unwrap();
    sheet.set("A3", "A1+A2").unwrap();
    sheet.set("A4", "A1+A3").unwrap();
    assert_eq!(sheet.value(&addr("A4")), 13);

    // A4 becomes a literal: both edges go away
    sheet.set("A4", "2").unwrap();
    assert!(sheet.references(&addr("A4")).is_empty());
    assert_eq!(sheet.value(&addr("A4")), 2);

    // Subsequent changes to A1 no longer touch A4
    sheet.set("A1", "10").unwrap();
    assert_eq!(sheet.value(&addr("A4")), 2);
    assert_eq!(sheet.value(&addr("A3")), 15);
    assert_consistent(&sheet);
}

/// A longer dependency chain stays consistent through repeated updates
#[test]
fn test_deep_cascade() {
    let mut sheet = Sheet::new(5, 5).unwrap();
    sheet.set("A1", "4").unwrap();
    sheet.set("A3", "A1+1").unwrap();
    sheet.set("A4", "2").unwrap();
    sheet.set("B3", "A1+A3+A4").unwrap();
    sheet.set("C5", "B3+A3").unwrap();

    assert_eq!(sheet.value(&addr("B3")), 11);
    assert_eq!(sheet.value(&addr("C5")), 16);

    sheet.set("A1", "6").unwrap();
    assert_eq!(sheet.value(&addr("A3")), 7);
    assert_eq!(sheet.value(&addr("B3")), 15);
    assert_eq!(sheet.value(&addr("C5")), 22);
    assert_consistent(&sheet);
}

/// Referencing a cell that was never set reads as 0 and still creates
/// the observer edge, so a later set propagates forward
#[test]
fn test_forward_reference_to_unset_cell() {
    let mut sheet = Sheet::new(5, 5).unwrap();

    sheet.set("B1", "C1+1").unwrap();
    assert_eq!(sheet.value(&addr("B1")), 1);

    // C1 exists now as a placeholder with an observer edge
    assert!(sheet
        .cell(&addr("C1"))
        .unwrap()
        .observers()
        .contains(&addr("B1")));
    assert_eq!(sheet.display(&addr("C1")), "");

    sheet.set("C1", "4").unwrap();
    assert_eq!(sheet.value(&addr("B1")), 5);
    assert_consistent(&sheet);
}

/// Setting the same expression twice is idempotent: same value, same
/// edges, no edge churn on the second call
#[test]
fn test_idempotent_set() {
    let mut sheet = Sheet::new(5, 5).unwrap();
    sheet.set("A1", "2").unwrap();
    sheet.set("A3", "A1+1").unwrap();

    let refs_before = sheet.references(&addr("A3"));
    let stats = sheet.set("A3", "A1+1").unwrap();

    assert_eq!(sheet.value(&addr("A3")), 3);
    assert_eq!(sheet.references(&addr("A3")), refs_before);
    assert_eq!(stats.edges_attached, 0);
    assert_eq!(stats.edges_detached, 0);
}

/// Stats count the cascade, not just the target cell
#[test]
fn test_update_stats_count_cascade() {
    let mut sheet = Sheet::new(5, 5).unwrap();
    sheet.set("A1", "1").unwrap();
    sheet.set("A2", "A1+1").unwrap();
    sheet.set("A3", "A2+1").unwrap();

    let stats = sheet.set("A1", "5").unwrap();
    assert_eq!(stats.cells_recalculated, 3);
    assert_eq!(sheet.value(&addr("A3")), 7);
}

/// A diamond-shaped graph (two paths to the same dependent) converges to
/// consistent values
#[test]
fn test_diamond_dependencies() {
    let mut sheet = Sheet::new(5, 5).unwrap();
    sheet.set("A1", "1").unwrap();
    sheet.set("A2", "A1+1").unwrap();
    sheet.set("A3", "A1+A2").unwrap();

    sheet.set("A1", "10").unwrap();
    assert_eq!(sheet.value(&addr("A2")), 11);
    assert_eq!(sheet.value(&addr("A3")), 21);
    assert_consistent(&sheet);
}

/// The sheet survives any rejected update and keeps accepting work
#[test]
fn test_sheet_usable_after_errors() {
    let mut sheet = Sheet::new(5, 5).unwrap();
    sheet.set("A1", "1").unwrap();

    assert!(sheet.set("A1", "A1").is_err());
    assert!(sheet.set("A1", "2*3").is_err());
    assert!(sheet.set("bogus", "1").is_err());
    assert!(sheet.set("Z9", "1").is_err());

    sheet.set("A1", "8").unwrap();
    assert_eq!(sheet.value(&addr("A1")), 8);
}
