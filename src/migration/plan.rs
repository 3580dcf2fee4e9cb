//! Pure reconciliation of registered names against the applied ledger.

use std::collections::HashSet;

/// Registered names that are not in `applied`, sorted ascending.
///
/// Applied names that are not registered are ignored.
pub fn pending_names(registered: &[String], applied: &[String]) -> Vec<String> {
    let applied: HashSet<&str> = applied.iter().map(String::as_str).collect();

    let mut pending: Vec<String> = registered
        .iter()
        .filter(|name| !applied.contains(name.as_str()))
        .cloned()
        .collect();

    // Execution order depends on this sort, not on registration order
    pending.sort();
    pending
}

/// Applied names that are no longer registered, in ledger order.
pub fn orphaned_names(registered: &[String], applied: &[String]) -> Vec<String> {
    let registered: HashSet<&str> = registered.iter().map(String::as_str).collect();

    applied
        .iter()
        .filter(|name| !registered.contains(name.as_str()))
        .cloned()
        .collect()
}

/// The leading `count` entries of `applied`, or all of them when `count` is
/// zero or not smaller than the number applied.
pub fn select_for_revert(applied: &[String], count: usize) -> &[String] {
    let n = applied.len();
    let k = if count == 0 || count >= n { n } else { count };
    &applied[..k]
}
