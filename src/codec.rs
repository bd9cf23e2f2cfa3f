//! Conversion between flat padded tours and per-vehicle subroutes.
//!
//! A tour is one batch item's complete multi-vehicle solution flattened into
//! a single sequence, with returns to the depot (index 0) acting as route
//! separators. The solver works on individual depot-to-depot subroutes, so a
//! tour is decomposed before the call and the improved subroutes are merged
//! back into a fixed-width padded row afterwards.

use itertools::Itertools;

/// Node index of the depot in every instance.
pub const DEPOT: i64 = 0;

/// Split a depot-padded tour into depot-to-depot subroutes.
///
/// Each subroute starts and ends with the depot. Consecutive depot visits
/// mark an unused vehicle slot and are skipped. The caller must pad the tour
/// with a leading and trailing depot before calling.
pub fn decompose(tour: &[i64]) -> Vec<Vec<i64>> {
    tour.iter()
        .positions(|&node| node == DEPOT)
        .tuple_windows()
        .filter(|&(i, j)| j - i > 1)
        .map(|(i, j)| tour[i..=j].to_vec())
        .collect()
}

/// Merge subroutes back into a single zero-padded tour of `target_len`.
///
/// Subroutes keep their leading depot; the trailing depot is dropped so that
/// the next subroute's leading depot doubles as the separator. Vestigial
/// subroutes (depot-depot, length <= 2) are skipped.
///
/// # Panics
///
/// Panics when the merged routes do not fit in `target_len`. That can only
/// happen when the solver returned an inconsistent result, which is a logic
/// defect rather than a recoverable condition. The policy width of
/// `2 * (number of locations including the depot)` is always sufficient for
/// consistent results.
pub fn merge(subroutes: &[Vec<i64>], target_len: usize) -> Vec<i64> {
    let mut tour = vec![DEPOT; target_len];
    let mut cursor = 0;

    for subroute in subroutes {
        if subroute.len() <= 2 {
            continue;
        }

        let body = &subroute[..subroute.len() - 1];
        assert!(
            cursor + body.len() <= target_len,
            "merged routes overflow target length {} at cursor {}",
            target_len,
            cursor
        );
        tour[cursor..cursor + body.len()].copy_from_slice(body);
        cursor += body.len();
    }

    tour
}

/// Find the rightmost column holding a non-zero entry in any row.
///
/// Returns `None` when every entry is zero. The trim point is global across
/// the batch so that the output stays rectangular; rows with shorter
/// solutions simply keep their padding.
pub fn rightmost_used_column(rows: &[Vec<i64>]) -> Option<usize> {
    rows.iter()
        .filter_map(|row| row.iter().rposition(|&node| node != DEPOT))
        .max()
}

/// Truncate every row after the batch-wide rightmost non-zero column.
///
/// Applying this to an already trimmed batch is a no-op.
pub fn trim_trailing_zeros(rows: &mut Vec<Vec<i64>>) {
    if let Some(last) = rightmost_used_column(rows) {
        for row in rows.iter_mut() {
            row.truncate(last + 1);
        }
    }
}
