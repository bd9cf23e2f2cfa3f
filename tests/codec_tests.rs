//! Unit tests for tour decomposition, merging, and trimming.

use hgs_refine::codec::{decompose, merge, rightmost_used_column, trim_trailing_zeros};

#[test]
fn test_decompose_two_vehicles() {
    let tour = vec![0, 3, 1, 0, 2, 0];
    let subroutes = decompose(&tour);

    assert_eq!(subroutes.len(), 2);
    assert_eq!(subroutes[0], vec![0, 3, 1, 0]);
    assert_eq!(subroutes[1], vec![0, 2, 0]);
}

#[test]
fn test_decompose_single_vehicle_uses_all_nodes() {
    let tour = vec![0, 4, 2, 1, 3, 0];
    let subroutes = decompose(&tour);

    assert_eq!(subroutes.len(), 1);
    assert_eq!(subroutes[0], vec![0, 4, 2, 1, 3, 0]);
}

#[test]
fn test_decompose_skips_unused_vehicle_slots() {
    // Consecutive depot visits are empty vehicles, not subroutes.
    let tour = vec![0, 0, 1, 2, 0, 0, 3, 0, 0];
    let subroutes = decompose(&tour);

    assert_eq!(subroutes.len(), 2);
    assert_eq!(subroutes[0], vec![0, 1, 2, 0]);
    assert_eq!(subroutes[1], vec![0, 3, 0]);
}

#[test]
fn test_decompose_all_padding() {
    let tour = vec![0, 0, 0, 0];
    assert!(decompose(&tour).is_empty());
}

#[test]
fn test_merge_two_subroutes() {
    let subroutes = vec![vec![0, 3, 1, 0], vec![0, 2, 0]];
    let merged = merge(&subroutes, 10);

    assert_eq!(merged, vec![0, 3, 1, 0, 2, 0, 0, 0, 0, 0]);
}

#[test]
fn test_merge_skips_vestigial_subroutes() {
    let subroutes = vec![vec![0, 0], vec![0, 5, 0], vec![0]];
    let merged = merge(&subroutes, 6);

    assert_eq!(merged, vec![0, 5, 0, 0, 0, 0]);
}

#[test]
fn test_merge_empty_collection_is_all_zero() {
    assert_eq!(merge(&[], 4), vec![0, 0, 0, 0]);
}

#[test]
#[should_panic(expected = "overflow")]
fn test_merge_overflow_panics() {
    let subroutes = vec![vec![0, 1, 2, 3, 0]];
    merge(&subroutes, 3);
}

#[test]
fn test_decompose_merge_round_trip() {
    // Visitation order within each vehicle survives the round trip.
    let tour = vec![0, 7, 2, 0, 5, 0, 1, 4, 3, 0];
    let merged = merge(&decompose(&tour), tour.len());

    assert_eq!(merged, tour);
}

#[test]
fn test_round_trip_compacts_unused_slots() {
    let tour = vec![0, 2, 0, 0, 1, 0, 0, 0];
    let merged = merge(&decompose(&tour), tour.len());

    assert_eq!(merged, vec![0, 2, 0, 1, 0, 0, 0, 0]);
}

#[test]
fn test_rightmost_used_column() {
    let rows = vec![vec![0, 1, 0, 0], vec![0, 2, 3, 0]];
    assert_eq!(rightmost_used_column(&rows), Some(2));

    let all_zero = vec![vec![0, 0], vec![0, 0]];
    assert_eq!(rightmost_used_column(&all_zero), None);
}

#[test]
fn test_trim_is_idempotent() {
    let mut rows = vec![vec![0, 1, 0, 0, 0], vec![0, 2, 3, 0, 0]];
    trim_trailing_zeros(&mut rows);
    assert_eq!(rows, vec![vec![0, 1, 0], vec![0, 2, 3]]);

    let once = rows.clone();
    trim_trailing_zeros(&mut rows);
    assert_eq!(rows, once);
}

#[test]
fn test_trim_is_global_not_per_row() {
    // The longest row decides the width; shorter rows keep their padding.
    let mut rows = vec![vec![0, 1, 0, 0, 0, 0], vec![0, 2, 3, 4, 5, 0]];
    trim_trailing_zeros(&mut rows);

    assert_eq!(rows[0], vec![0, 1, 0, 0, 0]);
    assert_eq!(rows[1], vec![0, 2, 3, 4, 5]);
}
