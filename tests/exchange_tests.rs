//! Unit tests for the solver exchange protocol: route files, call
//! identities, and cleanup guarantees.

use std::collections::HashSet;
use std::fs;

use hgs_refine::exchange::{read_routes, write_routes, Exchange};

#[test]
fn test_call_ids_are_positive_and_distinct() {
    let mut seen = HashSet::new();
    for _ in 0..64 {
        let exchange = Exchange::create();
        assert!(exchange.call_id() >= 0);
        seen.insert(exchange.call_id());
    }

    // The random perturbation keeps even same-instant ids apart.
    assert!(seen.len() > 1);
}

#[test]
fn test_paths_are_keyed_by_call_id() {
    let exchange = Exchange::create();
    let id = exchange.call_id().to_string();

    let request = exchange.request_path().file_name().unwrap().to_str().unwrap();
    let response = exchange.response_path().file_name().unwrap().to_str().unwrap();
    assert_eq!(request, format!("route-{}", id));
    assert_eq!(response, format!("swapstar-result-{}", id));
}

#[test]
fn test_request_encoding_omits_depot_markers() {
    let exchange = Exchange::create();
    let routes = vec![vec![0, 3, 1, 0], vec![0, 2, 0]];
    exchange.write_request(&routes).unwrap();

    let written = fs::read_to_string(exchange.request_path()).unwrap();
    assert_eq!(written, "Route #1: 3 1\nRoute #2: 2\n");
}

#[test]
fn test_request_removed_on_drop() {
    let path = {
        let exchange = Exchange::create();
        exchange.write_request(&[vec![0, 1, 0]]).unwrap();
        assert!(exchange.request_path().exists());
        exchange.request_path().to_path_buf()
    };

    assert!(!path.exists());
}

#[test]
fn test_response_round_trip() {
    let exchange = Exchange::create();
    fs::write(
        exchange.response_path(),
        "Route #1: 4 2\nRoute #2: 1 3 5\n",
    )
    .unwrap();

    let routes = exchange.read_response().unwrap();
    assert_eq!(routes, vec![vec![0, 4, 2, 0], vec![0, 1, 3, 5, 0]]);

    // Successful decode removes the response artifact.
    assert!(!exchange.response_path().exists());
}

#[test]
fn test_decoding_stops_at_trailing_non_route_line() {
    let exchange = Exchange::create();
    fs::write(
        exchange.response_path(),
        "Route #1: 2\nCost 42.0\nRoute #9: 7\n",
    )
    .unwrap();

    let routes = exchange.read_response().unwrap();
    assert_eq!(routes, vec![vec![0, 2, 0]]);
}

#[test]
fn test_route_line_without_separator_fails() {
    // A mangled route line is a failed decode, not a vestigial route.
    let exchange = Exchange::create();
    fs::write(exchange.response_path(), "Route #1 2 3\n").unwrap();

    let result = exchange.read_response();
    assert!(result.is_err());
    fs::remove_file(exchange.response_path()).unwrap();
}

#[test]
fn test_read_missing_response_fails() {
    let exchange = Exchange::create();
    assert!(exchange.read_response().is_err());
}

#[test]
fn test_write_read_route_file_round_trip() {
    let dir = std::env::temp_dir().join("hgs-refine-roundtrip-test");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("routes.txt");

    let routes = vec![vec![0, 6, 5, 4, 0], vec![0, 1, 0]];
    write_routes(&routes, &path).unwrap();
    let parsed = read_routes(&path).unwrap();

    assert_eq!(parsed, routes);
    fs::remove_file(&path).unwrap();
}
