//! Error types for instance validation and improvement calls.

use std::path::PathBuf;
use thiserror::Error;

/// Violations detected while assembling or dispatching an instance.
///
/// These fail fast before anything reaches the native solver; the batch
/// runner aborts on the first one instead of dispatching bad data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A coordinate value is negative.
    #[error("coordinate ({x}, {y}) of node {node} must be non-negative")]
    NegativeCoordinate { node: usize, x: f64, y: f64 },
    /// A demand value is negative.
    #[error("demand {demand} of node {node} must be non-negative")]
    NegativeDemand { node: usize, demand: f64 },
    /// A service time is negative.
    #[error("service time {service_time} of node {node} must be non-negative")]
    NegativeServiceTime { node: usize, service_time: f64 },
    /// The service time vector does not cover every node.
    #[error("expected {nodes} service times, got {got}")]
    ServiceTimeCount { nodes: usize, got: usize },
    /// The distance matrix is not square or does not match the node count.
    #[error("distance matrix must be {nodes}x{nodes}, got {rows}x{cols}")]
    BadMatrixShape {
        nodes: usize,
        rows: usize,
        cols: usize,
    },
    /// A distance matrix entry is negative.
    #[error("distance from {from} to {to} must be non-negative, got {distance}")]
    NegativeDistance { from: usize, to: usize, distance: f64 },
    /// Coordinate and demand vectors disagree on the number of customers.
    #[error("{locations} locations cannot serve {customers} customers (expected customers + depot)")]
    LengthMismatch { locations: usize, customers: usize },
    /// The solver requires depot-first numbering.
    #[error("depot index must be 0, got {0}")]
    DepotNotZero(usize),
}

/// Failures of a single improvement call.
///
/// These never reach the batch caller: the gateway logs them and falls back
/// to the unimproved routes.
#[derive(Debug, Error)]
pub enum ImproveError {
    /// The native call returned a non-zero status.
    #[error("native local search returned status {0}")]
    SolverStatus(i32),
    /// The native call panicked or could not be entered.
    #[error("native local search call failed: {0}")]
    SolverCall(String),
    /// The response artifact was missing or unreadable.
    #[error("could not read solver response {path}: {source}")]
    Response {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The response decoded to no routes at all.
    #[error("solver response {0} contained no routes")]
    EmptyResponse(PathBuf),
    /// The request artifact could not be written.
    #[error("could not write solver request {path}: {source}")]
    Request {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
