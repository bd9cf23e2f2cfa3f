//! Per-item solver input: coordinates, demands, capacity, distances.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Integer scale applied to demands before they reach the solver.
///
/// The native solver accumulates demands in floating point; scaling them to
/// integer multiples keeps routes that sit exactly at the capacity boundary
/// from tipping infeasible through rounding.
pub const DEMAND_SCALE: f64 = 1000.0;

/// Slack added on top of the scaled capacity.
///
/// Large enough to absorb the floating-point error of the scaling
/// multiplication, small enough not to admit an extra unit of demand.
pub const CAPACITY_MARGIN: f64 = 0.001;

/// A single optimization instance in the shape the solver consumes.
///
/// All demand and capacity values are already rescaled; coordinates are
/// depot-first, with the depot's zero demand injected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Scaled demand per node, depot first
    pub demands: Vec<f64>,
    /// Service time per node, depot first
    pub service_times: Vec<f64>,
    /// Scaled vehicle capacity
    pub capacity: f64,
    /// Depot node index; the solver requires 0
    pub depot: usize,
    /// Explicit bound on the vehicle count, when known
    pub max_vehicles: Option<usize>,
    /// Route duration limit, when constrained
    pub duration_limit: Option<f64>,
    /// Full distance matrix over all nodes including the depot
    pub distances: Vec<Vec<f64>>,
}

impl Instance {
    /// Assemble and validate an instance from raw batch-item data.
    ///
    /// `locations` lists the depot first, then one point per customer;
    /// `demands` holds one value per customer (the depot's zero demand is
    /// injected here). When `distances` is `None` the matrix is computed
    /// from the coordinates. Every value is checked before the instance is
    /// allowed anywhere near the solver.
    pub fn build(
        locations: &[[f64; 2]],
        demands: &[f64],
        capacity: f64,
        distances: Option<&[Vec<f64>]>,
    ) -> Result<Self, ValidationError> {
        let n = locations.len();
        if n != demands.len() + 1 {
            return Err(ValidationError::LengthMismatch {
                locations: n,
                customers: demands.len(),
            });
        }

        for (node, loc) in locations.iter().enumerate() {
            if loc[0] < 0.0 || loc[1] < 0.0 {
                return Err(ValidationError::NegativeCoordinate {
                    node,
                    x: loc[0],
                    y: loc[1],
                });
            }
        }
        for (customer, &demand) in demands.iter().enumerate() {
            if demand < 0.0 {
                return Err(ValidationError::NegativeDemand {
                    node: customer + 1,
                    demand,
                });
            }
        }

        let distances = match distances {
            Some(matrix) => {
                validate_matrix(matrix, n)?;
                matrix.to_vec()
            }
            None => compute_distance_matrix(locations),
        };

        let mut scaled_demands = Vec::with_capacity(n);
        scaled_demands.push(0.0); // depot
        scaled_demands.extend(demands.iter().map(|d| d * DEMAND_SCALE));

        Ok(Instance {
            x: locations.iter().map(|loc| loc[0]).collect(),
            y: locations.iter().map(|loc| loc[1]).collect(),
            demands: scaled_demands,
            service_times: vec![0.0; n],
            capacity: capacity * DEMAND_SCALE + CAPACITY_MARGIN,
            depot: 0,
            max_vehicles: None,
            duration_limit: None,
            distances,
        })
    }

    /// Set per-node service times (depot first).
    pub fn with_service_times(mut self, service_times: Vec<f64>) -> Result<Self, ValidationError> {
        if service_times.len() != self.node_count() {
            return Err(ValidationError::ServiceTimeCount {
                nodes: self.node_count(),
                got: service_times.len(),
            });
        }
        for (node, &service_time) in service_times.iter().enumerate() {
            if service_time < 0.0 {
                return Err(ValidationError::NegativeServiceTime { node, service_time });
            }
        }
        self.service_times = service_times;
        Ok(self)
    }

    /// Bound the number of vehicles the solver may use.
    pub fn with_max_vehicles(mut self, max_vehicles: usize) -> Self {
        self.max_vehicles = Some(max_vehicles);
        self
    }

    /// Constrain the duration of every route.
    pub fn with_duration_limit(mut self, limit: f64) -> Self {
        self.duration_limit = Some(limit);
        self
    }

    /// Get the number of nodes including the depot.
    pub fn node_count(&self) -> usize {
        self.x.len()
    }
}

/// Check that a supplied matrix is square over `n` nodes with no negative entries.
fn validate_matrix(matrix: &[Vec<f64>], n: usize) -> Result<(), ValidationError> {
    if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
        return Err(ValidationError::BadMatrixShape {
            nodes: n,
            rows: matrix.len(),
            cols: matrix.first().map_or(0, |row| row.len()),
        });
    }

    for (from, row) in matrix.iter().enumerate() {
        for (to, &distance) in row.iter().enumerate() {
            if distance < 0.0 {
                return Err(ValidationError::NegativeDistance { from, to, distance });
            }
        }
    }

    Ok(())
}

/// Generate the full Euclidean distance matrix for all nodes.
fn compute_distance_matrix(locations: &[[f64; 2]]) -> Vec<Vec<f64>> {
    let n = locations.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..n {
            if i != j {
                let dx = locations[i][0] - locations[j][0];
                let dy = locations[i][1] - locations[j][1];
                matrix[i][j] = (dx * dx + dy * dy).sqrt();
            }
        }
    }

    matrix
}
