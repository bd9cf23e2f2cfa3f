//! Configuration parameters for the HGS-CVRP local search.

use serde::{Deserialize, Serialize};

/// Algorithm parameters handed to the HGS-CVRP solver.
///
/// The field set mirrors `AlgorithmParameters.h` of the native library; the
/// configuration is fixed at gateway construction and shared read-only by all
/// improvement calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Granularity parameter for local search neighborhoods
    pub granularity: usize,
    /// Minimum population size (μ)
    pub min_pop_size: usize,
    /// Number of individuals in a generation (λ)
    pub generation_size: usize,
    /// Number of elite individuals considered in fitness calculation
    pub n_elite: usize,
    /// Number of closest solutions considered in diversity calculation
    pub n_closest: usize,
    /// Target proportion of feasible individuals
    pub target_feasible_ratio: f64,
    /// Random seed forwarded to the solver
    pub seed: i32,
    /// Iteration budget without improvement
    pub max_iterations: u32,
    /// Time limit in seconds; 0 disables the limit
    pub time_limit: f64,
    /// Enable the SWAP* neighborhood
    pub use_swap_star: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            granularity: 20,
            min_pop_size: 25,
            generation_size: 40,
            n_elite: 4,
            n_closest: 5,
            target_feasible_ratio: 0.2,
            seed: 0,
            max_iterations: 20000,
            time_limit: 0.0,
            use_swap_star: true,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the granularity parameter.
    pub fn with_granularity(mut self, g: usize) -> Self {
        self.granularity = g;
        self
    }

    /// Set the minimum population size.
    pub fn with_min_pop_size(mut self, size: usize) -> Self {
        self.min_pop_size = size;
        self
    }

    /// Set the generation size.
    pub fn with_generation_size(mut self, size: usize) -> Self {
        self.generation_size = size;
        self
    }

    /// Set the number of elite individuals.
    pub fn with_n_elite(mut self, n: usize) -> Self {
        self.n_elite = n;
        self
    }

    /// Set the number of closest solutions for diversity calculation.
    pub fn with_n_closest(mut self, n: usize) -> Self {
        self.n_closest = n;
        self
    }

    /// Set the target ratio of feasible individuals.
    pub fn with_target_feasible_ratio(mut self, ratio: f64) -> Self {
        self.target_feasible_ratio = ratio;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    /// Enable or disable the SWAP* neighborhood.
    pub fn with_swap_star(mut self, enabled: bool) -> Self {
        self.use_swap_star = enabled;
        self
    }
}
