//! Gateway to the native HGS-CVRP library.
//!
//! The metaheuristic itself lives behind a C ABI in `libhgscvrp`; this module
//! owns the loaded library handle, marshals one instance per call, and
//! applies the fallback policy: a failed improvement attempt returns the
//! original routes instead of surfacing an error.

use std::os::raw::{c_char, c_double, c_int};
use std::panic;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use libloading::Library;
use log::warn;

use crate::config::Config;
use crate::error::{ImproveError, ValidationError};
use crate::exchange::Exchange;
use crate::instance::Instance;

/// Mirror of `AlgorithmParameters` in `AlgorithmParameters.h`.
#[repr(C)]
struct CAlgorithmParameters {
    nb_granular: c_int,
    mu: c_int,
    lambda: c_int,
    nb_elite: c_int,
    nb_close: c_int,
    target_feasible: c_double,
    seed: c_int,
    nb_iter: c_int,
    time_limit: c_double,
    use_swap_star: c_int,
}

impl From<&Config> for CAlgorithmParameters {
    fn from(config: &Config) -> Self {
        CAlgorithmParameters {
            nb_granular: config.granularity as c_int,
            mu: config.min_pop_size as c_int,
            lambda: config.generation_size as c_int,
            nb_elite: config.n_elite as c_int,
            nb_close: config.n_closest as c_int,
            target_feasible: config.target_feasible_ratio,
            seed: config.seed,
            nb_iter: config.max_iterations as c_int,
            time_limit: config.time_limit,
            use_swap_star: config.use_swap_star as c_int,
        }
    }
}

/// `int local_search(int n, double* x, double* y, double* dist_mtx,
///     double* serv_time, double* dem, double vehicleCapacity,
///     double durationLimit, char isDurationConstraint, int max_nbVeh,
///     const struct AlgorithmParameters* ap, char verbose, int callid,
///     int count)`
type LocalSearchFn = unsafe extern "C" fn(
    c_int,
    *const c_double,
    *const c_double,
    *const c_double,
    *const c_double,
    *const c_double,
    c_double,
    c_double,
    c_char,
    c_int,
    *const CAlgorithmParameters,
    c_char,
    c_int,
    c_int,
) -> c_int;

const LOCAL_SEARCH_SYMBOL: &[u8] = b"local_search";

/// The improvement seam the batch runner dispatches through.
///
/// Implementations recover per-call solver failures internally and hand back
/// the original routes; only configuration-level problems (a depot that is
/// not node 0) surface as errors.
pub trait RouteImprover: Sync {
    /// Improve depot-delimited routes for one instance, best effort.
    fn improve(
        &self,
        instance: &Instance,
        routes: &[Vec<i64>],
        iterations: u32,
    ) -> Result<Vec<Vec<i64>>, ValidationError>;
}

/// Gateway owning one loaded `libhgscvrp` handle and a fixed configuration.
///
/// Loading happens once per process; a missing or incompatible library is a
/// startup failure, not something to fall back from.
pub struct HgsSolver {
    library: Library,
    config: Config,
    verbose: bool,
}

impl HgsSolver {
    /// Load the native library and verify the local search entry point.
    pub fn load(path: &Path, config: Config) -> Result<Self> {
        let library = panic::catch_unwind(|| unsafe { Library::new(path) })
            .map_err(|_| anyhow!("loading {} panicked", path.display()))?
            .with_context(|| format!("could not load HGS library {}", path.display()))?;

        // Resolve the symbol once up front so an incompatible build fails
        // here instead of inside the first batch.
        unsafe {
            library
                .get::<LocalSearchFn>(LOCAL_SEARCH_SYMBOL)
                .with_context(|| {
                    format!("{} does not export `local_search`", path.display())
                })?;
        }

        Ok(HgsSolver {
            library,
            config,
            verbose: false,
        })
    }

    /// Forward the solver's own progress output to stdout.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The configuration every call runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn try_improve(
        &self,
        instance: &Instance,
        routes: &[Vec<i64>],
        iterations: u32,
    ) -> Result<Vec<Vec<i64>>, ImproveError> {
        let exchange = Exchange::create();
        exchange
            .write_request(routes)
            .map_err(|source| ImproveError::Request {
                path: exchange.request_path().to_path_buf(),
                source,
            })?;

        let n = instance.node_count();
        let dist_flat: Vec<c_double> = instance.distances.iter().flatten().copied().collect();
        let (duration_limit, is_duration_constraint) = match instance.duration_limit {
            Some(limit) => (limit, 1 as c_char),
            None => (f64::MAX, 0 as c_char),
        };
        let max_vehicles = instance
            .max_vehicles
            .unwrap_or(routes.len())
            .min(c_int::MAX as usize) as c_int;
        let params = CAlgorithmParameters::from(&self.config);

        let local_search = unsafe {
            self.library
                .get::<LocalSearchFn>(LOCAL_SEARCH_SYMBOL)
                .map_err(|err| ImproveError::SolverCall(err.to_string()))?
        };
        let status = unsafe {
            local_search(
                n as c_int,
                instance.x.as_ptr(),
                instance.y.as_ptr(),
                dist_flat.as_ptr(),
                instance.service_times.as_ptr(),
                instance.demands.as_ptr(),
                instance.capacity,
                duration_limit,
                is_duration_constraint,
                max_vehicles,
                &params,
                self.verbose as c_char,
                exchange.call_id(),
                iterations as c_int,
            )
        };
        if status != 0 {
            return Err(ImproveError::SolverStatus(status));
        }

        let improved = exchange
            .read_response()
            .map_err(|source| ImproveError::Response {
                path: exchange.response_path().to_path_buf(),
                source,
            })?;
        if improved.is_empty() {
            return Err(ImproveError::EmptyResponse(
                exchange.response_path().to_path_buf(),
            ));
        }

        Ok(improved)
    }
}

impl RouteImprover for HgsSolver {
    /// Run the native local search on one instance.
    ///
    /// The vehicle bound defaults to the number of supplied routes. Any
    /// failure of the call or the response decode is logged and answered
    /// with the unmodified input routes.
    fn improve(
        &self,
        instance: &Instance,
        routes: &[Vec<i64>],
        iterations: u32,
    ) -> Result<Vec<Vec<i64>>, ValidationError> {
        if instance.depot != 0 {
            return Err(ValidationError::DepotNotZero(instance.depot));
        }
        if routes.is_empty() {
            return Ok(Vec::new());
        }

        match self.try_improve(instance, routes, iterations) {
            Ok(improved) => Ok(improved),
            Err(err) => {
                warn!("local search failed, keeping original routes: {}", err);
                Ok(routes.to_vec())
            }
        }
    }
}
