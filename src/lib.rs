//! # HGS-Refine
//!
//! Batch refinement of machine-generated CVRP tours with the HGS-CVRP local
//! search ("Hybrid Genetic Search for the CVRP: Open-Source Implementation
//! and SWAP* Neighborhood", Thibaut Vidal).
//!
//! The metaheuristic itself runs inside the native `libhgscvrp` library; this
//! crate is the orchestration around it: decomposing flat padded tours into
//! per-vehicle routes, assembling numerically well-behaved instances,
//! exchanging warm-start and result routes with the solver process, and
//! fanning a batch of independent improvement jobs across a worker pool.
//! Improvement is best effort: a failed call falls back to the original tour
//! and never poisons the batch.

pub mod batch;
pub mod codec;
pub mod config;
pub mod error;
pub mod exchange;
pub mod instance;
pub mod solver;

pub use crate::batch::{refine_batch, TourBatch};
pub use crate::config::Config;
pub use crate::error::{ImproveError, ValidationError};
pub use crate::instance::Instance;
pub use crate::solver::{HgsSolver, RouteImprover};
