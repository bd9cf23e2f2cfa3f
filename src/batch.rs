//! Batch fan-out: one independent improvement job per batch item.

use std::time::Instant;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::codec::{self, DEPOT};
use crate::instance::Instance;
use crate::solver::RouteImprover;

/// A batch of tours plus the static data needed to rebuild each instance.
///
/// Tours are not depot-delimited at the ends; padding happens internally
/// before decomposition. `locations` lists the depot first, `demands` holds
/// one value per customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourBatch {
    /// `[batch][seq]` node indices, zero-padded to a common width
    pub tours: Vec<Vec<i64>>,
    /// `[batch][num_locations + 1][2]` coordinates, depot first
    pub locations: Vec<Vec<[f64; 2]>>,
    /// `[batch][num_locations]` per-customer demand
    pub demands: Vec<Vec<f64>>,
    /// Shared vehicle capacity, in the same unit as the demands
    pub capacity: f64,
    /// Optional precomputed `[batch][n+1][n+1]` distance matrices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distances: Option<Vec<Vec<Vec<f64>>>>,
    /// Optional `[batch][num_locations + 1]` per-node service times, depot first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_times: Option<Vec<Vec<f64>>>,
    /// Optional route duration limit shared by the batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_limit: Option<f64>,
}

impl TourBatch {
    /// Number of items in the batch.
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Whether the batch holds no items.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }
}

/// Improve every tour of the batch independently and reassemble the result.
///
/// Each item is decomposed into subroutes, validated into an [`Instance`],
/// and submitted as one job to the rayon pool; validation failures abort the
/// whole batch before anything is dispatched. Results land in the output row
/// matching their original batch index no matter which job finishes first.
/// The final matrix is trimmed once, globally, to the rightmost column any
/// item still uses, so the output width is set by the longest solution.
pub fn refine_batch<S: RouteImprover>(
    batch: &TourBatch,
    improver: &S,
    iterations: u32,
) -> Result<Vec<Vec<i64>>> {
    if batch.locations.len() != batch.len() || batch.demands.len() != batch.len() {
        bail!(
            "batch shape mismatch: {} tours, {} location sets, {} demand sets",
            batch.len(),
            batch.locations.len(),
            batch.demands.len()
        );
    }
    if let Some(matrices) = &batch.distances {
        if matrices.len() != batch.len() {
            bail!(
                "batch shape mismatch: {} tours but {} distance matrices",
                batch.len(),
                matrices.len()
            );
        }
    }
    if let Some(service_times) = &batch.service_times {
        if service_times.len() != batch.len() {
            bail!(
                "batch shape mismatch: {} tours but {} service time sets",
                batch.len(),
                service_times.len()
            );
        }
    }
    if batch.is_empty() {
        return Ok(Vec::new());
    }

    // Validate everything up front; nothing is dispatched for a bad batch.
    let mut jobs = Vec::with_capacity(batch.len());
    for i in 0..batch.len() {
        let distances = batch
            .distances
            .as_ref()
            .map(|matrices| matrices[i].as_slice());
        let mut instance = Instance::build(
            &batch.locations[i],
            &batch.demands[i],
            batch.capacity,
            distances,
        )
        .with_context(|| format!("invalid instance at batch index {}", i))?;
        if let Some(service_times) = &batch.service_times {
            instance = instance
                .with_service_times(service_times[i].clone())
                .with_context(|| format!("invalid instance at batch index {}", i))?;
        }
        if let Some(limit) = batch.duration_limit {
            instance = instance.with_duration_limit(limit);
        }

        let mut padded = Vec::with_capacity(batch.tours[i].len() + 2);
        padded.push(DEPOT);
        padded.extend_from_slice(&batch.tours[i]);
        padded.push(DEPOT);
        jobs.push((instance, codec::decompose(&padded)));
    }

    // Wide enough for any consistent solver result; trimmed below.
    let width = batch
        .locations
        .iter()
        .map(|locations| locations.len() * 2)
        .max()
        .unwrap_or(0);

    info!("dispatching {} improvement jobs", batch.len());
    let started = Instant::now();

    let mut rows: Vec<Vec<i64>> = jobs
        .par_iter()
        .enumerate()
        .map(|(i, (instance, subroutes))| {
            let improved = improver
                .improve(instance, subroutes, iterations)
                .with_context(|| format!("batch index {}", i))?;
            debug!("batch index {}: {} routes after improvement", i, improved.len());
            Ok(codec::merge(&improved, width))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        "improved {} tours in {:.2}s",
        batch.len(),
        started.elapsed().as_secs_f64()
    );

    // Trim once, globally, then drop column 0: the shared leading depot slot.
    codec::trim_trailing_zeros(&mut rows);
    for row in rows.iter_mut() {
        row.remove(0);
    }

    Ok(rows)
}
