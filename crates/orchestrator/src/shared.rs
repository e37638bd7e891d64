//! Shared-memory decomposition: a fixed thread pool advances contiguous
//! index blocks with a fork-join barrier between phases.
//!
//! Each step runs three parallel regions: density plus pressure, forces, and
//! integration. Within a region every worker writes only its own block and
//! reads the whole state, so no locks are needed; the join at the end of a
//! region is the phase barrier that makes the previous phase's writes
//! visible everywhere. The pool size follows the standard
//! `RAYON_NUM_THREADS` variable and does not affect the trajectory.

use kernel::{forces, integrate, ParticleArrays, SimParams, SmoothingKernel};
use rayon::prelude::*;

use crate::diagnostics;
use crate::partition;
use crate::RunReport;

/// Advance `state` in place by `nsteps` fixed timesteps on the global
/// thread pool.
///
/// Errs on invalid parameters, an empty particle set, or a detected
/// numerical blow-up; in the latter case `state` is left at the first broken
/// step for inspection.
pub fn run_shared(
    state: &mut ParticleArrays,
    params: &SimParams,
    nsteps: u64,
) -> Result<RunReport, String> {
    params.validate()?;
    if state.is_empty() {
        return Err("Cannot simulate an empty particle set".to_string());
    }

    let kernel = SmoothingKernel::new(params.smoothing_radius);
    let n = state.len();
    let workers = rayon::current_num_threads().max(1);
    let block = partition::chunk_len(n, workers);

    tracing::info!(
        "shared-memory run: {} particles, {} steps, {} workers",
        n,
        nsteps,
        workers
    );

    for step in 0..nsteps {
        // Density phase: own density/pressure block from all positions.
        {
            let pos = &state.pos;
            state
                .density
                .par_chunks_mut(block)
                .zip(state.pressure.par_chunks_mut(block))
                .enumerate()
                .for_each(|(b, (den, prs))| {
                    let start = b * block;
                    forces::compute_densities(den, start, pos, &kernel, params);
                    forces::compute_pressures(prs, den, params);
                });
        }

        // Force phase: the join above guarantees every density and pressure
        // is final before any worker starts reading them.
        {
            let (pos, vel, density, pressure) =
                (&state.pos, &state.vel, &state.density, &state.pressure);
            state
                .acc
                .par_chunks_mut(block)
                .enumerate()
                .for_each(|(b, out)| {
                    forces::accumulate_forces(
                        out,
                        b * block,
                        pos,
                        vel,
                        density,
                        pressure,
                        &kernel,
                        params,
                    );
                });
        }

        // Integration phase: positions may only move once no worker still
        // reads them, hence the separate region.
        {
            let acc = &state.acc;
            state
                .pos
                .par_chunks_mut(block)
                .zip(state.vel.par_chunks_mut(block))
                .zip(acc.par_chunks(block))
                .for_each(|((p, v), a)| integrate::advance(p, v, a, params));
        }

        let avg_speed = diagnostics::average_speed(&state.vel);
        if step % 10 == 0 {
            tracing::debug!("step {:5}, avg speed {:.6}", step, avg_speed);
        }

        if !state.all_finite() {
            return Err(format!(
                "Instability detected at step {}: non-finite position or density",
                step
            ));
        }
    }

    Ok(RunReport {
        steps: nsteps,
        sim_time: nsteps as f64 * params.dt,
    })
}
