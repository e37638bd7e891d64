//! Replicated-state decomposition: one thread per rank, each holding a full
//! replica of the particle state and owning one contiguous index block.
//!
//! Per step every rank computes density and pressure for its own block,
//! allgathers the scalar blocks, computes forces and integrates its own
//! block against the now-consistent replica, then allgathers the motion
//! blocks. Both collectives are lock-step barriers: no rank can enter step
//! `t + 1` while a peer is still inside step `t`. Because each particle's
//! sums are always computed by exactly one rank from a full sweep in index
//! order, the trajectory is identical to the shared-memory strategy for any
//! rank count.

use std::ops::Range;
use std::thread;

use kernel::{forces, integrate, ParticleArrays, SimParams, SmoothingKernel};

use crate::comm::RankComm;
use crate::diagnostics;
use crate::partition;
use crate::RunReport;

/// Advance `state` in place by `nsteps` fixed timesteps on `ranks` rank
/// threads.
///
/// The caller's `state` plays the role of the launcher's initial broadcast:
/// every rank starts from a clone, and at the end the owned blocks are
/// gathered back into `state`. Errs on invalid parameters, an empty particle
/// set, a zero rank count, a broken collective, or a detected numerical
/// blow-up.
pub fn run_replicated(
    state: &mut ParticleArrays,
    params: &SimParams,
    nsteps: u64,
    ranks: usize,
) -> Result<RunReport, String> {
    params.validate()?;
    if state.is_empty() {
        return Err("Cannot simulate an empty particle set".to_string());
    }
    if ranks == 0 {
        return Err("Rank count must be at least 1".to_string());
    }

    let n = state.len();
    let ranges = partition::block_ranges(n, ranks);
    let comms = RankComm::group(ranks);

    tracing::info!(
        "replicated run: {} particles, {} steps, {} ranks",
        n,
        nsteps,
        ranks
    );

    let blocks = thread::scope(|s| {
        let mut handles = Vec::with_capacity(ranks);
        for comm in comms {
            let replica = state.clone();
            let ranges = &ranges;
            handles.push(s.spawn(move || rank_loop(replica, comm, ranges, params, nsteps)));
        }

        let mut blocks = Vec::with_capacity(handles.len());
        for handle in handles {
            let block = handle
                .join()
                .map_err(|_| "Rank thread panicked".to_string())??;
            blocks.push(block);
        }
        Ok::<_, String>(blocks)
    })?;

    // Gather the owned blocks back into the caller's state, mirroring the
    // final collective of a launcher-run job.
    for (range, block) in ranges.iter().zip(&blocks) {
        if block.len() != range.len() {
            return Err(format!(
                "Rank block holds {} particles, expected {}",
                block.len(),
                range.len()
            ));
        }
        state.pos[range.clone()].copy_from_slice(&block.pos);
        state.vel[range.clone()].copy_from_slice(&block.vel);
        state.acc[range.clone()].copy_from_slice(&block.acc);
        state.density[range.clone()].copy_from_slice(&block.density);
        state.pressure[range.clone()].copy_from_slice(&block.pressure);
    }

    Ok(RunReport {
        steps: nsteps,
        sim_time: nsteps as f64 * params.dt,
    })
}

/// Body of one rank thread: advance a full replica for `nsteps`, computing
/// only the owned block, and return that block.
fn rank_loop(
    mut replica: ParticleArrays,
    comm: RankComm,
    ranges: &[Range<usize>],
    params: &SimParams,
    nsteps: u64,
) -> Result<ParticleArrays, String> {
    let kernel = SmoothingKernel::new(params.smoothing_radius);
    let own = ranges[comm.rank].clone();

    for step in 0..nsteps {
        // Density phase over the owned block.
        forces::compute_densities(
            &mut replica.density[own.clone()],
            own.start,
            &replica.pos,
            &kernel,
            params,
        );
        forces::compute_pressures(
            &mut replica.pressure[own.clone()],
            &replica.density[own.clone()],
            params,
        );

        // The scalar exchange is also the density-phase barrier.
        comm.allgather_scalars(step, ranges, &mut replica.density, &mut replica.pressure)?;

        // Force and integration phases over the owned block. No barrier is
        // needed between them: this rank only moves particles it owns, and
        // peers will not see the moves before the motion exchange.
        forces::accumulate_forces(
            &mut replica.acc[own.clone()],
            own.start,
            &replica.pos,
            &replica.vel,
            &replica.density,
            &replica.pressure,
            &kernel,
            params,
        );
        integrate::advance(
            &mut replica.pos[own.clone()],
            &mut replica.vel[own.clone()],
            &replica.acc[own.clone()],
            params,
        );

        comm.allgather_motion(step, ranges, &mut replica.pos, &mut replica.vel)?;

        // Every rank checks the same replica data, so a blow-up stops all
        // ranks at the same step and nobody is left waiting in a collective.
        if !replica.all_finite() {
            return Err(format!(
                "rank {}: instability detected at step {}: non-finite position or density",
                comm.rank, step
            ));
        }

        if comm.rank == 0 {
            let avg_speed = diagnostics::average_speed(&replica.vel);
            if step % 10 == 0 {
                tracing::debug!("step {:5}, avg speed {:.6}", step, avg_speed);
            }
        }
    }

    Ok(replica.extract(own))
}
