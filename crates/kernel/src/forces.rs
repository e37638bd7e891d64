//! Density summation, equation-of-state evaluation, and force accumulation.
//!
//! Every routine works on a contiguous block of particle indices while
//! reading the whole state. A block is described by the output slice plus the
//! global index of its first particle, so a caller can hand out disjoint
//! output blocks to workers and let each read all positions without
//! synchronization. For a fixed particle state the result of each routine is
//! a pure function of `(block, state)`: the inner sweep always visits
//! particles in ascending global index, which keeps trajectories identical
//! no matter how the blocks are distributed.

use glam::DVec2;

use crate::eos;
use crate::params::SimParams;
use crate::smoothing::{SmoothingKernel, MIN_PAIR_DISTANCE};

// ---------------------------------------------------------------------------
// Density
// ---------------------------------------------------------------------------

/// Fill `density` with the kernel-weighted mass sum for the block starting at
/// global index `start`.
///
/// The sum runs over all particles within the support radius, including the
/// particle itself, so an isolated particle reports `m * W(0)` rather than
/// zero.
///
/// # Arguments
/// * `density` - Output block, one entry per owned particle
/// * `start` - Global index of the first owned particle
/// * `pos` - Positions of all particles
/// * `kernel` - Smoothing kernel factors
/// * `params` - Simulation parameters
pub fn compute_densities(
    density: &mut [f64],
    start: usize,
    pos: &[DVec2],
    kernel: &SmoothingKernel,
    params: &SimParams,
) {
    let m = params.particle_mass;
    for (k, rho) in density.iter_mut().enumerate() {
        let pos_i = pos[start + k];
        let mut sum = 0.0;
        for &pos_j in pos {
            let r_sq = pos_i.distance_squared(pos_j);
            sum += m * kernel.poly6(r_sq);
        }
        *rho = sum;
    }
}

// ---------------------------------------------------------------------------
// Pressure
// ---------------------------------------------------------------------------

/// Fill `pressure` from `density` through the equation of state.
///
/// Purely local: entry `k` of the output depends only on entry `k` of the
/// input, so both slices must cover the same block.
pub fn compute_pressures(pressure: &mut [f64], density: &[f64], params: &SimParams) {
    for (p, &rho) in pressure.iter_mut().zip(density) {
        *p = eos::linear_eos(rho, params.rest_density, params.stiffness);
    }
}

// ---------------------------------------------------------------------------
// Forces
// ---------------------------------------------------------------------------

/// Fill `acc` with the total acceleration of the block starting at global
/// index `start`: pressure plus viscosity plus gravity.
///
/// For particle `i` and each neighbor `j` within the support radius:
///
/// ```text
/// a_pressure += u_ij * m (p_i + p_j) / (2 rho_i rho_j) * g(r)
/// a_viscosity += mu m (v_j - v_i) / (rho_i rho_j) * L(r)
/// ```
///
/// with `u_ij` the unit vector from `i` toward `j`, `g` the spiky gradient
/// factor, and `L` the viscosity Laplacian. The pairwise terms are
/// antisymmetric under exchange of `i` and `j`, so internal forces conserve
/// the total momentum of the fluid. Gravity enters as a plain acceleration,
/// not scaled by density.
///
/// All densities and pressures must be current for every particle before the
/// call; the output slice is overwritten, never accumulated into.
///
/// # Arguments
/// * `acc` - Output block, one entry per owned particle
/// * `start` - Global index of the first owned particle
/// * `pos` - Positions of all particles
/// * `vel` - Velocities of all particles
/// * `density` - Densities of all particles
/// * `pressure` - Pressures of all particles
/// * `kernel` - Smoothing kernel factors
/// * `params` - Simulation parameters
#[allow(clippy::too_many_arguments)]
pub fn accumulate_forces(
    acc: &mut [DVec2],
    start: usize,
    pos: &[DVec2],
    vel: &[DVec2],
    density: &[f64],
    pressure: &[f64],
    kernel: &SmoothingKernel,
    params: &SimParams,
) {
    let m = params.particle_mass;
    let mu = params.viscosity;
    let gravity = DVec2::from(params.gravity);

    for (k, out) in acc.iter_mut().enumerate() {
        let i = start + k;
        let pos_i = pos[i];
        let vel_i = vel[i];
        let rho_i = density[i];
        let p_i = pressure[i];

        let mut a_pressure = DVec2::ZERO;
        let mut a_viscosity = DVec2::ZERO;

        for j in 0..pos.len() {
            if j == i {
                continue;
            }
            let d = pos[j] - pos_i;
            let r_sq = d.length_squared();
            if r_sq >= kernel.h_sq() {
                continue;
            }
            let r = r_sq.sqrt();
            if r < MIN_PAIR_DISTANCE {
                // coincident pair, no separation direction
                continue;
            }
            let u_ij = d / r;
            let rho_prod = rho_i * density[j];
            a_pressure +=
                u_ij * (m * (p_i + pressure[j]) / (2.0 * rho_prod) * kernel.spiky_gradient(r));
            a_viscosity +=
                (vel[j] - vel_i) * (mu * m / rho_prod * kernel.viscosity_laplacian(r));
        }

        *out = a_pressure + a_viscosity + gravity;
    }
}
