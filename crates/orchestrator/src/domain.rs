//! Domain setup: deterministic initial particle placement.

use glam::DVec2;
use kernel::{ParticleArrays, SimParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Place `n` particles as a dam-break column at rest.
///
/// Rows fill the band `x in [W/4, W/2]` at spacing `h`, bottom-up starting
/// one smoothing radius above the floor margin, with a per-particle jitter in
/// `[0, 1)` added to `x` to break the perfect lattice. The jitter stream is
/// seeded from `params.spawn_jitter_seed`, so the same `n` and parameters
/// always produce the same initial state. All velocities start at zero.
///
/// Errs when `n` is zero or exceeds the number of spawn positions the band
/// can hold.
pub fn spawn_dam_break(n: usize, params: &SimParams) -> Result<ParticleArrays, String> {
    if n == 0 {
        return Err("Particle count must be at least 1".to_string());
    }

    let h = params.smoothing_radius;
    let margin = params.wall_margin();
    let x_lo = params.domain_width / 4.0;
    let x_hi = params.domain_width / 2.0;
    let y_top = params.domain_height - margin;

    let mut rng = StdRng::seed_from_u64(params.spawn_jitter_seed);
    let mut particles = ParticleArrays::with_capacity(n);

    // First row sits one radius above the floor so a resting column does not
    // start in wall contact.
    let mut y = margin + h;
    while y < y_top && particles.len() < n {
        let mut x = x_lo;
        while x <= x_hi && particles.len() < n {
            let jitter: f64 = rng.gen();
            particles.push_particle(DVec2::new(x + jitter, y));
            x += h;
        }
        y += h;
    }

    if particles.len() < n {
        return Err(format!(
            "Spawn band holds only {} particles, {} requested",
            particles.len(),
            n
        ));
    }

    tracing::info!("placed {} particles in the dam-break column", particles.len());
    Ok(particles)
}
