//! Particle state storage in struct-of-arrays layout.

use std::ops::Range;

use glam::DVec2;

/// Struct-of-arrays particle storage.
///
/// All arrays are parallel: index `i` across every array refers to the same
/// particle. Positions, velocities, and accelerations are 2D vectors; density
/// and pressure are scalar fields recomputed from the positions every step.
#[derive(Debug, Clone)]
pub struct ParticleArrays {
    /// Positions.
    pub pos: Vec<DVec2>,
    /// Velocities.
    pub vel: Vec<DVec2>,
    /// Accelerations, overwritten by every force pass.
    pub acc: Vec<DVec2>,
    /// Densities from the kernel-weighted neighbor sum.
    pub density: Vec<f64>,
    /// Pressures from the equation of state, signed.
    pub pressure: Vec<f64>,
}

impl ParticleArrays {
    /// Create an empty particle collection with no particles allocated.
    pub fn new() -> Self {
        Self {
            pos: Vec::new(),
            vel: Vec::new(),
            acc: Vec::new(),
            density: Vec::new(),
            pressure: Vec::new(),
        }
    }

    /// Create an empty collection with room reserved for `n` particles.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            pos: Vec::with_capacity(n),
            vel: Vec::with_capacity(n),
            acc: Vec::with_capacity(n),
            density: Vec::with_capacity(n),
            pressure: Vec::with_capacity(n),
        }
    }

    /// Return the number of particles currently stored.
    pub fn len(&self) -> usize {
        self.pos.len()
    }

    /// Return `true` if there are no particles.
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Append a single particle at rest at `pos`.
    ///
    /// Velocity, acceleration, density, and pressure are initialized to zero.
    pub fn push_particle(&mut self, pos: DVec2) {
        self.pos.push(pos);
        self.vel.push(DVec2::ZERO);
        self.acc.push(DVec2::ZERO);
        self.density.push(0.0);
        self.pressure.push(0.0);
    }

    /// Copy the index range `range` out as its own particle collection.
    pub fn extract(&self, range: Range<usize>) -> ParticleArrays {
        ParticleArrays {
            pos: self.pos[range.clone()].to_vec(),
            vel: self.vel[range.clone()].to_vec(),
            acc: self.acc[range.clone()].to_vec(),
            density: self.density[range.clone()].to_vec(),
            pressure: self.pressure[range].to_vec(),
        }
    }

    /// Return `true` when every position and density is finite.
    ///
    /// A `false` return means the integration has blown up, typically from a
    /// timestep too large for the forces in play; the run must stop instead
    /// of propagating NaNs further.
    pub fn all_finite(&self) -> bool {
        self.pos.iter().all(|p| p.is_finite()) && self.density.iter().all(|d| d.is_finite())
    }
}

impl Default for ParticleArrays {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_particle_arrays() {
        let pa = ParticleArrays::new();
        assert_eq!(pa.len(), 0);
        assert!(pa.is_empty());
        assert!(pa.all_finite());
    }

    #[test]
    fn push_and_len() {
        let mut pa = ParticleArrays::new();
        pa.push_particle(DVec2::new(1.0, 2.0));
        pa.push_particle(DVec2::new(-3.0, 0.5));
        assert_eq!(pa.len(), 2);
        assert!(!pa.is_empty());
        assert_eq!(pa.pos[0], DVec2::new(1.0, 2.0));
        assert_eq!(pa.pos[1], DVec2::new(-3.0, 0.5));
        // Velocity, acceleration, and scalar fields should be zero
        assert_eq!(pa.vel[0], DVec2::ZERO);
        assert_eq!(pa.acc[1], DVec2::ZERO);
        assert_eq!(pa.density[0], 0.0);
        assert_eq!(pa.pressure[1], 0.0);
    }

    #[test]
    fn extract_copies_the_requested_range() {
        let mut pa = ParticleArrays::new();
        for i in 0..5 {
            pa.push_particle(DVec2::new(i as f64, 0.0));
        }
        pa.density[3] = 42.0;

        let block = pa.extract(2..4);
        assert_eq!(block.len(), 2);
        assert_eq!(block.pos[0], DVec2::new(2.0, 0.0));
        assert_eq!(block.pos[1], DVec2::new(3.0, 0.0));
        assert_eq!(block.density[1], 42.0);
    }

    #[test]
    fn all_finite_detects_nan_position() {
        let mut pa = ParticleArrays::new();
        pa.push_particle(DVec2::ZERO);
        assert!(pa.all_finite());
        pa.pos[0].y = f64::NAN;
        assert!(!pa.all_finite());
    }

    #[test]
    fn all_finite_detects_infinite_density() {
        let mut pa = ParticleArrays::new();
        pa.push_particle(DVec2::ZERO);
        pa.density[0] = f64::INFINITY;
        assert!(!pa.all_finite());
    }
}
